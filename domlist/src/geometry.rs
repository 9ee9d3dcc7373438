use core::cmp;

use crate::{ViewRange, Viewport};

/// Everything [`Geometry::compute`] needs, gathered in one place so the range math stays a pure
/// function that can be tested without a document.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryInputs {
    pub viewport: Viewport,
    pub scroll_top: u64,
    pub scroll_left: u64,
    pub item_count: usize,
    /// Fixed item width; `0` collapses the layout to a single column.
    pub item_width: u32,
    pub item_height: u32,
    pub header_height: u32,
    pub bottom_spacing: u32,
    /// Rows rendered beyond the viewport on each side.
    pub extra_rows: usize,
    /// When non-zero, the window snaps outward to `items_per_page * batch_pages` boundaries.
    pub batch_pages: usize,
    /// Append-only lists never evict, so the window start is pinned to 0.
    pub append_only: bool,
}

/// Derived viewport/content geometry, memoized by the engine and recomputed on demand.
///
/// All fields are a pure function of [`GeometryInputs`]; the engine invalidates its cached copy
/// whenever items, container size, or scroll position change.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub content_width: u64,
    pub content_height: u64,
    /// Resolved per-item footprint (width may come from a provider callback).
    pub item_width: u32,
    pub item_height: u32,
    pub header_height: u32,
    pub bottom_spacing: u32,
    pub items_per_row: usize,
    pub items_per_page: usize,
    pub total_rows: usize,
    pub visible_first: usize,
    pub visible_last: usize, // exclusive
    /// Scroll offset after clamping to the scrollable extent.
    pub scroll_top: u64,
    pub scroll_left: u64,
    pub scrolled_percent_x: f64,
    pub scrolled_percent_y: f64,
    pub at_top: bool,
    pub at_bottom: bool,
}

impl Geometry {
    pub fn compute(inputs: &GeometryInputs) -> Self {
        let item_h = u64::from(cmp::max(1, inputs.item_height));
        let header = u64::from(inputs.header_height);
        let bottom = u64::from(inputs.bottom_spacing);
        let view_h = u64::from(inputs.viewport.height);
        let view_w = u64::from(inputs.viewport.width);
        let count = inputs.item_count;

        let items_per_row = if inputs.item_width == 0 {
            1
        } else {
            cmp::max(1, (inputs.viewport.width / inputs.item_width) as usize)
        };
        let rows_per_page = cmp::max(1, (view_h / item_h) as usize);
        let items_per_page = rows_per_page * items_per_row;
        let total_rows = count.div_ceil(items_per_row);

        let content_height = total_rows as u64 * item_h + header + bottom;
        let content_width = if inputs.item_width == 0 {
            view_w
        } else {
            items_per_row as u64 * u64::from(inputs.item_width)
        };

        let max_top = content_height.saturating_sub(view_h);
        let scroll_top = inputs.scroll_top.min(max_top);
        let max_left = content_width.saturating_sub(view_w);
        let scroll_left = inputs.scroll_left.min(max_left);

        let top_in_items = scroll_top.saturating_sub(header);
        let first_row = (top_in_items / item_h) as usize;
        let mut first = if inputs.append_only {
            0
        } else {
            first_row.saturating_sub(inputs.extra_rows) * items_per_row
        };
        let last_row = (top_in_items.saturating_add(view_h).div_ceil(item_h) as usize)
            .saturating_add(inputs.extra_rows);
        let mut last = cmp::min(count, last_row.saturating_mul(items_per_row));

        if inputs.batch_pages > 0 {
            let chunk = items_per_page.saturating_mul(inputs.batch_pages);
            if chunk > 0 {
                first -= first % chunk;
                last = cmp::min(count, last.div_ceil(chunk).saturating_mul(chunk));
            }
        }

        first = cmp::min(first, count);
        last = cmp::max(last, first);

        let scrolled_percent_y = scrolled_percent(scroll_top, max_top);
        let scrolled_percent_x = scrolled_percent(scroll_left, max_left);

        Self {
            viewport_width: inputs.viewport.width,
            viewport_height: inputs.viewport.height,
            content_width,
            content_height,
            item_width: inputs.item_width,
            item_height: cmp::max(1, inputs.item_height),
            header_height: inputs.header_height,
            bottom_spacing: inputs.bottom_spacing,
            items_per_row,
            items_per_page,
            total_rows,
            visible_first: first,
            visible_last: last,
            scroll_top,
            scroll_left,
            scrolled_percent_x,
            scrolled_percent_y,
            at_top: scroll_top == 0,
            at_bottom: scroll_top.saturating_add(view_h) >= content_height,
        }
    }

    pub fn range(&self) -> ViewRange {
        ViewRange {
            first: self.visible_first,
            last: self.visible_last,
        }
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / cmp::max(1, self.items_per_row)
    }

    /// Top edge of the item at `index`, measured from the top of the content element.
    pub fn item_top(&self, index: usize) -> u64 {
        u64::from(self.header_height) + self.row_of(index) as u64 * u64::from(self.item_height)
    }

    /// Left edge of the item at `index`.
    pub fn item_left(&self, index: usize) -> u64 {
        (index % cmp::max(1, self.items_per_row)) as u64 * u64::from(self.item_width)
    }

    /// Maximum vertical scroll offset.
    pub fn max_scroll_top(&self) -> u64 {
        self.content_height
            .saturating_sub(u64::from(self.viewport_height))
    }
}

// A list that cannot scroll reports 100: it is already fully in view.
fn scrolled_percent(offset: u64, max: u64) -> f64 {
    if max == 0 {
        100.0
    } else {
        (offset as f64 / max as f64 * 100.0).min(100.0)
    }
}
