use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::engine::DomList;
use crate::{Host, LayoutChoice, Scrollbar};

/// Produces the node for one item id. Returning `None` signals missing backing data; the engine
/// logs and leaves the id unmaterialized.
pub type RenderItemFn<I, H> = Arc<dyn Fn(&mut H, &I) -> Option<<H as Host>::Node>>;

/// Custom item teardown. Returning `true` means the callback removed the node itself; on `false`
/// the engine falls back to plain node removal.
pub type RemoveItemFn<I, H> = Arc<dyn Fn(&mut H, <H as Host>::Node, &I) -> bool>;

/// A callback observing the engine (content-updated, user-scroll).
pub type ListCallback<I, H> = Arc<dyn Fn(&DomList<I, H>)>;

/// Fixed per-item width configuration.
#[derive(Clone)]
pub enum ItemWidth {
    /// A fixed width; `0` collapses the layout to a single column.
    Value(u32),
    /// A lazily evaluated width provider (called on every geometry recompute).
    Provider(Arc<dyn Fn() -> u32>),
}

impl ItemWidth {
    pub(crate) fn resolve(&self) -> u32 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for ItemWidth {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for ItemWidth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::DomList`].
///
/// Cheap to clone: callbacks are stored in `Arc`s. The render callback is required and therefore
/// part of the constructor signature; everything else has a documented default reachable through
/// `with_*` builders.
///
/// Callbacks carry no `Send + Sync` bounds: the engine is single-threaded by construction and
/// host node handles are typically not `Send`.
pub struct ListOptions<I, H: Host> {
    pub item_width: ItemWidth,
    pub item_height: u32,
    /// Pixels reserved above the item area, excluded from per-item height math.
    pub header_height: u32,
    /// Pixels reserved below the item area.
    pub bottom_spacing: u32,
    /// Initial ordered id sequence (consulted at construction only).
    pub items: Vec<I>,
    pub render_item: RenderItemFn<I, H>,
    pub remove_item: Option<RemoveItemFn<I, H>>,
    /// Selector for the actual insertion target, relative to the container. Needed for table
    /// markup where rows must be children of a `tbody` rather than the scroll wrapper.
    pub append_target: Option<String>,
    /// Never evict off-screen nodes; trades memory for zero churn on lists that only grow.
    pub append_only: bool,
    /// Keep DOM order equal to logical order (flow layouts force this regardless).
    pub preserve_dom_order: bool,
    pub layout: LayoutChoice,
    pub scrollbar: Scrollbar,
    /// Rows rendered beyond the viewport on each side.
    pub extra_rows: usize,
    /// When non-zero, window bounds snap outward to page-sized boundaries, coarsening how often
    /// the add/remove pass runs during fast scrolling.
    pub batch_pages: usize,
    pub enable_user_scroll_event: bool,
    /// Coalescing window for user scroll events.
    pub scroll_debounce_ms: u64,
    /// Post-batch settle delay: scrollbar resync fires after it, the content-updated
    /// notification at twice it.
    pub settle_delay_ms: u64,
    pub on_content_updated: Option<ListCallback<I, H>>,
    pub on_user_scroll: Option<ListCallback<I, H>>,
}

impl<I, H: Host> ListOptions<I, H> {
    /// Creates options around the one required capability: the render callback.
    pub fn new(render_item: impl Fn(&mut H, &I) -> Option<H::Node> + 'static) -> Self {
        Self {
            item_width: ItemWidth::default(),
            item_height: 24,
            header_height: 0,
            bottom_spacing: 0,
            items: Vec::new(),
            render_item: Arc::new(render_item),
            remove_item: None,
            append_target: None,
            append_only: false,
            preserve_dom_order: false,
            layout: LayoutChoice::default(),
            scrollbar: Scrollbar::default(),
            extra_rows: 0,
            batch_pages: 0,
            enable_user_scroll_event: false,
            scroll_debounce_ms: 70,
            settle_delay_ms: 75,
            on_content_updated: None,
            on_user_scroll: None,
        }
    }

    pub fn with_item_width(mut self, item_width: ItemWidth) -> Self {
        self.item_width = item_width;
        self
    }

    pub fn with_item_width_value(mut self, item_width: u32) -> Self {
        self.item_width = ItemWidth::Value(item_width);
        self
    }

    pub fn with_item_width_provider(mut self, item_width: impl Fn() -> u32 + 'static) -> Self {
        self.item_width = ItemWidth::Provider(Arc::new(item_width));
        self
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_header_height(mut self, header_height: u32) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_bottom_spacing(mut self, bottom_spacing: u32) -> Self {
        self.bottom_spacing = bottom_spacing;
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = I>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn with_remove_item(
        mut self,
        remove_item: Option<impl Fn(&mut H, H::Node, &I) -> bool + 'static>,
    ) -> Self {
        self.remove_item = remove_item.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_append_target(mut self, append_target: Option<impl Into<String>>) -> Self {
        self.append_target = append_target.map(Into::into);
        self
    }

    pub fn with_append_only(mut self, append_only: bool) -> Self {
        self.append_only = append_only;
        self
    }

    pub fn with_preserve_dom_order(mut self, preserve_dom_order: bool) -> Self {
        self.preserve_dom_order = preserve_dom_order;
        self
    }

    pub fn with_layout(mut self, layout: LayoutChoice) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_scrollbar(mut self, scrollbar: Scrollbar) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    pub fn with_extra_rows(mut self, extra_rows: usize) -> Self {
        self.extra_rows = extra_rows;
        self
    }

    pub fn with_batch_pages(mut self, batch_pages: usize) -> Self {
        self.batch_pages = batch_pages;
        self
    }

    pub fn with_enable_user_scroll_event(mut self, enable: bool) -> Self {
        self.enable_user_scroll_event = enable;
        self
    }

    pub fn with_scroll_debounce_ms(mut self, scroll_debounce_ms: u64) -> Self {
        self.scroll_debounce_ms = scroll_debounce_ms;
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn with_on_content_updated(
        mut self,
        on_content_updated: Option<impl Fn(&DomList<I, H>) + 'static>,
    ) -> Self {
        self.on_content_updated = on_content_updated.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_user_scroll(
        mut self,
        on_user_scroll: Option<impl Fn(&DomList<I, H>) + 'static>,
    ) -> Self {
        self.on_user_scroll = on_user_scroll.map(|f| Arc::new(f) as _);
        self
    }
}

impl<I: Clone, H: Host> Clone for ListOptions<I, H> {
    fn clone(&self) -> Self {
        Self {
            item_width: self.item_width.clone(),
            item_height: self.item_height,
            header_height: self.header_height,
            bottom_spacing: self.bottom_spacing,
            items: self.items.clone(),
            render_item: Arc::clone(&self.render_item),
            remove_item: self.remove_item.clone(),
            append_target: self.append_target.clone(),
            append_only: self.append_only,
            preserve_dom_order: self.preserve_dom_order,
            layout: self.layout,
            scrollbar: self.scrollbar,
            extra_rows: self.extra_rows,
            batch_pages: self.batch_pages,
            enable_user_scroll_event: self.enable_user_scroll_event,
            scroll_debounce_ms: self.scroll_debounce_ms,
            settle_delay_ms: self.settle_delay_ms,
            on_content_updated: self.on_content_updated.clone(),
            on_user_scroll: self.on_user_scroll.clone(),
        }
    }
}

impl<I, H: Host> core::fmt::Debug for ListOptions<I, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("item_width", &self.item_width)
            .field("item_height", &self.item_height)
            .field("header_height", &self.header_height)
            .field("bottom_spacing", &self.bottom_spacing)
            .field("items", &self.items.len())
            .field("append_target", &self.append_target)
            .field("append_only", &self.append_only)
            .field("preserve_dom_order", &self.preserve_dom_order)
            .field("layout", &self.layout)
            .field("scrollbar", &self.scrollbar)
            .field("extra_rows", &self.extra_rows)
            .field("batch_pages", &self.batch_pages)
            .field("enable_user_scroll_event", &self.enable_user_scroll_event)
            .field("scroll_debounce_ms", &self.scroll_debounce_ms)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .finish_non_exhaustive()
    }
}
