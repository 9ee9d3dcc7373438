use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{Geometry, Host, NodeKind, ViewRange};

/// Context handed to layout hooks after a materialization batch.
pub struct LayoutFrame<'a, N> {
    /// The element item nodes live in.
    pub content: N,
    /// Rendered node of the highest-index item in the window, if any.
    pub tail: Option<N>,
    pub geometry: &'a Geometry,
    pub range: ViewRange,
    pub item_count: usize,
}

/// Pluggable strategy translating logical index into on-screen placement.
///
/// All hooks have default bodies; a variant implements only what its layout needs. The engine
/// consults the two capability queries instead of knowing variants apart.
pub trait RenderLayout<H: Host> {
    /// Flow layouts must keep DOM order equal to logical order for spacers to line up.
    fn requires_dom_order(&self) -> bool {
        false
    }

    /// Whether the content element's explicit extent communicates total scrollable height
    /// (as opposed to spacer elements doing so in natural flow).
    fn explicit_content_height(&self) -> bool {
        false
    }

    /// Runs before the first materialization pass; inserts structural placeholder elements.
    fn will_render(&mut self, _host: &mut H, _content: H::Node) {}

    /// Anchor that newly prepended items are inserted after (the before-spacer).
    fn start_anchor(&self) -> Option<H::Node> {
        None
    }

    /// Applies this item's on-screen offset for its logical index.
    fn position(&mut self, _host: &mut H, _node: H::Node, _index: usize, _geometry: &Geometry) {}

    /// Runs after a materialization batch; resizes spacers and adjusts filler cells.
    fn items_repositioned(&mut self, _host: &mut H, _frame: LayoutFrame<'_, H::Node>) {}

    /// Runs once after the first full render.
    fn rendered(&mut self, _host: &mut H, _frame: LayoutFrame<'_, H::Node>) {}

    /// Removes layout-owned elements; called on reconfiguration and destruction.
    fn teardown(&mut self, _host: &mut H) {}
}

/// Selects one of the four built-in layout strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutChoice {
    /// Absolutely positioned items; the content element carries the explicit height.
    #[default]
    Absolute,
    /// Natural-flow `tr` rows between two row-kind spacers.
    Table,
    /// Natural-flow blocks between two block-kind spacers.
    List,
    /// Multi-column flow with row-covering spacers and filler cells.
    Grid,
}

impl LayoutChoice {
    pub(crate) fn build<H: Host>(self) -> Box<dyn RenderLayout<H>> {
        match self {
            Self::Absolute => Box::new(AbsoluteLayout),
            Self::Table => Box::new(TableLayout::<H::Node>::new()),
            Self::List => Box::new(ListLayout::<H::Node>::new()),
            Self::Grid => Box::new(GridLayout::<H::Node>::new()),
        }
    }
}

/// Every item is absolutely positioned from its row/column; no spacer elements are needed.
pub struct AbsoluteLayout;

impl<H: Host> RenderLayout<H> for AbsoluteLayout {
    fn explicit_content_height(&self) -> bool {
        true
    }

    fn position(&mut self, host: &mut H, node: H::Node, index: usize, geometry: &Geometry) {
        host.set_position(node, geometry.item_left(index), geometry.item_top(index));
    }
}

/// Variable-height before/after elements whose extents stand in for the off-screen rows, shared
/// by the flow layouts.
struct SpacerPair<N> {
    kind: NodeKind,
    before: Option<N>,
    after: Option<N>,
}

impl<N: Copy> SpacerPair<N> {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            before: None,
            after: None,
        }
    }

    fn ensure<H: Host<Node = N>>(&mut self, host: &mut H, content: N) {
        if self.before.is_none() {
            let node = host.create_node(self.kind);
            host.prepend(content, node);
            self.before = Some(node);
        }
        if self.after.is_none() {
            let node = host.create_node(self.kind);
            host.append(content, node);
            self.after = Some(node);
        }
    }

    fn resize<H: Host<Node = N>>(&mut self, host: &mut H, before_px: u64, after_px: u64) {
        if let Some(node) = self.before {
            host.set_extent(node, before_px);
        }
        if let Some(node) = self.after {
            host.set_extent(node, after_px);
        }
    }

    fn teardown<H: Host<Node = N>>(&mut self, host: &mut H) {
        if let Some(node) = self.before.take() {
            host.remove_node(node);
        }
        if let Some(node) = self.after.take() {
            host.remove_node(node);
        }
    }
}

/// Pixel heights of all logical rows before and after the rendered window, header and bottom
/// reservations included.
fn spacer_extents(geometry: &Geometry, range: ViewRange) -> (u64, u64) {
    let item_h = u64::from(geometry.item_height);
    let before_rows = geometry.row_of(range.first) as u64;
    let ipr = geometry.items_per_row.max(1);
    let after_rows = geometry.total_rows.saturating_sub(range.last.div_ceil(ipr)) as u64;
    let before = u64::from(geometry.header_height) + before_rows * item_h;
    let after = after_rows * item_h + u64::from(geometry.bottom_spacing);
    (before, after)
}

/// Items are table rows in natural DOM flow; two row-kind spacer rows absorb the off-screen
/// extent. Forces DOM-order preservation, since row order must match logical order.
pub struct TableLayout<N> {
    spacers: SpacerPair<N>,
}

impl<N: Copy> TableLayout<N> {
    pub fn new() -> Self {
        Self {
            spacers: SpacerPair::new(NodeKind::Row),
        }
    }
}

impl<N: Copy> Default for TableLayout<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> RenderLayout<H> for TableLayout<H::Node> {
    fn requires_dom_order(&self) -> bool {
        true
    }

    fn will_render(&mut self, host: &mut H, content: H::Node) {
        self.spacers.ensure(host, content);
    }

    fn start_anchor(&self) -> Option<H::Node> {
        self.spacers.before
    }

    fn items_repositioned(&mut self, host: &mut H, frame: LayoutFrame<'_, H::Node>) {
        let (before, after) = spacer_extents(frame.geometry, frame.range);
        self.spacers.resize(host, before, after);
    }

    fn rendered(&mut self, host: &mut H, frame: LayoutFrame<'_, H::Node>) {
        // Covers a first render that materialized nothing (empty list).
        let (before, after) = spacer_extents(frame.geometry, frame.range);
        self.spacers.resize(host, before, after);
    }

    fn teardown(&mut self, host: &mut H) {
        self.spacers.teardown(host);
    }
}

/// Same virtualization as [`TableLayout`] with generic block spacers, for non-tabular vertical
/// lists that want order-preserving spacer-based flow instead of absolute positioning.
pub struct ListLayout<N> {
    spacers: SpacerPair<N>,
}

impl<N: Copy> ListLayout<N> {
    pub fn new() -> Self {
        Self {
            spacers: SpacerPair::new(NodeKind::Block),
        }
    }
}

impl<N: Copy> Default for ListLayout<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> RenderLayout<H> for ListLayout<H::Node> {
    fn requires_dom_order(&self) -> bool {
        true
    }

    fn will_render(&mut self, host: &mut H, content: H::Node) {
        self.spacers.ensure(host, content);
    }

    fn start_anchor(&self) -> Option<H::Node> {
        self.spacers.before
    }

    fn items_repositioned(&mut self, host: &mut H, frame: LayoutFrame<'_, H::Node>) {
        let (before, after) = spacer_extents(frame.geometry, frame.range);
        self.spacers.resize(host, before, after);
    }

    fn rendered(&mut self, host: &mut H, frame: LayoutFrame<'_, H::Node>) {
        let (before, after) = spacer_extents(frame.geometry, frame.range);
        self.spacers.resize(host, before, after);
    }

    fn teardown(&mut self, host: &mut H) {
        self.spacers.teardown(host);
    }
}

/// Multi-column flow: block spacers cover whole rows, and invisible filler cells complete the
/// final row so CSS row wrapping lays out correctly when it is not fully populated.
///
/// Filler count is adjusted incrementally across re-renders rather than recreated from scratch.
pub struct GridLayout<N> {
    spacers: SpacerPair<N>,
    fillers: Vec<N>,
}

impl<N: Copy> GridLayout<N> {
    pub fn new() -> Self {
        Self {
            spacers: SpacerPair::new(NodeKind::Block),
            fillers: Vec::new(),
        }
    }

    pub fn filler_count(&self) -> usize {
        self.fillers.len()
    }
}

impl<N: Copy> Default for GridLayout<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> RenderLayout<H> for GridLayout<H::Node> {
    fn requires_dom_order(&self) -> bool {
        true
    }

    fn will_render(&mut self, host: &mut H, content: H::Node) {
        self.spacers.ensure(host, content);
    }

    fn start_anchor(&self) -> Option<H::Node> {
        self.spacers.before
    }

    fn items_repositioned(&mut self, host: &mut H, frame: LayoutFrame<'_, H::Node>) {
        let (before, after) = spacer_extents(frame.geometry, frame.range);
        self.spacers.resize(host, before, after);

        // Fillers only apply when the window reaches the end of the list; everywhere else the
        // window ends on a row boundary.
        let ipr = frame.geometry.items_per_row.max(1);
        let needed = if frame.range.last == frame.item_count && frame.item_count > 0 {
            (ipr - frame.item_count % ipr) % ipr
        } else {
            0
        };

        while self.fillers.len() > needed {
            if let Some(node) = self.fillers.pop() {
                host.remove_node(node);
            }
        }
        if self.fillers.len() < needed {
            let mut anchor = self.fillers.last().copied().or(frame.tail);
            for _ in self.fillers.len()..needed {
                let node = host.create_node(NodeKind::Filler);
                match anchor {
                    Some(a) => host.insert_after(frame.content, a, node),
                    // No rendered items at all; keep fillers right after the before-spacer.
                    None => match self.spacers.before {
                        Some(b) => host.insert_after(frame.content, b, node),
                        None => host.append(frame.content, node),
                    },
                }
                self.fillers.push(node);
                anchor = Some(node);
            }
        }
    }

    fn rendered(&mut self, host: &mut H, frame: LayoutFrame<'_, H::Node>) {
        let (before, after) = spacer_extents(frame.geometry, frame.range);
        self.spacers.resize(host, before, after);
    }

    fn teardown(&mut self, host: &mut H) {
        for node in self.fillers.drain(..) {
            host.remove_node(node);
        }
        self.spacers.teardown(host);
    }
}
