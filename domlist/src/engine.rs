use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp;

use crate::debounce::{Debouncer, Timer};
use crate::events::EventHandlers;
use crate::id::{IdSet, ItemId, RenderedMap};
use crate::layout::{LayoutFrame, RenderLayout};
use crate::{
    Geometry, GeometryInputs, Host, ListEvent, ListOptions, NodeKind, ScrollDirection, Scrollbar,
    ViewRange, ViewState,
};

/// A windowed list/grid renderer.
///
/// Owns the ordered item-id sequence, the viewport/scroll measurements, and the visible-range
/// computation; drives add/remove/reposition of rendered nodes through an injected [`Host`] and a
/// pluggable [`RenderLayout`].
///
/// Single-threaded by construction: all operations are synchronous except work voluntarily
/// deferred to the named-timer table, which the host's event loop fires via [`DomList::tick`].
pub struct DomList<I, H: Host> {
    host: H,
    container: H::Node,
    content: Option<H::Node>,
    owns_content: bool,
    options: ListOptions<I, H>,
    layout: Box<dyn RenderLayout<H>>,
    items: Vec<I>,
    rendered: RenderedMap<I, H::Node>,
    calculated: RefCell<Option<Geometry>>,
    handlers: EventHandlers<I, H>,
    debounce: Debouncer,
    is_rendered: bool,
    destroyed: bool,
    user_scroll: bool,
    scrollbar_active: bool,
    scroll_direction: Option<ScrollDirection>,
    last_seen_scroll_top: u64,
    now_ms: u64,
}

impl<I: ItemId, H: Host> DomList<I, H> {
    /// Creates an engine bound to an existing scrollable `container`.
    ///
    /// The render callback is required at the type level by [`ListOptions::new`]; nothing touches
    /// the document until [`DomList::initial_render`].
    pub fn new(host: H, container: H::Node, options: ListOptions<I, H>) -> Self {
        let layout = options.layout.build::<H>();
        let mut items = Vec::with_capacity(options.items.len());
        let mut seen: IdSet<I> = IdSet::default();
        for id in &options.items {
            if seen.insert(id.clone()) {
                items.push(id.clone());
            } else {
                dlwarn!("duplicate id in initial items ignored");
            }
        }
        dldebug!(items = items.len(), "DomList::new");
        Self {
            host,
            container,
            content: None,
            owns_content: false,
            options,
            layout,
            items,
            rendered: RenderedMap::default(),
            calculated: RefCell::new(None),
            handlers: EventHandlers::new(),
            debounce: Debouncer::new(),
            is_rendered: false,
            destroyed: false,
            user_scroll: false,
            scrollbar_active: false,
            scroll_direction: None,
            last_seen_scroll_top: 0,
            now_ms: 0,
        }
    }

    fn assert_live(&self) {
        assert!(!self.destroyed, "operation on a destroyed DomList");
    }

    pub fn options(&self) -> &ListOptions<I, H> {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn container(&self) -> H::Node {
        self.container
    }

    /// The element item nodes are inserted into; `None` before the first render.
    pub fn content_node(&self) -> Option<H::Node> {
        self.content
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn has(&self, id: &I) -> bool {
        self.items.contains(id)
    }

    /// Whether `id` currently has a live node in the document.
    pub fn is_rendered(&self, id: &I) -> bool {
        self.rendered
            .get(id)
            .is_some_and(|&node| self.host.is_attached(node))
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    /// Whether [`DomList::initial_render`] has run.
    pub fn is_initialized(&self) -> bool {
        self.is_rendered
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    // ---- geometry ----------------------------------------------------------------------------

    fn geometry_inputs(&self) -> GeometryInputs {
        GeometryInputs {
            viewport: self.host.viewport(self.container),
            scroll_top: self.host.scroll_top(self.container),
            scroll_left: self.host.scroll_left(self.container),
            item_count: self.items.len(),
            item_width: self.options.item_width.resolve(),
            item_height: self.options.item_height,
            header_height: self.options.header_height,
            bottom_spacing: self.options.bottom_spacing,
            extra_rows: self.options.extra_rows,
            batch_pages: self.options.batch_pages,
            append_only: self.options.append_only,
        }
    }

    /// The memoized geometry snapshot, recomputed if stale.
    pub fn geometry(&self) -> Geometry {
        if let Some(g) = *self.calculated.borrow() {
            return g;
        }
        let g = Geometry::compute(&self.geometry_inputs());
        *self.calculated.borrow_mut() = Some(g);
        g
    }

    fn invalidate(&self) {
        *self.calculated.borrow_mut() = None;
    }

    pub fn scroll_top(&self) -> u64 {
        self.geometry().scroll_top
    }

    pub fn scroll_left(&self) -> u64 {
        self.geometry().scroll_left
    }

    /// Maximum vertical scroll offset (content height minus viewport height).
    pub fn scroll_height(&self) -> u64 {
        self.geometry().max_scroll_top()
    }

    /// Maximum horizontal scroll offset.
    pub fn scroll_width(&self) -> u64 {
        let g = self.geometry();
        g.content_width.saturating_sub(u64::from(g.viewport_width))
    }

    pub fn content_height(&self) -> u64 {
        self.geometry().content_height
    }

    pub fn content_width(&self) -> u64 {
        self.geometry().content_width
    }

    pub fn is_at_top(&self) -> bool {
        self.geometry().at_top
    }

    pub fn is_at_bottom(&self) -> bool {
        self.geometry().at_bottom
    }

    pub fn scrolled_percent_y(&self) -> f64 {
        self.geometry().scrolled_percent_y
    }

    pub fn scrolled_percent_x(&self) -> f64 {
        self.geometry().scrolled_percent_x
    }

    pub fn view_state(&self) -> ViewState {
        let g = self.geometry();
        ViewState {
            scroll_top: g.scroll_top,
            scroll_left: g.scroll_left,
        }
    }

    pub fn restore_view_state(&mut self, state: ViewState) {
        self.scroll_to(state.scroll_left, state.scroll_top);
    }

    // ---- lifecycle ---------------------------------------------------------------------------

    /// One-time setup: content wrapper, scrollbar, first materialization pass, listeners.
    ///
    /// Calling this twice indicates a caller bug and is a fatal assertion.
    pub fn initial_render(&mut self) {
        self.assert_live();
        assert!(
            !self.is_rendered,
            "initial_render must only be called once"
        );

        let content = match &self.options.append_target {
            Some(selector) => self
                .host
                .query_child(self.container, selector)
                .expect("append_target did not match a child of the container"),
            None => {
                let node = self.host.create_node(NodeKind::Content);
                self.host.append(self.container, node);
                self.owns_content = true;
                node
            }
        };
        self.content = Some(content);

        if let Scrollbar::Custom(opts) = &self.options.scrollbar {
            self.host.init_scrollbar(self.container, opts);
            self.scrollbar_active = true;
        }

        self.update_content_size();
        self.layout.will_render(&mut self.host, content);
        self.is_rendered = true;
        self.apply_dom_changes(true);

        // Re-clamp the scroll position against the freshly computed content extent.
        let g = self.geometry();
        self.host.set_scroll_top(self.container, g.scroll_top);
        self.last_seen_scroll_top = g.scroll_top;
        self.user_scroll = true;
        self.host.listen(self.container);

        let tail = self.tail_node(&g);
        self.layout.rendered(
            &mut self.host,
            LayoutFrame {
                content,
                tail,
                geometry: &g,
                range: g.range(),
                item_count: self.items.len(),
            },
        );
        dldebug!(items = self.items.len(), "initial_render");
    }

    /// Fully reconfigures the instance: tears down and recreates adapter wiring.
    ///
    /// The engine keeps its current item sequence; `options.items` is consulted at construction
    /// only.
    pub fn update_options(&mut self, options: ListOptions<I, H>) {
        self.assert_live();
        self.layout.teardown(&mut self.host);
        let old: Vec<I> = self.rendered.keys().cloned().collect();
        for id in old {
            if let Some(node) = self.rendered.remove(&id) {
                self.detach(node, &id);
            }
        }
        self.options = options;
        self.layout = self.options.layout.build::<H>();
        self.invalidate();

        if !self.is_rendered {
            return;
        }
        let want_custom = matches!(self.options.scrollbar, Scrollbar::Custom(_));
        if want_custom && !self.scrollbar_active {
            if let Scrollbar::Custom(opts) = &self.options.scrollbar {
                self.host.init_scrollbar(self.container, opts);
            }
            self.scrollbar_active = true;
        } else if !want_custom && self.scrollbar_active {
            self.host.teardown_scrollbar(self.container);
            self.scrollbar_active = false;
        }
        if let Some(content) = self.content {
            self.layout.will_render(&mut self.host, content);
        }
        self.update_content_size();
        self.apply_dom_changes(true);
    }

    /// Unbinds listeners, cancels all pending debounced work, clears state, and removes the
    /// engine-owned content element. Nothing fires after this returns.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.debounce.cancel_all();
        if self.is_rendered {
            self.host.unlisten(self.container);
        }
        if self.scrollbar_active {
            self.host.teardown_scrollbar(self.container);
            self.scrollbar_active = false;
        }
        let ids: Vec<I> = self.rendered.keys().cloned().collect();
        for id in ids {
            if let Some(node) = self.rendered.remove(&id) {
                self.detach(node, &id);
            }
        }
        self.layout.teardown(&mut self.host);
        self.items.clear();
        if self.owns_content {
            if let Some(content) = self.content.take() {
                self.host.remove_node(content);
            }
        } else {
            self.content = None;
        }
        self.invalidate();
        self.destroyed = true;
        dldebug!("destroy");
    }

    // ---- mutation ----------------------------------------------------------------------------

    /// Appends one id to the logical end. Ids already present are ignored with a diagnostic.
    pub fn add(&mut self, id: I) {
        self.batch_add(core::iter::once(id));
    }

    pub fn batch_add(&mut self, ids: impl IntoIterator<Item = I>) {
        self.assert_live();
        let mut added = 0usize;
        for id in ids {
            if self.has(&id) {
                dlwarn!("duplicate id ignored by batch_add");
                continue;
            }
            self.items.push(id);
            added += 1;
        }
        if added == 0 {
            return;
        }
        dltrace!(added, total = self.items.len(), "batch_add");
        if self.is_rendered {
            self.update_content_size();
            self.apply_dom_changes(true);
        }
    }

    /// Appends the keys of `entries` in iteration order; values are ignored.
    pub fn batch_add_from_map<V>(&mut self, entries: impl IntoIterator<Item = (I, V)>) {
        self.batch_add(entries.into_iter().map(|(id, _)| id));
    }

    pub fn remove(&mut self, id: I) {
        self.batch_remove(core::iter::once(id));
    }

    /// Removes ids from the sequence, tearing down any rendered nodes.
    ///
    /// When every removed id was outside the visible window, the reposition and materialization
    /// passes are skipped; only the content extent and scrollbar need resyncing.
    pub fn batch_remove(&mut self, ids: impl IntoIterator<Item = I>) {
        self.assert_live();
        let mut removed_any = false;
        let mut touched_rendered = false;
        for id in ids {
            let Some(pos) = self.items.iter().position(|x| *x == id) else {
                continue;
            };
            if let Some(node) = self.rendered.remove(&id) {
                self.detach(node, &id);
                touched_rendered = true;
            }
            self.items.remove(pos);
            removed_any = true;
        }
        if !removed_any {
            return;
        }
        dltrace!(touched_rendered, total = self.items.len(), "batch_remove");
        if !self.is_rendered {
            self.invalidate();
            return;
        }
        self.update_content_size();
        if touched_rendered {
            self.reposition_rendered();
            self.apply_dom_changes(true);
        } else {
            let d = self.options.settle_delay_ms;
            self.debounce
                .schedule(Timer::ScrollbarSync, self.now_ms.saturating_add(d));
        }
    }

    /// Wholesale swap of the logical sequence; no diffing. Callers wanting DOM-churn
    /// minimization on a value-equal swap should use [`DomList::sync_items`].
    pub fn batch_replace(&mut self, items: impl IntoIterator<Item = I>) {
        self.assert_live();
        self.items.clear();
        let mut seen: IdSet<I> = IdSet::default();
        for id in items {
            if seen.insert(id.clone()) {
                self.items.push(id);
            } else {
                dlwarn!("duplicate id ignored by batch_replace");
            }
        }
        dltrace!(total = self.items.len(), "batch_replace");
        if self.is_rendered {
            self.update_content_size();
            self.apply_dom_changes(true);
        } else {
            self.invalidate();
        }
    }

    /// In-place refresh: tears down ids absent from `new_ids`, adopts the new ordering, and
    /// backfills the window. The first population before the initial render just stores the
    /// sequence.
    pub fn sync_items(&mut self, new_ids: &[I]) {
        self.assert_live();
        let mut next = Vec::with_capacity(new_ids.len());
        let mut keep: IdSet<I> = IdSet::default();
        for id in new_ids {
            if keep.insert(id.clone()) {
                next.push(id.clone());
            } else {
                dlwarn!("duplicate id ignored by sync_items");
            }
        }

        if self.items.is_empty() && !self.is_rendered {
            self.items = next;
            return;
        }

        let gone: Vec<I> = self
            .rendered
            .keys()
            .filter(|id| !keep.contains(*id))
            .cloned()
            .collect();
        for id in gone {
            if let Some(node) = self.rendered.remove(&id) {
                self.detach(node, &id);
            }
        }
        self.items = next;
        dltrace!(total = self.items.len(), "sync_items");
        if self.is_rendered {
            self.update_content_size();
            self.reposition_rendered();
            self.apply_dom_changes(true);
        } else {
            self.invalidate();
        }
    }

    /// Moves `id` to logical index `to`.
    ///
    /// The rendered node is torn down and rematerialized rather than moved live; this preserves
    /// the historically observable behavior of the component.
    pub fn reposition_item(&mut self, id: &I, to: usize) {
        self.assert_live();
        let Some(from) = self.items.iter().position(|x| x == id) else {
            return;
        };
        let item = self.items.remove(from);
        let to = to.min(self.items.len());
        self.items.insert(to, item);
        if let Some(node) = self.rendered.remove(id) {
            self.detach(node, id);
        }
        if self.is_rendered {
            self.update_content_size();
            self.reposition_rendered();
            self.apply_dom_changes(true);
        } else {
            self.invalidate();
        }
    }

    // ---- reactive entry points ---------------------------------------------------------------

    /// Container scroll events are coalesced within the scroll-debounce window and only honored
    /// when user-initiated; programmatic scroll helpers temporarily clear the user flag.
    pub fn on_scroll_event(&mut self, now_ms: u64) {
        if self.destroyed || !self.is_rendered {
            return;
        }
        self.now_ms = cmp::max(self.now_ms, now_ms);
        if !self.user_scroll {
            return;
        }
        self.debounce.schedule(
            Timer::Scroll,
            now_ms.saturating_add(self.options.scroll_debounce_ms),
        );
    }

    /// Fires due debounced work. Hosts call this from their frame/timer loop with monotonic
    /// milliseconds.
    pub fn tick(&mut self, now_ms: u64) {
        if self.destroyed {
            return;
        }
        self.now_ms = cmp::max(self.now_ms, now_ms);
        if self.debounce.take_due(Timer::Scroll, now_ms) {
            self.process_scroll();
        }
        if self.debounce.take_due(Timer::ScrollbarSync, now_ms) && self.scrollbar_active {
            self.host.sync_scrollbar(self.container);
        }
        if self.debounce.take_due(Timer::ContentNotify, now_ms) {
            self.emit(ListEvent::ContentUpdated);
        }
    }

    fn process_scroll(&mut self) {
        let top = self.host.scroll_top(self.container);
        self.observe_scroll(top);
        self.invalidate();
        self.apply_dom_changes(false);
        dltrace!(top, "process_scroll");
        if self.options.enable_user_scroll_event {
            self.emit(ListEvent::UserScroll);
        }
    }

    /// Full invalidate/recompute/materialize after a container resize, plus the decision whether
    /// the custom scrollbar widget should exist at all.
    pub fn resized(&mut self) {
        self.assert_live();
        if !self.is_rendered {
            return;
        }
        let before = *self.calculated.borrow();
        self.invalidate();
        let g = self.geometry();
        if before == Some(g) {
            return;
        }
        if self.layout.explicit_content_height() {
            if let Some(content) = self.content {
                self.host.set_extent(content, g.content_height);
            }
        }
        if let Scrollbar::Custom(opts) = &self.options.scrollbar {
            let scrollable = g.content_height > u64::from(g.viewport_height);
            if scrollable && !self.scrollbar_active {
                self.host.init_scrollbar(self.container, opts);
                self.scrollbar_active = true;
            } else if !scrollable && self.scrollbar_active {
                self.host.teardown_scrollbar(self.container);
                self.scrollbar_active = false;
            }
        }
        self.apply_dom_changes(true);
    }

    // ---- scrolling ---------------------------------------------------------------------------

    pub fn scroll_to(&mut self, left: u64, top: u64) {
        self.programmatic_scroll(Some(left), Some(top));
    }

    pub fn scroll_to_y(&mut self, top: u64) {
        self.programmatic_scroll(None, Some(top));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to_y(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        let max = self.scroll_height();
        self.scroll_to_y(max);
    }

    /// `percent` in `0..=100`.
    pub fn scroll_to_percent_y(&mut self, percent: f64) {
        let max = self.scroll_height();
        let clamped = percent.clamp(0.0, 100.0);
        self.scroll_to_y((max as f64 * clamped / 100.0) as u64);
    }

    pub fn scroll_page_up(&mut self) {
        let g = self.geometry();
        self.scroll_to_y(g.scroll_top.saturating_sub(u64::from(g.viewport_height)));
    }

    pub fn scroll_page_down(&mut self) {
        let g = self.geometry();
        self.scroll_to_y(g.scroll_top.saturating_add(u64::from(g.viewport_height)));
    }

    /// Minimal scrolling: a fully visible item is left alone, an item above the viewport is
    /// top-aligned, one below is bottom-aligned. Returns `false` for unknown ids.
    pub fn scroll_to_item(&mut self, id: &I) -> bool {
        let Some(index) = self.items.iter().position(|x| x == id) else {
            return false;
        };
        let g = self.geometry();
        let item_top = g.item_top(index);
        let item_bottom = item_top.saturating_add(u64::from(g.item_height));
        let view = u64::from(g.viewport_height);
        let cur = g.scroll_top;
        if item_top >= cur && item_bottom <= cur.saturating_add(view) {
            return true;
        }
        if item_top < cur {
            self.scroll_to_y(item_top);
        } else {
            self.scroll_to_y(item_bottom.saturating_sub(view));
        }
        true
    }

    /// Scrolls to the item owning a currently rendered node. Returns `false` when the node is
    /// not one of ours.
    pub fn scroll_to_node(&mut self, node: H::Node) -> bool {
        let id = self
            .rendered
            .iter()
            .find_map(|(id, &n)| (n == node).then(|| id.clone()));
        match id {
            Some(id) => self.scroll_to_item(&id),
            None => false,
        }
    }

    fn programmatic_scroll(&mut self, left: Option<u64>, top: Option<u64>) {
        self.assert_live();
        let was_user = self.user_scroll;
        self.user_scroll = false;
        if let Some(top) = top {
            let clamped = top.min(self.scroll_height());
            self.host.set_scroll_top(self.container, clamped);
            self.observe_scroll(clamped);
        }
        if let Some(left) = left {
            let clamped = left.min(self.scroll_width());
            self.host.set_scroll_left(self.container, clamped);
        }
        self.invalidate();
        if self.is_rendered {
            self.apply_dom_changes(false);
        }
        self.user_scroll = was_user;
    }

    fn observe_scroll(&mut self, top: u64) {
        self.scroll_direction = match top.cmp(&self.last_seen_scroll_top) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.last_seen_scroll_top = top;
    }

    // ---- events ------------------------------------------------------------------------------

    pub fn bind(&mut self, event: ListEvent, handler: impl Fn(&DomList<I, H>) + 'static) {
        self.handlers.bind(event, Arc::new(handler));
    }

    /// Replaces every handler bound to `event`.
    pub fn rebind(&mut self, event: ListEvent, handler: impl Fn(&DomList<I, H>) + 'static) {
        self.handlers.rebind(event, Arc::new(handler));
    }

    pub fn unbind(&mut self, event: ListEvent) {
        self.handlers.unbind(event);
    }

    pub fn trigger(&mut self, event: ListEvent) {
        self.emit(event);
    }

    fn emit(&mut self, event: ListEvent) {
        let handlers = self.handlers.snapshot(event);
        let slot = match event {
            ListEvent::ContentUpdated => self.options.on_content_updated.clone(),
            ListEvent::UserScroll => self.options.on_user_scroll.clone(),
        };
        for handler in handlers {
            handler(&*self);
        }
        if let Some(callback) = slot {
            callback(&*self);
        }
    }

    // ---- materialization ---------------------------------------------------------------------

    fn update_content_size(&mut self) {
        self.invalidate();
        let g = self.geometry();
        if self.layout.explicit_content_height() {
            if let Some(content) = self.content {
                self.host.set_extent(content, g.content_height);
            }
        }
    }

    fn detach(&mut self, node: H::Node, id: &I) {
        let handled = match &self.options.remove_item {
            Some(f) => {
                let f = Arc::clone(f);
                f(&mut self.host, node, id)
            }
            None => false,
        };
        if !handled {
            self.host.remove_node(node);
        }
    }

    fn reposition_rendered(&mut self) {
        let g = self.geometry();
        for (i, id) in self.items.iter().enumerate() {
            if let Some(&node) = self.rendered.get(id) {
                self.layout.position(&mut self.host, node, i, &g);
            }
        }
    }

    fn tail_node(&self, g: &Geometry) -> Option<H::Node> {
        let ViewRange { first, last } = g.range();
        self.items
            .get(first..last)?
            .iter()
            .rev()
            .find_map(|id| self.rendered.get(id).copied())
    }

    /// The core materialization pass: evict, render + queue, flush in batches, fix up offsets,
    /// then notify the layout and schedule the double-debounced scrollbar resync and caller
    /// notification.
    fn apply_dom_changes(&mut self, content_was_updated: bool) {
        if !self.is_rendered || self.destroyed {
            return;
        }
        let Some(content) = self.content else {
            return;
        };
        let g = self.geometry();
        let ViewRange { first, last } = g.range();

        // A tracked node detached by something outside the engine is treated as unrendered.
        let stale: Vec<I> = self
            .rendered
            .iter()
            .filter(|&(_, &node)| !self.host.is_attached(node))
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            dlwarn!("dropping stale rendered node");
            self.rendered.remove(&id);
        }

        let mut index_of: RenderedMap<I, usize> = RenderedMap::default();
        for (i, id) in self.items.iter().enumerate() {
            index_of.insert(id.clone(), i);
        }

        // Step 1: evict ids that left the window. Append-only lists keep everything that is
        // still part of the sequence.
        let evict: Vec<(I, H::Node)> = self
            .rendered
            .iter()
            .filter(|(id, _)| match index_of.get(*id) {
                None => true,
                Some(&i) => !self.options.append_only && !(i >= first && i < last),
            })
            .map(|(id, &node)| (id.clone(), node))
            .collect();
        let evicted = evict.len();
        for (id, node) in evict {
            self.rendered.remove(&id);
            self.detach(node, &id);
        }

        // Step 2: render ids entering the window and queue their insertion.
        let preserve = self.options.preserve_dom_order || self.layout.requires_dom_order();
        let mut prepend_queue: Vec<H::Node> = Vec::new();
        let mut append_queue: Vec<H::Node> = Vec::new();
        let mut existing: Vec<(usize, H::Node)> = Vec::new();
        let mut added = 0usize;
        for i in first..last {
            let id = self.items[i].clone();
            if let Some(&node) = self.rendered.get(&id) {
                existing.push((i, node));
                continue;
            }
            let render = Arc::clone(&self.options.render_item);
            let Some(node) = render(&mut self.host, &id) else {
                dlwarn!("render callback produced no node, id left unmaterialized");
                continue;
            };
            self.layout.position(&mut self.host, node, i, &g);
            if preserve {
                let mut anchor = None;
                for j in (0..i).rev() {
                    if let Some(&prev) = self.rendered.get(&self.items[j]) {
                        anchor = Some(prev);
                        break;
                    }
                }
                // An unattached anchor is always the tail of the prepend queue (indices are
                // walked in ascending order), so queueing behind it keeps logical order.
                match anchor {
                    Some(prev) if self.host.is_attached(prev) => {
                        self.host.insert_after(content, prev, node)
                    }
                    _ => prepend_queue.push(node),
                }
            } else {
                append_queue.push(node);
            }
            self.rendered.insert(id, node);
            added += 1;
        }

        // Step 3: flush the queues in batches (one reflow each).
        if !prepend_queue.is_empty() {
            match self.layout.start_anchor() {
                Some(anchor) => {
                    for &node in prepend_queue.iter().rev() {
                        self.host.insert_after(content, anchor, node);
                    }
                }
                None => self.host.prepend_all(content, &prepend_queue),
            }
        }
        if !append_queue.is_empty() {
            self.host.append_all(content, &append_queue);
        }

        // Step 4: nodes that survived a content mutation may sit at shifted indices.
        if content_was_updated {
            for (i, node) in existing {
                self.layout.position(&mut self.host, node, i, &g);
            }
        }

        // Step 5: layout bookkeeping plus the double-debounced settle work.
        if added > 0 || evicted > 0 || content_was_updated {
            let tail = self.tail_node(&g);
            self.layout.items_repositioned(
                &mut self.host,
                LayoutFrame {
                    content,
                    tail,
                    geometry: &g,
                    range: g.range(),
                    item_count: self.items.len(),
                },
            );
            let d = self.options.settle_delay_ms;
            self.debounce
                .schedule(Timer::ScrollbarSync, self.now_ms.saturating_add(d));
            self.debounce.schedule(
                Timer::ContentNotify,
                self.now_ms.saturating_add(d.saturating_mul(2)),
            );
            dltrace!(added, evicted, first, last, "apply_dom_changes");
        }
    }

    #[cfg(test)]
    pub(crate) fn has_pending(&self, timer: Timer) -> bool {
        self.debounce.is_scheduled(timer)
    }
}

impl<I: ItemId, H: Host> core::fmt::Debug for DomList<I, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomList")
            .field("items", &self.items.len())
            .field("rendered", &self.rendered.len())
            .field("is_rendered", &self.is_rendered)
            .field("destroyed", &self.destroyed)
            .field("scroll_direction", &self.scroll_direction)
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}
