use alloc::string::String;
use alloc::vec::Vec;

use domlist::{DomList, ListOptions};

use crate::{MemDom, NodeId};

/// A [`DomList`] wired to a [`MemDom`] with a simulated millisecond clock.
///
/// `ListSim` owns the whole arrangement: it builds the container, runs the initial render, and
/// exposes gesture-level entry points (`user_scroll_to`, `resize`) plus clock control
/// (`advance`, `settle`) so scenarios read like user sessions instead of plumbing.
#[derive(Debug)]
pub struct ListSim {
    list: DomList<String, MemDom>,
    container: NodeId,
    now_ms: u64,
}

impl ListSim {
    /// Builds the container, constructs the engine, and runs the initial render.
    pub fn new(width: u32, height: u32, options: ListOptions<String, MemDom>) -> Self {
        let mut dom = MemDom::new();
        let container = dom.create_container(width, height);
        // Options naming an insertion target get that child created up front, the way real
        // table markup would already carry its tbody.
        if let Some(tag) = options.append_target.clone() {
            dom.create_tagged_child(container, tag);
        }
        let mut list = DomList::new(dom, container, options);
        list.initial_render();
        Self {
            list,
            container,
            now_ms: 0,
        }
    }

    /// Options with a render callback that materializes each id as a labeled item node.
    pub fn label_options() -> ListOptions<String, MemDom> {
        ListOptions::new(|dom: &mut MemDom, id: &String| Some(dom.create_item(id.clone())))
    }

    pub fn list(&self) -> &DomList<String, MemDom> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut DomList<String, MemDom> {
        &mut self.list
    }

    pub fn dom(&self) -> &MemDom {
        self.list.host()
    }

    pub fn dom_mut(&mut self) -> &mut MemDom {
        self.list.host_mut()
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Moves the clock forward and fires any debounced work that came due.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        self.list.tick(self.now_ms);
    }

    /// Advances far enough for every pending timer to fire.
    pub fn settle(&mut self) {
        let step = self.list.options().scroll_debounce_ms + self.list.options().settle_delay_ms + 1;
        for _ in 0..3 {
            self.advance(step);
        }
    }

    /// A user scroll gesture: writes the raw offset, reports the event, and waits out the
    /// debounce window.
    pub fn user_scroll_to(&mut self, top: u64) {
        self.dom_mut().write_scroll_top(top);
        self.now_ms += 1;
        self.list.on_scroll_event(self.now_ms);
        let debounce = self.list.options().scroll_debounce_ms;
        self.advance(debounce + 1);
    }

    pub fn scroll_to_y(&mut self, top: u64) {
        self.list.scroll_to_y(top);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.list.scroll_to_bottom();
    }

    pub fn scroll_to_item(&mut self, id: &str) -> bool {
        self.list.scroll_to_item(&String::from(id))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.dom_mut().set_viewport(width, height);
        self.list.resized();
    }

    /// Item labels currently in the document, in document order.
    pub fn visible_labels(&self) -> Vec<String> {
        let content = self.list.content_node().expect("list is initialized");
        self.dom().labels_in(content)
    }
}
