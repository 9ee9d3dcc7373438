use alloc::string::String;
use alloc::vec::Vec;

use domlist::{Host, NodeKind, ScrollbarOptions, Viewport};

/// Handle into a [`MemDom`] node slab.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

#[derive(Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
    label: Option<String>,
    tag: Option<String>,
    position: (u64, u64),
    extent: u64,
    removed: bool,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            label: None,
            tag: None,
            position: (0, 0),
            extent: 0,
            removed: false,
        }
    }
}

/// Mutation counters, for asserting how much document churn a scenario caused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DomCounters {
    pub attach_ops: u64,
    pub detach_ops: u64,
    /// Batched insertions (the document-fragment path), counted once per flushed slice.
    pub batch_flushes: u64,
    pub position_writes: u64,
    pub extent_writes: u64,
    pub scrollbar_inits: u64,
    pub scrollbar_syncs: u64,
    pub scrollbar_teardowns: u64,
}

/// A deterministic in-memory document.
///
/// Stores nodes in a slab and models exactly what the engine observes through [`Host`]: a tree,
/// a viewport, scroll offsets, and a scrollbar widget reduced to counters. There is no real
/// layout pass; extents and positions are whatever the engine wrote.
#[derive(Debug, Default)]
pub struct MemDom {
    nodes: Vec<NodeRecord>,
    viewport: Viewport,
    scroll_top: u64,
    scroll_left: u64,
    counters: DomCounters,
    listening: bool,
}

impl MemDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the outer scrollable element with the given inner dimensions.
    pub fn create_container(&mut self, width: u32, height: u32) -> NodeId {
        self.viewport = Viewport { width, height };
        let id = self.push(NodeRecord::new(NodeKind::Container));
        NodeId(id)
    }

    /// Creates a detached item node carrying a label, for render callbacks.
    pub fn create_item(&mut self, label: impl Into<String>) -> NodeId {
        let mut rec = NodeRecord::new(NodeKind::Item);
        rec.label = Some(label.into());
        NodeId(self.push(rec))
    }

    /// Creates and attaches a selector-addressable child (e.g. a `tbody` insertion target).
    pub fn create_tagged_child(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let mut rec = NodeRecord::new(NodeKind::Block);
        rec.tag = Some(tag.into());
        rec.parent = Some(parent.0);
        let id = self.push(rec);
        self.nodes[parent.0].children.push(id);
        NodeId(id)
    }

    fn push(&mut self, rec: NodeRecord) -> usize {
        self.nodes.push(rec);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, at: usize) {
        let rec = &self.nodes[child.0];
        assert!(
            rec.parent.is_none() && !rec.removed,
            "attaching a node that is already attached or removed"
        );
        self.nodes[child.0].parent = Some(parent.0);
        self.nodes[parent.0].children.insert(at, child.0);
        self.counters.attach_ops += 1;
    }

    pub fn counters(&self) -> DomCounters {
        self.counters
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
    }

    /// Raw scroll write, as a user gesture would produce. Report it to the engine with
    /// `DomList::on_scroll_event` afterwards.
    pub fn write_scroll_top(&mut self, top: u64) {
        self.scroll_top = top;
    }

    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.0].kind
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].label.as_deref()
    }

    pub fn extent(&self, node: NodeId) -> u64 {
        self.nodes[node.0].extent
    }

    pub fn position(&self, node: NodeId) -> (u64, u64) {
        self.nodes[node.0].position
    }

    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes[parent.0].children.iter().copied().map(NodeId).collect()
    }

    /// Labels of item-kind children of `parent`, in document order.
    pub fn labels_in(&self, parent: NodeId) -> Vec<String> {
        self.nodes[parent.0]
            .children
            .iter()
            .filter(|&&c| self.nodes[c].kind == NodeKind::Item)
            .filter_map(|&c| self.nodes[c].label.clone())
            .collect()
    }

    pub fn kind_count_in(&self, parent: NodeId, kind: NodeKind) -> usize {
        self.nodes[parent.0]
            .children
            .iter()
            .filter(|&&c| self.nodes[c].kind == kind)
            .count()
    }
}

impl Host for MemDom {
    type Node = NodeId;

    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        NodeId(self.push(NodeRecord::new(kind)))
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        let at = self.nodes[parent.0].children.len();
        self.attach(parent, child, at);
    }

    fn prepend(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child, 0);
    }

    fn insert_after(&mut self, parent: NodeId, anchor: NodeId, node: NodeId) {
        let at = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == anchor.0)
            .expect("insert_after anchor is not a child of parent");
        self.attach(parent, node, at + 1);
    }

    fn remove_node(&mut self, node: NodeId) {
        if let Some(p) = self.nodes[node.0].parent.take() {
            self.nodes[p].children.retain(|&c| c != node.0);
        }
        self.nodes[node.0].removed = true;
        self.counters.detach_ops += 1;
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut i = node.0;
        loop {
            if self.nodes[i].removed {
                return false;
            }
            match self.nodes[i].parent {
                Some(p) => i = p,
                None => return self.nodes[i].kind == NodeKind::Container,
            }
        }
    }

    fn query_child(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let mut stack = alloc::vec![root.0];
        while let Some(i) = stack.pop() {
            if self.nodes[i].tag.as_deref() == Some(selector) {
                return Some(NodeId(i));
            }
            stack.extend(self.nodes[i].children.iter().copied());
        }
        None
    }

    fn append_all(&mut self, parent: NodeId, nodes: &[NodeId]) {
        for &node in nodes {
            self.append(parent, node);
        }
        self.counters.batch_flushes += 1;
    }

    fn prepend_all(&mut self, parent: NodeId, nodes: &[NodeId]) {
        for &node in nodes.iter().rev() {
            self.prepend(parent, node);
        }
        self.counters.batch_flushes += 1;
    }

    fn viewport(&self, _container: NodeId) -> Viewport {
        self.viewport
    }

    fn scroll_top(&self, _container: NodeId) -> u64 {
        self.scroll_top
    }

    fn scroll_left(&self, _container: NodeId) -> u64 {
        self.scroll_left
    }

    fn set_scroll_top(&mut self, _container: NodeId, top: u64) {
        self.scroll_top = top;
    }

    fn set_scroll_left(&mut self, _container: NodeId, left: u64) {
        self.scroll_left = left;
    }

    fn set_position(&mut self, node: NodeId, left: u64, top: u64) {
        self.nodes[node.0].position = (left, top);
        self.counters.position_writes += 1;
    }

    fn set_extent(&mut self, node: NodeId, px: u64) {
        self.nodes[node.0].extent = px;
        self.counters.extent_writes += 1;
    }

    fn init_scrollbar(&mut self, _container: NodeId, _options: &ScrollbarOptions) {
        self.counters.scrollbar_inits += 1;
    }

    fn sync_scrollbar(&mut self, _container: NodeId) {
        self.counters.scrollbar_syncs += 1;
    }

    fn teardown_scrollbar(&mut self, _container: NodeId) {
        self.counters.scrollbar_teardowns += 1;
    }

    fn listen(&mut self, _container: NodeId) {
        self.listening = true;
    }

    fn unlisten(&mut self, _container: NodeId) {
        self.listening = false;
    }
}
