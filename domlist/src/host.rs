use crate::{NodeKind, ScrollbarOptions, Viewport};

/// The document boundary.
///
/// The engine owns all mutations but reaches the document exclusively through this trait, so the
/// core stays platform-agnostic: a browser binding, a TUI region tree, or the in-memory host in
/// `domlist-sim` can all back a [`crate::DomList`].
///
/// Scroll and resize events flow the other way: after [`Host::listen`] the host's event loop is
/// expected to report them by calling `on_scroll_event` / `resized` / `tick` on the engine.
pub trait Host {
    /// Opaque element handle.
    type Node: Copy + Eq + core::hash::Hash + core::fmt::Debug + 'static;

    fn create_node(&mut self, kind: NodeKind) -> Self::Node;
    fn append(&mut self, parent: Self::Node, child: Self::Node);
    fn prepend(&mut self, parent: Self::Node, child: Self::Node);
    /// Inserts `node` as the sibling immediately after `anchor`.
    fn insert_after(&mut self, parent: Self::Node, anchor: Self::Node, node: Self::Node);
    fn remove_node(&mut self, node: Self::Node);
    fn is_attached(&self, node: Self::Node) -> bool;
    /// Resolves a selector relative to `root` (used for `append_target`, e.g. a `tbody`).
    fn query_child(&self, root: Self::Node, selector: &str) -> Option<Self::Node>;

    /// Batch append: the document-fragment contract, one reflow for the whole slice.
    ///
    /// Hosts backed by a real document should override this with a fragment insert.
    fn append_all(&mut self, parent: Self::Node, nodes: &[Self::Node]) {
        for &node in nodes {
            self.append(parent, node);
        }
    }

    /// Batch prepend preserving slice order; same reflow contract as [`Host::append_all`].
    fn prepend_all(&mut self, parent: Self::Node, nodes: &[Self::Node]) {
        for &node in nodes.iter().rev() {
            self.prepend(parent, node);
        }
    }

    fn viewport(&self, container: Self::Node) -> Viewport;
    fn scroll_top(&self, container: Self::Node) -> u64;
    fn scroll_left(&self, container: Self::Node) -> u64;
    fn set_scroll_top(&mut self, container: Self::Node, top: u64);
    fn set_scroll_left(&mut self, container: Self::Node, left: u64);
    /// Absolute placement of an item node within the content element.
    fn set_position(&mut self, node: Self::Node, left: u64, top: u64);
    /// Sets the explicit height of a content or spacer element.
    fn set_extent(&mut self, node: Self::Node, px: u64);

    fn init_scrollbar(&mut self, _container: Self::Node, _options: &ScrollbarOptions) {}
    fn sync_scrollbar(&mut self, _container: Self::Node) {}
    fn teardown_scrollbar(&mut self, _container: Self::Node) {}

    fn listen(&mut self, _container: Self::Node) {}
    fn unlisten(&mut self, _container: Self::Node) {}
}
