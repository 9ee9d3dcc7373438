/// The last observed direction of scroll-offset changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Half-open index interval `[first, last)` of items that must have live nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewRange {
    pub first: usize,
    pub last: usize, // exclusive
}

impl ViewRange {
    pub fn is_empty(&self) -> bool {
        self.first >= self.last
    }

    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index < self.last
    }
}

/// Inner dimensions of the scrollable container, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// What a [`crate::Host`] node stands for.
///
/// Item nodes are produced by the caller's render callback; the engine and its layouts only
/// create the structural kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// The outer scrollable element (created by the host, never by the engine).
    Container,
    /// The engine-owned wrapper that item nodes are inserted into.
    Content,
    /// A caller-rendered item node.
    Item,
    /// A block-level spacer standing in for off-screen rows.
    Block,
    /// A table-row spacer standing in for off-screen rows.
    Row,
    /// An invisible cell completing a partially filled grid row.
    Filler,
}

/// Configuration handed through to the host's custom-scrollbar widget.
///
/// The engine treats this as opaque: it is forwarded verbatim to
/// [`crate::Host::init_scrollbar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollbarOptions {
    pub suppress_scroll_x: bool,
    pub min_thumb_px: u32,
    pub wheel_step_px: u32,
}

impl Default for ScrollbarOptions {
    fn default() -> Self {
        Self {
            suppress_scroll_x: true,
            min_thumb_px: 20,
            wheel_step_px: 32,
        }
    }
}

/// Scrollbar mode for a list instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scrollbar {
    /// Use the browser/host native scrollbar; the engine never touches the widget API.
    Native,
    /// Use the host's custom scrollbar widget, initialized with the given options.
    Custom(ScrollbarOptions),
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::Custom(ScrollbarOptions::default())
    }
}

/// A lightweight, serializable snapshot of the current scroll position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so a host can
/// persist and restore a view's position across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState {
    pub scroll_top: u64,
    pub scroll_left: u64,
}
