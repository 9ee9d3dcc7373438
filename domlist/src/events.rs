use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::Host;
use crate::engine::DomList;

/// Caller-observable engine notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListEvent {
    /// A materialization batch settled (fired after the post-batch coalescing delay).
    ContentUpdated,
    /// The user scrolled the container (only when `enable_user_scroll_event` is set).
    UserScroll,
}

/// A handler bound to a [`ListEvent`]. Handlers observe the engine; mutation happens on the
/// caller's own turn.
pub type ListEventHandler<I, H> = Arc<dyn Fn(&DomList<I, H>)>;

pub(crate) struct EventHandlers<I, H: Host> {
    content_updated: Vec<ListEventHandler<I, H>>,
    user_scroll: Vec<ListEventHandler<I, H>>,
}

impl<I, H: Host> EventHandlers<I, H> {
    pub(crate) fn new() -> Self {
        Self {
            content_updated: Vec::new(),
            user_scroll: Vec::new(),
        }
    }

    fn slot_mut(&mut self, event: ListEvent) -> &mut Vec<ListEventHandler<I, H>> {
        match event {
            ListEvent::ContentUpdated => &mut self.content_updated,
            ListEvent::UserScroll => &mut self.user_scroll,
        }
    }

    pub(crate) fn bind(&mut self, event: ListEvent, handler: ListEventHandler<I, H>) {
        self.slot_mut(event).push(handler);
    }

    /// Replaces every handler bound to `event` with `handler`.
    pub(crate) fn rebind(&mut self, event: ListEvent, handler: ListEventHandler<I, H>) {
        let slot = self.slot_mut(event);
        slot.clear();
        slot.push(handler);
    }

    pub(crate) fn unbind(&mut self, event: ListEvent) {
        self.slot_mut(event).clear();
    }

    /// Clones the bound handlers so dispatch can run without borrowing the table.
    pub(crate) fn snapshot(&self, event: ListEvent) -> Vec<ListEventHandler<I, H>> {
        match event {
            ListEvent::ContentUpdated => self.content_updated.clone(),
            ListEvent::UserScroll => self.user_scroll.clone(),
        }
    }
}

impl<I, H: Host> core::fmt::Debug for EventHandlers<I, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("content_updated", &self.content_updated.len())
            .field("user_scroll", &self.user_scroll.len())
            .finish()
    }
}
