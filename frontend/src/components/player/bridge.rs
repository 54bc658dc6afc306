use super::controller::PlayerEvent;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::cell::RefCell;
use std::rc::Rc;

/// Single entry point for everything that wants to change player state.
/// Closing it ends the event loop once queued events are drained.
#[derive(Clone, Default)]
pub struct PlayerBridge {
    sender: Rc<RefCell<Option<UnboundedSender<PlayerEvent>>>>,
}

impl PlayerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> UnboundedReceiver<PlayerEvent> {
        let (tx, rx) = unbounded();
        if let Some(previous) = self.sender.replace(Some(tx)) {
            previous.close_channel();
        }
        rx
    }

    pub fn send(&self, event: PlayerEvent) {
        if let Some(sender) = self.sender.borrow().as_ref() {
            let _ = sender.unbounded_send(event);
        }
    }

    pub fn close(&self) {
        if let Some(sender) = self.sender.borrow_mut().take() {
            sender.close_channel();
        }
    }

    pub fn is_open(&self) -> bool {
        self.sender.borrow().is_some()
    }
}
