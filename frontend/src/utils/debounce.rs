use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Trailing-edge debouncer: only the last call inside the delay window runs.
#[derive(Clone, Default)]
pub struct Debouncer {
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every pending call and returns the ticket for a new one.
    pub fn next_ticket(&self) -> u64 {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }

    pub fn cancel(&self) {
        self.next_ticket();
    }

    pub fn schedule(&self, delay: Duration, action: impl FnOnce() + 'static) {
        let ticket = self.next_ticket();
        let this = self.clone();
        leptos::spawn_local(async move {
            super::poll::browser_sleep(delay).await;
            if this.is_current(ticket) {
                action();
            }
        });
    }
}
