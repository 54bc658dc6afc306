//! Single-flight coordination of access-token refreshes.
//!
//! The first request that sees a 401 becomes the leader and runs the
//! refresh; requests that hit 401 while it is in flight park on a one-shot
//! channel and are released (or rejected) together when it settles.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

use super::types::ApiError;

type Waiter = oneshot::Sender<Result<(), ApiError>>;

#[derive(Default)]
struct State {
    in_progress: bool,
    queue: Vec<Waiter>,
}

#[derive(Clone, Default)]
pub struct RefreshCoordinator {
    state: Rc<RefCell<State>>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.borrow().in_progress
    }

    pub fn queued(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Runs `refresh` unless one is already in flight, in which case waits
    /// for that one. `Ok(())` means the caller should replay its request;
    /// on failure the leader's `trigger` error is handed to every waiter.
    pub async fn run<F, Fut>(&self, trigger: ApiError, refresh: F) -> Result<(), ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let waiter = {
            let mut state = self.state.borrow_mut();
            if state.in_progress {
                let (tx, rx) = oneshot::channel();
                state.queue.push(tx);
                Some(rx)
            } else {
                state.in_progress = true;
                None
            }
        };

        if let Some(rx) = waiter {
            log::debug!("Token refresh in flight, queueing request");
            // Canceled: the leader was dropped before settling.
            return rx.await.unwrap_or(Err(trigger));
        }

        let flight = InFlight {
            state: self.state.clone(),
            settled: false,
        };
        let outcome = if refresh().await {
            Ok(())
        } else {
            Err(trigger)
        };
        flight.settle(&outcome);
        outcome
    }
}

/// Clears the in-progress flag however the leader's future ends.
struct InFlight {
    state: Rc<RefCell<State>>,
    settled: bool,
}

impl InFlight {
    fn release(&self) -> Vec<Waiter> {
        let mut state = self.state.borrow_mut();
        state.in_progress = false;
        std::mem::take(&mut state.queue)
    }

    fn settle(mut self, outcome: &Result<(), ApiError>) {
        let waiters = self.release();
        log::debug!(
            "Token refresh settled (ok: {}), releasing {} queued request(s)",
            outcome.is_ok(),
            waiters.len()
        );
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
        self.settled = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            // Dropping the senders rejects every parked request.
            let abandoned = self.release();
            if !abandoned.is_empty() {
                log::warn!(
                    "Token refresh abandoned, rejecting {} queued request(s)",
                    abandoned.len()
                );
            }
        }
    }
}
