//! Bounded, cancellable polling.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Satisfied { value: T, attempts: u32 },
    Exhausted { attempts: u32 },
    Cancelled,
}

/// Shared flag checked between attempts. Flip it from `on_cleanup` to stop
/// a poll when its page goes away.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Calls `check` up to `policy.max_attempts` times, sleeping
/// `policy.interval` between calls, until it yields a value.
pub async fn poll_until<T, C, CFut, S, SFut>(
    policy: PollPolicy,
    cancel: &CancelToken,
    mut check: C,
    sleep: S,
) -> PollOutcome<T>
where
    C: FnMut(u32) -> CFut,
    CFut: Future<Output = Option<T>>,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    for attempt in 1..=policy.max_attempts {
        if cancel.is_cancelled() {
            return PollOutcome::Cancelled;
        }
        if let Some(value) = check(attempt).await {
            return PollOutcome::Satisfied {
                value,
                attempts: attempt,
            };
        }
        if attempt < policy.max_attempts {
            sleep(policy.interval).await;
        }
    }
    if cancel.is_cancelled() {
        return PollOutcome::Cancelled;
    }
    log::debug!("Polling gave up after {} attempts", policy.max_attempts);
    PollOutcome::Exhausted {
        attempts: policy.max_attempts,
    }
}

pub async fn browser_sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

/// [`poll_until`] on the browser timer.
pub async fn poll<T, C, CFut>(policy: PollPolicy, cancel: &CancelToken, check: C) -> PollOutcome<T>
where
    C: FnMut(u32) -> CFut,
    CFut: Future<Output = Option<T>>,
{
    poll_until(policy, cancel, check, browser_sleep).await
}
