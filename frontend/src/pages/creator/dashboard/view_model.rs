use crate::api::{ApiClient, ApiError, VideoResponse};
use crate::config::{PROCESSING_POLL_INTERVAL, PROCESSING_POLL_MAX_ATTEMPTS};
use crate::pages::creator::repository::{CreatorRepository, DashboardData};
use crate::pages::creator::utils::has_processing;
use crate::state::toast::{use_toasts, ToastStore};
use crate::utils::poll::{poll_until, CancelToken, PollOutcome, PollPolicy};
use leptos::*;
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

pub const PROCESSING_POLL: PollPolicy =
    PollPolicy::new(PROCESSING_POLL_INTERVAL, PROCESSING_POLL_MAX_ATTEMPTS);

/// Lifecycle of the background refresh that runs while videos transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Running,
    /// Attempts ran out; stays off until the page is reopened.
    GaveUp,
}

pub fn state_after(outcome: &PollOutcome<()>) -> Option<RefreshState> {
    match outcome {
        PollOutcome::Satisfied { .. } => Some(RefreshState::Idle),
        PollOutcome::Exhausted { attempts } => {
            log::info!("Stopped refreshing processing videos after {} reloads", attempts);
            Some(RefreshState::GaveUp)
        }
        PollOutcome::Cancelled => None,
    }
}

/// Waits one interval, then reloads for as long as `is_processing` holds.
/// Resolves `Satisfied` once nothing is processing any more.
pub async fn refresh_while_processing<P, R, S, SFut>(
    policy: PollPolicy,
    cancel: &CancelToken,
    is_processing: P,
    reload: R,
    sleep: S,
) -> PollOutcome<()>
where
    P: Fn() -> bool,
    R: Fn(),
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    sleep(policy.interval).await;
    poll_until(
        policy,
        cancel,
        |_| {
            let done = !is_processing();
            if !done {
                reload();
            }
            futures::future::ready(done.then_some(()))
        },
        sleep,
    )
    .await
}

/// Reports a finished delete and refreshes the listing on success.
pub(super) fn apply_delete_result(
    result: Option<Result<(), ApiError>>,
    toasts: ToastStore,
    delete_target: RwSignal<Option<VideoResponse>>,
    reload: RwSignal<u32>,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok(()) => {
            toasts.success("Video deleted");
            reload.update(|version| *version += 1);
        }
        Err(err) => {
            log::error!("Failed to delete video: {}", err);
            toasts.error("Failed to delete video");
        }
    }
    delete_target.set(None);
}

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub page: RwSignal<u32>,
    pub reload: RwSignal<u32>,
    pub data: Resource<(u32, u32), Result<DashboardData, ApiError>>,
    pub delete_target: RwSignal<Option<VideoResponse>>,
    pub delete_action: Action<Uuid, Result<(), ApiError>>,
    pub refresh: RwSignal<RefreshState>,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(CreatorRepository::new(api));
        let toasts = use_toasts();
        let page = create_rw_signal(0u32);
        let reload = create_rw_signal(0u32);
        let delete_target = create_rw_signal(None::<VideoResponse>);
        let refresh = create_rw_signal(RefreshState::Idle);
        let cancel = CancelToken::new();

        let data = create_resource(
            move || (page.get(), reload.get()),
            move |(page, _)| {
                let repo = repository.get_value();
                async move { repo.dashboard(page).await }
            },
        );

        let delete_action = create_action(move |id: &Uuid| {
            let repo = repository.get_value();
            let id = *id;
            async move { repo.delete_video(id).await }
        });

        create_effect(move |_| {
            apply_delete_result(delete_action.value().get(), toasts, delete_target, reload);
        });

        let token = cancel.clone();
        create_effect(move |_| {
            let processing = data.with(|data| {
                matches!(data, Some(Ok(data)) if has_processing(&data.videos.content))
            });
            if !processing || refresh.get_untracked() != RefreshState::Idle {
                return;
            }
            refresh.set(RefreshState::Running);
            let token = token.clone();
            spawn_local(async move {
                let outcome = refresh_while_processing(
                    PROCESSING_POLL,
                    &token,
                    move || {
                        untrack(|| {
                            data.with(|data| {
                                matches!(data, Some(Ok(data)) if has_processing(&data.videos.content))
                            })
                        })
                    },
                    move || reload.update(|version| *version += 1),
                    crate::utils::poll::browser_sleep,
                )
                .await;
                if let Some(next) = state_after(&outcome) {
                    refresh.set(next);
                }
            });
        });
        on_cleanup(move || cancel.cancel());

        Self {
            page,
            reload,
            data,
            delete_target,
            delete_action,
            refresh,
        }
    }

    pub fn request_delete(&self, video: VideoResponse) {
        self.delete_target.set(Some(video));
    }

    pub fn cancel_delete(&self) {
        self.delete_target.set(None);
    }

    pub fn confirm_delete(&self) {
        if let Some(id) = self
            .delete_target
            .with_untracked(|target| target.as_ref().map(|video| video.id))
        {
            self.delete_action.dispatch(id);
        }
    }

    pub fn total_pages(&self) -> Signal<u32> {
        let data = self.data;
        Signal::derive(move || {
            data.with(|data| {
                data.as_ref()
                    .and_then(|data| data.as_ref().ok())
                    .map(|data| data.videos.total_pages)
                    .unwrap_or(0)
            })
        })
    }
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    fn no_wait(_: Duration) -> futures::future::Ready<()> {
        futures::future::ready(())
    }

    #[test]
    fn reloads_until_processing_finishes() {
        let checks = Rc::new(Cell::new(0u32));
        let reloads = Rc::new(Cell::new(0u32));
        let seen = checks.clone();
        let counted = reloads.clone();

        let outcome = block_on(refresh_while_processing(
            PROCESSING_POLL,
            &CancelToken::new(),
            move || {
                seen.set(seen.get() + 1);
                seen.get() < 3
            },
            move || counted.set(counted.get() + 1),
            no_wait,
        ));

        assert_eq!(
            outcome,
            PollOutcome::Satisfied {
                value: (),
                attempts: 3
            }
        );
        assert_eq!(reloads.get(), 2);
        assert_eq!(state_after(&outcome), Some(RefreshState::Idle));
    }

    #[test]
    fn gives_up_after_sixty_reloads() {
        let reloads = Rc::new(Cell::new(0u32));
        let counted = reloads.clone();
        let outcome = block_on(refresh_while_processing(
            PROCESSING_POLL,
            &CancelToken::new(),
            || true,
            move || counted.set(counted.get() + 1),
            no_wait,
        ));
        assert_eq!(outcome, PollOutcome::Exhausted { attempts: 60 });
        assert_eq!(reloads.get(), 60);
        assert_eq!(state_after(&outcome), Some(RefreshState::GaveUp));
    }

    #[test]
    fn cancelled_refresh_never_reloads() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let reloads = Rc::new(Cell::new(0u32));
        let counted = reloads.clone();
        let outcome = block_on(refresh_while_processing(
            PROCESSING_POLL,
            &cancel,
            || true,
            move || counted.set(counted.get() + 1),
            no_wait,
        ));
        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(reloads.get(), 0);
        assert_eq!(state_after(&outcome), None);
    }

    #[test]
    fn first_reload_waits_one_interval() {
        let sleeps = Rc::new(Cell::new(0u32));
        let counted = sleeps.clone();
        block_on(refresh_while_processing(
            PROCESSING_POLL,
            &CancelToken::new(),
            || false,
            || {},
            move |interval| {
                assert_eq!(interval, Duration::from_secs(10));
                counted.set(counted.get() + 1);
                futures::future::ready(())
            },
        ));
        assert_eq!(sleeps.get(), 1);
    }
}
