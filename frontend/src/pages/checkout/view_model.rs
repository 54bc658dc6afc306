use super::repository::CheckoutRepository;
use crate::api::ApiClient;
use crate::utils::{
    nav,
    poll::{CancelToken, PollOutcome},
};
use leptos::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPhase {
    Confirming,
    Confirmed,
}

/// Every finished poll ends on the success screen, timed out or not; only
/// a cancelled one (page gone) leaves the phase alone.
pub fn phase_after<T>(outcome: &PollOutcome<T>) -> Option<ConfirmationPhase> {
    match outcome {
        PollOutcome::Satisfied { .. } => Some(ConfirmationPhase::Confirmed),
        PollOutcome::Exhausted { attempts } => {
            log::info!(
                "Purchase not confirmed after {} checks, showing success anyway",
                attempts
            );
            Some(ConfirmationPhase::Confirmed)
        }
        PollOutcome::Cancelled => None,
    }
}

pub fn initial_phase(video_id: Option<Uuid>) -> ConfirmationPhase {
    if video_id.is_some() {
        ConfirmationPhase::Confirming
    } else {
        ConfirmationPhase::Confirmed
    }
}

pub fn video_id_from_query(raw: Option<String>) -> Option<Uuid> {
    raw.and_then(|id| Uuid::parse_str(id.trim()).ok())
}

#[derive(Clone, Copy)]
pub struct CheckoutSuccessViewModel {
    pub video_id: Option<Uuid>,
    pub phase: RwSignal<ConfirmationPhase>,
}

impl CheckoutSuccessViewModel {
    pub fn new() -> Self {
        Self::with_video(video_id_from_query(nav::query_param("video_id")))
    }

    pub fn with_video(video_id: Option<Uuid>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = CheckoutRepository::new(api);
        let phase = create_rw_signal(initial_phase(video_id));
        let cancel = CancelToken::new();

        if let Some(id) = video_id {
            let token = cancel.clone();
            create_effect(move |started: Option<()>| {
                if started.is_some() {
                    return;
                }
                let repo = repository.clone();
                let token = token.clone();
                spawn_local(async move {
                    let outcome = repo
                        .await_access(id, &token, crate::utils::poll::browser_sleep)
                        .await;
                    if let Some(next) = phase_after(&outcome) {
                        phase.set(next);
                    }
                });
            });
        }
        on_cleanup(move || cancel.cancel());

        Self { video_id, phase }
    }

    pub fn watch_href(&self) -> Option<String> {
        self.video_id.map(|id| format!("/videos/{}/watch", id))
    }
}

impl Default for CheckoutSuccessViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_video_means_immediate_success() {
        assert_eq!(initial_phase(None), ConfirmationPhase::Confirmed);
        assert_eq!(initial_phase(Some(Uuid::nil())), ConfirmationPhase::Confirming);
    }

    #[test]
    fn exhausted_poll_still_confirms() {
        let exhausted: PollOutcome<()> = PollOutcome::Exhausted { attempts: 10 };
        assert_eq!(phase_after(&exhausted), Some(ConfirmationPhase::Confirmed));
        let satisfied = PollOutcome::Satisfied {
            value: (),
            attempts: 2,
        };
        assert_eq!(phase_after(&satisfied), Some(ConfirmationPhase::Confirmed));
        assert_eq!(phase_after(&PollOutcome::<()>::Cancelled), None);
    }

    #[test]
    fn query_video_id_must_be_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(video_id_from_query(Some(id.to_string())), Some(id));
        assert_eq!(video_id_from_query(Some("abc".into())), None);
        assert_eq!(video_id_from_query(None), None);
    }
}
