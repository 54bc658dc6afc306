use crate::api::{ApiClient, ApiError, UpdateVideoRequest, VideoResponse};
use crate::pages::creator::repository::CreatorRepository;
use crate::pages::creator::utils::{VideoFormState, DASHBOARD_PATH};
use crate::state::toast::{use_toasts, ToastStore};
use crate::utils::nav;
use leptos::*;
use uuid::Uuid;

/// `true` when the save went through and the page should move on.
pub(super) fn apply_save_result(
    result: Option<Result<VideoResponse, ApiError>>,
    toasts: ToastStore,
    error: RwSignal<Option<String>>,
) -> bool {
    match result {
        Some(Ok(video)) => {
            log::info!("Updated video {}", video.id);
            toasts.success("Video updated");
            error.set(None);
            true
        }
        Some(Err(err)) => {
            log::error!("Failed to update video: {}", err);
            let message = if err.code == "VALIDATION_ERROR" {
                err.error
            } else {
                "Failed to save changes".to_string()
            };
            error.set(Some(message));
            false
        }
        None => false,
    }
}

#[derive(Clone, Copy)]
pub struct EditViewModel {
    pub id: Uuid,
    pub form: VideoFormState,
    pub video: Resource<Uuid, Result<VideoResponse, ApiError>>,
    pub save_action: Action<(Uuid, UpdateVideoRequest), Result<VideoResponse, ApiError>>,
    pub error: RwSignal<Option<String>>,
}

impl EditViewModel {
    pub fn new(id: Uuid) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(CreatorRepository::new(api));
        let toasts = use_toasts();
        let form = VideoFormState::default();
        let error = create_rw_signal(None::<String>);

        let video = create_resource(
            move || id,
            move |id| {
                let repo = repository.get_value();
                async move { repo.load_video(id).await }
            },
        );

        // Loaded values replace whatever is in the inputs.
        create_effect(move |_| {
            video.with(|loaded| {
                if let Some(Ok(video)) = loaded {
                    form.load_from(video);
                }
            });
        });

        let save_action = create_action(move |(id, payload): &(Uuid, UpdateVideoRequest)| {
            let repo = repository.get_value();
            let id = *id;
            let payload = payload.clone();
            async move { repo.update_video(id, payload).await }
        });

        create_effect(move |_| {
            if apply_save_result(save_action.value().get(), toasts, error) {
                nav::navigate_to(DASHBOARD_PATH);
            }
        });

        Self {
            id,
            form,
            video,
            save_action,
            error,
        }
    }

    pub fn save(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        if let Some(draft) = self.form.validate() {
            self.save_action.dispatch((self.id, draft.into_update()));
        }
    }
}
