use super::repository::VideoDetailRepository;
use crate::api::{ApiClient, ApiError, VideoResponse};
use crate::state::auth::use_auth;
use crate::utils::nav;
use leptos::*;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct VideoDetailViewModel {
    pub id: Uuid,
    pub video: Resource<Uuid, Result<VideoResponse, ApiError>>,
    pub access: Resource<(Uuid, bool), bool>,
    pub checkout_action: Action<Uuid, Result<String, ApiError>>,
    pub error: RwSignal<Option<String>>,
}

/// Hands back the checkout URL to leave for, or records why there is none.
pub(super) fn apply_checkout_result(
    result: Option<Result<String, ApiError>>,
    error: RwSignal<Option<String>>,
) -> Option<String> {
    match result? {
        Ok(url) => {
            error.set(None);
            Some(url)
        }
        Err(err) => {
            log::error!("Checkout could not be started: {}", err);
            error.set(Some("Failed to start checkout".to_string()));
            None
        }
    }
}

impl VideoDetailViewModel {
    pub fn new(id: Uuid) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(VideoDetailRepository::new(api));
        let (auth, _) = use_auth();
        let error = create_rw_signal(None::<String>);

        let video = create_resource(
            move || id,
            move |id| {
                let repo = repository.get_value();
                async move { repo.load_video(id).await }
            },
        );

        let access = create_resource(
            move || (id, auth.with(|state| state.is_authenticated)),
            move |(id, signed_in)| {
                let repo = repository.get_value();
                async move {
                    if signed_in {
                        repo.has_access(id).await
                    } else {
                        false
                    }
                }
            },
        );

        let checkout_action = create_action(move |id: &Uuid| {
            let repo = repository.get_value();
            let id = *id;
            async move { repo.start_checkout(id).await }
        });

        create_effect(move |_| {
            if let Some(url) = apply_checkout_result(checkout_action.value().get(), error) {
                nav::redirect_external(&url);
            }
        });

        Self {
            id,
            video,
            access,
            checkout_action,
            error,
        }
    }

    pub fn buy(&self) {
        if self.checkout_action.pending().get_untracked() {
            return;
        }
        self.error.set(None);
        self.checkout_action.dispatch(self.id);
    }
}
