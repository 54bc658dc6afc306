use super::repository::{WatchRepository, WatchState};
use crate::api::{ApiClient, ApiError};
use crate::components::player::UrlRenewer;
use crate::state::auth::use_auth;
use crate::utils::nav;
use futures::FutureExt;
use leptos::*;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct WatchViewModel {
    pub id: Uuid,
    pub state: Resource<(Uuid, Option<String>), Result<WatchState, ApiError>>,
    repository: StoredValue<WatchRepository>,
}

pub fn detail_path(id: Uuid) -> String {
    format!("/videos/{}", id)
}

impl WatchViewModel {
    pub fn new(id: Uuid) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(WatchRepository::new(api));
        let (auth, _) = use_auth();

        let state = create_resource(
            move || (id, auth.with(|state| state.user.as_ref().map(|user| user.id.clone()))),
            move |(id, viewer)| {
                let repo = repository.get_value();
                async move { repo.open(id, viewer).await }
            },
        );

        // Without a purchase the detail page is where the buy button lives.
        create_effect(move |_| {
            if let Some(Ok(WatchState::Denied)) = state.get() {
                nav::navigate_to(&detail_path(id));
            }
        });

        Self {
            id,
            state,
            repository,
        }
    }

    /// Asks the backend for a freshly signed URL when the current one
    /// expires mid-stream.
    pub fn renewer(&self) -> UrlRenewer {
        let repo = self.repository.get_value();
        let id = self.id;
        Rc::new(move || {
            let repo = repo.clone();
            async move { repo.renew(id).await }.boxed_local()
        })
    }
}
