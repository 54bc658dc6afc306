use crate::api::{
    validate_upload, ApiClient, ApiError, CreateVideoRequest, ProgressCallback, UploadFile,
    VideoResponse,
};
use crate::pages::creator::repository::CreatorRepository;
use crate::pages::creator::utils::{VideoFormState, DASHBOARD_PATH};
use crate::state::toast::{use_toasts, ToastStore};
use crate::utils::nav;
use leptos::*;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    Details,
    File,
}

fn failure_message(prefix: &str, error: &ApiError) -> String {
    if error.code == "VALIDATION_ERROR" {
        error.error.clone()
    } else {
        format!("{}. Please try again.", prefix)
    }
}

/// Moves to the file step once the draft exists.
pub(super) fn apply_create_result(
    result: Option<Result<VideoResponse, ApiError>>,
    created: RwSignal<Option<VideoResponse>>,
    step: RwSignal<UploadStep>,
    error: RwSignal<Option<String>>,
) {
    match result {
        Some(Ok(video)) => {
            log::info!("Created draft video {}", video.id);
            created.set(Some(video));
            error.set(None);
            step.set(UploadStep::File);
        }
        Some(Err(err)) => {
            log::error!("Failed to create video: {}", err);
            error.set(Some(failure_message("Failed to create video", &err)));
        }
        None => {}
    }
}

/// `true` when the upload went through and the page should move on.
pub(super) fn apply_upload_result(
    result: Option<Result<VideoResponse, ApiError>>,
    toasts: ToastStore,
    progress: RwSignal<u32>,
    error: RwSignal<Option<String>>,
) -> bool {
    match result {
        Some(Ok(_)) => {
            toasts.success("Upload complete. Your video is now processing.");
            error.set(None);
            true
        }
        Some(Err(err)) => {
            log::error!("Upload failed: {}", err);
            progress.set(0);
            error.set(Some(failure_message("Upload failed", &err)));
            false
        }
        None => false,
    }
}

#[derive(Clone, Copy)]
pub struct UploadViewModel {
    pub form: VideoFormState,
    pub step: RwSignal<UploadStep>,
    pub created: RwSignal<Option<VideoResponse>>,
    pub file: RwSignal<Option<UploadFile>>,
    pub file_error: RwSignal<Option<String>>,
    pub progress: RwSignal<u32>,
    pub error: RwSignal<Option<String>>,
    pub create_action: Action<CreateVideoRequest, Result<VideoResponse, ApiError>>,
    pub upload_action: Action<(Uuid, UploadFile), Result<VideoResponse, ApiError>>,
}

impl UploadViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(CreatorRepository::new(api));
        let toasts = use_toasts();
        let form = VideoFormState::default();
        let step = create_rw_signal(UploadStep::Details);
        let created = create_rw_signal(None::<VideoResponse>);
        let file = create_rw_signal(None::<UploadFile>);
        let file_error = create_rw_signal(None::<String>);
        let progress = create_rw_signal(0u32);
        let error = create_rw_signal(None::<String>);

        let create_video_action = create_action(move |payload: &CreateVideoRequest| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.create_video(payload).await }
        });

        let upload_action = create_action(move |(id, upload): &(Uuid, UploadFile)| {
            let repo = repository.get_value();
            let id = *id;
            let upload = upload.clone();
            let on_progress: ProgressCallback = Rc::new(move |percent: u32| progress.set(percent));
            async move { repo.upload(id, &upload, on_progress).await }
        });

        create_effect(move |_| {
            apply_create_result(create_video_action.value().get(), created, step, error);
        });

        create_effect(move |_| {
            if apply_upload_result(upload_action.value().get(), toasts, progress, error) {
                nav::navigate_to(DASHBOARD_PATH);
            }
        });

        #[cfg(target_arch = "wasm32")]
        {
            let pending = upload_action.pending();
            let guard = window_event_listener(ev::beforeunload, move |event| {
                if pending.get_untracked() {
                    event.prevent_default();
                    event.set_return_value("An upload is in progress.");
                }
            });
            on_cleanup(move || guard.remove());
        }

        Self {
            form,
            step,
            created,
            file,
            file_error,
            progress,
            error,
            create_action: create_video_action,
            upload_action,
        }
    }

    pub fn submit_details(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        if let Some(draft) = self.form.validate() {
            self.create_action.dispatch(draft.into_create());
        }
    }

    pub fn select_file(&self, picked: Option<UploadFile>) {
        match validate_upload(picked.as_ref()) {
            Ok(()) => {
                self.file_error.set(None);
                self.file.set(picked);
            }
            Err(rejection) => {
                self.file_error.set(Some(rejection.to_string()));
                self.file.set(None);
            }
        }
    }

    pub fn start_upload(&self) {
        if self.upload_action.pending().get_untracked() {
            return;
        }
        let Some(id) = self
            .created
            .with_untracked(|created| created.as_ref().map(|video| video.id))
        else {
            return;
        };
        let picked = self.file.get_untracked();
        if let Err(rejection) = validate_upload(picked.as_ref()) {
            self.file_error.set(Some(rejection.to_string()));
            return;
        }
        if let Some(upload) = picked {
            self.error.set(None);
            self.upload_action.dispatch((id, upload));
        }
    }

    pub fn uploading(&self) -> Signal<bool> {
        self.upload_action.pending().into()
    }
}

impl Default for UploadViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::VideoStatus;
    use crate::state::toast::provide_toasts;
    use crate::test_support::helpers::{sample_video, CREATOR_ID};
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};
    use serde_json::json;

    const ID: &str = "7f1c2f5e-8a43-4c43-9a53-2b8f3f7f6a10";

    fn video_json(status: &str) -> serde_json::Value {
        json!({
            "id": ID,
            "creatorId": CREATOR_ID,
            "title": "Traits",
            "priceCents": 999,
            "status": status,
            "createdAt": "2025-01-05T10:00:00Z",
            "updatedAt": "2025-01-05T10:00:00Z"
        })
    }

    fn mp4(len: usize) -> UploadFile {
        UploadFile::from_bytes("clip.mp4", "video/mp4", vec![0; len])
    }

    #[test]
    fn invalid_details_stay_on_form() {
        with_runtime(|| {
            provide_toasts();
            let vm = UploadViewModel::new();
            vm.form.price.set("abc".into());
            vm.submit_details();
            assert!(vm.form.errors.get_untracked().title.is_some());
            assert!(vm.form.errors.get_untracked().price.is_some());
            assert_eq!(vm.create_action.version().get_untracked(), 0);
            assert_eq!(vm.step.get_untracked(), UploadStep::Details);
        });
    }

    #[test]
    fn file_selection_is_validated() {
        with_runtime(|| {
            provide_toasts();
            let vm = UploadViewModel::new();
            vm.select_file(Some(UploadFile::from_bytes("notes.txt", "text/plain", vec![1])));
            assert!(vm
                .file_error
                .get_untracked()
                .unwrap()
                .contains("Unsupported file type"));
            assert!(vm.file.get_untracked().is_none());

            vm.select_file(Some(mp4(4)));
            assert!(vm.file_error.get_untracked().is_none());
            assert!(vm.file.get_untracked().is_some());

            vm.select_file(None);
            assert_eq!(vm.file_error.get_untracked().as_deref(), Some("No file selected"));
        });
    }

    #[test]
    fn create_result_advances_step() {
        with_runtime(|| {
            let created = create_rw_signal(None);
            let step = create_rw_signal(UploadStep::Details);
            let error = create_rw_signal(None);

            apply_create_result(
                Some(Err(ApiError::unknown("boom"))),
                created,
                step,
                error,
            );
            assert_eq!(step.get_untracked(), UploadStep::Details);
            assert!(error.get_untracked().unwrap().contains("Failed to create video"));

            let video = sample_video("Traits", 999, VideoStatus::Draft);
            apply_create_result(Some(Ok(video.clone())), created, step, error);
            assert_eq!(step.get_untracked(), UploadStep::File);
            assert_eq!(created.get_untracked(), Some(video));
            assert!(error.get_untracked().is_none());
        });
    }

    #[test]
    fn upload_failure_resets_progress() {
        with_runtime(|| {
            let toasts = provide_toasts();
            let progress = create_rw_signal(40u32);
            let error = create_rw_signal(None);

            let done = apply_upload_result(
                Some(Err(ApiError::validation("File too large"))),
                toasts,
                progress,
                error,
            );
            assert!(!done);
            assert_eq!(progress.get_untracked(), 0);
            assert_eq!(error.get_untracked().as_deref(), Some("File too large"));

            let video = sample_video("Traits", 999, VideoStatus::Processing);
            assert!(apply_upload_result(Some(Ok(video)), toasts, progress, error));
            assert_eq!(toasts.toasts().get_untracked().len(), 1);
        });
    }

    #[test]
    fn create_then_upload_through_api() {
        with_local_runtime_async(|| async {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method(POST).path("/api/videos");
                then.status(201).json_body(video_json("DRAFT"));
            });
            server.mock(|when, then| {
                when.method(PUT).path(&format!("/api/videos/{}/upload", ID));
                then.status(200).json_body(video_json("PROCESSING"));
            });
            provide_context(ApiClient::new_with_base_url(server.url("/api")));
            provide_toasts();

            let vm = UploadViewModel::new();
            vm.form.title.set("Traits".into());
            vm.form.price.set("9.99".into());
            vm.submit_details();
            assert!(
                wait_until(|| vm.create_action.value().get().is_some()).await,
                "draft should be created"
            );
            apply_create_result(vm.create_action.value().get(), vm.created, vm.step, vm.error);
            assert_eq!(vm.step.get_untracked(), UploadStep::File);

            vm.select_file(Some(mp4(16)));
            vm.start_upload();
            assert!(
                wait_until(|| vm.upload_action.value().get().is_some()).await,
                "upload should finish"
            );
            assert!(matches!(vm.upload_action.value().get(), Some(Ok(_))));
            assert_eq!(vm.progress.get_untracked(), 100);
            assert_eq!(server.hits(PUT, &format!("/api/videos/{}/upload", ID)), 1);
        });
    }
}
