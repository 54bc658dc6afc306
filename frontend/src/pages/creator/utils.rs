use crate::api::{CreateVideoRequest, UpdateVideoRequest, VideoResponse, VideoStatus};
use crate::utils::format::{cents_to_input, parse_price_input};
use leptos::*;
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

pub const DASHBOARD_PATH: &str = "/creator/dashboard";
pub const UPLOAD_PATH: &str = "/creator/upload";

pub fn edit_path(id: Uuid) -> String {
    format!("/creator/videos/{}/edit", id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFormErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
}

impl VideoFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.price.is_none()
    }
}

/// Metadata inputs shared by the upload and edit pages. Price is typed in
/// dollars.
#[derive(Clone, Copy)]
pub struct VideoFormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub price: RwSignal<String>,
    pub errors: RwSignal<VideoFormErrors>,
}

impl Default for VideoFormState {
    fn default() -> Self {
        Self {
            title: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            price: create_rw_signal("0.00".to_string()),
            errors: create_rw_signal(VideoFormErrors::default()),
        }
    }
}

impl VideoFormState {
    pub fn load_from(&self, video: &VideoResponse) {
        self.title.set(video.title.clone());
        self.description
            .set(video.description.clone().unwrap_or_default());
        self.price.set(cents_to_input(video.price_cents));
        self.errors.set(VideoFormErrors::default());
    }

    pub fn title_error(&self) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.title.clone()))
    }

    pub fn description_error(&self) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.description.clone()))
    }

    pub fn price_error(&self) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.price.clone()))
    }

    /// Validates the current inputs and records any field errors.
    pub fn validate(&self) -> Option<VideoDraft> {
        let result = validate_video_form(
            &self.title.get_untracked(),
            &self.description.get_untracked(),
            &self.price.get_untracked(),
        );
        match result {
            Ok(draft) => {
                self.errors.set(VideoFormErrors::default());
                Some(draft)
            }
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }
}

/// Validated form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
}

impl VideoDraft {
    pub fn into_create(self) -> CreateVideoRequest {
        CreateVideoRequest {
            title: self.title,
            description: (!self.description.is_empty()).then_some(self.description),
            price_cents: self.price_cents,
        }
    }

    /// Sends every field so a cleared description is stored as empty.
    pub fn into_update(self) -> UpdateVideoRequest {
        UpdateVideoRequest {
            title: Some(self.title),
            description: Some(self.description),
            price_cents: Some(self.price_cents),
        }
    }
}

pub fn validate_video_form(
    title: &str,
    description: &str,
    price: &str,
) -> Result<VideoDraft, VideoFormErrors> {
    let title = title.trim();
    let description = description.trim();
    let price_cents = parse_price_input(price);

    let errors = VideoFormErrors {
        title: if title.is_empty() {
            Some("Title is required".to_string())
        } else if title.chars().count() > MAX_TITLE_LEN {
            Some(format!("Title must be at most {} characters", MAX_TITLE_LEN))
        } else {
            None
        },
        description: (description.chars().count() > MAX_DESCRIPTION_LEN).then(|| {
            format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )
        }),
        price: price_cents
            .is_none()
            .then(|| "Enter a price of 0 or more, like 9.99".to_string()),
    };

    match price_cents {
        Some(price_cents) if errors.is_empty() => Ok(VideoDraft {
            title: title.to_string(),
            description: description.to_string(),
            price_cents,
        }),
        _ => Err(errors),
    }
}

pub fn has_processing(videos: &[VideoResponse]) -> bool {
    videos
        .iter()
        .any(|video| video.status == VideoStatus::Processing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::sample_video;

    #[test]
    fn title_is_required_and_bounded() {
        let errors = validate_video_form("   ", "", "0").unwrap_err();
        assert_eq!(errors.title.as_deref(), Some("Title is required"));

        let long = "a".repeat(MAX_TITLE_LEN + 1);
        let errors = validate_video_form(&long, "", "0").unwrap_err();
        assert!(errors.title.unwrap().contains("255"));

        assert!(validate_video_form(&"a".repeat(MAX_TITLE_LEN), "", "0").is_ok());
    }

    #[test]
    fn description_and_price_are_checked() {
        let errors =
            validate_video_form("Traits", &"d".repeat(MAX_DESCRIPTION_LEN + 1), "-1").unwrap_err();
        assert!(errors.description.is_some());
        assert!(errors.price.is_some());
        assert!(errors.title.is_none());
    }

    #[test]
    fn draft_converts_to_requests() {
        let draft = validate_video_form(" Traits ", "", "$12.5").unwrap();
        assert_eq!(draft.price_cents, 1250);
        assert_eq!(draft.title, "Traits");

        let create = draft.clone().into_create();
        assert_eq!(create.description, None);

        let update = draft.into_update();
        assert_eq!(update.description.as_deref(), Some(""));
        assert_eq!(update.price_cents, Some(1250));
    }

    #[test]
    fn processing_videos_are_detected() {
        let ready = sample_video("Ready", 0, VideoStatus::Ready);
        let processing = sample_video("Busy", 0, VideoStatus::Processing);
        assert!(!has_processing(&[ready.clone()]));
        assert!(has_processing(&[ready, processing]));
        assert!(!has_processing(&[]));
    }

    #[test]
    fn edit_path_targets_video() {
        let id = Uuid::nil();
        assert_eq!(
            edit_path(id),
            "/creator/videos/00000000-0000-0000-0000-000000000000/edit"
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::sample_video;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn form_loads_video_and_reports_errors() {
        with_runtime(|| {
            let form = VideoFormState::default();
            let mut video = sample_video("Traits", 1299, VideoStatus::Ready);
            video.description = None;
            form.load_from(&video);
            assert_eq!(form.title.get_untracked(), "Traits");
            assert_eq!(form.description.get_untracked(), "");
            assert_eq!(form.price.get_untracked(), "12.99");

            form.title.set(String::new());
            assert!(form.validate().is_none());
            assert_eq!(
                form.title_error().get_untracked().as_deref(),
                Some("Title is required")
            );

            form.title.set("Traits".into());
            assert!(form.validate().is_some());
            assert!(form.errors.get_untracked().is_empty());
        });
    }
}
