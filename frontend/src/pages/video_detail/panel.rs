use super::{
    utils::{detail_action, detail_href, edit_href, watch_href, DetailAction},
    view_model::VideoDetailViewModel,
};
use crate::api::VideoResponse;
use crate::components::{
    common::{Button, ButtonVariant},
    layout::{ErrorMessage, LoadingSpinner},
    status_badge::VideoStatusBadge,
};
use crate::state::auth::use_auth;
use crate::utils::{
    format::{format_date, format_duration, format_price},
    nav,
};
use leptos::*;
use uuid::Uuid;

const LINK_BUTTON: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover";
const LINK_BUTTON_SECONDARY: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border hover:bg-surface-elevated";

#[component]
pub fn VideoDetailPanel(id: Uuid) -> impl IntoView {
    let vm = VideoDetailViewModel::new(id);

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner /> }>
            {move || {
                vm.video
                    .get()
                    .map(|result| match result {
                        Ok(video) => view! { <VideoDetails video=video vm=vm /> }.into_view(),
                        Err(err) => {
                            log::warn!("Video {} failed to load: {}", id, err);
                            view! { <ErrorMessage message="Failed to load video" /> }.into_view()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn VideoDetails(video: VideoResponse, vm: VideoDetailViewModel) -> impl IntoView {
    let price = format_price(video.price_cents);
    let created = format_date(&video.created_at);
    let duration = video.duration_secs.map(format_duration);
    let description = video.description.clone().filter(|text| !text.trim().is_empty());
    let thumbnail = video.thumbnail_url.clone();
    let title = video.title.clone();
    let alt = title.clone();
    let status = video.status;

    view! {
        <div class="mx-auto max-w-4xl space-y-6">
            <div class="relative aspect-video overflow-hidden rounded-lg bg-surface-muted">
                {match thumbnail {
                    Some(src) => view! {
                        <img src=src alt=alt class="h-full w-full object-cover" loading="lazy" />
                    }
                    .into_view(),
                    None => view! {
                        <div class="flex h-full items-center justify-center text-fg-muted">
                            "No preview available"
                        </div>
                    }
                    .into_view(),
                }}
            </div>
            <div class="space-y-4">
                <div class="flex flex-col gap-4 sm:flex-row sm:items-start sm:justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">{title}</h1>
                        <div class="mt-1 flex flex-wrap items-center gap-3 text-sm text-fg-muted">
                            <span>{created}</span>
                            {duration.map(|label| view! { <span>{label}</span> })}
                            <VideoStatusBadge status=status />
                            <span class="font-medium text-action-primary-bg">{price}</span>
                        </div>
                    </div>
                    <CallToAction video=video vm=vm />
                </div>
                {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
                {description.map(|text| view! { <p class="whitespace-pre-line text-fg">{text}</p> })}
            </div>
        </div>
    }
}

#[component]
fn CallToAction(video: VideoResponse, vm: VideoDetailViewModel) -> impl IntoView {
    let (auth, _) = use_auth();
    let pending = vm.checkout_action.pending();
    let watch = watch_href(&video);
    let edit = edit_href(&video);
    let sign_in = nav::login_redirect(Some(&detail_href(&video)));

    move || {
        let action = auth.with(|state| detail_action(&video, state, vm.access.get()));
        match action {
            DetailAction::Unavailable => ().into_view(),
            DetailAction::OwnerPreview => view! {
                <div class="flex gap-2">
                    <a href=watch.clone() class=LINK_BUTTON>"Watch Preview"</a>
                    <a href=edit.clone() class=LINK_BUTTON_SECONDARY>"Edit"</a>
                </div>
            }
            .into_view(),
            DetailAction::SignInToBuy => view! {
                <a href=sign_in.clone() class=LINK_BUTTON>"Login to Purchase"</a>
            }
            .into_view(),
            DetailAction::CheckingAccess => view! {
                <div class="h-6 w-6 animate-spin rounded-full border-b-2 border-action-primary-bg"></div>
            }
            .into_view(),
            DetailAction::Watch => view! {
                <a href=watch.clone() class=LINK_BUTTON>"Watch Now"</a>
            }
            .into_view(),
            DetailAction::Buy { label } => view! {
                <Button
                    variant=ButtonVariant::Primary
                    loading=pending
                    on:click=move |_| vm.buy()
                >
                    {label}
                </Button>
            }
            .into_view(),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::VideoStatus;
    use crate::test_support::helpers::{creator_user, provide_auth, sample_video, viewer_user};
    use crate::test_support::ssr::render_to_string;

    fn render_details(video: VideoResponse, user: Option<crate::api::AuthUser>) -> String {
        render_to_string(move || {
            provide_auth(user);
            let vm = VideoDetailViewModel::new(video.id);
            view! { <VideoDetails video=video vm=vm /> }
        })
    }

    #[test]
    fn guest_sees_login_prompt_with_return_path() {
        let video = sample_video("Ownership", 1299, VideoStatus::Ready);
        let id = video.id;
        let html = render_details(video, None);
        assert!(html.contains("Ownership"));
        assert!(html.contains("$12.99"));
        assert!(html.contains("Login to Purchase"));
        assert!(html.contains(&format!("/login?from=%2Fvideos%2F{}", id)));
    }

    #[test]
    fn owner_sees_preview_and_edit() {
        let video = sample_video("Ownership", 1299, VideoStatus::Ready);
        let html = render_details(video, Some(creator_user()));
        assert!(html.contains("Watch Preview"));
        assert!(html.contains("/edit"));
    }

    #[test]
    fn viewer_waits_for_access_check() {
        let video = sample_video("Ownership", 1299, VideoStatus::Ready);
        let html = render_details(video, Some(viewer_user()));
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("Login to Purchase"));
    }

    #[test]
    fn processing_video_has_no_call_to_action() {
        let video = sample_video("Ownership", 1299, VideoStatus::Processing);
        let html = render_details(video, Some(viewer_user()));
        assert!(html.contains("Processing"));
        assert!(!html.contains("Buy for"));
        assert!(!html.contains("Watch Now"));
    }
}
