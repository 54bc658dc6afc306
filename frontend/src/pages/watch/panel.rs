use super::{
    repository::WatchState,
    view_model::{detail_path, WatchViewModel},
};
use crate::api::VideoResponse;
use crate::components::{
    layout::{ErrorMessage, LoadingSpinner},
    player::{UrlRenewer, VideoPlayer},
};
use crate::utils::format::{format_date, format_duration};
use leptos::*;
use uuid::Uuid;

#[component]
pub fn WatchPanel(id: Uuid) -> impl IntoView {
    let vm = WatchViewModel::new(id);

    view! {
        <Suspense fallback=move || view! { <LoadingSpinner /> }>
            {move || {
                vm.state
                    .get()
                    .map(|result| match result {
                        Ok(WatchState::Ready { video, stream_url }) => view! {
                            <WatchView video=video stream_url=stream_url renew=vm.renewer() />
                        }
                        .into_view(),
                        Ok(WatchState::Denied) => view! { <AccessDenied id=id /> }.into_view(),
                        Err(err) => {
                            log::warn!("Watch page for {} failed: {}", id, err);
                            view! { <ErrorMessage message="Video unavailable" /> }.into_view()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn WatchView(video: VideoResponse, stream_url: String, renew: UrlRenewer) -> impl IntoView {
    let src = Signal::derive(move || Some(stream_url.clone()));
    let created = format_date(&video.created_at);
    let duration = video.duration_secs.map(format_duration);
    let description = video.description.filter(|text| !text.trim().is_empty());

    view! {
        <div class="mx-auto max-w-5xl space-y-6">
            <VideoPlayer src=src renew_url=renew title=video.title.clone() />
            <div>
                <h1 class="text-2xl font-bold text-fg">{video.title}</h1>
                <div class="mt-1 flex flex-wrap items-center gap-3 text-sm text-fg-muted">
                    <span>{created}</span>
                    {duration.map(|label| view! { <span>{label}</span> })}
                </div>
                {description.map(|text| view! { <p class="mt-4 whitespace-pre-line text-fg">{text}</p> })}
            </div>
            <p class="text-xs text-fg-muted">
                "Shortcuts: Space (play/pause), Arrow keys (seek), F (fullscreen), M (mute)"
            </p>
        </div>
    }
}

#[component]
fn AccessDenied(id: Uuid) -> impl IntoView {
    view! {
        <div class="mx-auto max-w-lg text-center space-y-4 py-12">
            <p class="text-fg">"You need to purchase this video before watching it."</p>
            <a href=detail_path(id) class="text-action-primary-bg hover:underline">"Back to video"</a>
        </div>
    }
}
