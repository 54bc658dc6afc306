use crate::{
    api::VideoResponse,
    utils::format::{format_duration, format_price},
};
use leptos::*;

pub fn video_href(video: &VideoResponse) -> String {
    format!("/videos/{}", video.id)
}

#[component]
pub fn VideoCard(video: VideoResponse) -> impl IntoView {
    let href = video_href(&video);
    let price = format_price(video.price_cents);
    let duration = video.duration_secs.map(format_duration);
    let thumbnail = video.thumbnail_url.clone();

    view! {
        <a
            href=href
            class="group block bg-surface-elevated rounded-lg shadow-sm border border-border overflow-hidden hover:shadow-md transition-shadow"
        >
            <div class="relative aspect-video bg-surface-muted">
                {thumbnail.map(|src| view! {
                    <img src=src alt="" class="w-full h-full object-cover" loading="lazy" />
                })}
                {duration.map(|label| view! {
                    <span class="absolute bottom-2 right-2 rounded bg-black/75 px-1.5 py-0.5 text-xs text-white">
                        {label}
                    </span>
                })}
            </div>
            <div class="p-4 space-y-1">
                <h3 class="text-sm font-semibold text-fg line-clamp-2 group-hover:underline">{video.title}</h3>
                <p class="text-sm font-medium text-action-primary-bg">{price}</p>
            </div>
        </a>
    }
}

#[component]
pub fn StatCard(#[prop(into)] label: String, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg px-4 py-5 sm:p-6">
            <dt class="text-sm font-medium text-fg-muted">{label}</dt>
            <dd class="mt-1 text-2xl font-semibold text-fg">{move || value.get()}</dd>
        </div>
    }
}
