use leptos::*;
use leptos_meta::Title;
use uuid::Uuid;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::VideoDetailPanel;

#[component]
pub fn VideoDetailPage(id: Uuid) -> impl IntoView {
    view! {
        <Title text="Video" />
        <VideoDetailPanel id=id />
    }
}
