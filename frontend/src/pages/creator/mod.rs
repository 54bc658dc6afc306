//! Creator tools: the dashboard, the two-step upload and the edit form.

use leptos::*;
use leptos_meta::Title;
use uuid::Uuid;

pub mod components;
pub mod dashboard;
pub mod edit;
pub mod repository;
pub mod upload;
pub mod utils;

#[component]
pub fn CreatorDashboardPage() -> impl IntoView {
    view! {
        <Title text="Creator dashboard" />
        <dashboard::DashboardPanel />
    }
}

#[component]
pub fn UploadVideoPage() -> impl IntoView {
    view! {
        <Title text="Upload video" />
        <upload::UploadPanel />
    }
}

#[component]
pub fn EditVideoPage(id: Uuid) -> impl IntoView {
    view! {
        <Title text="Edit video" />
        <edit::EditPanel id=id />
    }
}
