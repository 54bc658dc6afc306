use leptos::*;
use leptos_meta::Title;
use uuid::Uuid;

pub mod repository;
pub mod view_model;

mod panel;

pub use panel::WatchPanel;

#[component]
pub fn WatchPage(id: Uuid) -> impl IntoView {
    view! {
        <Title text="Watch" />
        <WatchPanel id=id />
    }
}
