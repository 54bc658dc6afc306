use leptos::*;
use leptos_meta::Title;

pub mod repository;
pub mod view_model;

mod panel;

pub use panel::PurchasesPanel;

#[component]
pub fn PurchasesPage() -> impl IntoView {
    view! {
        <Title text="My purchases" />
        <PurchasesPanel />
    }
}
