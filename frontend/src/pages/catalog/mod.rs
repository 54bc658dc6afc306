use leptos::*;
use leptos_meta::Title;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::CatalogPanel;

#[component]
pub fn CatalogPage() -> impl IntoView {
    view! {
        <Title text="Catalog" />
        <CatalogPanel />
    }
}
