use leptos::*;
use leptos_meta::Title;

pub mod repository;
pub mod view_model;

mod cancel;
mod success;

pub use cancel::CheckoutCancelPanel;
pub use success::CheckoutSuccessPanel;

#[component]
pub fn CheckoutSuccessPage() -> impl IntoView {
    view! {
        <Title text="Payment successful" />
        <CheckoutSuccessPanel />
    }
}

#[component]
pub fn CheckoutCancelPage() -> impl IntoView {
    view! {
        <Title text="Payment cancelled" />
        <CheckoutCancelPanel />
    }
}
