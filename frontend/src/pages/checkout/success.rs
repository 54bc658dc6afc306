use super::view_model::{CheckoutSuccessViewModel, ConfirmationPhase};
use crate::components::layout::LoadingSpinner;
use leptos::*;

const PRIMARY_LINK: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover";
const SECONDARY_LINK: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border hover:bg-surface-elevated";

#[component]
pub fn CheckoutSuccessPanel() -> impl IntoView {
    let vm = CheckoutSuccessViewModel::new();
    view! { <CheckoutSuccessView vm=vm /> }
}

#[component]
pub(super) fn CheckoutSuccessView(vm: CheckoutSuccessViewModel) -> impl IntoView {
    let watch_href = vm.watch_href();

    view! {
        <div class="flex min-h-[60vh] items-center justify-center">
            <Show
                when=move || vm.phase.get() == ConfirmationPhase::Confirmed
                fallback=|| view! {
                    <div class="text-center">
                        <LoadingSpinner />
                        <p class="text-fg-muted">"Confirming your purchase..."</p>
                    </div>
                }
            >
                <div class="text-center">
                    <h1 class="mt-4 text-2xl font-bold text-fg">"Payment Successful!"</h1>
                    <p class="mt-2 text-fg-muted">
                        "Your purchase has been confirmed. You can now watch the video."
                    </p>
                    <div class="mt-6 flex justify-center gap-3">
                        {watch_href.clone().map(|href| view! { <a href=href class=PRIMARY_LINK>"Watch Now"</a> })}
                        <a href="/purchases" class=PRIMARY_LINK>"View Purchases"</a>
                        <a href="/" class=SECONDARY_LINK>"Browse More"</a>
                    </div>
                </div>
            </Show>
        </div>
    }
}
