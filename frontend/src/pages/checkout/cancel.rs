use leptos::*;

#[component]
pub fn CheckoutCancelPanel() -> impl IntoView {
    view! {
        <div class="flex min-h-[60vh] items-center justify-center">
            <div class="text-center">
                <h1 class="mt-4 text-2xl font-bold text-fg">"Payment Cancelled"</h1>
                <p class="mt-2 text-fg-muted">"Your payment was cancelled. No charges were made."</p>
                <div class="mt-6">
                    <a
                        href="/"
                        class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                    >
                        "Back to Browse"
                    </a>
                </div>
            </div>
        </div>
    }
}
