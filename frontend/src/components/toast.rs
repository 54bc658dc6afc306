use crate::state::toast::use_toasts;
use leptos::*;

/// Stack of transient notifications, newest last.
#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_toasts();
    let toasts = store.toasts();

    view! {
        <div
            class="fixed bottom-4 right-4 z-[80] flex flex-col gap-2 w-full max-w-sm"
            aria-live="polite"
        >
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!(
                                "flex items-start justify-between gap-3 border px-4 py-3 rounded shadow-md {}",
                                toast.kind.classes(),
                            )
                            role="status"
                        >
                            <p class="text-sm">{toast.message}</p>
                            <button
                                type="button"
                                aria-label="Dismiss"
                                class="text-sm opacity-70 hover:opacity-100"
                                on:click=move |_| store.dismiss(id)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::toast::provide_toasts;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_pending_toasts() {
        let html = render_to_string(|| {
            let store = provide_toasts();
            store.success("Video saved");
            store.error("Upload failed");
            view! { <Toaster /> }
        });
        assert!(html.contains("Video saved"));
        assert!(html.contains("Upload failed"));
        assert!(html.contains("bg-status-error-bg"));
    }
}
