use crate::components::empty_state::EmptyState;
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Page not found" />
        <div class="max-w-xl mx-auto space-y-4">
            <h1 class="text-2xl font-bold text-fg text-center">"404"</h1>
            <EmptyState
                title="Page not found"
                description="The page you are looking for doesn't exist or has moved."
                action=("Back to catalog", "/")
            />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn links_back_to_catalog() {
        let html = render_to_string(|| view! { <NotFoundPage /> });
        assert!(html.contains("Page not found"));
        assert!(html.contains("href=\"/\""));
    }
}
