use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Zero-based, as the backend counts pages.
    pub page: u32,
    pub total_pages: u32,
}

impl PageWindow {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn is_needed(&self) -> bool {
        self.total_pages > 1
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let window = move || PageWindow {
        page: page.get(),
        total_pages: total_pages.get(),
    };
    let button_class = "inline-flex items-center rounded-md px-3 py-1.5 text-sm font-medium border border-border text-fg hover:bg-surface-muted disabled:opacity-50 disabled:cursor-not-allowed";

    view! {
        <Show when=move || window().is_needed()>
            <nav class="flex items-center justify-between gap-4 mt-6" aria-label="Pagination">
                <button
                    type="button"
                    class=button_class
                    disabled=move || !window().has_previous()
                    on:click=move |_| on_change.call(page.get_untracked().saturating_sub(1))
                >
                    "Previous"
                </button>
                <span class="text-sm text-fg-muted">{move || window().label()}</span>
                <button
                    type="button"
                    class=button_class
                    disabled=move || !window().has_next()
                    on:click=move |_| on_change.call(page.get_untracked() + 1)
                >
                    "Next"
                </button>
            </nav>
        </Show>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_position_label() {
        let html = render_to_string(|| {
            view! {
                <Pagination
                    page=Signal::derive(|| 1)
                    total_pages=Signal::derive(|| 4)
                    on_change=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Page 2 of 4"));
        assert!(html.contains("Previous"));
    }
}
