use super::view_model::CatalogViewModel;
use crate::components::{
    cards::VideoCard,
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
    pagination::Pagination,
};
use leptos::*;

#[component]
pub fn CatalogPanel() -> impl IntoView {
    let vm = CatalogViewModel::new();
    let on_page_change = Callback::new(move |page: u32| vm.on_page_change(page));
    let page = Signal::derive(move || vm.query.with(|query| query.page));

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="mb-4 text-2xl font-bold text-fg">"Explore Videos"</h1>
                <div class="max-w-md">
                    <label for="catalog-search" class="sr-only">"Search videos"</label>
                    <input
                        id="catalog-search"
                        type="search"
                        placeholder="Search videos..."
                        class="w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm text-fg"
                        prop:value=move || vm.search_input.get()
                        on:input=move |ev| vm.on_search_input(event_target_value(&ev))
                    />
                </div>
            </div>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || {
                    vm.videos
                        .get()
                        .map(|result| match result {
                            Err(_) => view! { <ErrorMessage message="Failed to load videos" /> }.into_view(),
                            Ok(page) if page.content.is_empty() => {
                                let message = vm.query.with_untracked(|query| query.empty_message());
                                view! { <EmptyState title=message /> }.into_view()
                            }
                            Ok(page) => view! {
                                <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                                    {page
                                        .content
                                        .into_iter()
                                        .map(|video| view! { <VideoCard video=video /> })
                                        .collect_view()}
                                </div>
                            }
                            .into_view(),
                        })
                }}
            </Suspense>
            <Pagination page=page total_pages=vm.total_pages() on_change=on_page_change />
        </div>
    }
}
