use super::view_model::PurchasesViewModel;
use crate::api::PurchaseResponse;
use crate::components::{
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
    pagination::Pagination,
    status_badge::PurchaseStatusBadge,
};
use crate::utils::format::{format_date, format_price};
use leptos::*;

const HEADER_CELL: &str = "px-4 py-3 text-left font-medium text-fg-muted";

#[component]
pub fn PurchasesPanel() -> impl IntoView {
    let vm = PurchasesViewModel::new();
    let on_page_change = Callback::new(move |page: u32| vm.page.set(page));

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-fg">"My Purchases"</h1>
            <Transition fallback=move || view! { <LoadingSpinner /> }>
                {move || {
                    vm.purchases
                        .get()
                        .map(|result| match result {
                            Err(_) => view! { <ErrorMessage message="Failed to load purchases" /> }.into_view(),
                            Ok(page) if page.content.is_empty() => view! {
                                <EmptyState
                                    title="You haven't purchased any videos yet."
                                    action=("Browse videos", "/")
                                />
                            }
                            .into_view(),
                            Ok(page) => view! { <PurchaseTable purchases=page.content /> }.into_view(),
                        })
                }}
            </Transition>
            <Pagination page=vm.page total_pages=vm.total_pages() on_change=on_page_change />
        </div>
    }
}

#[component]
fn PurchaseTable(purchases: Vec<PurchaseResponse>) -> impl IntoView {
    view! {
        <div class="overflow-hidden rounded-lg border border-border bg-surface-elevated">
            <table class="w-full text-sm">
                <thead class="border-b border-border bg-surface-muted">
                    <tr>
                        <th class=HEADER_CELL>"Video"</th>
                        <th class=HEADER_CELL>"Amount"</th>
                        <th class=HEADER_CELL>"Status"</th>
                        <th class=HEADER_CELL>"Date"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {purchases
                        .into_iter()
                        .map(|purchase| view! {
                            <tr class="hover:bg-surface-muted">
                                <td class="px-4 py-3">
                                    <a
                                        href=format!("/videos/{}", purchase.video_id)
                                        class="font-medium text-action-primary-bg hover:underline"
                                    >
                                        "View Video"
                                    </a>
                                </td>
                                <td class="px-4 py-3 text-fg">{format_price(purchase.amount_cents)}</td>
                                <td class="px-4 py-3"><PurchaseStatusBadge status=purchase.status /></td>
                                <td class="px-4 py-3 text-fg-muted">{format_date(&purchase.created_at)}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
