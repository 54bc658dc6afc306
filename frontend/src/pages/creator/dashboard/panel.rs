use super::view_model::{DashboardViewModel, RefreshState};
use crate::api::CreatorStatsResponse;
use crate::components::{
    cards::StatCard,
    confirm_dialog::ConfirmDialog,
    empty_state::EmptyState,
    layout::{ErrorMessage, LoadingSpinner},
    pagination::Pagination,
};
use crate::pages::creator::{components::video_table::CreatorVideoTable, utils::UPLOAD_PATH};
use crate::utils::format::format_price;
use leptos::*;

fn delete_message(title: Option<String>) -> String {
    match title {
        Some(title) => format!(
            "\"{}\" will be removed for everyone, including buyers. This cannot be undone.",
            title
        ),
        None => String::new(),
    }
}

#[component]
pub fn DashboardPanel() -> impl IntoView {
    let vm = DashboardViewModel::new();
    let on_page_change = Callback::new(move |page: u32| vm.page.set(page));
    let on_delete = Callback::new(move |video| vm.request_delete(video));
    let dialog_open = Signal::derive(move || vm.delete_target.with(Option::is_some));
    let dialog_message = Signal::derive(move || {
        delete_message(
            vm.delete_target
                .with(|target| target.as_ref().map(|video| video.title.clone())),
        )
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-fg">"Creator Dashboard"</h1>
                <a
                    href=UPLOAD_PATH
                    class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    "Upload Video"
                </a>
            </div>
            <Transition fallback=move || view! { <LoadingSpinner /> }>
                {move || {
                    vm.data
                        .get()
                        .map(|result| match result {
                            Err(_) => view! { <ErrorMessage message="Failed to load dashboard" /> }.into_view(),
                            Ok(data) => {
                                let listing = if data.videos.content.is_empty() {
                                    view! {
                                        <EmptyState
                                            title="You haven't uploaded any videos yet."
                                            action=("Upload your first video", UPLOAD_PATH)
                                        />
                                    }
                                    .into_view()
                                } else {
                                    view! { <CreatorVideoTable videos=data.videos.content on_delete=on_delete /> }
                                        .into_view()
                                };
                                view! {
                                    <StatsRow stats=data.stats />
                                    {listing}
                                }
                                .into_view()
                            }
                        })
                }}
            </Transition>
            <Show when=move || vm.refresh.get() == RefreshState::Running>
                <p class="text-xs text-fg-muted">"Some videos are still processing. This page refreshes automatically."</p>
            </Show>
            <Pagination page=vm.page total_pages=vm.total_pages() on_change=on_page_change />
            <ConfirmDialog
                is_open=dialog_open
                title="Delete video?"
                message=dialog_message
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
                confirm_label="Delete"
                confirm_disabled=vm.delete_action.pending()
                destructive=true
            />
        </div>
    }
}

#[component]
fn StatsRow(stats: CreatorStatsResponse) -> impl IntoView {
    let videos = stats.total_videos.to_string();
    let purchases = stats.total_purchases.to_string();
    let earnings = format_price(stats.total_earnings_cents);

    view! {
        <dl class="grid grid-cols-1 gap-4 sm:grid-cols-3">
            <StatCard label="Total Videos" value=Signal::derive(move || videos.clone()) />
            <StatCard label="Total Sales" value=Signal::derive(move || purchases.clone()) />
            <StatCard label="Total Earnings" value=Signal::derive(move || earnings.clone()) />
        </dl>
    }
}
