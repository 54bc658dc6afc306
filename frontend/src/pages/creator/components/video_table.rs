use crate::api::VideoResponse;
use crate::components::status_badge::VideoStatusBadge;
use crate::pages::creator::utils::edit_path;
use crate::utils::format::{format_date, format_price};
use leptos::*;

const HEADER_CELL: &str = "px-4 py-3 text-left font-medium text-fg-muted";

#[component]
pub fn CreatorVideoTable(
    videos: Vec<VideoResponse>,
    on_delete: Callback<VideoResponse>,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto rounded-lg border border-border bg-surface-elevated">
            <table class="w-full text-sm">
                <thead class="border-b border-border bg-surface-muted">
                    <tr>
                        <th class=HEADER_CELL>"Title"</th>
                        <th class=HEADER_CELL>"Status"</th>
                        <th class=HEADER_CELL>"Price"</th>
                        <th class=HEADER_CELL>"Created"</th>
                        <th class="px-4 py-3 text-right font-medium text-fg-muted">"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {videos
                        .into_iter()
                        .map(|video| {
                            let edit_href = edit_path(video.id);
                            let detail_href = format!("/videos/{}", video.id);
                            let price = format_price(video.price_cents);
                            let created = format_date(&video.created_at);
                            let status = video.status;
                            let title = video.title.clone();
                            view! {
                                <tr class="hover:bg-surface-muted">
                                    <td class="px-4 py-3">
                                        <a href=detail_href class="font-medium text-fg hover:underline">
                                            {title}
                                        </a>
                                    </td>
                                    <td class="px-4 py-3"><VideoStatusBadge status=status /></td>
                                    <td class="px-4 py-3 text-fg">{price}</td>
                                    <td class="px-4 py-3 text-fg-muted">{created}</td>
                                    <td class="px-4 py-3 text-right space-x-3">
                                        <a
                                            href=edit_href
                                            class="text-action-primary-bg hover:underline font-medium"
                                        >
                                            "Edit"
                                        </a>
                                        <button
                                            type="button"
                                            class="text-status-error-text hover:underline font-medium"
                                            on:click=move |_| on_delete.call(video.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
