use crate::api::{PurchaseStatus, VideoStatus};
use leptos::*;

pub fn video_status_style(status: VideoStatus) -> (&'static str, &'static str) {
    match status {
        VideoStatus::Draft => ("Draft", "bg-surface-muted text-fg-muted"),
        VideoStatus::Uploading => ("Uploading", "bg-status-info-bg text-status-info-text"),
        VideoStatus::Processing => ("Processing", "bg-status-warning-bg text-status-warning-text"),
        VideoStatus::Ready => ("Ready", "bg-status-success-bg text-status-success-text"),
        VideoStatus::Failed => ("Failed", "bg-status-error-bg text-status-error-text"),
    }
}

pub fn purchase_status_style(status: PurchaseStatus) -> (&'static str, &'static str) {
    match status {
        PurchaseStatus::Pending => ("Pending", "bg-status-warning-bg text-status-warning-text"),
        PurchaseStatus::Completed => ("Completed", "bg-status-success-bg text-status-success-text"),
        PurchaseStatus::Failed => ("Failed", "bg-status-error-bg text-status-error-text"),
        PurchaseStatus::Refunded => ("Refunded", "bg-surface-muted text-fg-muted"),
    }
}

fn badge((label, classes): (&'static str, &'static str), status: &'static str) -> impl IntoView {
    view! {
        <span
            class=format!("inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-medium {}", classes)
            data-status=status
        >
            {label}
        </span>
    }
}

#[component]
pub fn VideoStatusBadge(status: VideoStatus) -> impl IntoView {
    badge(video_status_style(status), status.as_str())
}

#[component]
pub fn PurchaseStatusBadge(status: PurchaseStatus) -> impl IntoView {
    badge(purchase_status_style(status), status.as_str())
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn badge_carries_wire_status() {
        let html = render_to_string(|| view! { <VideoStatusBadge status=VideoStatus::Ready /> });
        assert!(html.contains("data-status=\"READY\""));
        assert!(html.contains("Ready"));
    }
}
