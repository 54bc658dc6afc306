use super::view_model::{UploadStep, UploadViewModel};
use crate::api::UploadFile;
use crate::components::{
    common::{Button, ButtonVariant},
    forms::FieldError,
    layout::ErrorMessage,
};
use crate::config::{ACCEPTED_VIDEO_TYPES, MAX_UPLOAD_BYTES};
use crate::pages::creator::{components::video_form::VideoFormFields, utils::DASHBOARD_PATH};
use crate::utils::format::format_file_size;
use leptos::*;

fn file_summary(file: &UploadFile) -> String {
    format!("{} ({})", file.name, format_file_size(file.size))
}

fn progress_width(percent: u32) -> String {
    format!("width: {}%", percent.min(100))
}

#[component]
pub fn UploadPanel() -> impl IntoView {
    let vm = UploadViewModel::new();

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Upload Video"</h1>
                <p class="mt-1 text-sm text-fg-muted">
                    {move || match vm.step.get() {
                        UploadStep::Details => "Step 1 of 2: video details",
                        UploadStep::File => "Step 2 of 2: choose the video file",
                    }}
                </p>
            </div>
            {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
            {move || match vm.step.get() {
                UploadStep::Details => view! { <DetailsStep vm=vm /> }.into_view(),
                UploadStep::File => view! { <FileStep vm=vm /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn DetailsStep(vm: UploadViewModel) -> impl IntoView {
    let creating = vm.create_action.pending();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit_details();
    };

    view! {
        <form class="space-y-6 bg-surface-elevated shadow rounded-lg p-6" on:submit=on_submit>
            <VideoFormFields form=vm.form disabled=creating />
            <div class="flex justify-end gap-2">
                <a
                    href=DASHBOARD_PATH
                    class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                >
                    "Cancel"
                </a>
                <Button submit=true loading=creating>"Continue"</Button>
            </div>
        </form>
    }
}

#[component]
fn FileStep(vm: UploadViewModel) -> impl IntoView {
    let uploading = vm.uploading();
    let accept = ACCEPTED_VIDEO_TYPES.join(",");
    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(target_arch = "wasm32")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let picked = input
                .files()
                .and_then(|files| files.get(0))
                .map(UploadFile::from_file);
            vm.select_file(picked);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = ev;
    };
    let title = move || {
        vm.created
            .with(|created| created.as_ref().map(|video| video.title.clone()))
            .unwrap_or_default()
    };

    view! {
        <div class="space-y-6 bg-surface-elevated shadow rounded-lg p-6">
            <p class="text-sm text-fg">"Draft created: " <span class="font-semibold">{title}</span></p>
            <div>
                <label for="video-file" class="block text-sm font-medium text-fg">"Video file"</label>
                <input
                    id="video-file"
                    type="file"
                    accept=accept
                    class="mt-1 block w-full text-sm text-fg"
                    disabled=move || uploading.get()
                    on:change=on_file_change
                />
                <p class="mt-1 text-xs text-fg-muted">
                    {format!("MP4, MOV, WebM or AVI up to {}", format_file_size(MAX_UPLOAD_BYTES))}
                </p>
                <FieldError error=Signal::derive(move || vm.file_error.get()) />
                {move || vm.file.with(|file| file.as_ref().map(file_summary)).map(|summary| view! {
                    <p class="mt-2 text-sm text-fg">{summary}</p>
                })}
            </div>
            <Show when=move || { uploading.get() || vm.progress.get() > 0 }>
                <div class="space-y-1">
                    <div class="h-2 w-full rounded-full bg-surface-muted overflow-hidden">
                        <div
                            class="h-full bg-action-primary-bg transition-all"
                            style=move || progress_width(vm.progress.get())
                        ></div>
                    </div>
                    <p class="text-xs text-fg-muted">{move || format!("Uploading... {}%", vm.progress.get())}</p>
                </div>
            </Show>
            <div class="flex justify-end gap-2">
                <a
                    href=DASHBOARD_PATH
                    class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                >
                    "Finish later"
                </a>
                <Button
                    variant=ButtonVariant::Primary
                    loading=uploading
                    disabled=Signal::derive(move || vm.file.with(Option::is_none))
                    on:click=move |_| vm.start_upload()
                >
                    "Upload"
                </Button>
            </div>
        </div>
    }
}
