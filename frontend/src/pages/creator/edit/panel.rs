use super::view_model::EditViewModel;
use crate::components::{
    common::{Button, ButtonVariant},
    layout::{ErrorMessage, LoadingSpinner},
    status_badge::VideoStatusBadge,
};
use crate::pages::creator::{components::video_form::VideoFormFields, utils::DASHBOARD_PATH};
use crate::utils::nav;
use leptos::*;
use uuid::Uuid;

#[component]
pub fn EditPanel(id: Uuid) -> impl IntoView {
    let vm = EditViewModel::new(id);
    let saving = vm.save_action.pending();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.save();
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <h1 class="text-2xl font-bold text-fg">"Edit Video"</h1>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || {
                    vm.video
                        .get()
                        .map(|result| match result {
                            Err(err) if err.code == "NOT_FOUND" => {
                                view! { <ErrorMessage message="Video not found" /> }.into_view()
                            }
                            Err(_) => view! { <ErrorMessage message="Failed to load video" /> }.into_view(),
                            Ok(video) => view! {
                                <form
                                    class="space-y-6 bg-surface-elevated shadow rounded-lg p-6"
                                    on:submit=on_submit
                                >
                                    <div class="flex items-center justify-between">
                                        <span class="text-sm text-fg-muted">"Status"</span>
                                        <VideoStatusBadge status=video.status />
                                    </div>
                                    {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
                                    <VideoFormFields form=vm.form disabled=saving />
                                    <div class="flex justify-end gap-2">
                                        <Button
                                            variant=ButtonVariant::Secondary
                                            on:click=move |_| nav::navigate_to(DASHBOARD_PATH)
                                        >
                                            "Cancel"
                                        </Button>
                                        <Button submit=true loading=saving>"Save changes"</Button>
                                    </div>
                                </form>
                            }
                            .into_view(),
                        })
                }}
            </Suspense>
        </div>
    }
}
