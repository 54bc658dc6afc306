use super::view_model::RegisterViewModel;
use crate::components::{common::Button, forms::TextField, layout::ErrorMessage};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = RegisterViewModel::new();
    let pending = vm.register_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="flex min-h-[60vh] items-center justify-center">
            <div class="w-full max-w-sm space-y-6">
                <div class="text-center">
                    <h1 class="text-2xl font-bold text-fg">"Create an account"</h1>
                    <p class="mt-1 text-sm text-fg-muted">"Start learning today"</p>
                </div>
                {move || vm.error.get().map(|message| view! { <ErrorMessage message=message /> })}
                <form class="space-y-4 rounded-lg border border-border bg-surface-elevated p-6" on:submit=on_submit>
                    <TextField
                        id="email"
                        label="Email"
                        value=vm.form.email
                        input_type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        error=vm.form.email_error()
                        disabled=pending
                    />
                    <TextField
                        id="password"
                        label="Password"
                        value=vm.form.password
                        input_type="password"
                        autocomplete="new-password"
                        placeholder="At least 8 characters"
                        error=vm.form.password_error()
                        disabled=pending
                    />
                    <TextField
                        id="confirm-password"
                        label="Confirm password"
                        value=vm.form.confirm_password
                        input_type="password"
                        autocomplete="new-password"
                        error=vm.form.confirm_password_error()
                        disabled=pending
                    />
                    <Button class="w-full" loading=pending submit=true>
                        "Create account"
                    </Button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    "Already have an account? "
                    <a href="/login" class="font-medium text-action-primary-bg hover:underline">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn register_panel_asks_for_confirmation() {
        let html = render_to_string(|| view! { <RegisterPanel /> });
        assert!(html.contains("confirm-password"));
        assert!(html.contains("Create account"));
        assert!(html.contains("/login"));
    }
}
