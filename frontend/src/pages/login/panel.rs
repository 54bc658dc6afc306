use super::view_model::use_login_view_model;
use crate::components::{common::Button, forms::TextField, layout::ErrorMessage};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="flex min-h-[60vh] items-center justify-center">
            <div class="w-full max-w-sm space-y-6">
                <div class="text-center">
                    <h1 class="text-2xl font-bold text-fg">"Welcome back"</h1>
                    <p class="mt-1 text-sm text-fg-muted">"Sign in to your account"</p>
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
                        autocomplete="current-password"
                        error=vm.form.password_error()
                        disabled=pending
                    />
                    <Button class="w-full" loading=pending submit=true>
                        "Sign in"
                    </Button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    "Don't have an account? "
                    <a href="/register" class="font-medium text-action-primary-bg hover:underline">"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
