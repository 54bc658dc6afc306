use crate::api::{ApiError, RegisterRequest};
use crate::pages::login::utils::{
    register_failure_message, validate_registration, CredentialsFormState,
};
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: CredentialsFormState,
    pub error: RwSignal<Option<String>>,
    pub register_action: Action<RegisterRequest, Result<(), ApiError>>,
}

pub(super) fn apply_register_result(
    result: Option<Result<(), ApiError>>,
    form: CredentialsFormState,
    error: RwSignal<Option<String>>,
) {
    match result {
        Some(Ok(())) => {
            error.set(None);
            form.clear_passwords();
        }
        Some(Err(err)) => {
            log::warn!("Registration failed: {}", err);
            error.set(Some(register_failure_message(&err)));
        }
        None => {}
    }
}

impl RegisterViewModel {
    pub fn new() -> Self {
        let form = CredentialsFormState::default();
        let error = create_rw_signal(None::<String>);
        let register_action = auth::use_register_action();

        create_effect(move |_| {
            apply_register_result(register_action.value().get(), form, error)
        });

        Self {
            form,
            error,
            register_action,
        }
    }

    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        let result = validate_registration(
            &self.form.email.get_untracked(),
            &self.form.password.get_untracked(),
            &self.form.confirm_password.get_untracked(),
        );
        match result {
            Ok(request) => {
                self.form.errors.set(Default::default());
                self.error.set(None);
                self.register_action.dispatch(request);
            }
            Err(errors) => self.form.errors.set(errors),
        }
    }
}

impl Default for RegisterViewModel {
    fn default() -> Self {
        Self::new()
    }
}
