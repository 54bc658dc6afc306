use super::utils::{login_failure_message, validate_login, CredentialsFormState};
use crate::api::{ApiError, LoginRequest};
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: CredentialsFormState,
    pub error: RwSignal<Option<String>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

/// The route guard moves a signed-in user on, so success only tidies up.
pub(super) fn apply_login_result(
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
            log::warn!("Sign in failed: {}", err);
            error.set(Some(login_failure_message(&err)));
        }
        None => {}
    }
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let email = self.form.email.get_untracked();
        let password = self.form.password.get_untracked();
        match validate_login(&email, &password) {
            Ok(request) => {
                self.form.errors.set(Default::default());
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(errors) => self.form.errors.set(errors),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = CredentialsFormState::default();
    let error = create_rw_signal(None::<String>);
    let login_action = auth::use_login_action();

    create_effect(move |_| apply_login_result(login_action.value().get(), form, error));

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::ApiClient;
    use crate::test_support::ssr::{wait_until, with_local_runtime_async, with_runtime};
    use crate::utils::jwt::encode_test_token;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get_untracked().is_none());
            assert!(vm.form.email.get_untracked().is_empty());
        });
    }

    #[test]
    fn invalid_form_never_dispatches() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.form.email.set("not-an-email".into());
            vm.submit();
            assert!(vm.form.errors.get_untracked().email.is_some());
            assert!(vm.form.errors.get_untracked().password.is_some());
            assert_eq!(vm.login_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn failed_login_shows_message_and_success_clears_password() {
        with_runtime(|| {
            let form = CredentialsFormState::default();
            let error = create_rw_signal(None);
            apply_login_result(
                Some(Err(ApiError::unauthorized("Bad credentials"))),
                form,
                error,
            );
            assert_eq!(error.get_untracked().as_deref(), Some("Invalid email or password"));

            form.password.set("secret".into());
            apply_login_result(Some(Ok(())), form, error);
            assert!(error.get_untracked().is_none());
            assert!(form.password.get_untracked().is_empty());
        });
    }

    #[test]
    fn submit_signs_in_through_api() {
        with_local_runtime_async(|| async {
            let server = MockServer::start();
            let access = encode_test_token("u-1", "ada@example.com", "VIEWER");
            server.mock(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(200).json_body(serde_json::json!({
                    "accessToken": access,
                    "refreshToken": "refresh-1"
                }));
            });
            let api = ApiClient::new_with_base_url(server.url("/api"));
            provide_context(api.clone());

            let vm = use_login_view_model();
            vm.form.email.set("ada@example.com".into());
            vm.form.password.set("secret-pass".into());
            vm.submit();

            assert!(
                wait_until(|| vm.login_action.value().get().is_some()).await,
                "login should complete"
            );
            assert!(matches!(vm.login_action.value().get(), Some(Ok(()))));
            assert!(api.is_authenticated());
        });
    }
}
