use crate::api::{ApiError, LoginRequest, RegisterRequest};
use leptos::*;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Per-field messages shown under the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.confirm_password.is_none()
    }
}

/// Form inputs shared by sign-in and sign-up.
#[derive(Clone, Copy)]
pub struct CredentialsFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
}

impl Default for CredentialsFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            confirm_password: create_rw_signal(String::new()),
            errors: create_rw_signal(FieldErrors::default()),
        }
    }
}

impl CredentialsFormState {
    pub fn email_error(&self) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.email.clone()))
    }

    pub fn password_error(&self) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.password.clone()))
    }

    pub fn confirm_password_error(&self) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.confirm_password.clone()))
    }

    pub fn clear_passwords(&self) {
        self.password.set(String::new());
        self.confirm_password.set(String::new());
    }
}

/// Deliberately loose: something before and after a single `@`, a dot in
/// the domain, no whitespace. The backend has the final say.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
                    .unwrap_or(false)
        }
        None => false,
    }
}

fn email_error(email: &str) -> Option<String> {
    (!is_valid_email(email)).then(|| "Invalid email address".to_string())
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, FieldErrors> {
    let errors = FieldErrors {
        email: email_error(email),
        password: password
            .is_empty()
            .then(|| "Password is required".to_string()),
        confirm_password: None,
    };
    if errors.is_empty() {
        Ok(LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    } else {
        Err(errors)
    }
}

pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterRequest, FieldErrors> {
    let errors = FieldErrors {
        email: email_error(email),
        password: (password.chars().count() < MIN_PASSWORD_LEN)
            .then(|| format!("Password must be at least {} characters", MIN_PASSWORD_LEN)),
        confirm_password: (password != confirm_password)
            .then(|| "Passwords do not match".to_string()),
    };
    if errors.is_empty() {
        Ok(RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    } else {
        Err(errors)
    }
}

pub fn login_failure_message(error: &ApiError) -> String {
    if error.is_unauthorized() || error.code == "UNAUTHORIZED" {
        "Invalid email or password".to_string()
    } else {
        "Something went wrong. Please try again.".to_string()
    }
}

pub fn register_failure_message(error: &ApiError) -> String {
    if error.code == "CONFLICT" {
        "An account with this email already exists".to_string()
    } else if error.code == "VALIDATION_ERROR" {
        error.error.clone()
    } else {
        "Something went wrong. Please try again.".to_string()
    }
}
