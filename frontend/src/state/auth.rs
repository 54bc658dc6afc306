use crate::api::{ApiClient, ApiError, AuthUser, LoginRequest, RegisterRequest, Session};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Reactive mirror of the client's session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn from_session(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            is_authenticated: session.is_authenticated(),
        }
    }

    pub fn can_create(&self) -> bool {
        self.is_authenticated
            && self
                .user
                .as_ref()
                .map(|user| user.role.can_create())
                .unwrap_or(false)
    }
}

fn create_auth_context(api: &ApiClient) -> AuthContext {
    let (auth_state, set_auth_state) =
        create_signal(AuthState::from_session(&api.session().snapshot()));

    // Forced logouts happen inside the request pipeline, far from any
    // component, so the signal follows the store rather than the actions.
    let session = api.session().clone();
    let observer = session.subscribe(move |session| {
        set_auth_state.set(AuthState::from_session(session));
    });
    on_cleanup(move || session.unsubscribe(observer));

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let ctx = create_auth_context(&api);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(api: &ApiClient, request: LoginRequest) -> Result<(), ApiError> {
    api.login(&request).await
}

pub async fn register_request(api: &ApiClient, request: RegisterRequest) -> Result<(), ApiError> {
    api.register(&request).await
}

pub fn logout(api: &ApiClient) {
    api.logout();
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    create_action(move |request: &LoginRequest| {
        let api = api.clone();
        let payload = request.clone();
        async move { login_request(&api, payload).await }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<(), ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    create_action(move |request: &RegisterRequest| {
        let api = api.clone();
        let payload = request.clone();
        async move { register_request(&api, payload).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    Callback::new(move |_| logout(&api))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthResponse, UserRole};
    use crate::utils::jwt::encode_test_token;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[test]
    fn auth_state_follows_session_changes() {
        with_runtime(|| {
            let api = ApiClient::new_with_base_url("http://localhost/api");
            let (state, _) = create_auth_context(&api);
            assert!(!state.get_untracked().is_authenticated);

            api.session().store(AuthResponse {
                access_token: encode_test_token("u-1", "ada@example.com", "CREATOR"),
                refresh_token: "r".into(),
            });
            let snapshot = state.get_untracked();
            assert!(snapshot.is_authenticated);
            assert!(snapshot.can_create());

            logout(&api);
            assert_eq!(state.get_untracked(), AuthState::default());
        });
    }

    #[test]
    fn viewers_cannot_create() {
        let state = AuthState {
            user: Some(AuthUser {
                id: "u".into(),
                email: "v@example.com".into(),
                role: UserRole::Viewer,
            }),
            is_authenticated: true,
        };
        assert!(!state.can_create());
        assert!(!AuthState::default().can_create());
    }
}
