use crate::{
    state::auth::{use_auth, AuthState},
    utils::nav,
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Granted,
    Login,
    Home,
    /// Back to where the login page was opened from.
    ReturnTo,
}

fn auth_access(state: &AuthState) -> Access {
    if state.is_authenticated {
        Access::Granted
    } else {
        Access::Login
    }
}

fn creator_access(state: &AuthState) -> Access {
    if !state.is_authenticated {
        Access::Login
    } else if state.can_create() {
        Access::Granted
    } else {
        Access::Home
    }
}

fn guest_access(state: &AuthState) -> Access {
    if state.is_authenticated {
        Access::ReturnTo
    } else {
        Access::Granted
    }
}

fn redirect_for(access: Access) {
    match access {
        Access::Granted => {}
        Access::Login => nav::navigate_to(&nav::login_redirect(nav::current_path().as_deref())),
        Access::Home => nav::navigate_to(nav::HOME_PATH),
        Access::ReturnTo => {
            nav::navigate_to(&nav::safe_return_path(nav::query_param("from").as_deref()))
        }
    }
}

fn guarded(rule: fn(&AuthState) -> Access, children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let access = create_memo(move |_| auth.with(rule));
    create_effect(move |_| redirect_for(access.get()));
    view! {
        <Show when=move || access.get() == Access::Granted fallback=|| ()>
            {children()}
        </Show>
    }
}

/// Signed-in users only; others go to the login page with a return path.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    guarded(auth_access, children)
}

/// Creators and admins only. Viewers land on the catalog.
#[component]
pub fn RequireCreator(children: ChildrenFn) -> impl IntoView {
    guarded(creator_access, children)
}

/// Login and registration are pointless once signed in. A successful sign
/// in lands here too, which is what carries the user on to `?from=`.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    guarded(guest_access, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{creator_user, viewer_user};

    fn signed_in(user: crate::api::AuthUser) -> AuthState {
        AuthState {
            user: Some(user),
            is_authenticated: true,
        }
    }

    #[test]
    fn auth_guard_requires_session() {
        assert_eq!(auth_access(&AuthState::default()), Access::Login);
        assert_eq!(auth_access(&signed_in(viewer_user())), Access::Granted);
    }

    #[test]
    fn creator_guard_sends_viewers_home() {
        assert_eq!(creator_access(&AuthState::default()), Access::Login);
        assert_eq!(creator_access(&signed_in(viewer_user())), Access::Home);
        assert_eq!(creator_access(&signed_in(creator_user())), Access::Granted);
    }

    #[test]
    fn guest_guard_sends_members_back() {
        assert_eq!(guest_access(&AuthState::default()), Access::Granted);
        assert_eq!(guest_access(&signed_in(viewer_user())), Access::ReturnTo);
    }
}
