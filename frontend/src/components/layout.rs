use crate::{
    components::toast::Toaster,
    state::auth::{use_auth, use_logout},
    utils::nav,
};
use leptos::*;

const NAV_LINK: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";
const MOBILE_NAV_LINK: &str =
    "block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NavLink {
    href: &'static str,
    label: &'static str,
}

const GUEST_LINKS: &[NavLink] = &[
    NavLink {
        href: "/login",
        label: "Log in",
    },
    NavLink {
        href: "/register",
        label: "Sign up",
    },
];
const MEMBER_LINKS: &[NavLink] = &[NavLink {
    href: "/purchases",
    label: "My purchases",
}];
const CREATOR_LINKS: &[NavLink] = &[
    NavLink {
        href: "/creator/dashboard",
        label: "Dashboard",
    },
    NavLink {
        href: "/creator/upload",
        label: "Upload",
    },
];

fn nav_links(is_authenticated: bool, can_create: bool) -> Vec<NavLink> {
    if !is_authenticated {
        return GUEST_LINKS.to_vec();
    }
    let mut links = MEMBER_LINKS.to_vec();
    if can_create {
        links.extend_from_slice(CREATOR_LINKS);
    }
    links
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let (menu_open, set_menu_open) = create_signal(false);
    let links = create_memo(move |_| {
        auth.with(|state| nav_links(state.is_authenticated, state.can_create()))
    });
    let is_authenticated = move || auth.with(|state| state.is_authenticated);
    let email = move || {
        auth.with(|state| state.user.as_ref().map(|user| user.email.clone()))
            .unwrap_or_default()
    };
    let logout = use_logout();
    let on_logout = move |_| {
        set_menu_open.set(false);
        logout.call(());
        nav::navigate_to(nav::HOME_PATH);
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">"LearnStream"</a>
                    <div class="flex items-center">
                        <nav class="hidden md:flex items-center space-x-2">
                            <a href="/" class=NAV_LINK>"Catalog"</a>
                            <For
                                each=move || links.get()
                                key=|link| link.href
                                children=move |link| view! { <a href=link.href class=NAV_LINK>{link.label}</a> }
                            />
                            <Show when=is_authenticated>
                                <span class="text-sm text-fg-muted px-2">{email}</span>
                                <button on:click=on_logout class=NAV_LINK>"Log out"</button>
                            </Show>
                        </nav>
                        <button
                            type="button"
                            class="md:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                            </span>
                            <svg
                                class="h-6 w-6"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="none"
                                viewBox="0 0 24 24"
                                stroke="currentColor"
                            >
                                <path
                                    stroke-linecap="round"
                                    stroke-linejoin="round"
                                    stroke-width="2"
                                    d="M4 6h16M4 12h16M4 18h16"
                                />
                            </svg>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="md:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            <a href="/" class=MOBILE_NAV_LINK on:click=move |_| set_menu_open.set(false)>
                                "Catalog"
                            </a>
                            <For
                                each=move || links.get()
                                key=|link| link.href
                                children=move |link| {
                                    view! {
                                        <a
                                            href=link.href
                                            class=MOBILE_NAV_LINK
                                            on:click=move |_| set_menu_open.set(false)
                                        >
                                            {link.label}
                                        </a>
                                    }
                                }
                            />
                            <Show when=is_authenticated>
                                <button
                                    on:click=on_logout
                                    class="w-full text-left text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                >
                                    "Log out"
                                </button>
                            </Show>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
            <Toaster/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div
            class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4"
            role="alert"
        >
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{creator_user, provide_auth, viewer_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_creator_links_for_creators() {
        let html = render_to_string(move || {
            provide_auth(Some(creator_user()));
            view! { <Header /> }
        });
        assert!(html.contains("/creator/upload"));
        assert!(html.contains("creator@example.com"));
        assert!(html.contains("Log out"));
    }

    #[test]
    fn header_hides_creator_links_for_viewers() {
        let html = render_to_string(move || {
            provide_auth(Some(viewer_user()));
            view! { <Header /> }
        });
        assert!(html.contains("My purchases"));
        assert!(!html.contains("/creator/upload"));
    }

    #[test]
    fn header_offers_login_to_guests() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <Header /> }
        });
        assert!(html.contains("Log in"));
        assert!(html.contains("Sign up"));
        assert!(!html.contains("Log out"));
    }

    #[test]
    fn layout_renders_children_and_feedback_components() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! {
                <Layout>
                    <LoadingSpinner />
                    <ErrorMessage message="broken" />
                    <SuccessMessage message="saved" />
                    <div>"child"</div>
                </Layout>
            }
        });
        assert!(html.contains("child"));
        assert!(html.contains("broken"));
        assert!(html.contains("saved"));
        assert!(html.contains("animate-spin"));
    }
}
