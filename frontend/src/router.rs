use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use uuid::Uuid;

use crate::{
    api::ApiClient,
    components::{
        guard::{GuestOnly, RequireAuth, RequireCreator},
        layout::Layout,
    },
    pages::{
        catalog::CatalogPage,
        checkout::{CheckoutCancelPage, CheckoutSuccessPage},
        creator::{CreatorDashboardPage, EditVideoPage, UploadVideoPage},
        login::LoginPage,
        not_found::NotFoundPage,
        purchases::PurchasesPage,
        register::RegisterPage,
        video_detail::VideoDetailPage,
        watch::WatchPage,
    },
    state::{auth::AuthProvider, toast::provide_toasts},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/videos/:id",
    "/videos/:id/watch",
    "/login",
    "/register",
    "/purchases",
    "/checkout/success",
    "/checkout/cancel",
    "/creator/dashboard",
    "/creator/upload",
    "/creator/videos/:id/edit",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/videos/:id/watch",
    "/purchases",
    "/checkout/success",
    "/checkout/cancel",
];

pub const CREATOR_ROUTE_PATHS: &[&str] = &[
    "/creator/dashboard",
    "/creator/upload",
    "/creator/videos/:id/edit",
];

pub const GUEST_ROUTE_PATHS: &[&str] = &["/login", "/register"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/videos/:id"];

/// Route ids that are not UUIDs can never exist.
pub fn parse_video_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|id| Uuid::parse_str(id.trim()).ok())
}

pub fn page_title(page: String) -> String {
    if page.is_empty() {
        "LearnStream".to_string()
    } else {
        format!("{} | LearnStream", page)
    }
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_toasts();
    provide_meta_context();
    view! {
        <Title formatter=page_title />
        <AuthProvider>
            <Router>
                <Layout>
                    <Routes>
                        <Route path="/" view=CatalogPage/>
                        <Route path="/videos/:id" view=VideoDetailRoute/>
                        <Route path="/videos/:id/watch" view=ProtectedWatch/>
                        <Route path="/login" view=GuestLogin/>
                        <Route path="/register" view=GuestRegister/>
                        <Route path="/purchases" view=ProtectedPurchases/>
                        <Route path="/checkout/success" view=ProtectedCheckoutSuccess/>
                        <Route path="/checkout/cancel" view=ProtectedCheckoutCancel/>
                        <Route path="/creator/dashboard" view=CreatorDashboard/>
                        <Route path="/creator/upload" view=CreatorUpload/>
                        <Route path="/creator/videos/:id/edit" view=CreatorEdit/>
                        <Route path="/*any" view=NotFoundPage/>
                    </Routes>
                </Layout>
            </Router>
        </AuthProvider>
    }
}

/// Renders `page` for the `:id` of the current route, or the not found
/// page when it is missing or malformed.
fn with_route_id<V: IntoView>(page: impl Fn(Uuid) -> V + 'static) -> impl IntoView {
    let params = use_params_map();
    move || match parse_video_id(params.with(|params| params.get("id").cloned()).as_deref()) {
        Some(id) => page(id).into_view(),
        None => view! { <NotFoundPage/> }.into_view(),
    }
}

#[component]
fn VideoDetailRoute() -> impl IntoView {
    with_route_id(|id| view! { <VideoDetailPage id=id/> })
}

#[component]
fn ProtectedWatch() -> impl IntoView {
    view! { <RequireAuth>{with_route_id(|id| view! { <WatchPage id=id/> })}</RequireAuth> }
}

#[component]
fn GuestLogin() -> impl IntoView {
    view! { <GuestOnly><LoginPage/></GuestOnly> }
}

#[component]
fn GuestRegister() -> impl IntoView {
    view! { <GuestOnly><RegisterPage/></GuestOnly> }
}

#[component]
fn ProtectedPurchases() -> impl IntoView {
    view! { <RequireAuth><PurchasesPage/></RequireAuth> }
}

#[component]
fn ProtectedCheckoutSuccess() -> impl IntoView {
    view! { <RequireAuth><CheckoutSuccessPage/></RequireAuth> }
}

#[component]
fn ProtectedCheckoutCancel() -> impl IntoView {
    view! { <RequireAuth><CheckoutCancelPage/></RequireAuth> }
}

#[component]
fn CreatorDashboard() -> impl IntoView {
    view! { <RequireCreator><CreatorDashboardPage/></RequireCreator> }
}

#[component]
fn CreatorUpload() -> impl IntoView {
    view! { <RequireCreator><UploadVideoPage/></RequireCreator> }
}

#[component]
fn CreatorEdit() -> impl IntoView {
    view! {
        <RequireCreator>
            {with_route_id(|id| view! { <EditVideoPage id=id/> })}
        </RequireCreator>
    }
}
