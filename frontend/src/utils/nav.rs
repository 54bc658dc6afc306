//! In-app navigation that keeps the in-memory session alive.
//!
//! A full page load would drop the tokens, so internal moves push a history
//! entry and let the router pick it up from `popstate`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::JsValue;

pub const LOGIN_PATH: &str = "/login";

/// Query value encoding that leaves unreserved characters readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');
pub const HOME_PATH: &str = "/";

fn window() -> Option<web_sys::Window> {
    #[cfg(target_arch = "wasm32")]
    return web_sys::window();
    #[cfg(not(target_arch = "wasm32"))]
    return None;
}

pub fn navigate_to(path: &str) {
    let Some(window) = window() else {
        return;
    };
    let pushed = window
        .history()
        .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)))
        .is_ok();
    if pushed {
        if let Ok(event) = web_sys::Event::new("popstate") {
            let _ = window.dispatch_event(&event);
        }
    } else {
        let _ = window.location().set_href(path);
    }
}

/// Rewrites the address bar without adding a history entry or routing.
pub fn replace_path(path: &str) {
    if let Some(window) = window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Leaves the app, e.g. for the hosted checkout page.
pub fn redirect_external(url: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_href(url);
    }
}

/// Path plus query of the current page, `None` outside a browser.
pub fn current_path() -> Option<String> {
    let location = window()?.location();
    let path = location.pathname().ok()?;
    let search = location.search().unwrap_or_default();
    Some(format!("{}{}", path, search))
}

pub fn query_param(name: &str) -> Option<String> {
    let search = window()?.location().search().ok()?;
    find_query_param(&search, name)
}

pub fn find_query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned()
        })
        .filter(|value| !value.is_empty())
}

pub fn login_redirect(from: Option<&str>) -> String {
    match from.filter(|path| is_internal_path(path) && !path.starts_with(LOGIN_PATH)) {
        Some(path) => format!(
            "{}?from={}",
            LOGIN_PATH,
            utf8_percent_encode(path, QUERY_VALUE)
        ),
        None => LOGIN_PATH.to_string(),
    }
}

/// Where to go after signing in. Anything that could leave the site
/// falls back to the catalog.
pub fn safe_return_path(from: Option<&str>) -> String {
    from.filter(|path| is_internal_path(path))
        .unwrap_or(HOME_PATH)
        .to_string()
}

fn is_internal_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
