use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

/// Default page size for catalog, purchases and creator listings.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

pub const PURCHASE_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const PURCHASE_POLL_MAX_ATTEMPTS: u32 = 10;
pub const PROCESSING_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const PROCESSING_POLL_MAX_ATTEMPTS: u32 = 60;

/// Upload size ceiling (2 GiB). Advisory only; the backend re-checks.
pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024 * 1024;
pub const ACCEPTED_VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
];

const FALLBACK_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

fn read_global(name: &str, keys: [&str; 2]) -> Option<String> {
    // Expect optional global objects injected by env.js, e.g.
    // window.__LEARNSTREAM_ENV = { API_BASE_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    keys.iter()
        .filter_map(|key| js_sys::Reflect::get(&obj, &(*key).into()).ok())
        .find(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.as_string())
}

fn snapshot_from_globals() -> Option<String> {
    read_global("__LEARNSTREAM_ENV", ["API_BASE_URL", "api_base_url"])
        .or_else(|| read_global("__LEARNSTREAM_CONFIG", ["api_base_url", "API_BASE_URL"]))
}

fn cache_base_url(value: &str) -> String {
    let value = normalize_base_url(value);
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(&existing);
    }
    if let Some(url) = fetch_runtime_config().await.and_then(|cfg| cfg.api_base_url) {
        return cache_base_url(&url);
    }
    log::warn!(
        "No runtime API base URL configured, falling back to {}",
        FALLBACK_API_BASE_URL
    );
    cache_base_url(FALLBACK_API_BASE_URL)
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!("API base URL resolved to {}", base);
}
