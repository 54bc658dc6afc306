use wasm_bindgen::prelude::wasm_bindgen;

mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

/// Boots the single-page app: panic hook, console logging, runtime config
/// and the router mount.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log_level()).is_err() {
        web_sys::console::warn_1(&"Console logger was already installed".into());
    }
    log::info!("Starting LearnStream frontend");

    // Requests wait on the same lookup, so mounting does not need to.
    wasm_bindgen_futures::spawn_local(config::init());

    router::mount_app();
}

#[cfg(test)]
mod tests {
    use super::log_level;

    #[test]
    fn debug_builds_log_verbosely() {
        let expected = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        assert_eq!(log_level(), expected);
    }
}
