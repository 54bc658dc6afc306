//! hls.js binding and the browser-side implementations of the player traits.

use super::bridge::PlayerBridge;
use super::controller::{
    MediaSurface, PlayerEvent, StreamError, StreamErrorKind, StreamingEngine,
};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlMediaElement, HtmlVideoElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Hls)]
    pub type Hls;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported, catch)]
    fn is_supported() -> Result<bool, JsValue>;

    #[wasm_bindgen(constructor, catch)]
    fn new(config: &JsValue) -> Result<Hls, JsValue>;

    #[wasm_bindgen(method, js_name = loadSource)]
    fn load_source(this: &Hls, url: &str);

    #[wasm_bindgen(method, js_name = attachMedia)]
    fn attach_media(this: &Hls, media: &HtmlMediaElement);

    #[wasm_bindgen(method)]
    fn on(this: &Hls, event: &str, callback: &Function);

    #[wasm_bindgen(method, setter, js_name = currentLevel)]
    fn set_current_level(this: &Hls, level: i32);

    #[wasm_bindgen(method, js_name = startLoad)]
    fn start_load(this: &Hls);

    #[wasm_bindgen(method, js_name = recoverMediaError)]
    fn recover_media_error(this: &Hls);

    #[wasm_bindgen(method)]
    fn destroy(this: &Hls);
}

const MANIFEST_PARSED: &str = "hlsManifestParsed";
const ERROR: &str = "hlsError";

type Listener = Closure<dyn FnMut(JsValue, JsValue)>;

pub struct HlsEngine {
    hls: Hls,
    media: HtmlMediaElement,
    _listeners: Vec<Listener>,
}

impl HlsEngine {
    /// `None` when hls.js is missing or reports no MediaSource support.
    pub fn create(video: &HtmlVideoElement, bridge: PlayerBridge) -> Option<Self> {
        if !Hls::is_supported().unwrap_or(false) {
            return None;
        }
        let config = Object::new();
        let _ = Reflect::set(&config, &"enableWorker".into(), &JsValue::TRUE);
        let _ = Reflect::set(&config, &"startLevel".into(), &JsValue::from(-1));
        let hls = match Hls::new(&config) {
            Ok(hls) => hls,
            Err(err) => {
                log::error!("Failed to create hls.js instance: {:?}", err);
                return None;
            }
        };

        let parsed_bridge = bridge.clone();
        let on_parsed: Listener = Closure::new(move |_event: JsValue, data: JsValue| {
            parsed_bridge.send(PlayerEvent::ManifestParsed(level_heights(&data)));
        });
        let on_error: Listener = Closure::new(move |_event: JsValue, data: JsValue| {
            bridge.send(PlayerEvent::StreamFailed(stream_error(&data)));
        });
        hls.on(MANIFEST_PARSED, on_parsed.as_ref().unchecked_ref());
        hls.on(ERROR, on_error.as_ref().unchecked_ref());

        Some(Self {
            hls,
            media: video.clone().unchecked_into(),
            _listeners: vec![on_parsed, on_error],
        })
    }
}

impl StreamingEngine for HlsEngine {
    fn load_source(&self, url: &str) {
        self.hls.load_source(url);
    }

    fn attach(&self) {
        self.hls.attach_media(&self.media);
    }

    fn set_level(&self, index: i32) {
        self.hls.set_current_level(index);
    }

    fn start_load(&self) {
        self.hls.start_load();
    }

    fn recover_media_error(&self) {
        self.hls.recover_media_error();
    }

    fn destroy(&self) {
        self.hls.destroy();
    }
}

fn level_heights(data: &JsValue) -> Vec<u32> {
    Reflect::get(data, &"levels".into())
        .ok()
        .filter(Array::is_array)
        .map(|levels| {
            Array::from(&levels)
                .iter()
                .filter_map(|level| Reflect::get(&level, &"height".into()).ok())
                .filter_map(|height| height.as_f64())
                .map(|height| height as u32)
                .collect()
        })
        .unwrap_or_default()
}

fn stream_error(data: &JsValue) -> StreamError {
    let text = |key: &str| {
        Reflect::get(data, &key.into())
            .ok()
            .and_then(|value| value.as_string())
    };
    let kind = match text("type").as_deref() {
        Some("networkError") => StreamErrorKind::Network,
        Some("mediaError") => StreamErrorKind::Media,
        _ => StreamErrorKind::Other,
    };
    let fatal = Reflect::get(data, &"fatal".into())
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false);
    let http_status = Reflect::get(data, &"response".into())
        .ok()
        .filter(|response| response.is_object())
        .and_then(|response| Reflect::get(&response, &"code".into()).ok())
        .and_then(|code| code.as_f64())
        .map(|code| code as u16);

    StreamError {
        kind,
        fatal,
        http_status,
        details: text("details").unwrap_or_else(|| "unknown".to_string()),
    }
}

#[derive(Clone)]
pub struct VideoSurface {
    video: HtmlVideoElement,
}

impl VideoSurface {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl MediaSurface for VideoSurface {
    fn supports_native_hls(&self) -> bool {
        !self
            .video
            .can_play_type("application/vnd.apple.mpegurl")
            .is_empty()
    }

    fn set_native_source(&self, url: &str) {
        self.video.set_src(url);
    }

    fn clear_source(&self) {
        let _ = self.video.remove_attribute("src");
        self.video.load();
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn play(&self) {
        if let Err(err) = self.video.play() {
            log::warn!("play() rejected: {:?}", err);
        }
    }

    fn pause(&self) {
        let _ = self.video.pause();
    }

    fn muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn toggle_fullscreen(&self) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        } else if let Err(err) = self.video.request_fullscreen() {
            log::warn!("Fullscreen request failed: {:?}", err);
        }
    }
}
