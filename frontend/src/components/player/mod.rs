//! Adaptive HLS player.
//!
//! [`controller`] holds the playback policy, [`bridge`] funnels DOM and
//! hls.js callbacks into it, and the `hls` module binds the browser pieces.

mod bridge;
pub mod controller;
#[cfg(target_arch = "wasm32")]
mod hls;
pub mod keyboard;

pub use bridge::PlayerBridge;
pub use controller::{
    MediaSurface, PlayerController, PlayerEvent, PlayerPhase, QualityOption, StreamingEngine,
};

use futures::future::LocalBoxFuture;
use leptos::*;
use std::rc::Rc;

/// Produces a freshly signed stream URL, or `None` when none is available.
pub type UrlRenewer = Rc<dyn Fn() -> LocalBoxFuture<'static, Option<String>>>;

#[derive(Clone, Copy)]
struct PlayerView {
    phase: RwSignal<PlayerPhase>,
    error: RwSignal<Option<String>>,
    options: RwSignal<Vec<QualityOption>>,
    current_quality: RwSignal<i32>,
}

impl PlayerView {
    fn new() -> Self {
        Self {
            phase: create_rw_signal(PlayerPhase::Idle),
            error: create_rw_signal(None),
            options: create_rw_signal(Vec::new()),
            current_quality: create_rw_signal(controller::AUTO_QUALITY),
        }
    }

    fn sync<S: MediaSurface, E: StreamingEngine>(&self, player: &PlayerController<S, E>) {
        if self.phase.get_untracked() != player.phase() {
            self.phase.set(player.phase());
        }
        let error = player.error().map(str::to_string);
        if self.error.get_untracked() != error {
            self.error.set(error);
        }
        let options = player.quality_options();
        if self.options.with_untracked(|current| current != &options) {
            self.options.set(options);
        }
        if self.current_quality.get_untracked() != player.current_quality() {
            self.current_quality.set(player.current_quality());
        }
    }

    fn show_quality_selector(&self) -> bool {
        // "Auto" plus at least two levels.
        self.options.with(|options| options.len() > 2)
    }
}

#[component]
pub fn VideoPlayer(
    #[prop(into)] src: Signal<Option<String>>,
    #[prop(optional)] renew_url: Option<UrlRenewer>,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    let video_ref = create_node_ref::<html::Video>();
    let bridge = PlayerBridge::new();
    let view_state = PlayerView::new();

    #[cfg(target_arch = "wasm32")]
    wire::attach(video_ref, src, renew_url, bridge.clone(), view_state);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (src, renew_url);

    let on_play = {
        let bridge = bridge.clone();
        move |_| bridge.send(PlayerEvent::Played)
    };
    let on_pause = {
        let bridge = bridge.clone();
        move |_| bridge.send(PlayerEvent::Paused)
    };
    let on_metadata = {
        let bridge = bridge.clone();
        move |_| bridge.send(PlayerEvent::MetadataLoaded)
    };
    let on_quality = move |ev| {
        if let Ok(index) = event_target_value(&ev).parse::<i32>() {
            bridge.send(PlayerEvent::SelectQuality(index));
        }
    };

    view! {
        <div class="relative w-full bg-black rounded-lg overflow-hidden" aria-label=title>
            <video
                node_ref=video_ref
                class="w-full aspect-video"
                controls=true
                playsinline=true
                preload="metadata"
                on:play=on_play
                on:pause=on_pause
                on:loadedmetadata=on_metadata
            ></video>
            <Show when=move || view_state.phase.get() == PlayerPhase::Loading>
                <div class="absolute inset-0 flex items-center justify-center pointer-events-none">
                    <div class="animate-spin rounded-full h-10 w-10 border-b-2 border-white"></div>
                </div>
            </Show>
            <Show when=move || view_state.phase.get() == PlayerPhase::Error>
                <div
                    class="absolute inset-0 flex items-center justify-center bg-black/80 text-white p-6 text-center"
                    role="alert"
                >
                    {move || view_state.error.get().unwrap_or_default()}
                </div>
            </Show>
            <Show when=move || view_state.show_quality_selector()>
                <div class="absolute top-3 right-3">
                    <label class="sr-only" for="player-quality">"Quality"</label>
                    <select
                        id="player-quality"
                        class="bg-black/70 text-white text-sm rounded px-2 py-1 border border-white/30"
                        on:change=on_quality.clone()
                        prop:value=move || view_state.current_quality.get().to_string()
                    >
                        <For
                            each=move || view_state.options.get()
                            key=|option| option.value
                            children=move |option| {
                                view! { <option value=option.value.to_string()>{option.label}</option> }
                            }
                        />
                    </select>
                </div>
            </Show>
        </div>
    }
}

#[cfg(target_arch = "wasm32")]
mod wire {
    use super::hls::{HlsEngine, VideoSurface};
    use super::keyboard::{is_text_entry, shortcut_for};
    use super::{PlayerBridge, PlayerController, PlayerEvent, PlayerView, UrlRenewer};
    use futures::channel::mpsc::UnboundedReceiver;
    use futures::StreamExt;
    use leptos::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;

    type Slot = Rc<RefCell<Option<PlayerController<VideoSurface, HlsEngine>>>>;

    pub(super) fn attach(
        video_ref: NodeRef<html::Video>,
        src: Signal<Option<String>>,
        renew_url: Option<UrlRenewer>,
        bridge: PlayerBridge,
        view_state: PlayerView,
    ) {
        let slot: Slot = Rc::default();
        let rx = bridge.open();
        spawn_local(run_events(
            rx,
            slot.clone(),
            renew_url,
            bridge.clone(),
            view_state,
        ));

        {
            let slot = slot.clone();
            let bridge = bridge.clone();
            create_effect(move |_| {
                let url = src.get();
                let Some(video) = video_ref.get() else {
                    return;
                };
                let element: web_sys::HtmlVideoElement = (*video).clone();
                let mut guard = slot.borrow_mut();
                let player =
                    guard.get_or_insert_with(|| PlayerController::new(VideoSurface::new(element.clone())));
                match url {
                    Some(url) => {
                        let bridge = bridge.clone();
                        player.load(&url, move || HlsEngine::create(&element, bridge));
                    }
                    None => player.teardown(),
                }
                view_state.sync(player);
            });
        }

        let key_bridge = bridge.clone();
        let keys = window_event_listener(ev::keydown, move |event| {
            let typing = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .map(|element| is_text_entry(&element.tag_name()))
                .unwrap_or(false);
            if typing || event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            if let Some(shortcut) = shortcut_for(&event.key()) {
                event.prevent_default();
                key_bridge.send(PlayerEvent::Key(shortcut));
            }
        });

        on_cleanup(move || {
            keys.remove();
            bridge.close();
            if let Some(mut player) = slot.borrow_mut().take() {
                player.teardown();
            }
        });
    }

    async fn run_events(
        mut rx: UnboundedReceiver<PlayerEvent>,
        slot: Slot,
        renew_url: Option<UrlRenewer>,
        bridge: PlayerBridge,
        view_state: PlayerView,
    ) {
        while let Some(event) = rx.next().await {
            let renewal = {
                let mut guard = slot.borrow_mut();
                let Some(player) = guard.as_mut() else {
                    continue;
                };
                let renewal = player.handle_event(event, renew_url.is_some());
                view_state.sync(player);
                renewal
            };

            if let (Some(request), Some(renew)) = (renewal, renew_url.clone()) {
                let bridge = bridge.clone();
                spawn_local(async move {
                    let url = renew().await;
                    bridge.send(PlayerEvent::Renewed {
                        generation: request.generation,
                        url,
                        position: request.position,
                        error: request.error,
                    });
                });
            }
        }
        log::debug!("Player event loop finished");
    }
}
