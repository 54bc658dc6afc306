//! Playback state machine, independent of the DOM and of hls.js.
//!
//! The controller owns at most one streaming engine. Every state change
//! arrives as a [`PlayerEvent`], which keeps the browser glue a thin loop
//! and lets the policy run under plain unit tests.

use super::keyboard::{clamp_seek, Shortcut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityLevel {
    pub index: i32,
    pub height: u32,
}

impl QualityLevel {
    pub fn label(&self) -> String {
        format!("{}p", self.height)
    }
}

pub const AUTO_QUALITY: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOption {
    pub value: i32,
    pub label: String,
}

/// "Auto" followed by one entry per level.
pub fn quality_options(levels: &[QualityLevel]) -> Vec<QualityOption> {
    std::iter::once(QualityOption {
        value: AUTO_QUALITY,
        label: "Auto".to_string(),
    })
    .chain(levels.iter().map(|level| QualityOption {
        value: level.index,
        label: level.label(),
    }))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    Network,
    Media,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamError {
    pub kind: StreamErrorKind,
    pub fatal: bool,
    pub http_status: Option<u16>,
    pub details: String,
}

impl StreamError {
    pub fn is_expired_url(&self) -> bool {
        self.kind == StreamErrorKind::Network && self.http_status == Some(403)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    RenewUrl,
    ReloadManifest,
    RecoverMedia,
    Teardown,
    Ignore,
}

pub fn recovery_action(error: &StreamError, can_renew: bool) -> RecoveryAction {
    if error.is_expired_url() && can_renew {
        return RecoveryAction::RenewUrl;
    }
    if !error.fatal {
        return RecoveryAction::Ignore;
    }
    match error.kind {
        StreamErrorKind::Network => RecoveryAction::ReloadManifest,
        StreamErrorKind::Media => RecoveryAction::RecoverMedia,
        StreamErrorKind::Other => RecoveryAction::Teardown,
    }
}

pub trait StreamingEngine {
    fn load_source(&self, url: &str);
    fn attach(&self);
    fn set_level(&self, index: i32);
    fn start_load(&self);
    fn recover_media_error(&self);
    fn destroy(&self);
}

pub trait MediaSurface {
    fn supports_native_hls(&self) -> bool;
    fn set_native_source(&self, url: &str);
    fn clear_source(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    fn paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn toggle_fullscreen(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    ManifestParsed(Vec<u32>),
    StreamFailed(StreamError),
    Renewed {
        generation: u64,
        url: Option<String>,
        position: f64,
        error: StreamError,
    },
    MetadataLoaded,
    Played,
    Paused,
    SelectQuality(i32),
    Key(Shortcut),
}

/// Asks the host to fetch a fresh URL, then send back [`PlayerEvent::Renewed`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalRequest {
    /// Load the request belongs to; a stale answer is dropped.
    pub generation: u64,
    pub position: f64,
    pub error: StreamError,
}

pub const UNSUPPORTED_BROWSER: &str = "This browser cannot play HLS video.";

pub struct PlayerController<S, E> {
    surface: S,
    engine: Option<E>,
    source_url: Option<String>,
    levels: Vec<QualityLevel>,
    current_quality: i32,
    phase: PlayerPhase,
    error: Option<String>,
    renewing: bool,
    resume_at: Option<f64>,
    generation: u64,
}

impl<S: MediaSurface, E: StreamingEngine> PlayerController<S, E> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            engine: None,
            source_url: None,
            levels: Vec::new(),
            current_quality: AUTO_QUALITY,
            phase: PlayerPhase::Idle,
            error: None,
            renewing: false,
            resume_at: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped on every teardown, so each load gets its own value.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn levels(&self) -> &[QualityLevel] {
        &self.levels
    }

    pub fn quality_options(&self) -> Vec<QualityOption> {
        quality_options(&self.levels)
    }

    pub fn current_quality(&self) -> i32 {
        self.current_quality
    }

    pub fn show_quality_selector(&self) -> bool {
        self.levels.len() > 1
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Switches to `url`. The previous engine is destroyed before
    /// `make_engine` runs, so two engines never share the element.
    pub fn load(&mut self, url: &str, make_engine: impl FnOnce() -> Option<E>) {
        self.teardown();
        self.source_url = Some(url.to_string());
        self.phase = PlayerPhase::Loading;
        self.error = None;

        if self.surface.supports_native_hls() {
            log::debug!("Using native HLS playback");
            self.surface.set_native_source(url);
            return;
        }

        match make_engine() {
            Some(engine) => {
                engine.load_source(url);
                engine.attach();
                self.engine = Some(engine);
            }
            None => {
                log::warn!("No HLS support available");
                self.fail(UNSUPPORTED_BROWSER);
            }
        }
    }

    /// Destroys the engine and forgets the source. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        match self.engine.take() {
            Some(engine) => engine.destroy(),
            None if self.source_url.is_some() => self.surface.clear_source(),
            None => {}
        }
        self.levels.clear();
        self.current_quality = AUTO_QUALITY;
        self.source_url = None;
        self.renewing = false;
        self.resume_at = None;
        self.generation = self.generation.wrapping_add(1);
        self.phase = PlayerPhase::Idle;
        self.error = None;
    }

    pub fn handle_event(&mut self, event: PlayerEvent, can_renew: bool) -> Option<RenewalRequest> {
        match event {
            PlayerEvent::ManifestParsed(heights) => self.on_manifest_parsed(&heights),
            PlayerEvent::StreamFailed(error) => {
                if self.on_error(&error, can_renew) == RecoveryAction::RenewUrl {
                    return Some(RenewalRequest {
                        generation: self.generation,
                        position: self.begin_renewal(),
                        error,
                    });
                }
            }
            PlayerEvent::Renewed {
                generation,
                url,
                position,
                error,
            } => {
                self.finish_renewal(generation, url, position, &error);
            }
            PlayerEvent::MetadataLoaded => {
                if self.phase == PlayerPhase::Loading {
                    self.phase = PlayerPhase::Ready;
                }
            }
            PlayerEvent::Played => self.set_playing(true),
            PlayerEvent::Paused => self.set_playing(false),
            PlayerEvent::SelectQuality(index) => {
                self.set_quality(index);
            }
            PlayerEvent::Key(shortcut) => self.apply_shortcut(shortcut),
        }
        None
    }

    pub fn on_manifest_parsed(&mut self, heights: &[u32]) {
        self.levels = heights
            .iter()
            .enumerate()
            .map(|(index, height)| QualityLevel {
                index: index as i32,
                height: *height,
            })
            .collect();
        self.current_quality = AUTO_QUALITY;
        if matches!(self.phase, PlayerPhase::Loading | PlayerPhase::Idle) {
            self.phase = PlayerPhase::Ready;
        }

        if let Some(position) = self.resume_at.take() {
            log::debug!("Resuming playback at {:.1}s after URL renewal", position);
            self.surface.set_current_time(position);
            self.surface.play();
        }
    }

    /// Forwards a level choice; `AUTO_QUALITY` restores adaptive selection.
    /// Returns false for indices outside the known levels.
    pub fn set_quality(&mut self, index: i32) -> bool {
        let valid = index == AUTO_QUALITY || (index >= 0 && (index as usize) < self.levels.len());
        if !valid {
            log::warn!("Ignoring unknown quality level {}", index);
            return false;
        }
        if let Some(engine) = &self.engine {
            engine.set_level(index);
        }
        self.current_quality = index;
        true
    }

    /// Applies the recovery policy and returns what was decided. For
    /// `RenewUrl` the caller must fetch a URL and report back.
    pub fn on_error(&mut self, error: &StreamError, can_renew: bool) -> RecoveryAction {
        if self.renewing && error.is_expired_url() {
            return RecoveryAction::Ignore;
        }
        let action = recovery_action(error, can_renew);
        if action != RecoveryAction::Ignore {
            log::warn!(
                "Playback error ({:?}, fatal: {}, status: {:?}): {:?}",
                error.kind,
                error.fatal,
                error.http_status,
                action
            );
        }
        match action {
            RecoveryAction::ReloadManifest => {
                if let Some(engine) = &self.engine {
                    engine.start_load();
                }
            }
            RecoveryAction::RecoverMedia => {
                if let Some(engine) = &self.engine {
                    engine.recover_media_error();
                }
            }
            RecoveryAction::Teardown => {
                if let Some(engine) = self.engine.take() {
                    engine.destroy();
                }
                self.fail(&format!("Playback failed: {}", error.details));
            }
            RecoveryAction::RenewUrl | RecoveryAction::Ignore => {}
        }
        action
    }

    /// Marks a renewal in flight and returns the position to come back to.
    pub fn begin_renewal(&mut self) -> f64 {
        self.renewing = true;
        self.surface.current_time()
    }

    /// Applies a fetched URL. Answers for an earlier load, or arriving when
    /// no renewal is pending, are ignored.
    pub fn finish_renewal(
        &mut self,
        generation: u64,
        url: Option<String>,
        position: f64,
        error: &StreamError,
    ) -> RecoveryAction {
        if !self.renewing || generation != self.generation {
            log::debug!("Dropping renewed URL for a previous source");
            return RecoveryAction::Ignore;
        }
        self.renewing = false;
        match (url, &self.engine) {
            (Some(url), Some(engine)) => {
                log::debug!("Reloading stream from renewed URL");
                self.resume_at = Some(position);
                engine.load_source(&url);
                self.source_url = Some(url);
                self.phase = PlayerPhase::Loading;
                RecoveryAction::RenewUrl
            }
            _ => self.on_error(error, false),
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.phase == PlayerPhase::Error || self.phase == PlayerPhase::Idle {
            return;
        }
        self.phase = if playing {
            PlayerPhase::Playing
        } else {
            PlayerPhase::Paused
        };
    }

    pub fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::TogglePlay => {
                if self.surface.paused() {
                    self.surface.play();
                } else {
                    self.surface.pause();
                }
            }
            Shortcut::SeekBy(delta) => {
                let target = clamp_seek(
                    self.surface.current_time(),
                    delta,
                    self.surface.duration(),
                );
                self.surface.set_current_time(target);
            }
            Shortcut::ToggleFullscreen => self.surface.toggle_fullscreen(),
            Shortcut::ToggleMute => self.surface.set_muted(!self.surface.muted()),
        }
    }

    fn fail(&mut self, message: &str) {
        self.phase = PlayerPhase::Error;
        self.error = Some(message.to_string());
    }
}
