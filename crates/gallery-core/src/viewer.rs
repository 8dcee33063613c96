//! Top-level coordinator wiring pointer input, rooms, the artifact view and
//! audio together. The host forwards raw input and asynchronous completions
//! and drains [`ViewerEvent`]s for its UI once per frame.

use crate::artifact::{ArtifactViewController, ArtifactViewState};
use crate::audio::{AudioBackend, AudioEngine, TrackId};
use crate::catalog::RoomCatalog;
use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::events::{NarrationButton, ViewerEvent};
use crate::hotspot::{Hotspot, RoomId};
use crate::pointer::{Activation, InteractionState, PointerController};
use crate::registry::HotspotRegistry;
use crate::room::{LoadOutcome, RoomStateMachine};
use crate::scene::{bob_offset, marker_scale, LoadResult, LoadTicket, MarkerTransform, SceneSurface};
use glam::Vec3;
use instant::Instant;

pub struct Viewer<S: SceneSurface, B: AudioBackend> {
    config: ViewerConfig,
    surface: S,
    audio: AudioEngine<B>,
    rooms: RoomStateMachine,
    pointer: PointerController,
    artifact: ArtifactViewController,
    events: Vec<ViewerEvent>,
    epoch: Instant,
}

impl<S: SceneSurface, B: AudioBackend> Viewer<S, B> {
    pub fn new(catalog: RoomCatalog, surface: S, backend: B, config: ViewerConfig, now: Instant) -> Self {
        let mut audio = AudioEngine::new(backend, config.levels);
        let mut events = Vec::new();
        for url in catalog.ambient_urls() {
            if let Err(e) = audio.add_ambient(url) {
                log::error!("[viewer] ambient track unavailable: {}", e);
                events.push(ViewerEvent::Diagnostic(e));
            }
        }
        log::info!(
            "[viewer] rooms={} initial={}",
            catalog.len(),
            catalog.initial_room()
        );
        Self {
            config,
            surface,
            audio,
            rooms: RoomStateMachine::new(catalog),
            pointer: PointerController::new(),
            artifact: ArtifactViewController::new(),
            events,
            epoch: now,
        }
    }

    /// Enter the catalog's initial room.
    pub fn start(&mut self, now: Instant) {
        let initial = self.rooms.catalog().initial_room().clone();
        _ = self.switch_room(&initial, now);
    }

    pub fn switch_room(&mut self, target: &RoomId, now: Instant) -> Result<LoadTicket> {
        self.pointer.hide_tooltip(&mut self.events);
        self.rooms
            .switch_room(
                target,
                &mut self.surface,
                &mut self.audio,
                self.config.room_crossfade,
                now,
                &mut self.events,
            )
            .map_err(|e| {
                log::warn!("[viewer] switch refused: {}", e);
                self.events.push(ViewerEvent::Diagnostic(e.clone()));
                e
            })
    }

    pub fn panorama_loaded(&mut self, ticket: LoadTicket, result: LoadResult) -> LoadOutcome {
        self.rooms
            .panorama_loaded(ticket, result, &mut self.surface, &mut self.events)
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.artifact.is_open() {
            self.pointer.hide_tooltip(&mut self.events);
            return;
        }
        self.pointer.pointer_moved(
            x,
            y,
            &self.surface,
            self.rooms.registry(),
            &mut self.events,
        );
    }

    pub fn clicked(&mut self, x: f32, y: f32, now: Instant) {
        if self.artifact.is_open() {
            return;
        }
        match self
            .pointer
            .clicked(x, y, &self.surface, self.rooms.registry())
        {
            Some(Activation::Navigate(target)) => {
                _ = self.switch_room(&target, now);
            }
            Some(Activation::OpenArtifact(artifact)) => {
                self.pointer.hide_tooltip(&mut self.events);
                self.artifact
                    .open(artifact, &mut self.audio, &mut self.events);
            }
            None => {}
        }
    }

    pub fn close_artifact(&mut self, now: Instant) {
        let ambient_index = self.rooms.current_ambient_index();
        self.artifact.close(
            &mut self.audio,
            ambient_index,
            self.config.ambient_resume_fade,
            now,
            &mut self.events,
        );
    }

    pub fn toggle_narration(&mut self) {
        self.artifact
            .toggle_narration(&mut self.audio, &mut self.events);
    }

    /// A backend track played to its end.
    pub fn track_ended(&mut self, track: TrackId) {
        if self.audio.track_ended(track) {
            self.artifact.narration_finished(&mut self.events);
        }
    }

    /// A backend track could not be loaded or decoded after it was created.
    pub fn track_failed(&mut self, track: TrackId, error: ViewerError) {
        log::error!("[viewer] audio track {:?} failed: {}", track, error);
        self.events.push(ViewerEvent::Diagnostic(error));
        // narration that cannot play ends the same way as one that played out
        self.track_ended(track);
    }

    pub fn frame(&mut self, now: Instant) {
        self.audio.tick(now);
        self.update_marker_transforms(now);
        self.surface.render_frame();
    }

    fn update_marker_transforms(&mut self, now: Instant) {
        let t = if now > self.epoch {
            (now - self.epoch).as_secs_f32()
        } else {
            0.0
        };
        let camera = self.surface.camera_position();
        for marker in self.rooms.registry().iter() {
            let position = marker.hotspot.position();
            let transform = match &marker.hotspot {
                Hotspot::Navigation(_) => MarkerTransform {
                    position: position
                        + Vec3::Y * bob_offset(t, self.config.bob_amplitude, self.config.bob_rate),
                    scale: self.config.navigation_marker_scale,
                },
                Hotspot::Artifact(_) => MarkerTransform {
                    position,
                    scale: marker_scale(
                        camera.distance(position),
                        self.config.artifact_marker_scale,
                    ),
                },
            };
            self.surface.set_marker_transform(marker.handle, transform);
        }
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn current_room(&self) -> &RoomId {
        self.rooms.current_room()
    }

    pub fn rooms(&self) -> &RoomStateMachine {
        &self.rooms
    }

    pub fn registry(&self) -> &HotspotRegistry {
        self.rooms.registry()
    }

    pub fn is_loading(&self) -> bool {
        self.rooms.is_loading()
    }

    pub fn artifact_state(&self) -> &ArtifactViewState {
        self.artifact.state()
    }

    pub fn narration_button(&self) -> NarrationButton {
        self.artifact.narration_button()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.pointer.state()
    }

    pub fn audio(&self) -> &AudioEngine<B> {
        &self.audio
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
