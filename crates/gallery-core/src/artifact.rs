use crate::audio::{AudioBackend, AudioEngine};
use crate::events::{NarrationButton, ViewerEvent};
use crate::hotspot::ArtifactHotspot;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ArtifactViewState {
    #[default]
    Closed,
    Open(ArtifactHotspot),
}

impl ArtifactViewState {
    pub fn is_open(&self) -> bool {
        matches!(self, ArtifactViewState::Open(_))
    }
}

/// Detail overlay for an artifact hotspot and the audio mode that goes with it.
#[derive(Debug, Default)]
pub struct ArtifactViewController {
    state: ArtifactViewState,
    narration: NarrationButton,
}

impl ArtifactViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<B: AudioBackend>(
        &mut self,
        hotspot: ArtifactHotspot,
        audio: &mut AudioEngine<B>,
        out: &mut Vec<ViewerEvent>,
    ) {
        // a narration left over from a previous artifact must not outlive it
        audio.stop_narration();
        log::info!(
            "[artifact] open {}",
            hotspot.title.as_deref().unwrap_or("<untitled>")
        );
        out.push(ViewerEvent::ArtifactOpened {
            title: hotspot.title.clone().unwrap_or_default(),
            description: hotspot.description.clone(),
            image_url: hotspot.image_url.clone(),
        });
        if let Err(e) = audio.play_foreground(hotspot.music_url.as_deref()) {
            log::error!("[artifact] music unavailable: {}", e);
            out.push(ViewerEvent::Diagnostic(e));
        }
        self.set_narration(
            if hotspot.narration_url.is_some() {
                NarrationButton::Play
            } else {
                NarrationButton::Hidden
            },
            out,
        );
        self.state = ArtifactViewState::Open(hotspot);
    }

    /// Close the view and hand audio back to the room. With nothing open only
    /// the idempotent track release runs, so ambient keeps its latest target.
    pub fn close<B: AudioBackend>(
        &mut self,
        audio: &mut AudioEngine<B>,
        ambient_index: usize,
        resume_fade: Duration,
        now: Instant,
        out: &mut Vec<ViewerEvent>,
    ) {
        let was_open = self.is_open();
        self.state = ArtifactViewState::Closed;
        audio.release_artifact_tracks();
        if was_open {
            audio.stop_foreground_and_resume_ambient(ambient_index, resume_fade, now);
            log::info!("[artifact] closed");
            self.set_narration(NarrationButton::Hidden, out);
            out.push(ViewerEvent::ArtifactClosed);
        }
    }

    /// No-op unless the open artifact has narration.
    pub fn toggle_narration<B: AudioBackend>(
        &mut self,
        audio: &mut AudioEngine<B>,
        out: &mut Vec<ViewerEvent>,
    ) {
        let url = match &self.state {
            ArtifactViewState::Open(ArtifactHotspot {
                narration_url: Some(url),
                ..
            }) => url.clone(),
            _ => {
                log::debug!("[artifact] no narration to toggle");
                return;
            }
        };
        match audio.toggle_narration(&url) {
            Ok(button) => self.set_narration(button, out),
            Err(e) => {
                log::error!("[artifact] narration unavailable: {}", e);
                out.push(ViewerEvent::Diagnostic(e));
            }
        }
    }

    /// Narration reached its natural end.
    pub fn narration_finished(&mut self, out: &mut Vec<ViewerEvent>) {
        if self.is_open() {
            self.set_narration(NarrationButton::Play, out);
        }
    }

    fn set_narration(&mut self, button: NarrationButton, out: &mut Vec<ViewerEvent>) {
        self.narration = button;
        out.push(ViewerEvent::NarrationButton(button));
    }

    pub fn state(&self) -> &ArtifactViewState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn narration_button(&self) -> NarrationButton {
        self.narration
    }
}
