//! Layered audio: one looping ambient channel per room, a looping foreground
//! channel for the open artifact and a one-shot narration channel.
//!
//! Other components never touch track handles. They issue intents
//! (`select_ambient`, `play_foreground`, `toggle_narration`, ...) and the engine
//! translates them into [`AudioBackend`] commands. Fades are time driven: each
//! [`AudioEngine::tick`] samples the ramp at the given instant, so irregular
//! frame cadence only changes how often the volume is updated, never where the
//! ramp ends up.

use crate::config::AudioLevels;
use crate::error::Result;
use crate::events::NarrationButton;
use instant::Instant;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u64);

/// Platform audio. Track ids are allocated by the engine and never reused.
pub trait AudioBackend {
    fn create_track(&mut self, id: TrackId, url: &str, looping: bool) -> Result<()>;
    fn play(&mut self, id: TrackId);
    fn pause(&mut self, id: TrackId);
    fn rewind(&mut self, id: TrackId);
    fn set_volume(&mut self, id: TrackId, volume: f32);
    fn release(&mut self, id: TrackId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelId {
    Ambient(usize),
    Foreground,
    Narration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    track: TrackId,
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Fade {
    /// Volume at `now` and whether the ramp is complete.
    fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = if now > self.start {
            now - self.start
        } else {
            Duration::ZERO
        };
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        let volume = (self.from + (self.to - self.from) * progress).clamp(0.0, 1.0);
        (volume, progress >= 1.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Channel {
    track: Option<TrackId>,
    looping: bool,
    playing: bool,
    volume: f32,
    target: f32,
    fade: Option<Fade>,
}

impl Channel {
    fn looping() -> Self {
        Self {
            looping: true,
            ..Self::default()
        }
    }

    pub fn track(&self) -> Option<TrackId> {
        self.track
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn target_volume(&self) -> f32 {
        self.target
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn start<B: AudioBackend>(&mut self, backend: &mut B, id: TrackId, looping: bool, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        backend.set_volume(id, volume);
        backend.play(id);
        *self = Self {
            track: Some(id),
            looping,
            playing: true,
            volume,
            target: volume,
            fade: None,
        };
    }

    fn set_volume_now<B: AudioBackend>(&mut self, backend: &mut B, volume: f32) {
        let Some(id) = self.track else {
            return;
        };
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        self.target = volume;
        self.fade = None;
        backend.set_volume(id, volume);
    }

    fn fade_to<B: AudioBackend>(
        &mut self,
        backend: &mut B,
        target: f32,
        duration: Duration,
        now: Instant,
    ) {
        let Some(id) = self.track else {
            return;
        };
        let target = target.clamp(0.0, 1.0);
        if target > 0.0 && !self.playing {
            // fade in from silence, not from wherever the track was left
            self.volume = 0.0;
            backend.set_volume(id, 0.0);
            backend.play(id);
            self.playing = true;
        }
        match self.fade {
            Some(fade) if fade.track == id && fade.to == target => return,
            None if self.volume == target => {
                self.target = target;
                return;
            }
            _ => {}
        }
        self.target = target;
        if duration.is_zero() {
            self.fade = None;
            self.volume = target;
            backend.set_volume(id, target);
        } else {
            self.fade = Some(Fade {
                track: id,
                from: self.volume,
                to: target,
                start: now,
                duration,
            });
        }
    }

    fn tick<B: AudioBackend>(&mut self, backend: &mut B, now: Instant) {
        let Some(fade) = self.fade else {
            return;
        };
        if self.track != Some(fade.track) {
            self.fade = None;
            return;
        }
        let (volume, done) = fade.sample(now);
        self.volume = volume;
        backend.set_volume(fade.track, volume);
        if done {
            self.fade = None;
        }
    }

    /// Stop outright and keep the handle for later.
    fn halt<B: AudioBackend>(&mut self, backend: &mut B) {
        if let Some(id) = self.track {
            backend.pause(id);
            backend.set_volume(id, 0.0);
        }
        self.playing = false;
        self.volume = 0.0;
        self.target = 0.0;
        self.fade = None;
    }

    /// Stop and drop the handle. No-op on an empty channel.
    fn release<B: AudioBackend>(&mut self, backend: &mut B) {
        if let Some(id) = self.track.take() {
            backend.pause(id);
            backend.rewind(id);
            backend.release(id);
        }
        *self = Self {
            looping: self.looping,
            ..Self::default()
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NarrationState {
    Idle,
    Playing(TrackId),
}

pub struct AudioEngine<B: AudioBackend> {
    backend: B,
    levels: AudioLevels,
    ambient: SmallVec<[Channel; 4]>,
    foreground: Channel,
    narration: Channel,
    narration_state: NarrationState,
    next_track: u64,
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(backend: B, levels: AudioLevels) -> Self {
        Self {
            backend,
            levels,
            ambient: SmallVec::new(),
            foreground: Channel::looping(),
            narration: Channel::default(),
            narration_state: NarrationState::Idle,
            next_track: 1,
        }
    }

    fn allocate(&mut self) -> TrackId {
        let id = TrackId(self.next_track);
        self.next_track += 1;
        id
    }

    /// Pre-create the next room's ambient loop, silent and stopped.
    ///
    /// A failed track still occupies its index so room indices stay aligned;
    /// that room is simply silent.
    pub fn add_ambient(&mut self, url: &str) -> Result<usize> {
        let index = self.ambient.len();
        let id = self.allocate();
        let mut channel = Channel::looping();
        let created = self.backend.create_track(id, url, true);
        if created.is_ok() {
            self.backend.set_volume(id, 0.0);
            channel.track = Some(id);
        }
        self.ambient.push(channel);
        created.map(|_| index)
    }

    /// Ramp `index` up to the ambient level and every other room loop to 0.
    ///
    /// Re-targets fades already in flight; a channel already heading to its
    /// new target keeps its current ramp.
    pub fn select_ambient(&mut self, index: usize, fade: Duration, now: Instant) {
        if index >= self.ambient.len() {
            log::warn!("[audio] no ambient track {}, silencing all", index);
        }
        let level = self.levels.ambient;
        for (i, channel) in self.ambient.iter_mut().enumerate() {
            let target = if i == index { level } else { 0.0 };
            channel.fade_to(&mut self.backend, target, fade, now);
        }
    }

    /// Switch to artifact mode: room loops stop at once and `music_url`, when
    /// present, starts looping at the foreground level.
    pub fn play_foreground(&mut self, music_url: Option<&str>) -> Result<()> {
        self.foreground.release(&mut self.backend);
        for channel in self.ambient.iter_mut() {
            channel.halt(&mut self.backend);
        }
        let Some(url) = music_url else {
            return Ok(());
        };
        let id = self.allocate();
        self.backend.create_track(id, url, true)?;
        let volume = if self.narration_playing() {
            self.levels.foreground_ducked
        } else {
            self.levels.foreground
        };
        self.foreground.start(&mut self.backend, id, true, volume);
        log::debug!("[audio] foreground {:?} <- {}", id, url);
        Ok(())
    }

    pub fn stop_foreground_and_resume_ambient(&mut self, index: usize, fade: Duration, now: Instant) {
        self.foreground.release(&mut self.backend);
        self.select_ambient(index, fade, now);
    }

    /// Start narration (ducking the foreground) or stop it if it is running.
    /// Returns the toggle state to display.
    pub fn toggle_narration(&mut self, url: &str) -> Result<NarrationButton> {
        if self.finish_narration() {
            return Ok(NarrationButton::Play);
        }
        let id = self.allocate();
        self.backend.create_track(id, url, false)?;
        self.narration.release(&mut self.backend);
        self.narration
            .start(&mut self.backend, id, false, self.levels.narration);
        self.foreground
            .set_volume_now(&mut self.backend, self.levels.foreground_ducked);
        self.narration_state = NarrationState::Playing(id);
        Ok(NarrationButton::Stop)
    }

    /// A track reached its natural end. Returns true when that ended the
    /// active narration; ends of superseded tracks are ignored.
    pub fn track_ended(&mut self, id: TrackId) -> bool {
        match self.narration_state {
            NarrationState::Playing(active) if active == id => self.finish_narration(),
            _ => {
                log::debug!("[audio] ignoring end of inactive track {:?}", id);
                false
            }
        }
    }

    pub fn stop_narration(&mut self) -> bool {
        self.finish_narration()
    }

    /// Single exit from the narration state. Only the call that observes
    /// `Playing` restores the foreground level.
    fn finish_narration(&mut self) -> bool {
        let NarrationState::Playing(_) =
            std::mem::replace(&mut self.narration_state, NarrationState::Idle)
        else {
            return false;
        };
        self.narration.release(&mut self.backend);
        self.foreground
            .set_volume_now(&mut self.backend, self.levels.foreground);
        true
    }

    /// Drop narration and foreground tracks. Idempotent.
    pub fn release_artifact_tracks(&mut self) {
        self.finish_narration();
        self.narration.release(&mut self.backend);
        self.foreground.release(&mut self.backend);
    }

    pub fn tick(&mut self, now: Instant) {
        for channel in self.ambient.iter_mut() {
            channel.tick(&mut self.backend, now);
        }
        self.foreground.tick(&mut self.backend, now);
        self.narration.tick(&mut self.backend, now);
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        match id {
            ChannelId::Ambient(i) => self.ambient.get(i),
            ChannelId::Foreground => Some(&self.foreground),
            ChannelId::Narration => Some(&self.narration),
        }
    }

    pub fn ambient(&self, index: usize) -> Option<&Channel> {
        self.ambient.get(index)
    }

    pub fn ambient_count(&self) -> usize {
        self.ambient.len()
    }

    pub fn foreground(&self) -> &Channel {
        &self.foreground
    }

    pub fn narration(&self) -> &Channel {
        &self.narration
    }

    pub fn narration_playing(&self) -> bool {
        matches!(self.narration_state, NarrationState::Playing(_))
    }

    pub fn is_fading(&self) -> bool {
        self.ambient.iter().any(Channel::is_fading)
            || self.foreground.is_fading()
            || self.narration.is_fading()
    }

    pub fn levels(&self) -> &AudioLevels {
        &self.levels
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
