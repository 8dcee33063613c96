// Shared fakes for the gallery-core integration tests.
//
// FakeSurface maps a pointer (x, y) to a ray starting at (x, y, 0) looking
// down -Z, so a marker placed at (x, y, -100) sits right under that pointer.
// RecordingBackend keeps every audio command and flags commands that target
// released or unknown tracks.

#![allow(dead_code)]

use gallery_core::*;
use glam::Vec3;
use instant::Instant;
use std::collections::BTreeMap;
use std::time::Duration;

pub const PICK_RADIUS: f32 = 5.0;

pub fn init_logging() {
    _ = env_logger::builder().is_test(true).try_init();
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Clone, Debug)]
pub struct FakeMarker {
    pub position: Vec3,
    pub kind: MarkerKind,
    pub transform: Option<MarkerTransform>,
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub loads: Vec<(String, LoadTicket)>,
    pub presented: Vec<LoadTicket>,
    pub markers: BTreeMap<MarkerHandle, FakeMarker>,
    pub removed: Vec<MarkerHandle>,
    pub frames: usize,
    next_marker: u64,
}

impl FakeSurface {
    pub fn last_ticket(&self) -> LoadTicket {
        self.loads.last().map(|(_, t)| *t).expect("no panorama requested")
    }

    pub fn marker_positions(&self) -> Vec<Vec3> {
        self.markers.values().map(|m| m.position).collect()
    }
}

impl SceneSurface for FakeSurface {
    fn load_panorama(&mut self, url: &str, ticket: LoadTicket) {
        self.loads.push((url.to_owned(), ticket));
    }

    fn present_panorama(&mut self, ticket: LoadTicket) {
        self.presented.push(ticket);
    }

    fn add_marker(&mut self, position: Vec3, kind: MarkerKind) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        self.markers.insert(
            handle,
            FakeMarker {
                position,
                kind,
                transform: None,
            },
        );
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        assert!(
            self.markers.remove(&handle).is_some(),
            "removed unknown marker {:?}",
            handle
        );
        self.removed.push(handle);
    }

    fn set_marker_transform(&mut self, handle: MarkerHandle, transform: MarkerTransform) {
        if let Some(m) = self.markers.get_mut(&handle) {
            m.transform = Some(transform);
        }
    }

    fn project_pointer_to_ray(&self, screen_x: f32, screen_y: f32) -> Ray {
        Ray::new(Vec3::new(screen_x, screen_y, 0.0), Vec3::NEG_Z)
    }

    fn intersect(&self, ray: &Ray, markers: &[MarkerHandle]) -> Hits {
        let mut hits = Hits::new();
        for handle in markers {
            if let Some(m) = self.markers.get(handle) {
                if let Some(t) = ray_sphere(ray.origin, ray.direction, m.position, PICK_RADIUS) {
                    hits.push(Hit {
                        marker: *handle,
                        distance: t,
                    });
                }
            }
        }
        sort_hits(&mut hits);
        hits
    }

    fn camera_position(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn render_frame(&mut self) {
        self.frames += 1;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCommand {
    Create { id: TrackId, url: String, looping: bool },
    Play(TrackId),
    Pause(TrackId),
    Rewind(TrackId),
    Volume(TrackId, f32),
    Release(TrackId),
}

#[derive(Clone, Debug, Default)]
pub struct TrackRecord {
    pub url: String,
    pub looping: bool,
    pub playing: bool,
    pub volume: f32,
    pub released: bool,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub commands: Vec<AudioCommand>,
    pub tracks: BTreeMap<TrackId, TrackRecord>,
    pub failing_urls: Vec<String>,
    pub misuse: Vec<AudioCommand>,
}

impl RecordingBackend {
    pub fn failing(urls: &[&str]) -> Self {
        Self {
            failing_urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Most recently created track for `url`.
    pub fn latest(&self, url: &str) -> Option<(TrackId, &TrackRecord)> {
        self.tracks
            .iter()
            .rev()
            .find(|(_, t)| t.url == url)
            .map(|(id, t)| (*id, t))
    }

    pub fn live_tracks(&self) -> Vec<(TrackId, &TrackRecord)> {
        self.tracks
            .iter()
            .filter(|(_, t)| !t.released)
            .map(|(id, t)| (*id, t))
            .collect()
    }

    fn live(&mut self, id: TrackId, command: AudioCommand) -> Option<&mut TrackRecord> {
        self.commands.push(command.clone());
        match self.tracks.get_mut(&id) {
            Some(t) if !t.released => Some(t),
            _ => {
                self.misuse.push(command);
                None
            }
        }
    }
}

impl AudioBackend for RecordingBackend {
    fn create_track(&mut self, id: TrackId, url: &str, looping: bool) -> gallery_core::Result<()> {
        if self.failing_urls.iter().any(|u| u == url) {
            return Err(ViewerError::asset(url, "decode failed"));
        }
        self.commands.push(AudioCommand::Create {
            id,
            url: url.to_owned(),
            looping,
        });
        self.tracks.insert(
            id,
            TrackRecord {
                url: url.to_owned(),
                looping,
                volume: 1.0,
                ..TrackRecord::default()
            },
        );
        Ok(())
    }

    fn play(&mut self, id: TrackId) {
        if let Some(t) = self.live(id, AudioCommand::Play(id)) {
            t.playing = true;
        }
    }

    fn pause(&mut self, id: TrackId) {
        if let Some(t) = self.live(id, AudioCommand::Pause(id)) {
            t.playing = false;
        }
    }

    fn rewind(&mut self, id: TrackId) {
        self.live(id, AudioCommand::Rewind(id));
    }

    fn set_volume(&mut self, id: TrackId, volume: f32) {
        if let Some(t) = self.live(id, AudioCommand::Volume(id, volume)) {
            t.volume = volume;
        }
    }

    fn release(&mut self, id: TrackId) {
        if let Some(t) = self.live(id, AudioCommand::Release(id)) {
            t.released = true;
            t.playing = false;
        }
    }
}

pub type TestViewer = Viewer<FakeSurface, RecordingBackend>;

pub const ROOM1_AMBIENT: &str = "/assets/background1.mp3";
pub const ROOM2_AMBIENT: &str = "/assets/background2.mp3";
pub const ROOM3_AMBIENT: &str = "/assets/background3.mp3";
pub const VASE_MUSIC: &str = "/assets/vase_theme.mp3";
pub const VASE_NARRATION: &str = "/assets/vase_description.mp3";
pub const STATUE_MUSIC: &str = "/assets/statue_theme.mp3";

// Screen points that land on the fixture hotspots.
pub const ROOM1_TO_ROOM2: (f32, f32) = (0.0, 0.0);
pub const ROOM1_VASE: (f32, f32) = (30.0, 0.0);
pub const ROOM2_TO_ROOM1: (f32, f32) = (-30.0, 0.0);
pub const ROOM2_TO_ROOM3: (f32, f32) = (30.0, 0.0);
pub const ROOM2_PAINTING: (f32, f32) = (0.0, 0.0);
pub const ROOM3_STATUE: (f32, f32) = (20.0, 0.0);
pub const EMPTY_SPOT: (f32, f32) = (0.0, 60.0);

fn at(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, -100.0)
}

pub fn rooms() -> Vec<RoomDefinition> {
    vec![
        RoomDefinition {
            id: RoomId::new("room1"),
            panorama_url: "/assets/room1.jpg".into(),
            ambient_url: ROOM1_AMBIENT.into(),
            title: Some("Main Hall".into()),
            hotspots: vec![
                HotspotSpec::navigation(at(0.0, 0.0), Some("To the Gallery"), "room2"),
                HotspotSpec::artifact(at(30.0, 0.0), "Amphora", "/assets/vase.jpg", "Attic, 5th c. BC")
                    .with_music(VASE_MUSIC)
                    .with_narration(VASE_NARRATION),
            ],
        },
        RoomDefinition {
            id: RoomId::new("room2"),
            panorama_url: "/assets/room2.jpg".into(),
            ambient_url: ROOM2_AMBIENT.into(),
            title: None,
            hotspots: vec![
                HotspotSpec::navigation(at(-30.0, 0.0), None, "room1"),
                HotspotSpec::navigation(at(30.0, 0.0), Some("Sculpture Court"), "room3"),
                HotspotSpec::artifact(at(0.0, 0.0), "Harbour at Dusk", "/assets/painting.jpg", "Oil on canvas"),
            ],
        },
        RoomDefinition {
            id: RoomId::new("room3"),
            panorama_url: "/assets/room3.jpg".into(),
            ambient_url: ROOM3_AMBIENT.into(),
            title: None,
            hotspots: vec![
                HotspotSpec::navigation(at(0.0, 0.0), Some("Back"), "room2"),
                HotspotSpec::artifact(at(20.0, 0.0), "Bronze Runner", "/assets/statue.jpg", "Cast bronze")
                    .with_music(STATUE_MUSIC),
            ],
        },
    ]
}

pub fn catalog() -> RoomCatalog {
    RoomCatalog::new(rooms()).expect("fixture catalog is valid")
}

pub fn viewer_with(backend: RecordingBackend, now: Instant) -> TestViewer {
    init_logging();
    Viewer::new(
        catalog(),
        FakeSurface::default(),
        backend,
        ViewerConfig::default(),
        now,
    )
}

/// A viewer that has finished entering room1.
pub fn started_viewer(now: Instant) -> TestViewer {
    let mut viewer = viewer_with(RecordingBackend::default(), now);
    viewer.start(now);
    let ticket = viewer.surface().last_ticket();
    viewer.panorama_loaded(ticket, Ok(()));
    viewer.frame(now);
    viewer.drain_events();
    viewer
}

/// Report the most recent panorama request as loaded.
pub fn finish_load(viewer: &mut TestViewer) -> LoadOutcome {
    let ticket = viewer.surface().last_ticket();
    viewer.panorama_loaded(ticket, Ok(()))
}

pub fn click(viewer: &mut TestViewer, at: (f32, f32), now: Instant) {
    viewer.clicked(at.0, at.1, now);
}

pub fn ambient_volumes(viewer: &TestViewer) -> Vec<f32> {
    (0..viewer.audio().ambient_count())
        .map(|i| viewer.audio().ambient(i).map(|c| c.volume()).unwrap_or(0.0))
        .collect()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
