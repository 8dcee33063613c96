// Artifact view: opening, closing and the narration toggle.

mod support;

use gallery_core::*;
use glam::Vec3;
use instant::Instant;
use support::*;

fn opened_vase(t0: Instant) -> TestViewer {
    let mut viewer = started_viewer(t0);
    viewer.frame(t0 + ms(2000));
    click(&mut viewer, ROOM1_VASE, t0 + ms(2000));
    viewer
}

fn narration_track(viewer: &TestViewer) -> TrackId {
    viewer.audio().backend().latest(VASE_NARRATION).unwrap().0
}

#[test]
fn opening_artifact_shows_details_and_plays_music() {
    let t0 = Instant::now();
    let mut viewer = opened_vase(t0);

    assert_eq!(
        viewer.drain_events(),
        vec![
            ViewerEvent::ArtifactOpened {
                title: "Amphora".into(),
                description: "Attic, 5th c. BC".into(),
                image_url: "/assets/vase.jpg".into(),
            },
            ViewerEvent::NarrationButton(NarrationButton::Play),
        ]
    );
    assert!(matches!(viewer.artifact_state(), ArtifactViewState::Open(a) if a.title.as_deref() == Some("Amphora")));
    assert_eq!(viewer.narration_button(), NarrationButton::Play);
    assert_eq!(ambient_volumes(&viewer), vec![0.0, 0.0, 0.0]);

    let fg = viewer.audio().foreground();
    assert!(fg.is_playing());
    assert_eq!(fg.volume(), 0.8);
    assert_eq!(
        fg.track(),
        viewer.audio().backend().latest(VASE_MUSIC).map(|(id, _)| id)
    );
}

#[test]
fn narration_toggle_ducks_music() {
    let t0 = Instant::now();
    let mut viewer = opened_vase(t0);
    viewer.drain_events();

    viewer.toggle_narration();
    assert_eq!(
        viewer.drain_events(),
        vec![ViewerEvent::NarrationButton(NarrationButton::Stop)]
    );
    assert_eq!(NarrationButton::Stop.label(), "Stop Audio Description");
    assert_eq!(viewer.audio().foreground().volume(), 0.4);

    viewer.toggle_narration();
    assert_eq!(
        viewer.drain_events(),
        vec![ViewerEvent::NarrationButton(NarrationButton::Play)]
    );
    assert_eq!(viewer.narration_button().label(), "Play Audio Description");
    assert_eq!(viewer.audio().foreground().volume(), 0.8);
    assert!(viewer.audio().backend().misuse.is_empty());
}

#[test]
fn narration_end_resets_button() {
    let t0 = Instant::now();
    let mut viewer = opened_vase(t0);
    viewer.toggle_narration();
    viewer.drain_events();

    let track = narration_track(&viewer);
    viewer.track_ended(track);
    assert_eq!(
        viewer.drain_events(),
        vec![ViewerEvent::NarrationButton(NarrationButton::Play)]
    );
    assert_eq!(viewer.audio().foreground().volume(), 0.8);

    viewer.track_ended(track);
    assert!(viewer.drain_events().is_empty());
}

#[test]
fn late_narration_failure_is_reported_and_unducks_music() {
    let t0 = Instant::now();
    let mut viewer = opened_vase(t0);
    viewer.toggle_narration();
    viewer.drain_events();
    assert_eq!(viewer.audio().foreground().volume(), 0.4);

    let track = narration_track(&viewer);
    let error = ViewerError::asset(VASE_NARRATION, "media error code 4");
    viewer.track_failed(track, error.clone());
    assert_eq!(
        viewer.drain_events(),
        vec![
            ViewerEvent::Diagnostic(error),
            ViewerEvent::NarrationButton(NarrationButton::Play),
        ]
    );
    assert!(!viewer.audio().narration_playing());
    assert_eq!(viewer.audio().foreground().volume(), 0.8);
}

#[test]
fn late_music_failure_is_reported_without_closing() {
    let t0 = Instant::now();
    let mut viewer = opened_vase(t0);
    viewer.drain_events();

    let track = viewer.audio().backend().latest(VASE_MUSIC).map(|(id, _)| id).unwrap();
    let error = ViewerError::asset(VASE_MUSIC, "media error code 3");
    viewer.track_failed(track, error.clone());
    assert_eq!(viewer.drain_events(), vec![ViewerEvent::Diagnostic(error)]);
    assert!(viewer.artifact_state().is_open());
}

#[test]
fn closing_during_narration_releases_everything() {
    let t0 = Instant::now();
    let mut viewer = opened_vase(t0);
    viewer.toggle_narration();
    viewer.drain_events();

    let t1 = t0 + ms(5000);
    viewer.close_artifact(t1);
    assert_eq!(
        viewer.drain_events(),
        vec![
            ViewerEvent::NarrationButton(NarrationButton::Hidden),
            ViewerEvent::ArtifactClosed,
        ]
    );
    assert_eq!(viewer.artifact_state(), &ArtifactViewState::Closed);
    assert!(!viewer.audio().narration_playing());
    assert!(viewer.audio().foreground().track().is_none());
    assert!(viewer.audio().backend().latest(VASE_MUSIC).unwrap().1.released);
    assert!(viewer.audio().backend().latest(VASE_NARRATION).unwrap().1.released);

    viewer.frame(t1 + ms(250));
    assert!(approx(ambient_volumes(&viewer)[0], 0.25));
    viewer.frame(t1 + ms(500));
    assert_eq!(ambient_volumes(&viewer), vec![0.5, 0.0, 0.0]);
    assert!(viewer.audio().backend().misuse.is_empty());

    // the late end of the released narration changes nothing
    let track = narration_track(&viewer);
    viewer.track_ended(track);
    assert!(viewer.drain_events().is_empty());
}

#[test]
fn artifact_without_narration_hides_button() {
    let t0 = Instant::now();
    let mut viewer = started_viewer(t0);
    click(&mut viewer, ROOM1_TO_ROOM2, t0);
    finish_load(&mut viewer);
    viewer.frame(t0 + ms(2000));
    viewer.drain_events();

    click(&mut viewer, ROOM2_PAINTING, t0 + ms(2000));
    assert_eq!(
        viewer.drain_events(),
        vec![
            ViewerEvent::ArtifactOpened {
                title: "Harbour at Dusk".into(),
                description: "Oil on canvas".into(),
                image_url: "/assets/painting.jpg".into(),
            },
            ViewerEvent::NarrationButton(NarrationButton::Hidden),
        ]
    );
    // no music either, but the room loop still goes quiet
    assert!(viewer.audio().foreground().track().is_none());
    assert_eq!(ambient_volumes(&viewer), vec![0.0, 0.0, 0.0]);

    viewer.toggle_narration();
    assert!(viewer.drain_events().is_empty());
    assert_eq!(viewer.narration_button(), NarrationButton::Hidden);
}

#[test]
fn closing_resumes_the_current_rooms_loop() {
    let t0 = Instant::now();
    let mut viewer = started_viewer(t0);
    click(&mut viewer, ROOM1_TO_ROOM2, t0);
    finish_load(&mut viewer);
    click(&mut viewer, ROOM2_TO_ROOM3, t0);
    finish_load(&mut viewer);
    viewer.frame(t0 + ms(2000));
    assert_eq!(viewer.current_room(), &RoomId::new("room3"));

    click(&mut viewer, ROOM3_STATUE, t0 + ms(2000));
    assert!(viewer.audio().backend().latest(STATUE_MUSIC).unwrap().1.playing);

    let t1 = t0 + ms(3000);
    viewer.close_artifact(t1);
    viewer.frame(t1 + ms(500));
    assert_eq!(ambient_volumes(&viewer), vec![0.0, 0.0, 0.5]);
}

#[test]
fn closing_with_nothing_open_is_harmless() {
    let t0 = Instant::now();
    let mut viewer = started_viewer(t0);
    viewer.frame(t0 + ms(2000));
    let commands = viewer.audio().backend().commands.len();

    viewer.close_artifact(t0 + ms(2000));
    assert!(viewer.drain_events().is_empty());
    assert_eq!(viewer.audio().backend().commands.len(), commands);
    assert_eq!(ambient_volumes(&viewer), vec![0.5, 0.0, 0.0]);
}

#[test]
fn closing_with_nothing_open_keeps_a_pending_crossfade() {
    let t0 = Instant::now();
    let mut viewer = started_viewer(t0);
    viewer.frame(t0 + ms(2000));

    click(&mut viewer, ROOM1_TO_ROOM2, t0 + ms(2000));
    assert!(viewer.is_loading());
    viewer.close_artifact(t0 + ms(2100));
    assert_eq!(finish_load(&mut viewer), LoadOutcome::Entered(RoomId::new("room2")));

    viewer.frame(t0 + ms(10_000));
    assert_eq!(viewer.current_room(), &RoomId::new("room2"));
    assert_eq!(ambient_volumes(&viewer), vec![0.0, 0.5, 0.0]);
}

#[test]
fn failing_music_still_opens_the_view() {
    let t0 = Instant::now();
    let mut viewer = viewer_with(RecordingBackend::failing(&[VASE_MUSIC]), t0);
    viewer.start(t0);
    finish_load(&mut viewer);
    viewer.drain_events();

    click(&mut viewer, ROOM1_VASE, t0);
    let events = viewer.drain_events();
    assert!(matches!(events[0], ViewerEvent::ArtifactOpened { .. }));
    assert!(matches!(
        events[1],
        ViewerEvent::Diagnostic(ViewerError::AssetLoadFailure { .. })
    ));
    assert_eq!(events[2], ViewerEvent::NarrationButton(NarrationButton::Play));
    assert!(viewer.artifact_state() != &ArtifactViewState::Closed);
}

#[test]
fn reopening_stops_previous_narration() {
    init_logging();
    let t0 = Instant::now();
    let mut audio = AudioEngine::new(RecordingBackend::default(), AudioLevels::default());
    _ = audio.add_ambient(ROOM1_AMBIENT);
    let mut view = ArtifactViewController::new();
    let mut out = Vec::new();

    let vase = ArtifactHotspot {
        position: Vec3::ZERO,
        title: Some("Amphora".into()),
        image_url: "/assets/vase.jpg".into(),
        description: String::new(),
        music_url: Some(VASE_MUSIC.into()),
        narration_url: Some(VASE_NARRATION.into()),
    };
    let statue = ArtifactHotspot {
        title: Some("Bronze Runner".into()),
        music_url: Some(STATUE_MUSIC.into()),
        narration_url: None,
        ..vase.clone()
    };

    view.open(vase, &mut audio, &mut out);
    view.toggle_narration(&mut audio, &mut out);
    assert!(audio.narration_playing());

    view.open(statue, &mut audio, &mut out);
    assert!(!audio.narration_playing());
    assert_eq!(view.narration_button(), NarrationButton::Hidden);
    assert_eq!(audio.foreground().volume(), 0.8);
    assert!(audio.backend().latest(VASE_NARRATION).unwrap().1.released);

    view.close(&mut audio, 0, ms(500), t0, &mut out);
    assert!(!view.is_open());
    assert!(audio.backend().misuse.is_empty());
}
