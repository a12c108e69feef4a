mod common;

use image::RgbImage;

use common::{hand, hand_at};
use handpan_core::camera::{BlankFrameSource, FrameSource};
use handpan_core::detector::{FrameRecord, HandDetector, HandRecord, ReplayDetector};
use handpan_core::error::{HandpanError, Result};
use handpan_core::gesture::{
    GestureClassifier, GestureCommand, HandObservation, Handedness, Landmark, FIST, OPEN_PALM,
    PINCH, THREE_FINGERS,
};
use handpan_core::tracking::GestureLoop;

/// Fails every other capture.
struct FlakyCamera {
    calls: u32,
}

impl FrameSource for FlakyCamera {
    fn name(&self) -> String {
        "Flaky".into()
    }

    fn capture(&mut self) -> Result<RgbImage> {
        self.calls += 1;
        if self.calls % 2 == 0 {
            Err(HandpanError::Camera("no frame".into()))
        } else {
            Ok(RgbImage::new(8, 8))
        }
    }
}

/// Plays scripted detector results, including failures.
struct ScriptedDetector {
    script: Vec<Result<Vec<HandObservation>>>,
}

impl HandDetector for ScriptedDetector {
    fn name(&self) -> String {
        "Scripted".into()
    }

    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<HandObservation>> {
        if self.script.is_empty() {
            return Ok(Vec::new());
        }
        self.script.remove(0)
    }
}

fn replay_loop(frames: Vec<Vec<HandObservation>>) -> GestureLoop {
    let records = frames
        .iter()
        .map(|hands| FrameRecord::from_observations(hands))
        .collect();
    GestureLoop::new(
        Box::new(BlankFrameSource::new(16, 16)),
        Box::new(ReplayDetector::from_records(records, 0.8)),
        GestureClassifier::default(),
    )
}

fn run_to_end(mut gestures: GestureLoop) -> Vec<GestureCommand> {
    let mut commands = Vec::new();
    loop {
        match gestures.step() {
            Ok(outcome) => commands.extend(outcome.command),
            Err(HandpanError::ReplayExhausted { .. }) => return commands,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

#[test]
fn test_replay_drives_commands() {
    let left_three = vec![hand(Handedness::Left, THREE_FINGERS)];
    let drag = |x: f32| {
        vec![
            hand_at(Handedness::Right, OPEN_PALM, (x, 50.0), (0.0, 0.0)),
            hand_at(Handedness::Left, PINCH, (0.0, 0.0), (0.0, 0.0)),
        ]
    };
    let frames = vec![
        left_three.clone(),
        left_three.clone(),
        left_three,
        vec![hand(Handedness::Left, FIST)],
        drag(100.0),
        drag(110.0),
        vec![],
    ];

    let commands = run_to_end(replay_loop(frames));
    assert_eq!(
        commands,
        vec![
            GestureCommand::AdvanceNext,
            GestureCommand::Reset,
            GestureCommand::PanBy { dx: 10.0, dy: 0.0 },
            GestureCommand::Reset,
        ]
    );
}

#[test]
fn test_outcome_carries_frame_and_hands() {
    let mut gestures = replay_loop(vec![vec![hand(Handedness::Right, THREE_FINGERS)]]);
    let outcome = gestures.step().unwrap();
    let frame = outcome.frame.unwrap();
    assert_eq!(frame.dimensions(), (16, 16));
    assert_eq!(outcome.hands.len(), 1);
    assert_eq!(outcome.command, Some(GestureCommand::AdvancePrevious));
    assert_eq!(gestures.frames(), 1);
    assert!(gestures.state().switched_photo);
}

#[test]
fn test_exhausted_replay_is_an_error() {
    let mut gestures = replay_loop(vec![]);
    assert!(matches!(
        gestures.step(),
        Err(HandpanError::ReplayExhausted { frames: 0 })
    ));
}

#[test]
fn test_camera_failure_skips_frame() {
    let detector = ScriptedDetector {
        script: vec![
            Ok(vec![hand(Handedness::Left, THREE_FINGERS)]),
            Ok(vec![hand(Handedness::Left, THREE_FINGERS)]),
        ],
    };
    let mut gestures = GestureLoop::new(
        Box::new(FlakyCamera { calls: 0 }),
        Box::new(detector),
        GestureClassifier::default(),
    );

    let first = gestures.step().unwrap();
    assert_eq!(first.command, Some(GestureCommand::AdvanceNext));

    let dropped = gestures.step().unwrap();
    assert!(dropped.frame.is_none());
    assert!(dropped.command.is_none());
    assert_eq!(gestures.frames(), 1);

    // The hold survives the dropped frame, so no second advance.
    let third = gestures.step().unwrap();
    assert!(third.command.is_none());
    assert!(gestures.state().switched_photo);
}

#[test]
fn test_detector_failure_keeps_state() {
    let pinch = || {
        vec![
            hand_at(Handedness::Left, PINCH, (0.0, 0.0), (0.0, 0.0)),
            hand_at(Handedness::Right, PINCH, (0.0, 0.0), (100.0, 0.0)),
        ]
    };
    let detector = ScriptedDetector {
        script: vec![
            Ok(pinch()),
            Err(HandpanError::DetectorTimeout { millis: 2000 }),
            Ok(pinch()),
        ],
    };
    let mut gestures = GestureLoop::new(
        Box::new(BlankFrameSource::new(8, 8)),
        Box::new(detector),
        GestureClassifier::default(),
    );

    assert!(gestures.step().unwrap().command.is_none());
    let state = *gestures.state();
    assert_eq!(state.reference_distance, Some(100.0));

    let failed = gestures.step().unwrap();
    assert!(failed.frame.is_some());
    assert!(failed.hands.is_empty());
    assert!(failed.command.is_none());
    assert_eq!(gestures.state(), &state);

    // The pinch reference is still there, so the hold continues with a zero delta.
    let resumed = gestures.step().unwrap();
    assert_eq!(resumed.command, Some(GestureCommand::ZoomBy(0)));
}

fn records_loop(records: Vec<FrameRecord>) -> GestureLoop {
    GestureLoop::new(
        Box::new(BlankFrameSource::new(16, 16)),
        Box::new(ReplayDetector::from_records(records, 0.8)),
        GestureClassifier::default(),
    )
}

#[test]
fn test_detector_reported_error_keeps_pinch_hold() {
    let pinch = FrameRecord::from_observations(&[
        hand_at(Handedness::Left, PINCH, (0.0, 0.0), (0.0, 0.0)),
        hand_at(Handedness::Right, PINCH, (0.0, 0.0), (100.0, 0.0)),
    ]);
    let hiccup = FrameRecord {
        hands: Vec::new(),
        error: Some("model hiccup".into()),
    };
    let mut gestures = records_loop(vec![pinch.clone(), hiccup, pinch]);

    assert!(gestures.step().unwrap().command.is_none());
    let state = *gestures.state();
    assert_eq!(state.reference_distance, Some(100.0));

    let skipped = gestures.step().unwrap();
    assert!(skipped.command.is_none());
    assert!(skipped.hands.is_empty());
    assert_eq!(gestures.state(), &state);

    let resumed = gestures.step().unwrap();
    assert_eq!(resumed.command, Some(GestureCommand::ZoomBy(0)));
}

#[test]
fn test_malformed_partner_hand_skips_frame() {
    let broken = HandRecord {
        handedness: "Right".into(),
        score: 0.99,
        landmarks: vec![Landmark::default(); 5],
        fingers_up: Some(vec![1, 1, 0, 0, 0]),
    };
    let mixed = FrameRecord {
        hands: vec![HandRecord::from(&hand(Handedness::Left, THREE_FINGERS)), broken],
        error: None,
    };
    let mut gestures = records_loop(vec![mixed]);

    let outcome = gestures.step().unwrap();
    assert!(outcome.command.is_none());
    assert!(outcome.hands.is_empty());
    assert!(gestures.state().is_idle());
}

#[test]
fn test_describe_names_both_ends() {
    let gestures = replay_loop(vec![vec![]]);
    assert_eq!(gestures.describe(), "Blank 16x16 / Replay (1 frames)");
}

#[test]
fn test_from_config_with_replay_needs_no_camera() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("session.jsonl");
    let mut recorder = handpan_core::detector::SessionRecorder::create(&path).unwrap();
    recorder.record(&[hand(Handedness::Left, THREE_FINGERS)]).unwrap();
    recorder.finish().unwrap();

    let mut config = handpan_core::config::AppConfig::default();
    config.detector.replay = Some(path);
    config.camera.width = 32;
    config.camera.height = 24;

    let mut gestures = GestureLoop::from_config(&config).unwrap();
    let outcome = gestures.step().unwrap();
    assert_eq!(outcome.frame.unwrap().dimensions(), (32, 24));
    assert_eq!(outcome.command, Some(GestureCommand::AdvanceNext));
}

#[test]
fn test_from_config_replay_loop_starts_over() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("session.jsonl");
    let mut recorder = handpan_core::detector::SessionRecorder::create(&path).unwrap();
    recorder.record(&[hand(Handedness::Left, THREE_FINGERS)]).unwrap();
    recorder.record(&[hand(Handedness::Left, FIST)]).unwrap();
    recorder.finish().unwrap();

    let mut config = handpan_core::config::AppConfig::default();
    config.detector.replay = Some(path);
    config.detector.replay_loop = true;

    let mut gestures = GestureLoop::from_config(&config).unwrap();
    let commands: Vec<Option<GestureCommand>> = (0..4)
        .map(|_| gestures.step().unwrap().command)
        .collect();
    assert_eq!(
        commands,
        vec![
            Some(GestureCommand::AdvanceNext),
            Some(GestureCommand::Reset),
            Some(GestureCommand::AdvanceNext),
            Some(GestureCommand::Reset),
        ]
    );
}
