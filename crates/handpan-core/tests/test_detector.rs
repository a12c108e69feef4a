mod common;

use std::io::Cursor;

use image::RgbImage;
use tempfile::TempDir;

use common::{hand, hand_at, upright_landmarks};
use handpan_core::detector::{
    FrameRecord, HandDetector, HandRecord, ReplayDetector, SessionRecorder,
};
use handpan_core::error::HandpanError;
use handpan_core::gesture::{
    fingers, fingers_up_from_landmarks, Handedness, Landmark, FIST, OPEN_PALM, PINCH,
    THREE_FINGERS,
};

fn landmarks_json(count: usize) -> String {
    let points: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"x":{i}.0,"y":{}.5}}"#, i * 2))
        .collect();
    format!("[{}]", points.join(","))
}

fn blank() -> RgbImage {
    RgbImage::new(4, 4)
}

// ---------------------------------------------------------------------------
// Wire records
// ---------------------------------------------------------------------------

#[test]
fn test_parse_frame_record_with_flags() {
    let line = format!(
        r#"{{"hands":[{{"handedness":"Left","score":0.97,"fingers_up":[1,1,1,0,0],"landmarks":{}}}]}}"#,
        landmarks_json(21)
    );
    let record: FrameRecord = serde_json::from_str(&line).unwrap();
    let hands = record.into_observations(0.8).unwrap();
    assert_eq!(hands.len(), 1);
    assert_eq!(hands[0].handedness, Handedness::Left);
    assert_eq!(hands[0].fingers_up, THREE_FINGERS);
    assert_eq!(hands[0].wrist().x, 0.0);
    assert_eq!(hands[0].index_tip().y, 16.5);
}

#[test]
fn test_handedness_is_case_insensitive() {
    let record = HandRecord {
        handedness: "right".into(),
        score: 1.0,
        landmarks: vec![Landmark::default(); 21],
        fingers_up: Some(vec![0, 0, 0, 0, 0]),
    };
    assert_eq!(record.into_observation().unwrap().handedness, Handedness::Right);
}

#[test]
fn test_missing_fingers_derived_from_landmarks() {
    for (handedness, pattern) in [
        (Handedness::Left, THREE_FINGERS),
        (Handedness::Right, PINCH),
        (Handedness::Right, OPEN_PALM),
        (Handedness::Left, FIST),
        (Handedness::Left, fingers([0, 1, 0, 0, 1])),
    ] {
        let record = HandRecord {
            handedness: handedness.to_string(),
            score: 0.9,
            landmarks: upright_landmarks(handedness, pattern),
            fingers_up: None,
        };
        let hand = record.into_observation().unwrap();
        assert_eq!(hand.fingers_up, pattern, "{handedness} {pattern:?}");
    }
}

#[test]
fn test_fingers_from_too_few_landmarks_is_fist() {
    let points = vec![Landmark::new(1.0, 1.0, 0.0); 5];
    assert_eq!(fingers_up_from_landmarks(Handedness::Right, &points), FIST);
}

#[test]
fn test_any_invalid_hand_fails_the_frame() {
    let good = format!(
        r#"{{"handedness":"Right","fingers_up":[1,1,0,0,0],"landmarks":{}}}"#,
        landmarks_json(21)
    );
    for bad in [
        format!(r#"{{"handedness":"Left","landmarks":{}}}"#, landmarks_json(20)),
        format!(r#"{{"handedness":"Sideways","landmarks":{}}}"#, landmarks_json(21)),
        format!(
            r#"{{"handedness":"Left","fingers_up":[1,2,0,0,0],"landmarks":{}}}"#,
            landmarks_json(21)
        ),
        format!(
            r#"{{"handedness":"Left","fingers_up":[1,1],"landmarks":{}}}"#,
            landmarks_json(21)
        ),
    ] {
        let line = format!(r#"{{"hands":[{bad},{good}]}}"#);
        let record: FrameRecord = serde_json::from_str(&line).unwrap();
        assert!(record.into_observations(0.5).is_err(), "{bad}");
    }

    let line = format!(r#"{{"hands":[{good}]}}"#);
    let record: FrameRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(record.into_observations(0.5).unwrap()[0].fingers_up, PINCH);
}

#[test]
fn test_reported_error_fails_the_frame() {
    let record: FrameRecord =
        serde_json::from_str(r#"{"hands":[],"error":"model hiccup"}"#).unwrap();
    match record.into_observations(0.8) {
        Err(HandpanError::Detector(message)) => assert_eq!(message, "model hiccup"),
        other => panic!("expected a detector error, got {other:?}"),
    }
}

#[test]
fn test_low_confidence_malformed_hand_is_just_dropped() {
    let line = format!(
        r#"{{"hands":[{{"handedness":"Sideways","score":0.1,"landmarks":{}}}]}}"#,
        landmarks_json(3)
    );
    let record: FrameRecord = serde_json::from_str(&line).unwrap();
    assert!(record.into_observations(0.8).unwrap().is_empty());
}

#[test]
fn test_non_finite_landmark_rejected() {
    let mut points = vec![Landmark::default(); 21];
    points[8].x = f32::NAN;
    let record = HandRecord {
        handedness: "Left".into(),
        score: 1.0,
        landmarks: points,
        fingers_up: Some(vec![1, 1, 0, 0, 0]),
    };
    assert!(matches!(
        record.into_observation(),
        Err(HandpanError::InvalidObservation(_))
    ));
}

#[test]
fn test_confidence_filter() {
    let mut low = HandRecord::from(&hand(Handedness::Left, PINCH));
    low.score = 0.5;
    let mut high = HandRecord::from(&hand(Handedness::Right, PINCH));
    high.score = 0.8;
    let record = FrameRecord {
        hands: vec![low, high],
        error: None,
    };
    let hands = record.into_observations(0.8).unwrap();
    assert_eq!(hands.len(), 1);
    assert_eq!(hands[0].handedness, Handedness::Right);
}

#[test]
fn test_score_defaults_to_one() {
    let line = format!(
        r#"{{"hands":[{{"handedness":"Left","landmarks":{}}}]}}"#,
        landmarks_json(21)
    );
    let record: FrameRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(record.hands[0].score, 1.0);
    assert!(record.error.is_none());
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

#[test]
fn test_replay_skips_comments_and_blank_lines() {
    let text = "# recorded session\n\n{\"hands\":[]}\n   \n{}\n";
    let replay = ReplayDetector::from_reader(Cursor::new(text), 0.8).unwrap();
    assert_eq!(replay.len(), 2);
    assert_eq!(replay.remaining(), 2);
}

#[test]
fn test_replay_reports_bad_line_number() {
    let text = "{\"hands\":[]}\n# ok\nnot json\n";
    let err = ReplayDetector::from_reader(Cursor::new(text), 0.8)
        .err()
        .unwrap();
    match err {
        HandpanError::Detector(msg) => assert!(msg.contains("line 3"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_replay_exhausts() {
    let records = vec![
        FrameRecord::from_observations(&[hand(Handedness::Left, FIST)]),
        FrameRecord::default(),
    ];
    let mut replay = ReplayDetector::from_records(records, 0.8);

    assert_eq!(replay.detect(&blank()).unwrap().len(), 1);
    assert!(replay.detect(&blank()).unwrap().is_empty());
    assert_eq!(replay.remaining(), 0);
    assert!(matches!(
        replay.detect(&blank()),
        Err(HandpanError::ReplayExhausted { frames: 2 })
    ));
}

#[test]
fn test_replay_looping() {
    let records = vec![
        FrameRecord::from_observations(&[hand(Handedness::Left, FIST)]),
        FrameRecord::from_observations(&[
            hand(Handedness::Left, PINCH),
            hand(Handedness::Right, PINCH),
        ]),
    ];
    let mut replay = ReplayDetector::from_records(records, 0.8).looping(true);
    let counts: Vec<usize> = (0..5)
        .map(|_| replay.detect(&blank()).unwrap().len())
        .collect();
    assert_eq!(counts, vec![1, 2, 1, 2, 1]);
}

#[test]
fn test_empty_looping_replay_still_exhausts() {
    let mut replay = ReplayDetector::from_records(Vec::new(), 0.8).looping(true);
    assert!(replay.is_empty());
    assert!(replay.detect(&blank()).is_err());
}

#[test]
fn test_recorder_output_replays() {
    let frames = vec![
        vec![hand_at(Handedness::Left, PINCH, (10.0, 20.0), (30.0, 40.0))],
        vec![],
        vec![
            hand(Handedness::Right, OPEN_PALM),
            hand(Handedness::Left, PINCH),
        ],
    ];

    let mut recorder = SessionRecorder::new(Vec::new());
    for hands in &frames {
        recorder.record(hands).unwrap();
    }
    assert_eq!(recorder.frames(), 3);
    let bytes = recorder.finish().unwrap();

    let mut replay = ReplayDetector::from_reader(Cursor::new(bytes), 0.0).unwrap();
    for expected in &frames {
        assert_eq!(&replay.detect(&blank()).unwrap(), expected);
    }
}

#[test]
fn test_recorder_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.jsonl");

    let mut recorder = SessionRecorder::create(&path).unwrap();
    recorder.record(&[hand(Handedness::Left, THREE_FINGERS)]).unwrap();
    recorder.finish().unwrap();

    let mut replay = ReplayDetector::open(&path, 0.8).unwrap();
    let hands = replay.detect(&blank()).unwrap();
    assert_eq!(hands[0].fingers_up, THREE_FINGERS);
}
