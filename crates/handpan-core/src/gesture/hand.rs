use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::HAND_LANDMARK_COUNT;
use crate::error::{HandpanError, Result};
use crate::geometry::Point2;

/// Hand landmark indices (MediaPipe hand landmark model convention).
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;

    /// Tips of the four non-thumb fingers, index to pinky.
    pub const FINGER_TIPS: [usize; 4] = [INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, RING_FINGER_TIP, PINKY_TIP];
}

/// Which digits are extended, thumb to pinky.
pub type FingersUp = [bool; 5];

/// Build a [`FingersUp`] pattern from 0/1 flags, thumb first.
pub const fn fingers(bits: [u8; 5]) -> FingersUp {
    [bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0, bits[4] != 0]
}

pub const FIST: FingersUp = fingers([0, 0, 0, 0, 0]);
pub const OPEN_PALM: FingersUp = fingers([1, 1, 1, 1, 1]);
/// Thumb and index extended.
pub const PINCH: FingersUp = fingers([1, 1, 0, 0, 0]);
/// Thumb, index and middle extended.
pub const THREE_FINGERS: FingersUp = fingers([1, 1, 1, 0, 0]);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

impl FromStr for Handedness {
    type Err = HandpanError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("left") {
            Ok(Self::Left)
        } else if s.eq_ignore_ascii_case("right") {
            Ok(Self::Right)
        } else {
            Err(HandpanError::InvalidObservation(format!(
                "unknown handedness {s:?}"
            )))
        }
    }
}

/// A single landmark in detector pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn xy(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One detected hand in one frame.
///
/// Construction validates the landmark count, so the accessors can index freely.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub fingers_up: FingersUp,
    pub handedness: Handedness,
    landmarks: Vec<Landmark>,
    pub score: f32,
}

impl HandObservation {
    pub fn new(
        handedness: Handedness,
        fingers_up: FingersUp,
        landmarks: Vec<Landmark>,
        score: f32,
    ) -> Result<Self> {
        if landmarks.len() != HAND_LANDMARK_COUNT {
            return Err(HandpanError::InvalidObservation(format!(
                "expected {HAND_LANDMARK_COUNT} landmarks, got {}",
                landmarks.len()
            )));
        }
        if let Some(i) = landmarks.iter().position(|lm| !lm.xy().is_finite()) {
            return Err(HandpanError::InvalidObservation(format!(
                "landmark {i} is not finite"
            )));
        }
        Ok(Self {
            fingers_up,
            handedness,
            landmarks,
            score,
        })
    }

    /// Build an observation whose finger pattern is derived from its landmarks.
    pub fn from_landmarks(handedness: Handedness, landmarks: Vec<Landmark>, score: f32) -> Result<Self> {
        let mut hand = Self::new(handedness, FIST, landmarks, score)?;
        hand.fingers_up = fingers_up_from_landmarks(handedness, &hand.landmarks);
        Ok(hand)
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn wrist(&self) -> Point2 {
        self.landmarks[landmarks::WRIST].xy()
    }

    pub fn index_tip(&self) -> Point2 {
        self.landmarks[landmarks::INDEX_FINGER_TIP].xy()
    }
}

/// Derive which fingers are extended from a full set of landmarks.
///
/// The thumb counts as up when its tip lies outward of the IP joint along x, which side is
/// outward depending on handedness. The other fingers count as up when the tip is above
/// (smaller y than) the PIP joint two landmarks below it.
pub fn fingers_up_from_landmarks(handedness: Handedness, points: &[Landmark]) -> FingersUp {
    let mut up = FIST;
    if points.len() < HAND_LANDMARK_COUNT {
        return up;
    }

    let tip = points[landmarks::THUMB_TIP].x;
    let ip = points[landmarks::THUMB_IP].x;
    up[0] = match handedness {
        Handedness::Right => tip > ip,
        Handedness::Left => tip < ip,
    };

    for (finger, &tip) in landmarks::FINGER_TIPS.iter().enumerate() {
        up[finger + 1] = points[tip].y < points[tip - 2].y;
    }
    up
}
