use serde::{Deserialize, Serialize};

use crate::error::{HandpanError, Result};
use crate::gesture::{FingersUp, HandObservation, Handedness, Landmark};

/// One line of detector output: every hand found in a single frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(default)]
    pub hands: Vec<HandRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A hand as it appears on the wire, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub handedness: String,
    #[serde(default = "full_score")]
    pub score: f32,
    pub landmarks: Vec<Landmark>,
    /// 0/1 flags, thumb first. Derived from the landmarks when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingers_up: Option<Vec<u8>>,
}

fn full_score() -> f32 {
    1.0
}

impl HandRecord {
    pub fn into_observation(self) -> Result<HandObservation> {
        let handedness: Handedness = self.handedness.parse()?;
        match self.fingers_up {
            Some(flags) => {
                let fingers_up = parse_flags(&flags)?;
                HandObservation::new(handedness, fingers_up, self.landmarks, self.score)
            }
            None => HandObservation::from_landmarks(handedness, self.landmarks, self.score),
        }
    }
}

impl From<&HandObservation> for HandRecord {
    fn from(hand: &HandObservation) -> Self {
        Self {
            handedness: hand.handedness.to_string(),
            score: hand.score,
            landmarks: hand.landmarks().to_vec(),
            fingers_up: Some(hand.fingers_up.iter().map(|&up| u8::from(up)).collect()),
        }
    }
}

fn parse_flags(flags: &[u8]) -> Result<FingersUp> {
    let flags: [u8; 5] = flags.try_into().map_err(|_| {
        HandpanError::InvalidObservation(format!("expected 5 finger flags, got {}", flags.len()))
    })?;
    let mut up = [false; 5];
    for (slot, flag) in up.iter_mut().zip(flags) {
        *slot = match flag {
            0 => false,
            1 => true,
            other => {
                return Err(HandpanError::InvalidObservation(format!(
                    "finger flag must be 0 or 1, got {other}"
                )))
            }
        };
    }
    Ok(up)
}

impl FrameRecord {
    pub fn from_observations(hands: &[HandObservation]) -> Self {
        Self {
            hands: hands.iter().map(HandRecord::from).collect(),
            error: None,
        }
    }

    /// Validate every hand and keep those at or above `confidence`.
    ///
    /// A reported error or any malformed hand fails the whole frame, so a partial frame
    /// never reaches the classifier as if it were complete.
    pub fn into_observations(self, confidence: f32) -> Result<Vec<HandObservation>> {
        if let Some(error) = self.error {
            return Err(HandpanError::Detector(error));
        }
        self.hands
            .into_iter()
            .filter(|hand| hand.score >= confidence)
            .map(HandRecord::into_observation)
            .collect()
    }
}
