use tracing::{debug, trace};

use crate::consts::DEFAULT_ZOOM_DEAD_ZONE;
use crate::geometry::{angle_between, distance, Point2};

use super::hand::{HandObservation, Handedness, FIST, OPEN_PALM, PINCH, THREE_FINGERS};

/// A discrete command derived from one frame of hand observations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureCommand {
    AdvanceNext,
    AdvancePrevious,
    /// The hands were released; all gesture references were cleared.
    Reset,
    /// Frame-to-frame change of the pinch distance, after the dead zone.
    ZoomBy(i32),
    /// Frame-to-frame wrist movement in detector pixels.
    PanBy { dx: f32, dy: f32 },
}

/// Gesture references that must survive between frames while a pose is held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    /// An advance was already emitted for the current hold.
    pub switched_photo: bool,
    /// Fingertip distance seen on the previous frame of a two-hand pinch.
    pub reference_distance: Option<f32>,
    /// Wrist position seen on the previous frame of a two-hand drag.
    pub last_wrist: Option<Point2>,
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Maps finger-up patterns to commands.
///
/// Pattern matching is exact: a single flipped finger bit from the detector falls through to
/// the no-command or reset branches.
#[derive(Clone, Copy, Debug)]
pub struct GestureClassifier {
    dead_zone: i32,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_DEAD_ZONE)
    }
}

impl GestureClassifier {
    pub fn new(dead_zone: i32) -> Self {
        Self {
            dead_zone: dead_zone.max(0),
        }
    }

    pub fn dead_zone(&self) -> i32 {
        self.dead_zone
    }

    /// Turn a raw distance change into a zoom delta.
    ///
    /// Magnitudes strictly between 0 and the dead zone become 0, the same on both sides;
    /// anything else is truncated toward zero.
    pub fn apply_dead_zone(&self, delta: f32) -> i32 {
        if delta != 0.0 && delta.abs() < self.dead_zone as f32 {
            0
        } else {
            delta.trunc() as i32
        }
    }

    /// Classify one frame. Returns at most one command and the state for the next frame.
    pub fn classify(
        &self,
        hands: &[HandObservation],
        state: &GestureState,
    ) -> (Option<GestureCommand>, GestureState) {
        let mut next = *state;
        let command = match hands {
            [hand] => self.one_hand(hand, &mut next),
            [first, second] => self.two_hands(first, second, &mut next),
            _ => full_reset(&mut next),
        };
        if let Some(cmd) = command {
            debug!(?cmd, hands = hands.len(), "gesture");
        }
        (command, next)
    }

    fn one_hand(&self, hand: &HandObservation, state: &mut GestureState) -> Option<GestureCommand> {
        if hand.fingers_up == THREE_FINGERS {
            if state.switched_photo {
                return None;
            }
            state.switched_photo = true;
            return Some(match hand.handedness {
                Handedness::Left => GestureCommand::AdvanceNext,
                Handedness::Right => GestureCommand::AdvancePrevious,
            });
        }
        if hand.fingers_up == FIST {
            return full_reset(state);
        }
        None
    }

    fn two_hands(
        &self,
        first: &HandObservation,
        second: &HandObservation,
        state: &mut GestureState,
    ) -> Option<GestureCommand> {
        if first.fingers_up == PINCH && second.fingers_up == PINCH {
            return self.pinch_zoom(first, second, state);
        }

        let drag = (first.fingers_up == OPEN_PALM && second.fingers_up == PINCH)
            || (first.fingers_up == PINCH && second.fingers_up == OPEN_PALM);
        if drag {
            return drag_by_wrist(first, state);
        }

        full_reset(state)
    }

    fn pinch_zoom(
        &self,
        first: &HandObservation,
        second: &HandObservation,
        state: &mut GestureState,
    ) -> Option<GestureCommand> {
        let a = first.index_tip();
        let b = second.index_tip();
        let current = distance(a, b);
        trace!(distance = current, angle = angle_between(a, b).floor(), "pinch");

        let previous = state.reference_distance.replace(current)?;
        Some(GestureCommand::ZoomBy(self.apply_dead_zone(current - previous)))
    }
}

/// The wrist of the first listed hand is the drag reference, whichever pose it holds.
fn drag_by_wrist(first: &HandObservation, state: &mut GestureState) -> Option<GestureCommand> {
    let wrist = first.wrist();
    let previous = state.last_wrist.replace(wrist)?;
    let moved = wrist - previous;
    Some(GestureCommand::PanBy {
        dx: moved.x,
        dy: moved.y,
    })
}

fn full_reset(state: &mut GestureState) -> Option<GestureCommand> {
    if state.is_idle() {
        return None;
    }
    *state = GestureState::default();
    Some(GestureCommand::Reset)
}
