pub mod classifier;
pub mod hand;

pub use classifier::{GestureClassifier, GestureCommand, GestureState};
pub use hand::{
    fingers, fingers_up_from_landmarks, landmarks, FingersUp, HandObservation, Handedness,
    Landmark, FIST, OPEN_PALM, PINCH, THREE_FINGERS,
};
