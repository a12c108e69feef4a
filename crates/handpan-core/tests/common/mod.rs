#![allow(dead_code)]

use handpan_core::gesture::{landmarks, FingersUp, HandObservation, Handedness, Landmark};

/// Build a hand with every landmark at the wrist, except the index fingertip.
pub fn hand_at(
    handedness: Handedness,
    fingers_up: FingersUp,
    wrist: (f32, f32),
    index_tip: (f32, f32),
) -> HandObservation {
    let mut points = vec![Landmark::new(wrist.0, wrist.1, 0.0); 21];
    points[landmarks::INDEX_FINGER_TIP] = Landmark::new(index_tip.0, index_tip.1, 0.0);
    HandObservation::new(handedness, fingers_up, points, 0.95).unwrap()
}

pub fn hand(handedness: Handedness, fingers_up: FingersUp) -> HandObservation {
    hand_at(handedness, fingers_up, (0.0, 0.0), (0.0, 0.0))
}

/// A plausible upright right hand with only the listed fingers raised.
///
/// Wrist at the bottom, y grows downwards like image coordinates.
pub fn upright_landmarks(handedness: Handedness, up: FingersUp) -> Vec<Landmark> {
    let mut points = vec![Landmark::new(100.0, 200.0, 0.0); 21];
    // Thumb: joints 1..=4 going sideways.
    let outward = match handedness {
        Handedness::Right => 1.0,
        Handedness::Left => -1.0,
    };
    points[3] = Landmark::new(100.0 + outward * 20.0, 170.0, 0.0);
    let thumb_reach = if up[0] { 40.0 } else { 5.0 };
    points[4] = Landmark::new(100.0 + outward * thumb_reach, 165.0, 0.0);

    for (finger, tip) in landmarks::FINGER_TIPS.iter().enumerate() {
        let x = 90.0 + finger as f32 * 10.0;
        points[tip - 2] = Landmark::new(x, 140.0, 0.0);
        let tip_y = if up[finger + 1] { 100.0 } else { 160.0 };
        points[*tip] = Landmark::new(x, tip_y, 0.0);
    }
    points
}
