use std::f32::consts::TAU;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point (or displacement) in 2-D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Angle in degrees, in `[0, 360)`, from the direction of `p2` to the direction of `p1`,
/// both measured from the origin.
pub fn angle_between(p1: Point2, p2: Point2) -> f32 {
    let a1 = p1.y.atan2(p1.x);
    let a2 = p2.y.atan2(p2.x);
    let degrees = (a1 - a2).rem_euclid(TAU).to_degrees();
    // rem_euclid can round up to exactly TAU for tiny negative differences.
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Straight-line distance between two points.
pub fn distance(p1: Point2, p2: Point2) -> f32 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}
