use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Builds a rect from two arbitrary corners, normalizing min/max.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn union(&self, other: &Rect) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Shrinks the rect by `amount` on every side. Collapses to the center
    /// point if the rect is too small.
    pub fn inset(&self, amount: f32) -> Self {
        let shrunk = Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        };
        if shrunk.min.x > shrunk.max.x || shrunk.min.y > shrunk.max.y {
            let c = self.center();
            Self { min: c, max: c }
        } else {
            shrunk
        }
    }
}

/// Calculates the two control points for a cubic Bezier curve connecting `start` to `end`.
///
/// This assumes a horizontal flow (left-to-right).
pub fn calculate_bezier_points(start: Vec2, end: Vec2) -> (Vec2, Vec2) {
    let dist = start.distance(end);
    let control_dist = (dist * 0.5).min(150.0);
    let cp1 = start + Vec2::new(control_dist, 0.0);
    let cp2 = end - Vec2::new(control_dist, 0.0);
    (cp1, cp2)
}
