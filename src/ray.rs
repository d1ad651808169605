//! Ray defined as r(t) = origin + t * direction.

use crate::algebra::Vec3;

/// Direction is expected to be unit length for marching, but this is not
/// enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point reached after travelling `t` along the ray.
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin.add(self.direction.scale(t))
    }
}
