use crate::algebra::Vec3;

/// Flat base color returned for every hit on a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
}

impl Material {
    /// Used when a scene references a material it never defines.
    pub const FALLBACK: Material = Material { color: Vec3(1.0, 0.0, 1.0) };

    pub fn new(color: Vec3) -> Self {
        Self { color }
    }
}
