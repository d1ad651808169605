use crate::algebra::Vec3;

/// Point light. Only its position matters: no intensity, no falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub pos: Vec3,
}
