use crate::{algebra::Vec3, plane::Plane, sphere::Sphere};

/// Result of evaluating one shape at a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f64,
    pub color: Vec3,
}

#[derive(Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape {
    pub fn distance_to_point(&self, p: Vec3) -> f64 {
        match self {
            Self::Sphere(s) => s.distance_to_point(p),
            Self::Plane(pl) => pl.distance_to_point(p),
        }
    }

    pub fn hit(&self, p: Vec3) -> Hit {
        match self {
            Self::Sphere(s) => s.hit(p),
            Self::Plane(pl) => pl.hit(p),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Sphere(s) => &s.name,
            Self::Plane(pl) => &pl.name,
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self { Shape::Sphere(s) }
}

impl From<Plane> for Shape {
    fn from(p: Plane) -> Self { Shape::Plane(p) }
}
