//! src/sphere.rs
//! -------------
//! Sphere as a signed distance field.

use crate::{algebra::Vec3, material::Material, shape::Hit};

#[derive(Clone, Debug)]
pub struct Sphere {
    pub name     : String,
    pub center   : Vec3,
    pub radius   : f64,
    pub material : Material,
}

impl Sphere {
    /// `|p - center| - radius`: zero on the surface, negative inside.
    pub fn distance_to_point(&self, p: Vec3) -> f64 {
        p.distance(self.center) - self.radius
    }

    pub fn hit(&self, p: Vec3) -> Hit {
        Hit { distance: self.distance_to_point(p), color: self.material.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere {
            name: "unit".into(),
            center: Vec3::ZERO,
            radius: 1.0,
            material: Material::new(Vec3(0.0, 0.0, 1.0)),
        }
    }

    #[test]
    fn distance_is_signed() {
        let s = unit_sphere();
        assert_eq!(s.distance_to_point(Vec3(1.0, 0.0, 0.0)), 0.0);
        assert_eq!(s.distance_to_point(Vec3(0.0, 0.0, 0.5)), -0.5);
        assert_eq!(s.distance_to_point(Vec3(0.0, 3.0, 0.0)), 2.0);
    }

    #[test]
    fn hit_carries_base_color() {
        let h = unit_sphere().hit(Vec3(0.0, 3.0, 0.0));
        assert_eq!(h.distance, 2.0);
        assert_eq!(h.color, Vec3(0.0, 0.0, 1.0));
    }
}
