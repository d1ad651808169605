use crate::algebra::Vec3;
use crate::material::Material;
use crate::shape::Hit;
use serde::Deserialize;

/// How the anchor point enters the plane's distance function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneSdf {
    /// `dot(p + point, normal)`. Existing scenes were authored against this
    /// form, so it stays the default even though it mirrors the anchor.
    #[default]
    Anchored,
    /// `dot(p - point, normal)`, the plane that actually passes through
    /// `point`.
    Offset,
}

/// Infinite plane. `normal` is expected to be unit length.
#[derive(Clone, Debug)]
pub struct Plane {
    pub name    : String,
    pub point   : Vec3,
    pub normal  : Vec3,
    pub sdf     : PlaneSdf,
    pub material: Material,
}

impl Plane {
    pub fn distance_to_point(&self, p: Vec3) -> f64 {
        match self.sdf {
            PlaneSdf::Anchored => p.add(self.point).dot(self.normal),
            PlaneSdf::Offset => p.sub(self.point).dot(self.normal),
        }
    }

    pub fn hit(&self, p: Vec3) -> Hit {
        Hit { distance: self.distance_to_point(p), color: self.material.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(point: Vec3, normal: Vec3, sdf: PlaneSdf) -> Plane {
        Plane {
            name: "floor".into(),
            point,
            normal,
            sdf,
            material: Material::FALLBACK,
        }
    }

    #[test]
    fn distance_through_origin() {
        let floor = plane(Vec3::ZERO, Vec3(0.0, 1.0, 0.0), PlaneSdf::Anchored);
        let wall = plane(Vec3::ZERO, Vec3(1.0, 0.0, 0.0), PlaneSdf::Anchored);
        let cases = [
            (&floor, Vec3(1.0, 0.0, 0.0), 0.0),
            (&floor, Vec3(0.0, 1.0, 0.0), 1.0),
            (&floor, Vec3(0.0, 2.0, 0.0), 2.0),
            (&floor, Vec3(0.0, 0.0, 1.0), 0.0),
            (&wall, Vec3(1.0, 0.0, 0.0), 1.0),
            (&wall, Vec3(2.0, 0.0, 0.0), 2.0),
            (&wall, Vec3(0.0, 1.0, 0.0), 0.0),
            (&wall, Vec3(0.0, 0.0, 1.0), 0.0),
        ];
        for (pl, p, want) in cases {
            assert_eq!(pl.distance_to_point(p), want, "{:?} at {:?}", pl.normal, p);
        }
    }

    #[test]
    fn anchored_adds_the_anchor() {
        let pl = plane(Vec3(0.0, 1.0, 0.0), Vec3(0.0, 1.0, 0.0), PlaneSdf::Anchored);
        assert_eq!(pl.distance_to_point(Vec3(0.0, 3.0, 0.0)), 4.0);
        assert_eq!(pl.distance_to_point(Vec3(0.0, -1.0, 0.0)), 0.0);
    }

    #[test]
    fn offset_passes_through_the_anchor() {
        let pl = plane(Vec3(0.0, 1.0, 0.0), Vec3(0.0, 1.0, 0.0), PlaneSdf::Offset);
        assert_eq!(pl.distance_to_point(Vec3(0.0, 3.0, 0.0)), 2.0);
        assert_eq!(pl.distance_to_point(Vec3(5.0, 1.0, 2.0)), 0.0);
        assert_eq!(pl.distance_to_point(Vec3(0.0, 0.5, 0.0)), -0.5);
    }

    #[test]
    fn hit_uses_material_color() {
        let pl = plane(Vec3::ZERO, Vec3(0.0, 1.0, 0.0), PlaneSdf::Anchored);
        let h = pl.hit(Vec3(0.0, 2.0, 0.0));
        assert_eq!(h.distance, 2.0);
        assert_eq!(h.color, Vec3(1.0, 0.0, 1.0));
    }
}
