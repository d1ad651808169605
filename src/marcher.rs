//! Sphere tracing against the scene's signed distance fields.
//!
//! Every function here is total: marching loops are bounded by
//! `MarchConfig::max_steps` and nothing returns an error.
//!
//! Misses are detected with an exact comparison against
//! `MarchConfig::max_distance`. [`scene_distance`] starts from that value
//! and only lowers it, so it comes back unchanged exactly when no shape is
//! closer. Keep the `==`: a `>=` threshold would change which far rays
//! count as misses.

use crate::{
    algebra::Vec3,
    config::MarchConfig,
    ray::Ray,
    scene::Scene,
    shape::{Hit, Shape},
};
use log::trace;

/// How a primary march ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum March {
    /// Came within `min_hit_distance` of a surface at `position`.
    Hit { position: Vec3, steps: u32 },
    /// Scene distance hit the `max_distance` sentinel.
    Escaped { steps: u32 },
    /// Ran out of steps without either.
    Exhausted,
}

/// Smallest distance from `p` to any shape, or exactly `cfg.max_distance`
/// if the scene is empty or everything is at least that far away.
pub fn scene_distance(p: Vec3, scene: &Scene, cfg: &MarchConfig) -> f64 {
    let mut closest = cfg.max_distance;
    for shape in &scene.shapes {
        let d = shape.distance_to_point(p);
        if d < closest {
            closest = d;
        }
    }
    closest
}

pub fn march(ray: &Ray, scene: &Scene, cfg: &MarchConfig) -> March {
    let mut traveled = 0.0;

    for step in 0..cfg.max_steps {
        let position = ray.at(traveled);
        let d = scene_distance(position, scene, cfg);

        if d == cfg.max_distance {
            return March::Escaped { steps: step + 1 };
        }
        if d < cfg.min_hit_distance {
            return March::Hit { position, steps: step + 1 };
        }
        traveled += d;
    }

    trace!("primary ray {:?} exhausted {} steps", ray.direction, cfg.max_steps);
    March::Exhausted
}

/// Color seen along `ray`. Escaped and exhausted rays are black.
pub fn ray_march(ray: &Ray, scene: &Scene, cfg: &MarchConfig) -> Vec3 {
    match march(ray, scene, cfg) {
        March::Hit { position, .. } => shade(position, scene, cfg),
        March::Escaped { .. } | March::Exhausted => Vec3::ZERO,
    }
}

/// Nearest shape at `p` together with its hit.
pub fn nearest_hit<'a>(p: Vec3, scene: &'a Scene, cfg: &MarchConfig) -> Option<(&'a Shape, Hit)> {
    let mut best: Option<(&Shape, Hit)> = None;
    let mut closest = cfg.max_distance;
    for shape in &scene.shapes {
        let hit = shape.hit(p);
        if hit.distance < closest {
            closest = hit.distance;
            best = Some((shape, hit));
        }
    }
    best
}

/// Diffuse shading of the surface point `p`.
pub fn shade(p: Vec3, scene: &Scene, cfg: &MarchConfig) -> Vec3 {
    let Some((shape, hit)) = nearest_hit(p, scene, cfg) else {
        return Vec3::ZERO;
    };

    let n = estimate_normal(p, shape, cfg.normal_epsilon);

    let mut total = 0.0;
    for light in &scene.lights {
        let light_dir = light.pos.sub(p).normalize();
        let shadow_ray = Ray::new(p.add(light_dir.scale(cfg.shadow_bias)), light_dir);
        let shadow = shadow_factor(&shadow_ray, scene, cfg);
        total += (n.dot(light_dir) * shadow).clamp(0.0, 1.0);
    }

    hit.color.scale(total.clamp(0.0, 1.0))
}

/// Central-difference gradient of a single shape's SDF.
///
/// Not guarded: a zero gradient normalizes to NaN and is passed on.
pub fn estimate_normal(p: Vec3, shape: &Shape, epsilon: f64) -> Vec3 {
    let f = |q: Vec3| shape.distance_to_point(q);
    let dx = Vec3(epsilon, 0.0, 0.0);
    let dy = Vec3(0.0, epsilon, 0.0);
    let dz = Vec3(0.0, 0.0, epsilon);
    Vec3(
        f(p + dx) - f(p - dx),
        f(p + dy) - f(p - dy),
        f(p + dz) - f(p - dz),
    )
    .normalize()
}

/// Light reaching the start of `ray` in `[0, 1]`: 0 when blocked, softened
/// by how closely the ray grazes occluders on its way out.
///
/// Running out of steps counts as fully lit.
pub fn shadow_factor(ray: &Ray, scene: &Scene, cfg: &MarchConfig) -> f64 {
    let mut shadow: f64 = 1.0;
    let mut traveled = 0.0;

    for _ in 0..cfg.max_steps {
        let d = scene_distance(ray.at(traveled), scene, cfg);

        if d < cfg.min_hit_distance {
            return 0.0;
        }
        if d == cfg.max_distance {
            return shadow.clamp(0.0, 1.0);
        }
        // d / 0 on the first step would be +inf, which never lowers the
        // minimum.
        if traveled > 0.0 {
            shadow = shadow.min(d * cfg.sun_size / traveled);
        }
        traveled += d;
    }

    1.0
}
