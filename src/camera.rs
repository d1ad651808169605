//! Pinhole camera looking down the z axis.

use crate::{algebra::Vec3, ray::Ray};

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Distance along the view axis to the image plane, usually negative.
    pub look_at_depth: f64,
    pub fov: f64,
    angle_to_screen: f64,
}

impl Camera {
    pub fn new(position: Vec3, look_at_depth: f64, fov: f64) -> Self {
        let angle_to_screen = (std::f64::consts::PI * fov / 360.0).tan();
        Self { position, look_at_depth, fov, angle_to_screen }
    }

    pub fn angle_to_screen(&self) -> f64 {
        self.angle_to_screen
    }

    /// Maps screen coordinates in `[-1, 1]` to a world ray.
    ///
    /// `screen_y` grows upwards; the caller is responsible for converting
    /// raster indices (and any jitter) into this space.
    pub fn ray(&self, screen_x: f64, screen_y: f64, aspect: f64) -> Ray {
        let camera_x = screen_x * self.angle_to_screen * aspect;
        let camera_y = screen_y * self.angle_to_screen;
        let direction = Vec3(camera_x, camera_y, self.look_at_depth).normalize();
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_looks_down_depth_axis() {
        let cam = Camera::new(Vec3(0.0, 1.0, 0.0), -1.0, 45.0);
        let r = cam.ray(0.0, 0.0, 2.0);
        assert_eq!(r.origin, Vec3(0.0, 1.0, 0.0));
        assert_eq!(r.direction, Vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn corners_follow_field_of_view() {
        let cam = Camera::new(Vec3::ZERO, -1.0, 90.0);
        assert!((cam.angle_to_screen() - 1.0).abs() < 1e-12);

        let r = cam.ray(1.0, 1.0, 1.0);
        let expected = Vec3(1.0, 1.0, -1.0).normalize();
        assert!((r.direction - expected).norm() < 1e-12);

        let wide = cam.ray(1.0, 0.0, 2.0);
        assert!((wide.direction - Vec3(2.0, 0.0, -1.0).normalize()).norm() < 1e-12);
    }
}
