//! Sphere-tracing renderer for scenes built from signed distance fields.
//!
//! A frame is produced by [`renderer::render`]: every pixel is sampled
//! through the [`camera::Camera`], each sample is marched through the
//! [`scene::Scene`] by [`marcher::ray_march`], and the samples are averaged.

pub mod algebra;
pub mod camera;
pub mod config;
pub mod error;
pub mod light;
pub mod marcher;
pub mod material;
pub mod plane;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod shape;
pub mod sphere;

pub use error::{Error, Result};
