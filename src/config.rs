use serde::Deserialize;

use crate::error::{Error, Result};

/// Tunables for the sphere tracer. Passed by reference into every march.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    pub max_steps: u32,
    /// Also the "nothing nearby" sentinel returned by the scene distance.
    pub max_distance: f64,
    pub min_hit_distance: f64,
    /// Step of the central differences used for normals.
    pub normal_epsilon: f64,
    /// How far along the light direction shadow rays start.
    pub shadow_bias: f64,
    /// Penumbra hardness; larger is harder.
    pub sun_size: f64,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_distance: 1000.0,
            min_hit_distance: 0.001,
            normal_epsilon: 0.1,
            shadow_bias: 0.01,
            sun_size: 8.0,
        }
    }
}

impl MarchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::InvalidConfig("march.max_steps must be at least 1".into()));
        }
        let positive = [
            ("max_distance", self.max_distance),
            ("min_hit_distance", self.min_hit_distance),
            ("normal_epsilon", self.normal_epsilon),
            ("shadow_bias", self.shadow_bias),
            ("sun_size", self.sun_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "march.{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.min_hit_distance >= self.max_distance {
            return Err(Error::InvalidConfig(
                "march.min_hit_distance must be below march.max_distance".into(),
            ));
        }
        Ok(())
    }
}

/// Frame-level settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    /// Seed for the antialiasing jitter; drawn at random when absent.
    pub seed: Option<u64>,
    /// When off, each pixel gets a single sample through its center.
    pub jitter: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            samples: 100,
            seed: None,
            jitter: true,
        }
    }
}

impl RenderConfig {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Samples actually traced per pixel.
    pub fn effective_samples(&self) -> u32 {
        if self.jitter { self.samples } else { 1 }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig("width and height must be positive".into()));
        }
        if self.samples == 0 {
            return Err(Error::InvalidConfig("samples must be at least 1".into()));
        }
        Ok(())
    }
}
