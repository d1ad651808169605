use crate::{
    algebra::Vec3,
    error::Result,
    marcher::ray_march,
    scene::SceneSetup,
};
use image::{Rgb, RgbImage};
use indicatif::ProgressBar;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::{fs, path::Path, time::Instant};

/// Row-major linear colors, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec3>,
}

impl Frame {
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgb(quantize(self.get(x, y)));
        }
        img
    }

    /// Writes the frame; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        self.to_rgb_image().save(path)?;
        Ok(())
    }
}

/// Running sum of sample colors for one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    sum: Vec3,
    count: u32,
}

impl Accumulator {
    pub fn add(&mut self, c: Vec3) {
        self.sum = self.sum.add(c);
        self.count += 1;
    }

    pub fn merge(mut self, other: Accumulator) -> Accumulator {
        self.sum = self.sum.add(other.sum);
        self.count += other.count;
        self
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean of everything added so far; black when empty.
    pub fn finish(&self) -> Vec3 {
        if self.count == 0 {
            return Vec3::ZERO;
        }
        self.sum.scale(1.0 / self.count as f64)
    }
}

impl FromIterator<Vec3> for Accumulator {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let mut acc = Accumulator::default();
        for c in iter {
            acc.add(c);
        }
        acc
    }
}

/// 8-bit channel value; out-of-range input saturates and NaN becomes 0.
pub fn quantize(c: Vec3) -> [u8; 3] {
    let q = |v: f64| (255.99 * v).clamp(0.0, 255.0) as u8;
    [q(c.0), q(c.1), q(c.2)]
}

/// Raster position plus sub-pixel offset to screen space: `[-1, 1]` on both
/// axes, y pointing up.
pub fn screen_coords(x: u32, y: u32, jx: f64, jy: f64, width: u32, height: u32) -> (f64, f64) {
    let ndc_x = (x as f64 + jx) / width as f64;
    let ndc_y = (y as f64 + jy) / height as f64;
    (2.0 * ndc_x - 1.0, 1.0 - 2.0 * ndc_y)
}

/// Sub-pixel offsets in `[0, 1)^2` for one pixel.
///
/// The stream depends only on `(seed, pixel)`, so a pixel's samples do not
/// depend on which thread renders it. Without jitter the single sample sits
/// at the pixel center.
pub fn sample_offsets(seed: u64, pixel: u64, samples: u32, jitter: bool) -> Vec<(f64, f64)> {
    if !jitter {
        return vec![(0.5, 0.5)];
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(pixel);
    (0..samples)
        .map(|_| (rng.r#gen::<f64>(), rng.r#gen::<f64>()))
        .collect()
}

/// Seed from the config, or a fresh random one.
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(|| {
        let seed = rand::thread_rng().r#gen();
        info!("no seed configured, using {seed}");
        seed
    })
}

/// Averaged color of pixel `(x, y)`.
///
/// Samples are traced in parallel, collected in sample order and then
/// summed on this thread, so the result is the same on every run.
pub fn pixel_color(x: u32, y: u32, setup: &SceneSetup, seed: u64) -> Vec3 {
    let render = &setup.render;
    let aspect = render.aspect();
    let pixel = y as u64 * render.width as u64 + x as u64;

    let colors: Vec<Vec3> = sample_offsets(seed, pixel, render.effective_samples(), render.jitter)
        .into_par_iter()
        .map(|(jx, jy)| {
            let (sx, sy) = screen_coords(x, y, jx, jy, render.width, render.height);
            let ray = setup.camera.ray(sx, sy, aspect);
            ray_march(&ray, &setup.scene, &setup.march)
        })
        .collect();

    colors.into_iter().collect::<Accumulator>().finish()
}

/// Renders every pixel, rows in parallel. `bar` advances once per row.
pub fn render(setup: &SceneSetup, seed: u64, bar: Option<&ProgressBar>) -> Frame {
    let (width, height) = (setup.render.width, setup.render.height);
    info!(
        "Rendering {}x{} image with {} samples per pixel on {} threads",
        width,
        height,
        setup.render.effective_samples(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let rows: Vec<Vec<Vec3>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let row: Vec<Vec3> = (0..width).map(|x| pixel_color(x, y, setup, seed)).collect();
            if let Some(b) = bar {
                b.inc(1);
            }
            row
        })
        .collect();

    info!("Image rendered in {:.2?}", start.elapsed());

    Frame {
        width,
        height,
        pixels: rows.into_iter().flatten().collect(),
    }
}

pub fn render_image_name(w: u32, h: u32, s: u32, seed: u64) -> String {
    let suf: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(6).map(char::from).collect();
    format!("renders/render_{w}x{h}_s{s}_seed{seed}_{suf}.png")
}
