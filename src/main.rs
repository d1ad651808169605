mod cli;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, LevelFilter};
use std::path::PathBuf;

use cli::Args;
use raymarcher::{
    renderer::{self, render_image_name},
    scene::{self, SceneSetup},
    shape::Shape,
    Result,
};

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn log_setup(setup: &SceneSetup) {
    let cam = &setup.camera;
    info!("=== CAMERA ===");
    info!(" position      : {:?}", cam.position);
    info!(" look_at_depth : {:.4}", cam.look_at_depth);
    info!(" fov (°)       : {:.2}", cam.fov);
    info!(" aspect        : {:.4}", setup.render.aspect());
    debug!(" march         : {:?}", setup.march);

    info!("=== SHAPES ({}) ===", setup.scene.shapes.len());
    for (i, shape) in setup.scene.shapes.iter().enumerate() {
        match shape {
            Shape::Sphere(s) => debug!(
                " [{}] Sphere '{}' {{ center: {:?}, radius: {:.4}, color: {:?} }}",
                i, s.name, s.center, s.radius, s.material.color
            ),
            Shape::Plane(p) => debug!(
                " [{}] Plane '{}' {{ point: {:?}, normal: {:?}, sdf: {:?}, color: {:?} }}",
                i, p.name, p.point, p.normal, p.sdf, p.material.color
            ),
        }
    }

    info!("=== LIGHTS ({}) ===", setup.scene.lights.len());
    for (i, l) in setup.scene.lights.iter().enumerate() {
        debug!(" [{}] Light {{ pos: {:?} }}", i, l.pos);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut setup = match &args.scene {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            scene::load(path)?
        }
        None => {
            info!("No scene given, rendering the built-in scene");
            SceneSetup::default_scene()
        }
    };
    args.apply(&mut setup.render);
    setup.validate()?;

    log_setup(&setup);

    let seed = renderer::resolve_seed(setup.render.seed);

    let bar = if !args.quiet {
        let pb = ProgressBar::new(setup.render.height as u64);
        pb.set_style(ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} rows | {elapsed_precise} | ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()));
        Some(pb)
    } else {
        None
    };

    let frame = renderer::render(&setup, seed, bar.as_ref());

    if let Some(b) = bar {
        b.finish_with_message("Rendering complete");
    }

    let name = args.output.clone().unwrap_or_else(|| {
        let r = &setup.render;
        PathBuf::from(render_image_name(r.width, r.height, r.effective_samples(), seed))
    });
    frame.save(&name)?;
    info!("Saved → {}", name.display());
    Ok(())
}
