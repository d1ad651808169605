use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use raymarcher::config::RenderConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "raymarcher")]
#[command(about = "Render a signed-distance-field scene by sphere tracing")]
pub struct Args {
    /// Scene description (JSON). Renders the built-in scene when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Antialiasing samples per pixel
    #[arg(long, short = 'n')]
    pub samples: Option<u32>,

    /// Seed for the antialiasing jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Trace one sample through each pixel center
    #[arg(long)]
    pub no_jitter: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Command line values win over the scene file.
    pub fn apply(&self, render: &mut RenderConfig) {
        if let Some(w) = self.width {
            render.width = w;
        }
        if let Some(h) = self.height {
            render.height = h;
        }
        if let Some(s) = self.samples {
            render.samples = s;
        }
        if self.seed.is_some() {
            render.seed = self.seed;
        }
        if self.no_jitter {
            render.jitter = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_given_values() {
        let args = Args::parse_from(["raymarcher", "--width", "64", "--seed", "3", "--no-jitter"]);
        let mut render = RenderConfig::default();
        args.apply(&mut render);
        assert_eq!(render.width, 64);
        assert_eq!(render.height, 256);
        assert_eq!(render.samples, 100);
        assert_eq!(render.seed, Some(3));
        assert!(!render.jitter);
    }

    #[test]
    fn log_level_parses() {
        let args = Args::parse_from(["raymarcher", "--log-level", "debug", "-q"]);
        assert!(args.quiet);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
