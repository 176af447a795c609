use std::path::{Path, PathBuf};

use base64::Engine as _;
use clap::Parser;
use vista_common::{ImageReference, ScreenOrientation, VistaError};

/// Vista: view an equirectangular image as a 360° panorama.
#[derive(Parser, Debug)]
#[command(name = "vista", version, about)]
pub struct Args {
    /// Image to show: an https:// URL, a data: URI, a file:// URI or a path.
    /// Omit for the built-in procedural panorama.
    #[arg(value_name = "IMAGE")]
    pub image: Option<String>,

    /// Read image bytes from this file and pass them inline (base64).
    #[arg(long, value_name = "PATH", conflicts_with = "image")]
    pub inline_file: Option<PathBuf>,

    /// Start in touch (drag) mode instead of sensor mode.
    #[arg(long)]
    pub touch: bool,

    /// Initial yaw in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub yaw: f32,

    /// Initial pitch in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pitch: f32,

    /// Replay recorded sensor samples (JSON lines) as the motion sensor.
    #[arg(long, value_name = "FILE")]
    pub sensor_replay: Option<PathBuf>,

    /// Screen orientation the samples were recorded in
    /// (portrait-up, portrait-down, landscape-left, landscape-right).
    #[arg(long, value_parser = parse_orientation)]
    pub screen_orientation: Option<ScreenOrientation>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. `vista=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Build the image reference from the positional argument or the
    /// inline file.
    pub fn image_reference(&self) -> Result<ImageReference, VistaError> {
        if let Some(path) = &self.inline_file {
            return inline_reference(path);
        }
        Ok(match &self.image {
            Some(uri) => ImageReference::from_uri(uri.clone()),
            None => ImageReference::none(),
        })
    }

    pub fn initial_yaw(&self) -> f32 {
        self.yaw.to_radians()
    }

    pub fn initial_pitch(&self) -> f32 {
        self.pitch.to_radians()
    }
}

fn inline_reference(path: &Path) -> Result<ImageReference, VistaError> {
    let bytes = std::fs::read(path)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(ImageReference::from_inline(encoded))
}

fn parse_orientation(s: &str) -> Result<ScreenOrientation, String> {
    s.parse()
}

pub fn parse() -> Args {
    Args::parse()
}
