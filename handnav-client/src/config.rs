use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use handnav_shared::{DetectionZone, DetectorPreset, Sensitivity, TonePreset, TrackerSettings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scroll with hand gestures in front of a webcam", long_about = None)]
pub struct Args {
    /// Camera device ID (e.g., '0' for the first local camera)
    #[arg(short, long)]
    pub camera: Option<i32>,

    /// Detection zone: bottom, left, right or full
    #[arg(short, long)]
    pub zone: Option<DetectionZone>,

    /// Scroll sensitivity: low, medium or high
    #[arg(short, long)]
    pub sensitivity: Option<Sensitivity>,

    /// Detector thresholds: zone-restricted or unrestricted
    #[arg(short, long)]
    pub preset: Option<DetectorPreset>,

    /// JSON settings file; command-line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Run without a preview window and start tracking immediately
    #[arg(long)]
    pub no_window: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the brightness and gamma ramp for a warmth setting and print it as JSON
    Tone(ToneArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ToneArgs {
    /// Warmth in percent (0-100)
    #[arg(short, long, default_value_t = 0)]
    pub warmth: u8,

    /// Brightness in percent (10-100)
    #[arg(short, long, default_value_t = 100)]
    pub brightness: u8,

    /// Use a preset instead: day, evening or night
    #[arg(long, conflicts_with_all = ["warmth", "brightness"])]
    pub preset: Option<TonePreset>,
}

/// Parses the contents of a JSON settings file
pub fn parse_settings(json: &str) -> Result<TrackerSettings> {
    serde_json::from_str(json).context("Invalid settings file")
}

pub fn load_settings_file(path: &Path) -> Result<TrackerSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    parse_settings(&json).with_context(|| format!("In {}", path.display()))
}

/// Settings from the optional file, overridden by command-line flags
pub fn resolve_settings(args: &Args) -> Result<TrackerSettings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_file(path)?,
        None => TrackerSettings::default(),
    };

    if let Some(camera) = args.camera {
        settings.camera = camera;
    }
    if let Some(zone) = args.zone {
        settings.zone = zone;
    }
    if let Some(sensitivity) = args.sensitivity {
        settings.sensitivity = sensitivity;
    }
    if let Some(preset) = args.preset {
        settings.preset = preset;
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["handnav"]).unwrap();
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings, TrackerSettings::default());
        assert!(!args.no_window);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "handnav",
            "--zone",
            "left",
            "--sensitivity",
            "high",
            "--preset",
            "unrestricted",
            "-c",
            "2",
        ])
        .unwrap();
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.zone, DetectionZone::Left);
        assert_eq!(settings.sensitivity, Sensitivity::High);
        assert_eq!(settings.preset, DetectorPreset::Unrestricted);
        assert_eq!(settings.camera, 2);
    }

    #[test]
    fn test_bad_zone_rejected() {
        assert!(Args::try_parse_from(["handnav", "--zone", "top"]).is_err());
    }

    #[test]
    fn test_parse_settings_file_contents() {
        let settings = parse_settings(r#"{"camera": 1, "sensitivity": "low"}"#).unwrap();
        assert_eq!(settings.camera, 1);
        assert_eq!(settings.sensitivity, Sensitivity::Low);
        assert_eq!(settings.zone, DetectionZone::Bottom);
        assert!(parse_settings("{ not json").is_err());
    }

    #[test]
    fn test_missing_settings_file() {
        let args = Args::try_parse_from(["handnav", "--config", "/nonexistent/handnav.json"]).unwrap();
        let err = resolve_settings(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read settings"));
    }

    #[test]
    fn test_tone_subcommand() {
        let args = Args::try_parse_from(["handnav", "tone", "--warmth", "40"]).unwrap();
        let Some(Command::Tone(tone)) = args.command else {
            panic!("expected tone subcommand");
        };
        assert_eq!(tone.warmth, 40);
        assert_eq!(tone.brightness, 100);
        assert!(tone.preset.is_none());

        assert!(Args::try_parse_from(["handnav", "tone", "--preset", "night", "--warmth", "5"]).is_err());
    }
}
