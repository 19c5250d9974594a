use std::io::Write;

use anyhow::{Context, Result};
use handnav_core::{GammaRamp, ToneController, ToneDevice};
use handnav_shared::ToneSettings;
use serde::Serialize;

use crate::config::ToneArgs;

/// Captures what would be sent to the display so it can be exported
#[derive(Debug, Default)]
pub struct ExportDevice {
    brightness: Option<u8>,
    ramp: Option<GammaRamp>,
}

impl ToneDevice for ExportDevice {
    fn apply_brightness(&mut self, percent: u8) -> Result<()> {
        self.brightness = Some(percent);
        Ok(())
    }

    fn apply_ramp(&mut self, ramp: &GammaRamp) -> Result<()> {
        self.ramp = Some(ramp.clone());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ToneExport {
    pub brightness: u8,
    pub warmth: u8,
    /// 768 entries: red, green, blue
    pub gamma_ramp: Vec<u16>,
}

pub fn export(args: &ToneArgs) -> Result<ToneExport> {
    let requested = match args.preset {
        Some(preset) => preset.settings(),
        None => ToneSettings::clamped(args.brightness, args.warmth),
    };

    let mut controller = ToneController::new(ExportDevice::default());
    let applied = controller.apply(requested)?;
    let ramp = controller
        .device()
        .ramp
        .clone()
        .unwrap_or_else(GammaRamp::neutral);

    Ok(ToneExport {
        brightness: applied.brightness,
        warmth: applied.warmth,
        gamma_ramp: ramp.to_vec(),
    })
}

/// Print the tone export as JSON on `out`
pub fn run(args: &ToneArgs, out: &mut impl Write) -> Result<()> {
    let export = export(args)?;
    serde_json::to_writer_pretty(&mut *out, &export).context("Failed to write tone settings")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use handnav_shared::TonePreset;

    #[test]
    fn test_export_clamps_and_builds_ramp() {
        let args = ToneArgs {
            warmth: 150,
            brightness: 5,
            preset: None,
        };
        let export = export(&args).unwrap();
        assert_eq!(export.brightness, 10);
        assert_eq!(export.warmth, 100);
        assert_eq!(export.gamma_ramp, GammaRamp::warm(100).to_vec());
    }

    #[test]
    fn test_export_preset() {
        let args = ToneArgs {
            warmth: 0,
            brightness: 100,
            preset: Some(TonePreset::Evening),
        };
        let export = export(&args).unwrap();
        assert_eq!((export.brightness, export.warmth), (70, 50));
    }

    #[test]
    fn test_run_writes_json() {
        let args = ToneArgs {
            warmth: 0,
            brightness: 100,
            preset: None,
        };
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["brightness"], 100);
        assert_eq!(value["gamma_ramp"].as_array().unwrap().len(), 768);
        assert_eq!(value["gamma_ramp"][1], 256);
    }
}
