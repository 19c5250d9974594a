//! Screen brightness and warmth control

use anyhow::Result;
use handnav_shared::ToneSettings;

const RAMP_LEN: usize = 256;

/// Per-channel 16-bit gamma ramp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaRamp {
    pub red: [u16; RAMP_LEN],
    pub green: [u16; RAMP_LEN],
    pub blue: [u16; RAMP_LEN],
}

impl GammaRamp {
    /// Identity ramp
    pub fn neutral() -> Self {
        let mut channel = [0u16; RAMP_LEN];
        for (i, value) in channel.iter_mut().enumerate() {
            *value = (i * 256) as u16;
        }
        Self {
            red: channel,
            green: channel,
            blue: channel,
        }
    }

    /// Warm ramp for a strength of 0-100: red nudged up, green down a little,
    /// blue down a lot
    pub fn warm(strength: u8) -> Self {
        let strength = strength.min(ToneSettings::MAX_WARMTH);
        if strength == 0 {
            return Self::neutral();
        }

        let k = strength as f64 / 100.0;
        let scale = |i: usize, factor: f64| -> u16 { (i as f64 * 256.0 * factor).min(65535.0) as u16 };

        let mut ramp = Self::neutral();
        for i in 0..RAMP_LEN {
            ramp.red[i] = scale(i, 1.0 + k * 0.1);
            ramp.green[i] = scale(i, 1.0 - k * 0.2);
            ramp.blue[i] = scale(i, 1.0 - k * 0.6);
        }
        ramp
    }

    /// Channels laid out back to back (red, green, blue), as display APIs expect
    pub fn to_vec(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(RAMP_LEN * 3);
        out.extend_from_slice(&self.red);
        out.extend_from_slice(&self.green);
        out.extend_from_slice(&self.blue);
        out
    }
}

/// Display hardware that can change brightness and color ramps
pub trait ToneDevice {
    fn apply_brightness(&mut self, percent: u8) -> Result<()>;
    fn apply_ramp(&mut self, ramp: &GammaRamp) -> Result<()>;
}

/// Idempotent front end for a [`ToneDevice`].
///
/// Only the parts that differ from the last applied setting reach the device.
pub struct ToneController<D> {
    device: D,
    applied: Option<ToneSettings>,
}

impl<D: ToneDevice> ToneController<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            applied: None,
        }
    }

    pub fn applied(&self) -> Option<ToneSettings> {
        self.applied
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Apply `warmth` (0-100) and `brightness` (10-100); out-of-range values are clamped
    pub fn set(&mut self, warmth: u8, brightness: u8) -> Result<ToneSettings> {
        let target = ToneSettings::clamped(brightness, warmth);
        let previous = self.applied;

        if previous.map(|p| p.brightness) != Some(target.brightness) {
            self.device.apply_brightness(target.brightness)?;
            log::info!("Brightness set to {}%", target.brightness);
        }
        if previous.map(|p| p.warmth) != Some(target.warmth) {
            self.device.apply_ramp(&GammaRamp::warm(target.warmth))?;
            log::info!("Night light strength set to {}%", target.warmth);
        }

        // Recorded only once both parts went through
        self.applied = Some(target);
        Ok(target)
    }

    pub fn apply(&mut self, settings: ToneSettings) -> Result<ToneSettings> {
        self.set(settings.warmth, settings.brightness)
    }

    /// Back to full brightness and neutral colors
    pub fn reset(&mut self) -> Result<ToneSettings> {
        self.apply(ToneSettings::default())
    }
}
