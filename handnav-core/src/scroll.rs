use handnav_shared::Sensitivity;

/// Minimum normalized vertical displacement that produces a scroll
pub const SCROLL_THRESHOLD: f64 = 0.02;

/// Converts frame-to-frame hand displacement into scroll commands.
///
/// Holds one sample of history: the previous normalized y. Losing the hand
/// clears it, so the next sighting only re-establishes the baseline.
#[derive(Debug, Clone)]
pub struct ScrollMapper {
    previous_y: Option<f64>,
    threshold: f64,
    sensitivity: Sensitivity,
}

impl ScrollMapper {
    pub fn new(sensitivity: Sensitivity) -> Self {
        Self {
            previous_y: None,
            threshold: SCROLL_THRESHOLD,
            sensitivity,
        }
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: Sensitivity) {
        self.sensitivity = sensitivity;
    }

    pub fn previous_y(&self) -> Option<f64> {
        self.previous_y
    }

    pub fn reset(&mut self) {
        self.previous_y = None;
    }

    /// Feed one tick's normalized hand position (`None` when no hand was found).
    ///
    /// Returns a nonzero scroll amount when the hand moved more than the
    /// threshold since the previous tick. Positive means the hand moved up.
    pub fn update(&mut self, normalized_y: Option<f64>) -> Option<i32> {
        let Some(current) = normalized_y else {
            self.previous_y = None;
            return None;
        };

        // First sighting after a reset only records the baseline
        let previous = self.previous_y.replace(current)?;

        let delta = current - previous;
        if delta.abs() <= self.threshold {
            return None;
        }

        let amount = (-delta * self.sensitivity.factor() as f64 * 100.0).round() as i32;
        (amount != 0).then_some(amount)
    }
}

impl Default for ScrollMapper {
    fn default() -> Self {
        Self::new(Sensitivity::default())
    }
}
