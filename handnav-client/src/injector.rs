use anyhow::Result;
use enigo::{Axis, Enigo, Mouse, Settings};
use handnav_core::ScrollInjector;

/// Sends mouse-wheel events through enigo
pub struct EnigoScroller {
    enigo: Enigo,
}

impl EnigoScroller {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { enigo })
    }
}

impl ScrollInjector for EnigoScroller {
    fn scroll(&mut self, amount: i32) {
        // enigo scrolls content up for negative lengths
        if let Err(e) = self.enigo.scroll(-amount, Axis::Vertical) {
            log::warn!("Failed to inject scroll of {}: {:?}", amount, e);
        }
    }
}
