//! Keyboard control surface for the preview window

use handnav_core::{CameraSource, FrameLoop, PreviewSink, ScrollInjector};
use handnav_shared::Sensitivity;

const KEY_ESCAPE: i32 = 27;

/// Operator commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    CycleZone,
    Sensitivity(Sensitivity),
    Quit,
}

impl Control {
    /// Maps a HighGUI key code; `-1` (no key) and unbound keys give `None`
    pub fn from_key(key: i32) -> Option<Self> {
        if key == KEY_ESCAPE {
            return Some(Self::Quit);
        }
        let key = u8::try_from(key & 0xff).ok()?;
        match key.to_ascii_lowercase() {
            b's' => Some(Self::Start),
            b'x' => Some(Self::Stop),
            b'z' => Some(Self::CycleZone),
            b'1' => Some(Self::Sensitivity(Sensitivity::Low)),
            b'2' => Some(Self::Sensitivity(Sensitivity::Medium)),
            b'3' => Some(Self::Sensitivity(Sensitivity::High)),
            b'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Applies one command; returns false when the application should exit
pub fn apply<S, P, I>(frame_loop: &mut FrameLoop<S, P, I>, control: Control) -> bool
where
    S: CameraSource,
    P: PreviewSink,
    I: ScrollInjector,
{
    match control {
        Control::Start => {
            if let Err(e) = frame_loop.start() {
                log::error!("{:#}", e);
            }
        }
        Control::Stop => frame_loop.stop(),
        Control::CycleZone => {
            let zone = frame_loop.zone().next();
            frame_loop.set_zone(zone);
        }
        Control::Sensitivity(sensitivity) => frame_loop.set_sensitivity(sensitivity),
        Control::Quit => {
            log::info!("Quit requested");
            frame_loop.stop();
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Control::from_key(-1), None);
        assert_eq!(Control::from_key(b's' as i32), Some(Control::Start));
        assert_eq!(Control::from_key(b'S' as i32), Some(Control::Start));
        assert_eq!(Control::from_key(b'x' as i32), Some(Control::Stop));
        assert_eq!(Control::from_key(b'z' as i32), Some(Control::CycleZone));
        assert_eq!(
            Control::from_key(b'3' as i32),
            Some(Control::Sensitivity(Sensitivity::High))
        );
        assert_eq!(Control::from_key(b'q' as i32), Some(Control::Quit));
        assert_eq!(Control::from_key(27), Some(Control::Quit));
        assert_eq!(Control::from_key(b'k' as i32), None);
    }
}
