//! Structures used to pass the current state of hardware peripherals.

use super::debounced::Level;

/// The current state of input peripherals, sampled once per control loop.
///
/// `InputSnapshot` is meant to be passed from the hardware binding to the
/// control package. Button levels are passed raw, bouncing and all. Both
/// buttons are active-low, `Level::Low` means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub transport_button: Level,
    pub tap_button: Level,
    /// Microseconds since boot.
    pub now_us: u64,
}

impl InputSnapshot {
    /// Milliseconds since boot, wrapping.
    #[must_use]
    pub fn now_ms(&self) -> u32 {
        (self.now_us / 1000) as u32
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            transport_button: Level::High,
            tap_button: Level::High,
            now_us: 0,
        }
    }
}
