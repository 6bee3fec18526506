//! Estimate tempo from the interval between two taps.

use crate::log;
use crate::tempo::MICROS_PER_MINUTE;

/// How many intervals may pass without a tap before the history expires.
pub const TAP_EXPIRE_FACTOR: u64 = 2;

/// Expiration window after the first tap, slightly over 35 BPM.
pub const TAP_EXPIRE_DEFAULT_US: u64 = 1_715_000;

/// Identify tempo being tapped in by the user.
///
/// Every tap following a recent one yields a tempo derived from the
/// interval between them. A history older than twice the last interval is
/// forgotten, so a stale tap never pairs with a fresh one.
///
/// The returned tempo is raw. It is the caller's job to clamp it, which
/// `TempoStore::set` does.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapTempo {
    last_tap_us: Option<u64>,
    expire_window_us: u64,
}

impl TapTempo {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_tap_us: None,
            expire_window_us: TAP_EXPIRE_DEFAULT_US,
        }
    }

    /// Register a tap, returning the new tempo if this tap closed an interval.
    ///
    /// A tap with the same timestamp as the previous one is ignored.
    pub fn on_tap(&mut self, now_us: u64) -> Option<u32> {
        self.on_idle_poll(now_us);

        let last_tap_us = match self.last_tap_us {
            Some(last_tap_us) => last_tap_us,
            None => {
                self.last_tap_us = Some(now_us);
                self.expire_window_us = TAP_EXPIRE_DEFAULT_US;
                log::debug!("First tap at {=u64} us", now_us);
                return None;
            }
        };

        let interval_us = now_us.saturating_sub(last_tap_us);
        if interval_us == 0 {
            return None;
        }

        self.last_tap_us = Some(now_us);
        self.expire_window_us = interval_us * TAP_EXPIRE_FACTOR;

        // Interval is at least 1 us, the quotient fits.
        let bpm = (u64::from(MICROS_PER_MINUTE) / interval_us) as u32;
        log::debug!("Tapped interval {=u64} us, {=u32} BPM", interval_us, bpm);
        Some(bpm)
    }

    /// Forget the history once its expiration window elapsed.
    ///
    /// This is to be called on every iteration of the control loop.
    pub fn on_idle_poll(&mut self, now_us: u64) {
        if let Some(last_tap_us) = self.last_tap_us {
            if now_us.saturating_sub(last_tap_us) >= self.expire_window_us {
                self.last_tap_us = None;
            }
        }
    }

    #[must_use]
    pub fn is_awaiting_first_tap(&self) -> bool {
        self.last_tap_us.is_none()
    }
}

impl Default for TapTempo {
    fn default() -> Self {
        Self::new()
    }
}
