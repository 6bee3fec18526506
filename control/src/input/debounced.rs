//! Turn a bouncing mechanical switch into clean press events.

pub const DEBOUNCE_TIME_MS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Accepted transition to the active level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LevelChange {
    pub level: Level,
    pub at_ms: u32,
}

/// Debouncer of a single digital input.
///
/// The first raw change is accepted right away, which keeps the press
/// latency at one poll. A timer then runs for `DEBOUNCE_TIME_MS` and any
/// further change observed meanwhile is ignored. Note that this does not
/// validate that the level stayed put for the whole window, a level
/// differing once the window elapsed is accepted again on the next poll.
///
/// Only transitions to the active level are reported, releases are
/// tracked silently.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debounced {
    active: Level,
    stable: Level,
    timer_started_at: Option<u32>,
}

impl Debounced {
    /// The input starts in its inactive level.
    #[must_use]
    pub const fn new(active: Level) -> Self {
        Self {
            active,
            stable: active.inverted(),
            timer_started_at: None,
        }
    }

    #[must_use]
    pub const fn active_low() -> Self {
        Self::new(Level::Low)
    }

    pub fn poll(&mut self, raw: Level, now_ms: u32) -> Option<LevelChange> {
        let mut change = None;

        if raw != self.stable && self.timer_started_at.is_none() {
            self.timer_started_at = Some(now_ms);
            self.stable = raw;
            if raw == self.active {
                change = Some(LevelChange {
                    level: raw,
                    at_ms: now_ms,
                });
            }
        }

        if let Some(started_at) = self.timer_started_at {
            if now_ms.wrapping_sub(started_at) >= DEBOUNCE_TIME_MS {
                self.timer_started_at = None;
            }
        }

        change
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stable == self.active
    }
}

impl Default for Debounced {
    fn default() -> Self {
        Self::active_low()
    }
}
