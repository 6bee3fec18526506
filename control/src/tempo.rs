//! The shared tempo value and the tick period derived from it.

use core::sync::atomic::{AtomicU16, Ordering};

pub const TEMPO_MIN: u16 = 40;
pub const TEMPO_MAX: u16 = 300;
pub const DEFAULT_TEMPO: u16 = 120;

/// Pulses per quarter note, the MIDI clock standard.
pub const PPQ: u32 = 24;

pub(crate) const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Length of a single clock tick in microseconds.
///
/// The tempo must be non-zero. Tempo read from [`TempoStore`] always is.
#[must_use]
pub const fn calc_period(tempo: u16) -> u32 {
    MICROS_PER_MINUTE / (tempo as u32 * PPQ)
}

#[must_use]
pub fn clamp_tempo(bpm: u32) -> u16 {
    bpm.clamp(u32::from(TEMPO_MIN), u32::from(TEMPO_MAX)) as u16
}

/// The single tempo value shared between the control loop and the timer.
///
/// Only the control loop writes it. Every write goes through the clamp, so
/// any reader observes a tempo within `TEMPO_MIN..=TEMPO_MAX`. The value is
/// one atomic word, no locking is needed to read it from an interrupt.
#[derive(Debug)]
pub struct TempoStore {
    bpm: AtomicU16,
}

impl TempoStore {
    #[must_use]
    pub const fn new(bpm: u16) -> Self {
        let bpm = if bpm < TEMPO_MIN {
            TEMPO_MIN
        } else if bpm > TEMPO_MAX {
            TEMPO_MAX
        } else {
            bpm
        };
        Self {
            bpm: AtomicU16::new(bpm),
        }
    }

    pub fn get(&self) -> u16 {
        self.bpm.load(Ordering::Relaxed)
    }

    /// Store a new tempo, clamped into the allowed range.
    ///
    /// Returns the tempo that was actually stored.
    pub fn set(&self, bpm: u32) -> u16 {
        let tempo = clamp_tempo(bpm);
        self.bpm.store(tempo, Ordering::Relaxed);
        tempo
    }

    /// Move the tempo by the given number of steps, typically ±1.
    ///
    /// At the boundaries the surplus is absorbed by the clamp.
    pub fn adjust(&self, offset: i32) -> u16 {
        let target = i32::from(self.get()).saturating_add(offset).max(0);
        self.set(target.unsigned_abs())
    }

    pub fn period(&self) -> u32 {
        calc_period(self.get())
    }
}

impl Default for TempoStore {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPO)
    }
}
