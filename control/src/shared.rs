//! State crossing the boundary between the control loop and the timer.
//!
//! The timer interrupt may preempt the control loop at any instruction, so
//! everything here is a single atomic word. No locks are taken. Instead,
//! each word has exactly one writer context:
//!
//! | Field     | Writer       | Readers             |
//! |-----------|--------------|---------------------|
//! | tempo     | control loop | control loop, timer |
//! | transport | control loop | timer               |
//!
//! The tick counter is not shared at all. It lives in the tick generator,
//! which learns about a transport restart from the epoch packed in the
//! transport word.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::tempo::{TempoStore, DEFAULT_TEMPO};

const RUNNING_BIT: u32 = 0b1;
pub(crate) const EPOCH_MASK: u32 = u32::MAX >> 1;

#[derive(Debug)]
pub struct SharedState {
    pub tempo: TempoStore,
    transport: AtomicU32,
}

/// Transport as published to the timer context.
///
/// The epoch is bumped on every start, so a stop followed by a start is
/// visible to the reader even if it never observed the stopped state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportSnapshot {
    pub running: bool,
    pub epoch: u32,
}

impl TransportSnapshot {
    fn pack(self) -> u32 {
        ((self.epoch & EPOCH_MASK) << 1) | u32::from(self.running)
    }

    fn unpack(word: u32) -> Self {
        Self {
            running: word & RUNNING_BIT != 0,
            epoch: word >> 1,
        }
    }
}

impl SharedState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tempo: TempoStore::new(DEFAULT_TEMPO),
            transport: AtomicU32::new(0),
        }
    }

    pub fn transport(&self) -> TransportSnapshot {
        TransportSnapshot::unpack(self.transport.load(Ordering::Acquire))
    }

    pub(crate) fn publish_transport(&self, snapshot: TransportSnapshot) {
        self.transport.store(snapshot.pack(), Ordering::Release);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_initialized_transport_is_stopped_in_epoch_zero() {
        let shared = SharedState::new();
        assert_eq!(
            shared.transport(),
            TransportSnapshot {
                running: false,
                epoch: 0
            }
        );
        assert_eq!(shared.tempo.get(), DEFAULT_TEMPO);
    }

    #[test]
    fn when_transport_is_published_it_is_read_back_whole() {
        let shared = SharedState::new();
        let snapshot = TransportSnapshot {
            running: true,
            epoch: 1234,
        };
        shared.publish_transport(snapshot);
        assert_eq!(shared.transport(), snapshot);
    }

    #[test]
    fn when_epoch_exceeds_mask_it_wraps() {
        let shared = SharedState::new();
        shared.publish_transport(TransportSnapshot {
            running: true,
            epoch: EPOCH_MASK + 1,
        });
        assert_eq!(shared.transport().epoch, 0);
        assert!(shared.transport().running);
    }
}
