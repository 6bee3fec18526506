//! Start/stop state machine of the clock stream.

use crate::log;
use crate::midi::{Channel, MidiSink};
use crate::shared::{SharedState, TransportSnapshot, EPOCH_MASK};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportState {
    #[default]
    Stopped,
    Running,
}

/// The transport, toggled by presses of the transport button.
///
/// The state is published to the timer context through `SharedState`,
/// gating the emission of clock ticks. The ticks keep being counted while
/// stopped.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transport {
    state: TransportState,
    epoch: u32,
}

impl Transport {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TransportState::Stopped,
            epoch: 0,
        }
    }

    pub fn toggle(&mut self, shared: &SharedState, midi: &mut impl MidiSink) -> TransportState {
        match self.state {
            TransportState::Stopped => self.start(shared, midi),
            TransportState::Running => self.stop(shared, midi),
        }
        self.state
    }

    fn start(&mut self, shared: &SharedState, midi: &mut impl MidiSink) {
        // Start must be queued before the timer may see the transport
        // running and emit the first clock. The new epoch makes the timer
        // reset its tick counter before that clock.
        midi.send_start();
        self.epoch = self.epoch.wrapping_add(1) & EPOCH_MASK;
        shared.publish_transport(TransportSnapshot {
            running: true,
            epoch: self.epoch,
        });
        self.state = TransportState::Running;
        log::info!("Transport started");
    }

    fn stop(&mut self, shared: &SharedState, midi: &mut impl MidiSink) {
        shared.publish_transport(TransportSnapshot {
            running: false,
            epoch: self.epoch,
        });
        midi.send_stop();
        for channel in Channel::all() {
            midi.send_all_notes_off(channel);
        }
        self.state = TransportState::Stopped;
        log::info!("Transport stopped");
    }

    #[must_use]
    pub fn state(&self) -> TransportState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TransportState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::testing::Recorder;
    use crate::midi::MidiMessage;

    #[test]
    fn when_initialized_it_is_stopped() {
        let transport = Transport::new();
        assert_eq!(transport.state(), TransportState::Stopped);
        assert!(!transport.is_running());
    }

    #[test]
    fn when_toggled_from_stopped_it_sends_single_start() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut transport = Transport::new();

        assert_eq!(transport.toggle(&shared, &mut midi), TransportState::Running);

        assert_eq!(midi.messages, [MidiMessage::Start]);
        assert!(transport.is_running());
        assert!(shared.transport().running);
    }

    #[test]
    fn when_toggled_from_running_it_sends_stop_and_all_notes_off() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut transport = Transport::new();
        transport.toggle(&shared, &mut midi);
        midi.clear();

        assert_eq!(transport.toggle(&shared, &mut midi), TransportState::Stopped);

        assert_eq!(midi.messages.len(), 17);
        assert_eq!(midi.messages[0], MidiMessage::Stop);
        assert_eq!(midi.count(MidiMessage::Stop), 1);
        for (message, channel) in midi.messages[1..].iter().zip(Channel::all()) {
            assert_eq!(*message, MidiMessage::all_notes_off(channel));
        }
        assert!(!shared.transport().running);
    }

    #[test]
    fn when_started_the_epoch_is_advanced() {
        let shared = SharedState::new();
        let mut midi = Recorder::default();
        let mut transport = Transport::new();

        transport.toggle(&shared, &mut midi);
        let first = shared.transport().epoch;
        transport.toggle(&shared, &mut midi);
        assert_eq!(shared.transport().epoch, first);
        transport.toggle(&shared, &mut midi);
        assert_ne!(shared.transport().epoch, first);
    }
}
