//! MIDI messages emitted by the clock and the sink they are sent through.

use heapless::Vec;

/// Control change number of the Channel Mode message "All Notes Off".
pub const ALL_NOTES_OFF_CONTROLLER: u8 = 123;

const CLOCK: u8 = 0xF8;
const START: u8 = 0xFA;
const STOP: u8 = 0xFC;
const CONTROL_CHANGE: u8 = 0xB0;

/// MIDI channel, numbered 1 to 16 as printed on gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChannel;

impl Channel {
    pub const COUNT: u8 = 16;

    /// # Errors
    ///
    /// Fails with `InvalidChannel` when the number is not within 1 to 16.
    pub fn new(number: u8) -> Result<Self, InvalidChannel> {
        if (1..=Self::COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(InvalidChannel)
        }
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT).map(Self)
    }

    fn nibble(self) -> u8 {
        self.0 - 1
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiMessage {
    Clock,
    Start,
    Stop,
    ControlChange {
        channel: Channel,
        controller: u8,
        value: u8,
    },
}

impl MidiMessage {
    #[must_use]
    pub fn all_notes_off(channel: Channel) -> Self {
        Self::ControlChange {
            channel,
            controller: ALL_NOTES_OFF_CONTROLLER,
            value: 0,
        }
    }

    /// System real-time messages may be interleaved with bytes of other
    /// messages on the wire.
    #[must_use]
    pub fn is_realtime(&self) -> bool {
        matches!(self, Self::Clock | Self::Start | Self::Stop)
    }

    #[must_use]
    pub fn bytes(&self) -> Vec<u8, 3> {
        match *self {
            Self::Clock => Vec::from_slice(&[CLOCK]),
            Self::Start => Vec::from_slice(&[START]),
            Self::Stop => Vec::from_slice(&[STOP]),
            Self::ControlChange {
                channel,
                controller,
                value,
            } => Vec::from_slice(&[
                CONTROL_CHANGE | channel.nibble(),
                controller & 0x7F,
                value & 0x7F,
            ]),
        }
        // No message is longer than the capacity.
        .unwrap_or_default()
    }
}

/// Destination of outgoing MIDI messages.
///
/// Implementations must not block. They are called from the timer
/// interrupt as well as from the control loop.
pub trait MidiSink {
    fn send(&mut self, message: MidiMessage);

    fn send_clock_tick(&mut self) {
        self.send(MidiMessage::Clock);
    }

    fn send_start(&mut self) {
        self.send(MidiMessage::Start);
    }

    fn send_stop(&mut self) {
        self.send(MidiMessage::Stop);
    }

    fn send_all_notes_off(&mut self, channel: Channel) {
        self.send(MidiMessage::all_notes_off(channel));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{MidiMessage, MidiSink};

    /// Sink keeping all sent messages in order.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub messages: std::vec::Vec<MidiMessage>,
    }

    impl Recorder {
        pub fn count(&self, message: MidiMessage) -> usize {
            self.messages.iter().filter(|m| **m == message).count()
        }

        pub fn clear(&mut self) {
            self.messages.clear();
        }
    }

    impl MidiSink for Recorder {
        fn send(&mut self, message: MidiMessage) {
            self.messages.push(message);
        }
    }
}
