//! MIDI output over UART.
//!
//! Messages are serialized into a lock-free byte queue, which may be fed
//! from any priority. The UART interrupt drains it. Bytes keep their order,
//! so a Start enqueued before the transport is published running always
//! leaves before the first Clock.

use heapless::mpmc::Q64;
use tick_tock_control::{MidiMessage, MidiSink};

use crate::system::hal::gpio;
use crate::system::hal::pac::{Interrupt, UART4};
use crate::system::hal::prelude::*;
use crate::system::hal::serial::Tx;

pub const BAUD_RATE: u32 = 31_250;

pub const INTERRUPT: Interrupt = Interrupt::UART4;

pub type TxPin = gpio::gpioa::PA0<gpio::Alternate<8>>;
pub type RxPin = gpio::gpioa::PA1<gpio::Alternate<8>>;

static QUEUE: Q64<u8> = Q64::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct QueueFull;

/// Producer side of the transmit queue. Never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidiQueue;

impl MidiQueue {
    /// # Errors
    ///
    /// Fails with `QueueFull` when there is no room left. The bytes that
    /// did not fit are dropped.
    pub fn write(self, message: MidiMessage) -> Result<(), QueueFull> {
        let result = message
            .bytes()
            .iter()
            .try_for_each(|byte| QUEUE.enqueue(*byte).map_err(|_| QueueFull));
        cortex_m::peripheral::NVIC::pend(INTERRUPT);
        result
    }
}

impl MidiSink for MidiQueue {
    fn send(&mut self, message: MidiMessage) {
        if self.write(message).is_err() {
            defmt::warn!("MIDI queue full, dropped {}", message);
        }
    }
}

/// Consumer side of the transmit queue, owning the UART.
pub struct MidiWriter {
    tx: Tx<UART4>,
    pending: Option<u8>,
}

impl MidiWriter {
    #[must_use]
    pub fn new(tx: Tx<UART4>) -> Self {
        Self { tx, pending: None }
    }

    /// Write as many queued bytes as the UART accepts.
    ///
    /// The transmit-empty interrupt stays enabled only while there are
    /// bytes left to write.
    pub fn flush(&mut self) {
        while let Some(byte) = self.pending.take().or_else(|| QUEUE.dequeue()) {
            match self.tx.write(byte) {
                Ok(()) => (),
                Err(nb::Error::WouldBlock) => {
                    self.pending = Some(byte);
                    self.tx.listen();
                    return;
                }
                Err(nb::Error::Other(_)) => defmt::warn!("Failed writing MIDI byte"),
            }
        }
        self.tx.unlisten();
    }
}
