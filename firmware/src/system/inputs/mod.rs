//! Abstraction of all inputs sampled by the control loop.
//!
//! The encoder is kept outside, it is handed over to the control loop as
//! its collaborator.

pub mod buttons;
#[cfg(feature = "encoder")]
pub mod encoder;

use tick_tock_control::InputSnapshot;

use super::clock::MicrosClock;
use buttons::Buttons;
pub use buttons::Pins as ButtonsPins;

pub struct Inputs {
    pub buttons: Buttons,
    pub clock: MicrosClock,
}

pub struct Config {
    pub buttons: ButtonsPins,
    pub clock: MicrosClock,
}

impl Inputs {
    pub fn new(config: Config) -> Self {
        Self {
            buttons: Buttons::new(config.buttons),
            clock: config.clock,
        }
    }

    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            transport_button: self.buttons.transport(),
            tap_button: self.buttons.tap(),
            now_us: self.clock.now_us(),
        }
    }
}
