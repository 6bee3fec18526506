use tick_tock_control::Level;

use crate::system::hal::gpio;

/// Raw levels of both buttons. They are active-low, pulled up internally.
///
/// Debouncing is left to the control loop.
pub struct Buttons {
    pins: Pins,
}

pub struct Pins {
    pub transport: TransportPin,
    pub tap: TapPin,
}

pub type TransportPin = gpio::gpiog::PG14<gpio::Input>;
pub type TapPin = gpio::gpiob::PB8<gpio::Input>;

impl Buttons {
    #[must_use]
    pub fn new(pins: Pins) -> Self {
        Self { pins }
    }

    pub fn transport(&self) -> Level {
        Level::from(self.pins.transport.is_high())
    }

    pub fn tap(&self) -> Level {
        Level::from(self.pins.tap.is_high())
    }
}
