use crate::system::hal::gpio;

/// Lit for the first ticks of every quarter note. Owned by the tick task.
pub struct TempoLed {
    pin: TempoPin,
}

/// Lit while the transport is running. Owned by the control task.
pub struct RunningLed {
    pin: RunningPin,
}

pub type TempoPin = gpio::gpioc::PC14<gpio::Output>;
pub type RunningPin = gpio::gpioc::PC13<gpio::Output>;

impl TempoLed {
    #[must_use]
    pub fn new(pin: TempoPin) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, on: bool) {
        self.pin.set_state(on.into());
    }
}

impl RunningLed {
    #[must_use]
    pub fn new(pin: RunningPin) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, on: bool) {
        self.pin.set_state(on.into());
    }
}
