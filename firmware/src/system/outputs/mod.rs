#[cfg(feature = "display")]
pub mod display;
pub mod leds;

use tick_tock_control::DesiredOutput;

use self::leds::{RunningLed, RunningPin};

pub struct Outputs {
    pub running_led: RunningLed,
}

pub struct Config {
    pub running_led: RunningPin,
}

impl Outputs {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            running_led: RunningLed::new(config.running_led),
        }
    }

    pub fn set(&mut self, desired: &DesiredOutput) {
        self.running_led.set(desired.running_indicator);
    }
}
