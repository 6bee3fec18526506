use tick_tock_control::encoder::{Detent, Encoder, Quadrature};

use crate::system::hal::gpio;

/// Mechanical rotary encoder, decoded in software.
///
/// It is sampled on every poll of the control loop, which is fast enough
/// for a hand turned detented encoder.
pub struct QuadratureEncoder {
    pins: Pins,
    quadrature: Quadrature,
    detent: Detent,
}

pub struct Pins {
    pub a: APin,
    pub b: BPin,
}

pub type APin = gpio::gpiob::PB14<gpio::Input>;
pub type BPin = gpio::gpiob::PB15<gpio::Input>;

impl QuadratureEncoder {
    #[must_use]
    pub fn new(pins: Pins) -> Self {
        let quadrature = Quadrature::starting_at(pins.a.is_low(), pins.b.is_low());
        Self {
            pins,
            quadrature,
            detent: Detent::new(),
        }
    }
}

impl Encoder for QuadratureEncoder {
    fn read_delta(&mut self) -> i32 {
        let count = self
            .quadrature
            .update(self.pins.a.is_low(), self.pins.b.is_low());
        self.detent.update(count)
    }
}
