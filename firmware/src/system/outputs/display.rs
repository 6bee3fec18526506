use tick_tock_control::display::{Display, SevenSegment};

use crate::system::hal::gpio;

pub const DIGITS: usize = 3;

/// Three digit common cathode display, multiplexed one digit per render.
///
/// The control loop renders every millisecond, so the whole display gets
/// refreshed at over 300 Hz.
pub struct SegmentDisplay {
    pins: Pins,
    display: SevenSegment<DIGITS>,
}

pub struct Pins {
    pub segments: (
        SegmentAPin,
        SegmentBPin,
        SegmentCPin,
        SegmentDPin,
        SegmentEPin,
        SegmentFPin,
        SegmentGPin,
    ),
    pub digits: (Digit1Pin, Digit2Pin, Digit3Pin),
}

type SegmentAPin = gpio::gpioc::PC3<gpio::Output>;
type SegmentBPin = gpio::gpiod::PD2<gpio::Output>;
type SegmentCPin = gpio::gpioc::PC9<gpio::Output>;
type SegmentDPin = gpio::gpioc::PC11<gpio::Output>;
type SegmentEPin = gpio::gpiod::PD3<gpio::Output>;
type SegmentFPin = gpio::gpioc::PC2<gpio::Output>;
type SegmentGPin = gpio::gpioc::PC10<gpio::Output>;
type Digit1Pin = gpio::gpiob::PB4<gpio::Output>;
type Digit2Pin = gpio::gpioc::PC8<gpio::Output>;
type Digit3Pin = gpio::gpioc::PC12<gpio::Output>;

impl SegmentDisplay {
    #[must_use]
    pub fn new(pins: Pins) -> Self {
        let mut display = Self {
            pins,
            display: SevenSegment::new(),
        };
        display.set_segments(0);
        display.select_digit(None);
        display
    }

    pub fn set_segments(&mut self, segments: u8) {
        let lit = |bit: u8| (segments & (1 << bit) != 0).into();
        self.pins.segments.0.set_state(lit(0));
        self.pins.segments.1.set_state(lit(1));
        self.pins.segments.2.set_state(lit(2));
        self.pins.segments.3.set_state(lit(3));
        self.pins.segments.4.set_state(lit(4));
        self.pins.segments.5.set_state(lit(5));
        self.pins.segments.6.set_state(lit(6));
    }

    /// Digits are selected by pulling their common cathode low.
    pub fn select_digit(&mut self, digit: Option<usize>) {
        let selected = |index: usize| (digit != Some(index)).into();
        self.pins.digits.0.set_state(selected(0));
        self.pins.digits.1.set_state(selected(1));
        self.pins.digits.2.set_state(selected(2));
    }
}

impl Display for SegmentDisplay {
    fn render(&mut self, value: u16) {
        self.display.render(value);
        let (digit, segments) = self.display.frame();
        // Blank first to avoid ghosting of the previous digit.
        self.select_digit(None);
        self.set_segments(segments);
        self.select_digit(Some(digit));
    }
}
