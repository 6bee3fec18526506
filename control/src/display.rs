//! Numeric display showing the current tempo.

/// Sink of the displayed value.
///
/// The display is an optional peripheral. Pass `()` where there is none.
pub trait Display {
    fn render(&mut self, value: u16);
}

impl Display for () {
    fn render(&mut self, _value: u16) {}
}

// Common cathode, bit 0 is segment A through bit 6 being segment G.
const DIGITS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

const BLANK: u8 = 0;

/// Multiplexed seven-segment display of `N` digits.
///
/// Only one digit is lit at a time. Call `frame` periodically, fast enough
/// for the eye not to notice, and light the returned digit with the
/// returned segments.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SevenSegment<const N: usize> {
    segments: [u8; N],
    position: usize,
}

impl<const N: usize> SevenSegment<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: [BLANK; N],
            position: 0,
        }
    }

    #[must_use]
    pub fn segments(&self) -> [u8; N] {
        self.segments
    }

    /// Next digit to light up, its index from the left and its segments.
    pub fn frame(&mut self) -> (usize, u8) {
        let frame = (self.position, self.segments[self.position]);
        self.position = (self.position + 1) % N;
        frame
    }
}

impl<const N: usize> Default for SevenSegment<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Display for SevenSegment<N> {
    /// Right-aligned, with leading zeros blanked. Values too wide for the
    /// display lose their most significant digits.
    fn render(&mut self, value: u16) {
        let mut remainder = value;
        for (i, segments) in self.segments.iter_mut().enumerate().rev() {
            *segments = if remainder == 0 && i != N - 1 {
                BLANK
            } else {
                DIGITS[usize::from(remainder % 10)]
            };
            remainder /= 10;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_rendering_three_digits_all_are_lit() {
        let mut display = SevenSegment::<3>::new();
        display.render(120);
        assert_eq!(display.segments(), [DIGITS[1], DIGITS[2], DIGITS[0]]);
    }

    #[test]
    fn when_rendering_two_digits_leading_digit_is_blank() {
        let mut display = SevenSegment::<3>::new();
        display.render(40);
        assert_eq!(display.segments(), [BLANK, DIGITS[4], DIGITS[0]]);
    }

    #[test]
    fn when_rendering_zero_the_last_digit_shows_it() {
        let mut display = SevenSegment::<3>::new();
        display.render(0);
        assert_eq!(display.segments(), [BLANK, BLANK, DIGITS[0]]);
    }

    #[test]
    fn when_value_is_too_wide_it_is_truncated() {
        let mut display = SevenSegment::<3>::new();
        display.render(1234);
        assert_eq!(display.segments(), [DIGITS[2], DIGITS[3], DIGITS[4]]);
    }

    #[test]
    fn frames_cycle_through_digits() {
        let mut display = SevenSegment::<3>::new();
        display.render(300);
        assert_eq!(display.frame(), (0, DIGITS[3]));
        assert_eq!(display.frame(), (1, DIGITS[0]));
        assert_eq!(display.frame(), (2, DIGITS[0]));
        assert_eq!(display.frame(), (0, DIGITS[3]));
    }

    #[test]
    fn eight_lights_all_segments() {
        assert_eq!(DIGITS[8], 0x7F);
    }
}
