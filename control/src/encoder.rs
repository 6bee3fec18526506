//! Rotary encoder turned into discrete tempo steps.

/// Quadrature counts per single tempo step, one mechanical detent.
pub const ENCODER_COUNTS_PER_STEP: i32 = 4;

/// Source of tempo step requests.
///
/// The encoder is an optional peripheral. Pass `()` where there is none.
pub trait Encoder {
    /// Steps turned since the last call, positive clockwise.
    fn read_delta(&mut self) -> i32;
}

impl Encoder for () {
    fn read_delta(&mut self) -> i32 {
        0
    }
}

// Indexed by the previous and the current state of channels A and B.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Decoder of raw quadrature signals into a wrapping 16-bit count.
///
/// It must be sampled faster than the channels change. Invalid transitions,
/// skipping a state, are ignored.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quadrature {
    state: u8,
    count: u16,
}

impl Quadrature {
    #[must_use]
    pub const fn new() -> Self {
        Self { state: 0, count: 0 }
    }

    /// Take the resting position of the channels as the reference.
    #[must_use]
    pub const fn starting_at(a: bool, b: bool) -> Self {
        Self {
            state: state(a, b),
            count: 0,
        }
    }

    pub fn update(&mut self, a: bool, b: bool) -> u16 {
        let state = state(a, b);
        let direction = TRANSITIONS[usize::from((self.state << 2) | state)];
        self.state = state;
        self.count = self.count.wrapping_add_signed(i16::from(direction));
        self.count
    }

    #[must_use]
    pub fn count(&self) -> u16 {
        self.count
    }
}

const fn state(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}

/// Quantize a free-running quadrature counter into steps.
///
/// The counter is expected to be a 16-bit hardware register, wrapping in
/// both directions. Counts accumulate until they make a full step, the
/// remainder forms a deadband, so wiggling within a detent does nothing.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Detent {
    last_count: Option<u16>,
    accumulated: i32,
}

impl Detent {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_count: None,
            accumulated: 0,
        }
    }

    pub fn update(&mut self, count: u16) -> i32 {
        // The first reading only establishes the reference.
        let last_count = self.last_count.replace(count).unwrap_or(count);
        self.accumulated += i32::from(count.wrapping_sub(last_count) as i16);

        let steps = self.accumulated / ENCODER_COUNTS_PER_STEP;
        self.accumulated -= steps * ENCODER_COUNTS_PER_STEP;
        steps
    }
}
