//! Timing core of a MIDI clock generator, free of any hardware access.
//!
//! It is meant to run in a firmware with two execution contexts: a timer
//! interrupt firing once per clock tick, and a slower control loop polling
//! buttons and the tempo encoder. They talk to each other only through
//! [`SharedState`], whose every field has exactly one writer.
//!
//! Following is the flow of data between components:
//!
//! ```text
//!   [Transport button] [Tap button] [Encoder]
//!             |             |           |
//!             V             V           V
//!           [ ControlLoop {Transport, TapTempo} ] -----> [ Display ]
//!              |                    |
//!   (tempo, transport word)         | (Start, Stop, All Notes Off)
//!              V                    V
//!        {SharedState}         [ MIDI out ] <---+
//!              |                                | (Clock)
//!              V                                |
//!       [ TickGenerator ] ----------------------+
//!              |
//!              V
//!   [ Tempo LED, timer period ]
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod control;
pub mod display;
pub mod encoder;
pub mod input;
pub mod midi;
pub mod output;
pub mod shared;
pub mod tap_tempo;
pub mod tempo;
pub mod tick;
pub mod transport;

mod log;

pub use crate::control::ControlLoop;
pub use crate::input::{InputSnapshot, Level};
pub use crate::midi::{Channel, MidiMessage, MidiSink};
pub use crate::output::DesiredOutput;
pub use crate::shared::SharedState;
pub use crate::tempo::{calc_period, DEFAULT_TEMPO, PPQ, TEMPO_MAX, TEMPO_MIN};
pub use crate::tick::{TickGenerator, TickOutput};
