//! Raw input sampled from hardware and its clean-up.

pub mod debounced;
pub mod snapshot;

pub use self::debounced::{Debounced, Level, LevelChange, DEBOUNCE_TIME_MS};
pub use self::snapshot::InputSnapshot;
