//! Timing primitives: clocks and the debounce coordinator.

pub mod clock;
pub mod debounce;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
