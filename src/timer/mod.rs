// timer/mod.rs - Countdown Timer
//
// The state machine, its 1 Hz tick source, and the display text.

pub mod clock;
pub mod engine;
pub mod format;

pub use clock::TickClock;
pub use engine::{Phase, TimerEngine, TimerEvent};
pub use format::{display_text, format_remaining};
