//! Playback state machine and time-driven marker effects
//!
//! Everything that moves the day cursor goes through [`Playback::apply`].

mod playback;
mod pulse;
mod speed;

pub use playback::{Playback, PlaybackEvent, PlaybackMode, TickToken, Transition};
pub use pulse::marker_pulse;
pub use speed::Speed;
