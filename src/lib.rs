//! Per-sample guitar effect processing for an embedded pedal platform
//!
//! Eight mono effects (overdrive, distortion, fuzz, tremolo, chorus, delay,
//! reverb, compressor) share one contract: consume one input sample plus the
//! current control targets, produce one output sample. Everything is sized
//! at construction from the configured sample rate and runs without
//! allocation or locking inside the audio callback. Hardware reading, LED
//! PWM and buffer I/O live outside this crate; they hand in normalized
//! control snapshots and consume the processed stream.

pub mod controls;
pub mod dsp;
pub mod effects;
pub mod pedal;
pub mod utils;

pub use controls::{ControlFrame, TogglePosition};
pub use effects::{
    Chorus, Compressor, Delay, Distortion, Effect, Fuzz, Overdrive, Reverb, Tremolo,
};
pub use pedal::Pedal;
