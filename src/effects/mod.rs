//! Effect units
//!
//! Each effect consumes one input sample and the current control targets
//! and produces one output sample. All internal buffers are sized at
//! construction from the configured sample rate; `process` never allocates
//! and never blocks, so it is safe inside a hard real-time audio callback.

pub mod chorus;
pub mod compressor;
pub mod delay;
pub mod distortion;
pub mod fuzz;
pub mod overdrive;
pub mod reverb;
pub mod tremolo;

pub use self::chorus::Chorus;
pub use self::compressor::Compressor;
pub use self::delay::Delay;
pub use self::distortion::Distortion;
pub use self::fuzz::Fuzz;
pub use self::overdrive::Overdrive;
pub use self::reverb::Reverb;
pub use self::tremolo::Tremolo;

use crate::controls::ControlFrame;

/// Contract shared by every effect unit.
///
/// `process` and `update_controls` run in the same execution context:
/// controls are applied between samples, never mid-sample, so no locking
/// is involved and a single instance is never accessed concurrently.
pub trait Effect {
    /// Process one audio sample through the effect.
    ///
    /// Input is nominally -1.0 to 1.0; output is finite for any finite
    /// in-range input.
    fn process(&mut self, input: f32) -> f32;

    /// Restore all buffers, phases and envelopes to construction-time
    /// values. Parameter targets are left untouched.
    fn reset(&mut self);

    /// Retarget parameter smoothers and discrete mode selections from a
    /// control snapshot. Called between samples, typically once per block.
    fn update_controls(&mut self, frame: &ControlFrame);

    /// Normalized indicator value for the bypass LED, polled at control
    /// rate. Not part of the audio path.
    fn led_level(&self) -> f32 {
        1.0
    }
}
