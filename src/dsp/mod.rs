//! Shared per-sample DSP primitives used by the effect units

pub mod delay_line;
pub mod envelope;
pub mod lfo;
pub mod shapers;
pub mod smoother;

pub use self::delay_line::DelayLine;
pub use self::envelope::EnvelopeFollower;
pub use self::lfo::{Lfo, Waveform};
pub use self::shapers::{DcBlocker, OnePole};
pub use self::smoother::ParamSmoother;
