//! Low frequency oscillator for modulation
//!
//! A phase accumulator in [0.0, 1.0) plus waveform functions of phase.
//! Tremolo morphs continuously between shapes; chorus selects one shape
//! with a toggle switch.

use std::f32::consts::PI;

/// Selectable LFO waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Square,
}

/// Sine wave from phase (0.0 to 1.0), range -1.0 to 1.0
#[inline]
pub fn sine(phase: f32) -> f32 {
    (phase * 2.0 * PI).sin()
}

/// Triangle wave from phase (0.0 to 1.0), range -1.0 to 1.0
#[inline]
pub fn triangle(phase: f32) -> f32 {
    2.0 * (2.0 * (phase - (phase + 0.5).floor())).abs() - 1.0
}

/// Square wave from phase (0.0 to 1.0), range -1.0 to 1.0
#[inline]
pub fn square(phase: f32) -> f32 {
    if phase < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Phase accumulator driving the LFO waveforms
#[derive(Debug, Clone, Default)]
pub struct Lfo {
    phase: f32,
}

impl Lfo {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Advance the phase by `rate / sample_rate`, wrapping by subtraction
    /// so continuity is preserved at high rates.
    #[inline]
    pub fn advance(&mut self, rate_hz: f32, sample_rate: f32) {
        self.phase += rate_hz / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }

    /// Current phase (0.0 to 1.0)
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Value of the selected waveform at the current phase.
    #[inline]
    pub fn value(&self, waveform: Waveform) -> f32 {
        match waveform {
            Waveform::Sine => sine(self.phase),
            Waveform::Triangle => triangle(self.phase),
            Waveform::Square => square(self.phase),
        }
    }

    /// Continuous waveform morph controlled by `shape` in 0.0-1.0.
    ///
    /// Crossfades sine to triangle over the lower half of the range and
    /// triangle to square over the upper half.
    #[inline]
    pub fn morph(&self, shape: f32) -> f32 {
        let sine = sine(self.phase);
        let triangle = triangle(self.phase);
        let square = square(self.phase);

        if shape < 0.5 {
            let t = shape * 2.0;
            sine * (1.0 - t) + triangle * t
        } else {
            let t = (shape - 0.5) * 2.0;
            triangle * (1.0 - t) + square * t
        }
    }

    /// Reset the phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
