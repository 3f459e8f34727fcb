//! Dynamics compressor with envelope follower and knee selection
//!
//! Control mapping:
//! - knob 1: threshold (0.01-1.0 linear)
//! - knob 2: ratio (1:1 to 20:1)
//! - knob 3: attack coefficient (0.5-0.99)
//! - knob 4: release coefficient (0.9-0.999)
//! - knob 5: makeup gain (x1 to x10)
//! - knob 6: mix (parallel compression)
//! - toggle 1: knee (up = hard, middle = medium, down = soft)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_5, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::{EnvelopeFollower, ParamSmoother};
use crate::effects::Effect;

/// Linear level floor before any dB conversion. Near-silent input would
/// otherwise push the log toward -inf.
const LEVEL_FLOOR: f32 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Knee {
    #[default]
    Hard,
    Medium,
    Soft,
}

impl Knee {
    fn width_db(self) -> f32 {
        match self {
            Knee::Hard => 0.0,
            Knee::Medium => 6.0,
            Knee::Soft => 12.0,
        }
    }
}

#[inline]
fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.log10()
}

#[inline]
fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

pub struct Compressor {
    threshold: ParamSmoother,
    ratio: ParamSmoother,
    attack: ParamSmoother,
    release: ParamSmoother,
    makeup: ParamSmoother,
    mix: ParamSmoother,

    follower: EnvelopeFollower,
    knee: Knee,
    gain_reduction_db: f32,
}

impl Compressor {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        Self {
            threshold: ParamSmoother::new(20.0, sr, 0.5),
            ratio: ParamSmoother::new(20.0, sr, 0.25),
            attack: ParamSmoother::new(20.0, sr, 0.3),
            release: ParamSmoother::new(20.0, sr, 0.5),
            makeup: ParamSmoother::new(20.0, sr, 0.5),
            mix: ParamSmoother::new(20.0, sr, 1.0),
            follower: EnvelopeFollower::new(),
            knee: Knee::Hard,
            gain_reduction_db: 0.0,
        }
    }

    /// Current gain reduction in dB, for metering. Positive numbers mean
    /// the compressor is working.
    pub fn gain_reduction_db(&self) -> f32 {
        self.gain_reduction_db
    }

    /// Static gain law: linear gain for a given envelope level.
    fn compute_gain(&mut self, env_level: f32, threshold: f32, ratio: f32) -> f32 {
        if env_level < LEVEL_FLOOR {
            return 1.0;
        }

        let env_db = linear_to_db(env_level);
        let thresh_db = linear_to_db(threshold + LEVEL_FLOOR);

        let gain_db = match self.knee {
            Knee::Hard => {
                if env_db > thresh_db {
                    thresh_db + (env_db - thresh_db) / ratio - env_db
                } else {
                    0.0
                }
            }
            _ => {
                let knee = self.knee.width_db();
                if env_db < thresh_db - knee / 2.0 {
                    0.0
                } else if env_db > thresh_db + knee / 2.0 {
                    thresh_db + (env_db - thresh_db) / ratio - env_db
                } else {
                    // Quadratic interpolation across the knee
                    let x = env_db - thresh_db + knee / 2.0;
                    ((1.0 / ratio - 1.0) * x * x) / (2.0 * knee)
                }
            }
        };

        self.gain_reduction_db = -gain_db;
        db_to_linear(gain_db)
    }
}

impl Effect for Compressor {
    fn process(&mut self, input: f32) -> f32 {
        let threshold = self.threshold.tick();
        let ratio = self.ratio.tick();
        let attack = self.attack.tick();
        let release = self.release.tick();
        let makeup = self.makeup.tick();
        let mix = self.mix.tick();

        let env_level = self.follower.tick(input, attack, release);
        let gain = self.compute_gain(env_level, threshold, ratio);

        let compressed = (input * gain * makeup).clamp(-1.0, 1.0);

        // Parallel compression: dry and compressed paths blended
        input * (1.0 - mix) + compressed * mix
    }

    fn reset(&mut self) {
        self.follower.reset();
        self.gain_reduction_db = 0.0;
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.threshold.set_target(0.01 + frame.knob(KNOB_1) * 0.99);
        self.ratio.set_target(1.0 + frame.knob(KNOB_2) * 19.0);
        self.attack.set_target(0.5 + frame.knob(KNOB_3) * 0.49);
        self.release.set_target(0.9 + frame.knob(KNOB_4) * 0.099);
        self.makeup.set_target(1.0 + frame.knob(KNOB_5) * 9.0);
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.knee = Knee::Hard,
            TogglePosition::Middle => self.knee = Knee::Medium,
            TogglePosition::Down => self.knee = Knee::Soft,
            TogglePosition::Unknown => {}
        }
    }

    fn led_level(&self) -> f32 {
        // Dim the LED as gain reduction deepens
        let meter = (self.gain_reduction_db / 20.0).clamp(0.0, 1.0);
        1.0 - meter * 0.8
    }
}
