//! Digital delay with filtered feedback
//!
//! Control mapping:
//! - knob 1: time (scaled by the range toggle)
//! - knob 2: feedback (0-90%)
//! - knob 3: filter (high cut on the feedback path)
//! - knob 4: level (wet level)
//! - knob 6: mix
//! - toggle 1: time range (up = short, middle = medium, down = long)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::shapers::OnePole;
use crate::dsp::{DelayLine, ParamSmoother};
use crate::effects::Effect;

/// Delay line length in seconds
const MAX_DELAY_SECONDS: f32 = 1.0;

pub struct Delay {
    delay_line: DelayLine,
    sample_rate: f32,

    time: ParamSmoother,
    feedback: ParamSmoother,
    filter: ParamSmoother,
    level: ParamSmoother,
    mix: ParamSmoother,

    /// One-pole low-pass in the feedback path
    feedback_filter: OnePole,
    time_multiplier: f32,
}

impl Delay {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        let capacity = (sr * MAX_DELAY_SECONDS) as usize;
        Self {
            delay_line: DelayLine::new(capacity),
            sample_rate: sr,
            time: ParamSmoother::new(20.0, sr, 0.5),
            feedback: ParamSmoother::new(20.0, sr, 0.5),
            filter: ParamSmoother::new(20.0, sr, 0.7),
            level: ParamSmoother::new(20.0, sr, 1.0),
            mix: ParamSmoother::new(20.0, sr, 0.5),
            feedback_filter: OnePole::new(),
            time_multiplier: 1.0,
        }
    }
}

impl Effect for Delay {
    fn process(&mut self, input: f32) -> f32 {
        let time = self.time.tick();
        let feedback = self.feedback.tick();
        let filter = self.filter.tick();
        let level = self.level.tick();
        let mix = self.mix.tick();

        // 50 ms floor keeps the tap clear of the write cursor even at the
        // shortest range setting.
        let delay_samples = ((0.05 + time * 0.95) * self.sample_rate) as usize;
        let delayed = self.delay_line.read(delay_samples);

        // High cut in the feedback path so repeats darken as they decay
        let filter_alpha = 0.1 + filter * 0.89;
        let filtered = self.feedback_filter.tick(delayed, filter_alpha);

        // Clamp the regenerated write so feedback can never run away
        let write = (input + filtered * feedback).clamp(-1.0, 1.0);
        self.delay_line.write(write);

        let wet = delayed * level;
        input * (1.0 - mix) + wet * mix
    }

    fn reset(&mut self) {
        self.delay_line.clear();
        self.feedback_filter.reset();
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.time_multiplier = match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => 0.25,
            TogglePosition::Middle => 0.5,
            TogglePosition::Down => 1.0,
            TogglePosition::Unknown => self.time_multiplier,
        };

        self.time.set_target(frame.knob(KNOB_1) * self.time_multiplier);
        self.feedback.set_target(frame.knob(KNOB_2) * 0.9);
        self.filter.set_target(frame.knob(KNOB_3));
        self.level.set_target(frame.knob(KNOB_4));
        self.mix.set_target(frame.knob(KNOB_6));
    }
}
