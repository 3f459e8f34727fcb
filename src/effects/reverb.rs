//! Schroeder reverberator
//!
//! Four parallel feedback comb filters with damping in their feedback
//! paths, averaged and diffused through two series allpass filters, behind
//! a pre-delay line.
//!
//! Control mapping:
//! - knob 1: size (decay time)
//! - knob 2: damping (high frequency absorption)
//! - knob 3: pre-delay
//! - knob 4: level (wet level)
//! - knob 6: mix
//! - toggle 1: room type (up = small, middle = medium, down = hall)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::{DelayLine, ParamSmoother};
use crate::effects::Effect;

/// Comb delay lengths in samples at the 48 kHz reference rate. Mutually
/// non-harmonic so the resonances interleave instead of stacking.
const COMB_DELAYS_48K: [usize; 4] = [1557, 1617, 1491, 1422];
/// Allpass delay lengths at the 48 kHz reference rate
const ALLPASS_DELAYS_48K: [usize; 2] = [225, 556];
/// Allpass diffusion gain
const ALLPASS_GAIN: f32 = 0.5;
/// Pre-delay capacity in milliseconds
const MAX_PREDELAY_MS: f32 = 100.0;
/// Comb feedback ceiling; higher values ring essentially forever
const MAX_FEEDBACK: f32 = 0.95;

/// Feedback comb filter with a one-pole damper in the feedback path
#[derive(Debug, Clone)]
struct CombFilter {
    buffer: Vec<f32>,
    index: usize,
    damp_state: f32,
}

impl CombFilter {
    fn new(length: usize) -> Self {
        Self {
            buffer: vec![0.0; length.max(1)],
            index: 0,
            damp_state: 0.0,
        }
    }

    #[inline]
    fn process(&mut self, input: f32, feedback: f32, damping: f32) -> f32 {
        let output = self.buffer[self.index];

        self.damp_state = output * (1.0 - damping) + self.damp_state * damping;
        self.buffer[self.index] = input + self.damp_state * feedback;

        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
        output
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.index = 0;
        self.damp_state = 0.0;
    }
}

/// Allpass diffuser: flat magnitude response, smeared phase
#[derive(Debug, Clone)]
struct AllpassFilter {
    buffer: Vec<f32>,
    index: usize,
}

impl AllpassFilter {
    fn new(length: usize) -> Self {
        Self {
            buffer: vec![0.0; length.max(1)],
            index: 0,
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let buffered = self.buffer[self.index];
        let output = -input + buffered;
        self.buffer[self.index] = input + buffered * ALLPASS_GAIN;

        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }
        output
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.index = 0;
    }
}

/// Room type scaling of the size-to-feedback mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RoomType {
    Small,
    #[default]
    Medium,
    Hall,
}

impl RoomType {
    fn size_multiplier(self) -> f32 {
        match self {
            RoomType::Small => 0.5,
            RoomType::Medium => 1.0,
            RoomType::Hall => 1.5,
        }
    }
}

pub struct Reverb {
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
    predelay_line: DelayLine,

    size: ParamSmoother,
    damping: ParamSmoother,
    predelay: ParamSmoother,
    level: ParamSmoother,
    mix: ParamSmoother,

    room: RoomType,
}

impl Reverb {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        // Scale the reference delay tables so room tuning is independent
        // of the configured rate.
        let scale = sr / 48000.0;
        let scaled = |base: usize| ((base as f32 * scale) as usize).max(1);

        Self {
            combs: [
                CombFilter::new(scaled(COMB_DELAYS_48K[0])),
                CombFilter::new(scaled(COMB_DELAYS_48K[1])),
                CombFilter::new(scaled(COMB_DELAYS_48K[2])),
                CombFilter::new(scaled(COMB_DELAYS_48K[3])),
            ],
            allpasses: [
                AllpassFilter::new(scaled(ALLPASS_DELAYS_48K[0])),
                AllpassFilter::new(scaled(ALLPASS_DELAYS_48K[1])),
            ],
            predelay_line: DelayLine::new(((MAX_PREDELAY_MS / 1000.0) * sr) as usize),
            size: ParamSmoother::new(20.0, sr, 0.5),
            damping: ParamSmoother::new(20.0, sr, 0.5),
            predelay: ParamSmoother::new(20.0, sr, 0.0),
            level: ParamSmoother::new(20.0, sr, 1.0),
            mix: ParamSmoother::new(20.0, sr, 0.3),
            room: RoomType::Medium,
        }
    }
}

impl Effect for Reverb {
    fn process(&mut self, input: f32) -> f32 {
        let size = self.size.tick();
        let damping = self.damping.tick();
        let predelay = self.predelay.tick();
        let level = self.level.tick();
        let mix = self.mix.tick();

        let feedback = (0.5 + size * self.room.size_multiplier() * 0.35).min(MAX_FEEDBACK);

        let predelay_samples = (predelay * self.predelay_line.capacity() as f32) as usize;
        let predelayed = self.predelay_line.read(predelay_samples);
        self.predelay_line.write(input);

        let mut comb_sum = 0.0;
        for comb in &mut self.combs {
            comb_sum += comb.process(predelayed, feedback, damping);
        }
        let comb_out = comb_sum / self.combs.len() as f32;

        let mut diffused = comb_out;
        for allpass in &mut self.allpasses {
            diffused = allpass.process(diffused);
        }

        let wet = diffused * level;
        input * (1.0 - mix) + wet * mix
    }

    fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        for allpass in &mut self.allpasses {
            allpass.clear();
        }
        self.predelay_line.clear();
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.size.set_target(frame.knob(KNOB_1));
        self.damping.set_target(frame.knob(KNOB_2));
        self.predelay.set_target(frame.knob(KNOB_3));
        self.level.set_target(frame.knob(KNOB_4));
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.room = RoomType::Small,
            TogglePosition::Middle => self.room = RoomType::Medium,
            TogglePosition::Down => self.room = RoomType::Hall,
            TogglePosition::Unknown => {}
        }
    }
}
