//! Hard clipping distortion with pre and post filtering
//!
//! Control mapping:
//! - knob 1: gain
//! - knob 2: tone (high cut)
//! - knob 3: bass (boost/cut)
//! - knob 4: level
//! - knob 6: mix (parallel distortion)
//! - toggle 1: clipping mode (up = hard, middle = medium, down = soft)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::shapers::{hard_clip, soft_clip, DcBlocker, OnePole};
use crate::dsp::ParamSmoother;
use crate::effects::Effect;

const MAX_GAIN: f32 = 100.0;
const BASS_SHELF_ALPHA: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ClipMode {
    #[default]
    Hard,
    Medium,
    Soft,
}

pub struct Distortion {
    gain: ParamSmoother,
    tone: ParamSmoother,
    bass: ParamSmoother,
    level: ParamSmoother,
    mix: ParamSmoother,

    dc_blocker: DcBlocker,
    bass_shelf: OnePole,
    tone_filter: OnePole,
    clip_mode: ClipMode,
}

impl Distortion {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        Self {
            gain: ParamSmoother::new(20.0, sr, 0.5),
            tone: ParamSmoother::new(20.0, sr, 0.6),
            bass: ParamSmoother::new(20.0, sr, 0.5),
            level: ParamSmoother::new(20.0, sr, 0.7),
            mix: ParamSmoother::new(20.0, sr, 1.0),
            dc_blocker: DcBlocker::new(),
            bass_shelf: OnePole::new(),
            tone_filter: OnePole::new(),
            clip_mode: ClipMode::Hard,
        }
    }
}

impl Effect for Distortion {
    fn process(&mut self, input: f32) -> f32 {
        let gain = self.gain.tick();
        let tone = self.tone.tick();
        let bass = self.bass.tick();
        let level = self.level.tick();
        let mix = self.mix.tick();

        // DC removal before the gain stage keeps the clipper symmetric
        let sample = self.dc_blocker.tick(input);

        let shelf = self.bass_shelf.tick(sample, BASS_SHELF_ALPHA);
        let bass_boost = (bass - 0.5) * 2.0;
        let sample = sample + shelf * bass_boost;

        let amplified = sample * (1.0 + gain * (MAX_GAIN - 1.0));

        let clipped = match self.clip_mode {
            ClipMode::Hard => hard_clip(amplified, 0.7),
            ClipMode::Medium => soft_clip(hard_clip(amplified, 0.85) * 0.8),
            ClipMode::Soft => soft_clip(amplified * 0.5),
        };

        let tone_alpha = 0.3 + tone * 0.69;
        let toned = self.tone_filter.tick(clipped, tone_alpha);

        let output = input * (1.0 - mix) + toned * mix;
        output * level
    }

    fn reset(&mut self) {
        self.dc_blocker.reset();
        self.bass_shelf.reset();
        self.tone_filter.reset();
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.gain.set_target(frame.knob(KNOB_1));
        self.tone.set_target(frame.knob(KNOB_2));
        self.bass.set_target(frame.knob(KNOB_3));
        self.level.set_target(frame.knob(KNOB_4));
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.clip_mode = ClipMode::Hard,
            TogglePosition::Middle => self.clip_mode = ClipMode::Medium,
            TogglePosition::Down => self.clip_mode = ClipMode::Soft,
            TogglePosition::Unknown => {}
        }
    }
}
