//! Fuzz with asymmetric clipping and a noise gate
//!
//! Control mapping:
//! - knob 1: fuzz (intensity)
//! - knob 2: tone (high cut)
//! - knob 3: gate (noise gate threshold)
//! - knob 4: level
//! - knob 6: mix
//! - toggle 1: character (up = vintage, middle = modern, down = octave)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::shapers::{modern_clip, octave_clip, vintage_clip, DcBlocker, OnePole};
use crate::dsp::ParamSmoother;
use crate::effects::Effect;

const MAX_GAIN: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Character {
    #[default]
    Vintage,
    Modern,
    Octave,
}

pub struct Fuzz {
    fuzz: ParamSmoother,
    tone: ParamSmoother,
    gate: ParamSmoother,
    level: ParamSmoother,
    mix: ParamSmoother,

    dc_blocker: DcBlocker,
    tone_filter: OnePole,
    character: Character,
}

impl Fuzz {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        Self {
            fuzz: ParamSmoother::new(20.0, sr, 0.7),
            tone: ParamSmoother::new(20.0, sr, 0.5),
            gate: ParamSmoother::new(20.0, sr, 0.0),
            level: ParamSmoother::new(20.0, sr, 0.7),
            mix: ParamSmoother::new(20.0, sr, 1.0),
            dc_blocker: DcBlocker::new(),
            tone_filter: OnePole::new(),
            character: Character::Vintage,
        }
    }
}

impl Effect for Fuzz {
    fn process(&mut self, input: f32) -> f32 {
        let fuzz = self.fuzz.tick();
        let tone = self.tone.tick();
        let gate = self.gate.tick();
        let level = self.level.tick();
        let mix = self.mix.tick();

        // Gate: heavy pre-gain would otherwise amplify idle hum
        let gate_threshold = gate * 0.1;
        let input = if input.abs() < gate_threshold { 0.0 } else { input };

        let amplified = input * (1.0 + fuzz * (MAX_GAIN - 1.0));

        let clipped = match self.character {
            Character::Vintage => vintage_clip(amplified),
            Character::Modern => modern_clip(amplified),
            Character::Octave => octave_clip(amplified),
        };

        // Asymmetric clipping shifts the mean; block it before the tone stage
        let clipped = self.dc_blocker.tick(clipped);

        let tone_alpha = 0.2 + tone * 0.79;
        let toned = self.tone_filter.tick(clipped, tone_alpha);

        let output = input * (1.0 - mix) + toned * mix;
        output * level * 0.8
    }

    fn reset(&mut self) {
        self.dc_blocker.reset();
        self.tone_filter.reset();
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.fuzz.set_target(frame.knob(KNOB_1));
        self.tone.set_target(frame.knob(KNOB_2));
        self.gate.set_target(frame.knob(KNOB_3));
        self.level.set_target(frame.knob(KNOB_4));
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.character = Character::Vintage,
            TogglePosition::Middle => self.character = Character::Modern,
            TogglePosition::Down => self.character = Character::Octave,
            TogglePosition::Unknown => {}
        }
    }
}
