//! Tube-style overdrive with soft clipping
//!
//! Control mapping:
//! - knob 1: drive
//! - knob 2: tone (high cut)
//! - knob 3: bass (low shelf boost/cut)
//! - knob 4: level
//! - knob 6: mix
//! - toggle 1: voicing (up = warm, middle = neutral, down = bright)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::shapers::{soft_clip, OnePole};
use crate::dsp::ParamSmoother;
use crate::effects::Effect;

/// Tracking coefficient of the bass shelf's low-pass copy
const BASS_SHELF_ALPHA: f32 = 0.05;

/// Voicing of the tone stage, selected by toggle 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Voicing {
    Warm,
    #[default]
    Neutral,
    Bright,
}

impl Voicing {
    /// Base of the tone filter's usable alpha range. Warm voicing keeps
    /// more low-pass in play, bright voicing less.
    fn tone_base(self) -> f32 {
        match self {
            Voicing::Warm => 0.3,
            Voicing::Neutral => 0.5,
            Voicing::Bright => 0.7,
        }
    }
}

pub struct Overdrive {
    drive: ParamSmoother,
    tone: ParamSmoother,
    bass: ParamSmoother,
    level: ParamSmoother,
    mix: ParamSmoother,

    tone_filter: OnePole,
    bass_shelf: OnePole,
    voicing: Voicing,
}

impl Overdrive {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        Self {
            drive: ParamSmoother::new(20.0, sr, 0.5),
            tone: ParamSmoother::new(20.0, sr, 0.7),
            bass: ParamSmoother::new(20.0, sr, 0.5),
            level: ParamSmoother::new(20.0, sr, 0.8),
            mix: ParamSmoother::new(20.0, sr, 1.0),
            tone_filter: OnePole::new(),
            bass_shelf: OnePole::new(),
            voicing: Voicing::Neutral,
        }
    }
}

impl Effect for Overdrive {
    fn process(&mut self, input: f32) -> f32 {
        let drive = self.drive.tick();
        let tone = self.tone.tick();
        let bass = self.bass.tick();
        let level = self.level.tick();
        let mix = self.mix.tick();

        // Low shelf: blend in a slow-tracking low-pass copy, scaled by a
        // bipolar boost/cut factor centered on the knob midpoint.
        let shelf = self.bass_shelf.tick(input, BASS_SHELF_ALPHA);
        let bass_boost = (bass - 0.5) * 2.0;
        let sample = input + shelf * bass_boost;

        let driven = soft_clip(sample * (1.0 + drive * 9.0));

        let tone_base = self.voicing.tone_base();
        let tone_alpha = tone_base + tone * (1.0 - tone_base) * 0.98;
        let toned = self.tone_filter.tick(driven, tone_alpha);

        let output = input * (1.0 - mix) + toned * mix;
        output * level
    }

    fn reset(&mut self) {
        self.tone_filter.reset();
        self.bass_shelf.reset();
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.drive.set_target(frame.knob(KNOB_1));
        self.tone.set_target(frame.knob(KNOB_2));
        self.bass.set_target(frame.knob(KNOB_3));
        self.level.set_target(frame.knob(KNOB_4));
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.voicing = Voicing::Warm,
            TogglePosition::Middle => self.voicing = Voicing::Neutral,
            TogglePosition::Down => self.voicing = Voicing::Bright,
            TogglePosition::Unknown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(effect: &mut Overdrive, samples: usize) {
        for _ in 0..samples {
            effect.process(0.0);
        }
    }

    #[test]
    fn test_output_finite_and_bounded() {
        let mut od = Overdrive::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_1] = 1.0;
        frame.knobs[KNOB_4] = 1.0;
        frame.knobs[KNOB_6] = 1.0;
        od.update_controls(&frame);
        settle(&mut od, 5000);

        for _ in 0..5000 {
            let out = od.process(1.0);
            assert!(out.is_finite());
            assert!(out.abs() <= 1.2, "overdrive output out of bounds: {}", out);
        }
    }

    #[test]
    fn test_drive_adds_gain_into_clipping() {
        // With full drive the soft clipper saturates a hot input well
        // below its linear value.
        let mut od = Overdrive::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_1] = 1.0;
        frame.knobs[KNOB_2] = 1.0; // tone wide open
        frame.knobs[KNOB_3] = 0.5; // shelf neutral
        frame.knobs[KNOB_4] = 1.0;
        frame.knobs[KNOB_6] = 1.0;
        od.update_controls(&frame);
        settle(&mut od, 5000);

        let mut out = 0.0;
        for _ in 0..2000 {
            out = od.process(0.9);
        }
        assert!(out > 0.5 && out < 0.8, "expected saturated output, got {}", out);
    }

    #[test]
    fn test_mix_zero_passes_dry_scaled_by_level() {
        let mut od = Overdrive::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_4] = 1.0;
        frame.knobs[KNOB_6] = 0.0;
        od.update_controls(&frame);
        settle(&mut od, 10000);

        let out = od.process(0.5);
        assert!((out - 0.5).abs() < 1e-3, "expected dry passthrough, got {}", out);
    }

    #[test]
    fn test_voicing_changes_brightness() {
        // Feed an alternating signal; warm voicing low-passes harder than
        // bright, so its output swing is smaller.
        let swing = |voicing: TogglePosition| {
            let mut od = Overdrive::new(48000);
            let mut frame = ControlFrame::default();
            frame.knobs[KNOB_2] = 0.0;
            frame.knobs[KNOB_4] = 1.0;
            frame.knobs[KNOB_6] = 1.0;
            frame.toggles[TOGGLE_1] = voicing;
            od.update_controls(&frame);
            settle(&mut od, 5000);

            let mut max = 0.0f32;
            for i in 0..2000 {
                let input = if i % 2 == 0 { 0.5 } else { -0.5 };
                max = max.max(od.process(input).abs());
            }
            max
        };

        let warm = swing(TogglePosition::Up);
        let bright = swing(TogglePosition::Down);
        assert!(warm < bright, "warm {} should swing less than bright {}", warm, bright);
    }
}
