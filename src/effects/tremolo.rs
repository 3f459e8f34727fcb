//! Amplitude modulation tremolo
//!
//! Control mapping:
//! - knob 1: rate (0.5-20 Hz)
//! - knob 2: depth
//! - knob 3: shape (LFO waveform morph)
//! - knob 4: level
//! - knob 6: mix
//! - toggle 1: mode (up = classic, middle = harmonic, down = opto)

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_3, KNOB_4, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::lfo::{sine, Lfo};
use crate::dsp::ParamSmoother;
use crate::effects::Effect;

/// Photocell response coefficients for opto mode: the cell darkens fast
/// and recovers slowly.
const OPTO_ATTACK_COEFF: f32 = 0.99;
const OPTO_RELEASE_COEFF: f32 = 0.995;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TremoloMode {
    #[default]
    Classic,
    Harmonic,
    Opto,
}

pub struct Tremolo {
    rate: ParamSmoother,
    depth: ParamSmoother,
    shape: ParamSmoother,
    level: ParamSmoother,
    mix: ParamSmoother,

    lfo: Lfo,
    sample_rate: f32,
    mode: TremoloMode,
    opto_state: f32,
}

impl Tremolo {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        Self {
            rate: ParamSmoother::new(20.0, sr, 0.3),
            depth: ParamSmoother::new(20.0, sr, 0.5),
            shape: ParamSmoother::new(20.0, sr, 0.0),
            level: ParamSmoother::new(20.0, sr, 1.0),
            mix: ParamSmoother::new(20.0, sr, 1.0),
            lfo: Lfo::new(),
            sample_rate: sr,
            mode: TremoloMode::Classic,
            opto_state: 1.0,
        }
    }
}

impl Effect for Tremolo {
    fn process(&mut self, input: f32) -> f32 {
        let rate = self.rate.tick();
        let depth = self.depth.tick();
        let shape = self.shape.tick();
        let level = self.level.tick();
        let mix = self.mix.tick();

        let lfo = self.lfo.morph(shape);

        let amplitude = match self.mode {
            TremoloMode::Classic => 1.0 - depth * 0.5 * (1.0 + lfo),
            // Harmonic attenuates only, never boosting past unity
            TremoloMode::Harmonic => 1.0 - depth * (lfo + 1.0) * 0.5,
            TremoloMode::Opto => {
                let target = 1.0 - depth * (lfo + 1.0) * 0.5;
                let coeff = if target < self.opto_state {
                    OPTO_ATTACK_COEFF
                } else {
                    OPTO_RELEASE_COEFF
                };
                self.opto_state = self.opto_state * coeff + target * (1.0 - coeff);
                self.opto_state
            }
        };

        let amplitude = amplitude.clamp(0.0, 1.0);

        self.lfo.advance(rate, self.sample_rate);

        let modulated = input * amplitude;
        let output = input * (1.0 - mix) + modulated * mix;
        output * level
    }

    fn reset(&mut self) {
        self.lfo.reset();
        self.opto_state = 1.0;
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.rate.set_target(0.5 + frame.knob(KNOB_1) * 19.5);
        self.depth.set_target(frame.knob(KNOB_2));
        self.shape.set_target(frame.knob(KNOB_3));
        self.level.set_target(frame.knob(KNOB_4));
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.mode = TremoloMode::Classic,
            TogglePosition::Middle => self.mode = TremoloMode::Harmonic,
            TogglePosition::Down => self.mode = TremoloMode::Opto,
            TogglePosition::Unknown => {}
        }
    }

    fn led_level(&self) -> f32 {
        // Pulse the LED with the tremolo sweep
        (sine(self.lfo.phase()) + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(rate: f32, depth: f32, mode: TogglePosition) -> ControlFrame {
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_1] = rate;
        frame.knobs[KNOB_2] = depth;
        frame.knobs[KNOB_3] = 0.0; // sine
        frame.knobs[KNOB_4] = 1.0;
        frame.knobs[KNOB_6] = 1.0;
        frame.toggles[TOGGLE_1] = mode;
        frame
    }

    #[test]
    fn test_amplitude_stays_in_unit_range() {
        let mut trem = Tremolo::new(48000);
        trem.update_controls(&frame_with(1.0, 1.0, TogglePosition::Up));

        for _ in 0..48000 {
            let out = trem.process(1.0);
            assert!(out.is_finite());
            assert!(out >= -1e-6 && out <= 1.0 + 1e-6, "out of range: {}", out);
        }
    }

    #[test]
    fn test_full_depth_reaches_silence_and_unity() {
        let mut trem = Tremolo::new(48000);
        trem.update_controls(&frame_with(0.5, 1.0, TogglePosition::Up));

        // Skip the smoother settle, then scan two LFO periods
        for _ in 0..24000 {
            trem.process(1.0);
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..24000 {
            let out = trem.process(1.0);
            min = min.min(out);
            max = max.max(out);
        }
        assert!(min < 0.05, "tremolo should dip near silence, min {}", min);
        assert!(max > 0.95, "tremolo should recover near unity, max {}", max);
    }

    #[test]
    fn test_opto_lags_behind_target() {
        let mut trem = Tremolo::new(48000);
        trem.update_controls(&frame_with(0.8, 1.0, TogglePosition::Down));

        // The photocell smoothing keeps the opto amplitude from tracing
        // the raw LFO; at a fast rate its swing is visibly compressed.
        for _ in 0..24000 {
            trem.process(1.0);
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..24000 {
            let out = trem.process(1.0);
            min = min.min(out);
            max = max.max(out);
        }
        assert!(min > 0.0, "opto floor should not reach hard zero");
        assert!(max - min < 1.0, "opto swing should be compressed");
    }

    #[test]
    fn test_led_follows_lfo() {
        let mut trem = Tremolo::new(48000);
        trem.update_controls(&frame_with(0.5, 1.0, TogglePosition::Up));

        let initial = trem.led_level();
        assert!((initial - 0.5).abs() < 1e-3, "phase 0 LED should be mid: {}", initial);

        for _ in 0..1000 {
            trem.process(0.0);
        }
        let led = trem.led_level();
        assert!(led >= 0.0 && led <= 1.0);
        assert!((led - initial).abs() > 1e-3, "LED should move with the LFO");
    }
}
