//! Chorus built on a short LFO-modulated delay line
//!
//! Control mapping:
//! - knob 1: rate (0.1-5 Hz)
//! - knob 2: depth (base delay and modulation amount)
//! - knob 6: mix
//! - toggle 1: LFO waveform (up = sine, middle = triangle, down = square)
//!
//! There is no separate level knob: the wet path is scaled by mix alone.

use crate::controls::{ControlFrame, KNOB_1, KNOB_2, KNOB_6, TOGGLE_1};
use crate::controls::TogglePosition;
use crate::dsp::lfo::{sine, Lfo, Waveform};
use crate::dsp::{DelayLine, ParamSmoother};
use crate::effects::Effect;

/// Delay line length in milliseconds
const MAX_DELAY_MS: f32 = 100.0;

pub struct Chorus {
    delay_line: DelayLine,
    lfo: Lfo,
    sample_rate: f32,

    rate: ParamSmoother,
    depth: ParamSmoother,
    mix: ParamSmoother,

    waveform: Waveform,
}

impl Chorus {
    pub fn new(sample_rate: u32) -> Self {
        let sr = sample_rate as f32;
        let capacity = ((MAX_DELAY_MS / 1000.0) * sr) as usize;
        Self {
            delay_line: DelayLine::new(capacity),
            lfo: Lfo::new(),
            sample_rate: sr,
            rate: ParamSmoother::new(20.0, sr, 1.0),
            depth: ParamSmoother::new(20.0, sr, 0.5),
            mix: ParamSmoother::new(20.0, sr, 0.5),
            waveform: Waveform::Sine,
        }
    }
}

impl Effect for Chorus {
    fn process(&mut self, input: f32) -> f32 {
        let rate = self.rate.tick();
        let depth = self.depth.tick();
        let mix = self.mix.tick();

        self.lfo.advance(rate, self.sample_rate);

        // Base delay 10-25 ms from depth, swept up to +/-5 ms by the LFO.
        // Whole-sample taps only; the quantization is inaudible next to the
        // cost of interpolating on every sample.
        let lfo_value = self.lfo.value(self.waveform);
        let delay_ms = 10.0 + depth * 15.0 + lfo_value * depth * 5.0;
        let delay_samples = (delay_ms * self.sample_rate / 1000.0) as usize;

        let delayed = self.delay_line.read(delay_samples);
        self.delay_line.write(input);

        input * (1.0 - mix) + delayed * mix
    }

    fn reset(&mut self) {
        self.delay_line.clear();
        self.lfo.reset();
    }

    fn update_controls(&mut self, frame: &ControlFrame) {
        self.rate.set_target(0.1 + frame.knob(KNOB_1) * 4.9);
        self.depth.set_target(frame.knob(KNOB_2));
        self.mix.set_target(frame.knob(KNOB_6));

        match frame.toggle(TOGGLE_1) {
            TogglePosition::Up => self.waveform = Waveform::Sine,
            TogglePosition::Middle => self.waveform = Waveform::Triangle,
            TogglePosition::Down => self.waveform = Waveform::Square,
            TogglePosition::Unknown => {}
        }
    }

    fn led_level(&self) -> f32 {
        (sine(self.lfo.phase()) + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_finite_and_bounded() {
        let mut chorus = Chorus::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_1] = 1.0;
        frame.knobs[KNOB_2] = 1.0;
        frame.knobs[KNOB_6] = 1.0;
        chorus.update_controls(&frame);

        for i in 0..48000 {
            let input = ((i as f32) * 0.05).sin();
            let out = chorus.process(input);
            assert!(out.is_finite());
            assert!(out.abs() <= 1.2, "chorus output out of bounds: {}", out);
        }
    }

    #[test]
    fn test_dry_when_mix_zero() {
        let mut chorus = Chorus::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_6] = 0.0;
        chorus.update_controls(&frame);

        // Settle the mix smoother
        for _ in 0..10000 {
            chorus.process(0.0);
        }
        let out = chorus.process(0.7);
        assert!((out - 0.7).abs() < 1e-3, "expected dry signal, got {}", out);
    }

    #[test]
    fn test_wet_signal_is_delayed_copy() {
        let mut chorus = Chorus::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_1] = 0.0; // slowest LFO
        frame.knobs[KNOB_2] = 0.0; // fixed 10 ms base delay
        frame.knobs[KNOB_6] = 1.0; // wet only
        chorus.update_controls(&frame);

        for _ in 0..20000 {
            chorus.process(0.0);
        }

        // With depth 0 the modulation term vanishes and the tap sits at a
        // fixed 10 ms = 480 samples.
        let mut outputs = Vec::new();
        for i in 0..1000 {
            let input = if i == 0 { 1.0 } else { 0.0 };
            outputs.push(chorus.process(input));
        }
        let peak_index = outputs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!(
            (peak_index as i64 - 480).unsigned_abs() <= 1,
            "impulse should reappear near 480 samples, got {}",
            peak_index
        );
    }

    #[test]
    fn test_modulation_varies_the_tap() {
        let mut chorus = Chorus::new(48000);
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_1] = 1.0;
        frame.knobs[KNOB_2] = 1.0;
        frame.knobs[KNOB_6] = 1.0;
        chorus.update_controls(&frame);

        // A ramp input read through a swept tap is no longer a clean ramp:
        // successive output differences change sign as the tap moves.
        let mut previous = 0.0;
        let mut diffs = Vec::new();
        for i in 0..48000 {
            let input = (i % 1000) as f32 / 1000.0;
            let out = chorus.process(input);
            diffs.push(out - previous);
            previous = out;
        }
        let wobble = diffs[24000..].iter().filter(|d| d.abs() > 1e-4).count();
        assert!(wobble > 0, "modulated tap should perturb the waveform");
    }
}
