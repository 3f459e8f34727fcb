//! Pedal controller: bypass handling, control forwarding, LED state
//!
//! Owns one active effect. The caller reads hardware once per block,
//! passes the snapshot in, then runs the sample loop through `process`.

use crate::controls::{ControlFrame, FOOTSWITCH_1};
use crate::effects::Effect;

pub struct Pedal {
    effect: Option<Box<dyn Effect>>,
    bypassed: bool,
    led: f32,
}

impl Pedal {
    pub fn new() -> Self {
        Self {
            effect: None,
            bypassed: false,
            led: 0.0,
        }
    }

    /// Install the active effect, replacing any previous one.
    pub fn set_effect(&mut self, effect: Box<dyn Effect>) {
        self.effect = Some(effect);
    }

    /// Apply a control snapshot: toggle bypass on the footswitch edge,
    /// forward the controls to the effect and refresh the LED.
    pub fn update_controls(&mut self, frame: &ControlFrame) {
        if frame.footswitch_edge[FOOTSWITCH_1] {
            self.bypassed = !self.bypassed;
        }

        if let Some(effect) = self.effect.as_mut() {
            effect.update_controls(frame);
        }

        self.led = if self.bypassed {
            0.0
        } else {
            match self.effect.as_ref() {
                Some(effect) => effect.led_level().clamp(0.0, 1.0),
                None => 0.0,
            }
        };
    }

    pub fn bypass(&mut self, enable: bool) {
        self.bypassed = enable;
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Bypass LED brightness, 0.0-1.0. Poll from the control loop, not
    /// the audio callback.
    pub fn led(&self) -> f32 {
        self.led
    }

    /// Reset the active effect's audio state.
    pub fn reset(&mut self) {
        if let Some(effect) = self.effect.as_mut() {
            effect.reset();
        }
    }

    /// Process one sample. Bypassed (or empty) pedals pass input through.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.bypassed {
            return input;
        }
        match self.effect.as_mut() {
            Some(effect) => effect.process(input),
            None => input,
        }
    }

    /// Process a block of samples in arrival order.
    pub fn process_buffer(&mut self, input: &[f32], output: &mut [f32]) {
        assert_eq!(input.len(), output.len(), "buffer length mismatch");
        for (in_sample, out_sample) in input.iter().zip(output.iter_mut()) {
            *out_sample = self.process(*in_sample);
        }
    }
}

impl Default for Pedal {
    fn default() -> Self {
        Self::new()
    }
}
