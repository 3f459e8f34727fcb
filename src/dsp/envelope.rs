//! Envelope follower for amplitude tracking

/// Asymmetric attack/release tracker of signal magnitude.
///
/// The envelope rises toward `|input|` with the attack coefficient when the
/// signal exceeds it and falls with the release coefficient otherwise. Both
/// coefficients live in (0, 1) and sit close to 1 for audio-rate smoothing;
/// the compressor derives them from smoothed knobs, so they are passed per
/// call rather than stored.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeFollower {
    envelope: f32,
}

impl EnvelopeFollower {
    pub fn new() -> Self {
        Self { envelope: 0.0 }
    }

    /// Track one sample and return the updated envelope.
    #[inline]
    pub fn tick(&mut self, input: f32, attack_coeff: f32, release_coeff: f32) -> f32 {
        let rectified = input.abs();
        let coeff = if rectified > self.envelope {
            attack_coeff
        } else {
            release_coeff
        };
        self.envelope = coeff * self.envelope + (1.0 - coeff) * rectified;
        self.envelope
    }

    /// Current envelope level, always >= 0.
    #[inline]
    pub fn level(&self) -> f32 {
        self.envelope
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}
