//! Waveshaping nonlinearities and the small filters that surround them
//!
//! The clipping curves give each drive pedal its character; the DC blocker
//! and one-pole low-pass clean up after them. All of these run once per
//! sample inside the effect process loops.

/// Saturation value of the rational tanh approximation at |x| >= 1
const SOFT_CLIP_CEILING: f32 = 0.76159;

/// DC blocker pole, ~20 Hz high-pass at audio rates
const DC_BLOCKER_COEFF: f32 = 0.995;

/// Soft clip using a rational tanh approximation.
///
/// Odd-symmetric; saturates to +/-0.76159 beyond |x| > 1.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x > 1.0 {
        return SOFT_CLIP_CEILING;
    }
    if x < -1.0 {
        return -SOFT_CLIP_CEILING;
    }
    let x2 = x * x;
    x * (27.0 + x2) / (27.0 + 9.0 * x2)
}

/// Symmetric hard clip at +/-threshold.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Asymmetric clip modeling vintage transistor fuzz.
///
/// Positive excursions break at 0.5 with a 0.1 slope beyond; negative
/// excursions break at -0.6 with a 0.15 slope.
#[inline]
pub fn vintage_clip(x: f32) -> f32 {
    if x > 0.5 {
        0.5 + (x - 0.5) * 0.1
    } else if x < -0.6 {
        -0.6 + (x + 0.6) * 0.15
    } else {
        x
    }
}

/// Tight symmetric clip for modern fuzz voicing.
#[inline]
pub fn modern_clip(x: f32) -> f32 {
    x.clamp(-0.4, 0.4)
}

/// Octave-up fuzz: full-wave rectify, clamp the magnitude at 0.5,
/// restore the sign and blend 50/50 with the unclipped signal.
#[inline]
pub fn octave_clip(x: f32) -> f32 {
    let rectified = x.abs().min(0.5);
    rectified * x.signum() * 0.5 + x * 0.5
}

/// Single-pole DC blocking high-pass.
///
/// Any asymmetric nonlinearity shifts the signal mean; left alone that
/// offset drifts into the output stage. `y[n] = x[n] - 0.995 * x[n-1]`.
#[derive(Debug, Clone, Default)]
pub struct DcBlocker {
    state: f32,
}

impl DcBlocker {
    pub fn new() -> Self {
        Self { state: 0.0 }
    }

    #[inline]
    pub fn tick(&mut self, input: f32) -> f32 {
        let output = input - self.state;
        self.state = input * DC_BLOCKER_COEFF;
        output
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// One-pole low-pass, `y[n] = alpha * x[n] + (1 - alpha) * y[n-1]`.
///
/// Serves as the tone stage (alpha from the tone knob), the bass shelf
/// tracker (fixed slow alpha) and the filtered feedback path in the delay.
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    state: f32,
}

impl OnePole {
    pub fn new() -> Self {
        Self { state: 0.0 }
    }

    #[inline]
    pub fn tick(&mut self, input: f32, alpha: f32) -> f32 {
        self.state = alpha * input + (1.0 - alpha) * self.state;
        self.state
    }

    /// Filter state without advancing.
    #[inline]
    pub fn state(&self) -> f32 {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_clip_odd_symmetry() {
        for i in 0..200 {
            let x = (i as f32 - 100.0) * 0.03;
            assert!(
                (soft_clip(-x) + soft_clip(x)).abs() < 1e-6,
                "soft_clip not odd at x={}",
                x
            );
        }
    }

    #[test]
    fn test_soft_clip_saturates() {
        assert_eq!(soft_clip(5.0), SOFT_CLIP_CEILING);
        assert_eq!(soft_clip(-5.0), -SOFT_CLIP_CEILING);
        // Small signals pass nearly unchanged
        assert!((soft_clip(0.01) - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_hard_clip_threshold() {
        assert_eq!(hard_clip(2.0, 0.7), 0.7);
        assert_eq!(hard_clip(-2.0, 0.7), -0.7);
        assert_eq!(hard_clip(0.3, 0.7), 0.3);
    }

    #[test]
    fn test_vintage_clip_asymmetry() {
        // Positive side folds harder than the negative side
        let positive = vintage_clip(2.0);
        let negative = vintage_clip(-2.0);
        assert!((positive - 0.65).abs() < 1e-6);
        assert!((negative - (-0.81)).abs() < 1e-6);
        assert!(positive.abs() != negative.abs());
    }

    #[test]
    fn test_octave_clip_bounded() {
        for i in 0..100 {
            let x = (i as f32 - 50.0) * 0.2;
            let y = octave_clip(x);
            assert!(y.is_finite());
        }
        // At full rectifier saturation the clipped half contributes 0.25
        assert!((octave_clip(10.0) - (0.25 + 5.0)).abs() < 1e-6);
    }

    #[test]
    fn test_dc_blocker_removes_offset() {
        let mut blocker = DcBlocker::new();
        let mut output = 0.0;
        for _ in 0..10000 {
            output = blocker.tick(0.8);
        }
        assert!(output.abs() < 0.01, "residual DC too large: {}", output);

        blocker.reset();
        for _ in 0..10000 {
            output = blocker.tick(-0.8);
        }
        assert!(output.abs() < 0.01, "residual DC too large: {}", output);
    }

    #[test]
    fn test_one_pole_tracks_input() {
        let mut lp = OnePole::new();
        let mut output = 0.0;
        for _ in 0..2000 {
            output = lp.tick(1.0, 0.05);
        }
        assert!((output - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_one_pole_alpha_one_is_transparent() {
        let mut lp = OnePole::new();
        assert_eq!(lp.tick(0.42, 1.0), 0.42);
        assert_eq!(lp.tick(-0.1, 1.0), -0.1);
    }
}
