//! Parameter smoothing for click-free control changes
//!
//! Knob values arrive in steps at control rate; applying them directly to
//! gain or time parameters produces audible zipper noise. Every effect
//! routes its continuous controls through a `ParamSmoother`, which is
//! advanced exactly once per processed sample.

/// Default smoothing time in milliseconds
pub const DEFAULT_SMOOTH_TIME_MS: f32 = 20.0;

/// One-pole exponential parameter smoother
///
/// The current value decays toward the target with coefficient
/// `c = 1 - 1/samples` where `samples` is the smoothing time expressed in
/// samples (floored at 1 so the coefficient stays well defined). The
/// current value converges monotonically and never overshoots.
#[derive(Debug, Clone)]
pub struct ParamSmoother {
    current: f32,
    target: f32,
    coeff: f32,
}

impl ParamSmoother {
    /// Create a smoother.
    ///
    /// # Arguments
    /// * `smoothing_ms` - Smoothing time in milliseconds
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `initial` - Starting value (current and target)
    pub fn new(smoothing_ms: f32, sample_rate: f32, initial: f32) -> Self {
        let samples = ((smoothing_ms / 1000.0) * sample_rate).max(1.0);
        Self {
            current: initial,
            target: initial,
            coeff: 1.0 - 1.0 / samples,
        }
    }

    /// Record a new steady-state value to smooth toward.
    pub fn set_target(&mut self, value: f32) {
        self.target = value;
    }

    /// Snap both current and target. Construction/reset use only.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance one sample toward the target and return the new value.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        if self.current == self.target {
            return self.current;
        }
        self.current = self.current * self.coeff + self.target * (1.0 - self.coeff);
        // Snap once the residual is inaudible so a settled smoother holds
        // its value exactly
        if (self.current - self.target).abs() < 1e-6 {
            self.current = self.target;
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Target value.
    pub fn target(&self) -> f32 {
        self.target
    }
}
