//! One-pole (RC) low-pass smoother.

use core::f32::consts::PI;

/// Smoothing coefficient for an RC low-pass at `cutoff_hz`.
///
/// `alpha = dt / (RC + dt)` with `RC = 1 / (2π fc)`. A cutoff of zero would
/// freeze the filter, so the result never drops below `min_alpha`.
pub fn rc_alpha(cutoff_hz: f32, sample_rate: f32, min_alpha: f32) -> f32 {
    let dt = 1.0 / sample_rate;
    let rc = 1.0 / (2.0 * PI * cutoff_hz.max(0.0) + 1e-9);
    (dt / (rc + dt)).clamp(min_alpha, 1.0)
}

/// `y[n] = y[n-1] + alpha * (x[n] - y[n-1])`
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePole {
    state: f32,
}

impl OnePole {
    pub const fn new() -> Self {
        OnePole { state: 0.0 }
    }

    #[inline(always)]
    pub fn process(&mut self, x: f32, alpha: f32) -> f32 {
        self.state += alpha * (x - self.state);
        self.state
    }

    /// Last output.
    pub fn state(&self) -> f32 {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
