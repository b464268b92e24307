//! Second-order IIR section with RBJ cookbook low-pass coefficients.

use core::f32::consts::PI;

/// Normalized biquad coefficients (`a0` divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Pass-through.
    pub const IDENTITY: BiquadCoeffs = BiquadCoeffs {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Low-pass at `cutoff_hz` with resonance `q`.
    ///
    /// The cutoff is kept below `0.49 * sample_rate`: at Nyquist the poles
    /// land on the unit circle and `f32` rounding can push them outside.
    pub fn lowpass(sample_rate: f32, cutoff_hz: f32, q: f32) -> Self {
        let fc = cutoff_hz.clamp(1.0, sample_rate * 0.49);
        let omega = 2.0 * PI * (fc / sample_rate);
        let sin_omega = libm::sinf(omega);
        let cos_omega = libm::cosf(omega);
        let alpha = sin_omega / (2.0 * q.max(0.1));

        let a0_inv = 1.0 / (1.0 + alpha);
        let b1 = (1.0 - cos_omega) * a0_inv;
        BiquadCoeffs {
            b0: b1 * 0.5,
            b1,
            b2: b1 * 0.5,
            a1: -2.0 * cos_omega * a0_inv,
            a2: (1.0 - alpha) * a0_inv,
        }
    }
}

/// Transposed direct-form II biquad: two state values per section.
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    s1: f32,
    s2: f32,
}

impl Biquad {
    pub const fn new() -> Self {
        Biquad {
            coeffs: BiquadCoeffs::IDENTITY,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Swap coefficients, keeping the filter history.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    /// Clear the history.
    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }

    #[inline(always)]
    pub fn process(&mut self, x: f32) -> f32 {
        let c = &self.coeffs;
        let y = c.b0 * x + self.s1;
        self.s1 = c.b1 * x - c.a1 * y + self.s2;
        self.s2 = c.b2 * x - c.a2 * y;
        y
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
