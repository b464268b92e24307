//! Precomputed lookup tables with power-law spacing.
//!
//! Tables are zero until [`PowerTable::fill`] runs, which the effects do
//! from `init()`; `powf` is not `const`.

/// `N` samples of a curve over `x ∈ [0, 1]`, looked up by nearest lower index.
#[derive(Debug, Clone, Copy)]
pub struct PowerTable<const N: usize> {
    values: [f32; N],
}

impl<const N: usize> PowerTable<N> {
    pub const fn new() -> Self {
        assert!(N >= 2, "table needs at least 2 entries");
        PowerTable { values: [0.0; N] }
    }

    /// Set entry `i` to `curve(i / (N - 1))`.
    pub fn fill(&mut self, curve: impl Fn(f32) -> f32) {
        for (i, v) in self.values.iter_mut().enumerate() {
            *v = curve(i as f32 / (N - 1) as f32);
        }
    }

    /// Perceptual frequency sweep: `min * (max / min)^(x^gamma)`.
    pub fn fill_frequency_sweep(&mut self, min_hz: f32, max_hz: f32, gamma: f32) {
        let ratio = max_hz / min_hz;
        self.fill(|x| min_hz * libm::powf(ratio, libm::powf(x, gamma)));
    }

    /// `x^gamma`.
    pub fn fill_power(&mut self, gamma: f32) {
        self.fill(|x| libm::powf(x, gamma));
    }

    /// Table index for `x`, clamped to `0..N`.
    #[inline]
    pub fn index_of(x: f32) -> usize {
        // `as usize` saturates negatives and NaN to 0
        ((x * (N - 1) as f32) as usize).min(N - 1)
    }

    /// Value at the index [`index_of`](Self::index_of) picks for `x`.
    #[inline]
    pub fn lookup(&self, x: f32) -> f32 {
        self.values[Self::index_of(x)]
    }

    pub fn get(&self, index: usize) -> f32 {
        self.values[index.min(N - 1)]
    }

    pub const fn len(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for PowerTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
