//! Sweeping 4th-order low-pass ("muffle") effect.
//!
//! Two cascaded resonant biquad sections per channel. Holding the control
//! sweeps the cutoff down towards `fc_min` quickly; releasing it lets the
//! cutoff drift back up to `fc_max` more slowly.
//!
//! The control scalar in `[0, 1]` indexes a perceptually spaced cutoff table,
//! so equal control steps sound like equal pitch steps. Coefficients are only
//! recomputed once the cutoff has moved more than `recompute_threshold_hz`.

use crate::constants::{FRAME_SAMPLES, NUM_CHANNELS, SAMPLE_RATE};
use crate::dsp::{slot_to_unit, unit_to_slot, Biquad, BiquadCoeffs, PowerTable};
use crate::effect::Effect;
use crate::frame::Frame;

/// Entries in the cutoff table.
pub const FC_TABLE_SIZE: usize = 128;

/// Exponent shaping the table: `x^0.5` spends more entries near `fc_max`.
const FC_GAMMA: f32 = 0.5;

/// Cascaded sections per channel.
const SECTIONS: usize = 2;

/// Tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParams {
    /// Cutoff with the control fully engaged.
    pub fc_min: f32,
    /// Cutoff at rest. Reaching it bypasses the filter output.
    pub fc_max: f32,
    /// Resonance of each section. Above 0.707 the cascade boosts content
    /// near the cutoff (≈Q² at resonance) and loud material will clip.
    pub q: f32,
    /// Control decrement per `set_enabled(true)` call.
    pub engage_step: f32,
    /// Control increment per `set_enabled(false)` call.
    pub release_step: f32,
    /// Minimum cutoff change before coefficients are recomputed.
    pub recompute_threshold_hz: f32,
    /// Control value at power-on.
    pub initial_control: f32,
}

impl SweepParams {
    pub const DEFAULT: SweepParams = SweepParams {
        fc_min: 500.0,
        fc_max: 24_000.0,
        q: core::f32::consts::FRAC_1_SQRT_2,
        engage_step: 0.0005,
        release_step: 0.0002,
        recompute_threshold_hz: 100.0,
        initial_control: 0.0,
    };
}

impl Default for SweepParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sweeping low-pass effect engine.
pub struct SweepLowPass {
    params: SweepParams,
    fc_table: PowerTable<FC_TABLE_SIZE>,
    /// 0.0 = fully muffled, 1.0 = open.
    control: f32,
    sections: [[Biquad; SECTIONS]; NUM_CHANNELS],
    /// Cutoff the current coefficients were computed for.
    coeff_fc: f32,
}

impl SweepLowPass {
    pub const fn new() -> Self {
        Self::with_params(SweepParams::DEFAULT)
    }

    pub const fn with_params(params: SweepParams) -> Self {
        SweepLowPass {
            params,
            fc_table: PowerTable::new(),
            control: params.initial_control,
            sections: [[Biquad::new(); SECTIONS]; NUM_CHANNELS],
            coeff_fc: 0.0,
        }
    }

    /// Current control scalar in `[0, 1]`.
    pub fn control(&self) -> f32 {
        self.control
    }

    /// Cutoff selected by the current control value.
    pub fn cutoff_hz(&self) -> f32 {
        self.fc_table.lookup(self.control)
    }

    pub fn params(&self) -> &SweepParams {
        &self.params
    }

    fn update_coeffs(&mut self, fc: f32) {
        let coeffs = BiquadCoeffs::lowpass(SAMPLE_RATE, fc, self.params.q);
        for section in self.sections.iter_mut().flatten() {
            section.set_coeffs(coeffs);
        }
        self.coeff_fc = fc;
    }
}

impl Default for SweepLowPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for SweepLowPass {
    fn name(&self) -> &'static str {
        "Pico Audio FX LPF"
    }

    fn init(&mut self) {
        let SweepParams { fc_min, fc_max, .. } = self.params;
        self.fc_table.fill_frequency_sweep(fc_min, fc_max, FC_GAMMA);
        self.update_coeffs(self.cutoff_hz());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.control = if enabled {
            (self.control - self.params.engage_step).max(0.0)
        } else {
            (self.control + self.params.release_step).min(1.0)
        };
    }

    fn process(&mut self, input: &Frame, output: &mut Frame) {
        let fc = self.cutoff_hz();
        if libm::fabsf(fc - self.coeff_fc) > self.params.recompute_threshold_hz {
            self.update_coeffs(fc);
        }
        // Fully open: keep the sections warm but pass the input untouched.
        let bypass = fc >= self.params.fc_max;

        for i in 0..FRAME_SAMPLES {
            for (ch, chain) in self.sections.iter_mut().enumerate() {
                let slot = input.sample(i, ch);
                let y = chain
                    .iter_mut()
                    .fold(slot_to_unit(slot), |x, section| section.process(x));
                output.set_sample(i, ch, if bypass { slot } else { unit_to_slot(y) });
            }
        }
    }
}
