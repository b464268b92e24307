//! Tape-stop: the "tape" slows to a halt while the control is held, then
//! spins back up to normal speed when it is released.
//!
//! ## Signal Path
//!
//! ```text
//! input ──► history ring (always written, 1 pair per pair)
//!                │
//!                ▼ read at playback_pos, advancing by `speed`
//!           linear interpolation ──┬──► one-pole LPF (fc = speed × nyquist) ──► wet
//!                                  └──────────────────────────────────────────► dry
//!                                             out = wet·(1 − mix) + dry·mix
//! ```
//!
//! The record cursor always advances at the input rate, while the playback
//! cursor advances by `speed` per sample and stalls at zero. `mix` is the
//! dry weight: 0 below `dry_threshold` of normal speed, rising along a
//! power curve to exactly 1 at normal speed so steady-state playback is
//! bit-exact.
//!
//! ## Speed Envelope
//!
//! | Phase | Entered on | Per frame |
//! |-------|------------|-----------|
//! | `Normal` | power-on, recovery done | speed = 1 |
//! | `Slowing` | control held | `speed *= slow_factor`, snapped to 0 below `stop_epsilon` |
//! | `Recovering` | release after slowing | from 0, `speed += (1 − speed) · recovery_rate` |
//!
//! Recovery snaps to unity at `recovery_snap` and re-locks playback onto the
//! live input.

use crate::constants::{FRAME_SAMPLES, NUM_CHANNELS, NYQUIST_HZ, SAMPLE_RATE, TOTAL_SAMPLES};
use crate::dsp::one_pole::rc_alpha;
use crate::dsp::{slot_to_unit, unit_to_slot, OnePole, PowerTable};
use crate::effect::Effect;
use crate::frame::Frame;

/// Entries in the crossfade table.
pub const MIX_TABLE_SIZE: usize = 256;

/// Shape of the dry fade-in above `dry_threshold`.
const MIX_GAMMA: f32 = 1.5;

/// Fractions below this read the lower sample as-is.
const FRAC_EPSILON: f32 = 1e-4;

const HISTORY_LEN: f32 = TOTAL_SAMPLES as f32;

/// Tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeStopParams {
    /// Speed multiplier per frame while slowing (≈1 s to a halt).
    pub slow_factor: f32,
    /// Speeds below this snap to a full stop.
    pub stop_epsilon: f32,
    /// Fraction of the remaining gap to 1.0 closed per frame while recovering.
    pub recovery_rate: f32,
    /// Recovery ends, snapping speed to 1.0, once speed reaches this.
    pub recovery_snap: f32,
    /// Floor for the one-pole coefficient.
    pub min_alpha: f32,
    /// Below this speed the output is fully filtered.
    pub dry_threshold: f32,
}

impl TapeStopParams {
    pub const DEFAULT: TapeStopParams = TapeStopParams {
        slow_factor: 0.995213,
        stop_epsilon: 0.00001,
        recovery_rate: 0.003,
        recovery_snap: 0.999,
        min_alpha: 0.001,
        dry_threshold: 0.9,
    };
}

impl Default for TapeStopParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Motor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapePhase {
    /// Playing at speed 1.0.
    Normal,
    /// Control held: decelerating.
    Slowing,
    /// Control released: accelerating back to 1.0.
    Recovering,
}

/// Tape-stop effect engine.
pub struct TapeStop {
    params: TapeStopParams,
    history: [[i32; NUM_CHANNELS]; TOTAL_SAMPLES],
    write_pos: usize,
    playback_pos: f32,
    speed: f32,
    phase: TapePhase,
    smoothers: [OnePole; NUM_CHANNELS],
    mix_table: PowerTable<MIX_TABLE_SIZE>,
}

impl TapeStop {
    pub const fn new() -> Self {
        Self::with_params(TapeStopParams::DEFAULT)
    }

    pub const fn with_params(params: TapeStopParams) -> Self {
        TapeStop {
            params,
            history: [[0; NUM_CHANNELS]; TOTAL_SAMPLES],
            write_pos: 0,
            playback_pos: 0.0,
            speed: 1.0,
            phase: TapePhase::Normal,
            smoothers: [OnePole::new(); NUM_CHANNELS],
            mix_table: PowerTable::new(),
        }
    }

    /// Playback speed relative to the input rate, in `[0, 1]`.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> TapePhase {
        self.phase
    }

    /// Fractional read cursor into the history, in sample pairs.
    pub fn playback_pos(&self) -> f32 {
        self.playback_pos
    }

    /// Next history slot to be written, in sample pairs.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    pub fn params(&self) -> &TapeStopParams {
        &self.params
    }

    /// Dry weight for the current speed: 0 below `dry_threshold`, 1 at 1.0.
    fn dry_mix(&self) -> f32 {
        let threshold = self.params.dry_threshold;
        if self.speed < threshold {
            return 0.0;
        }
        let norm = (self.speed - threshold) / (1.0 - threshold);
        self.mix_table.lookup(norm)
    }

    fn capture(&mut self, input: &Frame) {
        for pair in input.pairs() {
            self.history[self.write_pos].copy_from_slice(pair);
            self.write_pos = (self.write_pos + 1) % TOTAL_SAMPLES;
        }
    }

    fn advance_speed(&mut self) {
        match self.phase {
            TapePhase::Normal => {}
            TapePhase::Slowing => {
                if self.speed > 0.0 {
                    self.speed *= self.params.slow_factor;
                    if self.speed < self.params.stop_epsilon {
                        self.speed = 0.0;
                        debug!("tape stop: halted");
                    }
                }
            }
            TapePhase::Recovering => {
                self.speed += (1.0 - self.speed) * self.params.recovery_rate;
                if self.speed >= self.params.recovery_snap {
                    self.speed = 1.0;
                    self.phase = TapePhase::Normal;
                    // Lock back onto the frame just captured so unity-speed
                    // playback reads whole samples from a single timeline.
                    let start = (self.write_pos + TOTAL_SAMPLES - FRAME_SAMPLES) % TOTAL_SAMPLES;
                    self.playback_pos = start as f32;
                    debug!("tape stop: recovered");
                }
            }
        }
    }

    /// Linearly interpolated history value at the playback cursor.
    fn read_interpolated(&self, ch: usize) -> f32 {
        let pos_int = self.playback_pos as usize % TOTAL_SAMPLES;
        let frac = self.playback_pos - libm::floorf(self.playback_pos);
        let s1 = slot_to_unit(self.history[pos_int][ch]);
        if frac < FRAC_EPSILON {
            return s1;
        }
        let s2 = slot_to_unit(self.history[(pos_int + 1) % TOTAL_SAMPLES][ch]);
        s1 * (1.0 - frac) + s2 * frac
    }
}

impl Default for TapeStop {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for TapeStop {
    fn name(&self) -> &'static str {
        "Pico Audio FX TapeStop"
    }

    fn init(&mut self) {
        self.mix_table.fill_power(MIX_GAMMA);
    }

    fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            if self.phase != TapePhase::Slowing {
                debug!("tape stop: slowing from {}", self.speed);
            }
            self.phase = TapePhase::Slowing;
        } else if self.phase == TapePhase::Slowing {
            self.phase = TapePhase::Recovering;
            self.speed = 0.0;
        }
    }

    fn process(&mut self, input: &Frame, output: &mut Frame) {
        self.capture(input);
        self.advance_speed();

        let speed = self.speed;
        let alpha = rc_alpha(speed * NYQUIST_HZ, SAMPLE_RATE, self.params.min_alpha);
        let dry = self.dry_mix();

        for i in 0..FRAME_SAMPLES {
            for ch in 0..NUM_CHANNELS {
                let raw = self.read_interpolated(ch);
                let wet = self.smoothers[ch].process(raw, alpha);
                output.set_sample(i, ch, unit_to_slot(wet * (1.0 - dry) + raw * dry));
            }

            if speed > 0.0 {
                self.playback_pos += speed;
                if self.playback_pos >= HISTORY_LEN {
                    self.playback_pos -= HISTORY_LEN;
                }
            }
        }
    }
}
