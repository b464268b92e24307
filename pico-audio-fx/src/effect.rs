use core::fmt;
use core::str::FromStr;

use crate::effects::{Stutter, SweepLowPass, TapeStop};
use crate::frame::Frame;

/// Core trait for all effect engines.
///
/// The pipeline calls [`set_enabled`](Effect::set_enabled) once per main-loop
/// iteration and [`process`](Effect::process) at most once per iteration,
/// only when a frame is available and there is room for the result.
pub trait Effect {
    /// Human-readable identification, used for the USB product string.
    fn name(&self) -> &'static str;

    /// One-time setup (lookup tables). Safe to call again.
    fn init(&mut self);

    /// Deliver the current momentary control level.
    ///
    /// Effects that react to presses rather than levels derive the edges
    /// themselves.
    fn set_enabled(&mut self, enabled: bool);

    /// Transform exactly one frame. Never fails, blocks or allocates.
    fn process(&mut self, input: &Frame, output: &mut Frame);
}

impl<E: Effect + ?Sized> Effect for &mut E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn init(&mut self) {
        (**self).init()
    }

    fn set_enabled(&mut self, enabled: bool) {
        (**self).set_enabled(enabled)
    }

    fn process(&mut self, input: &Frame, output: &mut Frame) {
        (**self).process(input, output)
    }
}

/// Selects one of the built-in engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectKind {
    SweepLowPass,
    Stutter,
    TapeStop,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [
        EffectKind::SweepLowPass,
        EffectKind::Stutter,
        EffectKind::TapeStop,
    ];

    /// Engine picked by the `fx-*` cargo features (`fx-lpf` wins over
    /// `fx-stutter`, which wins over the `fx-tapestop` fallback).
    #[cfg(feature = "fx-lpf")]
    pub const DEFAULT: EffectKind = EffectKind::SweepLowPass;
    #[cfg(all(feature = "fx-stutter", not(feature = "fx-lpf")))]
    pub const DEFAULT: EffectKind = EffectKind::Stutter;
    #[cfg(not(any(feature = "fx-lpf", feature = "fx-stutter")))]
    pub const DEFAULT: EffectKind = EffectKind::TapeStop;

    /// Short configuration name.
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectKind::SweepLowPass => "lpf",
            EffectKind::Stutter => "stutter",
            EffectKind::TapeStop => "tapestop",
        }
    }
}

impl Default for EffectKind {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = ParseEffectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, EffectKind); 6] = [
            ("lpf", EffectKind::SweepLowPass),
            ("sweep", EffectKind::SweepLowPass),
            ("stutter", EffectKind::Stutter),
            ("tapestop", EffectKind::TapeStop),
            ("tape-stop", EffectKind::TapeStop),
            ("tape_stop", EffectKind::TapeStop),
        ];
        let s = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, kind)| kind)
            .ok_or(ParseEffectKindError)
    }
}

/// The name did not match any built-in engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseEffectKindError;

impl fmt::Display for ParseEffectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown effect (expected lpf, stutter or tapestop)")
    }
}

/// Any built-in engine, chosen at construction time.
pub enum AnyEffect {
    SweepLowPass(SweepLowPass),
    Stutter(Stutter),
    TapeStop(TapeStop),
}

impl AnyEffect {
    /// A fresh engine of `kind`. Call [`Effect::init`] before processing.
    pub const fn new(kind: EffectKind) -> Self {
        match kind {
            EffectKind::SweepLowPass => AnyEffect::SweepLowPass(SweepLowPass::new()),
            EffectKind::Stutter => AnyEffect::Stutter(Stutter::new()),
            EffectKind::TapeStop => AnyEffect::TapeStop(TapeStop::new()),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            AnyEffect::SweepLowPass(_) => EffectKind::SweepLowPass,
            AnyEffect::Stutter(_) => EffectKind::Stutter,
            AnyEffect::TapeStop(_) => EffectKind::TapeStop,
        }
    }

    fn as_dyn(&mut self) -> &mut dyn Effect {
        match self {
            AnyEffect::SweepLowPass(fx) => fx,
            AnyEffect::Stutter(fx) => fx,
            AnyEffect::TapeStop(fx) => fx,
        }
    }
}

impl Default for AnyEffect {
    fn default() -> Self {
        Self::new(EffectKind::DEFAULT)
    }
}

impl Effect for AnyEffect {
    fn name(&self) -> &'static str {
        match self {
            AnyEffect::SweepLowPass(fx) => fx.name(),
            AnyEffect::Stutter(fx) => fx.name(),
            AnyEffect::TapeStop(fx) => fx.name(),
        }
    }

    fn init(&mut self) {
        self.as_dyn().init()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.as_dyn().set_enabled(enabled)
    }

    fn process(&mut self, input: &Frame, output: &mut Frame) {
        self.as_dyn().process(input, output)
    }
}
