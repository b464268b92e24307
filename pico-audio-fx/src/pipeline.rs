//! The main-loop step that moves audio from the inbound ring, through the
//! active effect, into the outbound ring.
//!
//! ## Usage
//!
//! ```ignore
//! static RX: FrameRing = FrameRing::new();
//! static TX: FrameRing = FrameRing::new();
//!
//! let mut pipeline = Pipeline::new(AnyEffect::new(EffectKind::DEFAULT), &RX, &TX);
//! let mut button = PinControl::active_low(pin);
//!
//! loop {
//!     usb.poll();
//!     pipeline.poll_control(&mut button);
//!     led.update();
//! }
//! ```

use crate::control::MomentaryControl;
use crate::effect::Effect;
use crate::io::FrameRing;

/// What one [`Pipeline::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// One frame went through the effect.
    Processed,
    /// No inbound frame was waiting.
    Starved,
    /// The outbound ring was full; the inbound frame stays queued.
    Backpressured,
}

/// Effect-agnostic driver: consumer of `inbound`, producer of `outbound`.
pub struct Pipeline<'a, E> {
    effect: E,
    inbound: &'a FrameRing,
    outbound: &'a FrameRing,
    processed: u32,
}

impl<'a, E: Effect> Pipeline<'a, E> {
    /// Wrap `effect`, running its one-time [`init`](Effect::init).
    pub fn new(mut effect: E, inbound: &'a FrameRing, outbound: &'a FrameRing) -> Self {
        effect.init();
        info!("effect: {}", effect.name());
        Pipeline {
            effect,
            inbound,
            outbound,
            processed: 0,
        }
    }

    /// One main-loop iteration with control level `enabled`.
    ///
    /// The level always reaches the effect. A frame is processed only if
    /// one is waiting and the outbound ring has room; otherwise nothing
    /// moves and the next call retries.
    pub fn poll(&mut self, enabled: bool) -> Step {
        self.effect.set_enabled(enabled);

        if self.inbound.is_empty() {
            return Step::Starved;
        }
        if self.outbound.is_full() {
            return Step::Backpressured;
        }

        let effect = &mut self.effect;
        let inbound = self.inbound;
        // Process slot-to-slot: read the inbound slot in place, write the
        // outbound slot in place, then release and publish.
        let pushed = self.outbound.try_push_with(|out| {
            inbound
                .try_pop_with(|input| effect.process(input, out))
                .is_some()
        });

        if pushed {
            self.processed = self.processed.wrapping_add(1);
            Step::Processed
        } else {
            Step::Starved
        }
    }

    /// [`poll`](Self::poll) with the level sampled from `control`.
    pub fn poll_control<C: MomentaryControl + ?Sized>(&mut self, control: &mut C) -> Step {
        let enabled = control.is_pressed();
        self.poll(enabled)
    }

    /// Frames processed since construction (wrapping).
    pub fn processed(&self) -> u32 {
        self.processed
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    pub fn into_effect(self) -> E {
        self.effect
    }
}
