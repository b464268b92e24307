//! # pico-audio-fx
//!
//! A `no_std`, zero-allocation real-time audio effect core for a USB audio
//! device built on a microcontroller. The host streams 48 kHz / 24-bit
//! stereo audio to the device, one effect is applied, and the processed
//! audio is streamed back. A momentary button engages the effect.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Format | [`constants`] / [`frame`] | Fixed 1 ms stereo frame and its wire codec |
//! | I/O | [`io`] | Lock-free SPSC frame rings, USB transfer hooks |
//! | Control | [`control`] | Momentary button input and edge detection |
//! | Trait | [`effect`] | `Effect` trait and construction-time engine selection |
//! | DSP | [`dsp`] / [`effects`] | Filters, tables, and the three effect engines |
//! | Driver | [`pipeline`] | Main-loop step: inbound → effect → outbound |
//!
//! ## Quick start
//!
//! ```ignore
//! use pico_audio_fx::prelude::*;
//!
//! static RX: FrameRing = FrameRing::new();
//! static TX: FrameRing = FrameRing::new();
//! static PORT: UsbAudioPort<'static> = UsbAudioPort::new(&RX, &TX);
//!
//! // USB OUT completion interrupt:
//! PORT.on_rx_done(packet);
//! // USB IN request interrupt:
//! PORT.on_tx_request(&mut in_buffer);
//!
//! // Main loop:
//! let mut pipeline = Pipeline::new(AnyEffect::new(EffectKind::DEFAULT), &RX, &TX);
//! loop {
//!     pipeline.poll_control(&mut button);
//! }
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `hal` | yes | `PinControl` over an `embedded-hal` input pin |
//! | `defmt` | no | Logging through `defmt` |
//! | `fx-lpf` / `fx-stutter` / `fx-tapestop` | `fx-tapestop` | Choice of `EffectKind::DEFAULT` |
//!
//! ## Audio parameters
//!
//! - **Frame:** 48 stereo sample pairs, 1 ms ([`constants::FRAME_SAMPLES`])
//! - **Sample rate:** 48 000 Hz ([`constants::SAMPLE_RATE_HZ`])
//! - **Sample format:** 24-bit in a little-endian 32-bit slot, low byte zero
//! - **Ring depth:** 16 slots, 15 frames of slack ([`constants::RINGBUF_FRAMES`])

#![no_std]

mod fmt;

pub mod constants;
pub mod frame;
pub mod io;
pub mod control;
pub mod effect;
pub mod dsp;
pub mod effects;
pub mod pipeline;

/// Everything needed to wire up the pipeline.
pub mod prelude {
    #[cfg(feature = "hal")]
    pub use crate::control::PinControl;
    pub use crate::control::MomentaryControl;
    pub use crate::effect::{AnyEffect, Effect, EffectKind};
    pub use crate::frame::Frame;
    pub use crate::io::{FrameRing, UsbAudioPort};
    pub use crate::pipeline::{Pipeline, Step};
}
