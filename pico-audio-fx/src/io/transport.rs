//! Interrupt-side adapter between the USB audio class driver and the rings.
//!
//! The USB stack itself (enumeration, descriptors, sample-rate requests) is
//! out of scope. It only has to call two hooks from its transfer callbacks:
//!
//! ```text
//!  host OUT packet ──► on_rx_done() ──► inbound ring ──► main loop
//!  host IN request ◄── on_tx_request() ◄── outbound ring ◄── main loop
//! ```
//!
//! Neither hook ever blocks or fails. A full inbound ring drops the packet,
//! an empty outbound ring is answered with silence.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::constants::FRAME_BYTES;
use crate::frame::Frame;

use super::ring::FrameRing;

/// Transport-side view of the two frame rings.
///
/// This is the producer of `inbound` and the consumer of `outbound`; the
/// [`Pipeline`](crate::pipeline::Pipeline) holds the opposite ends.
pub struct UsbAudioPort<'a> {
    inbound: &'a FrameRing,
    outbound: &'a FrameRing,
    dropped_rx: AtomicU32,
    silence_tx: AtomicU32,
}

impl<'a> UsbAudioPort<'a> {
    pub const fn new(inbound: &'a FrameRing, outbound: &'a FrameRing) -> Self {
        UsbAudioPort {
            inbound,
            outbound,
            dropped_rx: AtomicU32::new(0),
            silence_tx: AtomicU32::new(0),
        }
    }

    /// OUT transfer completed: store `packet` as one inbound frame.
    ///
    /// The packet is dropped if the inbound ring is full or the packet is not
    /// exactly one frame long. Always returns `true` so the driver signals
    /// completion to the host and the isochronous stream never stalls.
    pub fn on_rx_done(&self, packet: &[u8]) -> bool {
        let stored = self
            .inbound
            .try_push_with(|slot| slot.read_le_bytes(packet).is_ok());
        if !stored {
            self.dropped_rx.fetch_add(1, Ordering::Relaxed);
            trace!("rx frame dropped ({} bytes)", packet.len());
        }
        true
    }

    /// IN transfer due: fill `out` with the next processed frame, or silence.
    pub fn on_tx_request(&self, out: &mut [u8; FRAME_BYTES]) {
        let written = self
            .outbound
            .try_pop_with(|frame| frame.write_le_bytes(out).is_ok())
            .unwrap_or(false);
        if !written {
            out.fill(0);
            self.silence_tx.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Frame-typed variant of [`on_tx_request`](Self::on_tx_request).
    pub fn next_tx_frame(&self) -> Frame {
        self.outbound.try_pop().unwrap_or_else(|| {
            self.silence_tx.fetch_add(1, Ordering::Relaxed);
            Frame::SILENCE
        })
    }

    /// Inbound packets dropped since construction.
    pub fn dropped_rx(&self) -> u32 {
        self.dropped_rx.load(Ordering::Relaxed)
    }

    /// IN requests answered with silence since construction.
    pub fn silence_tx(&self) -> u32 {
        self.silence_tx.load(Ordering::Relaxed)
    }
}
