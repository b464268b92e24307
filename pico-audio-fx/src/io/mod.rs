//! Frame exchange between the USB transfer interrupt and the main loop.
//!
//! ## Components
//!
//! | Item | Context | Description |
//! |------|---------|-------------|
//! | [`FrameRing`] | both | Lock-free SPSC queue of frames |
//! | [`UsbAudioPort`] | ISR | Producer of inbound, consumer of outbound |
//!
//! ## Data Flow
//!
//! ```text
//!        ISR                          main loop
//!  on_rx_done ──► [inbound ring]  ──► Pipeline::poll ─┐
//!                                                      │ Effect::process
//!  on_tx_request ◄── [outbound ring] ◄────────────────┘
//! ```
//!
//! Both rings are normally `static`s so the ISR and the main loop can share
//! them without locks.

pub mod ring;
pub mod transport;

pub use ring::FrameRing;
pub use transport::UsbAudioPort;

#[cfg(test)]
mod integration_tests;
