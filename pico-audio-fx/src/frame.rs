//! The fixed-size audio frame exchanged at every boundary.
//!
//! A [`Frame`] holds [`FRAME_SAMPLES`] interleaved stereo sample pairs, one
//! millisecond at the fixed sample rate. Each slot is an `i32` carrying a
//! 24-bit sample left-justified, with the low byte reserved (zero).
//!
//! ## Wire Layout
//!
//! ```text
//! byte:  0..4    4..8    8..12   12..16  ...  380..384
//! slot:  L[0]    R[0]    L[1]    R[1]    ...  R[47]
//! ```
//!
//! Slots are little-endian, matching the USB Audio Class type-I PCM format.

use core::fmt;

use crate::constants::{BYTES_PER_SAMPLE, FRAME_BYTES, FRAME_SAMPLES, FRAME_WORDS, NUM_CHANNELS};

/// One millisecond of interleaved stereo audio.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct Frame {
    /// Interleaved slots: `[L0, R0, L1, R1, ...]`.
    pub samples: [i32; FRAME_WORDS],
}

impl Frame {
    /// An all-zero frame.
    pub const SILENCE: Frame = Frame {
        samples: [0; FRAME_WORDS],
    };

    /// Build a frame by evaluating `f(index, channel)` for every slot.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> i32) -> Self {
        Frame {
            samples: core::array::from_fn(|w| f(w / NUM_CHANNELS, w % NUM_CHANNELS)),
        }
    }

    /// Sample `index` of channel `ch`.
    #[inline]
    pub fn sample(&self, index: usize, ch: usize) -> i32 {
        self.samples[index * NUM_CHANNELS + ch]
    }

    #[inline]
    pub fn set_sample(&mut self, index: usize, ch: usize, value: i32) {
        self.samples[index * NUM_CHANNELS + ch] = value;
    }

    /// Iterate over the `[left, right]` pairs.
    pub fn pairs(&self) -> core::slice::ChunksExact<'_, i32> {
        self.samples.chunks_exact(NUM_CHANNELS)
    }

    /// Mutable counterpart of [`pairs`](Self::pairs).
    pub fn pairs_mut(&mut self) -> core::slice::ChunksExactMut<'_, i32> {
        self.samples.chunks_exact_mut(NUM_CHANNELS)
    }

    /// `true` if every slot is zero.
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    /// Decode one frame from its little-endian wire form.
    ///
    /// `bytes` must be exactly [`FRAME_BYTES`] long; a short or oversized
    /// packet is rejected rather than partially decoded.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        let mut frame = Frame::SILENCE;
        frame.read_le_bytes(bytes)?;
        Ok(frame)
    }

    /// Overwrite this frame in place from its wire form.
    ///
    /// On error the frame is left untouched.
    pub fn read_le_bytes(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        check_len(bytes.len())?;
        for (slot, chunk) in self.samples.iter_mut().zip(bytes.chunks_exact(BYTES_PER_SAMPLE)) {
            *slot = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(())
    }

    /// Encode this frame into `out`, which must be exactly [`FRAME_BYTES`] long.
    pub fn write_le_bytes(&self, out: &mut [u8]) -> Result<(), FrameError> {
        check_len(out.len())?;
        for (chunk, slot) in out.chunks_exact_mut(BYTES_PER_SAMPLE).zip(self.samples.iter()) {
            chunk.copy_from_slice(&slot.to_le_bytes());
        }
        Ok(())
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::SILENCE
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 96 slots is too noisy for assertion output; show the head only.
        f.debug_struct("Frame")
            .field("pairs", &FRAME_SAMPLES)
            .field("head", &&self.samples[..8])
            .finish()
    }
}

fn check_len(actual: usize) -> Result<(), FrameError> {
    if actual == FRAME_BYTES {
        Ok(())
    } else {
        Err(FrameError::Length {
            expected: FRAME_BYTES,
            actual,
        })
    }
}

/// A byte buffer did not hold exactly one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    Length { expected: usize, actual: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Length { expected, actual } => {
                write!(f, "frame must be {expected} bytes, got {actual}")
            }
        }
    }
}
