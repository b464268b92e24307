//! Fixed audio format shared by every component.

/// Sample rate in Hz. The pipeline supports this rate only.
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// Sample rate as `f32` for filter math.
pub const SAMPLE_RATE: f32 = SAMPLE_RATE_HZ as f32;

/// Half the sample rate.
pub const NYQUIST_HZ: f32 = SAMPLE_RATE * 0.5;

/// Interleaved channels per sample pair (left, right).
pub const NUM_CHANNELS: usize = 2;

/// Significant bits carried in each sample slot.
pub const BITS_PER_SAMPLE: u32 = 24;

/// Bytes per sample slot on the wire (24-bit data in a 32-bit slot, low byte zero).
pub const BYTES_PER_SAMPLE: usize = 4;

/// Sample pairs per frame: 1 ms of audio.
pub const FRAME_SAMPLES: usize = SAMPLE_RATE_HZ as usize / 1000;

/// Total `i32` slots per frame.
pub const FRAME_WORDS: usize = FRAME_SAMPLES * NUM_CHANNELS;

/// Frame size on the wire.
pub const FRAME_BYTES: usize = FRAME_WORDS * BYTES_PER_SAMPLE;

/// Slots per frame ring. One slot is kept free, so 15 frames (15 ms) of slack.
pub const RINGBUF_FRAMES: usize = 16;

/// Tape-stop history length in sample pairs (16 ms).
pub const TOTAL_SAMPLES: usize = RINGBUF_FRAMES * FRAME_SAMPLES;

/// Frames captured by the stutter recorder.
pub const STUTTER_FRAMES: usize = 63;

/// Stutter history length in sample pairs.
pub const STUTTER_SAMPLES: usize = STUTTER_FRAMES * FRAME_SAMPLES;
