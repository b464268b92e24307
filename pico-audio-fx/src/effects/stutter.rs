//! Stutter: record a short loop on press, repeat it while held.
//!
//! ```text
//!            rising edge              buffer full
//!   Idle ───────────────► Recording ─────────────► Looping
//!    ▲                        │                       │
//!    └──── falling edge ──────┴───────────────────────┘
//! ```
//!
//! While recording, the live input is also passed through. While looping,
//! the input is ignored and the captured
//! [`STUTTER_FRAMES`](crate::constants::STUTTER_FRAMES) frames repeat.
//! Holding the control after the loop is captured never re-records; a new
//! recording needs a release and a fresh press.

use crate::constants::{NUM_CHANNELS, STUTTER_SAMPLES};
use crate::control::{Edge, EdgeDetector};
use crate::effect::Effect;
use crate::frame::Frame;

/// Stutter state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StutterState {
    /// Input passes straight through.
    Idle,
    /// Capturing input into the loop buffer (and passing it through).
    Recording,
    /// Replaying the loop buffer.
    Looping,
}

/// Stutter effect engine.
pub struct Stutter {
    buffer: [[i32; NUM_CHANNELS]; STUTTER_SAMPLES],
    state: StutterState,
    edge: EdgeDetector,
    /// Next sample pair to capture.
    rec_pos: usize,
    /// Next sample pair to replay.
    read_pos: usize,
}

impl Stutter {
    pub const fn new() -> Self {
        Stutter {
            buffer: [[0; NUM_CHANNELS]; STUTTER_SAMPLES],
            state: StutterState::Idle,
            edge: EdgeDetector::new(),
            rec_pos: 0,
            read_pos: 0,
        }
    }

    pub fn state(&self) -> StutterState {
        self.state
    }

    /// Sample pairs captured so far in the current recording.
    pub fn record_pos(&self) -> usize {
        self.rec_pos
    }

    fn record(&mut self, input: &Frame) {
        for pair in input.pairs() {
            self.buffer[self.rec_pos].copy_from_slice(pair);
            self.rec_pos += 1;
            if self.rec_pos >= STUTTER_SAMPLES {
                self.rec_pos = 0;
                self.state = StutterState::Looping;
                debug!("stutter: looping {} samples", STUTTER_SAMPLES);
                break;
            }
        }
    }

    fn replay(&mut self, output: &mut Frame) {
        for pair in output.pairs_mut() {
            pair.copy_from_slice(&self.buffer[self.read_pos]);
            self.read_pos = (self.read_pos + 1) % STUTTER_SAMPLES;
        }
    }
}

impl Default for Stutter {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Stutter {
    fn name(&self) -> &'static str {
        "Pico Audio FX Stutter"
    }

    fn init(&mut self) {}

    fn set_enabled(&mut self, enabled: bool) {
        match self.edge.update(enabled) {
            Edge::Rising => {
                self.state = StutterState::Recording;
                self.rec_pos = 0;
                self.read_pos = 0;
                debug!("stutter: recording");
            }
            Edge::Falling => self.state = StutterState::Idle,
            Edge::None => {}
        }
    }

    fn process(&mut self, input: &Frame, output: &mut Frame) {
        match self.state {
            StutterState::Idle => *output = *input,
            StutterState::Recording => {
                self.record(input);
                *output = *input;
            }
            StutterState::Looping => self.replay(output),
        }
    }
}
