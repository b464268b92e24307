//! Effect engines.
//!
//! Each implements [`Effect`](crate::effect::Effect) and owns all of its
//! state in fixed-size fields, so independent instances never share storage.
//!
//! | Engine | Control held | Control released |
//! |--------|--------------|------------------|
//! | [`SweepLowPass`] | cutoff sweeps down fast | cutoff recovers slowly |
//! | [`Stutter`] | record 63 ms, then loop it | pass through |
//! | [`TapeStop`] | tape decelerates to a halt | tape spins back up |

mod stutter;
mod sweep_lowpass;
mod tape_stop;

pub use stutter::{Stutter, StutterState};
pub use sweep_lowpass::{SweepLowPass, SweepParams, FC_TABLE_SIZE};
pub use tape_stop::{TapePhase, TapeStop, TapeStopParams, MIX_TABLE_SIZE};
