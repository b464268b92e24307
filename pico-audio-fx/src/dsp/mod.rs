//! DSP building blocks shared by the effect engines.
//!
//! Everything here works in normalized `f32` ([`convert`] maps to and from
//! the 24-in-32 sample slots) and uses `libm` for transcendental functions,
//! so it builds the same on the target and on the host.

pub mod biquad;
pub mod convert;
pub mod one_pole;
pub mod table;

pub use biquad::{Biquad, BiquadCoeffs};
pub use convert::{slot_to_unit, unit_to_slot};
pub use one_pole::OnePole;
pub use table::PowerTable;
