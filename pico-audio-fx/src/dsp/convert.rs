//! Conversion between sample slots and normalized floats.
//!
//! A slot is an `i32` holding a 24-bit sample left-justified (low byte zero).
//! Normalized values span `[-1.0, 1.0)`:
//!
//! | Slot | Unit |
//! |------|------|
//! | `i32::MIN` (`-2^23 << 8`) | `-1.0` |
//! | `0` | `0.0` |
//! | `(2^23 - 1) << 8` | `1.0 - 2^-23` |
//!
//! The scale factors are powers of two, so a slot with a zero low byte
//! survives `unit_to_slot(slot_to_unit(x))` exactly.

/// Slot units per 1.0 (`2^31`).
pub const SLOT_SCALE: f32 = 2_147_483_648.0;

/// 24-bit steps per 1.0 (`2^23`).
const STEP_SCALE: f32 = 8_388_608.0;

const STEP_MAX: f32 = STEP_SCALE - 1.0;

/// Slot → normalized float. Any low-byte content is kept as a fraction of
/// one 24-bit step.
#[inline(always)]
pub fn slot_to_unit(slot: i32) -> f32 {
    slot as f32 * (1.0 / SLOT_SCALE)
}

/// Normalized float → slot.
///
/// Rounds to the nearest 24-bit step and saturates at full scale. The low
/// byte of the result is always zero. NaN maps to 0.
#[inline(always)]
pub fn unit_to_slot(unit: f32) -> i32 {
    let steps = libm::roundf(unit * STEP_SCALE).clamp(-STEP_SCALE, STEP_MAX);
    // `as` maps NaN to 0
    (steps as i32) << 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_endpoints() {
        assert_eq!(slot_to_unit(0), 0.0);
        assert_eq!(slot_to_unit(i32::MIN), -1.0);
        assert_eq!(unit_to_slot(-1.0), i32::MIN);
        assert_eq!(unit_to_slot(1.0 - 1.0 / STEP_SCALE), 0x7FFF_FF00);
    }

    #[test]
    fn round_trip_is_exact_for_24_bit_slots() {
        for v in [-8_388_608i32, -1_000_000, -1, 0, 1, 12_345, 8_388_607] {
            let slot = v << 8;
            assert_eq!(unit_to_slot(slot_to_unit(slot)), slot, "v = {}", v);
        }
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(unit_to_slot(1.0), 0x7FFF_FF00);
        assert_eq!(unit_to_slot(37.5), 0x7FFF_FF00);
        assert_eq!(unit_to_slot(-2.0), i32::MIN);
        assert_eq!(unit_to_slot(f32::NAN), 0);
    }

    #[test]
    fn low_byte_is_cleared() {
        // Half a step rounds away from zero
        assert_eq!(unit_to_slot(0.5 / STEP_SCALE), 0x100);
        assert_eq!(unit_to_slot(0.4 / STEP_SCALE), 0);
        assert_eq!(unit_to_slot(slot_to_unit(0x1234_56FF)) & 0xFF, 0);
    }
}
