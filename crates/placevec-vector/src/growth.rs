//! Capacity growth policy.
//!
//! A full vector grows to `max(1, 2 * capacity)`, which bounds the total
//! relocation cost of `n` single-element insertions to `O(n)`.

use placevec_raw::AllocError;

/// Capacity of the first block allocated by a growing, empty vector.
pub const MIN_NON_ZERO_CAPACITY: usize = 1;

/// Multiplier applied to the capacity of a full vector.
pub const GROWTH_FACTOR: usize = 2;

/// Capacity to grow to when a vector of capacity `current` is full.
pub fn grown_capacity(current: usize) -> Result<usize, AllocError> {
    if current == 0 {
        return Ok(MIN_NON_ZERO_CAPACITY);
    }
    current
        .checked_mul(GROWTH_FACTOR)
        .ok_or(AllocError::CapacityOverflow {
            requested: usize::MAX,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grows_to_one() {
        assert_eq!(grown_capacity(0).unwrap(), 1);
    }

    #[test]
    fn doubles() {
        assert_eq!(grown_capacity(1).unwrap(), 2);
        assert_eq!(grown_capacity(3).unwrap(), 6);
        assert_eq!(grown_capacity(1024).unwrap(), 2048);
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            grown_capacity(usize::MAX / 2 + 1),
            Err(AllocError::CapacityOverflow { .. })
        ));
    }
}
