//! Benchmark workloads for placevec containers.
//!
//! Each workload is generic over the relocation strategy so the benches can
//! compare [`ByMove`] and [`ByClone`] on the same element sequence:
//!
//! - [`push_workload`]: `n` appends from empty (amortized growth)
//! - [`front_insert_workload`]: `n` inserts at index 0 (tail shifting)
//! - [`string_payloads`]: deterministic heap-owning elements

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use placevec_vector::{ByClone, ByMove, Relocate, Vector, VectorError};

/// Append `n` values produced by `make(i)` to an empty vector.
pub fn push_workload<T, R, F>(n: usize, mut make: F) -> Result<Vector<T, R>, VectorError>
where
    R: Relocate<T>,
    F: FnMut(usize) -> T,
{
    let mut v = Vector::new();
    for i in 0..n {
        v.push_back(make(i))?;
    }
    Ok(v)
}

/// Insert `n` values at the front, shifting the whole tail every time.
pub fn front_insert_workload<T, R, F>(n: usize, mut make: F) -> Result<Vector<T, R>, VectorError>
where
    R: Relocate<T>,
    F: FnMut(usize) -> T,
{
    let mut v = Vector::new();
    for i in 0..n {
        v.insert(0, make(i))?;
    }
    Ok(v)
}

/// `n` short strings derived from their index.
pub fn string_payloads(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("element-{i:06}")).collect()
}

/// Move-relocating vector of `u64`.
pub type MoveVector = Vector<u64, ByMove>;

/// Clone-relocating vector of `String`.
pub type CloneVector = Vector<String, ByClone>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workloads_produce_expected_order() {
        let pushed: MoveVector = push_workload(5, |i| i as u64).unwrap();
        assert_eq!(pushed, [0, 1, 2, 3, 4]);

        let fronted: MoveVector = front_insert_workload(3, |i| i as u64).unwrap();
        assert_eq!(fronted, [2, 1, 0]);
    }

    #[test]
    fn clone_workload_matches_payloads() {
        let payloads = string_payloads(4);
        let v: CloneVector = push_workload(4, |i| payloads[i].clone()).unwrap();
        assert_eq!(v.as_slice(), payloads.as_slice());
    }
}
