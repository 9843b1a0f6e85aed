//! Dense row-major matrix product.

use crate::error::{NumericsError, Result};
use crate::traits::Scalar;

/// Computes `C = A * B` for row-major `A` (`i x j`) and `B` (`j x k`).
///
/// `c` receives the `i x k` product. Loop order is row, output column, inner
/// index, with the dot product accumulated locally before the single write.
///
/// # Panics
///
/// Panics if any buffer is shorter than its dimensions imply. Sizes are the
/// caller's responsibility; use [`try_mat_mult`] to have them checked.
pub fn mat_mult<T: Scalar>(a: &[T], b: &[T], c: &mut [T], i: usize, j: usize, k: usize) {
    for row in 0..i {
        for col in 0..k {
            let mut t = T::zero();
            for inner in 0..j {
                t = t + a[row * j + inner] * b[inner * k + col];
            }
            c[row * k + col] = t;
        }
    }
}

/// Same as [`mat_mult`], but validates buffer lengths first and leaves `c`
/// untouched on mismatch.
pub fn try_mat_mult<T: Scalar>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    i: usize,
    j: usize,
    k: usize,
) -> Result<()> {
    check_len("A", a.len(), i, j)?;
    check_len("B", b.len(), j, k)?;
    check_len("C", c.len(), i, k)?;
    mat_mult(a, b, c, i, j, k);
    Ok(())
}

/// Allocates the `i x k` output and multiplies into it.
///
/// Inputs are checked before anything is allocated, and an output too large
/// to allocate is reported as [`NumericsError::Allocation`].
pub fn mat_mult_to_vec<T: Scalar>(
    a: &[T],
    b: &[T],
    i: usize,
    j: usize,
    k: usize,
) -> Result<Vec<T>> {
    check_len("A", a.len(), i, j)?;
    check_len("B", b.len(), j, k)?;
    let len = i.checked_mul(k).ok_or(NumericsError::Allocation { len: usize::MAX })?;
    let mut c = Vec::new();
    c.try_reserve_exact(len)
        .map_err(|_| NumericsError::Allocation { len })?;
    c.resize(len, T::zero());
    mat_mult(a, b, &mut c, i, j, k);
    Ok(c)
}

fn check_len(what: &'static str, actual: usize, rows: usize, cols: usize) -> Result<()> {
    let expected = rows
        .checked_mul(cols)
        .ok_or(NumericsError::DimensionMismatch {
            what,
            expected: usize::MAX,
            actual,
        })?;
    if actual < expected {
        return Err(NumericsError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
