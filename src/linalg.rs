//! Dense linear algebra over arbitrary fields.
//!
//! `nalgebra` decompositions require a `ComplexField`, which exact rationals are not, so the
//! inversion needed to build dual bases is implemented here for any [`Field`].
use localfe_traits::Field;
use nalgebra::DMatrix;

/// Inverts a square matrix by Gauss–Jordan elimination.
///
/// Inexact fields use partial pivoting by magnitude. Exact fields pick the first non-zero pivot,
/// which is enough since there is no rounding error to control. Returns `None` if the matrix is
/// singular (for inexact fields: if a pivot vanishes relative to the magnitude of the matrix).
///
/// # Panics
///
/// Panics if the matrix is not square.
pub fn invert<T: Field>(matrix: &DMatrix<T>) -> Option<DMatrix<T>> {
    let n = matrix.nrows();
    assert_eq!(n, matrix.ncols(), "Only square matrices can be inverted");

    let scale = matrix.iter().map(|a| a.magnitude()).fold(0.0, f64::max);
    let singular_tol = if T::EXACT { 0.0 } else { scale * (n as f64) * T::epsilon() };

    let mut a = matrix.clone();
    let mut inverse: DMatrix<T> = DMatrix::identity(n, n);

    for k in 0..n {
        let pivot_row = if T::EXACT {
            (k..n).find(|&i| !a[(i, k)].is_zero())?
        } else {
            let (row, magnitude) = (k..n)
                .map(|i| (i, a[(i, k)].magnitude()))
                .fold((k, -1.0), |best, candidate| if candidate.1 > best.1 { candidate } else { best });
            if magnitude <= singular_tol {
                return None;
            }
            row
        };
        a.swap_rows(k, pivot_row);
        inverse.swap_rows(k, pivot_row);

        let pivot = a[(k, k)].clone();
        for j in 0..n {
            a[(k, j)] /= pivot.clone();
            inverse[(k, j)] /= pivot.clone();
        }

        for i in (0..n).filter(|&i| i != k) {
            let factor = a[(i, k)].clone();
            if factor.is_zero() {
                continue;
            }
            for j in 0..n {
                let a_kj = a[(k, j)].clone();
                a[(i, j)] -= factor.clone() * a_kj;
                let inv_kj = inverse[(k, j)].clone();
                inverse[(i, j)] -= factor.clone() * inv_kj;
            }
        }
    }

    Some(inverse)
}
