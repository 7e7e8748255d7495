//! Degree-of-freedom functionals of local finite elements.
use crate::basis::LocalBasis;
use crate::error::Error;
use crate::polynomial::PolynomialBasis;
use crate::topology::Topology;
use localfe_traits::Field;
use nalgebra::{DMatrix, DVector};
use std::fmt::Debug;

/// The degrees of freedom of a local finite element, as linear functionals on functions defined
/// on the reference element.
pub trait LocalInterpolation<T: Field> {
    /// The number of functionals.
    fn size(&self) -> usize;

    /// Applies all functionals to the given function.
    fn interpolate(&self, f: &dyn Fn(&[T]) -> DVector<T>) -> Vec<T>;

    /// Applies every functional `i` to every function `j` of the basis, giving the matrix
    /// `(i, j)`.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the number of basis functions or their range
    /// dimension do not match the functionals.
    fn interpolate_basis(&self, basis: &PolynomialBasis<T>) -> Result<DMatrix<T>, Error>;
}

/// Constructs the interpolation of a finite element family on a reference topology.
pub trait InterpolationFactory<T: Field> {
    type Interpolation: LocalInterpolation<T> + Clone + Debug;

    fn create(topology: &Topology, order: usize) -> Result<Self::Interpolation, Error>;
}

/// Point evaluation functionals for scalar functions.
#[derive(Debug, Clone, PartialEq)]
pub struct PointInterpolation<T> {
    points: Vec<Vec<T>>,
}

impl<T: Field> PointInterpolation<T> {
    pub fn new(points: Vec<Vec<T>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec<T>] {
        &self.points
    }
}

impl<T: Field> LocalInterpolation<T> for PointInterpolation<T> {
    fn size(&self) -> usize {
        self.points.len()
    }

    fn interpolate(&self, f: &dyn Fn(&[T]) -> DVector<T>) -> Vec<T> {
        self.points.iter().map(|p| f(p)[0].clone()).collect()
    }

    fn interpolate_basis(&self, basis: &PolynomialBasis<T>) -> Result<DMatrix<T>, Error> {
        check_sizes(self.size(), 1, basis)?;
        let mut matrix = DMatrix::zeros(self.size(), basis.size());
        for (i, p) in self.points.iter().enumerate() {
            for (j, value) in basis.evaluate_function(p).into_iter().enumerate() {
                matrix[(i, j)] = value[0].clone();
            }
        }
        Ok(matrix)
    }
}

pub(crate) fn check_sizes<T: Field>(
    num_functionals: usize,
    range_dimension: usize,
    basis: &PolynomialBasis<T>,
) -> Result<(), Error> {
    if basis.size() != num_functionals {
        return Err(Error::DimensionMismatch {
            expected: num_functionals,
            actual: basis.size(),
        });
    }
    if basis.range_dimension() != range_dimension {
        return Err(Error::DimensionMismatch {
            expected: range_dimension,
            actual: basis.range_dimension(),
        });
    }
    Ok(())
}

/// The tolerance within which the interpolation of an element's own basis must equal the
/// identity.
///
/// Zero for exact fields. For inexact fields, the machine epsilon is scaled by `10^(order + dim + 2)`
/// to account for the growing condition number of the construction, up to at most
/// [`MAX_INTERPOLATION_TOLERANCE`].
pub fn interpolation_tolerance<T: Field>(dim: usize, order: usize) -> f64 {
    if T::EXACT {
        0.0
    } else {
        let exponent = i32::try_from(order + dim + 2).unwrap_or(i32::MAX);
        (T::epsilon() * 10f64.powi(exponent)).min(MAX_INTERPOLATION_TOLERANCE)
    }
}

/// Upper bound of [`interpolation_tolerance`] for inexact fields.
///
/// Interpolating a basis that is not dual to the functionals deviates from the identity by
/// entries of order one.
pub const MAX_INTERPOLATION_TOLERANCE: f64 = 1e-2;

/// The largest deviation of the matrix `interpolation.interpolate_basis(basis)` from the
/// identity matrix.
pub fn max_interpolation_deviation<T: Field>(
    interpolation: &dyn LocalInterpolation<T>,
    basis: &PolynomialBasis<T>,
) -> Result<f64, Error> {
    let matrix = interpolation.interpolate_basis(basis)?;
    let mut deviation: f64 = 0.0;
    for i in 0..matrix.nrows() {
        for j in 0..matrix.ncols() {
            let mut entry = matrix[(i, j)].clone();
            if i == j {
                entry -= T::one();
            }
            // Tiny non-zero rationals may round to 0.0, but must still count as a deviation
            if !entry.is_zero_within(0.0) {
                deviation = deviation.max(entry.magnitude().max(f64::MIN_POSITIVE));
            }
        }
    }
    Ok(deviation)
}
