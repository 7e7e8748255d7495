//! The local basis contract and basis factories.
use crate::error::Error;
use crate::polynomial::PolynomialBasis;
use crate::topology::Topology;
use localfe_traits::Field;
use nalgebra::{DMatrix, DVector};

/// A set of shape functions on a reference element.
pub trait LocalBasis<T: Field> {
    /// The number of shape functions.
    fn size(&self) -> usize;

    /// The polynomial degree of the shape functions.
    fn order(&self) -> usize;

    /// The dimension of the reference element.
    fn dimension(&self) -> usize;

    /// The number of components of each shape function.
    fn range_dimension(&self) -> usize;

    /// Values of all shape functions at the given reference coordinates.
    ///
    /// Points outside the reference element are accepted, since all shape functions are
    /// polynomials.
    fn evaluate_function(&self, x: &[T]) -> Vec<DVector<T>>;

    /// Jacobians (range dimension x dimension) of all shape functions at the given reference
    /// coordinates.
    fn evaluate_jacobian(&self, x: &[T]) -> Vec<DMatrix<T>>;
}

/// Constructs the basis of a finite element family on a reference topology.
pub trait BasisFactory<T: Field> {
    fn create(topology: &Topology, order: usize) -> Result<PolynomialBasis<T>, Error>;
}

/// Checks that the requested order does not exceed what the computation field supports.
pub(crate) fn check_order<C: Field>(family: &'static str, order: usize) -> Result<(), Error> {
    match C::MAX_ORDER {
        Some(max_order) if order > max_order => Err(Error::UnsupportedOrder {
            family,
            order,
            max_order,
        }),
        _ => Ok(()),
    }
}
