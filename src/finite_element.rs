//! Local finite elements: a basis, its local coefficients and its interpolation.
use crate::basis::{BasisFactory, LocalBasis};
use crate::coefficients::{CoefficientsFactory, LocalCoefficients};
use crate::error::Error;
use crate::geometry_type::GeometryType;
use crate::interpolation::{
    interpolation_tolerance, max_interpolation_deviation, InterpolationFactory, LocalInterpolation,
};
use crate::polynomial::PolynomialBasis;
use crate::topology::Topology;
use localfe_traits::Field;
use nalgebra::{DMatrix, DVector};
use std::marker::PhantomData;

/// The contract between local finite elements and assembly code.
pub trait LocalFiniteElement<T: Field> {
    fn local_basis(&self) -> &PolynomialBasis<T>;

    fn local_coefficients(&self) -> &LocalCoefficients;

    fn local_interpolation(&self) -> &dyn LocalInterpolation<T>;

    fn geometry_type(&self) -> GeometryType;

    /// The order the element was constructed with.
    fn order(&self) -> usize;

    /// The number of shape functions.
    fn size(&self) -> usize {
        self.local_basis().size()
    }

    fn evaluate_function(&self, x: &[T]) -> Vec<DVector<T>> {
        self.local_basis().evaluate_function(x)
    }

    fn evaluate_jacobian(&self, x: &[T]) -> Vec<DMatrix<T>> {
        self.local_basis().evaluate_jacobian(x)
    }
}

/// A local finite element assembled from a basis factory `B`, a coefficients factory `C` and an
/// interpolation factory `I`, all invoked with the same topology and order.
#[derive(Debug, Clone)]
pub struct GenericLocalFiniteElement<T, B, C, I>
where
    T: Field,
    I: InterpolationFactory<T>,
{
    basis: PolynomialBasis<T>,
    coefficients: LocalCoefficients,
    interpolation: I::Interpolation,
    geometry_type: GeometryType,
    order: usize,
    factories: PhantomData<fn() -> (B, C)>,
}

impl<T, B, C, I> GenericLocalFiniteElement<T, B, C, I>
where
    T: Field,
    B: BasisFactory<T>,
    C: CoefficientsFactory,
    I: InterpolationFactory<T>,
{
    /// Constructs the element for the reference element of the geometry type.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the interpolation does not reproduce the basis up to
    /// [`interpolation_tolerance`]. This indicates a defect in the construction.
    pub fn new(geometry_type: GeometryType, order: usize) -> Result<Self, Error> {
        let topology = Topology::from_geometry_type(&geometry_type)?;
        let basis = B::create(&topology, order)?;
        let coefficients = C::create(&topology, order)?;
        let interpolation = I::create(&topology, order)?;

        assert_eq!(
            basis.size(),
            coefficients.size(),
            "Internal error: basis and coefficients must have the same size"
        );
        debug_assert!(
            coefficients.is_consistent_with(&topology),
            "Internal error: local keys must be consistent with the reference element"
        );
        if cfg!(debug_assertions) {
            let deviation = max_interpolation_deviation(&interpolation, &basis)?;
            let tolerance = interpolation_tolerance::<T>(topology.dimension(), order);
            assert!(
                deviation <= tolerance,
                "Internal error: interpolation of the basis on {} deviates from the identity by {:e} \
                 (tolerance {:e})",
                topology,
                deviation,
                tolerance
            );
        }

        Ok(Self {
            basis,
            coefficients,
            interpolation,
            geometry_type,
            order,
            factories: PhantomData,
        })
    }

    pub fn basis(&self) -> &PolynomialBasis<T> {
        &self.basis
    }

    pub fn coefficients(&self) -> &LocalCoefficients {
        &self.coefficients
    }

    pub fn interpolation(&self) -> &I::Interpolation {
        &self.interpolation
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn size(&self) -> usize {
        self.basis.size()
    }
}

impl<T, B, C, I> LocalFiniteElement<T> for GenericLocalFiniteElement<T, B, C, I>
where
    T: Field,
    B: BasisFactory<T>,
    C: CoefficientsFactory,
    I: InterpolationFactory<T>,
{
    fn local_basis(&self) -> &PolynomialBasis<T> {
        &self.basis
    }

    fn local_coefficients(&self) -> &LocalCoefficients {
        &self.coefficients
    }

    fn local_interpolation(&self) -> &dyn LocalInterpolation<T> {
        &self.interpolation
    }

    fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    fn order(&self) -> usize {
        self.order
    }
}
