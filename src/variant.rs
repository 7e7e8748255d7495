//! A closed sum type over the local finite element implementations.
use crate::coefficients::LocalCoefficients;
use crate::finite_element::LocalFiniteElement;
use crate::geometry_type::GeometryType;
use crate::interpolation::LocalInterpolation;
use crate::lagrange::{LagrangeLocalFiniteElement, P0LocalFiniteElement};
use crate::polynomial::PolynomialBasis;
use crate::raviart_thomas::RaviartThomasSimplexLocalFiniteElement;
use localfe_traits::Field;
use nalgebra::{DMatrix, DVector};

/// One of the local finite element implementations, selected at runtime.
///
/// Every implementation type appears once. In particular, Lagrange elements on simplices, cubes,
/// prisms and pyramids share the [`Lagrange`](Self::Lagrange) variant.
#[derive(Debug, Clone)]
pub enum FiniteElementVariant<S: Field, C: Field = S> {
    P0(P0LocalFiniteElement<S>),
    Lagrange(LagrangeLocalFiniteElement<S, C>),
    RaviartThomas(RaviartThomasSimplexLocalFiniteElement<S, C>),
}

impl<S: Field, C: Field> FiniteElementVariant<S, C> {
    /// The active implementation.
    pub fn as_local_finite_element(&self) -> &dyn LocalFiniteElement<S> {
        match self {
            Self::P0(element) => element,
            Self::Lagrange(element) => element,
            Self::RaviartThomas(element) => element,
        }
    }
}

impl<S: Field, C: Field> LocalFiniteElement<S> for FiniteElementVariant<S, C> {
    fn local_basis(&self) -> &PolynomialBasis<S> {
        self.as_local_finite_element().local_basis()
    }

    fn local_coefficients(&self) -> &LocalCoefficients {
        self.as_local_finite_element().local_coefficients()
    }

    fn local_interpolation(&self) -> &dyn LocalInterpolation<S> {
        self.as_local_finite_element().local_interpolation()
    }

    fn geometry_type(&self) -> GeometryType {
        self.as_local_finite_element().geometry_type()
    }

    fn order(&self) -> usize {
        self.as_local_finite_element().order()
    }

    fn size(&self) -> usize {
        self.as_local_finite_element().size()
    }

    fn evaluate_function(&self, x: &[S]) -> Vec<DVector<S>> {
        self.as_local_finite_element().evaluate_function(x)
    }

    fn evaluate_jacobian(&self, x: &[S]) -> Vec<DMatrix<S>> {
        self.as_local_finite_element().evaluate_jacobian(x)
    }
}

impl<S: Field, C: Field> From<P0LocalFiniteElement<S>> for FiniteElementVariant<S, C> {
    fn from(element: P0LocalFiniteElement<S>) -> Self {
        Self::P0(element)
    }
}

impl<S: Field, C: Field> From<LagrangeLocalFiniteElement<S, C>> for FiniteElementVariant<S, C> {
    fn from(element: LagrangeLocalFiniteElement<S, C>) -> Self {
        Self::Lagrange(element)
    }
}

impl<S: Field, C: Field> From<RaviartThomasSimplexLocalFiniteElement<S, C>> for FiniteElementVariant<S, C> {
    fn from(element: RaviartThomasSimplexLocalFiniteElement<S, C>) -> Self {
        Self::RaviartThomas(element)
    }
}
