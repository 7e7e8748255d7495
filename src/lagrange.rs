//! Lagrange elements of arbitrary order on every reference topology.
//!
//! The shape functions are the nodal basis of the natural polynomial space of the topology (see
//! [`Topology::monomial_exponents`]) with respect to point evaluation at the equidistant lattice
//! (see [`Topology::lattice_points`]). This covers `P_k` on simplices, `Q_k` on cubes, and the
//! corresponding spaces on prisms and pyramids.
//!
//! On pyramids the space is the polynomial space `span{z^q Q_{k-q}}`. It has the right dimension
//! and is unisolvent on the lattice, but it is not conforming across the triangular faces: on the
//! face `x + z = 1` the shape function `xy` restricts to `(1 - z) y`, which is not determined by
//! the lattice points of that face. Conforming pyramid elements need rational shape functions,
//! which are not provided here.
use crate::basis::{check_order, BasisFactory, LocalBasis};
use crate::coefficients::{CoefficientsFactory, LocalCoefficients, LocalKey};
use crate::error::Error;
use crate::finite_element::{GenericLocalFiniteElement, LocalFiniteElement};
use crate::geometry_type::GeometryType;
use crate::interpolation::{InterpolationFactory, LocalInterpolation, PointInterpolation};
use crate::linalg::invert;
use crate::polynomial::{MonomialSet, PolynomialBasis, Variables};
use crate::topology::Topology;
use localfe_traits::Field;
use log::debug;
use nalgebra::DMatrix;
use std::marker::PhantomData;

const FAMILY: &str = "Lagrange";

/// Constructs Lagrange bases, inverting the Vandermonde matrix in the computation field `C`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeBasisFactory<S, C = S>(PhantomData<(S, C)>);

impl<S: Field, C: Field> BasisFactory<S> for LagrangeBasisFactory<S, C> {
    fn create(topology: &Topology, order: usize) -> Result<PolynomialBasis<S>, Error> {
        check_order::<C>(FAMILY, order)?;
        if order == 0 {
            return Ok(PolynomialBasis::constant(topology.dimension()));
        }

        let dim = topology.dimension();
        let points = topology.lattice_points(order);
        let monomials = MonomialSet::new(dim, Variables::Cartesian, topology.monomial_exponents(order));
        assert_eq!(
            points.len(),
            monomials.len(),
            "Internal error: lattice and polynomial space must have the same size"
        );

        let mut vandermonde = DMatrix::<C>::zeros(points.len(), monomials.len());
        for (i, point) in points.iter().enumerate() {
            let values = monomials.evaluate::<C>(&point.coordinates(order));
            for (m, value) in values.into_iter().enumerate() {
                vandermonde[(i, m)] = value;
            }
        }
        // phi_j(p_i) = delta_ij means that the coefficient table is the transposed inverse
        let coefficients = invert(&vandermonde)
            .expect("Internal error: Lagrange nodes must be unisolvent")
            .transpose();

        debug!(
            "Constructed {} basis of order {} on {} with {} functions",
            FAMILY,
            order,
            topology,
            points.len()
        );
        Ok(PolynomialBasis::new(monomials, 1, order, coefficients).cast())
    }
}

/// Attaches every Lagrange node to the sub-entity that contains it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeCoefficientsFactory;

impl CoefficientsFactory for LagrangeCoefficientsFactory {
    fn create(topology: &Topology, order: usize) -> Result<LocalCoefficients, Error> {
        if order == 0 {
            return Ok(LocalCoefficients::new(vec![LocalKey::new(0, 0, 0)]));
        }
        let points = topology.lattice_points(order);
        Ok(LocalCoefficients::from_entities(
            points.iter().map(|p| (p.codim, p.sub_entity)),
        ))
    }
}

/// Point evaluation at the Lagrange nodes, or at the barycenter for order zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeInterpolationFactory<S>(PhantomData<S>);

impl<S: Field> InterpolationFactory<S> for LagrangeInterpolationFactory<S> {
    type Interpolation = PointInterpolation<S>;

    fn create(topology: &Topology, order: usize) -> Result<Self::Interpolation, Error> {
        let points = if order == 0 {
            vec![topology.barycenter()]
        } else {
            topology
                .lattice_points(order)
                .iter()
                .map(|p| p.coordinates(order))
                .collect()
        };
        Ok(PointInterpolation::new(points))
    }
}

/// The Lagrange element of the given order, stored in `S` and constructed in `C`.
pub type LagrangeLocalFiniteElement<S, C = S> = GenericLocalFiniteElement<
    S,
    LagrangeBasisFactory<S, C>,
    LagrangeCoefficientsFactory,
    LagrangeInterpolationFactory<S>,
>;

/// The piecewise constant element.
///
/// Unlike the order zero [`LagrangeLocalFiniteElement`], it is also defined for `none` geometry
/// types, for which the interpolation evaluates at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct P0LocalFiniteElement<S: Field> {
    basis: PolynomialBasis<S>,
    coefficients: LocalCoefficients,
    interpolation: PointInterpolation<S>,
    geometry_type: GeometryType,
}

impl<S: Field> P0LocalFiniteElement<S> {
    pub fn new(geometry_type: GeometryType) -> Self {
        let dim = geometry_type.dim();
        let point = match Topology::from_geometry_type(&geometry_type) {
            Ok(topology) => topology.barycenter(),
            Err(_) => vec![S::zero(); dim],
        };
        Self {
            basis: PolynomialBasis::constant(dim),
            coefficients: LocalCoefficients::new(vec![LocalKey::new(0, 0, 0)]),
            interpolation: PointInterpolation::new(vec![point]),
            geometry_type,
        }
    }
}

impl<S: Field> LocalFiniteElement<S> for P0LocalFiniteElement<S> {
    fn local_basis(&self) -> &PolynomialBasis<S> {
        &self.basis
    }

    fn local_coefficients(&self) -> &LocalCoefficients {
        &self.coefficients
    }

    fn local_interpolation(&self) -> &dyn LocalInterpolation<S> {
        &self.interpolation
    }

    fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    fn order(&self) -> usize {
        self.basis.order()
    }
}
