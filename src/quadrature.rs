//! Quadrature rules on reference topologies.
use crate::topology::Topology;
use localfe_quadrature::collapsed::{cone, extrude};
use localfe_quadrature::DynRule;
use localfe_traits::Field;

/// A quadrature rule on a reference element, with weights and points in the field `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule<T> {
    weights: Vec<T>,
    points: Vec<Vec<T>>,
}

impl<T: Field> QuadratureRule<T> {
    /// A rule integrating polynomials of total degree up to `strength` exactly on the reference
    /// element of the topology.
    ///
    /// The rule is built recursively: pyramids use a collapsed Gauss rule over the rule of their
    /// base, prisms use a tensor product.
    pub fn for_topology(topology: &Topology, strength: usize) -> Self {
        let (weights, points) = dyn_rule(topology, strength);
        let convert = |x: f64| T::from_f64(x).expect("Quadrature data is finite");
        Self {
            weights: weights.into_iter().map(convert).collect(),
            points: points
                .into_iter()
                .map(|p| p.into_iter().map(convert).collect())
                .collect(),
        }
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    pub fn points(&self) -> &[Vec<T>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Approximates the integral of `f` over the reference element.
    pub fn integrate(&self, f: impl Fn(&[T]) -> T) -> T {
        let mut sum = T::zero();
        for (w, x) in self.weights.iter().zip(&self.points) {
            sum += w.clone() * f(x);
        }
        sum
    }
}

fn dyn_rule(topology: &Topology, strength: usize) -> DynRule {
    match topology {
        Topology::Point => localfe_quadrature::point(),
        Topology::Pyramid(base) => cone(&dyn_rule(base, strength), base.dimension(), strength),
        Topology::Prism(base) => extrude(&dyn_rule(base, strength), strength),
    }
}
