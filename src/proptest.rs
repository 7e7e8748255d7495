//! Strategies for property-based testing with `proptest`.
use crate::geometry_type::GeometryType;
use crate::topology::Topology;
use ::proptest::prelude::*;

/// Points in the closed reference element of the topology.
///
/// Pyramids are sampled through the collapsed map `(x, z) -> ((1 - z) x, z)`, prisms as products
/// of base points with the unit interval.
pub fn point_in_reference_element(topology: &Topology) -> BoxedStrategy<Vec<f64>> {
    match topology {
        Topology::Point => Just(Vec::new()).boxed(),
        Topology::Pyramid(base) => (point_in_reference_element(base), 0.0..=1.0)
            .prop_map(|(mut x, z): (Vec<f64>, f64)| {
                for x_i in &mut x {
                    *x_i *= 1.0 - z;
                }
                x.push(z);
                x
            })
            .boxed(),
        Topology::Prism(base) => (point_in_reference_element(base), 0.0..=1.0)
            .prop_map(|(mut x, z): (Vec<f64>, f64)| {
                x.push(z);
                x
            })
            .boxed(),
    }
}

/// Topologies with a dimension in the given range, built from random pyramid and prism
/// extensions.
pub fn topology(dims: std::ops::RangeInclusive<usize>) -> BoxedStrategy<Topology> {
    dims.prop_flat_map(|dim| ::proptest::collection::vec(any::<bool>(), dim))
        .prop_map(|is_prism| {
            is_prism
                .into_iter()
                .fold(Topology::Point, |base, is_prism| {
                    if is_prism {
                        Topology::prism(base)
                    } else {
                        Topology::pyramid(base)
                    }
                })
        })
        .boxed()
}

/// Regular geometry types with a dimension in the given range.
pub fn geometry_type(dims: std::ops::RangeInclusive<usize>) -> BoxedStrategy<GeometryType> {
    topology(dims).prop_map(|topology| topology.geometry_type()).boxed()
}
