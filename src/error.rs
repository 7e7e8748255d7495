//! Library-wide error type.
use crate::geometry_type::GeometryType;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Recoverable errors reported by factories, interpolations and the element cache.
///
/// Defects in the construction itself (a singular dual matrix, an interpolation that does not
/// reproduce its own basis) are not represented here: they are bugs and cause a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The finite element family is not available on the requested reference topology.
    UnsupportedTopology { topology: String, family: &'static str },
    /// The requested order exceeds what the computation field supports for the family.
    UnsupportedOrder {
        family: &'static str,
        order: usize,
        max_order: usize,
    },
    /// No element is registered for the geometry type.
    UnsupportedGeometryType(GeometryType),
    /// The topology id and dimension do not describe a geometry type.
    InvalidGeometryType { topology_id: u32, dim: usize },
    /// Sizes of two objects that must agree do not.
    DimensionMismatch { expected: usize, actual: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedTopology { topology, family } => {
                write!(f, "{family} elements are not available on topology {topology}")
            }
            Self::UnsupportedOrder {
                family,
                order,
                max_order,
            } => {
                write!(
                    f,
                    "{family} elements of order {order} requested, but the computation field \
                     only supports orders up to {max_order}"
                )
            }
            Self::UnsupportedGeometryType(geometry_type) => {
                write!(f, "No finite element available for geometry type {geometry_type}")
            }
            Self::InvalidGeometryType { topology_id, dim } => {
                write!(f, "Topology id {topology_id} does not describe a geometry type of dimension {dim}")
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for Error {}
