//! Runtime tags for reference element shapes.
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The largest dimension of a geometry type, limited by the bits of a `u32` topology id.
pub const MAX_DIMENSION: usize = 31;

/// Identifies the shape of a reference element at runtime.
///
/// A geometry type is either a regular type, described by a topology id and a dimension (see
/// [`Topology::from_id`](crate::topology::Topology::from_id)), or the `none` type of a given
/// dimension, which stands for general polytopes without a reference element.
///
/// Deserialization validates its input through [`GeometryType::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SerializedGeometryType")]
pub struct GeometryType {
    topology_id: u32,
    dim: usize,
    none: bool,
}

#[derive(Deserialize)]
struct SerializedGeometryType {
    topology_id: u32,
    dim: usize,
    none: bool,
}

impl TryFrom<SerializedGeometryType> for GeometryType {
    type Error = Error;

    fn try_from(serialized: SerializedGeometryType) -> Result<Self, Error> {
        let SerializedGeometryType { topology_id, dim, none } = serialized;
        if none {
            Self::try_new(0, dim).map(|_| Self::none(dim))
        } else {
            Self::try_new(topology_id, dim)
        }
    }
}

fn id_mask(dim: usize) -> u32 {
    if dim == 0 {
        0
    } else {
        ((1u32 << dim) - 1) & !1
    }
}

impl GeometryType {
    /// A regular geometry type. Bit 0 and all bits from bit `dim` on of the topology id are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if `dim` exceeds [`MAX_DIMENSION`].
    pub fn new(topology_id: u32, dim: usize) -> Self {
        assert!(
            dim <= MAX_DIMENSION,
            "Geometry types are limited to dimension {}, got {}",
            MAX_DIMENSION,
            dim
        );
        Self {
            topology_id: topology_id & id_mask(dim),
            dim,
            none: false,
        }
    }

    /// A regular geometry type, checking that the topology id has no bits set from bit `dim` on
    /// and that `dim` does not exceed [`MAX_DIMENSION`]. Bit 0 is ignored.
    pub fn try_new(topology_id: u32, dim: usize) -> Result<Self, Error> {
        if dim > MAX_DIMENSION || topology_id & !(id_mask(dim) | 1) != 0 {
            Err(Error::InvalidGeometryType { topology_id, dim })
        } else {
            Ok(Self::new(topology_id, dim))
        }
    }

    pub fn simplex(dim: usize) -> Self {
        Self::new(0, dim)
    }

    pub fn cube(dim: usize) -> Self {
        Self::new(u32::MAX, dim)
    }

    /// # Panics
    ///
    /// Panics if `dim` exceeds [`MAX_DIMENSION`].
    pub fn none(dim: usize) -> Self {
        assert!(
            dim <= MAX_DIMENSION,
            "Geometry types are limited to dimension {}, got {}",
            MAX_DIMENSION,
            dim
        );
        Self {
            topology_id: 0,
            dim,
            none: true,
        }
    }

    pub fn vertex() -> Self {
        Self::simplex(0)
    }

    pub fn line() -> Self {
        Self::simplex(1)
    }

    pub fn triangle() -> Self {
        Self::simplex(2)
    }

    pub fn quadrilateral() -> Self {
        Self::cube(2)
    }

    pub fn tetrahedron() -> Self {
        Self::simplex(3)
    }

    pub fn hexahedron() -> Self {
        Self::cube(3)
    }

    /// The prism over the triangle.
    pub fn prism() -> Self {
        Self::new(0b100, 3)
    }

    /// The pyramid over the quadrilateral.
    pub fn pyramid() -> Self {
        Self::new(0b011, 3)
    }

    pub fn id(&self) -> u32 {
        self.topology_id
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_none(&self) -> bool {
        self.none
    }

    pub fn is_simplex(&self) -> bool {
        !self.none && self.topology_id == 0
    }

    pub fn is_cube(&self) -> bool {
        !self.none && self.topology_id == Self::cube(self.dim).topology_id
    }

    pub fn is_prism(&self) -> bool {
        *self == Self::prism()
    }

    pub fn is_pyramid(&self) -> bool {
        *self == Self::pyramid()
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = if self.none {
            "none"
        } else if self.is_simplex() {
            "simplex"
        } else if self.is_cube() {
            "cube"
        } else if self.is_prism() {
            "prism"
        } else if self.is_pyramid() {
            "pyramid"
        } else {
            return write!(f, "(general, {}, id {})", self.dim, self.topology_id);
        };
        write!(f, "({}, {})", name, self.dim)
    }
}

/// Dense numbering of all geometry types of a fixed dimension.
///
/// The regular types of dimension `d` are numbered by `id >> 1`, followed by the `none` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalGeometryTypeIndex;

impl LocalGeometryTypeIndex {
    fn regular_size(dim: usize) -> usize {
        ((1usize << dim) + 1) >> 1
    }

    /// The number of geometry types of the given dimension, including `none`.
    ///
    /// # Panics
    ///
    /// Panics if `dim` exceeds [`MAX_DIMENSION`].
    pub fn size(dim: usize) -> usize {
        assert!(dim <= MAX_DIMENSION, "Dimension {} exceeds {}", dim, MAX_DIMENSION);
        Self::regular_size(dim) + 1
    }

    pub fn index(geometry_type: &GeometryType) -> usize {
        if geometry_type.is_none() {
            Self::regular_size(geometry_type.dim())
        } else {
            (geometry_type.id() >> 1) as usize
        }
    }
}
