//! Recursive descriptions of reference element shapes.
//!
//! Every reference element is obtained from the point by repeatedly taking either the *pyramid*
//! over a base (adding an apex at the new unit coordinate vector) or the *prism* over a base
//! (extruding it along the new coordinate). Simplices are pyramids of pyramids, cubes are prisms
//! of prisms. All combinatorial data (sub-entities, lattices, monomials) is derived recursively
//! from this description and follows the DUNE numbering of reference elements.
use crate::error::Error;
use crate::geometry_type::{GeometryType, MAX_DIMENSION};
use localfe_traits::Field;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// A reference topology.
///
/// Over a point, a prism and a pyramid describe the same line segment. The constructors
/// [`Topology::prism`] and [`Topology::pyramid`] therefore always represent the segment as a
/// pyramid over the point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    Point,
    Pyramid(Box<Topology>),
    Prism(Box<Topology>),
}

/// A point of an equidistant lattice on a reference element.
///
/// The coordinates of the point are `numerators[i] / order`, where `order` is the lattice order.
/// The point lies in the relative interior of the sub-entity `(codim, sub_entity)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticePoint {
    pub numerators: Vec<usize>,
    pub codim: usize,
    pub sub_entity: usize,
}

impl LatticePoint {
    pub fn coordinates<T: Field>(&self, order: usize) -> Vec<T> {
        let denominator = T::from_integer(order);
        self.numerators
            .iter()
            .map(|&n| T::from_integer(n) / denominator.clone())
            .collect()
    }
}

impl Topology {
    pub fn pyramid(base: Topology) -> Self {
        Self::Pyramid(Box::new(base))
    }

    pub fn prism(base: Topology) -> Self {
        match base {
            Topology::Point => Self::pyramid(base),
            base => Self::Prism(Box::new(base)),
        }
    }

    /// The reference simplex of the given dimension.
    pub fn simplex(dim: usize) -> Self {
        (0..dim).fold(Topology::Point, |base, _| Self::pyramid(base))
    }

    /// The reference cube of the given dimension.
    pub fn cube(dim: usize) -> Self {
        (0..dim).fold(Topology::Point, |base, _| Self::prism(base))
    }

    /// Constructs a topology from its id.
    ///
    /// Bit `i` of the id is set if the topology is a prism over its base of dimension `i`.
    /// Bits of the id from bit `dim` on are ignored.
    pub fn from_id(id: u32, dim: usize) -> Self {
        (0..dim).fold(Topology::Point, |base, level| {
            let is_prism = u32::try_from(level)
                .ok()
                .and_then(|level| id.checked_shr(level))
                .map_or(false, |bits| bits & 1 != 0);
            if is_prism {
                Self::prism(base)
            } else {
                Self::pyramid(base)
            }
        })
    }

    pub fn from_geometry_type(geometry_type: &GeometryType) -> Result<Self, Error> {
        if geometry_type.is_none() {
            Err(Error::UnsupportedGeometryType(*geometry_type))
        } else {
            Ok(Self::from_id(geometry_type.id(), geometry_type.dim()))
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        GeometryType::new(self.id(), self.dimension())
    }

    /// The topology id, with the (meaningless) bit 0 cleared.
    ///
    /// # Panics
    ///
    /// Panics if the dimension exceeds [`MAX_DIMENSION`].
    pub fn id(&self) -> u32 {
        assert!(
            self.dimension() <= MAX_DIMENSION,
            "Topology ids are limited to dimension {}",
            MAX_DIMENSION
        );
        fn raw_id(topology: &Topology) -> u32 {
            match topology {
                Topology::Point => 0,
                Topology::Pyramid(base) => raw_id(base),
                Topology::Prism(base) => raw_id(base) | (1 << base.dimension()),
            }
        }
        raw_id(self) & !1
    }

    pub fn dimension(&self) -> usize {
        match self {
            Topology::Point => 0,
            Topology::Pyramid(base) | Topology::Prism(base) => base.dimension() + 1,
        }
    }

    /// A short name for the topology: `p` for the point, followed by `o` for each pyramid and
    /// `l` for each prism construction, innermost first.
    pub fn name(&self) -> String {
        match self {
            Topology::Point => String::from("p"),
            Topology::Pyramid(base) => base.name() + "o",
            Topology::Prism(base) => base.name() + "l",
        }
    }

    pub fn base(&self) -> Option<&Topology> {
        match self {
            Topology::Point => None,
            Topology::Pyramid(base) | Topology::Prism(base) => Some(base),
        }
    }

    pub fn is_simplex(&self) -> bool {
        match self {
            Topology::Point => true,
            Topology::Pyramid(base) => base.is_simplex(),
            Topology::Prism(base) => **base == Topology::Point,
        }
    }

    pub fn is_cube(&self) -> bool {
        match self {
            Topology::Point => true,
            Topology::Prism(base) => base.is_cube(),
            Topology::Pyramid(base) => **base == Topology::Point,
        }
    }

    pub fn num_vertices(&self) -> usize {
        match self {
            Topology::Point => 1,
            Topology::Pyramid(base) => base.num_vertices() + 1,
            Topology::Prism(base) => 2 * base.num_vertices(),
        }
    }

    /// The number of sub-entities of the given codimension.
    pub fn size(&self, codim: usize) -> usize {
        let dim = self.dimension();
        match self {
            _ if codim > dim => 0,
            _ if codim == 0 => 1,
            Topology::Point => 0,
            Topology::Pyramid(base) => {
                let cones = if codim == dim { 1 } else { base.size(codim) };
                base.size(codim - 1) + cones
            }
            Topology::Prism(base) => base.size(codim) + 2 * base.size(codim - 1),
        }
    }

    /// The vertices of every sub-entity of the given codimension.
    ///
    /// For a pyramid, the faces of the base come first, followed by the cones over the faces of
    /// the base (or the apex, for vertices). For a prism, the prisms over faces of the base come
    /// first, followed by the bottom and then the top copies of the base faces.
    pub fn sub_entities(&self, codim: usize) -> Vec<Vec<usize>> {
        let dim = self.dimension();
        if codim > dim {
            return Vec::new();
        }
        if codim == 0 {
            return vec![(0..self.num_vertices()).collect()];
        }

        match self {
            Topology::Point => Vec::new(),
            Topology::Pyramid(base) => {
                let apex = base.num_vertices();
                let mut entities = base.sub_entities(codim - 1);
                if codim == dim {
                    entities.push(vec![apex]);
                } else {
                    entities.extend(base.sub_entities(codim).into_iter().map(|mut vertices| {
                        vertices.push(apex);
                        vertices
                    }));
                }
                entities
            }
            Topology::Prism(base) => {
                let shift = base.num_vertices();
                let lift = |vertices: &[usize]| -> Vec<usize> { vertices.iter().map(|v| v + shift).collect() };
                let mut entities: Vec<Vec<usize>> = base
                    .sub_entities(codim)
                    .iter()
                    .map(|vertices| {
                        let mut prism = vertices.clone();
                        prism.extend(lift(&vertices[..]));
                        prism
                    })
                    .collect();
                let base_faces = base.sub_entities(codim - 1);
                entities.extend(base_faces.iter().cloned());
                entities.extend(base_faces.iter().map(|vertices| lift(&vertices[..])));
                entities
            }
        }
    }

    /// Coordinates of the vertices. Every entry is either 0 or 1.
    pub fn vertex_coordinates(&self) -> Vec<Vec<usize>> {
        match self {
            Topology::Point => vec![Vec::new()],
            Topology::Pyramid(base) => {
                let mut vertices: Vec<Vec<usize>> = base
                    .vertex_coordinates()
                    .into_iter()
                    .map(|mut x| {
                        x.push(0);
                        x
                    })
                    .collect();
                let mut apex = vec![0; base.dimension()];
                apex.push(1);
                vertices.push(apex);
                vertices
            }
            Topology::Prism(base) => {
                let base_vertices = base.vertex_coordinates();
                [0, 1]
                    .iter()
                    .flat_map(|&z| {
                        base_vertices.iter().map(move |x| {
                            let mut x = x.clone();
                            x.push(z);
                            x
                        })
                    })
                    .collect()
            }
        }
    }

    /// The barycenter of the vertices.
    pub fn barycenter<T: Field>(&self) -> Vec<T> {
        let vertices = self.vertex_coordinates();
        let count = T::from_integer(vertices.len());
        (0..self.dimension())
            .map(|i| {
                let sum = vertices.iter().map(|x| x[i]).sum();
                T::from_integer(sum) / count.clone()
            })
            .collect()
    }

    /// The equidistant lattice of the given order.
    ///
    /// Points are sorted by decreasing codimension of the sub-entity that contains them, then by
    /// sub-entity. In particular, the first points are the vertices in vertex order.
    ///
    /// # Panics
    ///
    /// Panics if the order is zero.
    pub fn lattice_points(&self, order: usize) -> Vec<LatticePoint> {
        assert!(order > 0, "Lattice order must be positive");
        let mut points = self.unsorted_lattice(order);
        points.sort_by_key(|p| (Reverse(p.codim), p.sub_entity));
        points
    }

    fn unsorted_lattice(&self, order: usize) -> Vec<LatticePoint> {
        let dim = self.dimension();
        match self {
            Topology::Point => vec![LatticePoint {
                numerators: Vec::new(),
                codim: 0,
                sub_entity: 0,
            }],
            Topology::Pyramid(base) => {
                let mut points = Vec::new();
                for q in 0..order {
                    for p in base.unsorted_lattice(order - q) {
                        let (codim, sub_entity) = match (q, p.codim) {
                            (0, c) => (c + 1, p.sub_entity),
                            (_, 0) => (0, p.sub_entity),
                            (_, c) => (c, base.size(c - 1) + p.sub_entity),
                        };
                        let mut numerators = p.numerators;
                        numerators.push(q);
                        points.push(LatticePoint {
                            numerators,
                            codim,
                            sub_entity,
                        });
                    }
                }
                let mut apex = vec![0; dim - 1];
                apex.push(order);
                points.push(LatticePoint {
                    numerators: apex,
                    codim: dim,
                    sub_entity: base.num_vertices(),
                });
                points
            }
            Topology::Prism(base) => {
                let base_points = base.unsorted_lattice(order);
                let mut points = Vec::with_capacity((order + 1) * base_points.len());
                for q in 0..=order {
                    for p in &base_points {
                        let c = p.codim;
                        let (codim, sub_entity) = if q == 0 {
                            (c + 1, base.size(c + 1) + p.sub_entity)
                        } else if q == order {
                            (c + 1, base.size(c + 1) + base.size(c) + p.sub_entity)
                        } else {
                            (c, p.sub_entity)
                        };
                        let mut numerators = p.numerators.clone();
                        numerators.push(q);
                        points.push(LatticePoint {
                            numerators,
                            codim,
                            sub_entity,
                        });
                    }
                }
                points
            }
        }
    }

    /// Exponents of the Cartesian monomials spanning the natural polynomial space of the given
    /// order on this topology.
    ///
    /// A pyramid contributes `z^q` times the space of order `order - q` on its base, a prism
    /// contributes `z^q` times the full space of the base for every `q <= order`.
    pub fn monomial_exponents(&self, order: usize) -> Vec<Vec<usize>> {
        match self {
            Topology::Point => vec![Vec::new()],
            Topology::Pyramid(base) => (0..=order)
                .flat_map(|q| {
                    base.monomial_exponents(order - q)
                        .into_iter()
                        .map(move |mut alpha| {
                            alpha.push(q);
                            alpha
                        })
                })
                .collect(),
            Topology::Prism(base) => {
                let base_exponents = base.monomial_exponents(order);
                (0..=order)
                    .flat_map(|q| {
                        base_exponents.iter().map(move |alpha| {
                            let mut alpha = alpha.clone();
                            alpha.push(q);
                            alpha
                        })
                    })
                    .collect()
            }
        }
    }

    /// Exponents of all barycentric monomials of exactly the given degree.
    ///
    /// Each exponent has `dim + 1` entries, entry `i` belonging to the barycentric coordinate of
    /// vertex `i`. Only available on simplices.
    pub fn barycentric_exponents(&self, degree: usize) -> Result<Vec<Vec<usize>>, Error> {
        if !self.is_simplex() {
            return Err(Error::UnsupportedTopology {
                topology: self.name(),
                family: "Barycentric coordinates",
            });
        }
        Ok(self.simplex_barycentric_exponents(degree))
    }

    fn simplex_barycentric_exponents(&self, degree: usize) -> Vec<Vec<usize>> {
        match self {
            Topology::Point => vec![vec![degree]],
            Topology::Pyramid(base) | Topology::Prism(base) => (0..=degree)
                .flat_map(|q| {
                    base.simplex_barycentric_exponents(degree - q)
                        .into_iter()
                        .map(move |mut beta| {
                            beta.push(q);
                            beta
                        })
                })
                .collect(),
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
