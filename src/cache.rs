//! Lookup of pre-constructed local finite elements by geometry type.
//!
//! A [`Registry`] describes which element to construct for which geometry type of a fixed
//! dimension. A [`FiniteElementCache`] constructs all registered elements once and afterwards only
//! hands out shared references, so it can be read from many threads without synchronization.
use crate::error::Error;
use crate::geometry_type::{GeometryType, LocalGeometryTypeIndex};
use crate::lagrange::{LagrangeLocalFiniteElement, P0LocalFiniteElement};
use crate::raviart_thomas::RaviartThomasSimplexLocalFiniteElement;
use crate::variant::FiniteElementVariant;
use localfe_traits::Field;
use log::{debug, trace};
use std::fmt;
use std::fmt::{Debug, Formatter};

type Constructor<S, C> = Box<dyn Fn() -> Result<FiniteElementVariant<S, C>, Error> + Send + Sync>;

/// An ordered table of element constructors for the geometry types of one dimension.
pub struct Registry<S: Field, C: Field = S> {
    dimension: usize,
    entries: Vec<(GeometryType, Constructor<S, C>)>,
}

impl<S: Field, C: Field> Debug for Registry<S, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("dimension", &self.dimension)
            .field("geometry_types", &self.geometry_types().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: Field, C: Field> Registry<S, C> {
    /// An empty registry for geometry types of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Registers the constructor for a geometry type, replacing any previous constructor for the
    /// same geometry type.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the geometry type does not have the dimension
    /// of the registry, and with [`Error::InvalidGeometryType`] if it has no slot in a cache of
    /// that dimension.
    pub fn register<F>(&mut self, geometry_type: GeometryType, constructor: F) -> Result<(), Error>
    where
        F: Fn() -> Result<FiniteElementVariant<S, C>, Error> + Send + Sync + 'static,
    {
        if geometry_type.dim() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: geometry_type.dim(),
            });
        }
        if LocalGeometryTypeIndex::index(&geometry_type) >= LocalGeometryTypeIndex::size(self.dimension) {
            return Err(Error::InvalidGeometryType {
                topology_id: geometry_type.id(),
                dim: geometry_type.dim(),
            });
        }
        let constructor: Constructor<S, C> = Box::new(constructor);
        match self.entries.iter_mut().find(|(gt, _)| *gt == geometry_type) {
            Some(entry) => entry.1 = constructor,
            None => self.entries.push((geometry_type, constructor)),
        }
        Ok(())
    }

    /// The registered geometry types, in registration order.
    pub fn geometry_types(&self) -> impl Iterator<Item = GeometryType> + '_ {
        self.entries.iter().map(|(gt, _)| *gt)
    }

    pub fn contains(&self, geometry_type: &GeometryType) -> bool {
        self.entries.iter().any(|(gt, _)| gt == geometry_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register_p0(&mut self, geometry_type: GeometryType) -> Result<(), Error> {
        self.register(geometry_type, move || Ok(P0LocalFiniteElement::<S>::new(geometry_type).into()))
    }

    fn register_lagrange(&mut self, geometry_type: GeometryType, order: usize) -> Result<(), Error> {
        self.register(geometry_type, move || {
            Ok(LagrangeLocalFiniteElement::<S, C>::new(geometry_type, order)?.into())
        })
    }

    /// The Lagrange elements of the given order.
    ///
    /// Order zero registers piecewise constants on the simplex, the cube and the `none` type (in
    /// 3D: tetrahedron, hexahedron, prism and pyramid). Higher orders register the simplex and
    /// the cube, and in 3D additionally the prism and the pyramid for orders one and two.
    pub fn lagrange(dim: usize, order: usize) -> Self {
        let mut registry = Self::new(dim);
        let geometry_types = if order == 0 {
            if dim == 3 {
                vec![
                    GeometryType::tetrahedron(),
                    GeometryType::hexahedron(),
                    GeometryType::prism(),
                    GeometryType::pyramid(),
                ]
            } else {
                vec![GeometryType::simplex(dim), GeometryType::cube(dim), GeometryType::none(dim)]
            }
        } else if dim == 3 && order <= 2 {
            vec![
                GeometryType::tetrahedron(),
                GeometryType::hexahedron(),
                GeometryType::prism(),
                GeometryType::pyramid(),
            ]
        } else {
            vec![GeometryType::simplex(dim), GeometryType::cube(dim)]
        };

        for geometry_type in geometry_types {
            let result = if order == 0 {
                registry.register_p0(geometry_type)
            } else {
                registry.register_lagrange(geometry_type, order)
            };
            result.expect("Internal error: default registry uses geometry types of its own dimension");
        }
        registry
    }

    /// The Raviart-Thomas element of the given order on the simplex.
    pub fn raviart_thomas(dim: usize, order: usize) -> Self {
        let mut registry = Self::new(dim);
        let simplex = GeometryType::simplex(dim);
        registry
            .register(simplex, move || {
                Ok(RaviartThomasSimplexLocalFiniteElement::<S, C>::new(simplex, order)?.into())
            })
            .expect("Internal error: default registry uses geometry types of its own dimension");
        registry
    }
}

/// Pre-constructed local finite elements, indexed by geometry type.
///
/// `S` is the field in which the elements are stored and evaluated, and `C` the field in which
/// they are constructed.
#[derive(Debug, Clone)]
pub struct FiniteElementCache<S: Field, C: Field = S> {
    dimension: usize,
    slots: Vec<Option<FiniteElementVariant<S, C>>>,
}

impl<S: Field, C: Field> FiniteElementCache<S, C> {
    /// Constructs every element of the registry.
    ///
    /// Fails with the first error reported by a constructor.
    pub fn from_registry(registry: &Registry<S, C>) -> Result<Self, Error> {
        let dimension = registry.dimension();
        let mut slots = vec![None; LocalGeometryTypeIndex::size(dimension)];
        for (geometry_type, constructor) in &registry.entries {
            let element = constructor()?;
            debug!(
                "Populated finite element cache slot for {} with {} functions",
                geometry_type,
                element.as_local_finite_element().size()
            );
            slots[LocalGeometryTypeIndex::index(geometry_type)] = Some(element);
        }
        Ok(Self { dimension, slots })
    }

    /// The cache of Lagrange elements of the given dimension and order.
    ///
    /// See [`Registry::lagrange`] for the available geometry types.
    pub fn lagrange(dim: usize, order: usize) -> Result<Self, Error> {
        Self::from_registry(&Registry::lagrange(dim, order))
    }

    /// The cache of the Raviart-Thomas simplex element of the given dimension and order.
    pub fn raviart_thomas(dim: usize, order: usize) -> Result<Self, Error> {
        Self::from_registry(&Registry::raviart_thomas(dim, order))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The element for the geometry type.
    ///
    /// Fails with [`Error::UnsupportedGeometryType`] if no element was registered for it,
    /// including for any geometry type of another dimension.
    pub fn get(&self, geometry_type: &GeometryType) -> Result<&FiniteElementVariant<S, C>, Error> {
        let element = if geometry_type.dim() == self.dimension {
            self.slots
                .get(LocalGeometryTypeIndex::index(geometry_type))
                .and_then(Option::as_ref)
        } else {
            None
        };
        element.ok_or_else(|| {
            trace!("No finite element cached for geometry type {}", geometry_type);
            Error::UnsupportedGeometryType(*geometry_type)
        })
    }

    /// The geometry types for which an element is available.
    pub fn geometry_types(&self) -> Vec<GeometryType> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref())
            .map(|element| element.as_local_finite_element().geometry_type())
            .collect()
    }
}
