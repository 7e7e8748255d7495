//! Assignment of shape functions to sub-entities of the reference element.
use crate::error::Error;
use crate::topology::Topology;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Attaches a shape function to a sub-entity of the reference element.
///
/// `index` distinguishes the shape functions attached to the same sub-entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalKey {
    pub sub_entity: usize,
    pub codim: usize,
    pub index: usize,
}

impl LocalKey {
    pub fn new(sub_entity: usize, codim: usize, index: usize) -> Self {
        Self {
            sub_entity,
            codim,
            index,
        }
    }
}

/// The local keys of all shape functions of an element, in basis order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCoefficients {
    keys: Vec<LocalKey>,
}

impl LocalCoefficients {
    pub fn new(keys: Vec<LocalKey>) -> Self {
        Self { keys }
    }

    /// Builds keys from `(codim, sub_entity)` pairs, numbering shape functions on the same
    /// sub-entity consecutively in order of appearance.
    pub fn from_entities(entities: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut counters: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        let keys = entities
            .into_iter()
            .map(|(codim, sub_entity)| {
                let counter = counters.entry((codim, sub_entity)).or_insert(0);
                let key = LocalKey::new(sub_entity, codim, *counter);
                *counter += 1;
                key
            })
            .collect();
        Self { keys }
    }

    pub fn size(&self) -> usize {
        self.keys.len()
    }

    pub fn local_key(&self, i: usize) -> &LocalKey {
        &self.keys[i]
    }

    pub fn keys(&self) -> &[LocalKey] {
        &self.keys
    }

    /// Checks that every key refers to an existing sub-entity of the topology, that no key occurs
    /// twice, and that the indices on each sub-entity are `0, 1, ..., count - 1`.
    pub fn is_consistent_with(&self, topology: &Topology) -> bool {
        let mut counts: FxHashMap<(usize, usize), Vec<usize>> = FxHashMap::default();
        for key in &self.keys {
            if key.codim > topology.dimension() || key.sub_entity >= topology.size(key.codim) {
                return false;
            }
            counts
                .entry((key.codim, key.sub_entity))
                .or_default()
                .push(key.index);
        }
        counts.into_values().all(|mut indices| {
            indices.sort_unstable();
            indices.iter().enumerate().all(|(expected, &index)| expected == index)
        })
    }
}

/// Constructs the local coefficients of a finite element family on a reference topology.
///
/// Index `i` of the result describes the same shape function as index `i` of the basis built by
/// the family's [`BasisFactory`](crate::basis::BasisFactory).
pub trait CoefficientsFactory {
    fn create(topology: &Topology, order: usize) -> Result<LocalCoefficients, Error>;
}
