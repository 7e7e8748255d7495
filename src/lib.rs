//! Local finite elements on reference elements.
//!
//! Reference elements are described by a recursive [`Topology`](topology::Topology), from which
//! factories construct the three parts of a local finite element: the shape functions
//! ([`basis`]), their association with sub-entities ([`coefficients`]) and the degree of freedom
//! functionals ([`interpolation`]). Elements are stored in one field and may be constructed in a
//! more accurate one (see [`Field`]). A [`FiniteElementCache`](cache::FiniteElementCache) selects
//! a pre-constructed element by its runtime [`GeometryType`](geometry_type::GeometryType).
pub mod basis;
pub mod cache;
pub mod coefficients;
pub mod error;
pub mod finite_element;
pub mod geometry_type;
pub mod interpolation;
pub mod lagrange;
pub mod linalg;
pub mod polynomial;
pub mod quadrature;
pub mod raviart_thomas;
pub mod topology;
pub mod variant;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub use error::Error;
pub use localfe_traits::{field_cast, Field};

pub extern crate localfe_traits;
pub extern crate nalgebra;
pub extern crate num;
