//! Core numeric traits used by `localfe`.
//!
//! Local bases are stored in one field (the *storage field*) but are usually derived in another
//! (the *computation field*), which may be an exact rational type. The [`Field`] trait captures
//! the operations both roles need.
pub use nalgebra;
pub use num;

pub mod field;

pub use field::{field_cast, Field};
