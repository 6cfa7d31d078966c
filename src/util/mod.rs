//! Utility types and functions.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam plus row-major matrix helpers

mod error;
mod math;
mod source;

pub use error::*;
pub use math::*;
pub(crate) use source::Source;
