//! Plain data records the codecs persist.
//!
//! Scene extraction happens outside this crate; these types receive fully
//! extracted, host-independent values and own them until serialized.

mod mesh;
mod property;

pub use mesh::*;
pub use property::*;
