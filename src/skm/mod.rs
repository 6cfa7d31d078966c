//! SKM skinned-mesh archive format.
//!
//! ## File structure
//!
//! ```text
//! +--------------------+
//! | Magic: "FTSMDL"    |  6 bytes
//! +--------------------+
//! | Version            |  2 bytes (u16 LE, (major << 8) | minor, 1.2)
//! +--------------------+
//! | Mesh count         |  4 bytes (i32 LE, patched after the last mesh)
//! +--------------------+
//! | Mesh records       |  back-to-back, no padding or length prefix
//! +--------------------+
//! ```
//!
//! Per mesh: `id, name, material name, world-inverse matrix (16 f32,
//! row-major), bone id list, vertex list, property list`, each list as an
//! i32 count followed by its elements.

mod format;
mod reader;
mod writer;

pub use format::*;
pub use reader::{MeshIter, SkmArchive};
pub use writer::{export_meshes, SkmWriter};

#[cfg(test)]
mod tests;
