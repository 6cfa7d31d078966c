//! # ftsmdl
//!
//! Rust implementation of the FTSMDL export formats: the `.skm` skinned-mesh
//! file (magic `"FTSMDL"`, version 1.2) and the companion `.cam` camera file.
//!
//! Both formats come from 3ds Max exporter tooling; this crate implements
//! their byte-exact wire layout with both a writer and a reader, independent
//! of any host application. Scene extraction is the caller's job: this crate
//! consumes plain [`model::Mesh`] and [`cam::Camera`] records and turns them
//! into bytes (and back).
//!
//! ## Modules
//!
//! - [`util`] - Error type, math re-exports
//! - [`wire`] - Low-level little-endian encoding primitives
//! - [`anim`] - Keyframe store and animation-kind tags
//! - [`model`] - Mesh, vertex and property records
//! - [`skm`] - Skinned-mesh archive writer/reader
//! - [`cam`] - Camera archive writer/reader
//! - [`progress`] - Injected progress observer for export drivers
//!
//! ## Example
//!
//! ```no_run
//! use ftsmdl::skm::{SkmWriter, SkmArchive};
//! use ftsmdl::model::Mesh;
//!
//! # fn main() -> ftsmdl::Result<()> {
//! let mut writer = SkmWriter::create("character.skm")?;
//! writer.write_mesh(&Mesh::new(7, "Arm"))?;
//! writer.finish()?;
//!
//! let archive = SkmArchive::open("character.skm")?;
//! for mesh in archive.meshes() {
//!     println!("{}", mesh?.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod util;
pub mod wire;
pub mod anim;
pub mod model;
pub mod skm;
pub mod cam;
pub mod progress;

// Re-export commonly used types
pub use util::{Error, Result};
pub use model::{Mesh, Property, PropertyType, Value, Vertex};
pub use anim::{AnimationKind, Key, Keys};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::anim::{AnimationKind, Key, Keys};
    pub use crate::model::{Mesh, Property, PropertyType, Value, Vertex};
    pub use crate::skm::{SkmArchive, SkmWriter};
    pub use crate::cam::{CamArchive, CamChannel, CamWriter, Camera};
    pub use crate::progress::{NullProgress, ProgressSink};
}
