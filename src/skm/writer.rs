//! SKM archive writer.
//!
//! The writer streams: the header goes out with a placeholder mesh count,
//! each mesh is encoded as it arrives with no multi-mesh buffering, and
//! `finish` seeks back once to patch the true count. A write failure aborts
//! the export; whatever was flushed is not a well-formed file.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::model::{Mesh, Property, PropertyData, Value, Vertex};
use crate::progress::ProgressSink;
use crate::util::{mat4_to_wire, Error, Result};
use crate::wire::WireWriter;

use super::format::{CURRENT_VERSION, MESH_COUNT_OFFSET, SKM_MAGIC};

/// Streaming writer for one SKM export.
///
/// Owns its sink exclusively for the duration of the export; dropping the
/// writer without calling [`finish`](SkmWriter::finish) leaves the mesh-count
/// field at 0.
pub struct SkmWriter<W: Write + Seek> {
    out: WireWriter<W>,
    mesh_count: u32,
}

impl SkmWriter<BufWriter<File>> {
    /// Create an SKM file and write its header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        debug!("creating SKM archive: {}", path.as_ref().display());
        Self::new(WireWriter::create(path)?)
    }
}

impl SkmWriter<Cursor<Vec<u8>>> {
    /// Create an in-memory SKM writer.
    pub fn in_memory() -> Result<Self> {
        Self::new(WireWriter::new(Cursor::new(Vec::new())))
    }
}

impl<W: Write + Seek> SkmWriter<W> {
    /// Wrap a sink positioned at byte 0 and write the header: magic, version
    /// and a zero mesh-count placeholder.
    pub fn new(mut out: WireWriter<W>) -> Result<Self> {
        out.write_bytes(SKM_MAGIC)?;
        out.write_u16(CURRENT_VERSION)?;
        out.write_i32(0)?;
        Ok(Self { out, mesh_count: 0 })
    }

    /// Number of meshes written so far.
    #[inline]
    pub fn mesh_count(&self) -> u32 {
        self.mesh_count
    }

    /// Encode one mesh record.
    ///
    /// Validates the mesh's skinning invariants and every property's
    /// tag/payload agreement first; a violation fails the export before the
    /// record's bytes start.
    pub fn write_mesh(&mut self, mesh: &Mesh) -> Result<()> {
        mesh.validate()?;
        for prop in &mesh.properties {
            check_property(prop)?;
        }

        trace!(
            "writing mesh '{}': {} bones, {} vertices, {} properties",
            mesh.name,
            mesh.bone_ids.len(),
            mesh.vertices.len(),
            mesh.properties.len()
        );

        self.out.write_i32(mesh.id)?;
        self.out.write_string(&mesh.name)?;
        self.out.write_string(&mesh.material_name)?;

        for value in mat4_to_wire(&mesh.world_inverse) {
            self.out.write_f32(value)?;
        }

        self.out.write_i32(mesh.bone_ids.len() as i32)?;
        for &bone_id in &mesh.bone_ids {
            self.out.write_i32(bone_id)?;
        }

        self.out.write_i32(mesh.vertices.len() as i32)?;
        for vert in &mesh.vertices {
            self.write_vertex(vert)?;
        }

        self.out.write_i32(mesh.properties.len() as i32)?;
        for prop in &mesh.properties {
            self.write_property(prop)?;
        }

        self.mesh_count += 1;
        Ok(())
    }

    fn write_vertex(&mut self, vert: &Vertex) -> Result<()> {
        self.out.write_f32(vert.position.x)?;
        self.out.write_f32(vert.position.y)?;
        self.out.write_f32(vert.position.z)?;
        for &index in &vert.bone_index {
            self.out.write_u8(index)?;
        }
        for &weight in &vert.weight {
            self.out.write_f32(weight)?;
        }
        Ok(())
    }

    fn write_property(&mut self, prop: &Property) -> Result<()> {
        self.out.write_string(prop.name())?;
        self.out.write_u8(prop.property_type().to_u8())?;
        self.out.write_u8(prop.animation_kind().to_u8())?;

        match prop.data() {
            PropertyData::Constant(value) => match value {
                Value::Bool(v) => self.out.write_bool(*v)?,
                Value::Int(v) => self.out.write_i32(*v)?,
                Value::Float(v) => self.out.write_f32(*v)?,
                Value::Vector3(v) => {
                    self.out.write_f32(v.x)?;
                    self.out.write_f32(v.y)?;
                    self.out.write_f32(v.z)?;
                }
                Value::String(v) => self.out.write_string(v)?,
            },
            PropertyData::FloatKeys { keys, .. } => {
                self.out.write_i32(keys.len() as i32)?;
                for key in keys.iter() {
                    self.out.write_f32(key.time)?;
                    self.out.write_f32(key.value)?;
                }
            }
            PropertyData::IntKeys { keys, .. } => {
                self.out.write_i32(keys.len() as i32)?;
                for key in keys.iter() {
                    self.out.write_f32(key.time)?;
                    self.out.write_i32(key.value)?;
                }
            }
        }
        Ok(())
    }

    /// Patch the mesh count at its fixed offset, flush, and return the sink.
    ///
    /// This is the only backward seek in the protocol and happens strictly
    /// after the last mesh write.
    pub fn finish(mut self) -> Result<W> {
        debug!("finishing SKM archive: {} meshes", self.mesh_count);
        self.out.seek(MESH_COUNT_OFFSET)?;
        self.out.write_i32(self.mesh_count as i32)?;
        self.out.into_inner()
    }
}

/// Reject a property whose animation tag and payload disagree before any of
/// its bytes are written. An empty animated channel has no valid encoding:
/// the count field would say zero while the tag promises samples.
fn check_property(prop: &Property) -> Result<()> {
    let empty = match prop.data() {
        PropertyData::Constant(_) => false,
        PropertyData::FloatKeys { keys, .. } => keys.is_empty(),
        PropertyData::IntKeys { keys, .. } => keys.is_empty(),
    };
    if empty {
        return Err(Error::EmptyChannel(prop.name().to_string()));
    }
    Ok(())
}

/// Drive a whole export, announcing progress once per mesh.
///
/// The sink is advisory only; the codec never consults it for cancellation.
pub fn export_meshes<W, I, P>(writer: &mut SkmWriter<W>, meshes: I, progress: &mut P) -> Result<()>
where
    W: Write + Seek,
    I: IntoIterator<Item = Mesh>,
    I::IntoIter: ExactSizeIterator,
    P: ProgressSink,
{
    let meshes = meshes.into_iter();
    progress.set_steps(meshes.len());
    for mesh in meshes {
        writer.write_mesh(&mesh)?;
        progress.step();
    }
    Ok(())
}
