//! SKM archive reader.
//!
//! Inverts the writer exactly: verify the magic, reject unknown major
//! versions, read the mesh count, then decode that many records in field
//! order. Any premature end of input is an error carrying the byte offset;
//! meshes decoded before the truncation point are still delivered.

use std::path::Path;

use tracing::{debug, warn};

use crate::anim::{AnimationKind, Keys};
use crate::model::{Mesh, Property, PropertyData, PropertyType, Value, Vertex};
use crate::util::{mat4_from_wire, Error, Result, Source, Vec3};
use crate::wire::WireReader;

use super::format::{version_parts, SKM_MAGIC, SUPPORTED_MAJOR};

/// An opened SKM file with a validated header.
///
/// Mesh records are decoded lazily through [`meshes`](SkmArchive::meshes);
/// opening only parses the 12-byte header.
pub struct SkmArchive {
    source: Source,
    version: u16,
    mesh_count: u32,
}

impl SkmArchive {
    /// Open a file for reading with memory mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, true)
    }

    /// Open a file with optional memory mapping.
    pub fn open_opts(path: impl AsRef<Path>, use_mmap: bool) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening SKM archive: {}", path.display());
        Self::from_source(Source::open(path, use_mmap)?)
    }

    /// Open an archive over an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_source(Source::Owned(data))
    }

    fn from_source(source: Source) -> Result<Self> {
        let mut header = WireReader::new(source.as_slice());

        if header.read_bytes(SKM_MAGIC.len())? != SKM_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let version = header.read_u16()?;
        let (major, minor) = version_parts(version);
        if major != SUPPORTED_MAJOR {
            return Err(Error::UnsupportedVersion { major, minor });
        }
        if version != super::format::CURRENT_VERSION {
            warn!("SKM minor version {major}.{minor} differs from 1.2, reading anyway");
        }

        let mesh_count = header.read_count("mesh")? as u32;
        debug!("SKM archive: version {major}.{minor}, {mesh_count} meshes");

        Ok(Self {
            source,
            version,
            mesh_count,
        })
    }

    /// Wire version, `(major << 8) | minor`.
    #[inline]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Mesh count from the header.
    #[inline]
    pub fn mesh_count(&self) -> u32 {
        self.mesh_count
    }

    /// Iterate over the archive's mesh records in file order.
    ///
    /// A decode error ends the iteration: the failing record is yielded as
    /// `Err` and nothing partial follows it.
    pub fn meshes(&self) -> MeshIter<'_> {
        // Header was validated in from_source; start past it.
        MeshIter {
            cur: WireReader::new_at(self.source.as_slice(), super::format::HEADER_SIZE),
            remaining: self.mesh_count,
        }
    }

    /// Decode every mesh record into memory.
    pub fn read_all(&self) -> Result<Vec<Mesh>> {
        self.meshes().collect()
    }
}

/// Iterator over the mesh records of an [`SkmArchive`].
pub struct MeshIter<'a> {
    cur: WireReader<'a>,
    remaining: u32,
}

impl Iterator for MeshIter<'_> {
    type Item = Result<Mesh>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match read_mesh(&mut self.cur) {
            Ok(mesh) => Some(Ok(mesh)),
            Err(e) => {
                // A malformed record poisons the rest of the stream.
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

fn read_mesh(cur: &mut WireReader<'_>) -> Result<Mesh> {
    let id = cur.read_i32()?;
    let name = cur.read_string()?;
    let material_name = cur.read_string()?;

    let mut matrix = [0.0f32; 16];
    for value in &mut matrix {
        *value = cur.read_f32()?;
    }

    let bone_count = cur.read_count("bone")?;
    let mut bone_ids = Vec::with_capacity(bone_count);
    for _ in 0..bone_count {
        bone_ids.push(cur.read_i32()?);
    }

    let vertex_count = cur.read_count("vertex")?;
    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        vertices.push(read_vertex(cur)?);
    }

    let property_count = cur.read_count("property")?;
    let mut properties = Vec::with_capacity(property_count);
    for _ in 0..property_count {
        properties.push(read_property(cur)?);
    }

    Ok(Mesh {
        id,
        name,
        material_name,
        world_inverse: mat4_from_wire(&matrix),
        bone_ids,
        vertices,
        properties,
    })
}

fn read_vertex(cur: &mut WireReader<'_>) -> Result<Vertex> {
    let position = Vec3::new(cur.read_f32()?, cur.read_f32()?, cur.read_f32()?);

    let mut bone_index = [0u8; 4];
    for index in &mut bone_index {
        *index = cur.read_u8()?;
    }

    let mut weight = [0.0f32; 4];
    for w in &mut weight {
        *w = cur.read_f32()?;
    }

    Ok(Vertex {
        position,
        bone_index,
        weight,
    })
}

fn read_property(cur: &mut WireReader<'_>) -> Result<Property> {
    let name = cur.read_string()?;

    let type_tag = cur.read_u8()?;
    let ty = PropertyType::from_u8(type_tag)
        .ok_or_else(|| Error::invalid(format!("unknown property type tag: {type_tag}")))?;

    let kind_tag = cur.read_u8()?;
    let kind = AnimationKind::from_u8(kind_tag)
        .ok_or_else(|| Error::invalid(format!("unknown animation kind tag: {kind_tag}")))?;

    let data = if !kind.is_animated() {
        let value = match ty {
            PropertyType::Boolean => Value::Bool(cur.read_bool()?),
            PropertyType::Int => Value::Int(cur.read_i32()?),
            PropertyType::Float => Value::Float(cur.read_f32()?),
            PropertyType::Vector3 => {
                Value::Vector3(Vec3::new(cur.read_f32()?, cur.read_f32()?, cur.read_f32()?))
            }
            PropertyType::String => Value::String(cur.read_string()?),
        };
        PropertyData::Constant(value)
    } else {
        // Only numeric channels can be animated; anything else in the file
        // is malformed input, not a precondition failure.
        let key_count = cur.read_count("keyframe")?;
        match ty {
            PropertyType::Float => {
                let mut keys = Keys::new();
                for _ in 0..key_count {
                    let time = cur.read_f32()?;
                    keys.push(time, cur.read_f32()?);
                }
                PropertyData::FloatKeys { kind, keys }
            }
            PropertyType::Int => {
                let mut keys = Keys::new();
                for _ in 0..key_count {
                    let time = cur.read_f32()?;
                    keys.push(time, cur.read_i32()?);
                }
                PropertyData::IntKeys { kind, keys }
            }
            other => {
                return Err(Error::invalid(format!(
                    "property '{name}' has animated tag on non-animatable type {other}"
                )))
            }
        }
    };

    Ok(Property::from_parts(name, data))
}
