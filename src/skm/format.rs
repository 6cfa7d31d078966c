//! SKM format constants.

/// Magic bytes at the start of an SKM file.
pub const SKM_MAGIC: &[u8; 6] = b"FTSMDL";

/// Current format version, encoded as `(major << 8) | minor`.
///
/// 1.2 added vertex channels in the mesh part.
pub const CURRENT_VERSION: u16 = (1 << 8) | 2;

/// Format major version this implementation understands.
pub const SUPPORTED_MAJOR: u8 = 1;

/// Byte offset of the i32 mesh-count field: 6 magic bytes + 2 version bytes.
pub const MESH_COUNT_OFFSET: u64 = 8;

/// Total header size: magic + version + mesh count.
pub const HEADER_SIZE: usize = 12;

/// Split a wire version into (major, minor).
#[inline]
pub const fn version_parts(version: u16) -> (u8, u8) {
    ((version >> 8) as u8, (version & 0xFF) as u8)
}
