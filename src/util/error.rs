//! Error types for the ftsmdl library.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::PropertyType;

/// Main error type for ftsmdl operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid magic bytes at start of file
    #[error("Invalid SKM file: expected FTSMDL magic bytes")]
    InvalidMagic,

    /// Unsupported file format version
    #[error("Unsupported format version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// File is truncated or corrupted
    #[error("Unexpected end of file at position {0}")]
    UnexpectedEof(u64),

    /// Invalid data structure in file
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// Value variant does not match the property's declared type
    #[error("Type mismatch for property '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: PropertyType,
        actual: PropertyType,
    },

    /// Animation requested for a type the format cannot animate
    #[error("Property type {0} cannot be animated (only Float and Int)")]
    AnimatedTypeUnsupported(PropertyType),

    /// Keyframe added to a static property
    #[error("Property '{0}' is not animated")]
    NotAnimated(String),

    /// Static value assigned to an animated property
    #[error("Property '{0}' is animated and has no static value")]
    NotConstant(String),

    /// Animated channel with no keyframes at encode time
    #[error("Animated channel '{0}' has no keyframes")]
    EmptyChannel(String),

    /// Vertex references a bone slot outside the mesh's bone list
    #[error(
        "Mesh '{mesh}': vertex {vertex} bone index {index} out of range (bone count: {bone_count})"
    )]
    BoneIndexOutOfRange {
        mesh: String,
        vertex: usize,
        index: u8,
        bone_count: usize,
    },

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for ftsmdl operations.
pub type Result<T> = std::result::Result<T, Error>;
