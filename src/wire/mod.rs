//! Low-level wire-format primitives shared by the SKM and CAM codecs.
//!
//! Every field in both formats is a raw fixed-width little-endian value with
//! no padding:
//!
//! - integers: 4-byte signed, two's complement
//! - floats: 4-byte IEEE-754 single precision
//! - booleans: a single byte, nonzero = true
//! - strings: 4-byte byte-count prefix, then the raw bytes, no terminator
//! - fixed byte arrays (the magic literal): verbatim, no length prefix

mod reader;
mod writer;

pub use reader::WireReader;
pub use writer::WireWriter;
