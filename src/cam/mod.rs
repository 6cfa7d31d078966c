//! CAM camera archive format.
//!
//! The camera file is magic-less: a leading i32 camera count (written as a
//! placeholder and patched after the last record, like the SKM mesh count but
//! at offset 0) followed by fixed camera records.
//!
//! Per camera: `id(i32), name(string), view matrix (16 f32, row-major)`,
//! then the FOV channel, the target-distance channel, `near_clip(f32)` and
//! `far_clip(f32)`. A channel is a 1-byte animated flag: when set, an i32 key
//! count and (time, value) f32 pairs with TCB interpolation; when clear, a
//! single f32.

mod reader;
mod writer;

pub use reader::{CamArchive, CameraIter};
pub use writer::{export_cameras, CamWriter};

use crate::anim::Keys;
use crate::util::Mat4;

/// Byte offset of the i32 camera-count field.
pub const CAM_COUNT_OFFSET: u64 = 0;

/// An FOV or target-distance channel: constant, or TCB keyframes.
///
/// Only TCB controllers were ever exported for cameras; a camera animated
/// with any other controller falls back to its constant value on the
/// producer side.
#[derive(Clone, Debug, PartialEq)]
pub enum CamChannel {
    Constant(f32),
    Tcb(Keys<f32>),
}

impl CamChannel {
    /// Build a TCB channel from (time, value) pairs.
    pub fn tcb(samples: impl IntoIterator<Item = (f32, f32)>) -> Self {
        Self::Tcb(samples.into_iter().collect())
    }

    /// True when the channel carries keyframes.
    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Tcb(_))
    }
}

/// One exported camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Source scene node id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// View matrix: the inverse of the camera node's object transform.
    pub view_matrix: Mat4,
    /// Field of view in radians.
    pub fov: CamChannel,
    /// Distance to the camera target.
    pub target_distance: CamChannel,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Camera {
    /// Create a static camera with an identity view matrix.
    pub fn new(id: i32, name: impl Into<String>, fov: f32) -> Self {
        Self {
            id,
            name: name.into(),
            view_matrix: Mat4::IDENTITY,
            fov: CamChannel::Constant(fov),
            target_distance: CamChannel::Constant(10.0),
            near_clip: 0.1,
            far_clip: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests;
