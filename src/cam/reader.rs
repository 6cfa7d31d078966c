//! CAM archive reader.

use std::path::Path;

use tracing::debug;

use crate::anim::Keys;
use crate::util::{mat4_from_wire, Error, Result, Source};
use crate::wire::WireReader;

use super::{CamChannel, Camera};

/// An opened CAM file.
///
/// The format has no magic to validate, so opening only checks that the
/// 4-byte count is present and non-negative; records decode lazily.
pub struct CamArchive {
    source: Source,
    cam_count: u32,
}

impl CamArchive {
    /// Open a file for reading with memory mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, true)
    }

    /// Open a file with optional memory mapping.
    pub fn open_opts(path: impl AsRef<Path>, use_mmap: bool) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening CAM archive: {}", path.display());
        Self::from_source(Source::open(path, use_mmap)?)
    }

    /// Open an archive over an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_source(Source::Owned(data))
    }

    fn from_source(source: Source) -> Result<Self> {
        let cam_count = WireReader::new(source.as_slice()).read_count("camera")? as u32;
        debug!("CAM archive: {cam_count} cameras");
        Ok(Self { source, cam_count })
    }

    /// Camera count from the leading field.
    #[inline]
    pub fn camera_count(&self) -> u32 {
        self.cam_count
    }

    /// Iterate over the camera records in file order.
    pub fn cameras(&self) -> CameraIter<'_> {
        CameraIter {
            cur: WireReader::new_at(self.source.as_slice(), 4),
            remaining: self.cam_count,
        }
    }

    /// Decode every camera record into memory.
    pub fn read_all(&self) -> Result<Vec<Camera>> {
        self.cameras().collect()
    }
}

/// Iterator over the camera records of a [`CamArchive`].
pub struct CameraIter<'a> {
    cur: WireReader<'a>,
    remaining: u32,
}

impl Iterator for CameraIter<'_> {
    type Item = Result<Camera>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match read_camera(&mut self.cur) {
            Ok(cam) => Some(Ok(cam)),
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }
}

fn read_camera(cur: &mut WireReader<'_>) -> Result<Camera> {
    let id = cur.read_i32()?;
    let name = cur.read_string()?;

    let mut matrix = [0.0f32; 16];
    for value in &mut matrix {
        *value = cur.read_f32()?;
    }

    let fov = read_channel(cur, &name)?;
    let target_distance = read_channel(cur, &name)?;

    let near_clip = cur.read_f32()?;
    let far_clip = cur.read_f32()?;

    Ok(Camera {
        id,
        name,
        view_matrix: mat4_from_wire(&matrix),
        fov,
        target_distance,
        near_clip,
        far_clip,
    })
}

fn read_channel(cur: &mut WireReader<'_>, camera: &str) -> Result<CamChannel> {
    if !cur.read_bool()? {
        return Ok(CamChannel::Constant(cur.read_f32()?));
    }

    let key_count = cur.read_count("keyframe")?;
    if key_count == 0 {
        // The producer never emits an animated channel without keys.
        return Err(Error::invalid(format!(
            "camera '{camera}' has an animated channel with no keyframes"
        )));
    }

    let mut keys = Keys::new();
    for _ in 0..key_count {
        let time = cur.read_f32()?;
        keys.push(time, cur.read_f32()?);
    }
    Ok(CamChannel::Tcb(keys))
}
