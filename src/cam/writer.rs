//! CAM archive writer.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::progress::ProgressSink;
use crate::util::{mat4_to_wire, Error, Result};
use crate::wire::WireWriter;

use super::{CamChannel, Camera, CAM_COUNT_OFFSET};

/// Streaming writer for one CAM export.
///
/// Same protocol as the SKM writer, minus the magic and version: a count
/// placeholder is written up front and patched by [`finish`](CamWriter::finish).
pub struct CamWriter<W: Write + Seek> {
    out: WireWriter<W>,
    cam_count: u32,
}

impl CamWriter<BufWriter<File>> {
    /// Create a CAM file and write the count placeholder.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        debug!("creating CAM archive: {}", path.as_ref().display());
        Self::new(WireWriter::create(path)?)
    }
}

impl CamWriter<Cursor<Vec<u8>>> {
    /// Create an in-memory CAM writer.
    pub fn in_memory() -> Result<Self> {
        Self::new(WireWriter::new(Cursor::new(Vec::new())))
    }
}

impl<W: Write + Seek> CamWriter<W> {
    /// Wrap a sink positioned at byte 0.
    pub fn new(mut out: WireWriter<W>) -> Result<Self> {
        out.write_i32(0)?;
        Ok(Self { out, cam_count: 0 })
    }

    /// Number of cameras written so far.
    #[inline]
    pub fn camera_count(&self) -> u32 {
        self.cam_count
    }

    /// Encode one camera record.
    pub fn write_camera(&mut self, cam: &Camera) -> Result<()> {
        check_channel(&cam.fov, &cam.name)?;
        check_channel(&cam.target_distance, &cam.name)?;

        trace!("writing camera '{}'", cam.name);

        self.out.write_i32(cam.id)?;
        self.out.write_string(&cam.name)?;
        for value in mat4_to_wire(&cam.view_matrix) {
            self.out.write_f32(value)?;
        }

        self.write_channel(&cam.fov)?;
        self.write_channel(&cam.target_distance)?;

        self.out.write_f32(cam.near_clip)?;
        self.out.write_f32(cam.far_clip)?;

        self.cam_count += 1;
        Ok(())
    }

    fn write_channel(&mut self, channel: &CamChannel) -> Result<()> {
        match channel {
            CamChannel::Constant(value) => {
                self.out.write_bool(false)?;
                self.out.write_f32(*value)?;
            }
            CamChannel::Tcb(keys) => {
                self.out.write_bool(true)?;
                self.out.write_i32(keys.len() as i32)?;
                for key in keys.iter() {
                    self.out.write_f32(key.time)?;
                    self.out.write_f32(key.value)?;
                }
            }
        }
        Ok(())
    }

    /// Patch the camera count at offset 0, flush, and return the sink.
    pub fn finish(mut self) -> Result<W> {
        debug!("finishing CAM archive: {} cameras", self.cam_count);
        self.out.seek(CAM_COUNT_OFFSET)?;
        self.out.write_i32(self.cam_count as i32)?;
        self.out.into_inner()
    }
}

fn check_channel(channel: &CamChannel, camera: &str) -> Result<()> {
    if let CamChannel::Tcb(keys) = channel {
        if keys.is_empty() {
            return Err(Error::EmptyChannel(camera.to_string()));
        }
    }
    Ok(())
}

/// Drive a whole camera export, announcing progress once per camera.
pub fn export_cameras<W, I, P>(writer: &mut CamWriter<W>, cams: I, progress: &mut P) -> Result<()>
where
    W: Write + Seek,
    I: IntoIterator<Item = Camera>,
    I::IntoIter: ExactSizeIterator,
    P: ProgressSink,
{
    let cams = cams.into_iter();
    progress.set_steps(cams.len());
    for cam in cams {
        writer.write_camera(&cam)?;
        progress.step();
    }
    Ok(())
}
