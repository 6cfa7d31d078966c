use tempfile::NamedTempFile;

use super::*;
use crate::progress::NullProgress;
use crate::util::{Error, Mat4, Result, Vec3};

fn shot_camera() -> Camera {
    Camera {
        id: 42,
        name: "shot_cam".into(),
        view_matrix: Mat4::from_translation(Vec3::new(0.0, 1.5, -8.0)),
        fov: CamChannel::tcb([(0.0, 0.9), (1.0, 0.6), (2.5, 0.75)]),
        target_distance: CamChannel::Constant(10.0),
        near_clip: 0.1,
        far_clip: 500.0,
    }
}

fn write_to_bytes(cams: &[Camera]) -> Result<Vec<u8>> {
    let mut writer = CamWriter::in_memory()?;
    for cam in cams {
        writer.write_camera(cam)?;
    }
    Ok(writer.finish()?.into_inner())
}

#[test]
fn test_empty_archive_is_four_zero_bytes() -> Result<()> {
    let bytes = write_to_bytes(&[])?;
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    assert!(CamArchive::from_bytes(bytes)?.read_all()?.is_empty());
    Ok(())
}

#[test]
fn test_count_patched_at_offset_0() -> Result<()> {
    let cams = vec![Camera::new(1, "a", 0.9), Camera::new(2, "b", 0.8)];
    let bytes = write_to_bytes(&cams)?;
    assert_eq!(&bytes[0..4], &2i32.to_le_bytes());
    Ok(())
}

#[test]
fn test_round_trip() -> Result<()> {
    let cams = vec![shot_camera(), Camera::new(7, "static_cam", 1.05)];
    let bytes = write_to_bytes(&cams)?;
    let decoded = CamArchive::from_bytes(bytes)?.read_all()?;
    assert_eq!(decoded, cams);
    Ok(())
}

#[test]
fn test_static_channel_layout() -> Result<()> {
    // id + name + matrix, then the FOV channel: flag byte 0, then the value.
    let bytes = write_to_bytes(&[Camera::new(1, "c", 0.5)])?;
    let fov_flag = 4 + 4 + (4 + 1) + 64;
    assert_eq!(bytes[fov_flag], 0);
    assert_eq!(&bytes[fov_flag + 1..fov_flag + 5], &0.5f32.to_le_bytes());
    Ok(())
}

#[test]
fn test_file_round_trip() -> Result<()> {
    let temp = NamedTempFile::new()?;
    let path = temp.path();

    let mut writer = CamWriter::create(path)?;
    export_cameras(&mut writer, vec![shot_camera()], &mut NullProgress)?;
    writer.finish()?;

    let archive = CamArchive::open(path)?;
    assert_eq!(archive.camera_count(), 1);
    assert_eq!(archive.read_all()?, vec![shot_camera()]);
    Ok(())
}

#[test]
fn test_empty_tcb_channel_fails_export() {
    let mut cam = Camera::new(1, "c", 0.5);
    cam.fov = CamChannel::Tcb(crate::anim::Keys::new());

    let mut writer = CamWriter::in_memory().unwrap();
    assert!(matches!(
        writer.write_camera(&cam),
        Err(Error::EmptyChannel(_))
    ));
}

#[test]
fn test_truncated_record() -> Result<()> {
    let mut bytes = write_to_bytes(&[shot_camera()])?;
    bytes.truncate(bytes.len() - 3);

    let archive = CamArchive::from_bytes(bytes)?;
    let result: Result<Vec<_>> = archive.cameras().collect();
    assert!(matches!(result, Err(Error::UnexpectedEof(_))));
    Ok(())
}
