use std::fs::File;
use std::io::Read;

use tempfile::NamedTempFile;

use super::*;
use crate::anim::AnimationKind;
use crate::model::{Mesh, Property, PropertyType, Vertex};
use crate::progress::ProgressSink;
use crate::util::{Error, Mat4, Result, Vec3};

fn arm_mesh() -> Mesh {
    let mut mesh = Mesh::new(7, "Arm");
    mesh.material_name = "Skin".into();
    mesh.world_inverse = Mat4::IDENTITY;
    mesh.bone_ids = vec![101, 102];
    mesh.vertices.push(Vertex {
        position: Vec3::new(1.0, 2.0, 3.0),
        bone_index: [0, 1, 0, 0],
        weight: [0.7, 0.3, 0.0, 0.0],
    });
    mesh.properties.push(Property::constant("visibility", 1.0f32));
    mesh
}

fn write_to_bytes(meshes: &[Mesh]) -> Result<Vec<u8>> {
    let mut writer = SkmWriter::in_memory()?;
    for mesh in meshes {
        writer.write_mesh(mesh)?;
    }
    Ok(writer.finish()?.into_inner())
}

#[test]
fn test_empty_archive_is_well_formed() -> Result<()> {
    let bytes = write_to_bytes(&[])?;
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(&bytes[0..6], SKM_MAGIC);
    assert_eq!(&bytes[6..8], &CURRENT_VERSION.to_le_bytes());
    assert_eq!(&bytes[8..12], &0i32.to_le_bytes());

    let archive = SkmArchive::from_bytes(bytes)?;
    assert_eq!(archive.mesh_count(), 0);
    assert!(archive.read_all()?.is_empty());
    Ok(())
}

#[test]
fn test_mesh_count_patched_at_offset_8() -> Result<()> {
    let meshes: Vec<Mesh> = (0..5).map(|i| Mesh::new(i, format!("m{i}"))).collect();
    let bytes = write_to_bytes(&meshes)?;
    assert_eq!(&bytes[8..12], &5i32.to_le_bytes());
    Ok(())
}

#[test]
fn test_known_byte_count() -> Result<()> {
    // id + "Arm" + "Skin" + matrix + 2 bones + 1 vertex + 1 float property,
    // with a vertex at 12 + 4 + 16 = 32 bytes:
    // 4 + (4+3) + (4+4) + 64 + (4+8) + (4+32) + (4 + (4+10+1+1+4)) = 155
    let bytes = write_to_bytes(&[arm_mesh()])?;
    assert_eq!(bytes.len() - HEADER_SIZE, 155);
    assert_eq!(bytes.len(), 167);
    Ok(())
}

#[test]
fn test_round_trip_all_property_shapes() -> Result<()> {
    let mut mesh = arm_mesh();
    mesh.properties.push(Property::constant("solid", true));
    mesh.properties
        .push(Property::constant("tint", Vec3::new(0.1, 0.2, 0.3)));
    mesh.properties.push(Property::constant("layer", "fx_01"));
    mesh.properties.push(Property::constant("order", 12i32));

    let mut glow = Property::new("glow", PropertyType::Float, AnimationKind::Linear)?;
    glow.add_key(0.0, 0.0f32)?;
    glow.add_key(0.5, 1.0f32)?;
    glow.add_key(1.0, 0.25f32)?;
    mesh.properties.push(glow);

    let mut fade = Property::new("fade", PropertyType::Float, AnimationKind::Tcb)?;
    fade.add_key(0.0, 1.0f32)?;
    fade.add_key(2.0, 0.0f32)?;
    mesh.properties.push(fade);

    let mut frame = Property::animated_int("frame_index");
    frame.add_int_key_from_control(0.0, 0.0)?;
    frame.add_int_key_from_control(0.1, 3.9)?;
    mesh.properties.push(frame);

    let bytes = write_to_bytes(&[mesh.clone()])?;
    let archive = SkmArchive::from_bytes(bytes)?;
    let decoded = archive.read_all()?;

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0], mesh);

    // Property order survives, and the int channel kept its forced State tag.
    let frame = &decoded[0].properties[7];
    assert_eq!(frame.name(), "frame_index");
    assert_eq!(frame.animation_kind(), AnimationKind::State);
    assert_eq!(frame.int_keys().unwrap()[1].value, 3);
    Ok(())
}

#[test]
fn test_round_trip_non_identity_matrix() -> Result<()> {
    let mut mesh = arm_mesh();
    mesh.world_inverse =
        Mat4::from_rotation_z(1.25) * Mat4::from_translation(Vec3::new(-4.0, 0.5, 9.0));

    let bytes = write_to_bytes(&[mesh.clone()])?;
    let decoded = SkmArchive::from_bytes(bytes)?.read_all()?;
    assert_eq!(decoded[0].world_inverse, mesh.world_inverse);
    Ok(())
}

#[test]
fn test_file_round_trip() -> Result<()> {
    let temp = NamedTempFile::new()?;
    let path = temp.path();

    let mut writer = SkmWriter::create(path)?;
    writer.write_mesh(&arm_mesh())?;
    writer.finish()?;

    let mut header = [0u8; HEADER_SIZE];
    File::open(path)?.read_exact(&mut header)?;
    assert_eq!(&header[0..6], SKM_MAGIC);
    assert_eq!(&header[8..12], &1i32.to_le_bytes());

    let archive = SkmArchive::open(path)?;
    assert_eq!(archive.version(), CURRENT_VERSION);
    assert_eq!(archive.read_all()?, vec![arm_mesh()]);

    // The unmapped path must agree with the mmap path.
    let archive = SkmArchive::open_opts(path, false)?;
    assert_eq!(archive.read_all()?, vec![arm_mesh()]);
    Ok(())
}

#[test]
fn test_truncated_second_mesh() -> Result<()> {
    let second = Mesh::new(2, "second");
    let mut bytes = write_to_bytes(&[arm_mesh(), second])?;
    // Cut into the middle of the second record.
    bytes.truncate(HEADER_SIZE + 155 + 6);

    let archive = SkmArchive::from_bytes(bytes)?;
    let mut iter = archive.meshes();

    let first = iter.next().unwrap()?;
    assert_eq!(first, arm_mesh());

    match iter.next() {
        Some(Err(Error::UnexpectedEof(_))) => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
    // Never a partially populated third result.
    assert!(iter.next().is_none());
    Ok(())
}

#[test]
fn test_bad_magic_rejected() {
    let mut bytes = write_to_bytes(&[]).unwrap();
    bytes[0] = b'X';
    assert!(matches!(
        SkmArchive::from_bytes(bytes),
        Err(Error::InvalidMagic)
    ));
}

#[test]
fn test_unknown_major_version_rejected() {
    let mut bytes = write_to_bytes(&[]).unwrap();
    // Version is LE, so the major byte is at offset 7.
    bytes[7] = 2;
    assert!(matches!(
        SkmArchive::from_bytes(bytes),
        Err(Error::UnsupportedVersion { major: 2, minor: 2 })
    ));
}

#[test]
fn test_empty_animated_channel_fails_export() {
    let mut mesh = Mesh::new(1, "m");
    mesh.properties
        .push(Property::new("glow", PropertyType::Float, AnimationKind::Linear).unwrap());

    let mut writer = SkmWriter::in_memory().unwrap();
    assert!(matches!(
        writer.write_mesh(&mesh),
        Err(Error::EmptyChannel(name)) if name == "glow"
    ));
    // The failed record contributed nothing.
    assert_eq!(writer.mesh_count(), 0);
}

#[test]
fn test_invalid_bone_index_fails_export() {
    let mut mesh = arm_mesh();
    mesh.vertices[0].bone_index = [0, 2, 0, 0]; // only 2 bones

    let mut writer = SkmWriter::in_memory().unwrap();
    assert!(matches!(
        writer.write_mesh(&mesh),
        Err(Error::BoneIndexOutOfRange { .. })
    ));
}

#[test]
fn test_animated_tag_on_string_is_malformed_input() -> Result<()> {
    let mut mesh = Mesh::new(1, "m");
    mesh.properties.push(Property::constant("layer", "fx"));
    let mut bytes = write_to_bytes(&[mesh])?;

    // The property tag bytes sit right before its payload: flip the
    // animation byte after the type byte (String = 4) to Linear.
    let tag_pos = bytes
        .windows(2)
        .rposition(|w| w == [4, 0])
        .expect("string property tags");
    bytes[tag_pos + 1] = AnimationKind::Linear.to_u8();

    let archive = SkmArchive::from_bytes(bytes)?;
    let result: Result<Vec<_>> = archive.meshes().collect();
    assert!(matches!(result, Err(Error::InvalidStructure(_))));
    Ok(())
}

struct CountingProgress {
    steps: usize,
    ticks: usize,
}

impl ProgressSink for CountingProgress {
    fn set_steps(&mut self, steps: usize) {
        self.steps = steps;
    }
    fn step(&mut self) {
        self.ticks += 1;
    }
}

#[test]
fn test_export_driver_reports_progress() -> Result<()> {
    let meshes = vec![Mesh::new(1, "a"), Mesh::new(2, "b"), Mesh::new(3, "c")];
    let mut progress = CountingProgress { steps: 0, ticks: 0 };

    let mut writer = SkmWriter::in_memory()?;
    export_meshes(&mut writer, meshes, &mut progress)?;
    let bytes = writer.finish()?.into_inner();

    assert_eq!(progress.steps, 3);
    assert_eq!(progress.ticks, 3);
    assert_eq!(&bytes[8..12], &3i32.to_le_bytes());
    Ok(())
}
