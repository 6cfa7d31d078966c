//! Math type re-exports and wire-layout matrix helpers.
//!
//! The formats store a transform as 16 f32 values in the exporter's row-major
//! order, row 0 first, with the translation in row 3 (floats 12..14). The
//! exporter used row-vector matrices; the same transform as a column-vector
//! [`Mat4`] is the transpose, so its column array is already the wire order.

// Re-export glam types
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

/// Flatten a transform into the 16-float wire order.
#[inline]
pub fn mat4_to_wire(m: &Mat4) -> [f32; 16] {
    m.to_cols_array()
}

/// Rebuild a transform from 16 wire-order f32 values.
#[inline]
pub fn mat4_from_wire(vals: &[f32; 16]) -> Mat4 {
    Mat4::from_cols_array(vals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        let m = Mat4::from_rotation_y(0.5) * Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let vals = mat4_to_wire(&m);
        assert_eq!(mat4_from_wire(&vals), m);
    }

    #[test]
    fn test_translation_in_row_3() {
        let m = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
        let vals = mat4_to_wire(&m);
        assert_eq!(&vals[12..15], &[5.0, 6.0, 7.0]);
    }
}
