//! Skinned-mesh snapshot records.

use crate::model::Property;
use crate::util::{Error, Mat4, Result, Vec3};

/// Hard format limit on bone influences per vertex.
pub const MAX_INFLUENCES: usize = 4;

/// One skinned vertex.
///
/// `bone_index` entries are positions in the owning mesh's `bone_ids` list,
/// not raw node ids. Unused slots hold index 0 with weight 0.0. Weights are
/// stored as supplied; the format does not require them to sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub bone_index: [u8; MAX_INFLUENCES],
    pub weight: [f32; MAX_INFLUENCES],
}

impl Vertex {
    /// An unweighted vertex at a position.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            bone_index: [0; MAX_INFLUENCES],
            weight: [0.0; MAX_INFLUENCES],
        }
    }

    /// Build a vertex from an extracted influence list.
    ///
    /// The format holds at most four influences; extra entries are dropped in
    /// order and the surviving weights are not renormalized after the cut.
    pub fn from_influences(position: Vec3, influences: &[(u8, f32)]) -> Self {
        let mut vert = Self::at(position);
        for (slot, &(index, weight)) in influences.iter().take(MAX_INFLUENCES).enumerate() {
            vert.bone_index[slot] = index;
            vert.weight[slot] = weight;
        }
        vert
    }
}

/// One mesh record: identity, transform, skin binding, geometry, properties.
///
/// Built additively by extraction code and handed to the codec write-once.
/// Vertex order is the implicit triangle list: three consecutive vertices
/// form one triangle, fully expanded with no index buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Source scene node id; not necessarily small or contiguous.
    pub id: i32,
    /// Display name; not guaranteed unique.
    pub name: String,
    /// Assigned material name, empty when none.
    pub material_name: String,
    /// Inverse of the node's world transform, used by consumers to move
    /// skin-space vertices into bone space.
    pub world_inverse: Mat4,
    /// Node ids of the skeleton bones this skin references, in bone order.
    pub bone_ids: Vec<i32>,
    pub vertices: Vec<Vertex>,
    pub properties: Vec<Property>,
}

impl Mesh {
    /// Create an empty mesh with an identity transform.
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            material_name: String::new(),
            world_inverse: Mat4::IDENTITY,
            bone_ids: Vec::new(),
            vertices: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Triangle count implied by the vertex list.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check the skinning invariants before encoding.
    ///
    /// Every bone index with a nonzero weight must be a valid position in
    /// `bone_ids`. Producers own this invariant; the writer runs the check
    /// anyway and fails the export instead of emitting garbage bytes.
    pub fn validate(&self) -> Result<()> {
        let bone_count = self.bone_ids.len();
        for (vi, vert) in self.vertices.iter().enumerate() {
            for slot in 0..MAX_INFLUENCES {
                if vert.weight[slot] != 0.0 && vert.bone_index[slot] as usize >= bone_count {
                    return Err(Error::BoneIndexOutOfRange {
                        mesh: self.name.clone(),
                        vertex: vi,
                        index: vert.bone_index[slot],
                        bone_count,
                    });
                }
            }
        }
        Ok(())
    }
}
