use nalgebra as na;

/// The set of vertex attributes a caller wants computed.
///
/// Only positions feed the tessellation core; the remaining attributes
/// (normals, tangents, texture coordinates) are the concern of a separate
/// post-pass and are not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexFormat {
    pub position: bool,
}

impl VertexFormat {
    pub const POSITION_ONLY: Self = Self { position: true };
}

impl Default for VertexFormat {
    fn default() -> Self {
        Self::POSITION_ONLY
    }
}

/// A sphere guaranteed to contain a piece of geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: na::Point3<f64>,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Triangles,
}

/// One batch of indices into a position buffer.
#[derive(Debug, Clone)]
pub struct IndexList {
    pub primitive: PrimitiveType,
    pub indices: Vec<u32>,
}

impl IndexList {
    pub fn triangles(indices: Vec<u32>) -> Self {
        Self {
            primitive: PrimitiveType::Triangles,
            indices,
        }
    }
}

/// A finished triangulated mesh.
///
/// `positions` is a flat buffer of three `f64` components per vertex; it is
/// empty when the vertex format did not request positions, in which case the
/// index lists still describe the topology.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    pub positions: Vec<f64>,
    pub index_lists: Vec<IndexList>,
    pub bounding_sphere: BoundingSphere,
    pub model_matrix: na::Matrix4<f64>,
    pub pick_id: Option<u64>,
}

impl TriangleMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Recovers the `i`-th vertex from the flat position buffer.
    pub fn position(&self, i: usize) -> na::Point3<f64> {
        na::Point3::new(
            self.positions[3 * i],
            self.positions[3 * i + 1],
            self.positions[3 * i + 2],
        )
    }
}
