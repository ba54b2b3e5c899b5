use log::warn;
use nalgebra::Point3;

/// A polygon as 0-based indices into the vertex list, in winding order.
pub type Face = Vec<usize>;

/// Model-space polygon mesh.
///
/// Every face has at least three indices and every index is in
/// `0..vertices.len()`. Faces that break this are dropped when the mesh is
/// built so one bad record does not cost the rest of the model.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Model-space positions (homogeneous `w = 1` when transformed).
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
    rejected_faces: usize,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Self {
        let vertex_count = vertices.len();
        let total = faces.len();
        let faces: Vec<Face> = faces
            .into_iter()
            .filter(|face| face.len() >= 3 && face.iter().all(|&i| i < vertex_count))
            .collect();

        let rejected_faces = total - faces.len();
        if rejected_faces > 0 {
            warn!(
                "Dropped {} of {} faces (fewer than 3 corners or index out of range for {} vertices)",
                rejected_faces, total, vertex_count
            );
        }

        Self {
            vertices,
            faces,
            rejected_faces,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Faces discarded while building the mesh.
    pub fn rejected_faces(&self) -> usize {
        self.rejected_faces
    }

    /// Nothing to draw: no vertices or no valid faces.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }
}
