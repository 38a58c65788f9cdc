use blockworld_common::Face;
use bytemuck::{Pod, Zeroable};
use std::ops::Range;

/// Vertex layout shared by every static mesh: position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

const fn v(position: [f32; 3], uv: [f32; 2]) -> MeshVertex {
    MeshVertex { position, uv }
}

/// Indexed triangle mesh. Cubes additionally record the index range of each
/// face so every face can be drawn with its own texture.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    face_ranges: Vec<Range<u32>>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            face_ranges: Vec::new(),
        }
    }

    /// Unit quad on the XZ plane at y = 0, centred on the origin.
    pub fn quad() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            v([-0.5, 0.0, -0.5], [0.0, 0.0]),
            v([ 0.5, 0.0, -0.5], [1.0, 0.0]),
            v([ 0.5, 0.0,  0.5], [1.0, 1.0]),
            v([-0.5, 0.0,  0.5], [0.0, 1.0]),
        ];
        Self::new(vertices, vec![0, 1, 2, 2, 3, 0])
    }

    /// Unit cube centred on the origin, four vertices per face so each face
    /// has its own UVs. Faces are laid out in [`Face::ALL`] order, six
    /// indices each. V runs top-down so textures appear upright.
    pub fn cube() -> Self {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let vertices = vec![
            // front (+Z)
            v([-p, -p,  p], [0.0, 1.0]),
            v([ p, -p,  p], [1.0, 1.0]),
            v([ p,  p,  p], [1.0, 0.0]),
            v([-p,  p,  p], [0.0, 0.0]),
            // back (-Z)
            v([-p, -p, -p], [1.0, 1.0]),
            v([ p, -p, -p], [0.0, 1.0]),
            v([ p,  p, -p], [0.0, 0.0]),
            v([-p,  p, -p], [1.0, 0.0]),
            // left (-X)
            v([-p, -p, -p], [0.0, 1.0]),
            v([-p, -p,  p], [1.0, 1.0]),
            v([-p,  p,  p], [1.0, 0.0]),
            v([-p,  p, -p], [0.0, 0.0]),
            // right (+X)
            v([ p, -p, -p], [1.0, 1.0]),
            v([ p, -p,  p], [0.0, 1.0]),
            v([ p,  p,  p], [0.0, 0.0]),
            v([ p,  p, -p], [1.0, 0.0]),
            // top (+Y)
            v([-p,  p,  p], [0.0, 1.0]),
            v([ p,  p,  p], [1.0, 1.0]),
            v([ p,  p, -p], [1.0, 0.0]),
            v([-p,  p, -p], [0.0, 0.0]),
            // bottom (-Y)
            v([-p, -p,  p], [0.0, 1.0]),
            v([ p, -p,  p], [1.0, 1.0]),
            v([ p, -p, -p], [1.0, 0.0]),
            v([-p, -p, -p], [0.0, 0.0]),
        ];
        let mut indices = Vec::with_capacity(36);
        let mut face_ranges = Vec::with_capacity(6);
        for face in 0..6u32 {
            let b = face * 4;
            let start = indices.len() as u32;
            indices.extend_from_slice(&[b, b + 1, b + 2, b, b + 2, b + 3]);
            face_ranges.push(start..start + 6);
        }
        Self {
            vertices,
            indices,
            face_ranges,
        }
    }

    /// Index range of `face`, if this mesh is split into faces.
    pub fn face_range(&self, face: Face) -> Option<Range<u32>> {
        self.face_ranges.get(face.index()).cloned()
    }

    pub fn has_faces(&self) -> bool {
        !self.face_ranges.is_empty()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_flat_two_triangles() {
        let q = MeshData::quad();
        assert_eq!(q.vertices.len(), 4);
        assert_eq!(q.indices, vec![0, 1, 2, 2, 3, 0]);
        assert!(q.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(!q.has_faces());
        assert_eq!(q.face_range(Face::Top), None);
    }

    #[test]
    fn cube_layout() {
        let c = MeshData::cube();
        assert_eq!(c.vertices.len(), 24);
        assert_eq!(c.index_count(), 36);
        assert_eq!(c.triangle_count(), 12);
        assert!(c.indices.iter().all(|&i| (i as usize) < c.vertices.len()));
    }

    #[test]
    fn cube_faces_are_contiguous_and_planar() {
        let c = MeshData::cube();
        // (axis, sign) each face lies on
        let planes = [(2, 0.5), (2, -0.5), (0, -0.5), (0, 0.5), (1, 0.5), (1, -0.5)];
        for (face, (axis, value)) in Face::ALL.into_iter().zip(planes) {
            let range = c.face_range(face).unwrap();
            assert_eq!(range.start, face.index() as u32 * 6);
            assert_eq!(range.len(), 6);
            for &i in &c.indices[range.start as usize..range.end as usize] {
                assert_eq!(c.vertices[i as usize].position[axis], value);
            }
        }
    }

    #[test]
    fn cube_uvs_in_unit_square() {
        let c = MeshData::cube();
        for vert in &c.vertices {
            assert!((0.0..=1.0).contains(&vert.uv[0]));
            assert!((0.0..=1.0).contains(&vert.uv[1]));
        }
    }
}
