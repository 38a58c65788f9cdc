use blockworld_assets::{MeshData, MeshVertex};
use blockworld_common::Face;
use std::ops::Range;
use wgpu::util::DeviceExt;

pub(crate) const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<MeshVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
    ],
};

/// A static mesh resident on the GPU.
pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    face_ranges: Option<[Range<u32>; 6]>,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let face_ranges = mesh
            .has_faces()
            .then(|| Face::ALL.map(|f| mesh.face_range(f).unwrap_or(0..0)));

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            face_ranges,
        }
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    }

    pub fn has_faces(&self) -> bool {
        self.face_ranges.is_some()
    }

    pub fn all_indices(&self) -> Range<u32> {
        0..self.index_count
    }

    /// Index range of `face`, or the whole mesh when it carries no per-face
    /// layout.
    pub fn face_indices(&self, face: Face) -> Range<u32> {
        match &self.face_ranges {
            Some(ranges) => ranges[face.index()].clone(),
            None => self.all_indices(),
        }
    }
}
