use blockworld_render::{DrawCall, Frame, Material};
use bytemuck::{Pod, Zeroable};

/// Group 0: written once per frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniforms {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
        }
    }
}

/// Group 1: one slot per draw call, bound with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl DrawUniforms {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Textured draws get white so the texture is unmodulated.
    pub fn from_draw(draw: &DrawCall) -> Self {
        let color = match draw.material {
            Material::Color(c) => c.to_rgba(),
            Material::Faces(_) => [1.0; 4],
        };
        Self {
            model: draw.model.to_cols_array_2d(),
            color,
        }
    }
}

/// Size of one draw slot: [`DrawUniforms::SIZE`] rounded up to the device's
/// dynamic-offset alignment.
pub fn draw_stride(min_offset_alignment: u32) -> u64 {
    let align = u64::from(min_offset_alignment.max(1));
    DrawUniforms::SIZE.div_ceil(align) * align
}

/// Dynamic offset of draw `index`, or `None` once it no longer fits the
/// 32-bit offset wgpu takes.
pub fn draw_offset(index: usize, stride: u64) -> Option<u32> {
    let offset = (index as u64).checked_mul(stride)?;
    u32::try_from(offset).ok()
}

/// Number of draw slots to allocate for `requested` draws: the next power
/// of two, capped so the buffer stays within `max_buffer_size` and every
/// slot stays addressable by [`draw_offset`].
pub fn draw_capacity(requested: usize, stride: u64, max_buffer_size: u64) -> usize {
    let stride = stride.max(1);
    let by_buffer = max_buffer_size / stride;
    let by_offset = u64::from(u32::MAX) / stride + 1;
    let limit = by_buffer.min(by_offset).max(1);
    let wanted = requested.max(1).checked_next_power_of_two().unwrap_or(usize::MAX) as u64;
    wanted.min(limit) as usize
}

/// Pack every draw's uniforms into one buffer image, `stride` bytes apart.
pub fn pack_draws(draws: &[DrawCall], stride: u64) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0u8; draws.len() * stride];
    for (i, draw) in draws.iter().enumerate() {
        let uniforms = DrawUniforms::from_draw(draw);
        let start = i * stride;
        bytes[start..start + DrawUniforms::SIZE as usize]
            .copy_from_slice(bytemuck::bytes_of(&uniforms));
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockworld_common::Color;
    use blockworld_render::MeshKind;
    use blockworld_world::FaceSetId;
    use glam::{Mat4, Vec3};

    fn tile(x: f32, color: Color) -> DrawCall {
        DrawCall {
            mesh: MeshKind::Quad,
            model: Mat4::from_translation(Vec3::new(x, 0.0, 0.0)),
            material: Material::Color(color),
        }
    }

    #[test]
    fn layout_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 128);
        assert_eq!(DrawUniforms::SIZE, 80);
    }

    #[test]
    fn stride_respects_alignment() {
        assert_eq!(draw_stride(256), 256);
        assert_eq!(draw_stride(64), 128);
        assert_eq!(draw_stride(16), 80);
        assert_eq!(draw_stride(0), 80);
    }

    #[test]
    fn offsets_step_by_stride() {
        assert_eq!(draw_offset(0, 256), Some(0));
        assert_eq!(draw_offset(3, 256), Some(768));
    }

    #[test]
    fn offset_past_u32_is_rejected() {
        assert_eq!(draw_offset(16_777_215, 256), Some(u32::MAX - 255));
        assert_eq!(draw_offset(16_777_216, 256), None);
        assert_eq!(draw_offset(usize::MAX, 256), None);
    }

    #[test]
    fn capacity_grows_by_powers_of_two() {
        let max = 256 << 20;
        assert_eq!(draw_capacity(0, 256, max), 1);
        assert_eq!(draw_capacity(64, 256, max), 64);
        assert_eq!(draw_capacity(65, 256, max), 128);
    }

    #[test]
    fn capacity_is_capped_by_buffer_limit() {
        // 256 MiB / 256 B per slot.
        let max = 256 << 20;
        assert_eq!(draw_capacity(1_000_000, 256, max), 1 << 20);
        assert_eq!(draw_capacity(usize::MAX, 256, max), 1 << 20);
    }

    #[test]
    fn capacity_is_capped_by_offset_range() {
        let cap = draw_capacity(usize::MAX, 256, u64::MAX);
        assert_eq!(cap, 1 << 24);
        assert!(draw_offset(cap - 1, 256).is_some());
    }

    #[test]
    fn pack_places_each_draw_at_its_slot() {
        let draws = [tile(1.0, Color::new(0.1, 0.2, 0.3)), tile(2.0, Color::WHITE)];
        let bytes = pack_draws(&draws, 256);
        assert_eq!(bytes.len(), 512);

        let second: &DrawUniforms =
            bytemuck::from_bytes(&bytes[256..256 + DrawUniforms::SIZE as usize]);
        assert_eq!(second.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(second.model[3][0], 2.0);

        let first: &DrawUniforms = bytemuck::from_bytes(&bytes[..DrawUniforms::SIZE as usize]);
        assert_eq!(first.color, [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn textured_draw_is_white() {
        let draw = DrawCall {
            mesh: MeshKind::Cube,
            model: Mat4::IDENTITY,
            material: Material::Faces(FaceSetId(0)),
        };
        assert_eq!(DrawUniforms::from_draw(&draw).color, [1.0; 4]);
    }
}
