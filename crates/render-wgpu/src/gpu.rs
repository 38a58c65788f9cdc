use crate::mesh::{GpuMesh, VERTEX_LAYOUT};
use crate::shaders;
use crate::texture::{self, TextureCache};
use crate::uniforms::{self, CameraUniforms, DrawUniforms};
use blockworld_assets::MeshData;
use blockworld_common::Face;
use blockworld_render::{Frame, Material, MeshKind};
use blockworld_world::World;
use wgpu::util::DeviceExt;

const INITIAL_DRAW_CAPACITY: usize = 64;

fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    source: &str,
    entry_points: (&str, &str),
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(entry_points.0),
            compilation_options: Default::default(),
            buffers: &[VERTEX_LAYOUT],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(entry_points.1),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        // Tiles are seen from both sides and the cube winding is mixed.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_state()),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

/// Per-draw uniform storage. Grows to the next power of two when a frame
/// holds more draws than fit, never past the device's buffer size limit.
struct DrawBuffer {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    capacity: usize,
    stride: u64,
}

impl DrawBuffer {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        capacity: usize,
        stride: u64,
    ) -> Self {
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniform_buffer"),
            size: capacity as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(DrawUniforms::SIZE),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            capacity,
            stride,
        }
    }

    /// Make room for `draws` slots, up to the device's buffer size limit.
    /// Returns how many draws fit.
    fn reserve(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        draws: usize,
    ) -> usize {
        if draws > self.capacity {
            let max_buffer_size = device.limits().max_buffer_size;
            let capacity = uniforms::draw_capacity(draws, self.stride, max_buffer_size);
            if capacity > self.capacity {
                tracing::debug!(from = self.capacity, to = capacity, "growing draw uniform buffer");
                *self = Self::new(device, layout, capacity, self.stride);
            }
        }
        draws.min(self.capacity)
    }
}

/// wgpu renderer for a [`Frame`]: coloured tiles and textured blocks, one
/// draw per instance.
pub struct WgpuRenderer {
    color_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    draws: DrawBuffer,
    quad: GpuMesh,
    cube: GpuMesh,
    textures: TextureCache,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    /// Build pipelines, upload the static meshes and every face texture the
    /// world references.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        world: &World,
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_uniform_buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms {
                view: glam::Mat4::IDENTITY.to_cols_array_2d(),
                projection: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(DrawUniforms::SIZE),
                },
                count: None,
            }],
        });

        let texture_layout = texture::texture_bind_group_layout(device);
        let sampler = texture::face_sampler(device);

        let color_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("color_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &draw_layout],
            push_constant_ranges: &[],
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &draw_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let color_pipeline = create_pipeline(
            device,
            "color_pipeline",
            &color_layout,
            shaders::COLOR_SHADER,
            ("vs_color", "fs_color"),
            surface_format,
        );
        let textured_pipeline = create_pipeline(
            device,
            "textured_pipeline",
            &textured_layout,
            shaders::TEXTURED_SHADER,
            ("vs_textured", "fs_textured"),
            surface_format,
        );

        let stride = uniforms::draw_stride(device.limits().min_uniform_buffer_offset_alignment);
        let draws = DrawBuffer::new(device, &draw_layout, INITIAL_DRAW_CAPACITY, stride);

        let quad = GpuMesh::upload(device, "quad", &MeshData::quad());
        let cube = GpuMesh::upload(device, "cube", &MeshData::cube());
        let textures = TextureCache::build(device, queue, world, &texture_layout, &sampler);

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(stride, "renderer initialised");

        Self {
            color_pipeline,
            textured_pipeline,
            camera_buffer,
            camera_bind_group,
            draw_layout,
            draws,
            quad,
            cube,
            textures,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    fn mesh(&self, kind: MeshKind) -> &GpuMesh {
        match kind {
            MeshKind::Quad => &self.quad,
            MeshKind::Cube => &self.cube,
        }
    }

    /// Clear to the frame's colour and issue every draw call in order.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms::from_frame(frame)),
        );

        let fit = self.draws.reserve(device, &self.draw_layout, frame.draws.len());
        if fit < frame.draws.len() {
            tracing::warn!(
                draws = frame.draws.len(),
                drawn = fit,
                "frame exceeds the draw uniform buffer, dropping the rest"
            );
        }
        let draws = &frame.draws[..fit];
        let stride = self.draws.stride;
        if !draws.is_empty() {
            queue.write_buffer(&self.draws.buffer, 0, &uniforms::pack_draws(draws, stride));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b] = frame.clear_color.to_array();
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for (i, draw) in draws.iter().enumerate() {
                let Some(offset) = uniforms::draw_offset(i, stride) else {
                    break;
                };
                let mesh = self.mesh(draw.mesh);
                pass.set_bind_group(1, &self.draws.bind_group, &[offset]);
                mesh.bind(&mut pass);

                match draw.material {
                    Material::Color(_) => {
                        pass.set_pipeline(&self.color_pipeline);
                        pass.draw_indexed(mesh.all_indices(), 0, 0..1);
                    }
                    Material::Faces(set) => {
                        pass.set_pipeline(&self.textured_pipeline);
                        if mesh.has_faces() {
                            for face in Face::ALL {
                                pass.set_bind_group(2, self.textures.face(set.0, face.index()), &[]);
                                pass.draw_indexed(mesh.face_indices(face), 0, 0..1);
                            }
                        } else {
                            pass.set_bind_group(2, self.textures.face(set.0, Face::Front.index()), &[]);
                            pass.draw_indexed(mesh.all_indices(), 0, 0..1);
                        }
                    }
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
