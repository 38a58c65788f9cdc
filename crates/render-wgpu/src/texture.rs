use blockworld_assets::{TextureId, TextureImage};
use blockworld_world::World;
use std::collections::HashMap;
use std::path::Path;

pub(crate) fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("texture_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Repeat wrapping, trilinear filtering.
pub(crate) fn face_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("face_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// An uploaded face texture, ready to bind at group 2.
pub(crate) struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Upload `image` and its whole mip chain as sRGB.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let levels = image.mip_chain();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                &mip.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width),
                    rows_per_image: Some(mip.height),
                },
                wgpu::Extent3d {
                    width: mip.width,
                    height: mip.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            bind_group,
        }
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Face textures for every face set of a world. Identical images are
/// uploaded once; slot 0 is always the placeholder.
pub(crate) struct TextureCache {
    textures: Vec<GpuTexture>,
    by_content: HashMap<TextureId, usize>,
    face_sets: Vec<[usize; 6]>,
}

impl TextureCache {
    pub const PLACEHOLDER: usize = 0;

    pub fn build(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        world: &World,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let mut cache = Self {
            textures: Vec::new(),
            by_content: HashMap::new(),
            face_sets: Vec::with_capacity(world.face_sets().len()),
        };
        let placeholder = TextureImage::placeholder();
        cache.insert(device, queue, &placeholder, "placeholder", layout, sampler);

        for faces in world.face_sets() {
            let slots = faces
                .paths
                .each_ref()
                .map(|path| cache.load(device, queue, path, layout, sampler));
            cache.face_sets.push(slots);
        }

        tracing::info!(
            face_sets = cache.face_sets.len(),
            textures = cache.textures.len(),
            "face textures uploaded"
        );
        cache
    }

    fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> usize {
        let image = TextureImage::load_or_placeholder(path);
        let max = device.limits().max_texture_dimension_2d;
        if !image.fits_within(max) {
            tracing::warn!(
                path = %path.display(),
                image.width,
                image.height,
                max,
                "texture exceeds device limit; using placeholder texture"
            );
            return Self::PLACEHOLDER;
        }
        let label = path.display().to_string();
        self.insert(device, queue, &image, &label, layout, sampler)
    }

    fn insert(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> usize {
        let id = image.content_id();
        if let Some(&slot) = self.by_content.get(&id) {
            return slot;
        }
        let slot = self.textures.len();
        tracing::debug!(label, width = image.width, height = image.height, slot, "uploading texture");
        self.textures
            .push(GpuTexture::upload(device, queue, image, label, layout, sampler));
        self.by_content.insert(id, slot);
        slot
    }

    /// Bind group for face `face_index` of face set `set`. Unknown sets fall
    /// back to the placeholder.
    pub fn face(&self, set: usize, face_index: usize) -> &wgpu::BindGroup {
        let slot = self
            .face_sets
            .get(set)
            .map_or(Self::PLACEHOLDER, |slots| slots[face_index]);
        self.textures[slot].bind_group()
    }
}
