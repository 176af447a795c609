//! Upload of a [`PanoramaTexture`] and its sampler.

use std::borrow::Cow;

use image::imageops::FilterType;
use image::RgbaImage;
use vista_texture::{ColorSpace, FilterMode, PanoramaTexture, TextureSettings, WrapMode};

/// GPU copy of the panorama plus the sampler built from its settings.
pub struct BoundTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub settings: TextureSettings,
}

impl BoundTexture {
    /// Upload `source` with `settings` (the surface-adjusted copy of
    /// `source.settings`), shrinking it to fit `max_dim`.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        source: &PanoramaTexture,
        settings: TextureSettings,
        max_dim: u32,
    ) -> Self {
        let image = fit_to_limit(&source.image, max_dim);
        let (width, height) = image.dimensions();

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("panorama texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format(settings.color_space),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&sampler_descriptor(&settings));

        tracing::info!(
            width,
            height,
            source = ?source.source,
            color_space = ?settings.color_space,
            "Panorama texture uploaded"
        );

        Self {
            texture,
            view,
            sampler,
            settings,
        }
    }

    pub fn needs_shader_decode(&self) -> bool {
        needs_shader_decode(&self.settings)
    }
}

/// Whether the shader must decode sRGB itself.
pub fn needs_shader_decode(settings: &TextureSettings) -> bool {
    settings.color_space == ColorSpace::LegacyEncoding
}

pub fn texture_format(color_space: ColorSpace) -> wgpu::TextureFormat {
    match color_space {
        ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        ColorSpace::LegacyEncoding => wgpu::TextureFormat::Rgba8Unorm,
    }
}

pub fn sampler_descriptor(settings: &TextureSettings) -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("panorama sampler"),
        address_mode_u: address_mode(settings.wrap_s),
        address_mode_v: address_mode(settings.wrap_t),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter_mode(settings.mag_filter),
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    }
}

fn address_mode(wrap: WrapMode) -> wgpu::AddressMode {
    match wrap {
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
    }
}

fn filter_mode(filter: FilterMode) -> wgpu::FilterMode {
    match filter {
        FilterMode::Linear => wgpu::FilterMode::Linear,
        FilterMode::Nearest => wgpu::FilterMode::Nearest,
    }
}

/// Shrink `image` so neither side exceeds `max_dim`.
fn fit_to_limit(image: &RgbaImage, max_dim: u32) -> Cow<'_, RgbaImage> {
    let (w, h) = image.dimensions();
    if w <= max_dim && h <= max_dim {
        return Cow::Borrowed(image);
    }
    let scale = max_dim as f64 / w.max(h) as f64;
    let nw = ((w as f64 * scale) as u32).clamp(1, max_dim);
    let nh = ((h as f64 * scale) as u32).clamp(1, max_dim);
    tracing::warn!(w, h, max_dim, "Panorama exceeds GPU texture limit; downscaling");
    Cow::Owned(image::imageops::resize(image, nw, nh, FilterType::Triangle))
}
