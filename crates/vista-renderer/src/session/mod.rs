//! Render session: owns the GPU context, the sphere and the bound texture.

mod phase;

pub use phase::SessionPhase;

use vista_common::CameraAngle;
use vista_config::schema::RenderConfig;
use vista_texture::{PanoramaTexture, TextureSettings};

use crate::camera::PanoramaCamera;
use crate::error::RendererError;
use crate::gpu::GpuContext;
use crate::sphere::{generate_sphere_mesh, PanoramaPipeline, PanoramaUniforms};
use crate::texture::BoundTexture;

/// What happened to a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Not drawn: no texture yet, disposed, or the surface needed a
    /// reconfigure.
    Skipped,
}

struct BoundPanorama {
    texture: BoundTexture,
    bind_group: wgpu::BindGroup,
    encode_output: bool,
}

/// How a texture's colors reach a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColorPlan {
    settings: TextureSettings,
    /// The shader writes sRGB-encoded values itself.
    encode_output: bool,
}

impl ColorPlan {
    /// A linear surface gets a linear texture: the shader decodes on
    /// sample and encodes on write.
    fn for_surface(settings: TextureSettings, surface_srgb: bool) -> Self {
        Self {
            settings: settings.with_color_space_support(surface_srgb),
            encode_output: !surface_srgb,
        }
    }
}

pub struct RenderSession {
    phase: SessionPhase,
    config: RenderConfig,
    camera: PanoramaCamera,
    gpu: Option<GpuContext>,
    pipeline: Option<PanoramaPipeline>,
    bound: Option<BoundPanorama>,
    /// Texture that arrived before the GPU context.
    pending: Option<PanoramaTexture>,
    first_frame_logged: bool,
}

impl RenderSession {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            config: config.clone(),
            camera: PanoramaCamera::from_config(config),
            gpu: None,
            pipeline: None,
            bound: None,
            pending: None,
            first_frame_logged: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn camera(&self) -> &PanoramaCamera {
        &self.camera
    }

    pub fn has_pending_texture(&self) -> bool {
        self.pending.is_some()
    }

    /// Take ownership of the GPU context and build the scene.
    ///
    /// On failure the session is disposed and the error is terminal.
    pub fn attach(&mut self, gpu: GpuContext) -> Result<(), RendererError> {
        if self.phase != SessionPhase::Uninitialized {
            tracing::warn!(phase = ?self.phase, "GPU context offered twice; ignoring");
            return Ok(());
        }

        self.camera
            .set_viewport(gpu.size.width, gpu.size.height);

        let mesh = generate_sphere_mesh(
            self.config.sphere_radius as f32,
            self.config.latitude_segments,
            self.config.longitude_segments,
        );
        let pipeline = guarded(&gpu.device, "scene setup", |device| {
            PanoramaPipeline::new(device, &mesh, gpu.format())
        });
        let pipeline = match pipeline {
            Ok(p) => p,
            Err(e) => {
                self.dispose();
                return Err(e);
            }
        };
        tracing::info!(
            vertices = pipeline.vertex_count(),
            width = gpu.size.width,
            height = gpu.size.height,
            "Panorama scene ready"
        );

        self.gpu = Some(gpu);
        self.pipeline = Some(pipeline);
        self.phase = self.phase.on_context_ready();

        if let Some(texture) = self.pending.take() {
            self.bind(&texture)?;
        }
        Ok(())
    }

    /// Hand over the resolved texture. Bound immediately if the scene
    /// exists, otherwise held until [`attach`](Self::attach).
    pub fn set_texture(&mut self, texture: PanoramaTexture) -> Result<(), RendererError> {
        if self.phase.has_context() {
            return self.bind(&texture);
        }
        if self.phase == SessionPhase::Uninitialized {
            self.pending = Some(texture);
        }
        Ok(())
    }

    fn bind(&mut self, texture: &PanoramaTexture) -> Result<(), RendererError> {
        let (Some(gpu), Some(pipeline)) = (self.gpu.as_ref(), self.pipeline.as_ref()) else {
            return Ok(());
        };

        let plan = ColorPlan::for_surface(texture.settings, gpu.supports_srgb());
        let max_dim = gpu.max_texture_dimension();
        let bound = guarded(&gpu.device, "texture bind", |device| {
            let uploaded = BoundTexture::upload(device, &gpu.queue, texture, plan.settings, max_dim);
            let bind_group = pipeline.bind_texture(device, &uploaded);
            BoundPanorama {
                texture: uploaded,
                bind_group,
                encode_output: plan.encode_output,
            }
        });
        match bound {
            Ok(bound) => {
                self.bound = Some(bound);
                self.phase = self.phase.on_texture_bound();
                Ok(())
            }
            Err(e) => {
                self.dispose();
                Err(e)
            }
        }
    }

    /// Window or screen-orientation change: new aspect, reconfigured surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(width, height);
        }
    }

    /// Draw one frame at `angle`.
    ///
    /// Errors here are fatal for the session.
    pub fn render(&mut self, angle: CameraAngle) -> Result<FrameOutcome, RendererError> {
        if !self.phase.should_draw() {
            return Ok(FrameOutcome::Skipped);
        }
        if self.gpu.as_ref().is_some_and(GpuContext::is_lost) {
            self.dispose();
            return Err(RendererError::ContextLost);
        }
        let (Some(gpu), Some(pipeline), Some(bound)) =
            (self.gpu.as_ref(), self.pipeline.as_ref(), self.bound.as_ref())
        else {
            return Ok(FrameOutcome::Skipped);
        };

        let frame = match gpu.current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("Surface lost or outdated; reconfiguring");
                gpu.reconfigure();
                return Ok(FrameOutcome::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(FrameOutcome::Skipped),
            Err(e) => return Err(e.into()),
        };

        let uniforms = PanoramaUniforms::new(
            self.camera.view_proj(angle),
            bound.texture.settings.flip_y,
            bound.texture.needs_shader_decode(),
            bound.encode_output,
        );
        pipeline.update_uniforms(&gpu.queue, &uniforms);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("panorama encoder"),
            });
        pipeline.render(&mut encoder, &view, &bound.bind_group);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        if !self.first_frame_logged {
            self.first_frame_logged = true;
            tracing::info!(
                "First frame presented ({}x{}, format={:?})",
                gpu.size.width,
                gpu.size.height,
                gpu.format(),
            );
        }
        Ok(FrameOutcome::Presented)
    }

    /// Release every GPU resource. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.phase == SessionPhase::Disposed {
            return;
        }
        self.bound = None;
        self.pipeline = None;
        self.pending = None;
        self.gpu = None;
        self.phase = self.phase.on_dispose();
        tracing::info!("Render session disposed");
    }
}

/// Run GPU setup inside validation and out-of-memory error scopes.
fn guarded<T>(
    device: &wgpu::Device,
    what: &str,
    f: impl FnOnce(&wgpu::Device) -> T,
) -> Result<T, RendererError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f(device);
    let validation = pollster::block_on(device.pop_error_scope());
    let oom = pollster::block_on(device.pop_error_scope());
    match validation.or(oom) {
        Some(err) => {
            tracing::error!("{what} failed: {err}");
            Err(RendererError::RenderInitFailure(format!("{what}: {err}")))
        }
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{needs_shader_decode, texture_format};
    use vista_texture::{generate, ColorSpace, ProceduralKind, RawTexture, TextureSource};

    fn test_texture() -> PanoramaTexture {
        RawTexture::new(
            generate(ProceduralKind::Test),
            TextureSource::Procedural(ProceduralKind::Test),
        )
        .finish(TextureSettings::default())
    }

    #[test]
    fn new_session_is_uninitialized_and_skips_frames() {
        let mut session = RenderSession::new(&RenderConfig::default());
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert_eq!(
            session.render(CameraAngle::ZERO).unwrap(),
            FrameOutcome::Skipped
        );
    }

    #[test]
    fn texture_before_context_is_held() {
        let mut session = RenderSession::new(&RenderConfig::default());
        session.set_texture(test_texture()).unwrap();
        assert!(session.has_pending_texture());
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert_eq!(
            session.render(CameraAngle::ZERO).unwrap(),
            FrameOutcome::Skipped
        );
    }

    #[test]
    fn dispose_is_idempotent_and_drops_pending() {
        let mut session = RenderSession::new(&RenderConfig::default());
        session.set_texture(test_texture()).unwrap();
        session.dispose();
        session.dispose();
        assert_eq!(session.phase(), SessionPhase::Disposed);
        assert!(!session.has_pending_texture());
        session.set_texture(test_texture()).unwrap();
        assert!(!session.has_pending_texture());
        assert_eq!(
            session.render(CameraAngle::ZERO).unwrap(),
            FrameOutcome::Skipped
        );
    }

    #[test]
    fn resize_without_context_updates_camera() {
        let mut session = RenderSession::new(&RenderConfig::default());
        session.resize(1000, 500);
        assert!((session.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn srgb_surface_samples_in_hardware() {
        let plan = ColorPlan::for_surface(TextureSettings::default(), true);
        assert_eq!(plan.settings.color_space, ColorSpace::Srgb);
        assert!(!needs_shader_decode(&plan.settings));
        assert!(!plan.encode_output);
        assert_eq!(
            texture_format(plan.settings.color_space),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
    }

    #[test]
    fn linear_surface_decodes_and_encodes_in_shader() {
        let texture = test_texture();
        let plan = ColorPlan::for_surface(texture.settings, false);
        assert_eq!(plan.settings.color_space, ColorSpace::LegacyEncoding);
        assert!(needs_shader_decode(&plan.settings));
        assert!(plan.encode_output);
        assert_eq!(
            texture_format(plan.settings.color_space),
            wgpu::TextureFormat::Rgba8Unorm
        );
        assert_eq!(plan.settings.flip_y, texture.settings.flip_y);
        assert_eq!(plan.settings.wrap_s, texture.settings.wrap_s);
    }
}
