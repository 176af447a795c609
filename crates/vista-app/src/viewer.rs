//! Viewer entry points: create, attach a GPU context, render, dispose.
//!
//! A [`ViewerHandle`] ties one input router, one texture load and one
//! render session together for a single panorama.

use std::sync::mpsc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use vista_common::{CameraAngle, ImageReference, ViewerStatus};
use vista_config::VistaConfig;
use vista_input::{InputRouter, SensorProvider};
use vista_renderer::{FrameOutcome, GpuContext, RenderSession, RendererError, SessionPhase};
use vista_texture::{PanoramaTexture, TexturePipeline};

/// Message shown to the user for any render-initialization failure.
pub const RENDER_FAILED: &str = "panorama render failed";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerOptions {
    pub use_gyro: bool,
    /// Radians.
    pub initial_yaw: f32,
    /// Radians.
    pub initial_pitch: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            use_gyro: true,
            initial_yaw: 0.0,
            initial_pitch: 0.0,
        }
    }
}

pub struct ViewerHandle {
    router: InputRouter,
    session: RenderSession,
    status: ViewerStatus,
    texture_rx: Option<mpsc::Receiver<PanoramaTexture>>,
    load_task: Option<JoinHandle<()>>,
    texture_received: bool,
    disposed: bool,
}

/// Start input binding and the texture load for `reference`.
///
/// The load runs on `runtime`; its result is picked up by
/// [`ViewerHandle::frame`] or [`ViewerHandle::poll_texture`].
pub fn create_viewer(
    reference: ImageReference,
    options: ViewerOptions,
    config: &VistaConfig,
    sensors: Box<dyn SensorProvider>,
    runtime: &Handle,
) -> ViewerHandle {
    let initial = CameraAngle::new(options.initial_yaw, options.initial_pitch);
    let router = InputRouter::new(config, sensors, options.use_gyro, initial);

    let pipeline = TexturePipeline::http(&config.texture);
    let (tx, rx) = mpsc::channel();
    let load_task = runtime.spawn(async move {
        let texture = pipeline.load(&reference).await;
        tracing::info!(
            source = ?texture.source,
            width = texture.width(),
            height = texture.height(),
            "Panorama texture resolved"
        );
        // The viewer may already be gone.
        let _ = tx.send(texture);
    });

    tracing::info!(use_gyro = options.use_gyro, "Viewer created");

    ViewerHandle {
        router,
        session: RenderSession::new(&config.render),
        status: ViewerStatus::loading(),
        texture_rx: Some(rx),
        load_task: Some(load_task),
        texture_received: false,
        disposed: false,
    }
}

impl ViewerHandle {
    pub fn status(&self) -> &ViewerStatus {
        &self.status
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn texture_received(&self) -> bool {
        self.texture_received
    }

    pub fn input(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    /// The hosting surface has a drawable. Moves the session to
    /// `Initializing` (or straight to `Rendering` when the texture is
    /// already here).
    pub fn on_gpu_context_ready(&mut self, gpu: GpuContext) {
        if self.disposed {
            return;
        }
        let (width, height) = (gpu.size.width, gpu.size.height);
        self.router.set_viewport(width, height);
        match self.session.attach(gpu) {
            Ok(()) => self.refresh_status(),
            Err(e) => self.fail(e),
        }
    }

    /// The hosting surface could not produce a GPU context.
    pub fn on_gpu_context_failed(&mut self, err: RendererError) {
        if self.disposed {
            return;
        }
        self.session.dispose();
        self.fail(err);
    }

    /// Take the resolved texture if the load has finished.
    pub fn poll_texture(&mut self) {
        let Some(rx) = &self.texture_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(texture) => {
                self.texture_rx = None;
                self.load_task = None;
                self.texture_received = true;
                if let Err(e) = self.session.set_texture(texture) {
                    self.fail(e);
                    return;
                }
                self.refresh_status();
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.texture_rx = None;
                self.load_task = None;
                tracing::error!("Texture load task ended without a result");
                self.status = ViewerStatus::failed(RENDER_FAILED);
            }
        }
    }

    /// One display refresh: pick up the texture, read the angle, draw.
    pub fn frame(&mut self) -> FrameOutcome {
        if self.disposed {
            return FrameOutcome::Skipped;
        }
        self.poll_texture();
        let angle = self.router.poll();
        match self.session.render(angle) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.fail(e);
                FrameOutcome::Skipped
            }
        }
    }

    /// Window size or screen orientation changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.session.resize(width, height);
        self.router.set_viewport(width, height);
    }

    /// Tear down sensors, the pending load and GPU resources. Safe to call
    /// repeatedly.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.router.dispose();
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        self.texture_rx = None;
        self.session.dispose();
        if self.status.loading {
            self.status = ViewerStatus {
                loading: false,
                ..ViewerStatus::default()
            };
        }
        tracing::info!("Viewer disposed");
    }

    fn refresh_status(&mut self) {
        if self.status.error.is_some() {
            return;
        }
        self.status = if self.session.phase() == SessionPhase::Rendering {
            ViewerStatus::ready()
        } else {
            ViewerStatus::loading()
        };
    }

    fn fail(&mut self, err: RendererError) {
        tracing::error!("{RENDER_FAILED}: {err}");
        self.session.dispose();
        self.status = ViewerStatus::failed(RENDER_FAILED);
    }
}

impl Drop for ViewerHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
