//! Window creation and GPU context hand-off.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use vista_renderer::GpuContext;

use super::core::VistaApp;

impl VistaApp {
    /// Create the window and hand a GPU context to the viewer.
    /// Returns `false` if the window itself could not be created.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        self.window = Some(window.clone());
        self.attach_gpu(window);
        true
    }

    /// GPU setup failures are reported through the viewer status, not by
    /// exiting, so the user can retry.
    pub(super) fn attach_gpu(&mut self, window: Arc<Window>) {
        match pollster::block_on(GpuContext::new(window, self.config.render.vsync)) {
            Ok(gpu) => self.viewer.on_gpu_context_ready(gpu),
            Err(e) => self.viewer.on_gpu_context_failed(e),
        }
    }
}
