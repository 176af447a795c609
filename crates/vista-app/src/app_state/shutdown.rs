//! Graceful shutdown: stop input, cancel the load, release the GPU.

use std::time::Duration;

use super::core::VistaApp;

impl VistaApp {
    /// Dispose the viewer, then stop the runtime with a bounded wait for
    /// detached decodes. Safe to call repeatedly.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.viewer.dispose();

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.mouse_dragging = false;
        self.active_touch = None;

        tracing::info!("Graceful shutdown complete");
    }
}
