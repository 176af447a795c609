//! Window title management: reflects viewer status and input mode.

use super::core::VistaApp;

impl VistaApp {
    /// Format: "{title} ({status}, {mode})"; the error text replaces the
    /// status and gets a retry hint.
    pub(super) fn compose_title(&mut self) -> String {
        let base = &self.config.window.title;
        let status = self.viewer.status();
        if let Some(error) = &status.error {
            return format!("{base} ({error}, press Enter to retry)");
        }
        let label = status.label().to_string();
        let mode = if self.viewer.input().use_gyro() {
            "sensor"
        } else {
            "touch"
        };
        format!("{base} ({label}, {mode})")
    }

    /// Push the title to the window when it changed.
    pub(super) fn update_window_title(&mut self) {
        let title = self.compose_title();
        if title == self.title {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        self.title = title;
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::core::test_app;
    use vista_renderer::RendererError;

    #[test]
    fn title_shows_loading_and_mode() {
        let mut app = test_app();
        assert_eq!(app.compose_title(), "Vista (loading, touch)");
    }

    #[test]
    fn title_shows_render_failure() {
        let mut app = test_app();
        app.viewer.on_gpu_context_failed(RendererError::AdapterNotFound);
        assert_eq!(
            app.compose_title(),
            "Vista (panorama render failed, press Enter to retry)"
        );
    }

    #[test]
    fn update_title_without_window_caches_it() {
        let mut app = test_app();
        app.update_window_title();
        assert_eq!(app.title, "Vista (loading, touch)");
    }
}
