//! VistaApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;

use winit::window::Window;

use vista_common::{ImageReference, ScreenOrientation, VistaError};
use vista_config::VistaConfig;
use vista_input::{NoSensors, ReplaySensors, SensorProvider};

use crate::viewer::{create_viewer, ViewerHandle, ViewerOptions};

/// Everything needed to (re)create the viewer.
#[derive(Debug, Clone)]
pub struct Launch {
    pub reference: ImageReference,
    pub options: ViewerOptions,
    pub sensor_replay: Option<PathBuf>,
    pub screen_orientation: Option<ScreenOrientation>,
}

/// Top-level application state.
pub struct VistaApp {
    pub(super) config: VistaConfig,
    pub(super) launch: Launch,
    pub(super) viewer: ViewerHandle,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) title: String,

    // Pointer tracking
    pub(super) cursor: (f32, f32),
    pub(super) mouse_dragging: bool,
    pub(super) active_touch: Option<u64>,

    pub(super) should_exit: bool,
}

impl VistaApp {
    pub fn new(config: VistaConfig, launch: Launch) -> Result<Self, VistaError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("vista-io")
            .enable_all()
            .build()?;

        let viewer = build_viewer(&config, &launch, runtime.handle());

        Ok(Self {
            config,
            launch,
            viewer,
            tokio_runtime: Some(runtime),
            window: None,
            title: String::new(),
            cursor: (0.0, 0.0),
            mouse_dragging: false,
            active_touch: None,
            should_exit: false,
        })
    }

    /// Replace a failed viewer with a fresh one on the same window.
    pub(super) fn retry(&mut self) {
        let Some(runtime) = self.tokio_runtime.as_ref() else {
            return;
        };
        tracing::info!("Retrying panorama session");
        self.viewer.dispose();
        self.viewer = build_viewer(&self.config, &self.launch, runtime.handle());
        self.mouse_dragging = false;
        self.active_touch = None;
        if let Some(window) = self.window.clone() {
            let size = window.inner_size();
            self.viewer.resize(size.width, size.height);
            self.attach_gpu(window);
        }
    }
}

fn build_viewer(
    config: &VistaConfig,
    launch: &Launch,
    runtime: &tokio::runtime::Handle,
) -> ViewerHandle {
    let mut viewer = create_viewer(
        launch.reference.clone(),
        launch.options,
        config,
        sensor_provider(launch.sensor_replay.as_deref()),
        runtime,
    );
    if let Some(screen) = launch.screen_orientation {
        viewer.input().set_screen_orientation(screen);
    }
    viewer
}

fn sensor_provider(replay: Option<&std::path::Path>) -> Box<dyn SensorProvider> {
    let Some(path) = replay else {
        return Box::new(NoSensors);
    };
    match ReplaySensors::load(path) {
        Ok(sensors) => {
            tracing::info!("Replaying sensor samples from {}", path.display());
            Box::new(sensors)
        }
        Err(e) => {
            tracing::warn!("Sensor replay unavailable ({}): {e}", path.display());
            Box::new(NoSensors)
        }
    }
}

#[cfg(test)]
pub(super) fn test_app() -> VistaApp {
    let launch = Launch {
        reference: ImageReference::none(),
        options: ViewerOptions {
            use_gyro: false,
            ..ViewerOptions::default()
        },
        sensor_replay: None,
        screen_orientation: None,
    };
    VistaApp::new(VistaConfig::default(), launch).unwrap()
}
