mod app_state;
mod cli;
mod viewer;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use vista_common::ConfigError;
use vista_config::toml_loader::LoadedConfig;
use vista_config::VistaConfig;
use winit::event_loop::EventLoop;

use app_state::{Launch, VistaApp};
use viewer::ViewerOptions;

const DEFAULT_DIRECTIVE: &str = "vista=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- Vista crashed ---");
        eprintln!("Re-run with --log-level vista=debug for details.");
        eprintln!("---------------------\n");

        default_hook(info);
    }));
}

/// CLI flag first, then the config file's level, then the default.
fn log_directive(cli: Option<&str>, config_level: Option<&str>) -> String {
    match (cli, config_level) {
        (Some(directive), _) => directive.to_string(),
        (None, Some(level)) => format!("vista={level}"),
        (None, None) => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_DIRECTIVE.parse::<Directive>());
    let filter = match directive {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Report the load outcome and pick the config to run with. Validation
/// already happened in the loader.
fn settle_config(loaded: Result<LoadedConfig, ConfigError>) -> VistaConfig {
    match loaded {
        Ok(loaded) => {
            loaded.report();
            loaded.config
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            VistaConfig::default()
        }
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Loaded before logging so the file's level can apply; load problems
    // are reported once the subscriber exists.
    let loaded = vista_config::toml_loader::load(args.config.as_deref());
    let config_level = loaded.as_ref().ok().map(|l| l.config.logging.level.clone());
    init_logging(&log_directive(
        args.log_level.as_deref(),
        config_level.as_deref(),
    ));

    tracing::info!("Vista v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = settle_config(loaded);
    if args.print_config {
        println!("{}", vista_config::config_to_json(&config));
        return;
    }

    let reference = match args.image_reference() {
        Ok(reference) => reference,
        Err(e) => {
            tracing::error!("Cannot read image: {e}");
            std::process::exit(2);
        }
    };

    let launch = Launch {
        reference,
        options: ViewerOptions {
            use_gyro: !args.touch,
            initial_yaw: args.initial_yaw(),
            initial_pitch: args.initial_pitch(),
        },
        sensor_replay: args.sensor_replay.clone(),
        screen_orientation: args.screen_orientation,
    };

    let mut app = match VistaApp::new(config, launch) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
