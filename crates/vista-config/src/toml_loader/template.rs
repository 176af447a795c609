//! Default TOML config template with inline documentation comments.

use crate::schema::TextureConfig;

/// Commented template. The texture section shows this platform's budgets.
pub(crate) fn default_config_toml() -> String {
    let texture = TextureConfig::default();
    format!(
        r##"# Vista Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[orientation]
# filter_time_constant_secs = 0.1      # 0.0-2.0, 0 disables smoothing
# pitch_limit_deg = 85.0               # 1-89
# default_sample_interval_secs = 0.016667
# prefer_rate_sensor = false

[touch]
# yaw_radians_per_pixel = 0.005        # 0.0001-0.1
# pitch_radians_per_pixel = 0.003      # 0.0001-0.1

[texture]
# remote_timeout_ms = {remote}            # 100-120000
# local_timeout_ms = {local}             # 100-120000
# max_width = {max_width}                     # 256-16384, wider images are downscaled
# cache_dir = "~/.cache/vista"         # defaults to the platform cache directory
# max_detached_decodes = {detached}             # 1-16

[render]
# fov_deg = 100.0                      # 30-150
# sphere_radius = 500.0
# near = 1.0
# far = 1100.0                         # must exceed sphere_radius
# latitude_segments = 40               # 4-256
# longitude_segments = 60              # 4-256
# vsync = true

[window]
# title = "Vista"
# width = 1280
# height = 720

[logging]
# level = "info"                       # trace, debug, info, warn, error
"##,
        remote = texture.remote_timeout_ms,
        local = texture.local_timeout_ms,
        max_width = texture.max_width,
        detached = texture.max_detached_decodes,
    )
}
