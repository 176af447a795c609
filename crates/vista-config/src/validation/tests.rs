//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&VistaConfig::default()).is_ok());
}

#[test]
fn catches_pitch_limit_at_pole() {
    let mut config = VistaConfig::default();
    config.orientation.pitch_limit_deg = 90.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("orientation.pitch_limit_deg"));
}

#[test]
fn catches_negative_time_constant() {
    let mut config = VistaConfig::default();
    config.orientation.filter_time_constant_secs = -0.1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("orientation.filter_time_constant_secs"));
}

#[test]
fn catches_nan_sensitivity() {
    let mut config = VistaConfig::default();
    config.touch.yaw_radians_per_pixel = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("touch.yaw_radians_per_pixel"));
}

#[test]
fn catches_tiny_max_width() {
    let mut config = VistaConfig::default();
    config.texture.max_width = 16;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("texture.max_width"));
}

#[test]
fn catches_blank_cache_dir() {
    let mut config = VistaConfig::default();
    config.texture.cache_dir = Some("  ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("texture.cache_dir"));
}

#[test]
fn catches_fov_out_of_range() {
    let mut config = VistaConfig::default();
    config.render.fov_deg = 170.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("render.fov_deg"));
}

#[test]
fn catches_far_plane_inside_sphere() {
    let mut config = VistaConfig::default();
    config.render.far = 400.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("render.far"));
}

#[test]
fn catches_unknown_log_level() {
    let mut config = VistaConfig::default();
    config.logging.level = "loud".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("logging.level"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = VistaConfig::default();
    config.render.fov_deg = 10.0;
    config.window.width = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("render.fov_deg"));
    assert!(err.contains("window.width"));
}

#[test]
fn range_message_names_bounds() {
    let mut config = VistaConfig::default();
    config.texture.remote_timeout_ms = 50;
    let err = validate(&config).unwrap_err().to_string();
    assert!(
        err.contains("texture.remote_timeout_ms = 50 is out of range [100, 120000]"),
        "{err}"
    );
}

#[test]
fn nan_is_never_in_range() {
    let mut issues = Issues::default();
    issues.within("x", f64::NAN, f64::MIN..=f64::MAX);
    issues.within("y", 3, 1..=5);
    assert_eq!(issues.0.len(), 1);
    assert!(issues.0[0].starts_with("x = NaN"));
}
