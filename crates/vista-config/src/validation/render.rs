//! Validation for camera and sphere settings.

use crate::schema::RenderConfig;

use super::Issues;

pub(crate) fn validate_render(issues: &mut Issues, r: &RenderConfig) {
    issues.within("render.fov_deg", r.fov_deg, 30.0..=150.0);
    issues.within("render.sphere_radius", r.sphere_radius, 1.0..=10_000.0);
    issues.within("render.near", r.near, 0.001..=100.0);
    issues.within("render.latitude_segments", r.latitude_segments, 4..=256);
    issues.within("render.longitude_segments", r.longitude_segments, 4..=256);

    // The camera sits at the centre, so the far plane must reach the sphere.
    if r.far <= r.sphere_radius {
        issues.push(format!(
            "render.far = {} must exceed render.sphere_radius = {}",
            r.far, r.sphere_radius
        ));
    }
    if r.near >= r.sphere_radius {
        issues.push(format!(
            "render.near = {} must be below render.sphere_radius = {}",
            r.near, r.sphere_radius
        ));
    }
}
