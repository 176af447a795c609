//! Textured UV sphere for equirectangular panoramas.

use std::f32::consts::PI;

use super::types::PanoramaVertex;

/// Generate a UV sphere of `radius` as a plain triangle list.
///
/// `n_lat` latitude bands from the north pole (+Y) down, `n_lon` longitude
/// segments. Each quad yields two triangles wound counter-clockwise when
/// seen from outside, so a camera at the center sees only back faces.
///
/// U runs with longitude; V is 1 at the north pole and 0 at the south.
pub fn generate_sphere_mesh(radius: f32, n_lat: u32, n_lon: u32) -> Vec<PanoramaVertex> {
    let n_lat = n_lat.max(2);
    let n_lon = n_lon.max(3);

    let mut vertices = Vec::with_capacity((n_lat * n_lon * 6) as usize);

    for lat in 0..n_lat {
        for lon in 0..n_lon {
            let p00 = sphere_vertex(radius, lat, lon, n_lat, n_lon);
            let p10 = sphere_vertex(radius, lat + 1, lon, n_lat, n_lon);
            let p01 = sphere_vertex(radius, lat, lon + 1, n_lat, n_lon);
            let p11 = sphere_vertex(radius, lat + 1, lon + 1, n_lat, n_lon);

            vertices.extend_from_slice(&[p00, p10, p01, p10, p11, p01]);
        }
    }

    vertices
}

fn sphere_vertex(radius: f32, lat: u32, lon: u32, n_lat: u32, n_lon: u32) -> PanoramaVertex {
    let u = lon as f32 / n_lon as f32;
    let v = lat as f32 / n_lat as f32;
    let theta = PI * v;
    let phi = 2.0 * PI * u;

    PanoramaVertex {
        position: [
            -radius * phi.cos() * theta.sin(),
            radius * theta.cos(),
            radius * phi.sin() * theta.sin(),
        ],
        uv: [u, 1.0 - v],
    }
}
