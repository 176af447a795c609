pub mod matrix;
pub mod mesh;
pub mod pipeline;
pub mod types;

pub use mesh::generate_sphere_mesh;
pub use pipeline::PanoramaPipeline;
pub use types::{PanoramaUniforms, PanoramaVertex};
