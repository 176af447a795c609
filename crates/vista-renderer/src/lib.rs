//! wgpu renderer for the panorama sphere.
//!
//! The camera sits at the center of a textured sphere and looks outward;
//! the inside faces are the ones drawn. [`RenderSession`] owns every GPU
//! resource and walks `Uninitialized → Initializing → Rendering → Disposed`.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod session;
pub mod sphere;
pub mod texture;

pub use camera::PanoramaCamera;
pub use error::RendererError;
pub use gpu::{GpuContext, PhysicalSize};
pub use session::{FrameOutcome, RenderSession, SessionPhase};
