//! Vertex and uniform layouts shared with `panorama.wgsl`.

/// A single vertex of the panorama sphere.
///
/// Layout: position(vec3) + uv(vec2) = 20 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PanoramaVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl PanoramaVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PanoramaVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32> at offset 0
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            // uv: vec2<f32> at offset 12
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 12,
                shader_location: 1,
            },
        ],
    };
}

/// Per-frame uniforms at bind group 0.
///
/// Layout: 20 × f32 = 80 bytes, 16-byte aligned.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PanoramaUniforms {
    pub view_proj: [f32; 16],
    /// 1.0 flips texture V so image row 0 lands at the north pole.
    pub flip_y: f32,
    /// 1.0 when the texture holds sRGB bytes in a linear format.
    pub decode_srgb: f32,
    /// 1.0 when the surface does not encode sRGB on write.
    pub encode_srgb: f32,
    pub _padding: f32,
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

impl PanoramaUniforms {
    pub fn new(view_proj: [f32; 16], flip_y: bool, decode_srgb: bool, encode_srgb: bool) -> Self {
        Self {
            view_proj,
            flip_y: flag(flip_y),
            decode_srgb: flag(decode_srgb),
            encode_srgb: flag(encode_srgb),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_size_is_20_bytes() {
        assert_eq!(std::mem::size_of::<PanoramaVertex>(), 20);
        assert_eq!(std::mem::align_of::<PanoramaVertex>(), 4);
    }

    #[test]
    fn uniforms_are_80_bytes() {
        assert_eq!(std::mem::size_of::<PanoramaUniforms>(), 80);
        assert_eq!(std::mem::size_of::<PanoramaUniforms>() % 16, 0);
    }

    #[test]
    fn uniform_flags() {
        let u = PanoramaUniforms::new([0.0; 16], true, false, true);
        assert_eq!(u.flip_y, 1.0);
        assert_eq!(u.decode_srgb, 0.0);
        assert_eq!(u.encode_srgb, 1.0);
        assert_eq!(bytemuck::bytes_of(&u).len(), 80);
    }
}
