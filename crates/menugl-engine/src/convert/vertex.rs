use bytemuck::{Pod, Zeroable};

use crate::gl::AttribLayout;

/// Interleaved vertex written by the converter and read by the menu shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    /// Straight-alpha RGBA, normalized by the attribute.
    pub color: [u8; 4],
}

impl DrawVertex {
    pub const STRIDE: i32 = size_of::<DrawVertex>() as i32;

    #[inline]
    pub const fn new(position: [f32; 2], uv: [f32; 2], color: [u8; 4]) -> Self {
        Self { position, uv, color }
    }

    /// Attribute layouts for `Position`, `TexCoord` and `Color`, in that order.
    pub const fn layouts() -> [AttribLayout; 3] {
        [
            AttribLayout {
                components: 2,
                data_type: glow::FLOAT,
                normalized: false,
                stride: Self::STRIDE,
                offset: 0,
            },
            AttribLayout {
                components: 2,
                data_type: glow::FLOAT,
                normalized: false,
                stride: Self::STRIDE,
                offset: 8,
            },
            AttribLayout {
                components: 4,
                data_type: glow::UNSIGNED_BYTE,
                normalized: true,
                stride: Self::STRIDE,
                offset: 16,
            },
        ]
    }
}
