use crate::coords::Rect;
use crate::gl::TextureId;
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};
use crate::texture::Image;

/// Textured quad. `color` tints the texture (white = unchanged).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub rect: Rect,
    pub texture: TextureId,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: Color,
}

impl CommandQueue {
    /// Records the whole `image` stretched over `rect`.
    pub fn draw_image(&mut self, rect: Rect, image: &Image, color: Color) {
        self.draw_image_region(rect, image.texture, [0.0, 0.0], [1.0, 1.0], color);
    }

    /// Records a sub-region of `texture` given in normalized coordinates.
    pub fn draw_image_region(
        &mut self,
        rect: Rect,
        texture: TextureId,
        uv_min: [f32; 2],
        uv_max: [f32; 2],
        color: Color,
    ) {
        if texture.is_none() || color.a == 0 {
            return;
        }
        self.push(ShapeCmd::Image(ImageCmd { rect, texture, uv_min, uv_max, color }));
    }
}
