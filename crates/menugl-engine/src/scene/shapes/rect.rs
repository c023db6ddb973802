use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};

use super::DrawStyle;

/// Axis-aligned rectangle, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    /// Corner radius in pixels, clamped to half the shorter side.
    pub rounding: f32,
    pub style: DrawStyle,
    pub color: Color,
}

impl RectCmd {
    pub(crate) fn bounds(&self) -> Rect {
        self.rect.normalized().expand(self.style.outset())
    }
}

/// Rectangle with one color per corner, interpolated across the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RectMultiColorCmd {
    pub rect: Rect,
    pub left_top: Color,
    pub right_top: Color,
    pub right_bottom: Color,
    pub left_bottom: Color,
}

impl CommandQueue {
    /// Records a filled rectangle. Transparent fills are skipped.
    pub fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color) {
        if color.a == 0 {
            return;
        }
        self.push(ShapeCmd::Rect(RectCmd { rect, rounding, style: DrawStyle::Fill, color }));
    }

    /// Records a rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rect, rounding: f32, thickness: f32, color: Color) {
        if color.a == 0 || thickness <= 0.0 {
            return;
        }
        let style = DrawStyle::Stroke(thickness);
        self.push(ShapeCmd::Rect(RectCmd { rect, rounding, style, color }));
    }

    /// Records a rectangle with a color per corner.
    pub fn fill_rect_multi_color(
        &mut self,
        rect: Rect,
        left_top: Color,
        right_top: Color,
        right_bottom: Color,
        left_bottom: Color,
    ) {
        self.push(ShapeCmd::RectMultiColor(RectMultiColorCmd {
            rect,
            left_top,
            right_top,
            right_bottom,
            left_bottom,
        }));
    }
}
