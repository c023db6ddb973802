use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};

use super::DrawStyle;

/// Circle or ellipse inscribed in `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub rect: Rect,
    pub style: DrawStyle,
    pub color: Color,
}

impl CircleCmd {
    pub(crate) fn bounds(&self) -> Rect {
        self.rect.normalized().expand(self.style.outset())
    }
}

impl CommandQueue {
    /// Records a filled circle inscribed in `rect`.
    pub fn fill_circle(&mut self, rect: Rect, color: Color) {
        if color.a == 0 {
            return;
        }
        self.push(ShapeCmd::Circle(CircleCmd { rect, style: DrawStyle::Fill, color }));
    }

    pub fn stroke_circle(&mut self, rect: Rect, thickness: f32, color: Color) {
        if color.a == 0 || thickness <= 0.0 {
            return;
        }
        self.push(ShapeCmd::Circle(CircleCmd { rect, style: DrawStyle::Stroke(thickness), color }));
    }
}
