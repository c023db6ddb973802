use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};

/// Straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: f32,
    pub color: Color,
}

impl LineCmd {
    pub(crate) fn bounds(&self) -> Rect {
        let pad = self.thickness.max(1.0) * 0.5;
        Rect::from_min_max(
            Vec2::new(self.from.x.min(self.to.x) - pad, self.from.y.min(self.to.y) - pad),
            Vec2::new(self.from.x.max(self.to.x) + pad, self.from.y.max(self.to.y) + pad),
        )
    }
}

impl CommandQueue {
    /// Records a line segment. Transparent lines are skipped.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        if color.a == 0 {
            return;
        }
        self.push(ShapeCmd::Line(LineCmd { from, to, thickness, color }));
    }
}
