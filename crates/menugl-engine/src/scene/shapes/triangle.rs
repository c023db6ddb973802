use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};

use super::DrawStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct TriangleCmd {
    pub points: [Vec2; 3],
    pub style: DrawStyle,
    pub color: Color,
}

impl TriangleCmd {
    pub(crate) fn bounds(&self) -> Rect {
        let [a, b, c] = self.points;
        let min = Vec2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y));
        let max = Vec2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y));
        Rect::from_min_max(min, max).expand(self.style.outset().max(0.5))
    }
}

impl CommandQueue {
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        if color.a == 0 {
            return;
        }
        self.push(ShapeCmd::Triangle(TriangleCmd { points: [a, b, c], style: DrawStyle::Fill, color }));
    }

    pub fn stroke_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, thickness: f32, color: Color) {
        if color.a == 0 || thickness <= 0.0 {
            return;
        }
        self.push(ShapeCmd::Triangle(TriangleCmd {
            points: [a, b, c],
            style: DrawStyle::Stroke(thickness),
            color,
        }));
    }
}
