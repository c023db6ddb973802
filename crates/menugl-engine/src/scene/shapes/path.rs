use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};

use super::DrawStyle;

/// Closed polygon. Fills assume a convex outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd {
    pub points: Vec<Vec2>,
    pub style: DrawStyle,
    pub color: Color,
}

/// Open polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCmd {
    pub points: Vec<Vec2>,
    pub thickness: f32,
    pub color: Color,
}

impl CommandQueue {
    /// Records a filled convex polygon. Fewer than three points draw nothing.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if color.a == 0 || points.len() < 3 {
            return;
        }
        self.push(ShapeCmd::Polygon(PolygonCmd {
            points: points.to_vec(),
            style: DrawStyle::Fill,
            color,
        }));
    }

    pub fn stroke_polygon(&mut self, points: &[Vec2], thickness: f32, color: Color) {
        if color.a == 0 || points.len() < 2 || thickness <= 0.0 {
            return;
        }
        self.push(ShapeCmd::Polygon(PolygonCmd {
            points: points.to_vec(),
            style: DrawStyle::Stroke(thickness),
            color,
        }));
    }

    pub fn stroke_polyline(&mut self, points: &[Vec2], thickness: f32, color: Color) {
        if color.a == 0 || points.len() < 2 || thickness <= 0.0 {
            return;
        }
        self.push(ShapeCmd::Polyline(PolylineCmd { points: points.to_vec(), thickness, color }));
    }
}
