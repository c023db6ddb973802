use crate::coords::Rect;
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::path::{PolygonCmd, PolylineCmd};
use crate::scene::shapes::rect::{RectCmd, RectMultiColorCmd};
use crate::scene::shapes::text::TextCmd;
use crate::scene::shapes::triangle::TriangleCmd;

/// Renderer-agnostic shape command.
///
/// Extending the queue:
/// - add a payload and push helpers under `scene::shapes::*`
/// - add a variant here and its bounds below
/// - teach `convert` to tessellate it
#[derive(Debug, Clone)]
pub enum ShapeCmd {
    Line(LineCmd),
    Rect(RectCmd),
    RectMultiColor(RectMultiColorCmd),
    Circle(CircleCmd),
    Triangle(TriangleCmd),
    Polygon(PolygonCmd),
    Polyline(PolylineCmd),
    Text(TextCmd),
    Image(ImageCmd),
}

impl ShapeCmd {
    /// Conservative screen-space bounds, used to cull against the clip rect.
    ///
    /// `None` means the shape has no cheap bounds and is never culled.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            ShapeCmd::Line(c) => Some(c.bounds()),
            ShapeCmd::Rect(c) => Some(c.bounds()),
            ShapeCmd::RectMultiColor(c) => Some(c.rect),
            ShapeCmd::Circle(c) => Some(c.bounds()),
            ShapeCmd::Triangle(c) => Some(c.bounds()),
            ShapeCmd::Text(c) => Some(c.bounds()),
            ShapeCmd::Image(c) => Some(c.rect),
            ShapeCmd::Polygon(_) | ShapeCmd::Polyline(_) => None,
        }
    }
}
