pub(crate) mod circle;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod path;
pub(crate) mod rect;
pub(crate) mod text;
pub(crate) mod triangle;

pub use circle::CircleCmd;
pub use image::ImageCmd;
pub use line::LineCmd;
pub use path::{PolygonCmd, PolylineCmd};
pub use rect::{RectCmd, RectMultiColorCmd};
pub use text::TextCmd;
pub use triangle::TriangleCmd;

/// How a closed shape is painted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawStyle {
    Fill,
    /// Outline of the given thickness in pixels.
    Stroke(f32),
}

impl DrawStyle {
    /// Extra extent an outline adds around the shape's geometry.
    #[inline]
    pub(crate) fn outset(self) -> f32 {
        match self {
            DrawStyle::Fill => 0.0,
            DrawStyle::Stroke(t) => t * 0.5,
        }
    }
}
