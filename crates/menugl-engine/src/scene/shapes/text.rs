use std::rc::Rc;

use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{CommandQueue, ShapeCmd};
use crate::text::Font;

/// Single line of text laid out from the top-left of `rect`.
///
/// Glyphs that would cross the right edge of `rect` are dropped. A zero
/// width or height means unbounded on that axis.
#[derive(Debug, Clone)]
pub struct TextCmd {
    pub rect: Rect,
    pub text: String,
    pub font: Rc<Font>,
    pub color: Color,
}

impl TextCmd {
    pub(crate) fn bounds(&self) -> Rect {
        let w = if self.rect.w > 0.0 { self.rect.w } else { self.font.text_width(&self.text) };
        let h = if self.rect.h > 0.0 { self.rect.h } else { self.font.line_height() };
        Rect::new(self.rect.x, self.rect.y, w, h)
    }
}

impl CommandQueue {
    /// Records a text run. Empty or transparent text is skipped.
    pub fn draw_text(&mut self, rect: Rect, text: impl Into<String>, font: &Rc<Font>, color: Color) {
        let text = text.into();
        if text.is_empty() || color.a == 0 {
            return;
        }
        self.push(ShapeCmd::Text(TextCmd { rect, text, font: Rc::clone(font), color }));
    }
}
