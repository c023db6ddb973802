use crate::coords::Rect;
use crate::gl::Scissor;

/// Converts a top-left-origin clip rect into a GL scissor box.
///
/// GL counts scissor rows from the bottom of the framebuffer, so the rect is
/// flipped against `viewport_height`. Negative sizes clamp to zero.
pub fn clip_to_scissor(clip: Rect, viewport_height: u32) -> Scissor {
    Scissor {
        x: clip.x as i32,
        y: (viewport_height as f32 - (clip.y + clip.h)) as i32,
        width: clip.w.max(0.0) as i32,
        height: clip.h.max(0.0) as i32,
    }
}
