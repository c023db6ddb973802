use crate::convert::DrawCommands;
use crate::gl::GlApi;

use super::clip_to_scissor;

/// Draw calls issued for one command list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SubmitStats {
    pub draw_calls: usize,
    /// Final index offset, i.e. the number of indices consumed.
    pub elements: u32,
}

/// Issues one indexed draw per non-empty command, in order.
///
/// Expects the program, vertex array and both buffers bound and the scissor
/// test enabled. Empty commands are skipped without advancing the offset.
pub fn submit_commands<G: GlApi + ?Sized>(
    gl: &G,
    cmds: &DrawCommands,
    viewport_height: u32,
) -> SubmitStats {
    let mut stats = SubmitStats::default();

    for cmd in cmds {
        if cmd.elem_count == 0 {
            continue;
        }
        gl.bind_texture(cmd.texture);
        gl.scissor(clip_to_scissor(cmd.clip_rect, viewport_height));
        gl.draw_elements_u16(cmd.elem_count, stats.elements as usize * size_of::<u16>());

        stats.elements += cmd.elem_count;
        stats.draw_calls += 1;
    }

    stats
}
