//! Command queue to vertex/index buffer conversion.
//!
//! [`convert`] walks the queue in emission order and tessellates each shape
//! into [`DrawVertex`]es and 16-bit indices. Consecutive primitives sharing a
//! texture and clip rect collapse into one [`DrawCommand`].

mod buffer;
mod draw_cmd;
mod tessellate;
mod vertex;

pub use buffer::{BufferKind, FixedBuffer};
pub use draw_cmd::{DrawCommand, DrawCommands};
pub use vertex::DrawVertex;

use crate::gl::TextureId;
use crate::scene::CommandQueue;

use tessellate::Tessellator;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AntiAliasing {
    Off,
    #[default]
    On,
}

/// Texture and texel used for untextured primitives.
///
/// Any opaque white texel works; the device points this at the custom region
/// of the last baked font atlas, or its 1x1 white texture before that.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct NullTexture {
    pub texture: TextureId,
    pub uv: [f32; 2],
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Multiplies the alpha of every vertex color.
    pub global_alpha: f32,
    /// Anti-aliasing for filled shapes.
    pub shape_aa: AntiAliasing,
    /// Anti-aliasing for lines and outlines.
    pub line_aa: AntiAliasing,
    /// Segments used for full circles; rounded corners use a quarter of it.
    pub circle_segment_count: u32,
    pub null: NullTexture,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            shape_aa: AntiAliasing::On,
            line_aa: AntiAliasing::On,
            circle_segment_count: 22,
            null: NullTexture::default(),
        }
    }
}

/// Outcome of one conversion.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Queue items fully converted.
    pub converted: usize,
    pub vertices: usize,
    pub elements: usize,
    pub commands: usize,
    /// Set when a buffer ran out; conversion stopped at that item.
    pub overflow: Option<BufferKind>,
}

/// Converts `queue` into the scratch buffers and `cmds`.
///
/// All three outputs are cleared first. When a primitive does not fit the
/// remaining budget, conversion stops there; everything converted before it
/// stays valid and drawable.
pub fn convert(
    queue: &CommandQueue,
    cmds: &mut DrawCommands,
    vertices: &mut FixedBuffer<DrawVertex>,
    elements: &mut FixedBuffer<u16>,
    config: &ConvertConfig,
) -> ConvertStats {
    cmds.clear();
    vertices.clear();
    elements.clear();

    let mut converted = 0;
    let mut overflow = None;
    {
        let mut tess = Tessellator::new(vertices, elements, cmds, config);
        for item in queue.items() {
            tess.set_clip(item.clip_rect);
            if let Err(kind) = tess.shape(&item.cmd) {
                overflow = Some(kind);
                break;
            }
            converted += 1;
        }
    }

    if let Some(kind) = overflow {
        log::warn!(
            "{kind} buffer budget exhausted, dropped {} of {} queued shapes",
            queue.len() - converted,
            queue.len()
        );
    }

    ConvertStats {
        converted,
        vertices: vertices.len(),
        elements: elements.len(),
        commands: cmds.len(),
        overflow,
    }
}
