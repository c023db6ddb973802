use crate::coords::Rect;
use crate::gl::TextureId;

/// One draw call: `elem_count` indices sampled from `texture`, scissored to
/// `clip_rect`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    pub elem_count: u32,
    pub clip_rect: Rect,
    pub texture: TextureId,
}

/// Draw commands produced by one conversion, in emission order.
#[derive(Debug, Default)]
pub struct DrawCommands {
    cmds: Vec<DrawCommand>,
}

impl DrawCommands {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.cmds.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.cmds
    }

    /// Appends a command as is.
    #[inline]
    pub fn push(&mut self, cmd: DrawCommand) {
        self.cmds.push(cmd);
    }

    /// Accounts `count` new indices drawn with `texture` under `clip_rect`.
    ///
    /// Extends the last command when its texture and clip match, otherwise
    /// starts a new one.
    pub fn add_elements(&mut self, texture: TextureId, clip_rect: Rect, count: u32) {
        match self.cmds.last_mut() {
            Some(last) if last.texture == texture && last.clip_rect == clip_rect => {
                last.elem_count += count;
            }
            _ => self.cmds.push(DrawCommand { elem_count: count, clip_rect, texture }),
        }
    }

    /// Sum of all element counts.
    pub fn total_elements(&self) -> u32 {
        self.cmds.iter().map(|c| c.elem_count).sum()
    }
}

impl<'a> IntoIterator for &'a DrawCommands {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
