use crate::coords::Rect;

use super::ShapeCmd;

/// A queued shape plus the clip rect in effect when it was pushed.
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub cmd: ShapeCmd,
    /// Scissor rect in pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Shapes recorded for one frame, consumed by `Device::draw`.
///
/// Items are drawn in the order they were pushed (painter's algorithm).
///
/// # Clipping
///
/// Use [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) to scope
/// commands to a scissor rect. Clips intersect with their parent, so nested
/// scroll regions work.
///
/// ```ignore
/// queue.push_clip(list_rect);
/// // ... push entries ...
/// queue.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct CommandQueue {
    items: Vec<QueueItem>,
    /// Top is the effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
    culled: usize,
}

impl CommandQueue {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items and the clip stack, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
        self.culled = 0;
    }

    #[inline]
    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commands dropped since the last clear because they fell outside the clip.
    #[inline]
    pub fn culled(&self) -> usize {
        self.culled
    }

    /// Current effective clip rect.
    #[inline]
    pub fn clip_rect(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Records a shape command under the current clip rect.
    ///
    /// Shapes whose bounds miss the clip entirely are dropped.
    pub fn push(&mut self, cmd: ShapeCmd) {
        let clip_rect = self.clip_rect();
        if let (Some(clip), Some(bounds)) = (clip_rect, cmd.bounds()) {
            if clip.is_empty() || clip.intersect(bounds.normalized()).is_none() {
                self.culled += 1;
                return;
            }
        }
        self.items.push(QueueItem { cmd, clip_rect });
    }

    /// Begins a scissor region; every command pushed until the matching
    /// [`pop_clip`](Self::pop_clip) is clipped to `rect` intersected with the
    /// parent clip.
    pub fn push_clip(&mut self, rect: Rect) {
        let rect = rect.normalized();
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap: a zero-area clip makes everything under it culled.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent region started by [`push_clip`](Self::push_clip).
    ///
    /// Unbalanced calls are ignored in release builds.
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }
}
