use super::{BufferId, GlApi, ProgramId, Scissor, TextureId, VertexArrayId};

/// Snapshot of the GL state the menu renderer touches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SavedState {
    pub program: ProgramId,
    pub active_texture: u32,
    pub texture: TextureId,
    pub array_buffer: BufferId,
    pub element_buffer: BufferId,
    pub vertex_array: VertexArrayId,
    pub blend: bool,
    pub scissor_test: bool,
    pub cull_face: bool,
    pub depth_test: bool,
    pub blend_src_rgb: u32,
    pub blend_dst_rgb: u32,
    pub blend_src_alpha: u32,
    pub blend_dst_alpha: u32,
    pub blend_equation_rgb: u32,
    pub blend_equation_alpha: u32,
    pub scissor_box: Scissor,
}

impl SavedState {
    /// Queries the current state from `gl`.
    pub fn capture<G: GlApi + ?Sized>(gl: &G) -> Self {
        let name = |pname| gl.get_integer(pname) as u32;

        // Query the texture binding after the unit so it belongs to that unit.
        let active_texture = name(glow::ACTIVE_TEXTURE);

        let mut scissor_box = [0i32; 4];
        gl.get_integer_v(glow::SCISSOR_BOX, &mut scissor_box);

        Self {
            program: ProgramId(name(glow::CURRENT_PROGRAM)),
            active_texture,
            texture: TextureId(name(glow::TEXTURE_BINDING_2D)),
            array_buffer: BufferId(name(glow::ARRAY_BUFFER_BINDING)),
            element_buffer: BufferId(name(glow::ELEMENT_ARRAY_BUFFER_BINDING)),
            vertex_array: VertexArrayId(name(glow::VERTEX_ARRAY_BINDING)),
            blend: gl.is_enabled(glow::BLEND),
            scissor_test: gl.is_enabled(glow::SCISSOR_TEST),
            cull_face: gl.is_enabled(glow::CULL_FACE),
            depth_test: gl.is_enabled(glow::DEPTH_TEST),
            blend_src_rgb: name(glow::BLEND_SRC_RGB),
            blend_dst_rgb: name(glow::BLEND_DST_RGB),
            blend_src_alpha: name(glow::BLEND_SRC_ALPHA),
            blend_dst_alpha: name(glow::BLEND_DST_ALPHA),
            blend_equation_rgb: name(glow::BLEND_EQUATION_RGB),
            blend_equation_alpha: name(glow::BLEND_EQUATION_ALPHA),
            scissor_box: Scissor {
                x: scissor_box[0],
                y: scissor_box[1],
                width: scissor_box[2],
                height: scissor_box[3],
            },
        }
    }

    /// Writes the snapshot back.
    ///
    /// The vertex array goes first: the element buffer binding is part of
    /// vertex array state, so rebinding it afterwards targets the right object.
    pub fn restore<G: GlApi + ?Sized>(&self, gl: &G) {
        gl.use_program(self.program);
        gl.active_texture(self.active_texture);
        gl.bind_texture(self.texture);
        gl.bind_vertex_array(self.vertex_array);
        gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.element_buffer);

        gl.blend_equation_separate(self.blend_equation_rgb, self.blend_equation_alpha);
        gl.blend_func_separate(
            self.blend_src_rgb,
            self.blend_dst_rgb,
            self.blend_src_alpha,
            self.blend_dst_alpha,
        );
        gl.set_enabled(glow::BLEND, self.blend);
        gl.set_enabled(glow::SCISSOR_TEST, self.scissor_test);
        gl.set_enabled(glow::CULL_FACE, self.cull_face);
        gl.set_enabled(glow::DEPTH_TEST, self.depth_test);
        gl.scissor(self.scissor_box);
    }
}

/// Scoped GL state save/restore.
///
/// Captures the state on construction and restores it when dropped, so every
/// exit path of the frame renderer (including unwinding) leaves the host's
/// bindings untouched.
pub struct GlStateGuard<'a, G: GlApi + ?Sized> {
    gl: &'a G,
    saved: SavedState,
}

impl<'a, G: GlApi + ?Sized> GlStateGuard<'a, G> {
    pub fn save(gl: &'a G) -> Self {
        let saved = SavedState::capture(gl);
        log::trace!("saved GL state: {saved:?}");
        Self { gl, saved }
    }

    pub fn saved(&self) -> &SavedState {
        &self.saved
    }
}

impl<G: GlApi + ?Sized> Drop for GlStateGuard<'_, G> {
    fn drop(&mut self) {
        self.saved.restore(self.gl);
    }
}
