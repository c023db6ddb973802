use std::num::NonZeroU32;

use glow::HasContext;

use super::{
    AttribLayout, BufferId, GlApi, ProgramId, Scissor, ShaderId, ShaderStage, TextureId,
    UniformLocation, VertexArrayId,
};

/// [`GlApi`] backed by a `glow` context.
pub struct GlowGl {
    gl: glow::Context,
}

impl GlowGl {
    /// Wraps a loaded `glow` context.
    ///
    /// # Safety
    ///
    /// The context must be current on the calling thread for as long as this
    /// value is used, and every call must happen on that thread.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Gives back the wrapped context.
    pub fn into_inner(self) -> glow::Context {
        self.gl
    }
}

#[inline]
fn program(id: ProgramId) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id.0).map(glow::NativeProgram)
}

#[inline]
fn shader(id: ShaderId) -> Option<glow::NativeShader> {
    NonZeroU32::new(id.0).map(glow::NativeShader)
}

#[inline]
fn buffer(id: BufferId) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(id.0).map(glow::NativeBuffer)
}

#[inline]
fn vertex_array(id: VertexArrayId) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(id.0).map(glow::NativeVertexArray)
}

#[inline]
fn texture(id: TextureId) -> Option<glow::NativeTexture> {
    NonZeroU32::new(id.0).map(glow::NativeTexture)
}

#[inline]
fn gl_size(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

// SAFETY (all blocks below): `GlowGl::new` requires the context to be current
// on this thread; arguments are plain values or slices whose lengths are
// passed alongside.
impl GlApi for GlowGl {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }.map(|s| ShaderId(s.0.get()))
    }

    fn shader_source(&self, id: ShaderId, source: &str) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.shader_source(s, source) }
        }
    }

    fn compile_shader(&self, id: ShaderId) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.compile_shader(s) }
        }
    }

    fn shader_compile_status(&self, id: ShaderId) -> bool {
        shader(id).is_some_and(|s| unsafe { self.gl.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, id: ShaderId) -> String {
        shader(id).map(|s| unsafe { self.gl.get_shader_info_log(s) }).unwrap_or_default()
    }

    fn delete_shader(&self, id: ShaderId) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.delete_shader(s) }
        }
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        unsafe { self.gl.create_program() }.map(|p| ProgramId(p.0.get()))
    }

    fn attach_shader(&self, p: ProgramId, s: ShaderId) {
        if let (Some(p), Some(s)) = (program(p), shader(s)) {
            unsafe { self.gl.attach_shader(p, s) }
        }
    }

    fn detach_shader(&self, p: ProgramId, s: ShaderId) {
        if let (Some(p), Some(s)) = (program(p), shader(s)) {
            unsafe { self.gl.detach_shader(p, s) }
        }
    }

    fn link_program(&self, id: ProgramId) {
        if let Some(p) = program(id) {
            unsafe { self.gl.link_program(p) }
        }
    }

    fn program_link_status(&self, id: ProgramId) -> bool {
        program(id).is_some_and(|p| unsafe { self.gl.get_program_link_status(p) })
    }

    fn program_info_log(&self, id: ProgramId) -> String {
        program(id).map(|p| unsafe { self.gl.get_program_info_log(p) }).unwrap_or_default()
    }

    fn delete_program(&self, id: ProgramId) {
        if let Some(p) = program(id) {
            unsafe { self.gl.delete_program(p) }
        }
    }

    fn use_program(&self, id: ProgramId) {
        unsafe { self.gl.use_program(program(id)) }
    }

    fn uniform_location(&self, id: ProgramId, name: &str) -> Option<UniformLocation> {
        let p = program(id)?;
        unsafe { self.gl.get_uniform_location(p, name) }.map(|l| UniformLocation(l.0))
    }

    fn attrib_location(&self, id: ProgramId, name: &str) -> Option<u32> {
        let p = program(id)?;
        unsafe { self.gl.get_attrib_location(p, name) }
    }

    fn uniform_matrix4(&self, location: UniformLocation, matrix: &[f32; 16]) {
        let loc = glow::NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(&loc), false, matrix) }
    }

    fn uniform_i32(&self, location: UniformLocation, value: i32) {
        let loc = glow::NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_1_i32(Some(&loc), value) }
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        unsafe { self.gl.create_buffer() }.map(|b| BufferId(b.0.get()))
    }

    fn bind_buffer(&self, target: u32, id: BufferId) {
        unsafe { self.gl.bind_buffer(target, buffer(id)) }
    }

    fn buffer_data_size(&self, target: u32, size: usize, usage: u32) {
        unsafe { self.gl.buffer_data_size(target, gl_size(size), usage) }
    }

    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]) {
        unsafe { self.gl.buffer_sub_data_u8_slice(target, gl_size(offset), data) }
    }

    fn delete_buffer(&self, id: BufferId) {
        if let Some(b) = buffer(id) {
            unsafe { self.gl.delete_buffer(b) }
        }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| VertexArrayId(v.0.get()))
    }

    fn bind_vertex_array(&self, id: VertexArrayId) {
        unsafe { self.gl.bind_vertex_array(vertex_array(id)) }
    }

    fn delete_vertex_array(&self, id: VertexArrayId) {
        if let Some(v) = vertex_array(id) {
            unsafe { self.gl.delete_vertex_array(v) }
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer(&self, index: u32, l: AttribLayout) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                l.components,
                l.data_type,
                l.normalized,
                l.stride,
                l.offset,
            )
        }
    }

    fn create_texture(&self) -> Result<TextureId, String> {
        unsafe { self.gl.create_texture() }.map(|t| TextureId(t.0.get()))
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(unit) }
    }

    fn bind_texture(&self, id: TextureId) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture(id)) }
    }

    fn tex_parameter(&self, pname: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(glow::TEXTURE_2D, pname, value) }
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                gl_size(width as usize),
                gl_size(height as usize),
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            )
        }
    }

    fn pixel_store_i32(&self, pname: u32, value: i32) {
        unsafe { self.gl.pixel_store_i32(pname, value) }
    }

    fn generate_mipmap(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn delete_texture(&self, id: TextureId) {
        if let Some(t) = texture(id) {
            unsafe { self.gl.delete_texture(t) }
        }
    }

    fn get_integer(&self, pname: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(pname) }
    }

    fn get_integer_v(&self, pname: u32, out: &mut [i32]) {
        unsafe { self.gl.get_parameter_i32_slice(pname, out) }
    }

    fn is_enabled(&self, cap: u32) -> bool {
        unsafe { self.gl.is_enabled(cap) }
    }

    fn set_enabled(&self, cap: u32, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(cap)
            } else {
                self.gl.disable(cap)
            }
        }
    }

    fn blend_equation_separate(&self, mode_rgb: u32, mode_alpha: u32) {
        unsafe { self.gl.blend_equation_separate(mode_rgb, mode_alpha) }
    }

    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        unsafe { self.gl.blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha) }
    }

    fn scissor(&self, s: Scissor) {
        unsafe { self.gl.scissor(s.x, s.y, s.width, s.height) }
    }

    fn draw_elements_u16(&self, count: u32, offset_bytes: usize) {
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                gl_size(count as usize),
                glow::UNSIGNED_SHORT,
                gl_size(offset_bytes),
            )
        }
    }
}
