//! OpenGL access layer.
//!
//! The renderer only talks to GL through [`GlApi`], a narrow trait covering the
//! entry points it actually uses. [`GlowGl`] implements it on top of
//! `glow::Context`; the test suite uses a recording implementation that tracks
//! bindings without a real context.
//!
//! Object names are plain `u32` newtypes where `0` means "none", matching GL:
//! binding name 0 unbinds and deleting name 0 is a no-op.
//!
//! Enum-valued parameters (`pname`, targets, filters) use the `glow` constants.

#[cfg(not(target_arch = "wasm32"))]
mod glow_impl;
mod state;

#[cfg(test)]
pub(crate) mod recording;

#[cfg(not(target_arch = "wasm32"))]
pub use glow_impl::GlowGl;
pub use state::{GlStateGuard, SavedState};

macro_rules! gl_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);

        impl $name {
            pub const NONE: $name = $name(0);

            #[inline]
            pub const fn is_none(self) -> bool {
                self.0 == 0
            }
        }
    };
}

gl_name!(
    /// Shader program object.
    ProgramId
);
gl_name!(
    /// Shader object.
    ShaderId
);
gl_name!(
    /// Buffer object (vertex or element).
    BufferId
);
gl_name!(
    /// Vertex array object.
    VertexArrayId
);
gl_name!(
    /// 2D texture object.
    TextureId
);

/// Resolved uniform location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// One vertex attribute inside an interleaved vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribLayout {
    pub components: i32,
    pub data_type: u32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

/// Scissor box in GL window coordinates (bottom-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Scissor {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The GL entry points used by this crate.
///
/// Implementations assume the GL context is current on the calling thread.
/// Creation calls return the driver message on failure, as `glow` does.
pub trait GlApi {
    // shaders + programs
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String>;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compile_status(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> Result<ProgramId, String>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_link_status(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: ProgramId);

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32>;
    fn uniform_matrix4(&self, location: UniformLocation, matrix: &[f32; 16]);
    fn uniform_i32(&self, location: UniformLocation, value: i32);

    // buffers + vertex arrays
    fn create_buffer(&self) -> Result<BufferId, String>;
    fn bind_buffer(&self, target: u32, buffer: BufferId);
    /// Reallocates the bound buffer's storage to `size` bytes, discarding contents.
    fn buffer_data_size(&self, target: u32, size: usize, usage: u32);
    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferId);

    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn bind_vertex_array(&self, vertex_array: VertexArrayId);
    fn delete_vertex_array(&self, vertex_array: VertexArrayId);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(&self, index: u32, layout: AttribLayout);

    // textures
    fn create_texture(&self) -> Result<TextureId, String>;
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, texture: TextureId);
    fn tex_parameter(&self, pname: u32, value: i32);
    /// Uploads RGBA8 pixels to mip level 0 of the bound 2D texture, honoring
    /// the current unpack alignment.
    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]);
    fn pixel_store_i32(&self, pname: u32, value: i32);
    fn generate_mipmap(&self);
    fn delete_texture(&self, texture: TextureId);

    // state queries + fixed function
    fn get_integer(&self, pname: u32) -> i32;
    fn get_integer_v(&self, pname: u32, out: &mut [i32]);
    fn is_enabled(&self, cap: u32) -> bool;
    fn set_enabled(&self, cap: u32, enabled: bool);
    fn blend_equation_separate(&self, mode_rgb: u32, mode_alpha: u32);
    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32);
    fn scissor(&self, scissor: Scissor);

    /// Draws `count` `u16` indices from the bound element buffer, starting at `offset_bytes`.
    fn draw_elements_u16(&self, count: u32, offset_bytes: usize);
}
