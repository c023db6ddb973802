//! In-memory [`GlApi`] for tests.
//!
//! Tracks object lifetimes, bindings, enables and integer state the way a GL
//! driver would, and appends every state-changing call to a log.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::{
    AttribLayout, BufferId, GlApi, ProgramId, Scissor, ShaderId, ShaderStage, TextureId,
    UniformLocation, VertexArrayId,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    DeleteShader(ShaderId),
    DeleteProgram(ProgramId),
    UseProgram(ProgramId),
    UniformMatrix4(UniformLocation, [f32; 16]),
    UniformI32(UniformLocation, i32),
    BindBuffer(u32, BufferId),
    BufferData { target: u32, size: usize, usage: u32 },
    BufferSubData { target: u32, offset: usize, len: usize },
    DeleteBuffer(BufferId),
    BindVertexArray(VertexArrayId),
    DeleteVertexArray(VertexArrayId),
    EnableVertexAttribArray(u32),
    VertexAttribPointer(u32, AttribLayout),
    ActiveTexture(u32),
    BindTexture(TextureId),
    TexParameter(u32, i32),
    PixelStore(u32, i32),
    TexImage { texture: TextureId, width: u32, height: u32 },
    GenerateMipmap(TextureId),
    DeleteTexture(TextureId),
    SetEnabled(u32, bool),
    BlendEquation(u32, u32),
    BlendFunc(u32, u32, u32, u32),
    Scissor(Scissor),
    DrawElements { count: u32, offset_bytes: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Kind {
    Shader,
    Program,
    Buffer,
    VertexArray,
    Texture,
}

#[derive(Default)]
struct State {
    next_name: u32,
    live: HashSet<(Kind, u32)>,
    integers: HashMap<u32, i32>,
    enabled: HashSet<u32>,
    scissor_box: [i32; 4],
    textures: HashMap<u32, (u32, u32, Vec<u8>)>,
    buffer_bytes: HashMap<u32, Vec<u8>>,
    calls: Vec<Call>,
}

pub(crate) struct RecordingGl {
    state: RefCell<State>,
    fail_compile: Option<ShaderStage>,
    fail_link: bool,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
}

impl RecordingGl {
    pub(crate) fn new() -> Self {
        let mut state = State::default();
        state.integers.insert(glow::ACTIVE_TEXTURE, glow::TEXTURE0 as i32);
        state.integers.insert(glow::UNPACK_ALIGNMENT, 4);
        state.integers.insert(glow::BLEND_SRC_RGB, glow::ONE as i32);
        state.integers.insert(glow::BLEND_SRC_ALPHA, glow::ONE as i32);
        state.integers.insert(glow::BLEND_DST_RGB, glow::ZERO as i32);
        state.integers.insert(glow::BLEND_DST_ALPHA, glow::ZERO as i32);
        state.integers.insert(glow::BLEND_EQUATION_RGB, glow::FUNC_ADD as i32);
        state.integers.insert(glow::BLEND_EQUATION_ALPHA, glow::FUNC_ADD as i32);
        Self {
            state: RefCell::new(state),
            fail_compile: None,
            fail_link: false,
            shader_stages: RefCell::new(HashMap::new()),
        }
    }

    /// Makes every shader of `stage` fail to compile.
    pub(crate) fn failing_compile(stage: ShaderStage) -> Self {
        Self { fail_compile: Some(stage), ..Self::new() }
    }

    pub(crate) fn failing_link() -> Self {
        Self { fail_link: true, ..Self::new() }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn is_live(&self, kind: Kind, name: u32) -> bool {
        self.state.borrow().live.contains(&(kind, name))
    }

    pub(crate) fn live_count(&self, kind: Kind) -> usize {
        self.state.borrow().live.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Size and pixels last uploaded to `texture`.
    pub(crate) fn texture_image(&self, texture: TextureId) -> Option<(u32, u32, Vec<u8>)> {
        self.state.borrow().textures.get(&texture.0).cloned()
    }

    /// Bytes written through `buffer_sub_data` to `buffer`.
    pub(crate) fn buffer_bytes(&self, buffer: BufferId) -> Vec<u8> {
        self.state.borrow().buffer_bytes.get(&buffer.0).cloned().unwrap_or_default()
    }

    pub(crate) fn draws(&self) -> Vec<(u32, usize)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DrawElements { count, offset_bytes } => Some((count, offset_bytes)),
                _ => None,
            })
            .collect()
    }

    fn log(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn create(&self, kind: Kind) -> u32 {
        let mut s = self.state.borrow_mut();
        s.next_name += 1;
        let name = s.next_name;
        s.live.insert((kind, name));
        name
    }

    fn delete(&self, kind: Kind, name: u32) {
        if name != 0 {
            self.state.borrow_mut().live.remove(&(kind, name));
        }
    }

    fn set_integer(&self, pname: u32, value: u32) {
        self.state.borrow_mut().integers.insert(pname, value as i32);
    }

    fn binding(&self, pname: u32) -> u32 {
        self.get_integer(pname) as u32
    }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String> {
        let name = self.create(Kind::Shader);
        self.shader_stages.borrow_mut().insert(name, stage);
        Ok(ShaderId(name))
    }

    fn shader_source(&self, _shader: ShaderId, _source: &str) {}

    fn compile_shader(&self, _shader: ShaderId) {}

    fn shader_compile_status(&self, shader: ShaderId) -> bool {
        let stage = self.shader_stages.borrow().get(&shader.0).copied();
        stage.is_some() && stage != self.fail_compile
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error".to_string()
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.delete(Kind::Shader, shader.0);
        self.log(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        Ok(ProgramId(self.create(Kind::Program)))
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.log(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.log(Call::DetachShader(program, shader));
    }

    fn link_program(&self, _program: ProgramId) {}

    fn program_link_status(&self, program: ProgramId) -> bool {
        !self.fail_link && self.is_live(Kind::Program, program.0)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking failed".to_string()
        }
    }

    fn delete_program(&self, program: ProgramId) {
        self.delete(Kind::Program, program.0);
        self.log(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: ProgramId) {
        self.set_integer(glow::CURRENT_PROGRAM, program.0);
        self.log(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        match name {
            "ProjMtx" => Some(UniformLocation(0)),
            "Texture" => Some(UniformLocation(1)),
            _ => None,
        }
    }

    fn attrib_location(&self, _program: ProgramId, name: &str) -> Option<u32> {
        match name {
            "Position" => Some(0),
            "TexCoord" => Some(1),
            "Color" => Some(2),
            _ => None,
        }
    }

    fn uniform_matrix4(&self, location: UniformLocation, matrix: &[f32; 16]) {
        self.log(Call::UniformMatrix4(location, *matrix));
    }

    fn uniform_i32(&self, location: UniformLocation, value: i32) {
        self.log(Call::UniformI32(location, value));
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        Ok(BufferId(self.create(Kind::Buffer)))
    }

    fn bind_buffer(&self, target: u32, buffer: BufferId) {
        let pname = match target {
            glow::ELEMENT_ARRAY_BUFFER => glow::ELEMENT_ARRAY_BUFFER_BINDING,
            _ => glow::ARRAY_BUFFER_BINDING,
        };
        self.set_integer(pname, buffer.0);
        self.log(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_size(&self, target: u32, size: usize, usage: u32) {
        let bound = self.bound_buffer(target);
        self.state.borrow_mut().buffer_bytes.insert(bound, vec![0; size]);
        self.log(Call::BufferData { target, size, usage });
    }

    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]) {
        let bound = self.bound_buffer(target);
        {
            let mut s = self.state.borrow_mut();
            let bytes = s.buffer_bytes.entry(bound).or_default();
            if bytes.len() < offset + data.len() {
                bytes.resize(offset + data.len(), 0);
            }
            bytes[offset..offset + data.len()].copy_from_slice(data);
        }
        self.log(Call::BufferSubData { target, offset, len: data.len() });
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.delete(Kind::Buffer, buffer.0);
        self.log(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        Ok(VertexArrayId(self.create(Kind::VertexArray)))
    }

    fn bind_vertex_array(&self, vertex_array: VertexArrayId) {
        self.set_integer(glow::VERTEX_ARRAY_BINDING, vertex_array.0);
        self.log(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        self.delete(Kind::VertexArray, vertex_array.0);
        self.log(Call::DeleteVertexArray(vertex_array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.log(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(&self, index: u32, layout: AttribLayout) {
        self.log(Call::VertexAttribPointer(index, layout));
    }

    fn create_texture(&self) -> Result<TextureId, String> {
        Ok(TextureId(self.create(Kind::Texture)))
    }

    fn active_texture(&self, unit: u32) {
        self.set_integer(glow::ACTIVE_TEXTURE, unit);
        self.log(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, texture: TextureId) {
        self.set_integer(glow::TEXTURE_BINDING_2D, texture.0);
        self.log(Call::BindTexture(texture));
    }

    fn tex_parameter(&self, pname: u32, value: i32) {
        self.log(Call::TexParameter(pname, value));
    }

    fn tex_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        let texture = TextureId(self.binding(glow::TEXTURE_BINDING_2D));
        self.state.borrow_mut().textures.insert(texture.0, (width, height, pixels.to_vec()));
        self.log(Call::TexImage { texture, width, height });
    }

    fn pixel_store_i32(&self, pname: u32, value: i32) {
        self.state.borrow_mut().integers.insert(pname, value);
        self.log(Call::PixelStore(pname, value));
    }

    fn generate_mipmap(&self) {
        let texture = TextureId(self.binding(glow::TEXTURE_BINDING_2D));
        self.log(Call::GenerateMipmap(texture));
    }

    fn delete_texture(&self, texture: TextureId) {
        self.delete(Kind::Texture, texture.0);
        self.log(Call::DeleteTexture(texture));
    }

    fn get_integer(&self, pname: u32) -> i32 {
        self.state.borrow().integers.get(&pname).copied().unwrap_or(0)
    }

    fn get_integer_v(&self, pname: u32, out: &mut [i32]) {
        if pname == glow::SCISSOR_BOX {
            let b = self.state.borrow().scissor_box;
            for (dst, src) in out.iter_mut().zip(b) {
                *dst = src;
            }
        } else if let Some(first) = out.first_mut() {
            *first = self.get_integer(pname);
        }
    }

    fn is_enabled(&self, cap: u32) -> bool {
        self.state.borrow().enabled.contains(&cap)
    }

    fn set_enabled(&self, cap: u32, enabled: bool) {
        {
            let mut s = self.state.borrow_mut();
            if enabled {
                s.enabled.insert(cap);
            } else {
                s.enabled.remove(&cap);
            }
        }
        self.log(Call::SetEnabled(cap, enabled));
    }

    fn blend_equation_separate(&self, mode_rgb: u32, mode_alpha: u32) {
        self.set_integer(glow::BLEND_EQUATION_RGB, mode_rgb);
        self.set_integer(glow::BLEND_EQUATION_ALPHA, mode_alpha);
        self.log(Call::BlendEquation(mode_rgb, mode_alpha));
    }

    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        self.set_integer(glow::BLEND_SRC_RGB, src_rgb);
        self.set_integer(glow::BLEND_DST_RGB, dst_rgb);
        self.set_integer(glow::BLEND_SRC_ALPHA, src_alpha);
        self.set_integer(glow::BLEND_DST_ALPHA, dst_alpha);
        self.log(Call::BlendFunc(src_rgb, dst_rgb, src_alpha, dst_alpha));
    }

    fn scissor(&self, scissor: Scissor) {
        self.state.borrow_mut().scissor_box =
            [scissor.x, scissor.y, scissor.width, scissor.height];
        self.log(Call::Scissor(scissor));
    }

    fn draw_elements_u16(&self, count: u32, offset_bytes: usize) {
        self.log(Call::DrawElements { count, offset_bytes });
    }
}

impl RecordingGl {
    fn bound_buffer(&self, target: u32) -> u32 {
        match target {
            glow::ELEMENT_ARRAY_BUFFER => self.binding(glow::ELEMENT_ARRAY_BUFFER_BINDING),
            _ => self.binding(glow::ARRAY_BUFFER_BINDING),
        }
    }
}
