use std::path::Path;

use crate::convert::{
    convert, AntiAliasing, BufferKind, ConvertConfig, DrawCommands, DrawVertex, FixedBuffer,
    NullTexture,
};
use crate::coords::Viewport;
use crate::gl::{BufferId, GlApi, GlStateGuard, TextureId, UniformLocation, VertexArrayId};
use crate::render::{ortho_projection, submit_commands};
use crate::scene::CommandQueue;
use crate::text::{bake_atlas, Font, FontConfig, FontError, GlyphRange};
use crate::texture::{upload_rgba, TextureFilter};

use super::shaders::MenuProgram;
use super::{DeviceConfig, DeviceError};

const ATTRIBUTES: [&str; 3] = ["Position", "TexCoord", "Color"];

/// What one [`Device::draw`] call did.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub elements: u32,
    pub vertices: usize,
    /// Buffer that ran out, if the frame was truncated.
    pub overflow: Option<BufferKind>,
}

/// GL objects owned by the device. Unset names are `NONE`, which every
/// delete call ignores, so a partially built set can always be released.
#[derive(Debug)]
struct GpuObjects {
    program: MenuProgram,
    uniform_proj: UniformLocation,
    uniform_texture: Option<UniformLocation>,
    attributes: [u32; 3],
    vbo: BufferId,
    ebo: BufferId,
    vao: VertexArrayId,
    white_texture: TextureId,
}

impl GpuObjects {
    fn create<G: GlApi + ?Sized>(gl: &G, config: &DeviceConfig) -> Result<Self, DeviceError> {
        let program = MenuProgram::build(gl, config.shader_version)?;
        let mut objects = Self {
            program,
            uniform_proj: UniformLocation(0),
            uniform_texture: None,
            attributes: [0; 3],
            vbo: BufferId::NONE,
            ebo: BufferId::NONE,
            vao: VertexArrayId::NONE,
            white_texture: TextureId::NONE,
        };

        if let Err(err) = objects.setup(gl) {
            log::error!("menu device setup failed: {err}");
            objects.delete(gl);
            return Err(err);
        }
        Ok(objects)
    }

    fn setup<G: GlApi + ?Sized>(&mut self, gl: &G) -> Result<(), DeviceError> {
        let program = self.program.program;

        self.uniform_proj = gl
            .uniform_location(program, "ProjMtx")
            .ok_or(DeviceError::MissingUniform("ProjMtx"))?;
        self.uniform_texture = gl.uniform_location(program, "Texture");

        for (slot, name) in self.attributes.iter_mut().zip(ATTRIBUTES) {
            *slot = gl
                .attrib_location(program, name)
                .ok_or(DeviceError::MissingAttribute(name))?;
        }

        let created =
            |what: &'static str| move |message: String| DeviceError::Create { what, message };
        self.vbo = gl.create_buffer().map_err(created("vertex buffer"))?;
        self.ebo = gl.create_buffer().map_err(created("element buffer"))?;
        self.vao = gl.create_vertex_array().map_err(created("vertex array"))?;

        gl.bind_vertex_array(self.vao);
        gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.ebo);
        for (&index, layout) in self.attributes.iter().zip(DrawVertex::layouts()) {
            gl.enable_vertex_attrib_array(index);
            gl.vertex_attrib_pointer(index, layout);
        }

        self.white_texture = upload_rgba(gl, 1, 1, &[255; 4], TextureFilter::MipmapNearest)?;

        gl.bind_vertex_array(VertexArrayId::NONE);
        gl.bind_buffer(glow::ARRAY_BUFFER, BufferId::NONE);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, BufferId::NONE);
        gl.bind_texture(TextureId::NONE);
        Ok(())
    }

    fn delete<G: GlApi + ?Sized>(&self, gl: &G) {
        self.program.delete(gl);
        gl.delete_texture(self.white_texture);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
        gl.delete_vertex_array(self.vao);
    }
}

/// GPU side of the menu renderer.
///
/// Owns the shader program, the streaming vertex/index buffers, every font
/// atlas it baked and the CPU scratch regions conversion writes into. All
/// calls must happen on the thread that owns the GL context.
///
/// There is no `Drop` impl: GL objects need the context to be released, so
/// call [`Device::shutdown`] explicitly.
pub struct Device {
    objects: GpuObjects,
    font_textures: Vec<TextureId>,
    null: NullTexture,
    vertices: FixedBuffer<DrawVertex>,
    elements: FixedBuffer<u16>,
    cmds: DrawCommands,
    config: DeviceConfig,
}

impl Device {
    /// Compiles the menu program and creates the buffers and vertex array.
    ///
    /// On failure nothing is left allocated, on the GPU or through the
    /// configured allocator.
    pub fn init<G: GlApi + ?Sized>(gl: &G, config: DeviceConfig) -> Result<Self, DeviceError> {
        let allocator = config.allocator;

        let vertices = FixedBuffer::new(config.max_vertex_memory, &allocator)?;
        let elements = match FixedBuffer::new(config.max_element_memory, &allocator) {
            Ok(elements) => elements,
            Err(err) => {
                vertices.release(&allocator);
                return Err(err.into());
            }
        };

        let objects = match GpuObjects::create(gl, &config) {
            Ok(objects) => objects,
            Err(err) => {
                vertices.release(&allocator);
                elements.release(&allocator);
                return Err(err);
            }
        };

        log::debug!(
            "menu device ready: program {}, {} vertices / {} indices per frame",
            objects.program.program.0,
            vertices.capacity(),
            elements.capacity()
        );

        Ok(Self {
            null: NullTexture { texture: objects.white_texture, uv: [0.5, 0.5] },
            objects,
            font_textures: Vec::new(),
            vertices,
            elements,
            cmds: DrawCommands::new(),
            config,
        })
    }

    /// Deletes every GL object the device created, font atlases included.
    ///
    /// Fonts baked by this device must not be drawn afterwards.
    pub fn shutdown<G: GlApi + ?Sized>(self, gl: &G) {
        let Device { objects, font_textures, vertices, elements, config, .. } = self;

        for texture in &font_textures {
            gl.delete_texture(*texture);
        }
        objects.delete(gl);

        vertices.release(&config.allocator);
        elements.release(&config.allocator);
        log::debug!("menu device shut down ({} font textures released)", font_textures.len());
    }

    /// Reads a font file and bakes it. See [`Device::bake_font_memory`].
    pub fn bake_font<G: GlApi + ?Sized>(
        &mut self,
        gl: &G,
        path: impl AsRef<Path>,
        pixel_height: f32,
        ranges: &[GlyphRange],
    ) -> Result<Font, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| {
            log::warn!("failed to read font {}: {source}", path.display());
            FontError::Io { path: path.to_path_buf(), source }
        })?;
        self.bake_font_memory(gl, &bytes, pixel_height, ranges)
    }

    /// Bakes `ranges` of a TrueType/OpenType blob into a new atlas texture.
    ///
    /// The atlas lives until [`Device::shutdown`]. Its opaque custom region
    /// becomes the device's null texture, so untextured shapes and text can
    /// share draw calls.
    pub fn bake_font_memory<G: GlApi + ?Sized>(
        &mut self,
        gl: &G,
        bytes: &[u8],
        pixel_height: f32,
        ranges: &[GlyphRange],
    ) -> Result<Font, FontError> {
        let config = FontConfig::new(pixel_height, ranges);
        let allocator = self.config.allocator;

        let mut atlas = bake_atlas(bytes, &config, &allocator)
            .inspect_err(|e| log::warn!("font bake failed: {e}"))?;

        let uploaded =
            upload_rgba(gl, atlas.width, atlas.height, &atlas.pixels, TextureFilter::MipmapNearest);
        allocator.free(std::mem::take(&mut atlas.pixels));
        let texture = uploaded.inspect_err(|e| log::warn!("font atlas upload failed: {e}"))?;

        self.font_textures.push(texture);
        self.null = NullTexture { texture, uv: atlas.null_uv() };

        log::info!(
            "baked {} glyphs at {pixel_height}px into {}x{} atlas (texture {})",
            atlas.glyphs.len(),
            atlas.width,
            atlas.height,
            texture.0
        );
        Ok(Font::from_atlas(atlas, texture, config.fallback))
    }

    /// Converts and draws `queue`, then clears it.
    ///
    /// `width`/`height` are the framebuffer size in pixels. The caller's GL
    /// state is restored before returning.
    pub fn draw<G: GlApi + ?Sized>(
        &mut self,
        gl: &G,
        queue: &mut CommandQueue,
        width: u32,
        height: u32,
        aa: AntiAliasing,
    ) -> FrameStats {
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            log::trace!("zero-sized viewport, dropping {} queued shapes", queue.len());
            queue.clear();
            return FrameStats::default();
        }

        let _guard = GlStateGuard::save(gl);
        self.begin_frame(gl, viewport);

        let config = ConvertConfig {
            global_alpha: self.config.global_alpha,
            shape_aa: aa,
            line_aa: aa,
            circle_segment_count: self.config.circle_segment_count,
            null: self.null,
        };
        let converted =
            convert(queue, &mut self.cmds, &mut self.vertices, &mut self.elements, &config);

        gl.buffer_sub_data(glow::ARRAY_BUFFER, 0, self.vertices.as_bytes());
        gl.buffer_sub_data(glow::ELEMENT_ARRAY_BUFFER, 0, self.elements.as_bytes());

        let submitted = submit_commands(gl, &self.cmds, viewport.height);

        queue.clear();
        self.cmds.clear();

        FrameStats {
            draw_calls: submitted.draw_calls,
            elements: submitted.elements,
            vertices: converted.vertices,
            overflow: converted.overflow,
        }
    }

    fn begin_frame<G: GlApi + ?Sized>(&self, gl: &G, viewport: Viewport) {
        let objects = &self.objects;

        gl.set_enabled(glow::BLEND, true);
        gl.blend_equation_separate(glow::FUNC_ADD, glow::FUNC_ADD);
        gl.blend_func_separate(
            glow::SRC_ALPHA,
            glow::ONE_MINUS_SRC_ALPHA,
            glow::SRC_ALPHA,
            glow::ONE_MINUS_SRC_ALPHA,
        );
        gl.set_enabled(glow::SCISSOR_TEST, true);
        gl.set_enabled(glow::CULL_FACE, false);
        gl.set_enabled(glow::DEPTH_TEST, false);

        gl.active_texture(glow::TEXTURE0);
        gl.use_program(objects.program.program);
        let projection = ortho_projection(viewport.width as f32, viewport.height as f32);
        gl.uniform_matrix4(objects.uniform_proj, &projection);
        if let Some(sampler) = objects.uniform_texture {
            gl.uniform_i32(sampler, 0);
        }

        gl.bind_vertex_array(objects.vao);
        gl.bind_buffer(glow::ARRAY_BUFFER, objects.vbo);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, objects.ebo);

        // Orphan last frame's storage so the driver need not wait on it.
        gl.buffer_data_size(glow::ARRAY_BUFFER, self.vertices.budget(), glow::STREAM_DRAW);
        gl.buffer_data_size(glow::ELEMENT_ARRAY_BUFFER, self.elements.budget(), glow::STREAM_DRAW);
    }

    /// Texture and texel used for untextured primitives.
    #[inline]
    pub fn null_texture(&self) -> NullTexture {
        self.null
    }

    /// Atlas textures of every font baked so far, oldest first.
    #[inline]
    pub fn font_textures(&self) -> &[TextureId] {
        &self.font_textures
    }

    #[inline]
    pub fn white_texture(&self) -> TextureId {
        self.objects.white_texture
    }

    /// Locations of `Position`, `TexCoord` and `Color`.
    #[inline]
    pub fn attribute_locations(&self) -> [u32; 3] {
        self.objects.attributes
    }

    #[inline]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Vertex buffer, element buffer and vertex array names.
    #[inline]
    pub fn buffers(&self) -> (BufferId, BufferId, VertexArrayId) {
        (self.objects.vbo, self.objects.ebo, self.objects.vao)
    }
}
