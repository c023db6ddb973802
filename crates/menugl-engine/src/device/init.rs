use crate::alloc::Allocator;

/// GLSL dialect the menu shaders are compiled as.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ShaderVersion {
    /// Desktop OpenGL 3.3 core.
    #[default]
    Gl330,
    /// OpenGL ES 3.0 / WebGL 2.
    Es300,
}

impl ShaderVersion {
    /// Source prefix prepended to both shader stages.
    pub const fn header(self) -> &'static str {
        match self {
            ShaderVersion::Gl330 => "#version 330 core\n",
            ShaderVersion::Es300 => "#version 300 es\nprecision mediump float;\n",
        }
    }
}

/// Initialization parameters for [`Device::init`](super::Device::init).
///
/// Keep this structure small. Budgets are fixed for the device's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    /// Vertex buffer budget in bytes.
    pub max_vertex_memory: usize,

    /// Index buffer budget in bytes.
    pub max_element_memory: usize,

    pub shader_version: ShaderVersion,

    /// Segments per full circle when tessellating circles and rounded corners.
    pub circle_segment_count: u32,

    /// Alpha multiplier applied to every vertex color.
    pub global_alpha: f32,

    /// Allocator for the scratch buffers and glyph atlas images.
    pub allocator: Allocator,
}

impl DeviceConfig {
    pub const DEFAULT_VERTEX_MEMORY: usize = 512 * 1024;
    pub const DEFAULT_ELEMENT_MEMORY: usize = 128 * 1024;
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_vertex_memory: Self::DEFAULT_VERTEX_MEMORY,
            max_element_memory: Self::DEFAULT_ELEMENT_MEMORY,
            shader_version: ShaderVersion::Gl330,
            circle_segment_count: 22,
            global_alpha: 1.0,
            allocator: Allocator::host(),
        }
    }
}
