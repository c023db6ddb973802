use crate::gl::{GlApi, ProgramId, ShaderId, ShaderStage};

use super::{DeviceError, ShaderVersion};

const VERTEX_BODY: &str = r#"
uniform mat4 ProjMtx;
in vec2 Position;
in vec2 TexCoord;
in vec4 Color;
out vec2 Frag_UV;
out vec4 Frag_Color;
void main() {
    Frag_UV = TexCoord;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy, 0.0, 1.0);
}
"#;

const FRAGMENT_BODY: &str = r#"
uniform sampler2D Texture;
in vec2 Frag_UV;
in vec4 Frag_Color;
out vec4 Out_Color;
void main() {
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}
"#;

pub(crate) fn source(stage: ShaderStage, version: ShaderVersion) -> String {
    let body = match stage {
        ShaderStage::Vertex => VERTEX_BODY,
        ShaderStage::Fragment => FRAGMENT_BODY,
    };
    format!("{}{body}", version.header())
}

/// Linked menu program with its two shaders still attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MenuProgram {
    pub program: ProgramId,
    pub vertex: ShaderId,
    pub fragment: ShaderId,
}

impl MenuProgram {
    /// Compiles both stages and links them.
    ///
    /// On failure every object created so far is deleted and the driver's
    /// info log is returned in the error.
    pub(crate) fn build<G: GlApi + ?Sized>(gl: &G, version: ShaderVersion) -> Result<Self, DeviceError> {
        let vertex = compile(gl, ShaderStage::Vertex, version)?;
        let fragment = compile(gl, ShaderStage::Fragment, version).inspect_err(|_| {
            gl.delete_shader(vertex);
        })?;

        let program = gl.create_program().map_err(|message| {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            DeviceError::Create { what: "program", message }
        })?;

        let built = Self { program, vertex, fragment };
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            log::error!("menu program failed to link: {log}");
            built.delete(gl);
            return Err(DeviceError::ProgramLink { log });
        }

        log::debug!("linked menu program {} ({version:?})", program.0);
        Ok(built)
    }

    pub(crate) fn delete<G: GlApi + ?Sized>(&self, gl: &G) {
        gl.detach_shader(self.program, self.vertex);
        gl.detach_shader(self.program, self.fragment);
        gl.delete_shader(self.vertex);
        gl.delete_shader(self.fragment);
        gl.delete_program(self.program);
    }
}

fn compile<G: GlApi + ?Sized>(
    gl: &G,
    stage: ShaderStage,
    version: ShaderVersion,
) -> Result<ShaderId, DeviceError> {
    let shader = gl
        .create_shader(stage)
        .map_err(|message| DeviceError::Create { what: "shader", message })?;
    gl.shader_source(shader, &source(stage, version));
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        log::error!("{stage} shader failed to compile: {log}");
        gl.delete_shader(shader);
        return Err(DeviceError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Kind, RecordingGl};

    #[test]
    fn sources_carry_version_header_and_names() {
        let es = source(ShaderStage::Fragment, ShaderVersion::Es300);
        assert!(es.starts_with("#version 300 es\nprecision mediump float;"));
        assert!(es.contains("uniform sampler2D Texture"));

        let vs = source(ShaderStage::Vertex, ShaderVersion::Gl330);
        assert!(vs.starts_with("#version 330 core"));
        for name in ["ProjMtx", "Position", "TexCoord", "Color"] {
            assert!(vs.contains(name), "missing {name}");
        }
    }

    #[test]
    fn fragment_failure_deletes_vertex_shader() {
        let gl = RecordingGl::failing_compile(ShaderStage::Fragment);
        let err = MenuProgram::build(&gl, ShaderVersion::Gl330).unwrap_err();
        assert!(matches!(err, DeviceError::ShaderCompile { stage: ShaderStage::Fragment, .. }));
        assert_eq!(gl.live_count(Kind::Shader), 0);
        assert_eq!(gl.live_count(Kind::Program), 0);
    }

    #[test]
    fn link_failure_deletes_everything() {
        let gl = RecordingGl::failing_link();
        let err = MenuProgram::build(&gl, ShaderVersion::Gl330).unwrap_err();
        match err {
            DeviceError::ProgramLink { log } => assert!(!log.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(gl.live_count(Kind::Shader), 0);
        assert_eq!(gl.live_count(Kind::Program), 0);
    }
}
