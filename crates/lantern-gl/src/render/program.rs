use crate::error::{RendererError, ShaderStage};
use crate::gl::GlApi;

use super::shaders::ShaderSources;

/// Linked program plus the two shader objects it was built from.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub(crate) struct ShaderProgram {
    pub program: u32,
    pub vertex: u32,
    pub fragment: u32,
}

impl ShaderProgram {
    /// Compiles both stages and links them.
    ///
    /// On any failure every object created here is deleted before returning.
    pub fn build<G: GlApi + ?Sized>(gl: &G, sources: &ShaderSources) -> Result<Self, RendererError> {
        let vertex = compile(gl, ShaderStage::Vertex, &sources.vertex)?;
        let fragment = match compile(gl, ShaderStage::Fragment, &sources.fragment) {
            Ok(f) => f,
            Err(e) => {
                gl.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = match gl.create_program() {
            Ok(p) => p,
            Err(reason) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(RendererError::resource("shader program", reason));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            log::error!("shader program link failed:\n{log}");
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            gl.delete_program(program);
            return Err(RendererError::ProgramLink { log });
        }

        Ok(Self {
            program,
            vertex,
            fragment,
        })
    }

    /// Detaches and deletes the shaders, then deletes the program.
    pub fn delete<G: GlApi + ?Sized>(&self, gl: &G) {
        gl.detach_shader(self.program, self.vertex);
        gl.detach_shader(self.program, self.fragment);
        gl.delete_shader(self.vertex);
        gl.delete_shader(self.fragment);
        gl.delete_program(self.program);
    }
}

fn compile<G: GlApi + ?Sized>(gl: &G, stage: ShaderStage, source: &str) -> Result<u32, RendererError> {
    let shader = gl
        .create_shader(stage.gl_enum())
        .map_err(|reason| RendererError::resource("shader", reason))?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        log::error!("{stage} shader compile failed:\n{log}");
        gl.delete_shader(shader);
        return Err(RendererError::ShaderCompile { stage, log });
    }

    Ok(shader)
}
