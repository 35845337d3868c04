use anyhow::{Context, Result};

use crate::config::ShaderConfig;
use crate::render::camera::Camera2d;
use crate::render::geometry::TriangleMesh;
use crate::render::shader::ShaderProgram;

/// Everything the frame loop needs to draw: the program, the geometry, the
/// camera, and the current viewport size. Owned by the main loop and passed
/// by reference to resize and draw.
pub struct RenderContext {
    program: ShaderProgram,
    mesh: TriangleMesh,
    pub camera: Camera2d,
    viewport: (u32, u32),
}

impl RenderContext {
    /// Builds the shader program from the configured paths and uploads the
    /// triangle. Requires a current GL context.
    pub fn new(shaders: &ShaderConfig, width: u32, height: u32) -> Result<Self> {
        let program = ShaderProgram::from_files(&shaders.vertex_path, &shaders.fragment_path)
            .context("failed to build shader program")?;

        let context = Self {
            program,
            mesh: TriangleMesh::new(),
            camera: Camera2d::default(),
            viewport: (width, height),
        };
        context.apply_viewport();
        Ok(context)
    }

    /// Consumes a window resize event.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.apply_viewport();
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn apply_viewport(&self) {
        unsafe {
            gl::Viewport(0, 0, self.viewport.0 as i32, self.viewport.1 as i32);
        }
    }

    pub fn draw(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        let view_proj = self.camera.view_projection(self.viewport.0, self.viewport.1);
        self.program.set_uniform_mat4("u_view_proj", &view_proj);
        self.mesh.draw();
    }
}
