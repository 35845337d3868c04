use gl::types::*;

// Three 2D positions, tightly packed.
const TRIANGLE_VERTICES: [f32; 6] = [
    -0.5, -0.5, //
    0.0, 0.5, //
    0.5, -0.5,
];

/// The fixed triangle: one VAO and one VBO, uploaded once at construction.
pub struct TriangleMesh {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLint,
}

impl TriangleMesh {
    pub fn new() -> Self {
        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (TRIANGLE_VERTICES.len() * std::mem::size_of::<f32>()) as isize,
                TRIANGLE_VERTICES.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // Position attribute
            gl::VertexAttribPointer(
                0,
                2,
                gl::FLOAT,
                gl::FALSE,
                2 * std::mem::size_of::<f32>() as i32,
                std::ptr::null(),
            );
            gl::EnableVertexAttribArray(0);

            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            vertex_count: 3,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
            gl::BindVertexArray(0);
        }
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TriangleMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}
