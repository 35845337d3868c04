use gl::types::*;
use glam::Mat4;
use std::collections::HashMap;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::Path;
use std::ptr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("program linking failed: {0}")]
    Linking(String),
    #[error("program validation failed: {0}")]
    Validation(String),
    #[error("shader source contains a null byte: {0}")]
    Nul(#[from] NulError),
}

/// The two pipeline stages a program is linked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vertex and fragment source text, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Reads both source files. A missing or unreadable path yields an empty
    /// blob rather than an error; the empty source then fails compilation
    /// with a proper driver diagnostic instead of aborting the load here.
    pub fn load(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> Self {
        Self {
            vertex: read_lines_or_empty(vertex_path.as_ref()),
            fragment: read_lines_or_empty(fragment_path.as_ref()),
        }
    }

    pub fn from_parts(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

fn read_lines_or_empty(path: &Path) -> String {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("could not read shader source {}: {}", path.display(), e);
            return String::new();
        }
    };

    // Rejoin line by line so every line, including the last, ends in '\n'.
    let mut text = String::with_capacity(bytes.len() + 1);
    for line in String::from_utf8_lossy(&bytes).lines() {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// A compiled stage object, alive until it has been linked into a program.
/// The driver reference-counts attachment, so dropping after link is safe.
pub struct CompiledStage {
    id: GLuint,
    stage: ShaderStage,
}

impl CompiledStage {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for CompiledStage {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// Compiles one stage, returning the live handle or the driver's diagnostic.
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<CompiledStage, ShaderError> {
    let c_source = CString::new(source.as_bytes())?;

    let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
    unsafe {
        gl::ShaderSource(shader, 1, &c_source.as_ptr(), ptr::null());
        gl::CompileShader(shader);
    }

    let mut status = 1;
    unsafe {
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    }

    if status == 0 {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        }

        let buffer = create_whitespace_cstring_with_len(len as usize);
        unsafe {
            gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
            gl::DeleteShader(shader);
        }

        let log = buffer.to_string_lossy().into_owned();
        log::error!("failed to compile {} shader: {}", stage, log.trim_end());
        return Err(ShaderError::Compilation { stage, log });
    }

    Ok(CompiledStage { id: shader, stage })
}

/// A linked and validated program object.
pub struct ShaderProgram {
    id: GLuint,
    uniforms: HashMap<String, GLint>,
}

impl ShaderProgram {
    /// Loads both source files and builds the program. See
    /// [`ShaderSource::load`] for how unreadable paths degrade.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Self::from_source(&ShaderSource::load(vertex_path, fragment_path))
    }

    /// Compiles both stages, links them, and validates the result. Fails
    /// fast on the first stage that does not compile; an invalid stage
    /// handle is never attached. Link and validate status are both
    /// inspected, with the driver log carried in the error.
    pub fn from_source(source: &ShaderSource) -> Result<Self, ShaderError> {
        let vertex = compile_stage(ShaderStage::Vertex, &source.vertex)?;
        let fragment = compile_stage(ShaderStage::Fragment, &source.fragment)?;

        let program = unsafe { gl::CreateProgram() };
        unsafe {
            gl::AttachShader(program, vertex.id());
            gl::AttachShader(program, fragment.id());
            gl::LinkProgram(program);
        }

        let mut status = 1;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        if status == 0 {
            let log = program_info_log(program);
            unsafe {
                gl::DeleteProgram(program);
            }
            log::error!("failed to link shader program: {}", log.trim_end());
            return Err(ShaderError::Linking(log));
        }

        unsafe {
            gl::ValidateProgram(program);
        }
        let mut status = 1;
        unsafe {
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status);
        }
        if status == 0 {
            let log = program_info_log(program);
            unsafe {
                gl::DeleteProgram(program);
            }
            log::error!("shader program failed validation: {}", log.trim_end());
            return Err(ShaderError::Validation(log));
        }

        Ok(Self {
            id: program,
            uniforms: HashMap::new(),
        })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    pub fn uniform_location(&mut self, name: &str) -> GLint {
        if let Some(location) = self.uniforms.get(name) {
            return *location;
        }

        let location = match CString::new(name) {
            Ok(cname) => unsafe { gl::GetUniformLocation(self.id, cname.as_ptr()) },
            Err(_) => -1,
        };

        if location == -1 {
            log::warn!("uniform '{}' not found in shader", name);
        }

        self.uniforms.insert(name.to_string(), location);
        location
    }

    pub fn set_uniform_mat4(&mut self, name: &str, mat: &Mat4) {
        self.bind();
        let location = self.uniform_location(name);
        let values = mat.to_cols_array();
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, values.as_ptr());
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }

    let buffer = create_whitespace_cstring_with_len(len as usize);
    unsafe {
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buffer.as_ptr() as *mut GLchar);
    }
    buffer.to_string_lossy().into_owned()
}

fn create_whitespace_cstring_with_len(len: usize) -> CString {
    let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
    buffer.extend([b' '].iter().cycle().take(len));
    unsafe { CString::from_vec_unchecked(buffer) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_joins_lines_with_single_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("basic.vert");
        let frag = dir.path().join("basic.frag");
        // No trailing newline in the vertex file; the loader adds one.
        fs::write(&vert, "#version 330 core\nvoid main() {}").unwrap();
        fs::write(&frag, "out vec4 color;\nvoid main() {}\n").unwrap();

        let source = ShaderSource::load(&vert, &frag);
        assert_eq!(source.vertex, "#version 330 core\nvoid main() {}\n");
        assert_eq!(source.vertex.lines().count(), 2);
        assert_eq!(source.fragment, "out vec4 color;\nvoid main() {}\n");
        assert_eq!(source.fragment.lines().count(), 2);
    }

    #[test]
    fn load_normalizes_crlf_endings() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("crlf.vert");
        let frag = dir.path().join("crlf.frag");
        fs::write(&vert, "a\r\nb\r\n").unwrap();
        fs::write(&frag, "").unwrap();

        let source = ShaderSource::load(&vert, &frag);
        assert_eq!(source.vertex, "a\nb\n");
    }

    #[test]
    fn missing_path_yields_empty_text_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let frag = dir.path().join("present.frag");
        fs::write(&frag, "void main() {}\n").unwrap();

        let source = ShaderSource::load(dir.path().join("absent.vert"), &frag);
        assert!(source.vertex.is_empty());
        assert_eq!(source.fragment, "void main() {}\n");
    }

    #[test]
    fn empty_file_loads_as_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("empty.vert");
        fs::write(&vert, "").unwrap();

        let source = ShaderSource::load(&vert, dir.path().join("also-absent.frag"));
        assert!(source.vertex.is_empty());
        assert!(source.fragment.is_empty());
    }

    #[test]
    fn stage_names_match_diagnostic_wording() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn compilation_error_carries_stage_and_log() {
        let err = ShaderError::Compilation {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error, unexpected '}'".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment"));
        assert!(message.contains("syntax error"));
    }

    #[test]
    fn info_log_buffer_is_sized_exactly() {
        let buffer = create_whitespace_cstring_with_len(16);
        assert_eq!(buffer.as_bytes().len(), 16);
    }
}
