use glam::{Mat4, Vec2};

/// 2D camera for the demo scene. `zoom` is inverse view height; 1.0 shows
/// the world range [-1, 1] vertically regardless of window size.
#[derive(Debug, Clone, Copy)]
pub struct Camera2d {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for Camera2d {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera2d {
    pub fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    /// Aspect-correct orthographic view-projection for the given viewport.
    pub fn view_projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let half_height = 1.0 / self.zoom;
        let half_width = half_height * aspect;

        let projection = Mat4::orthographic_rh_gl(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -1.0,
            1.0,
        );
        let view = Mat4::from_translation((-self.position).extend(0.0));
        projection * view
    }
}
