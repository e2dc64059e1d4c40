/// Camera node payload: projection kind and the matrix derived from it
///
/// The view matrix is the camera node's local transform. The projection is
/// recomputed from the viewport every time the camera is rendered, so a
/// resized window is picked up on the next frame.

use glam::{Mat4, Vec3};

use crate::device::{ProgramHandle, UniformValue, Viewport};
use crate::render::RenderContext;

/// Vertical field of view of perspective cameras, in degrees
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const PERSPECTIVE_NEAR: f32 = 0.1;
pub const PERSPECTIVE_FAR: f32 = 100.0;
/// Half of the vertical extent covered by orthographic cameras
pub const ORTHO_HALF_HEIGHT: f32 = 1.0;
pub const ORTHO_NEAR: f32 = -100.0;
pub const ORTHO_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    /// Covers `[-aspect, aspect] x [-1, 1]`
    Orthographic,
}

impl Projection {
    /// Projection matrix for a viewport of the given aspect ratio
    pub fn matrix(self, aspect: f32) -> Mat4 {
        match self {
            Projection::Perspective => Mat4::perspective_rh_gl(
                FOV_Y_DEGREES.to_radians(),
                aspect,
                PERSPECTIVE_NEAR,
                PERSPECTIVE_FAR,
            ),
            Projection::Orthographic => Mat4::orthographic_rh_gl(
                -aspect * ORTHO_HALF_HEIGHT,
                aspect * ORTHO_HALF_HEIGHT,
                -ORTHO_HALF_HEIGHT,
                ORTHO_HALF_HEIGHT,
                ORTHO_NEAR,
                ORTHO_FAR,
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    projection: Projection,
    aspect: f32,
    projection_matrix: Mat4,
}

impl Camera {
    pub fn new(projection: Projection, viewport: Viewport) -> Self {
        let aspect = viewport.aspect().unwrap_or(1.0);
        Self {
            projection,
            aspect,
            projection_matrix: projection.matrix(aspect),
        }
    }

    pub fn perspective(viewport: Viewport) -> Self {
        Self::new(Projection::Perspective, viewport)
    }

    pub fn orthographic(viewport: Viewport) -> Self {
        Self::new(Projection::Orthographic, viewport)
    }

    /// View matrix given to new camera nodes: eye at (0, 0, 3) looking down -Z
    pub fn default_view() -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Recompute the projection for `viewport`
    ///
    /// A degenerate viewport (minimized window) keeps the previous matrix.
    /// Returns true if the projection was recomputed.
    pub fn refresh(&mut self, viewport: Viewport) -> bool {
        let Some(aspect) = viewport.aspect() else {
            return false;
        };
        self.aspect = aspect;
        self.projection_matrix = self.projection.matrix(aspect);
        true
    }

    /// Upload `view` as `V` and the projection as `P`
    pub(crate) fn upload(&self, ctx: &mut RenderContext, program: ProgramHandle, view: Mat4) {
        ctx.device_mut().use_program(program);
        ctx.upload_uniform(program, "V", UniformValue::Mat4(view));
        ctx.upload_uniform(program, "P", UniformValue::Mat4(self.projection_matrix));
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
