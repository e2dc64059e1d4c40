/// Light node payload: intensity and color uploaded to the active program

use glam::Vec3;

use crate::device::{ProgramHandle, UniformValue};
use crate::render::RenderContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub intensity: f32,
    pub color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            intensity: 5.0,
            color: Vec3::ONE,
        }
    }
}

impl Light {
    pub fn new(intensity: f32, color: Vec3) -> Self {
        Self { intensity, color }
    }

    /// Upload `lightIntensity` and `lightColor`
    pub(crate) fn upload(&self, ctx: &mut RenderContext, program: ProgramHandle) {
        ctx.device_mut().use_program(program);
        ctx.upload_uniform(program, "lightIntensity", UniformValue::Float(self.intensity));
        ctx.upload_uniform(program, "lightColor", UniformValue::Vec3(self.color));
    }
}
