/// RenderContext: explicit GPU state handed to every render operation
///
/// Owns the device together with the engine-side state that has to survive
/// between frames: the cached size of the window framebuffer (restored by
/// `use_targets` when rendering goes back to the window) and per-frame
/// statistics.

use crate::device::{GraphicsDevice, ProgramHandle, UniformValue, Viewport};
use crate::engine_trace;

/// Largest extent accepted when refreshing the window framebuffer cache
const MAX_FRAMEBUFFER_EXTENT: i32 = 65536;

/// Counters for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub triangles: u32,
    /// Uniform uploads skipped because the program has no such uniform
    pub missing_uniforms: u32,
}

pub struct RenderContext {
    device: Box<dyn GraphicsDevice>,
    default_framebuffer_size: (i32, i32),
    stats: FrameStats,
}

impl RenderContext {
    pub fn new(device: Box<dyn GraphicsDevice>) -> Self {
        let (width, height) = device.drawable_size();
        Self {
            device,
            default_framebuffer_size: (width as i32, height as i32),
            stats: FrameStats::default(),
        }
    }

    pub fn device(&self) -> &dyn GraphicsDevice {
        self.device.as_ref()
    }

    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.device.as_mut()
    }

    /// Current viewport of the device
    pub fn viewport(&self) -> Viewport {
        self.device.viewport()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Reset the per-frame counters
    pub fn begin_frame(&mut self) {
        self.stats = FrameStats::default();
    }

    /// Upload `value` to the uniform `name` of `program`
    ///
    /// A program without that uniform is not an error: the upload is skipped
    /// and counted in `FrameStats::missing_uniforms`.
    pub fn upload_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        match self.device.uniform_location(program, name) {
            Some(location) => self.device.set_uniform(location, value),
            None => {
                self.stats.missing_uniforms += 1;
                engine_trace!(
                    "sge::RenderContext",
                    "Uniform '{}' not found in program {}",
                    name,
                    program.raw()
                );
            }
        }
    }

    pub(crate) fn record_draw(&mut self, index_count: u32) {
        self.stats.draw_calls += 1;
        self.stats.triangles += index_count / 3;
    }

    // ===== WINDOW FRAMEBUFFER CACHE =====

    /// Last known size of the window framebuffer
    pub fn default_framebuffer_size(&self) -> (i32, i32) {
        self.default_framebuffer_size
    }

    /// Viewport covering the cached window framebuffer size
    pub fn default_viewport(&self) -> Viewport {
        let (width, height) = self.default_framebuffer_size;
        Viewport::from_size(width, height)
    }

    /// Record the window framebuffer size explicitly (after a resize)
    pub fn update_default_framebuffer_size(&mut self, width: i32, height: i32) {
        self.default_framebuffer_size = (width, height);
    }

    /// Refresh the cache from the device viewport, only while the window
    /// framebuffer is bound and the viewport extent is plausible
    pub fn refresh_default_framebuffer_size(&mut self) {
        if self.device.bound_framebuffer().is_some() {
            return;
        }
        let viewport = self.device.viewport();
        let plausible = |extent: i32| extent > 0 && extent < MAX_FRAMEBUFFER_EXTENT;
        if plausible(viewport.width) && plausible(viewport.height) {
            self.default_framebuffer_size = (viewport.width, viewport.height);
        }
    }
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
