/*!
# Simple Graphics Engine - OpenGL Backend

OpenGL 4.1 core implementation of the engine's `GraphicsDevice`.

The context and window surface are created with glutin on top of the winit
window opened by the engine runner, and GL calls go through glow. The
backend registers itself as a device plugin named `"opengl"`:

```no_run
use simple_graphics_engine::sge::{DevicePlugins, EngineConfig};

let mut plugins = DevicePlugins::default();
simple_graphics_engine_renderer_gl::register(&mut plugins);

let config = EngineConfig {
    backend: simple_graphics_engine_renderer_gl::OPENGL_BACKEND.to_string(),
    ..EngineConfig::default()
};
```
*/

mod gl_context;
mod gl_device;
mod gl_format;

use simple_graphics_engine::device::GraphicsDevice;
use simple_graphics_engine::engine::DevicePlugins;

pub use gl_device::GlDevice;

/// Name the backend is registered under
pub const OPENGL_BACKEND: &str = "opengl";

/// Register the OpenGL backend with the device plugin registry
pub fn register(plugins: &mut DevicePlugins) {
    plugins.register(OPENGL_BACKEND, |window, config| {
        Ok(Box::new(GlDevice::new(window, config)?) as Box<dyn GraphicsDevice>)
    });
}

pub mod sge {
    pub use crate::gl_device::GlDevice;
    pub use crate::{register, OPENGL_BACKEND};
}
