/*!
# Simple Graphics Engine

A small scene-graph renderer for OpenGL-style devices.

The engine never talks to a graphics API directly: every GPU call goes
through the [`GraphicsDevice`](device::GraphicsDevice) trait. Backends
register a factory with [`DevicePlugins`](engine::DevicePlugins); the
built-in [`HeadlessDevice`](device::HeadlessDevice) tracks the full device
state in memory and can record every call, which is what the test-suite
runs against. The OpenGL backend lives in the
`simple_graphics_engine_renderer_gl` crate.

## Architecture

- **Device**: `GraphicsDevice` trait, handles, fixed-function state
- **Render**: `RenderContext` (device + window framebuffer cache + stats)
- **Resource**: shader sources, program registry, mesh data and GPU meshes
- **Scene**: render tree of groups, meshes, cameras and lights
- **Target**: 2D and 3D off-screen render targets and `use_fbo`
- **Engine**: configuration, frame loop and winit window runner
*/

// Internal modules
mod error;
pub mod log;
pub mod device;
pub mod render;
pub mod resource;
pub mod scene;
pub mod target;
pub mod engine;

// Main sge namespace module
pub mod sge {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine driver
    pub use crate::engine::{run, App, DevicePlugins, Engine, EngineConfig, SceneRoots};

    // Logging sub-module (engine_* macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    pub mod device {
        pub use crate::device::*;
    }

    pub mod render {
        pub use crate::render::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod target {
        pub use crate::target::*;
    }
}

// Re-export math library at crate root
pub use glam;
