//! GPU driver interface
//!
//! `GraphicsDevice` abstracts the immediate-mode GPU state machine. Real
//! backends live outside this crate and are registered with
//! `engine::DevicePlugins`; `HeadlessDevice` is the in-memory implementation
//! used for tests and for running without a GPU.

pub mod types;
pub mod graphics_device;
pub mod headless;

pub use types::*;
pub use graphics_device::GraphicsDevice;
pub use headless::{DeviceCommand, HeadlessDevice, LiveObjects};
