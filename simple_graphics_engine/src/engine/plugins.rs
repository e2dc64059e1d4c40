/// Device plugin registry: backend name → device factory
///
/// GPU backends live outside the engine and register a factory under their
/// name. `EngineConfig::backend` selects the factory when the window opens.

use rustc_hash::FxHashMap;
use winit::window::Window;

use crate::device::{GraphicsDevice, HeadlessDevice};
use crate::engine_err;
use crate::error::Result;
use super::config::EngineConfig;

/// Device factory function type
pub type DeviceFactory = Box<dyn Fn(&Window, &EngineConfig) -> Result<Box<dyn GraphicsDevice>>>;

/// Name of the always-available in-memory backend
pub const HEADLESS_BACKEND: &str = "headless";

pub struct DevicePlugins {
    factories: FxHashMap<String, DeviceFactory>,
}

impl Default for DevicePlugins {
    /// Registry with the headless backend registered
    fn default() -> Self {
        let mut plugins = Self::empty();
        plugins.register(HEADLESS_BACKEND, |window, _config| {
            let size = window.inner_size();
            Ok(Box::new(windowed_headless_device(size.width, size.height)) as Box<dyn GraphicsDevice>)
        });
        plugins
    }
}

/// Headless device driven by a window loop: nothing inspects its calls, so
/// recording is off
pub(crate) fn windowed_headless_device(width: u32, height: u32) -> HeadlessDevice {
    let device = HeadlessDevice::new(width, height);
    device.set_recording(false);
    device
}

impl DevicePlugins {
    /// Registry without any backend
    pub fn empty() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a backend, replacing any factory with the same name
    ///
    /// # Arguments
    ///
    /// * `name` - Backend name (e.g., "opengl")
    /// * `factory` - Creates the device for a window
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&Window, &EngineConfig) -> Result<Box<dyn GraphicsDevice>> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered backend names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Factory registered under `name`
    ///
    /// # Returns
    ///
    /// `Error::InitializationFailed` if no backend has that name
    pub fn factory(&self, name: &str) -> Result<&DeviceFactory> {
        self.factories.get(name).ok_or_else(|| {
            engine_err!(InitializationFailed, "sge::DevicePlugins",
                "Device plugin '{}' not found (registered: {})", name, self.names().join(", "))
        })
    }

    /// Create the device of backend `name` for `window`
    pub fn create(
        &self,
        name: &str,
        window: &Window,
        config: &EngineConfig,
    ) -> Result<Box<dyn GraphicsDevice>> {
        let factory = self.factory(name)?;
        factory(window, config)
    }
}

#[cfg(test)]
#[path = "plugins_tests.rs"]
mod tests;
