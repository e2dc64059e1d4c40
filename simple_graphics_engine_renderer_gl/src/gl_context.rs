/// glutin context and window surface owned by the OpenGL device

use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::window::Window;

use simple_graphics_engine::sge::Result;
use simple_graphics_engine::{engine_err, engine_info, engine_warn};

const SOURCE: &str = "sge::GlContext";

/// Requested context version (core profile)
const GL_VERSION: Version = Version::new(4, 1);

pub(crate) struct GlContext {
    pub(crate) gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
}

impl GlContext {
    /// Create a GL 4.1 core context with a depth buffer for `window` and make
    /// it current, with vsync on
    pub(crate) fn new(window: &Window) -> Result<Self> {
        let raw_display = window
            .display_handle()
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "No display handle: {}", e))?
            .as_raw();
        let raw_window = window
            .window_handle()
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "No window handle: {}", e))?
            .as_raw();

        let display = unsafe { Display::new(raw_display, display_preference(raw_window)) }
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "Failed to open GL display: {}", e))?;

        let config = select_config(&display, raw_window)?;
        engine_info!(
            SOURCE,
            "GL config: {} depth bits, {} samples",
            config.depth_size(),
            config.num_samples()
        );

        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(GL_VERSION)))
            .build(Some(raw_window));
        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "Failed to create GL context: {}", e))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "Invalid window surface: {}", e))?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "Failed to create GL surface: {}", e))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| engine_err!(InitializationFailed, SOURCE, "Failed to make GL context current: {}", e))?;

        if let Err(err) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            engine_warn!(SOURCE, "Vsync unavailable: {}", err);
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        Ok(Self {
            gl,
            surface,
            context,
        })
    }

    pub(crate) fn swap_buffers(&self) {
        if let Err(err) = self.surface.swap_buffers(&self.context) {
            engine_warn!(SOURCE, "Buffer swap failed: {}", err);
        }
    }

    /// Resize the window surface, ignored for a zero-sized (minimized) window
    pub(crate) fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, width, height);
        }
    }
}

/// First config with a 24-bit depth buffer, preferring the fewest samples
fn select_config(display: &Display, raw_window: RawWindowHandle) -> Result<Config> {
    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(24)
        .compatible_with_native_window(raw_window)
        .build();

    let configs = unsafe { display.find_configs(template) }
        .map_err(|e| engine_err!(InitializationFailed, SOURCE, "No GL config: {}", e))?;
    configs
        .min_by_key(|config| config.num_samples())
        .ok_or_else(|| engine_err!(InitializationFailed, SOURCE, "No GL config matches the window"))
}

#[cfg(target_os = "windows")]
fn display_preference(raw_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Wgl(Some(raw_window))
}

#[cfg(target_os = "macos")]
fn display_preference(_raw_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn display_preference(_raw_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}
