/// Windowed main loop (winit 0.30 application handler)

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::error::{Error, Result};
use crate::{engine_err, engine_error, engine_info};
use super::config::EngineConfig;
use super::engine::{App, Engine};
use super::plugins::DevicePlugins;

/// Open a window, create the configured device and drive `app` until the
/// window closes
///
/// # Returns
///
/// The first error raised while creating the window, the device, the engine
/// or by `App::setup`. Errors stop the loop.
pub fn run<A: App + 'static>(config: EngineConfig, plugins: DevicePlugins, app: A) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| {
        engine_err!(InitializationFailed, "sge::run", "Failed to create event loop: {}", e)
    })?;

    let mut runner = Runner {
        config,
        plugins,
        app,
        engine: None,
        window: None,
        error: None,
    };

    event_loop.run_app(&mut runner).map_err(|e| {
        engine_err!(BackendError, "sge::run", "Event loop terminated with error: {}", e)
    })?;

    match runner.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Runner<A: App> {
    config: EngineConfig,
    plugins: DevicePlugins,
    app: A,
    // Dropped before the window it renders to
    engine: Option<Engine>,
    window: Option<Window>,
    error: Option<Error>,
}

impl<A: App> Runner<A> {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = event_loop.create_window(attributes).map_err(|e| {
            engine_err!(InitializationFailed, "sge::run", "Failed to create window: {}", e)
        })?;

        let device = self.plugins.create(&self.config.backend, &window, &self.config)?;
        let mut engine = Engine::new(self.config.clone(), device)?;
        self.app.setup(&mut engine)?;

        self.window = Some(window);
        self.engine = Some(engine);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        engine_error!("sge::run", "Stopping: {}", err);
        self.shutdown();
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn shutdown(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.shutdown();
        }
    }
}

impl<A: App> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                engine_info!("sge::run", "Window close requested");
                engine.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
                self.app.resized(engine, size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                engine.tick(&mut self.app);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
