/// Engine driver: configuration, device plugins, frame timing and main loop

mod config;
mod engine;
mod frame_clock;
mod plugins;
mod runner;

pub use config::EngineConfig;
pub use engine::{App, Engine, SceneRoots};
pub use frame_clock::{FrameClock, FrameTime};
pub use plugins::{DeviceFactory, DevicePlugins, HEADLESS_BACKEND};
pub use runner::run;
