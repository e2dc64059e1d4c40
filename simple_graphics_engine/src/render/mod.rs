//! Render context shared by every draw and target operation

mod render_context;

pub use render_context::{FrameStats, RenderContext};
