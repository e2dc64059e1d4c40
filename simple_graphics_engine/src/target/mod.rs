//! Offscreen render targets (2D and 3D) and pass input/output switching

mod offscreen;
mod render_target;
mod volume_render_target;

pub use crate::device::FilterMode;
pub use offscreen::{use_targets, OffscreenTarget};
pub use render_target::RenderTarget;
pub use volume_render_target::VolumeRenderTarget;
