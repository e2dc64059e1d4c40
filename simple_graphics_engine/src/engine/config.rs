/// Engine configuration

use glam::Vec4;

/// Window and pipeline settings read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Window title
    pub title: String,
    /// Initial window width in logical pixels
    pub width: u32,
    /// Initial window height in logical pixels
    pub height: u32,
    /// Name of the device plugin creating the GPU device
    pub backend: String,
    pub clear_color: Vec4,
    /// Depth test with the LESS comparison
    pub depth_test: bool,
    /// Back-face culling
    pub cull_faces: bool,
    /// Alpha blending (SRC_ALPHA, ONE_MINUS_SRC_ALPHA)
    pub blending: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Model Viewer".to_string(),
            width: 720,
            height: 480,
            backend: "headless".to_string(),
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            depth_test: true,
            cull_faces: true,
            blending: true,
        }
    }
}
