//! Integration tests for the engine driver
//!
//! A small model viewer runs against a `HeadlessDevice`: the scene is drawn
//! into an off-screen target, then composited on the window.
//!
//! Run with: cargo test --test engine_integration_tests


use simple_graphics_engine::glam::{Mat4, Vec4};
use simple_graphics_engine::sge::device::{
    DeviceCommand, GraphicsDevice, HeadlessDevice, ProgramHandle, TextureTarget, Viewport,
};
use simple_graphics_engine::sge::resource::{MeshData, ShaderSources};
use simple_graphics_engine::sge::scene::NodeKey;
use simple_graphics_engine::sge::target::{OffscreenTarget, RenderTarget};
use simple_graphics_engine::sge::{App, Engine, EngineConfig, Result};
use test_utils::scene_shader;

struct ModelViewer {
    program: ProgramHandle,
    composite: ProgramHandle,
    model: Option<NodeKey>,
    target: Option<RenderTarget>,
    angle: f32,
    resized_to: Option<(u32, u32)>,
}

impl ModelViewer {
    fn new() -> Self {
        Self {
            program: ProgramHandle::NULL,
            composite: ProgramHandle::NULL,
            model: None,
            target: None,
            angle: 0.0,
            resized_to: None,
        }
    }
}

impl App for ModelViewer {
    fn setup(&mut self, engine: &mut Engine) -> Result<()> {
        self.program = engine.load_program("phong", &scene_shader());
        self.composite = engine.load_program(
            "composite",
            &ShaderSources::new("void main() {}", "uniform sampler2D scene;\nvoid main() {}"),
        );
        let scene = engine.roots().scene;
        self.model = Some(engine.add_mesh(scene, &MeshData::cube())?);
        self.target = Some(RenderTarget::with_method(engine.context_mut(), 256, 256, 1)?);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, dt: f32) {
        self.angle += dt;
        let rig = engine.roots().camera_rig;
        engine.tree_mut().set_transform(rig, Mat4::from_rotation_y(self.angle));
    }

    fn render(&mut self, engine: &mut Engine) {
        let Some(target) = self.target.as_ref() else {
            return;
        };
        RenderTarget::use_fbo(engine.context_mut(), Some(target), None, None);
        let scene = engine.roots().scene;
        engine.render_root(scene, self.program);

        RenderTarget::use_fbo(engine.context_mut(), None, Some(target), None);
        engine.context_mut().device_mut().use_program(self.composite);
    }

    fn resized(&mut self, _engine: &mut Engine, width: u32, height: u32) {
        self.resized_to = Some((width, height));
    }
}

fn start() -> (Engine, HeadlessDevice, ModelViewer) {
    let config = EngineConfig::default();
    let device = HeadlessDevice::new(config.width, config.height);
    let mut engine = Engine::new(config, Box::new(device.clone())).unwrap();
    let mut app = ModelViewer::new();
    app.setup(&mut engine).unwrap();
    (engine, device, app)
}

// ============================================================================
// FRAME LOOP
// ============================================================================

#[test]
fn test_integration_model_viewer_frame() {
    let (mut engine, device, mut app) = start();
    assert!(!app.program.is_null());
    assert!(!app.composite.is_null());
    assert!(app.target.as_ref().is_some_and(|t| t.is_complete()));

    device.take_commands();
    engine.tick(&mut app);

    let commands = device.take_commands();
    let draws = commands
        .iter()
        .filter(|c| matches!(c, DeviceCommand::DrawElements { .. }))
        .count();
    assert_eq!(draws, 1);
    assert_eq!(commands.first(), Some(&DeviceCommand::BindFramebuffer(None)));
    assert_eq!(commands.last(), Some(&DeviceCommand::Present));

    // Back on the window with the scene texture bound for the composite pass
    let target = app.target.as_ref().unwrap();
    assert_eq!(device.bound_framebuffer(), None);
    assert_eq!(device.viewport(), Viewport::new(0, 0, 720, 480));
    assert_eq!(device.bound_texture(0, TextureTarget::Texture2D), Some(target.color_texture()));
    assert_eq!(device.current_program(), app.composite);
}

#[test]
fn test_integration_scene_rendered_at_target_size() {
    let (mut engine, device, mut app) = start();
    device.take_commands();
    engine.tick(&mut app);

    let commands = device.commands();
    let draw_index = commands
        .iter()
        .position(|c| matches!(c, DeviceCommand::DrawElements { .. }))
        .unwrap();
    let viewport_before_draw = commands[..draw_index]
        .iter()
        .rev()
        .find_map(|c| match c {
            DeviceCommand::SetViewport(v) => Some(*v),
            _ => None,
        });
    assert_eq!(viewport_before_draw, Some(Viewport::new(0, 0, 256, 256)));
}

#[test]
fn test_integration_resize_reaches_app_and_camera() {
    let (mut engine, _device, mut app) = start();

    engine.resize(1280, 720);
    app.resized(&mut engine, 1280, 720);
    engine.tick(&mut app);

    assert_eq!(app.resized_to, Some((1280, 720)));
    assert_eq!(engine.context().default_framebuffer_size(), (1280, 720));

    // The camera renders inside the 256x256 target
    let camera_key = engine.roots().main_camera;
    let camera = engine.tree().node(camera_key).and_then(|n| n.camera()).unwrap();
    assert!((camera.aspect() - 1.0).abs() < 1e-6);
}

#[test]
fn test_integration_frames_counted() {
    let (mut engine, device, mut app) = start();
    for _ in 0..3 {
        engine.tick(&mut app);
    }
    assert_eq!(device.presented_frames(), 3);
    assert_eq!(engine.last_frame().map(|f| f.frame_index), Some(2));
}

#[test]
fn test_integration_shutdown_releases_gpu_objects() {
    let (mut engine, device, mut app) = start();
    engine.tick(&mut app);

    if let Some(target) = app.target.take() {
        target.destroy(engine.context_mut());
    }
    engine.shutdown();

    let live = device.live_objects();
    assert_eq!(live.programs, 0);
    assert_eq!(live.buffers, 0);
    assert_eq!(live.vertex_arrays, 0);
    assert_eq!(live.textures, 0);
    assert_eq!(live.framebuffers, 0);
    assert_eq!(device.clear_color(), Vec4::new(0.0, 0.0, 0.0, 1.0));
}
