/// Unit tests for Engine

use glam::{Mat4, Vec4};

use crate::device::*;
use crate::engine::{App, Engine, EngineConfig};
use crate::resource::{MeshData, ShaderSources};
use crate::scene::{Camera, Projection};

fn engine() -> (Engine, HeadlessDevice) {
    engine_with(EngineConfig::default())
}

fn engine_with(config: EngineConfig) -> (Engine, HeadlessDevice) {
    let device = HeadlessDevice::new(config.width, config.height);
    let engine = Engine::new(config, Box::new(device.clone())).unwrap();
    (engine, device)
}

fn scene_shader() -> ShaderSources {
    ShaderSources::new(
        "uniform mat4 M;\nuniform mat4 V;\nuniform mat4 P;\nvoid main() {}",
        "uniform float lightIntensity;\nuniform vec3 lightColor;\nvoid main() {}",
    )
}

#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
    program: ProgramHandle,
}

impl App for Recorder {
    fn update(&mut self, _engine: &mut Engine, dt: f32) {
        assert!(dt >= 0.0);
        self.calls.push("update");
    }

    fn render(&mut self, engine: &mut Engine) {
        self.calls.push("render");
        if !self.program.is_null() {
            let scene = engine.roots().scene;
            engine.render_root(scene, self.program);
        }
    }
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_default_pipeline_state() {
    let (_engine, device) = engine();

    assert!(device.is_enabled(Capability::DepthTest));
    assert!(device.is_enabled(Capability::CullFace));
    assert!(device.is_enabled(Capability::Blend));
    assert_eq!(device.depth_func(), DepthFunc::Less);
    assert_eq!(device.blend_func(), (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
    assert_eq!(device.clear_color(), Vec4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_pipeline_state_follows_config() {
    let config = EngineConfig {
        depth_test: false,
        cull_faces: false,
        blending: false,
        clear_color: Vec4::new(0.2, 0.3, 0.4, 1.0),
        ..EngineConfig::default()
    };
    let (_engine, device) = engine_with(config);

    assert!(!device.is_enabled(Capability::DepthTest));
    assert!(!device.is_enabled(Capability::CullFace));
    assert!(!device.is_enabled(Capability::Blend));
    assert_eq!(device.clear_color(), Vec4::new(0.2, 0.3, 0.4, 1.0));
}

#[test]
fn test_standard_roots() {
    let (engine, _) = engine();
    let roots = engine.roots();
    let tree = engine.tree();

    assert_eq!(tree.len(), 6);
    assert_eq!(tree.children(roots.scene), &[roots.camera_rig]);
    assert_eq!(tree.children(roots.camera_rig), &[roots.main_camera]);
    assert_eq!(tree.children(roots.view_space), &[roots.view_space_camera_rig]);
    assert!(tree.children(roots.background_space).is_empty());

    let camera = tree.node(roots.main_camera).and_then(|n| n.camera()).unwrap();
    assert_eq!(camera.projection(), Projection::Perspective);
    assert!((camera.aspect() - 1.5).abs() < 1e-6);
    assert_eq!(tree.transform(roots.main_camera), Some(Camera::default_view()));
}

// ============================================================================
// Frame
// ============================================================================

#[test]
fn test_tick_prepares_window_and_presents() {
    let (mut engine, device) = engine();
    device.take_commands();

    let mut app = Recorder::default();
    let frame = engine.tick(&mut app);

    assert_eq!(frame.frame_index, 0);
    assert_eq!(app.calls, vec!["update", "render"]);
    assert_eq!(
        device.take_commands(),
        vec![
            DeviceCommand::BindFramebuffer(None),
            DeviceCommand::SetViewport(Viewport::new(0, 0, 720, 480)),
            DeviceCommand::Clear(ClearFlags::COLOR | ClearFlags::DEPTH),
            DeviceCommand::Present,
        ]
    );
    assert_eq!(device.presented_frames(), 1);

    let frame = engine.tick(&mut app);
    assert_eq!(frame.frame_index, 1);
    assert_eq!(engine.last_frame().map(|f| f.frame_index), Some(1));
}

#[test]
fn test_tick_follows_resized_surface() {
    let (mut engine, device) = engine();
    let mut app = Recorder::default();

    engine.resize(1000, 500);
    engine.tick(&mut app);

    assert_eq!(device.viewport(), Viewport::new(0, 0, 1000, 500));
    assert_eq!(engine.context().default_framebuffer_size(), (1000, 500));
}

#[test]
fn test_render_root_draws_scene() {
    let (mut engine, device) = engine();
    let program = engine.load_program("phong", &scene_shader());
    let scene = engine.roots().scene;
    engine.add_mesh(scene, &MeshData::cube()).unwrap();

    let mut app = Recorder { program, ..Recorder::default() };
    engine.tick(&mut app);

    let stats = engine.context().stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.triangles, 12);
    assert_eq!(device.uniform_value(program, "V"), Some(UniformValue::Mat4(Camera::default_view())));
    assert_eq!(device.uniform_value(program, "M"), Some(UniformValue::Mat4(Mat4::IDENTITY)));
}

#[test]
fn test_camera_aspect_follows_resize() {
    let (mut engine, _) = engine();
    let program = engine.load_program("phong", &scene_shader());
    let mut app = Recorder { program, ..Recorder::default() };

    engine.resize(500, 500);
    engine.tick(&mut app);

    let camera_key = engine.roots().main_camera;
    let camera = engine.tree().node(camera_key).and_then(|n| n.camera()).unwrap();
    assert!((camera.aspect() - 1.0).abs() < 1e-6);
}

// ============================================================================
// Resources
// ============================================================================

#[test]
fn test_program_lookup() {
    let (mut engine, _) = engine();
    let program = engine.load_program("phong", &scene_shader());

    assert_eq!(engine.program("phong"), program);
    assert_eq!(engine.program("missing"), ProgramHandle::NULL);
    assert_eq!(engine.programs().len(), 1);
}

#[test]
fn test_add_mesh_under_unknown_parent_releases_buffers() {
    let (mut engine, device) = engine();
    let orphan = engine.tree_mut().insert_group();
    engine.tree_mut().remove_node(orphan);

    assert!(engine.add_mesh(orphan, &MeshData::quad()).is_err());
    assert_eq!(device.live_objects().buffers, 0);
    assert_eq!(device.live_objects().vertex_arrays, 0);
}

#[test]
fn test_add_mesh_rejects_invalid_data() {
    let (mut engine, device) = engine();
    let scene = engine.roots().scene;

    assert!(engine.add_mesh(scene, &MeshData::default()).is_err());
    assert_eq!(device.live_objects().buffers, 0);
    assert_eq!(engine.tree().children(scene).len(), 1);
}

#[test]
fn test_shutdown_releases_everything_once() {
    let (mut engine, device) = engine();
    engine.load_program("phong", &scene_shader());
    let scene = engine.roots().scene;
    engine.add_mesh(scene, &MeshData::cube()).unwrap();

    engine.shutdown();
    let live = device.live_objects();
    assert_eq!(live.programs, 0);
    assert_eq!(live.buffers, 0);
    assert_eq!(live.vertex_arrays, 0);

    device.take_commands();
    engine.shutdown();
    assert!(device.commands().is_empty());
}

#[test]
fn test_long_run_without_recording_keeps_no_commands() {
    struct Idle;
    impl App for Idle {}

    let (mut engine, device) = engine();
    device.set_recording(false);
    device.take_commands();

    let mut app = Idle;
    for _ in 0..1000 {
        engine.tick(&mut app);
    }

    assert!(device.commands().is_empty());
    assert_eq!(device.presented_frames(), 1000);
}
