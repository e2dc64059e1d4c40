/// Engine: driver state of one window
///
/// Owns the render context, the program registry and the render tree with
/// its three standard roots. `tick` runs one frame; the windowed loop in
/// `run` calls it on every redraw, tests call it directly with a
/// `HeadlessDevice`.

use glam::Mat4;

use crate::device::{BlendFactor, Capability, ClearFlags, DepthFunc, GraphicsDevice, ProgramHandle, Viewport};
use crate::error::Result;
use crate::render::RenderContext;
use crate::resource::{Mesh, MeshData, ProgramRegistry, ShaderSources};
use crate::scene::{Camera, NodeKey, RenderTree};
use crate::{engine_debug, engine_info};
use super::config::EngineConfig;
use super::frame_clock::{FrameClock, FrameTime};

/// Application hooks driven by the engine
///
/// Every method has an empty default body.
pub trait App {
    /// Called once after the device and the engine exist
    fn setup(&mut self, _engine: &mut Engine) -> Result<()> {
        Ok(())
    }

    /// Called every frame before `render`, with the seconds since the previous frame
    fn update(&mut self, _engine: &mut Engine, _dt: f32) {}

    /// Called every frame after the window framebuffer was cleared
    fn render(&mut self, _engine: &mut Engine) {}

    /// Called when the window surface changed size (physical pixels)
    fn resized(&mut self, _engine: &mut Engine, _width: u32, _height: u32) {}
}

/// Keys of the nodes every engine starts with
///
/// ```text
/// scene
/// └── camera_rig
///     └── main_camera (perspective)
/// view_space
/// └── view_space_camera_rig
/// background_space
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRoots {
    pub scene: NodeKey,
    pub view_space: NodeKey,
    pub background_space: NodeKey,
    pub camera_rig: NodeKey,
    pub view_space_camera_rig: NodeKey,
    pub main_camera: NodeKey,
}

pub struct Engine {
    config: EngineConfig,
    context: RenderContext,
    programs: ProgramRegistry,
    tree: RenderTree,
    roots: SceneRoots,
    clock: FrameClock,
    last_frame: Option<FrameTime>,
    shut_down: bool,
}

impl Engine {
    /// Configure the device pipeline state and build the standard roots
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration
    /// * `device` - Device created for the window (or a `HeadlessDevice`)
    pub fn new(config: EngineConfig, device: Box<dyn GraphicsDevice>) -> Result<Self> {
        let mut context = RenderContext::new(device);
        engine_info!("sge::Engine", "Device: {}", context.device().version_string());

        configure_pipeline(&mut context, &config);

        let mut tree = RenderTree::new();
        let roots = build_roots(&mut tree, context.viewport())?;

        let (width, height) = context.default_framebuffer_size();
        engine_info!("sge::Engine", "Engine '{}' initialized ({}x{})", config.title, width, height);

        Ok(Self {
            config,
            context,
            programs: ProgramRegistry::new(),
            tree,
            roots,
            clock: FrameClock::new(),
            last_frame: None,
            shut_down: false,
        })
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn programs(&self) -> &ProgramRegistry {
        &self.programs
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    pub fn roots(&self) -> SceneRoots {
        self.roots
    }

    /// Timing of the frame in progress (or the last one)
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }

    // ===== RESOURCES =====

    /// Compile and register a program, see `ProgramRegistry::load`
    pub fn load_program(&mut self, name: &str, sources: &ShaderSources) -> ProgramHandle {
        self.programs.load(&mut self.context, name, sources)
    }

    /// Look up a program, see `ProgramRegistry::get`
    pub fn program(&self, name: &str) -> ProgramHandle {
        self.programs.get(name)
    }

    /// Upload `data` and link the new mesh node under `parent`
    pub fn add_mesh(&mut self, parent: NodeKey, data: &MeshData) -> Result<NodeKey> {
        let mesh = Mesh::new(&mut self.context, data)?;
        let key = self.tree.insert_mesh(mesh);
        if let Err(err) = self.tree.add_child(parent, key) {
            self.tree.destroy_node(&mut self.context, key);
            return Err(err);
        }
        Ok(key)
    }

    // ===== FRAME =====

    /// Run one frame
    ///
    /// Measures dt, binds the window framebuffer with a viewport matching
    /// the drawable size, clears color and depth, then calls
    /// `App::update`, `App::render` and presents.
    pub fn tick<A: App + ?Sized>(&mut self, app: &mut A) -> FrameTime {
        let frame = self.clock.tick();
        self.last_frame = Some(frame);
        self.context.begin_frame();

        self.sync_viewport();
        self.context
            .device_mut()
            .clear(ClearFlags::COLOR | ClearFlags::DEPTH);

        app.update(self, frame.dt);
        app.render(self);

        self.context.device_mut().present();
        frame
    }

    /// Render `root` and everything below it with `program`
    pub fn render_root(&mut self, root: NodeKey, program: ProgramHandle) {
        self.tree.render(&mut self.context, root, Mat4::IDENTITY, program);
    }

    /// Forward a window surface resize to the device
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.device_mut().resize(width, height);
        engine_debug!("sge::Engine", "Surface resized to {}x{}", width, height);
    }

    /// Release every mesh node and program
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.tree.destroy_all(&mut self.context);
        self.programs.release_all(&mut self.context);
        self.shut_down = true;
        engine_info!("sge::Engine", "Engine shut down");
    }

    fn sync_viewport(&mut self) {
        let (width, height) = self.context.device().drawable_size();
        let (width, height) = (width as i32, height as i32);
        let device = self.context.device_mut();
        device.bind_framebuffer(None);
        device.set_viewport(Viewport::from_size(width, height));
        self.context.update_default_framebuffer_size(width, height);
    }
}

fn configure_pipeline(context: &mut RenderContext, config: &EngineConfig) {
    let device = context.device_mut();
    device.set_clear_color(config.clear_color);
    device.set_capability(Capability::DepthTest, config.depth_test);
    if config.depth_test {
        device.set_depth_func(DepthFunc::Less);
    }
    device.set_capability(Capability::CullFace, config.cull_faces);
    device.set_capability(Capability::Blend, config.blending);
    if config.blending {
        device.set_blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
    }
}

fn build_roots(tree: &mut RenderTree, viewport: Viewport) -> Result<SceneRoots> {
    let scene = tree.insert_group();
    let view_space = tree.insert_group();
    let background_space = tree.insert_group();

    let camera_rig = tree.insert_group();
    let view_space_camera_rig = tree.insert_group();
    let main_camera = tree.insert_camera(Camera::perspective(viewport));

    tree.add_child(camera_rig, main_camera)?;
    tree.add_child(scene, camera_rig)?;
    tree.add_child(view_space, view_space_camera_rig)?;

    Ok(SceneRoots {
        scene,
        view_space,
        background_space,
        camera_rig,
        view_space_camera_rig,
        main_camera,
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
