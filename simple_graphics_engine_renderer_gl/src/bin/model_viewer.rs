//! Spinning lit sphere rendered through an off-screen target, then shown on
//! the window with a full-screen pass
//!
//! Run with: cargo run -p simple_graphics_engine_renderer_gl --bin model_viewer

use simple_graphics_engine::glam::{Mat4, Vec3};
use simple_graphics_engine::sge::device::{GraphicsDevice, ProgramHandle};
use simple_graphics_engine::sge::resource::{Mesh, MeshData, ShaderSources};
use simple_graphics_engine::sge::scene::Light;
use simple_graphics_engine::sge::target::RenderTarget;
use simple_graphics_engine::sge::{self, App, DevicePlugins, Engine, EngineConfig, Result};
use simple_graphics_engine::{engine_error, engine_info};

const SCENE_VERTEX: &str = "#version 410 core
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;
uniform mat4 M;
uniform mat4 V;
uniform mat4 P;
out vec3 world_normal;
void main() {
    world_normal = mat3(M) * normal;
    gl_Position = P * V * M * vec4(position, 1.0);
}
";

const SCENE_FRAGMENT: &str = "#version 410 core
in vec3 world_normal;
uniform float lightIntensity;
uniform vec3 lightColor;
out vec4 color;
void main() {
    vec3 light_dir = normalize(vec3(0.4, 0.8, 1.0));
    float diffuse = max(dot(normalize(world_normal), light_dir), 0.0);
    color = vec4(lightColor * (0.1 + lightIntensity * diffuse), 1.0);
}
";

const COMPOSITE_VERTEX: &str = "#version 410 core
layout(location = 0) in vec3 position;
out vec2 uv;
void main() {
    uv = position.xy * 0.5 + 0.5;
    gl_Position = vec4(position.xy, 0.0, 1.0);
}
";

const COMPOSITE_FRAGMENT: &str = "#version 410 core
in vec2 uv;
uniform sampler2D scene;
out vec4 color;
void main() {
    color = texture(scene, uv);
}
";

struct ModelViewer {
    scene_program: ProgramHandle,
    composite_program: ProgramHandle,
    screen_quad: Option<Mesh>,
    target: Option<RenderTarget>,
    angle: f32,
}

impl App for ModelViewer {
    fn setup(&mut self, engine: &mut Engine) -> Result<()> {
        self.scene_program =
            engine.load_program("phong", &ShaderSources::new(SCENE_VERTEX, SCENE_FRAGMENT));
        self.composite_program = engine.load_program(
            "composite",
            &ShaderSources::new(COMPOSITE_VERTEX, COMPOSITE_FRAGMENT),
        );

        let scene = engine.roots().scene;
        let light = engine
            .tree_mut()
            .insert_light(Light::new(1.0, Vec3::new(1.0, 0.9, 0.8)));
        engine.tree_mut().add_child(scene, light)?;
        engine.add_mesh(scene, &MeshData::uv_sphere(1.0, 32, 64)?)?;

        self.screen_quad = Some(Mesh::new(engine.context_mut(), &MeshData::quad())?);
        self.target = Some(RenderTarget::with_method(engine.context_mut(), 512, 512, 1)?);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, dt: f32) {
        self.angle += dt * 0.5;
        let rig = engine.roots().camera_rig;
        engine
            .tree_mut()
            .set_transform(rig, Mat4::from_rotation_y(self.angle));
    }

    fn render(&mut self, engine: &mut Engine) {
        let (Some(target), Some(quad)) = (self.target.as_ref(), self.screen_quad.as_ref()) else {
            return;
        };

        RenderTarget::use_fbo(engine.context_mut(), Some(target), None, None);
        engine
            .context_mut()
            .device_mut()
            .clear(sge::device::ClearFlags::COLOR | sge::device::ClearFlags::DEPTH);
        let scene = engine.roots().scene;
        engine.render_root(scene, self.scene_program);

        RenderTarget::use_fbo(engine.context_mut(), None, Some(target), None);
        quad.draw(engine.context_mut(), self.composite_program, Mat4::IDENTITY);
    }

    fn resized(&mut self, _engine: &mut Engine, width: u32, height: u32) {
        engine_info!("app::ModelViewer", "Window resized to {}x{}", width, height);
    }
}

fn main() {
    let mut plugins = DevicePlugins::default();
    simple_graphics_engine_renderer_gl::register(&mut plugins);

    let config = EngineConfig {
        backend: simple_graphics_engine_renderer_gl::OPENGL_BACKEND.to_string(),
        ..EngineConfig::default()
    };
    let app = ModelViewer {
        scene_program: ProgramHandle::NULL,
        composite_program: ProgramHandle::NULL,
        screen_quad: None,
        target: None,
        angle: 0.0,
    };

    if let Err(err) = sge::run(config, plugins, app) {
        engine_error!("app::ModelViewer", "Model viewer stopped: {}", err);
        std::process::exit(1);
    }
}
