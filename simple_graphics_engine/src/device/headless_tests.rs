/// Unit tests for HeadlessDevice
///
/// Tests object allocation, state tracking, uniform reflection and
/// framebuffer completeness without a GPU.

use crate::device::*;
use crate::error::Error;
use crate::resource::ShaderSources;
use glam::{Mat4, Vec3, Vec4};

const VERTEX: &str = "#version 410\n\
    uniform mat4 M;\n\
    uniform mat4 V;\n\
    uniform mat4 P;\n\
    layout(location = 0) in vec3 position;\n\
    void main() { gl_Position = P * V * M * vec4(position, 1.0); }\n";

const FRAGMENT: &str = "#version 410\n\
    uniform float lightIntensity;\n\
    uniform vec3 lightColor;\n\
    uniform sampler2D inputs[2];\n\
    out vec4 color;\n\
    void main() { color = vec4(lightColor * lightIntensity, 1.0); }\n";

fn sources() -> ShaderSources {
    ShaderSources::new(VERTEX, FRAGMENT)
}

fn color_desc(target: TextureTarget, width: u32, height: u32, depth: u32) -> TextureDesc {
    TextureDesc {
        target,
        width,
        height,
        depth,
        format: TextureFormat::Rgba32Float,
        transfer: PixelTransfer::Rgba8,
        min_filter: FilterMode::Nearest,
        mag_filter: FilterMode::Nearest,
        wrap: WrapMode::Repeat,
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_viewport_covers_surface() {
    let device = HeadlessDevice::new(720, 480);
    assert_eq!(device.viewport(), Viewport::new(0, 0, 720, 480));
    assert_eq!(device.drawable_size(), (720, 480));
    assert_eq!(device.bound_framebuffer(), None);
    assert!(device.commands().is_empty());
    assert_eq!(device.live_objects(), LiveObjects::default());
}

#[test]
fn test_clones_share_state() {
    let device = HeadlessDevice::new(64, 64);
    let mut owned = device.clone();
    owned.set_viewport(Viewport::from_size(8, 8));
    assert_eq!(device.viewport(), Viewport::from_size(8, 8));
    assert_eq!(device.commands().len(), 1);
}

#[test]
fn test_names_are_unique_and_non_null() {
    let mut device = HeadlessDevice::new(64, 64);
    let a = device.create_buffer(BufferTarget::Array, &[0; 4]).unwrap();
    let b = device.create_vertex_array().unwrap();
    let c = device.create_framebuffer().unwrap();
    assert!(!a.is_null());
    assert_ne!(a.raw(), b.raw());
    assert_ne!(b.raw(), c.raw());
}

// ============================================================================
// Programs & uniforms
// ============================================================================

#[test]
fn test_program_reflects_declared_uniforms() {
    let mut device = HeadlessDevice::new(64, 64);
    let program = device.create_program(&sources()).unwrap();

    for name in ["M", "V", "P", "lightIntensity", "lightColor", "inputs"] {
        assert!(device.uniform_location(program, name).is_some(), "missing {}", name);
    }
    assert!(device.uniform_location(program, "position").is_none());
    assert!(device.uniform_location(program, "unknown").is_none());
}

#[test]
fn test_program_compile_failures() {
    let mut device = HeadlessDevice::new(64, 64);

    let empty = ShaderSources::new("", FRAGMENT);
    assert!(device.create_program(&empty).is_err());

    let no_main = ShaderSources::new(VERTEX, "out vec4 color;");
    let err = device.create_program(&no_main).unwrap_err();
    assert!(format!("{}", err).contains("fragment"));

    let tess_only = sources().with_tess_control("void main() {}");
    assert!(device.create_program(&tess_only).is_err());

    assert_eq!(device.live_objects().programs, 0);
}

#[test]
fn test_set_uniform_records_value_for_current_program() {
    let mut device = HeadlessDevice::new(64, 64);
    let program = device.create_program(&sources()).unwrap();
    device.use_program(program);

    let location = device.uniform_location(program, "lightColor").unwrap();
    device.set_uniform(location, UniformValue::Vec3(Vec3::new(1.0, 0.5, 0.25)));

    assert_eq!(
        device.uniform_value(program, "lightColor"),
        Some(UniformValue::Vec3(Vec3::new(1.0, 0.5, 0.25)))
    );
    assert_eq!(
        device.commands().last(),
        Some(&DeviceCommand::SetUniform {
            program,
            name: "lightColor".to_string(),
            value: UniformValue::Vec3(Vec3::new(1.0, 0.5, 0.25)),
        })
    );
}

#[test]
fn test_set_uniform_ignored_for_other_program() {
    let mut device = HeadlessDevice::new(64, 64);
    let first = device.create_program(&sources()).unwrap();
    let second = device.create_program(&sources()).unwrap();
    device.use_program(second);

    let location = device.uniform_location(first, "M").unwrap();
    device.set_uniform(location, UniformValue::Mat4(Mat4::IDENTITY));

    assert_eq!(device.uniform_value(first, "M"), None);
}

#[test]
fn test_delete_current_program_unbinds() {
    let mut device = HeadlessDevice::new(64, 64);
    let program = device.create_program(&sources()).unwrap();
    device.use_program(program);
    device.delete_program(program);

    assert!(device.current_program().is_null());
    assert_eq!(device.live_objects().programs, 0);
}

// ============================================================================
// Buffers & vertex input
// ============================================================================

#[test]
fn test_buffer_contents_and_binding() {
    let mut device = HeadlessDevice::new(64, 64);
    let buffer = device.create_buffer(BufferTarget::ElementArray, &[1, 2, 3]).unwrap();

    assert_eq!(device.buffer_data(buffer), Some(vec![1, 2, 3]));
    assert_eq!(device.bound_buffer(BufferTarget::ElementArray), Some(buffer));

    device.delete_buffer(buffer);
    assert_eq!(device.buffer_data(buffer), None);
    assert_eq!(device.bound_buffer(BufferTarget::ElementArray), None);
}

#[test]
fn test_attrib_pointer_captures_array_binding() {
    let mut device = HeadlessDevice::new(64, 64);
    let buffer = device.create_buffer(BufferTarget::Array, &[0; 12]).unwrap();
    device.enable_vertex_attrib(0);
    device.vertex_attrib_pointer(0, VertexAttrib::vec3_f32());

    assert_eq!(device.enabled_vertex_attribs(), vec![0]);
    assert_eq!(
        device.commands().last(),
        Some(&DeviceCommand::VertexAttribPointer {
            slot: 0,
            attrib: VertexAttrib::vec3_f32(),
            buffer: Some(buffer),
        })
    );

    device.disable_vertex_attrib(0);
    assert!(device.enabled_vertex_attribs().is_empty());
}

#[test]
fn test_draw_without_program_is_still_recorded() {
    let mut device = HeadlessDevice::new(64, 64);
    device.draw_elements(PrimitiveTopology::Triangles, 6, IndexType::U16);

    assert_eq!(
        device.commands(),
        vec![DeviceCommand::DrawElements {
            program: ProgramHandle::NULL,
            topology: PrimitiveTopology::Triangles,
            count: 6,
            index_type: IndexType::U16,
        }]
    );
}

// ============================================================================
// Textures
// ============================================================================

#[test]
fn test_texture_parameters_query() {
    let mut device = HeadlessDevice::new(64, 64);
    let mut desc = color_desc(TextureTarget::Texture2D, 256, 128, 7);
    desc.min_filter = FilterMode::Linear;
    desc.mag_filter = FilterMode::Linear;
    let texture = device.create_texture(&desc).unwrap();

    let params = device.texture_parameters(texture).unwrap();
    assert_eq!(params.width, 256);
    assert_eq!(params.height, 128);
    assert_eq!(params.depth, 1);
    assert_eq!(params.min_filter, FilterMode::Linear);
    assert_eq!(params.mag_filter, FilterMode::Linear);
    assert_eq!(params.wrap_s, WrapMode::Repeat);
    assert_eq!(params.format, TextureFormat::Rgba32Float);
}

#[test]
fn test_texture_binding_per_unit() {
    let mut device = HeadlessDevice::new(64, 64);
    let a = device.create_texture(&color_desc(TextureTarget::Texture2D, 4, 4, 1)).unwrap();
    let b = device.create_texture(&color_desc(TextureTarget::Texture2D, 4, 4, 1)).unwrap();

    device.active_texture(1);
    device.bind_texture(TextureTarget::Texture2D, Some(b));
    device.active_texture(0);
    device.bind_texture(TextureTarget::Texture2D, Some(a));

    assert_eq!(device.active_texture_unit(), 0);
    assert_eq!(device.bound_texture(0, TextureTarget::Texture2D), Some(a));
    assert_eq!(device.bound_texture(1, TextureTarget::Texture2D), Some(b));

    device.delete_texture(b);
    assert_eq!(device.bound_texture(1, TextureTarget::Texture2D), None);
}

// ============================================================================
// Framebuffers
// ============================================================================

#[test]
fn test_framebuffer_completeness() {
    let mut device = HeadlessDevice::new(64, 64);
    let fb = device.create_framebuffer().unwrap();
    device.bind_framebuffer(Some(fb));
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::MissingAttachment);

    let texture = device.create_texture(&color_desc(TextureTarget::Texture2D, 32, 32, 1)).unwrap();
    device.attach_color_texture(texture, TextureTarget::Texture2D, 0);
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::Complete);

    let small = device.create_renderbuffer(DepthFormat::Depth24, 16, 16).unwrap();
    device.attach_depth_renderbuffer(small);
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::IncompleteDimensions);

    let matching = device.create_renderbuffer(DepthFormat::Depth24, 32, 32).unwrap();
    device.attach_depth_renderbuffer(matching);
    assert!(device.check_framebuffer_status().is_complete());
}

#[test]
fn test_volume_layer_out_of_range_is_incomplete() {
    let mut device = HeadlessDevice::new(64, 64);
    let fb = device.create_framebuffer().unwrap();
    device.bind_framebuffer(Some(fb));
    let texture = device.create_texture(&color_desc(TextureTarget::Texture3D, 8, 8, 8)).unwrap();

    device.attach_color_texture(texture, TextureTarget::Texture3D, 7);
    assert!(device.check_framebuffer_status().is_complete());

    device.attach_color_texture(texture, TextureTarget::Texture3D, 8);
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::IncompleteAttachment);
}

#[test]
fn test_window_framebuffer_is_complete() {
    let device = HeadlessDevice::new(64, 64);
    assert_eq!(device.check_framebuffer_status(), FramebufferStatus::Complete);
}

#[test]
fn test_delete_bound_framebuffer_reverts_to_window() {
    let mut device = HeadlessDevice::new(64, 64);
    let fb = device.create_framebuffer().unwrap();
    device.bind_framebuffer(Some(fb));
    device.delete_framebuffer(fb);
    assert_eq!(device.bound_framebuffer(), None);
    assert_eq!(device.framebuffer_status(fb), FramebufferStatus::Undefined);
}

// ============================================================================
// Fixed-function state & presentation
// ============================================================================

#[test]
fn test_fixed_function_state() {
    let mut device = HeadlessDevice::new(64, 64);
    device.set_capability(Capability::DepthTest, true);
    device.set_capability(Capability::Blend, true);
    device.set_capability(Capability::Blend, false);
    device.set_depth_func(DepthFunc::LessEqual);
    device.set_blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
    device.set_clear_color(Vec4::new(0.1, 0.2, 0.3, 1.0));

    assert!(device.is_enabled(Capability::DepthTest));
    assert!(!device.is_enabled(Capability::Blend));
    assert_eq!(device.depth_func(), DepthFunc::LessEqual);
    assert_eq!(device.blend_func(), (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
    assert_eq!(device.clear_color(), Vec4::new(0.1, 0.2, 0.3, 1.0));
}

#[test]
fn test_present_and_resize() {
    let mut device = HeadlessDevice::new(64, 64);
    device.present();
    device.present();
    device.resize(128, 32);

    assert_eq!(device.presented_frames(), 2);
    assert_eq!(device.drawable_size(), (128, 32));
    // Resizing the surface leaves the viewport alone
    assert_eq!(device.viewport(), Viewport::from_size(64, 64));
    assert!(device.version_string().contains("simple_graphics_engine"));
}

#[test]
fn test_take_commands_drains() {
    let mut device = HeadlessDevice::new(64, 64);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
    let taken = device.take_commands();
    assert_eq!(taken, vec![DeviceCommand::Clear(ClearFlags::COLOR | ClearFlags::DEPTH)]);
    assert!(device.commands().is_empty());
}

#[test]
fn test_recording_off_keeps_state() {
    let mut device = HeadlessDevice::new(64, 64);
    device.set_recording(false);
    assert!(!device.is_recording());

    let texture = device.create_texture(&color_desc(TextureTarget::Texture2D, 8, 8, 1)).unwrap();
    device.bind_texture(TextureTarget::Texture2D, Some(texture));
    device.clear(ClearFlags::COLOR);
    device.present();

    assert!(device.commands().is_empty());
    assert_eq!(device.bound_texture(0, TextureTarget::Texture2D), Some(texture));
    assert_eq!(device.presented_frames(), 1);

    device.set_recording(true);
    device.clear(ClearFlags::DEPTH);
    assert_eq!(device.commands(), vec![DeviceCommand::Clear(ClearFlags::DEPTH)]);
}

#[test]
fn test_object_limit() {
    let mut device = HeadlessDevice::new(64, 64);
    device.set_object_limit(Some(1));

    let first = device.create_framebuffer().unwrap();
    assert!(matches!(device.create_framebuffer(), Err(Error::OutOfMemory)));

    device.delete_framebuffer(first);
    assert!(device.create_framebuffer().is_ok());
}
