/// Unit tests for RenderContext

use crate::device::*;
use crate::render::{FrameStats, RenderContext};
use crate::resource::ShaderSources;
use glam::Mat4;

fn context(width: u32, height: u32) -> (RenderContext, HeadlessDevice) {
    let device = HeadlessDevice::new(width, height);
    (RenderContext::new(Box::new(device.clone())), device)
}

#[test]
fn test_cache_starts_at_drawable_size() {
    let (ctx, _) = context(720, 480);
    assert_eq!(ctx.default_framebuffer_size(), (720, 480));
    assert_eq!(ctx.default_viewport(), Viewport::from_size(720, 480));
}

#[test]
fn test_refresh_reads_window_viewport() {
    let (mut ctx, _) = context(720, 480);
    ctx.device_mut().set_viewport(Viewport::from_size(1024, 768));
    ctx.refresh_default_framebuffer_size();
    assert_eq!(ctx.default_framebuffer_size(), (1024, 768));
}

#[test]
fn test_refresh_ignored_while_offscreen_bound() {
    let (mut ctx, _) = context(720, 480);
    let fb = ctx.device_mut().create_framebuffer().unwrap();
    ctx.device_mut().bind_framebuffer(Some(fb));
    ctx.device_mut().set_viewport(Viewport::from_size(256, 256));
    ctx.refresh_default_framebuffer_size();
    assert_eq!(ctx.default_framebuffer_size(), (720, 480));
}

#[test]
fn test_refresh_rejects_implausible_extent() {
    let (mut ctx, _) = context(720, 480);
    ctx.device_mut().set_viewport(Viewport::from_size(0, 480));
    ctx.refresh_default_framebuffer_size();
    assert_eq!(ctx.default_framebuffer_size(), (720, 480));

    ctx.device_mut().set_viewport(Viewport::from_size(70000, 480));
    ctx.refresh_default_framebuffer_size();
    assert_eq!(ctx.default_framebuffer_size(), (720, 480));
}

#[test]
fn test_manual_cache_update() {
    let (mut ctx, _) = context(720, 480);
    ctx.update_default_framebuffer_size(1440, 960);
    assert_eq!(ctx.default_framebuffer_size(), (1440, 960));
}

#[test]
fn test_upload_uniform_missing_is_counted() {
    let (mut ctx, device) = context(64, 64);
    let program = ctx
        .device_mut()
        .create_program(&ShaderSources::new(
            "uniform mat4 M;\nvoid main() {}",
            "void main() {}",
        ))
        .unwrap();
    ctx.device_mut().use_program(program);

    ctx.upload_uniform(program, "M", UniformValue::Mat4(Mat4::IDENTITY));
    ctx.upload_uniform(program, "V", UniformValue::Mat4(Mat4::IDENTITY));

    assert_eq!(device.uniform_value(program, "M"), Some(UniformValue::Mat4(Mat4::IDENTITY)));
    assert_eq!(ctx.stats().missing_uniforms, 1);
}

#[test]
fn test_frame_stats_reset() {
    let (mut ctx, _) = context(64, 64);
    ctx.record_draw(36);
    ctx.record_draw(6);
    assert_eq!(ctx.stats().draw_calls, 2);
    assert_eq!(ctx.stats().triangles, 14);

    ctx.begin_frame();
    assert_eq!(ctx.stats(), FrameStats::default());
}
