//! Unit tests for OpenGL enum conversions
//!
//! Pure mapping checks, no GL context needed.

use super::*;

#[test]
fn test_filter_from_method_maps_to_gl() {
    assert_eq!(filter_to_gl(FilterMode::from_method(0)), glow::NEAREST);
    assert_eq!(filter_to_gl(FilterMode::from_method(1)), glow::LINEAR);
    assert_eq!(filter_to_gl(FilterMode::from_method(-3)), glow::LINEAR);
}

#[test]
fn test_filter_read_back() {
    assert_eq!(filter_from_gl(glow::NEAREST as i32), Some(FilterMode::Nearest));
    assert_eq!(filter_from_gl(glow::LINEAR as i32), Some(FilterMode::Linear));
    assert_eq!(filter_from_gl(glow::LINEAR_MIPMAP_LINEAR as i32), Some(FilterMode::Linear));
    assert_eq!(filter_from_gl(glow::NEAREST_MIPMAP_LINEAR as i32), Some(FilterMode::Nearest));
    assert_eq!(filter_from_gl(0), None);
}

#[test]
fn test_wrap_read_back() {
    for wrap in [WrapMode::Repeat, WrapMode::ClampToEdge] {
        assert_eq!(wrap_from_gl(wrap_to_gl(wrap) as i32), Some(wrap));
    }
    assert_eq!(wrap_from_gl(glow::MIRRORED_REPEAT as i32), None);
}

#[test]
fn test_color_storage_is_float() {
    assert_eq!(texture_format_to_gl(TextureFormat::Rgba32Float), glow::RGBA32F);
    assert_eq!(texture_format_to_gl(TextureFormat::Rgba8), glow::RGBA8);
    assert_eq!(
        pixel_transfer_to_gl(PixelTransfer::Rgba8),
        (glow::RGBA, glow::UNSIGNED_BYTE)
    );
    assert_eq!(depth_format_to_gl(DepthFormat::Depth24), glow::DEPTH_COMPONENT24);
}

#[test]
fn test_texture_targets() {
    assert_eq!(texture_target_to_gl(TextureTarget::Texture2D), glow::TEXTURE_2D);
    assert_eq!(texture_target_to_gl(TextureTarget::Texture3D), glow::TEXTURE_3D);
}

#[test]
fn test_framebuffer_status() {
    assert_eq!(
        framebuffer_status_from_gl(glow::FRAMEBUFFER_COMPLETE),
        FramebufferStatus::Complete
    );
    assert_eq!(
        framebuffer_status_from_gl(glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT),
        FramebufferStatus::MissingAttachment
    );
    assert_eq!(
        framebuffer_status_from_gl(glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT),
        FramebufferStatus::IncompleteAttachment
    );
    assert_eq!(
        framebuffer_status_from_gl(glow::FRAMEBUFFER_UNSUPPORTED),
        FramebufferStatus::IncompleteAttachment
    );
    // glCheckFramebufferStatus returns 0 on error
    assert_eq!(framebuffer_status_from_gl(0), FramebufferStatus::Undefined);
}

#[test]
fn test_draw_enums() {
    assert_eq!(topology_to_gl(PrimitiveTopology::Triangles), glow::TRIANGLES);
    assert_eq!(index_type_to_gl(IndexType::U16), glow::UNSIGNED_SHORT);
    assert_eq!(index_type_to_gl(IndexType::U32), glow::UNSIGNED_INT);
    assert_eq!(attrib_type_to_gl(AttribType::F32), glow::FLOAT);
    assert_eq!(buffer_target_to_gl(BufferTarget::ElementArray), glow::ELEMENT_ARRAY_BUFFER);
}

#[test]
fn test_shader_stages() {
    assert_eq!(shader_stage_to_gl(ShaderStage::Vertex), glow::VERTEX_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::TessControl), glow::TESS_CONTROL_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::TessEvaluation), glow::TESS_EVALUATION_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Geometry), glow::GEOMETRY_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
}

#[test]
fn test_pipeline_state() {
    assert_eq!(capability_to_gl(Capability::DepthTest), glow::DEPTH_TEST);
    assert_eq!(depth_func_to_gl(DepthFunc::Less), glow::LESS);
    assert_eq!(
        (
            blend_factor_to_gl(BlendFactor::SrcAlpha),
            blend_factor_to_gl(BlendFactor::OneMinusSrcAlpha)
        ),
        (glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA)
    );
}

#[test]
fn test_clear_mask() {
    assert_eq!(clear_mask_to_gl(ClearFlags::COLOR), glow::COLOR_BUFFER_BIT);
    assert_eq!(
        clear_mask_to_gl(ClearFlags::COLOR | ClearFlags::DEPTH),
        glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT
    );
    assert_eq!(clear_mask_to_gl(ClearFlags::empty()), 0);
}
