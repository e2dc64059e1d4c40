/// Conversions between engine device enums and OpenGL enums

use simple_graphics_engine::device::{
    AttribType, BlendFactor, BufferTarget, Capability, ClearFlags, DepthFormat, DepthFunc,
    FilterMode, FramebufferStatus, IndexType, PixelTransfer, PrimitiveTopology, TextureFormat,
    TextureTarget, WrapMode,
};
use simple_graphics_engine::resource::ShaderStage;

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::TessControl => glow::TESS_CONTROL_SHADER,
        ShaderStage::TessEvaluation => glow::TESS_EVALUATION_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

pub(crate) fn buffer_target_to_gl(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn attrib_type_to_gl(kind: AttribType) -> u32 {
    match kind {
        AttribType::F32 => glow::FLOAT,
    }
}

pub(crate) fn topology_to_gl(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::Triangles => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveTopology::Lines => glow::LINES,
    }
}

pub(crate) fn index_type_to_gl(index_type: IndexType) -> u32 {
    match index_type {
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

// ===== TEXTURES =====

pub(crate) fn texture_target_to_gl(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2D => glow::TEXTURE_2D,
        TextureTarget::Texture3D => glow::TEXTURE_3D,
    }
}

pub(crate) fn filter_to_gl(filter: FilterMode) -> u32 {
    match filter {
        FilterMode::Nearest => glow::NEAREST,
        FilterMode::Linear => glow::LINEAR,
    }
}

/// Filter read back from the driver
///
/// Mipmapped filters map to their base-level filter.
pub(crate) fn filter_from_gl(value: i32) -> Option<FilterMode> {
    match value as u32 {
        glow::NEAREST | glow::NEAREST_MIPMAP_NEAREST | glow::NEAREST_MIPMAP_LINEAR => {
            Some(FilterMode::Nearest)
        }
        glow::LINEAR | glow::LINEAR_MIPMAP_NEAREST | glow::LINEAR_MIPMAP_LINEAR => {
            Some(FilterMode::Linear)
        }
        _ => None,
    }
}

pub(crate) fn wrap_to_gl(wrap: WrapMode) -> u32 {
    match wrap {
        WrapMode::Repeat => glow::REPEAT,
        WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
    }
}

pub(crate) fn wrap_from_gl(value: i32) -> Option<WrapMode> {
    match value as u32 {
        glow::REPEAT => Some(WrapMode::Repeat),
        glow::CLAMP_TO_EDGE => Some(WrapMode::ClampToEdge),
        _ => None,
    }
}

/// Sized internal format
pub(crate) fn texture_format_to_gl(format: TextureFormat) -> u32 {
    match format {
        TextureFormat::Rgba32Float => glow::RGBA32F,
        TextureFormat::Rgba8 => glow::RGBA8,
    }
}

/// Client pixel `(format, type)` pair
pub(crate) fn pixel_transfer_to_gl(transfer: PixelTransfer) -> (u32, u32) {
    match transfer {
        PixelTransfer::Rgba8 => (glow::RGBA, glow::UNSIGNED_BYTE),
    }
}

// ===== FRAMEBUFFERS =====

pub(crate) fn depth_format_to_gl(format: DepthFormat) -> u32 {
    match format {
        DepthFormat::Depth24 => glow::DEPTH_COMPONENT24,
    }
}

pub(crate) fn framebuffer_status_from_gl(status: u32) -> FramebufferStatus {
    match status {
        glow::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
        glow::FRAMEBUFFER_UNDEFINED | 0 => FramebufferStatus::Undefined,
        _ => FramebufferStatus::IncompleteAttachment,
    }
}

// ===== FIXED-FUNCTION STATE =====

pub(crate) fn capability_to_gl(capability: Capability) -> u32 {
    match capability {
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::CullFace => glow::CULL_FACE,
        Capability::Blend => glow::BLEND,
    }
}

pub(crate) fn depth_func_to_gl(func: DepthFunc) -> u32 {
    match func {
        DepthFunc::Less => glow::LESS,
        DepthFunc::LessEqual => glow::LEQUAL,
        DepthFunc::Always => glow::ALWAYS,
    }
}

pub(crate) fn blend_factor_to_gl(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::Zero => glow::ZERO,
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
    }
}

pub(crate) fn clear_mask_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    mask
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
