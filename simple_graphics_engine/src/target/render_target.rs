/// RenderTarget: 2D offscreen color + depth target
///
/// Color is stored as 4 x f32 per texel and sampled with the filter chosen
/// at creation; coordinates wrap (repeat). The depth renderbuffer matches
/// the color extent.

use crate::device::{
    FilterMode, FramebufferHandle, FramebufferStatus, PixelTransfer, TextureDesc, TextureFormat,
    TextureHandle, TextureTarget, WrapMode,
};
use crate::error::Result;
use crate::render::RenderContext;
use super::offscreen::{use_targets, Attachments, OffscreenTarget};

pub struct RenderTarget {
    width: u32,
    height: u32,
    filter: FilterMode,
    attachments: Attachments,
}

impl RenderTarget {
    /// Create a `width x height` target sampled with `filter`
    ///
    /// The target is returned even if its framebuffer is incomplete (the
    /// problem is logged and visible through [`RenderTarget::status`]).
    /// The window framebuffer is bound afterwards.
    pub fn new(ctx: &mut RenderContext, width: u32, height: u32, filter: FilterMode) -> Result<Self> {
        let desc = TextureDesc {
            target: TextureTarget::Texture2D,
            width,
            height,
            depth: 1,
            format: TextureFormat::Rgba32Float,
            transfer: PixelTransfer::Rgba8,
            min_filter: filter,
            mag_filter: filter,
            wrap: WrapMode::Repeat,
        };
        let attachments = Attachments::create(ctx, &desc, (width, height), "sge::RenderTarget")?;
        Ok(Self {
            width,
            height,
            filter,
            attachments,
        })
    }

    /// Create a target with the integer filter selector (0 = nearest, else linear)
    pub fn with_method(ctx: &mut RenderContext, width: u32, height: u32, method: i32) -> Result<Self> {
        Self::new(ctx, width, height, FilterMode::from_method(method))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Completeness found at creation
    pub fn status(&self) -> FramebufferStatus {
        self.attachments.status
    }

    pub fn is_complete(&self) -> bool {
        self.attachments.status.is_complete()
    }

    /// `use_targets` for 2D targets; `None` everywhere renders to the window
    /// with no texture bound on units 0 and 1
    pub fn use_fbo(
        ctx: &mut RenderContext,
        output: Option<&RenderTarget>,
        input_a: Option<&RenderTarget>,
        input_b: Option<&RenderTarget>,
    ) {
        use_targets(ctx, output, input_a, input_b);
    }

    /// Release the texture, renderbuffer and framebuffer
    pub fn destroy(self, ctx: &mut RenderContext) {
        self.attachments.destroy(ctx);
    }
}

impl OffscreenTarget for RenderTarget {
    const TEXTURE_TARGET: TextureTarget = TextureTarget::Texture2D;

    fn framebuffer(&self) -> FramebufferHandle {
        self.attachments.framebuffer
    }

    fn color_texture(&self) -> TextureHandle {
        self.attachments.color_texture
    }

    fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
