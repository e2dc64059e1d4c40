/// VolumeRenderTarget: cubic 3D color texture rendered one slice at a time
///
/// Always sampled with nearest filtering. The depth renderbuffer covers one
/// `size x size` slice; [`VolumeRenderTarget::attach_layer`] selects the
/// slice the framebuffer writes to.

use crate::device::{
    FilterMode, FramebufferHandle, FramebufferStatus, PixelTransfer, TextureDesc, TextureFormat,
    TextureHandle, TextureTarget, WrapMode,
};
use crate::engine_bail;
use crate::engine_error;
use crate::error::Result;
use crate::render::RenderContext;
use super::offscreen::{use_targets, Attachments, OffscreenTarget};

pub struct VolumeRenderTarget {
    size: u32,
    layer: u32,
    attachments: Attachments,
}

impl VolumeRenderTarget {
    /// Create a `size x size x size` target with slice 0 attached
    ///
    /// Like `RenderTarget::new`, an incomplete framebuffer is logged and the
    /// target is still returned.
    pub fn new(ctx: &mut RenderContext, size: u32) -> Result<Self> {
        let desc = TextureDesc {
            target: TextureTarget::Texture3D,
            width: size,
            height: size,
            depth: size,
            format: TextureFormat::Rgba32Float,
            transfer: PixelTransfer::Rgba8,
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Nearest,
            wrap: WrapMode::Repeat,
        };
        let attachments = Attachments::create(ctx, &desc, (size, size), "sge::VolumeRenderTarget")?;
        Ok(Self {
            size,
            layer: 0,
            attachments,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Slice currently attached as color output
    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn status(&self) -> FramebufferStatus {
        self.attachments.status
    }

    pub fn is_complete(&self) -> bool {
        self.attachments.status.is_complete()
    }

    /// Attach slice `layer` of the volume as the color output
    ///
    /// The window framebuffer is bound afterwards.
    ///
    /// # Returns
    ///
    /// `Error::InvalidResource` if `layer` is not below `size`
    pub fn attach_layer(&mut self, ctx: &mut RenderContext, layer: u32) -> Result<()> {
        if layer >= self.size {
            engine_bail!(InvalidResource, "sge::VolumeRenderTarget",
                "Layer {} out of range for volume of size {}", layer, self.size);
        }

        let device = ctx.device_mut();
        device.bind_framebuffer(Some(self.attachments.framebuffer));
        device.attach_color_texture(self.attachments.color_texture, TextureTarget::Texture3D, layer);
        let status = device.check_framebuffer_status();
        if !status.is_complete() {
            engine_error!("sge::VolumeRenderTarget",
                "Framebuffer {} not complete after attaching layer {}: {:?}",
                self.attachments.framebuffer.raw(), layer, status);
        }
        device.bind_framebuffer(None);

        self.layer = layer;
        self.attachments.status = status;
        Ok(())
    }

    /// `use_targets` for volume targets
    pub fn use_fbo(
        ctx: &mut RenderContext,
        output: Option<&VolumeRenderTarget>,
        input_a: Option<&VolumeRenderTarget>,
        input_b: Option<&VolumeRenderTarget>,
    ) {
        use_targets(ctx, output, input_a, input_b);
    }

    pub fn destroy(self, ctx: &mut RenderContext) {
        self.attachments.destroy(ctx);
    }
}

impl OffscreenTarget for VolumeRenderTarget {
    const TEXTURE_TARGET: TextureTarget = TextureTarget::Texture3D;

    fn framebuffer(&self) -> FramebufferHandle {
        self.attachments.framebuffer
    }

    fn color_texture(&self) -> TextureHandle {
        self.attachments.color_texture
    }

    fn extent(&self) -> (u32, u32) {
        (self.size, self.size)
    }
}

#[cfg(test)]
#[path = "volume_render_target_tests.rs"]
mod tests;
