/// Offscreen targets and the output/input switch used between render passes

use crate::device::{
    DepthFormat, FramebufferHandle, FramebufferStatus, GraphicsDevice, RenderbufferHandle,
    TextureDesc, TextureHandle, TextureTarget, Viewport,
};
use crate::error::Result;
use crate::render::RenderContext;
use crate::{engine_debug, engine_error};

/// A framebuffer object with a sampleable color texture
pub trait OffscreenTarget {
    /// Target the color texture binds to when sampled
    const TEXTURE_TARGET: TextureTarget;

    fn framebuffer(&self) -> FramebufferHandle;

    fn color_texture(&self) -> TextureHandle;

    /// Width and height rendered into
    fn extent(&self) -> (u32, u32);
}

/// Select where the next pass renders and which targets it samples
///
/// Performs, in order:
/// 1. refresh of the cached window framebuffer size if the window is bound
/// 2. viewport set to `output`'s extent, or to the cached window size
/// 3. bind of `output`'s framebuffer, or of the window framebuffer
/// 4. texture unit 1 bound to `input_b`'s color texture (unbound if `None`)
/// 5. texture unit 0 bound to `input_a`'s color texture (unbound if `None`)
///
/// Unit 0 stays active afterwards.
pub fn use_targets<T: OffscreenTarget>(
    ctx: &mut RenderContext,
    output: Option<&T>,
    input_a: Option<&T>,
    input_b: Option<&T>,
) {
    ctx.refresh_default_framebuffer_size();

    let viewport = match output {
        Some(target) => {
            let (width, height) = target.extent();
            Viewport::from_size(width as i32, height as i32)
        }
        None => ctx.default_viewport(),
    };

    let device = ctx.device_mut();
    device.set_viewport(viewport);
    device.bind_framebuffer(output.map(|t| t.framebuffer()));

    device.active_texture(1);
    device.bind_texture(T::TEXTURE_TARGET, input_b.map(|t| t.color_texture()));
    device.active_texture(0);
    device.bind_texture(T::TEXTURE_TARGET, input_a.map(|t| t.color_texture()));
}

// ===== SHARED CONSTRUCTION =====

/// GPU objects backing one offscreen target
pub(crate) struct Attachments {
    pub framebuffer: FramebufferHandle,
    pub color_texture: TextureHandle,
    pub depth_buffer: RenderbufferHandle,
    pub status: FramebufferStatus,
}

impl Attachments {
    /// Create framebuffer, color texture and depth renderbuffer, attach them
    /// and check completeness
    ///
    /// An incomplete framebuffer is logged, not returned as an error. The
    /// window framebuffer is bound again before returning.
    pub(crate) fn create(
        ctx: &mut RenderContext,
        desc: &TextureDesc,
        depth_extent: (u32, u32),
        source: &str,
    ) -> Result<Self> {
        let mut attachments = Self {
            framebuffer: FramebufferHandle::NULL,
            color_texture: TextureHandle::NULL,
            depth_buffer: RenderbufferHandle::NULL,
            status: FramebufferStatus::Undefined,
        };
        if let Err(err) = attachments.allocate(ctx.device_mut(), desc, depth_extent) {
            engine_error!(source, "Offscreen target creation failed: {}", err);
            attachments.destroy(ctx);
            return Err(err);
        }

        let device = ctx.device_mut();
        attachments.status = device.check_framebuffer_status();
        if !attachments.status.is_complete() {
            engine_error!(
                source,
                "Framebuffer {} not complete: {:?}",
                attachments.framebuffer.raw(),
                attachments.status
            );
        }
        device.bind_framebuffer(None);

        engine_debug!(
            source,
            "Framebuffer {} created with color texture {} ({}x{}x{})",
            attachments.framebuffer.raw(),
            attachments.color_texture.raw(),
            desc.width,
            desc.height,
            desc.depth
        );
        Ok(attachments)
    }

    fn allocate(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: &TextureDesc,
        depth_extent: (u32, u32),
    ) -> Result<()> {
        self.framebuffer = device.create_framebuffer()?;
        device.bind_framebuffer(Some(self.framebuffer));

        self.color_texture = device.create_texture(desc)?;
        device.attach_color_texture(self.color_texture, desc.target, 0);

        self.depth_buffer =
            device.create_renderbuffer(DepthFormat::Depth24, depth_extent.0, depth_extent.1)?;
        device.attach_depth_renderbuffer(self.depth_buffer);
        Ok(())
    }

    /// Delete texture and renderbuffer, rebind the window framebuffer,
    /// then delete the framebuffer
    ///
    /// Null handles are skipped. The window framebuffer is always bound
    /// afterwards.
    pub(crate) fn destroy(self, ctx: &mut RenderContext) {
        let device = ctx.device_mut();
        if !self.color_texture.is_null() {
            device.delete_texture(self.color_texture);
        }
        if !self.depth_buffer.is_null() {
            device.delete_renderbuffer(self.depth_buffer);
        }
        device.bind_framebuffer(None);
        if !self.framebuffer.is_null() {
            device.delete_framebuffer(self.framebuffer);
        }
    }
}
