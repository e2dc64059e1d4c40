/// GraphicsDevice trait: the immediate-mode GPU state machine the engine drives
///
/// Every engine component talks to the GPU through this trait, so a backend
/// only has to implement it (see `DevicePlugins` for registration). Calls are
/// issued from the thread that owns the window and the device.

use glam::Vec4;

use crate::error::Result;
use crate::resource::ShaderSources;
use super::types::{
    BlendFactor, BufferHandle, BufferTarget, Capability, ClearFlags, DepthFormat, DepthFunc,
    FramebufferHandle, FramebufferStatus, IndexType, PrimitiveTopology, ProgramHandle,
    RenderbufferHandle, TextureDesc, TextureHandle, TextureParameters, TextureTarget,
    UniformLocation, UniformValue, VertexArrayHandle, VertexAttrib, Viewport,
};

pub trait GraphicsDevice {
    // ===== PROGRAMS =====

    /// Compile every stage present in `sources` and link them into a program
    ///
    /// # Returns
    ///
    /// The linked program, or an error carrying the compiler/linker log
    fn create_program(&mut self, sources: &ShaderSources) -> Result<ProgramHandle>;

    fn delete_program(&mut self, program: ProgramHandle);

    /// Make `program` current. The null handle unbinds.
    fn use_program(&mut self, program: ProgramHandle);

    /// Look up a uniform by name, `None` when the program has no such active uniform
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Upload a value to a uniform of the current program
    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue);

    // ===== BUFFERS & VERTEX ARRAYS =====

    /// Generate a buffer, bind it to `target` and upload `data` (static draw)
    ///
    /// The buffer stays bound to `target` afterwards.
    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<BufferHandle>;

    fn delete_buffer(&mut self, buffer: BufferHandle);

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>);

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle>;

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>);

    fn enable_vertex_attrib(&mut self, slot: u32);

    fn disable_vertex_attrib(&mut self, slot: u32);

    /// Source attribute `slot` from the buffer currently bound to `BufferTarget::Array`
    fn vertex_attrib_pointer(&mut self, slot: u32, attrib: VertexAttrib);

    /// Draw `count` indices from the bound element buffer
    fn draw_elements(&mut self, topology: PrimitiveTopology, count: u32, index_type: IndexType);

    // ===== TEXTURES =====

    /// Generate a texture, bind it on the active unit, set sampling state and
    /// allocate storage (no initial data)
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle>;

    fn delete_texture(&mut self, texture: TextureHandle);

    /// Select the texture unit affected by `bind_texture`
    fn active_texture(&mut self, unit: u32);

    /// Bind (or unbind with `None`) a texture on the active unit
    fn bind_texture(&mut self, target: TextureTarget, texture: Option<TextureHandle>);

    fn texture_parameters(&self, texture: TextureHandle) -> Option<TextureParameters>;

    // ===== RENDERBUFFERS & FRAMEBUFFERS =====

    fn create_renderbuffer(
        &mut self,
        format: DepthFormat,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferHandle>;

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferHandle);

    fn create_framebuffer(&mut self) -> Result<FramebufferHandle>;

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle);

    /// Bind a framebuffer object, `None` binds the window's framebuffer
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>);

    fn bound_framebuffer(&self) -> Option<FramebufferHandle>;

    /// Attach a texture (one `layer` of it for 3D textures) as color
    /// attachment 0 of the bound framebuffer
    fn attach_color_texture(&mut self, texture: TextureHandle, target: TextureTarget, layer: u32);

    /// Attach a renderbuffer as depth attachment of the bound framebuffer
    fn attach_depth_renderbuffer(&mut self, renderbuffer: RenderbufferHandle);

    /// Completeness of the bound framebuffer
    fn check_framebuffer_status(&self) -> FramebufferStatus;

    // ===== FIXED-FUNCTION STATE =====

    fn set_viewport(&mut self, viewport: Viewport);

    fn viewport(&self) -> Viewport;

    fn set_capability(&mut self, capability: Capability, enabled: bool);

    fn set_depth_func(&mut self, func: DepthFunc);

    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor);

    fn set_clear_color(&mut self, color: Vec4);

    fn clear(&mut self, flags: ClearFlags);

    // ===== PRESENTATION =====

    /// Swap the window's buffers
    fn present(&mut self);

    /// Size in physical pixels of the window's drawable surface
    fn drawable_size(&self) -> (u32, u32);

    /// Notify the device that the window surface changed size
    fn resize(&mut self, width: u32, height: u32);

    /// Human-readable driver/API version, logged at startup
    fn version_string(&self) -> String;
}
