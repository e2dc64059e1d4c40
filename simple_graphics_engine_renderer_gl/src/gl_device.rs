//! OpenGL implementation of `GraphicsDevice`
//!
//! Engine handles carry the raw GL object names, so no translation table is
//! needed. The device tracks the little state GL makes awkward to query
//! (viewport, framebuffer and texture bindings, texture descriptors) and
//! reads sampling filters back from the driver.

use std::num::NonZeroU32;

use glam::Vec4;
use glow::HasContext;
use rustc_hash::FxHashMap;
use winit::window::Window;

use simple_graphics_engine::device::{
    BlendFactor, BufferHandle, BufferTarget, Capability, ClearFlags, DepthFormat, DepthFunc,
    FramebufferHandle, FramebufferStatus, GraphicsDevice, IndexType, PrimitiveTopology,
    ProgramHandle, RenderbufferHandle, TextureDesc, TextureHandle, TextureParameters,
    TextureTarget, UniformLocation, UniformValue, VertexArrayHandle, VertexAttrib, Viewport,
};
use simple_graphics_engine::resource::ShaderSources;
use simple_graphics_engine::sge::{EngineConfig, Result};
use simple_graphics_engine::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};

use crate::gl_context::GlContext;
use crate::gl_format::{
    attrib_type_to_gl, blend_factor_to_gl, buffer_target_to_gl, capability_to_gl,
    clear_mask_to_gl, depth_format_to_gl, depth_func_to_gl, filter_from_gl, filter_to_gl,
    framebuffer_status_from_gl, index_type_to_gl, pixel_transfer_to_gl, shader_stage_to_gl,
    texture_format_to_gl, texture_target_to_gl, topology_to_gl, wrap_to_gl,
};

const SOURCE: &str = "sge::GlDevice";

// ===== HANDLE CONVERSION =====

fn gl_program(program: ProgramHandle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(program.raw()).map(glow::NativeProgram)
}

fn gl_buffer(buffer: BufferHandle) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(buffer.raw()).map(glow::NativeBuffer)
}

fn gl_vertex_array(vertex_array: VertexArrayHandle) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(vertex_array.raw()).map(glow::NativeVertexArray)
}

fn gl_texture(texture: TextureHandle) -> Option<glow::NativeTexture> {
    NonZeroU32::new(texture.raw()).map(glow::NativeTexture)
}

fn gl_renderbuffer(renderbuffer: RenderbufferHandle) -> Option<glow::NativeRenderbuffer> {
    NonZeroU32::new(renderbuffer.raw()).map(glow::NativeRenderbuffer)
}

fn gl_framebuffer(framebuffer: FramebufferHandle) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(framebuffer.raw()).map(glow::NativeFramebuffer)
}

/// OpenGL 4.1 core device bound to one window
pub struct GlDevice {
    context: GlContext,
    textures: FxHashMap<TextureHandle, TextureDesc>,
    active_unit: u32,
    texture_bindings: FxHashMap<(u32, TextureTarget), TextureHandle>,
    bound_framebuffer: Option<FramebufferHandle>,
    viewport: Viewport,
    drawable_size: (u32, u32),
}

impl GlDevice {
    /// Create the context for `window` and make it current on this thread
    ///
    /// # Returns
    ///
    /// `Error::InitializationFailed` if no GL 4.1 core context can be created
    pub fn new(window: &Window, config: &EngineConfig) -> Result<Self> {
        let context = GlContext::new(window)?;
        let size = window.inner_size();
        let device = Self {
            context,
            textures: FxHashMap::default(),
            active_unit: 0,
            texture_bindings: FxHashMap::default(),
            bound_framebuffer: None,
            viewport: Viewport::from_size(size.width as i32, size.height as i32),
            drawable_size: (size.width, size.height),
        };
        engine_info!(
            SOURCE,
            "OpenGL device created for '{}' ({}x{})",
            config.title,
            size.width,
            size.height
        );
        Ok(device)
    }

    fn gl(&self) -> &glow::Context {
        &self.context.gl
    }

    fn compile_stages(&self, sources: &ShaderSources) -> Result<Vec<glow::NativeShader>> {
        let gl = self.gl();
        let mut shaders = Vec::new();
        for (stage, source) in sources.stages() {
            let shader = match unsafe { gl.create_shader(shader_stage_to_gl(stage)) } {
                Ok(shader) => shader,
                Err(err) => {
                    delete_shaders(gl, &shaders);
                    engine_bail!(BackendError, SOURCE, "Failed to create {} shader: {}", stage, err);
                }
            };
            shaders.push(shader);
            unsafe {
                gl.shader_source(shader, source);
                gl.compile_shader(shader);
            }
            if !unsafe { gl.get_shader_compile_status(shader) } {
                let info = unsafe { gl.get_shader_info_log(shader) };
                delete_shaders(gl, &shaders);
                engine_bail!(BackendError, SOURCE, "{} shader failed to compile: {}", stage, info.trim());
            }
        }
        Ok(shaders)
    }
}

fn delete_shaders(gl: &glow::Context, shaders: &[glow::NativeShader]) {
    for &shader in shaders {
        unsafe { gl.delete_shader(shader) };
    }
}

impl GraphicsDevice for GlDevice {
    // ===== PROGRAMS =====

    fn create_program(&mut self, sources: &ShaderSources) -> Result<ProgramHandle> {
        let shaders = self.compile_stages(sources)?;
        let gl = self.gl();

        let program = match unsafe { gl.create_program() } {
            Ok(program) => program,
            Err(err) => {
                delete_shaders(gl, &shaders);
                engine_bail!(BackendError, SOURCE, "Failed to create program: {}", err);
            }
        };
        unsafe {
            for &shader in &shaders {
                gl.attach_shader(program, shader);
            }
            gl.link_program(program);
            for &shader in &shaders {
                gl.detach_shader(program, shader);
            }
        }
        delete_shaders(gl, &shaders);

        if !unsafe { gl.get_program_link_status(program) } {
            let info = unsafe { gl.get_program_info_log(program) };
            unsafe { gl.delete_program(program) };
            engine_bail!(BackendError, SOURCE, "Program failed to link: {}", info.trim());
        }

        engine_debug!(SOURCE, "Program {} linked ({} stages)", program.0, shaders.len());
        Ok(ProgramHandle(program.0.get()))
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if let Some(program) = gl_program(program) {
            unsafe { self.gl().delete_program(program) };
        }
    }

    fn use_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl().use_program(gl_program(program)) };
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let location = unsafe { self.gl().get_uniform_location(gl_program(program)?, name) }?;
        Some(UniformLocation {
            program,
            index: location.0 as i32,
        })
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let gl_location = glow::NativeUniformLocation(location.index as u32);
        let gl = self.gl();
        unsafe {
            match value {
                UniformValue::Int(v) => gl.uniform_1_i32(Some(&gl_location), v),
                UniformValue::Float(v) => gl.uniform_1_f32(Some(&gl_location), v),
                UniformValue::Vec3(v) => gl.uniform_3_f32(Some(&gl_location), v.x, v.y, v.z),
                UniformValue::Vec4(v) => gl.uniform_4_f32(Some(&gl_location), v.x, v.y, v.z, v.w),
                UniformValue::Mat4(m) => {
                    gl.uniform_matrix_4_f32_slice(Some(&gl_location), false, &m.to_cols_array())
                }
            }
        }
    }

    // ===== BUFFERS & VERTEX ARRAYS =====

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<BufferHandle> {
        let gl = self.gl();
        let buffer = unsafe { gl.create_buffer() }
            .map_err(|e| engine_err!(BackendError, SOURCE, "Failed to create buffer: {}", e))?;
        let target = buffer_target_to_gl(target);
        unsafe {
            gl.bind_buffer(target, Some(buffer));
            gl.buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
        }
        Ok(BufferHandle(buffer.0.get()))
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if let Some(buffer) = gl_buffer(buffer) {
            unsafe { self.gl().delete_buffer(buffer) };
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        let buffer = buffer.and_then(gl_buffer);
        unsafe { self.gl().bind_buffer(buffer_target_to_gl(target), buffer) };
    }

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle> {
        let vertex_array = unsafe { self.gl().create_vertex_array() }
            .map_err(|e| engine_err!(BackendError, SOURCE, "Failed to create vertex array: {}", e))?;
        Ok(VertexArrayHandle(vertex_array.0.get()))
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        if let Some(vertex_array) = gl_vertex_array(vertex_array) {
            unsafe { self.gl().delete_vertex_array(vertex_array) };
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        let vertex_array = vertex_array.and_then(gl_vertex_array);
        unsafe { self.gl().bind_vertex_array(vertex_array) };
    }

    fn enable_vertex_attrib(&mut self, slot: u32) {
        unsafe { self.gl().enable_vertex_attrib_array(slot) };
    }

    fn disable_vertex_attrib(&mut self, slot: u32) {
        unsafe { self.gl().disable_vertex_attrib_array(slot) };
    }

    fn vertex_attrib_pointer(&mut self, slot: u32, attrib: VertexAttrib) {
        unsafe {
            self.gl().vertex_attrib_pointer_f32(
                slot,
                attrib.components as i32,
                attrib_type_to_gl(attrib.kind),
                attrib.normalized,
                attrib.stride as i32,
                attrib.offset as i32,
            )
        };
    }

    fn draw_elements(&mut self, topology: PrimitiveTopology, count: u32, index_type: IndexType) {
        unsafe {
            self.gl().draw_elements(
                topology_to_gl(topology),
                count as i32,
                index_type_to_gl(index_type),
                0,
            )
        };
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        let gl = self.gl();
        let texture = unsafe { gl.create_texture() }
            .map_err(|e| engine_err!(BackendError, SOURCE, "Failed to create texture: {}", e))?;
        let target = texture_target_to_gl(desc.target);
        let internal_format = texture_format_to_gl(desc.format) as i32;
        let (format, kind) = pixel_transfer_to_gl(desc.transfer);
        let wrap = wrap_to_gl(desc.wrap) as i32;

        unsafe {
            gl.bind_texture(target, Some(texture));
            gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, filter_to_gl(desc.min_filter) as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, filter_to_gl(desc.mag_filter) as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, wrap);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, wrap);
            match desc.target {
                TextureTarget::Texture2D => gl.tex_image_2d(
                    target,
                    0,
                    internal_format,
                    desc.width as i32,
                    desc.height as i32,
                    0,
                    format,
                    kind,
                    None,
                ),
                TextureTarget::Texture3D => {
                    gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_R, wrap);
                    gl.tex_image_3d(
                        target,
                        0,
                        internal_format,
                        desc.width as i32,
                        desc.height as i32,
                        desc.depth as i32,
                        0,
                        format,
                        kind,
                        None,
                    )
                }
            }
        }

        let handle = TextureHandle(texture.0.get());
        self.texture_bindings.insert((self.active_unit, desc.target), handle);
        self.textures.insert(handle, desc.clone());
        Ok(handle)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if let Some(gl_texture) = gl_texture(texture) {
            unsafe { self.gl().delete_texture(gl_texture) };
        }
        self.textures.remove(&texture);
        self.texture_bindings.retain(|_, bound| *bound != texture);
    }

    fn active_texture(&mut self, unit: u32) {
        self.active_unit = unit;
        unsafe { self.gl().active_texture(glow::TEXTURE0 + unit) };
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: Option<TextureHandle>) {
        unsafe {
            self.gl()
                .bind_texture(texture_target_to_gl(target), texture.and_then(gl_texture))
        };
        match texture {
            Some(texture) => {
                self.texture_bindings.insert((self.active_unit, target), texture);
            }
            None => {
                self.texture_bindings.remove(&(self.active_unit, target));
            }
        }
    }

    /// Extent, format and wrap come from the creation descriptor, filters
    /// are read back from the driver
    fn texture_parameters(&self, texture: TextureHandle) -> Option<TextureParameters> {
        let desc = self.textures.get(&texture)?;
        let target = texture_target_to_gl(desc.target);
        let previous = self
            .texture_bindings
            .get(&(self.active_unit, desc.target))
            .copied()
            .and_then(gl_texture);

        let gl = self.gl();
        let (min_filter, mag_filter) = unsafe {
            gl.bind_texture(target, gl_texture(texture));
            let min = gl.get_tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER);
            let mag = gl.get_tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER);
            gl.bind_texture(target, previous);
            (min, mag)
        };

        Some(TextureParameters {
            target: desc.target,
            width: desc.width,
            height: desc.height,
            depth: match desc.target {
                TextureTarget::Texture2D => 1,
                TextureTarget::Texture3D => desc.depth,
            },
            format: desc.format,
            min_filter: filter_from_gl(min_filter).unwrap_or(desc.min_filter),
            mag_filter: filter_from_gl(mag_filter).unwrap_or(desc.mag_filter),
            wrap_s: desc.wrap,
            wrap_t: desc.wrap,
            wrap_r: desc.wrap,
        })
    }

    // ===== RENDERBUFFERS & FRAMEBUFFERS =====

    fn create_renderbuffer(
        &mut self,
        format: DepthFormat,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferHandle> {
        let gl = self.gl();
        let renderbuffer = unsafe { gl.create_renderbuffer() }
            .map_err(|e| engine_err!(BackendError, SOURCE, "Failed to create renderbuffer: {}", e))?;
        unsafe {
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                depth_format_to_gl(format),
                width as i32,
                height as i32,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }
        Ok(RenderbufferHandle(renderbuffer.0.get()))
    }

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferHandle) {
        if let Some(renderbuffer) = gl_renderbuffer(renderbuffer) {
            unsafe { self.gl().delete_renderbuffer(renderbuffer) };
        }
    }

    fn create_framebuffer(&mut self) -> Result<FramebufferHandle> {
        let framebuffer = unsafe { self.gl().create_framebuffer() }
            .map_err(|e| engine_err!(BackendError, SOURCE, "Failed to create framebuffer: {}", e))?;
        Ok(FramebufferHandle(framebuffer.0.get()))
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        if self.bound_framebuffer == Some(framebuffer) {
            self.bound_framebuffer = None;
        }
        if let Some(framebuffer) = gl_framebuffer(framebuffer) {
            unsafe { self.gl().delete_framebuffer(framebuffer) };
        }
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) {
        self.bound_framebuffer = framebuffer;
        unsafe {
            self.gl()
                .bind_framebuffer(glow::FRAMEBUFFER, framebuffer.and_then(gl_framebuffer))
        };
    }

    fn bound_framebuffer(&self) -> Option<FramebufferHandle> {
        self.bound_framebuffer
    }

    fn attach_color_texture(&mut self, texture: TextureHandle, target: TextureTarget, layer: u32) {
        let gl = self.gl();
        unsafe {
            match target {
                TextureTarget::Texture2D => gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::TEXTURE_2D,
                    gl_texture(texture),
                    0,
                ),
                TextureTarget::Texture3D => gl.framebuffer_texture_layer(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    gl_texture(texture),
                    0,
                    layer as i32,
                ),
            }
        }
    }

    fn attach_depth_renderbuffer(&mut self, renderbuffer: RenderbufferHandle) {
        unsafe {
            self.gl().framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                gl_renderbuffer(renderbuffer),
            )
        };
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        let status = unsafe { self.gl().check_framebuffer_status(glow::FRAMEBUFFER) };
        framebuffer_status_from_gl(status)
    }

    // ===== FIXED-FUNCTION STATE =====

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        unsafe {
            self.gl()
                .viewport(viewport.x, viewport.y, viewport.width, viewport.height)
        };
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let capability = capability_to_gl(capability);
        unsafe {
            if enabled {
                self.gl().enable(capability);
            } else {
                self.gl().disable(capability);
            }
        }
    }

    fn set_depth_func(&mut self, func: DepthFunc) {
        unsafe { self.gl().depth_func(depth_func_to_gl(func)) };
    }

    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        unsafe {
            self.gl()
                .blend_func(blend_factor_to_gl(src), blend_factor_to_gl(dst))
        };
    }

    fn set_clear_color(&mut self, color: Vec4) {
        unsafe { self.gl().clear_color(color.x, color.y, color.z, color.w) };
    }

    fn clear(&mut self, flags: ClearFlags) {
        unsafe { self.gl().clear(clear_mask_to_gl(flags)) };
    }

    // ===== PRESENTATION =====

    fn present(&mut self) {
        self.context.swap_buffers();
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.drawable_size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.drawable_size = (width, height);
        self.context.resize(width, height);
    }

    fn version_string(&self) -> String {
        let gl = self.gl();
        let (version, renderer, glsl) = unsafe {
            (
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
                gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            )
        };
        if version.is_empty() {
            engine_warn!(SOURCE, "Driver reported an empty GL version");
        }
        format!("OpenGL {} on {} (GLSL {})", version, renderer, glsl)
    }
}
