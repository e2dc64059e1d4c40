/// Headless device: an in-memory GraphicsDevice (no GPU required)
///
/// Tracks the complete driver state the engine relies on (object names,
/// buffer contents, texture parameters, framebuffer attachments, bindings,
/// viewport, per-program uniform values) and records every call as a
/// `DeviceCommand`. Clones share the same state, so a test can keep one
/// copy for inspection while the engine owns the boxed device.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec4;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use crate::resource::ShaderSources;
use crate::{engine_trace, engine_warn};
use super::graphics_device::GraphicsDevice;
use super::types::{
    BlendFactor, BufferHandle, BufferTarget, Capability, ClearFlags, DepthFormat, DepthFunc,
    FramebufferHandle, FramebufferStatus, IndexType, PrimitiveTopology, ProgramHandle,
    RenderbufferHandle, TextureDesc, TextureHandle, TextureParameters, TextureTarget,
    UniformLocation, UniformValue, VertexArrayHandle, VertexAttrib, Viewport,
};

// ============================================================================
// Recorded commands
// ============================================================================

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    CreateProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    SetUniform {
        program: ProgramHandle,
        name: String,
        value: UniformValue,
    },
    CreateBuffer {
        buffer: BufferHandle,
        target: BufferTarget,
        size: usize,
    },
    DeleteBuffer(BufferHandle),
    BindBuffer(BufferTarget, Option<BufferHandle>),
    CreateVertexArray(VertexArrayHandle),
    DeleteVertexArray(VertexArrayHandle),
    BindVertexArray(Option<VertexArrayHandle>),
    EnableVertexAttrib(u32),
    DisableVertexAttrib(u32),
    VertexAttribPointer {
        slot: u32,
        attrib: VertexAttrib,
        buffer: Option<BufferHandle>,
    },
    DrawElements {
        program: ProgramHandle,
        topology: PrimitiveTopology,
        count: u32,
        index_type: IndexType,
    },
    CreateTexture(TextureHandle),
    DeleteTexture(TextureHandle),
    ActiveTexture(u32),
    BindTexture(TextureTarget, Option<TextureHandle>),
    CreateRenderbuffer(RenderbufferHandle),
    DeleteRenderbuffer(RenderbufferHandle),
    CreateFramebuffer(FramebufferHandle),
    DeleteFramebuffer(FramebufferHandle),
    BindFramebuffer(Option<FramebufferHandle>),
    AttachColorTexture {
        texture: TextureHandle,
        layer: u32,
    },
    AttachDepthRenderbuffer(RenderbufferHandle),
    SetViewport(Viewport),
    SetCapability(Capability, bool),
    SetDepthFunc(DepthFunc),
    SetBlendFunc(BlendFactor, BlendFactor),
    SetClearColor(Vec4),
    Clear(ClearFlags),
    Present,
    Resize(u32, u32),
}

/// Number of live objects per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiveObjects {
    pub programs: usize,
    pub buffers: usize,
    pub vertex_arrays: usize,
    pub textures: usize,
    pub renderbuffers: usize,
    pub framebuffers: usize,
}

// ============================================================================
// Internal state
// ============================================================================

struct HeadlessProgram {
    /// Active uniforms in declaration order; the index is the location
    uniforms: Vec<String>,
    values: FxHashMap<i32, UniformValue>,
}

#[derive(Clone, Copy)]
struct Renderbuffer {
    width: u32,
    height: u32,
}

#[derive(Clone, Copy)]
struct ColorAttachment {
    texture: TextureHandle,
    target: TextureTarget,
    layer: u32,
}

#[derive(Default)]
struct Framebuffer {
    color: Option<ColorAttachment>,
    depth: Option<RenderbufferHandle>,
}

struct HeadlessState {
    next_name: u32,
    programs: FxHashMap<ProgramHandle, HeadlessProgram>,
    current_program: ProgramHandle,
    buffers: FxHashMap<BufferHandle, Vec<u8>>,
    buffer_bindings: FxHashMap<BufferTarget, BufferHandle>,
    vertex_arrays: FxHashSet<VertexArrayHandle>,
    bound_vertex_array: Option<VertexArrayHandle>,
    enabled_attribs: FxHashSet<u32>,
    textures: FxHashMap<TextureHandle, TextureParameters>,
    active_unit: u32,
    texture_bindings: FxHashMap<(u32, TextureTarget), TextureHandle>,
    renderbuffers: FxHashMap<RenderbufferHandle, Renderbuffer>,
    framebuffers: FxHashMap<FramebufferHandle, Framebuffer>,
    bound_framebuffer: Option<FramebufferHandle>,
    viewport: Viewport,
    capabilities: FxHashSet<Capability>,
    depth_func: DepthFunc,
    blend_func: (BlendFactor, BlendFactor),
    clear_color: Vec4,
    drawable_size: (u32, u32),
    presented_frames: u64,
    recording: bool,
    commands: Vec<DeviceCommand>,
    /// Live objects allowed before creation fails with `OutOfMemory`
    object_limit: Option<usize>,
}

impl HeadlessState {
    fn allocate_name(&mut self) -> Result<u32> {
        if let Some(limit) = self.object_limit {
            if self.live_object_count() >= limit {
                return Err(Error::OutOfMemory);
            }
        }
        self.next_name += 1;
        Ok(self.next_name)
    }

    fn live_object_count(&self) -> usize {
        self.programs.len()
            + self.buffers.len()
            + self.vertex_arrays.len()
            + self.textures.len()
            + self.renderbuffers.len()
            + self.framebuffers.len()
    }

    fn push(&mut self, command: DeviceCommand) {
        if self.recording {
            self.commands.push(command);
        }
    }

    fn framebuffer_status(&self, framebuffer: FramebufferHandle) -> FramebufferStatus {
        let Some(fb) = self.framebuffers.get(&framebuffer) else {
            return FramebufferStatus::Undefined;
        };
        let Some(color) = fb.color else {
            return FramebufferStatus::MissingAttachment;
        };
        let Some(texture) = self.textures.get(&color.texture) else {
            return FramebufferStatus::IncompleteAttachment;
        };
        if texture.target != color.target || texture.width == 0 || texture.height == 0 {
            return FramebufferStatus::IncompleteAttachment;
        }
        if texture.target == TextureTarget::Texture3D && color.layer >= texture.depth {
            return FramebufferStatus::IncompleteAttachment;
        }
        if let Some(depth) = fb.depth {
            let Some(rb) = self.renderbuffers.get(&depth) else {
                return FramebufferStatus::IncompleteAttachment;
            };
            if rb.width == 0 || rb.height == 0 {
                return FramebufferStatus::IncompleteAttachment;
            }
            if (rb.width, rb.height) != (texture.width, texture.height) {
                return FramebufferStatus::IncompleteDimensions;
            }
        }
        FramebufferStatus::Complete
    }
}

/// Names of the uniforms declared in a GLSL source, in order
fn declared_uniforms(source: &str) -> impl Iterator<Item = &str> {
    source.lines().filter_map(|line| {
        let declaration = line.trim().strip_prefix("uniform ")?;
        let declaration = declaration.split(';').next()?;
        let name = declaration.split_whitespace().last()?;
        name.split('[').next()
    })
}

// ============================================================================
// HeadlessDevice
// ============================================================================

/// In-memory GraphicsDevice
#[derive(Clone)]
pub struct HeadlessDevice {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessDevice {
    /// Create a headless device whose window surface is `width x height`
    ///
    /// The initial viewport covers the whole surface, as on a freshly
    /// created window context.
    pub fn new(width: u32, height: u32) -> Self {
        let state = HeadlessState {
            next_name: 0,
            programs: FxHashMap::default(),
            current_program: ProgramHandle::NULL,
            buffers: FxHashMap::default(),
            buffer_bindings: FxHashMap::default(),
            vertex_arrays: FxHashSet::default(),
            bound_vertex_array: None,
            enabled_attribs: FxHashSet::default(),
            textures: FxHashMap::default(),
            active_unit: 0,
            texture_bindings: FxHashMap::default(),
            renderbuffers: FxHashMap::default(),
            framebuffers: FxHashMap::default(),
            bound_framebuffer: None,
            viewport: Viewport::from_size(width as i32, height as i32),
            capabilities: FxHashSet::default(),
            depth_func: DepthFunc::Less,
            blend_func: (BlendFactor::One, BlendFactor::Zero),
            clear_color: Vec4::ZERO,
            drawable_size: (width, height),
            presented_frames: 0,
            recording: true,
            commands: Vec::new(),
            object_limit: None,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    // ===== INSPECTION =====

    /// Every call recorded so far, in order
    pub fn commands(&self) -> Vec<DeviceCommand> {
        self.state.borrow().commands.clone()
    }

    /// Return the recorded calls and start a new recording
    pub fn take_commands(&self) -> Vec<DeviceCommand> {
        std::mem::take(&mut self.state.borrow_mut().commands)
    }

    /// Contents of a live buffer
    pub fn buffer_data(&self, buffer: BufferHandle) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    /// Last value uploaded to `name` in `program`
    pub fn uniform_value(&self, program: ProgramHandle, name: &str) -> Option<UniformValue> {
        let state = self.state.borrow();
        let program = state.programs.get(&program)?;
        let index = program.uniforms.iter().position(|u| u == name)?;
        program.values.get(&(index as i32)).copied()
    }

    pub fn current_program(&self) -> ProgramHandle {
        self.state.borrow().current_program
    }

    pub fn active_texture_unit(&self) -> u32 {
        self.state.borrow().active_unit
    }

    /// Texture bound to `target` on texture `unit`
    pub fn bound_texture(&self, unit: u32, target: TextureTarget) -> Option<TextureHandle> {
        self.state.borrow().texture_bindings.get(&(unit, target)).copied()
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferHandle> {
        self.state.borrow().buffer_bindings.get(&target).copied()
    }

    pub fn bound_vertex_array(&self) -> Option<VertexArrayHandle> {
        self.state.borrow().bound_vertex_array
    }

    /// Attribute slots currently enabled, sorted
    pub fn enabled_vertex_attribs(&self) -> Vec<u32> {
        let mut slots: Vec<u32> = self.state.borrow().enabled_attribs.iter().copied().collect();
        slots.sort_unstable();
        slots
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.state.borrow().capabilities.contains(&capability)
    }

    pub fn depth_func(&self) -> DepthFunc {
        self.state.borrow().depth_func
    }

    pub fn blend_func(&self) -> (BlendFactor, BlendFactor) {
        self.state.borrow().blend_func
    }

    pub fn clear_color(&self) -> Vec4 {
        self.state.borrow().clear_color
    }

    pub fn presented_frames(&self) -> u64 {
        self.state.borrow().presented_frames
    }

    /// Completeness of any framebuffer, bound or not
    pub fn framebuffer_status(&self, framebuffer: FramebufferHandle) -> FramebufferStatus {
        self.state.borrow().framebuffer_status(framebuffer)
    }

    pub fn live_objects(&self) -> LiveObjects {
        let state = self.state.borrow();
        LiveObjects {
            programs: state.programs.len(),
            buffers: state.buffers.len(),
            vertex_arrays: state.vertex_arrays.len(),
            textures: state.textures.len(),
            renderbuffers: state.renderbuffers.len(),
            framebuffers: state.framebuffers.len(),
        }
    }

    /// Simulate the window surface changing size
    ///
    /// Only the drawable size changes; the viewport is left to the caller.
    pub fn set_drawable_size(&self, width: u32, height: u32) {
        self.state.borrow_mut().drawable_size = (width, height);
    }

    /// Turn call recording on or off
    ///
    /// Recording is on for new devices. Turned off, the device keeps its
    /// state but `commands()` stays empty, which is what long-running
    /// windowed use needs.
    pub fn set_recording(&self, recording: bool) {
        self.state.borrow_mut().recording = recording;
    }

    pub fn is_recording(&self) -> bool {
        self.state.borrow().recording
    }

    /// Make object creation fail with `Error::OutOfMemory` once `limit`
    /// objects are alive (`None` removes the limit)
    pub fn set_object_limit(&self, limit: Option<usize>) {
        self.state.borrow_mut().object_limit = limit;
    }

    fn record(&self, command: DeviceCommand) {
        self.state.borrow_mut().push(command);
    }
}

impl GraphicsDevice for HeadlessDevice {
    // ===== PROGRAMS =====

    fn create_program(&mut self, sources: &ShaderSources) -> Result<ProgramHandle> {
        if sources.tess_control.is_some() && sources.tess_evaluation.is_none() {
            return Err(Error::BackendError(
                "link failed: tessellation control stage without evaluation stage".to_string(),
            ));
        }

        let mut uniforms: Vec<String> = Vec::new();
        for (stage, source) in sources.stages() {
            if source.trim().is_empty() {
                return Err(Error::BackendError(format!(
                    "{} shader failed to compile: empty source",
                    stage
                )));
            }
            if !source.contains("void main") {
                return Err(Error::BackendError(format!(
                    "{} shader failed to compile: missing entry point 'main'",
                    stage
                )));
            }
            for name in declared_uniforms(source) {
                if !uniforms.iter().any(|u| u == name) {
                    uniforms.push(name.to_string());
                }
            }
        }

        let mut state = self.state.borrow_mut();
        let program = ProgramHandle(state.allocate_name()?);
        state.programs.insert(
            program,
            HeadlessProgram {
                uniforms,
                values: FxHashMap::default(),
            },
        );
        state.push(DeviceCommand::CreateProgram(program));
        Ok(program)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        if state.current_program == program {
            state.current_program = ProgramHandle::NULL;
        }
        state.push(DeviceCommand::DeleteProgram(program));
    }

    fn use_program(&mut self, program: ProgramHandle) {
        let mut state = self.state.borrow_mut();
        state.current_program = program;
        state.push(DeviceCommand::UseProgram(program));
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let state = self.state.borrow();
        let index = state
            .programs
            .get(&program)?
            .uniforms
            .iter()
            .position(|u| u == name)?;
        Some(UniformLocation {
            program,
            index: index as i32,
        })
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let mut state = self.state.borrow_mut();
        if state.current_program != location.program {
            drop(state);
            engine_warn!(
                "sge::HeadlessDevice",
                "Uniform upload to program {} while program {} is current, ignored",
                location.program.raw(),
                self.current_program().raw()
            );
            return;
        }
        let Some(program) = state.programs.get_mut(&location.program) else {
            return;
        };
        let Some(name) = program.uniforms.get(location.index as usize).cloned() else {
            return;
        };
        program.values.insert(location.index, value);
        state.push(DeviceCommand::SetUniform {
            program: location.program,
            name,
            value,
        });
    }

    // ===== BUFFERS & VERTEX ARRAYS =====

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<BufferHandle> {
        let mut state = self.state.borrow_mut();
        let buffer = BufferHandle(state.allocate_name()?);
        state.buffers.insert(buffer, data.to_vec());
        state.buffer_bindings.insert(target, buffer);
        state.push(DeviceCommand::CreateBuffer {
            buffer,
            target,
            size: data.len(),
        });
        Ok(buffer)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        state.buffer_bindings.retain(|_, bound| *bound != buffer);
        state.push(DeviceCommand::DeleteBuffer(buffer));
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        let mut state = self.state.borrow_mut();
        match buffer {
            Some(buffer) => state.buffer_bindings.insert(target, buffer),
            None => state.buffer_bindings.remove(&target),
        };
        state.push(DeviceCommand::BindBuffer(target, buffer));
    }

    fn create_vertex_array(&mut self) -> Result<VertexArrayHandle> {
        let mut state = self.state.borrow_mut();
        let vertex_array = VertexArrayHandle(state.allocate_name()?);
        state.vertex_arrays.insert(vertex_array);
        state.push(DeviceCommand::CreateVertexArray(vertex_array));
        Ok(vertex_array)
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(&vertex_array);
        if state.bound_vertex_array == Some(vertex_array) {
            state.bound_vertex_array = None;
        }
        state.push(DeviceCommand::DeleteVertexArray(vertex_array));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        let mut state = self.state.borrow_mut();
        state.bound_vertex_array = vertex_array;
        state.push(DeviceCommand::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attrib(&mut self, slot: u32) {
        let mut state = self.state.borrow_mut();
        state.enabled_attribs.insert(slot);
        state.push(DeviceCommand::EnableVertexAttrib(slot));
    }

    fn disable_vertex_attrib(&mut self, slot: u32) {
        let mut state = self.state.borrow_mut();
        state.enabled_attribs.remove(&slot);
        state.push(DeviceCommand::DisableVertexAttrib(slot));
    }

    fn vertex_attrib_pointer(&mut self, slot: u32, attrib: VertexAttrib) {
        let mut state = self.state.borrow_mut();
        let buffer = state.buffer_bindings.get(&BufferTarget::Array).copied();
        state.push(DeviceCommand::VertexAttribPointer { slot, attrib, buffer });
    }

    fn draw_elements(&mut self, topology: PrimitiveTopology, count: u32, index_type: IndexType) {
        let program = self.current_program();
        if program.is_null() {
            engine_warn!(
                "sge::HeadlessDevice",
                "draw_elements({}) issued with no program in use",
                count
            );
        }
        self.record(DeviceCommand::DrawElements {
            program,
            topology,
            count,
            index_type,
        });
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        let mut state = self.state.borrow_mut();
        let texture = TextureHandle(state.allocate_name()?);
        let depth = match desc.target {
            TextureTarget::Texture2D => 1,
            TextureTarget::Texture3D => desc.depth,
        };
        state.textures.insert(
            texture,
            TextureParameters {
                target: desc.target,
                width: desc.width,
                height: desc.height,
                depth,
                format: desc.format,
                min_filter: desc.min_filter,
                mag_filter: desc.mag_filter,
                wrap_s: desc.wrap,
                wrap_t: desc.wrap,
                wrap_r: desc.wrap,
            },
        );
        let unit = state.active_unit;
        state.texture_bindings.insert((unit, desc.target), texture);
        state.push(DeviceCommand::CreateTexture(texture));
        Ok(texture)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        let mut state = self.state.borrow_mut();
        state.textures.remove(&texture);
        state.texture_bindings.retain(|_, bound| *bound != texture);
        state.push(DeviceCommand::DeleteTexture(texture));
    }

    fn active_texture(&mut self, unit: u32) {
        let mut state = self.state.borrow_mut();
        state.active_unit = unit;
        state.push(DeviceCommand::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: Option<TextureHandle>) {
        let mut state = self.state.borrow_mut();
        let unit = state.active_unit;
        match texture {
            Some(texture) => state.texture_bindings.insert((unit, target), texture),
            None => state.texture_bindings.remove(&(unit, target)),
        };
        state.push(DeviceCommand::BindTexture(target, texture));
    }

    fn texture_parameters(&self, texture: TextureHandle) -> Option<TextureParameters> {
        self.state.borrow().textures.get(&texture).copied()
    }

    // ===== RENDERBUFFERS & FRAMEBUFFERS =====

    fn create_renderbuffer(
        &mut self,
        _format: DepthFormat,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferHandle> {
        let mut state = self.state.borrow_mut();
        let renderbuffer = RenderbufferHandle(state.allocate_name()?);
        state.renderbuffers.insert(renderbuffer, Renderbuffer { width, height });
        state.push(DeviceCommand::CreateRenderbuffer(renderbuffer));
        Ok(renderbuffer)
    }

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferHandle) {
        let mut state = self.state.borrow_mut();
        state.renderbuffers.remove(&renderbuffer);
        state.push(DeviceCommand::DeleteRenderbuffer(renderbuffer));
    }

    fn create_framebuffer(&mut self) -> Result<FramebufferHandle> {
        let mut state = self.state.borrow_mut();
        let framebuffer = FramebufferHandle(state.allocate_name()?);
        state.framebuffers.insert(framebuffer, Framebuffer::default());
        state.push(DeviceCommand::CreateFramebuffer(framebuffer));
        Ok(framebuffer)
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        let mut state = self.state.borrow_mut();
        state.framebuffers.remove(&framebuffer);
        if state.bound_framebuffer == Some(framebuffer) {
            state.bound_framebuffer = None;
        }
        state.push(DeviceCommand::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) {
        let mut state = self.state.borrow_mut();
        state.bound_framebuffer = framebuffer;
        state.push(DeviceCommand::BindFramebuffer(framebuffer));
    }

    fn bound_framebuffer(&self) -> Option<FramebufferHandle> {
        self.state.borrow().bound_framebuffer
    }

    fn attach_color_texture(&mut self, texture: TextureHandle, target: TextureTarget, layer: u32) {
        let mut state = self.state.borrow_mut();
        let Some(bound) = state.bound_framebuffer else {
            drop(state);
            engine_warn!(
                "sge::HeadlessDevice",
                "Color attachment of texture {} ignored: window framebuffer is bound",
                texture.raw()
            );
            return;
        };
        if let Some(fb) = state.framebuffers.get_mut(&bound) {
            fb.color = Some(ColorAttachment { texture, target, layer });
        }
        state.push(DeviceCommand::AttachColorTexture { texture, layer });
    }

    fn attach_depth_renderbuffer(&mut self, renderbuffer: RenderbufferHandle) {
        let mut state = self.state.borrow_mut();
        let Some(bound) = state.bound_framebuffer else {
            drop(state);
            engine_warn!(
                "sge::HeadlessDevice",
                "Depth attachment of renderbuffer {} ignored: window framebuffer is bound",
                renderbuffer.raw()
            );
            return;
        };
        if let Some(fb) = state.framebuffers.get_mut(&bound) {
            fb.depth = Some(renderbuffer);
        }
        state.push(DeviceCommand::AttachDepthRenderbuffer(renderbuffer));
    }

    fn check_framebuffer_status(&self) -> FramebufferStatus {
        let state = self.state.borrow();
        match state.bound_framebuffer {
            // The window framebuffer is always complete
            None => FramebufferStatus::Complete,
            Some(framebuffer) => state.framebuffer_status(framebuffer),
        }
    }

    // ===== FIXED-FUNCTION STATE =====

    fn set_viewport(&mut self, viewport: Viewport) {
        let mut state = self.state.borrow_mut();
        state.viewport = viewport;
        state.push(DeviceCommand::SetViewport(viewport));
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if enabled {
            state.capabilities.insert(capability);
        } else {
            state.capabilities.remove(&capability);
        }
        state.push(DeviceCommand::SetCapability(capability, enabled));
    }

    fn set_depth_func(&mut self, func: DepthFunc) {
        let mut state = self.state.borrow_mut();
        state.depth_func = func;
        state.push(DeviceCommand::SetDepthFunc(func));
    }

    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        let mut state = self.state.borrow_mut();
        state.blend_func = (src, dst);
        state.push(DeviceCommand::SetBlendFunc(src, dst));
    }

    fn set_clear_color(&mut self, color: Vec4) {
        let mut state = self.state.borrow_mut();
        state.clear_color = color;
        state.push(DeviceCommand::SetClearColor(color));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.record(DeviceCommand::Clear(flags));
    }

    // ===== PRESENTATION =====

    fn present(&mut self) {
        let mut state = self.state.borrow_mut();
        state.presented_frames += 1;
        state.push(DeviceCommand::Present);
        engine_trace!("sge::HeadlessDevice", "Frame {} presented", state.presented_frames);
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.state.borrow().drawable_size
    }

    fn resize(&mut self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        state.drawable_size = (width, height);
        state.push(DeviceCommand::Resize(width, height));
    }

    fn version_string(&self) -> String {
        format!("Headless device ({} {})", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
