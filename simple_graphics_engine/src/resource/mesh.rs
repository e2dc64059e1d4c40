//! GPU triangle mesh
//!
//! A `Mesh` owns one vertex array and three buffers on the device:
//! positions (attribute slot 0), normals (attribute slot 1) and 16-bit
//! element indices. GPU objects are released explicitly with
//! [`Mesh::destroy`] since releasing them needs the render context.

use glam::Mat4;

use crate::device::{
    BufferHandle, BufferTarget, GraphicsDevice, IndexType, PrimitiveTopology, ProgramHandle,
    UniformValue, VertexArrayHandle, VertexAttrib,
};
use crate::engine_debug;
use crate::error::Result;
use crate::render::RenderContext;
use super::mesh_data::MeshData;

/// Attribute slot of vertex positions
pub const POSITION_SLOT: u32 = 0;
/// Attribute slot of vertex normals
pub const NORMAL_SLOT: u32 = 1;

#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArrayHandle,
    vertex_buffer: BufferHandle,
    normal_buffer: BufferHandle,
    element_buffer: BufferHandle,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Validate `data` and upload it to the device
    ///
    /// # Returns
    ///
    /// `Error::InvalidResource` for malformed data, or the device error if an
    /// object could not be created
    pub fn new(ctx: &mut RenderContext, data: &MeshData) -> Result<Self> {
        data.validate()?;

        let mut mesh = Self {
            vertex_array: VertexArrayHandle::NULL,
            vertex_buffer: BufferHandle::NULL,
            normal_buffer: BufferHandle::NULL,
            element_buffer: BufferHandle::NULL,
            vertex_count: data.vertex_count() as u32,
            index_count: data.index_count() as u32,
        };
        if let Err(err) = mesh.upload(ctx.device_mut(), data) {
            ctx.device_mut().bind_vertex_array(None);
            mesh.destroy(ctx);
            return Err(err);
        }

        engine_debug!(
            "sge::Mesh",
            "Mesh uploaded: {} vertices, {} triangles (vertex array {})",
            data.vertex_count(),
            data.triangle_count(),
            mesh.vertex_array.raw()
        );
        Ok(mesh)
    }

    fn upload(&mut self, device: &mut dyn GraphicsDevice, data: &MeshData) -> Result<()> {
        self.vertex_array = device.create_vertex_array()?;
        device.bind_vertex_array(Some(self.vertex_array));
        self.vertex_buffer =
            device.create_buffer(BufferTarget::Array, bytemuck::cast_slice(&data.positions))?;
        self.normal_buffer =
            device.create_buffer(BufferTarget::Array, bytemuck::cast_slice(&data.normals))?;
        self.element_buffer =
            device.create_buffer(BufferTarget::ElementArray, bytemuck::cast_slice(&data.indices))?;
        Ok(())
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_array(&self) -> VertexArrayHandle {
        self.vertex_array
    }

    /// Draw the mesh with `program`, uploading `model` as uniform `M`
    ///
    /// Attribute slots 0 and 1 are disabled again after the draw.
    pub fn draw(&self, ctx: &mut RenderContext, program: ProgramHandle, model: Mat4) {
        ctx.device_mut().use_program(program);
        ctx.upload_uniform(program, "M", UniformValue::Mat4(model));

        let device = ctx.device_mut();
        device.bind_vertex_array(Some(self.vertex_array));

        device.enable_vertex_attrib(POSITION_SLOT);
        device.bind_buffer(BufferTarget::Array, Some(self.vertex_buffer));
        device.vertex_attrib_pointer(POSITION_SLOT, VertexAttrib::vec3_f32());

        device.enable_vertex_attrib(NORMAL_SLOT);
        device.bind_buffer(BufferTarget::Array, Some(self.normal_buffer));
        device.vertex_attrib_pointer(NORMAL_SLOT, VertexAttrib::vec3_f32());

        device.bind_buffer(BufferTarget::ElementArray, Some(self.element_buffer));
        device.draw_elements(PrimitiveTopology::Triangles, self.index_count, IndexType::U16);

        device.disable_vertex_attrib(POSITION_SLOT);
        device.disable_vertex_attrib(NORMAL_SLOT);

        ctx.record_draw(self.index_count);
    }

    /// Release the buffers and the vertex array
    ///
    /// Null handles (objects never created) are skipped.
    pub fn destroy(self, ctx: &mut RenderContext) {
        let device = ctx.device_mut();
        for buffer in [self.element_buffer, self.normal_buffer, self.vertex_buffer] {
            if !buffer.is_null() {
                device.delete_buffer(buffer);
            }
        }
        if !self.vertex_array.is_null() {
            device.delete_vertex_array(self.vertex_array);
        }
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
