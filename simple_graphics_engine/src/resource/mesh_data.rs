//! CPU-side triangle mesh data and built-in primitives
//!
//! `MeshData` holds per-vertex positions and normals plus a 16-bit triangle
//! index list. It is validated before upload by `Mesh::new`.

use std::f32::consts::PI;

use glam::Vec3;

use crate::engine_bail;
use crate::error::Result;

/// Indexed triangle list with per-vertex normals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Three indices per triangle
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u16>) -> Self {
        Self { positions, normals, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check the data can be uploaded and drawn as a triangle list
    ///
    /// Rejects empty meshes, a normal count different from the position
    /// count, an index count that is not a multiple of 3 and any index
    /// outside the vertex range.
    pub fn validate(&self) -> Result<()> {
        if self.positions.is_empty() || self.indices.is_empty() {
            engine_bail!(InvalidResource, "sge::MeshData",
                "Mesh is empty ({} vertices, {} indices)",
                self.positions.len(), self.indices.len());
        }
        if self.normals.len() != self.positions.len() {
            engine_bail!(InvalidResource, "sge::MeshData",
                "Normal count {} does not match vertex count {}",
                self.normals.len(), self.positions.len());
        }
        if self.indices.len() % 3 != 0 {
            engine_bail!(InvalidResource, "sge::MeshData",
                "Index count {} is not a multiple of 3",
                self.indices.len());
        }
        let vertex_count = self.positions.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            engine_bail!(InvalidResource, "sge::MeshData",
                "Index {} at position {} is out of range for {} vertices",
                index, position, vertex_count);
        }
        Ok(())
    }

    // ===== PRIMITIVES =====

    /// Axis-aligned unit cube centered on the origin, flat-shaded
    /// (24 vertices, 12 triangles, counter-clockwise outward faces)
    pub fn cube() -> Self {
        // (normal, u, v) with u x v = normal
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut data = Self::default();
        for (normal, u, v) in faces {
            let base = data.positions.len() as u16;
            for corner in [normal - u - v, normal + u - v, normal + u + v, normal - u + v] {
                data.positions.push(corner * 0.5);
                data.normals.push(normal);
            }
            data.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        data
    }

    /// Quad covering [-1, 1] x [-1, 1] in the z = 0 plane, facing +Z
    ///
    /// Drawn with identity transforms it covers the whole viewport, which is
    /// what post-processing passes over render targets need.
    pub fn quad() -> Self {
        Self {
            positions: vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Smooth-shaded sphere of `radius` around the origin
    ///
    /// # Arguments
    ///
    /// * `radius` - Sphere radius
    /// * `rings` - Latitude subdivisions (at least 2)
    /// * `segments` - Longitude subdivisions (at least 3)
    ///
    /// # Returns
    ///
    /// `Error::InvalidResource` if the subdivisions are too small or the
    /// vertex count does not fit 16-bit indices
    pub fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Result<Self> {
        if rings < 2 || segments < 3 {
            engine_bail!(InvalidResource, "sge::MeshData",
                "Sphere needs at least 2 rings and 3 segments (got {}x{})",
                rings, segments);
        }
        let vertex_count = (rings as usize + 1) * (segments as usize + 1);
        if vertex_count > u16::MAX as usize + 1 {
            engine_bail!(InvalidResource, "sge::MeshData",
                "Sphere {}x{} needs {} vertices, more than 16-bit indices can address",
                rings, segments, vertex_count);
        }

        let mut data = Self::default();
        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            for segment in 0..=segments {
                let theta = 2.0 * PI * segment as f32 / segments as f32;
                let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                data.positions.push(normal * radius);
                data.normals.push(normal);
            }
        }

        let stride = segments + 1;
        for ring in 0..rings {
            for segment in 0..segments {
                let a = (ring * stride + segment) as u16;
                let b = a + stride as u16;
                data.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }
        Ok(data)
    }
}

#[cfg(test)]
#[path = "mesh_data_tests.rs"]
mod tests;
