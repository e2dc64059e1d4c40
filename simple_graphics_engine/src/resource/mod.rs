//! GPU resources: shader programs and triangle meshes

mod shader_sources;
mod program_registry;
mod mesh_data;
mod mesh;

pub use shader_sources::{ShaderSources, ShaderStage};
pub use program_registry::ProgramRegistry;
pub use mesh_data::MeshData;
pub use mesh::{Mesh, NORMAL_SLOT, POSITION_SLOT};
