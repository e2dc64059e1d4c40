//! Render tree: transform hierarchy of meshes, cameras and lights

mod camera;
mod light;
mod node;
mod render_tree;

pub use camera::{
    Camera, Projection, FOV_Y_DEGREES, ORTHO_FAR, ORTHO_HALF_HEIGHT, ORTHO_NEAR, PERSPECTIVE_FAR,
    PERSPECTIVE_NEAR,
};
pub use light::Light;
pub use node::{Node, NodeKey, NodeKind};
pub use render_tree::RenderTree;
