/// Render-tree node: local transform, ordered children and a payload

use glam::Mat4;
use slotmap::new_key_type;

use crate::resource::Mesh;
use super::camera::Camera;
use super::light::Light;

new_key_type! {
    /// Stable key for a Node within a RenderTree.
    ///
    /// Keys remain valid after other nodes are removed.
    pub struct NodeKey;
}

/// What a node contributes when rendered
#[derive(Debug)]
pub enum NodeKind {
    /// Pure grouping node, draws nothing itself
    Group,
    Mesh(Mesh),
    Camera(Camera),
    Light(Light),
}

impl NodeKind {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Mesh(_) => "mesh",
            NodeKind::Camera(_) => "camera",
            NodeKind::Light(_) => "light",
        }
    }
}

#[derive(Debug)]
pub struct Node {
    pub(crate) transform: Mat4,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            children: Vec::new(),
            kind,
        }
    }

    /// Local transform. For camera nodes this is the view matrix.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    /// Children in render order. The same child may appear more than once.
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }
}
