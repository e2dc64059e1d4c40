/// RenderTree: arena of render-tree nodes linked parent → children
///
/// Nodes live in a SlotMap and refer to their children by key, so one node
/// may be linked under several parents (the hierarchy is a DAG) without any
/// shared ownership. Links that would close a cycle are rejected, which keeps
/// every traversal finite.
///
/// Rendering is a single traversal: each node renders its children with the
/// accumulated transform `parent × local` first, then itself.

use glam::Mat4;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::device::ProgramHandle;
use crate::error::Result;
use crate::render::RenderContext;
use crate::resource::Mesh;
use crate::{engine_bail, engine_debug, engine_warn};
use super::camera::Camera;
use super::light::Light;
use super::node::{Node, NodeKey, NodeKind};

#[derive(Debug, Default)]
pub struct RenderTree {
    nodes: SlotMap<NodeKey, Node>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== INSERTION =====

    /// Insert an unlinked node with an identity transform
    pub fn insert(&mut self, kind: NodeKind) -> NodeKey {
        self.nodes.insert(Node::new(kind))
    }

    pub fn insert_group(&mut self) -> NodeKey {
        self.insert(NodeKind::Group)
    }

    pub fn insert_mesh(&mut self, mesh: Mesh) -> NodeKey {
        self.insert(NodeKind::Mesh(mesh))
    }

    /// Insert a camera node whose transform is `Camera::default_view()`
    pub fn insert_camera(&mut self, camera: Camera) -> NodeKey {
        let mut node = Node::new(NodeKind::Camera(camera));
        node.transform = Camera::default_view();
        self.nodes.insert(node)
    }

    pub fn insert_light(&mut self, light: Light) -> NodeKey {
        self.insert(NodeKind::Light(light))
    }

    // ===== LINKS =====

    /// Append `child` to the children of `parent`
    ///
    /// Linking the same child twice is allowed (it renders twice).
    ///
    /// # Returns
    ///
    /// `Error::InvalidResource` if either key is unknown or if `parent` is
    /// reachable from `child` (the link would create a cycle)
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(child) {
            engine_bail!(InvalidResource, "sge::RenderTree", "Unknown child node {:?}", child);
        }
        if !self.nodes.contains_key(parent) {
            engine_bail!(InvalidResource, "sge::RenderTree", "Unknown parent node {:?}", parent);
        }
        if self.reaches(child, parent) {
            engine_bail!(InvalidResource, "sge::RenderTree",
                "Linking {:?} under {:?} would create a cycle", child, parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlink `child` from `parent` and from every node below `parent`
    ///
    /// Each node of the sub-hierarchy is visited once even when it is
    /// shared by several parents.
    ///
    /// # Returns
    ///
    /// Number of links removed
    pub fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> usize {
        let mut visited = FxHashSet::default();
        let mut stack = vec![parent];
        let mut removed = 0;

        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };
            let before = node.children.len();
            node.children.retain(|&c| c != child);
            removed += before - node.children.len();
            stack.extend(node.children.iter().copied());
        }
        removed
    }

    /// Remove a node from the arena after unlinking it from every parent
    ///
    /// Its children stay in the arena. The caller owns the returned node and
    /// the GPU resources it may hold.
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        let node = self.nodes.remove(key)?;
        for (_, other) in self.nodes.iter_mut() {
            other.children.retain(|&c| c != key);
        }
        Some(node)
    }

    /// Remove a node and release its GPU resources
    pub fn destroy_node(&mut self, ctx: &mut RenderContext, key: NodeKey) -> bool {
        match self.remove_node(key) {
            Some(node) => {
                release(ctx, node);
                true
            }
            None => false,
        }
    }

    /// Remove every node, releasing GPU resources
    pub fn destroy_all(&mut self, ctx: &mut RenderContext) {
        let count = self.nodes.len();
        for (_, node) in self.nodes.drain() {
            release(ctx, node);
        }
        engine_debug!("sge::RenderTree", "Destroyed {} node(s)", count);
    }

    // ===== ACCESS =====

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Children of `key`, empty for an unknown key
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn transform(&self, key: NodeKey) -> Option<Mat4> {
        self.nodes.get(key).map(|n| n.transform)
    }

    /// Set the local transform of `key`, false for an unknown key
    pub fn set_transform(&mut self, key: NodeKey, transform: Mat4) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ===== TRAVERSAL =====

    /// Pre-order walk from `root`, calling `f(key, node, depth)`
    ///
    /// A node shared by several parents is visited once per path.
    pub fn visit<F>(&self, root: NodeKey, mut f: F)
    where
        F: FnMut(NodeKey, &Node, usize),
    {
        let mut stack = vec![(root, 0usize)];
        while let Some((key, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            f(key, node, depth);
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
    }

    /// Keys in the order `render` emits them: children first, then the node
    pub fn render_order(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut order = Vec::new();
        self.collect_render_order(root, &mut order);
        order
    }

    fn collect_render_order(&self, key: NodeKey, order: &mut Vec<NodeKey>) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        for &child in &node.children {
            self.collect_render_order(child, order);
        }
        order.push(key);
    }

    /// Render the hierarchy below `root` with `program`
    ///
    /// # Arguments
    ///
    /// * `ctx` - Render context (device + viewport)
    /// * `root` - First node to render
    /// * `accumulated` - Transform of everything above `root`
    /// * `program` - Program every node draws or uploads with
    pub fn render(
        &mut self,
        ctx: &mut RenderContext,
        root: NodeKey,
        accumulated: Mat4,
        program: ProgramHandle,
    ) {
        if !self.nodes.contains_key(root) {
            engine_warn!("sge::RenderTree", "Render of unknown node {:?} skipped", root);
            return;
        }
        self.render_node(ctx, root, accumulated, program);
    }

    fn render_node(
        &mut self,
        ctx: &mut RenderContext,
        key: NodeKey,
        parent: Mat4,
        program: ProgramHandle,
    ) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        let world = parent * node.transform;
        if let NodeKind::Camera(camera) = &mut node.kind {
            camera.refresh(ctx.viewport());
        }

        let mut index = 0;
        loop {
            let Some(&child) = self.nodes.get(key).and_then(|n| n.children.get(index)) else {
                break;
            };
            self.render_node(ctx, child, world, program);
            index += 1;
        }

        let Some(node) = self.nodes.get(key) else {
            return;
        };
        match &node.kind {
            NodeKind::Group => {}
            NodeKind::Mesh(mesh) => mesh.draw(ctx, program, world),
            NodeKind::Camera(camera) => camera.upload(ctx, program, world),
            NodeKind::Light(light) => light.upload(ctx, program),
        }
    }

    /// True if `target` is `from` or lies below it
    fn reaches(&self, from: NodeKey, target: NodeKey) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![from];
        while let Some(key) = stack.pop() {
            if key == target {
                return true;
            }
            if !visited.insert(key) {
                continue;
            }
            if let Some(node) = self.nodes.get(key) {
                stack.extend(node.children.iter().copied());
            }
        }
        false
    }
}

fn release(ctx: &mut RenderContext, node: Node) {
    if let NodeKind::Mesh(mesh) = node.kind {
        mesh.destroy(ctx);
    }
}

#[cfg(test)]
#[path = "render_tree_tests.rs"]
mod tests;
