//! The scene graph: an arena of nodes, each a projection, a transformation,
//! a uniform binding, or a draw call, arranged as a tree.

use cgmath::{Matrix4, Vector3};

use crate::{
    context::Primitive,
    error::{SceneError, SceneResult},
    primitives::Mesh,
    transform,
    uniform::UniformInput,
    value::{MatrixValue, Value, Value3},
};

/// Handle to a node inside one `SceneGraph`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Projection used by a scene root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    Perspective { fov: f32, near: f32, far: f32 },
    Orthographic { near: f32, far: f32 },
}

impl Projection {
    pub fn perspective() -> Self {
        Projection::Perspective {
            fov: 45.0,
            near: 0.001,
            far: 100.0,
        }
    }

    pub fn orthographic() -> Self {
        Projection::Orthographic {
            near: -10.0,
            far: 10.0,
        }
    }

    pub fn matrix(&self, width: u32, height: u32) -> Matrix4<f32> {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        match *self {
            Projection::Perspective { fov, near, far } => transform::perspective(fov, w / h, near, far),
            // near and far go in swapped so larger z ends up farther away
            Projection::Orthographic { near, far } if w > h => {
                transform::ortho(-w / h, w / h, -1.0, 1.0, far, near)
            }
            Projection::Orthographic { near, far } => {
                transform::ortho(-1.0, 1.0, -h / w, h / w, far, near)
            }
        }
    }
}

/// A transformation node's contribution to the model-view matrix.
#[derive(Clone, Debug)]
pub enum Transformation {
    Matrix(MatrixValue),
    Translation(Value3),
    RotationX(Value),
    RotationY(Value),
    RotationZ(Value),
    /// Angles about X, Y, Z, applied as `Rz * Ry * Rx`.
    Euler(Value3),
    Axis { angle: Value, axis: Value3 },
    Scale(Value3),
}

impl Transformation {
    pub fn matrix(&self) -> Matrix4<f32> {
        match self {
            Transformation::Matrix(m) => m.get(),
            Transformation::Translation(v) => transform::translate(v.get()),
            Transformation::RotationX(a) => transform::rotate_x(a.get()),
            Transformation::RotationY(a) => transform::rotate_y(a.get()),
            Transformation::RotationZ(a) => transform::rotate_z(a.get()),
            Transformation::Euler(angles) => transform::euler(angles.get()),
            Transformation::Axis { angle, axis } => transform::rotate(angle.get(), axis.get()),
            Transformation::Scale(size) => transform::scale(size.get()),
        }
    }
}

/// A fixed range of vertices or indices drawn with one call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawRange {
    pub start: usize,
    pub count: usize,
    pub mode: Primitive,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Only groups its children.
    Group,
    Scene(Projection),
    Transform(Transformation),
    SetUniform { name: String, value: UniformInput },
    DrawElements(DrawRange),
    DrawArrays(DrawRange),
}

impl NodeKind {
    pub fn translation(v: impl Into<Value3>) -> Self {
        NodeKind::Transform(Transformation::Translation(v.into()))
    }

    pub fn rotate_x(angle: impl Into<Value>) -> Self {
        NodeKind::Transform(Transformation::RotationX(angle.into()))
    }

    pub fn rotate_y(angle: impl Into<Value>) -> Self {
        NodeKind::Transform(Transformation::RotationY(angle.into()))
    }

    pub fn rotate_z(angle: impl Into<Value>) -> Self {
        NodeKind::Transform(Transformation::RotationZ(angle.into()))
    }

    pub fn euler(angles: impl Into<Value3>) -> Self {
        NodeKind::Transform(Transformation::Euler(angles.into()))
    }

    pub fn axis_rotation(angle: impl Into<Value>, axis: impl Into<Value3>) -> Self {
        NodeKind::Transform(Transformation::Axis {
            angle: angle.into(),
            axis: axis.into(),
        })
    }

    pub fn scale(size: impl Into<Value3>) -> Self {
        NodeKind::Transform(Transformation::Scale(size.into()))
    }

    pub fn uniform_scale(size: impl Into<Value>) -> Self {
        NodeKind::Transform(Transformation::Scale(Value3::splat(size)))
    }

    pub fn matrix(m: impl Into<MatrixValue>) -> Self {
        NodeKind::Transform(Transformation::Matrix(m.into()))
    }

    pub fn set_uniform(name: &str, value: impl Into<UniformInput>) -> Self {
        NodeKind::SetUniform {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn draw_elements(start: usize, count: usize, mode: Primitive) -> Self {
        NodeKind::DrawElements(DrawRange { start, count, mode })
    }

    pub fn draw_arrays(start: usize, count: usize, mode: Primitive) -> Self {
        NodeKind::DrawArrays(DrawRange { start, count, mode })
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Owns every node. Nodes live as long as the graph; detached nodes are
/// simply never rendered.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unparented node.
    pub fn insert(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Appends `child` to `parent`'s children and returns `child` so calls
    /// can be chained down a limb.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<NodeId> {
        if let Some(existing) = self.nodes[child.0].parent {
            return Err(SceneError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(SceneError::Cycle { child, parent });
        }
        self.attach(parent, child);
        Ok(child)
    }

    /// Attaches each existing node beneath the previous one, returning the
    /// last. Stops at the first node that cannot be attached.
    pub fn add_chain(&mut self, parent: NodeId, nodes: &[NodeId]) -> SceneResult<NodeId> {
        nodes
            .iter()
            .try_fold(parent, |parent, &child| self.add_child(parent, child))
    }

    /// Inserts a new node directly under `parent`.
    pub fn spawn(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let child = self.insert(kind);
        self.attach(parent, child);
        child
    }

    /// Spawns each kind beneath the previous one, returning the deepest node.
    pub fn spawn_chain(&mut self, parent: NodeId, kinds: impl IntoIterator<Item = NodeKind>) -> NodeId {
        kinds
            .into_iter()
            .fold(parent, |parent, kind| self.spawn(parent, kind))
    }

    /// A new unparented node with the same parameters. Dynamic values are
    /// shared with the source node.
    pub fn copy(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id.0].kind.clone();
        self.insert(kind)
    }

    /// Copies `id` and, recursively, all of its children.
    pub fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let copy = self.copy(id);
        let children = self.nodes[id.0].children.clone();
        for child in children {
            let child_copy = self.deep_copy(child);
            self.attach(copy, child_copy);
        }
        copy
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, move |n| self.nodes[n.0].parent)
    }

    /// Every uniform name a `SetUniform` node in the graph refers to.
    pub fn uniform_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .nodes
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::SetUniform { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }
}

// Shape nodes: append geometry to a mesh and draw exactly that range.
impl SceneGraph {
    /// An axis-aligned cube with `pt1` and `pt2` at opposite corners.
    pub fn cube(&mut self, pt1: Vector3<f32>, pt2: Vector3<f32>, mesh: &mut Mesh) -> NodeId {
        let start = mesh.indices.len();
        mesh.cube_between(pt1, pt2);
        self.insert(NodeKind::draw_elements(
            start,
            mesh.indices.len() - start,
            Primitive::TriangleStrip,
        ))
    }

    pub fn tetrahedron(
        &mut self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
        d: Vector3<f32>,
        mesh: &mut Mesh,
    ) -> NodeId {
        let start = mesh.indices.len();
        mesh.tetrahedron(a, b, c, d);
        self.insert(NodeKind::draw_elements(
            start,
            mesh.indices.len() - start,
            Primitive::TriangleStrip,
        ))
    }

    pub fn sphere(
        &mut self,
        center: Vector3<f32>,
        radius: f32,
        subdivisions: u32,
        mesh: &mut Mesh,
    ) -> NodeId {
        let start = mesh.indices.len();
        mesh.sphere(center, radius, subdivisions);
        self.insert(NodeKind::draw_elements(
            start,
            mesh.indices.len() - start,
            Primitive::Triangles,
        ))
    }
}
