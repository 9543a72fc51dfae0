use cgmath::{Matrix4, SquareMatrix};

use super::{bindings::ShaderBindings, Pass};
use crate::{
    context::GraphicsContext,
    node::{NodeId, NodeKind, SceneGraph},
    uniform::UniformValue,
};

pub const MODEL_VIEW: &str = "model_view";
pub const PROJECTION: &str = "projection";

/// Counters for one traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub nodes: usize,
    pub draw_calls: usize,
}

/// Renders a scene graph depth first. Every node pushes its contribution
/// (projection, accumulated model-view, or a uniform) before its own draw
/// and its children, and pops it afterwards, so a finished subtree leaves
/// the uniforms exactly as it found them.
#[derive(Default)]
pub struct ScenePass {
    bindings: ShaderBindings,
}

impl ScenePass {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pass whose uniform locations were resolved ahead of time.
    pub fn with_bindings(bindings: ShaderBindings) -> Self {
        Self { bindings }
    }

    /// Resolves `model_view`, `projection` and every uniform the graph sets.
    pub fn for_graph<C: GraphicsContext + ?Sized>(ctx: &C, graph: &SceneGraph) -> Self {
        let names = [MODEL_VIEW, PROJECTION]
            .into_iter()
            .chain(graph.uniform_names());
        Self::with_bindings(ShaderBindings::resolve(ctx, names))
    }

    pub fn bindings(&self) -> &ShaderBindings {
        &self.bindings
    }

    pub fn render<C: GraphicsContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        graph: &SceneGraph,
        root: NodeId,
    ) -> RenderStats {
        self.render_from(ctx, graph, root, Matrix4::identity())
    }

    /// Renders with `base` standing in for the model-view of the root's
    /// (absent) ancestors.
    pub fn render_from<C: GraphicsContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        graph: &SceneGraph,
        root: NodeId,
        base: Matrix4<f32>,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        self.render_node(ctx, graph, root, base, &mut stats);
        log::trace!("rendered {} nodes, {} draw calls", stats.nodes, stats.draw_calls);
        stats
    }

    fn render_node<C: GraphicsContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        graph: &SceneGraph,
        id: NodeId,
        parent_mv: Matrix4<f32>,
        stats: &mut RenderStats,
    ) {
        let node = graph.node(id);
        stats.nodes += 1;

        let mut mv = parent_mv;
        let pushed = match &node.kind {
            NodeKind::Scene(projection) => {
                let (width, height) = ctx.viewport();
                let p = projection.matrix(width, height);
                self.bindings.push(ctx, PROJECTION, &UniformValue::mat4(&p));
                Some(PROJECTION)
            }
            NodeKind::Transform(transformation) => {
                mv = parent_mv * transformation.matrix();
                self.bindings.push(ctx, MODEL_VIEW, &UniformValue::mat4(&mv));
                Some(MODEL_VIEW)
            }
            NodeKind::SetUniform { name, value } => {
                self.bindings.push(ctx, name, &value.evaluate());
                Some(name.as_str())
            }
            _ => None,
        };

        match &node.kind {
            NodeKind::DrawElements(range) => {
                ctx.draw_elements(range.mode, range.start, range.count);
                stats.draw_calls += 1;
            }
            NodeKind::DrawArrays(range) => {
                ctx.draw_arrays(range.mode, range.start, range.count);
                stats.draw_calls += 1;
            }
            _ => {}
        }

        for &child in node.children() {
            self.render_node(ctx, graph, child, mv, stats);
        }

        if let Some(name) = pushed {
            self.bindings.pop(ctx, name);
        }
    }
}

impl Pass for ScenePass {
    fn draw(&mut self, ctx: &mut dyn GraphicsContext, graph: &SceneGraph, root: NodeId) -> RenderStats {
        self.render(ctx, graph, root)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::{
        context::{HeadlessContext, Primitive},
        node::Projection,
        transform::{self, transform_point},
        uniform::UniformInput,
        value::Control,
    };

    fn approx_eq_vec3(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).x.abs() < 1e-5 && (a - b).y.abs() < 1e-5 && (a - b).z.abs() < 1e-5
    }

    fn leaf() -> NodeKind {
        NodeKind::draw_elements(0, 3, Primitive::Triangles)
    }

    #[test]
    fn test_chain_composes_parent_first() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(NodeKind::Group);
        let c = graph.spawn_chain(
            root,
            [
                NodeKind::translation([1.0, 0.0, 0.0]),
                NodeKind::rotate_z(90.0),
                NodeKind::translation([0.0, 1.0, 0.0]),
            ],
        );
        graph.spawn(c, leaf());

        let mut ctx = HeadlessContext::with_standard_program(100, 100);
        ScenePass::new().render(&mut ctx, &graph, root);

        let mv = ctx.draws()[0].model_view().unwrap();
        let expected = transform::translate(Vector3::new(1.0, 0.0, 0.0))
            * transform::rotate_z(90.0)
            * transform::translate(Vector3::new(0.0, 1.0, 0.0));
        // origin -> (0,1,0) -> (-1,0,0) -> (0,0,0); (1,0,0) -> (1,1,0) -> (-1,1,0) -> (0,1,0)
        assert!(approx_eq_vec3(transform_point(&mv, Vector3::new(0.0, 0.0, 0.0)), Vector3::new(0.0, 0.0, 0.0)));
        assert!(approx_eq_vec3(transform_point(&mv, Vector3::new(1.0, 0.0, 0.0)), Vector3::new(0.0, 1.0, 0.0)));
        for (got, want) in transform::flatten(&mv).iter().zip(transform::flatten(&expected)) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_traversal_restores_all_uniforms() {
        let mut graph = SceneGraph::new();
        let scene = graph.insert(NodeKind::Scene(Projection::perspective()));
        let arm = graph.spawn_chain(
            scene,
            [
                NodeKind::translation([0.0, -0.25, -2.0]),
                NodeKind::set_uniform("color", [0.6, 0.6, 0.6]),
                NodeKind::rotate_y(30.0),
            ],
        );
        graph.spawn(arm, leaf());
        let red = graph.spawn(arm, NodeKind::set_uniform("color", [1.0, 0.1, 0.1]));
        graph.spawn(red, NodeKind::euler([10.0, 20.0, 30.0]));

        let ambient_mv = UniformValue::mat4(&transform::translate(Vector3::new(5.0, 5.0, 5.0)));
        let mut ctx = HeadlessContext::with_standard_program(640, 480)
            .with_uniform("model_view", ambient_mv)
            .with_uniform("color", UniformValue::FloatVec(vec![0.1, 0.2, 0.3]));
        let before = ctx.uniforms();

        let mut pass = ScenePass::for_graph(&ctx, &graph);
        pass.render(&mut ctx, &graph, scene);

        assert_eq!(ctx.uniforms(), before);
        assert!(pass.bindings().is_balanced());
    }

    #[test]
    fn test_sibling_sees_parent_state_after_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(NodeKind::set_uniform("color", [0.0, 0.0, 1.0]));
        let tinted = graph.spawn(root, NodeKind::set_uniform("color", [1.0, 0.0, 0.0]));
        graph.spawn_chain(tinted, [NodeKind::translation([1.0, 2.0, 3.0]), leaf()]);
        graph.spawn(root, leaf());

        let mut ctx = HeadlessContext::with_standard_program(10, 10);
        let stats = ScenePass::new().render(&mut ctx, &graph, root);
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.nodes, 5);

        let draws = ctx.draws();
        assert_eq!(draws[0].uniform("color"), Some(&UniformValue::FloatVec(vec![1.0, 0.0, 0.0])));
        assert_eq!(draws[1].uniform("color"), Some(&UniformValue::FloatVec(vec![0.0, 0.0, 1.0])));
        assert_eq!(draws[1].model_view(), Some(Matrix4::identity()));
    }

    #[test]
    fn test_scene_sets_projection_from_viewport() {
        let mut graph = SceneGraph::new();
        let scene = graph.insert(NodeKind::Scene(Projection::perspective()));
        graph.spawn(scene, leaf());

        let mut ctx = HeadlessContext::with_standard_program(200, 100);
        ScenePass::new().render(&mut ctx, &graph, scene);
        let expected = transform::perspective(45.0, 2.0, 0.001, 100.0);
        assert_eq!(ctx.draws()[0].projection(), Some(expected));
    }

    #[test]
    fn test_dynamic_values_read_each_frame() {
        let angle = Control::new(0.0);
        let mut graph = SceneGraph::new();
        let root = graph.insert(NodeKind::rotate_z(&angle));
        graph.spawn(root, NodeKind::draw_arrays(4, 4, Primitive::TriangleFan));

        let mut ctx = HeadlessContext::with_standard_program(10, 10);
        let mut pass = ScenePass::new();
        pass.render(&mut ctx, &graph, root);
        angle.set(90.0);
        pass.render(&mut ctx, &graph, root);

        let draws = ctx.take_draws();
        assert!(!draws[0].indexed);
        assert_eq!((draws[0].start, draws[0].count), (4, 4));
        let p0 = transform_point(&draws[0].model_view().unwrap(), Vector3::unit_x());
        let p1 = transform_point(&draws[1].model_view().unwrap(), Vector3::unit_x());
        assert!(approx_eq_vec3(p0, Vector3::unit_x()));
        assert!(approx_eq_vec3(p1, Vector3::unit_y()));
    }

    #[test]
    fn test_transformation_without_ancestor_starts_from_identity() {
        let mut graph = SceneGraph::new();
        let outer = graph.insert(NodeKind::translation([9.0, 0.0, 0.0]));
        let inner = graph.spawn(outer, NodeKind::translation([0.0, 1.0, 0.0]));
        graph.spawn(inner, leaf());

        let mut ctx = HeadlessContext::with_standard_program(10, 10);
        ScenePass::new().render(&mut ctx, &graph, inner);
        let mv = ctx.draws()[0].model_view().unwrap();
        assert_eq!(mv, transform::translate(Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_matrix_uniform_input() {
        let mut graph = SceneGraph::new();
        let m = transform::scale(Vector3::new(2.0, 2.0, 2.0));
        let root = graph.insert(NodeKind::set_uniform("normal_matrix", UniformInput::from(m)));
        graph.spawn(root, leaf());

        let mut ctx = HeadlessContext::with_standard_program(10, 10)
            .with_uniform("normal_matrix", UniformValue::mat4(&Matrix4::identity()));
        ScenePass::new().render(&mut ctx, &graph, root);
        assert_eq!(
            ctx.draws()[0].uniform("normal_matrix").and_then(UniformValue::as_mat4),
            Some(m)
        );
        assert_eq!(
            ctx.uniform_by_name("normal_matrix").and_then(UniformValue::as_mat4),
            Some(Matrix4::identity())
        );
    }

    #[test]
    fn test_draws_through_dyn_pass() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(NodeKind::Group);
        graph.spawn(root, leaf());
        graph.spawn(root, leaf());

        let mut ctx = HeadlessContext::with_standard_program(10, 10);
        let mut pass: Box<dyn Pass> = Box::new(ScenePass::new());
        let stats = pass.draw(&mut ctx, &graph, root);
        assert_eq!(stats, RenderStats { nodes: 3, draw_calls: 2 });
    }

    fn model_view_of(kind: NodeKind) -> Matrix4<f32> {
        let mut graph = SceneGraph::new();
        let root = graph.insert(kind);
        graph.spawn(root, leaf());
        let mut ctx = HeadlessContext::with_standard_program(10, 10);
        ScenePass::new().render(&mut ctx, &graph, root);
        ctx.draws()[0].model_view().unwrap()
    }

    #[test]
    fn test_axis_rotation_node() {
        let mv = model_view_of(NodeKind::axis_rotation(90.0, [0.0, 0.0, 2.0]));
        assert!(approx_eq_vec3(transform_point(&mv, Vector3::unit_x()), Vector3::unit_y()));
        assert!(approx_eq_vec3(transform_point(&mv, Vector3::unit_z()), Vector3::unit_z()));
    }

    #[test]
    fn test_scale_nodes() {
        let mv = model_view_of(NodeKind::scale([2.0, 3.0, 4.0]));
        assert_eq!(transform_point(&mv, Vector3::new(1.0, 1.0, 1.0)), Vector3::new(2.0, 3.0, 4.0));

        let size = Control::new(0.5);
        let mv = model_view_of(NodeKind::uniform_scale(&size));
        assert_eq!(transform_point(&mv, Vector3::new(2.0, -4.0, 6.0)), Vector3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_matrix_node_under_translation() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(NodeKind::translation([1.0, 0.0, 0.0]));
        let m = transform::rotate_z(90.0);
        let node = graph.spawn(root, NodeKind::matrix(m));
        graph.spawn(node, leaf());

        let mut ctx = HeadlessContext::with_standard_program(10, 10);
        ScenePass::new().render(&mut ctx, &graph, root);
        let mv = ctx.draws()[0].model_view().unwrap();
        assert!(approx_eq_vec3(transform_point(&mv, Vector3::unit_x()), Vector3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_orthographic_scene_through_pass() {
        let mut graph = SceneGraph::new();
        let scene = graph.insert(NodeKind::Scene(Projection::orthographic()));
        let moved = graph.spawn(scene, NodeKind::translation([0.0, 0.0, -1.0]));
        graph.spawn(moved, leaf());

        let mut ctx = HeadlessContext::with_standard_program(200, 100);
        ScenePass::new().render(&mut ctx, &graph, scene);
        let draw = &ctx.draws()[0];
        let proj = draw.projection().unwrap();
        assert_eq!(proj, Projection::orthographic().matrix(200, 100));
        assert!((proj.x.x - 0.5).abs() < 1e-6);
        assert_eq!(draw.model_view(), Some(transform::translate(Vector3::new(0.0, 0.0, -1.0))));
        // Restored once the scene is done
        assert_eq!(
            ctx.uniform_by_name(PROJECTION).and_then(UniformValue::as_mat4),
            Some(Matrix4::identity())
        );
    }

    #[test]
    fn test_scene_with_zero_near_plane_renders() {
        let mut graph = SceneGraph::new();
        let scene = graph.insert(NodeKind::Scene(Projection::Perspective {
            fov: 45.0,
            near: 0.0,
            far: 10.0,
        }));
        graph.spawn(scene, leaf());

        let mut ctx = HeadlessContext::with_standard_program(100, 100);
        let stats = ScenePass::new().render(&mut ctx, &graph, scene);
        assert_eq!(stats.draw_calls, 1);
        assert!(ctx.draws()[0].projection().is_some());
    }
}
