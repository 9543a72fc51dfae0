use crate::{
    context::GraphicsContext,
    node::{NodeId, SceneGraph},
};

pub mod bindings;
pub mod scene;

pub use bindings::ShaderBindings;
pub use scene::{RenderStats, ScenePass};

pub trait Pass {
    fn draw(&mut self, ctx: &mut dyn GraphicsContext, graph: &SceneGraph, root: NodeId) -> RenderStats;
}
