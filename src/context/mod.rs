use crate::uniform::UniformValue;

pub mod headless;

pub use headless::{DrawCall, HeadlessContext};

/// Opaque handle to a uniform in the currently bound program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// How the vertices of a draw call are assembled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    #[default]
    TriangleStrip,
    TriangleFan,
}

/// The slice of a graphics API the scene graph needs: a bound program whose
/// uniforms can be read and written, a viewport, and two draw calls.
///
/// Vertex and index buffers are bound by the caller before rendering; draw
/// ranges are in vertices (`draw_arrays`) or indices (`draw_elements`).
pub trait GraphicsContext {
    /// `None` when the bound program has no uniform with this name.
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    fn uniform(&self, location: UniformLocation) -> UniformValue;

    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue);

    /// Canvas size in pixels.
    fn viewport(&self) -> (u32, u32);

    /// Called when the canvas changes size; later `viewport` calls report
    /// the new size.
    fn resize(&mut self, width: u32, height: u32);

    fn draw_elements(&mut self, mode: Primitive, start: usize, count: usize);

    fn draw_arrays(&mut self, mode: Primitive, start: usize, count: usize);
}
