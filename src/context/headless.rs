use std::collections::BTreeMap;

use cgmath::{Matrix4, SquareMatrix};

use super::{GraphicsContext, Primitive, UniformLocation};
use crate::uniform::UniformValue;

/// One recorded draw call and the uniform state it saw.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub indexed: bool,
    pub mode: Primitive,
    pub start: usize,
    pub count: usize,
    pub uniforms: BTreeMap<String, UniformValue>,
}

impl DrawCall {
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn model_view(&self) -> Option<Matrix4<f32>> {
        self.uniform("model_view").and_then(UniformValue::as_mat4)
    }

    pub fn projection(&self) -> Option<Matrix4<f32>> {
        self.uniform("projection").and_then(UniformValue::as_mat4)
    }
}

struct Slot {
    name: String,
    value: UniformValue,
}

/// A `GraphicsContext` that keeps uniforms in memory and records draw calls.
///
/// Uniforms behave like those of a linked program: only declared names
/// resolve, and each holds the value it was declared with until written.
pub struct HeadlessContext {
    size: (u32, u32),
    slots: Vec<Slot>,
    draws: Vec<DrawCall>,
    uniform_writes: usize,
}

impl HeadlessContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            slots: Vec::new(),
            draws: Vec::new(),
            uniform_writes: 0,
        }
    }

    /// A context whose program declares `model_view`, `projection` (both
    /// identity) and a `color` vec3.
    pub fn with_standard_program(width: u32, height: u32) -> Self {
        let identity = UniformValue::mat4(&Matrix4::identity());
        Self::new(width, height)
            .with_uniform("model_view", identity.clone())
            .with_uniform("projection", identity)
            .with_uniform("color", UniformValue::FloatVec(vec![0.0; 3]))
    }

    /// Declares a uniform holding `initial`.
    pub fn with_uniform(mut self, name: &str, initial: UniformValue) -> Self {
        self.declare_uniform(name, initial);
        self
    }

    pub fn declare_uniform(&mut self, name: &str, initial: UniformValue) -> UniformLocation {
        if let Some(i) = self.slots.iter().position(|s| s.name == name) {
            self.slots[i].value = initial;
            return UniformLocation(i as u32);
        }
        self.slots.push(Slot {
            name: name.to_string(),
            value: initial,
        });
        UniformLocation(self.slots.len() as u32 - 1)
    }

    /// Current value by name, bypassing location lookup.
    pub fn uniform_by_name(&self, name: &str) -> Option<&UniformValue> {
        self.slots.iter().find(|s| s.name == name).map(|s| &s.value)
    }

    pub fn uniforms(&self) -> BTreeMap<String, UniformValue> {
        self.slots
            .iter()
            .map(|s| (s.name.clone(), s.value.clone()))
            .collect()
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Hands back the recorded draws and starts a fresh frame.
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }

    pub fn uniform_writes(&self) -> usize {
        self.uniform_writes
    }

    fn record(&mut self, indexed: bool, mode: Primitive, start: usize, count: usize) {
        let uniforms = self.uniforms();
        self.draws.push(DrawCall {
            indexed,
            mode,
            start,
            count,
            uniforms,
        });
    }
}

impl GraphicsContext for HeadlessContext {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.slots
            .iter()
            .position(|s| s.name == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn uniform(&self, location: UniformLocation) -> UniformValue {
        self.slots[location.0 as usize].value.clone()
    }

    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue) {
        let slot = &mut self.slots[location.0 as usize];
        if std::mem::discriminant(&slot.value) != std::mem::discriminant(value) {
            log::warn!(
                "uniform '{}' changed shape: {:?} -> {:?}",
                slot.name,
                slot.value,
                value
            );
        }
        slot.value = value.clone();
        self.uniform_writes += 1;
    }

    fn viewport(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn draw_elements(&mut self, mode: Primitive, start: usize, count: usize) {
        self.record(true, mode, start, count);
    }

    fn draw_arrays(&mut self, mode: Primitive, start: usize, count: usize) {
        self.record(false, mode, start, count);
    }
}
