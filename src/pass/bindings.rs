use std::collections::HashMap;

use crate::{
    context::{GraphicsContext, UniformLocation},
    uniform::UniformValue,
};

struct UniformSlot {
    location: Option<UniformLocation>,
    saved: Vec<UniformValue>,
}

impl UniformSlot {
    fn resolve<C: GraphicsContext + ?Sized>(ctx: &C, name: &str) -> Self {
        let location = ctx.uniform_location(name);
        if location.is_none() {
            log::debug!("program has no uniform '{name}', writes to it are skipped");
        }
        Self {
            location,
            saved: Vec::new(),
        }
    }
}

/// Uniform locations resolved once per name, each with a stack of the
/// values it held before every push.
#[derive(Default)]
pub struct ShaderBindings {
    slots: HashMap<String, UniformSlot>,
}

impl ShaderBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `names` up front so rendering never looks up a location.
    pub fn resolve<'a, C: GraphicsContext + ?Sized>(
        ctx: &C,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut bindings = Self::new();
        for name in names {
            bindings.ensure(ctx, name);
        }
        bindings
    }

    /// Saves the uniform's current value and writes `value`.
    pub fn push<C: GraphicsContext + ?Sized>(&mut self, ctx: &mut C, name: &str, value: &UniformValue) {
        self.ensure(&*ctx, name);
        let Some(slot) = self.slots.get_mut(name) else {
            return;
        };
        let Some(location) = slot.location else {
            return;
        };
        slot.saved.push(ctx.uniform(location));
        ctx.set_uniform(location, value);
    }

    /// Writes back the value saved by the matching `push`.
    pub fn pop<C: GraphicsContext + ?Sized>(&mut self, ctx: &mut C, name: &str) {
        let Some(slot) = self.slots.get_mut(name) else {
            return;
        };
        let (Some(location), Some(previous)) = (slot.location, slot.saved.pop()) else {
            return;
        };
        ctx.set_uniform(location, &previous);
    }

    pub fn location(&self, name: &str) -> Option<UniformLocation> {
        self.slots.get(name).and_then(|s| s.location)
    }

    /// Number of values currently saved for `name`.
    pub fn depth(&self, name: &str) -> usize {
        self.slots.get(name).map_or(0, |s| s.saved.len())
    }

    /// True when every push has been matched by a pop.
    pub fn is_balanced(&self) -> bool {
        self.slots.values().all(|s| s.saved.is_empty())
    }

    fn ensure<C: GraphicsContext + ?Sized>(&mut self, ctx: &C, name: &str) {
        if !self.slots.contains_key(name) {
            self.slots
                .insert(name.to_string(), UniformSlot::resolve(ctx, name));
        }
    }
}
