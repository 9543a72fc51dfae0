use std::{cell::Cell, collections::HashMap, fmt, rc::Rc};

use cgmath::{Matrix4, SquareMatrix, Vector3};

/// A scalar that is read when the scene is rendered, not when it is built.
///
/// Static numbers, closures, and live controls all end up here so a node's
/// parameters can follow a slider without rebuilding the tree every frame.
/// Cloning shares the underlying source.
#[derive(Clone)]
pub enum Value {
    Static(f32),
    Dynamic(Rc<dyn Fn() -> f32>),
}

impl Value {
    pub fn from_fn(f: impl Fn() -> f32 + 'static) -> Self {
        Value::Dynamic(Rc::new(f))
    }

    /// Reads a live control every time the value is needed.
    pub fn control(control: &Control) -> Self {
        let control = control.clone();
        Value::Dynamic(Rc::new(move || control.get()))
    }

    pub fn get(&self) -> f32 {
        match self {
            Value::Static(v) => *v,
            Value::Dynamic(f) => f(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Value::Dynamic(_))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Static(v)
    }
}

impl From<&Control> for Value {
    fn from(control: &Control) -> Self {
        Value::control(control)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Static(v) => write!(f, "Static({v})"),
            Value::Dynamic(_) => write!(f, "Dynamic({})", self.get()),
        }
    }
}

/// Three lazily evaluated components (a position, a set of angles, ...).
#[derive(Clone, Debug)]
pub struct Value3(pub [Value; 3]);

impl Value3 {
    pub fn new(x: impl Into<Value>, y: impl Into<Value>, z: impl Into<Value>) -> Self {
        Self([x.into(), y.into(), z.into()])
    }

    pub fn splat(v: impl Into<Value>) -> Self {
        let v = v.into();
        Self([v.clone(), v.clone(), v])
    }

    pub fn get(&self) -> Vector3<f32> {
        Vector3::new(self.0[0].get(), self.0[1].get(), self.0[2].get())
    }
}

impl From<[f32; 3]> for Value3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vector3<f32>> for Value3 {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// A 4x4 matrix that may be computed at render time.
#[derive(Clone)]
pub enum MatrixValue {
    Static(Matrix4<f32>),
    Dynamic(Rc<dyn Fn() -> Matrix4<f32>>),
}

impl MatrixValue {
    pub fn from_fn(f: impl Fn() -> Matrix4<f32> + 'static) -> Self {
        MatrixValue::Dynamic(Rc::new(f))
    }

    pub fn get(&self) -> Matrix4<f32> {
        match self {
            MatrixValue::Static(m) => *m,
            MatrixValue::Dynamic(f) => f(),
        }
    }
}

impl Default for MatrixValue {
    fn default() -> Self {
        MatrixValue::Static(Matrix4::identity())
    }
}

impl From<Matrix4<f32>> for MatrixValue {
    fn from(m: Matrix4<f32>) -> Self {
        MatrixValue::Static(m)
    }
}

impl fmt::Debug for MatrixValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixValue::Static(m) => write!(f, "Static({m:?})"),
            MatrixValue::Dynamic(_) => write!(f, "Dynamic"),
        }
    }
}

/// A live scalar shared between UI code and the scene graph.
#[derive(Clone, Debug, Default)]
pub struct Control(Rc<Cell<f32>>);

impl Control {
    pub fn new(initial: f32) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }

    pub fn set(&self, v: f32) {
        self.0.set(v)
    }
}

/// Named controls, looked up by id the way sliders are found on a page.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    controls: HashMap<String, Control>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the control with this id, creating it at 0 if needed.
    pub fn control(&mut self, id: &str) -> Control {
        self.controls.entry(id.to_string()).or_default().clone()
    }

    /// A `Value` bound to the named control.
    pub fn value(&mut self, id: &str) -> Value {
        Value::control(&self.control(id))
    }

    /// Euler angles read from `{prefix}-x-angle`, `{prefix}-y-angle`, `{prefix}-z-angle`.
    pub fn angles(&mut self, prefix: &str) -> Value3 {
        Value3([
            self.value(&format!("{prefix}-x-angle")),
            self.value(&format!("{prefix}-y-angle")),
            self.value(&format!("{prefix}-z-angle")),
        ])
    }

    /// Sets a control, returning false if no such id was ever requested.
    pub fn set(&self, id: &str, v: f32) -> bool {
        match self.controls.get(id) {
            Some(control) => {
                control.set(v);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<f32> {
        self.controls.get(id).map(Control::get)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_value_follows_updates() {
        let mut controls = Controls::new();
        let angle = controls.value("base-angle");
        assert_eq!(angle.get(), 0.0);

        assert!(controls.set("base-angle", 30.0));
        assert_eq!(angle.get(), 30.0);
        assert!(!controls.set("missing", 1.0));
    }

    #[test]
    fn test_cloned_value_shares_source() {
        let control = Control::new(1.0);
        let a = Value::control(&control);
        let b = a.clone();
        control.set(2.5);
        assert_eq!(a.get(), 2.5);
        assert_eq!(b.get(), 2.5);
    }

    #[test]
    fn test_angles_use_axis_suffixes() {
        let mut controls = Controls::new();
        let angles = controls.angles("r-shoulder");
        controls.set("r-shoulder-y-angle", 45.0);
        assert_eq!(angles.get(), Vector3::new(0.0, 45.0, 0.0));
        assert_eq!(controls.len(), 3);
    }
}
