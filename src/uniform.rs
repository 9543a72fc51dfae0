use cgmath::Matrix4;

use crate::{
    transform::flatten,
    value::{MatrixValue, Value},
};

/// A concrete uniform value as the program sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    IntVec(Vec<i32>),
    FloatVec(Vec<f32>),
    /// Column-major `size * size` floats.
    Matrix { size: usize, data: Vec<f32> },
}

impl UniformValue {
    pub fn mat4(m: &Matrix4<f32>) -> Self {
        UniformValue::Matrix {
            size: 4,
            data: flatten(m).to_vec(),
        }
    }

    /// Reads a 4x4 matrix back, if this is one.
    pub fn as_mat4(&self) -> Option<Matrix4<f32>> {
        match self {
            UniformValue::Matrix { size: 4, data } if data.len() == 16 => {
                let mut cols = [[0.0; 4]; 4];
                for (i, col) in cols.iter_mut().enumerate() {
                    col.copy_from_slice(&data[i * 4..i * 4 + 4]);
                }
                Some(cols.into())
            }
            _ => None,
        }
    }
}

/// What a `SetUniform` node pushes: a value shape plus lazily read components.
#[derive(Clone, Debug)]
pub enum UniformInput {
    Int(i32),
    Float(Value),
    IntVec(Vec<i32>),
    FloatVec(Vec<Value>),
    Matrix4(MatrixValue),
    /// A 2x2 or 3x3 matrix given column-major.
    Matrix { size: usize, data: Vec<Value> },
}

impl UniformInput {
    pub fn vec2(x: impl Into<Value>, y: impl Into<Value>) -> Self {
        UniformInput::FloatVec(vec![x.into(), y.into()])
    }

    pub fn vec3(x: impl Into<Value>, y: impl Into<Value>, z: impl Into<Value>) -> Self {
        UniformInput::FloatVec(vec![x.into(), y.into(), z.into()])
    }

    pub fn vec4(
        x: impl Into<Value>,
        y: impl Into<Value>,
        z: impl Into<Value>,
        w: impl Into<Value>,
    ) -> Self {
        UniformInput::FloatVec(vec![x.into(), y.into(), z.into(), w.into()])
    }

    pub fn color(rgb: [f32; 3]) -> Self {
        Self::vec3(rgb[0], rgb[1], rgb[2])
    }

    pub fn evaluate(&self) -> UniformValue {
        match self {
            UniformInput::Int(v) => UniformValue::Int(*v),
            UniformInput::Float(v) => UniformValue::Float(v.get()),
            UniformInput::IntVec(v) => UniformValue::IntVec(v.clone()),
            UniformInput::FloatVec(v) => UniformValue::FloatVec(v.iter().map(Value::get).collect()),
            UniformInput::Matrix4(m) => UniformValue::mat4(&m.get()),
            UniformInput::Matrix { size, data } => UniformValue::Matrix {
                size: *size,
                data: data.iter().map(Value::get).collect(),
            },
        }
    }
}

impl From<f32> for UniformInput {
    fn from(v: f32) -> Self {
        UniformInput::Float(Value::Static(v))
    }
}

impl From<i32> for UniformInput {
    fn from(v: i32) -> Self {
        UniformInput::Int(v)
    }
}

impl From<[f32; 3]> for UniformInput {
    fn from(v: [f32; 3]) -> Self {
        UniformInput::color(v)
    }
}

impl From<Matrix4<f32>> for UniformInput {
    fn from(m: Matrix4<f32>) -> Self {
        UniformInput::Matrix4(MatrixValue::Static(m))
    }
}
