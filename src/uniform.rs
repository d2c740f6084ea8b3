// src/uniform.rs
//! Typed uniform values and the per-kind validation policy.
//!
//! Every material parameter carries a [`UniformKind`] tag and a matching
//! [`UniformValue`]. The kind decides what a slot may store; the value is a
//! plain `Copy` enum, so components never alias caller-owned vectors or
//! matrices and getters hand out copies instead of mutable views.

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a shader uniform slot.
///
/// Scalar, vector and matrix kinds map one-to-one onto GLSL uniform types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniformKind {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformKind {
    /// GLSL type name, used in diagnostics and definition files.
    pub fn glsl_name(&self) -> &'static str {
        match self {
            UniformKind::Bool => "bool",
            UniformKind::Int => "int",
            UniformKind::Float => "float",
            UniformKind::Vec2 => "vec2",
            UniformKind::Vec3 => "vec3",
            UniformKind::Vec4 => "vec4",
            UniformKind::Mat2 => "mat2",
            UniformKind::Mat3 => "mat3",
            UniformKind::Mat4 => "mat4",
        }
    }

    /// The documented default for this kind: `false`, `0`, `1.0`,
    /// zero-vector or zero-matrix.
    pub fn default_value(&self) -> UniformValue {
        match self {
            UniformKind::Bool => UniformValue::Bool(false),
            UniformKind::Int => UniformValue::Int(0),
            UniformKind::Float => UniformValue::Float(1.0),
            UniformKind::Vec2 => UniformValue::Vec2(Vec2::ZERO),
            UniformKind::Vec3 => UniformValue::Vec3(Vec3::ZERO),
            UniformKind::Vec4 => UniformValue::Vec4(Vec4::ZERO),
            UniformKind::Mat2 => UniformValue::Mat2(Mat2::ZERO),
            UniformKind::Mat3 => UniformValue::Mat3(Mat3::ZERO),
            UniformKind::Mat4 => UniformValue::Mat4(Mat4::ZERO),
        }
    }

    /// Pure validation predicate: does `candidate` have this kind's shape
    /// and, for floating-point kinds, only finite lanes?
    ///
    /// Shape is already guaranteed by the tag; the finiteness check is the
    /// semantic part the type system cannot express.
    pub fn accepts(&self, candidate: &UniformValue) -> bool {
        candidate.kind() == *self && candidate.is_finite()
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

/// One uniform parameter value.
///
/// `Copy` by design: assigning a value into a component is always a copy,
/// never a shared reference into caller storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    /// The kind tag of this value.
    #[inline]
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Bool(_) => UniformKind::Bool,
            UniformValue::Int(_) => UniformKind::Int,
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Mat2(_) => UniformKind::Mat2,
            UniformValue::Mat3(_) => UniformKind::Mat3,
            UniformValue::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// True when every floating-point lane is finite. Bool and Int values
    /// are trivially finite.
    pub fn is_finite(&self) -> bool {
        match self {
            UniformValue::Bool(_) | UniformValue::Int(_) => true,
            UniformValue::Float(v) => v.is_finite(),
            UniformValue::Vec2(v) => v.is_finite(),
            UniformValue::Vec3(v) => v.is_finite(),
            UniformValue::Vec4(v) => v.is_finite(),
            UniformValue::Mat2(m) => m.is_finite(),
            UniformValue::Mat3(m) => m.is_finite(),
            UniformValue::Mat4(m) => m.is_finite(),
        }
    }

    /// Parse a value of the given kind from a JSON literal in a material
    /// definition file. Returns `None` when the literal does not fit the
    /// kind. Integer slots accept any JSON number and truncate.
    pub fn from_json(kind: UniformKind, value: &serde_json::Value) -> Option<UniformValue> {
        match kind {
            UniformKind::Bool => value.as_bool().map(UniformValue::Bool),
            UniformKind::Int => value.as_f64().map(|n| UniformValue::Int(n as i32)),
            UniformKind::Float => value.as_f64().map(|n| UniformValue::Float(n as f32)),
            UniformKind::Vec2 => {
                let v = json_floats(value, 2)?;
                Some(UniformValue::Vec2(Vec2::new(v[0], v[1])))
            }
            UniformKind::Vec3 => {
                let v = json_floats(value, 3)?;
                Some(UniformValue::Vec3(Vec3::new(v[0], v[1], v[2])))
            }
            UniformKind::Vec4 => {
                let v = json_floats(value, 4)?;
                Some(UniformValue::Vec4(Vec4::new(v[0], v[1], v[2], v[3])))
            }
            UniformKind::Mat2 => {
                let v = json_floats(value, 4)?;
                let mut cols = [0.0; 4];
                cols.copy_from_slice(&v);
                Some(UniformValue::Mat2(Mat2::from_cols_array(&cols)))
            }
            UniformKind::Mat3 => {
                let v = json_floats(value, 9)?;
                let mut cols = [0.0; 9];
                cols.copy_from_slice(&v);
                Some(UniformValue::Mat3(Mat3::from_cols_array(&cols)))
            }
            UniformKind::Mat4 => {
                let v = json_floats(value, 16)?;
                let mut cols = [0.0; 16];
                cols.copy_from_slice(&v);
                Some(UniformValue::Mat4(Mat4::from_cols_array(&cols)))
            }
        }
    }

    /// Emit the JSON literal form used in material definition files.
    /// Vectors and matrices serialize as flat arrays (column-major).
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            UniformValue::Bool(v) => json!(v),
            UniformValue::Int(v) => json!(v),
            UniformValue::Float(v) => json!(v),
            UniformValue::Vec2(v) => json!(v.to_array()),
            UniformValue::Vec3(v) => json!(v.to_array()),
            UniformValue::Vec4(v) => json!(v.to_array()),
            UniformValue::Mat2(m) => json!(m.to_cols_array()),
            UniformValue::Mat3(m) => json!(m.to_cols_array()),
            UniformValue::Mat4(m) => json!(m.to_cols_array()),
        }
    }
}

/// Extract exactly `len` numbers from a JSON array.
fn json_floats(value: &serde_json::Value, len: usize) -> Option<Vec<f32>> {
    let arr = value.as_array()?;
    if arr.len() != len {
        return None;
    }
    arr.iter()
        .map(|v| v.as_f64().map(|n| n as f32))
        .collect()
}
