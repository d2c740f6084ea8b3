// src/component.rs
//! A single named, typed, dirty-tracked material parameter.
//!
//! The component is the unit of uniform synchronization: application code
//! mutates it through [`set`](MaterialComponent::set), the component marks
//! itself dirty, and once per draw the owning material calls
//! [`apply_to_shader`](MaterialComponent::apply_to_shader), which uploads
//! only when something actually changed. That bounds GPU driver calls to the
//! number of *changed* parameters rather than the parameter count of the
//! material.

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::error::{MaterialError, Result};
use crate::shader::ShaderProgram;
use crate::uniform::{UniformKind, UniformValue};

/// A named, typed, mutable uniform slot with a dirty flag.
///
/// Invariant: `value` always satisfies `kind.accepts(&value)`. A rejected
/// assignment leaves both `value` and `dirty` unchanged.
///
/// Lifecycle: Clean ⇄ Dirty. Any successful `set` moves the component to
/// Dirty; `apply_to_shader` uploads and moves it back to Clean. Fresh
/// components and fresh clones start Dirty so their value is guaranteed to
/// reach the shader at least once.
#[derive(Debug, PartialEq)]
pub struct MaterialComponent {
    name: String,
    kind: UniformKind,
    value: UniformValue,
    dirty: bool,
}

impl MaterialComponent {
    /// Create a component of the given kind.
    ///
    /// An initial value that fails validation (wrong kind or non-finite
    /// lanes) is logged and replaced with the kind's documented default, so
    /// the component is always constructed in a valid state.
    pub fn new(name: impl Into<String>, kind: UniformKind, initial: UniformValue) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "uniform name must be non-empty");

        let value = if kind.accepts(&initial) {
            initial
        } else {
            log::warn!(
                "uniform `{}`: invalid initial value (expected {}, got {}), using default",
                name,
                kind,
                initial.kind()
            );
            kind.default_value()
        };

        Self {
            name,
            kind,
            value,
            dirty: true,
        }
    }

    /// Boolean component.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, UniformKind::Bool, UniformValue::Bool(value))
    }

    /// 32-bit signed integer component.
    pub fn int(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, UniformKind::Int, UniformValue::Int(value))
    }

    /// Scalar float component.
    pub fn float(name: impl Into<String>, value: f32) -> Self {
        Self::new(name, UniformKind::Float, UniformValue::Float(value))
    }

    /// 2D vector component.
    pub fn vec2(name: impl Into<String>, value: Vec2) -> Self {
        Self::new(name, UniformKind::Vec2, UniformValue::Vec2(value))
    }

    /// 3D vector component.
    pub fn vec3(name: impl Into<String>, value: Vec3) -> Self {
        Self::new(name, UniformKind::Vec3, UniformValue::Vec3(value))
    }

    /// 4D vector component.
    pub fn vec4(name: impl Into<String>, value: Vec4) -> Self {
        Self::new(name, UniformKind::Vec4, UniformValue::Vec4(value))
    }

    /// 2x2 matrix component.
    pub fn mat2(name: impl Into<String>, value: Mat2) -> Self {
        Self::new(name, UniformKind::Mat2, UniformValue::Mat2(value))
    }

    /// 3x3 matrix component.
    pub fn mat3(name: impl Into<String>, value: Mat3) -> Self {
        Self::new(name, UniformKind::Mat3, UniformValue::Mat3(value))
    }

    /// 4x4 matrix component.
    pub fn mat4(name: impl Into<String>, value: Mat4) -> Self {
        Self::new(name, UniformKind::Mat4, UniformValue::Mat4(value))
    }

    /// Immutable identifier; used as (or as the suffix of) the shader
    /// uniform name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of value this slot stores.
    #[inline]
    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    /// Current value, as an independent copy.
    #[inline]
    pub fn value(&self) -> UniformValue {
        self.value
    }

    /// True when the current value has not been uploaded since it changed.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a re-upload on the next sync, e.g. after a program relink.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Assign a new value.
    ///
    /// Fails with [`MaterialError::TypeMismatch`] or
    /// [`MaterialError::NonFinite`]; on failure the stored value and the
    /// dirty flag are untouched. On success the value is copied in and the
    /// component becomes dirty.
    pub fn set(&mut self, candidate: UniformValue) -> Result<()> {
        if candidate.kind() != self.kind {
            let err = MaterialError::TypeMismatch {
                name: self.name.clone(),
                expected: self.kind,
                got: candidate.kind(),
            };
            log::warn!("{err}");
            return Err(err);
        }
        if !candidate.is_finite() {
            let err = MaterialError::NonFinite {
                name: self.name.clone(),
                kind: self.kind,
            };
            log::warn!("{err}");
            return Err(err);
        }
        self.value = candidate;
        self.dirty = true;
        Ok(())
    }

    /// Set a boolean value.
    pub fn set_bool(&mut self, value: bool) -> Result<()> {
        self.set(UniformValue::Bool(value))
    }

    /// Set an integer value.
    pub fn set_int(&mut self, value: i32) -> Result<()> {
        self.set(UniformValue::Int(value))
    }

    /// Set a float value.
    pub fn set_float(&mut self, value: f32) -> Result<()> {
        self.set(UniformValue::Float(value))
    }

    /// Set a 2D vector value.
    pub fn set_vec2(&mut self, value: Vec2) -> Result<()> {
        self.set(UniformValue::Vec2(value))
    }

    /// Set a 3D vector value.
    pub fn set_vec3(&mut self, value: Vec3) -> Result<()> {
        self.set(UniformValue::Vec3(value))
    }

    /// Set a 4D vector value.
    pub fn set_vec4(&mut self, value: Vec4) -> Result<()> {
        self.set(UniformValue::Vec4(value))
    }

    /// Set a 2x2 matrix value.
    pub fn set_mat2(&mut self, value: Mat2) -> Result<()> {
        self.set(UniformValue::Mat2(value))
    }

    /// Set a 3x3 matrix value.
    pub fn set_mat3(&mut self, value: Mat3) -> Result<()> {
        self.set(UniformValue::Mat3(value))
    }

    /// Set a 4x4 matrix value.
    pub fn set_mat4(&mut self, value: Mat4) -> Result<()> {
        self.set(UniformValue::Mat4(value))
    }

    /// Stored boolean, if this is a bool slot.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            UniformValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Stored integer, if this is an int slot.
    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            UniformValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Stored float, if this is a float slot.
    pub fn as_float(&self) -> Option<f32> {
        match self.value {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Stored 2D vector, if this is a vec2 slot.
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self.value {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    /// Stored 3D vector, if this is a vec3 slot.
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self.value {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    /// Stored 4D vector, if this is a vec4 slot.
    pub fn as_vec4(&self) -> Option<Vec4> {
        match self.value {
            UniformValue::Vec4(v) => Some(v),
            _ => None,
        }
    }

    /// Stored 2x2 matrix, if this is a mat2 slot.
    pub fn as_mat2(&self) -> Option<Mat2> {
        match self.value {
            UniformValue::Mat2(v) => Some(v),
            _ => None,
        }
    }

    /// Stored 3x3 matrix, if this is a mat3 slot.
    pub fn as_mat3(&self) -> Option<Mat3> {
        match self.value {
            UniformValue::Mat3(v) => Some(v),
            _ => None,
        }
    }

    /// Stored 4x4 matrix, if this is a mat4 slot.
    pub fn as_mat4(&self) -> Option<Mat4> {
        match self.value {
            UniformValue::Mat4(v) => Some(v),
            _ => None,
        }
    }

    /// Synchronize this parameter to the bound shader program.
    ///
    /// No-op while clean, so calling it twice without an intervening `set`
    /// uploads exactly once. When dirty, uploads under the key
    /// `prefix + name` (every kind honors the prefix) and clears the flag.
    pub fn apply_to_shader(&mut self, program: &mut dyn ShaderProgram, prefix: &str) {
        if !self.dirty {
            return;
        }
        if prefix.is_empty() {
            program.set_uniform(&self.name, &self.value);
        } else {
            let scoped = format!("{}{}", prefix, self.name);
            program.set_uniform(&scoped, &self.value);
        }
        log::trace!("uniform `{}{}` uploaded", prefix, self.name);
        self.dirty = false;
    }
}

impl Clone for MaterialComponent {
    /// Clones are independent copies and start dirty, so a cloned component
    /// always reaches the shader at least once even when the source was
    /// already synchronized.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            value: self.value,
            dirty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every upload so tests can assert on sync behavior.
    #[derive(Default)]
    struct RecordingProgram {
        uploads: Vec<(String, UniformValue)>,
    }

    impl ShaderProgram for RecordingProgram {
        fn set_uniform(&mut self, name: &str, value: &UniformValue) {
            self.uploads.push((name.to_string(), *value));
        }
    }

    #[test]
    fn fresh_component_holds_value_and_is_dirty() {
        let c = MaterialComponent::float("opacity", 0.5);
        assert_eq!(c.name(), "opacity");
        assert_eq!(c.kind(), UniformKind::Float);
        assert_eq!(c.as_float(), Some(0.5));
        assert!(c.is_dirty());
    }

    #[test]
    fn opacity_scenario_uploads_exactly_once() {
        let mut c = MaterialComponent::float("opacity", 0.5);
        let mut program = RecordingProgram::default();

        c.apply_to_shader(&mut program, "");
        assert_eq!(
            program.uploads,
            vec![("opacity".to_string(), UniformValue::Float(0.5))]
        );
        assert!(!c.is_dirty());

        // No intervening set: the second sync must not upload again.
        c.apply_to_shader(&mut program, "");
        assert_eq!(program.uploads.len(), 1);
    }

    #[test]
    fn set_marks_dirty_and_resyncs() {
        let mut c = MaterialComponent::float("opacity", 0.5);
        let mut program = RecordingProgram::default();
        c.apply_to_shader(&mut program, "");

        c.set_float(0.25).unwrap();
        assert!(c.is_dirty());
        c.apply_to_shader(&mut program, "");
        assert_eq!(program.uploads.len(), 2);
        assert_eq!(
            program.uploads[1],
            ("opacity".to_string(), UniformValue::Float(0.25))
        );
    }

    #[test]
    fn parent_prefix_namespaces_the_uniform_key() {
        let mut c = MaterialComponent::vec3("color", Vec3::new(1.0, 0.0, 0.0));
        let mut program = RecordingProgram::default();

        c.apply_to_shader(&mut program, "u_material.");
        assert_eq!(program.uploads[0].0, "u_material.color");
    }

    #[test]
    fn prefix_is_honored_by_every_kind() {
        let mut components = vec![
            MaterialComponent::boolean("a", true),
            MaterialComponent::int("b", 3),
            MaterialComponent::float("c", 1.0),
            MaterialComponent::vec2("d", Vec2::ONE),
            MaterialComponent::vec3("e", Vec3::ONE),
            MaterialComponent::vec4("f", Vec4::ONE),
            MaterialComponent::mat2("g", Mat2::IDENTITY),
            MaterialComponent::mat3("h", Mat3::IDENTITY),
            MaterialComponent::mat4("i", Mat4::IDENTITY),
        ];
        let mut program = RecordingProgram::default();
        for c in &mut components {
            c.apply_to_shader(&mut program, "mtl.");
        }
        for (key, _) in &program.uploads {
            assert!(key.starts_with("mtl."), "unprefixed key {key}");
        }
    }

    #[test]
    fn rejected_set_leaves_value_and_dirty_untouched() {
        let mut c = MaterialComponent::float("roughness", 0.4);
        let mut program = RecordingProgram::default();
        c.apply_to_shader(&mut program, "");
        assert!(!c.is_dirty());

        let err = c.set(UniformValue::Bool(true)).unwrap_err();
        assert!(matches!(
            err,
            MaterialError::TypeMismatch {
                expected: UniformKind::Float,
                got: UniformKind::Bool,
                ..
            }
        ));
        assert_eq!(c.as_float(), Some(0.4));
        assert!(!c.is_dirty());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut c = MaterialComponent::float("exposure", 1.0);
        assert!(matches!(
            c.set_float(f32::NAN),
            Err(MaterialError::NonFinite { .. })
        ));
        assert!(matches!(
            c.set_vec3(Vec3::ZERO),
            Err(MaterialError::TypeMismatch { .. })
        ));
        assert_eq!(c.as_float(), Some(1.0));

        let mut v = MaterialComponent::vec3("dir", Vec3::Y);
        assert!(matches!(
            v.set_vec3(Vec3::new(0.0, f32::INFINITY, 0.0)),
            Err(MaterialError::NonFinite { .. })
        ));
        assert_eq!(v.as_vec3(), Some(Vec3::Y));
    }

    #[test]
    fn invalid_initial_value_falls_back_to_documented_default() {
        let b = MaterialComponent::new("flag", UniformKind::Bool, UniformValue::Int(1));
        assert_eq!(b.as_bool(), Some(false));

        let i = MaterialComponent::new("count", UniformKind::Int, UniformValue::Bool(true));
        assert_eq!(i.as_int(), Some(0));

        let f = MaterialComponent::float("gain", f32::NAN);
        assert_eq!(f.as_float(), Some(1.0));

        let m = MaterialComponent::new("basis", UniformKind::Mat2, UniformValue::Float(0.0));
        assert_eq!(m.as_mat2(), Some(Mat2::ZERO));
    }

    #[test]
    fn clone_is_independent_and_dirty() {
        let mut a = MaterialComponent::vec3("dir", Vec3::Y);
        let mut program = RecordingProgram::default();
        a.apply_to_shader(&mut program, "");
        assert!(!a.is_dirty());

        let mut b = a.clone();
        assert!(b.is_dirty());
        b.set_vec3(Vec3::X).unwrap();
        assert_eq!(a.as_vec3(), Some(Vec3::Y));
        assert_eq!(b.as_vec3(), Some(Vec3::X));

        a.set_vec3(Vec3::Z).unwrap();
        assert_eq!(b.as_vec3(), Some(Vec3::X));
    }

    #[test]
    fn caller_storage_is_never_aliased() {
        let mut dir = Vec3::new(0.0, 1.0, 0.0);
        let c = MaterialComponent::vec3("dir", dir);

        // Mutating the caller's vector after construction must not affect
        // the stored value.
        dir.x = 42.0;
        assert_eq!(c.as_vec3(), Some(Vec3::new(0.0, 1.0, 0.0)));

        // The getter hands out a copy, not a view into storage.
        let mut copy = c.value();
        if let UniformValue::Vec3(v) = &mut copy {
            v.y = -1.0;
        }
        assert_eq!(c.as_vec3(), Some(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn mark_dirty_forces_reupload() {
        let mut c = MaterialComponent::int("mode", 2);
        let mut program = RecordingProgram::default();
        c.apply_to_shader(&mut program, "");
        c.mark_dirty();
        c.apply_to_shader(&mut program, "");
        assert_eq!(program.uploads.len(), 2);
    }
}
