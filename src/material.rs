// src/material.rs
//! Material aggregate: a named set of uniform components applied to a
//! shader program once per draw.
//!
//! The aggregate owns its components exclusively. Application code mutates
//! values through the typed setters, then the render loop calls
//! [`Material::apply_to_shader`] once per frame; only components whose
//! values changed since the last sync are uploaded.

use std::collections::HashMap;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::component::MaterialComponent;
use crate::error::{MaterialError, Result};
use crate::shader::ShaderProgram;
use crate::uniform::{UniformKind, UniformValue};

/// A named collection of [`MaterialComponent`]s.
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    components: HashMap<String, MaterialComponent>,
}

impl Material {
    /// Create an empty material.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: HashMap::new(),
        }
    }

    /// Material name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a component, keyed by its own name. Replaces and returns any
    /// component previously stored under the same name.
    pub fn insert(&mut self, component: MaterialComponent) -> Option<MaterialComponent> {
        self.components
            .insert(component.name().to_string(), component)
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&MaterialComponent> {
        self.components.get(name)
    }

    /// Look up a component mutably by name.
    pub fn component_mut(&mut self, name: &str) -> Option<&mut MaterialComponent> {
        self.components.get_mut(name)
    }

    /// Current value of a named uniform, as a copy.
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.components.get(name).map(|c| c.value())
    }

    /// Assign a value to a named uniform.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<()> {
        match self.components.get_mut(name) {
            Some(component) => component.set(value),
            None => Err(MaterialError::UniformNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Set a boolean uniform.
    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        self.set(name, UniformValue::Bool(value))
    }

    /// Set an integer uniform.
    pub fn set_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.set(name, UniformValue::Int(value))
    }

    /// Set a float uniform.
    pub fn set_float(&mut self, name: &str, value: f32) -> Result<()> {
        self.set(name, UniformValue::Float(value))
    }

    /// Set a 2D vector uniform.
    pub fn set_vec2(&mut self, name: &str, value: Vec2) -> Result<()> {
        self.set(name, UniformValue::Vec2(value))
    }

    /// Set a 3D vector uniform.
    pub fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.set(name, UniformValue::Vec3(value))
    }

    /// Set a 4D vector uniform.
    pub fn set_vec4(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.set(name, UniformValue::Vec4(value))
    }

    /// Set a 2x2 matrix uniform.
    pub fn set_mat2(&mut self, name: &str, value: Mat2) -> Result<()> {
        self.set(name, UniformValue::Mat2(value))
    }

    /// Set a 3x3 matrix uniform.
    pub fn set_mat3(&mut self, name: &str, value: Mat3) -> Result<()> {
        self.set(name, UniformValue::Mat3(value))
    }

    /// Set a 4x4 matrix uniform.
    pub fn set_mat4(&mut self, name: &str, value: Mat4) -> Result<()> {
        self.set(name, UniformValue::Mat4(value))
    }

    /// Synchronize every owned component to the bound program.
    ///
    /// Each component is invoked once; only dirty ones upload. `prefix` is
    /// prepended to every uniform name, e.g. `"u_material."` yields keys
    /// like `"u_material.color"`.
    pub fn apply_to_shader(&mut self, program: &mut dyn ShaderProgram, prefix: &str) {
        for component in self.components.values_mut() {
            component.apply_to_shader(program, prefix);
        }
    }

    /// Number of components currently awaiting upload.
    pub fn dirty_count(&self) -> usize {
        self.components.values().filter(|c| c.is_dirty()).count()
    }

    /// Force every component to re-upload on the next sync, e.g. after the
    /// target program was recompiled or relinked.
    pub fn mark_all_dirty(&mut self) {
        for component in self.components.values_mut() {
            component.mark_dirty();
        }
    }

    /// Names of all owned uniforms.
    pub fn uniform_names(&self) -> Vec<&str> {
        self.components.keys().map(|s| s.as_str()).collect()
    }

    /// Number of owned components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when the material owns no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Build a material from a parsed definition.
    ///
    /// A missing default yields the kind's documented default value; an
    /// unparseable default is logged and also falls back.
    pub fn from_def(def: &MaterialDef) -> Self {
        let mut material = Material::new(def.name.clone());
        for uniform in &def.uniforms {
            let initial = match &uniform.default {
                Some(literal) => match UniformValue::from_json(uniform.kind, literal) {
                    Some(value) => value,
                    None => {
                        log::warn!(
                            "material `{}`: default for `{}` is not a valid {}, using the kind default",
                            def.name,
                            uniform.name,
                            uniform.kind
                        );
                        uniform.kind.default_value()
                    }
                },
                None => uniform.kind.default_value(),
            };
            material.insert(MaterialComponent::new(&uniform.name, uniform.kind, initial));
        }
        material
    }

    /// Parse a material from a JSON definition document.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: MaterialDef = serde_json::from_str(json)?;
        Ok(Self::from_def(&def))
    }

    /// Snapshot this material as a definition, with current values as the
    /// defaults. Uniforms are sorted by name so output is stable.
    pub fn to_def(&self) -> MaterialDef {
        let mut uniforms: Vec<UniformDef> = self
            .components
            .values()
            .map(|c| UniformDef {
                name: c.name().to_string(),
                kind: c.kind(),
                default: Some(c.value().to_json()),
            })
            .collect();
        uniforms.sort_by(|a, b| a.name.cmp(&b.name));
        MaterialDef {
            name: self.name.clone(),
            uniforms,
        }
    }
}

/// On-disk material definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Material name.
    pub name: String,
    /// Declared uniform slots.
    pub uniforms: Vec<UniformDef>,
}

/// One uniform slot declaration in a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformDef {
    /// Uniform name.
    pub name: String,
    /// Slot kind, written as the GLSL type name (`"float"`, `"vec3"`, ...).
    #[serde(rename = "type")]
    pub kind: UniformKind,
    /// Optional initial value. Vectors and matrices are flat arrays,
    /// column-major.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// Fluent construction for materials with literal initial values.
///
/// ```
/// use material_uniforms::MaterialBuilder;
/// use glam::Vec3;
///
/// let material = MaterialBuilder::new("pbr_default")
///     .with_vec3("albedo", Vec3::new(0.8, 0.2, 0.1))
///     .with_float("metallic", 0.0)
///     .with_float("roughness", 0.5)
///     .build();
/// assert_eq!(material.len(), 3);
/// ```
pub struct MaterialBuilder {
    material: Material,
}

impl MaterialBuilder {
    /// Start building a material with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            material: Material::new(name),
        }
    }

    /// Add a pre-built component.
    pub fn with_component(mut self, component: MaterialComponent) -> Self {
        self.material.insert(component);
        self
    }

    /// Add a boolean uniform.
    pub fn with_bool(self, name: impl Into<String>, value: bool) -> Self {
        self.with_component(MaterialComponent::boolean(name, value))
    }

    /// Add an integer uniform.
    pub fn with_int(self, name: impl Into<String>, value: i32) -> Self {
        self.with_component(MaterialComponent::int(name, value))
    }

    /// Add a float uniform.
    pub fn with_float(self, name: impl Into<String>, value: f32) -> Self {
        self.with_component(MaterialComponent::float(name, value))
    }

    /// Add a 2D vector uniform.
    pub fn with_vec2(self, name: impl Into<String>, value: Vec2) -> Self {
        self.with_component(MaterialComponent::vec2(name, value))
    }

    /// Add a 3D vector uniform.
    pub fn with_vec3(self, name: impl Into<String>, value: Vec3) -> Self {
        self.with_component(MaterialComponent::vec3(name, value))
    }

    /// Add a 4D vector uniform.
    pub fn with_vec4(self, name: impl Into<String>, value: Vec4) -> Self {
        self.with_component(MaterialComponent::vec4(name, value))
    }

    /// Add a 2x2 matrix uniform.
    pub fn with_mat2(self, name: impl Into<String>, value: Mat2) -> Self {
        self.with_component(MaterialComponent::mat2(name, value))
    }

    /// Add a 3x3 matrix uniform.
    pub fn with_mat3(self, name: impl Into<String>, value: Mat3) -> Self {
        self.with_component(MaterialComponent::mat3(name, value))
    }

    /// Add a 4x4 matrix uniform.
    pub fn with_mat4(self, name: impl Into<String>, value: Mat4) -> Self {
        self.with_component(MaterialComponent::mat4(name, value))
    }

    /// Finish building.
    pub fn build(self) -> Material {
        self.material
    }
}
