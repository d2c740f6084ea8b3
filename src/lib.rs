// src/lib.rs
//! Material-parameter subsystem for a real-time renderer.
//!
//! Models the typed, named parameters ("uniforms") a shader program
//! consumes, tracks which of them changed since the last upload, and
//! synchronizes only the changed ones to the active program before a draw.
//!
//! # Features
//! - Typed uniform slots: bool, int, float, vec2/3/4, mat2/3/4 (glam types)
//! - Per-parameter dirty tracking — GPU calls bounded by *changed* params
//! - Validation with explicit results: kind mismatch and non-finite lanes
//!   are rejected without mutating the slot
//! - Copy value semantics — no aliasing of caller-owned vectors/matrices
//! - Uniform name namespacing via a parent prefix (`"u_material.color"`)
//! - Material aggregates with builders and JSON definition files
//!
//! # Example
//!
//! ```
//! use material_uniforms::{MaterialComponent, ShaderProgram, UniformValue};
//!
//! struct PrintProgram;
//! impl ShaderProgram for PrintProgram {
//!     fn set_uniform(&mut self, name: &str, value: &UniformValue) {
//!         println!("{name} <- {value:?}");
//!     }
//! }
//!
//! let mut opacity = MaterialComponent::float("opacity", 0.5);
//! let mut program = PrintProgram;
//!
//! opacity.apply_to_shader(&mut program, ""); // uploads 0.5
//! opacity.apply_to_shader(&mut program, ""); // clean: no upload
//! opacity.set_float(0.25).unwrap();
//! opacity.apply_to_shader(&mut program, ""); // uploads 0.25
//! ```
//!
//! The crate is single-threaded by design: a component is owned and mutated
//! by the thread driving the render loop, and all `set` calls for a frame
//! happen before that frame's sync.

mod component;
mod error;
mod material;
mod shader;
mod uniform;

pub use component::MaterialComponent;
pub use error::{MaterialError, Result};
pub use material::{Material, MaterialBuilder, MaterialDef, UniformDef};
pub use shader::ShaderProgram;
pub use uniform::{UniformKind, UniformValue};

// Math types appear throughout the public API.
pub use glam;
