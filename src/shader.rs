// src/shader.rs
//! Seam toward the GPU-facing shader program.
//!
//! The renderer owns program binding and compilation; this crate only needs
//! a sink that accepts named uniform values. Implementing the trait is the
//! whole integration contract, so a program without a uniform-set capability
//! cannot reach [`apply_to_shader`](crate::MaterialComponent::apply_to_shader)
//! in the first place.

use crate::uniform::UniformValue;

/// A bound shader program that accepts uniform uploads.
///
/// Callers must only invoke [`set_uniform`](Self::set_uniform) while the
/// program is the currently active one; that precondition is owned by the
/// render loop, not enforced here.
pub trait ShaderProgram {
    /// Upload one named uniform value to the program.
    fn set_uniform(&mut self, name: &str, value: &UniformValue);
}
