//! Error types for scene-model construction and lifecycle operations.

use thiserror::Error;

/// Errors that can occur while building or configuring a scene.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// A trajectory keyframe was pushed with a time at or before the last
    /// keyframe's time.
    #[error("trajectory keyframe at t={time} is not after the previous keyframe at t={previous}")]
    OutOfOrderKeyframe { time: f32, previous: f32 },

    /// A polygon was constructed with fewer than three vertices.
    #[error("polygon '{name}' has {count} vertices, need at least 3")]
    TooFewVertices { name: String, count: usize },

    /// A named reference (material, plugin, mask) pointed at an object that
    /// does not exist in the scene.
    #[error("'{referrer}' references unknown {kind} '{name}'")]
    DanglingReference { referrer: String, kind: &'static str, name: String },

    /// Two scene objects of the same kind were given the same name.
    #[error("duplicate {kind} name: '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// A sub-component failed to configure; already-configured siblings
    /// have been rolled back (spec §3 Lifecycle).
    #[error("configure failed for '{component}': {reason}")]
    ConfigureFailed { component: String, reason: String },
}

/// Result type for scene-model operations.
pub type SceneResult<T> = Result<T, SceneError>;
