//! Configuration errors (spec §7 "Configuration" error kind): surfaced as
//! a single error with no partial state retained, per a failed validation
//! pass.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("face '{face}' references unknown material '{material}'")]
    DanglingMaterialReference { face: String, material: String },

    #[error("receiver '{receiver}' mask plugin references unknown mask '{mask}'")]
    DanglingMaskReference { receiver: String, mask: String },

    #[error("face '{face}' has only {count} vertices; at least 3 are required")]
    TooFewVertices { face: String, count: usize },

    #[error("face '{face}' is non-planar: vertex deviates {deviation:.4} m from its best-fit plane")]
    NonPlanarFace { face: String, deviation: f32 },

    #[error("receiver '{receiver}' requests unknown kind '{kind}'")]
    UnknownReceiverKind { receiver: String, kind: String },

    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ConfigError>),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
