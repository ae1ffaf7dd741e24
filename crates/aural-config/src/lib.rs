//! The typed in-memory scene description (spec §6 "Scene description")
//! plus structural validation. This is *not* the on-disk session-file
//! reader — ingesting that text format is an external collaborator's job —
//! it is the typed target structure such a reader populates, plus the
//! validation and `aural-scene` conversion every caller needs regardless
//! of what produced the tree.

pub mod attributes;
pub mod build;
pub mod error;
pub mod validate;

pub use attributes::{
    DiffuseDesc, FaceDesc, GainModelAttr, MaskDesc, MaterialDesc, ObstacleDesc, ReceiverDesc, SceneDescription,
    SoundDesc, SourceDesc,
};
pub use build::{apply_material_fits, build, BuiltScene};
pub use error::{ConfigError, ConfigResult};
pub use validate::validate;
