//! The scene data model for the acoustic rendering engine: dynamic
//! objects, their trajectories, sources, reflectors, obstacles, materials,
//! diffuse fields, masks, receivers, and the per-receiver image-source
//! path arena. Pure data plus the geometric recomputation that drives
//! per-block DSP elsewhere; the DSP algorithms themselves live alongside
//! the receiver and acoustic-path renderers.

pub mod acoustic_path;
pub mod diffuse;
pub mod dynobject;
pub mod error;
pub mod lifecycle;
pub mod mask;
pub mod material;
pub mod obstacle;
pub mod receiver;
pub mod reflector;
pub mod scatter;
pub mod source;
pub mod trajectory;

pub use acoustic_path::{AcousticPath, AcousticPathArena, RampedScalar, ReflectionFilterState};
pub use diffuse::DiffuseField;
pub use dynobject::{Color, DynObject, NavMesh, Pose};
pub use error::{SceneError, SceneResult};
pub use lifecycle::{configure_all, post_prepare_all, AudioState};
pub use mask::{Mask, MaskMode};
pub use material::{AbsorptionSample, Material, MaterialFit};
pub use obstacle::{DiffractionState, Obstacle, ObstacleKind};
pub use receiver::{BoundingBox, FadeState, Receiver, ReceiverKind};
pub use reflector::Reflector;
pub use scatter::ScatterAccumulator;
pub use source::{GainModel, SoundVertex, Source};
pub use trajectory::{InterpolationMode, Keyframe, Trajectory};
