//! Per-block DSP algorithms that operate on the data model in
//! `aural-scene`: obstacle diffraction, acoustic-path propagation, and
//! diffuse-field rendering.

pub mod acoustic_path_dsp;
pub mod diffraction;
pub mod diffuse_dsp;

pub use acoustic_path_dsp::{process_path_block, PathDspState};
pub use diffraction::apply_diffraction;
pub use diffuse_dsp::{render_diffuse_path, DiffusePathState};

/// Speed of sound in air, m/s, used throughout propagation-delay and
/// diffraction-frequency calculations.
pub const SPEED_OF_SOUND: f32 = 343.0;
