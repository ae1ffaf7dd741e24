//! Concrete `ReceiverModel` implementations: the point-source panning and
//! diffuse-field decoding laws for each supported microphone/speaker-array
//! variant (spec §4.8).
//!
//! Only a representative cross-section of the full variant catalogue is
//! implemented here — see `DESIGN.md` for which `ReceiverKind` values have no
//! concrete model and why.

pub mod amb1;
pub mod cardioid;
pub mod diagnostics;
pub mod hrtf;
pub mod model;
pub mod omni;
pub mod ortf;
pub mod vbap2d;

pub use amb1::Amb1;
pub use cardioid::Cardioid;
pub use hrtf::ParametricHrtf;
pub use model::{ReceiverModel, SpeakerChannel};
pub use omni::Omni;
pub use ortf::Ortf;
pub use vbap2d::Vbap2d;
