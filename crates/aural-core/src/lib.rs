//! Math and buffer primitives for the aural rendering engine.
//!
//! No allocation happens outside construction: every type here is sized
//! once and then processed in place, so this crate works both in the
//! `no_std` + `alloc` embedded case and as an ordinary `std` dependency.
//!
//! # Modules
//!
//! - [`vector3`], [`euler`], [`polygon`] — 3-D geometry
//! - [`audio_buffer`], [`foa`] — mono and first-order-ambisonic buffers
//! - [`delay`], [`biquad`], [`one_pole`], [`param`] — per-sample DSP building blocks
//! - [`math`] — dB/linear conversions and small numeric helpers
//! - [`fft`], [`partitioned_conv`], [`level_meter`] — `std`-only spectral tools
//!
//! # `no_std` support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! aural-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod audio_buffer;
pub mod biquad;
pub mod delay;
pub mod euler;
pub mod foa;
pub mod math;
pub mod one_pole;
pub mod param;
pub mod polygon;
pub mod vector3;

#[cfg(feature = "std")]
pub mod fft;
#[cfg(feature = "std")]
pub mod level_meter;
#[cfg(feature = "std")]
pub mod partitioned_conv;

pub use audio_buffer::{db_spl_to_linear, linear_to_db_spl, AudioBuffer, SPL_REFERENCE};
pub use biquad::{
    highpass_coefficients, highshelf_coefficients, lowpass_coefficients, peaking_eq_coefficients, Biquad,
};
pub use delay::VariableDelayLine;
pub use euler::Euler;
pub use foa::{sqrt_half, FoaBuffer, FoaRotator};
pub use math::{clamp, db_to_linear, flush_denormal, lerp, linear_to_db};
pub use one_pole::OnePole;
pub use param::{LinearSmoothedParam, SmoothedParam};
pub use polygon::{Polygon, TooFewVertices};
pub use vector3::Vec3;

#[cfg(feature = "std")]
pub use fft::Fft;
#[cfg(feature = "std")]
pub use level_meter::LevelMeter;
#[cfg(feature = "std")]
pub use partitioned_conv::PartitionedConvolver;
