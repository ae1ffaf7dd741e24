//! The shared contract every receiver variant implements (spec §4.8).

use aural_core::{FoaBuffer, Vec3};

/// A directional speaker or virtual microphone channel: a unit direction
/// plus optional per-speaker calibration metadata used by the post-stage
/// (spec §4.7 steps 5-7).
#[derive(Debug, Clone, Copy)]
pub struct SpeakerChannel {
    pub direction: Vec3,
    pub gain: f32,
    pub delay_seconds: f32,
    pub is_subwoofer: bool,
}

impl SpeakerChannel {
    pub fn new(direction: Vec3) -> Self {
        Self { direction: direction.normalized(), gain: 1.0, delay_seconds: 0.0, is_subwoofer: false }
    }
}

/// The polymorphic receiver contract every variant implements (spec §4.8):
/// add a panned point source, add a diffuse FOA field, and (for
/// speaker-based decoders) an optional output post-process.
pub trait ReceiverModel {
    /// The speaker/virtual-microphone directions this variant declares.
    /// Non-speaker-based variants (e.g. a single omni capsule) return a
    /// single entry.
    fn channels(&self) -> &[SpeakerChannel];

    /// Pans one sample of mono audio at relative position `prel` (in the
    /// receiver's local frame) with an angular source width, writing into
    /// `out_channels` (one slice per channel, same length as `channels()`).
    fn add_pointsource(&mut self, prel: Vec3, angular_width: f32, audio: &[f32], out_channels: &mut [Vec<f32>]);

    /// Decodes one block of a diffuse FOA field into `out_channels`.
    fn add_diffuse_sound_field(&mut self, foa: &FoaBuffer, out_channels: &mut [Vec<f32>]);

    /// Optional output post-process; the default is a no-op.
    fn postproc(&mut self, _out_channels: &mut [Vec<f32>]) {}
}
