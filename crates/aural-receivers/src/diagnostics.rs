//! Spatial-error diagnostics for a speaker-based receiver variant: given the
//! gains a `ReceiverModel` assigned to a target direction, how close is the
//! reconstructed energy/velocity vector to that direction (spec §4.8, §8).

use aural_core::Vec3;

use crate::model::SpeakerChannel;

/// Velocity vector `rV`: the gain-weighted sum of speaker directions,
/// normalized by the sum of gains. Points toward the perceived image for a
/// low-frequency, amplitude-panned source.
pub fn velocity_vector(channels: &[SpeakerChannel], gains: &[f32]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    let mut gain_sum = 0.0;
    for (ch, &g) in channels.iter().zip(gains) {
        sum = sum + ch.direction * g;
        gain_sum += g;
    }
    if gain_sum.abs() <= f32::EPSILON {
        return Vec3::ZERO;
    }
    sum / gain_sum
}

/// Energy vector `rE`: the power-weighted sum of speaker directions,
/// normalized by the sum of squared gains. Governs the perceived image at
/// high frequencies.
pub fn energy_vector(channels: &[SpeakerChannel], gains: &[f32]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    let mut power_sum = 0.0;
    for (ch, &g) in channels.iter().zip(gains) {
        sum = sum + ch.direction * (g * g);
        power_sum += g * g;
    }
    if power_sum.abs() <= f32::EPSILON {
        return Vec3::ZERO;
    }
    sum / power_sum
}

/// Angular error, in radians, between a reconstruction vector (`rE`/`rV`,
/// not necessarily unit length) and the intended source direction.
pub fn angular_error(reconstruction: Vec3, target_direction: Vec3) -> f32 {
    let a = reconstruction.normalized();
    let b = target_direction.normalized();
    libm::acosf(a.dot(b).clamp(-1.0, 1.0))
}

/// Magnitude error: how far `‖rE‖`/`‖rV‖` falls short of 1.0, the value a
/// perfectly focused single-speaker reproduction would achieve.
pub fn magnitude_error(reconstruction: Vec3) -> f32 {
    1.0 - reconstruction.norm()
}
