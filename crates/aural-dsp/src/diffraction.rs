//! Per-obstacle diffraction filtering (spec §4.3).
//!
//! An obstacle blocks or passes a source–receiver path depending on where
//! the segment crosses its polygon; a blocked path is progressively
//! low-passed as the diffraction angle grows, using an Airy-disk estimate
//! of the first null frequency.

use core::f32::consts::PI;

use aural_core::Vec3;
use aural_scene::obstacle::{DiffractionState, Obstacle, ObstacleKind};

/// First null of the Airy diffraction pattern, in units of `aperture·sinθ / c`.
const AIRY_FIRST_ZERO: f32 = 3.8317;

/// Applies one block's worth of diffraction filtering for `obstacle` along
/// the segment `source_pos -> receiver_pos`, processing `samples` in
/// place. Returns the effective source position the caller should use for
/// the rest of the path's propagation DSP this block: the grazing point
/// when the obstacle is solid and blocking, otherwise `source_pos`
/// unchanged (spec §4.3 step 4).
pub fn apply_diffraction(
    obstacle: &Obstacle,
    state: &mut DiffractionState,
    source_pos: Vec3,
    receiver_pos: Vec3,
    samples: &mut [f32],
    sample_rate: f32,
    speed_of_sound: f32,
) -> Vec3 {
    let Some((hit, _w)) = obstacle.polygon.segment_intersection(source_pos, receiver_pos) else {
        state.advance_block(0.0);
        return source_pos;
    };

    let is_inside_polygon = obstacle.polygon.contains_projection(hit);
    let blocked = match obstacle.kind {
        ObstacleKind::Inside => is_inside_polygon,
        ObstacleKind::Hole => !is_inside_polygon,
    };
    if !blocked {
        state.advance_block(0.0);
        return source_pos;
    }

    let incoming = (hit - source_pos).normalized();
    let outgoing = (receiver_pos - hit).normalized();
    let cos_theta = incoming.dot(outgoing).clamp(-1.0, 1.0);
    let theta = libm::acosf(cos_theta);
    let sin_theta = libm::sinf(theta).max(1e-4);
    let aperture = obstacle.aperture().max(1e-4);

    let f0 = AIRY_FIRST_ZERO * speed_of_sound / (2.0 * PI * aperture * sin_theta);
    let a1 = libm::expf(-PI * f0 / sample_rate).clamp(0.0, 0.999_999);
    state.advance_block(a1);

    let len = samples.len().max(1);
    for (i, sample) in samples.iter_mut().enumerate() {
        let frac = i as f32 / len as f32;
        let a1_interp = state.a1_prev + (state.a1_current - state.a1_prev) * frac;
        state.y1 = state.y1 * a1_interp + *sample * (1.0 - a1_interp);
        let wet = state.y1;
        *sample = obstacle.transmission * *sample + (1.0 - obstacle.transmission) * wet;
    }

    match obstacle.kind {
        ObstacleKind::Inside => hit,
        ObstacleKind::Hole => source_pos,
    }
}
