//! Per-block geometry: mirroring a source across a reflector chain,
//! testing image-source visibility, and the air-absorption model (spec
//! §4.4, §4.5 steps 1-6). This is where the ramped scalars carried by
//! `AcousticPath` get their per-block targets.

use aural_core::Vec3;
use aural_scene::acoustic_path::AcousticPath;
use aural_scene::reflector::Reflector;
use aural_scene::source::SoundVertex;

/// Reflects `p` across `reflector`'s face plane.
fn mirror_across(reflector: &Reflector, p: Vec3) -> Vec3 {
    let projected = reflector.polygon.nearest_on_plane(p);
    projected * 2.0 - p
}

/// Frequency-independent air-absorption coefficient for the one-pole
/// lowpass used by `process_path_block`: approaches 1.0 (fully damped) as
/// distance grows, scaled by the vertex's absorption strength (spec §4.4).
fn air_absorption_alpha(enabled: bool, distance: f32) -> f32 {
    if !enabled {
        return 0.0;
    }
    const ABSORPTION_PER_METER: f32 = 0.0012;
    (1.0 - libm::expf(-ABSORPTION_PER_METER * distance)).clamp(0.0, 0.999)
}

/// Recomputes one path's image-source position, visibility, and ramped
/// scalars for the upcoming block. `mask_gain` folds in any receiver-level
/// mask attenuation evaluated against the (unmirrored) source position.
///
/// Returns `false` if the path should be skipped entirely this block (below
/// `min_gain`, beyond `max_distance`, or occluded).
pub fn update_path_geometry(
    path: &mut AcousticPath,
    vertex: &SoundVertex,
    source_pos: Vec3,
    receiver_pos: Vec3,
    reflectors: &[Reflector],
    r_min: f32,
    mask_gain: f32,
) -> bool {
    let mut image = source_pos;
    for &idx in &path.reflector_chain {
        image = mirror_across(&reflectors[idx], image);
    }
    path.mirrored_position = image;

    let mut visible = true;
    let mut total_scattering_loss = 0.0;
    for &idx in &path.reflector_chain {
        if !reflectors[idx].active {
            visible = false;
        }
        total_scattering_loss += reflectors[idx].scattering * (1.0 - total_scattering_loss);
    }
    if let Some(&last) = path.reflector_chain.last() {
        let poly = &reflectors[last].polygon;
        visible &= poly
            .segment_intersection(image, receiver_pos)
            .is_some_and(|(hit, _)| poly.contains_projection(hit));
    }
    path.visible = visible;

    let distance = (receiver_pos - image).norm();
    let within_range = vertex.within_range(distance);
    let within_order = path.ism_order >= vertex.ism_min_order && path.ism_order <= vertex.ism_max_order;

    let mut gain = if visible && within_range && within_order {
        vertex.distance_gain(distance, r_min) * vertex.input_gain * mask_gain * (1.0 - total_scattering_loss)
    } else {
        0.0
    };
    if gain.abs() < vertex.min_gain {
        gain = 0.0;
    }

    let alpha = air_absorption_alpha(vertex.air_absorption, distance);

    path.distance.advance_block(distance);
    path.gain.advance_block(gain);
    path.air_absorption.advance_block(alpha);
    path.layer_gain.advance_block(path.layer_gain.current);

    gain.abs() > f32::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use aural_scene::acoustic_path::AcousticPathArena;
    use aural_scene::source::GainModel;

    fn floor() -> Reflector {
        let poly = aural_core::Polygon::new(vec![
            Vec3::new(-5.0, -5.0, -1.0),
            Vec3::new(5.0, -5.0, -1.0),
            Vec3::new(5.0, 5.0, -1.0),
            Vec3::new(-5.0, 5.0, -1.0),
        ])
        .unwrap();
        Reflector::new("floor", poly)
    }

    #[test]
    fn direct_path_distance_matches_euclidean_separation() {
        let mut arena = AcousticPathArena::build(1, &[], 0);
        let vertex = SoundVertex::new("v");
        let source_pos = Vec3::new(0.0, 0.0, 1.0);
        let receiver_pos = Vec3::new(3.0, 4.0, 1.0);
        let ok = update_path_geometry(&mut arena.paths[0], &vertex, source_pos, receiver_pos, &[], 0.1, 1.0);
        assert!(ok);
        assert!((arena.paths[0].distance.current - 5.0).abs() < 1e-4);
    }

    #[test]
    fn unity_gain_model_ignores_mask_attenuation_sign_but_not_value() {
        let mut arena = AcousticPathArena::build(1, &[], 0);
        let mut vertex = SoundVertex::new("v");
        vertex.gain_model = GainModel::Unity;
        update_path_geometry(
            &mut arena.paths[0],
            &vertex,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            &[],
            0.1,
            0.5,
        );
        assert!((arena.paths[0].gain.current - 0.5).abs() < 1e-4);
    }

    #[test]
    fn beyond_max_distance_produces_zero_gain() {
        let mut arena = AcousticPathArena::build(1, &[], 0);
        let mut vertex = SoundVertex::new("v");
        vertex.max_distance = Some(2.0);
        let ok = update_path_geometry(
            &mut arena.paths[0],
            &vertex,
            Vec3::ZERO,
            Vec3::new(5.0, 0.0, 0.0),
            &[],
            0.1,
            1.0,
        );
        assert!(!ok);
        assert_eq!(arena.paths[0].gain.current, 0.0);
    }

    #[test]
    fn ism_min_order_silences_the_direct_path() {
        let reflectors = vec![floor()];
        let mut arena = AcousticPathArena::build(1, &[0], 1);
        let mut vertex = SoundVertex::new("v");
        vertex.ism_min_order = 1;
        vertex.ism_max_order = 1;
        let primary = arena.paths.iter().position(|p| p.ism_order == 0).unwrap();
        let ok = update_path_geometry(
            &mut arena.paths[primary],
            &vertex,
            Vec3::new(2.0, 0.0, 2.0),
            Vec3::new(-3.0, 0.0, 2.0),
            &reflectors,
            0.1,
            1.0,
        );
        assert!(!ok);
        assert_eq!(arena.paths[primary].gain.current, 0.0);
    }

    #[test]
    fn reflected_path_mirrors_the_source_across_the_reflector_plane() {
        let reflectors = vec![floor()];
        let mut arena = AcousticPathArena::build(1, &[0], 1);
        let idx = arena.paths.iter().position(|p| p.ism_order == 1).unwrap();
        let vertex = SoundVertex::new("v");
        update_path_geometry(
            &mut arena.paths[idx],
            &vertex,
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 2.0),
            &reflectors,
            0.1,
            1.0,
        );
        // Mirrored across z=-1: image z = -1 - (2 - (-1)) = -4.
        assert!((arena.paths[idx].mirrored_position.z + 4.0).abs() < 1e-4);
    }

    #[test]
    fn inactive_reflector_marks_the_path_invisible() {
        let mut reflectors = vec![floor()];
        reflectors[0].active = false;
        let mut arena = AcousticPathArena::build(1, &[0], 1);
        let idx = arena.paths.iter().position(|p| p.ism_order == 1).unwrap();
        let vertex = SoundVertex::new("v");
        update_path_geometry(
            &mut arena.paths[idx],
            &vertex,
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 1.0, 2.0),
            &reflectors,
            0.1,
            1.0,
        );
        assert!(!arena.paths[idx].visible);
    }
}
