//! Structural validation of a [`SceneDescription`] (spec §7
//! "Configuration" errors): duplicate names, dangling material/mask
//! references, and non-planar or degenerate faces. Accumulates every
//! violation found rather than stopping at the first.

use std::collections::HashSet;

use aural_core::Vec3;

use crate::attributes::{FaceDesc, SceneDescription};
use crate::error::ConfigError;

/// Minimum vertex count for a face or obstacle polygon.
const MIN_FACE_VERTICES: usize = 3;
/// Maximum allowed deviation, in meters, of a vertex from a face's
/// best-fit plane before it's flagged non-planar.
const PLANARITY_TOLERANCE_M: f32 = 1e-3;

/// Runs every structural check against `scene`, returning `Ok(())` if none
/// fired or `Err(ConfigError::Multiple)` with every violation found.
pub fn validate(scene: &SceneDescription) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    check_duplicates(&mut errors, "source", scene.sources.iter().map(|s| s.name.as_str()));
    check_duplicates(&mut errors, "diffuse", scene.diffuse_fields.iter().map(|d| d.name.as_str()));
    check_duplicates(&mut errors, "receiver", scene.receivers.iter().map(|r| r.name.as_str()));
    check_duplicates(&mut errors, "face", scene.faces.iter().map(|f| f.name.as_str()));
    check_duplicates(&mut errors, "obstacle", scene.obstacles.iter().map(|o| o.name.as_str()));
    check_duplicates(&mut errors, "mask", scene.masks.iter().map(|m| m.name.as_str()));
    check_duplicates(&mut errors, "material", scene.materials.iter().map(|m| m.name.as_str()));

    let material_names: HashSet<&str> = scene.materials.iter().map(|m| m.name.as_str()).collect();
    for face in &scene.faces {
        if let Some(material) = &face.material {
            if !material_names.contains(material.as_str()) {
                errors.push(ConfigError::DanglingMaterialReference {
                    face: face.name.clone(),
                    material: material.clone(),
                });
            }
        }
        check_face_geometry(&mut errors, face);
    }

    let mask_names: HashSet<&str> = scene.masks.iter().map(|m| m.name.as_str()).collect();
    for receiver in &scene.receivers {
        if let Some(mask) = &receiver.mask_plugin {
            if !mask_names.contains(mask.as_str()) {
                errors.push(ConfigError::DanglingMaskReference { receiver: receiver.name.clone(), mask: mask.clone() });
            }
        }
    }

    for obstacle in &scene.obstacles {
        if obstacle.vertices.len() < MIN_FACE_VERTICES {
            errors.push(ConfigError::TooFewVertices { face: obstacle.name.clone(), count: obstacle.vertices.len() });
            continue;
        }
        if let Some(deviation) = planarity_deviation(&obstacle.vertices) {
            if deviation > PLANARITY_TOLERANCE_M {
                errors.push(ConfigError::NonPlanarFace { face: obstacle.name.clone(), deviation });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else if errors.len() == 1 {
        Err(errors.into_iter().next().unwrap())
    } else {
        Err(ConfigError::Multiple(errors))
    }
}

fn check_duplicates<'a>(errors: &mut Vec<ConfigError>, kind: &'static str, names: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ConfigError::DuplicateName { kind, name: name.to_string() });
        }
    }
}

fn check_face_geometry(errors: &mut Vec<ConfigError>, face: &FaceDesc) {
    if face.vertices.len() < MIN_FACE_VERTICES {
        errors.push(ConfigError::TooFewVertices { face: face.name.clone(), count: face.vertices.len() });
        return;
    }
    if let Some(deviation) = planarity_deviation(&face.vertices) {
        if deviation > PLANARITY_TOLERANCE_M {
            errors.push(ConfigError::NonPlanarFace { face: face.name.clone(), deviation });
        }
    }
}

/// Maximum perpendicular distance of any vertex from the best-fit plane
/// through `vertices` (normal estimated the same way [`aural_core::Polygon`]
/// does: the sum of consecutive edge cross products). `None` for fewer
/// than 3 vertices, where planarity is undefined.
fn planarity_deviation(vertices: &[Vec3]) -> Option<f32> {
    if vertices.len() < 3 {
        return None;
    }
    let n = vertices.len();
    let mut centroid = Vec3::ZERO;
    for &v in vertices {
        centroid += v;
    }
    centroid = centroid / n as f32;

    let mut normal_sum = Vec3::ZERO;
    let mut prev = vertices[n - 1];
    for &v in vertices {
        normal_sum += prev.cross(v);
        prev = v;
    }
    let normal = normal_sum.normalized();
    if normal.norm_sqr() < f32::EPSILON {
        return Some(0.0);
    }

    let deviation = vertices.iter().map(|&v| (v - centroid).dot(normal).abs()).fold(0.0_f32, f32::max);
    Some(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{FaceDesc, MaskDesc, MaterialDesc, ReceiverDesc, SceneDescription};

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn planar_quad_passes() {
        let mut scene = SceneDescription::default();
        scene.faces.push(FaceDesc::new("floor", square()));
        assert!(validate(&scene).is_ok());
    }

    #[test]
    fn warped_quad_is_flagged() {
        let mut verts = square();
        verts[2].z = 0.5;
        let mut scene = SceneDescription::default();
        scene.faces.push(FaceDesc::new("floor", verts));
        let err = validate(&scene).unwrap_err();
        assert!(matches!(err, ConfigError::NonPlanarFace { .. }));
    }

    #[test]
    fn duplicate_face_names_are_flagged() {
        let mut scene = SceneDescription::default();
        scene.faces.push(FaceDesc::new("floor", square()));
        scene.faces.push(FaceDesc::new("floor", square()));
        let err = validate(&scene).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { .. }));
    }

    #[test]
    fn dangling_material_reference_is_flagged() {
        let mut face = FaceDesc::new("floor", square());
        face.material = Some("concrete".to_string());
        let mut scene = SceneDescription::default();
        scene.faces.push(face);
        let err = validate(&scene).unwrap_err();
        assert!(matches!(err, ConfigError::DanglingMaterialReference { .. }));
    }

    #[test]
    fn material_reference_resolves_when_present() {
        let mut face = FaceDesc::new("floor", square());
        face.material = Some("concrete".to_string());
        let mut scene = SceneDescription::default();
        scene.materials.push(MaterialDesc::new("concrete"));
        scene.faces.push(face);
        assert!(validate(&scene).is_ok());
    }

    #[test]
    fn dangling_mask_reference_is_flagged() {
        let mut receiver = ReceiverDesc::new("ears", "omni");
        receiver.mask_plugin = Some("zone".to_string());
        let mut scene = SceneDescription::default();
        scene.receivers.push(receiver);
        let err = validate(&scene).unwrap_err();
        assert!(matches!(err, ConfigError::DanglingMaskReference { .. }));
    }

    #[test]
    fn mask_reference_resolves_when_present() {
        let mut receiver = ReceiverDesc::new("ears", "omni");
        receiver.mask_plugin = Some("zone".to_string());
        let mut scene = SceneDescription::default();
        scene.masks.push(MaskDesc::new("zone", Vec3::new(1.0, 1.0, 1.0), 0.1, true));
        scene.receivers.push(receiver);
        assert!(validate(&scene).is_ok());
    }

    #[test]
    fn too_few_vertices_is_flagged() {
        let mut scene = SceneDescription::default();
        scene.faces.push(FaceDesc::new("sliver", vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]));
        let err = validate(&scene).unwrap_err();
        assert!(matches!(err, ConfigError::TooFewVertices { .. }));
    }
}
