//! Converts a validated [`SceneDescription`] into the `aural-scene` types
//! the scheduler consumes (spec §6: this crate hands over the typed
//! target structure a session-file reader would have populated).

use aural_core::{db_to_linear, Polygon};
use aural_scene::diffuse::DiffuseField;
use aural_scene::mask::{Mask, MaskMode};
use aural_scene::material::Material;
use aural_scene::obstacle::{Obstacle, ObstacleKind};
use aural_scene::receiver::{Receiver, ReceiverKind};
use aural_scene::reflector::Reflector;
use aural_scene::source::{GainModel, SoundVertex, Source};

use crate::attributes::{GainModelAttr, SceneDescription};
use crate::error::ConfigError;

/// Resolves a receiver-type identifier string (spec §6 `type`) against the
/// same names `aural-registry` registers its built-in models under.
fn parse_receiver_kind(kind: &str) -> Option<ReceiverKind> {
    match kind {
        "omni" => Some(ReceiverKind::Omni),
        "cardioid" => Some(ReceiverKind::Cardioid),
        "ortf" => Some(ReceiverKind::Ortf),
        "vbap2d" => Some(ReceiverKind::Vbap2d),
        "vbap3d" => Some(ReceiverKind::Vbap3d),
        "amb1h0v" => Some(ReceiverKind::Amb1h0v),
        "amb1h1v" => Some(ReceiverKind::Amb1h1v),
        "amb3h3v" => Some(ReceiverKind::Amb3h3v),
        "hrtf" => Some(ReceiverKind::Hrtf),
        "itu50" => Some(ReceiverKind::Itu50),
        "itu71+4" => Some(ReceiverKind::Itu71Plus4),
        "debugpos" => Some(ReceiverKind::DebugPos),
        "fakebf" => Some(ReceiverKind::FakeBf),
        "hoa2d" => Some(ReceiverKind::Hoa2d),
        "hoa3d" => Some(ReceiverKind::Hoa3d),
        "nsp" => Some(ReceiverKind::Nsp),
        "intensityvector" => Some(ReceiverKind::IntensityVector),
        "simplefdnreverb" => Some(ReceiverKind::SimpleFdnReverb),
        "foareverb" => Some(ReceiverKind::FoaReverb),
        _ => None,
    }
}

/// Everything `aural-scheduler` needs to assemble a [`aural_scheduler::Scene`]
/// (this crate doesn't depend on `aural-scheduler` itself, to keep the
/// dependency graph acyclic — the caller passes these straight through to
/// `Scene::build`).
pub struct BuiltScene {
    pub sources: Vec<Source>,
    pub reflectors: Vec<Reflector>,
    pub obstacles: Vec<Obstacle>,
    pub diffuse_fields: Vec<DiffuseField>,
    pub masks: Vec<Mask>,
    pub receivers: Vec<Receiver>,
    pub materials: Vec<Material>,
}

/// Converts `scene` into scene-model types, ready for
/// `aural_scheduler::Scene::build`. Assumes `scene` already passed
/// [`crate::validate::validate`].
pub fn build(scene: &SceneDescription, block_len: usize) -> Result<BuiltScene, ConfigError> {
    let mut sources = Vec::with_capacity(scene.sources.len());
    for source_desc in &scene.sources {
        let mut source = Source::new(&source_desc.name);
        for sound_desc in &source_desc.sounds {
            let mut vertex = SoundVertex::new(&sound_desc.name);
            vertex.local_offset = sound_desc.local_offset;
            vertex.input_gain = db_to_linear(sound_desc.gain_db);
            vertex.layers = sound_desc.layers.unwrap_or(source_desc.layers);
            vertex.ism_min_order = sound_desc.ism_min_order.unwrap_or(source_desc.ism_min_order);
            vertex.ism_max_order = sound_desc.ism_max_order.unwrap_or(source_desc.ism_max_order);
            vertex.air_absorption = source_desc.air_absorption;
            vertex.delayline = source_desc.delayline;
            vertex.gain_model = match source_desc.gain_model {
                GainModelAttr::InverseDistance => GainModel::InverseDistance,
                GainModelAttr::Unity => GainModel::Unity,
            };
            vertex.max_distance = source_desc.max_distance;
            vertex.min_gain = db_to_linear(source_desc.min_level);
            vertex.active = !sound_desc.mute;
            source.push_vertex(vertex);
        }
        sources.push(source);
    }

    let mut reflectors = Vec::with_capacity(scene.faces.len());
    for face in &scene.faces {
        let polygon = Polygon::new(face.vertices.clone())
            .map_err(|_| ConfigError::TooFewVertices { face: face.name.clone(), count: face.vertices.len() })?;
        let mut reflector = Reflector::new(&face.name, polygon);
        reflector.reflectivity = face.reflectivity;
        reflector.damping = face.damping;
        reflector.scattering = face.scattering;
        reflector.edge_reflection = face.edge_reflection;
        reflector.material.clone_from(&face.material);
        reflectors.push(reflector);
    }

    let mut obstacles = Vec::with_capacity(scene.obstacles.len());
    for obstacle_desc in &scene.obstacles {
        let polygon = Polygon::new(obstacle_desc.vertices.clone()).map_err(|_| ConfigError::TooFewVertices {
            face: obstacle_desc.name.clone(),
            count: obstacle_desc.vertices.len(),
        })?;
        let kind = if obstacle_desc.inside { ObstacleKind::Inside } else { ObstacleKind::Hole };
        let mut obstacle = Obstacle::new(&obstacle_desc.name, polygon, kind);
        obstacle.transmission = obstacle_desc.transmission;
        obstacle.aperture_override = obstacle_desc.aperture;
        obstacles.push(obstacle);
    }

    let diffuse_fields = scene
        .diffuse_fields
        .iter()
        .map(|desc| {
            let mut field = DiffuseField::new(&desc.name, block_len);
            field.size = desc.size;
            field.falloff = desc.falloff;
            field.layers = desc.layers;
            field.gain = db_to_linear(desc.gain_db);
            field.calib_level_db = desc.caliblevel_db;
            field
        })
        .collect();

    let masks = scene
        .masks
        .iter()
        .map(|desc| {
            let mode = if desc.inside { MaskMode::Inside } else { MaskMode::Outside };
            Mask::new(&desc.name, desc.size, desc.falloff, mode)
        })
        .collect();

    let mut receivers = Vec::with_capacity(scene.receivers.len());
    for desc in &scene.receivers {
        let kind = parse_receiver_kind(&desc.kind)
            .ok_or_else(|| ConfigError::UnknownReceiverKind { receiver: desc.name.clone(), kind: desc.kind.clone() })?;
        let mut receiver = Receiver::new(&desc.name, kind);
        receiver.ism_min_order = desc.ism_min_order;
        receiver.ism_max_order = desc.ism_max_order;
        receiver.layers = desc.layers;
        receiver.render_diffuse = desc.render_diffuse;
        receiver.render_point_source = desc.render_point_source;
        receiver.render_image_source = desc.render_image_source;
        receiver.bounding_box.size = desc.volumetric_size;
        receiver.bounding_box.falloff = desc.volumetric_falloff;
        receiver.external_gain = db_to_linear(desc.gain_db);
        receiver.diffuse_gain = db_to_linear(desc.diffuse_gain_db);
        receiver.global_mask_opt_in = desc.global_mask;
        receiver.mask_plugin.clone_from(&desc.mask_plugin);
        receiver.mute_on_stop = desc.mute_on_stop;
        receiver.delay_compensation = desc.delay_compensation;
        receiver.calib_level_db = desc.caliblevel_db;
        receivers.push(receiver);
    }

    let materials = scene
        .materials
        .iter()
        .map(|desc| {
            let mut material = Material::new(&desc.name);
            for &(frequency_hz, alpha) in &desc.samples {
                material.push(frequency_hz, alpha);
            }
            material
        })
        .collect();

    Ok(BuiltScene { sources, reflectors, obstacles, diffuse_fields, masks, receivers, materials })
}

/// Applies each reflector's referenced material's absorption fit,
/// overriding its `reflectivity`/`damping` (spec §3 `Material` "applies at
/// configure time"). Reflectors with no `material` reference, or whose
/// reference didn't resolve, are left as authored.
pub fn apply_material_fits(reflectors: &mut [Reflector], materials: &[Material], sample_rate: f32) {
    for reflector in reflectors.iter_mut() {
        let Some(name) = &reflector.material else { continue };
        let Some(material) = materials.iter().find(|m| &m.name == name) else { continue };
        let fit = material.fit(sample_rate);
        reflector.reflectivity = fit.reflectivity;
        reflector.damping = fit.damping;
    }
}
