//! The typed scene-description tree (spec §6 "Scene description"): one
//! struct per element in the attribute table, populated by whatever
//! external collaborator reads the on-disk session file. This crate never
//! reads that file itself — it only validates and converts the tree a
//! reader would have already built.

use aural_core::Vec3;

/// How a source vertex's gain falls off with distance (spec §6 `gainmodel`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainModelAttr {
    #[default]
    InverseDistance,
    Unity,
}

/// A `source` element: a moving emitter plus its nested `sound` vertices.
#[derive(Debug, Clone)]
pub struct SourceDesc {
    pub name: String,
    pub layers: u32,
    pub ism_min_order: u32,
    pub ism_max_order: u32,
    pub max_distance: Option<f32>,
    pub min_level: f32,
    pub gain_model: GainModelAttr,
    pub air_absorption: bool,
    pub delayline: bool,
    pub sounds: Vec<SoundDesc>,
}

impl SourceDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: 1,
            ism_min_order: 0,
            ism_max_order: 0,
            max_distance: None,
            min_level: 0.0,
            gain_model: GainModelAttr::default(),
            air_absorption: true,
            delayline: true,
            sounds: Vec::new(),
        }
    }
}

/// A `sound` element: one emission vertex nested under a `source`.
#[derive(Debug, Clone)]
pub struct SoundDesc {
    pub name: String,
    /// Local offset from the parent source's pose.
    pub local_offset: Vec3,
    pub gain_db: f32,
    pub caliblevel_db: f32,
    pub layers: Option<u32>,
    pub ism_min_order: Option<u32>,
    pub ism_max_order: Option<u32>,
    pub mute: bool,
}

impl SoundDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_offset: Vec3::ZERO,
            gain_db: 0.0,
            caliblevel_db: 0.0,
            layers: None,
            ism_min_order: None,
            ism_max_order: None,
            mute: false,
        }
    }
}

/// A `diffuse` element: a moving box-shaped ambisonic field.
#[derive(Debug, Clone)]
pub struct DiffuseDesc {
    pub name: String,
    pub size: Vec3,
    pub falloff: f32,
    pub layers: u32,
    pub gain_db: f32,
    pub caliblevel_db: f32,
}

impl DiffuseDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), size: Vec3::ZERO, falloff: 0.0, layers: 1, gain_db: 0.0, caliblevel_db: 0.0 }
    }
}

/// A `receiver` element.
#[derive(Debug, Clone)]
pub struct ReceiverDesc {
    pub name: String,
    /// Verbatim receiver-type identifier (spec §6 `type`), resolved against
    /// the registry at build time.
    pub kind: String,
    pub volumetric_size: Vec3,
    pub volumetric_falloff: f32,
    pub avg_distance: f32,
    pub layers: u32,
    pub ism_min_order: u32,
    pub ism_max_order: u32,
    pub render_diffuse: bool,
    pub render_point_source: bool,
    pub render_image_source: bool,
    pub global_mask: bool,
    pub mask_plugin: Option<String>,
    pub diffuse_gain_db: f32,
    pub delay_compensation: f32,
    pub layer_fade_len: f32,
    pub mute_on_stop: bool,
    pub gain_db: f32,
    pub caliblevel_db: f32,
}

impl ReceiverDesc {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            volumetric_size: Vec3::ZERO,
            volumetric_falloff: 0.0,
            avg_distance: 1.0,
            layers: 1,
            ism_min_order: 0,
            ism_max_order: 0,
            render_diffuse: true,
            render_point_source: true,
            render_image_source: true,
            global_mask: false,
            mask_plugin: None,
            diffuse_gain_db: 0.0,
            delay_compensation: 0.0,
            layer_fade_len: 0.0,
            mute_on_stop: false,
            gain_db: 0.0,
            caliblevel_db: 0.0,
        }
    }
}

/// A `face` (or `facegroup`) element: a reflecting polygon.
#[derive(Debug, Clone)]
pub struct FaceDesc {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub reflectivity: f32,
    pub damping: f32,
    pub scattering: f32,
    pub material: Option<String>,
    pub edge_reflection: bool,
}

impl FaceDesc {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            vertices,
            reflectivity: 1.0,
            damping: 0.0,
            scattering: 0.0,
            material: None,
            edge_reflection: false,
        }
    }
}

/// An `obstacle` element.
#[derive(Debug, Clone)]
pub struct ObstacleDesc {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub transmission: f32,
    pub inside: bool,
    pub aperture: Option<f32>,
}

impl ObstacleDesc {
    pub fn new(name: impl Into<String>, vertices: Vec<Vec3>) -> Self {
        Self { name: name.into(), vertices, transmission: 0.0, inside: true, aperture: None }
    }
}

/// A `mask` element.
#[derive(Debug, Clone)]
pub struct MaskDesc {
    pub name: String,
    pub size: Vec3,
    pub falloff: f32,
    pub inside: bool,
}

impl MaskDesc {
    pub fn new(name: impl Into<String>, size: Vec3, falloff: f32, inside: bool) -> Self {
        Self { name: name.into(), size, falloff, inside }
    }
}

/// A `material` element: an ordered `(frequency, alpha)` absorption table.
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub samples: Vec<(f32, f32)>,
}

impl MaterialDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), samples: Vec::new() }
    }
}

/// The full typed scene tree (spec §6): everything a session-file reader
/// would populate, grouped by element type.
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    pub sources: Vec<SourceDesc>,
    pub diffuse_fields: Vec<DiffuseDesc>,
    pub receivers: Vec<ReceiverDesc>,
    pub faces: Vec<FaceDesc>,
    pub obstacles: Vec<ObstacleDesc>,
    pub masks: Vec<MaskDesc>,
    pub materials: Vec<MaterialDesc>,
}
