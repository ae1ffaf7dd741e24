//! Reflecting faces (spec §3 `Reflector`).

use aural_core::Polygon;

/// A reflecting face: a [`Polygon`] plus the acoustic reflection
/// parameters used by the image-source tree and acoustic-path DSP.
#[derive(Debug, Clone)]
pub struct Reflector {
    pub name: String,
    pub polygon: Polygon,
    /// Broadband reflectivity, `[0, 1]`.
    pub reflectivity: f32,
    /// Reflection-filter damping, `[0, 1)`.
    pub damping: f32,
    /// When set, image sources clipped to an edge are reflected around
    /// that edge point instead of being culled (spec §4.4 step 3).
    pub edge_reflection: bool,
    /// Fraction of incident energy scattered diffusely, `[0, 1]`.
    pub scattering: f32,
    /// Optional reference to a named `Material`; when present, its fit
    /// overrides `reflectivity`/`damping` at configure time.
    pub material: Option<String>,
    pub active: bool,
}

impl Reflector {
    pub fn new(name: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            name: name.into(),
            polygon,
            reflectivity: 1.0,
            damping: 0.0,
            edge_reflection: false,
            scattering: 0.0,
            material: None,
            active: true,
        }
    }

    /// The one-pole reflection-filter coefficient: `reflectivity * (1 - damping)`.
    pub fn filter_coefficient(&self) -> f32 {
        self.reflectivity * (1.0 - self.damping)
    }
}
