//! Diffracting obstacles (spec §3 `Obstacle`, §4.3 diffraction filter).

use aural_core::Polygon;

/// A diffracting face: either a solid body ("inside" test blocks) or a
/// hole in an otherwise solid boundary ("hole" test blocks the
/// complement).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Inside,
    Hole,
}

/// A single obstacle's shared geometry and transmission properties.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub name: String,
    pub polygon: Polygon,
    /// Dry/wet mix the diffraction filter blends towards when blocked, `[0, 1]`.
    pub transmission: f32,
    pub kind: ObstacleKind,
    /// Overrides the polygon's computed aperture when set.
    pub aperture_override: Option<f32>,
    pub active: bool,
}

impl Obstacle {
    pub fn new(name: impl Into<String>, polygon: Polygon, kind: ObstacleKind) -> Self {
        Self { name: name.into(), polygon, transmission: 0.0, kind, aperture_override: None, active: true }
    }

    pub fn aperture(&self) -> f32 {
        self.aperture_override.unwrap_or(self.polygon.aperture)
    }
}

/// Per-(path, obstacle) diffraction filter state: the Airy-disk first-order
/// lowpass coefficient (current and previous-block values, for per-block
/// linear ramping) and its one sample of recursive state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffractionState {
    pub a1_prev: f32,
    pub a1_current: f32,
    pub y1: f32,
}

impl DiffractionState {
    pub fn new() -> Self {
        Self { a1_prev: 0.0, a1_current: 0.0, y1: 0.0 }
    }

    /// Call once per block after the new coefficient has been computed:
    /// the current value becomes next block's starting point.
    pub fn advance_block(&mut self, new_a1: f32) {
        self.a1_prev = self.a1_current;
        self.a1_current = new_a1;
    }
}
