//! Sound sources: a moving [`DynObject`] plus one or more [`SoundVertex`]
//! emission points (spec §3 `Source`/`SoundVertex`).

use crate::dynobject::DynObject;
use aural_core::Vec3;

/// How a vertex's per-sample gain falls off with source-to-receiver
/// distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainModel {
    /// `1 / max(r, r_min)` inverse-distance law (the default).
    InverseDistance,
    /// Constant unity gain regardless of distance.
    Unity,
}

/// A single mono-input emission point attached to a [`Source`], carrying
/// its own local offset and per-path enable flags (spec §3).
#[derive(Debug, Clone)]
pub struct SoundVertex {
    pub name: String,
    /// Offset from the parent source's pose, in the source's local frame.
    pub local_offset: Vec3,
    pub input_gain: f32,
    /// Inclusive image-source order range this vertex participates in;
    /// `(0, 0)` means direct path only.
    pub ism_min_order: u32,
    pub ism_max_order: u32,
    /// Receivers are matched against this bitmask (spec §3 "layer bitmask").
    pub layers: u32,
    pub air_absorption: bool,
    pub delayline: bool,
    pub gain_model: GainModel,
    /// Paths beyond this distance are culled outright; `None` disables the gate.
    pub max_distance: Option<f32>,
    /// Paths whose computed gain falls below this linear level are culled.
    pub min_gain: f32,
    /// Names of `AudioPlugin`s applied to this vertex's input, in order.
    pub plugins: Vec<String>,
    pub active: bool,
}

impl SoundVertex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_offset: Vec3::ZERO,
            input_gain: 1.0,
            ism_min_order: 0,
            ism_max_order: 0,
            layers: 1,
            air_absorption: true,
            delayline: true,
            gain_model: GainModel::InverseDistance,
            max_distance: None,
            min_gain: 0.0,
            plugins: Vec::new(),
            active: true,
        }
    }

    /// `true` if `receiver_layers` shares at least one bit with this
    /// vertex's layer mask.
    pub fn on_layer(&self, receiver_layers: u32) -> bool {
        self.layers & receiver_layers != 0
    }

    /// The distance-dependent gain factor for propagation distance `r`,
    /// per [`GainModel`]. `r_min` bounds the inverse-distance law so
    /// coincident source/receiver positions don't diverge.
    pub fn distance_gain(&self, r: f32, r_min: f32) -> f32 {
        match self.gain_model {
            GainModel::InverseDistance => 1.0 / r.max(r_min),
            GainModel::Unity => 1.0,
        }
    }

    /// `true` if propagation distance `r` passes this vertex's max-distance
    /// gate (always passes when the gate is disabled).
    pub fn within_range(&self, r: f32) -> bool {
        self.max_distance.map_or(true, |max| r <= max)
    }
}

/// A moving sound emitter: one [`DynObject`] pose plus an ordered list of
/// [`SoundVertex`] children, each with its own mono input channel.
#[derive(Debug, Clone)]
pub struct Source {
    pub object: DynObject,
    pub vertices: Vec<SoundVertex>,
}

impl Source {
    pub fn new(name: impl Into<String>) -> Self {
        Self { object: DynObject::new(name), vertices: Vec::new() }
    }

    pub fn push_vertex(&mut self, vertex: SoundVertex) {
        self.vertices.push(vertex);
    }

    /// Recomputes the source pose and every vertex's world position at
    /// transport time `t`, returning `(vertex_index, world_position)` pairs.
    pub fn update(&mut self, t: f32) -> Vec<(usize, Vec3)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, vertex)| (i, self.object.update(t, vertex.local_offset).position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_on_layer_matches_shared_bit() {
        let mut v = SoundVertex::new("v");
        v.layers = 0b0010;
        assert!(v.on_layer(0b0011));
        assert!(!v.on_layer(0b0101));
    }

    #[test]
    fn inverse_distance_gain_decreases_with_range() {
        let v = SoundVertex::new("v");
        assert!(v.distance_gain(10.0, 0.1) < v.distance_gain(2.0, 0.1));
    }

    #[test]
    fn inverse_distance_gain_is_bounded_near_zero_range() {
        let v = SoundVertex::new("v");
        let g = v.distance_gain(0.0, 0.5);
        assert!((g - 2.0).abs() < 1e-5);
    }

    #[test]
    fn unity_gain_model_ignores_distance() {
        let mut v = SoundVertex::new("v");
        v.gain_model = GainModel::Unity;
        assert_eq!(v.distance_gain(1.0, 0.1), v.distance_gain(100.0, 0.1));
    }

    #[test]
    fn max_distance_gate_culls_beyond_range() {
        let mut v = SoundVertex::new("v");
        v.max_distance = Some(5.0);
        assert!(v.within_range(4.0));
        assert!(!v.within_range(6.0));
    }

    #[test]
    fn source_update_returns_one_entry_per_vertex() {
        let mut src = Source::new("s");
        src.push_vertex(SoundVertex::new("a"));
        src.push_vertex(SoundVertex::new("b"));
        let positions = src.update(0.0);
        assert_eq!(positions.len(), 2);
    }
}
