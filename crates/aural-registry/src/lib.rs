//! Receiver-model registry: discover and instantiate `ReceiverModel`
//! variants by name, the way a scene description's `receiver type="..."`
//! attribute is resolved at load time (spec §4.8, §6).

use aural_core::Vec3;
use aural_receivers::{Amb1, Cardioid, Omni, Ortf, ParametricHrtf, ReceiverModel, Vbap2d};

/// Broad grouping of receiver variants, mirroring how a scene editor would
/// bucket them in a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverCategory {
    /// A single directional capsule (omni, cardioid).
    Microphone,
    /// A ring or array of discrete speaker feeds, amplitude-panned.
    SpeakerArray,
    /// First-order ambisonic B-format passthrough.
    Ambisonic,
    /// Binaural (two-ear) synthesis.
    Binaural,
}

impl ReceiverCategory {
    /// Human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            ReceiverCategory::Microphone => "Microphone",
            ReceiverCategory::SpeakerArray => "Speaker Array",
            ReceiverCategory::Ambisonic => "Ambisonic",
            ReceiverCategory::Binaural => "Binaural",
        }
    }
}

/// Describes one registered receiver variant.
#[derive(Debug, Clone)]
pub struct ReceiverDescriptor {
    /// Matches the `receiver type="..."` scene attribute (spec §6).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description of the panning/decoding law.
    pub description: &'static str,
    pub category: ReceiverCategory,
    /// Number of output channels this variant declares.
    pub channel_count: usize,
}

/// Factory function type: builds a default-configured instance of a variant
/// at the given sample rate.
type ReceiverFactory = fn(f32) -> Box<dyn ReceiverModel + Send>;

struct RegistryEntry {
    descriptor: ReceiverDescriptor,
    factory: ReceiverFactory,
}

/// Registry of all built-in receiver variants.
///
/// Only the subset of `ReceiverKind` values with a concrete `ReceiverModel`
/// implementation are registered here; see `DESIGN.md` for the rest of the
/// catalogue (ALLRAD/VBAP3D/ITU arrays/HOA/NSP/reverb), which remain
/// structurally representable by `aural_scene::ReceiverKind` but have no
/// factory entry.
pub struct ReceiverRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for ReceiverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiverRegistry {
    /// Creates a registry with all built-in variants registered.
    pub fn new() -> Self {
        let mut registry = Self { entries: Vec::with_capacity(6) };
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        self.register(
            ReceiverDescriptor {
                id: "omni",
                name: "Omnidirectional",
                description: "Single capsule, equal gain in every direction",
                category: ReceiverCategory::Microphone,
                channel_count: 1,
            },
            |_sr| Box::new(Omni::new()),
        );

        self.register(
            ReceiverDescriptor {
                id: "cardioid",
                name: "Cardioid",
                description: "First-order cardioid capsule facing forward",
                category: ReceiverCategory::Microphone,
                channel_count: 1,
            },
            |_sr| Box::new(Cardioid::new(Vec3::new(1.0, 0.0, 0.0))),
        );

        self.register(
            ReceiverDescriptor {
                id: "ortf",
                name: "ORTF Stereo",
                description: "Two cardioid capsules splayed +/-55 degrees",
                category: ReceiverCategory::Microphone,
                channel_count: 2,
            },
            |_sr| Box::new(Ortf::new()),
        );

        self.register(
            ReceiverDescriptor {
                id: "vbap2d_quad",
                name: "2D VBAP (Quad)",
                description: "Four-speaker horizontal ring, pairwise amplitude panned",
                category: ReceiverCategory::SpeakerArray,
                channel_count: 4,
            },
            |_sr| {
                Box::new(Vbap2d::new(vec![
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec3::new(-1.0, 0.0, 0.0),
                    Vec3::new(0.0, -1.0, 0.0),
                ]))
            },
        );

        self.register(
            ReceiverDescriptor {
                id: "amb1",
                name: "First-Order Ambisonic",
                description: "Raw B-format channels (W, Y, Z, X)",
                category: ReceiverCategory::Ambisonic,
                channel_count: 4,
            },
            |_sr| Box::new(Amb1::new()),
        );

        self.register(
            ReceiverDescriptor {
                id: "hrtf",
                name: "Parametric HRTF",
                description: "Binaural synthesis via ITD delay and shadow/resonance filters",
                category: ReceiverCategory::Binaural,
                channel_count: 2,
            },
            |sr| Box::new(ParametricHrtf::new(sr, aural_dsp_speed_of_sound())),
        );
    }

    fn register(&mut self, descriptor: ReceiverDescriptor, factory: ReceiverFactory) {
        self.entries.push(RegistryEntry { descriptor, factory });
    }

    /// Descriptors for every registered variant.
    pub fn all(&self) -> Vec<&ReceiverDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Descriptors for variants in a given category.
    pub fn in_category(&self, category: ReceiverCategory) -> Vec<&ReceiverDescriptor> {
        self.entries.iter().filter(|e| e.descriptor.category == category).map(|e| &e.descriptor).collect()
    }

    /// Looks up a descriptor by id.
    pub fn descriptor(&self, id: &str) -> Option<&ReceiverDescriptor> {
        self.entries.iter().find(|e| e.descriptor.id == id).map(|e| &e.descriptor)
    }

    /// Instantiates a variant by id at the given sample rate.
    pub fn create(&self, id: &str, sample_rate: f32) -> Option<Box<dyn ReceiverModel + Send>> {
        self.entries.iter().find(|e| e.descriptor.id == id).map(|e| (e.factory)(sample_rate))
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no variants are registered (never the case for `new()`).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// `aural-dsp` owns the canonical speed-of-sound constant; duplicated here as
// a literal to avoid a dependency cycle (aural-dsp depends on aural-scene,
// not the other way around, but the registry sits above both).
fn aural_dsp_speed_of_sound() -> f32 {
    343.0
}
