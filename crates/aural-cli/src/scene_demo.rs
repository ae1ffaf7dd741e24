//! Assembles a small in-code scene for the `demo` command: one source
//! emitting an impulse train, a floor reflector, and an omni receiver
//! (spec §9 "drive the engine with synthetic transport").

use aural_core::{Polygon, Vec3};
use aural_scene::mask::Mask;
use aural_scene::obstacle::Obstacle;
use aural_scene::receiver::{Receiver, ReceiverKind};
use aural_scene::reflector::Reflector;
use aural_scene::source::{SoundVertex, Source};

/// The demo scene's static parts, ready to hand to
/// `aural_scheduler::Scene::build` alongside a registry and render context.
pub struct DemoScene {
    pub sources: Vec<Source>,
    pub reflectors: Vec<Reflector>,
    pub obstacles: Vec<Obstacle>,
    pub diffuse_fields: Vec<aural_scene::diffuse::DiffuseField>,
    pub masks: Vec<Mask>,
    pub receivers: Vec<Receiver>,
}

pub fn build() -> DemoScene {
    let mut source = Source::new("clicker");
    source.object.delta_location = Vec3::new(2.0, 0.0, 1.5);
    let mut vertex = SoundVertex::new("click");
    vertex.ism_max_order = 1;
    source.push_vertex(vertex);

    let floor = Polygon::new(vec![
        Vec3::new(-5.0, -5.0, 0.0),
        Vec3::new(5.0, -5.0, 0.0),
        Vec3::new(5.0, 5.0, 0.0),
        Vec3::new(-5.0, 5.0, 0.0),
    ])
    .expect("floor quad has four vertices");
    let mut reflector = Reflector::new("floor", floor);
    reflector.reflectivity = 0.8;
    reflector.damping = 0.1;

    let mut receiver = Receiver::new("listener", ReceiverKind::Omni);
    receiver.object.delta_location = Vec3::new(0.0, 0.0, 1.7);
    receiver.ism_max_order = 1;

    DemoScene {
        sources: vec![source],
        reflectors: vec![reflector],
        obstacles: Vec::new(),
        diffuse_fields: Vec::new(),
        masks: Vec::new(),
        receivers: vec![receiver],
    }
}

/// Produces one block's worth of input for the single flattened vertex:
/// an impulse at the very first block, silence afterwards.
pub fn synthetic_input(block_len: usize, block_index: u64) -> Vec<Vec<f32>> {
    let mut block = vec![0.0_f32; block_len];
    if block_index == 0 {
        block[0] = 1.0;
    }
    vec![block]
}
