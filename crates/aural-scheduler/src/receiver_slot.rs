//! Per-receiver render state: the image-source arena, its audio-rate DSP
//! companions, the diffuse-path and scatter accumulators, and the
//! instantiated `ReceiverModel` itself.

use aural_core::FoaBuffer;
use aural_dsp::PathDspState;
use aural_registry::ReceiverRegistry;
use aural_receivers::ReceiverModel;
use aural_scene::acoustic_path::AcousticPathArena;
use aural_scene::receiver::{Receiver, ReceiverKind};
use aural_scene::scatter::ScatterAccumulator;

/// Maps a scene-level receiver kind onto the registry id of the concrete
/// model that renders it, when one exists (spec §4.8; see `DESIGN.md` for
/// the kinds left unmapped).
fn registry_id_for(kind: ReceiverKind) -> Option<&'static str> {
    match kind {
        ReceiverKind::Omni | ReceiverKind::DebugPos => Some("omni"),
        ReceiverKind::Cardioid | ReceiverKind::FakeBf => Some("cardioid"),
        ReceiverKind::Ortf => Some("ortf"),
        ReceiverKind::Vbap2d => Some("vbap2d_quad"),
        ReceiverKind::Amb1h0v | ReceiverKind::Amb1h1v => Some("amb1"),
        ReceiverKind::Hrtf => Some("hrtf"),
        _ => None,
    }
}

/// Everything needed to render one receiver for one block.
pub struct ReceiverSlot {
    pub receiver: Receiver,
    pub model: Box<dyn ReceiverModel + Send>,
    pub arena: AcousticPathArena,
    pub dsp_states: Vec<PathDspState>,
    pub scatter: ScatterAccumulator,
    pub diffuse_input: FoaBuffer,
    pub diffuse_scratch: FoaBuffer,
    pub diffuse_states: Vec<aural_dsp::DiffusePathState>,
    pub out_channels: Vec<Vec<f32>>,
}

impl ReceiverSlot {
    /// Builds a slot for `receiver`, or `None` if its `kind` has no
    /// registered model (the caller should surface this as a warning and
    /// drop the receiver rather than fail the whole scene).
    pub fn new(
        receiver: Receiver,
        registry: &ReceiverRegistry,
        sample_rate: f32,
        block_len: usize,
        num_vertices: usize,
        reflector_indices: &[usize],
        diffuse_field_count: usize,
        max_delay_seconds: f32,
    ) -> Option<Self> {
        let id = registry_id_for(receiver.kind)?;
        let model = registry.create(id, sample_rate)?;
        let arena = AcousticPathArena::build(num_vertices, reflector_indices, receiver.ism_max_order);
        let dsp_states = (0..arena.len()).map(|_| PathDspState::new(sample_rate, max_delay_seconds)).collect();
        let channel_count = model.channels().len();
        Some(Self {
            receiver,
            model,
            arena,
            dsp_states,
            scatter: ScatterAccumulator::new(block_len),
            diffuse_input: FoaBuffer::new(block_len),
            diffuse_scratch: FoaBuffer::new(block_len),
            diffuse_states: (0..diffuse_field_count).map(|_| aural_dsp::DiffusePathState::new()).collect(),
            out_channels: (0..channel_count).map(|_| vec![0.0; block_len]).collect(),
        })
    }

    pub fn clear_block(&mut self) {
        for ch in &mut self.out_channels {
            ch.fill(0.0);
        }
        self.scatter.reset();
        self.diffuse_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_kind_returns_none() {
        let registry = ReceiverRegistry::new();
        let receiver = Receiver::new("r", ReceiverKind::Hoa3d);
        let slot = ReceiverSlot::new(receiver, &registry, 48_000.0, 128, 1, &[], 0, 1.0);
        assert!(slot.is_none());
    }

    #[test]
    fn supported_kind_builds_matching_channel_count() {
        let registry = ReceiverRegistry::new();
        let receiver = Receiver::new("r", ReceiverKind::Vbap2d);
        let slot = ReceiverSlot::new(receiver, &registry, 48_000.0, 128, 2, &[], 0, 1.0).unwrap();
        assert_eq!(slot.out_channels.len(), 4);
    }
}
