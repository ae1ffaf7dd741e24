//! Scene assembly and the per-block two-pass render pipeline (spec §4.5
//! "Ordering guarantees", §4.2-4.8).

use aural_core::Vec3;
use aural_dsp::{process_path_block, render_diffuse_path};
use aural_registry::ReceiverRegistry;
use aural_scene::mask::Mask;
use aural_scene::obstacle::Obstacle;
use aural_scene::receiver::Receiver;
use aural_scene::reflector::Reflector;
use aural_scene::source::Source;

use crate::context::RenderContext;
use crate::geometry::update_path_geometry;
use crate::receiver_slot::ReceiverSlot;
use crate::warning::SchedulerWarning;

/// Floor on the inverse-distance law's range, shared by every vertex in
/// the scene (spec §4.4 "`r_min`").
const DEFAULT_R_MIN: f32 = 0.1;

/// An assembled, render-ready scene: the data model plus one
/// [`ReceiverSlot`] per receiver that resolved to a concrete model.
pub struct Scene {
    pub sources: Vec<Source>,
    pub reflectors: Vec<Reflector>,
    pub obstacles: Vec<Obstacle>,
    pub diffuse_fields: Vec<aural_scene::diffuse::DiffuseField>,
    pub masks: Vec<Mask>,
    pub receivers: Vec<ReceiverSlot>,
    /// Start index, in the flattened vertex index space, of each source's
    /// vertices.
    vertex_offsets: Vec<usize>,
    vertex_world_pos: Vec<Vec3>,
}

impl Scene {
    /// Builds a scene from its data-model parts, resolving each receiver
    /// against `registry`. Receivers with no matching model are dropped;
    /// their absence is reported via the returned warnings rather than
    /// failing the whole build.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        sources: Vec<Source>,
        reflectors: Vec<Reflector>,
        obstacles: Vec<Obstacle>,
        diffuse_fields: Vec<aural_scene::diffuse::DiffuseField>,
        masks: Vec<Mask>,
        receivers: Vec<Receiver>,
        registry: &ReceiverRegistry,
        ctx: &RenderContext,
        max_delay_seconds: f32,
    ) -> (Self, Vec<SchedulerWarning>) {
        let mut warnings = Vec::new();

        let mut vertex_offsets = Vec::with_capacity(sources.len());
        let mut total_vertices = 0usize;
        for source in &sources {
            vertex_offsets.push(total_vertices);
            total_vertices += source.vertices.len();
        }
        let vertex_world_pos = vec![Vec3::ZERO; total_vertices];

        let reflector_indices: Vec<usize> = (0..reflectors.len()).collect();
        let mut slots = Vec::with_capacity(receivers.len());
        for receiver in receivers {
            let name = receiver.object.name.clone();
            let kind = receiver.kind;
            match ReceiverSlot::new(
                receiver,
                registry,
                ctx.sample_rate,
                ctx.block_len,
                total_vertices,
                &reflector_indices,
                diffuse_fields.len(),
                max_delay_seconds,
            ) {
                Some(slot) => slots.push(slot),
                None => {
                    log::warn!("no registered model for receiver kind; silenced: receiver={name} kind={kind:?}");
                    warnings.push(SchedulerWarning::UnsupportedReceiverKind { receiver: name, kind });
                }
            }
        }

        (
            Self {
                sources,
                reflectors,
                obstacles,
                diffuse_fields,
                masks,
                receivers: slots,
                vertex_offsets,
                vertex_world_pos,
            },
            warnings,
        )
    }

    fn global_vertex_index(&self, source_index: usize, vertex_index: usize) -> usize {
        self.vertex_offsets[source_index] + vertex_index
    }

    /// Renders one block. `vertex_inputs` supplies one mono input slice per
    /// flattened vertex (source-major, vertex-minor order matching
    /// [`Self::global_vertex_index`]); audio capture/file I/O feeding those
    /// buffers is the caller's responsibility. Returns any non-fatal
    /// warnings raised while scheduling this block; the transport is
    /// advanced by `ctx.block_len` samples before returning.
    pub fn process_block(&mut self, ctx: &mut RenderContext, vertex_inputs: &[Vec<f32>]) -> Vec<SchedulerWarning> {
        let mut warnings = Vec::new();
        let t = ctx.time_seconds();

        for (source_index, source) in self.sources.iter_mut().enumerate() {
            for (vertex_index, position) in source.update(t) {
                self.vertex_world_pos[self.vertex_offsets[source_index] + vertex_index] = position;
            }
        }
        for field in &mut self.diffuse_fields {
            field.object.update(t, Vec3::ZERO);
        }
        for mask in &mut self.masks {
            mask.object.update(t, Vec3::ZERO);
        }
        for slot in &mut self.receivers {
            slot.receiver.object.update(t, Vec3::ZERO);
        }

        for slot in &mut self.receivers {
            slot.clear_block();
            let receiver_pose = slot.receiver.object.last_pose();
            let receiver_pos = receiver_pose.position;

            let mask_gain = self.mask_gain_for(slot, receiver_pos, &mut warnings);

            for (source_index, source) in self.sources.iter().enumerate() {
                for (vertex_index, vertex) in source.vertices.iter().enumerate() {
                    if !vertex.active || !vertex.on_layer(slot.receiver.layers) {
                        continue;
                    }
                    let global = self.global_vertex_index(source_index, vertex_index);
                    let source_pos = self.vertex_world_pos[global];

                    let Some(input) = vertex_inputs.get(global) else {
                        warnings.push(SchedulerWarning::VertexIndexOutOfRange {
                            index: global,
                            vertex_count: vertex_inputs.len(),
                        });
                        continue;
                    };

                    for path_index in 0..slot.arena.paths.len() {
                        if slot.arena.paths[path_index].source_vertex != global {
                            continue;
                        }
                        let audible = update_path_geometry(
                            &mut slot.arena.paths[path_index],
                            vertex,
                            source_pos,
                            receiver_pos,
                            &self.reflectors,
                            DEFAULT_R_MIN,
                            mask_gain,
                        );
                        if !audible {
                            continue;
                        }

                        let len = input.len();
                        let mut scratch = vec![0.0_f32; len];
                        process_path_block(
                            &mut slot.arena.paths[path_index],
                            &mut slot.dsp_states[path_index],
                            &self.reflectors,
                            input,
                            &mut scratch,
                            ctx.sample_rate,
                            ctx.speed_of_sound,
                        );

                        let prel = (slot.arena.paths[path_index].mirrored_position - receiver_pos)
                            / receiver_pose.orientation;
                        slot.model.add_pointsource(prel, 0.0, &scratch, &mut slot.out_channels);
                    }
                }
            }

            for (field_index, field) in self.diffuse_fields.iter().enumerate() {
                if !field.on_layer(slot.receiver.layers) {
                    continue;
                }
                render_diffuse_path(
                    field,
                    &slot.receiver,
                    &mut slot.diffuse_states[field_index],
                    &mut slot.diffuse_scratch,
                    &mut slot.diffuse_input,
                );
            }
            slot.diffuse_input.add(&slot.scatter.buffer);
            slot.model.add_diffuse_sound_field(&slot.diffuse_input, &mut slot.out_channels);

            slot.model.postproc(&mut slot.out_channels);

            slot.receiver.fade.advance(ctx.block_len as u32, ctx.transport_sample);
            let gain = slot.receiver.effective_gain(ctx.transport_running);
            for channel in &mut slot.out_channels {
                for sample in channel.iter_mut() {
                    *sample *= gain;
                }
            }
        }

        ctx.advance();
        warnings
    }

    fn mask_gain_for(&self, slot: &ReceiverSlot, receiver_pos: Vec3, warnings: &mut Vec<SchedulerWarning>) -> f32 {
        if slot.receiver.global_mask_opt_in {
            return self
                .masks
                .iter()
                .fold(1.0, |gain, mask| gain * mask.gain_at(receiver_pos));
        }
        if let Some(name) = &slot.receiver.mask_plugin {
            return match self.masks.iter().find(|m| &m.object.name == name) {
                Some(mask) => mask.gain_at(receiver_pos),
                None => {
                    warnings.push(SchedulerWarning::DanglingMaskPlugin {
                        receiver: slot.receiver.object.name.clone(),
                        mask_name: name.clone(),
                    });
                    1.0
                }
            };
        }
        1.0
    }
}
