//! Per-block diffuse-path rendering (spec §4.6): box-falloff gain, FOA
//! rotation into the receiver's frame, and accumulation into the
//! receiver's diffuse input.

use aural_core::{FoaBuffer, FoaRotator};
use aural_scene::diffuse::DiffuseField;
use aural_scene::receiver::Receiver;

/// Minimum source-to-receiver distance used by the `1/r` gain law, to keep
/// a coincident field/receiver from producing an unbounded gain.
const MIN_RANGE_M: f32 = 0.1;

/// Per-(field, receiver) scratch state: only the FOA rotator persists
/// across blocks (its interpolation start point is the previous block's
/// final rotation matrix).
#[derive(Debug, Clone, Default)]
pub struct DiffusePathState {
    rotator: FoaRotator,
}

impl DiffusePathState {
    pub fn new() -> Self {
        Self { rotator: FoaRotator::new() }
    }
}

/// Renders one block of `field` into `receiver`'s diffuse input, per spec
/// §4.6: distance gain modulated by box falloff, FOA rotation into the
/// receiver's frame, then accumulation (scaled by `receiver.diffuse_gain`)
/// into `receiver_diffuse_input`. `scratch` is reused across calls to avoid
/// allocating a temporary FOA buffer every block.
pub fn render_diffuse_path(
    field: &DiffuseField,
    receiver: &Receiver,
    state: &mut DiffusePathState,
    scratch: &mut FoaBuffer,
    receiver_diffuse_input: &mut FoaBuffer,
) {
    let field_pose = field.object.last_pose();
    let receiver_pose = receiver.object.last_pose();

    let offset_world = field_pose.position - receiver_pose.position;
    let offset_receiver_frame = offset_world / receiver_pose.orientation;
    let range = offset_receiver_frame.norm().max(MIN_RANGE_M);
    let distance_gain = 1.0 / range;

    let offset_field_frame = offset_world / field_pose.orientation;
    let falloff_gain = field.box_falloff(offset_field_frame);

    let gain = distance_gain * falloff_gain;

    state.rotator.set_orientation(field_pose.orientation.relative_to(receiver_pose.orientation));
    state.rotator.rotate_block(&field.audio, scratch);
    scratch.scale(gain * receiver.diffuse_gain);
    receiver_diffuse_input.add(scratch);
}
