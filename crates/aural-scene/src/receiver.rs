//! Receivers, data-only (spec §3 `Receiver`). The per-variant rendering
//! contract (`add_pointsource`, `add_diffuse_sound_field`, `postproc`) lives
//! with the receiver implementations themselves, not here.

use crate::dynobject::DynObject;
use aural_core::Vec3;

/// Which multi-channel decoding/panning algorithm a receiver uses. The
/// variant selects a concrete implementation elsewhere; this crate only
/// tags a receiver with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    Omni,
    Amb1h0v,
    Amb1h1v,
    Amb3h3v,
    Hrtf,
    Itu50,
    Itu71Plus4,
    Vbap2d,
    Vbap3d,
    Cardioid,
    DebugPos,
    Ortf,
    FakeBf,
    Hoa2d,
    Hoa3d,
    Nsp,
    IntensityVector,
    SimpleFdnReverb,
    FoaReverb,
}

impl ReceiverKind {
    /// `true` for the two reverb variants, which are post-processed in an
    /// earlier sub-pass than non-reverb receivers (spec §4.5 "Ordering
    /// guarantees").
    pub fn is_reverb(&self) -> bool {
        matches!(self, ReceiverKind::SimpleFdnReverb | ReceiverKind::FoaReverb)
    }
}

/// A bounding box with boundary falloff, gating a receiver's own global
/// gain the same way [`crate::mask::Mask`] gates via box falloff.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBox {
    pub size: Vec3,
    pub falloff: f32,
}

/// Smooth-ramped fade-in/out state: current, previous, and target gain,
/// advanced with a half-cosine ramp over a configurable duration.
#[derive(Debug, Clone, Copy)]
pub struct FadeState {
    pub current: f32,
    pub previous: f32,
    pub target: f32,
    pub ramp_len_samples: u32,
    /// Samples elapsed since the current ramp began.
    pub elapsed: u32,
    /// Absolute transport sample at which a scheduled fade should start;
    /// `None` means the fade is already active/unscheduled.
    pub scheduled_start: Option<u64>,
}

impl Default for FadeState {
    fn default() -> Self {
        Self { current: 1.0, previous: 1.0, target: 1.0, ramp_len_samples: 0, elapsed: 0, scheduled_start: None }
    }
}

impl FadeState {
    /// Begins a ramp towards `target` over `ramp_len_samples`, optionally
    /// scheduled to start at an absolute transport sample.
    pub fn schedule(&mut self, target: f32, ramp_len_samples: u32, scheduled_start: Option<u64>) {
        self.previous = self.current;
        self.target = target;
        self.ramp_len_samples = ramp_len_samples;
        self.elapsed = 0;
        self.scheduled_start = scheduled_start;
    }

    /// Advances the ramp by `block_len` samples at absolute transport
    /// sample `transport_sample` (the sample index at the start of this
    /// block), returning the gain at the end of the block.
    pub fn advance(&mut self, block_len: u32, transport_sample: u64) -> f32 {
        if let Some(start) = self.scheduled_start {
            if transport_sample + u64::from(block_len) <= start {
                return self.current;
            }
            self.scheduled_start = None;
        }
        if self.ramp_len_samples == 0 {
            self.current = self.target;
            return self.current;
        }
        self.elapsed = (self.elapsed + block_len).min(self.ramp_len_samples);
        let t = self.elapsed as f32 / self.ramp_len_samples as f32;
        let shaped = 0.5 * (1.0 - (core::f32::consts::PI * t).cos());
        self.current = self.previous + (self.target - self.previous) * shaped;
        self.current
    }
}

/// A moving multi-channel output stage: pose, acoustic-path gating
/// parameters, fade/mute state, and post-stage configuration flags.
#[derive(Debug, Clone)]
pub struct Receiver {
    pub object: DynObject,
    pub kind: ReceiverKind,

    pub ism_min_order: u32,
    pub ism_max_order: u32,
    pub layers: u32,

    pub render_diffuse: bool,
    pub render_image_source: bool,
    pub render_point_source: bool,

    /// Non-zero box size marks this receiver as "volumetric" (spec §4.5
    /// step 3): it is read with a diffuse, FOA-decorrelated pickup rather
    /// than a single-direction pan.
    pub bounding_box: BoundingBox,

    pub fade: FadeState,

    pub external_gain: f32,
    pub diffuse_gain: f32,
    pub global_mask_opt_in: bool,
    pub mask_plugin: Option<String>,

    pub mute_on_stop: bool,
    /// Subtracted from every path's propagation delay (spec §3).
    pub delay_compensation: f32,

    pub calib_level_db: f32,
}

impl Receiver {
    pub fn new(name: impl Into<String>, kind: ReceiverKind) -> Self {
        Self {
            object: DynObject::new(name),
            kind,
            ism_min_order: 0,
            ism_max_order: 0,
            layers: 1,
            render_diffuse: true,
            render_image_source: true,
            render_point_source: true,
            bounding_box: BoundingBox::default(),
            fade: FadeState::default(),
            external_gain: 1.0,
            diffuse_gain: 1.0,
            global_mask_opt_in: false,
            mask_plugin: None,
            mute_on_stop: false,
            delay_compensation: 0.0,
            calib_level_db: 0.0,
        }
    }

    pub fn is_volumetric(&self) -> bool {
        self.bounding_box.size.norm_sqr() > f32::EPSILON
    }

    pub fn on_layer(&self, vertex_layers: u32) -> bool {
        self.layers & vertex_layers != 0
    }

    /// Effective path gain given the current fade value and, when the
    /// transport is stopped and `mute_on_stop` is set, forced silence
    /// (spec §4.5 step 9).
    pub fn effective_gain(&self, transport_rolling: bool) -> f32 {
        if !transport_rolling && self.mute_on_stop {
            0.0
        } else {
            self.external_gain * self.fade.current
        }
    }
}
