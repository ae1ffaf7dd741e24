//! Time-keyed position/orientation trajectories.
//!
//! A [`Trajectory`] is an ordered mapping from transport time to a sampled
//! [`Vec3`], interpolated linearly between the two samples bracketing a
//! query time. Boundary handling follows the original engine's
//! lower-bound search: before the first sample, hold the first value;
//! after the last, hold the last value; an exact hit skips interpolation.

use aural_core::Vec3;

/// How consecutive samples of a [`Trajectory`] are interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Straight-line interpolation of Cartesian coordinates.
    #[default]
    Cartesian,
    /// Interpolate radius/azimuth/elevation independently, then convert
    /// back to Cartesian. Used for paths that wrap around a receiver.
    Spherical,
}

/// One (time, position) sample of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub value: Vec3,
}

/// A time-ordered sequence of [`Keyframe`]s sampled by interpolation.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    keys: Vec<Keyframe>,
    mode: InterpolationMode,
    /// Loop period in seconds; `0.0` means "do not loop".
    loop_period: f32,
}

impl Trajectory {
    pub fn new(mode: InterpolationMode) -> Self {
        Self { keys: Vec::new(), mode, loop_period: 0.0 }
    }

    /// Builds a constant (single-sample) trajectory.
    pub fn constant(value: Vec3) -> Self {
        let mut t = Self::new(InterpolationMode::Cartesian);
        t.push(0.0, value);
        t
    }

    pub fn set_loop_period(&mut self, period: f32) {
        self.loop_period = period.max(0.0);
    }

    /// Appends a keyframe. Keyframes must be pushed in non-decreasing time
    /// order; out-of-order pushes are rejected (the caller builds paths in
    /// time order, matching the import tools that feed this structure).
    pub fn push(&mut self, time: f32, value: Vec3) -> bool {
        if let Some(last) = self.keys.last() {
            if time < last.time {
                return false;
            }
        }
        self.keys.push(Keyframe { time, value });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Samples the trajectory at `t_obj`, applying the loop period (if any)
    /// before the lower-bound search.
    pub fn sample(&self, t_obj: f32) -> Vec3 {
        if self.keys.is_empty() {
            return Vec3::ZERO;
        }
        if self.keys.len() == 1 {
            return self.keys[0].value;
        }

        let t = if self.loop_period > 0.0 { t_obj.rem_euclid(self.loop_period) } else { t_obj };

        if t <= self.keys[0].time {
            return self.keys[0].value;
        }
        let last = self.keys.len() - 1;
        if t >= self.keys[last].time {
            return self.keys[last].value;
        }

        // Lower-bound search: find the first key whose time is >= t.
        let idx = self.keys.partition_point(|k| k.time < t);
        let hi = &self.keys[idx];
        if (hi.time - t).abs() <= f32::EPSILON {
            return hi.value;
        }
        let lo = &self.keys[idx - 1];
        let span = hi.time - lo.time;
        let frac = if span > f32::EPSILON { (t - lo.time) / span } else { 0.0 };

        match self.mode {
            InterpolationMode::Cartesian => lo.value.lerp(hi.value, frac),
            InterpolationMode::Spherical => {
                let r = lo.value.norm() + (hi.value.norm() - lo.value.norm()) * frac;
                let az = lo.value.azim() + (hi.value.azim() - lo.value.azim()) * frac;
                let el = lo.value.elev() + (hi.value.elev() - lo.value.elev()) * frac;
                Vec3::from_spherical(r, az, el)
            }
        }
    }

    /// Start/end times of the keyframe set, used for "active window" checks.
    pub fn time_bounds(&self) -> Option<(f32, f32)> {
        match (self.keys.first(), self.keys.last()) {
            (Some(a), Some(b)) => Some((a.time, b.time)),
            _ => None,
        }
    }
}
