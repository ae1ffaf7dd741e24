//! Dynamic scene objects: position/orientation trajectories plus the
//! per-block pose update (spec §3 `DynObject`, §4.2).

use crate::trajectory::Trajectory;
use aural_core::{Euler, Polygon, Vec3};

/// An RGBA color tag carried for diagnostic/visualization purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// The world-frame pose produced by one [`DynObject::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Euler,
}

/// A navigation mesh constraining an object's position to the nearest
/// point on one of its polygons, subject to a maximum step height.
#[derive(Debug, Clone, Default)]
pub struct NavMesh {
    pub polygons: Vec<Polygon>,
    pub max_step: f32,
}

impl NavMesh {
    /// Snaps `p` to the nearest point across all polygons whose
    /// z-difference from `p` is within `max_step`; returns `p` unchanged if
    /// no polygon qualifies.
    pub fn snap(&self, p: Vec3) -> Vec3 {
        let mut best: Option<Vec3> = None;
        let mut best_dist = f32::MAX;
        for poly in &self.polygons {
            let (candidate, _, _) = poly.nearest(p);
            if (candidate.z - p.z).abs() > self.max_step {
                continue;
            }
            let d = (candidate - p).norm();
            if d < best_dist {
                best_dist = d;
                best = Some(candidate);
            }
        }
        best.unwrap_or(p)
    }
}

/// A moving, rotating scene object with an active time window.
#[derive(Debug, Clone)]
pub struct DynObject {
    pub name: String,
    pub color: Color,
    pub start: f32,
    pub end: f32,

    pub location: Trajectory,
    pub orientation: Trajectory,

    pub delta_location: Vec3,
    pub delta_orientation: Euler,

    /// Along-curve distance used to derive orientation from the location
    /// trajectory's tangent; `0.0` disables sampled orientation (the
    /// `orientation` trajectory is used verbatim instead). May be negative
    /// to reverse the tangent direction.
    pub sampled_orientation: f32,

    pub nav_mesh: Option<NavMesh>,

    last_pose: Pose,
    last_navmesh_delta: Vec3,
}

impl DynObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::default(),
            start: 0.0,
            end: f32::MAX,
            location: Trajectory::constant(Vec3::ZERO),
            orientation: Trajectory::constant(Vec3::ZERO),
            delta_location: Vec3::ZERO,
            delta_orientation: Euler::IDENTITY,
            sampled_orientation: 0.0,
            nav_mesh: None,
            last_pose: Pose::default(),
            last_navmesh_delta: Vec3::ZERO,
        }
    }

    /// `true` if transport time `t` falls within `[start, end)`.
    pub fn is_active(&self, t: f32) -> bool {
        t >= self.start && t < self.end
    }

    pub fn last_pose(&self) -> Pose {
        self.last_pose
    }

    pub fn navmesh_delta(&self) -> Vec3 {
        self.last_navmesh_delta
    }

    /// Recomputes the object's world pose at transport time `t`, per
    /// spec §4.2's four-step procedure. `local_pos` is the object's own
    /// local-frame offset (zero for most objects; non-zero for
    /// `SoundVertex` children of a `Source`).
    pub fn update(&mut self, t: f32, local_pos: Vec3) -> Pose {
        let t_obj = t - self.start;

        let sampled_pos = self.location.sample(t_obj);
        let orientation = if self.sampled_orientation.abs() > f32::EPSILON {
            let delta = self.sampled_orientation;
            let behind = self.location.sample(t_obj - delta);
            let mut tangent = sampled_pos - behind;
            if delta < 0.0 {
                tangent = -tangent;
            }
            if tangent.norm() <= f32::EPSILON {
                Euler::facing(self.last_pose.orientation.rotate(Vec3::new(1.0, 0.0, 0.0)))
            } else {
                Euler::facing(tangent)
            }
        } else {
            // orientation trajectories store (z, y, x) angles packed into a
            // Vec3's (x, y, z) fields so they can share Trajectory's sampler.
            let o = self.orientation.sample(t_obj);
            Euler::new(o.x, o.y, o.z)
        };

        let mut position = sampled_pos;
        self.last_navmesh_delta = Vec3::ZERO;
        if let Some(mesh) = &self.nav_mesh {
            let snapped = mesh.snap(position);
            self.last_navmesh_delta = snapped - position;
            position = snapped;
        }

        let final_orientation = orientation.compose(self.delta_orientation);
        let final_position = position + self.delta_location + (local_pos * final_orientation);

        let pose = Pose { position: final_position, orientation: final_orientation };
        self.last_pose = pose;
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::InterpolationMode;

    #[test]
    fn update_with_constant_trajectory_holds_position() {
        let mut obj = DynObject::new("test");
        obj.location = Trajectory::constant(Vec3::new(1.0, 2.0, 3.0));
        let pose = obj.update(0.0, Vec3::ZERO);
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn sampled_orientation_faces_tangent_direction() {
        let mut obj = DynObject::new("test");
        let mut traj = Trajectory::new(InterpolationMode::Cartesian);
        traj.push(0.0, Vec3::new(0.0, 0.0, 0.0));
        traj.push(1.0, Vec3::new(0.0, 10.0, 0.0));
        traj.push(2.0, Vec3::new(0.0, 20.0, 0.0));
        obj.location = traj;
        obj.sampled_orientation = 0.5;
        let pose = obj.update(1.0, Vec3::ZERO);
        assert!((pose.orientation.z - core::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn delta_location_offsets_final_position() {
        let mut obj = DynObject::new("test");
        obj.location = Trajectory::constant(Vec3::new(1.0, 0.0, 0.0));
        obj.delta_location = Vec3::new(0.0, 1.0, 0.0);
        let pose = obj.update(0.0, Vec3::ZERO);
        assert_eq!(pose.position, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn local_offset_is_rotated_into_final_orientation() {
        let mut obj = DynObject::new("test");
        obj.location = Trajectory::constant(Vec3::ZERO);
        obj.delta_orientation = Euler::new(core::f32::consts::FRAC_PI_2, 0.0, 0.0);
        let pose = obj.update(0.0, Vec3::new(1.0, 0.0, 0.0));
        assert!(pose.position.y > 0.9);
    }

    #[test]
    fn inactive_outside_time_window() {
        let mut obj = DynObject::new("test");
        obj.start = 1.0;
        obj.end = 2.0;
        assert!(!obj.is_active(0.5));
        assert!(obj.is_active(1.5));
        assert!(!obj.is_active(2.0));
    }
}
