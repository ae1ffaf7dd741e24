//! N-gon faces: planar polygons with a rigid placement, used for reflectors,
//! obstacles, and navigation-mesh tiles.
//!
//! Vertices are supplied in a local frame and are coplanar *by construction*;
//! a non-planar input degrades the normal estimate (it's taken from the sum
//! of consecutive edge cross products) but never panics.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::euler::Euler;
use crate::vector3::Vec3;

/// Error constructing a [`Polygon`]: fewer than three vertices were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooFewVertices;

impl core::fmt::Display for TooFewVertices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "a polygon needs at least three vertices")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TooFewVertices {}

/// An ordered n-gon in a local frame plus a rigid world placement.
#[derive(Debug, Clone)]
pub struct Polygon {
    local_verts: Vec<Vec3>,
    local_normal: Vec3,
    /// Signed planar area computed from the local vertex ring.
    pub area: f32,
    /// Equivalent circular aperture, `2 * sqrt(area / pi)`.
    pub aperture: f32,

    position: Vec3,
    orientation: Euler,

    world_verts: Vec<Vec3>,
    edges: Vec<Vec3>,
    edge_normals: Vec<Vec3>,
    /// World-space face normal (unit length, right-hand rule over edges).
    pub normal: Vec3,
}

impl Polygon {
    /// Builds a polygon from local-frame vertices at the identity placement.
    pub fn new(local_verts: Vec<Vec3>) -> Result<Self, TooFewVertices> {
        if local_verts.len() < 3 {
            return Err(TooFewVertices);
        }
        let n = local_verts.len();
        let mut rot = Vec3::ZERO;
        let mut prev = local_verts[n - 1];
        for &v in &local_verts {
            rot += prev.cross(v);
            prev = v;
        }
        let local_normal = rot.normalized();
        let area = 0.5 * rot.norm();
        let aperture = 2.0 * libm::sqrtf(area / core::f32::consts::PI);

        let mut poly = Self {
            local_verts,
            local_normal,
            area,
            aperture,
            position: Vec3::ZERO,
            orientation: Euler::IDENTITY,
            world_verts: Vec::new(),
            edges: Vec::new(),
            edge_normals: Vec::new(),
            normal: local_normal,
        };
        poly.update();
        Ok(poly)
    }

    /// Sets the rigid placement and recomputes all world-frame derived
    /// quantities.
    pub fn set_placement(&mut self, position: Vec3, orientation: Euler) {
        self.position = position;
        self.orientation = orientation;
        self.update();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Euler {
        self.orientation
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.world_verts
    }

    fn update(&mut self) {
        let n = self.local_verts.len();
        self.world_verts.clear();
        self.world_verts
            .extend(self.local_verts.iter().map(|&v| v * self.orientation + self.position));

        self.edges.clear();
        for k in 0..n {
            let next = self.world_verts[(k + 1) % n];
            self.edges.push(next - self.world_verts[k]);
        }

        self.normal = self.local_normal * self.orientation;

        self.edge_normals.clear();
        for k in 0..n {
            self.edge_normals.push(self.edges[k].cross(self.normal));
        }
    }

    /// Orthogonal projection of `p` onto the infinite plane containing the
    /// polygon.
    pub fn nearest_on_plane(&self, p: Vec3) -> Vec3 {
        let plane_dist = self.normal.dot(self.world_verts[0] - p);
        p + self.normal * plane_dist
    }

    /// Nearest point on a single edge segment `v -> v + d` to `p`.
    fn edge_nearest(v: Vec3, d: Vec3, p: Vec3) -> Vec3 {
        let p0p1 = p - v;
        let l = d.norm();
        if l <= f32::EPSILON {
            return v;
        }
        let n = d / l;
        let r = n.dot(p0p1);
        if r < 0.0 {
            v
        } else if r > l {
            v + d
        } else {
            v + n * r
        }
    }

    /// Nearest point on the polygon's boundary (edges), and the index of the
    /// edge it lies on.
    pub fn nearest_on_edge(&self, p: Vec3) -> (Vec3, usize) {
        let n = self.world_verts.len();
        let mut best = Self::edge_nearest(self.world_verts[0], self.edges[0], p);
        let mut best_dist = (best - p).norm();
        let mut best_k = 0;
        for k in 1..n {
            let candidate = Self::edge_nearest(self.world_verts[k], self.edges[k], p);
            let d = (candidate - p).norm();
            if d < best_dist {
                best = candidate;
                best_dist = d;
                best_k = k;
            }
        }
        (best, best_k)
    }

    /// Nearest point on the polygon (plane interior if `p` projects inside,
    /// else the nearest edge point), along with whether `p` is outside the
    /// polygon's planar extent and the edge point used for the test.
    pub fn nearest(&self, p: Vec3) -> (Vec3, bool, Vec3) {
        let (on_edge, k0) = self.nearest_on_edge(p);
        let dp0 = on_edge - p;
        let is_outside = if dp0.norm() <= f32::EPSILON {
            true
        } else {
            self.edge_normals[k0].dot(dp0) < 0.0
        };
        if is_outside {
            (on_edge, true, on_edge)
        } else {
            (self.nearest_on_plane(p), false, on_edge)
        }
    }

    /// `true` if `p` lies on the side of the plane the normal points to.
    pub fn is_infront(&self, p: Vec3) -> bool {
        let cut = self.nearest_on_plane(p);
        self.normal.dot(p - cut) > 0.0
    }

    /// Intersects the infinite plane with the segment `p0 -> p1`. Returns
    /// the intersection point and the parametric position `w` along the
    /// segment (`w` outside `[0, 1]` means the intersection falls outside
    /// the segment — spec's "no intersection" case — callers check this).
    /// Returns `None` only when the segment is parallel to the plane.
    pub fn intersection(&self, p0: Vec3, p1: Vec3) -> Option<(Vec3, f32)> {
        let np = self.nearest_on_plane(p0);
        let dpn_full = p1 - p0;
        let dpl = dpn_full.norm();
        if dpl <= f32::EPSILON {
            return None;
        }
        let dpn = dpn_full / dpl;
        let d = (np - p0).norm();
        if d <= f32::EPSILON {
            return Some((p0, 0.0));
        }
        let denom = dpn.dot((np - p0).normalized());
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let r = d / denom;
        let p_is = p0 + dpn * r;
        let w = r / dpl;
        Some((p_is, w))
    }

    /// `intersection`, but `None` unless the hit falls within the segment
    /// (`w in [0, 1]`) — the form the diffraction filter (spec §4.3) uses.
    pub fn segment_intersection(&self, p0: Vec3, p1: Vec3) -> Option<(Vec3, f32)> {
        self.intersection(p0, p1).filter(|&(_, w)| (0.0..=1.0).contains(&w))
    }

    /// `true` if `p` projects inside the polygon's boundary (not just the
    /// infinite plane).
    pub fn contains_projection(&self, p: Vec3) -> bool {
        let (_, is_outside, _) = self.nearest(p);
        !is_outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn area_and_aperture_of_unit_square() {
        let poly = unit_square();
        assert!((poly.area - 1.0).abs() < 1e-5);
        let expected_aperture = 2.0 * (1.0f32 / core::f32::consts::PI).sqrt();
        assert!((poly.aperture - expected_aperture).abs() < 1e-5);
    }

    #[test]
    fn normal_points_up_for_ccw_xy_square() {
        let poly = unit_square();
        assert!(poly.normal.z > 0.99);
    }

    #[test]
    fn is_infront_above_plane() {
        let poly = unit_square();
        assert!(poly.is_infront(Vec3::new(0.5, 0.5, 1.0)));
        assert!(!poly.is_infront(Vec3::new(0.5, 0.5, -1.0)));
    }

    #[test]
    fn segment_intersection_through_face() {
        let poly = unit_square();
        let hit = poly.segment_intersection(Vec3::new(0.5, 0.5, -1.0), Vec3::new(0.5, 0.5, 1.0));
        let (p, w) = hit.expect("segment crosses the plane");
        assert!((p.z).abs() < 1e-5);
        assert!((w - 0.5).abs() < 1e-5);
    }

    #[test]
    fn segment_intersection_outside_segment_is_none() {
        let poly = unit_square();
        // Plane crossed well beyond p1 -> w > 1.
        let hit = poly.segment_intersection(Vec3::new(0.5, 0.5, -1.0), Vec3::new(0.5, 0.5, -0.5));
        assert!(hit.is_none());
    }

    #[test]
    fn nearest_outside_polygon_lands_on_edge() {
        let poly = unit_square();
        let (nearest, is_outside, _) = poly.nearest(Vec3::new(2.0, 0.5, 0.0));
        assert!(is_outside);
        assert!((nearest.x - 1.0).abs() < 1e-5);
    }
}
