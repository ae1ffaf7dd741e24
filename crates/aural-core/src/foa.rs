//! First-order Ambisonic (FOA) buffers and the per-sample rotator used to
//! turn a diffuse field's stored orientation into a receiver's local frame.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::euler::Euler;
use crate::vector3::Vec3;
use libm::sqrtf;

const SQRT_HALF: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Four channels in W, Y, Z, X order (ACN-adjacent, matching the spec's
/// channel order), SN3D-like gains.
#[derive(Debug, Clone)]
pub struct FoaBuffer {
    size: usize,
    w: Vec<f32>,
    y: Vec<f32>,
    z: Vec<f32>,
    x: Vec<f32>,
}

impl FoaBuffer {
    pub fn new(size: usize) -> Self {
        Self { size, w: vec![0.0; size], y: vec![0.0; size], z: vec![0.0; size], x: vec![0.0; size] }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn w(&self) -> &[f32] {
        &self.w
    }
    pub fn y(&self) -> &[f32] {
        &self.y
    }
    pub fn z(&self) -> &[f32] {
        &self.z
    }
    pub fn x(&self) -> &[f32] {
        &self.x
    }
    pub fn w_mut(&mut self) -> &mut [f32] {
        &mut self.w
    }
    pub fn y_mut(&mut self) -> &mut [f32] {
        &mut self.y
    }
    pub fn z_mut(&mut self) -> &mut [f32] {
        &mut self.z
    }
    pub fn x_mut(&mut self) -> &mut [f32] {
        &mut self.x
    }

    pub fn clear(&mut self) {
        self.w.fill(0.0);
        self.y.fill(0.0);
        self.z.fill(0.0);
        self.x.fill(0.0);
    }

    pub fn scale(&mut self, gain: f32) {
        for ch in [&mut self.w, &mut self.y, &mut self.z, &mut self.x] {
            for s in ch.iter_mut() {
                *s *= gain;
            }
        }
    }

    pub fn add(&mut self, other: &FoaBuffer) {
        for k in 0..self.size {
            self.w[k] += other.w[k];
            self.y[k] += other.y[k];
            self.z[k] += other.z[k];
            self.x[k] += other.x[k];
        }
    }

    /// Applies a 4x4 gain matrix (row-major, applied to `[w, y, z, x]`) to
    /// every sample, as used by a receiver's `MaskPlugin` diffuse matrix.
    pub fn apply_matrix(&mut self, m: &[[f32; 4]; 4]) {
        for k in 0..self.size {
            let src = [self.w[k], self.y[k], self.z[k], self.x[k]];
            self.w[k] = m[0][0] * src[0] + m[0][1] * src[1] + m[0][2] * src[2] + m[0][3] * src[3];
            self.y[k] = m[1][0] * src[0] + m[1][1] * src[1] + m[1][2] * src[2] + m[1][3] * src[3];
            self.z[k] = m[2][0] * src[0] + m[2][1] * src[1] + m[2][2] * src[2] + m[2][3] * src[3];
            self.x[k] = m[3][0] * src[0] + m[3][1] * src[1] + m[3][2] * src[2] + m[3][3] * src[3];
        }
    }

    /// Encodes a mono signal panned towards `direction` (must be
    /// normalized) with overall `gain`, adding into this buffer:
    /// `gain * (sqrt(1/2) * W + gain * (x*X + y*Y + z*Z))`.
    pub fn add_panned(&mut self, direction: Vec3, mono: &[f32], gain: f32) {
        debug_assert_eq!(mono.len(), self.size);
        for k in 0..self.size {
            let s = mono[k] * gain;
            self.w[k] += s * SQRT_HALF;
            self.x[k] += s * direction.x;
            self.y[k] += s * direction.y;
            self.z[k] += s * direction.z;
        }
    }

    /// Decodes a single-direction probe: `sqrt(1/2)*W + x*X + y*Y + z*Z` at
    /// sample `k`, for a unit `direction`. Used by decoders and tests.
    pub fn decode_at(&self, k: usize, direction: Vec3) -> f32 {
        self.w[k] * SQRT_HALF + self.x[k] * direction.x + self.y[k] * direction.y + self.z[k] * direction.z
    }
}

/// Rotates a [`FoaBuffer`]'s (X, Y, Z) channels sample-by-sample from one
/// orientation into another, linearly interpolating the 3x3 rotation matrix
/// across the block. `W` is copied unchanged (rotation-invariant).
pub struct FoaRotator {
    prev: [[f32; 3]; 3],
    next: [[f32; 3]; 3],
}

impl FoaRotator {
    pub fn new() -> Self {
        let id = identity3();
        Self { prev: id, next: id }
    }

    /// Sets the rotation to use for the upcoming block; the previous block's
    /// final rotation becomes the interpolation start point.
    pub fn set_orientation(&mut self, orientation: Euler) {
        self.prev = self.next;
        self.next = matrix_for(orientation);
    }

    /// Rotates `input`'s X/Y/Z channels into `output`'s X/Y/Z, copying W.
    /// `input` and `output` may be the same buffer length but must not alias
    /// (distinct buffers), matching how the diffuse path reads a stored
    /// field into a per-receiver scratch buffer.
    pub fn rotate_block(&self, input: &FoaBuffer, output: &mut FoaBuffer) {
        let n = input.len();
        debug_assert_eq!(output.len(), n);
        output.w_mut().copy_from_slice(input.w());
        for k in 0..n {
            let t = if n > 1 { k as f32 / (n - 1) as f32 } else { 1.0 };
            let m = lerp_matrix(self.prev, self.next, t);
            let src = [input.x()[k], input.y()[k], input.z()[k]];
            output.x_mut()[k] = m[0][0] * src[0] + m[0][1] * src[1] + m[0][2] * src[2];
            output.y_mut()[k] = m[1][0] * src[0] + m[1][1] * src[1] + m[1][2] * src[2];
            output.z_mut()[k] = m[2][0] * src[0] + m[2][1] * src[1] + m[2][2] * src[2];
        }
    }
}

impl Default for FoaRotator {
    fn default() -> Self {
        Self::new()
    }
}

fn identity3() -> [[f32; 3]; 3] {
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
}

/// Builds the 3x3 matrix equivalent to [`Euler::rotate`] applied to the
/// (x, y, z) basis vectors.
fn matrix_for(o: Euler) -> [[f32; 3]; 3] {
    let ex = o.rotate(Vec3::new(1.0, 0.0, 0.0));
    let ey = o.rotate(Vec3::new(0.0, 1.0, 0.0));
    let ez = o.rotate(Vec3::new(0.0, 0.0, 1.0));
    [[ex.x, ey.x, ez.x], [ex.y, ey.y, ez.y], [ex.z, ey.z, ez.z]]
}

fn lerp_matrix(a: [[f32; 3]; 3], b: [[f32; 3]; 3], t: f32) -> [[f32; 3]; 3] {
    let mut out = [[0.0f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = a[i][j] + (b[i][j] - a[i][j]) * t;
        }
    }
    out
}

/// sqrt(1/2), exposed for decoders that need the W normalization constant.
pub fn sqrt_half() -> f32 {
    sqrtf(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panned_unit_direction_decodes_to_one_point_five_gain() {
        let mut buf = FoaBuffer::new(8);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        let mono = [1.0f32; 8];
        buf.add_panned(dir, &mono, 1.0);
        for k in 0..8 {
            let decoded = buf.decode_at(k, dir);
            assert!((decoded - 1.5).abs() < 1e-4, "{}", decoded);
        }
    }

    #[test]
    fn rotator_w_is_unchanged() {
        let mut input = FoaBuffer::new(4);
        input.w_mut().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        input.x_mut().copy_from_slice(&[1.0, 1.0, 1.0, 1.0]);
        let mut rotator = FoaRotator::new();
        rotator.set_orientation(Euler::new(1.0, 0.5, -0.3));
        let mut output = FoaBuffer::new(4);
        rotator.rotate_block(&input, &mut output);
        assert_eq!(output.w(), input.w());
    }

    #[test]
    fn rotator_identity_is_no_op() {
        let mut input = FoaBuffer::new(4);
        input.x_mut().copy_from_slice(&[1.0, 0.5, -0.2, 0.3]);
        input.y_mut().copy_from_slice(&[0.1, 0.2, 0.3, 0.4]);
        let rotator = FoaRotator::new();
        let mut output = FoaBuffer::new(4);
        rotator.rotate_block(&input, &mut output);
        for k in 0..4 {
            assert!((output.x()[k] - input.x()[k]).abs() < 1e-5);
            assert!((output.y()[k] - input.y()[k]).abs() < 1e-5);
        }
    }
}
