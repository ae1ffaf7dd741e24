//! Property-based tests for aural-core geometry and DSP primitives.

use aural_core::{highpass_coefficients, lowpass_coefficients, Biquad, Euler, OnePole, Vec3, VariableDelayLine};
use proptest::prelude::*;

fn configure_biquad(biquad: &mut Biquad, variant: usize, freq: f32, q: f32) {
    let sr = 48000.0;
    let (b0, b1, b2, a0, a1, a2) = match variant % 2 {
        0 => lowpass_coefficients(freq, q, sr),
        1 => highpass_coefficients(freq, q, sr),
        _ => unreachable!(),
    };
    biquad.set_coefficients(b0, b1, b2, a0, a1, a2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Rotating a vector by an arbitrary orientation and then unrotating it
    /// recovers the original vector, for any orientation and any vector.
    #[test]
    fn rotate_unrotate_round_trip(
        z in -10.0f32..10.0f32,
        y in -10.0f32..10.0f32,
        x in -10.0f32..10.0f32,
        vx in -100.0f32..100.0f32,
        vy in -100.0f32..100.0f32,
        vz in -100.0f32..100.0f32,
    ) {
        let o = Euler::new(z, y, x);
        let v = Vec3::new(vx, vy, vz);
        let rotated = o.rotate(v);
        let back = o.unrotate(rotated);
        prop_assert!((back.x - v.x).abs() < 1e-2, "{:?} vs {:?}", back, v);
        prop_assert!((back.y - v.y).abs() < 1e-2, "{:?} vs {:?}", back, v);
        prop_assert!((back.z - v.z).abs() < 1e-2, "{:?} vs {:?}", back, v);
    }

    /// Rotation never changes a vector's norm.
    #[test]
    fn rotation_preserves_norm(
        z in -10.0f32..10.0f32,
        y in -10.0f32..10.0f32,
        x in -10.0f32..10.0f32,
        vx in -100.0f32..100.0f32,
        vy in -100.0f32..100.0f32,
        vz in -100.0f32..100.0f32,
    ) {
        let o = Euler::new(z, y, x);
        let v = Vec3::new(vx, vy, vz);
        let rotated = o.rotate(v);
        prop_assert!((rotated.norm() - v.norm()).abs() < 1e-2 * v.norm().max(1.0));
    }

    /// Biquad filters stay finite for any cutoff/Q in the audible range and
    /// any finite input, across both variants written for aural-core.
    #[test]
    fn biquad_stability(
        freq in 20.0f32..20000.0f32,
        q in 0.1f32..10.0f32,
        variant in 0usize..2,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut biquad = Biquad::new();
        configure_biquad(&mut biquad, variant, freq, q);
        for &sample in &input {
            let out = biquad.process(sample);
            prop_assert!(out.is_finite(), "variant {} freq={} q={} -> {}", variant, freq, q, out);
        }
    }

    /// A one-pole filter never amplifies a bounded input beyond its bound
    /// (a lowpass is non-expansive for any cutoff in the audible range).
    #[test]
    fn one_pole_is_non_expansive(
        freq in 20.0f32..20000.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut lp = OnePole::new(48000.0, freq);
        for &sample in &input {
            let out = lp.process(sample);
            prop_assert!(out.abs() <= 1.0 + 1e-4, "freq={} -> {}", freq, out);
        }
    }

    /// A delay line always reads back a previously written sample exactly
    /// at an integer delay within its capacity.
    #[test]
    fn delay_line_exact_integer_readback(
        values in prop::collection::vec(-1.0f32..1.0f32, 32..64),
        delay in 0usize..31,
    ) {
        let mut line = VariableDelayLine::new(64);
        for &v in &values {
            line.write(v);
        }
        let n = values.len();
        if delay < n {
            let expected = values[n - 1 - delay];
            let got = line.read(delay as f32);
            prop_assert!((got - expected).abs() < 1e-4, "delay={} expected={} got={}", delay, expected, got);
        }
    }
}
