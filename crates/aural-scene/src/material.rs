//! Frequency-dependent absorption materials.
//!
//! A [`Material`] carries an ordered `(frequency, alpha)` absorption table.
//! At configure time it is fit to the two scalar parameters
//! (`reflectivity`, `damping`) of the one-pole reflection filter used by
//! `AcousticPath` (spec §3 `Material`, §4.5 step 7): `coef = reflectivity *
//! (1 - damping)`, state update `z <- z*damping + x*coef`.

use core::f32::consts::{PI, TAU};

/// One `(frequency_hz, alpha)` absorption sample, `alpha` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorptionSample {
    pub frequency_hz: f32,
    pub alpha: f32,
}

/// A named absorption curve.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub samples: Vec<AbsorptionSample>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), samples: Vec::new() }
    }

    pub fn push(&mut self, frequency_hz: f32, alpha: f32) {
        self.samples.push(AbsorptionSample { frequency_hz, alpha: alpha.clamp(0.0, 1.0) });
    }

    /// Fits `(reflectivity, damping)` for the one-pole reflection filter at
    /// `sample_rate`, minimizing the sum of squared magnitude errors against
    /// the absorption table. Falls back to a fully-reflective, undamped
    /// filter when no samples are present.
    pub fn fit(&self, sample_rate: f32) -> MaterialFit {
        if self.samples.is_empty() {
            return MaterialFit { reflectivity: 1.0, damping: 0.0 };
        }

        let targets: Vec<(f32, f32)> = self
            .samples
            .iter()
            .map(|s| {
                let omega = (TAU * s.frequency_hz / sample_rate).clamp(0.0, PI);
                let target_mag = libm::sqrtf((1.0 - s.alpha).max(0.0));
                (omega, target_mag)
            })
            .collect();

        let mut best_d = 0.0f32;
        let mut best_r = 1.0f32;
        let mut best_residual = f32::MAX;

        let steps = 96;
        for i in 0..steps {
            let d = i as f32 / steps as f32 * 0.95;

            let mut num = 0.0f32;
            let mut den = 0.0f32;
            for &(omega, target) in &targets {
                let basis = reflection_basis(d, omega);
                num += target * basis;
                den += basis * basis;
            }
            if den <= f32::EPSILON {
                continue;
            }
            let r = (num / den).clamp(0.0, 1.0);

            let residual: f32 = targets
                .iter()
                .map(|&(omega, target)| {
                    let predicted = r * reflection_basis(d, omega);
                    (target - predicted) * (target - predicted)
                })
                .sum();

            if residual < best_residual {
                best_residual = residual;
                best_r = r;
                best_d = d;
            }
        }

        MaterialFit { reflectivity: best_r, damping: best_d }
    }
}

/// The fitted parameters of a one-pole reflection filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialFit {
    pub reflectivity: f32,
    pub damping: f32,
}

impl MaterialFit {
    /// Filter coefficient: `reflectivity * (1 - damping)`.
    pub fn coefficient(&self) -> f32 {
        self.reflectivity * (1.0 - self.damping)
    }

    /// Magnitude response at angular frequency `omega` (radians/sample).
    pub fn magnitude_at(&self, omega: f32) -> f32 {
        self.reflectivity * reflection_basis(self.damping, omega)
    }
}

/// `(1 - d) / |1 - d*e^{-j*omega}|`, the shape of the one-pole reflection
/// filter's magnitude response with `reflectivity` factored out.
fn reflection_basis(d: f32, omega: f32) -> f32 {
    let denom = libm::sqrtf((1.0 - d * libm::cosf(omega)).powi(2) + (d * libm::sinf(omega)).powi(2));
    if denom <= f32::EPSILON {
        0.0
    } else {
        (1.0 - d) / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_reflective_flat_material_fits_near_unity() {
        let mut mat = Material::new("rigid");
        for f in [125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0] {
            mat.push(f, 0.0);
        }
        let fit = mat.fit(48000.0);
        assert!(fit.reflectivity > 0.9, "{:?}", fit);
        assert!(fit.damping < 0.2, "{:?}", fit);
    }

    #[test]
    fn absorptive_high_frequency_material_increases_damping() {
        let mut flat = Material::new("flat");
        let mut hf_absorbing = Material::new("hf-absorbing");
        for f in [125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0] {
            flat.push(f, 0.1);
            let alpha = if f > 1000.0 { 0.8 } else { 0.1 };
            hf_absorbing.push(f, alpha);
        }
        let flat_fit = flat.fit(48000.0);
        let hf_fit = hf_absorbing.fit(48000.0);
        assert!(hf_fit.damping > flat_fit.damping, "{:?} vs {:?}", hf_fit, flat_fit);
    }

    #[test]
    fn higher_damping_increases_high_frequency_absorption() {
        let low_damping = MaterialFit { reflectivity: 0.9, damping: 0.1 };
        let high_damping = MaterialFit { reflectivity: 0.9, damping: 0.8 };
        let nyquist = PI;
        assert!(high_damping.magnitude_at(nyquist) < low_damping.magnitude_at(nyquist));
    }

    #[test]
    fn empty_material_is_fully_reflective() {
        let mat = Material::new("undefined");
        let fit = mat.fit(48000.0);
        assert_eq!(fit.reflectivity, 1.0);
        assert_eq!(fit.damping, 0.0);
    }
}
