//! Parameter smoothing for zipper-free per-block ramping.
//!
//! The renderer recomputes distance, gain, and filter-coefficient targets
//! once per block from sampled geometry, then ramps the actual DSP state
//! towards that target across the block (spec §5: "per-block linear ramping
//! rather than sample-accurate geometry recomputation"). [`LinearSmoothedParam`]
//! is the primary tool for that; [`SmoothedParam`] suits slower, less
//! deadline-sensitive parameters like calibration gain.

use libm::expf;

/// Exponentially smoothed parameter (one-pole lowpass response).
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    coeff: f32,
    sample_rate: f32,
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    pub fn new(initial: f32) -> Self {
        Self { current: initial, target: initial, coeff: 0.0, sample_rate: 48000.0, smoothing_time_ms: 0.0 }
    }

    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_time_ms = time_ms;
        self.recalculate_coeff();
    }

    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let tau = self.smoothing_time_ms / 1000.0;
            self.coeff = 1.0 - expf(-1.0 / (tau * self.sample_rate));
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Linearly ramped parameter: reaches the target in exactly
/// `transition_time_ms`, at a constant rate. This is the ramp the per-block
/// scheduler uses for distance delay, gain, and air-absorption coefficients.
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    current: f32,
    target: f32,
    increment: f32,
    samples_remaining: u32,
    sample_rate: f32,
    transition_time_ms: f32,
}

impl LinearSmoothedParam {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate: 48000.0,
            transition_time_ms: 10.0,
        }
    }

    pub fn with_config(initial: f32, sample_rate: f32, transition_time_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_time_ms,
        }
    }

    /// Retargets over the block of `block_len` samples rather than the
    /// configured transition time, matching the renderer's "ramp fully
    /// across this block" convention.
    pub fn set_target_over_block(&mut self, target: f32, block_len: usize) {
        if (target - self.target).abs() < 1e-9 {
            self.target = target;
            return;
        }
        self.target = target;
        if block_len == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / block_len as f32;
            self.samples_remaining = block_len as u32;
        }
    }

    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < 1e-9 {
            return;
        }
        self.target = target;
        let samples = (self.transition_time_ms / 1000.0 * self.sample_rate) as u32;
        if samples == 0 {
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    pub fn set_transition_time_ms(&mut self, time_ms: f32) {
        self.transition_time_ms = time_ms;
    }

    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.samples_remaining == 0
    }
}

impl Default for LinearSmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ramp_reaches_target_over_block() {
        let mut p = LinearSmoothedParam::new(0.0);
        p.set_target_over_block(1.0, 128);
        let mut last = 0.0;
        for _ in 0..128 {
            last = p.advance();
        }
        assert!((last - 1.0).abs() < 1e-6);
        assert!(p.is_settled());
    }

    #[test]
    fn linear_ramp_is_monotonic_for_increasing_target() {
        let mut p = LinearSmoothedParam::new(0.0);
        p.set_target_over_block(1.0, 64);
        let mut prev = -1.0;
        for _ in 0..64 {
            let v = p.advance();
            assert!(v >= prev - 1e-6);
            prev = v;
        }
    }

    #[test]
    fn exponential_converges() {
        let mut p = SmoothedParam::with_config(0.0, 48000.0, 10.0);
        p.set_target(1.0);
        for _ in 0..(48000 * 50 / 1000) {
            p.advance();
        }
        assert!((p.get() - 1.0).abs() < 0.01);
    }
}
