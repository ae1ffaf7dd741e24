//! Per-output delay/gain/FIR calibration (spec §4.7 post-stage step 6): a
//! precomputed static delay and gain applied to every main output channel,
//! with an optional per-speaker EQ FIR convolved in afterwards.

use aural_core::{PartitionedConvolver, VariableDelayLine};

/// One output channel's fixed calibration: a static delay (typically
/// `(r_max - r_k) / c + layout_delay`, precomputed outside the audio
/// context), a linear gain, and an optional EQ impulse response.
pub struct SpeakerCalibration {
    delay: VariableDelayLine,
    delay_samples: f32,
    gain: f32,
    fir: Option<PartitionedConvolver>,
}

impl SpeakerCalibration {
    /// Builds a calibration stage for one output channel. `delay_seconds`
    /// is the precomputed static delay; `fir`, if given, is convolved in
    /// after the delay/gain stage at `block_size` partitioning.
    pub fn new(sample_rate: f32, delay_seconds: f32, gain: f32, fir: Option<&[f32]>, block_size: usize) -> Self {
        Self {
            delay: VariableDelayLine::from_time(sample_rate, delay_seconds.max(0.0) + 0.001),
            delay_samples: delay_seconds * sample_rate,
            gain,
            fir: fir.map(|ir| PartitionedConvolver::new(ir, block_size)),
        }
    }

    /// Applies the static delay, gain, and (if present) FIR to one block
    /// in place.
    pub fn process_block(&mut self, block: &mut [f32]) {
        for sample in block.iter_mut() {
            let delayed = self.delay.read_write(*sample, self.delay_samples);
            *sample = delayed * self.gain;
        }
        if let Some(fir) = &mut self.fir {
            let mut scratch = vec![0.0_f32; block.len()];
            fir.process_block(block, &mut scratch);
            block.copy_from_slice(&scratch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_only_stage_scales_the_block() {
        let mut stage = SpeakerCalibration::new(48_000.0, 0.0, 0.5, None, 64);
        let mut block = vec![1.0_f32; 64];
        stage.process_block(&mut block);
        assert!((block[63] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn delay_pushes_a_step_edge_back_by_the_configured_samples() {
        let mut stage = SpeakerCalibration::new(48_000.0, 10.0 / 48_000.0, 1.0, None, 64);
        let mut block = vec![1.0_f32; 64];
        stage.process_block(&mut block);
        assert_eq!(block[0], 0.0);
        assert!(block[20] > 0.9);
    }
}
