//! Per-block render context: transport position and the fixed quantities
//! every DSP stage needs (spec §4 "Scene scheduling").

/// Fixed-for-the-session rendering parameters plus the transport's
/// advancing position.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub sample_rate: f32,
    pub block_len: usize,
    pub speed_of_sound: f32,
    /// Absolute sample index at the start of the current block.
    pub transport_sample: u64,
    pub transport_running: bool,
}

impl RenderContext {
    pub fn new(sample_rate: f32, block_len: usize) -> Self {
        Self {
            sample_rate,
            block_len,
            speed_of_sound: aural_dsp::SPEED_OF_SOUND,
            transport_sample: 0,
            transport_running: true,
        }
    }

    /// Transport time, in seconds, at the start of the current block.
    pub fn time_seconds(&self) -> f32 {
        self.transport_sample as f32 / self.sample_rate
    }

    /// Advances the transport by one block's worth of samples.
    pub fn advance(&mut self) {
        self.transport_sample += self.block_len as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_seconds_tracks_transport_sample() {
        let mut ctx = RenderContext::new(48_000.0, 256);
        assert_eq!(ctx.time_seconds(), 0.0);
        ctx.advance();
        assert!((ctx.time_seconds() - 256.0 / 48_000.0).abs() < 1e-6);
    }
}
