//! Per-receiver level metering with `caliblevel` conversion (spec §4.1,
//! §8): one [`aural_core::LevelMeter`] per output channel, reporting
//! percentiles offset by the receiver's calibration reference so a meter
//! reading is a physical dB-SPL value rather than a bare amplitude ratio.

use aural_core::LevelMeter;

/// One [`LevelMeter`] per output channel, sharing a single `caliblevel`
/// reference (spec §3 "per-object dB-SPL reference used to convert
/// between signal amplitude and physical level").
pub struct ReceiverMeterBank {
    meters: Vec<LevelMeter>,
    /// Added to every raw dB-SPL reading to express it relative to the
    /// receiver's calibrated reference level rather than full scale.
    calib_level_db: f32,
}

impl ReceiverMeterBank {
    pub fn new(channel_count: usize, sample_rate: f32, max_history: usize, calib_level_db: f32) -> Self {
        Self {
            meters: (0..channel_count).map(|_| LevelMeter::new(sample_rate, max_history)).collect(),
            calib_level_db,
        }
    }

    /// Feeds one block per channel; `channels.len()` must match the bank's
    /// channel count.
    pub fn push_block(&mut self, channels: &[Vec<f32>]) {
        for (meter, channel) in self.meters.iter_mut().zip(channels.iter()) {
            meter.push_block(channel);
        }
    }

    /// The `p`-th percentile for channel `index`, in calibrated dB-SPL, or
    /// `None` if that channel has no completed segment yet.
    pub fn percentile(&self, index: usize, p: f32) -> Option<f32> {
        self.meters.get(index)?.percentile(p).map(|db| db + self.calib_level_db)
    }

    pub fn channel_count(&self) -> usize {
        self.meters.len()
    }

    pub fn reset(&mut self) {
        for meter in &mut self.meters {
            meter.reset();
        }
    }
}
