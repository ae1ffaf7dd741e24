//! Percentile level metering.
//!
//! Segments the signal into 125 ms windows at 50% overlap (the "fast" time
//! constant used by sound level meters), stores each window's RMS in
//! dB-SPL, and reports percentiles (e.g. L95, L50, L5) over the accumulated
//! history. Weighting is flat (Z-weighting) — the frequency-dependent A/C
//! weighting curves a physical SPL meter would apply are out of scope here;
//! the receiver post-stage is expected to pre-filter if a weighted reading
//! is needed.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::audio_buffer::linear_to_db_spl;

/// Accumulates RMS-per-segment history and reports percentiles on demand.
#[derive(Debug, Clone)]
pub struct LevelMeter {
    sample_rate: f32,
    segment_len: usize,
    hop_len: usize,
    scratch: Vec<f32>,
    filled: usize,
    history_db: Vec<f32>,
    max_history: usize,
}

impl LevelMeter {
    /// Builds a meter with 125 ms windows at 50% overlap, retaining up to
    /// `max_history` completed segments.
    pub fn new(sample_rate: f32, max_history: usize) -> Self {
        let segment_len = (sample_rate * 0.125) as usize;
        let hop_len = segment_len / 2;
        Self {
            sample_rate,
            segment_len,
            hop_len,
            scratch: alloc_zeroed(segment_len),
            filled: 0,
            history_db: Vec::with_capacity(max_history),
            max_history,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Feeds a block of samples, emitting one history entry per completed
    /// 125 ms/50%-overlap segment.
    pub fn push_block(&mut self, samples: &[f32]) {
        for &s in samples {
            self.push_sample(s);
        }
    }

    fn push_sample(&mut self, sample: f32) {
        if self.filled < self.segment_len {
            self.scratch[self.filled] = sample;
            self.filled += 1;
        } else {
            self.scratch.copy_within(1.., 0);
            self.scratch[self.segment_len - 1] = sample;
        }
        if self.filled == self.segment_len {
            self.emit_segment();
            // Drop hop_len samples to advance to the next 50%-overlapped window.
            self.scratch.copy_within(self.hop_len.., 0);
            self.filled = self.segment_len - self.hop_len;
        }
    }

    fn emit_segment(&mut self) {
        let sum_sq: f32 = self.scratch.iter().map(|s| s * s).sum();
        let rms = libm::sqrtf(sum_sq / self.segment_len as f32);
        let db = linear_to_db_spl(rms);
        if self.history_db.len() == self.max_history {
            self.history_db.remove(0);
        }
        self.history_db.push(db);
    }

    /// Number of completed segments currently retained.
    pub fn history_len(&self) -> usize {
        self.history_db.len()
    }

    /// The `p`-th percentile (0.0..=100.0) of the retained dB-SPL history.
    /// Returns `None` if no segments have completed yet.
    pub fn percentile(&self, p: f32) -> Option<f32> {
        if self.history_db.is_empty() {
            return None;
        }
        let mut sorted = self.history_db.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let rank = (p / 100.0 * (sorted.len() - 1) as f32).round() as usize;
        Some(sorted[rank.min(sorted.len() - 1)])
    }

    /// Resets accumulated history and in-flight segment state.
    pub fn reset(&mut self) {
        self.filled = 0;
        self.history_db.clear();
        for s in self.scratch.iter_mut() {
            *s = 0.0;
        }
    }
}

#[cfg(not(feature = "std"))]
fn alloc_zeroed(n: usize) -> Vec<f32> {
    alloc::vec![0.0; n]
}

#[cfg(feature = "std")]
fn alloc_zeroed(n: usize) -> Vec<f32> {
    vec![0.0; n]
}
