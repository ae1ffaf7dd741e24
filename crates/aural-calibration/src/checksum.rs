//! Calibration-affecting attribute checksumming (spec §6 "Calibration
//! freshness"): a stable `u64` FNV-1a hash over speaker positions, gains,
//! delays, and sample rate, computed identically whenever the layout is
//! loaded so a stale or hand-edited calibration can be detected.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Incrementally accumulates an FNV-1a hash over a canonical byte encoding
/// of calibration-affecting attributes.
#[derive(Debug, Clone, Copy)]
pub struct ChecksumBuilder {
    hash: u64,
}

impl Default for ChecksumBuilder {
    fn default() -> Self {
        Self { hash: FNV_OFFSET_BASIS }
    }
}

impl ChecksumBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.hash ^= u64::from(b);
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    /// Folds one `f32` into the hash via its big-endian bit pattern, so
    /// `-0.0`/`0.0` and NaN payload bits are distinguished the same way the
    /// layout file's textual encoding would be.
    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.write_bytes(&value.to_bits().to_be_bytes());
        self
    }

    pub fn write_vec3(&mut self, v: aural_core::Vec3) -> &mut Self {
        self.write_f32(v.x).write_f32(v.y).write_f32(v.z)
    }

    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.write_bytes(s.as_bytes());
        self
    }

    pub fn finish(&self) -> u64 {
        self.hash
    }
}

/// One speaker's calibration-affecting attributes (spec §6).
#[derive(Debug, Clone, Copy)]
pub struct SpeakerAttributes {
    pub position: aural_core::Vec3,
    pub gain: f32,
    pub delay_seconds: f32,
}

/// Computes the checksum over an ordered speaker list plus sample rate,
/// matching the same fold order every time the layout is loaded.
pub fn compute_checksum(speakers: &[SpeakerAttributes], sample_rate: f32) -> u64 {
    let mut builder = ChecksumBuilder::new();
    builder.write_f32(sample_rate);
    for speaker in speakers {
        builder.write_vec3(speaker.position).write_f32(speaker.gain).write_f32(speaker.delay_seconds);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aural_core::Vec3;

    fn speakers() -> Vec<SpeakerAttributes> {
        vec![
            SpeakerAttributes { position: Vec3::new(1.0, 0.0, 0.0), gain: 1.0, delay_seconds: 0.0 },
            SpeakerAttributes { position: Vec3::new(-1.0, 0.0, 0.0), gain: 0.9, delay_seconds: 0.002 },
        ]
    }

    #[test]
    fn identical_inputs_produce_identical_checksums() {
        assert_eq!(compute_checksum(&speakers(), 48_000.0), compute_checksum(&speakers(), 48_000.0));
    }

    #[test]
    fn changing_a_gain_changes_the_checksum() {
        let mut altered = speakers();
        altered[0].gain = 0.5;
        assert_ne!(compute_checksum(&speakers(), 48_000.0), compute_checksum(&altered, 48_000.0));
    }

    #[test]
    fn changing_sample_rate_changes_the_checksum() {
        assert_ne!(compute_checksum(&speakers(), 48_000.0), compute_checksum(&speakers(), 44_100.0));
    }

    #[test]
    fn empty_layout_is_stable() {
        assert_eq!(compute_checksum(&[], 48_000.0), compute_checksum(&[], 48_000.0));
    }
}
