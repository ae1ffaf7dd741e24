//! Per-receiver scatter accumulation (spec §3 `ScatterAccumulator`,
//! §4.5 step 11, §4.7 step 1).

use aural_core::FoaBuffer;

/// One FOA buffer per receiver that accumulates point-source energy
/// scattered diffusely off reflectors, fed into the receiver's diffuse
/// input at the start of its post-stage.
#[derive(Debug, Clone)]
pub struct ScatterAccumulator {
    pub buffer: FoaBuffer,
}

impl ScatterAccumulator {
    pub fn new(block_len: usize) -> Self {
        Self { buffer: FoaBuffer::new(block_len) }
    }

    /// Clears the accumulator; call once at the start of each block before
    /// any acoustic path adds its scattered contribution.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aural_core::Vec3;

    #[test]
    fn reset_clears_accumulated_energy() {
        let mut acc = ScatterAccumulator::new(8);
        let mono = vec![0.5; 8];
        acc.buffer.add_panned(Vec3::new(1.0, 0.0, 0.0), &mono, 1.0);
        assert_ne!(acc.buffer.w()[0], 0.0);
        acc.reset();
        assert_eq!(acc.buffer.w()[0], 0.0);
    }

    #[test]
    fn len_matches_block_length() {
        let acc = ScatterAccumulator::new(128);
        assert_eq!(acc.len(), 128);
        assert!(!acc.is_empty());
    }
}
