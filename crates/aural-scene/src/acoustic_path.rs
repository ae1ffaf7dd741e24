//! The per-receiver image-source tree: an arena of [`AcousticPath`]s built
//! by mirroring each source vertex across the reflector set up to a
//! configured order (spec §3 `AcousticPath`, §4.4).

use aural_core::Vec3;

use crate::obstacle::DiffractionState;

/// A block-ramped scalar: the previous block's settled value and the
/// current block's target, linearly interpolated across the block (spec
/// §4.5 step 7/8 — "no sample-to-sample recomputation of geometry").
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RampedScalar {
    pub previous: f32,
    pub current: f32,
}

impl RampedScalar {
    pub fn new(value: f32) -> Self {
        Self { previous: value, current: value }
    }

    /// Settles `current` into `previous` and sets a new target; called once
    /// per block after the new value has been computed (spec §4.5 step 8).
    pub fn advance_block(&mut self, new_value: f32) {
        self.previous = self.current;
        self.current = new_value;
    }

    /// Linearly interpolated value at fractional block position `frac` in
    /// `[0, 1]`.
    pub fn at(&self, frac: f32) -> f32 {
        self.previous + (self.current - self.previous) * frac
    }
}

/// Per-reflector one-pole reflection filter state, one per reflector in an
/// image source's chain (spec §4.5 step 7).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectionFilterState {
    pub z: f32,
}

/// One node in a receiver's image-source tree.
#[derive(Debug, Clone)]
pub struct AcousticPath {
    /// Index of the parent path in the owning arena; equals this path's own
    /// index for a primary (order-0) path.
    pub parent: usize,
    /// Index of this chain's primary (order-0) path.
    pub primary: usize,
    /// Index into the scene's reflector list; `None` for a primary path.
    pub reflector: Option<usize>,
    /// Which source vertex this chain originates from.
    pub source_vertex: usize,
    pub ism_order: u32,

    /// One reflection-filter state per reflector in the chain, root to leaf.
    pub reflection_filters: Vec<ReflectionFilterState>,
    /// Reflector index for each entry in `reflection_filters`, same order,
    /// so DSP code can look up each stage's `(reflectivity, damping)`.
    pub reflector_chain: Vec<usize>,
    /// One diffraction state per active obstacle currently intersecting
    /// this path.
    pub diffraction_states: Vec<DiffractionState>,

    pub distance: RampedScalar,
    pub gain: RampedScalar,
    pub air_absorption: RampedScalar,
    pub layer_gain: RampedScalar,

    /// Mirrored (or direct) source position used for this block's render.
    pub mirrored_position: Vec3,
    /// `false` when the mirrored position sits behind the reflector plane
    /// from the receiver's perspective this block (spec §4.4 step 3).
    pub visible: bool,
}

impl AcousticPath {
    fn primary_for(index: usize, source_vertex: usize) -> Self {
        Self {
            parent: index,
            primary: index,
            reflector: None,
            source_vertex,
            ism_order: 0,
            reflection_filters: Vec::new(),
            reflector_chain: Vec::new(),
            diffraction_states: Vec::new(),
            distance: RampedScalar::default(),
            gain: RampedScalar::default(),
            air_absorption: RampedScalar::new(1.0),
            layer_gain: RampedScalar::new(1.0),
            mirrored_position: Vec3::ZERO,
            visible: true,
        }
    }

    fn reflected_from(parent_index: usize, parent: &AcousticPath, reflector: usize) -> Self {
        let mut filters = parent.reflection_filters.clone();
        filters.push(ReflectionFilterState::default());
        let mut chain = parent.reflector_chain.clone();
        chain.push(reflector);
        Self {
            parent: parent_index,
            primary: parent.primary,
            reflector: Some(reflector),
            source_vertex: parent.source_vertex,
            ism_order: parent.ism_order + 1,
            reflection_filters: filters,
            reflector_chain: chain,
            diffraction_states: Vec::new(),
            distance: RampedScalar::default(),
            gain: RampedScalar::default(),
            air_absorption: RampedScalar::new(1.0),
            layer_gain: RampedScalar::new(1.0),
            mirrored_position: Vec3::ZERO,
            visible: true,
        }
    }
}

/// An arena of [`AcousticPath`]s for a single receiver, built by the
/// image-source tree expansion (spec §4.4).
#[derive(Debug, Clone, Default)]
pub struct AcousticPathArena {
    pub paths: Vec<AcousticPath>,
}

impl AcousticPathArena {
    /// Builds the full tree: one primary path per source vertex in
    /// `0..num_vertices`, then recursively reflected off every reflector
    /// index in `reflector_indices` up to `max_order`, never reflecting a
    /// path off the same reflector as its immediate parent.
    pub fn build(num_vertices: usize, reflector_indices: &[usize], max_order: u32) -> Self {
        let mut arena = Self { paths: Vec::new() };

        for vertex in 0..num_vertices {
            let primary_index = arena.paths.len();
            arena.paths.push(AcousticPath::primary_for(primary_index, vertex));

            let mut frontier = vec![primary_index];
            for _order in 1..=max_order {
                let mut next_frontier = Vec::new();
                for &parent_index in &frontier {
                    for &reflector in reflector_indices {
                        if arena.paths[parent_index].reflector == Some(reflector) {
                            continue;
                        }
                        let child_index = arena.paths.len();
                        let child = AcousticPath::reflected_from(parent_index, &arena.paths[parent_index], reflector);
                        arena.paths.push(child);
                        next_frontier.push(child_index);
                    }
                }
                frontier = next_frontier;
            }
        }

        arena
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// All path indices at exactly `order`, in construction order (tree
    /// order: primary, then order-1, then order-2, … — spec §4.5 "Ordering
    /// guarantees").
    pub fn paths_at_order(&self, order: u32) -> impl Iterator<Item = usize> + '_ {
        self.paths.iter().enumerate().filter(move |(_, p)| p.ism_order == order).map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_paths_are_one_per_vertex_at_order_zero() {
        let arena = AcousticPathArena::build(3, &[0, 1], 0);
        assert_eq!(arena.len(), 3);
        assert!(arena.paths.iter().all(|p| p.ism_order == 0 && p.reflector.is_none()));
    }

    #[test]
    fn order_increments_from_parent() {
        let arena = AcousticPathArena::build(1, &[0, 1], 2);
        for path in &arena.paths {
            if path.reflector.is_some() {
                let parent_order = arena.paths[path.parent].ism_order;
                assert_eq!(path.ism_order, parent_order + 1);
            }
        }
    }

    #[test]
    fn never_reflects_off_immediate_parent_reflector() {
        let arena = AcousticPathArena::build(1, &[0, 1], 2);
        for path in &arena.paths {
            if let Some(r) = path.reflector {
                let parent = &arena.paths[path.parent];
                assert_ne!(parent.reflector, Some(r));
            }
        }
    }

    #[test]
    fn tree_size_matches_expected_branching() {
        // 1 vertex, 2 reflectors, order 2: 1 (order 0) + 2 (order 1) + 2 (order 2) = 5.
        let arena = AcousticPathArena::build(1, &[0, 1], 2);
        assert_eq!(arena.len(), 5);
        assert_eq!(arena.paths_at_order(0).count(), 1);
        assert_eq!(arena.paths_at_order(1).count(), 2);
        assert_eq!(arena.paths_at_order(2).count(), 2);
    }

    #[test]
    fn ramped_scalar_interpolates_across_block() {
        let mut r = RampedScalar::new(0.0);
        r.advance_block(1.0);
        assert_eq!(r.at(0.0), 0.0);
        assert_eq!(r.at(1.0), 1.0);
        assert_eq!(r.at(0.5), 0.5);
    }
}
