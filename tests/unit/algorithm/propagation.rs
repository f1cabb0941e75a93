//! Tests for arc-consistency propagation

#[cfg(test)]
mod tests {
    use wavetile::algorithm::propagation::{PropagationOutcome, Propagator, find_unsupported};
    use wavetile::algorithm::wave::Wave;
    use wavetile::analysis::catalogue::{ExtractionConfig, PatternCatalogue};
    use wavetile::analysis::compatibility::CompatibilityTable;
    use wavetile::analysis::patterns::Exemplar;
    use wavetile::spatial::grid::GridDimensions;

    const R: [u8; 3] = [255, 0, 0];
    const B: [u8; 3] = [0, 0, 255];

    // Two 2x2 patterns, each only compatible with the other orthogonally
    fn checkerboard() -> (PatternCatalogue, CompatibilityTable) {
        let rows: Vec<Vec<[u8; 3]>> = (0..4)
            .map(|y| (0..4).map(|x| if (x + y) % 2 == 0 { R } else { B }).collect())
            .collect();
        let exemplar = Exemplar::from_rows(&rows).unwrap();
        let catalogue = PatternCatalogue::extract(&exemplar, ExtractionConfig::new(2)).unwrap();
        let table = CompatibilityTable::build(&catalogue);
        (catalogue, table)
    }

    #[test]
    fn test_empty_queue_is_stable() {
        let (catalogue, table) = checkerboard();
        let mut wave = Wave::new(GridDimensions::new(3, 3), &catalogue);
        let outcome = Propagator::new(&table).propagate(&mut wave);
        assert_eq!(outcome, PropagationOutcome::Stable { eliminations: 0 });
        assert_eq!(wave.total_possibilities(), 18);
    }

    // Tests one observation forces the whole checkerboard
    // Verified by only propagating to orthogonal neighbors of the first cell
    #[test]
    fn test_single_collapse_forces_grid() {
        let (catalogue, table) = checkerboard();
        let mut wave = Wave::new(GridDimensions::new(3, 3), &catalogue);
        wave.collapse_to([0, 0], 0);
        wave.enqueue([0, 0]);

        let outcome = Propagator::new(&table).propagate(&mut wave);
        assert_eq!(outcome, PropagationOutcome::Stable { eliminations: 8 });
        assert!(wave.is_fully_collapsed());
        for (position, _) in wave.cells() {
            let expected = (position[0] + position[1]) % 2;
            assert_eq!(wave.collapsed_pattern(position), Some(expected));
        }
        assert!(!wave.has_pending());
    }

    #[test]
    fn test_propagated_wave_is_arc_consistent() {
        let (catalogue, table) = checkerboard();
        let mut wave = Wave::new(GridDimensions::new(4, 4), &catalogue);
        wave.collapse_to([2, 1], 1);
        wave.enqueue([2, 1]);
        assert!(find_unsupported(&wave, &table).is_some());

        let outcome = Propagator::new(&table).propagate(&mut wave);
        assert!(!outcome.is_contradiction());
        assert_eq!(find_unsupported(&wave, &table), None);
    }

    #[test]
    fn test_conflicting_neighbors_contradict() {
        let (catalogue, table) = checkerboard();
        let mut wave = Wave::new(GridDimensions::new(3, 1), &catalogue);
        wave.collapse_to([0, 0], 0);
        wave.collapse_to([0, 1], 0);

        let outcome = Propagator::new(&table).propagate(&mut wave);
        assert!(outcome.is_contradiction());
        assert!(matches!(outcome, PropagationOutcome::Contradiction { .. }));
    }

    // Tests wrapping carries constraints across the seam
    // Verified by propagating with a bounded grid
    #[test]
    fn test_odd_periodic_checkerboard_contradicts() {
        let (catalogue, table) = checkerboard();

        let mut bounded = Wave::new(GridDimensions::new(3, 3), &catalogue);
        bounded.collapse_to([0, 0], 0);
        bounded.enqueue([0, 0]);
        assert!(!Propagator::new(&table).propagate(&mut bounded).is_contradiction());

        let mut periodic = Wave::new(GridDimensions::periodic(3, 3), &catalogue);
        periodic.collapse_to([0, 0], 0);
        periodic.enqueue([0, 0]);
        assert!(Propagator::new(&table).propagate(&mut periodic).is_contradiction());
    }

    #[test]
    fn test_even_periodic_checkerboard_is_consistent() {
        let (catalogue, table) = checkerboard();
        let mut wave = Wave::new(GridDimensions::periodic(4, 2), &catalogue);
        wave.collapse_to([1, 3], 0);
        wave.enqueue([1, 3]);
        assert!(!Propagator::new(&table).propagate(&mut wave).is_contradiction());
        assert!(wave.is_fully_collapsed());
        assert_eq!(find_unsupported(&wave, &table), None);
    }
}
