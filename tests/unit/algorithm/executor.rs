//! Tests for the observation loop, restarts and rendering

#[cfg(test)]
mod tests {
    use wavetile::SynthesisError;
    use wavetile::algorithm::executor::{Phase, RoundOutcome, Solver, SolverConfig, Terminal};
    use wavetile::analysis::catalogue::{ExtractionConfig, PatternCatalogue};
    use wavetile::analysis::compatibility::CompatibilityTable;
    use wavetile::analysis::patterns::Exemplar;
    use wavetile::io::visualization::{FrameSink, NullSink, WaveSnapshot};

    const R: [u8; 3] = [255, 0, 0];
    const B: [u8; 3] = [0, 0, 255];

    fn checkerboard_exemplar() -> Exemplar {
        let rows: Vec<Vec<[u8; 3]>> = (0..4)
            .map(|y| (0..4).map(|x| if (x + y) % 2 == 0 { R } else { B }).collect())
            .collect();
        Exemplar::from_rows(&rows).unwrap()
    }

    #[derive(Default)]
    struct CountingSink {
        rounds: usize,
        resets: usize,
        last_collapsed: usize,
    }

    impl FrameSink for CountingSink {
        fn on_round(&mut self, snapshot: &WaveSnapshot) -> wavetile::Result<()> {
            self.rounds += 1;
            self.last_collapsed = snapshot.collapsed_count();
            Ok(())
        }

        fn on_reset(&mut self) -> wavetile::Result<()> {
            self.resets += 1;
            Ok(())
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::new(10, 10).validate().is_ok());
        assert!(matches!(
            SolverConfig::new(0, 10).validate(),
            Err(SynthesisError::InvalidInput { .. })
        ));
        assert!(matches!(
            SolverConfig::new(10, 20_000).validate(),
            Err(SynthesisError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
    }

    #[test]
    fn test_config_dimensions() {
        let config = SolverConfig {
            periodic_output: true,
            ..SolverConfig::new(5, 3)
        };
        let dims = config.dimensions();
        assert_eq!((dims.width, dims.height, dims.periodic), (5, 3, true));
    }

    #[test]
    fn test_mismatched_table_is_rejected() {
        let small =
            PatternCatalogue::extract(&checkerboard_exemplar(), ExtractionConfig::new(1)).unwrap();
        let three_colors = Exemplar::from_rows(&[vec![R, B, [0, 255, 0]]]).unwrap();
        let large = PatternCatalogue::extract(&three_colors, ExtractionConfig::new(1)).unwrap();
        let table = CompatibilityTable::build(&small);
        assert_ne!(small.len(), large.len());
        assert!(Solver::new(large, table, SolverConfig::new(4, 4), 0).is_err());
    }

    // Tests a checkerboard exemplar reproduces a checkerboard
    // Verified by rendering the bottom-right pixel of each pattern
    #[test]
    fn test_solve_checkerboard() {
        let mut solver = Solver::from_exemplar(
            &checkerboard_exemplar(),
            ExtractionConfig::new(2),
            SolverConfig::new(6, 5),
            42,
        )
        .unwrap();
        let report = solver.solve(&mut NullSink).unwrap();

        assert_eq!(report.output.dim(), (5, 6));
        assert_eq!(report.restarts, 0);
        // One observation decides the whole grid
        assert_eq!(report.rounds, 1);
        let first = report.output[[0, 0]];
        for ((row, col), &pixel) in report.output.indexed_iter() {
            if (row + col) % 2 == 0 {
                assert_eq!(pixel, first);
            } else {
                assert_ne!(pixel, first);
            }
        }
        assert_eq!(solver.phase(), Phase::Terminal(Terminal::Success));
    }

    #[test]
    fn test_complete_is_sticky() {
        let mut solver = Solver::from_exemplar(
            &checkerboard_exemplar(),
            ExtractionConfig::new(2),
            SolverConfig::new(3, 3),
            1,
        )
        .unwrap();
        solver.solve(&mut NullSink).unwrap();
        assert_eq!(solver.run_round(&mut NullSink).unwrap(), RoundOutcome::Complete);
        assert!(solver.render().is_some());
    }

    #[test]
    fn test_render_is_none_until_solved() {
        let solver = Solver::from_exemplar(
            &checkerboard_exemplar(),
            ExtractionConfig::new(2),
            SolverConfig::new(3, 3),
            1,
        )
        .unwrap();
        assert!(solver.render().is_none());
        assert_eq!(solver.phase(), Phase::Observing);
    }

    // Tests sinks see every successful round and every reset
    #[test]
    fn test_sink_notifications() {
        let mut solver = Solver::from_exemplar(
            &checkerboard_exemplar(),
            ExtractionConfig::new(1),
            SolverConfig::new(3, 2),
            5,
        )
        .unwrap();
        let mut sink = CountingSink::default();
        let report = solver.solve(&mut sink).unwrap();
        assert_eq!(sink.rounds, report.rounds);
        assert_eq!(sink.resets, 0);
        assert_eq!(sink.last_collapsed, 6);
    }

    // Tests an always-contradicting setup stops at the restart cap
    // Verified by counting restarts after the cap check
    #[test]
    fn test_restart_cap() {
        let config = SolverConfig {
            periodic_output: true,
            max_restarts: Some(2),
            ..SolverConfig::new(3, 3)
        };
        let mut solver =
            Solver::from_exemplar(&checkerboard_exemplar(), ExtractionConfig::new(2), config, 0)
                .unwrap();
        let mut sink = CountingSink::default();

        assert!(matches!(
            solver.run_round(&mut sink).unwrap(),
            RoundOutcome::Reset { .. }
        ));
        assert!(matches!(
            solver.run_round(&mut sink).unwrap(),
            RoundOutcome::Reset { .. }
        ));
        let error = solver.run_round(&mut sink).unwrap_err();
        assert!(matches!(error, SynthesisError::Contradiction { restarts: 2, .. }));
        assert_eq!(sink.resets, 2);
        assert_eq!(sink.rounds, 0);
        assert_eq!(solver.restarts(), 2);
    }

    // Tests the observer sees every round short of completion
    // Verified by also reporting the final Complete outcome
    #[test]
    fn test_solve_observed_reports_each_round() {
        let mut solver = Solver::from_exemplar(
            &checkerboard_exemplar(),
            ExtractionConfig::new(1),
            SolverConfig::new(3, 2),
            5,
        )
        .unwrap();
        let mut seen = Vec::new();
        let report = solver
            .solve_observed(&mut NullSink, |current, outcome| {
                seen.push((outcome, current.rounds()));
            })
            .unwrap();
        assert_eq!(seen.len(), report.rounds);
        for (index, (outcome, rounds)) in seen.iter().enumerate() {
            assert_eq!(*outcome, RoundOutcome::Continue);
            assert_eq!(*rounds, index + 1);
        }

        let config = SolverConfig {
            periodic_output: true,
            max_restarts: Some(2),
            ..SolverConfig::new(3, 3)
        };
        let mut failing =
            Solver::from_exemplar(&checkerboard_exemplar(), ExtractionConfig::new(2), config, 0)
                .unwrap();
        let mut resets = 0;
        let result = failing.solve_observed(&mut NullSink, |_, outcome| {
            if matches!(outcome, RoundOutcome::Reset { .. }) {
                resets += 1;
            }
        });
        assert!(matches!(result, Err(SynthesisError::Contradiction { restarts: 2, .. })));
        assert_eq!(resets, 2);
    }

    #[test]
    fn test_zero_restart_cap_fails_on_first_contradiction() {
        let config = SolverConfig {
            periodic_output: true,
            max_restarts: Some(0),
            ..SolverConfig::new(5, 5)
        };
        let mut solver =
            Solver::from_exemplar(&checkerboard_exemplar(), ExtractionConfig::new(2), config, 0)
                .unwrap();
        assert!(matches!(
            solver.solve(&mut NullSink),
            Err(SynthesisError::Contradiction { restarts: 0, .. })
        ));
    }

    #[test]
    fn test_same_seed_same_output() {
        let exemplar = Exemplar::from_rows(&[
            vec![R, R, B, R],
            vec![B, R, B, B],
            vec![R, B, R, R],
            vec![B, B, R, B],
        ])
        .unwrap();
        let run = |seed| {
            let mut solver = Solver::from_exemplar(
                &exemplar,
                ExtractionConfig::new(2),
                SolverConfig::new(8, 8),
                seed,
            )
            .unwrap();
            solver.solve(&mut NullSink).unwrap().output
        };
        assert_eq!(run(17), run(17));
    }

    #[test]
    fn test_oversized_tile_is_rejected() {
        let result = Solver::from_exemplar(
            &checkerboard_exemplar(),
            ExtractionConfig::new(5),
            SolverConfig::new(4, 4),
            0,
        );
        assert!(matches!(result, Err(SynthesisError::InvalidInput { .. })));
    }
}
