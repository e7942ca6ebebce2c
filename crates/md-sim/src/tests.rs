//! Integration tests for md-sim.

use std::collections::HashSet;

use md_core::{Coord, DwellerId, EventLog, Layout, MOVE_BUDGET, MoveEvent, MoveTarget};
use md_grid::{GatedCoordinator, LockCoordinator, LockStrategy, OrderedCoordinator};

use crate::{Mall, NoopObserver, validate_replay};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(row: usize, col: usize) -> Coord {
    Coord::new(row, col)
}

fn layout(text: &str) -> Layout {
    Layout::parse(text).expect("valid layout")
}

fn run_with(strategy: LockStrategy, l: &Layout) -> EventLog {
    Mall::new(*l, strategy.coordinator())
        .run(&mut NoopObserver)
        .expect("simulation succeeds")
}

/// The starting layouts exercised by the original assignment's replay test.
fn replay_layouts() -> Vec<Layout> {
    [
        "----\n----\n--X-\n----",
        "X-X-\n----\nX-X-\n----",
        "X-X-\n-X--\nX-X-\n----",
        "XXX-\nX-X-\nXXX-\n----",
        "----\nXXXX\n-XX-\n----",
        "XXXX\nXXXX\nXXXX\nXXXX",
        "X-X-\n-X-X\nX-X-\n-X-X",
        "XXXX\n----\nXXXX\n----",
        "XXXX\nXXXX\n----\n----",
        "XXX-\nX---\nXXX-\nXXX-",
        "XXX-\nX-X-\nX-X-\nXXX-",
        "X---\nX---\nX---\nXXX-",
        "-X--\nX-X-\nXXX-\nX-X-",
        "X-X-\nXXX-\nX-X-\nX-X-",
        "XXX-\nX---\nXXX-\nXXX-",
        "X---\nX---\n----\nX---",
        "----\n----\n----\n----",
    ]
    .iter()
    .map(|t| layout(t))
    .collect()
}

// ── Testable properties, both coordinators ────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn full_occupancy_everyone_stuck_immediately() {
        for strategy in LockStrategy::ALL {
            let log = run_with(strategy, &Layout::full());
            assert_eq!(log.len(), 16, "{strategy}: one event per dweller");

            let got: HashSet<(Coord, MoveTarget)> = log.iter().map(MoveEvent::pair).collect();
            let want: HashSet<(Coord, MoveTarget)> =
                Coord::all().map(|p| (p, MoveTarget::Stuck)).collect();
            assert_eq!(got, want, "{strategy}");
        }
    }

    #[test]
    fn empty_mall_has_no_ghosts() {
        for strategy in LockStrategy::ALL {
            assert!(run_with(strategy, &Layout::empty()).is_empty());
        }
    }

    #[test]
    fn single_dweller_cycles_up_left() {
        for strategy in LockStrategy::ALL {
            let log = run_with(strategy, &Layout::with_occupied([c(3, 3)]));
            assert_eq!(log.len(), MOVE_BUDGET as usize + 1);

            // (3,3) → (2,2) → (1,1) → (0,0) → (3,3) → …
            for (j, event) in log.iter().take(MOVE_BUDGET as usize).enumerate() {
                let i = 103 - j;
                let from = c(i % 4, i % 4);
                let to = c((i - 1) % 4, (i - 1) % 4);
                assert_eq!(event.pair(), (from, MoveTarget::Cell(to)), "{strategy}: move {j}");
            }
            assert_eq!(log.events()[100].pair(), (c(3, 3), MoveTarget::EndOfTurns));
        }
    }

    #[test]
    fn non_interacting_column_all_exhaust() {
        let column = layout("---X\n---X\n---X\n---X");
        for strategy in LockStrategy::ALL {
            let log = run_with(strategy, &column);
            assert_eq!(log.len(), 4 * (MOVE_BUDGET as usize + 1), "{strategy}");

            for event in &log {
                match event.to {
                    MoveTarget::EndOfTurns => assert_eq!(event.from.col, 3, "{strategy}"),
                    MoveTarget::Cell(to) => assert_eq!(event.from, to.offset(1, 1), "{strategy}"),
                    MoveTarget::Stuck => panic!("{strategy}: nobody should get stuck"),
                }
            }
            for s in log.summaries() {
                assert_eq!(s.moves, MOVE_BUDGET);
            }
        }
    }

    #[test]
    fn every_log_replays_cleanly() {
        for strategy in LockStrategy::ALL {
            for (i, l) in replay_layouts().iter().enumerate() {
                // Repeat to give different interleavings a chance to show up.
                for _ in 0..5 {
                    let log = run_with(strategy, l);
                    if let Err(e) = validate_replay(l, &log) {
                        panic!("{strategy}, layout {i}:\n{l}\n{e}");
                    }
                }
            }
        }
    }

    #[test]
    fn random_layouts_replay_cleanly() {
        for seed in 0..40u64 {
            let l = Layout::random(seed, 0.5);
            let log = run_with(LockStrategy::Ordered, &l);
            if let Err(e) = validate_replay(&l, &log) {
                panic!("seed {seed}:\n{l}\n{e}");
            }
        }
    }

    #[test]
    fn move_budget_bound_and_single_terminal() {
        for strategy in LockStrategy::ALL {
            for l in replay_layouts() {
                let log = run_with(strategy, &l);
                for id in 0..l.occupied_count() {
                    let events = log.events_for(DwellerId(id as u32));
                    assert!(!events.is_empty());
                    assert!(events.len() <= MOVE_BUDGET as usize + 1);

                    let terminals: Vec<_> = events.iter().filter(|e| e.to.is_terminal()).collect();
                    assert_eq!(terminals.len(), 1, "exactly one terminal event");
                    assert!(events.last().is_some_and(|e| e.to.is_terminal()), "terminal comes last");

                    if events.last().is_some_and(|e| e.to == MoveTarget::EndOfTurns) {
                        assert_eq!(events.len(), MOVE_BUDGET as usize + 1);
                    }
                }
            }
        }
    }
}

// ── Dweller state machine ─────────────────────────────────────────────────────

#[cfg(test)]
mod dweller {
    use std::sync::mpsc;

    use md_grid::Grid;

    use super::*;
    use crate::{Dweller, DwellerState, SimError};

    #[test]
    fn attempt_takes_first_free_candidate() {
        // (0,0) blocked, so (1,1) should move to (2,2).
        let l = Layout::with_occupied([c(1, 1), c(0, 0)]);
        let grid = Grid::from_layout(&l);
        let (tx, rx) = mpsc::channel();

        let mut d = Dweller::new(DwellerId(0), c(1, 1));
        let state = d.attempt(&grid, &GatedCoordinator::new(), &tx).unwrap();

        assert_eq!(state, DwellerState::Active);
        assert_eq!(d.position(), c(2, 2));
        assert_eq!(d.moves_completed(), 1);
        assert_eq!(rx.try_recv().unwrap(), MoveEvent::moved(DwellerId(0), c(1, 1), c(2, 2)));
        assert_eq!(grid.snapshot().unwrap(), Layout::with_occupied([c(2, 2), c(0, 0)]));
    }

    #[test]
    fn attempt_prefers_down_left_over_up_right() {
        // First two candidates blocked; (2,0) outranks (0,2).
        let l = Layout::with_occupied([c(1, 1), c(0, 0), c(2, 2)]);
        let grid = Grid::from_layout(&l);
        let (tx, rx) = mpsc::channel();

        let mut d = Dweller::new(DwellerId(1), c(1, 1));
        d.attempt(&grid, &OrderedCoordinator, &tx).unwrap();

        assert_eq!(d.position(), c(2, 0));
        assert_eq!(rx.try_recv().unwrap(), MoveEvent::moved(DwellerId(1), c(1, 1), c(2, 0)));
    }

    #[test]
    fn surrounded_dweller_gets_stuck() {
        let l = Layout::with_occupied([c(1, 1), c(0, 0), c(2, 2), c(0, 2), c(2, 0)]);
        let grid = Grid::from_layout(&l);
        let (tx, rx) = mpsc::channel();

        let mut d = Dweller::new(DwellerId(3), c(1, 1));
        let state = d.attempt(&grid, &OrderedCoordinator, &tx).unwrap();

        assert_eq!(state, DwellerState::Stuck);
        assert_eq!(rx.try_recv().unwrap(), MoveEvent::stuck(DwellerId(3), c(1, 1)));

        // Terminal dwellers do nothing further.
        assert_eq!(d.attempt(&grid, &OrderedCoordinator, &tx).unwrap(), DwellerState::Stuck);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn run_exhausts_budget() {
        let l = Layout::with_occupied([c(0, 1)]);
        let grid = Grid::from_layout(&l);
        let (tx, rx) = mpsc::channel();

        let d = Dweller::new(DwellerId(0), c(0, 1)).run(&grid, &GatedCoordinator::new(), &tx).unwrap();
        drop(tx);

        assert_eq!(d.state(), DwellerState::Exhausted);
        assert_eq!(d.moves_completed(), MOVE_BUDGET);
        // 100 moves along (-1,-1) is 25 full laps.
        assert_eq!(d.position(), c(0, 1));

        let events: Vec<MoveEvent> = rx.iter().collect();
        assert_eq!(events.len(), 101);
        assert_eq!(events[100], MoveEvent::end_of_turns(DwellerId(0), c(0, 1)));
    }

    #[test]
    fn closed_collector_is_an_error() {
        let l = Layout::with_occupied([c(0, 1)]);
        let grid = Grid::from_layout(&l);
        let (tx, rx) = mpsc::channel();
        drop(rx);

        let err = Dweller::new(DwellerId(4), c(0, 1))
            .run(&grid, &GatedCoordinator::new(), &tx)
            .unwrap_err();
        assert!(matches!(err, SimError::CollectorClosed(DwellerId(4))));
    }

    #[test]
    fn grid_out_of_sync_is_fatal() {
        // The dweller believes it stands on (1,1) but the grid says otherwise.
        let grid = Grid::from_layout(&Layout::empty());
        let (tx, _rx) = mpsc::channel();

        let err = Dweller::new(DwellerId(0), c(1, 1))
            .attempt(&grid, &GatedCoordinator::new(), &tx)
            .unwrap_err();
        assert!(matches!(err, SimError::Grid(md_grid::GridError::InvalidMove { .. })));
    }
}

// ── Replay validator ──────────────────────────────────────────────────────────

#[cfg(test)]
mod replay {
    use super::*;
    use crate::{ReplayError, ReplaySummary};

    fn d(i: u32) -> DwellerId {
        DwellerId(i)
    }

    /// A lone dweller at (3,3) doing its full, valid run.
    fn lone_run() -> Vec<MoveEvent> {
        let mut events = Vec::new();
        let mut pos = c(3, 3);
        for _ in 0..MOVE_BUDGET {
            let next = pos.offset(-1, -1);
            events.push(MoveEvent::moved(d(0), pos, next));
            pos = next;
        }
        events.push(MoveEvent::end_of_turns(d(0), pos));
        events
    }

    #[test]
    fn accepts_valid_lone_run() {
        let l = Layout::with_occupied([c(3, 3)]);
        let summary = validate_replay(&l, &EventLog::from(lone_run())).unwrap();
        assert_eq!(
            summary,
            ReplaySummary { dwellers: 1, stuck: 0, exhausted: 1, moves: 100 }
        );
    }

    #[test]
    fn rejects_early_end() {
        let l = Layout::with_occupied([c(3, 3)]);
        let mut events = lone_run();
        events.truncate(50);
        // 50 steps of (-1,-1) from (3,3) land on (1,1).
        events.push(MoveEvent::end_of_turns(d(0), c(1, 1)));
        let err = validate_replay(&l, &EventLog::from(events)).unwrap_err();
        assert!(matches!(err, ReplayError::EarlyEnd { moves: 50, .. }));
    }

    #[test]
    fn rejects_missing_terminal() {
        let l = Layout::with_occupied([c(3, 3)]);
        let mut events = lone_run();
        events.pop();
        let err = validate_replay(&l, &EventLog::from(events)).unwrap_err();
        assert_eq!(err, ReplayError::Unfinished { dweller: d(0) });
    }

    #[test]
    fn rejects_false_stuck() {
        let l = Layout::with_occupied([c(3, 3)]);
        let log = EventLog::from(vec![MoveEvent::stuck(d(0), c(3, 3))]);
        let err = validate_replay(&l, &log).unwrap_err();
        assert_eq!(err, ReplayError::FalseStuck { index: 0, dweller: d(0), free: c(2, 2) });
    }

    #[test]
    fn rejects_move_into_occupied_cell() {
        // (0,0) is dweller 0, (1,1) is dweller 1.
        let l = Layout::with_occupied([c(0, 0), c(1, 1)]);
        let log = EventLog::from(vec![MoveEvent::moved(d(1), c(1, 1), c(0, 0))]);
        let err = validate_replay(&l, &log).unwrap_err();
        assert_eq!(err, ReplayError::Occupied { index: 0, to: c(0, 0) });
    }

    #[test]
    fn rejects_skipped_candidate() {
        let l = Layout::with_occupied([c(1, 1)]);
        let log = EventLog::from(vec![MoveEvent::moved(d(0), c(1, 1), c(2, 2))]);
        let err = validate_replay(&l, &log).unwrap_err();
        assert_eq!(err, ReplayError::SkippedCandidate { index: 0, dweller: d(0), skipped: c(0, 0) });
    }

    #[test]
    fn rejects_non_diagonal_move() {
        let l = Layout::with_occupied([c(1, 1)]);
        let log = EventLog::from(vec![MoveEvent::moved(d(0), c(1, 1), c(1, 2))]);
        let err = validate_replay(&l, &log).unwrap_err();
        assert_eq!(err, ReplayError::NotCandidate { index: 0, from: c(1, 1), to: c(1, 2) });
    }

    #[test]
    fn rejects_ghost_and_impostor() {
        let l = Layout::with_occupied([c(1, 1)]);
        let ghost = EventLog::from(vec![MoveEvent::stuck(d(0), c(2, 2))]);
        assert_eq!(
            validate_replay(&l, &ghost).unwrap_err(),
            ReplayError::NoDweller { index: 0, from: c(2, 2) }
        );

        let impostor = EventLog::from(vec![MoveEvent::moved(d(7), c(1, 1), c(0, 0))]);
        assert!(matches!(
            validate_replay(&l, &impostor).unwrap_err(),
            ReplayError::WrongDweller { claimed: DwellerId(7), actual: DwellerId(0), .. }
        ));
    }

    #[test]
    fn rejects_events_after_stop() {
        let l = Layout::full();
        let mut events: Vec<MoveEvent> = Coord::all()
            .enumerate()
            .map(|(i, p)| MoveEvent::stuck(d(i as u32), p))
            .collect();
        events.push(MoveEvent::stuck(d(0), c(0, 0)));
        let err = validate_replay(&l, &EventLog::from(events)).unwrap_err();
        assert_eq!(err, ReplayError::AlreadyStopped { index: 16, dweller: d(0) });
    }
}

// ── Builder, observer, batch ──────────────────────────────────────────────────

#[cfg(test)]
mod wiring {
    use md_grid::{Grid, GridError, GridResult, LockSet};

    use super::*;
    use crate::{MallBuilder, SimError, SimObserver, play_mall, run_batch};

    #[test]
    fn builder_requires_layout() {
        let result = MallBuilder::new().build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn builder_parse_layout_errors_surface() {
        let result = MallBuilder::new().parse_layout("XX\n--");
        assert!(matches!(result, Err(SimError::Layout(_))));
    }

    #[test]
    fn builder_strategy_and_coordinator() {
        let mall = MallBuilder::new()
            .parse_layout("X---\n----\n----\n----")
            .unwrap()
            .strategy(LockStrategy::Ordered)
            .build()
            .unwrap();
        assert_eq!(mall.coordinator.name(), "ordered");

        let mall = MallBuilder::new()
            .layout(Layout::full())
            .coordinator(OrderedCoordinator)
            .build()
            .unwrap();
        assert_eq!(mall.run(&mut NoopObserver).unwrap().len(), 16);
    }

    #[derive(Default)]
    struct Recorder {
        dwellers: usize,
        seen:     Vec<MoveEvent>,
        ended:    bool,
    }

    impl SimObserver for Recorder {
        fn on_sim_start(&mut self, _layout: &Layout, dwellers: usize) {
            self.dwellers = dwellers;
        }
        fn on_event(&mut self, event: &MoveEvent) {
            self.seen.push(*event);
        }
        fn on_sim_end(&mut self, _log: &EventLog) {
            self.ended = true;
        }
    }

    #[test]
    fn observer_sees_every_event_in_log_order() {
        let l = layout("X-X-\n-X--\nX-X-\n----");
        let mut rec = Recorder::default();
        let log = Mall::new(l, GatedCoordinator::new()).run(&mut rec).unwrap();

        assert_eq!(rec.dwellers, 5);
        assert!(rec.ended);
        assert_eq!(rec.seen.as_slice(), log.events());
    }

    #[test]
    fn mall_can_run_twice() {
        let mall = Mall::new(Layout::with_occupied([c(2, 2)]), OrderedCoordinator);
        let a = mall.run(&mut NoopObserver).unwrap();
        let b = mall.run(&mut NoopObserver).unwrap();
        // A lone dweller is fully deterministic.
        assert_eq!(a, b);
    }

    #[test]
    fn play_mall_matches_spec_entry_point() {
        let log = play_mall(&Layout::empty()).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn batch_runs_in_order() {
        let layouts = vec![Layout::full(), Layout::empty(), Layout::with_occupied([c(0, 0)])];
        let results = run_batch(&layouts, GatedCoordinator::new);
        let lens: Vec<usize> = results.into_iter().map(|r| r.unwrap().len()).collect();
        assert_eq!(lens, vec![16, 0, 101]);
    }

    /// Ordered locking, except the dweller standing on `at` fails (or
    /// panics) on its first acquisition.
    struct FaultAt {
        at:    Coord,
        panic: bool,
    }

    impl LockCoordinator for FaultAt {
        fn acquire<'g>(&self, grid: &'g Grid, cells: &[Coord]) -> GridResult<LockSet<'g>> {
            if cells.first() == Some(&self.at) {
                if self.panic {
                    panic!("lock acquisition blew up");
                }
                return Err(GridError::Poisoned(self.at));
            }
            OrderedCoordinator.acquire(grid, cells)
        }

        fn name(&self) -> &'static str {
            "fault"
        }
    }

    fn column() -> Layout {
        Layout::with_occupied((0..4).map(|row| c(row, 3)))
    }

    fn end_of_turns(rec: &Recorder) -> usize {
        rec.seen.iter().filter(|e| e.to == MoveTarget::EndOfTurns).count()
    }

    #[test]
    fn worker_error_returned_after_others_finish() {
        let mut rec = Recorder::default();
        let mall = Mall::new(column(), FaultAt { at: c(3, 3), panic: false });
        let err = mall.run(&mut rec).unwrap_err();

        assert!(matches!(err, SimError::Grid(GridError::Poisoned(at)) if at == c(3, 3)));
        // The frozen dweller blocks at most one candidate, so the rest exhaust.
        assert_eq!(end_of_turns(&rec), 3);
        assert!(rec.seen.iter().all(|e| e.dweller != DwellerId(3)));
        assert!(!rec.ended);
    }

    #[test]
    fn worker_panic_returned_after_others_finish() {
        let mut rec = Recorder::default();
        let mall = Mall::new(column(), FaultAt { at: c(3, 3), panic: true });
        let err = mall.run(&mut rec).unwrap_err();

        assert!(matches!(err, SimError::WorkerPanicked(DwellerId(3))));
        assert_eq!(end_of_turns(&rec), 3);
        assert!(!rec.ended);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn coordinators_are_shareable() {
        assert_send_sync::<GatedCoordinator>();
        assert_send_sync::<OrderedCoordinator>();
        assert_send_sync::<Box<dyn LockCoordinator>>();
    }
}
