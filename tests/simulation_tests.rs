use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_dashboard::common::DomainError;
use swarm_dashboard::domains::agent::{INITIAL_BATTERY, INITIAL_TEMPERATURE};
use swarm_dashboard::domains::grid::{GridCoord, DEFAULT_OBSTACLE_PROBABILITY};
use swarm_dashboard::domains::messages::InboundMessage;
use swarm_dashboard::domains::simulation::*;
use swarm_dashboard::domains::telemetry::BLOCK_HISTORY;

fn controller(grid_size: usize) -> SimulationController {
    let settings = SimulationSettings { grid_size, ..SimulationSettings::default() };
    SimulationController::new(settings, StdRng::seed_from_u64(42))
}

fn run_to_end(c: &mut SimulationController) -> usize {
    let mut ticks = 0;
    while c.is_running() {
        c.tick();
        ticks += 1;
        assert!(ticks < 1000, "simulation never completed");
    }
    ticks
}

#[test]
fn test_new_controller_is_idle_with_parked_agents() {
    let c = controller(10);

    assert_eq!(c.state(), SimulationState::Idle);
    assert_eq!(c.grid().size(), 10);
    assert_eq!(c.agents().len(), 3);
    assert!(c.agents().iter().all(|a| a.position == GridCoord::ORIGIN && a.battery == INITIAL_BATTERY));
    assert_eq!(c.agents().iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(c.grid().occupied_count(), 1);
}

#[test]
fn test_settings_are_clamped() {
    let settings = SimulationSettings {
        grid_size: 100,
        agent_count: 0,
        obstacle_probability: 0.2,
        connection_radius: 3.3,
    };
    let c = SimulationController::new(settings, StdRng::seed_from_u64(1));

    assert_eq!(c.settings().grid_size, MAX_GRID_SIZE);
    assert_eq!(c.settings().agent_count, MIN_AGENT_COUNT);
    assert_eq!(c.settings().connection_radius, 3.5);
}

#[test]
fn test_load_paths_sets_agent_count() {
    let mut c = controller(10);
    let event = c.load_paths("0,0 1,1 2,2\n3,3 4,4\n5,5\n6,6\n7,7").unwrap();

    match event {
        SimulationEvent::PathsLoaded { agent_count, run_id, .. } => {
            assert_eq!(agent_count, 5);
            assert_eq!(run_id, c.run_id());
        }
        other => panic!("Expected PathsLoaded event, got {:?}", other),
    }
    assert_eq!(c.agents().len(), 5);
    assert_eq!(c.paths().len(), 5);
    assert_eq!(c.cursor(), 0);
}

#[test]
fn test_failed_parse_leaves_state_unchanged() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1").unwrap();
    let before = c.snapshot();

    let err = c.load_paths("0,0 99,99").unwrap_err();
    assert!(matches!(err, DomainError::PathParse(_)));
    assert_eq!(c.snapshot(), before);
}

#[test]
fn test_start_requires_paths() {
    let mut c = controller(10);
    let err = c.start().unwrap_err();
    assert!(matches!(err, DomainError::InvalidCommand { .. }));
    assert!(!c.is_running());
}

#[test]
fn test_start_twice_is_noop() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1").unwrap();

    assert!(matches!(c.start(), Ok(Some(SimulationEvent::SimulationStarted { .. }))));
    assert!(matches!(c.start(), Ok(None)));
}

#[test]
fn test_tick_moves_agents_and_marks_visited() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1 2,2\n3,3 4,4 5,5").unwrap();
    c.start().unwrap();

    let events = c.tick();
    assert!(matches!(events[0], SimulationEvent::StepAdvanced { cursor: 1, moved_agents: 2, .. }));
    assert_eq!(c.agent(1).unwrap().position, GridCoord::new(0, 0));
    assert_eq!(c.agent(2).unwrap().position, GridCoord::new(3, 3));

    c.tick();
    assert_eq!(c.agent(1).unwrap().position, GridCoord::new(1, 1));
    assert_eq!(c.agent(2).unwrap().position, GridCoord::new(4, 4));
    assert_eq!(c.visited_cells().len(), 4);
    assert!(c.grid().cell(GridCoord::new(4, 4)).unwrap().has_agent);
    assert_eq!(c.grid().occupied_count(), 2);
}

#[test]
fn test_tick_while_idle_does_nothing() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1").unwrap();

    assert!(c.tick().is_empty());
    assert_eq!(c.cursor(), 0);
    assert!(c.visited_cells().is_empty());
}

#[test]
fn test_battery_decreases_by_one_per_move() {
    let mut c = controller(10);
    c.load_paths("0,0 1,0 2,0 3,0 4,0 5,0").unwrap();
    c.start().unwrap();

    let mut last = c.agent(1).unwrap().battery;
    while c.is_running() {
        c.tick();
        let now = c.agent(1).unwrap().battery;
        assert_eq!(now, last - 1);
        last = now;
    }
    assert_eq!(last, INITIAL_BATTERY - 6);
}

#[test]
fn test_simulation_completes_after_first_path() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1 2,2\n3,3 4,4 5,5 6,6 7,7").unwrap();
    c.start().unwrap();

    c.tick();
    c.tick();
    let events = c.tick();

    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], SimulationEvent::SimulationCompleted { steps: 3, .. }));
    assert!(!c.is_running());
    assert_eq!(c.cursor(), 3);
    assert_eq!(c.agent(2).unwrap().position, GridCoord::new(5, 5));

    let err = c.start().unwrap_err();
    assert!(matches!(err, DomainError::InvalidCommand { .. }));
}

#[test]
fn test_shorter_paths_leave_agents_parked() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1 2,2 3,3\n5,5").unwrap();
    c.start().unwrap();
    run_to_end(&mut c);

    assert_eq!(c.agent(1).unwrap().position, GridCoord::new(3, 3));
    assert_eq!(c.agent(2).unwrap().position, GridCoord::new(5, 5));
    assert_eq!(c.agent(2).unwrap().battery, INITIAL_BATTERY - 1);
}

#[test]
fn test_pause_and_resume() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1 2,2 3,3").unwrap();
    c.start().unwrap();
    c.tick();

    assert!(matches!(c.pause(), Some(SimulationEvent::SimulationPaused { cursor: 1, .. })));
    assert!(c.pause().is_none());
    assert!(c.tick().is_empty());

    c.start().unwrap();
    assert_eq!(run_to_end(&mut c), 3);
}

#[test]
fn test_telemetry_is_replaced_each_tick() {
    let mut c = controller(10);
    c.load_paths("0,0 1,0 2,0 3,0 4,0 5,0 6,0 7,0\n1,1 2,2 3,3 4,4 5,5 6,6 7,7 8,8").unwrap();
    c.start().unwrap();
    assert_eq!(c.telemetry().data_points(1), 0);

    for _ in 0..5 {
        c.tick();
        for id in [1, 2] {
            assert!((1..=10).contains(&c.telemetry().data_points(id)));
        }
        assert_eq!(c.telemetry().all_data_points().len(), 2);
    }

    run_to_end(&mut c);
    assert_eq!(c.telemetry().blocks().count(), BLOCK_HISTORY);
    assert!(c.telemetry().blocks().all(|b| b.gas_price >= 30 && b.gas_price < 40));
}

#[test]
fn test_reset_clears_run() {
    let mut c = controller(10);
    c.load_paths("0,0 1,1 2,2\n3,3 4,4 5,5").unwrap();
    c.start().unwrap();
    c.tick();
    c.select_agent(2).unwrap();
    let old_run = c.run_id();

    assert!(matches!(c.reset(), SimulationEvent::SimulationReset { agent_count: 2, .. }));
    let snapshot = c.snapshot();
    assert!(!snapshot.is_running());
    assert_eq!(snapshot.cursor, 0);
    assert!(snapshot.paths.is_empty());
    assert!(snapshot.visited_cells.is_empty());
    assert!(snapshot.telemetry.latest_block().is_none());
    assert_eq!(snapshot.selected_agent, None);
    assert!(snapshot.agents.iter().all(|a| a.position == GridCoord::ORIGIN && a.battery == INITIAL_BATTERY));
    assert!(snapshot.agents.iter().all(|a| a.temperature == INITIAL_TEMPERATURE));
    assert_ne!(snapshot.run_id, old_run);
}

#[test]
fn test_shrinking_grid_skips_out_of_bounds_steps() {
    let mut c = controller(10);
    c.load_paths("0,0 8,8 1,1").unwrap();
    assert_eq!(c.set_grid_size(5), 5);
    assert_eq!(c.paths().len(), 1);
    c.start().unwrap();

    c.tick();
    let events = c.tick();
    assert!(matches!(events[0], SimulationEvent::StepAdvanced { cursor: 2, moved_agents: 0, .. }));
    assert_eq!(c.agent(1).unwrap().position, GridCoord::new(0, 0));

    c.tick();
    assert_eq!(c.agent(1).unwrap().position, GridCoord::new(1, 1));
    assert!(!c.visited_cells().contains(&GridCoord::new(8, 8)));
}

#[test]
fn test_setters_clamp() {
    let mut c = controller(10);

    assert_eq!(c.set_grid_size(2), MIN_GRID_SIZE);
    assert_eq!(c.set_agent_count(50), MAX_AGENT_COUNT);
    assert_eq!(c.agents().len(), MAX_AGENT_COUNT);
    assert_eq!(c.set_connection_radius(0.2), MIN_CONNECTION_RADIUS);
    assert_eq!(c.set_connection_radius(4.74), 4.5);
    assert_eq!(c.set_connection_radius(42.0), MAX_CONNECTION_RADIUS);
}

#[test]
fn test_select_unknown_agent() {
    let mut c = controller(10);
    let err = c.select_agent(9).unwrap_err();
    assert!(matches!(err, DomainError::AgentNotFound { id: 9 }));
    assert_eq!(c.select_agent(3).unwrap().id, 3);
    assert_eq!(c.snapshot().selected_agent, Some(3));
}

#[test]
fn test_battery_never_drops_below_zero() {
    let mut c = controller(10);
    c.load_paths("0,0 1,0 2,0").unwrap();
    let drained = InboundMessage::decode(r#"{"type":"agentUpdate","agentId":1,"update":{"battery":1}}"#).unwrap();
    assert!(c.apply_message(drained).is_applied());
    c.start().unwrap();

    let mut last = c.agent(1).unwrap().battery;
    assert_eq!(last, 1);
    while c.is_running() {
        c.tick();
        let now = c.agent(1).unwrap().battery;
        assert!(now <= last);
        last = now;
    }
    assert_eq!(last, 0);
    assert_eq!(c.agent(1).unwrap().position, GridCoord::new(2, 0));
}

#[test]
fn test_non_finite_settings_fall_back_to_defaults() {
    let settings = SimulationSettings {
        grid_size: 8,
        agent_count: 2,
        obstacle_probability: f64::NAN,
        connection_radius: f64::INFINITY,
    };
    let mut c = SimulationController::new(settings, StdRng::seed_from_u64(5));

    assert_eq!(c.settings().obstacle_probability, DEFAULT_OBSTACLE_PROBABILITY);
    assert_eq!(c.settings().connection_radius, DEFAULT_CONNECTION_RADIUS);
    assert_eq!(c.grid().size(), 8);
    assert_eq!(c.set_connection_radius(f64::NAN), DEFAULT_CONNECTION_RADIUS);
    c.reset();
    assert_eq!(c.grid().size(), 8);
}

#[test]
fn test_grid_update_keeps_configured_size_for_reset() {
    let mut c = controller(10);
    let cell = r#"{"hasObstacle":false,"hasAgent":false}"#;
    let raw = format!(r#"{{"type":"gridUpdate","grid":[[{0},{0}],[{0},{0}]]}}"#, cell);
    assert!(c.apply_message(InboundMessage::decode(&raw).unwrap()).is_applied());

    assert_eq!(c.grid().size(), 2);
    assert_eq!(c.settings().grid_size, 10);

    c.reset();
    assert_eq!(c.grid().size(), 10);
}

#[test]
fn test_remaining_steps_follow_the_first_path() {
    let mut c = controller(10);
    assert_eq!(c.snapshot().remaining_steps(), 0);

    c.load_paths("0,0 1,1 2,2\n3,3").unwrap();
    assert_eq!(c.snapshot().remaining_steps(), 3);
    c.start().unwrap();
    c.tick();
    assert_eq!(c.snapshot().remaining_steps(), 2);
    run_to_end(&mut c);
    assert_eq!(c.snapshot().remaining_steps(), 0);
}
