//! Replays a scripted session twice and demands identical traces.
//!
//! The loop mirrors the production adapter: tick the world, feed the event
//! batch to the spawning system, then apply the emitted commands before the
//! next tick. With a fixed seed the entire session must be reproducible.

use skyhop_core::{Command, Event, InputFrame, MAX_PLATFORMS};
use skyhop_system_spawning::{BoardView, Config, Spawning};
use skyhop_world::{apply, query, World};

const SEED: u64 = 0xD1CE;
const TICKS: usize = 900;

fn board_view(world: &World) -> BoardView {
    let platforms = query::platforms(world);
    BoardView {
        viewport: query::viewport(world),
        lane: query::lane(world),
        score: query::score(world),
        platform_count: platforms.len(),
        topmost_platform_y: platforms.topmost_y(),
        enemy_alive: query::enemy_alive(world),
    }
}

fn scripted_input(tick: usize) -> InputFrame {
    InputFrame {
        move_left: tick % 7 == 0,
        move_right: tick % 11 == 0,
    }
}

fn run_session(seed: u64) -> (Vec<Event>, Vec<String>) {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(seed));
    let mut trace = Vec::new();

    let mut events = Vec::new();
    apply(&mut world, Command::StartGame, &mut events);
    let mut commands = Vec::new();
    spawning.handle(&events, board_view(&world), &mut commands);
    for command in commands.drain(..) {
        apply(&mut world, command, &mut events);
    }
    trace.extend(events.iter().copied());

    for tick in 0..TICKS {
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                input: scripted_input(tick),
            },
            &mut events,
        );
        let mut commands = Vec::new();
        spawning.handle(&events, board_view(&world), &mut commands);
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }
        trace.extend(events);
    }

    let platforms = query::platforms(&world)
        .into_vec()
        .into_iter()
        .map(|snapshot| format!("{snapshot:?}"))
        .collect();
    (trace, platforms)
}

#[test]
fn identical_seeds_replay_identically() {
    let (first_trace, first_platforms) = run_session(SEED);
    let (second_trace, second_platforms) = run_session(SEED);

    assert_eq!(first_trace, second_trace);
    assert_eq!(first_platforms, second_platforms);
    assert!(
        first_trace
            .iter()
            .any(|event| matches!(event, Event::Jumped)),
        "the session should contain at least one bounce"
    );
}

#[test]
fn the_board_stays_at_capacity_throughout_a_session() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(SEED));

    let mut events = Vec::new();
    apply(&mut world, Command::StartGame, &mut events);
    let mut commands = Vec::new();
    spawning.handle(&events, board_view(&world), &mut commands);
    for command in commands.drain(..) {
        apply(&mut world, command, &mut events);
    }

    for tick in 0..TICKS {
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                input: scripted_input(tick),
            },
            &mut events,
        );
        let mut commands = Vec::new();
        spawning.handle(&events, board_view(&world), &mut commands);
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }

        let population = query::platforms(&world).len();
        assert!(population <= MAX_PLATFORMS);
        if query::phase(&world) == skyhop_core::GamePhase::Playing {
            assert_eq!(population, MAX_PLATFORMS, "tick {tick}");
        }
    }
}
