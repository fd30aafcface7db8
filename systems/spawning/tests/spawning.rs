//! Integration tests driving the spawning system against the real world.

use skyhop_core::{Command, Event, GamePhase, InputFrame, Score, MAX_PLATFORMS};
use skyhop_system_spawning::{BoardView, Config, Spawning};
use skyhop_world::{apply, query, World};

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

fn start_game(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::StartGame, &mut events);
    events
}

#[test]
fn fills_the_board_to_capacity_when_play_begins() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(7));
    let events = start_game(&mut world);

    let mut commands = Vec::new();
    spawning.handle(&events, board_view(&world), &mut commands);
    assert_eq!(commands.len(), MAX_PLATFORMS - 1, "starting platform counts");

    let mut events = Vec::new();
    for command in commands {
        apply(&mut world, command, &mut events);
    }
    assert_eq!(query::platforms(&world).len(), MAX_PLATFORMS);

    // A second pass over a full board requests nothing.
    let mut commands = Vec::new();
    spawning.handle(&events, board_view(&world), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn spawned_platforms_respect_lane_and_gap_bounds() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(99));
    let events = start_game(&mut world);

    let view = board_view(&world);
    let mut commands = Vec::new();
    spawning.handle(&events, view, &mut commands);

    let lane = query::lane(&world);
    let mut anchor = view.topmost_platform_y.unwrap();
    for command in &commands {
        match command {
            Command::SpawnPlatform { x, y, width, .. } => {
                assert!((60.0..=100.0).contains(width));
                assert!(*x >= lane.left());
                assert!(*x + *width <= lane.right());
                let gap = anchor - *y;
                assert!((80.0..=120.0).contains(&gap), "gap was {gap}");
                anchor = *y;
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn moving_platforms_only_appear_above_the_score_gate() {
    let mut spawning = Spawning::new(Config::new(3));
    let mut world = World::new();
    let events = start_game(&mut world);
    let mut view = board_view(&world);
    view.score = Score::new(500);

    let mut commands = Vec::new();
    spawning.handle(&events, view, &mut commands);
    for command in &commands {
        assert!(matches!(
            command,
            Command::SpawnPlatform { motion: None, .. }
        ));
    }

    // Above the gate roughly half the platforms patrol. Several batches make
    // at least one moving platform a statistical certainty for a fixed seed.
    view.score = Score::new(501);
    let mut commands = Vec::new();
    for _ in 0..8 {
        view.platform_count = 1;
        spawning.handle(&events, view, &mut commands);
    }
    let moving = commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnPlatform {
                motion: Some(motion),
                ..
            } => Some(*motion),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert!(!moving.is_empty());
    for motion in moving {
        assert!(motion.speed == 1.0 || motion.speed == 2.0);
        assert!(motion.phase <= 40);
    }
}

#[test]
fn enemy_spawns_only_past_the_gate_and_only_once() {
    let mut spawning = Spawning::new(Config::new(11));
    let mut world = World::new();
    let events = start_game(&mut world);

    let mut view = board_view(&world);
    view.platform_count = MAX_PLATFORMS;
    view.score = Score::new(1_700);

    let mut commands = Vec::new();
    spawning.handle(&events, view, &mut commands);
    assert!(commands.is_empty(), "gate is exclusive at 1700");

    view.score = Score::new(1_701);
    let mut commands = Vec::new();
    spawning.handle(&events, view, &mut commands);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], Command::SpawnEnemy { speed, .. } if speed == 2.0));

    view.enemy_alive = true;
    let mut commands = Vec::new();
    spawning.handle(&events, view, &mut commands);
    assert!(commands.is_empty(), "one adversary at a time");
}

#[test]
fn unrelated_events_leave_the_rng_untouched() {
    let mut world = World::new();
    let start_events = start_game(&mut world);
    let view = board_view(&world);

    let mut reference = Spawning::new(Config::new(42));
    let mut reference_commands = Vec::new();
    reference.handle(&start_events, view, &mut reference_commands);

    let mut distracted = Spawning::new(Config::new(42));
    let mut commands = Vec::new();
    distracted.handle(&[Event::Jumped], view, &mut commands);
    assert!(commands.is_empty());
    distracted.handle(
        &[Event::ScoreChanged {
            score: Score::new(17),
        }],
        view,
        &mut commands,
    );
    assert!(commands.is_empty());

    distracted.handle(&start_events, view, &mut commands);
    assert_eq!(commands, reference_commands);
}

#[test]
fn ticks_while_playing_also_trigger_spawning() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::new(5));
    let _ = start_game(&mut world);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::Tick {
            input: InputFrame::default(),
        },
        &mut events,
    );
    assert_eq!(query::phase(&world), GamePhase::Playing);

    let mut commands = Vec::new();
    spawning.handle(&events, board_view(&world), &mut commands);
    assert_eq!(commands.len(), MAX_PLATFORMS - 1);
}
