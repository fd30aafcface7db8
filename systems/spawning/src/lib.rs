#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that keeps the platform population topped up
//! and introduces the adversary once the score warrants it.
//!
//! The system owns a seeded [`ChaCha8Rng`], so identical seeds and identical
//! event streams always produce identical spawn command batches.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyhop_core::{
    Command, EnemyOrigin, Event, GamePhase, HorizontalDirection, Lane, PlatformMotion, Score,
    Viewport, MAX_PLATFORMS,
};

const MIN_PLATFORM_WIDTH: u32 = 60;
const MAX_PLATFORM_WIDTH: u32 = 100;
const MIN_VERTICAL_GAP: u32 = 80;
const MAX_VERTICAL_GAP: u32 = 120;

/// Score a life must exceed before moving platforms appear.
const MOVING_PLATFORM_GATE: Score = Score::new(500);

/// Score a life must exceed before the adversary enters the scene.
const ENEMY_GATE: Score = Score::new(1_700);

const ENEMY_SPEED: f32 = 2.0;

/// Largest initial flip-counter phase handed to a moving platform.
const MAX_MOTION_PHASE: u32 = 40;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided RNG seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Immutable world observations the spawn policy decides from.
#[derive(Clone, Copy, Debug)]
pub struct BoardView {
    /// Fixed viewport the world simulates within.
    pub viewport: Viewport,
    /// Horizontal lane platforms must stay within.
    pub lane: Lane,
    /// Score of the current life.
    pub score: Score,
    /// Number of currently live platforms.
    pub platform_count: usize,
    /// Top edge of the highest live platform, if any platform is alive.
    pub topmost_platform_y: Option<f32>,
    /// Whether the adversary is already in the scene.
    pub enemy_alive: bool,
}

/// Pure system that deterministically emits spawn commands while playing.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and an immutable view to emit spawn commands.
    ///
    /// Spawning only reacts to completed ticks and to the transition into the
    /// playing phase; every other event batch leaves the RNG untouched so
    /// replays stay aligned.
    pub fn handle(&mut self, events: &[Event], view: BoardView, out: &mut Vec<Command>) {
        let triggered = events.iter().any(|event| {
            matches!(
                event,
                Event::TickCompleted { .. }
                    | Event::PhaseChanged {
                        phase: GamePhase::Playing
                    }
            )
        });
        if !triggered {
            return;
        }

        self.top_up_platforms(view, out);
        self.consider_enemy(view, out);
    }

    /// Emits spawn requests until the live set plus this batch reaches the
    /// population cap, chaining each new platform above the previous one.
    fn top_up_platforms(&mut self, view: BoardView, out: &mut Vec<Command>) {
        let mut anchor = view
            .topmost_platform_y
            .unwrap_or_else(|| view.viewport.height());

        for _ in view.platform_count..MAX_PLATFORMS {
            let width = self
                .rng
                .gen_range(MIN_PLATFORM_WIDTH..=MAX_PLATFORM_WIDTH) as f32;
            let max_x = (view.lane.right() - width) as u32;
            let x = self.rng.gen_range(view.lane.left() as u32..=max_x) as f32;
            let gap = self.rng.gen_range(MIN_VERTICAL_GAP..=MAX_VERTICAL_GAP) as f32;
            let y = anchor - gap;
            let motion = self.roll_motion(view.score);

            out.push(Command::SpawnPlatform {
                x,
                y,
                width,
                motion,
            });
            anchor = y;
        }
    }

    fn roll_motion(&mut self, score: Score) -> Option<PlatformMotion> {
        if score <= MOVING_PLATFORM_GATE || !self.rng.gen_bool(0.5) {
            return None;
        }

        let direction = if self.rng.gen_bool(0.5) {
            HorizontalDirection::Left
        } else {
            HorizontalDirection::Right
        };
        Some(PlatformMotion {
            direction,
            speed: self.rng.gen_range(1..=2) as f32,
            phase: self.rng.gen_range(0..=MAX_MOTION_PHASE),
        })
    }

    fn consider_enemy(&mut self, view: BoardView, out: &mut Vec<Command>) {
        if view.enemy_alive || view.score <= ENEMY_GATE {
            return;
        }

        let origin = if self.rng.gen_bool(0.5) {
            EnemyOrigin::LeftEdge
        } else {
            EnemyOrigin::RightEdge
        };
        out.push(Command::SpawnEnemy {
            origin,
            speed: ENEMY_SPEED,
        });
    }
}
