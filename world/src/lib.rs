#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Sky Hop.
//!
//! The world owns every piece of mutable game state: the player, the live
//! platform set, the optional adversary, score, phase machine, fade counter,
//! and background scroll. Adapters and systems mutate it exclusively through
//! [`apply`] and observe it through the [`query`] module.

mod collision;
mod enemy;
mod platforms;
mod player;

use skyhop_core::{
    Command, DeathCause, Event, GamePhase, InputFrame, Lane, PlatformId, Score, Viewport,
    MAX_PLATFORMS,
};

use enemy::Enemy;
use platforms::Platform;
use player::Player;

const VIEWPORT: Viewport = Viewport::new(1260.0, 720.0);
const LANE: Lane = Lane::new(380.0, 880.0);

/// Screen line near the top of the viewport that pins the ascending player.
const SCROLL_THRESHOLD: f32 = 200.0;

/// Pixels the opaque wipe expands by per tick during the fade.
const FADE_STEP: f32 = 10.0;

/// Vertical period after which the tiled background offset resets.
const BACKGROUND_WRAP: f32 = 750.0;

const BASE_TICK_RATE: f32 = 60.0;

/// Soft difficulty ramp added to the tick rate on every scroll-positive tick.
const TICK_RATE_STEP: f32 = 0.000_01;

const STARTING_PLATFORM_WIDTH: f32 = 100.0;

/// Represents the authoritative Sky Hop world state.
#[derive(Debug)]
pub struct World {
    phase: GamePhase,
    player: Player,
    platforms: Vec<Platform>,
    enemy: Option<Enemy>,
    score: Score,
    high_score: Score,
    fade: f32,
    background_scroll: f32,
    target_tick_rate: f32,
    next_platform_id: u32,
}

impl World {
    /// Creates a new world resting on the title screen.
    #[must_use]
    pub fn new() -> Self {
        Self::with_high_score(Score::ZERO)
    }

    /// Creates a new world seeded with a previously persisted high score.
    #[must_use]
    pub fn with_high_score(high_score: Score) -> Self {
        let mut world = Self {
            phase: GamePhase::Menu { paused: false },
            player: Player::at_center(VIEWPORT.width() / 2.0, VIEWPORT.height() - 150.0),
            platforms: Vec::new(),
            enemy: None,
            score: Score::ZERO,
            high_score,
            fade: 0.0,
            background_scroll: 0.0,
            target_tick_rate: BASE_TICK_RATE,
            next_platform_id: 0,
        };
        world.install_starting_platform();
        world
    }

    fn install_starting_platform(&mut self) {
        let x = VIEWPORT.width() / 2.0 - STARTING_PLATFORM_WIDTH / 2.0;
        let y = VIEWPORT.height() - 50.0;
        let id = self.allocate_platform_id();
        self.platforms
            .push(Platform::new(id, x, y, STARTING_PLATFORM_WIDTH, None));
    }

    fn allocate_platform_id(&mut self) -> PlatformId {
        let id = PlatformId::new(self.next_platform_id);
        self.next_platform_id = self.next_platform_id.wrapping_add(1);
        id
    }

    /// Resets every per-life value while preserving the high score and the
    /// monotonic tick-rate ramp.
    fn reset_for_new_game(&mut self) {
        self.score = Score::ZERO;
        self.fade = 0.0;
        self.background_scroll = 0.0;
        self.enemy = None;
        self.player
            .reset(VIEWPORT.width() / 2.0, VIEWPORT.height() - 150.0);
        self.platforms.clear();
        self.install_starting_platform();
    }

    fn enter_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn step_playing(&mut self, input: InputFrame, out_events: &mut Vec<Event>) {
        let dx = self.player.horizontal_step(input);
        let dx = self.player.clamp_to_lane(dx, LANE);
        let mut dy = self.player.vertical_step();

        if let Some(landing) =
            collision::resolve_landing(self.player.rect, dy, self.player.vel_y, &self.platforms)
        {
            self.player.rect.set_bottom(landing.platform_top);
            dy = 0.0;
            self.player.vel_y = player::JUMP_IMPULSE;
            out_events.push(Event::Jumped);
        }

        // The world shifts down-screen exactly as fast as the player would
        // have moved up, pinning the player at the threshold line.
        let mut scroll = 0.0;
        if self.player.rect.top() <= SCROLL_THRESHOLD && self.player.vel_y < 0.0 {
            scroll = -dy;
            self.player.pose = skyhop_core::PlayerPose::Ascending;
        } else {
            self.player.pose = skyhop_core::PlayerPose::Idle;
        }

        self.player.rect.x += dx;
        self.player.rect.y += dy + scroll;

        for platform in &mut self.platforms {
            platform.advance(scroll, LANE);
        }
        self.platforms.retain(|platform| {
            if platform.is_below(VIEWPORT) {
                out_events.push(Event::PlatformDropped { id: platform.id });
                false
            } else {
                true
            }
        });

        if let Some(enemy) = &mut self.enemy {
            enemy.advance(scroll, VIEWPORT);
        }

        if scroll > 0.0 {
            self.score = self.score.saturating_add(scroll as u32);
            self.target_tick_rate += TICK_RATE_STEP;
            out_events.push(Event::ScoreChanged { score: self.score });
        }

        self.background_scroll += scroll;
        if self.background_scroll >= BACKGROUND_WRAP {
            self.background_scroll = 0.0;
        }

        if self.player.rect.top() > VIEWPORT.height() {
            out_events.push(Event::PlayerDied {
                cause: DeathCause::Fell,
            });
            self.fade = 0.0;
            self.enter_phase(GamePhase::GameOverFading, out_events);
        } else if let Some(enemy) = &self.enemy {
            if collision::enemy_contact(&self.player, enemy) {
                out_events.push(Event::PlayerDied {
                    cause: DeathCause::EnemyContact,
                });
                self.fade = 0.0;
                self.enter_phase(GamePhase::GameOverFading, out_events);
            }
        }

        out_events.push(Event::TickCompleted { scroll });
    }

    fn step_fading(&mut self, out_events: &mut Vec<Event>) {
        self.fade += FADE_STEP;
        if self.fade >= VIEWPORT.width() {
            if self.score > self.high_score {
                self.high_score = self.score;
                out_events.push(Event::HighScoreRaised {
                    score: self.high_score,
                });
            }
            self.enter_phase(GamePhase::GameOverScreen, out_events);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { input } => match world.phase {
            GamePhase::Playing => world.step_playing(input, out_events),
            GamePhase::GameOverFading => world.step_fading(out_events),
            GamePhase::Menu { .. } | GamePhase::GameOverScreen => {}
        },
        Command::StartGame => {
            world.reset_for_new_game();
            world.enter_phase(GamePhase::Playing, out_events);
        }
        Command::ResumeGame => {
            if world.phase == (GamePhase::Menu { paused: true }) {
                world.enter_phase(GamePhase::Playing, out_events);
            }
        }
        Command::PauseGame => {
            if world.phase == GamePhase::Playing {
                world.enter_phase(GamePhase::Menu { paused: true }, out_events);
            }
        }
        Command::ShowTitle => {
            world.enter_phase(GamePhase::Menu { paused: false }, out_events);
        }
        Command::SpawnPlatform {
            x,
            y,
            width,
            motion,
        } => {
            if world.platforms.len() < MAX_PLATFORMS {
                let id = world.allocate_platform_id();
                world.platforms.push(Platform::new(id, x, y, width, motion));
                out_events.push(Event::PlatformSpawned { id });
            }
        }
        Command::SpawnEnemy { origin, speed } => {
            if world.enemy.is_none() {
                world.enemy = Some(Enemy::spawn(origin, speed, VIEWPORT));
                out_events.push(Event::EnemySpawned);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{World, LANE, SCROLL_THRESHOLD, VIEWPORT};
    use skyhop_core::{GamePhase, Lane, PlatformId, PlayerPose, Rect, Score, Viewport};

    /// Fixed viewport the world simulates within.
    #[must_use]
    pub fn viewport(_world: &World) -> Viewport {
        VIEWPORT
    }

    /// Horizontal lane the player and platforms are confined to.
    #[must_use]
    pub fn lane(_world: &World) -> Lane {
        LANE
    }

    /// Phase the experience is currently in.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Score accumulated in the current life.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Highest score observed, including the value seeded at startup.
    #[must_use]
    pub fn high_score(world: &World) -> Score {
        world.high_score
    }

    /// Target tick rate including the soft difficulty ramp.
    #[must_use]
    pub fn target_tick_rate(world: &World) -> f32 {
        world.target_tick_rate
    }

    /// Accumulated background offset used for tiling the backdrop.
    #[must_use]
    pub fn background_scroll(world: &World) -> f32 {
        world.background_scroll
    }

    /// Width of the opaque wipe during the game-over fade.
    #[must_use]
    pub fn fade_progress(world: &World) -> f32 {
        world.fade
    }

    /// Screen y of the previous-best marker line drawn while playing.
    #[must_use]
    pub fn high_score_marker_y(world: &World) -> f32 {
        world.score.get() as f32 - world.high_score.get() as f32 + SCROLL_THRESHOLD
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            rect: world.player.rect,
            pose: world.player.pose,
            facing_left: world.player.facing_left,
            vertical_velocity: world.player.vel_y,
        }
    }

    /// Captures a read-only view of the live platform set.
    #[must_use]
    pub fn platforms(world: &World) -> PlatformView {
        let mut snapshots: Vec<PlatformSnapshot> = world
            .platforms
            .iter()
            .map(|platform| PlatformSnapshot {
                id: platform.id,
                rect: platform.rect,
                moving: platform.is_moving(),
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        PlatformView { snapshots }
    }

    /// Captures a read-only snapshot of the adversary, if one is alive.
    #[must_use]
    pub fn enemy(world: &World) -> Option<EnemySnapshot> {
        world.enemy.as_ref().map(|enemy| EnemySnapshot {
            rect: enemy.rect,
            frame_index: enemy.frame_cursor(),
            facing_left: enemy.facing_left(),
        })
    }

    /// Reports whether an adversary is currently alive.
    #[must_use]
    pub fn enemy_alive(world: &World) -> bool {
        world.enemy.is_some()
    }

    /// Immutable representation of the player's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Player rectangle in viewport coordinates.
        pub rect: Rect,
        /// Sprite pose selected by the motion model this tick.
        pub pose: PlayerPose,
        /// Whether the player sprite should be drawn mirrored.
        pub facing_left: bool,
        /// Current vertical velocity in pixels per tick.
        pub vertical_velocity: f32,
    }

    /// Read-only snapshot describing all live platforms.
    #[derive(Clone, Debug, Default)]
    pub struct PlatformView {
        snapshots: Vec<PlatformSnapshot>,
    }

    impl PlatformView {
        /// Iterator over the captured snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &PlatformSnapshot> {
            self.snapshots.iter()
        }

        /// Number of live platforms.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no platforms are alive.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Top edge of the highest platform, if any platform is alive.
        #[must_use]
        pub fn topmost_y(&self) -> Option<f32> {
            self.snapshots
                .iter()
                .map(|snapshot| snapshot.rect.top())
                .fold(None, |best, top| match best {
                    None => Some(top),
                    Some(current) => Some(current.min(top)),
                })
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<PlatformSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single platform's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlatformSnapshot {
        /// Identifier assigned by the world.
        pub id: PlatformId,
        /// Platform rectangle in viewport coordinates.
        pub rect: Rect,
        /// Whether the platform patrols horizontally.
        pub moving: bool,
    }

    /// Immutable representation of the adversary's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Enemy rectangle in viewport coordinates.
        pub rect: Rect,
        /// Current animation frame index.
        pub frame_index: u32,
        /// Whether the enemy sprite should be drawn mirrored.
        pub facing_left: bool,
    }
}
