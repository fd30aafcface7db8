#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sky Hop engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Title used by the created game window.
pub const WINDOW_TITLE: &str = "Sky Hop";

/// Upper bound on simultaneously live platforms.
///
/// The world enforces the cap when executing [`Command::SpawnPlatform`];
/// spawn policies use the same value to decide how many requests to emit.
pub const MAX_PLATFORMS: usize = 10;

/// Describes the fixed pixel dimensions of the game viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a new viewport description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the viewport in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the viewport in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Horizontal band within which the player and platforms may exist.
///
/// The lane is narrower than the viewport; the side strips are reserved for
/// background art and UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lane {
    left: f32,
    right: f32,
}

impl Lane {
    /// Creates a new lane spanning the provided horizontal bounds.
    #[must_use]
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Left edge of the lane in viewport coordinates.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Right edge of the lane in viewport coordinates.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.right
    }

    /// Width of the lane in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Axis-aligned rectangle expressed in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    /// Left edge of the rectangle.
    pub x: f32,
    /// Top edge of the rectangle.
    pub y: f32,
    /// Horizontal extent of the rectangle.
    pub width: f32,
    /// Vertical extent of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Right edge of the rectangle.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Vertical center of the rectangle.
    #[must_use]
    pub const fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Repositions the rectangle so its center lands on the provided point.
    pub fn set_center(&mut self, x: f32, y: f32) {
        self.x = x - self.width / 2.0;
        self.y = y - self.height / 2.0;
    }

    /// Repositions the rectangle so its bottom edge lands on the provided y.
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Returns a copy of the rectangle shifted by the provided deltas.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Reports whether two rectangles overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Reports whether the rectangle contains the provided point.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}

/// Unique identifier assigned to a platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(u32);

impl PlatformId {
    /// Creates a new platform identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Integer score accumulated while the world scrolls.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Score(u32);

impl Score {
    /// Score value at the start of a life.
    pub const ZERO: Score = Score(0);

    /// Creates a new score wrapper with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying score value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the score increased by the provided amount, saturating.
    #[must_use]
    pub const fn saturating_add(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }
}

/// Top-level phase the experience is currently in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// The modal menu is shown. `paused` distinguishes the title screen
    /// before the first game from a menu opened mid-game via pause.
    Menu {
        /// Whether a frozen game is waiting behind the menu overlay.
        paused: bool,
    },
    /// The world is simulating and the player is alive.
    Playing,
    /// The player died and the opaque wipe is expanding across the screen.
    GameOverFading,
    /// The static game-over screen is shown.
    GameOverScreen,
}

/// Direction of horizontal travel for moving platforms and the enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl HorizontalDirection {
    /// Signed unit factor applied to per-tick displacement.
    #[must_use]
    pub const fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Motion parameters assigned to a moving platform at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformMotion {
    /// Initial direction of travel.
    pub direction: HorizontalDirection,
    /// Horizontal speed in pixels per tick.
    pub speed: f32,
    /// Initial value of the direction-flip counter, so platforms spawned on
    /// the same tick do not oscillate in lockstep.
    pub phase: u32,
}

/// Viewport edge an enemy enters the scene from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyOrigin {
    /// The enemy enters from the left edge travelling right.
    LeftEdge,
    /// The enemy enters from the right edge travelling left.
    RightEdge,
}

/// Sprite pose selected for the player by the motion model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerPose {
    /// Default pose used while falling or grounded.
    Idle,
    /// Pose used while ascending above the scroll threshold.
    Ascending,
}

/// Reason the player's life ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// The player fell below the bottom of the viewport.
    Fell,
    /// The player's sprite mask intersected an enemy's sprite mask.
    EnemyContact,
}

/// Fire-and-forget sound effects surfaced to the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Played when the player bounces off a platform.
    Jump,
    /// Played when the player dies.
    Death,
}

/// Immutable snapshot of the directional keys held during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Whether a left-movement key is held this tick.
    pub move_left: bool,
    /// Whether a right-movement key is held this tick.
    pub move_right: bool,
}

/// Immutable snapshot of the pointer captured once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFrame {
    /// Pointer x position in viewport coordinates.
    pub x: f32,
    /// Pointer y position in viewport coordinates.
    pub y: f32,
    /// Whether the primary button is currently held.
    pub pressed: bool,
    /// Whether the primary button transitioned to held on this tick.
    pub press_started: bool,
    /// Whether the primary button transitioned to released on this tick.
    pub press_released: bool,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by exactly one tick.
    Tick {
        /// Directional input sampled for this tick.
        input: InputFrame,
    },
    /// Resets the world and enters the playing phase.
    StartGame,
    /// Returns from the pause menu to the playing phase without a reset.
    ResumeGame,
    /// Freezes the world and opens the pause menu.
    PauseGame,
    /// Returns to the title screen without a world reset.
    ShowTitle,
    /// Requests that a new platform join the live set.
    SpawnPlatform {
        /// Left edge of the platform in viewport coordinates.
        x: f32,
        /// Top edge of the platform in viewport coordinates.
        y: f32,
        /// Horizontal extent of the platform.
        width: f32,
        /// Motion parameters, or `None` for a static platform.
        motion: Option<PlatformMotion>,
    },
    /// Requests that the adversary enter the scene.
    SpawnEnemy {
        /// Edge the enemy enters from.
        origin: EnemyOrigin,
        /// Horizontal speed in pixels per tick.
        speed: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that one simulation tick completed while playing.
    TickCompleted {
        /// Camera scroll produced by the tick, in pixels.
        scroll: f32,
    },
    /// The player landed on a platform and bounced.
    Jumped,
    /// The score changed during the tick.
    ScoreChanged {
        /// Score value after the change.
        score: Score,
    },
    /// Confirms that a platform joined the live set.
    PlatformSpawned {
        /// Identifier assigned to the platform by the world.
        id: PlatformId,
    },
    /// Reports that a platform fell below the viewport and was removed.
    PlatformDropped {
        /// Identifier of the removed platform.
        id: PlatformId,
    },
    /// Confirms that the adversary entered the scene.
    EnemySpawned,
    /// Reports that the player's life ended.
    PlayerDied {
        /// What killed the player.
        cause: DeathCause,
    },
    /// Announces that the experience entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
    },
    /// Reports that the in-memory high score was raised.
    HighScoreRaised {
        /// New high score value.
        score: Score,
    },
}

/// Binary sprite silhouette used for precise collision testing.
///
/// A mask stores one bit per sprite pixel. The coarse bounding-box test runs
/// first; the mask intersection only executes on frames where the boxes
/// already overlap, bounding the cost of the per-pixel scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl SpriteMask {
    /// Builds a mask from explicit dimensions and row-major opacity bits.
    ///
    /// Returns `None` when the bit count does not match the dimensions.
    #[must_use]
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Option<Self> {
        let expected = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        if bits.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            bits,
        })
    }

    /// Builds a solid ellipse inscribed in the provided dimensions.
    #[must_use]
    pub fn ellipse(width: u32, height: u32) -> Self {
        let mut bits = Vec::with_capacity((width as usize) * (height as usize));
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        for row in 0..height {
            for column in 0..width {
                let dx = (column as f32 + 0.5 - rx) / rx.max(f32::EPSILON);
                let dy = (row as f32 + 0.5 - ry) / ry.max(f32::EPSILON);
                bits.push(dx * dx + dy * dy <= 1.0);
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Width of the mask in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the mask in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the pixel at the provided coordinate is opaque.
    #[must_use]
    pub fn is_set(&self, column: u32, row: u32) -> bool {
        if column >= self.width || row >= self.height {
            return false;
        }
        let index = (row as usize) * (self.width as usize) + column as usize;
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Tests whether two masks share an opaque pixel given their origins.
    ///
    /// Origins are the top-left corners of each sprite in viewport pixels;
    /// fractional positions are truncated onto the pixel grid.
    #[must_use]
    pub fn intersects(&self, origin: (f32, f32), other: &SpriteMask, other_origin: (f32, f32)) -> bool {
        let ax = origin.0 as i64;
        let ay = origin.1 as i64;
        let bx = other_origin.0 as i64;
        let by = other_origin.1 as i64;

        let left = ax.max(bx);
        let right = (ax + i64::from(self.width)).min(bx + i64::from(other.width));
        let top = ay.max(by);
        let bottom = (ay + i64::from(self.height)).min(by + i64::from(other.height));

        if left >= right || top >= bottom {
            return false;
        }

        for y in top..bottom {
            for x in left..right {
                let self_column = (x - ax) as u32;
                let self_row = (y - ay) as u32;
                let other_column = (x - bx) as u32;
                let other_row = (y - by) as u32;
                if self.is_set(self_column, self_row) && other.is_set(other_column, other_row) {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::{Lane, PlatformId, Rect, Score, SpriteMask};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn platform_id_round_trips_through_bincode() {
        assert_round_trip(&PlatformId::new(7));
    }

    #[test]
    fn score_round_trips_through_bincode() {
        assert_round_trip(&Score::new(1_742));
    }

    #[test]
    fn score_addition_saturates() {
        let score = Score::new(u32::MAX - 1);
        assert_eq!(score.saturating_add(10), Score::new(u32::MAX));
    }

    #[test]
    fn rects_overlap_when_regions_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 5.0, 5.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c), "edge contact is not an overlap");
    }

    #[test]
    fn rect_bottom_snap_repositions_top_edge() {
        let mut rect = Rect::new(0.0, 0.0, 10.0, 20.0);
        rect.set_bottom(100.0);
        assert_eq!(rect.top(), 80.0);
        assert_eq!(rect.bottom(), 100.0);
    }

    #[test]
    fn lane_width_matches_bounds() {
        let lane = Lane::new(380.0, 880.0);
        assert_eq!(lane.width(), 500.0);
    }

    #[test]
    fn ellipse_mask_is_opaque_at_center_and_clear_at_corners() {
        let mask = SpriteMask::ellipse(10, 10);
        assert!(mask.is_set(5, 5));
        assert!(!mask.is_set(0, 0));
        assert!(!mask.is_set(9, 9));
    }

    #[test]
    fn masks_intersect_only_when_opaque_pixels_coincide() {
        let a = SpriteMask::ellipse(10, 10);
        let b = SpriteMask::ellipse(10, 10);

        assert!(a.intersects((0.0, 0.0), &b, (2.0, 2.0)));
        // Boxes overlap at the corners, but the elliptical silhouettes do not.
        assert!(!a.intersects((0.0, 0.0), &b, (9.0, 9.0)));
        assert!(!a.intersects((0.0, 0.0), &b, (20.0, 0.0)));
    }

    #[test]
    fn mask_from_bits_rejects_mismatched_dimensions() {
        assert!(SpriteMask::from_bits(2, 2, vec![true; 3]).is_none());
        assert!(SpriteMask::from_bits(2, 2, vec![true; 4]).is_some());
    }
}
