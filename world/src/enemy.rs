//! The flying adversary: looping sprite animation and edge-bouncing motion.

use skyhop_core::{EnemyOrigin, HorizontalDirection, Rect, SpriteMask, Viewport};

pub(crate) const ENEMY_WIDTH: f32 = 48.0;
pub(crate) const ENEMY_HEIGHT: f32 = 32.0;

/// Altitude the adversary enters the scene at.
const SPAWN_ALTITUDE: f32 = 100.0;

/// Number of frames in the looping flight animation.
pub(crate) const ANIMATION_FRAMES: u32 = 4;

/// Ticks between animation-frame advances.
const FRAME_CADENCE: u32 = 6;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) rect: Rect,
    speed: f32,
    direction: HorizontalDirection,
    frame_cursor: u32,
    ticks_until_advance: u32,
    mask: SpriteMask,
}

impl Enemy {
    pub(crate) fn spawn(origin: EnemyOrigin, speed: f32, viewport: Viewport) -> Self {
        let (x, direction) = match origin {
            EnemyOrigin::LeftEdge => (-ENEMY_WIDTH, HorizontalDirection::Right),
            EnemyOrigin::RightEdge => (viewport.width(), HorizontalDirection::Left),
        };
        Self {
            rect: Rect::new(x, SPAWN_ALTITUDE, ENEMY_WIDTH, ENEMY_HEIGHT),
            speed,
            direction,
            frame_cursor: 0,
            ticks_until_advance: FRAME_CADENCE,
            mask: SpriteMask::ellipse(ENEMY_WIDTH as u32, ENEMY_HEIGHT as u32),
        }
    }

    /// Advances animation and motion by one tick, consuming the shared scroll.
    pub(crate) fn advance(&mut self, scroll: f32, viewport: Viewport) {
        self.ticks_until_advance = self.ticks_until_advance.saturating_sub(1);
        if self.ticks_until_advance == 0 {
            self.frame_cursor = (self.frame_cursor + 1) % ANIMATION_FRAMES;
            self.ticks_until_advance = FRAME_CADENCE;
        }

        self.rect.x += self.direction.sign() * self.speed;
        if self.rect.left() <= 0.0 {
            self.direction = HorizontalDirection::Right;
        } else if self.rect.right() >= viewport.width() {
            self.direction = HorizontalDirection::Left;
        }

        self.rect.y += scroll;
    }

    pub(crate) fn frame_cursor(&self) -> u32 {
        self.frame_cursor
    }

    pub(crate) fn facing_left(&self) -> bool {
        self.direction == HorizontalDirection::Left
    }

    pub(crate) fn mask(&self) -> &SpriteMask {
        &self.mask
    }
}
