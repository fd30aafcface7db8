//! Player kinematics: gravity, horizontal control, and the jump impulse.

use skyhop_core::{InputFrame, Lane, PlayerPose, Rect, SpriteMask};

pub(crate) const PLAYER_WIDTH: f32 = 60.0;
pub(crate) const PLAYER_HEIGHT: f32 = 60.0;

const BASE_SPEED: f32 = 5.5;
const ACCELERATION: f32 = 1.5;
const FRICTION: f32 = -0.1;
const GRAVITY: f32 = 0.5;

/// Velocity assigned on every platform landing.
pub(crate) const JUMP_IMPULSE: f32 = -20.0;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) rect: Rect,
    pub(crate) vel_y: f32,
    pub(crate) facing_left: bool,
    pub(crate) pose: PlayerPose,
    mask: SpriteMask,
}

impl Player {
    pub(crate) fn at_center(x: f32, y: f32) -> Self {
        let mut rect = Rect::new(0.0, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        rect.set_center(x, y);
        Self {
            rect,
            vel_y: 0.0,
            facing_left: false,
            pose: PlayerPose::Idle,
            mask: SpriteMask::ellipse(PLAYER_WIDTH as u32, PLAYER_HEIGHT as u32),
        }
    }

    /// Repositions the existing player for a fresh life without recreating it.
    pub(crate) fn reset(&mut self, center_x: f32, center_y: f32) {
        self.rect.set_center(center_x, center_y);
        self.vel_y = 0.0;
        self.facing_left = false;
        self.pose = PlayerPose::Idle;
    }

    /// Computes the lane-clamped horizontal displacement for this tick.
    ///
    /// The clamp clips `dx` so the player's edge lands exactly on the lane
    /// boundary rather than rejecting the move outright.
    pub(crate) fn horizontal_step(&mut self, input: InputFrame) -> f32 {
        let mut dx = 0.0;
        if input.move_left {
            dx = -BASE_SPEED * ACCELERATION - FRICTION;
            self.facing_left = true;
        }
        if input.move_right {
            dx = BASE_SPEED * ACCELERATION + FRICTION;
            self.facing_left = false;
        }
        dx
    }

    pub(crate) fn clamp_to_lane(&self, dx: f32, lane: Lane) -> f32 {
        if self.rect.left() + dx < lane.left() {
            return lane.left() - self.rect.left();
        }
        if self.rect.right() + dx > lane.right() {
            return lane.right() - self.rect.right();
        }
        dx
    }

    /// Applies gravity and returns the pending vertical displacement.
    pub(crate) fn vertical_step(&mut self) -> f32 {
        self.vel_y += GRAVITY;
        self.vel_y + FRICTION
    }

    pub(crate) fn mask(&self) -> &SpriteMask {
        &self.mask
    }
}
