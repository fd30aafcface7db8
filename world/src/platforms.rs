//! Platform kinematics and off-screen recycling.

use skyhop_core::{HorizontalDirection, Lane, PlatformId, PlatformMotion, Rect, Viewport};

pub(crate) const PLATFORM_HEIGHT: f32 = 16.0;

/// Number of ticks a moving platform travels before flipping direction.
const FLIP_INTERVAL: u32 = 100;

#[derive(Clone, Debug)]
pub(crate) struct Platform {
    pub(crate) id: PlatformId,
    pub(crate) rect: Rect,
    motion: Option<Motion>,
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    direction: HorizontalDirection,
    speed: f32,
    counter: u32,
}

impl Platform {
    pub(crate) fn new(id: PlatformId, x: f32, y: f32, width: f32, motion: Option<PlatformMotion>) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, width, PLATFORM_HEIGHT),
            motion: motion.map(|parameters| Motion {
                direction: parameters.direction,
                speed: parameters.speed,
                counter: parameters.phase,
            }),
        }
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Advances the platform by one tick, consuming the shared scroll value.
    ///
    /// Moving platforms flip direction after [`FLIP_INTERVAL`] ticks or upon
    /// touching a lane boundary.
    pub(crate) fn advance(&mut self, scroll: f32, lane: Lane) {
        if let Some(motion) = &mut self.motion {
            motion.counter += 1;
            self.rect.x += motion.direction.sign() * motion.speed;

            if motion.counter >= FLIP_INTERVAL
                || self.rect.left() < lane.left()
                || self.rect.right() > lane.right()
            {
                motion.direction = motion.direction.flipped();
                motion.counter = 0;
            }
        }

        self.rect.y += scroll;
    }

    /// Reports whether the platform's top edge has passed the viewport bottom.
    pub(crate) fn is_below(&self, viewport: Viewport) -> bool {
        self.rect.top() > viewport.height()
    }
}
