//! Landing and death resolution between the player, platforms, and enemy.

use skyhop_core::Rect;

use crate::enemy::Enemy;
use crate::platforms::Platform;
use crate::player::Player;

/// Outcome of a successful platform landing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Landing {
    /// Top edge of the platform the player's bottom snaps to.
    pub(crate) platform_top: f32,
}

/// Scans the live platforms for a landing at the player's next-tick position.
///
/// A landing requires overlap at the projected rectangle, the player's
/// current bottom edge above the platform's vertical center, and a positive
/// (falling) velocity. When several stacked platforms satisfy the condition
/// on the same tick, the last one in iteration order wins.
pub(crate) fn resolve_landing(
    player_rect: Rect,
    dy: f32,
    vel_y: f32,
    platforms: &[Platform],
) -> Option<Landing> {
    if vel_y <= 0.0 {
        return None;
    }

    let projected = player_rect.translated(0.0, dy);
    let mut landing = None;
    for platform in platforms {
        if projected.overlaps(&platform.rect) && player_rect.bottom() < platform.rect.center_y() {
            landing = Some(Landing {
                platform_top: platform.rect.top(),
            });
        }
    }
    landing
}

/// Two-stage player/enemy hit test: coarse bounding boxes, then sprite masks.
///
/// The per-pixel scan only runs on frames where the boxes already overlap.
pub(crate) fn enemy_contact(player: &Player, enemy: &Enemy) -> bool {
    if !player.rect.overlaps(&enemy.rect) {
        return false;
    }

    player.mask().intersects(
        (player.rect.x, player.rect.y),
        enemy.mask(),
        (enemy.rect.x, enemy.rect.y),
    )
}
