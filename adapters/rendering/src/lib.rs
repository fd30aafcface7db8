#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering and audio contracts for Sky Hop adapters.
//!
//! Backends receive a [`Presentation`] plus a per-frame closure that refreshes
//! the [`Scene`] from the simulation. Everything here is plain data, so the
//! application layer stays free of windowing concerns.

use anyhow::Result as AnyResult;
use glam::Vec2;
use skyhop_core::{GamePhase, PlayerPose, PointerFrame, Rect, Score, SoundCue, Viewport};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether a left-movement key is held this frame.
    pub move_left: bool,
    /// Whether a right-movement key is held this frame.
    pub move_right: bool,
    /// Whether the pause/back key was pressed on this frame.
    pub pause_pressed: bool,
    /// Whether the confirm key was pressed on this frame.
    pub confirm_pressed: bool,
    /// Pointer snapshot in viewport coordinates.
    pub pointer: PointerFrame,
}

/// Drawable description of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Player bounds in viewport coordinates.
    pub rect: Rect,
    /// Sprite pose selected by the simulation.
    pub pose: PlayerPose,
    /// Whether the sprite is drawn mirrored.
    pub facing_left: bool,
}

/// Drawable description of a single platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformPresentation {
    /// Platform bounds in viewport coordinates.
    pub rect: Rect,
    /// Whether the platform patrols horizontally.
    pub moving: bool,
}

/// Drawable description of the adversary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Enemy bounds in viewport coordinates.
    pub rect: Rect,
    /// Animation frame to source from the flight sheet.
    pub frame_index: u32,
    /// Whether the sprite is drawn mirrored.
    pub facing_left: bool,
}

/// Score panel drawn along the top edge while playing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Score of the current life.
    pub score: Score,
    /// Best score on record.
    pub high_score: Score,
    /// Screen y of the previous-best marker line, when it is on screen.
    pub high_score_marker_y: Option<f32>,
}

/// Drawable description of a single menu button.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonPresentation {
    /// Button bounds in viewport coordinates.
    pub rect: Rect,
    /// Caption drawn inside the button.
    pub label: String,
    /// Whether the button is drawn highlighted.
    pub hovered: bool,
}

/// Drawable description of the volume slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderPresentation {
    /// Track bounds in viewport coordinates.
    pub track: Rect,
    /// Handle center in viewport coordinates.
    pub handle: Vec2,
    /// Handle radius in pixels.
    pub handle_radius: f32,
}

/// Drawable description of the title or pause screen.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuPresentation {
    /// Heading drawn above the entries.
    pub heading: String,
    /// Menu entries from top to bottom.
    pub buttons: Vec<ButtonPresentation>,
    /// Music volume slider.
    pub slider: SliderPresentation,
    /// Best score shown under the heading.
    pub high_score: Score,
}

/// Identifies a texture asset a sprite-capable backend may load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Vertically tiled sky backdrop.
    Background,
    /// Player in the relaxed falling pose.
    PlayerIdle,
    /// Player in the ascending pose.
    PlayerAscending,
    /// Platform board.
    Platform,
    /// Horizontal flight sheet for the adversary.
    EnemyFlight,
}

/// Drawable description of the game-over screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameOverPresentation {
    /// Score of the finished life.
    pub score: Score,
    /// Best score on record after the life ended.
    pub high_score: Score,
    /// Whether the finished life set a new best.
    pub new_best: bool,
}

/// Scene description combining the backdrop, actors, and overlay screens.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Fixed viewport every coordinate is expressed in.
    pub viewport: Viewport,
    /// Phase the experience is currently in.
    pub phase: GamePhase,
    /// Vertical offset applied to the tiled backdrop.
    pub background_offset: f32,
    /// Player actor.
    pub player: PlayerPresentation,
    /// Platforms currently on screen.
    pub platforms: Vec<PlatformPresentation>,
    /// Adversary, when one is in the scene.
    pub enemy: Option<EnemyPresentation>,
    /// Score panel shown while playing.
    pub hud: HudPresentation,
    /// Menu overlay, present on the title and pause screens.
    pub menu: Option<MenuPresentation>,
    /// Game-over overlay, present once the fade completes.
    pub game_over: Option<GameOverPresentation>,
    /// Width of the opaque wipe during the game-over fade.
    pub fade: f32,
    /// Tick rate the backend paces simulation updates towards.
    pub target_tick_rate: f32,
    /// Set by the application layer when the backend should shut down.
    pub exit_requested: bool,
}

impl Scene {
    /// Creates a new scene descriptor.
    ///
    /// Overlay channels start empty; the per-frame update closure fills them
    /// in from the simulation.
    pub fn new(
        viewport: Viewport,
        player: PlayerPresentation,
        hud: HudPresentation,
        target_tick_rate: f32,
    ) -> Result<Self, RenderingError> {
        if viewport.width() <= 0.0 || viewport.height() <= 0.0 {
            return Err(RenderingError::EmptyViewport {
                width: viewport.width(),
                height: viewport.height(),
            });
        }

        Ok(Self {
            viewport,
            phase: GamePhase::Menu { paused: false },
            background_offset: 0.0,
            player,
            platforms: Vec::new(),
            enemy: None,
            hud,
            menu: None,
            game_over: None,
            fade: 0.0,
            target_tick_rate,
            exit_requested: false,
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Sky Hop scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered, allowing adapters to animate world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Music and effect output decoupled from any particular audio library.
pub trait AudioSink {
    /// Sets the looping music volume in the range 0.0..=1.0.
    fn set_music_volume(&mut self, volume: f32);

    /// Plays a one-shot effect for the provided cue.
    fn play(&mut self, cue: SoundCue);
}

/// Audio sink that swallows every request.
///
/// Used when the windowing backend is built without its audio feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn set_music_volume(&mut self, _volume: f32) {}

    fn play(&mut self, _cue: SoundCue) {}
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The viewport must have positive dimensions to draw anything.
    EmptyViewport {
        /// Provided viewport width.
        width: f32,
        /// Provided viewport height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyViewport { width, height } => {
                write!(
                    f,
                    "viewport dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerPresentation {
        PlayerPresentation {
            rect: Rect::new(600.0, 510.0, 60.0, 60.0),
            pose: PlayerPose::Idle,
            facing_left: false,
        }
    }

    fn hud() -> HudPresentation {
        HudPresentation {
            score: Score::ZERO,
            high_score: Score::ZERO,
            high_score_marker_y: None,
        }
    }

    #[test]
    fn scene_creation_accepts_a_positive_viewport() {
        let scene = Scene::new(Viewport::new(1260.0, 720.0), player(), hud(), 60.0)
            .expect("positive dimensions should succeed");

        assert_eq!(scene.phase, GamePhase::Menu { paused: false });
        assert!(scene.platforms.is_empty());
        assert!(!scene.exit_requested);
    }

    #[test]
    fn scene_creation_rejects_an_empty_viewport() {
        let error = Scene::new(Viewport::new(0.0, 720.0), player(), hud(), 60.0)
            .expect_err("zero width should fail");

        assert_eq!(
            error,
            RenderingError::EmptyViewport {
                width: 0.0,
                height: 720.0,
            }
        );
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(100, 150, 200).lighten(0.5);
        assert!(color.red > 100.0 / 255.0);
        assert!(color.green > 150.0 / 255.0);
        assert!(color.blue > 200.0 / 255.0);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn lighten_clamps_the_amount() {
        let color = Color::from_rgb_u8(10, 20, 30).lighten(5.0);
        assert_eq!(color, Color::new(1.0, 1.0, 1.0, 1.0));
    }
}
