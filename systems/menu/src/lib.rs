#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure menu subsystem: button and slider models driven by pointer frames.
//!
//! The menu never talks to the windowing layer. Adapters sample a
//! [`PointerFrame`](skyhop_core::PointerFrame) per frame, feed it to
//! [`MenuModel::update`], and render the returned geometry. Activations and
//! volume changes come back as plain data.

use skyhop_core::{PointerFrame, Rect, Score, Viewport};

const BUTTON_WIDTH: f32 = 220.0;
const BUTTON_HEIGHT: f32 = 70.0;
const SLIDER_TRACK_WIDTH: f32 = 300.0;
const SLIDER_TRACK_HEIGHT: f32 = 14.0;

/// The handle's circular hit area matches the track height.
const SLIDER_HANDLE_RADIUS: f32 = SLIDER_TRACK_HEIGHT;

const VOLUME_MIN: f32 = 0.0;
const VOLUME_MAX: f32 = 100.0;

/// Music volume the slider starts at, in percent.
const DEFAULT_VOLUME: f32 = 30.0;

/// Menu entries the player can activate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Start a new run, or resume the paused one.
    Play,
    /// Leave the application.
    Exit,
}

/// Outcome of feeding one pointer frame to the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuResponse {
    /// Entry activated this frame, if any.
    pub action: Option<MenuAction>,
    /// New music volume in percent, present only on frames it changed.
    pub volume: Option<f32>,
}

/// Axis-aligned button activated on the frame a press begins inside it.
#[derive(Clone, Copy, Debug)]
struct Button {
    rect: Rect,
    hovered: bool,
}

impl Button {
    fn new(center_x: f32, center_y: f32) -> Self {
        let mut rect = Rect::new(0.0, 0.0, BUTTON_WIDTH, BUTTON_HEIGHT);
        rect.set_center(center_x, center_y);
        Self {
            rect,
            hovered: false,
        }
    }

    /// Returns `true` on the frame a press begins inside the button.
    fn update(&mut self, pointer: &PointerFrame) -> bool {
        self.hovered = self.rect.contains(pointer.x, pointer.y);
        self.hovered && pointer.press_started
    }
}

/// Horizontal drag slider mapping the handle position to a volume percent.
#[derive(Clone, Copy, Debug)]
struct Slider {
    track: Rect,
    value: f32,
    dragging: bool,
}

impl Slider {
    fn new(center_x: f32, center_y: f32) -> Self {
        let mut track = Rect::new(0.0, 0.0, SLIDER_TRACK_WIDTH, SLIDER_TRACK_HEIGHT);
        track.set_center(center_x, center_y);
        Self {
            track,
            value: DEFAULT_VOLUME,
            dragging: false,
        }
    }

    fn handle_center(&self) -> (f32, f32) {
        let x = self.track.left() + self.value / VOLUME_MAX * self.track.width;
        (x, self.track.center_y())
    }

    /// Advances the drag state machine, returning the value when it changes.
    ///
    /// A drag begins only when a press starts on the handle itself; pressing
    /// elsewhere on the track is ignored. While dragging, the value tracks
    /// the pointer and clamps to the ends of the track.
    fn update(&mut self, pointer: &PointerFrame) -> Option<f32> {
        if pointer.press_started && self.handle_contains(pointer.x, pointer.y) {
            self.dragging = true;
        }
        if pointer.press_released || !pointer.pressed {
            self.dragging = false;
            return None;
        }
        if !self.dragging {
            return None;
        }

        let ratio = (pointer.x - self.track.left()) / self.track.width;
        let value = (ratio * VOLUME_MAX).clamp(VOLUME_MIN, VOLUME_MAX);
        if value == self.value {
            None
        } else {
            self.value = value;
            Some(value)
        }
    }

    fn handle_contains(&self, x: f32, y: f32) -> bool {
        let (cx, cy) = self.handle_center();
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= SLIDER_HANDLE_RADIUS * SLIDER_HANDLE_RADIUS
    }
}

/// Interactive model behind the title and pause screens.
#[derive(Clone, Copy, Debug)]
pub struct MenuModel {
    play: Button,
    exit: Button,
    slider: Slider,
    paused: bool,
    high_score: Score,
}

impl MenuModel {
    /// Creates a menu laid out for the provided viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let center_x = viewport.width() / 2.0;
        Self {
            play: Button::new(center_x, viewport.height() * 0.45),
            exit: Button::new(center_x, viewport.height() * 0.62),
            slider: Slider::new(center_x, viewport.height() * 0.78),
            paused: false,
            high_score: Score::ZERO,
        }
    }

    /// Switches the primary entry between "Play" and "Resume".
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Updates the high score shown on the title screen.
    pub fn set_high_score(&mut self, high_score: Score) {
        self.high_score = high_score;
    }

    /// Whether the menu is fronting a paused run.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current music volume in percent.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.slider.value
    }

    /// Feeds one pointer frame through every widget.
    ///
    /// Button activations are edge triggered, so holding the press over a
    /// button activates it exactly once.
    pub fn update(&mut self, pointer: &PointerFrame) -> MenuResponse {
        let play_activated = self.play.update(pointer);
        let exit_activated = self.exit.update(pointer);
        MenuResponse {
            action: if play_activated {
                Some(MenuAction::Play)
            } else if exit_activated {
                Some(MenuAction::Exit)
            } else {
                None
            },
            volume: self.slider.update(pointer),
        }
    }

    /// Captures the geometry and labels the rendering layer draws from.
    #[must_use]
    pub fn view(&self) -> MenuView {
        let (handle_x, handle_y) = self.slider.handle_center();
        MenuView {
            heading: if self.paused { "Paused" } else { "Sky Hop" },
            play: ButtonView {
                rect: self.play.rect,
                label: if self.paused { "Resume" } else { "Play" },
                hovered: self.play.hovered,
            },
            exit: ButtonView {
                rect: self.exit.rect,
                label: "Exit",
                hovered: self.exit.hovered,
            },
            slider: SliderView {
                track: self.slider.track,
                handle_x,
                handle_y,
                handle_radius: SLIDER_HANDLE_RADIUS,
                value: self.slider.value,
            },
            high_score: self.high_score,
        }
    }
}

/// Drawable description of the whole menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuView {
    /// Heading shown above the entries.
    pub heading: &'static str,
    /// Primary entry: start or resume a run.
    pub play: ButtonView,
    /// Entry that leaves the application.
    pub exit: ButtonView,
    /// Music volume slider.
    pub slider: SliderView,
    /// Best score to show on the title screen.
    pub high_score: Score,
}

/// Drawable description of a single button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonView {
    /// Button bounds in viewport coordinates.
    pub rect: Rect,
    /// Caption drawn inside the button.
    pub label: &'static str,
    /// Whether the pointer currently rests on the button.
    pub hovered: bool,
}

/// Drawable description of the volume slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderView {
    /// Track bounds in viewport coordinates.
    pub track: Rect,
    /// Handle center x in viewport coordinates.
    pub handle_x: f32,
    /// Handle center y in viewport coordinates.
    pub handle_y: f32,
    /// Handle radius in pixels.
    pub handle_radius: f32,
    /// Current volume in percent.
    pub value: f32,
}
