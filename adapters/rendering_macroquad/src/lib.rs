#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Sky Hop.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! declaration and providing an `AudioSink` backed by it.
//!
//! The backend draws from texture assets when sprite loading is enabled and
//! falls back to solid shapes otherwise, so the game remains playable in a
//! checkout without binary assets.

mod sprites;

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    input::{
        is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed,
        is_mouse_button_released, mouse_position, KeyCode, MouseButton,
    },
    math::Rect as MacroquadRect,
};
use skyhop_core::{GamePhase, PlayerPose, PointerFrame, Viewport};
use skyhop_rendering::{
    Color, EnemyPresentation, FrameInput, GameOverPresentation, HudPresentation, MenuPresentation,
    PlatformPresentation, PlayerPresentation, Presentation, RenderingBackend, Scene, SpriteKey,
};
use std::{
    collections::VecDeque,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use self::sprites::{DrawParams, SpriteAtlas};

/// Number of frames packed horizontally into the enemy flight sheet.
const ENEMY_SHEET_FRAMES: u32 = 4;

/// Vertical period of the tiled backdrop, matching the simulation's wrap.
const BACKGROUND_TILE_HEIGHT: f32 = 750.0;

/// Number of horizontal bands composing the game-over wipe.
const FADE_BANDS: usize = 6;

const HUD_PANEL_HEIGHT: f32 = 36.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display
    /// refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing
    /// ten-second averages once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            return None;
        }

        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.viewport.width() as i32,
            window_height: scene.viewport.height() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut init_sender = Some(atlas_init_sender);
            let mut scene = scene;

            let mut sprite_atlas = None;
            if load_sprites {
                match SpriteAtlas::from_default_manifest()
                    .context("failed to initialise sprite atlas")
                {
                    Ok(atlas) => sprite_atlas = Some(atlas),
                    Err(error) => {
                        if let Some(sender) = init_sender.take() {
                            let _ = sender.send(Err(error));
                        }
                        return;
                    }
                }
            }
            if let Some(sender) = init_sender.take() {
                let _ = sender.send(Ok(()));
            }

            if let Some(atlas) = &sprite_atlas {
                debug_assert!(
                    atlas.texture_count() == sprites::ALL_SPRITE_KEYS.len()
                        && sprites::ALL_SPRITE_KEYS
                            .iter()
                            .all(|key| atlas.contains(*key))
                );
            }

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_start = Instant::now();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(scene.viewport);

                update_scene(frame_dt, frame_input, &mut scene);
                if scene.exit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let metrics = ViewMetrics::from_viewport(scene.viewport);
                draw_background(&scene, &metrics, sprite_atlas.as_ref());

                match scene.phase {
                    GamePhase::Menu { paused } => {
                        if paused {
                            draw_playfield(&scene, &metrics, sprite_atlas.as_ref());
                        }
                        if let Some(menu) = &scene.menu {
                            draw_menu(menu, &scene, &metrics);
                        }
                    }
                    GamePhase::Playing | GamePhase::GameOverFading => {
                        draw_playfield(&scene, &metrics, sprite_atlas.as_ref());
                        draw_hud(&scene.hud, &metrics, scene.viewport);
                        if scene.phase == GamePhase::GameOverFading {
                            draw_fade_curtain(scene.fade, scene.viewport, &metrics);
                        }
                    }
                    GamePhase::GameOverScreen => {
                        if let Some(game_over) = &scene.game_over {
                            draw_game_over(game_over, scene.viewport, &metrics);
                        }
                    }
                }

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_counter.record_frame(frame_dt)
                    {
                        println!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                } else {
                    let _ = fps_counter.record_frame(frame_dt);
                }

                pace_frame(frame_start, scene.target_tick_rate);
                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

/// Sleeps away whatever remains of the frame budget implied by the target
/// tick rate. Rendering is simple enough that the swap interval alone would
/// run the simulation far too fast on high-refresh displays.
fn pace_frame(frame_start: Instant, target_tick_rate: f32) {
    if let Some(remaining) = remaining_frame_budget(target_tick_rate, frame_start.elapsed()) {
        thread::sleep(remaining);
    }
}

fn remaining_frame_budget(target_tick_rate: f32, elapsed: Duration) -> Option<Duration> {
    if target_tick_rate <= 0.0 {
        return None;
    }
    let budget = Duration::from_secs_f32(1.0 / target_tick_rate);
    budget.checked_sub(elapsed).filter(|gap| !gap.is_zero())
}

/// Pixel scale from viewport coordinates to the current screen size.
#[derive(Clone, Copy, Debug)]
struct ViewMetrics {
    scale_x: f32,
    scale_y: f32,
}

impl ViewMetrics {
    fn from_viewport(viewport: Viewport) -> Self {
        Self {
            scale_x: macroquad::window::screen_width() / viewport.width().max(1.0),
            scale_y: macroquad::window::screen_height() / viewport.height().max(1.0),
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale_x, y * self.scale_y)
    }

    fn rect(&self, rect: skyhop_core::Rect) -> (f32, f32, f32, f32) {
        (
            rect.x * self.scale_x,
            rect.y * self.scale_y,
            rect.width * self.scale_x,
            rect.height * self.scale_y,
        )
    }
}

fn gather_frame_input(viewport: Viewport) -> FrameInput {
    let (mouse_x, mouse_y) = mouse_position();
    let to_viewport_x = viewport.width() / macroquad::window::screen_width().max(1.0);
    let to_viewport_y = viewport.height() / macroquad::window::screen_height().max(1.0);

    FrameInput {
        move_left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        move_right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        pause_pressed: is_key_pressed(KeyCode::Escape),
        confirm_pressed: is_key_pressed(KeyCode::Space),
        pointer: PointerFrame {
            x: mouse_x * to_viewport_x,
            y: mouse_y * to_viewport_y,
            pressed: is_mouse_button_down(MouseButton::Left),
            press_started: is_mouse_button_pressed(MouseButton::Left),
            press_released: is_mouse_button_released(MouseButton::Left),
        },
    }
}

fn draw_background(scene: &Scene, metrics: &ViewMetrics, atlas: Option<&SpriteAtlas>) {
    let width = scene.viewport.width();
    let offset = scene.background_offset;

    if let Some(atlas) = atlas {
        for tile in 0..2 {
            let y = offset - BACKGROUND_TILE_HEIGHT + tile as f32 * BACKGROUND_TILE_HEIGHT;
            let (px, py) = metrics.point(0.0, y);
            let params = DrawParams::new(
                Vec2::new(px, py),
                Vec2::new(
                    width * metrics.scale_x,
                    BACKGROUND_TILE_HEIGHT * metrics.scale_y,
                ),
            );
            let _ = atlas.draw(SpriteKey::Background, params);
        }
        return;
    }

    // Shape fallback: faint drifting bands so the scroll stays visible.
    let band_color = to_macroquad_color(Color::new(1.0, 1.0, 1.0, 0.08));
    let spacing = BACKGROUND_TILE_HEIGHT / 5.0;
    let phase = offset.rem_euclid(spacing);
    let mut y = phase - spacing;
    while y < scene.viewport.height() {
        let (px, py) = metrics.point(0.0, y);
        macroquad::shapes::draw_rectangle(
            px,
            py,
            width * metrics.scale_x,
            6.0 * metrics.scale_y,
            band_color,
        );
        y += spacing;
    }
}

fn draw_playfield(scene: &Scene, metrics: &ViewMetrics, atlas: Option<&SpriteAtlas>) {
    for platform in &scene.platforms {
        draw_platform(platform, metrics, atlas);
    }
    if let Some(enemy) = &scene.enemy {
        draw_enemy(enemy, metrics, atlas);
    }
    draw_player(&scene.player, metrics, atlas);
    if let Some(marker_y) = scene.hud.high_score_marker_y {
        draw_high_score_marker(marker_y, scene.viewport, metrics);
    }
}

fn draw_platform(platform: &PlatformPresentation, metrics: &ViewMetrics, atlas: Option<&SpriteAtlas>) {
    let (x, y, w, h) = metrics.rect(platform.rect);
    if let Some(atlas) = atlas {
        let params = DrawParams::new(Vec2::new(x, y), Vec2::new(w, h));
        if atlas.draw(SpriteKey::Platform, params).is_ok() {
            return;
        }
    }

    let body = if platform.moving {
        Color::from_rgb_u8(0x9a, 0x6a, 0x3a)
    } else {
        Color::from_rgb_u8(0x7a, 0x52, 0x2b)
    };
    macroquad::shapes::draw_rectangle(x, y, w, h, to_macroquad_color(body));
    macroquad::shapes::draw_rectangle(
        x,
        y,
        w,
        h * 0.25,
        to_macroquad_color(body.lighten(0.3)),
    );
}

fn draw_player(player: &PlayerPresentation, metrics: &ViewMetrics, atlas: Option<&SpriteAtlas>) {
    let (x, y, w, h) = metrics.rect(player.rect);
    if let Some(atlas) = atlas {
        let key = match player.pose {
            PlayerPose::Idle => SpriteKey::PlayerIdle,
            PlayerPose::Ascending => SpriteKey::PlayerAscending,
        };
        let params = DrawParams::new(Vec2::new(x, y), Vec2::new(w, h))
            .with_flip_x(player.facing_left);
        if atlas.draw(key, params).is_ok() {
            return;
        }
    }

    let body = match player.pose {
        PlayerPose::Idle => Color::from_rgb_u8(0x3d, 0xa8, 0x4a),
        PlayerPose::Ascending => Color::from_rgb_u8(0x52, 0xc4, 0x5e),
    };
    macroquad::shapes::draw_rectangle(x, y, w, h, to_macroquad_color(body));

    // Eye marks the facing so mirroring stays visible without textures.
    let eye_x = if player.facing_left {
        x + w * 0.2
    } else {
        x + w * 0.7
    };
    macroquad::shapes::draw_rectangle(
        eye_x,
        y + h * 0.2,
        w * 0.1,
        h * 0.1,
        to_macroquad_color(Color::from_rgb_u8(0x10, 0x10, 0x10)),
    );
}

fn draw_enemy(enemy: &EnemyPresentation, metrics: &ViewMetrics, atlas: Option<&SpriteAtlas>) {
    let (x, y, w, h) = metrics.rect(enemy.rect);
    if let Some(atlas) = atlas {
        if let Some(texture) = atlas.texture(SpriteKey::EnemyFlight) {
            let source = enemy_frame_source(enemy.frame_index, texture.width(), texture.height());
            let params = DrawParams::new(Vec2::new(x, y), Vec2::new(w, h))
                .with_source(source)
                .with_flip_x(enemy.facing_left);
            if atlas.draw(SpriteKey::EnemyFlight, params).is_ok() {
                return;
            }
        }
    }

    let body = Color::from_rgb_u8(0x8a, 0x3d, 0xb8);
    macroquad::shapes::draw_rectangle(x, y, w, h, to_macroquad_color(body));

    // Wing band alternates with the animation frame.
    let wing_alpha = if enemy.frame_index % 2 == 0 { 0.9 } else { 0.5 };
    macroquad::shapes::draw_rectangle(
        x,
        y + h * 0.35,
        w,
        h * 0.3,
        to_macroquad_color(Color::new(1.0, 1.0, 1.0, wing_alpha)),
    );
}

/// Source rectangle of the requested frame within the flight sheet.
fn enemy_frame_source(frame_index: u32, sheet_width: f32, sheet_height: f32) -> MacroquadRect {
    let frame_width = sheet_width / ENEMY_SHEET_FRAMES as f32;
    let frame = frame_index % ENEMY_SHEET_FRAMES;
    MacroquadRect::new(frame as f32 * frame_width, 0.0, frame_width, sheet_height)
}

fn draw_high_score_marker(marker_y: f32, viewport: Viewport, metrics: &ViewMetrics) {
    let (x0, y) = metrics.point(0.0, marker_y);
    let (x1, _) = metrics.point(viewport.width(), marker_y);
    let color = to_macroquad_color(Color::from_rgb_u8(0xe8, 0xc5, 0x2a));
    macroquad::shapes::draw_line(x0, y, x1, y, 2.0, color);
    macroquad::text::draw_text("BEST", x1 - 70.0, y - 6.0, 22.0, color);
}

fn draw_hud(hud: &HudPresentation, metrics: &ViewMetrics, viewport: Viewport) {
    let (x, y) = metrics.point(0.0, 0.0);
    let (w, h) = (
        viewport.width() * metrics.scale_x,
        HUD_PANEL_HEIGHT * metrics.scale_y,
    );
    macroquad::shapes::draw_rectangle(x, y, w, h, to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.35)));

    let text_color = to_macroquad_color(Color::new(1.0, 1.0, 1.0, 1.0));
    let score_line = format!("SCORE: {}", hud.score.get());
    let best_line = format!("BEST: {}", hud.high_score.get());
    macroquad::text::draw_text(&score_line, x + 10.0, y + h * 0.7, 26.0, text_color);

    let best_width = macroquad::text::measure_text(&best_line, None, 26, 1.0).width;
    macroquad::text::draw_text(&best_line, x + w - best_width - 10.0, y + h * 0.7, 26.0, text_color);
}

/// Horizontal band rectangles composing the wipe, in viewport coordinates.
///
/// Even bands grow from the left edge and odd bands from the right, matching
/// the interleaved shutter effect of the fade.
fn fade_band_rects(fade: f32, viewport: Viewport) -> [skyhop_core::Rect; FADE_BANDS] {
    let band_height = viewport.height() / FADE_BANDS as f32;
    let width = fade.clamp(0.0, viewport.width());
    std::array::from_fn(|band| {
        let y = band as f32 * band_height;
        if band % 2 == 0 {
            skyhop_core::Rect::new(0.0, y, width, band_height)
        } else {
            skyhop_core::Rect::new(viewport.width() - width, y, width, band_height)
        }
    })
}

fn draw_fade_curtain(fade: f32, viewport: Viewport, metrics: &ViewMetrics) {
    let color = to_macroquad_color(Color::from_rgb_u8(0x00, 0x00, 0x00));
    for band in fade_band_rects(fade, viewport) {
        let (x, y, w, h) = metrics.rect(band);
        macroquad::shapes::draw_rectangle(x, y, w, h, color);
    }
}

fn draw_game_over(game_over: &GameOverPresentation, viewport: Viewport, metrics: &ViewMetrics) {
    let (x, y) = metrics.point(0.0, 0.0);
    macroquad::shapes::draw_rectangle(
        x,
        y,
        viewport.width() * metrics.scale_x,
        viewport.height() * metrics.scale_y,
        to_macroquad_color(Color::from_rgb_u8(0x00, 0x00, 0x00)),
    );

    let lines: [(String, f32, Color); 4] = [
        (
            "GAME OVER!".to_owned(),
            0.35,
            Color::from_rgb_u8(0xe8, 0x50, 0x3a),
        ),
        (
            format!("SCORE: {}", game_over.score.get()),
            0.45,
            Color::new(1.0, 1.0, 1.0, 1.0),
        ),
        (
            if game_over.new_best {
                "NEW BEST!".to_owned()
            } else {
                format!("BEST: {}", game_over.high_score.get())
            },
            0.53,
            Color::from_rgb_u8(0xe8, 0xc5, 0x2a),
        ),
        (
            "SPACE TO PLAY AGAIN - ESC FOR MENU".to_owned(),
            0.68,
            Color::new(1.0, 1.0, 1.0, 0.8),
        ),
    ];
    for (text, height_ratio, color) in lines {
        draw_centered_text(&text, height_ratio, 36.0, color, viewport, metrics);
    }
}

fn draw_menu(menu: &MenuPresentation, scene: &Scene, metrics: &ViewMetrics) {
    draw_centered_text(
        &menu.heading,
        0.2,
        64.0,
        Color::new(1.0, 1.0, 1.0, 1.0),
        scene.viewport,
        metrics,
    );
    if menu.high_score > skyhop_core::Score::ZERO {
        let best_line = format!("BEST: {}", menu.high_score.get());
        draw_centered_text(
            &best_line,
            0.29,
            30.0,
            Color::from_rgb_u8(0xe8, 0xc5, 0x2a),
            scene.viewport,
            metrics,
        );
    }

    for button in &menu.buttons {
        let (x, y, w, h) = metrics.rect(button.rect);
        let base = Color::from_rgb_u8(0x2c, 0x5f, 0x8a);
        let fill = if button.hovered { base.lighten(0.25) } else { base };
        macroquad::shapes::draw_rectangle(x, y, w, h, to_macroquad_color(fill));

        let size = 30.0;
        let text_dims = macroquad::text::measure_text(&button.label, None, size as u16, 1.0);
        macroquad::text::draw_text(
            &button.label,
            x + (w - text_dims.width) / 2.0,
            y + h / 2.0 + text_dims.height / 2.0,
            size,
            to_macroquad_color(Color::new(1.0, 1.0, 1.0, 1.0)),
        );
    }

    let slider = &menu.slider;
    let (x, y, w, h) = metrics.rect(slider.track);
    macroquad::shapes::draw_rectangle(
        x,
        y,
        w,
        h,
        to_macroquad_color(Color::new(1.0, 1.0, 1.0, 0.4)),
    );
    let (hx, hy) = metrics.point(slider.handle.x, slider.handle.y);
    macroquad::shapes::draw_circle(
        hx,
        hy,
        slider.handle_radius * metrics.scale_x,
        to_macroquad_color(Color::from_rgb_u8(0xe8, 0xe8, 0xe8)),
    );
}

fn draw_centered_text(
    text: &str,
    height_ratio: f32,
    size: f32,
    color: Color,
    viewport: Viewport,
    metrics: &ViewMetrics,
) {
    let text_dims = macroquad::text::measure_text(text, None, size as u16, 1.0);
    let (cx, cy) = metrics.point(viewport.width() / 2.0, viewport.height() * height_ratio);
    macroquad::text::draw_text(
        text,
        cx - text_dims.width / 2.0,
        cy,
        size,
        to_macroquad_color(color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_frames_tile_the_sheet_horizontally() {
        let sheet_width = 192.0;
        let sheet_height = 32.0;

        for frame in 0..ENEMY_SHEET_FRAMES {
            let source = enemy_frame_source(frame, sheet_width, sheet_height);
            assert_eq!(source.x, frame as f32 * 48.0);
            assert_eq!(source.w, 48.0);
            assert_eq!(source.h, sheet_height);
        }

        // Indices past the sheet wrap instead of sampling out of bounds.
        let wrapped = enemy_frame_source(ENEMY_SHEET_FRAMES + 1, sheet_width, sheet_height);
        assert_eq!(wrapped.x, 48.0);
    }

    #[test]
    fn fade_bands_alternate_edges_and_clamp_to_the_viewport() {
        let viewport = Viewport::new(1260.0, 720.0);
        let bands = fade_band_rects(400.0, viewport);

        for (index, band) in bands.iter().enumerate() {
            assert_eq!(band.width, 400.0);
            assert_eq!(band.height, 120.0);
            assert_eq!(band.y, index as f32 * 120.0);
            if index % 2 == 0 {
                assert_eq!(band.x, 0.0);
            } else {
                assert_eq!(band.x, 860.0);
            }
        }

        let saturated = fade_band_rects(5_000.0, viewport);
        for band in saturated {
            assert_eq!(band.width, viewport.width());
        }
    }

    #[test]
    fn frame_budget_accounts_for_elapsed_time() {
        let remaining = remaining_frame_budget(60.0, Duration::from_millis(2))
            .expect("a fast frame leaves budget to sleep");
        assert!(remaining > Duration::from_millis(10));
        assert!(remaining < Duration::from_millis(17));

        assert!(remaining_frame_budget(60.0, Duration::from_millis(30)).is_none());
        assert!(remaining_frame_budget(0.0, Duration::ZERO).is_none());
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(100);

        for _ in 0..9 {
            assert_eq!(counter.record_frame(frame), None);
        }
        let metrics = counter
            .record_frame(frame)
            .expect("one second of frames should produce metrics");
        assert!((metrics.per_second - 10.0).abs() < 0.5);
        assert!((metrics.trailing_ten_seconds - 10.0).abs() < 0.5);
    }
}
