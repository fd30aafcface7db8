//! Widget behavior tests for the title and pause menu.

use skyhop_core::{PointerFrame, Score, Viewport};
use skyhop_system_menu::{MenuAction, MenuModel, MenuView};

const VIEWPORT: Viewport = Viewport::new(1260.0, 720.0);

fn menu() -> MenuModel {
    MenuModel::new(VIEWPORT)
}

fn idle_at(x: f32, y: f32) -> PointerFrame {
    PointerFrame {
        x,
        y,
        ..PointerFrame::default()
    }
}

fn press_at(x: f32, y: f32) -> PointerFrame {
    PointerFrame {
        x,
        y,
        pressed: true,
        press_started: true,
        press_released: false,
    }
}

fn hold_at(x: f32, y: f32) -> PointerFrame {
    PointerFrame {
        x,
        y,
        pressed: true,
        press_started: false,
        press_released: false,
    }
}

fn release_at(x: f32, y: f32) -> PointerFrame {
    PointerFrame {
        x,
        y,
        pressed: false,
        press_started: false,
        press_released: true,
    }
}

fn center(view: &MenuView) -> ((f32, f32), (f32, f32)) {
    let play = view.play.rect;
    let exit = view.exit.rect;
    (
        (play.left() + play.width / 2.0, play.top() + play.height / 2.0),
        (exit.left() + exit.width / 2.0, exit.top() + exit.height / 2.0),
    )
}

#[test]
fn buttons_activate_once_per_press() {
    let mut menu = menu();
    let ((px, py), _) = center(&menu.view());

    let response = menu.update(&press_at(px, py));
    assert_eq!(response.action, Some(MenuAction::Play));

    // Holding the press over the button must not retrigger.
    let response = menu.update(&hold_at(px, py));
    assert_eq!(response.action, None);
    let response = menu.update(&release_at(px, py));
    assert_eq!(response.action, None);

    // A fresh press activates again.
    let response = menu.update(&press_at(px, py));
    assert_eq!(response.action, Some(MenuAction::Play));
}

#[test]
fn exit_button_reports_its_own_action() {
    let mut menu = menu();
    let (_, (ex, ey)) = center(&menu.view());

    let response = menu.update(&press_at(ex, ey));
    assert_eq!(response.action, Some(MenuAction::Exit));
}

#[test]
fn presses_outside_every_widget_do_nothing() {
    let mut menu = menu();
    let response = menu.update(&press_at(5.0, 5.0));
    assert_eq!(response.action, None);
    assert_eq!(response.volume, None);
}

#[test]
fn hover_state_follows_the_pointer() {
    let mut menu = menu();
    let ((px, py), _) = center(&menu.view());

    let _ = menu.update(&idle_at(px, py));
    assert!(menu.view().play.hovered);
    assert!(!menu.view().exit.hovered);

    let _ = menu.update(&idle_at(5.0, 5.0));
    assert!(!menu.view().play.hovered);
}

#[test]
fn slider_drag_tracks_and_clamps_the_pointer() {
    let mut menu = menu();
    let slider = menu.view().slider;
    assert_eq!(slider.value, 30.0);

    // Grab the handle where it currently rests.
    let response = menu.update(&press_at(slider.handle_x, slider.handle_y));
    assert_eq!(response.action, None);

    // Dragging to the track midpoint lands on 50 percent.
    let mid_x = slider.track.left() + slider.track.width / 2.0;
    let response = menu.update(&hold_at(mid_x, slider.handle_y));
    assert_eq!(response.volume, Some(50.0));

    // Dragging far beyond the track clamps to the maximum.
    let response = menu.update(&hold_at(slider.track.right() + 400.0, slider.handle_y));
    assert_eq!(response.volume, Some(100.0));
    assert_eq!(menu.volume(), 100.0);

    // Releasing ends the drag; further motion changes nothing.
    let _ = menu.update(&release_at(mid_x, slider.handle_y));
    let response = menu.update(&hold_at(mid_x, slider.handle_y));
    assert_eq!(response.volume, None);
    assert_eq!(menu.volume(), 100.0);
}

#[test]
fn pressing_the_track_away_from_the_handle_starts_no_drag() {
    let mut menu = menu();
    let slider = menu.view().slider;

    let far_x = slider.track.right() - 1.0;
    let _ = menu.update(&press_at(far_x, slider.handle_y));
    let response = menu.update(&hold_at(far_x - 50.0, slider.handle_y));
    assert_eq!(response.volume, None);
    assert_eq!(menu.volume(), 30.0);
}

#[test]
fn pause_flag_swaps_the_primary_label() {
    let mut menu = menu();
    assert_eq!(menu.view().play.label, "Play");
    assert_eq!(menu.view().heading, "Sky Hop");

    menu.set_paused(true);
    assert!(menu.is_paused());
    assert_eq!(menu.view().play.label, "Resume");
    assert_eq!(menu.view().heading, "Paused");
}

#[test]
fn high_score_is_surfaced_to_the_view() {
    let mut menu = menu();
    menu.set_high_score(Score::new(4_200));
    assert_eq!(menu.view().high_score, Score::new(4_200));
}
