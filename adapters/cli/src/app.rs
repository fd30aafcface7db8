//! Per-frame glue between the windowing backend and the simulation.
//!
//! One [`Session::frame`] call maps raw frame input to world commands, runs
//! the spawning system over the resulting events, reacts to the event batch
//! (audio, persistence, menu state), and finally repopulates the scene.

use std::path::PathBuf;

use glam::Vec2;
use skyhop_core::{Command, Event, GamePhase, InputFrame, Score, SoundCue};
use skyhop_rendering::{
    AudioSink, ButtonPresentation, EnemyPresentation, FrameInput, GameOverPresentation,
    HudPresentation, MenuPresentation, PlatformPresentation, PlayerPresentation, RenderingError,
    Scene, SliderPresentation,
};
use skyhop_system_menu::{MenuAction, MenuModel};
use skyhop_system_spawning::{BoardView, Spawning};
use skyhop_world::{apply, query, World};

use crate::high_score;

/// Owns the simulation and systems for the lifetime of the window.
pub(crate) struct Session<A: AudioSink> {
    world: World,
    spawning: Spawning,
    menu: MenuModel,
    audio: A,
    score_file: PathBuf,
    new_best_this_life: bool,
    exit_requested: bool,
}

impl<A: AudioSink> Session<A> {
    pub(crate) fn new(
        world: World,
        spawning: Spawning,
        menu: MenuModel,
        audio: A,
        score_file: PathBuf,
    ) -> Self {
        Self {
            world,
            spawning,
            menu,
            audio,
            score_file,
            new_best_this_life: false,
            exit_requested: false,
        }
    }

    /// Builds the scene handed to the backend before the first frame.
    pub(crate) fn initial_scene(&self) -> Result<Scene, RenderingError> {
        let player = query::player(&self.world);
        Scene::new(
            query::viewport(&self.world),
            PlayerPresentation {
                rect: player.rect,
                pose: player.pose,
                facing_left: player.facing_left,
            },
            HudPresentation {
                score: query::score(&self.world),
                high_score: query::high_score(&self.world),
                high_score_marker_y: None,
            },
            query::target_tick_rate(&self.world),
        )
    }

    /// Advances the session by one frame.
    pub(crate) fn frame(&mut self, input: FrameInput, scene: &mut Scene) {
        let mut events = Vec::new();
        for command in self.decide_commands(&input) {
            apply(&mut self.world, command, &mut events);
        }

        let mut spawn_commands = Vec::new();
        self.spawning
            .handle(&events, self.board_view(), &mut spawn_commands);
        for command in spawn_commands {
            apply(&mut self.world, command, &mut events);
        }

        self.react(&events);
        self.populate_scene(scene);
    }

    /// Maps raw frame input to world commands for the current phase.
    fn decide_commands(&mut self, input: &FrameInput) -> Vec<Command> {
        let mut commands = Vec::new();
        match query::phase(&self.world) {
            GamePhase::Playing => {
                if input.pause_pressed {
                    commands.push(Command::PauseGame);
                } else {
                    commands.push(Command::Tick {
                        input: InputFrame {
                            move_left: input.move_left,
                            move_right: input.move_right,
                        },
                    });
                }
            }
            GamePhase::GameOverFading => {
                commands.push(Command::Tick {
                    input: InputFrame::default(),
                });
            }
            GamePhase::Menu { paused } => {
                let response = self.menu.update(&input.pointer);
                if let Some(volume) = response.volume {
                    self.audio.set_music_volume(volume / 100.0);
                }
                match response.action {
                    Some(MenuAction::Play) => {
                        commands.push(if paused {
                            Command::ResumeGame
                        } else {
                            Command::StartGame
                        });
                    }
                    Some(MenuAction::Exit) => self.request_exit(),
                    None => {}
                }
                if input.pause_pressed {
                    if paused {
                        commands.push(Command::ResumeGame);
                    } else {
                        self.request_exit();
                    }
                }
            }
            GamePhase::GameOverScreen => {
                if input.confirm_pressed {
                    commands.push(Command::StartGame);
                } else if input.pause_pressed {
                    commands.push(Command::ShowTitle);
                }
            }
        }
        commands
    }

    fn request_exit(&mut self) {
        self.persist_final_score();
        self.exit_requested = true;
    }

    fn board_view(&self) -> BoardView {
        let platforms = query::platforms(&self.world);
        BoardView {
            viewport: query::viewport(&self.world),
            lane: query::lane(&self.world),
            score: query::score(&self.world),
            platform_count: platforms.len(),
            topmost_platform_y: platforms.topmost_y(),
            enemy_alive: query::enemy_alive(&self.world),
        }
    }

    fn react(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::Jumped => self.audio.play(SoundCue::Jump),
                Event::PlayerDied { .. } => self.audio.play(SoundCue::Death),
                Event::HighScoreRaised { score } => {
                    self.new_best_this_life = true;
                    self.menu.set_high_score(*score);
                    if let Err(error) = high_score::save(&self.score_file, *score) {
                        eprintln!("failed to persist high score: {error:#}");
                    }
                }
                Event::PhaseChanged { phase } => match phase {
                    GamePhase::Menu { paused } => self.menu.set_paused(*paused),
                    GamePhase::Playing => {
                        self.menu.set_paused(false);
                        self.new_best_this_life = false;
                    }
                    GamePhase::GameOverFading | GamePhase::GameOverScreen => {}
                },
                _ => {}
            }
        }
    }

    fn populate_scene(&self, scene: &mut Scene) {
        let viewport = query::viewport(&self.world);
        let phase = query::phase(&self.world);
        scene.phase = phase;
        scene.background_offset = query::background_scroll(&self.world);
        scene.fade = query::fade_progress(&self.world);
        scene.target_tick_rate = query::target_tick_rate(&self.world);
        scene.exit_requested = self.exit_requested;

        let player = query::player(&self.world);
        scene.player = PlayerPresentation {
            rect: player.rect,
            pose: player.pose,
            facing_left: player.facing_left,
        };

        scene.platforms.clear();
        scene
            .platforms
            .extend(
                query::platforms(&self.world)
                    .iter()
                    .map(|platform| PlatformPresentation {
                        rect: platform.rect,
                        moving: platform.moving,
                    }),
            );

        scene.enemy = query::enemy(&self.world).map(|enemy| EnemyPresentation {
            rect: enemy.rect,
            frame_index: enemy.frame_index,
            facing_left: enemy.facing_left,
        });

        let score = query::score(&self.world);
        let high_score = query::high_score(&self.world);
        let marker_y = query::high_score_marker_y(&self.world);
        let marker_visible =
            high_score > Score::ZERO && marker_y >= 0.0 && marker_y <= viewport.height();
        scene.hud = HudPresentation {
            score,
            high_score,
            high_score_marker_y: marker_visible.then_some(marker_y),
        };

        scene.menu = matches!(phase, GamePhase::Menu { .. })
            .then(|| menu_presentation(&self.menu));
        scene.game_over = (phase == GamePhase::GameOverScreen).then(|| GameOverPresentation {
            score,
            high_score,
            new_best: self.new_best_this_life,
        });
    }

    /// Persists the best score observed so far, covering lives that were
    /// still in progress when the window closed.
    pub(crate) fn persist_final_score(&self) {
        let best = query::score(&self.world).max(query::high_score(&self.world));
        if best > Score::ZERO {
            if let Err(error) = high_score::save(&self.score_file, best) {
                eprintln!("failed to persist high score: {error:#}");
            }
        }
    }
}

fn menu_presentation(menu: &MenuModel) -> MenuPresentation {
    let view = menu.view();
    MenuPresentation {
        heading: view.heading.to_owned(),
        buttons: vec![
            ButtonPresentation {
                rect: view.play.rect,
                label: view.play.label.to_owned(),
                hovered: view.play.hovered,
            },
            ButtonPresentation {
                rect: view.exit.rect,
                label: view.exit.label.to_owned(),
                hovered: view.exit.hovered,
            },
        ],
        slider: SliderPresentation {
            track: view.slider.track,
            handle: Vec2::new(view.slider.handle_x, view.slider.handle_y),
            handle_radius: view.slider.handle_radius,
        },
        high_score: view.high_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyhop_core::PointerFrame;
    use skyhop_rendering::NullAudio;
    use skyhop_system_spawning::Config as SpawnConfig;

    fn session() -> Session<NullAudio> {
        let world = World::new();
        let menu = MenuModel::new(query::viewport(&world));
        Session::new(
            world,
            Spawning::new(SpawnConfig::new(1)),
            menu,
            NullAudio,
            std::env::temp_dir().join(format!("skyhop-session-{}.txt", std::process::id())),
        )
    }

    #[test]
    fn first_playing_frame_fills_the_board() {
        let mut session = session();
        let mut scene = session.initial_scene().expect("viewport is valid");

        // Click the Play button on the title screen.
        let view = session.menu.view();
        let press = FrameInput {
            pointer: PointerFrame {
                x: view.play.rect.left() + view.play.rect.width / 2.0,
                y: view.play.rect.top() + view.play.rect.height / 2.0,
                pressed: true,
                press_started: true,
                press_released: false,
            },
            ..FrameInput::default()
        };
        session.frame(press, &mut scene);

        assert_eq!(scene.phase, GamePhase::Playing);
        assert_eq!(scene.platforms.len(), skyhop_core::MAX_PLATFORMS);
        assert!(scene.menu.is_none());
        assert!(scene.game_over.is_none());
    }

    #[test]
    fn escape_pauses_and_resumes_the_run() {
        let mut session = session();
        let mut scene = session.initial_scene().expect("viewport is valid");

        let view = session.menu.view();
        let press = FrameInput {
            pointer: PointerFrame {
                x: view.play.rect.left() + 1.0,
                y: view.play.rect.top() + 1.0,
                pressed: true,
                press_started: true,
                press_released: false,
            },
            ..FrameInput::default()
        };
        session.frame(press, &mut scene);
        assert_eq!(scene.phase, GamePhase::Playing);

        let escape = FrameInput {
            pause_pressed: true,
            ..FrameInput::default()
        };
        session.frame(escape, &mut scene);
        assert_eq!(scene.phase, GamePhase::Menu { paused: true });
        let menu = scene.menu.as_ref().expect("pause menu is drawn");
        assert_eq!(menu.buttons[0].label, "Resume");

        session.frame(escape, &mut scene);
        assert_eq!(scene.phase, GamePhase::Playing);
    }

    #[test]
    fn exit_from_the_title_screen_requests_shutdown() {
        let mut session = session();
        let mut scene = session.initial_scene().expect("viewport is valid");

        let escape = FrameInput {
            pause_pressed: true,
            ..FrameInput::default()
        };
        session.frame(escape, &mut scene);
        assert!(scene.exit_requested);
    }

    #[test]
    fn playing_frames_tick_the_simulation() {
        let mut session = session();
        let mut scene = session.initial_scene().expect("viewport is valid");

        let view = session.menu.view();
        let press = FrameInput {
            pointer: PointerFrame {
                x: view.play.rect.left() + 1.0,
                y: view.play.rect.top() + 1.0,
                pressed: true,
                press_started: true,
                press_released: false,
            },
            ..FrameInput::default()
        };
        session.frame(press, &mut scene);

        let y_before = scene.player.rect.y;
        session.frame(FrameInput::default(), &mut scene);
        assert!(scene.player.rect.y > y_before, "gravity pulls the player");
    }
}
