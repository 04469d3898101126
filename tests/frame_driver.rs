use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use wrapsnake::audio::Cue;
use wrapsnake::canvas::{Canvas, Rgba};
use wrapsnake::config::GameConfig;
use wrapsnake::game::Game;
use wrapsnake::grid::{Food, FoodKind};
use wrapsnake::host::Host;
use wrapsnake::mode::{Command, Mode};
use wrapsnake::path::{Path, Point};
use wrapsnake::prefs::MemoryPrefs;
use wrapsnake::snake::{Direction, Snake};

#[derive(Debug, Default)]
struct RecordingHost {
    cues: Vec<Cue>,
    fullscreen: Vec<bool>,
}

impl Host for RecordingHost {
    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_fullscreen(&mut self, on: bool) {
        self.fullscreen.push(on);
    }
}

#[derive(Debug)]
struct Recorder {
    size: (f64, f64),
    texts: Vec<String>,
    strokes: usize,
    circles: usize,
}

impl Recorder {
    fn new() -> Self {
        Recorder { size: (400.0, 240.0), texts: vec![], strokes: 0, circles: 0 }
    }

    fn saw(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl Canvas for Recorder {
    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn fill_gradient(&mut self, _from: Rgba, _to: Rgba) {}

    fn fill_circle(&mut self, _center: Point, _radius: f64, _color: Rgba) {
        self.circles += 1;
    }

    fn fill_round_rect(&mut self, _origin: Point, _size: (f64, f64), _radius: f64, _color: Rgba) {}

    fn stroke_path(&mut self, _path: &Path, _width: f64, _color: Rgba) {
        self.strokes += 1;
    }

    fn text(&mut self, _at: Point, text: &str, _color: Rgba) {
        self.texts.push(text.to_string());
    }

    fn text_width(&self, text: &str) -> f64 {
        text.len() as f64 * 8.0
    }

    fn line_height(&self) -> f64 {
        16.0
    }
}

type TestGame = Game<RecordingHost, MemoryPrefs>;

const FRAME: Duration = Duration::from_millis(100);
const FAR_AWAY: Food = Food { pos: (0, 0), kind: FoodKind::Normal };

fn game_with_best(best: u32) -> TestGame {
    Game::new(
        GameConfig::default(),
        RecordingHost::default(),
        MemoryPrefs::with_best(best),
        StdRng::seed_from_u64(42),
        true,
    )
}

fn running(best: u32) -> TestGame {
    let mut game = game_with_best(best);
    game.handle(Command::Start);
    game.grid_mut().set_food(FAR_AWAY);
    game
}

/// Steers, then runs exactly one step.
fn step(game: &mut TestGame, dir: Direction) {
    game.handle(Command::Steer(dir));
    let report = game.frame(FRAME);
    assert_eq!(report.ticks, 1);
}

#[test]
fn first_step_from_center() {
    let mut game = running(0);
    let snake = game.grid().snake();
    assert_eq!(snake.len(), 7);
    assert_eq!(snake.head(), (20, 12));

    step(&mut game, Direction::Right);

    let snake = game.grid().snake();
    assert_eq!(snake.head(), (21, 12));
    assert_eq!(snake.len(), 7);
    assert!(!snake.occupies((14, 12)));
    assert_eq!(game.grid().score(), 0);
    assert_eq!(game.mode(), Mode::Running);
}

#[test]
fn right_edge_column_wraps_to_left() {
    let mut game = running(0);
    let column: Vec<_> = (0..24).map(|i| (39, (12 + i) % 24)).collect();
    game.grid_mut().set_snake(Snake::from_cells(column, Direction::Right));

    step(&mut game, Direction::Right);

    assert_eq!(game.grid().snake().head(), (0, 12));
    assert_eq!(game.mode(), Mode::Running);
}

#[test]
fn hook_into_body_ends_game_without_new_best() {
    let mut game = running(50);

    step(&mut game, Direction::Up);
    step(&mut game, Direction::Left);
    game.handle(Command::Steer(Direction::Down));
    let report = game.frame(FRAME);

    assert!(report.terminated);
    assert_eq!(game.mode(), Mode::GameOver);
    assert_eq!(game.grid().snake().head(), game.grid().snake().body()[4]);
    assert_eq!(game.host().cues, vec![Cue::Collide]);
    assert_eq!(game.grid().best(), 50);
    assert_eq!(game.store().writes, 0);
}

#[test]
fn new_best_is_saved_once_reached() {
    let mut game = running(0);
    game.grid_mut().set_food(Food { pos: (21, 12), kind: FoodKind::Normal });

    step(&mut game, Direction::Right);
    assert_eq!(game.grid().score(), 10);
    assert_eq!(game.host().cues, vec![Cue::Eat]);
    assert_eq!(game.store().best, 10);
    assert_eq!(game.store().writes, 1);

    // Crash afterwards; the best is already stored, nothing new to write.
    for dir in [Direction::Up, Direction::Left] {
        game.grid_mut().set_food(FAR_AWAY);
        step(&mut game, dir);
    }
    game.grid_mut().set_food(FAR_AWAY);
    game.handle(Command::Steer(Direction::Down));
    game.frame(FRAME);

    assert_eq!(game.mode(), Mode::GameOver);
    assert_eq!(game.grid().best(), 10);
    assert_eq!(game.store().writes, 1);
}

#[test]
fn growth_keeps_old_tail() {
    let mut game = running(0);
    game.grid_mut().set_food(Food { pos: (21, 12), kind: FoodKind::Bonus });
    let old_tail = *game.grid().snake().body().last().unwrap();

    step(&mut game, Direction::Right);

    let snake = game.grid().snake();
    assert_eq!(snake.len(), 8);
    assert_eq!(*snake.body().last().unwrap(), old_tail);
    assert_eq!(game.grid().score(), 30);
}

#[test]
fn catch_up_after_a_stall() {
    let mut game = running(0);
    let report = game.frame(Duration::from_secs_f64(3.5 * 0.095));

    assert_eq!(report.ticks, 3);
    assert!((report.leftover_ms - 47.5).abs() < 1e-6);
    assert!((game.alpha() - 0.5).abs() < 1e-6);
    assert_eq!(game.grid().snake().head(), (23, 12));
}

#[test]
fn pause_freezes_the_grid() {
    let mut game = running(0);
    game.handle(Command::TogglePause);
    assert_eq!(game.mode(), Mode::Paused);

    let head = game.grid().snake().head();
    let report = game.frame(Duration::from_secs(2));
    assert_eq!(report.ticks, 0);
    assert_eq!(game.grid().snake().head(), head);
    assert_eq!(game.alpha(), 1.0);

    game.handle(Command::TogglePause);
    assert_eq!(game.mode(), Mode::Running);
    assert_eq!(game.frame(FRAME).ticks, 1);
}

#[test]
fn restart_resets_everything() {
    let mut game = running(0);
    game.grid_mut().set_food(Food { pos: (21, 12), kind: FoodKind::Normal });
    step(&mut game, Direction::Right);
    game.grid_mut().set_food(FAR_AWAY);
    step(&mut game, Direction::Down);

    game.handle(Command::Restart);
    assert_eq!(game.mode(), Mode::Running);
    assert_eq!(game.grid().score(), 0);
    assert_eq!(game.grid().snake().len(), 7);
    assert_eq!(game.grid().snake().head(), (20, 12));
    assert_eq!(game.requested_direction(), Direction::Right);
    assert_eq!(game.alpha(), 0.0);
    assert_eq!(game.grid().best(), 10);
}

#[test]
fn escape_returns_to_menu_and_leaves_fullscreen() {
    let mut game = running(0);
    assert!(game.is_fullscreen());

    game.handle(Command::Menu);
    assert_eq!(game.mode(), Mode::Menu);
    assert!(!game.is_fullscreen());
    assert_eq!(game.host().fullscreen, vec![true, false]);

    game.handle(Command::ToggleFullscreen);
    assert!(game.is_fullscreen());
    assert_eq!(game.host().fullscreen, vec![true, false, true]);
}

#[test]
fn overlays_follow_mode() {
    let mut game = game_with_best(70);

    let mut canvas = Recorder::new();
    game.render(&mut canvas);
    assert!(canvas.saw("WRAPSNAKE"));
    assert!(canvas.saw("Best: 70"));

    game.handle(Command::Start);
    let mut canvas = Recorder::new();
    game.render(&mut canvas);
    assert!(canvas.saw("Score: 0"));
    assert!(!canvas.saw("WRAPSNAKE"));
    assert!(!canvas.saw("PAUSED"));
    // glow, body and highlight for the single unbroken body
    assert_eq!(canvas.strokes, 3);

    game.handle(Command::TogglePause);
    let mut canvas = Recorder::new();
    game.render(&mut canvas);
    assert!(canvas.saw("PAUSED"));
}

#[test]
fn game_over_screen_shows_scores() {
    let mut game = running(0);
    step(&mut game, Direction::Up);
    step(&mut game, Direction::Left);
    game.handle(Command::Steer(Direction::Down));
    game.frame(FRAME);
    assert_eq!(game.mode(), Mode::GameOver);

    let mut canvas = Recorder::new();
    game.render(&mut canvas);
    assert!(canvas.saw("GAME OVER"));
    assert!(canvas.saw("Final Score: 0"));
    assert!(canvas.saw("Best Score: 0"));
}
