use std::time::Duration;

use rand::{rngs::StdRng, Rng};
use tracing::{debug, info};

use crate::audio::Cue;
use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::grid::{GridModel, TickOutcome};
use crate::host::Host;
use crate::mode::{Command, Mode, Transition};
use crate::prefs::ScoreStore;
use crate::render::{draw_frame, FrameView};
use crate::scheduler::{StepReport, StepScheduler, Ticker};
use crate::snake::Direction;
use crate::stars::StarField;

pub struct Game<H, S, R = StdRng> {
    grid: GridModel<R>,
    mode: Mode,
    scheduler: StepScheduler,
    alpha: f64,
    requested: Direction,
    stars: StarField,
    clock_s: f64,
    fullscreen: bool,
    saved_best: u32,
    host: H,
    store: S,
}

/// Adapts the grid to the scheduler, applying the buffered heading and
/// counting meals.
struct Steering<'a, R> {
    grid: &'a mut GridModel<R>,
    requested: Direction,
    ate: u32,
}

impl<R: Rng> Ticker for Steering<'_, R> {
    fn interval_ms(&self) -> f64 {
        self.grid.step_interval_ms()
    }

    fn tick(&mut self) -> TickOutcome {
        let outcome = self.grid.tick(self.requested);
        if let TickOutcome::Ate(_) = outcome {
            self.ate += 1;
        }
        outcome
    }
}

impl<H: Host, S: ScoreStore, R: Rng> Game<H, S, R> {
    pub fn new(config: GameConfig, mut host: H, store: S, mut rng: R, fullscreen: bool) -> Self {
        let best = store.load_best();
        let stars = StarField::new(config.star_count, rng.gen());
        let grid = GridModel::new(config, best, rng);
        host.set_fullscreen(fullscreen);

        Game {
            requested: grid.heading(),
            grid,
            mode: Mode::Menu,
            scheduler: StepScheduler::new(),
            alpha: 1.0,
            stars,
            clock_s: 0.0,
            fullscreen,
            saved_best: best,
            host,
            store,
        }
    }

    /// Applies one input command. Returns `false` once the player asked to
    /// quit.
    pub fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return false,
            Command::ToggleFullscreen => self.set_fullscreen(!self.fullscreen),
            Command::Steer(dir) => self.steer(dir),
            _ => {}
        }

        match self.mode.on(cmd) {
            Transition::Stay => {}
            Transition::NewGame => self.new_game(),
            Transition::Enter(Mode::Menu) => {
                self.set_fullscreen(false);
                self.grid.reset();
                self.scheduler.reset();
                self.enter(Mode::Menu);
            }
            Transition::Enter(mode) => self.enter(mode),
        }
        true
    }

    fn steer(&mut self, dir: Direction) {
        // Checked against the heading committed at the last step, so two
        // quick turns cannot fold the snake back onto itself.
        if self.mode.is_playing() && dir != self.grid.heading().opposite() {
            self.requested = dir;
        }
    }

    fn new_game(&mut self) {
        self.grid.reset();
        self.scheduler.reset();
        self.requested = self.grid.heading();
        self.alpha = 0.0;
        self.enter(Mode::Running);
    }

    fn enter(&mut self, mode: Mode) {
        if mode != self.mode {
            info!(from = ?self.mode, to = ?mode, "mode change");
        }
        self.mode = mode;
    }

    fn set_fullscreen(&mut self, on: bool) {
        if on != self.fullscreen {
            debug!(on, "fullscreen");
            self.fullscreen = on;
            self.host.set_fullscreen(on);
        }
    }

    fn persist_best(&mut self) {
        let best = self.grid.best();
        if best > self.saved_best {
            self.store.save_best(best);
            self.saved_best = best;
        }
    }

    /// Advances by `dt` of wall time. Only a running game steps the grid;
    /// in every other mode the snake is drawn settled (alpha 1).
    pub fn frame(&mut self, dt: Duration) -> StepReport {
        let dt_s = dt.as_secs_f64();
        self.clock_s += dt_s;
        self.stars.update(dt_s as f32);

        if !self.mode.is_playing() {
            self.alpha = 1.0;
            return StepReport { ticks: 0, leftover_ms: self.scheduler.accumulated_ms(), terminated: false };
        }

        let mut steering = Steering { grid: &mut self.grid, requested: self.requested, ate: 0 };
        let report = self.scheduler.advance(dt_s * 1000.0, &mut steering);
        let ate = steering.ate;

        if ate > 0 {
            self.host.play_cue(Cue::Eat);
        }
        if report.terminated {
            self.mode = self.mode.on_collision();
            self.host.play_cue(Cue::Collide);
            info!(score = self.grid.score(), best = self.grid.best(), "game over");
        }
        self.persist_best();

        self.alpha = (report.leftover_ms / self.grid.step_interval_ms()).clamp(0.0, 1.0);
        report
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let snake = self.grid.snake();
        let view = FrameView {
            config: self.grid.config(),
            mode: self.mode,
            snake,
            food: self.grid.food(),
            score: self.grid.score(),
            best: self.grid.best(),
            alpha: self.alpha,
            stars: self.stars.stars(),
            time_s: self.clock_s,
        };
        draw_frame(canvas, &view);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn requested_direction(&self) -> Direction {
        self.requested
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn grid(&self) -> &GridModel<R> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridModel<R> {
        &mut self.grid
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use crate::prefs::MemoryPrefs;
    use rand::SeedableRng;

    fn game() -> Game<NullHost, MemoryPrefs> {
        Game::new(GameConfig::default(), NullHost, MemoryPrefs::default(), StdRng::seed_from_u64(5), true)
    }

    #[test]
    fn menu_does_not_step() {
        let mut g = game();
        let head = g.grid().snake().head();
        let report = g.frame(Duration::from_millis(500));
        assert_eq!(report.ticks, 0);
        assert_eq!(g.grid().snake().head(), head);
        assert_eq!(g.alpha(), 1.0);
    }

    #[test]
    fn steering_outside_play_is_ignored() {
        let mut g = game();
        g.handle(Command::Steer(Direction::Up));
        assert_eq!(g.requested_direction(), Direction::Right);
    }

    #[test]
    fn reverse_steer_is_filtered() {
        let mut g = game();
        g.handle(Command::Start);
        g.handle(Command::Steer(Direction::Left));
        assert_eq!(g.requested_direction(), Direction::Right);
        g.handle(Command::Steer(Direction::Down));
        assert_eq!(g.requested_direction(), Direction::Down);
    }

    #[test]
    fn alpha_tracks_leftover() {
        let mut g = game();
        g.handle(Command::Start);
        let report = g.frame(Duration::from_millis(10));
        assert_eq!(report.ticks, 0);
        assert!((g.alpha() - 10.0 / 95.0).abs() < 1e-9);
    }

    #[test]
    fn quit_stops() {
        let mut g = game();
        assert!(g.handle(Command::Start));
        assert!(!g.handle(Command::Quit));
    }
}
