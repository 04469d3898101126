use rand::{rngs::StdRng, Rng};
use tracing::debug;

use crate::config::GameConfig;
use crate::snake::{Direction, MoveResult, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Normal,
    Bonus,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Coords,
    pub kind: FoodKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continued,
    Ate(FoodKind),
    Collided,
}

pub struct GridModel<R = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    score: u32,
    best: u32,
    step_ms: f64,
    rng: R,
}

impl<R: Rng> GridModel<R> {
    pub fn new(config: GameConfig, best: u32, rng: R) -> Self {
        let snake = starting_snake(&config);
        let step_ms = config.base_step_ms;
        let mut grid = GridModel {
            config,
            snake,
            food: Food { pos: (0, 0), kind: FoodKind::Normal },
            score: 0,
            best,
            step_ms,
            rng,
        };
        grid.spawn_food();
        grid
    }

    pub fn reset(&mut self) {
        self.snake = starting_snake(&self.config);
        self.score = 0;
        self.step_ms = self.config.base_step_ms;
        self.spawn_food();
    }

    /// Advances one cell. `requested` is dropped if it would reverse the
    /// heading.
    pub fn tick(&mut self, requested: Direction) -> TickOutcome {
        self.snake.set_direction(requested);

        let new_head = match self.snake.move_step(self.config.dims()) {
            MoveResult::Crashed => {
                self.record_best();
                return TickOutcome::Collided;
            }
            MoveResult::Moved { new_head, .. } => new_head,
        };

        if new_head != self.food.pos {
            return TickOutcome::Continued;
        }

        let kind = self.food.kind;
        if self.snake.len() < self.config.capacity() {
            self.snake.grow();
        }
        self.score += match kind {
            FoodKind::Normal => self.config.normal_points,
            FoodKind::Bonus => self.config.bonus_points,
        };

        let interval = self.config.step_interval_ms(self.score);
        if interval != self.step_ms {
            debug!(score = self.score, interval_ms = interval, "step interval changed");
        }
        self.step_ms = interval;

        self.spawn_food();
        self.record_best();
        TickOutcome::Ate(kind)
    }

    /// Rejection-samples a free cell. When the body covers the whole board
    /// there is nowhere to go and the food stays where it is.
    pub fn spawn_food(&mut self) {
        let kind = if self.rng.gen_bool(self.config.bonus_chance) {
            FoodKind::Bonus
        } else {
            FoodKind::Normal
        };

        if self.snake.len() >= self.config.capacity() {
            return;
        }

        let (cols, rows) = self.config.dims();
        let pos = loop {
            let cell = (self.rng.gen_range(0..cols), self.rng.gen_range(0..rows));
            if !self.snake.occupies(cell) {
                break cell;
            }
        };

        self.food = Food { pos, kind };
        debug!(x = pos.0, y = pos.1, ?kind, "food spawned");
    }

    fn record_best(&mut self) {
        if self.score > self.best {
            self.best = self.score;
        }
    }

    /// Replaces the food, e.g. for scripted scenarios.
    pub fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    /// Replaces the snake, e.g. for scripted scenarios.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn heading(&self) -> Direction {
        self.snake.get_direction()
    }

    pub fn step_interval_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dims(&self) -> Coords {
        self.config.dims()
    }
}

fn starting_snake(config: &GameConfig) -> Snake {
    let dims = config.dims();
    Snake::new((dims.0 / 2, dims.1 / 2), config.start_length, Direction::Right, dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn grid() -> GridModel {
        GridModel::new(GameConfig::default(), 0, StdRng::seed_from_u64(7))
    }

    #[test]
    fn reset_places_snake_at_center() {
        let grid = grid();
        let body = grid.snake().body();
        assert_eq!(body.len(), 7);
        assert_eq!(body[0], (20, 12));
        assert_eq!(body[6], (14, 12));
        assert_eq!(grid.heading(), Direction::Right);
        assert_eq!(grid.score(), 0);
        assert!(!grid.snake().occupies(grid.food().pos));
    }

    #[test]
    fn plain_step_moves_without_growth() {
        let mut grid = grid();
        grid.set_food(Food { pos: (0, 0), kind: FoodKind::Normal });

        assert_eq!(grid.tick(Direction::Right), TickOutcome::Continued);
        assert_eq!(grid.snake().head(), (21, 12));
        assert_eq!(grid.snake().len(), 7);
        assert!(!grid.snake().occupies((14, 12)));
        assert_eq!(grid.score(), 0);
    }

    #[test]
    fn reversal_request_keeps_heading() {
        let mut grid = grid();
        grid.set_food(Food { pos: (0, 0), kind: FoodKind::Normal });

        grid.tick(Direction::Left);
        assert_eq!(grid.heading(), Direction::Right);
        assert_eq!(grid.snake().head(), (21, 12));
    }

    #[test]
    fn eating_grows_scores_and_respawns() {
        let mut grid = grid();
        grid.set_food(Food { pos: (21, 12), kind: FoodKind::Normal });
        let old_tail = *grid.snake().body().last().unwrap();

        assert_eq!(grid.tick(Direction::Right), TickOutcome::Ate(FoodKind::Normal));
        assert_eq!(grid.snake().len(), 8);
        assert_eq!(*grid.snake().body().last().unwrap(), old_tail);
        assert_eq!(*grid.snake().previous().last().unwrap(), old_tail);
        assert_eq!(grid.score(), 10);
        assert_eq!(grid.best(), 10);
        assert!(!grid.snake().occupies(grid.food().pos));
    }

    #[test]
    fn bonus_food_is_worth_more() {
        let mut grid = grid();
        grid.set_food(Food { pos: (21, 12), kind: FoodKind::Bonus });
        assert_eq!(grid.tick(Direction::Right), TickOutcome::Ate(FoodKind::Bonus));
        assert_eq!(grid.score(), 30);
    }

    #[test]
    fn interval_drops_after_enough_points() {
        let mut grid = grid();
        for x in 21..24 {
            grid.set_food(Food { pos: (x, 12), kind: FoodKind::Bonus });
            grid.tick(Direction::Right);
        }
        assert_eq!(grid.score(), 90);
        assert_eq!(grid.step_interval_ms(), 92.0);

        grid.reset();
        assert_eq!(grid.step_interval_ms(), 95.0);
        assert_eq!(grid.best(), 90);
    }

    #[test]
    fn full_board_leaves_food_alone() {
        let config = GameConfig { cols: 4, rows: 4, start_length: 2, ..GameConfig::default() };
        let mut grid = GridModel::new(config, 0, StdRng::seed_from_u64(1));
        let cells: Vec<Coords> = (0..16).map(|i| (i % 4, i / 4)).collect();
        grid.set_snake(Snake::from_cells(cells, Direction::Right));
        let food = grid.food();

        grid.spawn_food();
        assert_eq!(grid.food().pos, food.pos);
    }

    #[test]
    fn food_lands_on_the_only_free_cell() {
        let config = GameConfig { cols: 4, rows: 4, start_length: 2, ..GameConfig::default() };
        let cells: Vec<Coords> = (0..15).map(|i| (i % 4, i / 4)).collect();

        for seed in 0..64 {
            let mut grid = GridModel::new(config.clone(), 0, StdRng::seed_from_u64(seed));
            grid.set_snake(Snake::from_cells(cells.clone(), Direction::Right));
            for _ in 0..8 {
                grid.spawn_food();
                assert_eq!(grid.food().pos, (3, 3), "seed {}", seed);
            }
        }
    }

    #[test]
    fn food_never_spawns_on_the_body() {
        let config = GameConfig { cols: 6, rows: 4, start_length: 2, ..GameConfig::default() };
        let mut grid = GridModel::new(config, 0, StdRng::seed_from_u64(3));
        let cells: Vec<Coords> = (0..18).map(|i| (i % 6, i / 6)).collect();
        grid.set_snake(Snake::from_cells(cells, Direction::Right));

        for _ in 0..200 {
            grid.spawn_food();
            assert!(!grid.snake().occupies(grid.food().pos));
        }
    }
}
