use crate::{Coords, GridInt};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Coords },
    Crashed
}

/// Snake cells, head first, in two snapshots: `current` is authoritative,
/// `previous` holds the same slots as they were before the last step and
/// is only read by the renderer.
#[derive(Clone, Debug)]
pub struct Snake {
    current: Vec<Coords>,
    previous: Vec<Coords>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Coords, size: usize, direction: Direction, dims: Coords) -> Self {
        let diff = direction.delta();

        let current: Vec<Coords> = (0..size as GridInt)
            .map(|i| wrap((head.0 - diff.0 * i, head.1 - diff.1 * i), dims))
            .collect();
        let previous = current.clone();
        Snake { current, previous, direction }
    }

    /// Builds a snake from explicit cells, head first. Both snapshots start
    /// equal.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(cells: Vec<Coords>, direction: Direction) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least a head");
        let previous = cells.clone();
        Snake { current: cells, previous, direction }
    }

    pub fn body(&self) -> &[Coords] {
        &self.current
    }

    pub fn previous(&self) -> &[Coords] {
        &self.previous
    }

    pub fn head(&self) -> Coords {
        self.current[0]
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn occupies(&self, cell: Coords) -> bool {
        self.current.contains(&cell)
    }

    /// Snapshots, shifts every cell into its predecessor's slot, then moves
    /// the head one cell along the heading, wrapping at the edges.
    pub fn move_step(&mut self, dims: Coords) -> MoveResult {
        self.previous.copy_from_slice(&self.current);
        let old_tail = self.previous[self.previous.len() - 1];

        for i in (1..self.current.len()).rev() {
            self.current[i] = self.current[i - 1];
        }

        let (dx, dy) = self.direction.delta();
        let old_head = self.previous[0];
        let new_head = wrap((old_head.0 + dx, old_head.1 + dy), dims);
        self.current[0] = new_head;

        if self.current[1..].contains(&new_head) {
            return Crashed;
        }

        Moved { new_head, old_tail }
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        match (&new_direction, &self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {},
            _ => self.direction = new_direction,
        };
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Appends a tail cell at the old tail's pre-step position, in both
    /// snapshots, so the new tail stays put while the rest of the body
    /// slides forward.
    pub fn grow(&mut self) {
        let tail = self.previous[self.previous.len() - 1];
        self.previous.push(tail);
        self.current.push(tail);
    }
}

pub fn wrap(cell: Coords, dims: Coords) -> Coords {
    (cell.0.rem_euclid(dims.0), cell.1.rem_euclid(dims.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: Coords = (40, 24);

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new((20, 12), 4, Right, DIMS);
        assert_eq!(snake.body(), &[(20, 12), (19, 12), (18, 12), (17, 12)]);
        assert_eq!(snake.previous(), snake.body());
    }

    #[test]
    #[should_panic]
    fn from_cells_needs_a_head() {
        Snake::from_cells(vec![], Right);
    }

    #[test]
    fn new_snake_wraps_near_edge() {
        let snake = Snake::new((1, 0), 3, Right, DIMS);
        assert_eq!(snake.body(), &[(1, 0), (0, 0), (39, 0)]);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut snake = Snake::new((20, 12), 3, Right, DIMS);
        snake.set_direction(Left);
        assert_eq!(snake.get_direction(), Right);
        snake.set_direction(Up);
        assert_eq!(snake.get_direction(), Up);
        snake.set_direction(Down);
        assert_eq!(snake.get_direction(), Up);
    }

    #[test]
    fn step_snapshots_then_shifts() {
        let mut snake = Snake::new((20, 12), 3, Right, DIMS);
        let before = snake.body().to_vec();
        let res = snake.move_step(DIMS);

        assert_eq!(res, Moved { new_head: (21, 12), old_tail: (18, 12) });
        assert_eq!(snake.previous(), &before[..]);
        assert_eq!(snake.body(), &[(21, 12), (20, 12), (19, 12)]);
    }

    #[test]
    fn step_wraps_every_edge() {
        let mut up = Snake::from_cells(vec![(5, 0), (5, 1), (5, 2)], Up);
        up.move_step(DIMS);
        assert_eq!(up.head(), (5, 23));

        let mut left = Snake::from_cells(vec![(0, 7), (1, 7), (2, 7)], Left);
        left.move_step(DIMS);
        assert_eq!(left.head(), (39, 7));

        let mut down = Snake::from_cells(vec![(5, 23), (5, 22), (5, 21)], Down);
        down.move_step(DIMS);
        assert_eq!(down.head(), (5, 0));
    }

    #[test]
    fn grow_keeps_tail_in_place() {
        let mut snake = Snake::new((20, 12), 3, Right, DIMS);
        snake.move_step(DIMS);
        snake.grow();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body()[3], (18, 12));
        assert_eq!(snake.previous()[3], (18, 12));
    }

    #[test]
    fn crash_into_own_body() {
        // Tight hook, the head runs into what becomes slot 4.
        let mut snake = Snake::from_cells(vec![(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)], Right);
        assert_eq!(snake.move_step(DIMS), Crashed);
    }
}
