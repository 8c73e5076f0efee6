use rand::seq::SliceRandom;

use crate::grid::Point;
use crate::snake::Snake;

/// How the edge of the board behaves.
///
/// `Open` boards are playable over `[0, w) x [0, h)` (the GUI edition draws
/// its own frame outside the grid). `Border` boards reserve a one-cell wall
/// ring, leaving `[1, w] x [1, h]` playable (the terminal edition renders the
/// ring as `#` characters). Either way there are `w * h` playable cells and
/// the starting head sits at `(w / 2, h / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallPolicy {
    Open,
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// Fixed board geometry: interior size plus the wall policy.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    width: i32,
    height: i32,
    walls: WallPolicy,
}

/// Uniform choice over candidate food cells. Injected so tests can pin the
/// outcome; real games use [`random_picker`].
pub type CellPicker = Box<dyn FnMut(&[Point]) -> Option<Point>>;

/// Picks uniformly at random with the thread RNG.
pub fn random_picker() -> CellPicker {
    Box::new(|cells| cells.choose(&mut rand::thread_rng()).copied())
}

impl Board {
    pub fn new(width: i32, height: i32, walls: WallPolicy) -> Self {
        debug_assert!(width >= 2 && height >= 2);
        Board {
            width,
            height,
            walls,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn walls(&self) -> WallPolicy {
        self.walls
    }

    /// Number of playable cells; the win condition compares the snake's
    /// length against this.
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Starting head position, valid under both wall policies.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    /// Whether `pos` lies in the playable interior.
    pub fn contains(&self, pos: Point) -> bool {
        match self.walls {
            WallPolicy::Open => {
                pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
            }
            WallPolicy::Border => {
                pos.x >= 1 && pos.x <= self.width && pos.y >= 1 && pos.y <= self.height
            }
        }
    }

    /// All playable cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let (x0, y0) = match self.walls {
            WallPolicy::Open => (0, 0),
            WallPolicy::Border => (1, 1),
        };
        (y0..y0 + self.height)
            .flat_map(move |y| (x0..x0 + self.width).map(move |x| Point::new(x, y)))
    }

    /// Playable cells not occupied by the snake.
    pub fn free_cells(&self, snake: &Snake) -> Vec<Point> {
        self.cells().filter(|pos| !snake.occupies(*pos)).collect()
    }

    /// Verdict for moving the head onto `next_head`.
    ///
    /// The tail cell only counts as occupied when the move grows the snake;
    /// on a plain move the tail vacates its cell in the same tick.
    pub fn collision(&self, next_head: Point, snake: &Snake, will_grow: bool) -> Option<Collision> {
        if !self.contains(next_head) {
            return Some(Collision::Wall);
        }

        let body = snake.body();
        let checked = if will_grow { body.len() } else { body.len() - 1 };
        if body.iter().take(checked).any(|&seg| seg == next_head) {
            return Some(Collision::Body);
        }

        None
    }

    /// Place food on a free cell chosen by `pick`, or `None` when the snake
    /// fills the board.
    pub fn spawn_food(
        &self,
        snake: &Snake,
        pick: &mut impl FnMut(&[Point]) -> Option<Point>,
    ) -> Option<Point> {
        let free = self.free_cells(snake);
        pick(&free)
    }
}
