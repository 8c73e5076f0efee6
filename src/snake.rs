use std::collections::VecDeque;

use crate::grid::{Direction, Point};

/// The snake proper: an ordered body (head first) plus the active direction
/// and the direction queued for the next tick.
///
/// Turning is two-phased: input handlers call [`queue_direction`] any number
/// of times between ticks, and the round controller promotes the queued value
/// with [`commit_direction`] exactly once per tick before moving. A request
/// for the exact opposite of the *active* direction is dropped without
/// touching the queued value.
///
/// [`queue_direction`]: Snake::queue_direction
/// [`commit_direction`]: Snake::commit_direction
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    pending: Direction,
}

impl Snake {
    /// A horizontal snake of `len` cells, head at `center`, trailing off to
    /// the left, heading right.
    pub fn new(center: Point, len: usize) -> Self {
        debug_assert!(len >= 1);
        let body = (0..len as i32)
            .map(|i| Point::new(center.x - i, center.y))
            .collect();
        Snake {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
        }
    }

    /// Replace the whole snake with the starting configuration.
    pub fn reset(&mut self, center: Point, len: usize) {
        *self = Snake::new(center, len);
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn occupies(&self, pos: Point) -> bool {
        self.body.contains(&pos)
    }

    /// Queue `dir` for the next tick unless it would reverse the snake onto
    /// itself. Rejected requests leave the previously queued value intact.
    pub fn queue_direction(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.pending = dir;
        }
    }

    /// Promote the queued direction to the active one. Called once per tick,
    /// before the next head is computed.
    pub fn commit_direction(&mut self) {
        self.direction = self.pending;
    }

    /// Move one cell in the active direction. Keeps the tail when `grow` is
    /// set. No collision checking happens here; the caller validates the next
    /// head against the not-yet-mutated body first.
    pub fn advance(&mut self, grow: bool) {
        let next = self.head().step(self.direction);
        self.body.push_front(next);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_snake_is_horizontal_and_distinct() {
        let snake = Snake::new(Point::new(5, 5), 5);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Point::new(5, 5));
        assert_eq!(snake.tail(), Point::new(1, 5));

        let cells: HashSet<Point> = snake.body().iter().copied().collect();
        assert_eq!(cells.len(), 5);
        assert!(snake.body().iter().all(|p| p.y == 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::new(Point::new(5, 5), 4);
        snake.advance(false);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Point::new(6, 5));
        assert_eq!(snake.tail(), Point::new(3, 5));
    }

    #[test]
    fn advance_with_growth_adds_one_segment() {
        let mut snake = Snake::new(Point::new(5, 5), 4);
        snake.advance(true);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Point::new(6, 5));
        assert_eq!(snake.tail(), Point::new(2, 5));
    }

    #[test]
    fn reversal_request_is_dropped() {
        let mut snake = Snake::new(Point::new(5, 5), 3);
        snake.queue_direction(Direction::Left);
        snake.commit_direction();
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn rejected_reversal_keeps_earlier_queued_turn() {
        let mut snake = Snake::new(Point::new(5, 5), 3);
        snake.queue_direction(Direction::Up);
        snake.queue_direction(Direction::Left); // opposite of the active Right
        snake.commit_direction();
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn any_non_reversal_updates_the_queue() {
        for dir in [Direction::Up, Direction::Down, Direction::Right] {
            let mut snake = Snake::new(Point::new(5, 5), 3);
            snake.queue_direction(dir);
            snake.commit_direction();
            assert_eq!(snake.direction(), dir);
        }
    }

    #[test]
    fn opposite_is_judged_against_active_not_queued() {
        let mut snake = Snake::new(Point::new(5, 5), 3);
        snake.queue_direction(Direction::Up);
        // Down reverses the queued Up, but not the still-active Right, so it
        // replaces the queued value.
        snake.queue_direction(Direction::Down);
        snake.commit_direction();
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn reversal_blocked_after_commit_turns() {
        let mut snake = Snake::new(Point::new(5, 5), 3);
        snake.queue_direction(Direction::Up);
        snake.commit_direction();
        snake.queue_direction(Direction::Down); // now the reversal of Up
        snake.commit_direction();
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn reset_restores_the_starting_shape() {
        let mut snake = Snake::new(Point::new(5, 5), 3);
        snake.queue_direction(Direction::Up);
        snake.commit_direction();
        snake.advance(true);
        snake.reset(Point::new(5, 5), 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }
}
