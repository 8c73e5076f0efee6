use std::time::Duration;

use log::debug;

use crate::board::{random_picker, Board, CellPicker, Collision};
use crate::grid::{Direction, Point};
use crate::score::HighScoreStore;
use crate::snake::Snake;

/// Everything a round needs to know up front. Each edition assembles one
/// from its own constants.
#[derive(Debug, Clone, Copy)]
pub struct RoundConfig {
    pub board: Board,
    pub initial_len: usize,
    pub tick: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    Over(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    WallHit,
    SelfHit,
    /// The snake occupies every playable cell; the player won.
    Filled,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Filled)
    }
}

/// Owns one round of play: the snake, the food, the score, and the fixed
/// tick cadence that sequences them deterministically no matter how often
/// the frontend renders.
///
/// Callers feed elapsed wall time into [`update`]; the controller runs one
/// game step per whole tick interval, catching up when a frame was late and
/// bailing out the moment the round ends.
///
/// [`update`]: Round::update
pub struct Round {
    board: Board,
    initial_len: usize,
    tick: Duration,
    snake: Snake,
    prev_body: Vec<Point>,
    food: Option<Point>,
    score: u32,
    high_score: u32,
    phase: Phase,
    acc: Duration,
    scores: HighScoreStore,
    picker: CellPicker,
}

impl Round {
    pub fn new(config: RoundConfig, scores: HighScoreStore) -> Self {
        Round::with_picker(config, scores, random_picker())
    }

    /// Like [`Round::new`] but with a caller-supplied food picker, so tests
    /// can pin where food appears.
    pub fn with_picker(config: RoundConfig, scores: HighScoreStore, picker: CellPicker) -> Self {
        let high_score = scores.load();
        let mut round = Round {
            board: config.board,
            initial_len: config.initial_len,
            tick: config.tick,
            snake: Snake::new(config.board.center(), config.initial_len),
            prev_body: Vec::new(),
            food: None,
            score: 0,
            high_score,
            phase: Phase::Playing,
            acc: Duration::ZERO,
            scores,
            picker,
        };
        round.restart();
        round
    }

    /// Begin a fresh round. The high score survives; everything else is
    /// rebuilt from the config.
    pub fn restart(&mut self) {
        self.snake.reset(self.board.center(), self.initial_len);
        self.prev_body = self.snake.body().iter().copied().collect();
        self.food = self.board.spawn_food(&self.snake, &mut self.picker);
        self.score = 0;
        self.phase = Phase::Playing;
        self.acc = Duration::ZERO;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Body positions as of the previous tick, index-aligned with the
    /// current body. Frontends interpolate between the two with
    /// [`progress`](Round::progress); on a growing tick the old tail is
    /// duplicated so the new segment stays put instead of sliding in.
    pub fn previous_body(&self) -> &[Point] {
        &self.prev_body
    }

    /// Fraction of the current tick that has elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.tick.is_zero() {
            return 0.0;
        }
        (self.acc.as_secs_f32() / self.tick.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Forward a directional intent to the snake. Ignored once the round is
    /// over; accepted while paused so a queued turn applies on resume.
    pub fn queue_direction(&mut self, dir: Direction) {
        if !self.is_over() {
            self.snake.queue_direction(dir);
        }
    }

    /// Flip between Playing and Paused. Pausing freezes the tick accumulator
    /// where it is, so resuming costs and grants nothing.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            over => over,
        };
    }

    /// Advance by `dt` of wall time, running one game step per whole tick
    /// interval elapsed. Late frames catch up rather than skip; pending
    /// ticks are discarded once the round ends. Returns the number of steps
    /// executed.
    pub fn update(&mut self, dt: Duration) -> u32 {
        if self.phase != Phase::Playing {
            return 0;
        }

        self.acc += dt;
        let mut steps = 0;
        while self.acc >= self.tick {
            self.acc -= self.tick;
            self.step();
            steps += 1;
            if self.is_over() {
                self.acc = Duration::ZERO;
                break;
            }
        }
        steps
    }

    fn step(&mut self) {
        self.snake.commit_direction();
        let next_head = self.snake.head().step(self.snake.direction());
        let will_grow = self.food == Some(next_head);

        if let Some(hit) = self.board.collision(next_head, &self.snake, will_grow) {
            self.finish(match hit {
                Collision::Wall => Outcome::WallHit,
                Collision::Body => Outcome::SelfHit,
            });
            return;
        }

        let old_tail = self.snake.tail();
        let old_body: Vec<Point> = self.snake.body().iter().copied().collect();
        self.snake.advance(will_grow);
        self.prev_body = old_body;

        if will_grow {
            self.prev_body.push(old_tail);
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
                self.scores.save(self.high_score);
            }
            self.food = self.board.spawn_food(&self.snake, &mut self.picker);
        }

        if self.food.is_none() && self.snake.len() == self.board.cell_count() {
            self.finish(Outcome::Filled);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(
            "round over: {:?}, score {}, high score {}",
            outcome, self.score, self.high_score
        );
        self.phase = Phase::Over(outcome);
        self.acc = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::WallPolicy;

    const TICK: Duration = Duration::from_millis(100);

    fn temp_store() -> (tempfile::TempDir, HighScoreStore) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = HighScoreStore::new(dir.path().join("highscore.dat"));
        (dir, store)
    }

    fn config(width: i32, height: i32) -> RoundConfig {
        RoundConfig {
            board: Board::new(width, height, WallPolicy::Open),
            initial_len: 5,
            tick: TICK,
        }
    }

    /// Food parked in the corner, out of the snake's path.
    fn corner_picker() -> CellPicker {
        Box::new(|cells| {
            cells
                .iter()
                .copied()
                .find(|c| *c == Point::new(0, 0))
                .or_else(|| cells.first().copied())
        })
    }

    fn ticks(round: &mut Round, n: u32) {
        for _ in 0..n {
            round.update(TICK);
        }
    }

    #[test]
    fn plain_movement_shifts_the_body_right() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(10, 10), store, corner_picker());
        let start: Vec<Point> = round.snake().body().iter().copied().collect();

        ticks(&mut round, 3);

        assert_eq!(round.snake().len(), 5);
        assert_eq!(round.score(), 0);
        assert_eq!(round.phase(), Phase::Playing);
        let moved: Vec<Point> = round.snake().body().iter().copied().collect();
        for (before, after) in start.iter().zip(&moved) {
            assert_eq!(Point::new(before.x + 3, before.y), *after);
        }
    }

    #[test]
    fn eating_grows_scores_and_respawns() {
        let (_dir, store) = temp_store();
        // Food two cells ahead of the head, then parked in the corner.
        let picker: CellPicker = Box::new(|cells| {
            cells
                .iter()
                .copied()
                .find(|c| *c == Point::new(7, 5))
                .or_else(|| cells.iter().copied().find(|c| *c == Point::new(0, 0)))
                .or_else(|| cells.first().copied())
        });
        let mut round = Round::with_picker(config(10, 10), store, picker);
        assert_eq!(round.food(), Some(Point::new(7, 5)));

        ticks(&mut round, 2);

        assert_eq!(round.snake().len(), 6);
        assert_eq!(round.score(), 1);
        assert_eq!(round.high_score(), 1);
        let food = round.food().expect("board is far from full");
        assert!(!round.snake().occupies(food));
    }

    #[test]
    fn growth_duplicates_the_old_tail_for_interpolation() {
        let (_dir, store) = temp_store();
        let picker: CellPicker = Box::new(|cells| {
            cells
                .iter()
                .copied()
                .find(|c| *c == Point::new(6, 5))
                .or_else(|| cells.iter().copied().find(|c| *c == Point::new(0, 0)))
                .or_else(|| cells.first().copied())
        });
        let mut round = Round::with_picker(config(10, 10), store, picker);

        ticks(&mut round, 1);

        assert_eq!(round.snake().len(), 6);
        assert_eq!(round.previous_body().len(), 6);
        // The grown segment interpolates from the spot the tail occupied.
        assert_eq!(round.previous_body()[5], round.snake().body()[5]);
    }

    #[test]
    fn wall_hit_ends_the_round_with_the_body_intact() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(10, 10), store, corner_picker());

        // Head starts at (5, 5); four ticks put it at (9, 5), the last
        // column. The fifth would leave the board.
        ticks(&mut round, 4);
        let before: Vec<Point> = round.snake().body().iter().copied().collect();

        ticks(&mut round, 1);

        assert_eq!(round.phase(), Phase::Over(Outcome::WallHit));
        assert_eq!(round.outcome(), Some(Outcome::WallHit));
        assert!(!round.outcome().unwrap().is_win());
        let after: Vec<Point> = round.snake().body().iter().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn self_hit_ends_the_round() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(10, 10), store, corner_picker());

        // Hook back into the second segment: up, left, down.
        round.queue_direction(Direction::Up);
        ticks(&mut round, 1);
        round.queue_direction(Direction::Left);
        ticks(&mut round, 1);
        round.queue_direction(Direction::Down);
        ticks(&mut round, 1);

        assert_eq!(round.phase(), Phase::Over(Outcome::SelfHit));
    }

    #[test]
    fn filling_the_board_wins() {
        let (_dir, store) = temp_store();
        // First free cell in row-major order; on a 2x2 that walks the snake
        // around the square.
        let picker: CellPicker = Box::new(|cells| cells.first().copied());
        let mut round = Round::with_picker(
            RoundConfig {
                board: Board::new(2, 2, WallPolicy::Open),
                initial_len: 2,
                tick: TICK,
            },
            store,
            picker,
        );
        // Body (1,1)-(0,1), food at (0,0).
        assert_eq!(round.food(), Some(Point::new(0, 0)));

        round.queue_direction(Direction::Up);
        ticks(&mut round, 1); // head to (1,0)
        round.queue_direction(Direction::Left);
        ticks(&mut round, 1); // eats (0,0); the only free cell left is (0,1)
        assert_eq!(round.food(), Some(Point::new(0, 1)));
        round.queue_direction(Direction::Down);
        ticks(&mut round, 1); // eats the last cell

        assert_eq!(round.phase(), Phase::Over(Outcome::Filled));
        assert!(round.outcome().unwrap().is_win());
        assert_eq!(round.snake().len(), 4);
        assert_eq!(round.food(), None);
        assert_eq!(round.score(), 2);
    }

    #[test]
    fn late_frames_catch_up_in_whole_ticks() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(20, 10), store, corner_picker());
        let head = round.snake().head();

        let steps = round.update(Duration::from_millis(350));

        assert_eq!(steps, 3);
        assert_eq!(round.snake().head(), Point::new(head.x + 3, head.y));
        // 50 ms left in the accumulator: one more short update tips it over.
        assert_eq!(round.update(Duration::from_millis(49)), 0);
        assert_eq!(round.update(Duration::from_millis(1)), 1);
    }

    #[test]
    fn catch_up_stops_at_game_over() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(10, 10), store, corner_picker());

        // Ten ticks' worth of time, but the wall is five steps away.
        let steps = round.update(Duration::from_millis(1000));

        assert_eq!(steps, 5);
        assert_eq!(round.phase(), Phase::Over(Outcome::WallHit));
        // The discarded remainder must not leak into the next round.
        assert_eq!(round.progress(), 0.0);
    }

    #[test]
    fn pause_freezes_the_accumulator() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(20, 10), store, corner_picker());

        assert_eq!(round.update(Duration::from_millis(150)), 1);
        round.toggle_pause();
        assert!(round.is_paused());
        assert_eq!(round.update(Duration::from_millis(5000)), 0);
        round.toggle_pause();
        // The 50 ms banked before pausing still counts.
        assert_eq!(round.update(Duration::from_millis(49)), 0);
        assert_eq!(round.update(Duration::from_millis(1)), 1);
    }

    #[test]
    fn direction_queued_while_paused_applies_on_resume() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(20, 10), store, corner_picker());
        let head = round.snake().head();

        round.toggle_pause();
        round.queue_direction(Direction::Up);
        round.toggle_pause();
        ticks(&mut round, 1);

        assert_eq!(round.snake().head(), Point::new(head.x, head.y - 1));
    }

    #[test]
    fn input_is_ignored_after_the_round_ends() {
        let (_dir, store) = temp_store();
        let mut round = Round::with_picker(config(10, 10), store, corner_picker());
        round.update(Duration::from_millis(1000));
        assert!(round.is_over());

        round.queue_direction(Direction::Up);
        round.toggle_pause();
        assert_eq!(round.update(Duration::from_millis(1000)), 0);
        assert!(round.is_over());
    }

    #[test]
    fn restart_clears_the_round_but_keeps_the_high_score() {
        let (_dir, store) = temp_store();
        let picker: CellPicker = Box::new(|cells| {
            cells
                .iter()
                .copied()
                .find(|c| *c == Point::new(6, 5))
                .or_else(|| cells.iter().copied().find(|c| *c == Point::new(0, 0)))
                .or_else(|| cells.first().copied())
        });
        let mut round = Round::with_picker(config(10, 10), store, picker);

        ticks(&mut round, 1); // eat once
        assert_eq!(round.score(), 1);
        round.update(Duration::from_millis(1000)); // run into the wall
        assert!(round.is_over());

        round.restart();

        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.score(), 0);
        assert_eq!(round.high_score(), 1);
        assert_eq!(round.snake().len(), 5);
        assert_eq!(round.snake().head(), Point::new(5, 5));
        assert!(round.food().is_some());
    }

    #[test]
    fn high_score_is_persisted_when_beaten() {
        let (dir, store) = temp_store();
        let on_disk = HighScoreStore::new(dir.path().join("highscore.dat"));
        on_disk.save(0);

        let picker: CellPicker = Box::new(|cells| {
            cells
                .iter()
                .copied()
                .find(|c| *c == Point::new(6, 5))
                .or_else(|| cells.iter().copied().find(|c| *c == Point::new(0, 0)))
                .or_else(|| cells.first().copied())
        });
        let mut round = Round::with_picker(config(10, 10), store, picker);
        ticks(&mut round, 1);

        assert_eq!(round.high_score(), 1);
        assert_eq!(on_disk.load(), 1);
    }

    #[test]
    fn stored_high_score_is_loaded_at_start() {
        let (dir, store) = temp_store();
        HighScoreStore::new(dir.path().join("highscore.dat")).save(42);

        let round = Round::with_picker(config(10, 10), store, corner_picker());
        assert_eq!(round.high_score(), 42);
    }
}
