mod input;
mod term;

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use serpent::{Board, HighScoreStore, Outcome, Point, Round, RoundConfig, WallPolicy};

use input::{Bindings, Command};
use term::Term;

const BOARD_WIDTH: i32 = 40;
const BOARD_HEIGHT: i32 = 20;
const INITIAL_SNAKE_LENGTH: usize = 5;
const TICK: Duration = Duration::from_millis(100);
const INPUT_POLL: Duration = Duration::from_millis(5);

// Screen position of the wall ring's top-left corner; row 0 is the status bar.
const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 1;

const WALL_CHAR: char = '#';
const HEAD_CHAR: char = '@';
const BODY_CHAR: char = 'o';
const FOOD_CHAR: char = '*';

fn main() -> io::Result<()> {
    if let Ok(file) = File::create("serpent-tui.log") {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }

    let mut term = Term::new()?;
    let min_width = ORIGIN_X + BOARD_WIDTH as u16 + 2;
    let min_height = ORIGIN_Y + BOARD_HEIGHT as u16 + 2;
    if term.width() < min_width || term.height() < min_height {
        eprintln!("Terminal too small: need at least {min_width}x{min_height} characters.");
        return Ok(());
    }

    info!("starting terminal edition, board {BOARD_WIDTH}x{BOARD_HEIGHT}");

    let config = RoundConfig {
        board: Board::new(BOARD_WIDTH, BOARD_HEIGHT, WallPolicy::Border),
        initial_len: INITIAL_SNAKE_LENGTH,
        tick: TICK,
    };
    let round = Round::new(config, HighScoreStore::default());
    let bindings = Bindings::standard();

    term.enter()?;
    run(&mut term, round, &bindings)
    // Term's Drop leaves the alternate screen and restores cooked mode.
}

fn run(term: &mut Term, mut round: Round, bindings: &Bindings) -> io::Result<()> {
    term.clear()?;
    draw(term, &round)?;
    let mut last = Instant::now();

    loop {
        let mut dirty = false;

        let mut next_key = term.poll_key(INPUT_POLL)?;
        while let Some(key) = next_key {
            match bindings.translate(&key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Turn(dir)) => round.queue_direction(dir),
                Some(Command::TogglePause) => {
                    round.toggle_pause();
                    dirty = true;
                }
                Some(Command::Restart) | None => {}
            }
            next_key = term.poll_key(Duration::ZERO)?;
        }

        let now = Instant::now();
        let stepped = round.update(now - last);
        last = now;

        if stepped > 0 || dirty {
            draw(term, &round)?;
        }

        if round.is_over() {
            draw(term, &round)?;
            if !game_over_prompt(term, &mut round, bindings)? {
                return Ok(());
            }
            term.clear()?;
            draw(term, &round)?;
            last = Instant::now();
        }
    }
}

/// Shows the end-of-round dialog and blocks until the player restarts
/// (`true`) or quits (`false`).
fn game_over_prompt(term: &mut Term, round: &mut Round, bindings: &Bindings) -> io::Result<bool> {
    let won = round.outcome().is_some_and(Outcome::is_win);
    info!(
        "round over: win={won}, score={}, high score={}",
        round.score(),
        round.high_score()
    );

    let title = if won { " YOU WIN! " } else { " GAME OVER " };
    let scores = format!(
        " Score: {}  High Score: {} ",
        round.score(),
        round.high_score()
    );
    draw_dialog(term, &[title, &scores, " Press R to restart or Q to quit "])?;

    loop {
        match bindings.translate(&term.read_key_blocking()?) {
            Some(Command::Restart) => {
                round.restart();
                return Ok(true);
            }
            Some(Command::Quit) => return Ok(false),
            _ => {}
        }
    }
}

fn draw(term: &mut Term, round: &Round) -> io::Result<()> {
    draw_status(term, round)?;
    draw_walls(term, round.board())?;
    draw_cells(term, round)?;
    term.flush()
}

fn draw_status(term: &mut Term, round: &Round) -> io::Result<()> {
    let mut line = format!(
        " Score: {}  High Score: {}  (Arrows/WASD move, P pause, Q quit)",
        round.score(),
        round.high_score()
    );

    let width = term.width() as usize;
    if line.len() > width {
        line.truncate(width);
    } else {
        line.push_str(&" ".repeat(width - line.len()));
    }

    if round.is_paused() {
        let tag = " PAUSED ";
        if width > tag.len() + 1 {
            line.replace_range(width - tag.len() - 1..width - 1, tag);
        }
    }

    term.print_at(0, 0, &line)
}

fn draw_walls(term: &mut Term, board: &Board) -> io::Result<()> {
    let w = board.width() as u16;
    let h = board.height() as u16;
    let wall = String::from(WALL_CHAR);
    let horizontal = wall.repeat(w as usize + 2);

    term.print_at(ORIGIN_X, ORIGIN_Y, &horizontal)?;
    term.print_at(ORIGIN_X, ORIGIN_Y + h + 1, &horizontal)?;
    for y in 1..=h {
        term.print_at(ORIGIN_X, ORIGIN_Y + y, &wall)?;
        term.print_at(ORIGIN_X + w + 1, ORIGIN_Y + y, &wall)?;
    }
    Ok(())
}

fn draw_cells(term: &mut Term, round: &Round) -> io::Result<()> {
    let board = round.board();
    let occupied: HashSet<Point> = round.snake().body().iter().copied().collect();
    let head = round.snake().head();

    for y in 1..=board.height() {
        let mut row = String::with_capacity(board.width() as usize);
        for x in 1..=board.width() {
            let pos = Point::new(x, y);
            row.push(if pos == head {
                HEAD_CHAR
            } else if occupied.contains(&pos) {
                BODY_CHAR
            } else if round.food() == Some(pos) {
                FOOD_CHAR
            } else {
                ' '
            });
        }
        // Interior rows start one cell in from the ring.
        term.print_at(ORIGIN_X + 1, ORIGIN_Y + y as u16, &row)?;
    }
    Ok(())
}

fn draw_dialog(term: &mut Term, lines: &[&str]) -> io::Result<()> {
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) + 2;
    let height = lines.len() as u16 + 2;

    let left = ORIGIN_X + (BOARD_WIDTH as u16 + 2).saturating_sub(width as u16) / 2;
    let top = ORIGIN_Y + (BOARD_HEIGHT as u16 + 2).saturating_sub(height) / 2;

    let blank = " ".repeat(width);
    term.print_at(left, top, &blank)?;
    term.print_at(left, top + height - 1, &blank)?;
    for (i, line) in lines.iter().enumerate() {
        term.print_at(left, top + 1 + i as u16, format!("{line:^width$}"))?;
    }
    term.flush()
}
