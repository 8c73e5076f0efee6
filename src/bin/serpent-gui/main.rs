mod theme;
mod ui;

use std::fs::File;
use std::time::Duration;

use macroquad::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use serpent::{
    Board, Direction, HighScoreStore, Outcome, Phase, Point, Round, RoundConfig, WallPolicy,
};

use theme::{themes, Theme};
use ui::{clicked, draw_text_centered, lerp, lerp_color, with_alpha, Button, UiAction};

const WINDOW_WIDTH: i32 = 960;
const WINDOW_HEIGHT: i32 = 720;
const GRID_WIDTH: i32 = 28;
const GRID_HEIGHT: i32 = 20;
const CELL_SIZE: f32 = 24.0;
const PLAYFIELD_TOP: f32 = 140.0;
const INITIAL_SNAKE_LENGTH: usize = 5;
const TICK: Duration = Duration::from_millis(120);

const DIRECTION_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::W, Direction::Up),
    (KeyCode::S, Direction::Down),
    (KeyCode::A, Direction::Left),
    (KeyCode::D, Direction::Right),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Game,
}

struct App {
    round: Round,
    screen: Screen,
    themes: Vec<Theme>,
    selected_theme: usize,
    active_theme: usize,
    playfield: Rect,
    menu_buttons: Vec<Button>,
    over_buttons: Vec<Button>,
    gradient_phase: f32,
    food_pulse: f32,
    last_food: Option<Point>,
    running: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Serpent".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Ok(file) = File::create("serpent-gui.log") {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }
    log::info!("starting GUI edition, grid {GRID_WIDTH}x{GRID_HEIGHT}");

    let mut app = App::new();
    while app.running {
        let dt = get_frame_time();
        app.handle_input();
        app.update(dt);
        app.draw();
        next_frame().await;
    }
}

impl App {
    fn new() -> Self {
        let config = RoundConfig {
            board: Board::new(GRID_WIDTH, GRID_HEIGHT, WallPolicy::Open),
            initial_len: INITIAL_SNAKE_LENGTH,
            tick: TICK,
        };
        let round = Round::new(config, HighScoreStore::default());
        let last_food = round.food();

        let w = WINDOW_WIDTH as f32;
        let center_x = w / 2.0;
        let playfield = Rect::new(
            (w - GRID_WIDTH as f32 * CELL_SIZE) / 2.0,
            PLAYFIELD_TOP,
            GRID_WIDTH as f32 * CELL_SIZE,
            GRID_HEIGHT as f32 * CELL_SIZE,
        );

        let menu_buttons = vec![
            Button::centered(center_x - 150.0, 260.0, 60.0, 60.0, "<", UiAction::CycleTheme(-1)),
            Button::centered(center_x + 150.0, 260.0, 60.0, 60.0, ">", UiAction::CycleTheme(1)),
            Button::centered(center_x, 360.0, 260.0, 60.0, "Start Game", UiAction::Start),
            Button::centered(center_x, 440.0, 260.0, 60.0, "Quit", UiAction::Quit),
        ];

        let modal = game_over_modal();
        let over_buttons = vec![
            Button::centered(
                modal.x + modal.w / 2.0,
                modal.y + modal.h - 110.0,
                modal.w - 120.0,
                56.0,
                "Restart",
                UiAction::Restart,
            ),
            Button::centered(
                modal.x + modal.w / 2.0,
                modal.y + modal.h - 40.0,
                modal.w - 120.0,
                56.0,
                "Main Menu",
                UiAction::ToMenu,
            ),
        ];

        App {
            round,
            screen: Screen::Menu,
            themes: themes(),
            selected_theme: 0,
            active_theme: 0,
            playfield,
            menu_buttons,
            over_buttons,
            gradient_phase: 0.0,
            food_pulse: 0.0,
            last_food,
            running: true,
        }
    }

    fn current_theme(&self) -> &Theme {
        let index = match self.screen {
            Screen::Menu => self.selected_theme,
            Screen::Game => self.active_theme,
        };
        &self.themes[index]
    }

    fn handle_input(&mut self) {
        match self.screen {
            Screen::Menu => {
                if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
                    self.apply(UiAction::Start);
                } else if is_key_pressed(KeyCode::Left) {
                    self.apply(UiAction::CycleTheme(-1));
                } else if is_key_pressed(KeyCode::Right) {
                    self.apply(UiAction::CycleTheme(1));
                } else if let Some(action) = clicked(&self.menu_buttons) {
                    self.apply(action);
                }
            }
            Screen::Game => {
                if is_key_pressed(KeyCode::Escape) {
                    self.apply(UiAction::ToMenu);
                    return;
                }

                if self.round.is_over() {
                    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space) {
                        self.apply(UiAction::Restart);
                    } else if let Some(action) = clicked(&self.over_buttons) {
                        self.apply(action);
                    }
                    return;
                }

                if is_key_pressed(KeyCode::P) {
                    self.round.toggle_pause();
                }
                for (key, dir) in DIRECTION_KEYS {
                    if is_key_pressed(key) {
                        self.round.queue_direction(dir);
                    }
                }
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Start | UiAction::Restart => {
                self.active_theme = self.selected_theme;
                self.round.restart();
                self.last_food = self.round.food();
                self.food_pulse = 0.0;
                self.screen = Screen::Game;
                log::info!("round started, theme {}", self.themes[self.active_theme].name);
            }
            UiAction::CycleTheme(offset) => {
                let count = self.themes.len() as i32;
                self.selected_theme =
                    (self.selected_theme as i32 + offset).rem_euclid(count) as usize;
            }
            UiAction::ToMenu => {
                self.round.restart();
                self.screen = Screen::Menu;
            }
            UiAction::Quit => self.running = false,
        }
    }

    fn update(&mut self, dt: f32) {
        self.gradient_phase = (self.gradient_phase + dt * 35.0) % WINDOW_HEIGHT as f32;

        if self.screen != Screen::Game {
            return;
        }

        self.food_pulse += dt;
        self.round.update(Duration::from_secs_f32(dt));

        if self.round.food() != self.last_food {
            self.last_food = self.round.food();
            self.food_pulse = 0.0;
        }
    }

    fn draw(&self) {
        let theme = self.current_theme();
        self.draw_gradient(theme);

        match self.screen {
            Screen::Menu => self.draw_menu(theme),
            Screen::Game => {
                self.draw_playfield(theme);
                self.draw_hud(theme);
                match self.round.phase() {
                    Phase::Playing => {}
                    Phase::Paused => self.draw_pause_overlay(theme),
                    Phase::Over(outcome) => self.draw_game_over(theme, outcome),
                }
            }
        }
    }

    fn draw_gradient(&self, theme: &Theme) {
        let w = WINDOW_WIDTH as f32;
        let h = WINDOW_HEIGHT as f32;
        let offset = ((self.gradient_phase * 0.02).sin() + 1.0) / 2.0;
        for y in 0..WINDOW_HEIGHT {
            let ratio = (y as f32 / h + offset) % 1.0;
            let color = lerp_color(theme.gradient_top, theme.gradient_bottom, ratio);
            draw_line(0.0, y as f32, w, y as f32, 1.0, color);
        }
    }

    fn draw_menu(&self, theme: &Theme) {
        let w = WINDOW_WIDTH as f32;
        let h = WINDOW_HEIGHT as f32;
        let center_x = w / 2.0;
        draw_rectangle(0.0, 0.0, w, h, Color::new(0.0, 0.0, 0.0, 0.16));

        draw_text_centered("SNAKE", center_x, 150.0, 96.0, theme.text_primary);
        draw_text_centered(
            "Modern Arcade Edition",
            center_x,
            210.0,
            48.0,
            theme.text_secondary,
        );
        draw_text_centered("Theme", center_x, 245.0, 36.0, theme.text_primary);
        draw_text_centered(
            self.themes[self.selected_theme].name,
            center_x,
            300.0,
            36.0,
            theme.text_primary,
        );

        for button in &self.menu_buttons {
            button.draw(theme, 32.0);
        }
    }

    fn draw_playfield(&self, theme: &Theme) {
        let field = self.playfield;
        draw_rectangle(
            field.x - 8.0,
            field.y - 8.0,
            field.w + 16.0,
            field.h + 16.0,
            with_alpha(theme.playfield_border, 0.86),
        );
        draw_rectangle(
            field.x,
            field.y,
            field.w,
            field.h,
            with_alpha(theme.playfield, 0.92),
        );

        self.draw_grid(theme);
        self.draw_food(theme);
        self.draw_snake(theme);
    }

    fn draw_grid(&self, theme: &Theme) {
        let field = self.playfield;
        let color = with_alpha(theme.grid, 0.31);
        for x in 1..GRID_WIDTH {
            let px = field.x + x as f32 * CELL_SIZE;
            draw_line(px, field.y, px, field.y + field.h, 1.0, color);
        }
        for y in 1..GRID_HEIGHT {
            let py = field.y + y as f32 * CELL_SIZE;
            draw_line(field.x, py, field.x + field.w, py, 1.0, color);
        }
    }

    fn draw_food(&self, theme: &Theme) {
        let Some(food) = self.round.food() else {
            return;
        };
        let field = self.playfield;
        let cx = field.x + (food.x as f32 + 0.5) * CELL_SIZE;
        let cy = field.y + (food.y as f32 + 0.5) * CELL_SIZE;

        let pulse = ((self.food_pulse * 4.0).sin() + 1.0) / 2.0;
        let glow = CELL_SIZE * (0.7 + 0.3 * pulse);
        draw_circle(cx, cy, glow, with_alpha(theme.food, 0.27));
        draw_circle(cx, cy, CELL_SIZE * 0.35, theme.food);
    }

    fn draw_snake(&self, theme: &Theme) {
        let field = self.playfield;
        let alpha = self.round.progress();
        let prev = self.round.previous_body();

        for (i, pos) in self.round.snake().body().iter().enumerate() {
            let from = prev.get(i).or(prev.last()).copied().unwrap_or(*pos);
            let x = lerp(from.x as f32, pos.x as f32, alpha);
            let y = lerp(from.y as f32, pos.y as f32, alpha);
            let px = field.x + x * CELL_SIZE;
            let py = field.y + y * CELL_SIZE;

            let color = if i == 0 {
                theme.snake_head
            } else {
                theme.snake_body
            };
            draw_rectangle(px + 1.0, py + 1.0, CELL_SIZE - 2.0, CELL_SIZE - 2.0, color);
            if i == 0 {
                draw_circle(
                    px + CELL_SIZE / 2.0,
                    py + CELL_SIZE / 2.0,
                    CELL_SIZE / 3.0,
                    Color::new(1.0, 1.0, 1.0, 0.35),
                );
            }
        }
    }

    fn draw_hud(&self, theme: &Theme) {
        let w = WINDOW_WIDTH as f32;
        draw_rectangle(0.0, 0.0, w, 90.0, with_alpha(theme.playfield_border, 0.24));

        draw_text(
            &format!("Score: {}", self.round.score()),
            60.0,
            52.0,
            32.0,
            theme.text_primary,
        );
        draw_text_centered(
            &format!("High Score: {}", self.round.high_score()),
            w / 2.0,
            45.0,
            32.0,
            theme.text_primary,
        );
        let label = format!("Theme: {}", self.themes[self.active_theme].name);
        let dims = measure_text(&label, None, 32, 1.0);
        draw_text(&label, w - 60.0 - dims.width, 52.0, 32.0, theme.text_primary);
    }

    fn draw_pause_overlay(&self, theme: &Theme) {
        let field = self.playfield;
        draw_rectangle(field.x, field.y, field.w, field.h, theme.overlay_tint);
        draw_text_centered(
            "Paused",
            field.x + field.w / 2.0,
            field.y + field.h / 2.0,
            48.0,
            theme.text_primary,
        );
    }

    fn draw_game_over(&self, theme: &Theme, outcome: Outcome) {
        let w = WINDOW_WIDTH as f32;
        let h = WINDOW_HEIGHT as f32;
        let mut tint = theme.overlay_tint;
        tint.a = (tint.a + 0.16).min(0.86);
        draw_rectangle(0.0, 0.0, w, h, tint);

        let modal = game_over_modal();
        draw_rectangle(
            modal.x,
            modal.y,
            modal.w,
            modal.h,
            with_alpha(theme.playfield_border, 0.94),
        );
        draw_rectangle(
            modal.x + 9.0,
            modal.y + 9.0,
            modal.w - 18.0,
            modal.h - 18.0,
            with_alpha(theme.playfield, 0.96),
        );

        let center_x = modal.x + modal.w / 2.0;
        let title = if outcome.is_win() {
            "You Win!"
        } else {
            "Game Over"
        };
        draw_text_centered(title, center_x, modal.y + 70.0, 48.0, theme.text_primary);
        draw_text_centered(
            &format!("Score: {}", self.round.score()),
            center_x,
            modal.y + 140.0,
            36.0,
            theme.text_secondary,
        );
        draw_text_centered(
            &format!("High Score: {}", self.round.high_score()),
            center_x,
            modal.y + 180.0,
            36.0,
            theme.text_secondary,
        );

        for button in &self.over_buttons {
            button.draw(theme, 32.0);
        }
    }
}

fn game_over_modal() -> Rect {
    let w = 420.0;
    let h = 320.0;
    Rect::new(
        (WINDOW_WIDTH as f32 - w) / 2.0,
        (WINDOW_HEIGHT as f32 - h) / 2.0,
        w,
        h,
    )
}
