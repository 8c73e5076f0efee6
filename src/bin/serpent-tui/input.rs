use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use serpent::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

/// Key-to-command table, built once at startup and handed to the input
/// translation step.
pub struct Bindings {
    map: HashMap<KeyCode, Command>,
}

impl Bindings {
    pub fn standard() -> Self {
        use Command::*;
        use KeyCode::*;

        let map = [
            (Up, Turn(Direction::Up)),
            (Down, Turn(Direction::Down)),
            (Left, Turn(Direction::Left)),
            (Right, Turn(Direction::Right)),
            (Char('w'), Turn(Direction::Up)),
            (Char('W'), Turn(Direction::Up)),
            (Char('s'), Turn(Direction::Down)),
            (Char('S'), Turn(Direction::Down)),
            (Char('a'), Turn(Direction::Left)),
            (Char('A'), Turn(Direction::Left)),
            (Char('d'), Turn(Direction::Right)),
            (Char('D'), Turn(Direction::Right)),
            (Char('p'), TogglePause),
            (Char('P'), TogglePause),
            (Char('r'), Restart),
            (Char('R'), Restart),
            (Char('q'), Quit),
            (Char('Q'), Quit),
        ]
        .into_iter()
        .collect();

        Bindings { map }
    }

    pub fn translate(&self, ev: &KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }
        if ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }
        self.map.get(&ev.code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_turn() {
        let bindings = Bindings::standard();
        assert_eq!(
            bindings.translate(&press(KeyCode::Up)),
            Some(Command::Turn(Direction::Up))
        );
        assert_eq!(
            bindings.translate(&press(KeyCode::Char('a'))),
            Some(Command::Turn(Direction::Left))
        );
        assert_eq!(
            bindings.translate(&press(KeyCode::Char('D'))),
            Some(Command::Turn(Direction::Right))
        );
    }

    #[test]
    fn ctrl_c_quits() {
        let bindings = Bindings::standard();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(bindings.translate(&ev), Some(Command::Quit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let bindings = Bindings::standard();
        assert_eq!(bindings.translate(&press(KeyCode::Char('x'))), None);
        assert_eq!(bindings.translate(&press(KeyCode::Tab)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let bindings = Bindings::standard();
        let mut ev = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(bindings.translate(&ev), None);
    }
}
