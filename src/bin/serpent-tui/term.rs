use std::fmt::Display;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

/// Raw-mode terminal session. Writes are queued and flushed once per frame.
///
/// Restoration of the host terminal (raw mode off, cursor back, main screen)
/// happens in `Drop`, so it runs on every exit path, panics included.
pub struct Term {
    width: u16,
    height: u16,
    stdout: Stdout,
    entered: bool,
}

impl Term {
    pub fn new() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Term {
            width,
            height,
            stdout: stdout(),
            entered: false,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Switch to the alternate screen in raw mode with the cursor hidden.
    pub fn enter(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.entered = true;
        Ok(())
    }

    pub fn clear(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    /// Queue `what` for printing at `(x, y)`. Call [`flush`](Term::flush)
    /// to push the frame out.
    pub fn print_at(&mut self, x: u16, y: u16, what: impl Display) -> std::io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(what))
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }

    /// Wait up to `timeout` for a key event; `None` on timeout or when the
    /// next event is not a key.
    pub fn poll_key(&self, timeout: Duration) -> std::io::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    /// Block until a key arrives.
    pub fn read_key_blocking(&self) -> std::io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        if self.entered {
            let _ = terminal::disable_raw_mode();
            let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        }
    }
}
