//! Terminal screen and keyboard using the `console` crate.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use dialoguer::console::{Key, Style, Term};

use crate::domain::AppError;
use crate::domain::game::{Control, Direction, Frame, Tone};
use crate::ports::GameScreen;

/// The real terminal. The cursor is hidden while this is alive.
pub struct ConsoleScreen {
    term: Term,
    snake: Style,
    food: Style,
}

impl ConsoleScreen {
    /// Take over stdout. Fails when stdout is not a terminal or cannot fit
    /// a `min_cols` x `min_rows` frame.
    pub fn open(min_cols: u16, min_rows: u16) -> Result<Self, AppError> {
        let term = Term::stdout();
        if !term.is_term() {
            return Err(AppError::NotATerminal);
        }
        let (rows, cols) = term.size();
        if rows < min_rows || cols < min_cols {
            return Err(AppError::TerminalTooSmall { cols, rows, min_cols, min_rows });
        }

        term.hide_cursor()?;
        term.clear_screen()?;
        Ok(Self { term, snake: Style::new().green(), food: Style::new().red().bold() })
    }

    /// Give the terminal back: clear what the game drew and show the cursor.
    pub fn restore(&self) -> Result<(), AppError> {
        self.term.clear_screen()?;
        self.term.show_cursor()?;
        Ok(())
    }
}

impl Drop for ConsoleScreen {
    fn drop(&mut self) {
        let _ = self.term.show_cursor();
    }
}

impl GameScreen for ConsoleScreen {
    fn present(&mut self, frame: &Frame) -> Result<(), AppError> {
        let mut out = String::with_capacity(frame.width() * frame.height() * 2);
        for (index, row) in frame.rows().enumerate() {
            if index > 0 {
                out.push_str("\r\n");
            }
            for cell in row {
                match cell.tone {
                    Tone::Plain => out.push(cell.ch),
                    Tone::Snake => out.push_str(&self.snake.apply_to(cell.ch).to_string()),
                    Tone::Food => out.push_str(&self.food.apply_to(cell.ch).to_string()),
                }
            }
        }
        self.term.move_cursor_to(0, 0)?;
        self.term.write_str(&out)?;
        self.term.flush()?;
        Ok(())
    }
}

/// Map a key press to a control. Unbound keys yield `None`.
pub fn control_for_key(key: &Key) -> Option<Control> {
    match key {
        Key::ArrowUp => Some(Control::Turn(Direction::Up)),
        Key::ArrowDown => Some(Control::Turn(Direction::Down)),
        Key::ArrowLeft => Some(Control::Turn(Direction::Left)),
        Key::ArrowRight => Some(Control::Turn(Direction::Right)),
        Key::Char(' ') => Some(Control::TogglePause),
        Key::Char('q' | 'Q' | '\u{3}') | Key::Escape | Key::CtrlC => Some(Control::Quit),
        _ => None,
    }
}

/// Read keys on a dedicated thread. The channel closes after `Quit`.
pub fn spawn_key_reader() -> Result<Receiver<Control>, AppError> {
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new().name("key-reader".into()).spawn(move || {
        let term = Term::stdout();
        loop {
            let control = match term.read_key() {
                Ok(key) => control_for_key(&key),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => Some(Control::Quit),
                Err(err) => {
                    tracing::error!("Error reading key: {err}");
                    Some(Control::Quit)
                }
            };
            if let Some(control) = control {
                if sender.send(control).is_err() || control == Control::Quit {
                    break;
                }
            }
        }
    })?;
    Ok(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_turn_and_space_pauses() {
        assert_eq!(control_for_key(&Key::ArrowLeft), Some(Control::Turn(Direction::Left)));
        assert_eq!(control_for_key(&Key::ArrowUp), Some(Control::Turn(Direction::Up)));
        assert_eq!(control_for_key(&Key::Char(' ')), Some(Control::TogglePause));
    }

    #[test]
    fn quit_keys() {
        for key in [Key::Char('q'), Key::Escape, Key::CtrlC, Key::Char('\u{3}')] {
            assert_eq!(control_for_key(&key), Some(Control::Quit), "{key:?}");
        }
        assert_eq!(control_for_key(&Key::Char('x')), None);
        assert_eq!(control_for_key(&Key::Enter), None);
    }
}
