use std::io::{self, stdout, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use game::screen::{Key, KeySource, Screen};

/// the real terminal, in raw mode on the alternate screen until shut down or dropped.
pub struct Terminal {
    stdout: Stdout,
    active: bool,
}

impl Terminal {
    /// takes over the terminal, failing if it has fewer than `rows` x `cols` cells.
    pub fn open(rows: u16, cols: u16) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        if width < cols || height < rows {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("terminal is {width}x{height} but the game needs {cols}x{rows}"),
            ));
        }
        enable_raw_mode()?;
        let mut terminal = Self {
            stdout: stdout(),
            active: true,
        };
        execute!(
            terminal.stdout,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        Ok(terminal)
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.stdout, Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Screen for Terminal {
    fn move_and_print(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        queue!(self.stdout, MoveTo(col, row), Print(text))
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All))
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn set_echo(&mut self, enabled: bool) -> io::Result<()> {
        // raw mode is what keeps typed keys off the screen.
        if enabled {
            disable_raw_mode()
        } else {
            enable_raw_mode()
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.stdout, Show)
        } else {
            execute!(self.stdout, Hide)
        }
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.restore()
    }
}

/// hands the terminal back when a game failed somewhere the [`Terminal`] can't be reached.
pub fn force_restore() {
    let _ = execute!(stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(translate(key_event.code, key_event.modifiers));
                }
            }
        }
    }
}

fn translate(code: KeyCode, modifiers: KeyModifiers) -> Key {
    match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => Key::Ctrl(c),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => Key::Other,
    }
}
