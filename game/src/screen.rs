//! the drawing capability the game is played through. the terminal client supplies the real
//! implementation; tests use an in-memory one.

use std::io;

/// a character-cell drawing surface. only the render dispatcher draws while a game is running.
pub trait Screen: Send {
    fn move_and_print(&mut self, row: u16, col: u16, text: &str) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    /// pushes everything drawn so far to the physical display.
    fn refresh(&mut self) -> io::Result<()>;

    fn set_echo(&mut self, enabled: bool) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// hands the display back to the user. nothing is drawn afterwards.
    fn shutdown(&mut self) -> io::Result<()>;
}

/// a blocking source of key presses.
pub trait KeySource: Send {
    fn read_key(&mut self) -> io::Result<Key>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Other,
}
