use std::{error::Error, fmt::Display, io};

pub mod ball;
pub mod controller;
pub mod field;
pub mod glyph;
pub mod input;
pub mod notification;
pub mod paddle;
pub mod render;
pub mod rules;
pub mod screen;
pub mod simulation;

#[cfg(test)]
mod test_support;

/// one of the two players. player one defends the left paddle, player two the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// a cell on the field. row 0 is the top wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

#[derive(Debug)]
pub enum GameError {
    Io(io::Error),
    TaskPanicked(&'static str),
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Io(err) => Display::fmt(err, f),
            GameError::TaskPanicked(task) => write!(f, "{task} task panicked"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Io(source) => Some(source),
            GameError::TaskPanicked(_) => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(value: io::Error) -> Self {
        GameError::Io(value)
    }
}
