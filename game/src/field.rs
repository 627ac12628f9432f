use std::{error::Error, fmt::Display};

use crate::{Player, Position};

pub const MIN_HEIGHT: u16 = 8;
pub const MIN_WIDTH: u16 = 10;
pub const MAX_HEIGHT: u16 = 1000;
pub const MAX_WIDTH: u16 = 1000;

/// the fixed playing area. rows 0 and `height - 1` are walls, everything in between is playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    height: u16,
    width: u16,
}

impl Field {
    pub fn new(height: u16, width: u16) -> Result<Self, FieldError> {
        if height < MIN_HEIGHT {
            return Err(FieldError::TooShort { height });
        }
        if width < MIN_WIDTH {
            return Err(FieldError::TooNarrow { width });
        }
        // the score lines and the right side wall sit just outside the field.
        if height > MAX_HEIGHT {
            return Err(FieldError::TooTall { height });
        }
        if width > MAX_WIDTH {
            return Err(FieldError::TooWide { width });
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn top_wall(&self) -> u16 {
        0
    }

    pub fn bottom_wall(&self) -> u16 {
        self.height - 1
    }

    pub fn first_row(&self) -> u16 {
        self.top_wall() + 1
    }

    pub fn last_row(&self) -> u16 {
        self.bottom_wall() - 1
    }

    pub fn center(&self) -> Position {
        Position::new(self.height / 2, self.width / 2)
    }

    pub fn paddle_column(&self, player: Player) -> u16 {
        match player {
            Player::One => 2,
            Player::Two => self.width - 2,
        }
    }

    pub fn paddle_height(&self) -> u16 {
        self.height / 4
    }

    pub fn paddle_start_top(&self) -> u16 {
        self.height / 3
    }

    /// the row below the field where a player's score is shown.
    pub fn score_row(&self, player: Player) -> u16 {
        self.height + player.index() as u16
    }

    /// total screen rows needed to show the field and both score lines.
    pub fn screen_rows(&self) -> u16 {
        self.height + 2
    }

    /// total screen columns needed, including the right side wall at `width`.
    pub fn screen_cols(&self) -> u16 {
        self.width + 1
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FieldError {
    TooShort { height: u16 },
    TooNarrow { width: u16 },
    TooTall { height: u16 },
    TooWide { width: u16 },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::TooShort { height } => {
                write!(f, "field height {height} is below the minimum of {MIN_HEIGHT}")
            }
            FieldError::TooNarrow { width } => {
                write!(f, "field width {width} is below the minimum of {MIN_WIDTH}")
            }
            FieldError::TooTall { height } => {
                write!(f, "field height {height} is above the maximum of {MAX_HEIGHT}")
            }
            FieldError::TooWide { width } => {
                write!(f, "field width {width} is above the maximum of {MAX_WIDTH}")
            }
        }
    }
}

impl Error for FieldError {}

#[cfg(test)]
mod tests {
    use crate::{
        field::{Field, FieldError},
        Player, Position,
    };

    #[test]
    fn rejects_small_fields() {
        assert_eq!(Field::new(7, 50), Err(FieldError::TooShort { height: 7 }));
        assert_eq!(Field::new(20, 9), Err(FieldError::TooNarrow { width: 9 }));
        assert!(Field::new(8, 10).is_ok());
    }

    #[test]
    fn rejects_huge_fields() {
        assert_eq!(
            Field::new(u16::MAX, 50),
            Err(FieldError::TooTall { height: u16::MAX })
        );
        assert_eq!(
            Field::new(20, u16::MAX),
            Err(FieldError::TooWide { width: u16::MAX })
        );
        assert_eq!(
            Field::new(1001, 1000),
            Err(FieldError::TooTall { height: 1001 })
        );
        let field = Field::new(1000, 1000).unwrap();
        assert_eq!(field.screen_rows(), 1002);
        assert_eq!(field.screen_cols(), 1001);
        assert_eq!(field.score_row(Player::Two), 1001);
    }

    #[test]
    fn layout() {
        let field = Field::new(20, 50).unwrap();
        assert_eq!(field.top_wall(), 0);
        assert_eq!(field.bottom_wall(), 19);
        assert_eq!(field.first_row(), 1);
        assert_eq!(field.last_row(), 18);
        assert_eq!(field.center(), Position::new(10, 25));
        assert_eq!(field.paddle_column(Player::One), 2);
        assert_eq!(field.paddle_column(Player::Two), 48);
        assert_eq!(field.paddle_height(), 5);
        assert_eq!(field.paddle_start_top(), 6);
        assert_eq!(field.score_row(Player::One), 20);
        assert_eq!(field.score_row(Player::Two), 21);
    }

    #[test]
    fn smallest_field_fits_paddles() {
        let field = Field::new(8, 10).unwrap();
        let bottom = field.paddle_start_top() + field.paddle_height() - 1;
        assert!(field.paddle_start_top() >= field.first_row());
        assert!(bottom <= field.last_row());
    }
}
