use std::{
    ops::RangeInclusive,
    sync::atomic::{AtomicU16, Ordering},
};

use crate::{field::Field, Player, Position};

/// a player's paddle. `top` is shared between the input dispatcher, which is the only writer,
/// and the simulation, which reads it to test deflections.
#[derive(Debug)]
pub struct Paddle {
    top: AtomicU16,
    height: u16,
    column: u16,
    min_top: u16,
    max_top: u16,
}

impl Paddle {
    pub fn new(field: &Field, player: Player) -> Self {
        let height = field.paddle_height();
        Self {
            top: AtomicU16::new(field.paddle_start_top()),
            height,
            column: field.paddle_column(player),
            min_top: field.first_row(),
            max_top: field.last_row() + 1 - height,
        }
    }

    pub fn top(&self) -> u16 {
        self.top.load(Ordering::Relaxed)
    }

    pub fn bottom(&self) -> u16 {
        self.top() + self.height - 1
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    pub fn rows(&self) -> RangeInclusive<u16> {
        let top = self.top();
        top..=top + self.height - 1
    }

    /// shifts the paddle by `delta` rows. a move that would overlap a wall is rejected and leaves
    /// the paddle where it was.
    pub fn move_by(&self, delta: i16) -> bool {
        self.top
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |top| {
                top.checked_add_signed(delta)
                    .filter(|top| (self.min_top..=self.max_top).contains(top))
            })
            .is_ok()
    }

    /// whether a ball at `ball` sits in the column next to the paddle, within its rows.
    pub fn is_deflection(&self, ball: Position) -> bool {
        self.rows().contains(&ball.row) && ball.col.abs_diff(self.column) == 1
    }

    /// whether a ball at `ball` has reached the paddle's column. the row is not considered.
    pub fn is_score(&self, ball: Position) -> bool {
        ball.col == self.column
    }
}
