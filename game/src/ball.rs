use std::time::Duration;

use crate::{field::Field, rules::Rules, Player, Position};

/// the ball's kinematic state. it is owned by the simulation for the whole game and reset in
/// place by [`Ball::center_and_serve`] at the start of every rally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ball {
    position: Position,
    previous: Position,
    row_velocity: i16,
    col_velocity: i16,
    speed: u32,
    paddle_hits: u32,
    initial_speed: u32,
    speed_step: u32,
}

impl Ball {
    /// a ball at the center of the field, heading toward player one.
    pub fn new(field: &Field, rules: &Rules) -> Self {
        let mut ball = Self {
            position: field.center(),
            previous: field.center(),
            row_velocity: 0,
            col_velocity: 0,
            speed: rules.initial_speed,
            paddle_hits: 0,
            initial_speed: rules.initial_speed,
            speed_step: rules.speed_step,
        };
        ball.center_and_serve(field, Player::One);
        ball
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn previous(&self) -> Position {
        self.previous
    }

    pub fn velocity(&self) -> (i16, i16) {
        (self.row_velocity, self.col_velocity)
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn paddle_hits(&self) -> u32 {
        self.paddle_hits
    }

    /// how long to wait between ticks at the current speed.
    pub fn tick_interval(&self, tick_unit: Duration) -> Duration {
        tick_unit / self.speed.max(1)
    }

    /// moves one step along the current velocity. callers check walls and paddles afterwards.
    pub fn advance(&mut self) {
        self.previous = self.position;
        self.position = Position::new(
            self.position.row.saturating_add_signed(self.row_velocity),
            self.position.col.saturating_add_signed(self.col_velocity),
        );
    }

    pub fn reflect_vertical(&mut self) {
        self.row_velocity = -self.row_velocity;
    }

    /// bounces off a paddle. returns whether the hit sped the ball up.
    pub fn reflect_horizontal(&mut self) -> bool {
        self.col_velocity = -self.col_velocity;
        self.paddle_hits += 1;
        if self.paddle_hits * 2 > self.speed {
            self.speed += self.speed_step;
            true
        } else {
            false
        }
    }

    /// puts the ball back in the middle of the field and sends it diagonally toward `toward`.
    pub fn center_and_serve(&mut self, field: &Field, toward: Player) {
        let direction = match toward {
            Player::One => -1,
            Player::Two => 1,
        };
        self.position = field.center();
        self.previous = self.position;
        self.row_velocity = direction;
        self.col_velocity = direction;
        self.speed = self.initial_speed;
        self.paddle_hits = 0;
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, position: Position, row_velocity: i16, col_velocity: i16) {
        self.position = position;
        self.previous = position;
        self.row_velocity = row_velocity;
        self.col_velocity = col_velocity;
    }
}
