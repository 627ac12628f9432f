use std::time::Duration;

pub const WINNING_SCORE: u32 = 7;
pub const INITIAL_SPEED: u32 = 10;
pub const SPEED_STEP: u32 = 2;

/// tuning knobs for a game. the defaults are what the terminal client plays with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub winning_score: u32,
    /// ticks per `tick_unit` at the start of every rally.
    pub initial_speed: u32,
    pub speed_step: u32,
    /// a tick lasts `tick_unit / speed`.
    pub tick_unit: Duration,
    /// how long the game over message stays up before the controller returns.
    pub game_over_pause: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            tick_unit: Duration::from_secs(1),
            game_over_pause: Duration::from_secs(2),
        }
    }
}
