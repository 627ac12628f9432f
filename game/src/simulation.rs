use std::{sync::Arc, thread::sleep, time::Duration};

use crossbeam_channel::Sender;
use log::{debug, info, warn};

use crate::{
    ball::Ball,
    field::Field,
    notification::{BallMoved, GameOver, Scored},
    paddle::Paddle,
    rules::Rules,
    Player,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    scores: [u32; 2],
    winning_score: u32,
}

impl Scoreboard {
    pub fn new(winning_score: u32) -> Self {
        Self {
            scores: [0, 0],
            winning_score,
        }
    }

    pub fn award(&mut self, player: Player) {
        self.scores[player.index()] += 1;
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn winner(&self) -> Option<Player> {
        Player::BOTH
            .into_iter()
            .find(|player| self.score(*player) >= self.winning_score)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// the ball reached a paddle column. the ball has already been re-served.
    Scored(Player),
    Rebounded { off_paddle: bool, off_wall: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub moved: BallMoved,
    pub event: TickEvent,
}

#[derive(Clone)]
pub struct RallySenders {
    pub ball_tx: Sender<BallMoved>,
    pub score_tx: Sender<Scored>,
    pub game_over_tx: Sender<GameOver>,
}

/// owns the ball and the scoreboard. a rally runs on its own thread and hands the simulation
/// back when it ends so the next rally can pick up where it left off.
pub struct Simulation {
    field: Field,
    ball: Ball,
    paddles: [Arc<Paddle>; 2],
    scoreboard: Scoreboard,
    tick_unit: Duration,
}

impl Simulation {
    pub fn new(field: Field, rules: &Rules, paddles: [Arc<Paddle>; 2]) -> Self {
        Self {
            field,
            ball: Ball::new(&field, rules),
            paddles,
            scoreboard: Scoreboard::new(rules.winning_score),
            tick_unit: rules.tick_unit,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    /// advances the ball one cell and resolves whatever it ran into.
    pub fn tick(&mut self) -> Tick {
        self.ball.advance();
        let position = self.ball.position();
        let moved = BallMoved {
            from: self.ball.previous(),
            to: position,
        };
        // a ball can't be in one paddle's column and next to the other's on the same tick.
        for defender in Player::BOTH {
            if self.paddle(defender).is_score(position) {
                let scorer = defender.opponent();
                self.scoreboard.award(scorer);
                self.ball.center_and_serve(&self.field, defender);
                return Tick {
                    moved,
                    event: TickEvent::Scored(scorer),
                };
            }
        }
        let off_paddle = Player::BOTH
            .into_iter()
            .any(|player| self.paddle(player).is_deflection(position));
        if off_paddle && self.ball.reflect_horizontal() {
            debug!("ball sped up to {} ticks per unit", self.ball.speed());
        }
        let off_wall = position.row == self.field.first_row() || position.row == self.field.last_row();
        if off_wall {
            self.ball.reflect_vertical();
        }
        Tick {
            moved,
            event: TickEvent::Rebounded {
                off_paddle,
                off_wall,
            },
        }
    }

    /// ticks until someone scores. returns `None` if the renderer went away mid-rally.
    pub fn run_rally(mut self, senders: &RallySenders) -> Option<Self> {
        info!(
            "rally started, serving from {:?} with velocity {:?}",
            self.ball.position(),
            self.ball.velocity()
        );
        loop {
            let tick = self.tick();
            if senders.ball_tx.send(tick.moved).is_err() {
                warn!("ball notification channel closed, stopping simulation");
                return None;
            }
            if let TickEvent::Scored(scorer) = tick.event {
                let scores = self.scoreboard.scores();
                let winner = self.scoreboard.winner();
                info!(
                    "player {} scored, {} - {}",
                    scorer.number(),
                    scores[0],
                    scores[1]
                );
                let scored = Scored {
                    scorer,
                    scores,
                    last: tick.moved.to,
                    serve: self.ball.position(),
                    winner,
                };
                if senders.score_tx.send(scored).is_err() {
                    warn!("score notification channel closed, stopping simulation");
                    return None;
                }
                if let Some(winner) = winner {
                    info!("player {} won", winner.number());
                    let _ = senders
                        .game_over_tx
                        .send(GameOver::Won { winner, scores });
                }
                return Some(self);
            }
            sleep(self.ball.tick_interval(self.tick_unit));
        }
    }

    #[cfg(test)]
    pub(crate) fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }
}
