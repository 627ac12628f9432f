//! messages sent from the producers (simulation and input) to the render dispatcher. each
//! payload carries copies of everything the renderer needs, so it never reads shared state.

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::{Player, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddleMoved {
    pub player: Player,
    pub delta: i16,
    /// the paddle's top row after the move.
    pub top: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BallMoved {
    pub from: Position,
    pub to: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    pub scorer: Player,
    pub scores: [u32; 2],
    /// where the ball was when it crossed into the paddle column.
    pub last: Position,
    /// where the ball was re-served from.
    pub serve: Position,
    pub winner: Option<Player>,
}

/// why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOver {
    Quit,
    Won { winner: Player, scores: [u32; 2] },
}

#[derive(Clone)]
pub struct NotificationSenders {
    pub paddle_tx: Sender<PaddleMoved>,
    pub ball_tx: Sender<BallMoved>,
    pub score_tx: Sender<Scored>,
}

pub struct NotificationReceivers {
    pub paddle_rx: Receiver<PaddleMoved>,
    pub ball_rx: Receiver<BallMoved>,
    pub score_rx: Receiver<Scored>,
}

/// one rendezvous channel per notification kind. a producer blocks until the renderer has
/// taken its previous notification.
pub fn channels() -> (NotificationSenders, NotificationReceivers) {
    let (paddle_tx, paddle_rx) = bounded(0);
    let (ball_tx, ball_rx) = bounded(0);
    let (score_tx, score_rx) = bounded(0);
    (
        NotificationSenders {
            paddle_tx,
            ball_tx,
            score_tx,
        },
        NotificationReceivers {
            paddle_rx,
            ball_rx,
            score_rx,
        },
    )
}
