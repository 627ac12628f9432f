use std::{collections::HashMap, ops::ControlFlow, sync::Arc};

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, error, info, warn};

use crate::{
    notification::{GameOver, PaddleMoved},
    paddle::Paddle,
    screen::{Key, KeySource},
    Player,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Move { player: Player, delta: i16 },
    Quit,
}

/// which key does what. keys without a binding are ignored.
#[derive(Clone, Debug)]
pub struct KeyMap {
    bindings: HashMap<Key, Intent>,
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(mut self, key: Key, intent: Intent) -> Self {
        self.bindings.insert(key, intent);
        self
    }

    pub fn intent(&self, key: Key) -> Option<Intent> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let up = |player| Intent::Move { player, delta: -1 };
        let down = |player| Intent::Move { player, delta: 1 };
        Self::empty()
            .bind(Key::Char('w'), up(Player::One))
            .bind(Key::Char('s'), down(Player::One))
            .bind(Key::Char('o'), up(Player::Two))
            .bind(Key::Char('l'), down(Player::Two))
            .bind(Key::Up, up(Player::Two))
            .bind(Key::Down, down(Player::Two))
            .bind(Key::Char('q'), Intent::Quit)
            .bind(Key::Ctrl('c'), Intent::Quit)
    }
}

/// turns key presses into paddle moves. this is the only code that moves a paddle.
pub struct InputDispatcher<K> {
    keys: K,
    key_map: KeyMap,
    paddles: [Arc<Paddle>; 2],
    paddle_tx: Sender<PaddleMoved>,
    game_over_tx: Sender<GameOver>,
    stop_rx: Receiver<()>,
}

impl<K: KeySource> InputDispatcher<K> {
    pub fn new(
        keys: K,
        key_map: KeyMap,
        paddles: [Arc<Paddle>; 2],
        paddle_tx: Sender<PaddleMoved>,
        game_over_tx: Sender<GameOver>,
        stop_rx: Receiver<()>,
    ) -> Self {
        Self {
            keys,
            key_map,
            paddles,
            paddle_tx,
            game_over_tx,
            stop_rx,
        }
    }

    /// reads keys until the player quits, the game ends or the renderer stops listening.
    pub fn run(mut self) {
        loop {
            let key = match self.keys.read_key() {
                Ok(key) => key,
                Err(err) => {
                    error!("failed to read key: {err}");
                    let _ = self.game_over_tx.send(GameOver::Quit);
                    return;
                }
            };
            if self.dispatch(key).is_break() {
                return;
            }
        }
    }

    /// acts on one key. once the controller has dropped the stop sender no key moves a paddle.
    pub fn dispatch(&self, key: Key) -> ControlFlow<()> {
        if let Ok(()) | Err(TryRecvError::Disconnected) = self.stop_rx.try_recv() {
            debug!("game over, ignoring {key:?}");
            return ControlFlow::Break(());
        }
        match self.key_map.intent(key) {
            Some(Intent::Move { player, delta }) => {
                let paddle = &self.paddles[player.index()];
                if !paddle.move_by(delta) {
                    return ControlFlow::Continue(());
                }
                let moved = PaddleMoved {
                    player,
                    delta,
                    top: paddle.top(),
                };
                debug!("player {} paddle moved to row {}", player.number(), moved.top);
                if self.paddle_tx.send(moved).is_err() {
                    warn!("paddle notification channel closed, stopping input");
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            }
            Some(Intent::Quit) => {
                info!("quit requested");
                let _ = self.game_over_tx.send(GameOver::Quit);
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }
}
