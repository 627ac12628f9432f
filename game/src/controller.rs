use std::{
    io,
    sync::Arc,
    thread::{sleep, Builder, JoinHandle},
};

use crossbeam_channel::{bounded, select, unbounded};
use log::{error, info};

use crate::{
    field::Field,
    glyph::GlyphTable,
    input::{InputDispatcher, KeyMap},
    notification::{self, GameOver},
    paddle::Paddle,
    render::RenderDispatcher,
    rules::Rules,
    screen::{KeySource, Screen},
    simulation::{RallySenders, Simulation},
    GameError, Player,
};

enum Signal {
    GameOver(GameOver),
    NextRally,
    RendererGone,
}

/// wires the simulation, input and render tasks together and runs a game to completion.
pub struct Game<S, K> {
    field: Field,
    rules: Rules,
    glyphs: GlyphTable,
    key_map: KeyMap,
    screen: S,
    keys: K,
}

impl<S, K> Game<S, K>
where
    S: Screen + 'static,
    K: KeySource + 'static,
{
    pub fn new(field: Field, screen: S, keys: K) -> Self {
        Self {
            field,
            rules: Rules::default(),
            glyphs: GlyphTable::default(),
            key_map: KeyMap::default(),
            screen,
            keys,
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_glyphs(mut self, glyphs: GlyphTable) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    /// plays until someone wins or quits. the screen is shut down before returning `Ok`.
    pub fn run(self) -> Result<GameOver, GameError> {
        let Self {
            field,
            rules,
            glyphs,
            key_map,
            mut screen,
            keys,
        } = self;
        screen.set_echo(false)?;
        screen.set_cursor_visible(false)?;

        let paddles = Player::BOTH.map(|player| Arc::new(Paddle::new(&field, player)));
        let simulation = Simulation::new(field, &rules, paddles.clone());
        let (senders, receivers) = notification::channels();
        let (game_over_tx, game_over_rx) = unbounded();
        let (rally_tx, rally_rx) = unbounded();
        let (halt_tx, halt_rx) = bounded::<()>(0);
        let (stop_input_tx, stop_input_rx) = bounded::<()>(0);

        let mut renderer =
            RenderDispatcher::new(screen, field, glyphs, &paddles, receivers, rally_tx, halt_rx);
        renderer.draw_frame(simulation.ball().position())?;
        let renderer = Builder::new()
            .name("render_dispatcher".to_owned())
            .spawn(move || renderer.run())?;

        let input = InputDispatcher::new(
            keys,
            key_map,
            paddles,
            senders.paddle_tx.clone(),
            game_over_tx.clone(),
            stop_input_rx,
        );
        // left running on exit; it is usually blocked reading a key. once stopped it ignores
        // whatever key it reads next and returns.
        Builder::new()
            .name("input_dispatcher".to_owned())
            .spawn(move || input.run())?;

        let rally_senders = RallySenders {
            ball_tx: senders.ball_tx.clone(),
            score_tx: senders.score_tx.clone(),
            game_over_tx,
        };
        let mut rally = spawn_rally(simulation, &rally_senders)?;
        let game_over = loop {
            let signal = select! {
                recv(game_over_rx) -> game_over => Signal::GameOver(game_over.unwrap_or(GameOver::Quit)),
                recv(rally_rx) -> request => match request {
                    Ok(()) => Signal::NextRally,
                    Err(_) => Signal::RendererGone,
                },
            };
            match signal {
                Signal::GameOver(game_over) => break game_over,
                Signal::NextRally => match rally.join() {
                    Ok(Some(simulation)) => rally = spawn_rally(simulation, &rally_senders)?,
                    Ok(None) => break GameOver::Quit,
                    Err(_) => {
                        error!("simulation thread panicked");
                        return Err(GameError::TaskPanicked("simulation"));
                    }
                },
                Signal::RendererGone => break GameOver::Quit,
            }
        };
        info!("game over: {game_over:?}");

        drop(stop_input_tx);
        drop(halt_tx);
        let mut screen = renderer.join().map_err(|_| {
            error!("render dispatcher thread panicked");
            GameError::TaskPanicked("render dispatcher")
        })??;
        screen.clear()?;
        screen.move_and_print(0, 0, "Game over!")?;
        screen.move_and_print(1, 0, &announcement(game_over))?;
        screen.refresh()?;
        sleep(rules.game_over_pause);
        screen.set_cursor_visible(true)?;
        screen.set_echo(true)?;
        screen.shutdown()?;
        Ok(game_over)
    }
}

fn spawn_rally(
    simulation: Simulation,
    senders: &RallySenders,
) -> io::Result<JoinHandle<Option<Simulation>>> {
    let senders = senders.clone();
    Builder::new()
        .name("simulation".to_owned())
        .spawn(move || simulation.run_rally(&senders))
}

pub fn announcement(game_over: GameOver) -> String {
    match game_over {
        GameOver::Quit => "Game quit".to_owned(),
        GameOver::Won { winner, scores } => format!(
            "Player {} wins {} - {}",
            winner.number(),
            scores[0],
            scores[1]
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        controller::{announcement, Game},
        field::Field,
        glyph::GlyphTable,
        input::{Intent, KeyMap},
        notification::GameOver,
        rules::Rules,
        screen::Key,
        test_support::{RecordingScreen, ScriptedKeys},
        Player,
    };

    fn fast_rules() -> Rules {
        Rules {
            tick_unit: Duration::from_micros(50),
            game_over_pause: Duration::ZERO,
            ..Rules::default()
        }
    }

    #[test]
    fn unattended_game_runs_to_seven() {
        let field = Field::new(20, 50).unwrap();
        let screen = RecordingScreen::default();
        let (_keys_tx, keys) = ScriptedKeys::new();
        let outcome = Game::new(field, screen.clone(), keys)
            .with_rules(fast_rules())
            .run()
            .unwrap();
        assert_eq!(
            outcome,
            GameOver::Won {
                winner: Player::Two,
                scores: [0, 7],
            }
        );
        let canvas = screen.canvas();
        assert_eq!(canvas.text(0, 0, 10), "Game over!");
        assert_eq!(canvas.text(1, 0, 19), "Player 2 wins 0 - 7");
        assert_eq!(canvas.clears, 2);
        assert!(canvas.shut_down);
        assert_eq!(canvas.echo, Some(true));
        assert_eq!(canvas.cursor_visible, Some(true));
    }

    #[test]
    fn quit_key_ends_the_game() {
        let field = Field::new(20, 50).unwrap();
        let screen = RecordingScreen::default();
        let (keys_tx, keys) = ScriptedKeys::new();
        keys_tx.send(Key::Char('s')).unwrap();
        keys_tx.send(Key::Char('q')).unwrap();
        let rules = Rules {
            game_over_pause: Duration::ZERO,
            ..Rules::default()
        };
        let outcome = Game::new(field, screen.clone(), keys)
            .with_rules(rules)
            .run()
            .unwrap();
        assert_eq!(outcome, GameOver::Quit);
        let canvas = screen.canvas();
        assert_eq!(canvas.text(1, 0, 9), "Game quit");
        assert!(canvas.shut_down);
    }

    #[test]
    fn custom_bindings_and_glyphs() {
        let field = Field::new(12, 20).unwrap();
        let screen = RecordingScreen::default();
        let (keys_tx, keys) = ScriptedKeys::new();
        keys_tx.send(Key::Char('q')).unwrap();
        keys_tx.send(Key::Char('x')).unwrap();
        let rules = Rules {
            game_over_pause: Duration::ZERO,
            ..Rules::default()
        };
        let outcome = Game::new(field, screen.clone(), keys)
            .with_rules(rules)
            .with_glyphs(GlyphTable::new('=', '|', '*'))
            .with_key_map(KeyMap::empty().bind(Key::Char('x'), Intent::Quit))
            .run()
            .unwrap();
        // 'q' is unbound here, so only 'x' ends the game.
        assert_eq!(outcome, GameOver::Quit);
    }

    #[test]
    fn announcements() {
        assert_eq!(announcement(GameOver::Quit), "Game quit");
        assert_eq!(
            announcement(GameOver::Won {
                winner: Player::One,
                scores: [7, 4],
            }),
            "Player 1 wins 7 - 4"
        );
    }
}
