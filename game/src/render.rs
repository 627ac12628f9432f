use std::{io, iter, ops::ControlFlow, sync::Arc};

use crossbeam_channel::{select, Receiver, RecvError, Sender};
use log::{debug, warn};

use crate::{
    field::Field,
    glyph::{Glyph, GlyphTable, BLANK},
    notification::{BallMoved, NotificationReceivers, PaddleMoved, Scored},
    paddle::Paddle,
    screen::Screen,
    GameError, Player, Position,
};

/// the column score digits are drawn at, just after the `Player N: ` label.
pub const SCORE_COLUMN: u16 = 10;

/// the renderer's own record of where a paddle is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PaddleView {
    column: u16,
    top: u16,
    height: u16,
}

impl PaddleView {
    fn covers(&self, position: Position) -> bool {
        position.col == self.column
            && position.row >= self.top
            && position.row < self.top + self.height
    }

    fn cells(&self) -> impl Iterator<Item = Position> {
        let column = self.column;
        (self.top..self.top + self.height).map(move |row| Position::new(row, column))
    }
}

enum Notification {
    Paddle(PaddleMoved),
    Ball(BallMoved),
    Score(Scored),
}

/// the only writer to the screen while a game is running. it redraws just the cells a
/// notification says have changed.
pub struct RenderDispatcher<S> {
    screen: S,
    field: Field,
    glyphs: GlyphTable,
    paddles: [PaddleView; 2],
    receivers: NotificationReceivers,
    rally_tx: Sender<()>,
    halt_rx: Receiver<()>,
}

impl<S: Screen> RenderDispatcher<S> {
    pub fn new(
        screen: S,
        field: Field,
        glyphs: GlyphTable,
        paddles: &[Arc<Paddle>; 2],
        receivers: NotificationReceivers,
        rally_tx: Sender<()>,
        halt_rx: Receiver<()>,
    ) -> Self {
        let paddles = paddles.each_ref().map(|paddle| PaddleView {
            column: paddle.column(),
            top: paddle.top(),
            height: paddle.height(),
        });
        Self {
            screen,
            field,
            glyphs,
            paddles,
            receivers,
            rally_tx,
            halt_rx,
        }
    }

    /// draws the whole field from scratch: walls, paddles, ball and both score lines.
    pub fn draw_frame(&mut self, ball: Position) -> io::Result<()> {
        self.screen.clear()?;
        let wall = self.glyphs.glyph(Glyph::Wall);
        let wall_row: String = iter::repeat(wall).take(self.field.screen_cols() as usize).collect();
        self.screen
            .move_and_print(self.field.top_wall(), 0, &wall_row)?;
        self.screen
            .move_and_print(self.field.bottom_wall(), 0, &wall_row)?;
        for row in self.field.first_row()..=self.field.last_row() {
            self.put(Position::new(row, 0), Glyph::Wall)?;
            self.put(Position::new(row, self.field.width()), Glyph::Wall)?;
        }
        for view in self.paddles {
            for cell in view.cells() {
                self.put(cell, Glyph::Paddle)?;
            }
        }
        self.put(ball, Glyph::Ball)?;
        for player in Player::BOTH {
            self.screen.move_and_print(
                self.field.score_row(player),
                0,
                &format!("Player {}: 0", player.number()),
            )?;
        }
        self.screen.refresh()
    }

    /// handles notifications until the controller halts it, then hands the screen back.
    pub fn run(mut self) -> Result<S, GameError> {
        loop {
            let notification = select! {
                recv(self.receivers.paddle_rx) -> moved => moved.map(Notification::Paddle),
                recv(self.receivers.ball_rx) -> moved => moved.map(Notification::Ball),
                recv(self.receivers.score_rx) -> scored => scored.map(Notification::Score),
                recv(self.halt_rx) -> _halt => Err(RecvError),
            };
            let Ok(notification) = notification else {
                debug!("render dispatcher halted");
                break;
            };
            let flow = match notification {
                Notification::Paddle(moved) => self.on_paddle_moved(moved)?,
                Notification::Ball(moved) => self.on_ball_moved(moved)?,
                Notification::Score(scored) => self.on_scored(scored)?,
            };
            self.screen.refresh()?;
            if flow.is_break() {
                break;
            }
        }
        Ok(self.screen)
    }

    fn on_paddle_moved(&mut self, moved: PaddleMoved) -> io::Result<ControlFlow<()>> {
        let old = self.paddles[moved.player.index()];
        let new = PaddleView {
            top: moved.top,
            ..old
        };
        self.paddles[moved.player.index()] = new;
        for cell in old.cells().filter(|cell| !new.covers(*cell)) {
            self.restore(cell)?;
        }
        for cell in new.cells().filter(|cell| !old.covers(*cell)) {
            self.put(cell, Glyph::Paddle)?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn on_ball_moved(&mut self, moved: BallMoved) -> io::Result<ControlFlow<()>> {
        self.restore(moved.from)?;
        self.put(moved.to, Glyph::Ball)?;
        Ok(ControlFlow::Continue(()))
    }

    fn on_scored(&mut self, scored: Scored) -> io::Result<ControlFlow<()>> {
        self.restore(scored.last)?;
        self.put(scored.serve, Glyph::Ball)?;
        for player in Player::BOTH {
            self.screen.move_and_print(
                self.field.score_row(player),
                SCORE_COLUMN,
                &scored.scores[player.index()].to_string(),
            )?;
        }
        if scored.winner.is_none() && self.rally_tx.send(()).is_err() {
            warn!("controller stopped listening for rally requests");
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    }

    fn put(&mut self, position: Position, glyph: Glyph) -> io::Result<()> {
        let glyph = self.glyphs.glyph(glyph);
        self.screen
            .move_and_print(position.row, position.col, glyph.encode_utf8(&mut [0; 4]))
    }

    /// redraws what belongs under a cell once the ball or a paddle has left it.
    fn restore(&mut self, position: Position) -> io::Result<()> {
        if self.paddles.iter().any(|view| view.covers(position)) {
            self.put(position, Glyph::Paddle)
        } else {
            self.screen
                .move_and_print(position.row, position.col, BLANK.encode_utf8(&mut [0; 4]))
        }
    }
}
