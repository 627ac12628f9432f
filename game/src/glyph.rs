pub const BLANK: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Paddle,
    Ball,
}

/// characters used to draw each kind of thing on the field. built once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphTable {
    wall: char,
    paddle: char,
    ball: char,
}

impl GlyphTable {
    pub fn new(wall: char, paddle: char, ball: char) -> Self {
        Self { wall, paddle, ball }
    }

    pub fn glyph(&self, glyph: Glyph) -> char {
        match glyph {
            Glyph::Wall => self.wall,
            Glyph::Paddle => self.paddle,
            Glyph::Ball => self.ball,
        }
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new('#', '+', 'O')
    }
}
