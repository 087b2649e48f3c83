use std::io::{self, Write};

use sparselife::Vec2;

pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// whole terminal but the last line, which is kept for the status bar.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, (height as usize).saturating_sub(1)))
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            lines: vec![vec![' '; width]; height],
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f64, self.height as f64)
    }

    pub fn put(&mut self, x: usize, y: usize, char: char) {
        if let Some(slot) = self.lines.get_mut(y).and_then(|line| line.get_mut(x)) {
            *slot = char;
        }
    }

    /// fills every character touched by the square, at least one.
    pub fn fill_square(&mut self, top_left: Vec2, side: f64, char: char) {
        let start = top_left.floor();
        let end = (top_left + Vec2::new(side, side)).ceil();
        let clamp = |n: i64, max: usize| n.clamp(0, max as i64) as usize;

        let (x0, x1) = (clamp(start.x, self.width), clamp(end.x.max(start.x + 1), self.width));
        let (y0, y1) = (clamp(start.y, self.height), clamp(end.y.max(start.y + 1), self.height));
        for line in &mut self.lines[y0..y1] {
            line[x0..x1].fill(char);
        }
    }

    pub fn display(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        write!(out, "{}", termion::clear::All)?;
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            let line: String = line.iter().collect();
            write!(out, "{goto}{line}")?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        let status: String = status.chars().take(self.width).collect();
        write!(out, "{goto}{status}")?;
        out.flush()
    }
}
