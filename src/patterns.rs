use crate::{pos, Pos, World};

/// A named set of live cells, relative to the pattern's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub cells: &'static [(i64, i64)],
}

impl Pattern {
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().map(|&(x, y)| pos!(x, y))
    }

    /// size of the bounding box, in cells.
    pub fn size(&self) -> Pos {
        self.cells()
            .fold(pos!(0, 0), |acc, p| pos!(acc.x.max(p.x + 1), acc.y.max(p.y + 1)))
    }

    /// Sets the pattern's cells alive with the top-left corner at `origin`.
    pub fn place_on(&self, world: &mut World, origin: Pos) {
        for cell in self.cells() {
            world.set(origin + cell, true, true);
        }
    }

    pub fn find(name: &str) -> Option<Pattern> {
        PRESETS
            .iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
            .copied()
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "block",
    description: "still life",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    description: "oscillator (period 2)",
    cells: &[(0, 1), (1, 1), (2, 1)],
};

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    description: "moves diagonally (period 4)",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "r-pentomino",
    description: "methuselah, stabilizes after 1103 generations",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

pub const LWSS: Pattern = Pattern {
    name: "lwss",
    description: "lightweight spaceship, moves horizontally (period 4)",
    cells: &[
        (1, 0),
        (4, 0),
        (0, 1),
        (0, 2),
        (4, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (3, 3),
    ],
};

pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "gosper-gun",
    description: "emits a glider every 30 generations",
    cells: &[
        (24, 0),
        (22, 1),
        (24, 1),
        (12, 2),
        (13, 2),
        (20, 2),
        (21, 2),
        (34, 2),
        (35, 2),
        (11, 3),
        (15, 3),
        (20, 3),
        (21, 3),
        (34, 3),
        (35, 3),
        (0, 4),
        (1, 4),
        (10, 4),
        (16, 4),
        (20, 4),
        (21, 4),
        (0, 5),
        (1, 5),
        (10, 5),
        (14, 5),
        (16, 5),
        (17, 5),
        (22, 5),
        (24, 5),
        (10, 6),
        (16, 6),
        (24, 6),
        (11, 7),
        (15, 7),
        (12, 8),
        (13, 8),
    ],
};

pub const PRESETS: &[Pattern] = &[BLOCK, BLINKER, GLIDER, R_PENTOMINO, LWSS, GOSPER_GLIDER_GUN];
