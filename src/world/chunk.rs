use crate::{pos, Pos, Vec2};

/// side length of a chunk, in cells. rows are stored as `u64` masks so this is fixed.
pub const CHUNK_SIZE: usize = 64;

/// index of a chunk in chunk space: world positions floor-divided by `CHUNK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkPos(pub Pos);

impl ChunkPos {
    /// world position of the chunk's top-left cell.
    pub fn origin(self) -> Pos {
        self.0 * CHUNK_SIZE as i64
    }
}

/// position of a cell relative to its chunk origin.
///
/// Construction asserts both components are within `[0, CHUNK_SIZE)`, so holding
/// a `LocalPos` is proof the access is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    x: u8,
    y: u8,
}

impl LocalPos {
    pub fn new(x: usize, y: usize) -> Self {
        assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE,
            "local position ({x}, {y}) is outside of a {CHUNK_SIZE}x{CHUNK_SIZE} chunk"
        );
        Self {
            x: x as u8,
            y: y as u8,
        }
    }

    pub fn x(self) -> usize {
        self.x as usize
    }

    pub fn y(self) -> usize {
        self.y as usize
    }

    pub fn as_pos(self) -> Pos {
        pos!(self.x as i64, self.y as i64)
    }
}

/// drawable state of a chunk, owned by the chunk and read by whatever renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkVisual {
    cells: Vec<LocalPos>,
    revision: u64,
}

impl ChunkVisual {
    /// live cells at the time of the last rebuild, row by row.
    pub fn cells(&self) -> &[LocalPos] {
        &self.cells
    }

    /// bumped on every rebuild, lets a renderer skip chunks it already drew.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Debug, Clone)]
pub struct Chunk {
    pos: ChunkPos,
    rows: [u64; CHUNK_SIZE],
    visual: ChunkVisual,
}

impl Chunk {
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            rows: [0; CHUNK_SIZE],
            visual: ChunkVisual::default(),
        }
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    pub fn get(&self, local: LocalPos) -> bool {
        (self.rows[local.y()] >> local.x()) & 1 == 1
    }

    pub fn set(&mut self, local: LocalPos, alive: bool) {
        let row = &mut self.rows[local.y()];
        if alive {
            *row |= 1u64 << local.x();
        } else {
            *row &= !(1u64 << local.x());
        }
    }

    pub fn clear(&mut self) {
        self.rows = [0; CHUNK_SIZE];
    }

    pub fn population(&self) -> usize {
        self.rows.iter().map(|row| row.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    pub fn get_actives(&self) -> impl Iterator<Item = LocalPos> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, &row)| {
            (0..CHUNK_SIZE)
                .filter(move |x| (row >> x) & 1 == 1)
                .map(move |x| LocalPos::new(x, y))
        })
    }

    /// recomputes the drawable state from the cell rows.
    pub fn rebuild_visual(&mut self) {
        let cells = self.get_actives().collect();
        self.visual = ChunkVisual {
            cells,
            revision: self.visual.revision + 1,
        };
    }

    pub fn visual(&self) -> &ChunkVisual {
        &self.visual
    }

    /// pixel space origin of the chunk, where a renderer should place its visual.
    pub fn placement(&self, cell_pixel_size: f64) -> Vec2 {
        self.pos.origin().as_vec2() * cell_pixel_size
    }
}
