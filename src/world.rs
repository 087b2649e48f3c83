use std::collections::HashMap;

use metrohash::MetroBuildHasher;
use tracing::debug;

use crate::Pos;

pub use chunk::{Chunk, ChunkPos, ChunkVisual, LocalPos, CHUNK_SIZE};
mod chunk;

/// flat list of live positions, indexed so removal does not need a scan.
#[derive(Debug, Clone, Default)]
struct LiveCells {
    cells: Vec<Pos>,
    index: HashMap<Pos, usize, MetroBuildHasher>,
}

impl LiveCells {
    fn insert(&mut self, pos: Pos) -> bool {
        if self.index.contains_key(&pos) {
            return false;
        }
        self.index.insert(pos, self.cells.len());
        self.cells.push(pos);
        true
    }

    fn remove(&mut self, pos: Pos) -> bool {
        let Some(index) = self.index.remove(&pos) else {
            return false;
        };
        self.cells.swap_remove(index);
        if let Some(&moved) = self.cells.get(index) {
            self.index.insert(moved, index);
        }
        true
    }
}

/// Unbounded grid of cells, allocated lazily one chunk at a time.
///
/// Besides the chunks, the world keeps the list of every live cell so the
/// simulation only has to look around cells that can actually change.
#[derive(Debug, Clone, Default)]
pub struct World {
    chunks: HashMap<ChunkPos, Chunk, MetroBuildHasher>,
    live: LiveCells,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// gets the position of the chunk containing the passed position
    pub fn to_chunk_pos(pos: Pos) -> ChunkPos {
        ChunkPos(pos / CHUNK_SIZE as i64)
    }

    /// gets the position of a cell local to it's parent chunk.
    pub fn to_local_pos(pos: Pos) -> LocalPos {
        let rem = pos % CHUNK_SIZE as i64;
        LocalPos::new(rem.x as usize, rem.y as usize)
    }

    /// unallocated space is dead.
    pub fn get(&self, pos: Pos) -> bool {
        self.chunk_containing(pos)
            .map(|chunk| chunk.get(Self::to_local_pos(pos)))
            .unwrap_or(false)
    }

    /// Writes one cell, allocating its chunk if needed, and returns that chunk.
    ///
    /// With `refresh` unset the chunk visual is left stale; bulk writers are
    /// expected to call [`World::rebuild_chunk`] once per touched chunk afterward.
    pub fn set(&mut self, pos: Pos, alive: bool, refresh: bool) -> &Chunk {
        if alive {
            self.live.insert(pos);
        } else {
            self.live.remove(pos);
        }

        let local = Self::to_local_pos(pos);
        let chunk = self.get_or_create_chunk(Self::to_chunk_pos(pos));
        chunk.set(local, alive);
        if refresh {
            chunk.rebuild_visual();
        }
        chunk
    }

    /// flips a cell and refreshes its chunk, returns the new state.
    pub fn toggle(&mut self, pos: Pos) -> bool {
        let alive = !self.get(pos);
        self.set(pos, alive, true);
        alive
    }

    pub fn chunk(&self, chunk_pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&chunk_pos)
    }

    pub fn chunk_containing(&self, pos: Pos) -> Option<&Chunk> {
        self.chunk(Self::to_chunk_pos(pos))
    }

    pub fn get_or_create_chunk(&mut self, chunk_pos: ChunkPos) -> &mut Chunk {
        self.chunks.entry(chunk_pos).or_insert_with(|| {
            debug!(chunk = %chunk_pos.0, "allocating chunk");
            let mut chunk = Chunk::new(chunk_pos);
            chunk.rebuild_visual();
            chunk
        })
    }

    /// Adds a chunk that is not allocated yet and builds its visual.
    ///
    /// Cells already alive in the chunk join the live list. Returns false and
    /// drops `chunk` when its position is already taken.
    pub fn register_chunk(&mut self, mut chunk: Chunk) -> bool {
        let chunk_pos = chunk.pos();
        if self.chunks.contains_key(&chunk_pos) {
            debug!(chunk = %chunk_pos.0, "chunk already registered");
            return false;
        }

        let origin = chunk_pos.origin();
        for local in chunk.get_actives() {
            self.live.insert(origin + local.as_pos());
        }
        chunk.rebuild_visual();
        debug!(chunk = %chunk_pos.0, "registered chunk");
        self.chunks.insert(chunk_pos, chunk);
        true
    }

    /// returns false when no chunk lives at `chunk_pos`.
    pub fn rebuild_chunk(&mut self, chunk_pos: ChunkPos) -> bool {
        match self.chunks.get_mut(&chunk_pos) {
            Some(chunk) => {
                chunk.rebuild_visual();
                true
            }
            None => false,
        }
    }

    /// every live cell, without duplicates, in no particular order.
    pub fn live_cells(&self) -> &[Pos] {
        &self.live.cells
    }

    pub fn population(&self) -> usize {
        self.live.cells.len()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// kills every cell, chunks stay allocated.
    pub fn clear(&mut self) {
        self.live = LiveCells::default();
        for chunk in self.chunks.values_mut().filter(|chunk| !chunk.is_empty()) {
            chunk.clear();
            chunk.rebuild_visual();
        }
    }
}
