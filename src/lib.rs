//! Conway's game of life on an unbounded grid.
//!
//! The grid is split into fixed-size chunks allocated on first write. Each
//! generation only looks at live cells and their neighbors.

pub use utils::{Pos, Vec2};
mod utils;

pub use world::{Chunk, ChunkPos, ChunkVisual, LocalPos, World, CHUNK_SIZE};
pub mod world;

pub use dedup::dedup_in_place;
pub mod dedup;

pub use rules::{RuleParseError, Rules};
pub mod rules;

pub use game::{Game, StepReport};
pub mod game;

pub use transform::{ChunkRange, ViewTransform};
pub mod transform;

pub use patterns::Pattern;
pub mod patterns;

pub use config::{Config, ConfigError};
pub mod config;
