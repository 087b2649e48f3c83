use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use metrohash::MetroBuildHasher;
use tracing::{info, trace, warn};

use crate::{dedup::dedup_in_place, pos, Chunk, ChunkPos, Config, Pos, Rules, World};

/// interval between generations at speed x1.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// offsets of the Moore neighborhood.
const NEIGHBORS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(0, -1),
    pos!(1, -1),
    pos!(-1, 0),
    pos!(1, 0),
    pos!(-1, 1),
    pos!(0, 1),
    pos!(1, 1),
];

pub fn get_neighbors(pos: Pos) -> impl Iterator<Item = Pos> {
    NEIGHBORS.into_iter().map(move |offset| pos + offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Update {
    pos: Pos,
    alive: bool,
}

/// what a single generation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub candidates: usize,
    pub births: usize,
    pub deaths: usize,
    pub refreshed_chunks: usize,
}

/// The simulation: owns the world and the rules, and advances generations
/// when ticked by its host.
#[derive(Debug)]
pub struct Game {
    world: World,
    rules: Rules,
    tick_interval: Duration,
    running: bool,
    last_tick: Instant,
    generation: u64,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a stopped game with the configured rules and interval.
    ///
    /// The four chunks around the origin are allocated upfront.
    pub fn with_config(config: &Config) -> Self {
        let mut world = World::new();
        for chunk_pos in [pos!(0, 0), pos!(1, 0), pos!(1, 1), pos!(0, 1)] {
            world.register_chunk(Chunk::new(ChunkPos(chunk_pos)));
        }
        Self {
            world,
            rules: config.rules.clone(),
            tick_interval: config.tick_interval,
            running: false,
            last_tick: Instant::now(),
            generation: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// changes apply from the next generation on.
    pub fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }

    pub fn set_rules(&mut self, rules: Rules) {
        info!(%rules, "rules changed");
        self.rules = rules;
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, tick_interval: Duration) {
        self.tick_interval = tick_interval;
    }

    /// Sets the interval to `DEFAULT_TICK_INTERVAL / multiplier`.
    ///
    /// Returns false and keeps the current interval when the multiplier is
    /// not positive or the interval would not fit a `Duration`.
    pub fn set_speed(&mut self, multiplier: f64) -> bool {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            warn!(multiplier, "ignoring invalid speed multiplier");
            return false;
        }
        match Duration::try_from_secs_f64(DEFAULT_TICK_INTERVAL.as_secs_f64() / multiplier) {
            Ok(interval) => {
                self.tick_interval = interval;
                true
            }
            Err(error) => {
                warn!(multiplier, %error, "speed multiplier out of range");
                false
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self) {
        info!(generation = self.generation, "simulation started");
        self.running = true;
    }

    pub fn stop(&mut self) {
        info!(generation = self.generation, "simulation stopped");
        self.running = false;
    }

    /// returns whether the game is now running.
    pub fn toggle_running(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// per-frame entry point for the host scheduler.
    pub fn tick(&mut self) -> Option<StepReport> {
        self.tick_at(Instant::now())
    }

    /// Runs one generation if running and at least `tick_interval` elapsed
    /// since the last one, otherwise does nothing.
    pub fn tick_at(&mut self, now: Instant) -> Option<StepReport> {
        if !self.running {
            return None;
        }
        if now.saturating_duration_since(self.last_tick) < self.tick_interval {
            return None;
        }
        self.last_tick = now;
        Some(self.step())
    }

    /// Advances exactly one generation, whether running or not.
    pub fn step(&mut self) -> StepReport {
        let candidates = self.possible_change_pos();
        let updates = self.plan(&candidates);

        let births = updates.iter().filter(|update| update.alive).count();
        let refreshed_chunks = self.apply(&updates);
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            candidates: candidates.len(),
            births,
            deaths: updates.len() - births,
            refreshed_chunks,
        };
        trace!(?report, population = self.world.population(), "generation");
        report
    }

    /// live cells and their neighbors, each once. anything else cannot change.
    fn possible_change_pos(&self) -> Vec<Pos> {
        let live = self.world.live_cells();
        let mut candidates = Vec::with_capacity(live.len() * (NEIGHBORS.len() + 1));
        for &pos in live {
            candidates.push(pos);
            candidates.extend(get_neighbors(pos));
        }
        dedup_in_place(&mut candidates);
        candidates
    }

    pub fn get_neighbor_count(&self, pos: Pos) -> u8 {
        get_neighbors(pos)
            .filter(|&neighbor| self.world.get(neighbor))
            .count() as u8
    }

    /// decides every transition against the current state, without writing.
    fn plan(&self, candidates: &[Pos]) -> Vec<Update> {
        candidates
            .iter()
            .filter_map(|&pos| {
                let alive = self.world.get(pos);
                let next = self.rules.next_state(alive, self.get_neighbor_count(pos));
                (next != alive).then_some(Update { pos, alive: next })
            })
            .collect()
    }

    /// writes the updates, then refreshes each touched chunk once.
    fn apply(&mut self, updates: &[Update]) -> usize {
        let mut touched: HashSet<ChunkPos, MetroBuildHasher> = HashSet::default();
        for update in updates {
            self.world.set(update.pos, update.alive, false);
            touched.insert(World::to_chunk_pos(update.pos));
        }
        for &chunk_pos in &touched {
            self.world.rebuild_chunk(chunk_pos);
        }
        touched.len()
    }
}
