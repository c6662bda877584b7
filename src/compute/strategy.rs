//! Execution strategies for computing one generation.
//!
//! All strategies read the current population only and build the next one in
//! a freshly allocated buffer; the caller swaps it in once the step is done.

use std::ops::Range;
use std::sync::Mutex;
use std::thread;

use rayon::prelude::*;

use super::EngineError;
use super::cell::{Cell, Point};
use super::geometry::Geometry;
use super::merge::MergeStrategy;
use super::neighborhood::NeighborhoodStrategy;
use super::operators::{ChannelRotation, reproduce, select_parent_indices};
use super::partition::row_ranges;
use super::random::{RandomSource, SourceFactory};

/// Read-only view of a generation, able to breed offspring for any slot.
#[derive(Clone, Copy)]
pub struct Breeder<'a> {
    pub population: &'a [Cell],
    pub geometry: Geometry,
    pub neighborhood: &'a dyn NeighborhoodStrategy,
    pub merge: &'a dyn MergeStrategy,
}

impl<'a> Breeder<'a> {
    pub fn new(
        population: &'a [Cell],
        geometry: Geometry,
        neighborhood: &'a dyn NeighborhoodStrategy,
        merge: &'a dyn MergeStrategy,
    ) -> Self {
        Self {
            population,
            geometry,
            neighborhood,
            merge,
        }
    }

    /// Breed the offspring for slot `(row, col)`.
    ///
    /// `scratch` is reused for the neighborhood to avoid an allocation per slot.
    pub fn breed_slot<R: RandomSource>(
        &self,
        row: usize,
        col: usize,
        scratch: &mut Vec<Cell>,
        rng: &mut R,
    ) -> Result<Cell, EngineError> {
        self.neighborhood
            .gather(self.population, self.geometry, row, col, scratch);

        let (a, b) = select_parent_indices(scratch, rng)?;
        let parents = (&scratch[a], &scratch[b]);
        let rotation = ChannelRotation::try_from(rng.rotation())?;

        let mut offspring = reproduce(Point::at(row, col), parents, rotation);
        offspring.replace_at = self.merge.nominate(scratch, parents, rng);
        Ok(offspring)
    }

    /// Breed every slot of `rows`, row-major, from a single random stream.
    pub fn breed_rows<R: RandomSource>(
        &self,
        rows: Range<usize>,
        rng: &mut R,
    ) -> Result<Vec<Cell>, EngineError> {
        let cols = self.geometry.cols;
        let mut scratch = Vec::with_capacity(self.neighborhood.offsets().len());
        let mut bred = Vec::with_capacity(rows.len() * cols);

        for row in rows {
            for col in 0..cols {
                bred.push(self.breed_slot(row, col, &mut scratch, rng)?);
            }
        }
        Ok(bred)
    }

    fn commit(&self, bred: Vec<Cell>) -> Vec<Cell> {
        self.merge
            .merge(self.population.to_vec(), bred, self.geometry)
    }
}

/// Single control flow over the whole grid, using stream 0.
pub fn sequential<S: SourceFactory>(
    breeder: Breeder<'_>,
    sources: &S,
    generation: u64,
) -> Result<Vec<Cell>, EngineError> {
    let mut source = sources.stream(generation, 0);
    let bred = breeder.breed_rows(0..breeder.geometry.rows, &mut source)?;
    Ok(breeder.commit(bred))
}

/// Contiguous row shards bred on scoped worker threads.
///
/// Shard `k` draws from stream `k`. Shard outputs are concatenated in shard
/// order and merged once. Empty shards get no thread.
pub fn row_sharded<S: SourceFactory>(
    breeder: Breeder<'_>,
    sources: &S,
    generation: u64,
    threads: usize,
) -> Result<Vec<Cell>, EngineError> {
    if threads == 0 {
        return Err(EngineError::InvalidThreadCount);
    }
    let ranges = row_ranges(breeder.geometry.rows, threads);

    let shards: Vec<Vec<Cell>> = thread::scope(|scope| {
        let handles = ranges
            .into_iter()
            .enumerate()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(shard, rows)| {
                let mut source = sources.stream(generation, shard);
                thread::Builder::new()
                    .name(format!("shard-{shard}"))
                    .spawn_scoped(scope, move || breeder.breed_rows(rows, &mut source))
                    .map(|handle| (shard, handle))
                    .map_err(EngineError::WorkerSpawn)
            })
            .collect::<Result<Vec<_>, _>>()?;

        handles
            .into_iter()
            .map(|(shard, handle)| {
                handle
                    .join()
                    .map_err(|_| EngineError::WorkerPanicked { shard })?
            })
            .collect::<Result<Vec<_>, EngineError>>()
    })?;

    let bred: Vec<Cell> = shards.into_iter().flatten().collect();
    Ok(breeder.commit(bred))
}

/// Every slot scheduled independently on `pool`.
///
/// Slot `i` draws from stream `i`. Each offspring is written straight to its
/// commit destination in a copy of the current population; the write is the
/// critical section, since several slots may nominate the same destination.
pub fn data_parallel<S: SourceFactory>(
    breeder: Breeder<'_>,
    sources: &S,
    generation: u64,
    pool: &rayon::ThreadPool,
) -> Result<Vec<Cell>, EngineError> {
    let geometry = breeder.geometry;
    let next = Mutex::new(breeder.population.to_vec());

    pool.install(|| {
        (0..geometry.len()).into_par_iter().try_for_each_init(
            || Vec::with_capacity(breeder.neighborhood.offsets().len()),
            |scratch, index| {
                let slot = geometry.point(index);
                let mut source = sources.stream(generation, index);
                let offspring = breeder.breed_slot(slot.row(), slot.col(), scratch, &mut source)?;
                let destination = breeder.merge.destination(&offspring);

                let mut next = next.lock().map_err(|_| EngineError::PoisonedBuffer)?;
                next[geometry.index_of(destination)] = offspring.settled_at(destination);
                Ok::<(), EngineError>(())
            },
        )
    })?;

    next.into_inner().map_err(|_| EngineError::PoisonedBuffer)
}
