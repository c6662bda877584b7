//! Population replacement policies.
//!
//! A merge strategy does two things: it nominates a commit destination for
//! each offspring while the generation is being bred, and it folds the bred
//! population into the current one once breeding is done.

use crate::schema::MergePolicy;

use super::cell::{Cell, Point};
use super::geometry::Geometry;
use super::operators::least_fit;
use super::random::RandomSource;

/// Strategy for writing bred offspring back into the population.
pub trait MergeStrategy: Send + Sync {
    fn policy(&self) -> MergePolicy;

    /// Destination nominated for an offspring bred from `neighborhood` and
    /// `parents`. `None` means the offspring's own breeding slot.
    fn nominate(
        &self,
        neighborhood: &[Cell],
        parents: (&Cell, &Cell),
        rng: &mut dyn RandomSource,
    ) -> Option<Point>;

    /// Slot an offspring is committed to.
    #[inline]
    fn destination(&self, offspring: &Cell) -> Point {
        offspring.replace_at.unwrap_or(offspring.location)
    }

    /// Fold `bred` (row-major, one offspring per slot) into `current`.
    ///
    /// Offspring are committed in index order, so when several nominate the
    /// same destination the last one wins.
    fn merge(&self, mut current: Vec<Cell>, bred: Vec<Cell>, geometry: Geometry) -> Vec<Cell> {
        for offspring in bred {
            let destination = self.destination(&offspring);
            current[geometry.index_of(destination)] = offspring.settled_at(destination);
        }
        current
    }
}

/// Offspring population replaces the current one wholesale.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceAll;

/// Offspring overwrites the least fit member of its breeding neighborhood.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceWorstInNeighborhood;

/// Offspring overwrites one of its two parents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceOneParent;

impl MergeStrategy for ReplaceAll {
    fn policy(&self) -> MergePolicy {
        MergePolicy::ReplaceAll
    }

    fn nominate(&self, _: &[Cell], _: (&Cell, &Cell), _: &mut dyn RandomSource) -> Option<Point> {
        None
    }

    fn merge(&self, _current: Vec<Cell>, bred: Vec<Cell>, _geometry: Geometry) -> Vec<Cell> {
        bred
    }
}

impl MergeStrategy for ReplaceWorstInNeighborhood {
    fn policy(&self) -> MergePolicy {
        MergePolicy::ReplaceWorstInNeighborhood
    }

    fn nominate(
        &self,
        neighborhood: &[Cell],
        _parents: (&Cell, &Cell),
        _rng: &mut dyn RandomSource,
    ) -> Option<Point> {
        least_fit(neighborhood).map(|worst| worst.location)
    }
}

impl MergeStrategy for ReplaceOneParent {
    fn policy(&self) -> MergePolicy {
        MergePolicy::ReplaceOneParent
    }

    fn nominate(
        &self,
        _neighborhood: &[Cell],
        (first, second): (&Cell, &Cell),
        rng: &mut dyn RandomSource,
    ) -> Option<Point> {
        let parent = if rng.coin() { first } else { second };
        Some(parent.location)
    }
}

impl MergePolicy {
    /// Resolve the merge strategy for this policy.
    pub fn strategy(self) -> Box<dyn MergeStrategy> {
        match self {
            MergePolicy::ReplaceAll => Box::new(ReplaceAll),
            MergePolicy::ReplaceWorstInNeighborhood => Box::new(ReplaceWorstInNeighborhood),
            MergePolicy::ReplaceOneParent => Box::new(ReplaceOneParent),
        }
    }
}
