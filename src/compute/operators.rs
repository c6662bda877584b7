//! Genetic operators: roulette-wheel parent selection and channel-rotating crossover.

use super::EngineError;
use super::cell::{Cell, Point};
use super::random::RandomSource;

/// Which parent channel feeds which offspring channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRotation {
    /// R <- R, G <- G, B <- B.
    Identity,
    /// R <- B, G <- R, B <- G.
    Forward,
    /// R <- G, G <- B, B <- R.
    Backward,
}

impl TryFrom<u8> for ChannelRotation {
    type Error = EngineError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(ChannelRotation::Identity),
            1 => Ok(ChannelRotation::Forward),
            2 => Ok(ChannelRotation::Backward),
            other => Err(EngineError::InvalidRotation(other)),
        }
    }
}

/// Breed the offspring for slot `location`.
///
/// Each offspring channel is the larger of the two parents' values for the
/// source channel picked by `rotation`.
pub fn reproduce(location: Point, parents: (&Cell, &Cell), rotation: ChannelRotation) -> Cell {
    let (a, b) = parents;
    let r = a.r.max(b.r);
    let g = a.g.max(b.g);
    let bl = a.b.max(b.b);

    let rgb = match rotation {
        ChannelRotation::Identity => [r, g, bl],
        ChannelRotation::Forward => [bl, r, g],
        ChannelRotation::Backward => [g, bl, r],
    };
    Cell::with_color(location, rgb)
}

/// Pick two distinct neighborhood members, fitness-proportionately.
///
/// The second draw is repeated until it differs from the first. When no
/// candidate has positive fitness both parents are drawn uniformly; when only
/// the first parent has positive fitness the second is drawn uniformly from
/// the remaining candidates.
pub fn select_parent_indices<R>(
    neighborhood: &[Cell],
    rng: &mut R,
) -> Result<(usize, usize), EngineError>
where
    R: RandomSource + ?Sized,
{
    let len = neighborhood.len();
    if len < 2 {
        return Err(EngineError::NeighborhoodTooSmall(len));
    }

    let weights: Vec<f64> = neighborhood.iter().map(Cell::normalized_fitness).collect();

    let Some(first) = rng.weighted(&weights) else {
        log::trace!("zero-fitness neighborhood, selecting parents uniformly");
        let first = rng.uniform(len);
        return Ok((first, uniform_except(rng, len, first)));
    };

    let others_weighted = weights
        .iter()
        .enumerate()
        .any(|(i, &w)| i != first && w > 0.0);
    if !others_weighted {
        log::trace!("single weighted candidate, drawing second parent uniformly");
        return Ok((first, uniform_except(rng, len, first)));
    }

    let second = loop {
        match rng.weighted(&weights) {
            Some(candidate) if candidate != first => break candidate,
            Some(_) => continue,
            None => break uniform_except(rng, len, first),
        }
    };
    Ok((first, second))
}

/// Pick two distinct parents from `neighborhood`. See [`select_parent_indices`].
pub fn select_parents<'a, R>(
    neighborhood: &'a [Cell],
    rng: &mut R,
) -> Result<(&'a Cell, &'a Cell), EngineError>
where
    R: RandomSource + ?Sized,
{
    let (a, b) = select_parent_indices(neighborhood, rng)?;
    Ok((&neighborhood[a], &neighborhood[b]))
}

/// Least fit member of `neighborhood`; ties go to the earliest member.
pub fn least_fit(neighborhood: &[Cell]) -> Option<&Cell> {
    neighborhood.iter().min_by_key(|cell| cell.fitness())
}

fn uniform_except<R>(rng: &mut R, len: usize, excluded: usize) -> usize
where
    R: RandomSource + ?Sized,
{
    let pick = rng.uniform(len - 1);
    if pick >= excluded { pick + 1 } else { pick }
}
