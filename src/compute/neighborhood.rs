//! Neighborhood extraction for the supported topologies.
//!
//! Each topology is a fixed table of `(d_row, d_col)` offsets applied with
//! toroidal wrap, so extraction in the breeding loop is branch-free.

use crate::schema::Topology;

use super::cell::Cell;
use super::geometry::Geometry;

const L5_OFFSETS: [(isize, isize); 5] = [
    (0, 0),
    (0, -1), // left
    (-1, 0), // top
    (0, 1),  // right
    (1, 0),  // bottom
];

const L9_OFFSETS: [(isize, isize); 9] = [
    (0, 0),
    (0, -1),
    (0, -2),
    (-1, 0),
    (-2, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (2, 0),
];

const C9_OFFSETS: [(isize, isize); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const C13_OFFSETS: [(isize, isize); 13] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -2),
    (-2, 0),
    (0, 2),
    (2, 0),
];

/// Strategy for collecting the breeding candidates around a slot.
pub trait NeighborhoodStrategy: Send + Sync {
    fn topology(&self) -> Topology;

    /// Stable `(d_row, d_col)` offsets, origin included.
    fn offsets(&self) -> &'static [(isize, isize)];

    /// Fill `out` with the neighborhood of `(row, col)`, replacing its contents.
    fn gather(
        &self,
        population: &[Cell],
        geometry: Geometry,
        row: usize,
        col: usize,
        out: &mut Vec<Cell>,
    ) {
        out.clear();
        out.extend(
            self.offsets()
                .iter()
                .map(|&(d_row, d_col)| population[geometry.offset_index(row, col, d_row, d_col)]),
        );
    }
}

/// Axis-aligned cross, radius 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearFive;

/// Axis-aligned cross, radius 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearNine;

/// 3x3 block.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactNine;

/// 3x3 block plus the axis cells at distance 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactThirteen;

impl NeighborhoodStrategy for LinearFive {
    fn topology(&self) -> Topology {
        Topology::L5
    }

    fn offsets(&self) -> &'static [(isize, isize)] {
        &L5_OFFSETS
    }
}

impl NeighborhoodStrategy for LinearNine {
    fn topology(&self) -> Topology {
        Topology::L9
    }

    fn offsets(&self) -> &'static [(isize, isize)] {
        &L9_OFFSETS
    }
}

impl NeighborhoodStrategy for CompactNine {
    fn topology(&self) -> Topology {
        Topology::C9
    }

    fn offsets(&self) -> &'static [(isize, isize)] {
        &C9_OFFSETS
    }
}

impl NeighborhoodStrategy for CompactThirteen {
    fn topology(&self) -> Topology {
        Topology::C13
    }

    fn offsets(&self) -> &'static [(isize, isize)] {
        &C13_OFFSETS
    }
}

impl Topology {
    /// Resolve the extraction strategy for this topology.
    pub fn strategy(self) -> Box<dyn NeighborhoodStrategy> {
        match self {
            Topology::L5 => Box::new(LinearFive),
            Topology::L9 => Box::new(LinearNine),
            Topology::C9 => Box::new(CompactNine),
            Topology::C13 => Box::new(CompactThirteen),
        }
    }
}

/// Neighborhood of `(row, col)` under `topology`, as a fresh vector.
pub fn neighborhood(
    population: &[Cell],
    geometry: Geometry,
    row: usize,
    col: usize,
    topology: Topology,
) -> Vec<Cell> {
    let mut out = Vec::with_capacity(topology.size());
    topology
        .strategy()
        .gather(population, geometry, row, col, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::cell::Point;

    fn labelled_grid(geometry: Geometry) -> Vec<Cell> {
        (0..geometry.len())
            .map(|i| {
                let p = geometry.point(i);
                Cell::with_color(p, [p.y as u8, p.x as u8, 0])
            })
            .collect()
    }

    fn locations(cells: &[Cell]) -> Vec<(usize, usize)> {
        cells.iter().map(|c| (c.location.row(), c.location.col())).collect()
    }

    #[test]
    fn test_sizes_match_topology() {
        let geometry = Geometry::new(6, 7);
        let population = labelled_grid(geometry);
        for topology in Topology::ALL {
            for (row, col) in [(0, 0), (0, 6), (5, 0), (5, 6), (3, 3)] {
                let cells = neighborhood(&population, geometry, row, col, topology);
                assert_eq!(cells.len(), topology.size(), "{topology} at ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_l5_order_and_wrap_at_corner() {
        let geometry = Geometry::new(4, 5);
        let population = labelled_grid(geometry);
        let cells = neighborhood(&population, geometry, 0, 0, Topology::L5);
        assert_eq!(
            locations(&cells),
            vec![(0, 0), (0, 4), (3, 0), (0, 1), (1, 0)]
        );
    }

    #[test]
    fn test_l9_reaches_distance_two() {
        let geometry = Geometry::new(5, 5);
        let population = labelled_grid(geometry);
        let cells = neighborhood(&population, geometry, 4, 4, Topology::L9);
        assert_eq!(
            locations(&cells),
            vec![
                (4, 4),
                (4, 3),
                (4, 2),
                (3, 4),
                (2, 4),
                (4, 0),
                (4, 1),
                (0, 4),
                (1, 4)
            ]
        );
    }

    #[test]
    fn test_c9_is_row_major_block() {
        let geometry = Geometry::new(3, 3);
        let population = labelled_grid(geometry);
        let cells = neighborhood(&population, geometry, 1, 1, Topology::C9);
        let expected: Vec<(usize, usize)> =
            (0..3).flat_map(|r| (0..3).map(move |c| (r, c))).collect();
        assert_eq!(locations(&cells), expected);
    }

    #[test]
    fn test_c13_extends_c9() {
        let geometry = Geometry::new(8, 8);
        let population = labelled_grid(geometry);
        let c9 = neighborhood(&population, geometry, 0, 7, Topology::C9);
        let c13 = neighborhood(&population, geometry, 0, 7, Topology::C13);
        assert_eq!(&c13[..9], &c9[..]);
        assert_eq!(
            locations(&c13[9..]),
            vec![(0, 5), (6, 7), (0, 1), (2, 7)]
        );
    }

    #[test]
    fn test_single_cell_grid_repeats_origin() {
        let geometry = Geometry::new(1, 1);
        let population = vec![Cell::with_color(Point::new(0, 0), [9, 9, 9])];
        let cells = neighborhood(&population, geometry, 0, 0, Topology::C13);
        assert_eq!(cells.len(), 13);
        assert!(cells.iter().all(|c| c.location == Point::new(0, 0)));
    }

    #[test]
    fn test_strategy_reports_topology() {
        for topology in Topology::ALL {
            let strategy = topology.strategy();
            assert_eq!(strategy.topology(), topology);
            assert_eq!(strategy.offsets().len(), topology.size());
        }
    }
}
