//! Row-range partitioning for sharded execution.

use std::ops::Range;

/// Split `total_rows` into `workers` contiguous ranges, in order.
///
/// Every shard gets `total_rows / workers` rows and the last one also takes
/// the remainder. With more workers than rows the leading shards are empty.
pub fn row_ranges(total_rows: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let per_worker = total_rows / workers;
    (0..workers)
        .map(|worker| {
            let start = worker * per_worker;
            let end = if worker + 1 == workers {
                total_rows
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(row_ranges(12, 3), vec![0..4, 4..8, 8..12]);
    }

    #[test]
    fn test_last_shard_absorbs_remainder() {
        assert_eq!(row_ranges(10, 3), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_more_workers_than_rows() {
        assert_eq!(row_ranges(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
    }

    #[test]
    fn test_single_worker_takes_everything() {
        assert_eq!(row_ranges(7, 1), vec![0..7]);
    }

    #[test]
    fn test_no_workers() {
        assert!(row_ranges(7, 0).is_empty());
    }

    #[test]
    fn test_ranges_cover_all_rows_once() {
        for rows in 0..40 {
            for workers in 1..9 {
                let ranges = row_ranges(rows, workers);
                assert_eq!(ranges.len(), workers);
                let covered: Vec<usize> = ranges.into_iter().flatten().collect();
                assert_eq!(covered, (0..rows).collect::<Vec<_>>());
            }
        }
    }
}
