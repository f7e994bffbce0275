//! Interval Partitioner
//!
//! Sweeps the sorted unique record boundaries and emits one interval per
//! consecutive pair, so no record boundary ever falls inside an interval.

use crate::types::{ConstructionRecord, Interval};

/// Partition the depth range spanned by `records`.
///
/// Fewer than two distinct depths yields no intervals.
pub fn partition<'a, I>(records: I) -> Vec<Interval>
where
    I: IntoIterator<Item = &'a ConstructionRecord>,
{
    let mut depths: Vec<f64> = records
        .into_iter()
        .flat_map(|r| [r.depth_from(), r.depth_to()])
        .collect();
    depths.sort_by(f64::total_cmp);
    depths.dedup();

    depths
        .windows(2)
        .map(|pair| Interval::new(pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_well_boundaries() {
        let records = [
            ConstructionRecord::drilled_hole(0.0, 12.0, 438.0, 0).unwrap(),
            ConstructionRecord::drilled_hole(186.0, 998.8, 222.0, 2).unwrap(),
            ConstructionRecord::drilled_hole(12.0, 186.0, 311.0, 1).unwrap(),
            ConstructionRecord::casing(0.0, 12.0, 326.0).unwrap(),
        ];
        assert_eq!(
            partition(&records),
            vec![
                Interval::new(0.0, 12.0),
                Interval::new(12.0, 186.0),
                Interval::new(186.0, 998.8),
            ]
        );
    }

    #[test]
    fn test_nested_record_splits_interval() {
        let records = [
            ConstructionRecord::drilled_hole(0.0, 100.0, 200.0, 0).unwrap(),
            ConstructionRecord::casing(20.0, 50.0, 150.0).unwrap(),
        ];
        assert_eq!(
            partition(&records),
            vec![
                Interval::new(0.0, 20.0),
                Interval::new(20.0, 50.0),
                Interval::new(50.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_no_records_no_intervals() {
        assert!(partition(&Vec::<ConstructionRecord>::new()).is_empty());
    }

    #[test]
    fn test_single_record_single_interval() {
        let records = [ConstructionRecord::casing(3.0, 9.0, 100.0).unwrap()];
        assert_eq!(partition(&records), vec![Interval::new(3.0, 9.0)]);
    }

    #[test]
    fn test_disjoint_records_leave_gap_interval() {
        let records = [
            ConstructionRecord::casing(0.0, 10.0, 100.0).unwrap(),
            ConstructionRecord::casing(20.0, 30.0, 100.0).unwrap(),
        ];
        let intervals = partition(&records);
        assert_eq!(intervals.len(), 3);
        assert_eq!(intervals[1], Interval::new(10.0, 20.0));
    }
}
