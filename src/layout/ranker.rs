//! Diameter Ranker
//!
//! Annotates every record with its rank by diameter within its category.
//! Ranks drive draw order only; records keep their input order.
//!
//! Sort-key policy: the key is `Option<f64>`. `None` (cement plugs, which have
//! no diameter) sorts after every `Some`, so plugs always rank outermost in
//! the drilling category. Ties keep input order (stable sort).

use std::cmp::Ordering;

use super::CategorizedRecords;
use crate::types::{ConstructionRecord, RankedRecord};

/// Both categories after ranking, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedRecords {
    pub drilling: Vec<RankedRecord>,
    pub casing: Vec<RankedRecord>,
}

impl RankedRecords {
    /// Every record, drilling category first.
    pub fn iter(&self) -> impl Iterator<Item = &RankedRecord> {
        self.drilling.iter().chain(self.casing.iter())
    }
}

/// Rank both categories independently.
pub fn rank(records: CategorizedRecords) -> RankedRecords {
    RankedRecords {
        drilling: rank_category(records.drilling),
        casing: rank_category(records.casing),
    }
}

/// Rank one category: `diameter_rank` is the record's position when the
/// category is stable-sorted ascending by diameter.
pub fn rank_category(records: Vec<ConstructionRecord>) -> Vec<RankedRecord> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        compare_sort_keys(records[a].kind().diameter(), records[b].kind().diameter())
    });

    let mut ranks = vec![0; records.len()];
    for (rank, &index) in order.iter().enumerate() {
        ranks[index] = rank;
    }

    records
        .into_iter()
        .zip(ranks)
        .enumerate()
        .map(|(category_index, (record, diameter_rank))| RankedRecord {
            record,
            category_index,
            diameter_rank,
        })
        .collect()
}

/// Ascending by diameter, missing diameters last.
pub fn compare_sort_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::categorize;

    fn hole(from: f64, to: f64, diameter: f64, order: i64) -> ConstructionRecord {
        ConstructionRecord::drilled_hole(from, to, diameter, order).unwrap()
    }

    #[test]
    fn test_plug_ranks_last_in_drilling() {
        let ranked = rank_category(vec![
            hole(0.0, 12.0, 438.0, 0),
            ConstructionRecord::cement_plug(867.0, 998.8, 3).unwrap(),
            hole(186.0, 998.8, 222.0, 2),
            hole(12.0, 186.0, 311.0, 1),
            hole(867.0, 1100.0, 149.0, 4),
        ]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.diameter_rank).collect();
        assert_eq!(ranks, vec![3, 4, 1, 2, 0]);
        let indices: Vec<usize> = ranked.iter().map(|r| r.category_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_category(vec![
            ConstructionRecord::casing(0.0, 12.0, 326.0).unwrap(),
            ConstructionRecord::cemented_annulus(0.0, 12.0, 326.0).unwrap(),
            ConstructionRecord::casing(0.0, 996.5, 162.0).unwrap(),
        ]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.diameter_rank).collect();
        assert_eq!(ranks, vec![1, 2, 0]);
    }

    #[test]
    fn test_multiple_plugs_rank_by_input_order() {
        let ranked = rank_category(vec![
            ConstructionRecord::cement_plug(100.0, 150.0, 5).unwrap(),
            hole(0.0, 200.0, 200.0, 0),
            ConstructionRecord::cement_plug(10.0, 20.0, 1).unwrap(),
        ]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.diameter_rank).collect();
        assert_eq!(ranks, vec![1, 0, 2]);
    }

    #[test]
    fn test_categories_ranked_independently() {
        let ranked = rank(categorize(vec![
            hole(0.0, 10.0, 100.0, 0),
            ConstructionRecord::casing(0.0, 10.0, 50.0).unwrap(),
            hole(10.0, 20.0, 80.0, 1),
        ]));
        assert_eq!(ranked.drilling[0].diameter_rank, 1);
        assert_eq!(ranked.drilling[1].diameter_rank, 0);
        assert_eq!(ranked.casing[0].diameter_rank, 0);
        assert_eq!(ranked.iter().count(), 3);
    }

    #[test]
    fn test_empty_category() {
        assert!(rank_category(Vec::new()).is_empty());
    }
}
