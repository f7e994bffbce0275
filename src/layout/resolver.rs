//! Interval Resolver
//!
//! For every partitioned interval, selects the active records of each
//! category and computes the radial geometry drawn inside it:
//!
//! - drilled hole walls, plus a neck-down where a hole bottoms out at the
//!   interval's lower bound and drilling continued with a narrower bit
//! - casing walls at their inner diameter
//! - cemented annuli between a casing and the next casing or hole wall out
//! - cement plugs between the innermost enclosing wall and any hole drilled
//!   through the plug later
//!
//! The resolver never guesses a diameter. Geometry that cannot be determined
//! from the records is reported as an error.

use tracing::{debug, warn};

use super::RankedRecords;
use crate::error::SchematicError;
use crate::types::{
    AnnulusRegion, CasingSpan, ConstructionKind, HoleSpan, Interval, LayoutWarning, Necking,
    PlugRegion, RankedRecord, ResolvedInterval,
};

/// Resolved geometry for every interval plus non-fatal findings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub intervals: Vec<ResolvedInterval>,
    pub warnings: Vec<LayoutWarning>,
}

/// Records of one category active in `interval`, ordered by diameter rank.
///
/// This is the single overlap query used for both categories.
pub fn active_in(records: &[RankedRecord], interval: Interval) -> Vec<&RankedRecord> {
    let mut active: Vec<&RankedRecord> = records
        .iter()
        .filter(|r| r.record.overlaps(interval))
        .collect();
    active.sort_by_key(|r| r.diameter_rank);
    active
}

/// Largest hole diameter among drilling records drilled after `drilling_order`.
///
/// Scans every drilling record, not just the active ones: the next bit may
/// start below the current interval. Plugs carry no diameter and are skipped.
pub fn next_diameter(drilling: &[RankedRecord], drilling_order: i64) -> Option<f64> {
    drilling
        .iter()
        .filter_map(|r| match *r.kind() {
            ConstructionKind::DrilledHole {
                diameter,
                drilling_order: order,
            } if order > drilling_order => Some(diameter),
            _ => None,
        })
        .reduce(f64::max)
}

/// Resolve every interval in ascending depth order.
pub fn resolve(
    ranked: &RankedRecords,
    intervals: &[Interval],
) -> Result<Resolution, SchematicError> {
    let mut resolution = Resolution::default();
    for &interval in intervals {
        let resolved = resolve_interval(ranked, interval)?;
        if resolved.plugs.len() > 1 {
            let warning = LayoutWarning::OverlappingPlugs {
                interval,
                drilling_orders: resolved.plugs.iter().map(|p| p.drilling_order).collect(),
            };
            warn!("{}", warning);
            resolution.warnings.push(warning);
        }
        resolution.intervals.push(resolved);
    }
    Ok(resolution)
}

/// Resolve the geometry of a single interval.
pub fn resolve_interval(
    ranked: &RankedRecords,
    interval: Interval,
) -> Result<ResolvedInterval, SchematicError> {
    let drilling = active_in(&ranked.drilling, interval);
    let casing = active_in(&ranked.casing, interval);

    let holes: Vec<HoleSpan> = drilling
        .iter()
        .filter_map(|r| match *r.kind() {
            ConstructionKind::DrilledHole {
                diameter,
                drilling_order,
            } => Some(HoleSpan {
                diameter,
                drilling_order,
                diameter_rank: r.diameter_rank,
                necking: if interval.ends_at(r.record.depth_to()) {
                    next_diameter(&ranked.drilling, drilling_order).map(|to_diameter| Necking {
                        depth: interval.depth_to,
                        from_diameter: diameter,
                        to_diameter,
                    })
                } else {
                    None
                },
                label: r.record.label().map(str::to_string),
            }),
            _ => None,
        })
        .collect();

    let casings: Vec<CasingSpan> = casing
        .iter()
        .filter_map(|r| match *r.kind() {
            ConstructionKind::Casing { inner_diameter } => Some(CasingSpan {
                inner_diameter,
                diameter_rank: r.diameter_rank,
                label: r.record.label().map(str::to_string),
            }),
            _ => None,
        })
        .collect();

    let annuli = casing
        .iter()
        .filter_map(|r| match *r.kind() {
            ConstructionKind::CementedAnnulus { inner_diameter } => {
                Some(resolve_annulus(inner_diameter, &holes, &casings, interval))
            }
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    let plugs = drilling
        .iter()
        .filter_map(|r| match *r.kind() {
            ConstructionKind::CementPlug { drilling_order } => {
                Some(resolve_plug(drilling_order, &holes, &casings, interval))
            }
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        interval = %interval,
        holes = holes.len(),
        casings = casings.len(),
        annuli = annuli.len(),
        plugs = plugs.len(),
        "Resolved interval"
    );

    Ok(ResolvedInterval {
        interval,
        holes,
        casings,
        annuli,
        plugs,
    })
}

/// Plug annulus for the plug set with `drilling_order`.
///
/// Outer bound: the tightest wall the plug was set inside, i.e. the smallest
/// active casing bore or active hole drilled no later than the plug. Inner
/// bound: the widest active hole drilled through the plug afterwards, or 0
/// for a solid plug.
pub fn resolve_plug(
    drilling_order: i64,
    holes: &[HoleSpan],
    casings: &[CasingSpan],
    interval: Interval,
) -> Result<PlugRegion, SchematicError> {
    let unresolved = |reason: String| SchematicError::UnresolvedPlugGeometry {
        drilling_order,
        depth_from: interval.depth_from,
        depth_to: interval.depth_to,
        reason,
    };

    let casing_min = casings.iter().map(|c| c.inner_diameter).reduce(f64::min);
    let earlier_hole_min = holes
        .iter()
        .filter(|h| h.drilling_order <= drilling_order)
        .map(|h| h.diameter)
        .reduce(f64::min);

    let outer_diameter = match (casing_min, earlier_hole_min) {
        (Some(c), Some(h)) => c.min(h),
        (Some(d), None) | (None, Some(d)) => d,
        (None, None) => {
            return Err(unresolved(
                "no enclosing casing or earlier drilled hole".to_string(),
            ))
        }
    };

    let inner_diameter = holes
        .iter()
        .filter(|h| h.drilling_order > drilling_order)
        .map(|h| h.diameter)
        .reduce(f64::max)
        .unwrap_or(0.0);

    if inner_diameter >= outer_diameter {
        return Err(unresolved(format!(
            "later hole diameter {inner_diameter} does not fit inside enclosing diameter {outer_diameter}"
        )));
    }

    Ok(PlugRegion {
        drilling_order,
        outer_diameter,
        inner_diameter,
    })
}

/// Cemented annulus from `inner_diameter` out to the nearest wall outside it:
/// the next casing string or, failing that, the hole wall. Cement never
/// crosses an active casing.
pub fn resolve_annulus(
    inner_diameter: f64,
    holes: &[HoleSpan],
    casings: &[CasingSpan],
    interval: Interval,
) -> Result<AnnulusRegion, SchematicError> {
    let hole_walls = holes.iter().map(|h| h.diameter);
    let casing_walls = casings.iter().map(|c| c.inner_diameter);
    hole_walls
        .chain(casing_walls)
        .filter(|&d| d > inner_diameter)
        .reduce(f64::min)
        .map(|outer_diameter| AnnulusRegion {
            inner_diameter,
            outer_diameter,
        })
        .ok_or(SchematicError::UnresolvedAnnulusGeometry {
            inner_diameter,
            depth_from: interval.depth_from,
            depth_to: interval.depth_to,
        })
}

/// Every casing must sit inside the widest hole active alongside it.
pub fn check_containment(resolved: &ResolvedInterval) -> Result<(), SchematicError> {
    let widest_hole = resolved.holes.iter().map(|h| h.diameter).reduce(f64::max);
    for casing in &resolved.casings {
        let fits = widest_hole.is_some_and(|w| casing.inner_diameter <= w);
        if !fits {
            return Err(SchematicError::ContainmentViolation {
                casing_diameter: casing.inner_diameter,
                widest_hole,
                depth_from: resolved.interval.depth_from,
                depth_to: resolved.interval.depth_to,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{categorize, partition, rank};
    use crate::types::ConstructionRecord;

    fn prepare(records: Vec<ConstructionRecord>) -> (RankedRecords, Vec<Interval>) {
        let intervals = partition(&records);
        (rank(categorize(records)), intervals)
    }

    fn hole(from: f64, to: f64, diameter: f64, order: i64) -> ConstructionRecord {
        ConstructionRecord::drilled_hole(from, to, diameter, order).unwrap()
    }

    #[test]
    fn test_active_in_excludes_touching_records() {
        let (ranked, _) = prepare(vec![
            hole(0.0, 12.0, 438.0, 0),
            hole(12.0, 186.0, 311.0, 1),
        ]);
        let active = active_in(&ranked.drilling, Interval::new(12.0, 186.0));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind().diameter(), Some(311.0));
    }

    #[test]
    fn test_active_in_sorted_by_rank() {
        let (ranked, _) = prepare(vec![
            hole(0.0, 100.0, 300.0, 0),
            hole(0.0, 100.0, 200.0, 1),
            hole(0.0, 100.0, 250.0, 2),
        ]);
        let active = active_in(&ranked.drilling, Interval::new(0.0, 100.0));
        let diameters: Vec<Option<f64>> = active.iter().map(|r| r.kind().diameter()).collect();
        assert_eq!(diameters, vec![Some(200.0), Some(250.0), Some(300.0)]);
    }

    #[test]
    fn test_next_diameter_skips_plugs_and_earlier_holes() {
        let (ranked, _) = prepare(vec![
            hole(0.0, 12.0, 438.0, 0),
            hole(12.0, 186.0, 311.0, 1),
            ConstructionRecord::cement_plug(100.0, 186.0, 2).unwrap(),
            hole(186.0, 998.8, 222.0, 3),
        ]);
        assert_eq!(next_diameter(&ranked.drilling, 0), Some(311.0));
        assert_eq!(next_diameter(&ranked.drilling, 1), Some(222.0));
        assert_eq!(next_diameter(&ranked.drilling, 3), None);
    }

    #[test]
    fn test_necking_only_at_hole_bottom() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 100.0, 300.0, 0),
            ConstructionRecord::casing(0.0, 50.0, 250.0).unwrap(),
            hole(100.0, 200.0, 200.0, 1),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        assert_eq!(resolution.intervals.len(), 3);
        assert_eq!(resolution.intervals[0].holes[0].necking, None);
        assert_eq!(
            resolution.intervals[1].holes[0].necking,
            Some(Necking {
                depth: 100.0,
                from_diameter: 300.0,
                to_diameter: 200.0
            })
        );
        // Terminal hole: nothing drilled later, no transition
        assert_eq!(resolution.intervals[2].holes[0].necking, None);
    }

    #[test]
    fn test_solid_plug_below_last_hole() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 100.0, 200.0, 0),
            ConstructionRecord::cement_plug(80.0, 100.0, 1).unwrap(),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        let plug = resolution.intervals[1].plugs[0];
        assert!((plug.outer_diameter - 200.0).abs() < f64::EPSILON);
        assert!(plug.inner_diameter.abs() < f64::EPSILON);
    }

    #[test]
    fn test_plug_outer_uses_casing_when_tighter() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 100.0, 222.0, 0),
            ConstructionRecord::casing(0.0, 100.0, 162.0).unwrap(),
            ConstructionRecord::cement_plug(50.0, 100.0, 1).unwrap(),
            hole(50.0, 150.0, 149.0, 2),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        let plug = resolution.intervals[1].plugs[0];
        assert!((plug.outer_diameter - 162.0).abs() < f64::EPSILON);
        assert!((plug.inner_diameter - 149.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plug_without_enclosure_is_error() {
        let (ranked, intervals) = prepare(vec![
            ConstructionRecord::cement_plug(0.0, 10.0, 0).unwrap(),
            hole(0.0, 10.0, 100.0, 1),
        ]);
        let err = resolve(&ranked, &intervals).unwrap_err();
        assert!(matches!(
            err,
            SchematicError::UnresolvedPlugGeometry {
                drilling_order: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_plug_with_oversized_later_hole_is_error() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 10.0, 100.0, 0),
            ConstructionRecord::cement_plug(0.0, 10.0, 1).unwrap(),
            hole(0.0, 10.0, 120.0, 2),
        ]);
        assert!(matches!(
            resolve(&ranked, &intervals),
            Err(SchematicError::UnresolvedPlugGeometry { .. })
        ));
    }

    #[test]
    fn test_overlapping_plugs_warn_and_resolve_independently() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 100.0, 300.0, 0),
            ConstructionRecord::cement_plug(0.0, 100.0, 1).unwrap(),
            hole(0.0, 100.0, 200.0, 2),
            ConstructionRecord::cement_plug(0.0, 100.0, 3).unwrap(),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        let plugs = &resolution.intervals[0].plugs;
        assert_eq!(plugs.len(), 2);
        // First plug: set in the 300 hole, drilled through by the 200 hole
        assert!((plugs[0].outer_diameter - 300.0).abs() < f64::EPSILON);
        assert!((plugs[0].inner_diameter - 200.0).abs() < f64::EPSILON);
        // Second plug: set in the 200 hole, solid
        assert!((plugs[1].outer_diameter - 200.0).abs() < f64::EPSILON);
        assert!(plugs[1].inner_diameter.abs() < f64::EPSILON);
        assert_eq!(
            resolution.warnings,
            vec![LayoutWarning::OverlappingPlugs {
                interval: Interval::new(0.0, 100.0),
                drilling_orders: vec![1, 3],
            }]
        );
    }

    #[test]
    fn test_annulus_fills_to_nearest_hole_wall() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 100.0, 438.0, 0),
            hole(0.0, 100.0, 311.0, 1),
            ConstructionRecord::casing(0.0, 100.0, 227.0).unwrap(),
            ConstructionRecord::cemented_annulus(0.0, 100.0, 227.0).unwrap(),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        assert_eq!(
            resolution.intervals[0].annuli,
            vec![AnnulusRegion {
                inner_diameter: 227.0,
                outer_diameter: 311.0
            }]
        );
    }

    #[test]
    fn test_annulus_stops_at_next_casing_string() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 200.0, 311.0, 0),
            ConstructionRecord::casing(0.0, 200.0, 227.0).unwrap(),
            ConstructionRecord::casing(0.0, 200.0, 162.0).unwrap(),
            ConstructionRecord::cemented_annulus(0.0, 200.0, 162.0).unwrap(),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        assert_eq!(
            resolution.intervals[0].annuli,
            vec![AnnulusRegion {
                inner_diameter: 162.0,
                outer_diameter: 227.0
            }]
        );
    }

    #[test]
    fn test_annulus_without_hole_is_error() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 10.0, 100.0, 0),
            ConstructionRecord::cemented_annulus(0.0, 20.0, 90.0).unwrap(),
        ]);
        assert!(matches!(
            resolve(&ranked, &intervals),
            Err(SchematicError::UnresolvedAnnulusGeometry { depth_from, .. })
                if (depth_from - 10.0).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn test_containment_flags_oversized_casing() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 10.0, 100.0, 0),
            ConstructionRecord::casing(0.0, 10.0, 120.0).unwrap(),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        let err = check_containment(&resolution.intervals[0]).unwrap_err();
        assert_eq!(
            err,
            SchematicError::ContainmentViolation {
                casing_diameter: 120.0,
                widest_hole: Some(100.0),
                depth_from: 0.0,
                depth_to: 10.0,
            }
        );
    }

    #[test]
    fn test_containment_flags_casing_without_hole() {
        let (ranked, intervals) = prepare(vec![
            hole(0.0, 10.0, 100.0, 0),
            ConstructionRecord::casing(0.0, 20.0, 80.0).unwrap(),
        ]);
        let resolution = resolve(&ranked, &intervals).unwrap();
        assert!(check_containment(&resolution.intervals[0]).is_ok());
        assert!(matches!(
            check_containment(&resolution.intervals[1]),
            Err(SchematicError::ContainmentViolation {
                widest_hole: None,
                ..
            })
        ));
    }
}
