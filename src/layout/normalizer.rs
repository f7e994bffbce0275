//! Record Normalizer
//!
//! Turns raw input mappings into validated [`ConstructionRecord`]s and splits
//! them into the drilling and casing categories, preserving input order
//! within each category.

use std::collections::HashMap;
use tracing::debug;

use crate::error::SchematicError;
use crate::types::{
    Category, ConstructionKind, ConstructionRecord, RawRecord, RecordKind, SchemaType,
};

/// Records split by ranking category, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedRecords {
    /// Drilled holes and cement plugs
    pub drilling: Vec<ConstructionRecord>,
    /// Casing strings and cemented annuli
    pub casing: Vec<ConstructionRecord>,
}

impl CategorizedRecords {
    pub fn len(&self) -> usize {
        self.drilling.len() + self.casing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drilling.is_empty() && self.casing.is_empty()
    }
}

/// Validate raw records against the named schema and categorize them.
///
/// Fails with [`SchematicError::UnsupportedSchema`] before looking at any
/// record if `schema_type` is not recognised.
pub fn normalize(
    raw: &[RawRecord],
    schema_type: &str,
) -> Result<CategorizedRecords, SchematicError> {
    let schema: SchemaType = schema_type.parse()?;
    let records = raw
        .iter()
        .enumerate()
        .map(|(index, r)| to_record(r, index, schema))
        .collect::<Result<Vec<_>, _>>()?;
    check_drilling_orders(&records)?;
    Ok(categorize(records))
}

/// Drilled holes must carry distinct drilling orders. Plugs may share an
/// order with a hole. Indices in the error are positions in `records`.
pub fn check_drilling_orders(records: &[ConstructionRecord]) -> Result<(), SchematicError> {
    let mut seen: HashMap<i64, usize> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        if let ConstructionKind::DrilledHole { drilling_order, .. } = *record.kind() {
            if let Some(&first_index) = seen.get(&drilling_order) {
                return Err(SchematicError::DuplicateDrillingOrder {
                    index,
                    first_index,
                    drilling_order,
                });
            }
            seen.insert(drilling_order, index);
        }
    }
    Ok(())
}

/// Split already-validated records by category.
pub fn categorize(records: Vec<ConstructionRecord>) -> CategorizedRecords {
    let mut out = CategorizedRecords::default();
    for record in records {
        match record.kind().category() {
            Category::Drilling => out.drilling.push(record),
            Category::Casing => out.casing.push(record),
        }
    }
    debug!(
        drilling = out.drilling.len(),
        casing = out.casing.len(),
        "Categorized construction records"
    );
    out
}

/// Convert one raw mapping under the given schema.
///
/// Casing accepts `inner_diam` or `diam`; cemented annuli accept
/// `inner_annulus_diam` or `inner_diam`.
pub fn to_record(
    raw: &RawRecord,
    index: usize,
    schema: SchemaType,
) -> Result<ConstructionRecord, SchematicError> {
    let SchemaType::DrilledHoleCasing = schema;

    let kind: RecordKind = raw
        .kind
        .trim()
        .parse()
        .map_err(|kind| SchematicError::UnknownRecordKind { index, kind })?;
    let missing = |field: &'static str| SchematicError::MissingRequiredField { index, kind, field };

    let depth_from = raw.from.ok_or_else(|| missing("from"))?;
    let depth_to = raw.to.ok_or_else(|| missing("to"))?;

    let construction = match kind {
        RecordKind::DrilledHole => ConstructionKind::DrilledHole {
            diameter: raw.diam.ok_or_else(|| missing("diam"))?,
            drilling_order: raw.drilling_order.ok_or_else(|| missing("drilling_order"))?,
        },
        RecordKind::CementPlug => ConstructionKind::CementPlug {
            drilling_order: raw.drilling_order.ok_or_else(|| missing("drilling_order"))?,
        },
        RecordKind::Casing => ConstructionKind::Casing {
            inner_diameter: raw
                .inner_diam
                .or(raw.diam)
                .ok_or_else(|| missing("inner_diam"))?,
        },
        RecordKind::CementedAnnulus => ConstructionKind::CementedAnnulus {
            inner_diameter: raw
                .inner_annulus_diam
                .or(raw.inner_diam)
                .ok_or_else(|| missing("inner_annulus_diam"))?,
        },
    };

    let record = ConstructionRecord::new(construction, depth_from, depth_to)?;
    Ok(match &raw.label {
        Some(label) => record.with_label(label.clone()),
        None => record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str, from: f64, to: f64) -> RawRecord {
        RawRecord {
            kind: kind.to_string(),
            from: Some(from),
            to: Some(to),
            ..Default::default()
        }
    }

    #[test]
    fn test_unsupported_schema() {
        let err = normalize(&[], "single_diameter").unwrap_err();
        assert_eq!(
            err,
            SchematicError::UnsupportedSchema("single_diameter".to_string())
        );
    }

    #[test]
    fn test_categories_preserve_input_order() {
        let records = vec![
            RawRecord {
                diam: Some(222.0),
                drilling_order: Some(2),
                ..raw("drilled_hole", 186.0, 998.8)
            },
            RawRecord {
                inner_diam: Some(326.0),
                ..raw("casing", 0.0, 12.0)
            },
            RawRecord {
                drilling_order: Some(3),
                ..raw("cement_plug", 867.0, 998.8)
            },
            RawRecord {
                inner_annulus_diam: Some(326.0),
                ..raw("cemented_annulus", 0.0, 12.0)
            },
        ];
        let out = normalize(&records, "drilled_hole_casing").unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out.drilling[0].kind().tag(), RecordKind::DrilledHole);
        assert_eq!(out.drilling[1].kind().tag(), RecordKind::CementPlug);
        assert_eq!(out.casing[0].kind().tag(), RecordKind::Casing);
        assert_eq!(out.casing[1].kind().tag(), RecordKind::CementedAnnulus);
    }

    #[test]
    fn test_missing_hole_diameter() {
        let records = vec![RawRecord {
            drilling_order: Some(0),
            ..raw("drilled_hole", 0.0, 12.0)
        }];
        let err = normalize(&records, "drilled_hole_casing").unwrap_err();
        assert_eq!(
            err,
            SchematicError::MissingRequiredField {
                index: 0,
                kind: RecordKind::DrilledHole,
                field: "diam"
            }
        );
    }

    #[test]
    fn test_missing_plug_order() {
        let records = vec![raw("cement_plug", 867.0, 998.8)];
        let err = normalize(&records, "drilled_hole_casing").unwrap_err();
        assert!(matches!(
            err,
            SchematicError::MissingRequiredField {
                field: "drilling_order",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_depth() {
        let records = vec![RawRecord {
            to: None,
            inner_diam: Some(162.0),
            ..raw("casing", 0.0, 1.0)
        }];
        let err = normalize(&records, "drilled_hole_casing").unwrap_err();
        assert!(matches!(
            err,
            SchematicError::MissingRequiredField { field: "to", .. }
        ));
    }

    #[test]
    fn test_unknown_kind() {
        let err = normalize(&[raw("packer", 10.0, 11.0)], "drilled_hole_casing").unwrap_err();
        assert_eq!(
            err,
            SchematicError::UnknownRecordKind {
                index: 0,
                kind: "packer".to_string()
            }
        );
    }

    #[test]
    fn test_casing_falls_back_to_diam() {
        let records = vec![RawRecord {
            diam: Some(162.0),
            ..raw("casing", 0.0, 996.5)
        }];
        let out = normalize(&records, "drilled_hole_casing").unwrap();
        assert_eq!(out.casing[0].kind().diameter(), Some(162.0));
    }

    #[test]
    fn test_degenerate_raw_record() {
        let records = vec![RawRecord {
            inner_diam: Some(162.0),
            ..raw("casing", 50.0, 50.0)
        }];
        let err = normalize(&records, "drilled_hole_casing").unwrap_err();
        assert!(matches!(err, SchematicError::DegenerateRecord { .. }));
    }

    #[test]
    fn test_duplicate_hole_order_rejected() {
        let records = vec![
            RawRecord {
                diam: Some(311.0),
                drilling_order: Some(1),
                ..raw("drilled_hole", 0.0, 100.0)
            },
            RawRecord {
                drilling_order: Some(1),
                ..raw("cement_plug", 50.0, 100.0)
            },
            RawRecord {
                diam: Some(222.0),
                drilling_order: Some(1),
                ..raw("drilled_hole", 100.0, 200.0)
            },
        ];
        let err = normalize(&records, "drilled_hole_casing").unwrap_err();
        assert_eq!(
            err,
            SchematicError::DuplicateDrillingOrder {
                index: 2,
                first_index: 0,
                drilling_order: 1,
            }
        );
    }

    #[test]
    fn test_plug_may_share_hole_order() {
        let records = [
            ConstructionRecord::drilled_hole(0.0, 100.0, 311.0, 1).unwrap(),
            ConstructionRecord::cement_plug(50.0, 100.0, 1).unwrap(),
        ];
        assert!(check_drilling_orders(&records).is_ok());
    }

    #[test]
    fn test_label_is_carried() {
        let records = vec![RawRecord {
            inner_diam: Some(326.0),
            label: Some("conductor".to_string()),
            ..raw("casing", 0.0, 12.0)
        }];
        let out = normalize(&records, "drilled_hole_casing").unwrap();
        assert_eq!(out.casing[0].label(), Some("conductor"));
    }
}
