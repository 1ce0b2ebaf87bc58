//! Business rules for analytic role and aggregation.
//!
//! Runs after kind inference on every entry, whatever stage named it, and
//! has the final say over role and aggregation.

use fieldmap_model::{Aggregation, DataKind, FieldRole, KeywordSets, find_keyword};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub role: FieldRole,
    pub aggregation: Aggregation,
    pub notes: Vec<String>,
}

/// Derives role and aggregation from the kind and the source name.
///
/// - numbers are measures, everything else a dimension;
/// - a rating keyword (score, grade, coefficient) forces a dimension;
/// - measures sum by default and average on a ratio keyword. A ratio keyword
///   beats a currency keyword (`费用率` is averaged), so currency names
///   always end up summed.
pub fn assign(name: &str, kind: DataKind, keywords: &KeywordSets) -> RoleAssignment {
    let mut notes = Vec::new();
    let mut role = if kind == DataKind::Number {
        FieldRole::Measure
    } else {
        FieldRole::Dimension
    };

    if let Some(keyword) = find_keyword(name, &keywords.rating) {
        if role == FieldRole::Measure {
            notes.push(format!(
                "rating keyword '{keyword}': treated as a dimension, not summed"
            ));
        }
        role = FieldRole::Dimension;
    }

    let aggregation = match role {
        FieldRole::Dimension => Aggregation::None,
        FieldRole::Measure => {
            if let Some(keyword) = find_keyword(name, &keywords.ratio) {
                notes.push(format!("ratio keyword '{keyword}': averaged instead of summed"));
                Aggregation::Avg
            } else {
                Aggregation::Sum
            }
        }
    };

    RoleAssignment {
        role,
        aggregation,
        notes,
    }
}
