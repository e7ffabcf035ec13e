//! Opt-in column-family projection validation.
//!
//! Disabled by default because schema metadata is not always trustworthy for
//! sparse binary tables; callers that do trust it enable the check through
//! [`PlanOptions::validate_projection`](crate::group_scan::PlanOptions).

use crate::error::{PlanError, Result};
use crate::metadata::TableSchema;
use crate::scan::{Projection, ROW_KEY_COLUMN};

/// Checks every projected column's family against the table schema.
///
/// The family is the segment before the first `.` (or the whole name for a
/// bare family reference). The reserved row-key column always passes.
pub fn validate_projection(
    table: &str,
    schema: &TableSchema,
    projection: &Projection,
) -> Result<()> {
    let Projection::Columns(columns) = projection else {
        return Ok(());
    };

    for column in columns {
        let family = column.split('.').next().unwrap_or(column.as_str());
        if family == ROW_KEY_COLUMN {
            continue;
        }
        if !schema.column_families.iter().any(|known| known == family) {
            return Err(PlanError::UnsupportedProjection {
                table: table.to_string(),
                column: column.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema {
            column_families: vec!["cf1".to_string(), "cf2".to_string()],
        }
    }

    #[test]
    fn all_columns_sentinel_passes() {
        validate_projection("orders", &schema(), &Projection::All).unwrap();
    }

    #[test]
    fn known_families_and_row_key_pass() {
        let projection = Projection::Columns(vec![
            ROW_KEY_COLUMN.to_string(),
            "cf1.qualifier".to_string(),
            "cf2".to_string(),
        ]);
        validate_projection("orders", &schema(), &projection).unwrap();
    }

    #[test]
    fn unknown_family_is_rejected() {
        let projection = Projection::Columns(vec!["cf9.qualifier".to_string()]);
        let err = validate_projection("orders", &schema(), &projection).unwrap_err();
        assert!(matches!(
            err,
            PlanError::UnsupportedProjection { column, .. } if column == "cf9.qualifier"
        ));
    }
}
