//! Structured query construction.
//!
//! Builds the `structuredQuery` body for a single filtered, optionally
//! ordered read of one collection.

use serde_json::{json, Value};

use firecal_core::error::{ExportError, ExportResult};

/// Firestore caps `IN` filters at this many values.
pub const MAX_SET_VALUES: usize = 10;

/// Supported filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Field equals a single value.
    Equals,
    /// Field matches any of up to [`MAX_SET_VALUES`] values.
    MemberOfSet,
}

impl FilterOp {
    fn as_firestore_op(self) -> &'static str {
        match self {
            Self::Equals => "EQUAL",
            Self::MemberOfSet => "IN",
        }
    }
}

/// A validated field filter.
#[derive(Debug, Clone)]
pub struct TypeFilter {
    field: String,
    op: FilterOp,
    values: Vec<String>,
}

impl TypeFilter {
    /// Validate the operator/value-count combination.
    pub fn new(field: impl Into<String>, op: FilterOp, values: Vec<String>) -> ExportResult<Self> {
        match op {
            FilterOp::Equals if values.len() != 1 => {
                return Err(ExportError::InvalidArgument(
                    "With --where-op equals you must pass exactly one value to --types."
                        .to_string(),
                ));
            }
            FilterOp::MemberOfSet if values.is_empty() => {
                return Err(ExportError::InvalidArgument(
                    "At least one --types value is required.".to_string(),
                ));
            }
            FilterOp::MemberOfSet if values.len() > MAX_SET_VALUES => {
                return Err(ExportError::InvalidArgument(format!(
                    "Firestore 'in' queries support up to {MAX_SET_VALUES} values. Please reduce --types."
                )));
            }
            _ => {}
        }

        Ok(Self {
            field: field.into(),
            op,
            values,
        })
    }

    fn filter_value(&self) -> Value {
        match self.op {
            FilterOp::Equals => json!({ "stringValue": self.values[0] }),
            FilterOp::MemberOfSet => json!({
                "arrayValue": {
                    "values": self
                        .values
                        .iter()
                        .map(|v| json!({ "stringValue": v }))
                        .collect::<Vec<_>>()
                }
            }),
        }
    }
}

/// Build the `runQuery` request body.
pub fn build_query(collection: &str, filter: &TypeFilter, order_by: Option<&str>) -> Value {
    let mut query = json!({
        "from": [{ "collectionId": collection }],
        "where": {
            "fieldFilter": {
                "field": { "fieldPath": filter.field },
                "op": filter.op.as_firestore_op(),
                "value": filter.filter_value(),
            }
        }
    });

    if let Some(field) = order_by {
        // Delegated to the store's native ordering; no client-side re-sort.
        query["orderBy"] = json!([{
            "field": { "fieldPath": field },
            "direction": "ASCENDING",
        }]);
    }

    json!({ "structuredQuery": query })
}
