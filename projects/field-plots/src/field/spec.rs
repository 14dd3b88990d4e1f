// Declarative field specification.
//
// A field config document names each row and describes its plot numbers
// as a literal number, an arithmetic range, a shift of an earlier row, a
// concatenation of sub-definitions, or null for an unnumbered position.
// The document arrives pre-parsed as a `serde_json::Value`; this module
// turns it into typed definitions while keeping the author's row order,
// which the shift-reference rule depends on.

use std::str::FromStr;

use serde_json::Value;

use crate::error::ConfigError;

/// Physical orientation of the declared rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowDirection {
    /// Each declared row runs north to south; rows proceed west to east.
    #[default]
    NorthToSouth,
    /// Each declared row runs west to east; rows proceed north to south.
    WestToEast,
}

impl FromStr for RowDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north_to_south" => Ok(Self::NorthToSouth),
            "west_to_east" => Ok(Self::WestToEast),
            other => Err(ConfigError::UnknownRowDirection(other.to_string())),
        }
    }
}

/// A single row definition from the field spec.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSpec {
    /// A one-plot row with a literal number.
    Number(i64),
    /// An inclusive run of numbers, descending when `start > end`, each
    /// repeated `repeats` times.
    Range { start: i64, end: i64, repeats: i64 },
    /// A copy of an earlier row with every number offset by `amount`.
    Shift { row: String, amount: i64 },
    /// Several definitions concatenated into one row.
    Composite(Vec<RowSpec>),
    /// A position present in the field but never numbered.
    Gap,
}

impl RowSpec {
    /// Dispatches on the shape of one parsed row definition.
    pub fn from_value(row_name: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Number(num) => num.as_i64().map(RowSpec::Number).ok_or_else(|| {
                ConfigError::UnknownRowSpec {
                    row: row_name.to_string(),
                    detail: format!("{} is not an integer plot number", num),
                }
            }),
            Value::Null => Ok(RowSpec::Gap),
            Value::Array(items) => {
                let specs = items
                    .iter()
                    .map(|item| RowSpec::from_value(row_name, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RowSpec::Composite(specs))
            }
            Value::Object(map) => {
                if let Some(range) = map.get("range") {
                    Ok(RowSpec::Range {
                        start: require_int(row_name, range, "range.start")?,
                        end: require_int(row_name, range, "range.end")?,
                        repeats: optional_int(row_name, range, "range.repeats", 1)?,
                    })
                } else if let Some(shift) = map.get("shift") {
                    Ok(RowSpec::Shift {
                        row: require_str(row_name, shift, "shift.row")?,
                        amount: require_int(row_name, shift, "shift.amount")?,
                    })
                } else {
                    Err(ConfigError::UnknownRowSpec {
                        row: row_name.to_string(),
                        detail: "mapping has neither 'range' nor 'shift'".to_string(),
                    })
                }
            }
            other => Err(ConfigError::UnknownRowSpec {
                row: row_name.to_string(),
                detail: format!("unsupported value {}", other),
            }),
        }
    }
}

/// A fully parsed field specification: named row definitions in author
/// order, plus the field's row direction.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub rows: Vec<(String, RowSpec)>,
    pub row_direction: RowDirection,
}

impl FieldSpec {
    /// Parses the top level of a field config document.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let Some(Value::Object(rows_map)) = value.get("rows") else {
            return Err(ConfigError::MissingRows);
        };
        let mut rows = Vec::with_capacity(rows_map.len());
        for (name, spec) in rows_map {
            rows.push((name.clone(), RowSpec::from_value(name, spec)?));
        }
        if rows.is_empty() {
            return Err(ConfigError::EmptyRows);
        }

        let row_direction = match value.get("row_direction") {
            None => RowDirection::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(ConfigError::UnknownRowDirection(other.to_string()));
            }
        };

        Ok(Self {
            rows,
            row_direction,
        })
    }
}

fn require_int(row_name: &str, value: &Value, key: &str) -> Result<i64, ConfigError> {
    let field = key.rsplit('.').next().unwrap_or(key);
    value
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| ConfigError::UnknownRowSpec {
            row: row_name.to_string(),
            detail: format!("'{}' is missing or not an integer", key),
        })
}

fn optional_int(
    row_name: &str,
    value: &Value,
    key: &str,
    default: i64,
) -> Result<i64, ConfigError> {
    let field = key.rsplit('.').next().unwrap_or(key);
    match value.get(field) {
        None => Ok(default),
        Some(v) => v.as_i64().ok_or_else(|| ConfigError::UnknownRowSpec {
            row: row_name.to_string(),
            detail: format!("'{}' is not an integer", key),
        }),
    }
}

fn require_str(row_name: &str, value: &Value, key: &str) -> Result<String, ConfigError> {
    let field = key.rsplit('.').next().unwrap_or(key);
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ConfigError::UnknownRowSpec {
            row: row_name.to_string(),
            detail: format!("'{}' is missing or not a string", key),
        })
}
