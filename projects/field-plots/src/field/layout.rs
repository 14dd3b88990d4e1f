use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ConfigError, FieldError};

use super::row::{FieldRow, PlotSlot};
use super::spec::{FieldSpec, RowDirection, RowSpec};

/// The numbering layout of a whole field: its rows in physical order,
/// plus the direction those rows run in.
#[derive(Debug, Clone)]
pub struct FieldLayout {
    rows: Vec<FieldRow>,
    row_direction: RowDirection,
}

impl FieldLayout {
    /// Builds a layout from already-constructed rows.
    pub fn new(rows: Vec<FieldRow>, row_direction: RowDirection) -> Result<Self, FieldError> {
        if rows.is_empty() {
            return Err(ConfigError::EmptyRows.into());
        }
        Ok(Self {
            rows,
            row_direction,
        })
    }

    /// Resolves a parsed field spec into rows, in definition order.
    ///
    /// A `shift` may only reference rows defined before it; anything else
    /// fails with an unresolved-reference error.
    pub fn from_spec(spec: &FieldSpec) -> Result<Self, FieldError> {
        let mut rows: Vec<FieldRow> = Vec::with_capacity(spec.rows.len());
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        for (name, row_spec) in &spec.rows {
            let row = resolve_row(name, row_spec, &rows, &by_name)?;
            by_name.insert(name.as_str(), rows.len());
            rows.push(row);
        }

        let layout = Self::new(rows, spec.row_direction)?;
        tracing::debug!(
            "resolved field layout: {} rows, {} plots",
            layout.num_rows(),
            layout.num_plots()
        );
        Ok(layout)
    }

    /// Parses and resolves a raw field config document.
    pub fn from_value(value: &Value) -> Result<Self, FieldError> {
        let spec = FieldSpec::from_value(value)?;
        Self::from_spec(&spec)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_plots(&self) -> usize {
        self.rows.iter().map(FieldRow::len).sum()
    }

    pub fn row_direction(&self) -> RowDirection {
        self.row_direction
    }

    pub fn rows(&self) -> &[FieldRow] {
        &self.rows
    }

    /// Plot number at (row, position), or `None` for a gap position.
    pub fn plot_number_at(
        &self,
        row_index: usize,
        plot_index: usize,
    ) -> Result<PlotSlot, FieldError> {
        let row = self
            .rows
            .get(row_index)
            .ok_or(FieldError::IndexOutOfRange {
                index: row_index,
                len: self.rows.len(),
            })?;
        row.plot_number_at(plot_index)
    }

    /// Plot number at a flattened index, iterating rows in declared order
    /// and each row in its stored slot order.
    pub fn plot_number_at_row_major(&self, index: usize) -> Result<PlotSlot, FieldError> {
        let mut skipped = 0;
        for row in &self.rows {
            if index < skipped + row.len() {
                return row.plot_number_at(index - skipped);
            }
            skipped += row.len();
        }
        Err(FieldError::IndexOutOfRange {
            index,
            len: skipped,
        })
    }

    /// Renders the field as a text grid for eyeballing a config.
    ///
    /// Declared rows become rendered columns when the direction is
    /// north-to-south, so the grid reads like the field on a map with
    /// north at the top. Gap positions render as `-`. Meaningful only when
    /// all rows have the same length; shorter rows leave blank cells.
    pub fn render_grid(&self) -> String {
        let cell = |slot: PlotSlot| match slot {
            Some(num) => num.to_string(),
            None => "-".to_string(),
        };

        let lines: Vec<Vec<String>> = match self.row_direction {
            RowDirection::WestToEast => self
                .rows
                .iter()
                .map(|row| row.slots().iter().map(|&slot| cell(slot)).collect())
                .collect(),
            RowDirection::NorthToSouth => {
                let depth = self.rows.iter().map(FieldRow::len).max().unwrap_or(0);
                (0..depth)
                    .map(|pos| {
                        self.rows
                            .iter()
                            .map(|row| {
                                row.slots()
                                    .get(pos)
                                    .map(|&slot| cell(slot))
                                    .unwrap_or_default()
                            })
                            .collect()
                    })
                    .collect()
            }
        };

        let num_cols = lines.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; num_cols];
        for line in &lines {
            for (col, text) in line.iter().enumerate() {
                widths[col] = widths[col].max(text.len());
            }
        }

        let mut grid = String::new();
        for line in &lines {
            let padded: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(col, text)| format!("{:>width$}", text, width = widths[col]))
                .collect();
            grid.push_str(padded.join("  ").trim_end());
            grid.push('\n');
        }
        grid
    }
}

fn resolve_row(
    name: &str,
    spec: &RowSpec,
    built: &[FieldRow],
    by_name: &HashMap<&str, usize>,
) -> Result<FieldRow, FieldError> {
    match spec {
        RowSpec::Number(num) => Ok(FieldRow::from_number(name, *num)),
        RowSpec::Gap => Ok(FieldRow::gap(name)),
        RowSpec::Range {
            start,
            end,
            repeats,
        } => FieldRow::from_range(name, *start, *end, *repeats),
        RowSpec::Shift { row, amount } => {
            let source = by_name.get(row.as_str()).map(|&i| &built[i]).ok_or_else(|| {
                ConfigError::UnresolvedShiftReference {
                    row: name.to_string(),
                    reference: row.clone(),
                }
            })?;
            Ok(source.clone_shifted(*amount))
        }
        RowSpec::Composite(specs) => {
            let parts = specs
                .iter()
                .map(|sub| resolve_row(name, sub, built, by_name))
                .collect::<Result<Vec<_>, _>>()?;
            FieldRow::merge(parts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Six north-south rows of 100 plots each, numbered the way the
    // breeding program hands them out: arbitrary blocks per row, two of
    // them derived by shifting an earlier row.
    fn example_field() -> FieldLayout {
        let doc = json!({
            "rows": {
                "row_1": {"range": {"start": 1301, "end": 1400}},
                "row_2": {"range": {"start": 1401, "end": 1500}},
                "row_3": {"range": {"start": 1520, "end": 1619}},
                "row_4": {"shift": {"row": "row_3", "amount": 100}},
                "row_5": {"shift": {"row": "row_3", "amount": 112}},
                "row_6": {"range": {"start": 1670, "end": 1769}},
            }
        });
        FieldLayout::from_value(&doc).unwrap()
    }

    #[test]
    fn test_field_size() {
        let field = example_field();
        assert_eq!(field.num_rows(), 6);
        assert_eq!(field.num_plots(), 100 * 6);
    }

    #[test]
    fn test_plot_number_at() {
        let field = example_field();
        assert_eq!(field.plot_number_at(2, 6).unwrap(), Some(1526));
        assert_eq!(field.plot_number_at(4, 41).unwrap(), Some(1673));
        assert_eq!(field.plot_number_at(5, 72).unwrap(), Some(1742));
    }

    #[test]
    fn test_plot_number_at_row_major() {
        let field = example_field();
        assert_eq!(field.plot_number_at_row_major(206).unwrap(), Some(1526));
        assert_eq!(field.plot_number_at_row_major(441).unwrap(), Some(1673));
        assert_eq!(field.plot_number_at_row_major(572).unwrap(), Some(1742));
    }

    #[test]
    fn test_row_major_agrees_with_direct_lookup() {
        let field = example_field();
        let mut flat = 0;
        for row_index in 0..field.num_rows() {
            for plot_index in 0..field.rows()[row_index].len() {
                assert_eq!(
                    field.plot_number_at(row_index, plot_index).unwrap(),
                    field.plot_number_at_row_major(flat).unwrap(),
                );
                flat += 1;
            }
        }
        assert_eq!(flat, field.num_plots());
    }

    #[test]
    fn test_lookup_out_of_range() {
        let field = example_field();
        assert!(matches!(
            field.plot_number_at(6, 0),
            Err(FieldError::IndexOutOfRange { index: 6, len: 6 })
        ));
        assert!(matches!(
            field.plot_number_at(0, 100),
            Err(FieldError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            field.plot_number_at_row_major(600),
            Err(FieldError::IndexOutOfRange {
                index: 600,
                len: 600
            })
        ));
    }

    #[test]
    fn test_composite_row_resolution() {
        let doc = json!({
            "rows": {
                "border": {"range": {"start": 1, "end": 3}},
                "patched": [
                    {"range": {"start": 10, "end": 12}},
                    null,
                    {"shift": {"row": "border", "amount": 100}},
                    7,
                ],
            }
        });
        let field = FieldLayout::from_value(&doc).unwrap();
        assert_eq!(field.num_rows(), 2);

        let patched = &field.rows()[1];
        assert_eq!(
            patched.slots(),
            &[
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(101),
                Some(102),
                Some(103),
                Some(7)
            ]
        );
        // The merged row takes the first sub-definition's name.
        assert_eq!(patched.name(), "patched");
        assert_eq!(field.plot_number_at(1, 3).unwrap(), None);
    }

    #[test]
    fn test_shift_forward_reference_fails() {
        let doc = json!({
            "rows": {
                "early": {"shift": {"row": "late", "amount": 1}},
                "late": {"range": {"start": 1, "end": 10}},
            }
        });
        let err = FieldLayout::from_value(&doc).unwrap_err();
        assert!(matches!(
            err,
            FieldError::Config(ConfigError::UnresolvedShiftReference { .. })
        ));
    }

    #[test]
    fn test_render_grid_west_to_east() {
        let doc = json!({
            "rows": {
                "north": {"range": {"start": 101, "end": 104}},
                "south": {"range": {"start": 204, "end": 201}},
            },
            "row_direction": "west_to_east",
        });
        let field = FieldLayout::from_value(&doc).unwrap();
        let grid = field.render_grid();
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 2);

        for (row_index, line) in lines.iter().enumerate() {
            let numbers: Vec<i64> = line
                .split_whitespace()
                .map(|cell| cell.parse().unwrap())
                .collect();
            assert_eq!(numbers.len(), 4);
            for (plot_index, &num) in numbers.iter().enumerate() {
                assert_eq!(
                    field.plot_number_at(row_index, plot_index).unwrap(),
                    Some(num)
                );
            }
        }
    }

    #[test]
    fn test_render_grid_north_to_south_is_transposed() {
        let doc = json!({
            "rows": {
                "west": {"range": {"start": 1, "end": 3}},
                "middle": {"range": {"start": 13, "end": 11}},
                "east": {"range": {"start": 21, "end": 23}},
            }
        });
        let field = FieldLayout::from_value(&doc).unwrap();
        let grid = field.render_grid();
        let lines: Vec<&str> = grid.lines().collect();
        // Three declared rows render as three columns, one line per
        // in-row position.
        assert_eq!(lines.len(), 3);

        for (plot_index, line) in lines.iter().enumerate() {
            let numbers: Vec<i64> = line
                .split_whitespace()
                .map(|cell| cell.parse().unwrap())
                .collect();
            assert_eq!(numbers.len(), 3);
            for (row_index, &num) in numbers.iter().enumerate() {
                assert_eq!(
                    field.plot_number_at(row_index, plot_index).unwrap(),
                    Some(num)
                );
            }
        }
    }

    #[test]
    fn test_render_grid_marks_gaps() {
        let doc = json!({
            "rows": {
                "a": [1, null, 3],
            },
            "row_direction": "west_to_east",
        });
        let field = FieldLayout::from_value(&doc).unwrap();
        assert_eq!(field.render_grid(), "1  -  3\n");
    }
}
