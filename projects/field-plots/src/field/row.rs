use crate::error::FieldError;

/// One physical position in a row: a numbered plot, or a gap that exists
/// in the field but carries no plot number.
pub type PlotSlot = Option<i64>;

/// A single row of plots in the field.
///
/// Slot order is significant: it is the physical first-to-last order of
/// the plots within the row.
#[derive(Debug, Clone)]
pub struct FieldRow {
    name: String,
    plots: Vec<PlotSlot>,
}

impl FieldRow {
    /// Creates a row with a single plot number.
    pub fn from_number(name: impl Into<String>, plot_num: i64) -> Self {
        Self {
            name: name.into(),
            plots: vec![Some(plot_num)],
        }
    }

    /// Creates a single-position row with no plot number.
    pub fn gap(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plots: vec![None],
        }
    }

    /// Creates a row from an inclusive range of plot numbers.
    ///
    /// `start > end` counts backwards. Each number appears `repeats` times
    /// as a contiguous block, e.g. start=1, end=3, repeats=2 gives
    /// [1, 1, 2, 2, 3, 3].
    pub fn from_range(
        name: impl Into<String>,
        start: i64,
        end: i64,
        repeats: i64,
    ) -> Result<Self, FieldError> {
        if repeats < 1 {
            return Err(FieldError::InvalidRange { repeats });
        }
        let span = (start - end).unsigned_abs() as usize + 1;
        let mut plots = Vec::with_capacity(span * repeats as usize);
        if start <= end {
            for num in start..=end {
                plots.extend(std::iter::repeat(Some(num)).take(repeats as usize));
            }
        } else {
            for num in (end..=start).rev() {
                plots.extend(std::iter::repeat(Some(num)).take(repeats as usize));
            }
        }
        Ok(Self {
            name: name.into(),
            plots,
        })
    }

    /// Returns a copy of this row with every plot number offset by
    /// `amount`. Gap positions stay gaps.
    pub fn clone_shifted(&self, amount: i64) -> Self {
        Self {
            name: self.name.clone(),
            plots: self
                .plots
                .iter()
                .map(|slot| slot.map(|num| num + amount))
                .collect(),
        }
    }

    /// Concatenates rows end-to-end into one row.
    ///
    /// The merged row takes the first row's name.
    pub fn merge(rows: Vec<FieldRow>) -> Result<Self, FieldError> {
        let mut iter = rows.into_iter();
        let mut merged = iter.next().ok_or(FieldError::EmptyMerge)?;
        for row in iter {
            merged.plots.extend(row.plots);
        }
        Ok(merged)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn slots(&self) -> &[PlotSlot] {
        &self.plots
    }

    /// Plot number at `plot_index`, or `None` for a gap position.
    pub fn plot_number_at(&self, plot_index: usize) -> Result<PlotSlot, FieldError> {
        self.plots
            .get(plot_index)
            .copied()
            .ok_or(FieldError::IndexOutOfRange {
                index: plot_index,
                len: self.plots.len(),
            })
    }
}
