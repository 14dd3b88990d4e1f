// Geometric plot labeling.
//
// Matches surveyed plot boundary polygons to the plot numbers of a field
// layout purely from spatial position: sort centroids along the axis the
// rows advance in, cut the sorted run into fixed-size rows, then order
// each row along the plot axis. Rows are cut by plot count, not by a
// coordinate threshold, so rows may curve or skew as long as each one
// holds exactly `num_plots / num_rows` plots.

use geo::Centroid;
use geo_types::{Point, Polygon};

use crate::error::FieldError;
use crate::field::{FieldLayout, RowDirection};

/// A plot boundary paired with its resolved plot number.
#[derive(Debug, Clone)]
pub struct LabeledPlot {
    pub boundary: Polygon<f64>,
    pub plot_number: i64,
}

/// Assigns plot numbers to surveyed plot boundaries.
///
/// The boundaries may arrive in any order; output pairs come back in the
/// order the boundaries were passed in. Boundaries that land on a gap
/// position are dropped from the output.
pub fn label_plots(
    boundaries: Vec<Polygon<f64>>,
    layout: &FieldLayout,
) -> Result<Vec<LabeledPlot>, FieldError> {
    let num_plots = layout.num_plots();
    let num_rows = layout.num_rows();
    if num_plots % num_rows != 0 {
        return Err(FieldError::RowCountMismatch {
            num_plots,
            num_rows,
        });
    }
    if boundaries.len() != num_plots {
        return Err(FieldError::BoundaryCountMismatch {
            boundaries: boundaries.len(),
            num_plots,
        });
    }
    let plots_per_row = num_plots / num_rows;
    tracing::debug!(
        "labeling {} boundaries as {} rows of {} plots",
        boundaries.len(),
        num_rows,
        plots_per_row
    );

    // Each centroid keeps the index of the boundary it came from, so the
    // result can be handed back in input order after both sorts.
    let mut centers: Vec<(usize, Point<f64>)> = Vec::with_capacity(boundaries.len());
    for (index, boundary) in boundaries.iter().enumerate() {
        let center = boundary
            .centroid()
            .ok_or(FieldError::DegenerateBoundary { index })?;
        centers.push((index, center));
    }

    // Row bucketing: order along the axis the rows advance in, then cut
    // into runs of one row's worth of plots.
    let direction = layout.row_direction();
    match direction {
        RowDirection::NorthToSouth => {
            centers.sort_by(|a, b| a.1.x().total_cmp(&b.1.x()));
        }
        RowDirection::WestToEast => {
            centers.sort_by(|a, b| b.1.y().total_cmp(&a.1.y()));
        }
    }

    // Within-row ordering along the plot axis, matching the slot order of
    // the declared rows.
    for band in centers.chunks_mut(plots_per_row) {
        match direction {
            RowDirection::NorthToSouth => {
                band.sort_by(|a, b| b.1.y().total_cmp(&a.1.y()));
            }
            RowDirection::WestToEast => {
                band.sort_by(|a, b| a.1.x().total_cmp(&b.1.x()));
            }
        }
    }

    // The banded order is exactly the layout's row-major order.
    let mut numbers: Vec<Option<i64>> = vec![None; boundaries.len()];
    for (row_major, &(index, _)) in centers.iter().enumerate() {
        numbers[index] = layout.plot_number_at_row_major(row_major)?;
    }

    Ok(boundaries
        .into_iter()
        .zip(numbers)
        .filter_map(|(boundary, number)| {
            number.map(|plot_number| LabeledPlot {
                boundary,
                plot_number,
            })
        })
        .collect())
}
