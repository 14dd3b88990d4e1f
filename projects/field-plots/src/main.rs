mod cli;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geo::Centroid;

use cli::Args;
use field_plots::artifacts;
use field_plots::field::FieldLayout;
use field_plots::labeling::{label_plots, LabeledPlot};

fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse_args();

    let config = artifacts::load_field_config(&args.config)?;
    let layout = FieldLayout::from_value(&config)
        .with_context(|| format!("building field layout from {}", args.config.display()))?;
    tracing::info!(
        "field layout: {} rows, {} plots",
        layout.num_rows(),
        layout.num_plots()
    );

    if args.grid {
        print!("{}", layout.render_grid());
    }

    if let Some(boundaries_path) = &args.boundaries {
        let boundaries = artifacts::load_plot_boundaries(boundaries_path)?;
        let labeled = label_plots(boundaries.to_polygons(), &layout)
            .context("labeling plot boundaries")?;
        tracing::info!("labeled {} plots", labeled.len());
        write_labeled_csv(&labeled, args.output.as_deref())?;
    }

    Ok(())
}

/// Writes labeled plots as `plot,centroid_x,centroid_y` rows.
fn write_labeled_csv(labeled: &[LabeledPlot], output: Option<&Path>) -> Result<()> {
    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["plot", "centroid_x", "centroid_y"])?;
    for plot in labeled {
        let center = plot
            .boundary
            .centroid()
            .context("labeled boundary has no centroid")?;
        writer.write_record([
            plot.plot_number.to_string(),
            center.x().to_string(),
            center.y().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
