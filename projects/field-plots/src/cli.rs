use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Field configuration JSON file
    #[arg(long, env = "FIELD_PLOTS_CONFIG")]
    pub config: PathBuf,

    /// Surveyed plot boundaries JSON file
    #[arg(long, env = "FIELD_PLOTS_BOUNDARIES")]
    pub boundaries: Option<PathBuf>,

    /// Print the field as a text grid
    #[arg(long)]
    pub grid: bool,

    /// Write labeled plots to this CSV file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
