use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::data::histogram::DEFAULT_BINS;

/// Orders file opened when no path is given.
pub const DEFAULT_DATA_PATH: &str = "dashboard/data_project.csv";

/// Command-line arguments for rusty-orders
#[derive(Parser, Debug)]
#[command(version, about = "E-commerce order dashboard")]
pub struct Args {
    /// Orders file (.csv, .json or .parquet)
    #[arg(default_value = DEFAULT_DATA_PATH)]
    pub path: PathBuf,

    /// Number of bins in the distribution charts
    #[arg(long = "bins", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Print the report to stdout and exit instead of opening the window
    #[arg(long = "summary", action)]
    pub summary: bool,

    /// First purchase date of the window (YYYY-MM-DD); defaults to the earliest order
    #[arg(long = "start")]
    pub start: Option<NaiveDate>,

    /// Last purchase date of the window (YYYY-MM-DD); defaults to the latest order
    #[arg(long = "end")]
    pub end: Option<NaiveDate>,
}
