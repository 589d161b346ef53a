pub use log::{info, warn};

pub use clap::{Args, Parser, Subcommand};

pub use crate::cell_table::CellTable;
pub use crate::plot_config::*;

pub use feature_util::common_io::*;

pub const PLOT_TITLE: &str = "3D PhatePlot";
