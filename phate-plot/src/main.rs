mod cell_table;
mod colorscale;
mod figure;
mod html;
mod plot_clustering;
mod plot_common;
mod plot_config;
mod plot_group;
mod run_plots;

use crate::plot_common::*;
use crate::run_plots::*;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "PHATE-PLOT",
    long_about = "Interactive 3D plots of PHATE coordinates of single cells\n\
		  colored by imaging features (e.g., intensity ratios),\n\
		  one trace per experimental group."
)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Plot all the configured features and the clustering feature",
        long_about = "Plot the configured features on the PHATE embedding:\n\
		      (1) {feature}.html for each feature, colored within\n\
		          mean ± 3σ of the feature\n\
		      (2) {clustering_feature}_clustering.html, 2-means\n\
		          clusters of the clustering feature in each group.\n\
		      Existing figures are skipped unless --overwrite.\n"
    )]
    Run(RunArgs),

    /// Plot one feature with a colorbar per group
    Group(SinglePlotArgs),

    /// Plot 2-means clusters of one feature in each group
    Cluster(SinglePlotArgs),

    /// Write the configuration in JSON
    DumpConfig(DumpConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = match &cli.commands {
        Commands::Run(args) => args.verbose(),
        Commands::Group(args) | Commands::Cluster(args) => args.verbose(),
        Commands::DumpConfig(_) => false,
    };

    if verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match &cli.commands {
        Commands::Run(args) => {
            run_plots(args)?;
        }
        Commands::Group(args) => {
            run_plot_group(args)?;
        }
        Commands::Cluster(args) => {
            run_plot_clustering(args)?;
        }
        Commands::DumpConfig(args) => {
            run_dump_config(args)?;
        }
    }

    info!("Done");
    Ok(())
}
