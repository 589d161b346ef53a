use crate::plot_clustering::*;
use crate::plot_common::*;
use crate::plot_group::*;

use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(
        long,
        short = 'c',
        help = "Configuration file (JSON)",
        long_help = "Configuration file in JSON format.\n\
		     Keys not listed in the file take default values.\n\
		     See `phate-plot dump-config` for all the keys."
    )]
    config: Option<Box<str>>,

    #[arg(
        long,
        help = "Main directory",
        long_help = "Main directory overriding `home_dir` of the configuration.\n\
		     Reads {home_dir}/output/phate_representation.csv and\n\
		     writes {home_dir}/output/figure/{out_folder}/*.html"
    )]
    home_dir: Option<Box<str>>,

    #[arg(long, help = "Output folder name under {home_dir}/output/figure")]
    out_folder: Option<Box<str>>,

    #[arg(long, default_value_t = false, help = "Regenerate existing figures")]
    overwrite: bool,

    #[arg(long, short, help = "Verbosity")]
    verbose: bool,
}

impl RunArgs {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    fn plot_config(&self) -> anyhow::Result<PlotConfig> {
        let mut config = PlotConfig::load(self.config.as_deref())?;
        if let Some(home_dir) = &self.home_dir {
            config.home_dir = home_dir.clone();
        }
        if let Some(out_folder) = &self.out_folder {
            config.out_folder_name = out_folder.clone();
        }
        Ok(config)
    }
}

/// Files written and skipped by one run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

fn path_str(path: &std::path::Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or(anyhow::anyhow!("non UTF-8 path: {}", path.display()))
}

///
/// Plot every configured feature on the PHATE embedding, one file per
/// feature, then the 2-means clustering of `clustering_feature`.
/// Existing figures are kept unless `overwrite` is set.
///
/// * `config` - plot configuration
/// * `overwrite` - regenerate existing files
///
pub fn plot_group_umap_on_selected_features(
    config: &PlotConfig,
    overwrite: bool,
) -> anyhow::Result<RunSummary> {
    config.validate()?;

    let phate_path = config.phate_path();
    let table = CellTable::read_csv(path_str(&phate_path)?, &config.required_features())?;
    info!(
        "read {} cells from {}",
        table.num_rows(),
        phate_path.display()
    );

    std::fs::create_dir_all(config.figure_dir())?;

    let mut summary = RunSummary::default();

    for feature in config.feature_names.iter() {
        let save_path = config.group_plot_path(feature);
        let save_file = path_str(&save_path)?;

        if !overwrite && file_exists(save_file) {
            info!("skip existing {}", save_file);
            summary.skipped.push(save_path);
            continue;
        }

        plot_group(&table, feature, config, save_file)?;
        summary.written.push(save_path);
    }

    let feature: &str = &config.clustering_feature;
    let save_path = config.clustering_plot_path(feature);
    let save_file = path_str(&save_path)?;

    if !overwrite && file_exists(save_file) {
        info!("skip existing {}", save_file);
        summary.skipped.push(save_path);
    } else {
        plot_clustering(&table, feature, config, save_file)?;
        summary.written.push(save_path);
    }

    Ok(summary)
}

pub fn run_plots(args: &RunArgs) -> anyhow::Result<()> {
    let config = args.plot_config()?;
    let summary = plot_group_umap_on_selected_features(&config, args.overwrite)?;
    info!(
        "{} figure(s) written, {} skipped",
        summary.written.len(),
        summary.skipped.len()
    );
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct SinglePlotArgs {
    #[arg(long, short = 'c', help = "Configuration file (JSON)")]
    config: Option<Box<str>>,

    #[arg(
        long,
        short = 'i',
        help = "PHATE coordinates file",
        long_help = "Merged PHATE coordinates (.csv or .csv.gz).\n\
		     Defaults to {home_dir}/{phate_file} of the configuration."
    )]
    input: Option<Box<str>>,

    #[arg(long, short = 'f', required = true, help = "Feature column")]
    feature: Box<str>,

    #[arg(long, short = 'o', required = true, help = "Output .html file")]
    out: Box<str>,

    #[arg(long, short, help = "Verbosity")]
    verbose: bool,
}

impl SinglePlotArgs {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    fn read_input(&self) -> anyhow::Result<(PlotConfig, CellTable)> {
        let config = PlotConfig::load(self.config.as_deref())?;
        let input = match &self.input {
            Some(input) => input.to_string(),
            None => path_str(&config.phate_path())?.to_string(),
        };
        let table = CellTable::read_csv(&input, &[self.feature.clone()])?;
        info!("read {} cells from {}", table.num_rows(), input);
        Ok((config, table))
    }
}

pub fn run_plot_group(args: &SinglePlotArgs) -> anyhow::Result<()> {
    let (config, table) = args.read_input()?;
    plot_group(&table, &args.feature, &config, &args.out)
}

pub fn run_plot_clustering(args: &SinglePlotArgs) -> anyhow::Result<()> {
    let (config, table) = args.read_input()?;
    plot_clustering(&table, &args.feature, &config, &args.out)
}

#[derive(Args, Debug, Clone)]
pub struct DumpConfigArgs {
    #[arg(long, short = 'c', help = "Start from this configuration file")]
    config: Option<Box<str>>,

    #[arg(long, short = 'o', required = true, help = "Output .json file")]
    out: Box<str>,
}

pub fn run_dump_config(args: &DumpConfigArgs) -> anyhow::Result<()> {
    let config = PlotConfig::load(args.config.as_deref())?;
    write_file_atomic(&[config.to_json_string()?, "\n".to_string()], &args.out)?;
    Ok(())
}
