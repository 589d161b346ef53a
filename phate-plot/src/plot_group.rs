use crate::colorscale::ColorScale;
use crate::figure::*;
use crate::html::*;
use crate::plot_common::*;

use feature_util::stat::FeatureSummary;

/// Colorbar of one trace: clip range with ticks at the bounds and the
/// mean, labelled by the raw min, mean, and max
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedRange {
    pub lower: f64,
    pub mean: f64,
    pub upper: f64,
    pub summary: FeatureSummary,
}

impl ClippedRange {
    pub fn new(summary: FeatureSummary, sigma: f64) -> Self {
        let (lower, upper) = summary.sigma_bounds(sigma);
        Self {
            lower,
            mean: summary.mean,
            upper,
            summary,
        }
    }

    fn colorbar(&self, feature: &str) -> ColorBar {
        ColorBar {
            title: feature.into(),
            x: 0.8,
            tickmode: "array".into(),
            tickvals: vec![self.lower, self.mean, self.upper],
            ticktext: vec![
                format!("{:.2}", self.summary.min).into(),
                format!("{:.2}", self.summary.mean).into(),
                format!("{:.2}", self.summary.max).into(),
            ],
        }
    }
}

///
/// Build the figure coloring each group's cells by `feature`
///
/// * `table` - cells
/// * `feature` - feature column
/// * `config` - groups, color range, axis titles
///
pub fn group_figure(table: &CellTable, feature: &str, config: &PlotConfig) -> anyhow::Result<Figure> {
    let values = table.feature(feature)?;

    let table_range = match config.color_range {
        ColorRangeScope::Table => Some(ClippedRange::new(
            FeatureSummary::from_slice(values)
                .ok_or(anyhow::anyhow!("no finite value in {}", feature))?,
            config.sigma,
        )),
        ColorRangeScope::Group => None,
    };

    let mut figure = Figure::new(Layout::phate(PLOT_TITLE, config.z_axis_title()));

    for (palette_index, group) in config.groups.iter().enumerate() {
        let rows = table.group_rows(group.id);
        if rows.is_empty() {
            warn!("{}: no cell in group {} ({})", feature, group.name, group.id);
            continue;
        }

        let group_values: Vec<f64> = rows.iter().map(|&i| values[i]).collect();

        let range = match &table_range {
            Some(range) => Some(range.clone()),
            None => FeatureSummary::from_slice(&group_values)
                .map(|summary| ClippedRange::new(summary, config.sigma)),
        };

        if range.is_none() {
            warn!("{}: no finite value in group {}", feature, group.name);
        }

        let marker = Marker {
            size: 5,
            color: group_values.clone(),
            colorscale: ColorScale::for_group(palette_index),
            colorbar: range.as_ref().map(|r| r.colorbar(feature)),
            cmin: range.as_ref().map(|r| r.lower),
            cmax: range.as_ref().map(|r| r.upper),
            opacity: 0.8,
            showscale: true,
        };

        let mut trace = Scatter3d::markers(&group.name, marker);
        trace.x = rows.iter().map(|&i| table.x[i]).collect();
        trace.y = rows.iter().map(|&i| table.y[i]).collect();
        trace.z = rows.iter().map(|&i| table.z[i]).collect();
        trace.customdata = rows
            .iter()
            .zip(group_values.iter())
            .map(|(&i, v)| hover_custom_data(&table.identity[i], v))
            .collect();

        figure.add_trace(trace);
    }

    Ok(figure)
}

///
/// Write an HTML fragment of the group-colored PHATE plot, followed by
/// the script toggling colorbars with legend clicks
///
/// * `table` - cells
/// * `feature` - feature column
/// * `config` - plot configuration
/// * `save_file` - output `.html` file
///
pub fn plot_group(
    table: &CellTable,
    feature: &str,
    config: &PlotConfig,
    save_file: &str,
) -> anyhow::Result<()> {
    let figure = group_figure(table, feature, config)?;
    let fragment = figure_fragment(&figure, &div_id(feature))?;
    write_file_atomic(&[fragment.as_str(), COLORBAR_TOGGLE_SCRIPT], save_file)?;
    info!("wrote {}", save_file);
    Ok(())
}
