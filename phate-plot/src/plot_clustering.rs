use crate::colorscale::ColorScale;
use crate::figure::*;
use crate::html::*;
use crate::plot_common::*;

use feature_util::clustering::binary_kmeans;

///
/// Build the figure coloring each group's cells by 2-means labels of
/// `feature`, estimated within the group. Label `1` marks the larger
/// cluster.
///
/// * `table` - cells
/// * `feature` - feature column
/// * `config` - groups, axis titles, k-means iterations
///
pub fn clustering_figure(
    table: &CellTable,
    feature: &str,
    config: &PlotConfig,
) -> anyhow::Result<Figure> {
    let values = table.feature(feature)?;

    let mut figure = Figure::new(Layout::phate(PLOT_TITLE, config.z_axis_title()));

    for group in config.groups.iter() {
        let rows = table.group_rows(group.id);
        if rows.is_empty() {
            warn!("{}: no cell in group {} ({})", feature, group.name, group.id);
            continue;
        }

        let group_values: Vec<f64> = rows.iter().map(|&i| values[i]).collect();

        let labels = binary_kmeans(&group_values, config.kmeans_max_iter).map_err(|e| {
            anyhow::anyhow!("clustering {} in group {}: {}", feature, group.name, e)
        })?;

        let n1 = labels.iter().filter(|&&k| k == 1).count();
        info!(
            "{} / {}: {} cells in cluster 1, {} in cluster 0",
            feature,
            group.name,
            n1,
            labels.len() - n1
        );

        let marker = Marker {
            size: 5,
            color: labels.iter().map(|&k| k as f64).collect(),
            colorscale: ColorScale::binary(),
            colorbar: None,
            cmin: Some(0.0),
            cmax: Some(1.0),
            opacity: 0.8,
            showscale: false,
        };

        let mut trace = Scatter3d::markers(&group.name, marker);
        trace.x = rows.iter().map(|&i| table.x[i]).collect();
        trace.y = rows.iter().map(|&i| table.y[i]).collect();
        trace.z = rows.iter().map(|&i| table.z[i]).collect();
        trace.customdata = rows
            .iter()
            .zip(labels.iter())
            .map(|(&i, k)| hover_custom_data(&table.identity[i], k))
            .collect();

        figure.add_trace(trace);
    }

    Ok(figure)
}

///
/// Write a full HTML page of the 2-means clustering plot
///
/// * `table` - cells
/// * `feature` - feature column to cluster
/// * `config` - plot configuration
/// * `save_file` - output `.html` file
///
pub fn plot_clustering(
    table: &CellTable,
    feature: &str,
    config: &PlotConfig,
    save_file: &str,
) -> anyhow::Result<()> {
    let figure = clustering_figure(table, feature, config)?;
    let id = div_id(&format!("{}_clustering", feature));
    let page = figure_page(&figure, &id)?;
    write_file_atomic(&[page], save_file)?;
    info!("wrote {}", save_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_table::tests::toy_table;

    fn toy_config() -> PlotConfig {
        PlotConfig {
            feature_names: vec!["feat_a".into()],
            clustering_feature: "feat_b".into(),
            groups: vec![GroupLabel::new("g0", 0), GroupLabel::new("g1", 1)],
            ..Default::default()
        }
    }

    #[test]
    fn test_larger_cluster_is_one() -> anyhow::Result<()> {
        let figure = clustering_figure(&toy_table(), "feat_b", &toy_config())?;
        assert_eq!(figure.data.len(), 2);

        // g0: 0.10, 0.12 | 5.00
        assert_eq!(figure.data[0].marker.color, vec![1.0, 1.0, 0.0]);
        // g1: 5.10, 5.20 | 0.11
        assert_eq!(figure.data[1].marker.color, vec![1.0, 0.0, 1.0]);
        assert_eq!(figure.data[1].customdata[1][4], "Value: 0");
        Ok(())
    }

    #[test]
    fn test_fixed_scale_without_colorbar() -> anyhow::Result<()> {
        let figure = clustering_figure(&toy_table(), "feat_b", &toy_config())?;
        for trace in figure.data.iter() {
            assert!(!trace.marker.showscale);
            assert!(trace.marker.colorbar.is_none());
            assert_eq!(trace.marker.colorscale, ColorScale::binary());
            assert_eq!(trace.marker.cmin, Some(0.0));
            assert_eq!(trace.marker.cmax, Some(1.0));
        }
        Ok(())
    }

    #[test]
    fn test_degenerate_group_fails() {
        let csv = "x,y,z,group,cell_id,tile_id,nucleus_id,bbox,f\n\
                   0,0,0,0,1,t,1,b,2.0\n\
                   0,0,0,0,2,t,2,b,2.0\n";
        let features: Vec<Box<str>> = vec!["f".into()];
        let table = CellTable::from_reader(csv.as_bytes(), &features).unwrap();
        let err = clustering_figure(&table, "f", &toy_config()).unwrap_err();
        assert!(err.to_string().contains("g0"));
    }

    #[test]
    fn test_write_page() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("feat_b_clustering.html");
        let out = out.to_str().unwrap();

        plot_clustering(&toy_table(), "feat_b", &toy_config(), out)?;

        let html = std::fs::read_to_string(out)?;
        assert!(html.starts_with("<html>"));
        assert!(html.contains("phate-feat_b_clustering"));
        assert!(!html.contains("plotly_legendclick"));
        Ok(())
    }
}
