//! Plot configuration
//!
//! Every field has a default, so a JSON file only needs to list the
//! keys it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Display name of an experimental group and its id in the `group` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLabel {
    pub name: Box<str>,
    pub id: i64,
}

impl GroupLabel {
    pub fn new(name: &str, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Where the outlier-clipped color range is estimated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRangeScope {
    /// each group trace gets its own mean ± kσ
    #[default]
    Group,
    /// all traces share mean ± kσ of the full table
    Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// main directory; inputs and outputs live under `{home_dir}/output`
    pub home_dir: Box<str>,

    /// merged PHATE coordinates, relative to `home_dir` unless absolute
    pub phate_file: Box<str>,

    /// features to color the embedding with, one file each
    pub feature_names: Vec<Box<str>>,

    /// feature split into two groups by 2-means
    pub clustering_feature: Box<str>,

    /// ordered group labels; the order decides trace order and palettes
    pub groups: Vec<GroupLabel>,

    /// figures go to `{home_dir}/output/figure/{out_folder_name}`
    pub out_folder_name: Box<str>,

    /// title of the third axis if the embedding has two components
    pub replace_z: Option<Box<str>>,

    pub color_range: ColorRangeScope,

    /// half-width of the color range in standard deviations
    pub sigma: f64,

    pub kmeans_max_iter: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            home_dir: "".into(),
            phate_file: "output/phate_representation.csv".into(),
            feature_names: vec![
                "cyclina_mean_ratio".into(),
                "cyclinb_mean_ratio".into(),
                "cyclind_mean_ratio".into(),
                "dapi_nucleus_total_intensity".into(),
                "vimentin_cell_total_intensity".into(),
            ],
            clustering_feature: "dapi_nucleus_total_intensity".into(),
            groups: vec![
                GroupLabel::new("14days_treated", 0),
                GroupLabel::new("3days_treated", 1),
                GroupLabel::new("3days_no_treated", 2),
            ],
            out_folder_name: "self_selected".into(),
            replace_z: Some("vimentin_cell_total_intensity".into()),
            color_range: ColorRangeScope::Group,
            sigma: 3.0,
            kmeans_max_iter: 300,
        }
    }
}

impl PlotConfig {
    /// Read a JSON configuration file; missing keys take default values
    pub fn from_json_file(file: &str) -> anyhow::Result<Self> {
        let reader = feature_util::common_io::open_buf_reader(file)?;
        let config: PlotConfig = serde_json::from_reader(reader)
            .map_err(|e| anyhow::anyhow!("invalid configuration {}: {}", file, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration unless a file is given
    pub fn load(file: Option<&str>) -> anyhow::Result<Self> {
        match file {
            Some(file) => Self::from_json_file(file),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(anyhow::anyhow!("sigma must be positive: {}", self.sigma));
        }

        let mut ids: Vec<i64> = self.groups.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.groups.len() {
            return Err(anyhow::anyhow!("duplicate group ids in {:?}", self.groups));
        }
        Ok(())
    }

    pub fn phate_path(&self) -> PathBuf {
        Path::new(&*self.home_dir).join(&*self.phate_file)
    }

    pub fn figure_dir(&self) -> PathBuf {
        Path::new(&*self.home_dir)
            .join("output")
            .join("figure")
            .join(&*self.out_folder_name)
    }

    /// `{figure_dir}/{feature}.html`
    pub fn group_plot_path(&self, feature: &str) -> PathBuf {
        self.figure_dir().join(format!("{}.html", feature))
    }

    /// `{figure_dir}/{feature}_clustering.html`
    pub fn clustering_plot_path(&self, feature: &str) -> PathBuf {
        self.figure_dir().join(format!("{}_clustering.html", feature))
    }

    pub fn z_axis_title(&self) -> &str {
        self.replace_z.as_deref().unwrap_or("Phate3")
    }

    /// Feature columns needed by the driver, configured order, no duplicates
    pub fn required_features(&self) -> Vec<Box<str>> {
        let mut ret: Vec<Box<str>> = vec![];
        for f in self
            .feature_names
            .iter()
            .chain(std::iter::once(&self.clustering_feature))
        {
            if !ret.contains(f) {
                ret.push(f.clone());
            }
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PlotConfig {
            home_dir: "/data/exp".into(),
            ..Default::default()
        };
        assert_eq!(
            config.phate_path(),
            PathBuf::from("/data/exp/output/phate_representation.csv")
        );
        assert_eq!(
            config.group_plot_path("cyclina_mean_ratio"),
            PathBuf::from("/data/exp/output/figure/self_selected/cyclina_mean_ratio.html")
        );
        assert_eq!(
            config.clustering_plot_path("dapi_nucleus_total_intensity"),
            PathBuf::from(
                "/data/exp/output/figure/self_selected/dapi_nucleus_total_intensity_clustering.html"
            )
        );
        assert_eq!(config.z_axis_title(), "vimentin_cell_total_intensity");
    }

    #[test]
    fn test_partial_json() -> anyhow::Result<()> {
        let json = r#"{
            "feature_names": ["a", "b"],
            "clustering_feature": "a",
            "groups": [{"name": "ctrl", "id": 3}],
            "replace_z": null,
            "color_range": "table"
        }"#;
        let config: PlotConfig = serde_json::from_str(json)?;
        config.validate()?;

        assert_eq!(config.feature_names.len(), 2);
        assert_eq!(config.groups, vec![GroupLabel::new("ctrl", 3)]);
        assert_eq!(config.color_range, ColorRangeScope::Table);
        assert_eq!(config.z_axis_title(), "Phate3");
        assert_eq!(&*config.out_folder_name, "self_selected");
        assert_eq!(config.sigma, 3.0);

        let expected: Vec<Box<str>> = vec!["a".into(), "b".into()];
        assert_eq!(config.required_features(), expected);
        Ok(())
    }

    #[test]
    fn test_round_trip_default() -> anyhow::Result<()> {
        let json = PlotConfig::default().to_json_string()?;
        let config: PlotConfig = serde_json::from_str(&json)?;
        assert_eq!(config.groups, PlotConfig::default().groups);
        assert_eq!(config.required_features().len(), 5);
        Ok(())
    }

    #[test]
    fn test_invalid() {
        let config = PlotConfig {
            groups: vec![GroupLabel::new("a", 0), GroupLabel::new("b", 0)],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlotConfig {
            sigma: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
