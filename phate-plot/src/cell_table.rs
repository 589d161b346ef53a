//! Per-cell PHATE coordinates merged with group labels and features

use crate::plot_common::*;
use std::collections::HashMap;

pub const COORD_COLUMNS: [&str; 3] = ["x", "y", "z"];
pub const GROUP_COLUMN: &str = "group";

/// identity columns shown in hover text
pub const IDENTITY_COLUMNS: [&str; 4] = ["cell_id", "tile_id", "nucleus_id", "bbox"];

/// Hover labels of one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellIdentity {
    pub cell_id: Box<str>,
    pub tile_id: Box<str>,
    pub nucleus_id: Box<str>,
    pub bbox: Box<str>,
}

/// Immutable table of cells, column-major
#[derive(Debug, Clone)]
pub struct CellTable {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub group: Vec<i64>,
    pub identity: Vec<CellIdentity>,
    features: HashMap<Box<str>, Vec<f64>>,
}

impl CellTable {
    ///
    /// Read a comma-separated file with a header line
    ///
    /// * `file` - file name--either gzipped or not
    /// * `features` - feature columns to keep; other columns are ignored
    ///
    pub fn read_csv(file: &str, features: &[Box<str>]) -> anyhow::Result<Self> {
        let reader = open_buf_reader(file)?;
        Self::from_reader(reader, features)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", file, e))
    }

    pub fn from_reader<R: std::io::Read>(reader: R, features: &[Box<str>]) -> anyhow::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = rdr.headers()?.clone();

        let column = |name: &str| -> anyhow::Result<usize> {
            header
                .iter()
                .position(|h| h == name)
                .ok_or(anyhow::anyhow!("missing column: {}", name))
        };

        let coord_idx = [
            column(COORD_COLUMNS[0])?,
            column(COORD_COLUMNS[1])?,
            column(COORD_COLUMNS[2])?,
        ];
        let group_idx = column(GROUP_COLUMN)?;
        let [cell_idx, tile_idx, nucleus_idx, bbox_idx] = [
            column(IDENTITY_COLUMNS[0])?,
            column(IDENTITY_COLUMNS[1])?,
            column(IDENTITY_COLUMNS[2])?,
            column(IDENTITY_COLUMNS[3])?,
        ];

        let feature_idx = features
            .iter()
            .map(|f| Ok((f.clone(), column(&f[..])?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut x = vec![];
        let mut y = vec![];
        let mut z = vec![];
        let mut group = vec![];
        let mut identity = vec![];
        let mut feature_values: Vec<Vec<f64>> = vec![vec![]; feature_idx.len()];

        for (r, record) in rdr.records().enumerate() {
            let record = record?;

            let field = |j: usize| record.get(j).unwrap_or("");

            // data line number, counting the header as line 1
            let line = r + 2;
            let number = |j: usize| -> anyhow::Result<f64> {
                parse_float(field(j)).ok_or(anyhow::anyhow!(
                    "line {}, column {}: not a number: {:?}",
                    line,
                    &header[j],
                    field(j)
                ))
            };

            x.push(number(coord_idx[0])?);
            y.push(number(coord_idx[1])?);
            z.push(number(coord_idx[2])?);

            let g = number(group_idx)?;
            if !g.is_finite() || g.fract() != 0.0 {
                return Err(anyhow::anyhow!(
                    "line {}: group id must be an integer: {:?}",
                    line,
                    field(group_idx)
                ));
            }
            group.push(g as i64);

            identity.push(CellIdentity {
                cell_id: integer_label(field(cell_idx)),
                tile_id: field(tile_idx).into(),
                nucleus_id: integer_label(field(nucleus_idx)),
                bbox: field(bbox_idx).into(),
            });

            for (values, (_, j)) in feature_values.iter_mut().zip(feature_idx.iter()) {
                values.push(number(*j)?);
            }
        }

        let features = feature_idx
            .into_iter()
            .map(|(name, _)| name)
            .zip(feature_values)
            .collect();

        Ok(CellTable {
            x,
            y,
            z,
            group,
            identity,
            features,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.x.len()
    }

    pub fn feature(&self, name: &str) -> anyhow::Result<&[f64]> {
        self.features
            .get(name)
            .map(|v| v.as_slice())
            .ok_or(anyhow::anyhow!("feature not loaded: {}", name))
    }

    /// Rows of the group `group_id`, in file order
    pub fn group_rows(&self, group_id: i64) -> Vec<usize> {
        self.group
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| (g == group_id).then_some(i))
            .collect()
    }
}

/// Empty fields are missing values
fn parse_float(s: &str) -> Option<f64> {
    if s.is_empty() {
        Some(f64::NAN)
    } else {
        s.parse::<f64>().ok()
    }
}

/// Numeric ids are shown as integers, `12.0` as `12`
fn integer_label(s: &str) -> Box<str> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{}", v.trunc() as i64).into_boxed_str(),
        _ => s.into(),
    }
}
