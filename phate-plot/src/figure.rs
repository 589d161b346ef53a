//! Plotly figure model, serialized into the JSON `Plotly.newPlot` takes

use crate::colorscale::ColorScale;
use serde::Serialize;

pub const HOVER_TEMPLATE: &str = "
            <b>Custom Info</b><br>
            X: %{x}<br>
            Y: %{y}<br>
            Z: %{z}<br>
            %{customdata[0]}<br>
            %{customdata[1]}<br>
            %{customdata[2]}<br>
            %{customdata[3]}<br>
            %{customdata[4]}<br>
            <extra></extra>
            ";

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HoverLabel {
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
    pub x: f64,
    pub tickmode: Box<str>,
    pub tickvals: Vec<f64>,
    pub ticktext: Vec<Box<str>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: usize,
    pub color: Vec<f64>,
    pub colorscale: ColorScale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmax: Option<f64>,
    pub opacity: f64,
    pub showscale: bool,
}

/// One group of cells in the 3D scatter
#[derive(Debug, Clone, Serialize)]
pub struct Scatter3d {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: &'static str,
    pub name: Box<str>,
    pub marker: Marker,
    pub customdata: Vec<[String; 5]>,
    pub hovertemplate: &'static str,
    pub hoverlabel: HoverLabel,
}

impl Scatter3d {
    pub fn markers(name: &str, marker: Marker) -> Self {
        Self {
            kind: "scatter3d",
            x: vec![],
            y: vec![],
            z: vec![],
            mode: "markers",
            name: name.into(),
            marker,
            customdata: vec![],
            hovertemplate: HOVER_TEMPLATE,
            hoverlabel: HoverLabel {
                font: Font { size: 10 },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: Box<str>,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Title { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: usize,
    pub r: usize,
    pub b: usize,
    pub t: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub font: Font,
    pub itemsizing: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub scene: Scene,
    pub margin: Margin,
    pub legend: Legend,
}

impl Layout {
    /// Shared layout of the PHATE scatter plots
    pub fn phate(title: &str, z_axis_title: &str) -> Self {
        Self {
            title: title.into(),
            scene: Scene {
                xaxis: Axis {
                    title: "Phate1".into(),
                },
                yaxis: Axis {
                    title: "Phate2".into(),
                },
                zaxis: Axis {
                    title: z_axis_title.into(),
                },
            },
            margin: Margin {
                l: 0,
                r: 0,
                b: 0,
                t: 0,
            },
            legend: Legend {
                x: 1.0,
                y: 0.9,
                font: Font { size: 12 },
                itemsizing: "constant",
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Scatter3d>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: vec![],
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Scatter3d) {
        self.data.push(trace);
    }
}

/// Hover lines of a cell: identity fields and the shown value
pub fn hover_custom_data(
    identity: &crate::cell_table::CellIdentity,
    value: impl std::fmt::Display,
) -> [String; 5] {
    [
        format!("Cell id: {}", identity.cell_id),
        format!("Tile id: {}", identity.tile_id),
        format!("Cell_nucleus_id: {}", identity.nucleus_id),
        format!("Bbox: {}", identity.bbox),
        format!("Value: {}", value),
    ]
}
