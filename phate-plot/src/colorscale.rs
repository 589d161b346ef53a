//! Plotly color scales
//!
//! Plotly.js only knows a handful of named scales, so sequential
//! palettes are spelled out as evenly spaced color stops.

use serde::Serialize;

/// `[[0.0, "#rrggbb"], ..., [1.0, "#rrggbb"]]` in Plotly JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorScale(pub Vec<(f64, Box<str>)>);

impl ColorScale {
    /// Evenly spaced stops from the first color (0) to the last (1)
    pub fn from_colors(colors: &[&str]) -> Self {
        let n = colors.len();
        let denom = n.saturating_sub(1).max(1) as f64;
        ColorScale(
            colors
                .iter()
                .enumerate()
                .map(|(i, c)| (i as f64 / denom, (*c).into()))
                .collect(),
        )
    }

    /// Sequential palette of the `index`-th group, cycling
    pub fn for_group(index: usize) -> Self {
        let palette = GROUP_PALETTES[index % GROUP_PALETTES.len()];
        Self::from_colors(palette)
    }

    /// Two colors for binary cluster labels
    pub fn binary() -> Self {
        Self::from_colors(&BINARY_COLORS)
    }
}

pub const VIRIDIS: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

pub const CIVIDIS: [&str; 10] = [
    "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74", "#c3b369",
    "#e1cc55", "#fee838",
];

pub const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

pub const INFERNO: [&str; 10] = [
    "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06",
    "#f7d13d", "#fcffa4",
];

pub const MAGMA: [&str; 10] = [
    "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f", "#cd4071", "#f1605d", "#fd9668",
    "#feca8d", "#fcfdbf",
];

const GROUP_PALETTES: [&[&str]; 5] = [&VIRIDIS, &CIVIDIS, &PLASMA, &INFERNO, &MAGMA];

/// label 0, label 1
pub const BINARY_COLORS: [&str; 2] = ["#EB929B", "#43a8a0"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_palettes() {
        assert_eq!(&*ColorScale::for_group(0).0[0].1, "#440154");
        assert_eq!(&*ColorScale::for_group(1).0[0].1, "#00224e");
        assert_eq!(&*ColorScale::for_group(2).0[9].1, "#f0f921");
        assert_eq!(ColorScale::for_group(5), ColorScale::for_group(0));
    }

    #[test]
    fn test_stops() {
        let scale = ColorScale::for_group(0);
        assert_eq!(scale.0.len(), 10);
        assert_eq!(scale.0[0].0, 0.0);
        assert_eq!(scale.0[9].0, 1.0);
    }

    #[test]
    fn test_binary_json() -> anyhow::Result<()> {
        let json = serde_json::to_string(&ColorScale::binary())?;
        assert_eq!(json, r##"[[0.0,"#EB929B"],[1.0,"#43a8a0"]]"##);
        Ok(())
    }
}
