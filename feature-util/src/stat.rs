//! Summary statistics of a single feature vector

use ndarray::{Array1, ArrayView1};

/// Sufficient summary of a feature vector over its finite values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSummary {
    /// number of finite values
    pub n: usize,
    pub mean: f64,
    /// population standard deviation (ddof = 0)
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl FeatureSummary {
    /// Summarize the finite values of `values`.
    ///
    /// Returns `None` if there is no finite value.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        Self::from_view(ArrayView1::from(values))
    }

    pub fn from_view(values: ArrayView1<f64>) -> Option<Self> {
        let finite: Array1<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();

        let mean = finite.mean()?;
        let std = finite.std(0.0);
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(FeatureSummary {
            n: finite.len(),
            mean,
            std,
            min,
            max,
        })
    }

    /// `(mean - k * std, mean + k * std)`
    pub fn sigma_bounds(&self, k: f64) -> (f64, f64) {
        (self.mean - k * self.std, self.mean + k * self.std)
    }
}
