//! K-means clustering of one-dimensional feature values
//!
//! Wraps the `clustering` crate and canonicalizes binary memberships.

/// Arguments for k-means clustering
#[derive(Debug, Clone)]
pub struct KmeansArgs {
    /// Number of clusters
    pub num_clusters: usize,
    /// Maximum number of iterations
    pub max_iter: usize,
}

impl Default for KmeansArgs {
    fn default() -> Self {
        Self {
            num_clusters: 1,
            max_iter: 300,
        }
    }
}

impl KmeansArgs {
    /// Create args with specified number of clusters
    pub fn with_clusters(num_clusters: usize) -> Self {
        Self {
            num_clusters,
            ..Default::default()
        }
    }

    pub fn max_iter(self, max_iter: usize) -> Self {
        Self { max_iter, ..self }
    }
}

/// Trait for k-means clustering on scalar values
pub trait Kmeans {
    /// Cluster values and return membership vector, one per value
    fn kmeans(&self, args: KmeansArgs) -> Vec<usize>;
}

impl Kmeans for [f64] {
    fn kmeans(&self, args: KmeansArgs) -> Vec<usize> {
        if args.num_clusters <= 1 || self.is_empty() {
            return vec![0; self.len()];
        }

        let data: Vec<Vec<f64>> = self.iter().map(|&x| vec![x]).collect();

        let clust = clustering::kmeans(args.num_clusters, &data, args.max_iter);
        clust.membership
    }
}

/// Make `1` the label of the larger cluster.
///
/// Labels are flipped only if strictly fewer values carry `1` than
/// `0`; on a tie the labels are kept as they are.
pub fn relabel_larger_as_one(labels: &mut [u8]) {
    let n1 = labels.iter().filter(|&&k| k == 1).count();
    let n0 = labels.iter().filter(|&&k| k == 0).count();
    if n1 < n0 {
        labels.iter_mut().for_each(|k| *k = 1 - *k);
    }
}

///
/// Split `values` into two groups by 2-means clustering.
///
/// Returns binary labels where `1` marks the larger group. Fails if
/// the values are not all finite or have fewer than two distinct
/// values, since there would be nothing to split.
///
pub fn binary_kmeans(values: &[f64], max_iter: usize) -> anyhow::Result<Vec<u8>> {
    if let Some(pos) = values.iter().position(|x| !x.is_finite()) {
        return Err(anyhow::anyhow!(
            "non-finite value {} at position {}",
            values[pos],
            pos
        ));
    }

    let mut distinct = values.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(anyhow::anyhow!(
            "need at least two distinct values for 2-means, found {}",
            distinct.len()
        ));
    }

    // random initial centroids may coincide on tied values and leave
    // one cluster empty
    for _ in 0..BINARY_KMEANS_RESTARTS {
        let membership = values.kmeans(KmeansArgs::with_clusters(2).max_iter(max_iter));

        let mut labels: Vec<u8> = membership.into_iter().map(|k| (k > 0) as u8).collect();
        if labels.iter().all(|&k| k == labels[0]) {
            continue;
        }
        relabel_larger_as_one(&mut labels);
        return Ok(labels);
    }

    Err(anyhow::anyhow!(
        "2-means left one cluster empty after {} restarts",
        BINARY_KMEANS_RESTARTS
    ))
}

const BINARY_KMEANS_RESTARTS: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmeans_single_cluster() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let membership = x.kmeans(KmeansArgs::with_clusters(1));

        assert_eq!(membership.len(), 4);
        assert!(membership.iter().all(|&k| k == 0));
    }

    #[test]
    fn test_kmeans_two_clusters() {
        let x = [0.0, 0.1, 0.2, 10.0, 10.1, 10.2];
        let membership = x.kmeans(KmeansArgs::with_clusters(2));

        assert_eq!(membership.len(), 6);
        assert_eq!(membership[0], membership[1]);
        assert_eq!(membership[1], membership[2]);
        assert_eq!(membership[3], membership[4]);
        assert_eq!(membership[4], membership[5]);
        assert_ne!(membership[0], membership[3]);
    }

    #[test]
    fn test_kmeans_empty() {
        let x: [f64; 0] = [];
        assert!(x.kmeans(KmeansArgs::with_clusters(2)).is_empty());
    }

    #[test]
    fn test_relabel_flips_minority_one() {
        let mut labels = vec![1, 0, 0, 0, 1];
        relabel_larger_as_one(&mut labels);
        assert_eq!(labels, vec![0, 1, 1, 1, 0]);
    }

    #[test]
    fn test_relabel_keeps_majority_one() {
        let mut labels = vec![1, 1, 0];
        relabel_larger_as_one(&mut labels);
        assert_eq!(labels, vec![1, 1, 0]);
    }

    #[test]
    fn test_relabel_tie_is_kept() {
        let mut labels = vec![0, 1, 0, 1];
        relabel_larger_as_one(&mut labels);
        assert_eq!(labels, vec![0, 1, 0, 1]);

        let mut labels = vec![1, 0, 1, 0];
        relabel_larger_as_one(&mut labels);
        assert_eq!(labels, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_binary_kmeans_larger_is_one() -> anyhow::Result<()> {
        // three low values, five high values
        let x = [0.1, 0.2, 0.15, 5.0, 5.1, 5.2, 4.9, 5.05];
        let labels = binary_kmeans(&x, 100)?;
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1, 1, 1]);

        // five low values, three high values
        let x = [0.1, 0.2, 0.15, 0.12, 0.18, 5.1, 5.2, 4.9];
        let labels = binary_kmeans(&x, 100)?;
        assert_eq!(labels, vec![1, 1, 1, 1, 1, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_binary_kmeans_degenerate() {
        assert!(binary_kmeans(&[3.0, 3.0, 3.0], 100).is_err());
        assert!(binary_kmeans(&[], 100).is_err());
        assert!(binary_kmeans(&[1.0, f64::NAN, 2.0], 100).is_err());
    }
}
