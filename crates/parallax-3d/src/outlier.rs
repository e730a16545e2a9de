use kiddo::immutable::float::kdtree::ImmutableKdTree;

use crate::pointcloud::PointCloud;

/// Remove statistical outliers from a point cloud.
///
/// For each point the mean Euclidean distance to its `k` nearest neighbors is
/// computed, and points whose mean distance exceeds
/// `global_mean + std_ratio * global_std` over the whole cloud are dropped.
///
/// # Arguments
///
/// * `cloud` - The input point cloud.
/// * `k` - The number of nearest neighbors to average over.
/// * `std_ratio` - How many standard deviations above the global mean a
///   point's mean neighbor distance may be before it is removed.
///
/// # Returns
///
/// The filtered point cloud and the indices of the removed points in the
/// input cloud. If the cloud has fewer than `k + 1` points (or `k` is zero)
/// there are not enough neighbors to form the statistic and the input is
/// returned unchanged.
pub fn remove_statistical_outliers(
    cloud: &PointCloud,
    k: usize,
    std_ratio: f64,
) -> (PointCloud, Vec<usize>) {
    let points = cloud.points();
    if k == 0 || points.len() < k + 1 {
        return (cloud.clone(), Vec::new());
    }

    // build kdtree over the cloud to speed up the nearest neighbor search
    let kdtree: ImmutableKdTree<f64, u32, 3, 32> = ImmutableKdTree::new_from_slice(points);

    // mean distance from each point to its k nearest neighbors, self excluded
    let mean_distances = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let neighbors = kdtree
                .nearest_n::<kiddo::SquaredEuclidean>(point, std::num::NonZero::new(k + 1).unwrap());
            let sum: f64 = neighbors
                .iter()
                .filter(|nn| nn.item as usize != i)
                .take(k)
                .map(|nn| nn.distance.sqrt())
                .sum();
            sum / k as f64
        })
        .collect::<Vec<_>>();

    let num_points = points.len() as f64;
    let global_mean = mean_distances.iter().sum::<f64>() / num_points;
    let variance = mean_distances
        .iter()
        .map(|d| (d - global_mean).powi(2))
        .sum::<f64>()
        / num_points;
    let threshold = global_mean + std_ratio * variance.sqrt();

    let mut kept = Vec::with_capacity(points.len());
    let mut removed = Vec::new();
    for (i, mean_distance) in mean_distances.iter().enumerate() {
        if *mean_distance > threshold {
            removed.push(i);
        } else {
            kept.push(points[i]);
        }
    }

    log::debug!(
        "removed {} of {} points as statistical outliers",
        removed.len(),
        points.len()
    );

    (PointCloud::from_points(kept), removed)
}
