use crate::features::FeatureSet;

/// Configuration for ratio-test descriptor matching.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Nearest-neighbor ratio: the best candidate is accepted only if its
    /// distance is strictly below `ratio_threshold` times the second-best
    /// distance.
    pub ratio_threshold: f32,
    /// If true, keep only mutual nearest neighbors.
    pub cross_check: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            ratio_threshold: 0.55,
            cross_check: false,
        }
    }
}

/// Corresponding 2D point pairs across two images.
///
/// Point `i` of `points_a` corresponds to point `i` of `points_b`; the two
/// sequences always have the same length.
#[derive(Debug, Clone, Default)]
pub struct Correspondences {
    /// Points in the first image.
    pub points_a: Vec<[f64; 2]>,
    /// Corresponding points in the second image.
    pub points_b: Vec<[f64; 2]>,
}

impl Correspondences {
    /// Create a correspondence set from two positionally paired sequences.
    pub fn new(points_a: Vec<[f64; 2]>, points_b: Vec<[f64; 2]>) -> Self {
        assert_eq!(
            points_a.len(),
            points_b.len(),
            "correspondence length mismatch"
        );
        Self { points_a, points_b }
    }

    /// Get the number of correspondence pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.points_a.len()
    }

    /// Check if there are no correspondences.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points_a.is_empty()
    }
}

/// Squared L2 distance between two float descriptors.
#[inline]
fn descriptor_distance_sq<const N: usize>(a: &[f32; N], b: &[f32; N]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}

/// Match float descriptors by brute-force L2 distance with a ratio test.
///
/// For each descriptor in `descriptors1`, the two nearest neighbors in
/// `descriptors2` are found and the best is accepted only if it is clearly
/// better than the runner-up: `best < ratio_threshold * second_best`.
/// Queries with no accepted match are dropped, so the output length varies
/// per call and may be zero. Optionally keeps only mutual nearest neighbors.
///
/// The output is deterministic and ordered by query index; each query index
/// appears at most once.
///
/// # Returns
///
/// Vector of `(i, j)` index pairs into `descriptors1` and `descriptors2`.
pub fn match_descriptors<const N: usize>(
    descriptors1: &[[f32; N]],
    descriptors2: &[[f32; N]],
    config: &MatchConfig,
) -> Vec<(usize, usize)> {
    let m = descriptors1.len();
    let n = descriptors2.len();
    if m == 0 || n == 0 {
        return vec![];
    }

    // Forward pass: for each desc1[i], track best and second-best in desc2.
    let mut fwd_best_j = vec![0usize; m];
    let mut fwd_best_dist = vec![f32::MAX; m];
    let mut fwd_second_dist = vec![f32::MAX; m];

    for (i, d1) in descriptors1.iter().enumerate() {
        for (j, d2) in descriptors2.iter().enumerate() {
            let dist = descriptor_distance_sq(d1, d2);
            if dist < fwd_best_dist[i] {
                fwd_second_dist[i] = fwd_best_dist[i];
                fwd_best_dist[i] = dist;
                fwd_best_j[i] = j;
            } else if dist < fwd_second_dist[i] {
                fwd_second_dist[i] = dist;
            }
        }
    }

    // Reverse pass (only if cross-check): for each desc2[j], best in desc1.
    let rev_best_i = if config.cross_check {
        let mut rev = vec![0usize; n];
        let mut rev_dist = vec![f32::MAX; n];
        for (i, d1) in descriptors1.iter().enumerate() {
            for (j, d2) in descriptors2.iter().enumerate() {
                let dist = descriptor_distance_sq(d1, d2);
                if dist < rev_dist[j] {
                    rev_dist[j] = dist;
                    rev[j] = i;
                }
            }
        }
        Some(rev)
    } else {
        None
    };

    // Distances are kept squared, so the ratio is squared for the test.
    let ratio_sq = config.ratio_threshold * config.ratio_threshold;

    let mut matches = Vec::new();
    for i in 0..m {
        let j = fwd_best_j[i];

        if let Some(ref rev) = rev_best_i {
            if rev[j] != i {
                continue;
            }
        }

        if fwd_best_dist[i] >= ratio_sq * fwd_second_dist[i] {
            continue;
        }

        matches.push((i, j));
    }

    matches
}

/// Match two feature sets and return the corresponding 2D point pairs.
///
/// Runs [`match_descriptors`] over the descriptor sets and maps the accepted
/// index pairs onto the keypoint locations. Either feature set being empty
/// yields an empty correspondence set, not an error.
pub fn match_features<const N: usize>(
    features_a: &FeatureSet<N>,
    features_b: &FeatureSet<N>,
    config: &MatchConfig,
) -> Correspondences {
    let matches = match_descriptors(&features_a.descriptors, &features_b.descriptors, config);

    let mut points_a = Vec::with_capacity(matches.len());
    let mut points_b = Vec::with_capacity(matches.len());
    for (i, j) in matches {
        points_a.push(features_a.keypoints[i]);
        points_b.push(features_b.keypoints[j]);
    }

    Correspondences::new(points_a, points_b)
}
