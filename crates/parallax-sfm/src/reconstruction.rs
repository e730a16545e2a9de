use parallax_3d::pointcloud::PointCloud;

use crate::camera::Camera;
use crate::error::SfmError;
use crate::features::{FeatureExtractor, FeatureSet};
use crate::matching::{match_features, MatchConfig};
use crate::triangulation::triangulate_points;
use crate::validation::{CorrespondenceValidator, PassthroughValidator};

/// Configuration for the sequential reconstruction pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct SfmConfig {
    /// Descriptor matching parameters used for every image pair.
    pub matching: MatchConfig,
}

/// Diagnostic counts for one processed image pair.
#[derive(Debug, Clone)]
pub struct PairSummary {
    /// Index of the left image of the pair.
    pub left: usize,
    /// Index of the right image of the pair.
    pub right: usize,
    /// Number of correspondences accepted by the matcher.
    pub matched: usize,
    /// Number of correspondences surviving validation.
    pub validated: usize,
    /// Number of 3D points triangulated from this pair.
    pub triangulated: usize,
}

/// The result of a sequential multi-view reconstruction.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// The accumulated sparse point cloud.
    pub cloud: PointCloud,
    /// Per-pair diagnostic counts, in pair order.
    pub pairs: Vec<PairSummary>,
}

/// Sequential multi-view reconstruction over an ordered image sequence.
///
/// Adjacent image pairs (i, i+1) are processed independently: match,
/// validate, triangulate, then concatenate the pair's points onto a single
/// growable cloud. There is no global point identity: a physical point
/// visible in k views is reconstructed up to k-1 times and appears as that
/// many separate entries in the cloud. The type is the seam where a
/// track-based accumulator could be substituted.
pub struct SequentialSfm<V = PassthroughValidator> {
    config: SfmConfig,
    validator: V,
}

impl SequentialSfm<PassthroughValidator> {
    /// Create a pipeline with the given configuration and the default
    /// passthrough validator.
    pub fn new(config: SfmConfig) -> Self {
        Self {
            config,
            validator: PassthroughValidator,
        }
    }
}

impl<V: CorrespondenceValidator> SequentialSfm<V> {
    /// Create a pipeline with a custom correspondence validator.
    pub fn with_validator(config: SfmConfig, validator: V) -> Self {
        Self { config, validator }
    }

    /// Run the full pipeline over an ordered image sequence.
    ///
    /// Features are extracted once per image, then reconstruction proceeds
    /// pairwise as in [`SequentialSfm::reconstruct_features`]. A failing
    /// extraction is a boundary error and aborts the call; per-pair stage
    /// failures do not.
    pub fn reconstruct<I, E, const N: usize>(
        &self,
        images: &[I],
        cameras: &[Camera],
        extractor: &E,
    ) -> Result<Reconstruction, SfmError>
    where
        E: FeatureExtractor<I, N>,
    {
        if images.len() != cameras.len() {
            return Err(SfmError::CameraCountMismatch {
                views: images.len(),
                cameras: cameras.len(),
            });
        }

        let mut features = Vec::with_capacity(images.len());
        for image in images {
            features.push(extractor.extract(image)?);
        }

        self.reconstruct_features(&features, cameras)
    }

    /// Reconstruct a sparse cloud from per-image feature sets and their
    /// camera calibrations, indexed identically.
    ///
    /// Processes the adjacent pairs (0,1), (1,2), ... in index order and
    /// appends each pair's triangulated points to the cloud. A pair that
    /// yields zero correspondences contributes zero points; a pair whose
    /// triangulation fails is logged and skipped. Neither aborts the run.
    pub fn reconstruct_features<const N: usize>(
        &self,
        features: &[FeatureSet<N>],
        cameras: &[Camera],
    ) -> Result<Reconstruction, SfmError> {
        if features.len() != cameras.len() {
            return Err(SfmError::CameraCountMismatch {
                views: features.len(),
                cameras: cameras.len(),
            });
        }
        if features.len() < 2 {
            return Err(SfmError::InsufficientViews(features.len()));
        }

        let mut cloud = PointCloud::new();
        let mut pairs = Vec::with_capacity(features.len() - 1);

        for left in 0..features.len() - 1 {
            let right = left + 1;

            let correspondences =
                match_features(&features[left], &features[right], &self.config.matching);
            let matched = correspondences.len();

            let correspondences =
                self.validator
                    .validate(&correspondences, &cameras[left], &cameras[right]);
            let validated = correspondences.len();

            log::debug!(
                "pair ({}, {}): {} matches, {} after validation",
                left,
                right,
                matched,
                validated
            );

            let triangulated = match triangulate_points(
                &correspondences.points_a,
                &correspondences.points_b,
                &cameras[left],
                &cameras[right],
            ) {
                Ok(points) => {
                    let count = points.len();
                    cloud.extend(points);
                    count
                }
                Err(err) => {
                    log::warn!("pair ({}, {}): triangulation skipped: {}", left, right, err);
                    0
                }
            };

            pairs.push(PairSummary {
                left,
                right,
                matched,
                validated,
                triangulated,
            });
        }

        Ok(Reconstruction { cloud, pairs })
    }
}
