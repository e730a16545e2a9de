use crate::error::SfmError;

/// Keypoints and descriptors detected in a single image.
///
/// Keypoints and descriptors are paired positionally: descriptor `i`
/// describes the image patch around keypoint `i`. The set is immutable after
/// creation. `N` is the descriptor dimension fixed by the extractor
/// (e.g. 128 for SIFT-style descriptors).
#[derive(Debug, Clone)]
pub struct FeatureSet<const N: usize> {
    /// The 2D pixel locations of the detected keypoints.
    pub keypoints: Vec<[f64; 2]>,
    /// The descriptor vectors, one per keypoint.
    pub descriptors: Vec<[f32; N]>,
}

impl<const N: usize> FeatureSet<N> {
    /// Create a new feature set from paired keypoints and descriptors.
    pub fn new(keypoints: Vec<[f64; 2]>, descriptors: Vec<[f32; N]>) -> Self {
        assert_eq!(
            keypoints.len(),
            descriptors.len(),
            "keypoints/descriptors length mismatch"
        );
        Self {
            keypoints,
            descriptors,
        }
    }

    /// Get the number of detected features.
    #[inline]
    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    /// Check if the feature set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

/// Detect keypoints and compute descriptors for an opaque image type.
///
/// This is the seam towards an external feature detector; the pipeline only
/// requires that each image yields a [`FeatureSet`], and never inspects the
/// image itself.
pub trait FeatureExtractor<I, const N: usize> {
    /// Detect keypoints and compute their descriptors in a single image.
    fn extract(&self, image: &I) -> Result<FeatureSet<N>, SfmError>;
}
