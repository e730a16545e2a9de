use parallax_3d::error::CloudError;

/// An error type for the reconstruction pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SfmError {
    /// Error when two correspondence sequences have different lengths.
    #[error("correspondence sequences have mismatched lengths ({0} vs {1})")]
    LengthMismatch(usize, usize),

    /// Error when the number of feature sets and cameras differ.
    #[error("got {views} views but {cameras} camera calibrations")]
    CameraCountMismatch {
        /// Number of views (images or feature sets) supplied.
        views: usize,
        /// Number of camera calibrations supplied.
        cameras: usize,
    },

    /// Error when fewer than two views are supplied.
    #[error("need at least 2 views, got {0}")]
    InsufficientViews(usize),

    /// Error raised by an external feature extractor.
    #[error("feature extraction failed: {0}")]
    FeatureExtraction(String),

    /// Error during homogeneous to Euclidean conversion.
    #[error(transparent)]
    Cloud(#[from] CloudError),
}
