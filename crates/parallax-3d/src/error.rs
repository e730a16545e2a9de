/// An error type for the point cloud modules.
#[derive(thiserror::Error, Debug)]
pub enum CloudError {
    /// Error when a homogeneous coordinate is exactly zero during Euclidean
    /// conversion.
    #[error("point {0} has a zero homogeneous coordinate (point at infinity)")]
    PointAtInfinity(usize),

    /// Error when the voxel edge length is not a positive finite number.
    #[error("invalid voxel size ({0})")]
    InvalidVoxelSize(f64),
}
