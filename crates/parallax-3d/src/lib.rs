#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the crate.
pub mod error;

/// Statistical outlier removal for point clouds.
pub mod outlier;

/// Point cloud container.
pub mod pointcloud;

/// Euclidean and homogeneous coordinate conversions.
pub mod transforms;

/// Voxel grid downsampling.
pub mod voxelgrid;
