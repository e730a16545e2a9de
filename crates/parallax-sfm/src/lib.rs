#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Camera calibration and projection matrices.
pub mod camera;

/// Error types for the crate.
pub mod error;

/// Keypoint and descriptor containers, and the feature extraction seam.
pub mod features;

/// Descriptor matching with ratio-test filtering.
pub mod matching;

/// Sequential multi-view reconstruction.
pub mod reconstruction;

/// Two-view triangulation.
pub mod triangulation;

/// Correspondence validation seam.
pub mod validation;
