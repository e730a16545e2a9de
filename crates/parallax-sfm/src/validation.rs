use crate::camera::Camera;
use crate::matching::Correspondences;

/// Filter correspondences by geometric consistency between two calibrated
/// views.
///
/// Implementations return a positional subset of the input with the pairing
/// preserved: if pair `i` of the input survives, its two points stay
/// together in the output. The seam exists so that an epipolar-consistency
/// filter (e.g. based on a robustly estimated fundamental matrix) can be
/// substituted without changing any caller.
pub trait CorrespondenceValidator {
    /// Validate a correspondence set against the two camera calibrations.
    fn validate(
        &self,
        correspondences: &Correspondences,
        camera_a: &Camera,
        camera_b: &Camera,
    ) -> Correspondences;
}

/// The default validator: returns every correspondence unchanged.
///
/// No geometric check is performed; reconstructions will contain whatever
/// outliers the matcher lets through.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughValidator;

impl CorrespondenceValidator for PassthroughValidator {
    fn validate(
        &self,
        correspondences: &Correspondences,
        _camera_a: &Camera,
        _camera_b: &Camera,
    ) -> Correspondences {
        correspondences.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraExtrinsic, CameraIntrinsic};

    #[test]
    fn test_passthrough_identity() {
        let corr = Correspondences::new(
            vec![[0.0, 0.0], [1.0, 1.0]],
            vec![[2.0, 2.0], [3.0, 3.0]],
        );
        let camera = Camera::new(
            CameraIntrinsic {
                fx: 1.0,
                fy: 1.0,
                cx: 0.0,
                cy: 0.0,
            },
            CameraExtrinsic::identity(),
        );

        let validated = PassthroughValidator.validate(&corr, &camera, &camera);
        assert_eq!(validated.points_a, corr.points_a);
        assert_eq!(validated.points_b, corr.points_b);
    }
}
