use parallax_3d::transforms::from_homogeneous4;

use crate::camera::Camera;
use crate::error::SfmError;

/// Triangulate 3D points from corresponding 2D observations in two
/// calibrated views.
///
/// Builds the projection matrix `P = K * [R|t]` for each camera and solves
/// the direct linear transform for every correspondence pair, then converts
/// the homogeneous solutions to Euclidean coordinates.
///
/// # Arguments
///
/// * `points_a` - Observations in the first image.
/// * `points_b` - Corresponding observations in the second image, paired
///   positionally with `points_a`.
/// * `camera_a` - Calibration of the first camera.
/// * `camera_b` - Calibration of the second camera.
///
/// # Returns
///
/// One Euclidean 3D point per correspondence pair. Sequences of unequal
/// length are rejected with [`SfmError::LengthMismatch`]; zero pairs yield
/// an empty cloud, not an error. A degenerate pair whose homogeneous
/// solution has a zero last coordinate (parallel projection rays) surfaces
/// as [`SfmError::Cloud`].
pub fn triangulate_points(
    points_a: &[[f64; 2]],
    points_b: &[[f64; 2]],
    camera_a: &Camera,
    camera_b: &Camera,
) -> Result<Vec<[f64; 3]>, SfmError> {
    if points_a.len() != points_b.len() {
        return Err(SfmError::LengthMismatch(points_a.len(), points_b.len()));
    }
    if points_a.is_empty() {
        return Ok(Vec::new());
    }

    let proj_a = camera_a.projection_matrix();
    let proj_b = camera_b.projection_matrix();

    let homog = points_a
        .iter()
        .zip(points_b.iter())
        .map(|(pa, pb)| triangulate_dlt(&proj_a, &proj_b, pa, pb))
        .collect::<Vec<_>>();

    Ok(from_homogeneous4(&homog)?)
}

/// Solve one direct linear transform for a single correspondence pair.
///
/// Stacks the rows `u * P3 - P1` and `v * P3 - P2` of both views into a 4x4
/// design matrix and takes the right singular vector of its smallest
/// singular value as the homogeneous 3D point.
fn triangulate_dlt(
    proj_a: &[[f64; 4]; 3],
    proj_b: &[[f64; 4]; 3],
    point_a: &[f64; 2],
    point_b: &[f64; 2],
) -> [f64; 4] {
    let mut a = faer::Mat::<f64>::zeros(4, 4);
    write_dlt_row(&mut a, 0, point_a[0], &proj_a[2], &proj_a[0]);
    write_dlt_row(&mut a, 1, point_a[1], &proj_a[2], &proj_a[1]);
    write_dlt_row(&mut a, 2, point_b[0], &proj_b[2], &proj_b[0]);
    write_dlt_row(&mut a, 3, point_b[1], &proj_b[2], &proj_b[1]);

    // Solve Ax = 0 via SVD: take the last column of V
    let svd = a.svd();
    let xh = svd.v().col(3);
    [xh[0], xh[1], xh[2], xh[3]]
}

fn write_dlt_row(a: &mut faer::Mat<f64>, row: usize, x: f64, p3: &[f64; 4], p1: &[f64; 4]) {
    for j in 0..4 {
        a.write(row, j, x * p3[j] - p1[j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraExtrinsic, CameraIntrinsic};
    use approx::assert_relative_eq;

    fn test_camera(translation: [f64; 3]) -> Camera {
        Camera::new(
            CameraIntrinsic {
                fx: 500.0,
                fy: 500.0,
                cx: 320.0,
                cy: 240.0,
            },
            CameraExtrinsic {
                rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
                translation,
            },
        )
    }

    #[test]
    fn test_triangulate_recovers_known_points() -> Result<(), SfmError> {
        let camera_a = test_camera([0.0, 0.0, 0.0]);
        let camera_b = test_camera([-0.2, 0.0, 0.0]);

        let world = vec![[0.1, -0.05, 2.0], [-0.3, 0.2, 3.5], [0.0, 0.0, 5.0]];

        let points_a = world
            .iter()
            .map(|p| camera_a.project(p).unwrap())
            .collect::<Vec<_>>();
        let points_b = world
            .iter()
            .map(|p| camera_b.project(p).unwrap())
            .collect::<Vec<_>>();

        let recon = triangulate_points(&points_a, &points_b, &camera_a, &camera_b)?;

        assert_eq!(recon.len(), world.len());
        for (est, expected) in recon.iter().zip(world.iter()) {
            for (e, w) in est.iter().zip(expected.iter()) {
                assert_relative_eq!(e, w, epsilon = 1e-6);
            }
        }
        Ok(())
    }

    #[test]
    fn test_triangulate_empty() -> Result<(), SfmError> {
        let camera_a = test_camera([0.0, 0.0, 0.0]);
        let camera_b = test_camera([-0.2, 0.0, 0.0]);
        let recon = triangulate_points(&[], &[], &camera_a, &camera_b)?;
        assert!(recon.is_empty());
        Ok(())
    }

    #[test]
    fn test_triangulate_length_mismatch() {
        let camera_a = test_camera([0.0, 0.0, 0.0]);
        let camera_b = test_camera([-0.2, 0.0, 0.0]);
        let result = triangulate_points(&[[0.0, 0.0]], &[], &camera_a, &camera_b);
        assert!(matches!(result, Err(SfmError::LengthMismatch(1, 0))));
    }
}
