use crate::error::CloudError;

/// Convert 2D points to homogeneous coordinates by appending a constant 1.
pub fn to_homogeneous2(points: &[[f64; 2]]) -> Vec<[f64; 3]> {
    points.iter().map(|p| [p[0], p[1], 1.0]).collect()
}

/// Convert 3D points to homogeneous coordinates by appending a constant 1.
pub fn to_homogeneous3(points: &[[f64; 3]]) -> Vec<[f64; 4]> {
    points.iter().map(|p| [p[0], p[1], p[2], 1.0]).collect()
}

/// Convert homogeneous 2D points back to Euclidean coordinates.
///
/// Divides the first two coordinates of every point by its last coordinate.
/// A last coordinate of exactly zero describes a point at infinity and is
/// reported as [`CloudError::PointAtInfinity`] rather than producing NaN or
/// infinite coordinates.
pub fn from_homogeneous3(points: &[[f64; 3]]) -> Result<Vec<[f64; 2]>, CloudError> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p[2] == 0.0 {
                return Err(CloudError::PointAtInfinity(i));
            }
            Ok([p[0] / p[2], p[1] / p[2]])
        })
        .collect()
}

/// Convert homogeneous 3D points back to Euclidean coordinates.
///
/// Divides the first three coordinates of every point by its last coordinate.
/// A last coordinate of exactly zero describes a point at infinity and is
/// reported as [`CloudError::PointAtInfinity`] rather than producing NaN or
/// infinite coordinates.
pub fn from_homogeneous4(points: &[[f64; 4]]) -> Result<Vec<[f64; 3]>, CloudError> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p[3] == 0.0 {
                return Err(CloudError::PointAtInfinity(i));
            }
            Ok([p[0] / p[3], p[1] / p[3], p[2] / p[3]])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_homogeneous2() {
        let points = vec![[1.0, 2.0], [-3.5, 0.0]];
        let homog = to_homogeneous2(&points);
        assert_eq!(homog, vec![[1.0, 2.0, 1.0], [-3.5, 0.0, 1.0]]);
    }

    #[test]
    fn test_roundtrip_2d() -> Result<(), CloudError> {
        let points = vec![[1.0, 2.0], [-3.5, 0.25], [0.0, 0.0]];
        let back = from_homogeneous3(&to_homogeneous2(&points))?;
        assert_eq!(back, points);
        Ok(())
    }

    #[test]
    fn test_roundtrip_3d() -> Result<(), CloudError> {
        let points = vec![[1.0, 2.0, 3.0], [-0.5, 4.25, -7.0]];
        let back = from_homogeneous4(&to_homogeneous3(&points))?;
        assert_eq!(back, points);
        Ok(())
    }

    #[test]
    fn test_from_homogeneous_scaled() -> Result<(), CloudError> {
        let homog = vec![[2.0, 4.0, 6.0, 2.0]];
        let points = from_homogeneous4(&homog)?;
        assert_eq!(points, vec![[1.0, 2.0, 3.0]]);
        Ok(())
    }

    #[test]
    fn test_from_homogeneous_point_at_infinity() {
        let homog = vec![[1.0, 1.0, 1.0, 1.0], [2.0, 4.0, 6.0, 0.0]];
        let result = from_homogeneous4(&homog);
        assert!(matches!(result, Err(CloudError::PointAtInfinity(1))));
    }
}
