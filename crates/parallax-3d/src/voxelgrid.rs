use std::collections::BTreeMap;

use crate::error::CloudError;
use crate::pointcloud::PointCloud;

/// A voxel grid for organizing and downsampling point clouds.
///
/// Points are binned into a uniform grid of the given edge length in absolute
/// coordinates, so the binning does not depend on the extent of the cloud and
/// downsampling the same cloud twice produces the same result.
pub struct VoxelGrid {
    voxel_size: f64,
    grid: BTreeMap<[i64; 3], Voxel>,
}

/// Running sum of the points that fell into one voxel.
struct Voxel {
    sum: [f64; 3],
    count: usize,
}

impl VoxelGrid {
    /// Create a new VoxelGrid with the specified voxel edge length.
    ///
    /// The edge length must be a positive finite number.
    pub fn new(voxel_size: f64) -> Result<Self, CloudError> {
        if !voxel_size.is_finite() || voxel_size <= 0.0 {
            return Err(CloudError::InvalidVoxelSize(voxel_size));
        }
        Ok(Self {
            voxel_size,
            grid: BTreeMap::new(),
        })
    }

    /// Add points from a point cloud to the voxel grid.
    pub fn add_points(&mut self, pointcloud: &PointCloud) {
        for point in pointcloud.points() {
            let voxel_index = self.compute_voxel_index(point);
            let voxel = self.grid.entry(voxel_index).or_insert(Voxel {
                sum: [0.0; 3],
                count: 0,
            });
            voxel.sum[0] += point[0];
            voxel.sum[1] += point[1];
            voxel.sum[2] += point[2];
            voxel.count += 1;
        }
    }

    /// Compute the voxel index for a given point.
    fn compute_voxel_index(&self, point: &[f64; 3]) -> [i64; 3] {
        [
            (point[0] / self.voxel_size).floor() as i64,
            (point[1] / self.voxel_size).floor() as i64,
            (point[2] / self.voxel_size).floor() as i64,
        ]
    }

    /// Downsample the accumulated points by replacing each occupied voxel
    /// with the centroid of its points.
    ///
    /// The output is ordered by voxel index, so the result is deterministic
    /// for a given input cloud.
    pub fn downsample(&self) -> PointCloud {
        let downsampled_points = self
            .grid
            .values()
            .map(|voxel| {
                let n = voxel.count as f64;
                [voxel.sum[0] / n, voxel.sum[1] / n, voxel.sum[2] / n]
            })
            .collect();

        PointCloud::from_points(downsampled_points)
    }
}

/// Downsample a point cloud with a uniform voxel grid of the given edge
/// length, replacing each occupied voxel's points with their centroid.
pub fn voxel_downsample(cloud: &PointCloud, voxel_size: f64) -> Result<PointCloud, CloudError> {
    let mut grid = VoxelGrid::new(voxel_size)?;
    grid.add_points(cloud);
    Ok(grid.downsample())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_grid_centroids() -> Result<(), CloudError> {
        let cloud = PointCloud::from_points(vec![
            [0.0, 0.0, 0.0],
            [0.5, 0.5, 0.5],
            [1.25, 1.25, 1.25],
            [1.75, 1.75, 1.75],
        ]);

        let downsampled = voxel_downsample(&cloud, 1.0)?;

        assert_eq!(downsampled.len(), 2);
        assert!(downsampled.points().contains(&[0.25, 0.25, 0.25]));
        assert!(downsampled.points().contains(&[1.5, 1.5, 1.5]));
        Ok(())
    }

    #[test]
    fn test_voxel_grid_negative_coordinates() -> Result<(), CloudError> {
        use approx::assert_relative_eq;

        let cloud = PointCloud::from_points(vec![[-0.2, -0.2, -0.2], [-0.4, -0.4, -0.4]]);
        let downsampled = voxel_downsample(&cloud, 1.0)?;

        // both points share voxel [-1, -1, -1]
        assert_eq!(downsampled.len(), 1);
        for coord in downsampled.points()[0] {
            assert_relative_eq!(coord, -0.3, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_voxel_downsample_idempotent() -> Result<(), CloudError> {
        let points = (0..200)
            .map(|i| {
                let t = i as f64 * 0.013;
                [t.sin() * 2.0, t.cos() * 2.0, t]
            })
            .collect::<Vec<_>>();
        let cloud = PointCloud::from_points(points);

        let once = voxel_downsample(&cloud, 0.25)?;
        let twice = voxel_downsample(&once, 0.25)?;

        assert_eq!(once.points(), twice.points());
        Ok(())
    }

    #[test]
    fn test_voxel_downsample_empty() -> Result<(), CloudError> {
        let downsampled = voxel_downsample(&PointCloud::new(), 0.5)?;
        assert!(downsampled.is_empty());
        Ok(())
    }

    #[test]
    fn test_voxel_downsample_invalid_size() {
        let cloud = PointCloud::from_points(vec![[0.0, 0.0, 0.0]]);
        assert!(matches!(
            voxel_downsample(&cloud, 0.0),
            Err(CloudError::InvalidVoxelSize(_))
        ));
        assert!(matches!(
            voxel_downsample(&cloud, f64::NAN),
            Err(CloudError::InvalidVoxelSize(_))
        ));
    }
}
