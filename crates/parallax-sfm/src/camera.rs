/// Represents the intrinsic parameters of a pinhole camera.
#[derive(Debug, Clone)]
pub struct CameraIntrinsic {
    /// The focal length in the x direction
    pub fx: f64,
    /// The focal length in the y direction
    pub fy: f64,
    /// The x coordinate of the principal point
    pub cx: f64,
    /// The y coordinate of the principal point
    pub cy: f64,
}

impl CameraIntrinsic {
    /// Returns the camera matrix K as a 3x3 array.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }
}

/// Represents the extrinsic parameters of a pinhole camera.
#[derive(Debug, Clone)]
pub struct CameraExtrinsic {
    /// The rotation matrix of the camera 3x3
    pub rotation: [[f64; 3]; 3],
    /// The translation vector of the camera 3x1
    pub translation: [f64; 3],
}

impl CameraExtrinsic {
    /// An identity extrinsic: the camera frame coincides with the world frame.
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }
}

/// A calibrated camera: intrinsic and extrinsic parameters together.
#[derive(Debug, Clone)]
pub struct Camera {
    /// The intrinsic parameters of the camera.
    pub intrinsic: CameraIntrinsic,
    /// The extrinsic parameters of the camera.
    pub extrinsic: CameraExtrinsic,
}

impl Camera {
    /// Create a new camera from intrinsic and extrinsic parameters.
    pub fn new(intrinsic: CameraIntrinsic, extrinsic: CameraExtrinsic) -> Self {
        Self {
            intrinsic,
            extrinsic,
        }
    }

    /// Compute the 3x4 projection matrix `P = K * [R|t]`.
    ///
    /// The projection maps homogeneous 3D world points to homogeneous 2D
    /// image points. It is derived on demand from the calibration and never
    /// stored.
    pub fn projection_matrix(&self) -> [[f64; 4]; 3] {
        let k = self.intrinsic.matrix();
        let r = &self.extrinsic.rotation;
        let t = &self.extrinsic.translation;

        // [R|t] as a 3x4 matrix
        let rt = [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
        ];

        let mut p = [[0.0; 4]; 3];
        for (i, p_row) in p.iter_mut().enumerate() {
            for (j, p_val) in p_row.iter_mut().enumerate() {
                *p_val = (0..3).map(|m| k[i][m] * rt[m][j]).sum();
            }
        }
        p
    }

    /// Project a 3D world point to 2D pixel coordinates, or `None` when the
    /// point lies on the camera's principal plane (zero depth).
    pub fn project(&self, point: &[f64; 3]) -> Option<[f64; 2]> {
        let p = self.projection_matrix();
        let homog = [point[0], point[1], point[2], 1.0];
        let mut uvw = [0.0; 3];
        for (i, uvw_val) in uvw.iter_mut().enumerate() {
            *uvw_val = (0..4).map(|j| p[i][j] * homog[j]).sum();
        }
        if uvw[2] == 0.0 {
            return None;
        }
        Some([uvw[0] / uvw[2], uvw[1] / uvw[2]])
    }
}
