//! Perspective camera looking down -Z at the plane. Matrices are column-major,
//! ready for `uniformMatrix4fv` with `transpose = false`.

pub type Mat4 = [f32; 16];

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub z: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_deg: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
            z: 2.0,
        }
    }
}

impl PerspectiveCamera {
    /// Default lens sized for a `width` x `height` viewport.
    pub fn for_viewport(width: f64, height: f64) -> Self {
        let mut camera = Self::default();
        camera.set_viewport(width, height);
        camera
    }

    /// Updates the aspect ratio. A collapsed viewport keeps the previous one.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }

    #[rustfmt::skip]
    pub fn projection(&self) -> Mat4 {
        let f = 1.0 / (self.fov_y_deg.to_radians() / 2.0).tan();
        let range_inv = 1.0 / (self.near - self.far);
        [
            f / self.aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (self.near + self.far) * range_inv, -1.0,
            0.0, 0.0, 2.0 * self.near * self.far * range_inv, 0.0,
        ]
    }

    /// World-to-view transform; the camera only moves along Z.
    #[rustfmt::skip]
    pub fn view(&self) -> Mat4 {
        [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, -self.z, 1.0,
        ]
    }

    /// Height of the visible world slice at `z = 0`.
    pub fn visible_height(&self) -> f32 {
        2.0 * self.z * (self.fov_y_deg.to_radians() / 2.0).tan()
    }
}

/// `m * v` for a column-major matrix.
pub fn transform(m: &Mat4, v: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = (0..4).map(|col| m[col * 4 + row] * v[col]).sum();
    }
    out
}
