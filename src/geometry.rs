/// Indexed plane in the XY plane centred on the origin, facing +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    /// xyz per vertex.
    pub positions: Vec<f32>,
    /// uv per vertex, v = 1 at the top edge.
    pub uvs: Vec<f32>,
    pub indices: Vec<u16>,
}

impl PlaneGeometry {
    /// Single-segment plane, vertices ordered top-left, top-right, bottom-left, bottom-right.
    pub fn new(width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self {
            positions: vec![
                -hw, hh, 0.0, //
                hw, hh, 0.0, //
                -hw, -hh, 0.0, //
                hw, -hh, 0.0,
            ],
            uvs: vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 2, 1, 2, 3, 1],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> i32 {
        self.indices.len() as i32
    }
}
