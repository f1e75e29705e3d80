use distortion_wasm::camera::{transform, PerspectiveCamera};
use distortion_wasm::geometry::PlaneGeometry;

/// Plane vertex `i` in normalised device coordinates.
fn to_ndc(camera: &PerspectiveCamera, plane: &PlaneGeometry, i: usize) -> (f32, f32) {
    let p = &plane.positions[i * 3..i * 3 + 3];
    let view = transform(&camera.view(), [p[0], p[1], p[2], 1.0]);
    let clip = transform(&camera.projection(), view);
    (clip[0] / clip[3], clip[1] / clip[3])
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn plane_height_does_not_depend_on_aspect() {
    let plane = PlaneGeometry::new(2.0, 2.0);
    let wide = PerspectiveCamera::for_viewport(1920.0, 1080.0);
    let tall = PerspectiveCamera::for_viewport(1080.0, 1920.0);

    for i in 0..plane.vertex_count() {
        let (_, y_wide) = to_ndc(&wide, &plane, i);
        let (_, y_tall) = to_ndc(&tall, &plane, i);
        assert!(
            approx(y_wide, y_tall, 1e-5),
            "vertex {i}: {y_wide} vs {y_tall}"
        );
    }
}

#[test]
fn plane_width_shrinks_with_wider_viewport() {
    let plane = PlaneGeometry::new(2.0, 2.0);
    let square = PerspectiveCamera::for_viewport(600.0, 600.0);
    let wide = PerspectiveCamera::for_viewport(1200.0, 600.0);

    let (x_square, _) = to_ndc(&square, &plane, 1);
    let (x_wide, _) = to_ndc(&wide, &plane, 1);
    assert!(approx(x_wide * 2.0, x_square, 1e-5));
}

#[test]
fn default_camera_sees_less_than_the_plane() {
    // fov 45 at z = 2 shows ~1.657 world units, so the 2x2 plane covers the
    // viewport vertically and spills past the top and bottom edges.
    let camera = PerspectiveCamera::default();
    assert!(approx(camera.visible_height(), 1.656_854, 1e-4));

    let plane = PlaneGeometry::new(2.0, 2.0);
    let (_, top) = to_ndc(&camera, &plane, 0);
    let (_, bottom) = to_ndc(&camera, &plane, 2);
    assert!(top > 1.0 && bottom < -1.0);
}
