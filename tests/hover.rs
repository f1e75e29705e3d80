use distortion_wasm::config::{EffectConfig, Variant};
use distortion_wasm::hover::{hit_test, BoxSize, HoverPoint, Point, DEFAULT_HIT_RADIUS_PX};
use distortion_wasm::interaction::{HoverController, PROGRESS_HIDDEN, PROGRESS_REVEALED};

fn hit_at(points: &[HoverPoint], size: BoxSize, x: f64, y: f64) -> Option<usize> {
    hit_test(points, Point::new(x, y), size, DEFAULT_HIT_RADIUS_PX)
}

fn approx_eq2(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

#[test]
fn percentages_resolve_against_the_bounding_box() {
    let point = HoverPoint::new("studio", "25%", "30%", "hover1.png").unwrap();
    for (w, h) in [(800.0, 600.0), (1920.0, 1080.0), (333.0, 777.0)] {
        let resolved = point.resolve(BoxSize::new(w, h));
        assert!(
            approx_eq2(resolved, Point::new(0.25 * w, 0.30 * h), 1e-9),
            "{w}x{h} -> {resolved:?}"
        );
    }
}

#[test]
fn hit_radius_boundary_is_inclusive() {
    let studio = HoverPoint::new("studio", "25%", "30%", "hover1.png").unwrap();
    let points = [studio];
    let size = BoxSize::new(800.0, 600.0);
    let c = points[0].resolve(size);

    assert_eq!(hit_at(&points, size, c.x, c.y), Some(0));
    assert_eq!(hit_at(&points, size, c.x + 20.0, c.y), Some(0));
    assert_eq!(hit_at(&points, size, c.x, c.y - 20.0), Some(0));
    assert_eq!(hit_at(&points, size, c.x + 12.0, c.y + 16.0), Some(0));
    assert_eq!(hit_at(&points, size, c.x + 20.01, c.y), None);
    assert_eq!(hit_at(&points, size, c.x + 15.0, c.y + 15.0), None);
}

#[test]
fn nearest_active_point_wins() {
    let points = [
        HoverPoint::new("left", "10%", "50%", "left.png").unwrap(),
        HoverPoint::new("right", "12%", "50%", "right.png").unwrap(),
    ];
    // Points sit 20px apart in a 1000px box; both are within radius of x = 108.
    let size = BoxSize::new(1000.0, 200.0);
    assert_eq!(hit_at(&points, size, 108.0, 100.0), Some(0));
    assert_eq!(hit_at(&points, size, 112.0, 100.0), Some(1));
    assert_eq!(hit_at(&points, size, 500.0, 100.0), None);
}

#[test]
fn enter_and_leave_targets_for_every_variant() {
    for variant in [Variant::Classic, Variant::Gallery, Variant::MultiPoint] {
        let config = EffectConfig::preset(variant);
        let mut hover = HoverController::new(&config);
        let size = BoxSize::new(1000.0, 1000.0);

        let revealed = if variant.uses_proximity() {
            let first = config.hover_points[0].resolve(size);
            hover.pointer_move(first, size)
        } else {
            hover.pointer_enter()
        };
        assert_eq!(revealed.target, Some(PROGRESS_REVEALED), "{variant}");

        let left = hover.pointer_leave();
        assert_eq!(left.target, Some(PROGRESS_HIDDEN), "{variant}");
    }
}

#[test]
fn multi_point_targets_follow_proximity() {
    let config = EffectConfig::preset(Variant::MultiPoint);
    let mut hover = HoverController::new(&config);
    let size = BoxSize::new(1200.0, 800.0);

    // Entering alone does not reveal; the pointer has to reach a point.
    assert_eq!(hover.pointer_enter().target, None);

    let miss = hover.pointer_move(Point::new(5.0, 5.0), size);
    assert_eq!(miss.target, Some(PROGRESS_HIDDEN));
    assert_eq!(miss.swap, None);

    for (i, point) in config.hover_points.iter().enumerate() {
        let hit = hover.pointer_move(point.resolve(size), size);
        assert_eq!(hit.target, Some(PROGRESS_REVEALED));
        assert_eq!(hit.swap, Some(i), "{}", point.name);
        let image = hover.point(i).map(|p| p.image.as_str());
        assert_eq!(image, Some(point.image.as_str()));
    }
}
