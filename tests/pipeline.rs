//! End-to-end pipeline test: generate the two built-in series, jointly
//! normalize them to an 800x600 rectangle, and check the published
//! geometry.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use hurstsim::bounds;
use hurstsim::curve;
use hurstsim::refresh::SERIES;
use hurstsim::{FrameBuffer, Viewport};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;

fn generate_frame() -> FrameBuffer {
    let mut rng_a = SmallRng::seed_from_u64(17);
    let mut rng_b = SmallRng::seed_from_u64(23);

    let mut curves = [
        curve::generate(SERIES[0], &mut rng_a),
        curve::generate(SERIES[1], &mut rng_b),
    ];
    bounds::normalize(&mut curves, Viewport::new(WIDTH, HEIGHT));
    FrameBuffer { curves }
}

#[test]
fn two_curves_with_fixed_point_counts() {
    let frame = generate_frame();

    // Unit extent with the 0.01 subdivision limit gives depth 7.
    assert_eq!(frame.curves[0].len(), 129);
    assert_eq!(frame.curves[1].len(), 129);
}

#[test]
fn all_points_inside_the_target_rectangle() {
    let frame = generate_frame();

    for point in frame.curves.iter().flatten() {
        assert!(point.x >= 0.0 && point.x <= WIDTH, "x out of range: {point:?}");
        assert!(point.y >= 0.0 && point.y <= HEIGHT, "y out of range: {point:?}");
    }
}

#[test]
fn shared_origin_maps_to_one_pixel_position() {
    let frame = generate_frame();

    // Both series start at (0, 0) in data space; joint normalization
    // must keep them at the same spot on screen.
    let a = frame.curves[0][0];
    let b = frame.curves[1][0];
    assert!((a.x - b.x).abs() < 1e-9);
    assert!((a.y - b.y).abs() < 1e-9);
}

#[test]
fn x_endpoints_sit_at_the_margins() {
    let frame = generate_frame();

    // Both series span x in [0, 1], so the joint x box is exactly the
    // unit interval and the margin positions are known in closed form.
    let left = 0.05 / 1.1 * WIDTH;
    let right = 1.05 / 1.1 * WIDTH;

    for curve in &frame.curves {
        assert!((curve.first().unwrap().x - left).abs() < 1e-9);
        assert!((curve.last().unwrap().x - right).abs() < 1e-9);
    }

    // Strictly inside the rectangle thanks to the margin.
    assert!(left > 0.0 && right < WIDTH);
}

#[test]
fn biased_endpoints_keep_their_vertical_order() {
    let frame = generate_frame();

    // Series A ends at y = 0.5, series B at y = -0.5. After the
    // vertical flip A's endpoint must be higher on screen, i.e. have
    // the smaller pixel y.
    let a_end = frame.curves[0].last().unwrap();
    let b_end = frame.curves[1].last().unwrap();
    assert!(a_end.y < b_end.y);
}

#[test]
fn pixel_x_is_still_monotone() {
    let frame = generate_frame();

    for curve in &frame.curves {
        for pair in curve.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
    }
}
