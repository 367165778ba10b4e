use super::*;
use crate::transform::PixelTransform;

fn footprint() -> Footprint {
    Footprint {
        width: 8.0,
        height: 4.0,
        opacity: 0.8,
        color: Rgb8::new(10, 20, 200),
    }
}

fn alpha_at(s: &Surface, x: u32, y: u32) -> u8 {
    s.data()[((y * s.width() + x) * 4 + 3) as usize]
}

#[test]
fn body_is_translucent_and_marker_opaque() {
    let s = draw_actor(
        Pose::new(16.0, 16.0, 0.0),
        footprint(),
        &PixelTransform,
        Canvas::square(32),
    )
    .unwrap();
    // Body corner region, away from the marker line at y = 16.
    assert!((200..=206).contains(&alpha_at(&s, 13, 14)));
    // Marker runs from the centre toward +x, straddling the row boundary at y = 16.
    assert!(alpha_at(&s, 18, 15) > alpha_at(&s, 13, 14));
    assert_eq!(alpha_at(&s, 16, 10), 0);
    assert_eq!(alpha_at(&s, 22, 16), 0);
}

#[test]
fn heading_rotates_the_footprint() {
    let upright = draw_actor(
        Pose::new(16.0, 16.0, std::f64::consts::FRAC_PI_2),
        footprint(),
        &PixelTransform,
        Canvas::square(32),
    )
    .unwrap();
    // Long axis now runs along y.
    assert!(alpha_at(&upright, 16, 19) > 0);
    assert_eq!(alpha_at(&upright, 19, 16), 0);
}

#[test]
fn degenerate_footprint_draws_nothing() {
    let fp = Footprint {
        width: 0.0,
        ..footprint()
    };
    let s = draw_actor(Pose::default(), fp, &PixelTransform, Canvas::square(8)).unwrap();
    assert!(s.is_blank());
}
