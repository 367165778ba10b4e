use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::Point;
use crate::path::curve::BezierCurve;
use crate::transform::PixelTransform;

const HALF: Duration = Duration::from_millis(500);

fn l_chain() -> PathChain {
    [
        BezierCurve::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap(),
        BezierCurve::line(Point::new(10.0, 0.0), Point::new(10.0, 10.0)).unwrap(),
    ]
    .into_iter()
    .collect()
}

fn follower(config: FollowerConfig) -> PathFollower {
    PathFollower::new(config, Canvas::square(32), Theme::light())
        .with_transform(Arc::new(PixelTransform))
}

fn no_loop() -> FollowerConfig {
    FollowerConfig {
        looping: false,
        ..FollowerConfig::default()
    }
}

fn overlay_rebuilds(f: &PathFollower) -> u64 {
    f.renderer().unwrap().stats().overlay_rebuilds
}

#[test]
fn starts_idle_and_ignores_ticks_without_a_chain() {
    let mut f = follower(FollowerConfig::default());
    assert_eq!(f.state(), FollowState::Idle);
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.0);
    assert_eq!(f.pose(), Pose::default());
    assert!(f.renderer().is_none());
}

#[test]
fn two_segment_walkthrough_without_looping() {
    let mut f = follower(no_loop());
    f.follow_path(l_chain()).unwrap();
    assert_eq!(f.state(), FollowState::Running);

    // Warm-up ticks leave time untouched.
    f.tick(HALF).unwrap();
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.0);
    assert_eq!(f.active_segment(), None);
    assert_eq!(overlay_rebuilds(&f), 0);

    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.5);
    assert_eq!(f.active_segment(), Some(0));
    assert_eq!(overlay_rebuilds(&f), 1);
    // Eased progress 4 * 0.25^3 along a 10 unit line.
    assert!((f.pose().x - 0.625).abs() < 1e-9);
    assert!(f.pose().heading.abs() < 1e-9);

    f.tick(HALF).unwrap();
    f.tick(HALF).unwrap();
    assert_eq!(f.active_segment(), Some(0));
    assert_eq!(overlay_rebuilds(&f), 1);

    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 2.0);
    assert_eq!(f.active_segment(), Some(1));
    assert_eq!(overlay_rebuilds(&f), 2);
    assert_eq!(f.pose().position(), Point::new(10.0, 0.0));
    assert!((f.pose().heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);

    for _ in 0..3 {
        f.tick(HALF).unwrap();
    }
    assert_eq!(f.elapsed(), 3.5);
    assert_eq!(f.state(), FollowState::Running);
    let last_pose = f.pose();

    f.tick(HALF).unwrap();
    assert!(f.is_finished());
    assert_eq!(f.active_segment(), None);
    assert!(f.renderer().unwrap().overlay().is_none());
    assert_eq!(f.pose(), last_pose);

    let elapsed = f.elapsed();
    f.tick(HALF).unwrap();
    f.tick(Duration::from_secs(5)).unwrap();
    assert_eq!(f.elapsed(), elapsed);
    assert_eq!(f.pose(), last_pose);
}

#[test]
fn looping_wraps_to_the_first_segment_in_the_same_tick() {
    let config = FollowerConfig {
        skip_ticks: 0,
        ease: Ease::Linear,
        ..FollowerConfig::default()
    };
    let mut f = follower(config);
    f.follow_path(l_chain()).unwrap();

    f.tick(Duration::from_secs(3)).unwrap();
    assert_eq!(f.active_segment(), Some(1));

    f.tick(Duration::from_secs(1)).unwrap();
    assert_eq!(f.state(), FollowState::Running);
    assert_eq!(f.elapsed(), 0.0);
    assert_eq!(f.active_segment(), Some(0));
    assert_eq!(f.pose().position(), Point::new(0.0, 0.0));
}

#[test]
fn pause_freezes_time_and_resume_continues() {
    let config = FollowerConfig {
        skip_ticks: 0,
        ease: Ease::Linear,
        ..FollowerConfig::default()
    };
    let mut f = follower(config);
    f.follow_path(l_chain()).unwrap();
    f.tick(HALF).unwrap();
    let pose = f.pose();

    f.pause();
    assert!(f.is_paused());
    f.tick(HALF).unwrap();
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.5);
    assert_eq!(f.pose(), pose);

    f.resume();
    assert_eq!(f.state(), FollowState::Running);
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 1.0);
    assert!((f.pose().x - 5.0).abs() < 1e-9);
}

#[test]
fn pause_and_resume_are_noops_outside_their_states() {
    let mut f = follower(no_loop());
    f.pause();
    assert_eq!(f.state(), FollowState::Idle);
    f.resume();
    assert_eq!(f.state(), FollowState::Idle);
}

#[test]
fn follow_path_resets_progress_mid_flight() {
    let mut f = follower(FollowerConfig {
        skip_ticks: 1,
        ..FollowerConfig::default()
    });
    f.follow_path(l_chain()).unwrap();
    for _ in 0..6 {
        f.tick(HALF).unwrap();
    }
    assert_eq!(f.active_segment(), Some(1));

    f.follow_path(l_chain()).unwrap();
    assert_eq!(f.elapsed(), 0.0);
    assert_eq!(f.active_segment(), None);
    assert_eq!(f.state(), FollowState::Running);
    // Fresh renderer, fresh warm-up.
    assert_eq!(overlay_rebuilds(&f), 0);
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.0);
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.5);
}

#[test]
fn empty_chain_keeps_follower_idle() {
    let mut f = follower(FollowerConfig::default());
    f.follow_path(PathChain::empty()).unwrap();
    assert_eq!(f.state(), FollowState::Idle);
    f.tick(HALF).unwrap();
    f.tick(HALF).unwrap();
    f.tick(HALF).unwrap();
    assert_eq!(f.elapsed(), 0.0);
    assert_eq!(f.active_segment(), None);
}

#[test]
fn non_positive_segment_duration_is_degenerate() {
    let mut f = follower(FollowerConfig {
        segment_duration: 0.0,
        ..FollowerConfig::default()
    });
    f.follow_path(l_chain()).unwrap();
    assert_eq!(f.state(), FollowState::Idle);
}

#[test]
fn toggling_looping_mid_chain_changes_end_behaviour() {
    let mut f = follower(FollowerConfig {
        skip_ticks: 0,
        ..FollowerConfig::default()
    });
    f.follow_path(l_chain()).unwrap();
    f.tick(Duration::from_secs(3)).unwrap();
    f.set_looping(false);
    assert!(!f.looping());
    f.tick(Duration::from_secs(1)).unwrap();
    assert!(f.is_finished());
}

#[test]
fn clear_path_returns_to_idle() {
    let mut f = follower(FollowerConfig::default());
    f.follow_path(l_chain()).unwrap();
    f.clear_path();
    assert_eq!(f.state(), FollowState::Idle);
    assert!(f.chain().is_none());
    assert!(f.renderer().is_none());
}

#[test]
fn canvas_and_theme_changes_reach_the_renderer() {
    let mut f = follower(FollowerConfig::default());
    // Without a renderer only the stored values change.
    assert!(!f.on_canvas_resize(48, 48).unwrap());
    assert_eq!(f.canvas(), Canvas::square(48));

    f.follow_path(l_chain()).unwrap();
    assert_eq!(f.renderer().unwrap().canvas(), Canvas::square(48));

    assert!(f.on_canvas_resize(64, 40).unwrap());
    assert_eq!(f.renderer().unwrap().base().width(), 64);

    assert!(f.on_theme_change(&Theme::dark()).unwrap());
    assert_eq!(f.theme(), &Theme::dark());
    assert_eq!(f.renderer().unwrap().theme(), &Theme::dark());
    assert!(!f.on_theme_change(&Theme::dark()).unwrap());
}

#[test]
fn failed_follow_path_keeps_previous_chain() {
    let mut f = follower(FollowerConfig::default());
    f.follow_path(l_chain()).unwrap();
    let before = Arc::clone(f.chain().unwrap());

    let mut zero = PathFollower::new(FollowerConfig::default(), Canvas::new(0, 0), Theme::light());
    assert!(zero.follow_path(l_chain()).is_err());
    assert!(zero.chain().is_none());

    assert!(Arc::ptr_eq(f.chain().unwrap(), &before));
}

fn alpha_centroid_x(s: &Surface) -> f64 {
    let (mut sum, mut n) = (0.0, 0.0);
    for (i, px) in s.data().chunks_exact(4).enumerate() {
        if px[3] > 0 {
            sum += (i as u32 % s.width()) as f64 + 0.5;
            n += 1.0;
        }
    }
    sum / n
}

#[test]
fn actor_footprint_moves_with_the_pose() {
    let config = FollowerConfig {
        skip_ticks: 0,
        ease: Ease::Linear,
        actor_width: 8.0,
        actor_height: 8.0,
        ..FollowerConfig::default()
    };
    let mut f = PathFollower::new(config, Canvas::square(64), Theme::light())
        .with_transform(Arc::new(PixelTransform));
    assert!(f.actor().is_none());

    f.follow_path(
        [BezierCurve::line(Point::new(8.0, 32.0), Point::new(56.0, 32.0)).unwrap()]
            .into_iter()
            .collect::<PathChain>(),
    )
    .unwrap();

    f.tick(HALF).unwrap();
    let first = alpha_centroid_x(f.actor().unwrap());
    assert!((first - 20.0).abs() < 1.0, "centroid {first}");

    f.tick(HALF).unwrap();
    let second = alpha_centroid_x(f.actor().unwrap());
    assert!((second - 32.0).abs() < 1.0, "centroid {second}");

    let mut frame = Frame::filled(Canvas::square(64), crate::foundation::core::Rgb8::new(0, 0, 0));
    f.render(&mut frame);
    let px = frame.pixel(30, 30).unwrap();
    assert!(px[2] > px[0], "actor blue should dominate, got {px:?}");
}

#[test]
fn actor_follows_resize_and_clears_with_the_path() {
    let mut f = follower(FollowerConfig::default());
    f.follow_path(l_chain()).unwrap();
    f.on_canvas_resize(40, 24).unwrap();
    assert_eq!(f.actor().unwrap().canvas(), Canvas::new(40, 24));

    f.clear_path();
    assert!(f.actor().is_none());
}

#[test]
fn invalid_canvas_is_rejected_without_a_chain() {
    let mut f = follower(FollowerConfig::default());
    assert!(f.on_canvas_resize(0, 10).is_err());
    assert!(f.on_canvas_resize(70_000, 10).is_err());
    assert_eq!(f.canvas(), Canvas::square(32));
    f.follow_path(l_chain()).unwrap();
}
