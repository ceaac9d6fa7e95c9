use super::*;
use crate::launch::profile::AccelCurve;

fn run_to(seq: &mut LaunchSequence, from_ms: f64, to_ms: f64, step_ms: f64) -> Vec<Kinematics> {
    let mut out = Vec::new();
    let steps = ((to_ms - from_ms) / step_ms).round() as u64;
    for i in 0..=steps {
        out.push(seq.tick(from_ms + i as f64 * step_ms));
    }
    out
}

#[test]
fn idle_tick_does_nothing() {
    let mut seq = LaunchSequence::new(LaunchProfile::default()).unwrap();
    assert_eq!(seq.tick(1234.0), Kinematics::default());
    assert_eq!(seq.phase(), LaunchPhase::Idle);
    assert!(seq.start_visible());
}

#[test]
fn full_run_then_cooldown_then_reset() {
    for curve in [
        LaunchProfile::default().curve,
        AccelCurve::EaseOutCubic,
    ] {
        let profile = LaunchProfile {
            curve,
            ..LaunchProfile::default()
        };
        let mut seq = LaunchSequence::new(profile).unwrap();
        seq.start(1000.0).unwrap();
        assert!(!seq.start_visible());
        assert!(seq.is_rolling());

        let frames = run_to(&mut seq, 1000.0, 5500.0, 10.0);
        for w in frames.windows(2) {
            assert!(w[1].rotation_deg >= w[0].rotation_deg);
            assert!(w[1].position >= w[0].position);
            assert!(w[1].velocity <= profile.max_speed);
            assert!((0.0..=1.0).contains(&w[1].engine_intensity));
        }

        let end = seq.kinematics();
        assert_eq!(end.position, 120.0);
        assert_eq!(end.velocity, 0.0);
        assert_eq!(end.progress, 1.0);
        assert!((end.rotation_deg - 120.0 / 6.0 * 360.0).abs() < 1e-6);
        assert_eq!(seq.phase(), LaunchPhase::Cooldown { until_ms: 7500.0 });
        assert!(!seq.is_rolling());

        assert_eq!(seq.tick(7499.0).position, 120.0);
        assert!(matches!(seq.phase(), LaunchPhase::Cooldown { .. }));

        assert_eq!(seq.tick(7500.0), Kinematics::default());
        assert_eq!(seq.phase(), LaunchPhase::Idle);
        assert!(seq.start_visible());
    }
}

#[test]
fn start_while_active_is_rejected_without_side_effects() {
    let mut seq = LaunchSequence::new(LaunchProfile::default()).unwrap();
    seq.start(0.0).unwrap();
    seq.tick(1000.0);
    let before = (seq.phase(), seq.kinematics());

    assert!(seq.start(1500.0).is_err());
    assert_eq!((seq.phase(), seq.kinematics()), before);

    seq.tick(4500.0);
    assert!(matches!(seq.phase(), LaunchPhase::Cooldown { .. }));
    assert!(seq.start(5000.0).is_err());

    seq.tick(6500.0);
    seq.start(7000.0).unwrap();
    assert_eq!(seq.phase(), LaunchPhase::Running { started_at_ms: 7000.0 });
    assert_eq!(seq.kinematics(), Kinematics::default());
}

#[test]
fn completion_happens_once_even_with_coarse_frames() {
    let mut seq = LaunchSequence::new(LaunchProfile::default()).unwrap();
    seq.start(0.0).unwrap();
    // A single late frame jumps straight past the end of the run.
    let k = seq.tick(10_000.0);
    assert_eq!(k.position, 120.0);
    assert_eq!(seq.phase(), LaunchPhase::Cooldown { until_ms: 12_000.0 });
    // Still cooling down; the finished pose is held.
    assert_eq!(seq.tick(11_000.0).position, 120.0);
}

#[test]
fn clock_going_backwards_never_reduces_position() {
    let mut seq = LaunchSequence::new(LaunchProfile::default()).unwrap();
    seq.start(0.0).unwrap();
    let a = seq.tick(2000.0);
    let b = seq.tick(1500.0);
    assert!(b.position >= a.position);
    assert!(b.rotation_deg >= a.rotation_deg);
}

#[test]
fn non_finite_times_are_ignored() {
    let mut seq = LaunchSequence::new(LaunchProfile::default()).unwrap();
    assert!(seq.start(f64::NAN).is_err());
    seq.start(0.0).unwrap();
    let k = seq.tick(f64::INFINITY);
    assert_eq!(k, Kinematics::default());
}

#[test]
fn effects_follow_rolling_state() {
    let mut seq = LaunchSequence::new(LaunchProfile::default()).unwrap();
    assert!(!seq.effects().rolling);
    seq.start(0.0).unwrap();
    seq.tick(2000.0);
    let fx = seq.effects();
    assert!(fx.rolling);
    assert!(fx.speed_line_height_px > 8.0);
}
