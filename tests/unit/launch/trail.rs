use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn site_trail_has_twelve_lines_and_six_puffs() {
    let trail = LaunchTrail::site_default().unwrap();
    let f = trail.sample(0.0);
    assert_eq!(f.speed_lines.len(), SPEED_LINE_COUNT);
    assert_eq!(f.dust.len(), DUST_COUNT);
    assert!(!f.is_empty());
    assert!(TrailFrame::default().is_empty());
}

#[test]
fn everything_starts_invisible_at_its_first_keyframe() {
    let f = LaunchTrail::site_default().unwrap().sample(0.0);
    for s in &f.speed_lines {
        assert_eq!(*s, Streak { x: -50.0, opacity: 0.0 });
    }
    for d in &f.dust {
        assert_eq!(
            *d,
            DustPuff {
                x: -10.0,
                y: 0.0,
                opacity: 0.0,
                scale: 0.5
            }
        );
    }
}

#[test]
fn speed_lines_are_staggered_by_thirty_ms() {
    let f = LaunchTrail::site_default().unwrap().sample(100.0);
    // Line 0 is halfway through its pass, line 1 started 30 ms later.
    assert!(close(f.speed_lines[0].x, -85.0));
    assert!(close(f.speed_lines[0].opacity, 1.0));
    assert!(close(f.speed_lines[1].x, -74.5));
    assert!(close(f.speed_lines[1].opacity, 0.7));
    // Line 4 has not started yet.
    assert_eq!(f.speed_lines[4], Streak { x: -50.0, opacity: 0.0 });
}

#[test]
fn dust_is_staggered_by_a_hundred_ms() {
    let f = LaunchTrail::site_default().unwrap().sample(500.0);
    // Puff 1 is 400 ms into its 800 ms pass: the middle keyframe.
    assert!(close(f.dust[1].x, -35.0));
    assert!(close(f.dust[1].y, -20.0));
    assert!(close(f.dust[1].opacity, 0.8));
    assert!(close(f.dust[1].scale, 1.0));
    assert_eq!(f.dust[5].opacity, 0.0);
}

#[test]
fn passes_repeat_forever() {
    let trail = LaunchTrail::site_default().unwrap();
    let a = trail.sample(50.0);
    let b = trail.sample(250.0);
    assert!(close(a.speed_lines[0].x, b.speed_lines[0].x));
    assert!(close(a.speed_lines[0].opacity, b.speed_lines[0].opacity));

    let c = trail.sample(300.0);
    let d = trail.sample(1100.0);
    assert!(close(c.dust[0].y, d.dust[0].y));
}
