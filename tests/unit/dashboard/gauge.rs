use super::*;

#[test]
fn label_steps_after_index_delay() {
    let g = Gauge::new(88.0, 2).unwrap();
    assert_eq!(g.displayed_level(0.0), 0.0);
    assert_eq!(g.displayed_level(399.0), 0.0);
    assert_eq!(g.displayed_level(400.0), 88.0);
    assert_eq!(Gauge::new(95.0, 0).unwrap().displayed_level(0.0), 95.0);
}

#[test]
fn bar_waits_for_both_delays() {
    let g = Gauge::new(80.0, 3).unwrap();
    // Label steps at 600 ms, bar starts at 1200 ms.
    assert_eq!(g.bar_width(600.0), 0.0);
    assert_eq!(g.bar_width(1200.0), 0.0);
    assert!(g.bar_width(1300.0) > 0.0);
    assert_eq!(g.bar_width(1200.0 + 1500.0), 80.0);
    assert_eq!(g.bar_width(10_000.0), 80.0);
}

#[test]
fn bar_eases_out() {
    let g = Gauge::new(100.0, 0).unwrap();
    // Past the linear midpoint at half time.
    assert!(g.bar_width(750.0) > 50.0);
    let r = g.reading(750.0);
    assert_eq!(r.level, 100.0);
    assert_eq!(r.width, g.bar_width(750.0));
}

#[test]
fn gauge_rejects_out_of_range_level() {
    assert!(Gauge::new(101.0, 0).is_err());
    assert!(Gauge::new(-1.0, 0).is_err());
    assert!(Gauge::new(f64::NAN, 0).is_err());
}

#[test]
fn needle_sweeps_from_left_stop() {
    let s = Speedometer::new(95.0, 100.0).unwrap();
    assert!((s.target_deg() - 81.0).abs() < 1e-9);
    assert_eq!(s.needle_deg(0.0), -90.0);
    assert!((s.needle_deg(2000.0) - 81.0).abs() < 1e-9);
    let mid = s.needle_deg(1000.0);
    assert!(mid > (-90.0 + 81.0) / 2.0 && mid < 81.0);
}

#[test]
fn speedometer_rejects_non_positive_max() {
    assert!(Speedometer::new(10.0, 0.0).is_err());
    assert!(Speedometer::new(10.0, -5.0).is_err());
    assert!(Speedometer::new(f64::INFINITY, 100.0).is_err());
}
