use super::*;

fn sv(s: &str) -> StyleValue {
    StyleValue::parse(s).unwrap()
}

fn inputs(progress: &[Progress], clock_ms: f64, dt_ms: f64) -> GraphInputs<'_> {
    GraphInputs {
        progress,
        clock_ms,
        dt_ms,
    }
}

#[test]
fn single_progress_drives_independent_properties() {
    let mut g = MotionGraph::new();
    let p = g.progress(TrackId(0));
    let y = g
        .map(p, RangeMap::new(vec![0.0, 1.0], vec![sv("0%"), sv("50%")]).unwrap())
        .unwrap();
    let opacity = g
        .map(
            p,
            RangeMap::new(vec![0.0, 0.6], vec![StyleValue::number(1.0), StyleValue::number(0.0)])
                .unwrap(),
        )
        .unwrap();
    g.export("hero.y", y).unwrap();
    g.export("hero.opacity", opacity).unwrap();

    g.evaluate(&inputs(&[Progress::new(0.8)], 0.0, 16.0));
    assert_eq!(g.output("hero.y").unwrap().to_string(), "40%");
    assert_eq!(g.output("hero.opacity").unwrap().scalar(), Some(0.0));

    let names: Vec<&str> = g.outputs().map(|(n, _)| n).collect();
    assert_eq!(names, ["hero.y", "hero.opacity"]);
}

#[test]
fn spring_node_starts_on_source_then_smooths() {
    let mut g = MotionGraph::new();
    let p = g.progress(TrackId(0));
    let px = g
        .map(p, RangeMap::new(vec![0.0, 1.0], vec![sv("0px"), sv("100px")]).unwrap())
        .unwrap();
    let smooth = g.spring(px, SpringConfig::new(100.0, 30.0)).unwrap();

    g.evaluate(&inputs(&[Progress::new(0.5)], 0.0, 16.0));
    assert_eq!(g.value(smooth).unwrap().to_string(), "50px");

    g.evaluate(&inputs(&[Progress::ONE], 16.0, 16.0));
    let v = g.value(smooth).unwrap().scalar().unwrap();
    assert!(v > 50.0 && v < 100.0, "{v}");
    assert!(g.value(smooth).unwrap().to_string().ends_with("px"));
}

#[test]
fn clock_and_affine_nodes() {
    let mut g = MotionGraph::new();
    let c = g.clock();
    let half = g.affine(c, 0.5, 0.0).unwrap();
    let fade = g
        .map(
            half,
            RangeMap::new(vec![0.0, 400.0], vec![StyleValue::number(0.0), StyleValue::number(1.0)])
                .unwrap(),
        )
        .unwrap();
    g.evaluate(&inputs(&[], 400.0, 16.0));
    assert_eq!(g.value(half).unwrap().scalar(), Some(200.0));
    assert!((g.value(fade).unwrap().scalar().unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn nodes_cannot_reference_later_nodes() {
    let mut g = MotionGraph::new();
    let ghost = NodeId(3);
    assert!(g.affine(ghost, 1.0, 0.0).is_err());
    assert!(g.spring(ghost, SpringConfig::default()).is_err());
    assert!(g.export("x", ghost).is_err());
    assert!(g.is_empty());
}

#[test]
fn duplicate_exports_are_rejected() {
    let mut g = MotionGraph::new();
    let p = g.progress(TrackId(0));
    g.export("p", p).unwrap();
    assert!(g.export("p", p).is_err());
    assert_eq!(g.len(), 1);
}

#[test]
fn missing_track_reads_zero() {
    let mut g = MotionGraph::new();
    let p = g.progress(TrackId(7));
    g.evaluate(&inputs(&[Progress::ONE], 0.0, 0.0));
    assert_eq!(g.value(p).unwrap().scalar(), Some(0.0));
}

#[test]
fn spring_node_smooths_every_slot() {
    let mut g = MotionGraph::new();
    let p = g.progress(TrackId(0));
    let color = g
        .map(
            p,
            RangeMap::new(
                vec![0.0, 1.0],
                vec![sv("rgba(0, 0, 0, 0)"), sv("rgba(200, 100, 50, 1)")],
            )
            .unwrap(),
        )
        .unwrap();
    let smooth = g.spring(color, SpringConfig::new(100.0, 30.0)).unwrap();

    g.evaluate(&inputs(&[Progress::ZERO], 0.0, 16.0));
    assert_eq!(g.value(smooth).unwrap().to_string(), "rgba(0, 0, 0, 0)");

    g.evaluate(&inputs(&[Progress::ONE], 16.0, 16.0));
    let slots = g.value(smooth).unwrap().slots().to_vec();
    let full = [200.0, 100.0, 50.0, 1.0];
    for (v, end) in slots.iter().zip(full) {
        assert!(*v > 0.0 && *v < end, "{slots:?}");
    }
    // Every channel covers the same fraction of its distance.
    let frac: Vec<f64> = slots.iter().zip(full).map(|(v, end)| v / end).collect();
    for f in &frac {
        assert!((f - frac[0]).abs() < 1e-9, "{frac:?}");
    }
}
