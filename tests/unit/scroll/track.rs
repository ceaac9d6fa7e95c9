use super::*;

fn vp() -> Viewport {
    Viewport::new(1280.0, 800.0).unwrap()
}

#[test]
fn page_progress_is_scroll_over_scrollable_height() {
    let t = ScrollTrack::page();
    assert_eq!(t.progress(0.0, vp(), 4800.0), Progress::ZERO);
    assert_eq!(t.progress(2000.0, vp(), 4800.0).get(), 0.5);
    assert_eq!(t.progress(4000.0, vp(), 4800.0), Progress::ONE);
    assert_eq!(t.progress(9000.0, vp(), 4800.0), Progress::ONE);
    assert_eq!(t.progress(-50.0, vp(), 4800.0), Progress::ZERO);
}

#[test]
fn start_end_to_end_start_spans_full_visibility() {
    // Element 1000px tall at y=2000: enters at scroll 1200, leaves at scroll 3000.
    let t = ScrollTrack::element(
        Rect::new(0.0, 2000.0, 1280.0, 3000.0),
        [ScrollOffset::START_END, ScrollOffset::END_START],
    );
    assert_eq!(t.span(vp(), 6000.0), (1200.0, 3000.0));
    assert_eq!(t.progress(1200.0, vp(), 6000.0), Progress::ZERO);
    assert_eq!(t.progress(2100.0, vp(), 6000.0).get(), 0.5);
    assert_eq!(t.progress(3000.0, vp(), 6000.0), Progress::ONE);
}

#[test]
fn progress_is_monotonic_in_scroll() {
    let t = ScrollTrack::element(
        Rect::new(0.0, 900.0, 1280.0, 2500.0),
        [ScrollOffset::START_END, ScrollOffset::END_START],
    );
    let mut prev = Progress::ZERO;
    let mut y = -500.0;
    while y < 4000.0 {
        let p = t.progress(y, vp(), 5000.0);
        assert!(p >= prev, "progress decreased at y={y}");
        prev = p;
        y += 37.0;
    }
}

#[test]
fn degenerate_span_steps() {
    // Document shorter than the viewport: nothing to scroll.
    let t = ScrollTrack::page();
    assert_eq!(t.progress(0.0, vp(), 600.0), Progress::ONE);
    assert_eq!(t.progress(-300.0, vp(), 600.0), Progress::ZERO);
}

#[test]
fn nan_scroll_is_treated_as_top() {
    let t = ScrollTrack::page();
    assert_eq!(t.progress(f64::NAN, vp(), 4800.0), Progress::ZERO);
}

#[test]
fn offsets_parse_and_print() {
    let o: ScrollOffset = "start end".parse().unwrap();
    assert_eq!(o, ScrollOffset::START_END);
    let c: ScrollOffset = " 0.25   center ".parse().unwrap();
    assert_eq!(c.target, Edge::Fraction(0.25));
    assert_eq!(c.container, Edge::Center);
    assert_eq!(String::from(ScrollOffset::END_START), "end start");

    assert!("start".parse::<ScrollOffset>().is_err());
    assert!("start end start".parse::<ScrollOffset>().is_err());
    assert!("top bottom".parse::<ScrollOffset>().is_err());
}

#[test]
fn offsets_deserialize_from_json_strings() {
    let offs: [ScrollOffset; 2] = serde_json::from_str(r#"["start end", "end start"]"#).unwrap();
    assert_eq!(offs, [ScrollOffset::START_END, ScrollOffset::END_START]);
}
