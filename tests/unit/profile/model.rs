use super::*;

fn parse(json: &str) -> ScuderiaResult<Profile> {
    Profile::from_reader(json.as_bytes())
}

#[test]
fn site_default_validates() {
    let p = Profile::site_default().unwrap();
    p.validate().unwrap();
    assert_eq!(p.presentation.theme, Theme::Dark);
    assert_eq!(p.launch.duration_ms, 4500.0);
    assert_eq!(p.contact.submit_delay_ms, 2000.0);
    assert_eq!(p.properties[0].name, "hero.y");
    assert_eq!(p.properties[0].track_name(), Some("page"));
}

#[test]
fn minimal_document_fills_defaults() {
    let p = parse(r#"{ "tracks": {}, "properties": [] }"#).unwrap();
    p.validate().unwrap();
    assert_eq!(p.fps, Fps::default());
    assert_eq!(p.document_height, 4000.0);
    assert_eq!(p.seed, 0);
    assert!(p.carousel.is_none());
    assert_eq!(p.assets, AssetManifest::default());
}

#[test]
fn tracks_parse_offsets_and_targets() {
    let p = parse(
        r#"{
            "tracks": {
                "projects": {
                    "target": { "x0": 0, "y0": 2000, "x1": 1280, "y1": 3000 },
                    "offset": ["start end", "end start"]
                },
                "whole": {}
            },
            "properties": [
                { "name": "p.opacity", "track": "projects", "input": [0, 1], "output": [0, 1] }
            ]
        }"#,
    )
    .unwrap();
    p.validate().unwrap();
    let t = p.tracks["projects"].track();
    assert_eq!(t.offsets, [ScrollOffset::START_END, ScrollOffset::END_START]);
    assert_eq!(t.target, Some(Rect::new(0.0, 2000.0, 1280.0, 3000.0)));
    assert_eq!(p.tracks["whole"].track(), ScrollTrack::page());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = parse(r#"{ "tracks": {}, "properties": [], "colour": "red" }"#).unwrap_err();
    assert!(matches!(err, ScuderiaError::Serde(_)));
    let err = parse(r#"{ "tracks": {}, "properties": [], "launch": { "speed": 1 } }"#).unwrap_err();
    assert!(err.to_string().contains("speed"));
}

#[test]
fn property_errors_name_the_property() {
    let cases = [
        (
            r#"{ "name": "a", "track": "nope", "input": [0, 1], "output": [0, 1] }"#,
            "unknown track",
        ),
        (
            r#"{ "name": "a", "track": "page", "clock": true, "input": [0, 1], "output": [0, 1] }"#,
            "both clock and track",
        ),
        (
            r#"{ "name": "a", "input": [0, 1], "output": ["0%", "5px"] }"#,
            "property 'a'",
        ),
        (
            r#"{ "name": "a", "input": [1, 0], "output": [0, 1] }"#,
            "property 'a'",
        ),
    ];
    for (prop, needle) in cases {
        let json = format!(r#"{{ "tracks": {{}}, "properties": [{prop}] }}"#);
        let err = parse(&json).unwrap().validate().unwrap_err();
        assert!(err.to_string().contains(needle), "{err} / {needle}");
    }
}

#[test]
fn duplicate_property_names_are_rejected() {
    let json = r#"{ "tracks": {}, "properties": [
        { "name": "a", "input": [0, 1], "output": [0, 1] },
        { "name": "a", "input": [0, 1], "output": [1, 0] }
    ] }"#;
    let err = parse(json).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("declared twice"));
}

#[test]
fn page_track_name_is_reserved() {
    let json = r#"{ "tracks": { "page": {} }, "properties": [] }"#;
    assert!(parse(json).unwrap().validate().is_err());
}

#[test]
fn nested_sections_are_validated() {
    let mut p = Profile::site_default().unwrap();
    p.launch.max_speed = 1.0;
    assert!(p.validate().is_err());

    let mut p = Profile::site_default().unwrap();
    p.dashboard.speedometers[0].max = 0.0;
    assert!(p.validate().is_err());

    let mut p = Profile::site_default().unwrap();
    p.carousel = Some(CarouselDef {
        period_ms: 3000.0,
        len: 0,
    });
    assert!(p.validate().is_err());
}

#[test]
fn clock_properties_have_no_track() {
    let json = r#"{ "tracks": {}, "properties": [
        { "name": "pulse", "clock": true, "scale": { "factor": 0.001 },
          "input": [0, 1], "output": [1, 1.2] }
    ] }"#;
    let p = parse(json).unwrap();
    p.validate().unwrap();
    assert_eq!(p.properties[0].track_name(), None);
    assert_eq!(p.properties[0].scale.unwrap().offset, 0.0);
}
