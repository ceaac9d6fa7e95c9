use super::*;

#[test]
fn cue_fades_in_after_the_hero_settles() {
    let cue = ScrollCueMotion::site_default().unwrap();
    assert_eq!(cue.sample(0.0).opacity, 0.0);
    assert_eq!(cue.sample(1500.0).opacity, 0.0);
    assert!((cue.sample(1750.0).opacity - 0.5).abs() < 1e-12);
    assert_eq!(cue.sample(2000.0).opacity, 1.0);
    assert_eq!(cue.sample(60_000.0).opacity, 1.0);
}

#[test]
fn cue_bounces_every_one_and_a_half_seconds() {
    let cue = ScrollCueMotion::site_default().unwrap();
    assert_eq!(cue.sample(0.0).y, 0.0);
    assert_eq!(cue.sample(750.0).y, 10.0);
    assert_eq!(cue.sample(3000.0).y, 0.0);
    assert_eq!(cue.sample(3750.0).y, 10.0);
    assert!(cue.sample(375.0).y > 0.0 && cue.sample(375.0).y < 10.0);
}
