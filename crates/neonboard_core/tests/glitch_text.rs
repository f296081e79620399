use neonboard_core::animation::seeded_rng;
use neonboard_core::effects::glitch::{GlitchConfig, GlitchText};
use neonboard_core::effects::surface::{MemoryTextSurface, Transform};

const TITLE: &str = "CYBER DASH";

fn always_glitch() -> GlitchConfig {
    GlitchConfig {
        intensity: 1.0,
        trigger_probability: 1.0,
        ..GlitchConfig::default()
    }
}

#[test]
fn mount_renders_original_text() {
    let mut surface = MemoryTextSurface::new();
    let glitch = GlitchText::mount(TITLE, GlitchConfig::default(), &mut surface, 0).expect("mount");
    assert_eq!(surface.text, TITLE);
    assert_eq!(surface.transform, Transform::IDENTITY);
    assert!(!glitch.is_glitching());
}

#[test]
fn every_completed_cycle_restores_the_original() {
    let mut surface = MemoryTextSurface::new();
    let mut rng = seeded_rng(12);
    let mut glitch = GlitchText::mount(TITLE, always_glitch(), &mut surface, 0).expect("mount");

    let mut saw_scrambled = false;
    for now in (0..=30_000).step_by(16) {
        glitch.update(now, &mut surface, &mut rng);
        if glitch.is_glitching() {
            saw_scrambled |= surface.text != TITLE;
            assert_eq!(surface.text.chars().count(), TITLE.chars().count());
        } else {
            assert_eq!(surface.text, TITLE);
            assert!(surface.transform.is_identity());
        }
    }
    glitch.update(30_500, &mut surface, &mut rng);

    assert!(saw_scrambled);
    assert_eq!(glitch.cycles_completed(), 10);
    assert_eq!(glitch.displayed_text(), TITLE);
    assert_eq!(surface.text, TITLE);
    assert_eq!(surface.transform, Transform::IDENTITY);
}

#[test]
fn distortion_stays_within_five_units() {
    let mut surface = MemoryTextSurface::new();
    let mut rng = seeded_rng(13);
    let mut glitch = GlitchText::mount(TITLE, always_glitch(), &mut surface, 0).expect("mount");

    for cycle in 0..20_u64 {
        let start = cycle * 1_000;
        assert!(glitch.trigger(start, &mut surface, &mut rng));
        for now in (start..start + 400).step_by(10) {
            glitch.update(now, &mut surface, &mut rng);
            let t = surface.transform;
            for value in [t.x, t.y, t.skew_x, t.skew_y] {
                assert!(value.abs() <= 5.0);
            }
        }
    }
}

#[test]
fn trigger_is_ignored_while_a_cycle_runs() {
    let mut surface = MemoryTextSurface::new();
    let mut rng = seeded_rng(14);
    let mut glitch = GlitchText::mount(TITLE, always_glitch(), &mut surface, 0).expect("mount");

    assert!(glitch.trigger(0, &mut surface, &mut rng));
    let scrambled = surface.text.clone();
    assert!(!glitch.trigger(100, &mut surface, &mut rng));
    assert!(!glitch.click(300, &mut surface, &mut rng));
    assert_eq!(surface.text, scrambled);

    // Distort 0..200, restore 200..400; idle again at 400.
    assert!(glitch.trigger(400, &mut surface, &mut rng));
    assert_eq!(glitch.cycles_completed(), 1);
}

#[test]
fn zero_probability_never_glitches_on_its_own() {
    let mut surface = MemoryTextSurface::new();
    let mut rng = seeded_rng(15);
    let mut glitch = GlitchText::mount(
        TITLE,
        GlitchConfig {
            trigger_probability: 0.0,
            ..GlitchConfig::default()
        },
        &mut surface,
        0,
    )
    .expect("mount");

    for now in (0..=60_000).step_by(100) {
        glitch.update(now, &mut surface, &mut rng);
        assert!(!glitch.is_glitching());
    }
    assert_eq!(surface.text_writes, 1);
    assert_eq!(glitch.cycles_completed(), 0);
}

#[test]
fn unmount_mid_cycle_restores_and_stops() {
    let mut surface = MemoryTextSurface::new();
    let mut rng = seeded_rng(16);
    let mut glitch = GlitchText::mount(TITLE, always_glitch(), &mut surface, 0).expect("mount");

    assert!(glitch.trigger(0, &mut surface, &mut rng));
    glitch.update(100, &mut surface, &mut rng);
    glitch.unmount(&mut surface);

    assert!(!glitch.is_mounted());
    assert_eq!(surface.text, TITLE);
    assert_eq!(surface.transform, Transform::IDENTITY);

    let writes = surface.text_writes;
    glitch.update(60_000, &mut surface, &mut rng);
    assert!(!glitch.trigger(60_000, &mut surface, &mut rng));
    assert_eq!(surface.text_writes, writes);
}
