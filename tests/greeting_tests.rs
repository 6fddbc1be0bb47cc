// Host-side tests for the overlay schedule, confetti physics and music toggle.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rose_core::confetti::{ConfettiField, ConfettiOptions, PetalRain, RAIN_INTERVAL};
use rose_core::overlay::{recipient_name, GreetingScript, TextKind, IMAGE_TIMING};
use rose_core::playback::{Playback, PlaybackCommand};

#[test]
fn reveals_are_hidden_before_delay_and_settled_after() {
    let script = GreetingScript::default();
    for (i, item) in script.items.iter().enumerate() {
        let t = item.timing;
        assert_eq!(script.reveal(i, t.delay - 0.01).opacity, 0.0);
        assert_eq!(script.reveal(i, t.delay).opacity, 0.0);
        let done = script.reveal(i, t.end() + 0.01);
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.offset_y, 0.0);
        assert!(done.is_settled());
    }
}

#[test]
fn reveal_opacity_is_monotonic() {
    let script = GreetingScript::default();
    for i in 0..script.len() {
        let mut last = 0.0;
        for step in 0..=1200 {
            let o = script.reveal(i, step as f32 * 0.01).opacity;
            assert!(o >= last - 1e-4, "item {i} step {step}: {o} < {last}");
            last = o;
        }
    }
}

#[test]
fn title_slides_down_and_messages_rise() {
    let script = GreetingScript::default();
    assert_eq!(script.items[0].kind, TextKind::Title);
    let title = script.reveal(0, 0.6);
    assert!(title.offset_y < 0.0 && title.offset_y > -20.0);
    let message = script.reveal(1, 2.6);
    assert!(message.offset_y > 0.0 && message.offset_y < 20.0);
}

#[test]
fn personal_script_rains_when_the_closing_line_lands() {
    let script = GreetingScript::personal("Ada");
    assert!(script.items[0].text.contains("Ada"));
    assert_eq!(script.rain_at(), Some(10.0));
    assert!(!script.rain_due(9.99));
    assert!(script.rain_due(10.0));
    assert_eq!(script.finished_at(), 10.0);
}

#[test]
fn unknown_variant_falls_back_to_personal() {
    let script = GreetingScript::by_name(Some("sonnet"), "Ada");
    assert_eq!(script, GreetingScript::personal("Ada"));
}

#[test]
fn recipient_names_are_capped() {
    let long = "x".repeat(100);
    assert_eq!(recipient_name(Some(&long)).chars().count(), 40);
    assert_eq!(recipient_name(Some("A\u{7}da")), "Ada");
}

#[test]
fn gift_image_rises_into_place() {
    assert_eq!(IMAGE_TIMING.reveal(1.0).offset_y, 50.0);
    assert_eq!(IMAGE_TIMING.reveal(3.0).offset_y, 0.0);
}

#[test]
fn petal_rain_starts_once_and_tapers_off() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut rain = PetalRain::new();
    assert!(rain.tick(1.0, &mut rng).is_empty(), "idle rain emits nothing");

    assert!(rain.start(10.0));
    assert!(!rain.start(11.0));
    assert!(rain.is_active());

    let mut counts = Vec::new();
    let mut now = 10.0;
    while now < 16.0 {
        now += RAIN_INTERVAL;
        let bursts = rain.tick(now, &mut rng);
        if now < 15.0 {
            assert_eq!(bursts.len(), 2, "at {now}");
            assert!(bursts[0].origin.x >= 0.1 && bursts[0].origin.x < 0.3);
            assert!(bursts[1].origin.x >= 0.7 && bursts[1].origin.x < 0.9);
            assert!(bursts[0].drift > 0.0 && bursts[1].drift < 0.0);
            assert_eq!(bursts[0].count(), bursts[1].count());
            counts.push(bursts[0].count());
        } else {
            assert!(bursts.is_empty(), "at {now}");
        }
    }
    assert_eq!(counts.len(), 19);
    assert!(counts.windows(2).all(|w| w[1] <= w[0]));
    assert!(counts[0] < 50);
    assert!(!rain.is_active());
}

#[test]
fn rain_between_intervals_is_quiet() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut rain = PetalRain::new();
    rain.start(0.0);
    assert!(rain.tick(0.1, &mut rng).is_empty());
    assert_eq!(rain.tick(0.25, &mut rng).len(), 2);
    assert!(rain.tick(0.3, &mut rng).is_empty());
}

#[test]
fn confetti_particles_fade_and_expire() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut field = ConfettiField::new();
    let opts = ConfettiOptions::click_burst(Vec2::new(0.5, 0.5));
    field.fire(&opts, Vec2::new(800.0, 600.0), &mut rng);
    assert_eq!(field.len(), 15);
    assert!(field
        .particles()
        .iter()
        .all(|p| p.position == Vec2::new(400.0, 300.0)));

    let mut last_alpha = 1.0;
    for _ in 0..opts.ticks - 1 {
        field.tick(&mut rng);
        let alpha = field.particles()[0].alpha();
        assert!(alpha < last_alpha);
        last_alpha = alpha;
    }
    assert_eq!(field.len(), 15);
    field.tick(&mut rng);
    assert!(field.is_empty());
}

#[test]
fn advance_runs_whole_ticks_only() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = ConfettiField::new();
    assert_eq!(field.advance(0.5 / 60.0, &mut rng), 0);
    assert_eq!(field.advance(0.6 / 60.0, &mut rng), 1);
    // A long stall is capped at a handful of ticks
    let steps = field.advance(10.0, &mut rng);
    assert!((3..=4).contains(&steps), "{steps}");
    assert_eq!(field.advance(f32::NAN, &mut rng), 0);
}

#[test]
fn blocked_autoplay_leaves_music_paused() {
    let mut p = Playback::new();
    p.on_autoplay(false);
    assert!(!p.is_playing());
    assert_eq!(p.aria_label(), "Play music");

    assert_eq!(p.toggle(), PlaybackCommand::Play);
    assert!(p.is_playing());
    assert_eq!(p.aria_label(), "Mute music");

    assert_eq!(p.toggle(), PlaybackCommand::Pause);
    assert!(!p.is_playing());
}

#[test]
fn rejected_play_reverts_to_paused() {
    let mut p = Playback::new();
    p.on_autoplay(true);
    assert!(p.is_playing());
    assert_eq!(p.toggle(), PlaybackCommand::Pause);
    assert_eq!(p.toggle(), PlaybackCommand::Play);
    p.on_play_rejected();
    assert!(!p.is_playing());
    assert_ne!(p.icon(), "");
}
