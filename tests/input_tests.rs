// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn drag_reports_deltas_between_samples() {
    let mut drag = DragState::default();
    drag.begin(1, Vec2::new(10.0, 10.0));
    assert_eq!(drag.update(1, Vec2::new(15.0, 8.0)), Some(Vec2::new(5.0, -2.0)));
    assert_eq!(drag.update(1, Vec2::new(15.0, 8.0)), Some(Vec2::ZERO));
}

#[test]
fn drag_ignores_other_pointers_and_inactive_state() {
    let mut drag = DragState::default();
    assert_eq!(drag.update(1, Vec2::new(1.0, 1.0)), None);

    drag.begin(1, Vec2::ZERO);
    assert_eq!(drag.update(2, Vec2::new(4.0, 4.0)), None);

    // Releasing a different pointer keeps the drag alive
    drag.end(2);
    assert!(drag.active);
    drag.end(1);
    assert!(!drag.active);
    assert_eq!(drag.update(1, Vec2::new(9.0, 9.0)), None);
}

#[test]
fn origin_is_normalised_and_clamped() {
    let vp = Vec2::new(800.0, 600.0);
    assert_eq!(normalized_origin(Vec2::new(400.0, 150.0), vp), Vec2::new(0.5, 0.25));
    assert_eq!(normalized_origin(Vec2::new(-5.0, 900.0), vp), Vec2::new(0.0, 1.0));
}

#[test]
fn origin_falls_back_to_centre_for_empty_viewport() {
    assert_eq!(normalized_origin(Vec2::new(3.0, 4.0), Vec2::ZERO), Vec2::splat(0.5));
}
