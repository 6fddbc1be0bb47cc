// Host-side tests for the web tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct_and_non_empty() {
    let ids = [
        ROSE_CANVAS_ID,
        CONFETTI_CANVAS_ID,
        OVERLAY_ID,
        AUDIO_TOGGLE_ID,
        GIFT_IMAGE_ID,
        PLACEHOLDER_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "id {a:?} must be a single token");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn gift_image_is_served_over_https() {
    assert!(GIFT_IMAGE_URL.starts_with("https://"));
    assert!(GIFT_IMAGE_URL.ends_with(".gif"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_step_cap_is_a_fraction_of_a_second() {
    assert!(MAX_FRAME_DT > 1.0 / 60.0);
    assert!(MAX_FRAME_DT < 1.0);
}

#[test]
fn query_keys_differ() {
    assert_ne!(QUERY_RECIPIENT, QUERY_GREETING);
}
