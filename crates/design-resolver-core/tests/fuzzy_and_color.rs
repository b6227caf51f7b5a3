// crates/design-resolver-core/tests/fuzzy_and_color.rs
// ============================================================================
// Module: Fuzzy and Color Property Tests
// Description: Property tests for string similarity and perceptual distance.
// Purpose: Detect panics and bound violations across wide input ranges.
// ============================================================================

//! Property-based tests for similarity and color distance invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use design_resolver_core::Rgb;
use design_resolver_core::perceptual_distance;
use design_resolver_core::runtime::best_match;
use design_resolver_core::runtime::similarity;
use proptest::prelude::*;

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

proptest! {
    #[test]
    fn similarity_is_bounded_and_symmetric(a in ".{0,24}", b in ".{0,24}") {
        let forward = similarity(&a, &b);
        let backward = similarity(&b, &a);
        prop_assert!((0.0 ..= 1.0).contains(&forward));
        prop_assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn similarity_ignores_case_and_padding(a in "[a-zA-Z]{1,16}") {
        let padded = format!("  {}  ", a.to_uppercase());
        prop_assert!((similarity(&a, &padded) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perceptual_distance_is_symmetric_and_non_negative(a in rgb_strategy(), b in rgb_strategy()) {
        let forward = perceptual_distance(a, b);
        let backward = perceptual_distance(b, a);
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() < 1e-3);
        prop_assert!((perceptual_distance(a, a)).abs() < f64::EPSILON);
    }

    #[test]
    fn hex_form_parses_back(color in rgb_strategy()) {
        prop_assert_eq!(Rgb::from_hex(&color.to_hex()).unwrap(), color);
    }
}

#[test]
fn known_similarity_values() {
    assert!((similarity("Size", "size") - 1.0).abs() < 1e-12);
    assert!((similarity("color", "colour") - (1.0 - 1.0 / 6.0)).abs() < 1e-12);
    assert!(similarity("icon", "size") < 0.6);
}

#[test]
fn best_match_respects_threshold_and_prefers_first_on_ties() {
    let candidates = ["Variant", "Varient", "Size"];

    let found = best_match("variant", candidates, 0.6).unwrap();
    assert_eq!(found.candidate, "Variant");
    assert_eq!(found.index, 0);

    assert!(best_match("tone", candidates, 0.9).is_none());
}

#[test]
fn short_and_long_hex_forms_parse() {
    assert_eq!(Rgb::from_hex("#abc").unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
    assert_eq!(Rgb::from_hex("FE0101").unwrap(), Rgb::new(0xFE, 0x01, 0x01));
    assert!(Rgb::from_hex("#12345").is_err());
    assert!(Rgb::from_hex("#GGGGGG").is_err());
}

#[test]
fn near_identical_reds_are_close() {
    let red = Rgb::new(0xFF, 0x00, 0x00);
    assert!(perceptual_distance(red, Rgb::new(0xFE, 0x01, 0x01)) < 2.0);
    assert!(perceptual_distance(red, Rgb::new(0x00, 0x00, 0xFF)) > 10.0);
}
