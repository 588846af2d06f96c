//! Color allocation behavior across the fixed, rotating and unique policies.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use vizscene::prelude::*;

fn abc_palette() -> ColorPalette {
    ColorPalette::new(vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE]).with_default_assigned(Rgba::PINK)
}

#[test]
fn test_unique_keys_get_distinct_colors_until_exhausted() {
    let mut colorer = Colorer::default();
    let scheme = colorer.fresh_palette();

    let colors: HashSet<_> = (0..scheme.len())
        .map(|i| colorer.unique_assign(&format!("key-{i}"), MAIN_POOL))
        .collect();

    assert_eq!(colors.len(), scheme.len());
    assert_eq!(colorer.unique_next(MAIN_POOL), None);
    assert_eq!(colorer.unique_available(MAIN_POOL), 0);
}

#[test]
fn test_reset_set_restores_first_color() {
    let mut colorer = Colorer::new(abc_palette());
    let first = colorer.unique_next(MAIN_POOL);

    colorer.unique_assign("A", MAIN_POOL);
    colorer.unique_assign("B", MAIN_POOL);
    colorer.unique_unassign("A", MAIN_POOL);
    colorer.unique_reset_set(MAIN_POOL);

    assert_eq!(colorer.unique_next(MAIN_POOL), first);
    assert_eq!(colorer.unique_available(MAIN_POOL), 3);
    assert_eq!(colorer.unique("B", MAIN_POOL), None);
}

#[test]
fn test_exhaustion_falls_back_then_recycles() {
    let mut colorer = Colorer::new(abc_palette());

    assert_eq!(colorer.unique_assign("A", MAIN_POOL), Rgba::RED);
    assert_eq!(colorer.unique_assign("B", MAIN_POOL), Rgba::GREEN);
    assert_eq!(colorer.unique_assign("C", MAIN_POOL), Rgba::BLUE);
    assert_eq!(colorer.unique_assign("D", MAIN_POOL), Rgba::PINK);

    assert_eq!(colorer.unique_unassign("B", MAIN_POOL), Some(Rgba::GREEN));
    assert_eq!(colorer.unique_next(MAIN_POOL), Some(Rgba::GREEN));

    colorer.unique_unassign("D", MAIN_POOL);
    assert_eq!(colorer.unique_available(MAIN_POOL), 1, "Fallback color is never queued");
    assert_eq!(colorer.unique_assign("E", MAIN_POOL), Rgba::GREEN);
}

#[test]
fn test_pools_are_independent() {
    let mut colorer = Colorer::new(abc_palette());

    assert_eq!(colorer.unique_assign("A", "series"), Rgba::RED);
    assert_eq!(colorer.unique_assign("A", "legend"), Rgba::RED);
    colorer.unique_reset_set("series");
    assert_eq!(colorer.unique("A", "legend"), Some(Rgba::RED));
    assert_eq!(colorer.unique_or_unassigned("A", "series"), Rgba::WHITE);
}

#[test]
fn test_rotating_stays_in_scheme_and_caches() {
    let mut colorer = Colorer::new(abc_palette());
    let scheme: HashSet<_> = colorer.fresh_palette().into_iter().collect();

    let first = colorer.rotating_color("k0");
    for i in 1..10 {
        assert!(scheme.contains(&colorer.rotating_color(&format!("k{i}"))));
    }

    assert!(colorer.rotating().refills() >= 3);
    assert_eq!(colorer.rotating_color("k0"), first);
    assert_eq!(colorer.rotating_color("k3"), Rgba::RED, "Refill keeps scheme order");
}

#[test]
fn test_fixed_is_case_insensitive() {
    let mut colorer = Colorer::new(abc_palette().with_fixed("ruby", Rgba::from_hex("#cc342d").unwrap()));

    assert_eq!(colorer.fixed("Ruby"), colorer.fixed("ruby"));
    assert_eq!(colorer.fixed("RUBY").to_hex(), "#cc342d");
    assert!(colorer.rotating().is_empty(), "Fixed entries bypass rotation");

    assert_eq!(colorer.fixed("Go"), colorer.fixed("go"));
    assert_eq!(colorer.rotating().len(), 1);
}

#[test]
fn test_set_palette_resets_assignments() {
    let mut colorer = Colorer::new(abc_palette());
    colorer.unique_assign("A", MAIN_POOL);
    colorer.rotating_color("x");

    colorer.set_palette(ColorPalette::new(vec![Rgba::BLACK]));

    assert_eq!(colorer.unique("A", MAIN_POOL), None);
    assert!(colorer.rotating().is_empty());
    assert_eq!(colorer.unique_assign("A", MAIN_POOL), Rgba::BLACK);
}
