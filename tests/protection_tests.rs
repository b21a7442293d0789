#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use fogwalk::simulation::protection::{Anchor, AnchorKind, ProtectionRegistry};

fn protected_map(registry: &ProtectionRegistry, width: usize) -> Vec<bool> {
    (0..width)
        .flat_map(|i| (0..width).map(move |j| (i, j)))
        .map(|cell| registry.is_protected(cell))
        .collect()
}

#[test]
fn test_protection_radius_is_inclusive() {
    let mut registry = ProtectionRegistry::new();
    registry.place(Anchor::campfire((5, 5), 2.0));

    assert!(registry.is_protected((5, 5)));
    assert!(registry.is_protected((5, 7)));
    assert!(registry.is_protected((3, 5)));
    // (6, 6) is at distance ~1.41
    assert!(registry.is_protected((6, 6)));
    // (7, 7) is at distance ~2.83
    assert!(!registry.is_protected((7, 7)));
    assert!(!registry.is_protected((5, 8)));
}

#[test]
fn test_toggle_campfire_twice_restores_state() {
    let mut registry = ProtectionRegistry::new();
    registry.place(Anchor::structure((2, 2), 1.0));
    registry.place(Anchor::campfire((8, 8), 3.0));
    let before = protected_map(&registry, 12);

    assert!(registry.toggle_campfire((5, 5), 3.0));
    assert!(registry.has_campfire((5, 5)));
    assert_ne!(protected_map(&registry, 12), before);

    assert!(!registry.toggle_campfire((5, 5), 3.0));
    assert!(!registry.has_campfire((5, 5)));
    assert_eq!(protected_map(&registry, 12), before);
    assert_eq!(registry.campfires().count(), 1);
}

#[test]
fn test_remove_missing_campfire_is_noop() {
    let mut registry = ProtectionRegistry::new();
    registry.place(Anchor::campfire((1, 1), 1.0));

    assert!(!registry.remove((4, 4)));
    assert_eq!(registry.len(), 1);
    assert!(registry.is_protected((1, 1)));
}

#[test]
fn test_structures_cannot_be_removed() {
    let mut registry = ProtectionRegistry::new();
    registry.place(Anchor::structure((3, 3), 1.0));

    assert!(!registry.remove((3, 3)));
    assert!(registry.is_protected((3, 3)));

    // toggling at a structure anchor only adds a campfire on top of it
    assert!(registry.toggle_campfire((3, 3), 1.0));
    assert!(!registry.toggle_campfire((3, 3), 1.0));
    assert!(registry.is_protected((3, 3)));
    assert_eq!(registry.structures().count(), 1);
    assert!(
        registry
            .structures()
            .all(|anchor| anchor.kind == AnchorKind::Structure)
    );
}

#[test]
fn test_campfire_coverage_excludes_structures() {
    let mut registry = ProtectionRegistry::new();
    registry.place(Anchor::structure((3, 3), 2.0));
    registry.place(Anchor::campfire((9, 9), 1.0));

    assert!(registry.is_protected((3, 4)));
    assert!(!registry.is_campfire_covered((3, 4)));
    assert!(registry.is_campfire_covered((9, 10)));
}

#[test]
fn test_placing_same_campfire_replaces_it() {
    let mut registry = ProtectionRegistry::new();
    registry.place(Anchor::campfire((4, 4), 1.0));
    registry.place(Anchor::campfire((4, 4), 3.0));

    assert_eq!(registry.campfires().count(), 1);
    assert!(registry.is_protected((4, 7)));
}
