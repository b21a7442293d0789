//! Protection registry: exclusion zones that veto any cell update.
//!
//! Campfires can be toggled while the simulation runs. Structures are fixed at
//! initialisation and can never be removed.

use serde::{Deserialize, Serialize};

use super::geometric_utils::{Cell, cell_distance};

/// Kind of protection anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorKind {
    /// Placed and removed by the player.
    Campfire,
    /// Placed once at initialisation; permanent.
    Structure,
}

/// A coordinate with an exclusion radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Centre of the protected disc.
    pub cell: Cell,
    /// Cells at distance `<= radius` are protected.
    pub radius: f64,
    /// Campfire or structure.
    pub kind: AnchorKind,
}

impl Anchor {
    /// Creates a campfire anchor.
    pub fn campfire(cell: Cell, radius: f64) -> Self {
        Self {
            cell,
            radius,
            kind: AnchorKind::Campfire,
        }
    }

    /// Creates a structure anchor.
    pub fn structure(cell: Cell, radius: f64) -> Self {
        Self {
            cell,
            radius,
            kind: AnchorKind::Structure,
        }
    }

    /// Whether `cell` lies inside this anchor's disc.
    #[inline]
    pub fn covers(&self, cell: Cell) -> bool {
        cell_distance(self.cell, cell) <= self.radius
    }
}

/// Set of live protection anchors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtectionRegistry {
    campfires: Vec<Anchor>,
    structures: Vec<Anchor>,
}

impl ProtectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an anchor. A campfire already present at the same cell is replaced.
    pub fn place(&mut self, anchor: Anchor) {
        match anchor.kind {
            AnchorKind::Campfire => {
                self.campfires.retain(|a| a.cell != anchor.cell);
                self.campfires.push(anchor);
            }
            AnchorKind::Structure => self.structures.push(anchor),
        }
    }

    /// Removes the campfire at `cell`. Returns false if there was none.
    /// Structures are never removed.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let before = self.campfires.len();
        self.campfires.retain(|a| a.cell != cell);
        self.campfires.len() != before
    }

    /// Places a campfire at `cell` if absent, otherwise removes it.
    /// Returns true when a campfire is present afterwards.
    pub fn toggle_campfire(&mut self, cell: Cell, radius: f64) -> bool {
        if self.remove(cell) {
            false
        } else {
            self.place(Anchor::campfire(cell, radius));
            true
        }
    }

    /// Whether any anchor covers `cell`.
    pub fn is_protected(&self, cell: Cell) -> bool {
        self.is_campfire_covered(cell) || self.structures.iter().any(|a| a.covers(cell))
    }

    /// Whether some campfire covers `cell`.
    pub fn is_campfire_covered(&self, cell: Cell) -> bool {
        self.campfires.iter().any(|a| a.covers(cell))
    }

    /// Whether a campfire is anchored exactly at `cell`.
    pub fn has_campfire(&self, cell: Cell) -> bool {
        self.campfires.iter().any(|a| a.cell == cell)
    }

    /// Live campfire anchors.
    pub fn campfires(&self) -> impl Iterator<Item = &Anchor> {
        self.campfires.iter()
    }

    /// Structure anchors.
    pub fn structures(&self) -> impl Iterator<Item = &Anchor> {
        self.structures.iter()
    }

    /// Total number of anchors.
    pub fn len(&self) -> usize {
        self.campfires.len() + self.structures.len()
    }

    /// Whether the registry holds no anchors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
