//! Tagged encounter choices and the live state they are ranked against.
//!
//! A `Choice` is an immutable (approach, focus, effect) triple. Choice sets
//! are assembled by the engine's diversity selector; the domain only defines
//! the vocabulary and the encounter-state queries the selector ranks by.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Tags
// =============================================================================

/// How the player goes about an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproachTag {
    Force,
    Charm,
    Wit,
    Finesse,
    Stealth,
}

impl ApproachTag {
    /// Fixed tie-break priority; lower wins when accumulated values tie.
    pub fn priority(&self) -> u8 {
        match self {
            ApproachTag::Force => 1,
            ApproachTag::Charm => 2,
            ApproachTag::Wit => 3,
            ApproachTag::Finesse => 4,
            ApproachTag::Stealth => 5,
        }
    }

    pub fn all() -> [ApproachTag; 5] {
        [
            ApproachTag::Force,
            ApproachTag::Charm,
            ApproachTag::Wit,
            ApproachTag::Finesse,
            ApproachTag::Stealth,
        ]
    }
}

/// What the action bears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTag {
    Relationship,
    Information,
    Physical,
    Resource,
    Environment,
}

impl FocusTag {
    /// Fixed tie-break priority; lower wins when accumulated values tie.
    pub fn priority(&self) -> u8 {
        match self {
            FocusTag::Relationship => 1,
            FocusTag::Information => 2,
            FocusTag::Physical => 3,
            FocusTag::Resource => 4,
            FocusTag::Environment => 5,
        }
    }

    pub fn all() -> [FocusTag; 5] {
        [
            FocusTag::Relationship,
            FocusTag::Information,
            FocusTag::Physical,
            FocusTag::Resource,
            FocusTag::Environment,
        ]
    }
}

/// Which encounter track a choice feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Momentum,
    Pressure,
}

impl EffectKind {
    pub fn other(&self) -> EffectKind {
        match self {
            EffectKind::Momentum => EffectKind::Pressure,
            EffectKind::Pressure => EffectKind::Momentum,
        }
    }
}

/// An immutable choice tuple offered to the player during an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    pub approach: ApproachTag,
    pub focus: FocusTag,
    pub effect: EffectKind,
}

impl Choice {
    pub fn new(approach: ApproachTag, focus: FocusTag, effect: EffectKind) -> Self {
        Self {
            approach,
            focus,
            effect,
        }
    }

    /// The same (approach, focus) pair on the other effect track.
    pub fn counterpart(&self) -> Choice {
        Choice {
            effect: self.effect.other(),
            ..*self
        }
    }
}

// =============================================================================
// Encounter state
// =============================================================================

/// Live encounter values the selector ranks against: the momentum and
/// pressure tracks plus accumulated per-tag values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterState {
    pub momentum: i32,
    pub pressure: i32,
    approach_values: BTreeMap<ApproachTag, i32>,
    focus_values: BTreeMap<FocusTag, i32>,
}

impl EncounterState {
    pub fn new(momentum: i32, pressure: i32) -> Self {
        Self {
            momentum,
            pressure,
            ..Self::default()
        }
    }

    pub fn with_approach_value(mut self, tag: ApproachTag, value: i32) -> Self {
        self.approach_values.insert(tag, value);
        self
    }

    pub fn with_focus_value(mut self, tag: FocusTag, value: i32) -> Self {
        self.focus_values.insert(tag, value);
        self
    }

    pub fn approach_value(&self, tag: ApproachTag) -> i32 {
        self.approach_values.get(&tag).copied().unwrap_or(0)
    }

    pub fn focus_value(&self, tag: FocusTag) -> i32 {
        self.focus_values.get(&tag).copied().unwrap_or(0)
    }

    /// Momentum-to-pressure ratio. Zero pressure with any momentum reads as
    /// an arbitrarily high ratio; zero over zero reads as balanced.
    pub fn momentum_pressure_ratio(&self) -> f32 {
        if self.pressure <= 0 {
            if self.momentum > 0 {
                return f32::INFINITY;
            }
            return 1.0;
        }
        self.momentum as f32 / self.pressure as f32
    }

    /// Approach tags ranked descending by value, ties broken by the fixed
    /// priority order.
    pub fn ranked_approaches(&self) -> Vec<ApproachTag> {
        let mut tags = ApproachTag::all().to_vec();
        tags.sort_by_key(|tag| (-self.approach_value(*tag), tag.priority()));
        tags
    }

    /// Focus tags ranked descending by value, ties broken by the fixed
    /// priority order.
    pub fn ranked_focuses(&self) -> Vec<FocusTag> {
        let mut tags = FocusTag::all().to_vec();
        tags.sort_by_key(|tag| (-self.focus_value(*tag), tag.priority()));
        tags
    }
}
