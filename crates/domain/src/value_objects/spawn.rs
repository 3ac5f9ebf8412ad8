//! Spawn rules: authored instructions to clone a template situation as a
//! child upon a parent's completion.
//!
//! `SpawnConditions` gate whether a child is created at all and are evaluated
//! once, at parent completion. They are a deliberately separate mechanism
//! from `CompoundRequirement`, which gates whether the player may later
//! select the child and is evaluated at query time.

use serde::{Deserialize, Serialize};

use crate::entities::Player;
use crate::ids::{AchievementId, LocationId, NpcId, RouteId, TemplateId};
use crate::value_objects::consequence::{StateType, SCALE_MAX, SCALE_MIN};
use crate::value_objects::requirement::CompoundRequirement;

// =============================================================================
// Placement
// =============================================================================

/// Where a spawned child lands, relative to its parent or at an explicit
/// entity. `Same*` variants inherit from the parent situation; `Specific*`
/// variants must resolve against the world's repositories, and an explicit id
/// that does not resolve is an authoring fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementRelation {
    SameLocation,
    SameNpc,
    SameRoute,
    SpecificLocation(LocationId),
    SpecificNpc(NpcId),
    SpecificRoute(RouteId),
}

// =============================================================================
// Spawn conditions
// =============================================================================

/// Simple AND of optional gates checked before a spawn rule fires.
///
/// A failed condition skips the spawn silently: a rule that never fires is
/// conditional content, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnConditions {
    pub min_resolve: Option<i32>,
    pub required_state: Option<StateType>,
    pub required_achievement: Option<AchievementId>,
}

impl SpawnConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_resolve(mut self, min: i32) -> Self {
        self.min_resolve = Some(min);
        self
    }

    pub fn with_required_state(mut self, state: StateType) -> Self {
        self.required_state = Some(state);
        self
    }

    pub fn with_required_achievement(mut self, achievement: AchievementId) -> Self {
        self.required_achievement = Some(achievement);
        self
    }

    /// All present conditions must hold for the spawn to occur.
    pub fn is_met(&self, player: &Player) -> bool {
        if let Some(min) = self.min_resolve {
            if player.resolve < min {
                return false;
            }
        }
        if let Some(state) = self.required_state {
            if !player.has_state(state) {
                return false;
            }
        }
        if let Some(achievement) = &self.required_achievement {
            if !player.has_achievement(achievement) {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Requirement offsets
// =============================================================================

/// Per-field deltas applied to a cloned child's requirement tree, so chains
/// can grow easier or harder than their template.
///
/// Offsets match leaves by requirement type: the bond offset only touches
/// bond-strength leaves, the scale offset only touches scale leaves (clamped
/// to the scale range), and the numeric offset touches the remaining numeric
/// leaves (floored at zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementOffsets {
    pub bond_strength: Option<i32>,
    pub scale: Option<i32>,
    pub numeric: Option<i32>,
}

impl RequirementOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bond_strength(mut self, offset: i32) -> Self {
        self.bond_strength = Some(offset);
        self
    }

    pub fn with_scale(mut self, offset: i32) -> Self {
        self.scale = Some(offset);
        self
    }

    pub fn with_numeric(mut self, offset: i32) -> Self {
        self.numeric = Some(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bond_strength.is_none() && self.scale.is_none() && self.numeric.is_none()
    }

    /// Produce an offset copy of a requirement tree. The original is never
    /// mutated; a template's tree survives any number of applications intact.
    pub fn apply_to(&self, original: &CompoundRequirement) -> CompoundRequirement {
        if self.is_empty() {
            return original.clone();
        }

        let mut modified = original.clone();
        for path in &mut modified.paths {
            path.insight = path.insight.map(|v| Self::offset_floor(v, self.numeric));
            path.rapport = path.rapport.map(|v| Self::offset_floor(v, self.numeric));
            path.authority = path.authority.map(|v| Self::offset_floor(v, self.numeric));
            path.diplomacy = path.diplomacy.map(|v| Self::offset_floor(v, self.numeric));
            path.cunning = path.cunning.map(|v| Self::offset_floor(v, self.numeric));
            path.resolve = path.resolve.map(|v| Self::offset_floor(v, self.numeric));
            path.coins = path.coins.map(|v| Self::offset_floor(v, self.numeric));

            if let Some(bond) = &mut path.bond {
                bond.strength = Self::offset_floor(bond.strength, self.bond_strength);
            }
            if let Some(scale) = &mut path.scale {
                if let Some(offset) = self.scale {
                    scale.value = (scale.value + offset).clamp(SCALE_MIN, SCALE_MAX);
                }
            }
        }
        modified
    }

    fn offset_floor(value: i32, offset: Option<i32>) -> i32 {
        match offset {
            Some(offset) => (value + offset).max(0),
            None => value,
        }
    }
}

// =============================================================================
// Spawn rule
// =============================================================================

/// One authored spawn instruction, consumed exactly once per
/// parent-completion event, producing zero or one child situation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub template: TemplateId,
    pub conditions: Option<SpawnConditions>,
    pub offsets: Option<RequirementOffsets>,
    pub placement: PlacementRelation,
}

impl SpawnRule {
    pub fn new(template: TemplateId, placement: PlacementRelation) -> Self {
        Self {
            template,
            conditions: None,
            offsets: None,
            placement,
        }
    }

    pub fn with_conditions(mut self, conditions: SpawnConditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn with_offsets(mut self, offsets: RequirementOffsets) -> Self {
        self.offsets = Some(offsets);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::consequence::ScaleType;
    use crate::value_objects::requirement::OrPath;
    use crate::value_objects::stats::StatKind;

    #[test]
    fn test_conditions_empty_always_met() {
        let player = Player::new("anyone");
        assert!(SpawnConditions::new().is_met(&player));
    }

    #[test]
    fn test_conditions_min_resolve() {
        let mut player = Player::new("Reyes");
        player.resolve = 4;

        assert!(!SpawnConditions::new().with_min_resolve(5).is_met(&player));
        player.resolve = 5;
        assert!(SpawnConditions::new().with_min_resolve(5).is_met(&player));
    }

    #[test]
    fn test_offsets_match_leaves_by_type() {
        let npc = NpcId::new();
        let original = CompoundRequirement::single(
            OrPath::new()
                .with_stat(StatKind::Cunning, 4)
                .with_bond(npc, 6)
                .with_scale(ScaleType::Method, 8),
        );

        let offsets = RequirementOffsets::new().with_bond_strength(-2);
        let modified = offsets.apply_to(&original);
        let path = &modified.paths[0];

        // Only the bond leaf moved
        assert_eq!(path.bond.map(|b| b.strength), Some(4));
        assert_eq!(path.cunning, Some(4));
        assert_eq!(path.scale.map(|s| s.value), Some(8));
    }

    #[test]
    fn test_scale_offset_clamps_to_range() {
        let original =
            CompoundRequirement::single(OrPath::new().with_scale(ScaleType::Fame, 8));
        let modified = RequirementOffsets::new().with_scale(5).apply_to(&original);
        assert_eq!(modified.paths[0].scale.map(|s| s.value), Some(SCALE_MAX));

        let original =
            CompoundRequirement::single(OrPath::new().with_scale(ScaleType::Fame, -8));
        let modified = RequirementOffsets::new().with_scale(-5).apply_to(&original);
        assert_eq!(modified.paths[0].scale.map(|s| s.value), Some(SCALE_MIN));
    }

    #[test]
    fn test_numeric_offset_floors_at_zero() {
        let original = CompoundRequirement::single(
            OrPath::new().with_resolve(2).with_coins(10),
        );
        let modified = RequirementOffsets::new().with_numeric(-5).apply_to(&original);
        let path = &modified.paths[0];
        assert_eq!(path.resolve, Some(0));
        assert_eq!(path.coins, Some(5));
    }

    #[test]
    fn test_apply_never_mutates_the_original() {
        let original = CompoundRequirement::single(OrPath::new().with_resolve(3));
        let snapshot = original.clone();

        let _ = RequirementOffsets::new().with_numeric(4).apply_to(&original);
        assert_eq!(original, snapshot);
    }
}
