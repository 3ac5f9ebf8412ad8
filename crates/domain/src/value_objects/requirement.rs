//! Compound requirements: the OR-of-AND unlocking system.
//!
//! A situation may carry a `CompoundRequirement` holding any number of
//! `OrPath`s. The player unlocks the situation by satisfying at least one
//! complete path; within a path every threshold must hold. An empty
//! requirement is the absence of a gate, not an unsatisfiable one.

use serde::{Deserialize, Serialize};

use crate::entities::Player;
use crate::ids::{AchievementId, ItemId, NpcId};
use crate::value_objects::consequence::{ScaleType, StateType};
use crate::value_objects::stats::StatKind;

// =============================================================================
// Requirement tree
// =============================================================================

/// OR of AND-paths gating access to a situation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundRequirement {
    pub paths: Vec<OrPath>,
}

impl CompoundRequirement {
    pub fn new(paths: Vec<OrPath>) -> Self {
        Self { paths }
    }

    pub fn single(path: OrPath) -> Self {
        Self { paths: vec![path] }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// True iff at least one path is fully satisfied by the player's state.
    ///
    /// Pure function of its inputs: safe to call speculatively for UI preview
    /// without side effects. No requirements means always unlocked.
    pub fn is_any_satisfied(&self, player: &Player) -> bool {
        if self.paths.is_empty() {
            return true;
        }
        self.paths.iter().any(|path| path.is_satisfied(player))
    }

    /// Project which paths are satisfied and which thresholds are missing,
    /// with current values, so a caller can render "why is this locked"
    /// without mutating anything.
    pub fn projection(&self, player: &Player) -> RequirementProjection {
        if self.paths.is_empty() {
            return RequirementProjection {
                has_requirements: false,
                is_satisfied: true,
                paths: Vec::new(),
            };
        }

        let paths: Vec<PathProjection> = self
            .paths
            .iter()
            .map(|path| path.projection(player))
            .collect();
        let is_satisfied = paths.iter().any(|p| p.is_satisfied);

        RequirementProjection {
            has_requirements: true,
            is_satisfied,
            paths,
        }
    }
}

/// Bond threshold against a specific NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondThreshold {
    pub npc: NpcId,
    pub strength: i32,
}

/// Scale threshold. A non-negative value requires `scale >= value`; a
/// negative value requires `scale <= value`, so "Morality -3" reads as
/// "at most -3".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleThreshold {
    pub kind: ScaleType,
    pub value: i32,
}

impl ScaleThreshold {
    pub fn is_met_by(&self, current: i32) -> bool {
        if self.value >= 0 {
            current >= self.value
        } else {
            current <= self.value
        }
    }
}

/// A single OR path: every present threshold must be met (AND logic).
///
/// Each requirement type is an explicit typed field rather than a generic
/// tag/value pair, so scaling and offset application can match on exactly the
/// leaves they affect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrPath {
    /// Display label for this unlock path.
    pub label: Option<String>,

    // Stat thresholds
    pub insight: Option<i32>,
    pub rapport: Option<i32>,
    pub authority: Option<i32>,
    pub diplomacy: Option<i32>,
    pub cunning: Option<i32>,

    // Resource thresholds
    pub resolve: Option<i32>,
    pub coins: Option<i32>,

    // Progression
    pub situations_completed: Option<u32>,

    // Relationship
    pub bond: Option<BondThreshold>,

    // Scale
    pub scale: Option<ScaleThreshold>,

    // Boolean requirements
    pub achievement: Option<AchievementId>,
    pub state: Option<StateType>,
    pub item: Option<ItemId>,
}

impl OrPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stat(mut self, kind: StatKind, min: i32) -> Self {
        match kind {
            StatKind::Insight => self.insight = Some(min),
            StatKind::Rapport => self.rapport = Some(min),
            StatKind::Authority => self.authority = Some(min),
            StatKind::Diplomacy => self.diplomacy = Some(min),
            StatKind::Cunning => self.cunning = Some(min),
        }
        self
    }

    pub fn with_resolve(mut self, min: i32) -> Self {
        self.resolve = Some(min);
        self
    }

    pub fn with_coins(mut self, min: i32) -> Self {
        self.coins = Some(min);
        self
    }

    pub fn with_situations_completed(mut self, count: u32) -> Self {
        self.situations_completed = Some(count);
        self
    }

    pub fn with_bond(mut self, npc: NpcId, strength: i32) -> Self {
        self.bond = Some(BondThreshold { npc, strength });
        self
    }

    pub fn with_scale(mut self, kind: ScaleType, value: i32) -> Self {
        self.scale = Some(ScaleThreshold { kind, value });
        self
    }

    pub fn with_achievement(mut self, achievement: AchievementId) -> Self {
        self.achievement = Some(achievement);
        self
    }

    pub fn with_state(mut self, state: StateType) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    /// Iterator over (stat kind, threshold) for the stat leaves present.
    pub fn stat_thresholds(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        [
            (StatKind::Insight, self.insight),
            (StatKind::Rapport, self.rapport),
            (StatKind::Authority, self.authority),
            (StatKind::Diplomacy, self.diplomacy),
            (StatKind::Cunning, self.cunning),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|v| (kind, v)))
    }

    /// True if ALL thresholds in this path are met.
    pub fn is_satisfied(&self, player: &Player) -> bool {
        for (kind, min) in self.stat_thresholds() {
            if player.stats.get(kind) < min {
                return false;
            }
        }

        if let Some(min) = self.resolve {
            if player.resolve < min {
                return false;
            }
        }
        if let Some(min) = self.coins {
            if player.coins < min {
                return false;
            }
        }

        if let Some(count) = self.situations_completed {
            if player.completed_situations < count {
                return false;
            }
        }

        if let Some(bond) = &self.bond {
            if player.bond_strength(&bond.npc) < bond.strength {
                return false;
            }
        }

        if let Some(scale) = &self.scale {
            if !scale.is_met_by(player.scales.get(scale.kind)) {
                return false;
            }
        }

        if let Some(achievement) = &self.achievement {
            if !player.has_achievement(achievement) {
                return false;
            }
        }
        if let Some(state) = self.state {
            if !player.has_state(state) {
                return false;
            }
        }
        if let Some(item) = &self.item {
            if !player.has_item(item) {
                return false;
            }
        }

        true
    }

    /// Project the satisfaction status of each threshold in this path.
    pub fn projection(&self, player: &Player) -> PathProjection {
        let mut requirements = Vec::new();

        for (kind, min) in self.stat_thresholds() {
            requirements.push(RequirementStatus::numeric(
                format!("{} {}+", kind, min),
                player.stats.get(kind),
                min,
            ));
        }

        if let Some(min) = self.resolve {
            requirements.push(RequirementStatus::numeric(
                format!("Resolve {}+", min),
                player.resolve,
                min,
            ));
        }
        if let Some(min) = self.coins {
            requirements.push(RequirementStatus::numeric(
                format!("Coins {}+", min),
                player.coins,
                min,
            ));
        }
        if let Some(count) = self.situations_completed {
            requirements.push(RequirementStatus::numeric(
                format!("Complete {} situations", count),
                player.completed_situations as i32,
                count as i32,
            ));
        }
        if let Some(bond) = &self.bond {
            requirements.push(RequirementStatus::numeric(
                format!("Bond {}+", bond.strength),
                player.bond_strength(&bond.npc),
                bond.strength,
            ));
        }
        if let Some(scale) = &self.scale {
            let current = player.scales.get(scale.kind);
            requirements.push(RequirementStatus {
                label: format!("{} {:+}", scale.kind, scale.value),
                is_satisfied: scale.is_met_by(current),
                current,
                required: scale.value,
            });
        }
        if let Some(achievement) = &self.achievement {
            let satisfied = player.has_achievement(achievement);
            requirements.push(RequirementStatus::boolean(
                format!("Achievement: {}", achievement),
                satisfied,
            ));
        }
        if let Some(state) = self.state {
            requirements.push(RequirementStatus::boolean(
                format!("State: {}", state),
                player.has_state(state),
            ));
        }
        if let Some(item) = &self.item {
            requirements.push(RequirementStatus::boolean(
                format!("Item: {}", item),
                player.has_item(item),
            ));
        }

        PathProjection {
            label: self.label.clone(),
            is_satisfied: requirements.iter().all(|r| r.is_satisfied),
            requirements,
        }
    }
}

// =============================================================================
// Projections (for UI preview)
// =============================================================================

/// Full requirement status for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProjection {
    pub has_requirements: bool,
    pub is_satisfied: bool,
    pub paths: Vec<PathProjection>,
}

/// Status of a single OR path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathProjection {
    pub label: Option<String>,
    pub is_satisfied: bool,
    pub requirements: Vec<RequirementStatus>,
}

/// Status of a single threshold within a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementStatus {
    pub label: String,
    pub is_satisfied: bool,
    pub current: i32,
    pub required: i32,
}

impl RequirementStatus {
    fn numeric(label: String, current: i32, required: i32) -> Self {
        Self {
            label,
            is_satisfied: current >= required,
            current,
            required,
        }
    }

    fn boolean(label: String, satisfied: bool) -> Self {
        Self {
            label,
            is_satisfied: satisfied,
            current: i32::from(satisfied),
            required: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::consequence::ActiveState;
    use crate::GameTime;

    fn player() -> Player {
        let mut player = Player::new("Reyes");
        player.stats.insight = 4;
        player.stats.rapport = 2;
        player.resolve = 10;
        player.coins = 25;
        player
    }

    #[test]
    fn test_empty_requirement_is_vacuously_satisfied() {
        let requirement = CompoundRequirement::default();
        assert!(requirement.is_any_satisfied(&player()));
        assert!(requirement.is_any_satisfied(&Player::new("anyone")));
    }

    #[test]
    fn test_single_path_all_thresholds_must_hold() {
        let requirement = CompoundRequirement::single(
            OrPath::new()
                .with_stat(StatKind::Insight, 3)
                .with_resolve(12),
        );
        // Insight passes, resolve fails -> path unsatisfied
        assert!(!requirement.is_any_satisfied(&player()));
    }

    #[test]
    fn test_any_satisfied_path_unlocks() {
        let requirement = CompoundRequirement::new(vec![
            OrPath::new().with_stat(StatKind::Authority, 9),
            OrPath::new().with_coins(20),
        ]);
        assert!(requirement.is_any_satisfied(&player()));
    }

    #[test]
    fn test_bond_threshold() {
        let npc = NpcId::new();
        let mut player = player();
        player.adjust_bond(&npc, 6);

        let requirement = CompoundRequirement::single(OrPath::new().with_bond(npc, 5));
        assert!(requirement.is_any_satisfied(&player));

        let requirement = CompoundRequirement::single(OrPath::new().with_bond(npc, 7));
        assert!(!requirement.is_any_satisfied(&player));
    }

    #[test]
    fn test_negative_scale_threshold_reads_as_at_most() {
        let mut player = player();
        player.scales.shift(ScaleType::Lawfulness, -5);

        let requirement =
            CompoundRequirement::single(OrPath::new().with_scale(ScaleType::Lawfulness, -3));
        assert!(requirement.is_any_satisfied(&player));

        player.scales.shift(ScaleType::Lawfulness, 4);
        assert!(!requirement.is_any_satisfied(&player));
    }

    #[test]
    fn test_state_requirement() {
        let mut player = player();
        let requirement =
            CompoundRequirement::single(OrPath::new().with_state(StateType::Inspired));
        assert!(!requirement.is_any_satisfied(&player));

        player.active_states.push(ActiveState {
            kind: StateType::Inspired,
            applied_at: GameTime::start_of_day(1),
            duration_segments: 8,
        });
        assert!(requirement.is_any_satisfied(&player));
    }

    #[test]
    fn test_projection_reports_gaps() {
        let requirement = CompoundRequirement::single(
            OrPath::new()
                .with_label("Force of will")
                .with_resolve(12)
                .with_stat(StatKind::Insight, 3),
        );

        let projection = requirement.projection(&player());
        assert!(projection.has_requirements);
        assert!(!projection.is_satisfied);

        let path = &projection.paths[0];
        assert_eq!(path.label.as_deref(), Some("Force of will"));
        let resolve = path
            .requirements
            .iter()
            .find(|r| r.label.starts_with("Resolve"))
            .expect("resolve status present");
        assert!(!resolve.is_satisfied);
        assert_eq!(resolve.current, 10);
        assert_eq!(resolve.required, 12);
    }

    #[test]
    fn test_projection_of_empty_requirement() {
        let projection = CompoundRequirement::default().projection(&player());
        assert!(!projection.has_requirements);
        assert!(projection.is_satisfied);
        assert!(projection.paths.is_empty());
    }
}
