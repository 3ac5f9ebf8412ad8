//! Persistent consequence mechanisms: bonded strength, behavioral scales, and
//! timed player states, plus the consequence block that bundles them with
//! resource and progression rewards.

use serde::{Deserialize, Serialize};

use crate::game_time::GameTime;
use crate::ids::{AchievementId, ItemId, NpcId};
use crate::value_objects::stats::StatKind;

/// Bonded strength with an NPC ranges from 0 (stranger) to 30 (inseparable).
pub const BOND_MAX: i32 = 30;

/// Behavioral scales range from -10 to +10.
pub const SCALE_MIN: i32 = -10;
pub const SCALE_MAX: i32 = 10;

// =============================================================================
// Scales
// =============================================================================

/// The six behavioral-reputation scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Morality,
    Lawfulness,
    Method,
    Caution,
    Transparency,
    Fame,
}

impl ScaleType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ScaleType::Morality => "Morality",
            ScaleType::Lawfulness => "Lawfulness",
            ScaleType::Method => "Method",
            ScaleType::Caution => "Caution",
            ScaleType::Transparency => "Transparency",
            ScaleType::Fame => "Fame",
        }
    }

    pub fn all() -> [ScaleType; 6] {
        [
            ScaleType::Morality,
            ScaleType::Lawfulness,
            ScaleType::Method,
            ScaleType::Caution,
            ScaleType::Transparency,
            ScaleType::Fame,
        ]
    }
}

impl std::fmt::Display for ScaleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fixed enum-keyed table of the player's scale values, clamped to
/// [`SCALE_MIN`, `SCALE_MAX`] on every write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scales {
    pub morality: i32,
    pub lawfulness: i32,
    pub method: i32,
    pub caution: i32,
    pub transparency: i32,
    pub fame: i32,
}

impl Scales {
    pub fn get(&self, kind: ScaleType) -> i32 {
        match kind {
            ScaleType::Morality => self.morality,
            ScaleType::Lawfulness => self.lawfulness,
            ScaleType::Method => self.method,
            ScaleType::Caution => self.caution,
            ScaleType::Transparency => self.transparency,
            ScaleType::Fame => self.fame,
        }
    }

    /// Apply an additive shift, clamping the result to the scale range.
    pub fn shift(&mut self, kind: ScaleType, delta: i32) {
        let slot = match kind {
            ScaleType::Morality => &mut self.morality,
            ScaleType::Lawfulness => &mut self.lawfulness,
            ScaleType::Method => &mut self.method,
            ScaleType::Caution => &mut self.caution,
            ScaleType::Transparency => &mut self.transparency,
            ScaleType::Fame => &mut self.fame,
        };
        *slot = (*slot + delta).clamp(SCALE_MIN, SCALE_MAX);
    }
}

// =============================================================================
// Player states
// =============================================================================

/// Temporary conditions applied to the player by consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateType {
    Inspired,
    Focused,
    Emboldened,
    Exhausted,
    Wounded,
    Shaken,
}

impl StateType {
    pub fn display_name(&self) -> &'static str {
        match self {
            StateType::Inspired => "Inspired",
            StateType::Focused => "Focused",
            StateType::Emboldened => "Emboldened",
            StateType::Exhausted => "Exhausted",
            StateType::Wounded => "Wounded",
            StateType::Shaken => "Shaken",
        }
    }
}

impl std::fmt::Display for StateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A state currently active on the player, stamped with the time it was
/// applied and how many segments it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveState {
    pub kind: StateType,
    pub applied_at: GameTime,
    pub duration_segments: u32,
}

impl ActiveState {
    /// True once the state's duration has fully elapsed at `now`.
    pub fn is_expired(&self, now: GameTime) -> bool {
        now.total_segments_elapsed()
            >= self.applied_at.total_segments_elapsed() + self.duration_segments
    }
}

// =============================================================================
// Consequence entries
// =============================================================================

/// Additive change to the bonded strength with one NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondChange {
    pub npc: NpcId,
    pub delta: i32,
    /// Narrative annotation, surfaced in player-facing messages.
    pub reason: Option<String>,
}

/// Additive shift to one behavioral scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleShift {
    pub kind: ScaleType,
    pub delta: i32,
}

/// Apply or remove a player state.
///
/// Application is idempotent: if a state of the same type is already active,
/// the application is skipped. Removal of an absent state is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateApplication {
    Apply {
        kind: StateType,
        duration_segments: u32,
    },
    Remove {
        kind: StateType,
    },
}

/// Direct stat grant (no experience system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGrant {
    pub kind: StatKind,
    pub delta: i32,
}

// =============================================================================
// Consequence block
// =============================================================================

/// Everything a completed situation projects back into persistent world state.
///
/// Every list is empty-tolerant; `Consequence::none()` is the neutral element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consequence {
    pub coins: i32,
    pub resolve: i32,
    pub stat_grants: Vec<StatGrant>,
    pub bond_changes: Vec<BondChange>,
    pub scale_shifts: Vec<ScaleShift>,
    pub state_applications: Vec<StateApplication>,
    pub achievements: Vec<AchievementId>,
    pub items_granted: Vec<ItemId>,
    pub items_removed: Vec<ItemId>,
}

impl Consequence {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::none()
    }

    pub fn with_coins(mut self, coins: i32) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_resolve(mut self, resolve: i32) -> Self {
        self.resolve = resolve;
        self
    }

    pub fn with_bond_change(mut self, npc: NpcId, delta: i32) -> Self {
        self.bond_changes.push(BondChange {
            npc,
            delta,
            reason: None,
        });
        self
    }

    pub fn with_scale_shift(mut self, kind: ScaleType, delta: i32) -> Self {
        self.scale_shifts.push(ScaleShift { kind, delta });
        self
    }

    pub fn with_state(mut self, kind: StateType, duration_segments: u32) -> Self {
        self.state_applications.push(StateApplication::Apply {
            kind,
            duration_segments,
        });
        self
    }

    pub fn with_state_removal(mut self, kind: StateType) -> Self {
        self.state_applications
            .push(StateApplication::Remove { kind });
        self
    }

    pub fn with_achievement(mut self, achievement: AchievementId) -> Self {
        self.achievements.push(achievement);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_shift_clamps_at_both_ends() {
        let mut scales = Scales::default();
        scales.shift(ScaleType::Morality, 25);
        assert_eq!(scales.get(ScaleType::Morality), SCALE_MAX);

        scales.shift(ScaleType::Morality, -40);
        assert_eq!(scales.get(ScaleType::Morality), SCALE_MIN);
    }

    #[test]
    fn test_scale_shift_is_additive() {
        let mut scales = Scales::default();
        scales.shift(ScaleType::Fame, 3);
        scales.shift(ScaleType::Fame, -1);
        assert_eq!(scales.get(ScaleType::Fame), 2);
    }

    #[test]
    fn test_active_state_expiry() {
        let applied_at = GameTime::start_of_day(1);
        let state = ActiveState {
            kind: StateType::Inspired,
            applied_at,
            duration_segments: 4,
        };

        assert!(!state.is_expired(applied_at.advance_segments(3)));
        assert!(state.is_expired(applied_at.advance_segments(4)));
        assert!(state.is_expired(applied_at.advance_segments(20)));
    }

    #[test]
    fn test_empty_consequence() {
        assert!(Consequence::none().is_empty());
        assert!(!Consequence::none().with_coins(5).is_empty());
    }
}
