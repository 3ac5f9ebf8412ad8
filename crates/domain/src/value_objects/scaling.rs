//! Query-time scaling adjustments derived from live entities.
//!
//! Two-phase evaluation model: authored content carries base thresholds and
//! costs (template time); a `ScalingContext` derived from the current
//! NPC/location/player triple shifts those numbers at query time. Authored
//! content stays declarative while each playthrough sees personalized
//! difficulty without duplicating content per relationship state.
//!
//! Adjustments are additive integers only, never multipliers. Applying an
//! adjustment clamps at zero: a requirement or cost can be scaled away, but
//! never below nothing.

use serde::{Deserialize, Serialize};

use crate::entities::{Location, LocationPurpose, Npc, Player};
use crate::value_objects::cost::SituationCost;
use crate::value_objects::requirement::{CompoundRequirement, OrPath};

// =============================================================================
// Derivation buckets
// =============================================================================

/// NPC demeanor, bucketed from the relationship flow scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demeanor {
    Hostile,
    Neutral,
    Friendly,
}

/// Location quality, bucketed from the location tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Basic,
    Standard,
    Premium,
    Luxury,
}

/// Relative standing between player and NPC, bucketed from the NPC tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerDynamic {
    Dominant,
    Equal,
    Submissive,
}

// =============================================================================
// Scaling context
// =============================================================================

/// Four independent integer adjustments, each derived from exactly one
/// relationship axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingContext {
    /// Applied to all stat thresholds. Hostile NPCs are harder to read.
    pub stat_adjustment: i32,
    /// Applied to coin costs. Premium venues charge more.
    pub coin_adjustment: i32,
    /// Applied to resolve thresholds and costs. Dominant standing is cheaper.
    pub resolve_adjustment: i32,
    /// Applied to time costs, in segments. Urgent venues eat the clock.
    pub time_adjustment: i32,
}

impl ScalingContext {
    /// No-op context: used when no entities are available for derivation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Derive a scaling context from whichever entities are present.
    ///
    /// Absent arguments yield a zero adjustment on their axis. Derivation
    /// rules are fixed, not configurable at runtime:
    /// - stat: Hostile +2, Neutral 0, Friendly -2
    /// - coins: Basic -3, Standard 0, Premium +5, Luxury +10
    /// - resolve: Dominant -1, Equal 0, Submissive +1
    /// - time: urgent location purpose +1, else 0
    pub fn derive(npc: Option<&Npc>, location: Option<&Location>, player: Option<&Player>) -> Self {
        Self {
            stat_adjustment: Self::derive_stat_adjustment(npc),
            coin_adjustment: Self::derive_coin_adjustment(location),
            resolve_adjustment: Self::derive_resolve_adjustment(npc, player),
            time_adjustment: Self::derive_time_adjustment(location),
        }
    }

    fn derive_stat_adjustment(npc: Option<&Npc>) -> i32 {
        let Some(npc) = npc else { return 0 };

        match npc.demeanor() {
            Demeanor::Hostile => 2,
            Demeanor::Neutral => 0,
            Demeanor::Friendly => -2,
        }
    }

    fn derive_coin_adjustment(location: Option<&Location>) -> i32 {
        let Some(location) = location else { return 0 };

        match location.quality() {
            Quality::Basic => -3,
            Quality::Standard => 0,
            Quality::Premium => 5,
            Quality::Luxury => 10,
        }
    }

    fn derive_resolve_adjustment(npc: Option<&Npc>, _player: Option<&Player>) -> i32 {
        let Some(npc) = npc else { return 0 };

        match npc.power_dynamic() {
            PowerDynamic::Dominant => -1,
            PowerDynamic::Equal => 0,
            PowerDynamic::Submissive => 1,
        }
    }

    fn derive_time_adjustment(location: Option<&Location>) -> i32 {
        let Some(location) = location else { return 0 };

        // Governance and civic venues add time pressure
        match location.purpose {
            LocationPurpose::Governance | LocationPurpose::Civic => 1,
            _ => 0,
        }
    }

    // =========================================================================
    // Adjustment application
    // =========================================================================

    /// Apply the stat adjustment to a base value. Never negative.
    pub fn apply_stat_adjustment(&self, base: i32) -> i32 {
        (base + self.stat_adjustment).max(0)
    }

    /// Apply the coin adjustment to a base value. Never negative.
    pub fn apply_coin_adjustment(&self, base: i32) -> i32 {
        (base + self.coin_adjustment).max(0)
    }

    /// Apply the resolve adjustment to a base value. Never negative.
    pub fn apply_resolve_adjustment(&self, base: i32) -> i32 {
        (base + self.resolve_adjustment).max(0)
    }

    /// Apply the time adjustment to a base segment count. Never negative.
    pub fn apply_time_adjustment(&self, base: u32) -> u32 {
        (base as i32 + self.time_adjustment).max(0) as u32
    }

    /// Create a scaled copy of a requirement tree.
    ///
    /// Stat, resolve, and coin leaves are shifted by the relevant adjustment
    /// and clamped at zero; every other leaf is copied unchanged. The original
    /// is never mutated.
    pub fn apply_to_requirement(&self, original: &CompoundRequirement) -> CompoundRequirement {
        CompoundRequirement {
            paths: original
                .paths
                .iter()
                .map(|path| self.scale_path(path))
                .collect(),
        }
    }

    fn scale_path(&self, path: &OrPath) -> OrPath {
        let mut scaled = path.clone();
        scaled.insight = path.insight.map(|v| self.apply_stat_adjustment(v));
        scaled.rapport = path.rapport.map(|v| self.apply_stat_adjustment(v));
        scaled.authority = path.authority.map(|v| self.apply_stat_adjustment(v));
        scaled.diplomacy = path.diplomacy.map(|v| self.apply_stat_adjustment(v));
        scaled.cunning = path.cunning.map(|v| self.apply_stat_adjustment(v));
        scaled.resolve = path.resolve.map(|v| self.apply_resolve_adjustment(v));
        scaled.coins = path.coins.map(|v| self.apply_coin_adjustment(v));
        scaled
    }

    /// Create a scaled copy of a cost block.
    ///
    /// Only cost-shaped fields shift: resolve, coins, and time. Focus and
    /// stamina belong to the tactical layer and pass through untouched, as do
    /// reward-shaped fields elsewhere - rewards are never rescaled at query
    /// time, only costs and gates.
    pub fn apply_to_cost(&self, original: &SituationCost) -> SituationCost {
        SituationCost {
            resolve: self.apply_resolve_adjustment(original.resolve),
            coins: self.apply_coin_adjustment(original.coins),
            time: self.apply_time_adjustment(original.time),
            focus: original.focus,
            stamina: original.stamina,
        }
    }
}
