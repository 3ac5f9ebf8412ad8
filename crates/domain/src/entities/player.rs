//! The player aggregate: stats, resources, and the three persistent
//! reputation-and-condition mechanisms (bonds, scales, active states).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ids::{AchievementId, ItemId, NpcId};
use crate::value_objects::consequence::{ActiveState, Scales, StateType, BOND_MAX};
use crate::value_objects::stats::Stats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub stats: Stats,

    // Strategic resources
    pub resolve: i32,
    pub coins: i32,

    // Tactical resources: carried here, charged only by challenge subsystems
    pub focus: i32,
    pub stamina: i32,

    /// Bonded strength per NPC, each clamped to [0, BOND_MAX].
    pub bonds: HashMap<NpcId, i32>,
    pub scales: Scales,
    pub active_states: Vec<ActiveState>,
    pub achievements: HashSet<AchievementId>,
    pub inventory: Vec<ItemId>,

    /// Count of situations this player has completed.
    pub completed_situations: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: Stats::default(),
            resolve: 0,
            coins: 0,
            focus: 0,
            stamina: 0,
            bonds: HashMap::new(),
            scales: Scales::default(),
            active_states: Vec::new(),
            achievements: HashSet::new(),
            inventory: Vec::new(),
            completed_situations: 0,
        }
    }

    /// Bonded strength with an NPC; zero for strangers.
    pub fn bond_strength(&self, npc: &NpcId) -> i32 {
        self.bonds.get(npc).copied().unwrap_or(0)
    }

    /// Apply an additive bond delta, clamped to [0, BOND_MAX].
    pub fn adjust_bond(&mut self, npc: &NpcId, delta: i32) -> i32 {
        let entry = self.bonds.entry(*npc).or_insert(0);
        *entry = (*entry + delta).clamp(0, BOND_MAX);
        *entry
    }

    pub fn has_state(&self, kind: StateType) -> bool {
        self.active_states.iter().any(|s| s.kind == kind)
    }

    pub fn has_achievement(&self, achievement: &AchievementId) -> bool {
        self.achievements.contains(achievement)
    }

    pub fn has_item(&self, item: &ItemId) -> bool {
        self.inventory.contains(item)
    }

    pub fn remove_item(&mut self, item: &ItemId) {
        if let Some(index) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_clamps_to_range() {
        let mut player = Player::new("Reyes");
        let npc = NpcId::new();

        assert_eq!(player.adjust_bond(&npc, 40), BOND_MAX);
        assert_eq!(player.adjust_bond(&npc, -50), 0);
    }

    #[test]
    fn test_unknown_npc_has_zero_bond() {
        let player = Player::new("Reyes");
        assert_eq!(player.bond_strength(&NpcId::new()), 0);
    }

    #[test]
    fn test_remove_item_is_noop_when_absent() {
        let mut player = Player::new("Reyes");
        let item = ItemId::new();
        player.remove_item(&item);
        assert!(player.inventory.is_empty());

        player.inventory.push(item);
        player.remove_item(&item);
        assert!(!player.has_item(&item));
    }
}
