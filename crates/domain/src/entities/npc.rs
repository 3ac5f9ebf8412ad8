use serde::{Deserialize, Serialize};

use crate::ids::{NpcId, SituationId};
use crate::value_objects::scaling::{Demeanor, PowerDynamic};

/// A non-player character the player can build bonds with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    /// Relationship flow scalar; buckets into a demeanor for scaling.
    pub relationship_flow: i32,
    /// Social tier relative to the player; buckets into a power dynamic.
    pub tier: u8,
    /// Situations currently offered through this NPC.
    pub active_situations: Vec<SituationId>,
}

impl Npc {
    pub fn new(id: NpcId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            relationship_flow: 10,
            tier: 3,
            active_situations: Vec::new(),
        }
    }

    pub fn with_relationship_flow(mut self, flow: i32) -> Self {
        self.relationship_flow = flow;
        self
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    /// Demeanor bucketed from the relationship flow:
    /// disconnected/guarded (≤9) reads hostile, 10-14 neutral,
    /// receptive/trusting (>14) friendly.
    pub fn demeanor(&self) -> Demeanor {
        match self.relationship_flow {
            flow if flow <= 9 => Demeanor::Hostile,
            flow if flow <= 14 => Demeanor::Neutral,
            _ => Demeanor::Friendly,
        }
    }

    /// Power dynamic bucketed from the NPC tier: high-tier NPCs put the
    /// player in a submissive position, low-tier a dominant one.
    pub fn power_dynamic(&self) -> PowerDynamic {
        match self.tier {
            tier if tier >= 4 => PowerDynamic::Submissive,
            tier if tier <= 2 => PowerDynamic::Dominant,
            _ => PowerDynamic::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demeanor_buckets() {
        let npc = Npc::new(NpcId::new(), "Marchetti");
        assert_eq!(npc.clone().with_relationship_flow(9).demeanor(), Demeanor::Hostile);
        assert_eq!(npc.clone().with_relationship_flow(10).demeanor(), Demeanor::Neutral);
        assert_eq!(npc.clone().with_relationship_flow(14).demeanor(), Demeanor::Neutral);
        assert_eq!(npc.with_relationship_flow(15).demeanor(), Demeanor::Friendly);
    }

    #[test]
    fn test_power_dynamic_buckets() {
        let npc = Npc::new(NpcId::new(), "Marchetti");
        assert_eq!(npc.clone().with_tier(1).power_dynamic(), PowerDynamic::Dominant);
        assert_eq!(npc.clone().with_tier(3).power_dynamic(), PowerDynamic::Equal);
        assert_eq!(npc.with_tier(5).power_dynamic(), PowerDynamic::Submissive);
    }
}
