//! Consequence application: resolving a completed situation's projected
//! effects into persistent world state.
//!
//! Every apply call has best-effort batch semantics: an entry that does not
//! resolve (an unknown NPC, say) is skipped with a warning and the rest of
//! the batch proceeds. There is no partial-failure mode and no transaction.

use std::sync::Arc;

use storyloom_domain::{ActiveState, Consequence, GameTime, StateApplication};

use crate::infrastructure::{MessagePort, Severity};
use crate::stores::WorldState;

pub struct ConsequenceApplier {
    messages: Arc<dyn MessagePort>,
}

impl ConsequenceApplier {
    pub fn new(messages: Arc<dyn MessagePort>) -> Self {
        Self { messages }
    }

    /// Apply a consequence block to the world at time `now`.
    ///
    /// Order within the block: resources, stats, bonds, scales, states,
    /// achievements, items. All lists are empty-tolerant.
    pub fn apply(&self, world: &mut WorldState, consequence: &Consequence, now: GameTime) {
        let player = &mut world.player;

        if consequence.coins != 0 {
            player.coins += consequence.coins;
        }
        if consequence.resolve != 0 {
            player.resolve += consequence.resolve;
        }
        for grant in &consequence.stat_grants {
            player.stats.add(grant.kind, grant.delta);
        }

        for change in &consequence.bond_changes {
            let Some(npc) = world.npcs.get(&change.npc) else {
                tracing::warn!(npc = %change.npc, "bond change references unknown NPC, skipping");
                continue;
            };
            let name = npc.name.clone();
            let strength = world.player.adjust_bond(&change.npc, change.delta);
            let text = match &change.reason {
                Some(reason) => format!("Bond with {} now {} ({})", name, strength, reason),
                None => format!("Bond with {} now {}", name, strength),
            };
            self.messages.announce(&text, Severity::Info);
        }

        let player = &mut world.player;
        for shift in &consequence.scale_shifts {
            player.scales.shift(shift.kind, shift.delta);
        }

        for application in &consequence.state_applications {
            match *application {
                StateApplication::Apply {
                    kind,
                    duration_segments,
                } => {
                    // Idempotent: an already-active state is left as it is
                    if player.has_state(kind) {
                        tracing::debug!(state = %kind, "state already active, skipping");
                        continue;
                    }
                    player.active_states.push(ActiveState {
                        kind,
                        applied_at: now,
                        duration_segments,
                    });
                    self.messages
                        .announce(&format!("You are now {}", kind), Severity::Info);
                }
                StateApplication::Remove { kind } => {
                    // No-op if absent
                    player.active_states.retain(|s| s.kind != kind);
                }
            }
        }

        for achievement in &consequence.achievements {
            // Idempotent: HashSet insert
            player.achievements.insert(*achievement);
        }

        for item in &consequence.items_granted {
            player.inventory.push(*item);
        }
        for item in &consequence.items_removed {
            player.remove_item(item);
        }
    }

    /// Drop every active state whose duration has elapsed at `now`.
    pub fn expire_states(&self, world: &mut WorldState, now: GameTime) {
        let before = world.player.active_states.len();
        world.player.active_states.retain(|s| !s.is_expired(now));
        let expired = before - world.player.active_states.len();
        if expired > 0 {
            tracing::debug!(expired, "expired player states");
        }
    }
}
