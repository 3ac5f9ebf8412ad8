//! The world-state aggregate.
//!
//! One `WorldState` owns every entity in play: the player, NPCs, locations,
//! routes, authored templates, and every live situation instance (spawned
//! ones included). Components receive references into this aggregate and
//! mutate in place; callers must serialize mutating calls per world instance.
//! Read-only evaluation is side-effect-free.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use storyloom_domain::{
    Location, LocationId, Npc, NpcId, Placement, Player, Route, RouteId, SituationId,
    SituationInstance, SituationTemplate, TemplateId,
};

use crate::error::EngineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub player: Player,
    pub npcs: HashMap<NpcId, Npc>,
    pub locations: HashMap<LocationId, Location>,
    pub routes: HashMap<RouteId, Route>,
    /// Authored templates, re-loaded from content; immutable blueprints.
    pub templates: HashMap<TemplateId, SituationTemplate>,
    /// Every live situation instance, authored and spawned alike.
    pub situations: HashMap<SituationId, SituationInstance>,
}

impl WorldState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            npcs: HashMap::new(),
            locations: HashMap::new(),
            routes: HashMap::new(),
            templates: HashMap::new(),
            situations: HashMap::new(),
        }
    }

    // =========================================================================
    // Entity registration
    // =========================================================================

    pub fn add_npc(&mut self, npc: Npc) {
        self.npcs.insert(npc.id, npc);
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.insert(location.id, location);
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route.id, route);
    }

    pub fn add_template(&mut self, template: SituationTemplate) {
        self.templates.insert(template.id().clone(), template);
    }

    /// Insert a situation instance and list it on its placement entity.
    ///
    /// Fails with `NotFound` if the placement entity does not exist; the
    /// instance is not inserted in that case.
    pub fn register_situation(&mut self, situation: SituationInstance) -> Result<(), EngineError> {
        match situation.placement {
            Placement::AtLocation(id) => {
                let location = self
                    .locations
                    .get_mut(&id)
                    .ok_or_else(|| EngineError::not_found("Location", id))?;
                location.active_situations.push(situation.id.clone());
            }
            Placement::WithNpc(id) => {
                let npc = self
                    .npcs
                    .get_mut(&id)
                    .ok_or_else(|| EngineError::not_found("NPC", id))?;
                npc.active_situations.push(situation.id.clone());
            }
            Placement::OnRoute { route, .. } => {
                let route = self
                    .routes
                    .get_mut(&route)
                    .ok_or_else(|| EngineError::not_found("Route", route))?;
                route.active_situations.push(situation.id.clone());
            }
        }
        self.situations.insert(situation.id.clone(), situation);
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn npc(&self, id: &NpcId) -> Option<&Npc> {
        self.npcs.get(id)
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn template(&self, id: &TemplateId) -> Option<&SituationTemplate> {
        self.templates.get(id)
    }

    pub fn situation(&self, id: &SituationId) -> Option<&SituationInstance> {
        self.situations.get(id)
    }

    pub fn situation_mut(&mut self, id: &SituationId) -> Option<&mut SituationInstance> {
        self.situations.get_mut(id)
    }

    /// Situations currently selectable at a location.
    pub fn available_situations_at(&self, location: &LocationId) -> Vec<&SituationInstance> {
        self.locations
            .get(location)
            .map(|l| &l.active_situations)
            .into_iter()
            .flatten()
            .filter_map(|id| self.situations.get(id))
            .filter(|s| s.is_available())
            .collect()
    }
}
