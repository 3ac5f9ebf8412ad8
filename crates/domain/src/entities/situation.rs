//! Situations: the unit of offered narrative content.
//!
//! # Template/Instance Duality
//!
//! Authored content is a `SituationTemplate`: an immutable blueprint with
//! private fields and read-only accessors. Live content is a
//! `SituationInstance`: mutable, individually owned by the world, created by
//! deep-copying a template's cost and requirement structures. A template and
//! its instances are never the same object; cloning never aliases.
//!
//! # Lifecycle
//!
//! Available → Active → Completed. A situation never transitions backward;
//! Completed is terminal whether the outcome was success or failure.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::game_time::GameTime;
use crate::ids::{DeckId, LocationId, NpcId, RouteId, SituationId, TemplateId};
use crate::value_objects::consequence::Consequence;
use crate::value_objects::cost::SituationCost;
use crate::value_objects::requirement::CompoundRequirement;
use crate::value_objects::spawn::SpawnRule;

// =============================================================================
// Interaction and placement
// =============================================================================

/// How selecting a situation resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Consequences apply immediately; no challenge.
    Instant,
    /// Launches a mental challenge; the challenge owns consequence timing.
    Mental,
    /// Launches a physical challenge.
    Physical,
    /// Launches a social challenge.
    Social,
    /// Moves the player; movement has no consequence payload by construction.
    Navigation {
        destination: LocationId,
        auto_trigger: bool,
    },
}

/// The challenge systems a situation can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    Mental,
    Physical,
    Social,
}

/// Where a situation surfaces: exactly one of location, NPC, or route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    AtLocation(LocationId),
    WithNpc(NpcId),
    OnRoute { route: RouteId, segment_index: u32 },
}

// =============================================================================
// Lifecycle
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Available,
    Active,
    Completed,
}

/// How a completed situation resolved; selects which spawn list runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationOutcome {
    Success,
    Failure,
}

/// Provenance carried by every spawned instance, distinct from its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnProvenance {
    pub parent: SituationId,
    pub spawned_at: GameTime,
}

// =============================================================================
// Template
// =============================================================================

/// Immutable blueprint for a situation.
///
/// Constructed once at content-load time via the builder methods; after that
/// only read access exists. Spawning reads from the template and writes into
/// a fresh `SituationInstance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationTemplate {
    id: TemplateId,
    name: String,
    description: String,
    interaction: Interaction,
    deck: Option<DeckId>,
    cost: SituationCost,
    requirement: Option<CompoundRequirement>,
    consequence: Consequence,
    success_spawns: Vec<SpawnRule>,
    failure_spawns: Vec<SpawnRule>,
}

impl SituationTemplate {
    pub fn new(id: TemplateId, name: impl Into<String>, interaction: Interaction) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            interaction,
            deck: None,
            cost: SituationCost::none(),
            requirement: None,
            consequence: Consequence::none(),
            success_spawns: Vec::new(),
            failure_spawns: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_deck(mut self, deck: DeckId) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_cost(mut self, cost: SituationCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_requirement(mut self, requirement: CompoundRequirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.consequence = consequence;
        self
    }

    pub fn with_success_spawn(mut self, rule: SpawnRule) -> Self {
        self.success_spawns.push(rule);
        self
    }

    pub fn with_failure_spawn(mut self, rule: SpawnRule) -> Self {
        self.failure_spawns.push(rule);
        self
    }

    #[inline]
    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[inline]
    pub fn deck(&self) -> Option<DeckId> {
        self.deck
    }

    #[inline]
    pub fn cost(&self) -> &SituationCost {
        &self.cost
    }

    #[inline]
    pub fn requirement(&self) -> Option<&CompoundRequirement> {
        self.requirement.as_ref()
    }

    #[inline]
    pub fn consequence(&self) -> &Consequence {
        &self.consequence
    }

    #[inline]
    pub fn success_spawns(&self) -> &[SpawnRule] {
        &self.success_spawns
    }

    #[inline]
    pub fn failure_spawns(&self) -> &[SpawnRule] {
        &self.failure_spawns
    }
}

// =============================================================================
// Instance
// =============================================================================

/// A live situation in the world.
///
/// Every structured field is an owned deep copy of its template counterpart,
/// so mutating an instance can never reach back into the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationInstance {
    pub id: SituationId,
    pub template: TemplateId,
    pub name: String,
    pub description: String,
    pub interaction: Interaction,
    pub deck: Option<DeckId>,
    pub cost: SituationCost,
    pub requirement: Option<CompoundRequirement>,
    pub consequence: Consequence,
    pub success_spawns: Vec<SpawnRule>,
    pub failure_spawns: Vec<SpawnRule>,
    pub placement: Placement,
    /// Present on spawned instances only; authored content has no parent.
    pub provenance: Option<SpawnProvenance>,
    pub completed_at: Option<GameTime>,
    status: LifecycleStatus,
}

impl SituationInstance {
    /// Instantiate a template at a placement.
    pub fn from_template(
        id: SituationId,
        template: &SituationTemplate,
        placement: Placement,
        provenance: Option<SpawnProvenance>,
    ) -> Self {
        Self {
            id,
            template: template.id().clone(),
            name: template.name().to_string(),
            description: template.description().to_string(),
            interaction: template.interaction(),
            deck: template.deck(),
            cost: *template.cost(),
            requirement: template.requirement().cloned(),
            consequence: template.consequence().clone(),
            success_spawns: template.success_spawns().to_vec(),
            failure_spawns: template.failure_spawns().to_vec(),
            placement,
            provenance,
            completed_at: None,
            status: LifecycleStatus::Available,
        }
    }

    #[inline]
    pub fn status(&self) -> LifecycleStatus {
        self.status
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == LifecycleStatus::Available
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == LifecycleStatus::Completed
    }

    /// The spawn rules for a given outcome.
    pub fn spawns_for(&self, outcome: SituationOutcome) -> &[SpawnRule] {
        match outcome {
            SituationOutcome::Success => &self.success_spawns,
            SituationOutcome::Failure => &self.failure_spawns,
        }
    }

    /// Available → Active. Any other starting status is a constraint error.
    pub fn activate(&mut self) -> Result<(), DomainError> {
        if self.status != LifecycleStatus::Available {
            return Err(DomainError::constraint(format!(
                "Situation '{}' cannot activate from {:?}",
                self.id, self.status
            )));
        }
        self.status = LifecycleStatus::Active;
        Ok(())
    }

    /// Active → Completed, stamping the completion time. Terminal.
    pub fn complete(&mut self, at: GameTime) -> Result<(), DomainError> {
        if self.status != LifecycleStatus::Active {
            return Err(DomainError::constraint(format!(
                "Situation '{}' cannot complete from {:?}",
                self.id, self.status
            )));
        }
        self.status = LifecycleStatus::Completed;
        self.completed_at = Some(at);
        Ok(())
    }
}
