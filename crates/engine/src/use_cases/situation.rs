//! The strategic layer: situation selection, cost consumption, and routing.
//!
//! # Strategic/Tactical Separation
//!
//! Selecting a situation charges STRATEGIC costs only - resolve, coins, time:
//! the cost of *deciding* to engage. Focus and stamina are TACTICAL costs,
//! charged by the launched challenge subsystem: the cost of *executing* the
//! engagement. The same situation can be affordable to attempt and still
//! failable tactically.
//!
//! The flow per interaction kind:
//! 1. Instant: strategic cost → immediate consequences → spawns
//! 2. Mental/Physical/Social: strategic cost → launch descriptor; the
//!    challenge subsystem re-enters `complete` afterward and owns consequence
//!    timing
//! 3. Navigation: strategic cost → destination; movement carries no
//!    consequence payload by construction
//!
//! Negative outcomes (unknown id, unmet requirement, insufficient resources)
//! are ordinary values, cheap to produce and safe to retry - never errors.

use std::sync::Arc;

use storyloom_domain::{
    ChallengeKind, DeckId, Interaction, LifecycleStatus, LocationId, NpcId, Placement, RouteId,
    ScalingContext, SituationId, SituationOutcome,
};

use crate::error::EngineError;
use crate::infrastructure::{ClockPort, MessagePort, NarrativePort, Severity};
use crate::stores::WorldState;
use crate::use_cases::consequence::ConsequenceApplier;
use crate::use_cases::spawn::SpawnEngine;

// =============================================================================
// Results
// =============================================================================

/// What a launched challenge plays against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeTarget {
    Npc(NpcId),
    Location(LocationId),
    Route(RouteId),
}

/// Player-facing reasons a selection did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionFailure {
    UnknownSituation,
    AlreadyCompleted,
    InProgress,
    RequirementUnmet,
    InsufficientResolve { required: i32, available: i32 },
    InsufficientCoins { required: i32, available: i32 },
}

impl std::fmt::Display for SelectionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionFailure::UnknownSituation => write!(f, "That opportunity no longer exists"),
            SelectionFailure::AlreadyCompleted => write!(f, "Already dealt with"),
            SelectionFailure::InProgress => write!(f, "Already underway"),
            SelectionFailure::RequirementUnmet => {
                write!(f, "Requirements not met for this situation")
            }
            SelectionFailure::InsufficientResolve {
                required,
                available,
            } => write!(f, "Not enough Resolve (need {}, have {})", required, available),
            SelectionFailure::InsufficientCoins {
                required,
                available,
            } => write!(f, "Not enough Coins (need {}, have {})", required, available),
        }
    }
}

/// Result of a selection at the strategic layer. Tells the caller what to do
/// next: nothing, render a resolution, drive a challenge, or move the player.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    Failure(SelectionFailure),
    InstantResolution {
        situation: SituationId,
        narrative: Option<String>,
    },
    LaunchChallenge {
        kind: ChallengeKind,
        situation: SituationId,
        deck: Option<DeckId>,
        target: ChallengeTarget,
    },
    Navigation {
        destination: LocationId,
        auto_trigger: bool,
    },
}

// =============================================================================
// Director
// =============================================================================

/// Orchestrates the situation state machine over one world.
pub struct SituationDirector {
    clock: Arc<dyn ClockPort>,
    messages: Arc<dyn MessagePort>,
    narrative: Arc<dyn NarrativePort>,
    consequences: ConsequenceApplier,
    spawns: SpawnEngine,
}

impl SituationDirector {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        messages: Arc<dyn MessagePort>,
        narrative: Arc<dyn NarrativePort>,
    ) -> Self {
        Self {
            consequences: ConsequenceApplier::new(messages.clone()),
            spawns: SpawnEngine::new(clock.clone()),
            clock,
            messages,
            narrative,
        }
    }

    /// Select a situation: validate its gate, charge strategic costs, and
    /// route by interaction kind.
    ///
    /// Both the requirement and the cost are scaled at query time from the
    /// situation's placement entities, so the gate the player hits matches
    /// the numbers a preview shows.
    pub fn select(
        &self,
        world: &mut WorldState,
        id: &SituationId,
    ) -> Result<SelectionResult, EngineError> {
        let Some(situation) = world.situation(id) else {
            return Ok(SelectionResult::Failure(SelectionFailure::UnknownSituation));
        };

        match situation.status() {
            LifecycleStatus::Completed => {
                return Ok(SelectionResult::Failure(SelectionFailure::AlreadyCompleted))
            }
            LifecycleStatus::Active => {
                return Ok(SelectionResult::Failure(SelectionFailure::InProgress))
            }
            LifecycleStatus::Available => {}
        }

        let scaling = self.scaling_for(world, situation.placement);

        // 1. Requirement gate
        if let Some(requirement) = &situation.requirement {
            if !requirement.is_empty() {
                let scaled = scaling.apply_to_requirement(requirement);
                if !scaled.is_any_satisfied(&world.player) {
                    return Ok(SelectionResult::Failure(SelectionFailure::RequirementUnmet));
                }
            }
        }

        // 2. Strategic affordability: resolve and coins only. Focus/stamina
        //    belong to the launched challenge.
        let cost = scaling.apply_to_cost(&situation.cost);
        if world.player.resolve < cost.resolve {
            return Ok(SelectionResult::Failure(
                SelectionFailure::InsufficientResolve {
                    required: cost.resolve,
                    available: world.player.resolve,
                },
            ));
        }
        if world.player.coins < cost.coins {
            return Ok(SelectionResult::Failure(
                SelectionFailure::InsufficientCoins {
                    required: cost.coins,
                    available: world.player.coins,
                },
            ));
        }

        // 3. Debit and advance the clock. Debit happens-before dispatch.
        if cost.resolve > 0 {
            world.player.resolve -= cost.resolve;
            self.messages.announce(
                &format!(
                    "Resolve spent: {} (now {})",
                    cost.resolve, world.player.resolve
                ),
                Severity::Warning,
            );
        }
        if cost.coins > 0 {
            world.player.coins -= cost.coins;
            self.messages
                .announce(&format!("Coins spent: {}", cost.coins), Severity::Info);
        }
        if cost.time > 0 {
            self.clock.advance_segments(cost.time);
            self.messages.announce(
                &format!("Time passed: {} segments", cost.time),
                Severity::Info,
            );
            self.consequences
                .expire_states(world, self.clock.current());
        }

        let situation = world
            .situation_mut(id)
            .ok_or_else(|| EngineError::not_found("Situation", id))?;
        situation.activate()?;
        let interaction = situation.interaction;
        let deck = situation.deck;
        let placement = situation.placement;

        // 4. Dispatch by interaction kind
        match interaction {
            Interaction::Instant => {
                let narrative = self.resolve_completion(world, id, SituationOutcome::Success)?;
                Ok(SelectionResult::InstantResolution {
                    situation: id.clone(),
                    narrative,
                })
            }
            Interaction::Mental => Ok(self.launch(ChallengeKind::Mental, id, deck, placement)),
            Interaction::Physical => Ok(self.launch(ChallengeKind::Physical, id, deck, placement)),
            Interaction::Social => Ok(self.launch(ChallengeKind::Social, id, deck, placement)),
            Interaction::Navigation {
                destination,
                auto_trigger,
            } => {
                // Movement applies no consequences; the situation simply
                // completes and hands back a destination
                let now = self.clock.current();
                let situation = world
                    .situation_mut(id)
                    .ok_or_else(|| EngineError::not_found("Situation", id))?;
                situation.complete(now)?;
                Ok(SelectionResult::Navigation {
                    destination,
                    auto_trigger,
                })
            }
        }
    }

    /// Completion path, re-entered by challenge subsystems after the launched
    /// challenge resolves (or called internally for instant situations).
    ///
    /// Ordering guarantee: consequence application happens-before spawn
    /// execution, because spawn conditions may read state consequences just
    /// wrote.
    pub fn complete(
        &self,
        world: &mut WorldState,
        id: &SituationId,
        outcome: SituationOutcome,
    ) -> Result<Option<String>, EngineError> {
        let situation = world
            .situation(id)
            .ok_or_else(|| EngineError::not_found("Situation", id))?;
        if situation.status() != LifecycleStatus::Active {
            return Err(EngineError::constraint(format!(
                "Situation '{}' is not active; nothing to complete",
                id
            )));
        }
        self.resolve_completion(world, id, outcome)
    }

    /// Pure preview: the scaling context a selection of this situation would
    /// use, for rendering adjusted requirements and costs without mutating
    /// anything.
    pub fn preview_scaling(
        &self,
        world: &WorldState,
        id: &SituationId,
    ) -> Option<ScalingContext> {
        world
            .situation(id)
            .map(|situation| self.scaling_for(world, situation.placement))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn scaling_for(&self, world: &WorldState, placement: Placement) -> ScalingContext {
        match placement {
            Placement::WithNpc(id) => {
                ScalingContext::derive(world.npc(&id), None, Some(&world.player))
            }
            Placement::AtLocation(id) => {
                ScalingContext::derive(None, world.location(&id), Some(&world.player))
            }
            Placement::OnRoute { .. } => ScalingContext::none(),
        }
    }

    fn launch(
        &self,
        kind: ChallengeKind,
        id: &SituationId,
        deck: Option<DeckId>,
        placement: Placement,
    ) -> SelectionResult {
        let target = match placement {
            Placement::WithNpc(npc) => ChallengeTarget::Npc(npc),
            Placement::AtLocation(location) => ChallengeTarget::Location(location),
            Placement::OnRoute { route, .. } => ChallengeTarget::Route(route),
        };
        SelectionResult::LaunchChallenge {
            kind,
            situation: id.clone(),
            deck,
            target,
        }
    }

    /// Shared completion: consequences, status, narrative, spawns - in that
    /// order.
    fn resolve_completion(
        &self,
        world: &mut WorldState,
        id: &SituationId,
        outcome: SituationOutcome,
    ) -> Result<Option<String>, EngineError> {
        let now = self.clock.current();
        let situation = world
            .situation(id)
            .ok_or_else(|| EngineError::not_found("Situation", id))?;
        let name = situation.name.clone();
        let consequence = situation.consequence.clone();
        let spawn_rules = situation.spawns_for(outcome).to_vec();

        if outcome == SituationOutcome::Success {
            self.consequences.apply(world, &consequence, now);
            world.player.completed_situations += 1;
        }

        let situation = world
            .situation_mut(id)
            .ok_or_else(|| EngineError::not_found("Situation", id))?;
        situation.complete(now)?;

        // Best-effort enrichment: absence never blocks consequences or spawns
        let narrative = self.narrative.enrich(&name);
        if let Some(text) = &narrative {
            self.messages.announce(text, Severity::Info);
        }

        self.spawns.execute_spawn_rules(world, &spawn_rules, id)?;

        Ok(narrative)
    }
}
