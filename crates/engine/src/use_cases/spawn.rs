//! The spawn engine: cascading situation chains.
//!
//! A parent situation's completion consumes its spawn rules, each producing
//! zero or one child. Children are deep clones of authored templates with a
//! deterministic composite id and optionally offset requirements; a spawned
//! child may itself spawn further children on its own completion, forming an
//! unbounded forest. The engine enforces no depth limit - branching is
//! bounded by authored content and player progression.

use std::sync::Arc;

use storyloom_domain::{
    GameTime, Placement, PlacementRelation, SituationId, SituationInstance, SpawnProvenance,
    SpawnRule, SEGMENTS_PER_BLOCK,
};

use crate::error::EngineError;
use crate::infrastructure::ClockPort;
use crate::stores::WorldState;

pub struct SpawnEngine {
    clock: Arc<dyn ClockPort>,
}

impl SpawnEngine {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }

    /// Execute a parent's spawn rules.
    ///
    /// Per rule:
    /// - unmet `SpawnConditions` skip silently (conditional content);
    /// - a missing template skips with a warning (authoring gaps must not
    ///   crash a running session);
    /// - an explicit placement id that does not resolve is an authoring
    ///   fault: the child is abandoned, nothing is registered, and the batch
    ///   aborts with `EngineError::Authoring`.
    ///
    /// Newly created situations are discoverable through the world store
    /// afterward, not via a return value.
    pub fn execute_spawn_rules(
        &self,
        world: &mut WorldState,
        rules: &[SpawnRule],
        parent_id: &SituationId,
    ) -> Result<(), EngineError> {
        if rules.is_empty() {
            return Ok(());
        }

        let parent_placement = world
            .situation(parent_id)
            .ok_or_else(|| EngineError::not_found("Situation", parent_id))?
            .placement;

        for rule in rules {
            if let Some(conditions) = &rule.conditions {
                if !conditions.is_met(&world.player) {
                    tracing::debug!(template = %rule.template, "spawn conditions not met, skipping");
                    continue;
                }
            }

            let Some(template) = world.template(&rule.template) else {
                tracing::warn!(template = %rule.template, "spawn template not found, skipping");
                continue;
            };

            let now = self.clock.current();
            let placement = Self::resolve_placement(world, rule, parent_placement)?;

            let id = SituationId::spawned(
                template.id(),
                parent_id,
                now.day,
                Self::segment_of_day(now),
            );
            let mut spawned = SituationInstance::from_template(
                id,
                template,
                placement,
                Some(SpawnProvenance {
                    parent: parent_id.clone(),
                    spawned_at: now,
                }),
            );

            if let Some(offsets) = &rule.offsets {
                spawned.requirement = spawned
                    .requirement
                    .as_ref()
                    .map(|requirement| offsets.apply_to(requirement));
            }

            tracing::debug!(situation = %spawned.id, parent = %parent_id, "spawning situation");
            world.register_situation(spawned)?;
        }

        Ok(())
    }

    /// Absolute segment within the day, so two spawns in different blocks of
    /// the same day get distinct composite ids.
    fn segment_of_day(now: GameTime) -> u8 {
        now.block.index() * SEGMENTS_PER_BLOCK + now.segment
    }

    fn resolve_placement(
        world: &WorldState,
        rule: &SpawnRule,
        parent: Placement,
    ) -> Result<Placement, EngineError> {
        match rule.placement {
            PlacementRelation::SameLocation => match parent {
                Placement::AtLocation(_) => Ok(parent),
                _ => Err(EngineError::authoring(
                    "spawn placement",
                    format!(
                        "rule for template '{}' inherits a location but parent has none",
                        rule.template
                    ),
                )),
            },
            PlacementRelation::SameNpc => match parent {
                Placement::WithNpc(_) => Ok(parent),
                _ => Err(EngineError::authoring(
                    "spawn placement",
                    format!(
                        "rule for template '{}' inherits an NPC but parent has none",
                        rule.template
                    ),
                )),
            },
            PlacementRelation::SameRoute => match parent {
                Placement::OnRoute { .. } => Ok(parent),
                _ => Err(EngineError::authoring(
                    "spawn placement",
                    format!(
                        "rule for template '{}' inherits a route but parent has none",
                        rule.template
                    ),
                )),
            },
            PlacementRelation::SpecificLocation(id) => {
                if world.location(&id).is_none() {
                    return Err(EngineError::authoring(
                        "spawn placement",
                        format!("location '{}' does not exist", id),
                    ));
                }
                Ok(Placement::AtLocation(id))
            }
            PlacementRelation::SpecificNpc(id) => {
                if world.npc(&id).is_none() {
                    return Err(EngineError::authoring(
                        "spawn placement",
                        format!("NPC '{}' does not exist", id),
                    ));
                }
                Ok(Placement::WithNpc(id))
            }
            PlacementRelation::SpecificRoute(id) => {
                if world.route(&id).is_none() {
                    return Err(EngineError::authoring(
                        "spawn placement",
                        format!("route '{}' does not exist", id),
                    ));
                }
                Ok(Placement::OnRoute {
                    route: id,
                    segment_index: 0,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_domain::{
        CompoundRequirement, Interaction, Location, LocationId, Npc, NpcId, OrPath, Player,
        RequirementOffsets, SituationTemplate, SpawnConditions, TemplateId,
    };

    use crate::infrastructure::SegmentClock;

    fn engine_at(start: GameTime) -> SpawnEngine {
        SpawnEngine::new(Arc::new(SegmentClock::new(start)))
    }

    /// World with one location, one NPC, a parent instance at the location,
    /// and a child template registered.
    fn world_with_parent() -> (WorldState, LocationId, SituationId) {
        let mut world = WorldState::new(Player::new("Reyes"));
        let location = Location::new(LocationId::new(), "The Coil");
        let location_id = location.id;
        world.add_location(location);

        let child = SituationTemplate::new(
            TemplateId::new("followup"),
            "The Follow-Up",
            Interaction::Instant,
        )
        .with_requirement(CompoundRequirement::single(
            OrPath::new().with_resolve(4).with_coins(10),
        ));
        world.add_template(child);

        let parent_template = SituationTemplate::new(
            TemplateId::new("opener"),
            "The Opener",
            Interaction::Instant,
        );
        let parent = SituationInstance::from_template(
            SituationId::new("opener_1"),
            &parent_template,
            Placement::AtLocation(location_id),
            None,
        );
        let parent_id = parent.id.clone();
        world.register_situation(parent).expect("parent registers");

        (world, location_id, parent_id)
    }

    fn rule(placement: PlacementRelation) -> SpawnRule {
        SpawnRule::new(TemplateId::new("followup"), placement)
    }

    #[test]
    fn test_spawn_inherits_parent_location() {
        let (mut world, location_id, parent_id) = world_with_parent();
        let engine = engine_at(GameTime::start_of_day(3));

        engine
            .execute_spawn_rules(&mut world, &[rule(PlacementRelation::SameLocation)], &parent_id)
            .expect("spawn succeeds");

        let spawned_id = SituationId::new("followup:opener_1:3:1");
        let spawned = world.situation(&spawned_id).expect("child exists");
        assert_eq!(spawned.placement, Placement::AtLocation(location_id));
        assert_eq!(
            spawned.provenance.as_ref().map(|p| &p.parent),
            Some(&parent_id)
        );
        // Child is listed on the location alongside its parent
        assert_eq!(world.available_situations_at(&location_id).len(), 2);
    }

    #[test]
    fn test_unmet_conditions_skip_silently() {
        let (mut world, location_id, parent_id) = world_with_parent();
        world.player.resolve = 2;
        let engine = engine_at(GameTime::start_of_day(1));

        let gated = rule(PlacementRelation::SameLocation)
            .with_conditions(SpawnConditions::new().with_min_resolve(5));
        engine
            .execute_spawn_rules(&mut world, &[gated], &parent_id)
            .expect("a rule that never fires is not an error");

        assert_eq!(world.available_situations_at(&location_id).len(), 1);
    }

    #[test]
    fn test_missing_template_skips_without_error() {
        let (mut world, location_id, parent_id) = world_with_parent();
        let engine = engine_at(GameTime::start_of_day(1));

        let dangling = SpawnRule::new(
            TemplateId::new("no_such_template"),
            PlacementRelation::SameLocation,
        );
        engine
            .execute_spawn_rules(&mut world, &[dangling], &parent_id)
            .expect("missing template must not crash a running session");

        assert_eq!(world.available_situations_at(&location_id).len(), 1);
    }

    #[test]
    fn test_unresolvable_specific_placement_is_an_authoring_fault() {
        let (mut world, location_id, parent_id) = world_with_parent();
        let engine = engine_at(GameTime::start_of_day(1));

        let broken = rule(PlacementRelation::SpecificLocation(LocationId::new()));
        let err = engine
            .execute_spawn_rules(&mut world, &[broken], &parent_id)
            .expect_err("an explicit id that does not resolve is corrupt content");

        assert!(err.is_authoring());
        // Abandoned, not partially applied
        assert_eq!(world.situations.len(), 1);
        assert_eq!(world.available_situations_at(&location_id).len(), 1);
    }

    #[test]
    fn test_specific_npc_placement_resolves() {
        let (mut world, _, parent_id) = world_with_parent();
        let npc = Npc::new(NpcId::new(), "Marchetti");
        let npc_id = npc.id;
        world.add_npc(npc);
        let engine = engine_at(GameTime::start_of_day(1));

        engine
            .execute_spawn_rules(
                &mut world,
                &[rule(PlacementRelation::SpecificNpc(npc_id))],
                &parent_id,
            )
            .expect("spawn succeeds");

        let npc = world.npc(&npc_id).expect("npc exists");
        assert_eq!(npc.active_situations.len(), 1);
    }

    #[test]
    fn test_offsets_apply_to_the_clone_only() {
        let (mut world, _, parent_id) = world_with_parent();
        let engine = engine_at(GameTime::start_of_day(1));

        let eased = rule(PlacementRelation::SameLocation)
            .with_offsets(RequirementOffsets::new().with_numeric(-2));
        engine
            .execute_spawn_rules(&mut world, &[eased], &parent_id)
            .expect("spawn succeeds");

        let spawned_id = SituationId::new("followup:opener_1:1:1");
        let spawned = world.situation(&spawned_id).expect("child exists");
        let path = &spawned.requirement.as_ref().expect("requirement kept").paths[0];
        assert_eq!(path.resolve, Some(2));
        assert_eq!(path.coins, Some(8));
    }

    #[test]
    fn test_template_is_bit_identical_after_repeated_spawns() {
        let (mut world, _, parent_id) = world_with_parent();
        let snapshot = world
            .template(&TemplateId::new("followup"))
            .expect("template exists")
            .clone();

        // Spawn several times across distinct segments so ids do not collide
        for _ in 0..3 {
            let clock = SegmentClock::new(GameTime::start_of_day(1));
            // Each engine call happens at a different time
            clock.advance_segments(world.situations.len() as u32);
            let engine = SpawnEngine::new(Arc::new(clock));
            let eased = rule(PlacementRelation::SameLocation)
                .with_offsets(RequirementOffsets::new().with_numeric(-1));
            engine
                .execute_spawn_rules(&mut world, &[eased], &parent_id)
                .expect("spawn succeeds");
        }

        let template = world
            .template(&TemplateId::new("followup"))
            .expect("template exists");
        assert_eq!(template, &snapshot);
    }

    #[test]
    fn test_spawn_ids_are_deterministic() {
        let (mut world, _, parent_id) = world_with_parent();
        let engine = engine_at(GameTime::start_of_day(5).advance_segments(6));

        engine
            .execute_spawn_rules(&mut world, &[rule(PlacementRelation::SameLocation)], &parent_id)
            .expect("spawn succeeds");

        // Day 5, Midday segment 3 => 7th segment of the day
        assert!(world
            .situation(&SituationId::new("followup:opener_1:5:7"))
            .is_some());
    }
}
