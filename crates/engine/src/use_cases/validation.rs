//! Pre-play content validation.
//!
//! Authoring-integrity faults should be caught before play begins, not
//! discovered mid-session. The validator sweeps loaded content for references
//! that do not resolve and reports them without touching world state. The
//! runtime spawn path still guards against the same faults; this pass exists
//! so they surface in development.

use storyloom_domain::{Interaction, PlacementRelation, SpawnRule, TemplateId};

use crate::stores::WorldState;

/// One unresolved reference in loaded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    UnknownSpawnTemplate {
        referenced_by: TemplateId,
        missing: TemplateId,
    },
    UnresolvablePlacement {
        referenced_by: TemplateId,
        rule_template: TemplateId,
        detail: String,
    },
    UnknownNavigationDestination {
        template: TemplateId,
        detail: String,
    },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::UnknownSpawnTemplate {
                referenced_by,
                missing,
            } => write!(
                f,
                "template '{}' spawns unknown template '{}'",
                referenced_by, missing
            ),
            ValidationIssue::UnresolvablePlacement {
                referenced_by,
                rule_template,
                detail,
            } => write!(
                f,
                "template '{}' places spawn of '{}' at {}",
                referenced_by, rule_template, detail
            ),
            ValidationIssue::UnknownNavigationDestination { template, detail } => {
                write!(f, "template '{}' navigates to {}", template, detail)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ContentValidator;

impl ContentValidator {
    pub fn new() -> Self {
        Self
    }

    /// Sweep every loaded template for unresolvable references.
    ///
    /// A `SpawnConditions` gate is never an issue - a rule that may never
    /// fire is conditional content. Only dangling ids count.
    pub fn validate(&self, world: &WorldState) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for template in world.templates.values() {
            for rule in template
                .success_spawns()
                .iter()
                .chain(template.failure_spawns())
            {
                self.check_rule(world, template.id(), rule, &mut issues);
            }

            if let Interaction::Navigation { destination, .. } = template.interaction() {
                if world.location(&destination).is_none() {
                    issues.push(ValidationIssue::UnknownNavigationDestination {
                        template: template.id().clone(),
                        detail: format!("unknown location '{}'", destination),
                    });
                }
            }
        }

        issues
    }

    fn check_rule(
        &self,
        world: &WorldState,
        owner: &TemplateId,
        rule: &SpawnRule,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if world.template(&rule.template).is_none() {
            issues.push(ValidationIssue::UnknownSpawnTemplate {
                referenced_by: owner.clone(),
                missing: rule.template.clone(),
            });
        }

        let unresolved = match rule.placement {
            PlacementRelation::SpecificLocation(id) if world.location(&id).is_none() => {
                Some(format!("unknown location '{}'", id))
            }
            PlacementRelation::SpecificNpc(id) if world.npc(&id).is_none() => {
                Some(format!("unknown NPC '{}'", id))
            }
            PlacementRelation::SpecificRoute(id) if world.route(&id).is_none() => {
                Some(format!("unknown route '{}'", id))
            }
            _ => None,
        };
        if let Some(detail) = unresolved {
            issues.push(ValidationIssue::UnresolvablePlacement {
                referenced_by: owner.clone(),
                rule_template: rule.template.clone(),
                detail,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_domain::{
        Location, LocationId, Player, SituationTemplate, SpawnConditions, StateType,
    };

    fn world() -> WorldState {
        WorldState::new(Player::new("Reyes"))
    }

    #[test]
    fn test_clean_content_has_no_issues() {
        let mut world = world();
        let location = Location::new(LocationId::new(), "The Coil");
        let location_id = location.id;
        world.add_location(location);

        world.add_template(SituationTemplate::new(
            TemplateId::new("child"),
            "Child",
            Interaction::Instant,
        ));
        world.add_template(
            SituationTemplate::new(TemplateId::new("parent"), "Parent", Interaction::Instant)
                .with_success_spawn(SpawnRule::new(
                    TemplateId::new("child"),
                    PlacementRelation::SpecificLocation(location_id),
                )),
        );

        assert!(ContentValidator::new().validate(&world).is_empty());
    }

    #[test]
    fn test_unknown_spawn_template_is_reported() {
        let mut world = world();
        world.add_template(
            SituationTemplate::new(TemplateId::new("parent"), "Parent", Interaction::Instant)
                .with_success_spawn(SpawnRule::new(
                    TemplateId::new("ghost"),
                    PlacementRelation::SameLocation,
                )),
        );

        let issues = ContentValidator::new().validate(&world);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ValidationIssue::UnknownSpawnTemplate { missing, .. }
                if missing == &TemplateId::new("ghost")
        ));
    }

    #[test]
    fn test_unresolvable_specific_placement_is_reported() {
        let mut world = world();
        world.add_template(SituationTemplate::new(
            TemplateId::new("child"),
            "Child",
            Interaction::Instant,
        ));
        world.add_template(
            SituationTemplate::new(TemplateId::new("parent"), "Parent", Interaction::Instant)
                .with_failure_spawn(SpawnRule::new(
                    TemplateId::new("child"),
                    PlacementRelation::SpecificLocation(LocationId::new()),
                )),
        );

        let issues = ContentValidator::new().validate(&world);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            ValidationIssue::UnresolvablePlacement { .. }
        ));
    }

    #[test]
    fn test_spawn_conditions_are_never_an_issue() {
        let mut world = world();
        world.add_template(SituationTemplate::new(
            TemplateId::new("child"),
            "Child",
            Interaction::Instant,
        ));
        world.add_template(
            SituationTemplate::new(TemplateId::new("parent"), "Parent", Interaction::Instant)
                .with_success_spawn(
                    SpawnRule::new(TemplateId::new("child"), PlacementRelation::SameLocation)
                        .with_conditions(
                            SpawnConditions::new()
                                .with_min_resolve(99)
                                .with_required_state(StateType::Inspired),
                        ),
                ),
        );

        assert!(ContentValidator::new().validate(&world).is_empty());
    }

    #[test]
    fn test_unknown_navigation_destination_is_reported() {
        let mut world = world();
        world.add_template(SituationTemplate::new(
            TemplateId::new("door"),
            "A Door",
            Interaction::Navigation {
                destination: LocationId::new(),
                auto_trigger: false,
            },
        ));

        let issues = ContentValidator::new().validate(&world);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            ValidationIssue::UnknownNavigationDestination { .. }
        ));
    }
}
