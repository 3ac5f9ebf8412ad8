//! Storyloom domain: the types and invariants of the narrative-progression
//! core. Entities, value objects, game time, and ids - synchronous, no I/O.

pub mod entities;
pub mod error;
pub mod game_time;
pub mod ids;
pub mod value_objects;

pub use entities::{
    ChallengeKind, Interaction, LifecycleStatus, Location, LocationPurpose, Npc, Placement, Player,
    Route, SituationInstance, SituationOutcome, SituationTemplate, SpawnProvenance,
};
pub use error::DomainError;
pub use game_time::{GameTime, TimeBlock, SEGMENTS_PER_BLOCK, SEGMENTS_PER_DAY};
pub use ids::{
    AchievementId, DeckId, ItemId, LocationId, NpcId, RouteId, SituationId, TemplateId,
};
pub use value_objects::{
    ActiveState, ApproachTag, BondChange, BondThreshold, Choice, CompoundRequirement, Consequence,
    Demeanor, EffectKind, EncounterState, FocusTag, OrPath, PathProjection, PlacementRelation,
    PowerDynamic, Quality, RequirementOffsets, RequirementProjection, RequirementStatus,
    ScaleShift, ScaleThreshold, ScaleType, Scales, ScalingContext, SituationCost, SpawnConditions,
    SpawnRule, StatGrant, StatKind, StateApplication, StateType, Stats, BOND_MAX, SCALE_MAX,
    SCALE_MIN,
};
