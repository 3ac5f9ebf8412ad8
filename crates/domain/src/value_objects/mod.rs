pub mod choice;
pub mod consequence;
pub mod cost;
pub mod requirement;
pub mod scaling;
pub mod spawn;
pub mod stats;

pub use choice::{ApproachTag, Choice, EffectKind, EncounterState, FocusTag};
pub use consequence::{
    ActiveState, BondChange, Consequence, ScaleShift, ScaleType, Scales, StatGrant,
    StateApplication, StateType, BOND_MAX, SCALE_MAX, SCALE_MIN,
};
pub use cost::SituationCost;
pub use requirement::{
    BondThreshold, CompoundRequirement, OrPath, PathProjection, RequirementProjection,
    RequirementStatus, ScaleThreshold,
};
pub use scaling::{Demeanor, PowerDynamic, Quality, ScalingContext};
pub use spawn::{PlacementRelation, RequirementOffsets, SpawnConditions, SpawnRule};
pub use stats::{StatKind, Stats};
