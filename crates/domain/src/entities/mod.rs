pub mod location;
pub mod npc;
pub mod player;
pub mod route;
pub mod situation;

pub use location::{Location, LocationPurpose};
pub use npc::Npc;
pub use player::Player;
pub use route::Route;
pub use situation::{
    ChallengeKind, Interaction, LifecycleStatus, Placement, SituationInstance, SituationOutcome,
    SituationTemplate, SpawnProvenance,
};
