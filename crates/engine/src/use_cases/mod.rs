pub mod consequence;
pub mod encounter;
pub mod situation;
pub mod spawn;
pub mod validation;

pub use consequence::ConsequenceApplier;
pub use encounter::{ChoiceRepository, ChoiceSetGenerator, CHOICE_SET_SIZE, MIN_DISTINCT_TAGS};
pub use situation::{ChallengeTarget, SelectionFailure, SelectionResult, SituationDirector};
pub use spawn::SpawnEngine;
pub use validation::{ContentValidator, ValidationIssue};
