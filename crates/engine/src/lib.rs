//! Storyloom engine: the narrative-progression core.
//!
//! Ties the domain types together into a running rules engine: a world-state
//! aggregate, three ports to neighboring subsystems (clock, messaging,
//! narrative enrichment), and the use-cases - situation selection and
//! completion, consequence application, spawn execution, choice-set
//! assembly, and pre-play content validation.
//!
//! The core is single-threaded cooperative: every operation is a synchronous
//! function over in-memory state. Callers must serialize mutating calls per
//! world instance; read-only evaluation is side-effect-free.

pub mod error;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use error::EngineError;
pub use infrastructure::{
    ClockPort, MessagePort, NarrativePort, NoNarrative, SegmentClock, Severity, TracingMessages,
};
pub use stores::WorldState;
pub use use_cases::{
    ChallengeTarget, ChoiceRepository, ChoiceSetGenerator, ConsequenceApplier, ContentValidator,
    SelectionFailure, SelectionResult, SituationDirector, SpawnEngine, ValidationIssue,
    CHOICE_SET_SIZE, MIN_DISTINCT_TAGS,
};
