use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, SituationId};
use crate::value_objects::scaling::Quality;

/// What a location is for. Governance and civic venues carry time pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPurpose {
    Lodging,
    Commerce,
    Leisure,
    Governance,
    Civic,
    Transit,
}

/// A place where situations can surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    /// Quality tier; 0 is unrated and reads as standard.
    pub tier: u8,
    pub purpose: LocationPurpose,
    /// Situations currently offered at this location.
    pub active_situations: Vec<SituationId>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tier: 2,
            purpose: LocationPurpose::Commerce,
            active_situations: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_purpose(mut self, purpose: LocationPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    /// Quality bucketed from the tier; unrated locations read as standard.
    pub fn quality(&self) -> Quality {
        match self.tier {
            1 => Quality::Basic,
            2 => Quality::Standard,
            3 => Quality::Premium,
            tier if tier >= 4 => Quality::Luxury,
            _ => Quality::Standard,
        }
    }
}
