use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, RouteId, SituationId};

/// A travel route between two locations, divided into segments so content can
/// be pinned to a specific stretch of the journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub from: LocationId,
    pub to: LocationId,
    pub segment_count: u32,
    /// Situations currently offered along this route.
    pub active_situations: Vec<SituationId>,
}

impl Route {
    pub fn new(id: RouteId, name: impl Into<String>, from: LocationId, to: LocationId) -> Self {
        Self {
            id,
            name: name.into(),
            from,
            to,
            segment_count: 1,
            active_situations: Vec::new(),
        }
    }

    pub fn with_segment_count(mut self, count: u32) -> Self {
        self.segment_count = count;
        self
    }
}
