use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Authored content carries slug identifiers rather than UUIDs: templates are
/// referenced by name from spawn rules, and spawned instances get a composite
/// key derived from their template and parent (see `SituationId::spawned`).
macro_rules! define_key {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

// World entity IDs
define_id!(NpcId);
define_id!(LocationId);
define_id!(RouteId);

// Inventory and progression IDs
define_id!(ItemId);
define_id!(AchievementId);

// Challenge deck IDs
define_id!(DeckId);

// Authored content keys
define_key!(TemplateId);
define_key!(SituationId);

impl SituationId {
    /// Deterministic composite id for a spawned instance.
    ///
    /// Uniqueness comes from the (template, parent, day, segment) tuple, so no
    /// global counter is needed and spawn results are reproducible.
    pub fn spawned(template: &TemplateId, parent: &SituationId, day: u32, segment: u8) -> Self {
        Self(format!("{}:{}:{}:{}", template, parent, day, segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_are_unique() {
        assert_ne!(NpcId::new(), NpcId::new());
        assert_ne!(LocationId::new(), LocationId::new());
    }

    #[test]
    fn test_spawned_id_is_deterministic() {
        let template = TemplateId::new("dock_confrontation");
        let parent = SituationId::new("warehouse_break_in");

        let a = SituationId::spawned(&template, &parent, 3, 2);
        let b = SituationId::spawned(&template, &parent, 3, 2);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "dock_confrontation:warehouse_break_in:3:2");
    }

    #[test]
    fn test_spawned_id_varies_with_time() {
        let template = TemplateId::new("dock_confrontation");
        let parent = SituationId::new("warehouse_break_in");

        let a = SituationId::spawned(&template, &parent, 3, 2);
        let b = SituationId::spawned(&template, &parent, 3, 3);
        assert_ne!(a, b);
    }
}
