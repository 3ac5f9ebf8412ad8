use serde::{Deserialize, Serialize};

/// The cost block attached to a situation.
///
/// Resolve, coins, and time are strategic costs charged when the player
/// *selects* the situation. Focus and stamina are tactical costs: they travel
/// with the situation so the launched challenge can charge them, but the
/// strategic layer never touches them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationCost {
    pub resolve: i32,
    pub coins: i32,
    /// Time cost in segments.
    pub time: u32,
    pub focus: i32,
    pub stamina: i32,
}

impl SituationCost {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(resolve: i32, coins: i32, time: u32) -> Self {
        Self {
            resolve,
            coins,
            time,
            ..Self::default()
        }
    }

    pub fn with_focus(mut self, focus: i32) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_stamina(mut self, stamina: i32) -> Self {
        self.stamina = stamina;
        self
    }
}
