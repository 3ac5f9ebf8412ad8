use serde::{Deserialize, Serialize};

/// The five player stats gated by situation requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Insight,
    Rapport,
    Authority,
    Diplomacy,
    Cunning,
}

impl StatKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            StatKind::Insight => "Insight",
            StatKind::Rapport => "Rapport",
            StatKind::Authority => "Authority",
            StatKind::Diplomacy => "Diplomacy",
            StatKind::Cunning => "Cunning",
        }
    }

    pub fn all() -> [StatKind; 5] {
        [
            StatKind::Insight,
            StatKind::Rapport,
            StatKind::Authority,
            StatKind::Diplomacy,
            StatKind::Cunning,
        ]
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Player stat block. Stats are granted directly by consequences; there is no
/// experience system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub insight: i32,
    pub rapport: i32,
    pub authority: i32,
    pub diplomacy: i32,
    pub cunning: i32,
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Insight => self.insight,
            StatKind::Rapport => self.rapport,
            StatKind::Authority => self.authority,
            StatKind::Diplomacy => self.diplomacy,
            StatKind::Cunning => self.cunning,
        }
    }

    pub fn add(&mut self, kind: StatKind, delta: i32) {
        let slot = match kind {
            StatKind::Insight => &mut self.insight,
            StatKind::Rapport => &mut self.rapport,
            StatKind::Authority => &mut self.authority,
            StatKind::Diplomacy => &mut self.diplomacy,
            StatKind::Cunning => &mut self.cunning,
        };
        *slot += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_add() {
        let mut stats = Stats::default();
        stats.add(StatKind::Insight, 3);
        stats.add(StatKind::Insight, 1);
        stats.add(StatKind::Cunning, 2);

        assert_eq!(stats.get(StatKind::Insight), 4);
        assert_eq!(stats.get(StatKind::Cunning), 2);
        assert_eq!(stats.get(StatKind::Rapport), 0);
    }
}
