//! Choice-set assembly for encounters.
//!
//! When an encounter must present a bounded set of tagged options, the
//! generator packs exactly six choices under three simultaneous soft
//! constraints: a momentum/pressure split derived from the live ratio, a
//! minimum of three distinct approach and focus tags, and no duplicate
//! triple. There is no optimal solver - greedy selection with repair passes,
//! and best-effort packing when the repository cannot supply a perfect set.
//!
//! The pass order is a priority ladder: seed, fill, diversity repair, balance
//! repair, truncate. Diversity is repaired before balance because an
//! undiverse-but-balanced set is worse than a diverse-but-slightly-imbalanced
//! one, and truncation is always last so repairs never operate on a
//! pre-trimmed set.

use std::collections::HashMap;

use storyloom_domain::{ApproachTag, Choice, EffectKind, EncounterState, FocusTag};

/// Target size of every generated choice set.
pub const CHOICE_SET_SIZE: usize = 6;

/// Minimum distinct approach and focus tags in a generated set.
pub const MIN_DISTINCT_TAGS: usize = 3;

/// Hard cap on repair iterations. The rotate-to-back branch of balance repair
/// does not change counts, so without a cap a repository with no
/// complementary choices could cycle forever.
const MAX_REPAIR_PASSES: usize = 12;

// =============================================================================
// Repository
// =============================================================================

/// The pool of authored choices an encounter can draw from.
#[derive(Debug, Clone)]
pub struct ChoiceRepository {
    choices: Vec<Choice>,
}

impl ChoiceRepository {
    pub fn new(mut choices: Vec<Choice>) -> Self {
        choices.dedup();
        Self { choices }
    }

    /// Every (approach, focus, effect) combination.
    pub fn full() -> Self {
        let mut choices = Vec::new();
        for approach in ApproachTag::all() {
            for focus in FocusTag::all() {
                choices.push(Choice::new(approach, focus, EffectKind::Momentum));
                choices.push(Choice::new(approach, focus, EffectKind::Pressure));
            }
        }
        Self { choices }
    }

    pub fn all(&self) -> &[Choice] {
        &self.choices
    }

    pub fn contains(&self, choice: &Choice) -> bool {
        self.choices.contains(choice)
    }

    pub fn by_approach(&self, approach: ApproachTag) -> impl Iterator<Item = &Choice> {
        self.choices.iter().filter(move |c| c.approach == approach)
    }

    pub fn by_focus(&self, focus: FocusTag) -> impl Iterator<Item = &Choice> {
        self.choices.iter().filter(move |c| c.focus == focus)
    }
}

// =============================================================================
// Generator
// =============================================================================

#[derive(Debug, Default)]
pub struct ChoiceSetGenerator;

impl ChoiceSetGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Assemble a choice set for the given encounter state.
    ///
    /// Never panics for a well-formed repository: when a perfect set does not
    /// exist the result degrades to best-effort packing, possibly smaller
    /// than six for a starved repository.
    pub fn generate(&self, state: &EncounterState, repo: &ChoiceRepository) -> Vec<Choice> {
        let (target_momentum, target_pressure) = Self::target_split(state);
        let approaches = state.ranked_approaches();
        let focuses = state.ranked_focuses();

        let mut set: Vec<Choice> = Vec::new();

        // Seed: the highest-ranked pair on both tracks
        let top_pair = (approaches[0], focuses[0]);
        Self::push_candidate(&mut set, repo, Choice::new(top_pair.0, top_pair.1, EffectKind::Momentum));
        Self::push_candidate(&mut set, repo, Choice::new(top_pair.0, top_pair.1, EffectKind::Pressure));

        // Secondary pair: swap the runner-up in on whichever dimension trails
        // its top tag by the larger margin
        let approach_gap =
            state.approach_value(approaches[0]) - state.approach_value(approaches[1]);
        let focus_gap = state.focus_value(focuses[0]) - state.focus_value(focuses[1]);
        let secondary_pair = if approach_gap >= focus_gap {
            (approaches[1], focuses[0])
        } else {
            (approaches[0], focuses[1])
        };
        Self::push_candidate(
            &mut set,
            repo,
            Choice::new(secondary_pair.0, secondary_pair.1, EffectKind::Momentum),
        );
        Self::push_candidate(
            &mut set,
            repo,
            Choice::new(secondary_pair.0, secondary_pair.1, EffectKind::Pressure),
        );

        // Greedy fill: sweep all ranked combinations, feeding whichever track
        // is under target; at most one choice per combination
        'sweep: for &approach in &approaches {
            for &focus in &focuses {
                if set.len() >= CHOICE_SET_SIZE {
                    break 'sweep;
                }

                let preferred = if Self::count(&set, EffectKind::Momentum) < target_momentum {
                    EffectKind::Momentum
                } else {
                    EffectKind::Pressure
                };

                let mut added = false;
                for effect in [preferred, preferred.other()] {
                    let target = match effect {
                        EffectKind::Momentum => target_momentum,
                        EffectKind::Pressure => target_pressure,
                    };
                    if Self::count(&set, effect) >= target {
                        continue;
                    }
                    let choice = Choice::new(approach, focus, effect);
                    if repo.contains(&choice) && !set.contains(&choice) {
                        set.push(choice);
                        added = true;
                        break;
                    }
                }

                // Best-effort packing: when a track cannot reach its target
                // (the repository has nothing left for it), fill the slot
                // from the other track rather than leave it empty
                if !added {
                    for effect in [preferred, preferred.other()] {
                        let choice = Choice::new(approach, focus, effect);
                        if repo.contains(&choice) && !set.contains(&choice) {
                            set.push(choice);
                            break;
                        }
                    }
                }
            }
        }

        // Diversity repair before balance repair
        self.repair_approach_diversity(&mut set, repo);
        self.repair_focus_diversity(&mut set, repo);
        self.repair_balance(&mut set, repo, target_momentum, target_pressure);

        // Truncation is always last
        set.truncate(CHOICE_SET_SIZE);
        set
    }

    /// Target momentum/pressure split from the live ratio: a momentum-heavy
    /// encounter (>2.0) gets more pressure options, a pressure-heavy one
    /// (<0.5) gets more momentum options, else an even 3/3.
    fn target_split(state: &EncounterState) -> (usize, usize) {
        let ratio = state.momentum_pressure_ratio();
        if ratio > 2.0 {
            (2, 4)
        } else if ratio < 0.5 {
            (4, 2)
        } else {
            (3, 3)
        }
    }

    fn push_candidate(set: &mut Vec<Choice>, repo: &ChoiceRepository, choice: Choice) {
        if repo.contains(&choice) && !set.contains(&choice) {
            set.push(choice);
        }
    }

    fn count(set: &[Choice], effect: EffectKind) -> usize {
        set.iter().filter(|c| c.effect == effect).count()
    }

    // =========================================================================
    // Repair passes
    // =========================================================================

    fn repair_approach_diversity(&self, set: &mut Vec<Choice>, repo: &ChoiceRepository) {
        let mut passes = 0;
        while Self::distinct_approaches(set) < MIN_DISTINCT_TAGS && passes < MAX_REPAIR_PASSES {
            passes += 1;

            let Some(replace_at) = Self::most_duplicated_approach_index(set) else {
                break;
            };
            let unused: Vec<ApproachTag> = ApproachTag::all()
                .into_iter()
                .filter(|a| !set.iter().any(|c| c.approach == *a))
                .collect();

            // Swap only the approach dimension: keeping the entry's focus and
            // effect means this pass cannot disturb focus diversity or the
            // momentum/pressure balance already in the set
            let old = set[replace_at];
            let replacement = unused
                .iter()
                .map(|&approach| Choice::new(approach, old.focus, old.effect))
                .find(|c| repo.contains(c) && !set.contains(c))
                .or_else(|| {
                    unused.iter().find_map(|&approach| {
                        repo.by_approach(approach).find(|c| !set.contains(c)).copied()
                    })
                });

            match replacement {
                Some(choice) => set[replace_at] = choice,
                None => break,
            }
        }
    }

    fn repair_focus_diversity(&self, set: &mut Vec<Choice>, repo: &ChoiceRepository) {
        let mut passes = 0;
        while Self::distinct_focuses(set) < MIN_DISTINCT_TAGS && passes < MAX_REPAIR_PASSES {
            passes += 1;

            let Some(replace_at) = Self::most_duplicated_focus_index(set) else {
                break;
            };
            let unused: Vec<FocusTag> = FocusTag::all()
                .into_iter()
                .filter(|f| !set.iter().any(|c| c.focus == *f))
                .collect();

            // Swap only the focus dimension, preserving approach and effect
            let old = set[replace_at];
            let replacement = unused
                .iter()
                .map(|&focus| Choice::new(old.approach, focus, old.effect))
                .find(|c| repo.contains(c) && !set.contains(c))
                .or_else(|| {
                    unused.iter().find_map(|&focus| {
                        repo.by_focus(focus).find(|c| !set.contains(c)).copied()
                    })
                });

            match replacement {
                Some(choice) => set[replace_at] = choice,
                None => break,
            }
        }
    }

    /// Re-balance momentum/pressure counts toward the target: exchange a
    /// surplus choice for its same-pair counterpart on the other track when
    /// available, else rotate the surplus choice to the back so the next pass
    /// tries a different one.
    fn repair_balance(
        &self,
        set: &mut Vec<Choice>,
        repo: &ChoiceRepository,
        target_momentum: usize,
        target_pressure: usize,
    ) {
        let mut passes = 0;
        while passes < MAX_REPAIR_PASSES {
            passes += 1;
            let momentum = Self::count(set, EffectKind::Momentum);
            let pressure = Self::count(set, EffectKind::Pressure);

            let surplus = if momentum > target_momentum && pressure < target_pressure {
                EffectKind::Momentum
            } else if pressure > target_pressure && momentum < target_momentum {
                EffectKind::Pressure
            } else {
                break;
            };

            let Some(index) = set.iter().position(|c| c.effect == surplus) else {
                break;
            };
            let counterpart = set[index].counterpart();
            if repo.contains(&counterpart) && !set.contains(&counterpart) {
                set[index] = counterpart;
            } else {
                let rotated = set.remove(index);
                set.push(rotated);
            }
        }
    }

    fn distinct_approaches(set: &[Choice]) -> usize {
        let mut counts: HashMap<ApproachTag, usize> = HashMap::new();
        for choice in set {
            *counts.entry(choice.approach).or_insert(0) += 1;
        }
        counts.len()
    }

    fn distinct_focuses(set: &[Choice]) -> usize {
        let mut counts: HashMap<FocusTag, usize> = HashMap::new();
        for choice in set {
            *counts.entry(choice.focus).or_insert(0) += 1;
        }
        counts.len()
    }

    /// Index of the last entry carrying the most-duplicated approach tag.
    /// Last, so the seeded top-ranked pairs at the front survive repair.
    fn most_duplicated_approach_index(set: &[Choice]) -> Option<usize> {
        let mut counts: HashMap<ApproachTag, usize> = HashMap::new();
        for choice in set {
            *counts.entry(choice.approach).or_insert(0) += 1;
        }
        let (most_used, _) = counts
            .into_iter()
            .max_by_key(|(tag, count)| (*count, tag.priority()))?;
        set.iter().rposition(|c| c.approach == most_used)
    }

    /// Index of the last entry carrying the most-duplicated focus tag.
    fn most_duplicated_focus_index(set: &[Choice]) -> Option<usize> {
        let mut counts: HashMap<FocusTag, usize> = HashMap::new();
        for choice in set {
            *counts.entry(choice.focus).or_insert(0) += 1;
        }
        let (most_used, _) = counts
            .into_iter()
            .max_by_key(|(tag, count)| (*count, tag.priority()))?;
        set.iter().rposition(|c| c.focus == most_used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> ChoiceSetGenerator {
        ChoiceSetGenerator::new()
    }

    fn distinct_approaches(set: &[Choice]) -> usize {
        ChoiceSetGenerator::distinct_approaches(set)
    }

    fn distinct_focuses(set: &[Choice]) -> usize {
        ChoiceSetGenerator::distinct_focuses(set)
    }

    fn momentum_count(set: &[Choice]) -> usize {
        set.iter()
            .filter(|c| c.effect == EffectKind::Momentum)
            .count()
    }

    #[test]
    fn test_generates_exactly_six_for_a_full_repository() {
        let set = generator().generate(&EncounterState::new(4, 4), &ChoiceRepository::full());
        assert_eq!(set.len(), CHOICE_SET_SIZE);
    }

    #[test]
    fn test_no_duplicate_triples() {
        let state = EncounterState::new(5, 1)
            .with_approach_value(ApproachTag::Force, 7)
            .with_focus_value(FocusTag::Physical, 6);
        let set = generator().generate(&state, &ChoiceRepository::full());

        for (i, a) in set.iter().enumerate() {
            for b in &set[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_high_momentum_ratio_targets_two_four_split() {
        // momentum:pressure = 3.0 > 2.0 => 2 momentum / 4 pressure
        let set = generator().generate(&EncounterState::new(6, 2), &ChoiceRepository::full());
        assert_eq!(set.len(), CHOICE_SET_SIZE);
        assert_eq!(momentum_count(&set), 2);
    }

    #[test]
    fn test_high_pressure_ratio_targets_four_two_split() {
        // momentum:pressure = 0.25 < 0.5 => 4 momentum / 2 pressure
        let set = generator().generate(&EncounterState::new(2, 8), &ChoiceRepository::full());
        assert_eq!(momentum_count(&set), 4);
    }

    #[test]
    fn test_balanced_ratio_targets_even_split() {
        let set = generator().generate(&EncounterState::new(4, 4), &ChoiceRepository::full());
        assert_eq!(momentum_count(&set), 3);
    }

    #[test]
    fn test_diversity_floor_holds_for_full_repository() {
        // Heavily concentrated tag values try to pull the set into one corner
        let state = EncounterState::new(4, 4)
            .with_approach_value(ApproachTag::Charm, 9)
            .with_focus_value(FocusTag::Relationship, 9);
        let set = generator().generate(&state, &ChoiceRepository::full());

        assert!(distinct_approaches(&set) >= MIN_DISTINCT_TAGS);
        assert!(distinct_focuses(&set) >= MIN_DISTINCT_TAGS);
    }

    #[test]
    fn test_starved_repository_degrades_without_panicking() {
        // Only four combinations exist; packing is best-effort
        let repo = ChoiceRepository::new(vec![
            Choice::new(ApproachTag::Force, FocusTag::Physical, EffectKind::Momentum),
            Choice::new(ApproachTag::Force, FocusTag::Physical, EffectKind::Pressure),
            Choice::new(ApproachTag::Charm, FocusTag::Resource, EffectKind::Momentum),
            Choice::new(ApproachTag::Wit, FocusTag::Information, EffectKind::Pressure),
        ]);
        let set = generator().generate(&EncounterState::new(9, 1), &repo);

        assert!(set.len() <= CHOICE_SET_SIZE);
        assert!(!set.is_empty());
        for (i, a) in set.iter().enumerate() {
            for b in &set[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_empty_repository_yields_empty_set() {
        let set = generator().generate(&EncounterState::new(3, 3), &ChoiceRepository::new(vec![]));
        assert!(set.is_empty());
    }

    #[test]
    fn test_momentum_only_repository_cannot_balance_but_terminates() {
        // Every choice is momentum: balance repair has no counterpart to
        // exchange and must hit its iteration cap, not loop
        let mut choices = Vec::new();
        for approach in ApproachTag::all() {
            for focus in FocusTag::all() {
                choices.push(Choice::new(approach, focus, EffectKind::Momentum));
            }
        }
        let repo = ChoiceRepository::new(choices);
        let set = generator().generate(&EncounterState::new(9, 1), &repo);

        assert_eq!(set.len(), CHOICE_SET_SIZE);
        assert_eq!(momentum_count(&set), CHOICE_SET_SIZE);
    }

    #[test]
    fn test_seed_includes_top_ranked_pair_on_both_tracks() {
        let state = EncounterState::new(4, 4)
            .with_approach_value(ApproachTag::Stealth, 8)
            .with_focus_value(FocusTag::Environment, 8);
        let set = generator().generate(&state, &ChoiceRepository::full());

        assert!(set.contains(&Choice::new(
            ApproachTag::Stealth,
            FocusTag::Environment,
            EffectKind::Momentum
        )));
        assert!(set.contains(&Choice::new(
            ApproachTag::Stealth,
            FocusTag::Environment,
            EffectKind::Pressure
        )));
    }
}
