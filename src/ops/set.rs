//! Operations on timelines of entity sets.

use crate::entity::{Entity, EntitySet};
use crate::timeline::combine::{combine1, combine2};
use crate::timeline::{BoolTimeline, NumTimeline, SetTimeline, Timeline};

impl Timeline<EntitySet> {
    pub fn union(&self, other: &SetTimeline) -> SetTimeline {
        combine2(self, other, |a, b| a.union(b))
    }

    pub fn intersection(&self, other: &SetTimeline) -> SetTimeline {
        combine2(self, other, |a, b| a.intersection(b))
    }

    pub fn difference(&self, other: &SetTimeline) -> SetTimeline {
        combine2(self, other, |a, b| a.difference(b))
    }

    pub fn contains(&self, member: &Entity) -> BoolTimeline {
        combine1(self, |s| s.contains(member))
    }

    /// Number of members.
    pub fn count(&self) -> NumTimeline {
        combine1(self, |s| s.len() as f64)
    }

    pub fn is_empty_set(&self) -> BoolTimeline {
        combine1(self, |s| s.is_empty())
    }

    pub fn is_subset_of(&self, other: &SetTimeline) -> BoolTimeline {
        combine2(self, other, |a, b| a.is_subset(b))
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::{Entity, EntitySet};
    use crate::state::ValueState;
    use crate::timeline::{SetTimeline, Timeline, ymd};

    fn set(names: &[&str]) -> EntitySet {
        names.iter().map(|n| Entity::from(*n)).collect()
    }

    #[test]
    fn household_changes_over_time() {
        let household =
            Timeline::eternal(set(&["ann"])).with_known(ymd(2014, 6, 1), set(&["ann", "bo"]));
        let dependents = SetTimeline::eternal(set(&["bo"]));

        assert_eq!(
            household.count(),
            Timeline::eternal(1.0).with_known(ymd(2014, 6, 1), 2.0)
        );
        assert_eq!(
            household.contains(&Entity::from("bo")),
            Timeline::eternal(false).with_known(ymd(2014, 6, 1), true)
        );
        assert_eq!(
            dependents.is_subset_of(&household),
            Timeline::eternal(false).with_known(ymd(2014, 6, 1), true)
        );
        assert_eq!(
            household.difference(&dependents),
            SetTimeline::eternal(set(&["ann"]))
        );
        assert_eq!(
            household.intersection(&dependents),
            Timeline::eternal(set(&[])).with_known(ymd(2014, 6, 1), set(&["bo"]))
        );
        assert_eq!(
            household.union(&dependents),
            SetTimeline::eternal(set(&["ann", "bo"]))
        );
    }

    #[test]
    fn empty_set_and_unknowns() {
        assert_eq!(
            SetTimeline::eternal(EntitySet::new()).is_empty_set(),
            Timeline::eternal(true)
        );
        let unknown = SetTimeline::of_state(ValueState::Unstated);
        assert_eq!(unknown.count(), Timeline::of_state(ValueState::Unstated));
    }
}
