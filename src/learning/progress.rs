use crate::error::{AlphinError, AlphinResult};
use crate::learning::types::{CompletedSet, Completion, LearningUnit, UnitStatus};
use tracing::{debug, info};

/// Status of `unit_id` within the ordered sequence `units`.
///
/// The first unit of the sequence (lowest id) is always open; every other
/// unit opens once its predecessor id is in `completed`.
pub fn status(units: &[LearningUnit], completed: &CompletedSet, unit_id: u32) -> UnitStatus {
    if completed.contains(unit_id) {
        return UnitStatus::Completed;
    }

    let is_first = units.iter().map(|u| u.id).min() == Some(unit_id);
    let predecessor_done = unit_id
        .checked_sub(1)
        .map(|prev| completed.contains(prev))
        .unwrap_or(false);

    if is_first || predecessor_done {
        UnitStatus::Unlocked
    } else {
        UnitStatus::Locked
    }
}

/// Complete `unit_id`, inserting it into `completed` when it is open.
///
/// A locked unit is rejected and nothing changes. Completing a unit twice
/// grants nothing the second time but still reports its reward.
pub fn complete(
    units: &[LearningUnit],
    completed: &mut CompletedSet,
    unit_id: u32,
) -> AlphinResult<Completion> {
    let unit = units
        .iter()
        .find(|u| u.id == unit_id)
        .ok_or(AlphinError::UnknownUnit(unit_id))?;

    match status(units, completed, unit_id) {
        UnitStatus::Locked => {
            debug!("Rejected completion of locked unit {}", unit_id);
            Err(AlphinError::LockedUnit(unit_id))
        }
        UnitStatus::Completed => Ok(Completion::AlreadyCompleted { reward: unit.reward }),
        UnitStatus::Unlocked => {
            completed.insert(unit_id);
            info!("Unit {} '{}' completed (+{})", unit.id, unit.title, unit.reward);
            Ok(Completion::Granted { reward: unit.reward })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: u32) -> Vec<LearningUnit> {
        (0..n)
            .map(|id| LearningUnit {
                id,
                title: format!("Unit {}", id),
                icon: String::new(),
                reward: 10 * (id as u64 + 1),
                completed: false,
            })
            .collect()
    }

    #[test]
    fn test_fresh_sequence_only_first_unlocked() {
        let units = units(5);
        let done = CompletedSet::new();

        assert_eq!(status(&units, &done, 0), UnitStatus::Unlocked);
        for k in 1..5 {
            assert_eq!(status(&units, &done, k), UnitStatus::Locked);
        }
    }

    #[test]
    fn test_first_unit_is_minimum_id() {
        let units: Vec<_> = units(6).into_iter().skip(3).collect();
        let done = CompletedSet::new();

        assert_eq!(status(&units, &done, 3), UnitStatus::Unlocked);
        assert_eq!(status(&units, &done, 4), UnitStatus::Locked);
    }

    #[test]
    fn test_completing_one_unit_opens_only_the_next() {
        let units = units(5);
        let mut done = CompletedSet::new();
        complete(&units, &mut done, 0).unwrap();

        assert_eq!(status(&units, &done, 0), UnitStatus::Completed);
        assert_eq!(status(&units, &done, 1), UnitStatus::Unlocked);
        assert_eq!(status(&units, &done, 2), UnitStatus::Locked);
    }

    #[test]
    fn test_complete_grants_reward() {
        let units = units(3);
        let mut done = CompletedSet::new();

        let result = complete(&units, &mut done, 0).unwrap();
        assert_eq!(result, Completion::Granted { reward: 10 });
        assert!(done.contains(0));
    }

    #[test]
    fn test_complete_is_idempotent() {
        let units = units(3);
        let mut done = CompletedSet::new();
        complete(&units, &mut done, 0).unwrap();
        let before = done.clone();

        let again = complete(&units, &mut done, 0).unwrap();
        assert_eq!(again, Completion::AlreadyCompleted { reward: 10 });
        assert_eq!(done, before);
    }

    #[test]
    fn test_locked_unit_rejected_without_mutation() {
        let units = units(3);
        let mut done = CompletedSet::new();

        let err = complete(&units, &mut done, 2).unwrap_err();
        assert_eq!(err, AlphinError::LockedUnit(2));
        assert!(done.is_empty());
    }

    #[test]
    fn test_unknown_unit() {
        let units = units(2);
        let mut done = CompletedSet::new();
        assert_eq!(
            complete(&units, &mut done, 9).unwrap_err(),
            AlphinError::UnknownUnit(9)
        );
    }

    #[test]
    fn test_seeded_completion_unlocks_successor() {
        let mut units = units(4);
        units[0].completed = true;
        units[1].completed = true;
        let done = CompletedSet::seeded_from(&units);

        assert_eq!(status(&units, &done, 1), UnitStatus::Completed);
        assert_eq!(status(&units, &done, 2), UnitStatus::Unlocked);
        assert_eq!(status(&units, &done, 3), UnitStatus::Locked);
    }
}
