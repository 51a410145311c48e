use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A mission on the junior roadmap. Ordering is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningUnit {
    pub id: u32,
    pub title: String,
    pub icon: String,
    pub reward: u64,
    /// Seed flag only; live completion is tracked in `CompletedSet`.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub category: String,
    pub question: String,
    pub correct_answer: bool,
    pub explanation: String,
    pub reward: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Granted { reward: u64 },
    AlreadyCompleted { reward: u64 },
}

/// Insert-only set of completed unit ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedSet {
    ids: BTreeSet<u32>,
}

impl CompletedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the units flagged as completed.
    pub fn seeded_from(units: &[LearningUnit]) -> Self {
        Self {
            ids: units.iter().filter(|u| u.completed).map(|u| u.id).collect(),
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Returns false if the id was already present.
    pub fn insert(&mut self, id: u32) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<u32> for CompletedSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
