//! Learning progression: mission gating, points, and the challenge deck.

pub mod catalog;
pub mod deck;
pub mod points;
pub mod progress;
pub mod types;

pub use deck::{AnswerOutcome, ChallengeDeck};
pub use points::PointsLedger;
pub use types::{Challenge, CompletedSet, Completion, LearningUnit, UnitStatus};
