use crate::learning::points::PointsLedger;
use crate::learning::types::Challenge;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub challenge_id: u32,
    pub correct: bool,
    pub reward_granted: u64,
    pub explanation: String,
}

/// Fixed cyclic sequence of true/false challenges.
#[derive(Debug, Clone)]
pub struct ChallengeDeck {
    challenges: Vec<Challenge>,
    index: usize,
}

impl ChallengeDeck {
    /// Returns `None` for an empty deck.
    pub fn new(challenges: Vec<Challenge>) -> Option<Self> {
        if challenges.is_empty() {
            return None;
        }
        Some(Self { challenges, index: 0 })
    }

    pub fn current(&self) -> &Challenge {
        &self.challenges[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based position in the deck and its length, as shown under the card.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.challenges.len())
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Answer the current challenge, credit `ledger` on a correct answer and
    /// move to the next challenge (wrapping after the last).
    pub fn answer(&mut self, answer: bool, ledger: &mut PointsLedger) -> AnswerOutcome {
        let challenge = &self.challenges[self.index];
        let correct = answer == challenge.correct_answer;

        let reward_granted = if correct && ledger.grant(challenge.reward).is_ok() {
            challenge.reward
        } else {
            0
        };

        let outcome = AnswerOutcome {
            challenge_id: challenge.id,
            correct,
            reward_granted,
            explanation: challenge.explanation.clone(),
        };

        self.index = (self.index + 1) % self.challenges.len();
        outcome
    }
}
