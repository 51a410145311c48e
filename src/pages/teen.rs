use std::sync::Arc;

use crate::advisory::AdvisoryNotifier;
use crate::ai::{AiResult, AiService, Difficulty, GeneratedChallenge};
use crate::config::TeenConfig;
use crate::events::{EventSink, UiEvent};
use crate::learning::{catalog, AnswerOutcome, Challenge, ChallengeDeck, PointsLedger};

/// Result card text for an answer.
pub fn result_message(outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        format!(
            "🎉 Correct! +{} points. {}",
            outcome.reward_granted, outcome.explanation
        )
    } else {
        format!("😅 Not Quite! {}", outcome.explanation)
    }
}

/// True/false swipe game over a fixed deck.
pub struct TeenSession {
    deck: ChallengeDeck,
    points: PointsLedger,
    result_card: AdvisoryNotifier,
    events: EventSink,
    ai: Arc<dyn AiService>,
}

impl TeenSession {
    pub fn new(config: &TeenConfig, ai: Arc<dyn AiService>, events: EventSink) -> Self {
        Self::with_challenges(config, catalog::teen_challenges(), ai, events)
            .unwrap_or_else(|| unreachable!("teen catalog is never empty"))
    }

    /// `None` when `challenges` is empty.
    pub fn with_challenges(
        config: &TeenConfig,
        challenges: Vec<Challenge>,
        ai: Arc<dyn AiService>,
        events: EventSink,
    ) -> Option<Self> {
        Some(Self {
            deck: ChallengeDeck::new(challenges)?,
            points: PointsLedger::new(config.seed_points),
            result_card: AdvisoryNotifier::new(config.result_display(), events.clone()),
            events,
            ai,
        })
    }

    pub fn current(&self) -> &Challenge {
        self.deck.current()
    }

    /// 1-based position in the deck, as shown under the card.
    pub fn progress(&self) -> (usize, usize) {
        self.deck.position()
    }

    pub fn points(&self) -> u64 {
        self.points.balance()
    }

    pub fn result_card(&self) -> &AdvisoryNotifier {
        &self.result_card
    }

    pub fn swipe(&mut self, answer: bool) -> AnswerOutcome {
        let outcome = self.deck.answer(answer, &mut self.points);

        if outcome.correct {
            self.events.emit(UiEvent::PointsChanged(self.points.balance()));
        }
        self.result_card.show(result_message(&outcome));
        self.events.emit(UiEvent::ChallengeAdvanced {
            index: self.deck.index(),
            total: self.deck.len(),
        });

        outcome
    }

    /// Ask the AI backend for an extra practice card on `topic`.
    pub async fn practice_challenge(&self, topic: &str) -> AiResult<GeneratedChallenge> {
        self.ai.swipe_challenge(topic, Difficulty::Medium).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockAiService;
    use std::time::Duration;

    fn session() -> TeenSession {
        TeenSession::new(
            &TeenConfig::default(),
            Arc::new(MockAiService::new()),
            EventSink::detached(),
        )
    }

    #[tokio::test]
    async fn test_correct_swipe_grants_reward() {
        let mut page = session();
        assert_eq!(page.points(), 250);

        let outcome = page.swipe(true);
        assert!(outcome.correct);
        assert_eq!(page.points(), 300);
        assert_eq!(page.progress(), (2, 5));
    }

    #[tokio::test]
    async fn test_wrong_swipe_keeps_points() {
        let mut page = session();
        let outcome = page.swipe(false);

        assert!(!outcome.correct);
        assert_eq!(page.points(), 250);
        assert!(page
            .result_card()
            .current()
            .unwrap()
            .starts_with("😅 Not Quite!"));
    }

    #[tokio::test]
    async fn test_deck_loops_back() {
        let mut page = session();
        for _ in 0..5 {
            let answer = page.current().correct_answer;
            page.swipe(answer);
        }

        assert_eq!(page.progress(), (1, 5));
        assert_eq!(page.current().id, 1);
        assert_eq!(page.points(), 250 + 50 + 50 + 75 + 50 + 75);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_card_hides_after_three_seconds() {
        let mut page = session();
        page.swipe(true);
        assert!(page.result_card().is_visible());

        tokio::time::sleep(Duration::from_millis(3_100)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert!(!page.result_card().is_visible());
    }

    #[tokio::test]
    async fn test_empty_deck_rejected() {
        let page = TeenSession::with_challenges(
            &TeenConfig::default(),
            Vec::new(),
            Arc::new(MockAiService::new()),
            EventSink::detached(),
        );
        assert!(page.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_practice_challenge() {
        let page = session();
        let card = page.practice_challenge("Budgeting").await.unwrap();
        assert_eq!(card.category, "Budgeting");
    }
}
