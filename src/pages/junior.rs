use std::sync::Arc;
use tracing::{info, warn};

use crate::advisory::AdvisoryNotifier;
use crate::ai::{AiError, AiResult, AiService, Cohort, ConceptExplanation, LearningPath, UserProgress};
use crate::config::JuniorConfig;
use crate::error::{AlphinError, AlphinResult};
use crate::events::{EventSink, UiEvent};
use crate::learning::{catalog, progress, CompletedSet, Completion, LearningUnit, PointsLedger, UnitStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionNotice {
    Unlocked { title: String, reward: u64 },
    AlreadyCompleted { reward: u64 },
}

impl MissionNotice {
    pub fn message(&self) -> String {
        match self {
            MissionNotice::Unlocked { title, .. } => {
                format!("Mission unlocked! In full version, you'd learn about: {}", title)
            }
            MissionNotice::AlreadyCompleted { reward } => format!(
                "You already completed this mission! Earned {} star points! ⭐",
                reward
            ),
        }
    }
}

pub const LOCKED_MESSAGE: &str = "Complete previous missions first! 🔒";

/// Junior roadmap: missions unlock in order and pay star points.
pub struct JuniorSession {
    missions: Vec<LearningUnit>,
    completed: CompletedSet,
    points: PointsLedger,
    advisory: AdvisoryNotifier,
    events: EventSink,
    ai: Arc<dyn AiService>,
}

impl JuniorSession {
    pub fn new(config: &JuniorConfig, ai: Arc<dyn AiService>, events: EventSink) -> Self {
        let missions = catalog::junior_missions();
        let completed = CompletedSet::seeded_from(&missions);

        Self {
            missions,
            completed,
            points: PointsLedger::new(config.seed_points),
            advisory: AdvisoryNotifier::new(config.advisory_duration(), events.clone()),
            events,
            ai,
        }
    }

    pub fn missions(&self) -> &[LearningUnit] {
        &self.missions
    }

    pub fn status(&self, id: u32) -> UnitStatus {
        progress::status(&self.missions, &self.completed, id)
    }

    pub fn points(&self) -> u64 {
        self.points.balance()
    }

    pub fn advisory(&self) -> &AdvisoryNotifier {
        &self.advisory
    }

    /// Click on a roadmap node.
    pub fn select_mission(&mut self, id: u32) -> AlphinResult<MissionNotice> {
        let notice = match progress::complete(&self.missions, &mut self.completed, id) {
            Ok(Completion::Granted { reward }) => {
                let balance = self.points.grant(reward)?;
                self.events.emit(UiEvent::UnitCompleted(id));
                self.events.emit(UiEvent::PointsChanged(balance));

                let title = self
                    .missions
                    .iter()
                    .find(|m| m.id == id)
                    .map(|m| m.title.clone())
                    .unwrap_or_default();
                MissionNotice::Unlocked { title, reward }
            }
            Ok(Completion::AlreadyCompleted { reward }) => MissionNotice::AlreadyCompleted { reward },
            Err(err @ AlphinError::LockedUnit(_)) => {
                self.advisory.show(LOCKED_MESSAGE);
                return Err(err);
            }
            Err(err) => {
                warn!("Mission selection failed: {}", err);
                return Err(err);
            }
        };

        self.advisory.show(notice.message());
        Ok(notice)
    }

    /// Kid-friendly explanation of a mission's topic.
    pub async fn explain_mission(&self, id: u32) -> AiResult<ConceptExplanation> {
        let mission = self
            .missions
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| AiError::InvalidRequest(format!("unknown mission {}", id)))?;

        self.ai.explain_concept(&mission.title, Cohort::Junior).await
    }

    pub async fn suggest_next_topics(&self) -> AiResult<LearningPath> {
        let progress = UserProgress {
            completed_lessons: self.completed.iter().collect(),
            current_level: self.completed.len() as u32,
            ..UserProgress::default()
        };
        info!("Requesting learning path for {} completed missions", progress.completed_lessons.len());

        self.ai.learning_path(&progress).await
    }
}
