use crate::data::types::Scenario;
use tracing::info;

/// What the active-scenario panel shows until scenarios are generated.
pub const SIMULATION_PLACEHOLDER: &[&str] = &[
    "Generate realistic market data for this scenario",
    "Create dynamic news events",
    "Adjust market volatility",
    "Provide real-time guidance",
    "Score your performance",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScenarioState {
    #[default]
    Inactive,
    Active(Scenario),
}

#[derive(Debug, Default)]
pub struct ScenarioSession {
    state: ScenarioState,
}

impl ScenarioSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `scenario`, replacing any active one. Returns the advisory text.
    pub fn start(&mut self, scenario: Scenario) -> String {
        info!("Scenario started: {} ({})", scenario.name, scenario.difficulty);
        let message = format!(
            "Scenario started: {}! AI is generating market conditions...",
            scenario.name
        );
        self.state = ScenarioState::Active(scenario);
        message
    }

    /// Return to inactive, handing back the scenario that was running.
    pub fn exit(&mut self) -> Option<Scenario> {
        match std::mem::take(&mut self.state) {
            ScenarioState::Active(scenario) => {
                info!("Scenario exited: {}", scenario.name);
                Some(scenario)
            }
            ScenarioState::Inactive => None,
        }
    }

    pub fn active(&self) -> Option<&Scenario> {
        match &self.state {
            ScenarioState::Active(scenario) => Some(scenario),
            ScenarioState::Inactive => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::market::scenarios;

    #[test]
    fn test_start_exit_cycle() {
        let mut session = ScenarioSession::new();
        assert!(!session.is_active());

        let crisis = scenarios().remove(0);
        let msg = session.start(crisis.clone());
        assert_eq!(
            msg,
            "Scenario started: 2008 Financial Crisis! AI is generating market conditions..."
        );
        assert_eq!(session.active(), Some(&crisis));

        assert_eq!(session.exit(), Some(crisis));
        assert!(!session.is_active());
        assert_eq!(session.exit(), None);
    }

    #[test]
    fn test_reenter_and_replace() {
        let mut session = ScenarioSession::new();
        let all = scenarios();

        session.start(all[0].clone());
        session.start(all[2].clone());
        assert_eq!(session.active().map(|s| s.id), Some(3));

        session.exit();
        session.start(all[1].clone());
        assert_eq!(session.active().map(|s| s.id), Some(2));
    }
}
