use crate::learning::types::{Challenge, LearningUnit};

/// Junior roadmap. The first two missions ship completed.
pub fn junior_missions() -> Vec<LearningUnit> {
    [
        (0, "What is Money?", "💰", 50, true),
        (1, "Saving & Spending", "🏦", 50, true),
        (2, "Earning Money", "💼", 75, false),
        (3, "Banks & Accounts", "🏛️", 75, false),
        (4, "Wants vs Needs", "🎯", 100, false),
        (5, "Making Smart Choices", "🧠", 100, false),
        (6, "Money Around World", "🌍", 125, false),
        (7, "Future Planning", "🚀", 150, false),
    ]
    .into_iter()
    .map(|(id, title, icon, reward, completed)| LearningUnit {
        id,
        title: title.to_string(),
        icon: icon.to_string(),
        reward,
        completed,
    })
    .collect()
}

pub fn teen_challenges() -> Vec<Challenge> {
    [
        (
            1,
            "📈 Stocks",
            "A company announces record profits. Should you buy their stock?",
            true,
            "Generally yes! Record profits often lead to stock price increases. However, always research more factors.",
            50,
        ),
        (
            2,
            "💳 Credit",
            "Is it smart to only pay the minimum on your credit card?",
            false,
            "No! Paying only minimum means high interest charges. Always pay full balance when possible.",
            50,
        ),
        (
            3,
            "🏠 Real Estate",
            "Real estate is always a safe investment that never loses value.",
            false,
            "False! The 2008 housing crisis proved real estate can lose value. Diversification is key.",
            75,
        ),
        (
            4,
            "💰 Savings",
            "You should save at least 3-6 months of expenses for emergencies.",
            true,
            "Correct! An emergency fund protects you from unexpected expenses and job loss.",
            50,
        ),
        (
            5,
            "📊 Investment",
            "Diversifying your portfolio helps reduce risk.",
            true,
            "Yes! \"Don't put all eggs in one basket\" - spread investments across different assets.",
            75,
        ),
    ]
    .into_iter()
    .map(|(id, category, question, correct_answer, explanation, reward)| Challenge {
        id,
        category: category.to_string(),
        question: question.to_string(),
        correct_answer,
        explanation: explanation.to_string(),
        reward,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missions_are_sequential() {
        let missions = junior_missions();
        assert_eq!(missions.len(), 8);
        for (i, m) in missions.iter().enumerate() {
            assert_eq!(m.id as usize, i);
            assert!(m.reward > 0);
        }
        assert_eq!(missions.iter().filter(|m| m.completed).count(), 2);
    }

    #[test]
    fn test_challenges_have_rewards() {
        let challenges = teen_challenges();
        assert_eq!(challenges.len(), 5);
        assert!(challenges.iter().all(|c| c.reward > 0));
    }
}
