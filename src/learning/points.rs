use crate::error::{AlphinError, AlphinResult};

/// Reward points for one page. Points are only ever granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsLedger {
    balance: u64,
}

impl PointsLedger {
    pub fn new(seed: u64) -> Self {
        Self { balance: seed }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn grant(&mut self, amount: u64) -> AlphinResult<u64> {
        if amount == 0 {
            return Err(AlphinError::InvalidOrder(
                "reward must be greater than zero".to_string(),
            ));
        }
        self.balance = self.balance.saturating_add(amount);
        Ok(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_accumulates() {
        let mut ledger = PointsLedger::new(150);
        assert_eq!(ledger.grant(75).unwrap(), 225);
        assert_eq!(ledger.grant(25).unwrap(), 250);
        assert_eq!(ledger.balance(), 250);
    }

    #[test]
    fn test_zero_grant_rejected() {
        let mut ledger = PointsLedger::new(250);
        assert!(matches!(ledger.grant(0), Err(AlphinError::InvalidOrder(_))));
        assert_eq!(ledger.balance(), 250);
    }
}
