use thiserror::Error;

/// User-facing rejections. None of these are faults: the page reports them
/// through the advisory and stays interactive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlphinError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Insufficient funds: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Unit {0} is locked")]
    LockedUnit(u32),

    #[error("Unknown unit: {0}")]
    UnknownUnit(u32),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(u32),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

pub type AlphinResult<T> = Result<T, AlphinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlphinError::InsufficientFunds {
            needed: 10100.0,
            available: 10000.0,
        };
        assert_eq!(err.to_string(), "Insufficient funds: need $10100.00, have $10000.00");

        let err = AlphinError::LockedUnit(4);
        assert_eq!(err.to_string(), "Unit 4 is locked");
    }
}
