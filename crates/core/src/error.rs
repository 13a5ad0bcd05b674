use thiserror::Error;

/// Errors that can occur in the Sunforest system
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SunforestError {
    #[error("Invalid board radius: {0} (supported: 0..=4)")]
    InvalidRadius(u8),

    #[error("Richness table has {found} cells, board has {expected}")]
    RichnessMismatch { expected: usize, found: usize },

    #[error("Invalid richness {richness} for cell {cell}")]
    InvalidRichness { cell: usize, richness: u8 },

    #[error("Invalid cell index: {0}")]
    InvalidCell(usize),

    #[error("No tree on cell {0}")]
    NoTreeAt(u8),

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("No legal actions available")]
    NoLegalActions,
}

/// Convenience Result type for Sunforest operations
pub type Result<T> = std::result::Result<T, SunforestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(SunforestError::NoTreeAt(7).to_string(), "No tree on cell 7");
        assert_eq!(
            SunforestError::RichnessMismatch {
                expected: 37,
                found: 36
            }
            .to_string(),
            "Richness table has 36 cells, board has 37"
        );
    }
}
