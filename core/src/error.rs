use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidIndex,
    #[error("Deck does not contain every flower exactly twice")]
    UnbalancedDeck,
}

pub type Result<T> = core::result::Result<T, GameError>;
