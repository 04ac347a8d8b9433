use crate::*;
pub use random::*;

mod random;

/// Builds the shuffled deck for one game session.
pub trait DeckGenerator {
    fn generate(self, settings: &DifficultySettings) -> Deck;
}
