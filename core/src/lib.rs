#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use feedback::*;
pub use generator::*;
pub use rating::*;
pub use rewards::*;
pub use types::*;

mod catalog;
mod engine;
mod error;
mod feedback;
mod generator;
mod rating;
mod rewards;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn settings(self) -> &'static DifficultySettings {
        match self {
            Self::Easy => &EASY_SETTINGS,
            Self::Medium => &MEDIUM_SETTINGS,
            Self::Hard => &HARD_SETTINGS,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Medium => "Medio",
            Self::Hard => "Difícil",
        }
    }
}

/// Static per-difficulty tuning: deck size, the move count the star rating
/// treats as optimal, hint allowance, and how long a revealed pair stays up.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DifficultySettings {
    pub card_count: CardCount,
    pub pair_count: CardCount,
    pub required_move_count: u32,
    pub hint_allowance: u8,
    pub flipped_duration_ms: u32,
    pub description: &'static str,
}

pub const EASY_SETTINGS: DifficultySettings = DifficultySettings {
    card_count: 4,
    pair_count: 2,
    required_move_count: 10,
    hint_allowance: 3,
    flipped_duration_ms: 1000,
    description: "Perfecto para comenzar. Solo 2 pares de flores.",
};

pub const MEDIUM_SETTINGS: DifficultySettings = DifficultySettings {
    card_count: 8,
    pair_count: 4,
    required_move_count: 16,
    hint_allowance: 2,
    flipped_duration_ms: 900,
    description: "Desafía tu memoria con 4 pares de flores.",
};

pub const HARD_SETTINGS: DifficultySettings = DifficultySettings {
    card_count: 12,
    pair_count: 6,
    required_move_count: 22,
    hint_allowance: 1,
    flipped_duration_ms: 800,
    description: "Máximo desafío con 6 pares de flores.",
};

/// Ordered flower layout for one game session. Immutable once built; the
/// engine keeps the mutable matched/flipped state separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<FlowerId>,
}

impl Deck {
    /// Builds a deck from an explicit card order, checking that every
    /// flower id appears exactly twice.
    pub fn from_flower_ids(cards: Vec<FlowerId>) -> Result<Self> {
        if cards.len() % 2 != 0 || cards.len() > usize::from(CardIndex::MAX) {
            return Err(GameError::UnbalancedDeck);
        }
        for &id in &cards {
            let copies = cards.iter().filter(|&&other| other == id).count();
            if copies != 2 {
                return Err(GameError::UnbalancedDeck);
            }
        }
        Ok(Self { cards })
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if usize::from(index) < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn size(&self) -> CardCount {
        self.cards.len() as CardCount
    }

    pub fn pair_count(&self) -> CardCount {
        self.size() / 2
    }

    pub fn flower_ids(&self) -> &[FlowerId] {
        &self.cards
    }
}

impl Index<CardIndex> for Deck {
    type Output = FlowerId;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[usize::from(index)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlipOutcome {
    NoChange,
    /// First card of a pair is now face-up.
    FirstRevealed { flower: FlowerId },
    /// Second card is up, the move is counted, and the engine is resolving.
    /// `matched` is known immediately so feedback tones can fire before the
    /// reveal delay runs out.
    PairRevealed { matched: bool },
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    NoChange,
    Matched { flower: FlowerId },
    Mismatched,
    /// The matched pair was the last one.
    Won { flower: FlowerId },
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HintOutcome {
    NoChange,
    /// Name this flower to the player; positions are never revealed.
    Suggest { flower: FlowerId },
}

impl HintOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn difficulty_table_doubles_pairs_into_cards() {
        for difficulty in Difficulty::ALL {
            let settings = difficulty.settings();
            assert_eq!(settings.card_count, settings.pair_count * 2);
        }
    }

    #[test]
    fn deck_rejects_unpaired_flowers() {
        assert_eq!(
            Deck::from_flower_ids(vec![1, 1, 2]),
            Err(GameError::UnbalancedDeck)
        );
        assert_eq!(
            Deck::from_flower_ids(vec![1, 1, 2, 3]),
            Err(GameError::UnbalancedDeck)
        );
        assert_eq!(
            Deck::from_flower_ids(vec![1, 1, 1, 1]),
            Err(GameError::UnbalancedDeck)
        );
    }

    #[test]
    fn deck_reports_size_and_pairs() {
        let deck = Deck::from_flower_ids(vec![2, 1, 1, 2]).unwrap();
        assert_eq!(deck.size(), 4);
        assert_eq!(deck.pair_count(), 2);
        assert_eq!(deck[0], 2);
        assert_eq!(deck.validate_index(3), Ok(3));
        assert_eq!(deck.validate_index(4), Err(GameError::InvalidIndex));
    }
}
