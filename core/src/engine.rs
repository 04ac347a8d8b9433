use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    /// Cards may be flipped.
    Active,
    /// Two cards are face-up; no flips are accepted until
    /// [`MatchEngine::resolve_pending`] applies the outcome.
    Resolving,
    /// Every pair has been matched.
    Won,
}

impl EngineState {
    pub const fn is_resolving(self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// Snapshot of one card slot as the UI sees it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub flower_id: FlowerId,
    pub is_matched: bool,
}

/// The match/flip state machine for one game session.
///
/// Every operation is total: guard conditions turn invalid calls into
/// no-change outcomes rather than errors. The only errors are structural
/// (out-of-range index, unbalanced deck). The engine has no clock; the
/// caller drives the resolution delay and calls [`resolve_pending`]
/// (`MatchEngine::resolve_pending`) when it elapses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    deck: Deck,
    matched: Vec<bool>,
    flipped: SmallVec<[CardIndex; 2]>,
    matches: CardCount,
    moves: u32,
    hints_used: u32,
    state: EngineState,
}

impl MatchEngine {
    pub fn new(deck: Deck) -> Self {
        let size = usize::from(deck.size());
        Self {
            deck,
            matched: vec![false; size],
            flipped: SmallVec::new(),
            matches: 0,
            moves: 0,
            hints_used: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn deck_size(&self) -> CardCount {
        self.deck.size()
    }

    pub fn pair_count(&self) -> CardCount {
        self.deck.pair_count()
    }

    pub fn matches(&self) -> CardCount {
        self.matches
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// The 0-2 indices currently face-up pending resolution.
    pub fn flipped_indices(&self) -> &[CardIndex] {
        &self.flipped
    }

    pub fn card_at(&self, index: CardIndex) -> Card {
        Card {
            flower_id: self.deck[index],
            is_matched: self.matched[usize::from(index)],
        }
    }

    /// Whether the card shows its face: matched, or in the flipped set.
    pub fn is_face_up(&self, index: CardIndex) -> bool {
        self.matched[usize::from(index)] || self.flipped.contains(&index)
    }

    /// Flips the card at `index`. No-op while the game is won, a pair is
    /// resolving, the card is already matched, or the card is already up.
    pub fn flip_card(&mut self, index: CardIndex) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        let index = self.deck.validate_index(index)?;

        if self.state.is_won()
            || self.flipped.len() == 2
            || self.matched[usize::from(index)]
            || self.flipped.contains(&index)
        {
            return Ok(NoChange);
        }

        self.flipped.push(index);
        let flower = self.deck[index];

        Ok(if self.flipped.len() == 1 {
            FirstRevealed { flower }
        } else {
            self.moves += 1;
            self.state = EngineState::Resolving;
            let first = self.deck[self.flipped[0]];
            log::debug!(
                "pair up: flowers {} and {}, move {}",
                first,
                flower,
                self.moves
            );
            PairRevealed {
                matched: first == flower,
            }
        })
    }

    /// Applies the pending pair after the reveal delay: marks both cards
    /// matched on a match, clears the flipped set either way.
    pub fn resolve_pending(&mut self) -> ResolveOutcome {
        use ResolveOutcome::*;

        let &[first, second] = self.flipped.as_slice() else {
            return NoChange;
        };

        let flower = self.deck[first];
        let outcome = if flower == self.deck[second] {
            self.matched[usize::from(first)] = true;
            self.matched[usize::from(second)] = true;
            self.matches += 1;
            if self.matches == self.deck.pair_count() {
                self.state = EngineState::Won;
                Won { flower }
            } else {
                self.state = EngineState::Active;
                Matched { flower }
            }
        } else {
            self.state = EngineState::Active;
            Mismatched
        };

        self.flipped.clear();
        outcome
    }

    /// Picks the first unmatched card and confirms another unmatched card
    /// shares its flower, then signals that flower's name. Positions stay
    /// hidden; finding them is the player's job.
    pub fn hint(&mut self) -> HintOutcome {
        use HintOutcome::*;

        let Some(first) = (0..self.deck.size()).find(|&i| !self.matched[usize::from(i)]) else {
            return NoChange;
        };
        let flower = self.deck[first];

        let has_partner = (0..self.deck.size())
            .filter(|&i| i != first && !self.matched[usize::from(i)])
            .any(|i| self.deck[i] == flower);
        if !has_partner {
            return NoChange;
        }

        self.hints_used += 1;
        Suggest { flower }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(flowers: &[FlowerId]) -> MatchEngine {
        MatchEngine::new(Deck::from_flower_ids(flowers.to_vec()).unwrap())
    }

    #[test]
    fn first_flip_reveals_flower_without_counting_a_move() {
        let mut engine = engine(&[1, 2, 1, 2]);

        let outcome = engine.flip_card(0).unwrap();

        assert_eq!(outcome, FlipOutcome::FirstRevealed { flower: 1 });
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.state(), EngineState::Active);
        assert!(engine.is_face_up(0));
    }

    #[test]
    fn second_flip_counts_the_move_and_starts_resolving() {
        let mut engine = engine(&[1, 2, 1, 2]);

        engine.flip_card(0).unwrap();
        let outcome = engine.flip_card(2).unwrap();

        assert_eq!(outcome, FlipOutcome::PairRevealed { matched: true });
        assert_eq!(engine.moves(), 1);
        assert!(engine.state().is_resolving());
        assert_eq!(engine.flipped_indices(), &[0, 2]);
    }

    #[test]
    fn matched_pair_resolves_to_matched_cards() {
        let mut engine = engine(&[1, 2, 1, 2]);

        engine.flip_card(0).unwrap();
        engine.flip_card(2).unwrap();
        let outcome = engine.resolve_pending();

        assert_eq!(outcome, ResolveOutcome::Matched { flower: 1 });
        assert_eq!(engine.matches(), 1);
        assert!(engine.card_at(0).is_matched);
        assert!(engine.card_at(2).is_matched);
        assert!(engine.flipped_indices().is_empty());
        assert_eq!(engine.state(), EngineState::Active);
    }

    #[test]
    fn mismatched_pair_resolves_without_marking_anything() {
        let mut engine = engine(&[1, 2, 1, 2]);

        engine.flip_card(0).unwrap();
        engine.flip_card(1).unwrap();
        let outcome = engine.resolve_pending();

        assert_eq!(outcome, ResolveOutcome::Mismatched);
        assert_eq!(engine.matches(), 0);
        assert!(!engine.card_at(0).is_matched);
        assert!(!engine.card_at(1).is_matched);
        assert!(engine.flipped_indices().is_empty());
    }

    #[test]
    fn flips_are_rejected_while_a_pair_is_resolving() {
        let mut engine = engine(&[1, 2, 1, 2]);

        engine.flip_card(0).unwrap();
        engine.flip_card(1).unwrap();

        assert_eq!(engine.flip_card(3).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.flipped_indices(), &[0, 1]);
    }

    #[test]
    fn flipping_the_same_card_twice_is_a_no_op() {
        let mut engine = engine(&[1, 2, 1, 2]);

        engine.flip_card(0).unwrap();

        assert_eq!(engine.flip_card(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.flipped_indices(), &[0]);
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn matched_cards_cannot_be_flipped_again() {
        let mut engine = engine(&[1, 2, 1, 2]);

        engine.flip_card(0).unwrap();
        engine.flip_card(2).unwrap();
        engine.resolve_pending();

        assert_eq!(engine.flip_card(0).unwrap(), FlipOutcome::NoChange);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut engine = engine(&[1, 2, 1, 2]);

        assert_eq!(engine.flip_card(4), Err(GameError::InvalidIndex));
    }

    #[test]
    fn winning_the_last_pair_transitions_to_won() {
        // smallest playable deck, two pairs
        let mut engine = engine(&[1, 1, 2, 2]);

        engine.flip_card(0).unwrap();
        engine.flip_card(1).unwrap();
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Matched { flower: 1 });
        assert_eq!(engine.matches(), 1);
        assert!(!engine.is_won());

        engine.flip_card(2).unwrap();
        engine.flip_card(3).unwrap();
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Won { flower: 2 });
        assert_eq!(engine.matches(), 2);
        assert!(engine.is_won());
    }

    #[test]
    fn flips_after_winning_are_no_ops() {
        let mut engine = engine(&[1, 1]);

        engine.flip_card(0).unwrap();
        engine.flip_card(1).unwrap();
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Won { flower: 1 });

        assert_eq!(engine.flip_card(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.moves(), 1);
    }

    #[test]
    fn resolve_without_a_pending_pair_is_a_no_op() {
        let mut engine = engine(&[1, 2, 1, 2]);

        assert_eq!(engine.resolve_pending(), ResolveOutcome::NoChange);

        engine.flip_card(0).unwrap();
        assert_eq!(engine.resolve_pending(), ResolveOutcome::NoChange);
        assert_eq!(engine.flipped_indices(), &[0]);
    }

    #[test]
    fn hint_names_the_first_unmatched_flower() {
        let mut engine = engine(&[3, 2, 3, 2]);

        assert_eq!(engine.hint(), HintOutcome::Suggest { flower: 3 });
        assert_eq!(engine.hints_used(), 1);
        assert!(engine.flipped_indices().is_empty());
    }

    #[test]
    fn hint_skips_matched_pairs() {
        let mut engine = engine(&[1, 1, 2, 2]);

        engine.flip_card(0).unwrap();
        engine.flip_card(1).unwrap();
        engine.resolve_pending();

        assert_eq!(engine.hint(), HintOutcome::Suggest { flower: 2 });
    }

    #[test]
    fn hint_with_no_unmatched_pairs_left_is_a_no_op() {
        let mut engine = engine(&[1, 1]);

        engine.flip_card(0).unwrap();
        engine.flip_card(1).unwrap();
        engine.resolve_pending();

        assert_eq!(engine.hint(), HintOutcome::NoChange);
        assert_eq!(engine.hints_used(), 0);
    }
}
