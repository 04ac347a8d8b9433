use alloc::vec::Vec;

use super::*;

/// Uniform-random deck: the first `pair_count` catalog flowers, each
/// duplicated once, shuffled from the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, settings: &DifficultySettings) -> Deck {
        use rand::prelude::*;

        let mut pair_count = usize::from(settings.pair_count);
        if pair_count > FLOWERS.len() {
            log::warn!(
                "catalog only has {} flowers, requested {} pairs",
                FLOWERS.len(),
                pair_count
            );
            pair_count = FLOWERS.len();
        }

        let mut cards: Vec<FlowerId> = Vec::with_capacity(pair_count * 2);
        for flower in &FLOWERS[..pair_count] {
            cards.push(flower.id);
            cards.push(flower.id);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        cards.shuffle(&mut rng);

        Deck::from_flower_ids(cards).expect("duplicated catalog subset is pair-balanced")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_two_of_each_flower_for_every_difficulty() {
        for difficulty in Difficulty::ALL {
            let settings = difficulty.settings();
            let deck = RandomDeckGenerator::new(7).generate(settings);

            assert_eq!(deck.size(), settings.card_count);
            for flower in &FLOWERS[..usize::from(settings.pair_count)] {
                let copies = deck
                    .flower_ids()
                    .iter()
                    .filter(|&&id| id == flower.id)
                    .count();
                assert_eq!(copies, 2, "flower {} in {:?}", flower.id, difficulty);
            }
        }
    }

    #[test]
    fn same_seed_gives_the_same_deck() {
        let settings = Difficulty::Hard.settings();

        let first = RandomDeckGenerator::new(42).generate(settings);
        let second = RandomDeckGenerator::new(42).generate(settings);

        assert_eq!(first, second);
    }

    #[test]
    fn oversized_pair_request_clamps_to_the_catalog() {
        let settings = DifficultySettings {
            card_count: 40,
            pair_count: 20,
            required_move_count: 40,
            hint_allowance: 1,
            flipped_duration_ms: 800,
            description: "",
        };

        let deck = RandomDeckGenerator::new(3).generate(&settings);

        assert_eq!(usize::from(deck.size()), FLOWERS.len() * 2);
    }
}
