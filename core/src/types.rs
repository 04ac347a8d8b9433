/// Position of a card in the deck; the index is the card's identity.
pub type CardIndex = u8;

/// Count type used for deck sizes, pair counts, and match counts.
pub type CardCount = u8;

/// Identifier of a catalog flower.
pub type FlowerId = u8;
