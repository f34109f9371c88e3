use std::fmt;

use serde::{Deserialize, Serialize};

/// A suitless card of rank 1 to 13. Adjacency wraps at the 1/13 boundary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 13;
pub const COPIES_PER_RANK: usize = 2;
pub const DECK_SIZE: usize = MAX_RANK as usize * COPIES_PER_RANK;
pub const HAND_SIZE: usize = 5;
/// A pile can at most hold both players' decks.
pub const PILE_CAPACITY: usize = DECK_SIZE * 2;

impl Card {
    /// Returns the card for `rank`, or `None` when the rank is outside 1..=13.
    pub fn new(rank: u8) -> Option<Self> {
        (MIN_RANK..=MAX_RANK).contains(&rank).then_some(Self(rank))
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0
    }

    /// The rank above this one; 13 wraps to 1.
    #[inline]
    pub fn upper(self) -> Self {
        if self.0 == MAX_RANK {
            Self(MIN_RANK)
        } else {
            Self(self.0 + 1)
        }
    }

    /// The rank below this one; 1 wraps to 13.
    #[inline]
    pub fn lower(self) -> Self {
        if self.0 == MIN_RANK {
            Self(MAX_RANK)
        } else {
            Self(self.0 - 1)
        }
    }

    /// Whether `other` may be laid on top of this card.
    pub fn is_adjacent(self, other: Card) -> bool {
        other == self.upper() || other == self.lower()
    }
}

impl TryFrom<u8> for Card {
    type Error = String;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Card::new(rank).ok_or_else(|| format!("rank {rank} is outside {MIN_RANK}..={MAX_RANK}"))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds one player's 26-card deck in deterministic order (unshuffled): 1..=13 twice.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for _ in 0..COPIES_PER_RANK {
        for rank in MIN_RANK..=MAX_RANK {
            deck.push(Card(rank));
        }
    }
    deck
}
