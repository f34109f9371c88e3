use std::collections::VecDeque;

use crate::card::Card;
use crate::error::SequenceError;

/// Ordered, capacity-bounded run of cards used for decks, hands and piles.
///
/// The front of the sequence is its "top": `push` lays a card on top and
/// `pop` takes the top card off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    cards: VecDeque<Card>,
    capacity: usize,
}

impl Sequence {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cards: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a sequence whose front is `cards[0]`.
    pub fn from_cards(cards: Vec<Card>, capacity: usize) -> Result<Self, SequenceError> {
        if cards.len() > capacity {
            return Err(SequenceError::Full { capacity });
        }
        let mut cards = VecDeque::from(cards);
        cards.reserve(capacity.saturating_sub(cards.len()));
        Ok(Self { cards, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.front().copied()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn index_of(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    pub fn sum(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.rank())).sum()
    }

    pub fn push(&mut self, card: Card) -> Result<(), SequenceError> {
        if self.is_full() {
            return Err(SequenceError::Full {
                capacity: self.capacity,
            });
        }
        self.cards.push_front(card);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Removes the first occurrence of `card`; returns whether it was present.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.index_of(card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// Copies the cards out, top first.
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: u8) -> Card {
        Card::new(rank).unwrap()
    }

    #[test]
    fn push_lays_on_top_and_pop_takes_it_back() {
        let mut seq = Sequence::with_capacity(3);
        seq.push(card(4)).unwrap();
        seq.push(card(9)).unwrap();
        assert_eq!(seq.top(), Some(card(9)));
        assert_eq!(seq.to_vec(), vec![card(9), card(4)]);
        assert_eq!(seq.pop(), Some(card(9)));
        assert_eq!(seq.count(), 1);
    }

    #[test]
    fn push_refuses_beyond_capacity() {
        let mut seq = Sequence::with_capacity(1);
        assert_eq!(seq.capacity(), 1);
        seq.push(card(1)).unwrap();
        assert!(seq.is_full());
        assert_eq!(seq.push(card(2)), Err(SequenceError::Full { capacity: 1 }));
        assert_eq!(seq.count(), 1);
    }

    #[test]
    fn remove_takes_only_the_first_occurrence() {
        let mut seq = Sequence::from_cards(vec![card(3), card(5), card(3)], 5).unwrap();
        assert!(seq.remove(card(3)));
        assert_eq!(seq.to_vec(), vec![card(5), card(3)]);
        assert!(!seq.remove(card(12)));
        assert_eq!(seq.index_of(card(3)), Some(1));
        assert_eq!(seq.sum(), 8);
    }
}
