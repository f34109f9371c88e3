//! Turn rules: which actions are legal, and what an action does to the table.
//!
//! Generation order is part of the contract. An illegal submission is replaced
//! by the first candidate, so reordering the steps below changes forced moves.

use serde::{Deserialize, Serialize};

use crate::action::{Action, Side};
use crate::card::{Card, HAND_SIZE};
use crate::error::{GameError, SequenceError};
use crate::sequence::Sequence;

/// Enumerates the legal actions for the acting player, in generation order.
///
/// `previous` is the acting player's own last action. After a pass every held
/// rank may go on either pile; otherwise a non-empty pile only accepts the two
/// ranks adjacent to its top card. The result is never empty.
pub fn candidates(
    hand: &[Card],
    previous: Action,
    left_top: Option<Card>,
    right_top: Option<Card>,
    deck_nonempty: bool,
) -> Vec<Action> {
    let mut actions = Vec::new();
    let opened = previous.is_pass();

    for (side, top) in [(Side::Left, left_top), (Side::Right, right_top)] {
        match top {
            Some(top) if !opened => {
                for rank in [top.upper(), top.lower()] {
                    if hand.contains(&rank) {
                        actions.push(Action::put(side, rank));
                    }
                }
            }
            _ => {
                for &card in hand {
                    let action = Action::put(side, card);
                    if !actions.contains(&action) {
                        actions.push(action);
                    }
                }
            }
        }
    }

    if hand.len() < HAND_SIZE && deck_nonempty {
        actions.push(Action::Draw);
    }

    // Never pass twice in a row unless nothing else is possible.
    if !opened || actions.is_empty() {
        actions.push(Action::Pass);
    }

    actions
}

/// Outcome of resolving one submitted action.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// What the player sent.
    pub submitted: Action,
    /// What was applied to the table.
    pub effective: Action,
}

impl Resolution {
    /// True when the submission was illegal and the first candidate was forced.
    pub fn substituted(&self) -> bool {
        self.submitted != self.effective
    }
}

/// Mutable view of one player's side of the table plus the shared piles.
pub struct Table<'a> {
    pub deck: &'a mut Sequence,
    pub hand: &'a mut Sequence,
    pub left: &'a mut Sequence,
    pub right: &'a mut Sequence,
}

/// Validates `chosen` against the current candidate set and applies it.
///
/// An illegal choice is replaced by the first candidate rather than rejected.
pub fn resolve(chosen: Action, previous: Action, table: Table<'_>) -> Result<Resolution, GameError> {
    let Table {
        deck,
        hand,
        left,
        right,
    } = table;
    let legal = candidates(
        &hand.to_vec(),
        previous,
        left.top(),
        right.top(),
        !deck.is_empty(),
    );
    let effective = if legal.contains(&chosen) {
        chosen
    } else {
        // `candidates` always yields at least a draw, a put or a pass.
        legal.first().copied().unwrap_or(Action::Pass)
    };

    match effective {
        Action::None | Action::Pass => {}
        Action::Draw => {
            let card = deck.pop().ok_or(GameError::EmptyDeck)?;
            hand.push(card)?;
        }
        Action::PutLeft(card) | Action::PutRight(card) => {
            if !hand.remove(card) {
                return Err(SequenceError::Missing(card).into());
            }
            let pile = if matches!(effective, Action::PutLeft(_)) {
                left
            } else {
                right
            };
            pile.push(card)?;
        }
    }

    Ok(Resolution {
        submitted: chosen,
        effective,
    })
}

/// A player is out of the game once both deck and hand are empty.
pub fn is_exhausted(deck: &Sequence, hand: &Sequence) -> bool {
    deck.is_empty() && hand.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{DECK_SIZE, PILE_CAPACITY};

    fn card(rank: u8) -> Card {
        Card::new(rank).unwrap()
    }

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| card(r)).collect()
    }

    #[test]
    fn empty_table_offers_every_card_then_draw_then_pass() {
        let legal = candidates(&cards(&[3, 8]), Action::None, None, None, true);
        assert_eq!(
            legal,
            vec![
                Action::PutLeft(card(3)),
                Action::PutLeft(card(8)),
                Action::PutRight(card(3)),
                Action::PutRight(card(8)),
                Action::Draw,
                Action::Pass,
            ]
        );
    }

    #[test]
    fn duplicate_ranks_are_offered_once() {
        let legal = candidates(&cards(&[6, 6]), Action::None, None, Some(card(1)), false);
        assert_eq!(legal, vec![Action::PutLeft(card(6)), Action::Pass]);
    }

    #[test]
    fn pass_is_withheld_after_a_pass_when_other_moves_exist() {
        let legal = candidates(&cards(&[9]), Action::Pass, Some(card(2)), Some(card(2)), false);
        assert_eq!(legal, vec![Action::PutLeft(card(9)), Action::PutRight(card(9))]);
    }

    #[test]
    fn pass_is_allowed_twice_when_nothing_else_is_possible() {
        let legal = candidates(&[], Action::Pass, Some(card(2)), None, false);
        assert_eq!(legal, vec![Action::Pass]);
    }

    #[test]
    fn resolve_applies_a_legal_draw() {
        let mut deck = Sequence::from_cards(cards(&[4, 5]), DECK_SIZE).unwrap();
        let mut hand = Sequence::with_capacity(HAND_SIZE);
        let mut left = Sequence::with_capacity(PILE_CAPACITY);
        let mut right = Sequence::with_capacity(PILE_CAPACITY);
        let resolution = resolve(
            Action::Draw,
            Action::None,
            Table {
                deck: &mut deck,
                hand: &mut hand,
                left: &mut left,
                right: &mut right,
            },
        )
        .unwrap();
        assert!(!resolution.substituted());
        assert_eq!(hand.to_vec(), cards(&[4]));
        assert_eq!(deck.to_vec(), cards(&[5]));
    }

    #[test]
    fn resolve_forces_first_candidate_for_illegal_put() {
        let mut deck = Sequence::from_cards(cards(&[1]), DECK_SIZE).unwrap();
        let mut hand = Sequence::from_cards(cards(&[5, 12]), HAND_SIZE).unwrap();
        let mut left = Sequence::from_cards(cards(&[13]), PILE_CAPACITY).unwrap();
        let mut right = Sequence::from_cards(cards(&[11]), PILE_CAPACITY).unwrap();
        let resolution = resolve(
            Action::PutLeft(card(5)),
            Action::None,
            Table {
                deck: &mut deck,
                hand: &mut hand,
                left: &mut left,
                right: &mut right,
            },
        )
        .unwrap();
        assert!(resolution.substituted());
        assert_eq!(resolution.effective, Action::PutLeft(card(12)));
        assert_eq!(left.top(), Some(card(12)));
        assert_eq!(hand.to_vec(), cards(&[5]));
    }
}
