use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Zero-based seat of a player within the match (0 or 1).
pub type PlayerId = usize;

pub const PLAYER_COUNT: usize = 2;

/// Returns the other seat.
#[inline]
pub fn opponent(player: PlayerId) -> PlayerId {
    1 - player
}

/// One of the two shared piles.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A move on a player's turn, or the absence of one before their first turn.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// No move taken yet this game.
    #[default]
    None,
    /// Skip the turn; opens both piles for this player's next move.
    Pass,
    /// Move the top card of the own deck into the hand.
    Draw,
    /// Lay a card from the hand onto the left pile.
    PutLeft(Card),
    /// Lay a card from the hand onto the right pile.
    PutRight(Card),
}

impl Action {
    pub fn put(side: Side, card: Card) -> Self {
        match side {
            Side::Left => Action::PutLeft(card),
            Side::Right => Action::PutRight(card),
        }
    }

    /// Returns the pile and card for put actions.
    pub fn placement(&self) -> Option<(Side, Card)> {
        match *self {
            Action::PutLeft(card) => Some((Side::Left, card)),
            Action::PutRight(card) => Some((Side::Right, card)),
            _ => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }
}
