use serde::{Deserialize, Serialize};

use crate::action::{Action, PlayerId};
use crate::card::Card;
use crate::rules;

/// Status of a single game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The player whose deck and hand ran out first.
    Finished { winner: PlayerId },
    /// Both players ran out at the same check.
    Draw,
}

/// Everything a player is told on its turn, from its own point of view.
///
/// Both hands are sent in full; the opponent's cards are not hidden.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnView {
    pub turn: usize,
    pub hand: Vec<Card>,
    pub opponent_hand: Vec<Card>,
    /// Left pile, top card first.
    pub left: Vec<Card>,
    /// Right pile, top card first.
    pub right: Vec<Card>,
    pub previous: Action,
    pub opponent_previous: Action,
}

impl TurnView {
    pub fn left_top(&self) -> Option<Card> {
        self.left.first().copied()
    }

    pub fn right_top(&self) -> Option<Card> {
        self.right.first().copied()
    }

    /// Candidate set for the viewing player; the view does not carry deck size,
    /// so the caller supplies whether its deck still holds cards.
    pub fn legal_actions(&self, deck_nonempty: bool) -> Vec<Action> {
        rules::candidates(
            &self.hand,
            self.previous,
            self.left_top(),
            self.right_top(),
            deck_nonempty,
        )
    }
}
