//! Settlement of a finished game.
//!
//! Scoring rule (zero-sum):
//!   a player whose deck and hand are both empty gains the sum of the
//!   opponent's remaining card ranks (deck + hand); the opponent loses the
//!   same amount. When both are empty at once the game is a draw worth 0.

use serde::{Deserialize, Serialize};

use crate::action::{PLAYER_COUNT, PlayerId, opponent};

/// Point deltas for one game, indexed by seat. `remaining` is each seat's
/// card total (deck + hand) at the end check.
pub fn settle(remaining: [u32; PLAYER_COUNT]) -> [i32; PLAYER_COUNT] {
    let mut points = [0i32; PLAYER_COUNT];
    match (remaining[0] == 0, remaining[1] == 0) {
        (true, false) => transfer(&mut points, 0, remaining[1]),
        (false, true) => transfer(&mut points, 1, remaining[0]),
        _ => {}
    }
    points
}

fn transfer(points: &mut [i32; PLAYER_COUNT], winner: PlayerId, amount: u32) {
    let amount = amount as i32;
    points[winner] = amount;
    points[opponent(winner)] = -amount;
}

/// Cumulative score across the games of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    scores: [i32; PLAYER_COUNT],
}

impl Scoreboard {
    pub fn record(&mut self, points: [i32; PLAYER_COUNT]) {
        for (score, delta) in self.scores.iter_mut().zip(points) {
            *score += delta;
        }
    }

    pub fn scores(&self) -> [i32; PLAYER_COUNT] {
        self.scores
    }

    /// Pair as seen by `player`: own value first.
    pub fn perspective(&self, player: PlayerId) -> (i32, i32) {
        (self.scores[player], self.scores[opponent(player)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_player_collects_opponent_remainder() {
        assert_eq!(settle([0, 37]), [37, -37]);
        assert_eq!(settle([12, 0]), [-12, 12]);
    }

    #[test]
    fn simultaneous_exhaustion_is_a_draw() {
        assert_eq!(settle([0, 0]), [0, 0]);
    }

    #[test]
    fn unfinished_totals_award_nothing() {
        assert_eq!(settle([4, 9]), [0, 0]);
    }

    #[test]
    fn scoreboard_accumulates_across_games() {
        let mut board = Scoreboard::default();
        board.record(settle([0, 20]));
        board.record(settle([5, 0]));
        assert_eq!(board.scores(), [15, -15]);
        assert_eq!(board.perspective(1), (-15, 15));
    }
}
