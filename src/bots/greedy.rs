use crate::action::Action;
use crate::bot::Bot;
use crate::card::Card;
use crate::state::TurnView;

/// Rule-based bot that sheds points as fast as it can.
///
/// In plain English:
/// - Remaining ranks are what the opponent collects if they finish first, so
///   lay the highest card available.
/// - Prefer a put that leaves the opponent without an adjacent card in hand.
/// - Otherwise draw to keep options open, and pass only as a last resort.
#[derive(Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }

    fn score_put(view: &TurnView, card: Card) -> i32 {
        let value_score = i32::from(card.rank()) * 100;
        // Leaving the opponent stuck is worth more than a rank or two.
        let blocking_bonus = if view
            .opponent_hand
            .iter()
            .any(|&held| card.is_adjacent(held))
        {
            0
        } else {
            250
        };
        1_000 + value_score + blocking_bonus
    }

    fn score_action(view: &TurnView, action: &Action) -> i32 {
        match action.placement() {
            Some((_, card)) => Self::score_put(view, card),
            None => match action {
                Action::Draw => 500,
                Action::Pass => -1_000,
                _ => i32::MIN / 2,
            },
        }
    }
}

impl Bot for GreedyBot {
    fn select_action(&mut self, view: &TurnView, legal_actions: &[Action]) -> Action {
        // max_by_key keeps the last maximum; reverse so ties go to the earliest candidate.
        legal_actions
            .iter()
            .rev()
            .max_by_key(|action| Self::score_action(view, action))
            .copied()
            .unwrap_or(Action::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: u8) -> Card {
        Card::new(rank).unwrap()
    }

    #[test]
    fn prefers_the_highest_put_over_drawing() {
        let view = TurnView {
            hand: vec![card(2), card(11)],
            ..TurnView::default()
        };
        let legal = view.legal_actions(true);
        assert_eq!(
            GreedyBot::new().select_action(&view, &legal),
            Action::PutLeft(card(11))
        );
    }

    #[test]
    fn draws_rather_than_passing() {
        let view = TurnView {
            hand: vec![card(7)],
            left: vec![card(1)],
            right: vec![card(1)],
            ..TurnView::default()
        };
        let legal = view.legal_actions(true);
        assert_eq!(legal, vec![Action::Draw, Action::Pass]);
        assert_eq!(GreedyBot::new().select_action(&view, &legal), Action::Draw);
    }
}
