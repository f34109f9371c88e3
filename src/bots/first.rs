use crate::action::Action;
use crate::bot::Bot;
use crate::state::TurnView;

/// Always answers with the first legal action, the same move the referee
/// would force on an illegal submission.
#[derive(Default)]
pub struct FirstBot;

impl Bot for FirstBot {
    fn select_action(&mut self, _view: &TurnView, legal_actions: &[Action]) -> Action {
        legal_actions.first().copied().unwrap_or(Action::Pass)
    }
}
