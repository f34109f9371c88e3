use crate::action::Action;
use crate::state::TurnView;

/// Interface for player strategies driven by [`player::serve`](crate::player::serve).
pub trait Bot {
    fn select_action(&mut self, view: &TurnView, legal_actions: &[Action]) -> Action;

    /// Called when a new game starts.
    fn reset(&mut self, _game: usize) {}

    /// Called when a game ends with (self, opponent) points and running scores.
    fn game_set(&mut self, _points: (i32, i32), _scores: (i32, i32)) {}
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn select_action(&mut self, view: &TurnView, legal_actions: &[Action]) -> Action {
        (**self).select_action(view, legal_actions)
    }

    fn reset(&mut self, game: usize) {
        (**self).reset(game)
    }

    fn game_set(&mut self, points: (i32, i32), scores: (i32, i32)) {
        (**self).game_set(points, scores)
    }
}
