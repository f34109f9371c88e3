//! Player side of the protocol: reads referee messages, consults a [`Bot`],
//! and writes replies.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::action::Action;
use crate::bot::Bot;
use crate::card::DECK_SIZE;
use crate::error::PlayerError;
use crate::protocol::{Message, encode_action};

/// Per-game bookkeeping for one player program.
///
/// The referee never reports deck sizes, so the player counts its own
/// effective draws to know whether drawing is still possible.
pub struct PlayerContext<B: Bot> {
    bot: B,
    game: usize,
    draws: usize,
    finished: bool,
}

impl<B: Bot> PlayerContext<B> {
    pub fn new(bot: B) -> Self {
        Self {
            bot,
            game: 0,
            draws: 0,
            finished: false,
        }
    }

    pub fn game(&self) -> usize {
        self.game
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    /// True once `QUIT` has been received.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn deck_nonempty(&self) -> bool {
        self.draws < DECK_SIZE
    }

    /// Handles one message and returns the reply line (without newline), if any.
    pub fn handle(&mut self, message: Message) -> Option<String> {
        match message {
            Message::Reset { game } => {
                self.game = game;
                self.draws = 0;
                self.bot.reset(game);
                Some(String::new())
            }
            Message::Play(view) => {
                // `previous` is our last effective move, after any forced substitution.
                if view.previous == Action::Draw {
                    self.draws += 1;
                }
                let legal = view.legal_actions(self.deck_nonempty());
                let action = self.bot.select_action(&view, &legal);
                debug!(game = self.game, turn = view.turn, action = ?action, "selected action");
                Some(encode_action(action))
            }
            Message::GameSet { points, scores } => {
                self.bot.game_set(points, scores);
                info!(
                    game = self.game,
                    points = points.0,
                    score = scores.0,
                    "game finished"
                );
                Some(String::new())
            }
            Message::Quit => {
                self.finished = true;
                None
            }
        }
    }
}

/// Runs the player loop until `QUIT` or end of input.
pub fn serve<R, W, B>(reader: R, mut writer: W, bot: B) -> Result<(), PlayerError>
where
    R: BufRead,
    W: Write,
    B: Bot,
{
    let mut context = PlayerContext::new(bot);
    let mut lines = reader.lines();
    while let Some(message) = Message::read(&mut lines)? {
        if let Some(reply) = context.handle(message) {
            writeln!(writer, "{reply}")?;
            writer.flush()?;
        }
        if context.is_finished() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::bots::FirstBot;

    #[test]
    fn answers_each_message_in_order() {
        let input = "RESET\n0\nPLAY\n0\n\n\n\n\n\n\nGAMESET\n5 -5\n5 -5\nQUIT\n";
        let mut output = Vec::new();
        serve(Cursor::new(input), &mut output, FirstBot).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "\nD\n\n");
    }

    #[test]
    fn counts_effective_draws_and_resets_per_game() {
        let mut context = PlayerContext::new(FirstBot);
        context.handle(Message::Reset { game: 1 });
        let view = crate::state::TurnView {
            previous: Action::Draw,
            ..Default::default()
        };
        context.handle(Message::Play(view.clone()));
        context.handle(Message::Play(view));
        assert_eq!(context.draws(), 2);
        context.handle(Message::Reset { game: 2 });
        assert_eq!(context.draws(), 0);
        assert_eq!(context.game(), 2);
    }

    #[test]
    fn rejects_unknown_messages() {
        let mut output = Vec::new();
        let result = serve(Cursor::new("HELLO\n"), &mut output, FirstBot);
        assert!(matches!(result, Err(PlayerError::Protocol(_))));
    }
}
