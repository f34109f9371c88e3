//! Line-oriented wire format between the referee and a player program.
//!
//! Every field is one line terminated by `\n`. Card sequences are
//! space-separated ranks (an empty sequence is an empty line). Actions are
//! `P`, `D`, `L<rank>`, `R<rank>`, or an empty line for "no action yet".

use std::fmt::Write;
use std::io;

use crate::action::Action;
use crate::card::Card;
use crate::error::{PlayerError, ProtocolError};
use crate::state::TurnView;

pub const TAG_RESET: &str = "RESET";
pub const TAG_PLAY: &str = "PLAY";
pub const TAG_GAMESET: &str = "GAMESET";
pub const TAG_QUIT: &str = "QUIT";

/// A referee-to-player message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// A new game begins; carries the zero-based game index.
    Reset { game: usize },
    /// The receiver must answer with an action line.
    Play(TurnView),
    /// A game ended. Pairs are (self, opponent).
    GameSet {
        points: (i32, i32),
        scores: (i32, i32),
    },
    /// The match is over; the player should exit.
    Quit,
}

impl Message {
    /// Whether the receiver answers with a blank acknowledgement line.
    pub fn expects_ack(&self) -> bool {
        matches!(self, Message::Reset { .. } | Message::GameSet { .. })
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Message::Reset { .. } => TAG_RESET,
            Message::Play(_) => TAG_PLAY,
            Message::GameSet { .. } => TAG_GAMESET,
            Message::Quit => TAG_QUIT,
        }
    }

    /// Renders the message as newline-terminated lines, tag first.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.tag());
        match self {
            Message::Reset { game } => {
                let _ = writeln!(out, "{game}");
            }
            Message::Play(view) => {
                let _ = writeln!(out, "{}", view.turn);
                let _ = writeln!(out, "{}", encode_cards(&view.hand));
                let _ = writeln!(out, "{}", encode_cards(&view.opponent_hand));
                let _ = writeln!(out, "{}", encode_cards(&view.left));
                let _ = writeln!(out, "{}", encode_cards(&view.right));
                let _ = writeln!(out, "{}", encode_action(view.previous));
                let _ = writeln!(out, "{}", encode_action(view.opponent_previous));
            }
            Message::GameSet { points, scores } => {
                let _ = writeln!(out, "{} {}", points.0, points.1);
                let _ = writeln!(out, "{} {}", scores.0, scores.1);
            }
            Message::Quit => {}
        }
        out
    }

    /// Reads one message from a line source. Returns `Ok(None)` at end of input
    /// before a tag; end of input inside a message is [`ProtocolError::Truncated`].
    pub fn read<I>(lines: &mut I) -> Result<Option<Message>, PlayerError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let Some(tag) = lines.next().transpose()? else {
            return Ok(None);
        };
        let mut field = || -> Result<String, PlayerError> {
            match lines.next().transpose()? {
                Some(line) => Ok(strip_newline(&line).to_string()),
                None => Err(ProtocolError::Truncated.into()),
            }
        };
        let message = match strip_newline(&tag) {
            TAG_RESET => Message::Reset {
                game: parse_number(&field()?)?,
            },
            TAG_PLAY => {
                let turn = parse_number(&field()?)?;
                let hand = decode_cards(&field()?)?;
                let opponent_hand = decode_cards(&field()?)?;
                let left = decode_cards(&field()?)?;
                let right = decode_cards(&field()?)?;
                let previous = decode_action(&field()?)?;
                let opponent_previous = decode_action(&field()?)?;
                Message::Play(TurnView {
                    turn,
                    hand,
                    opponent_hand,
                    left,
                    right,
                    previous,
                    opponent_previous,
                })
            }
            TAG_GAMESET => {
                let points = parse_pair(&field()?)?;
                let scores = parse_pair(&field()?)?;
                Message::GameSet { points, scores }
            }
            TAG_QUIT => Message::Quit,
            other => return Err(ProtocolError::UnexpectedMessage(other.to_string()).into()),
        };
        Ok(Some(message))
    }
}

/// Space-separated ranks, top card first.
pub fn encode_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn decode_cards(line: &str) -> Result<Vec<Card>, ProtocolError> {
    strip_newline(line)
        .split_ascii_whitespace()
        .map(parse_card)
        .collect()
}

pub fn encode_action(action: Action) -> String {
    match action {
        Action::None => String::new(),
        Action::Pass => String::from("P"),
        Action::Draw => String::from("D"),
        Action::PutLeft(card) => format!("L{card}"),
        Action::PutRight(card) => format!("R{card}"),
    }
}

/// Decodes an action line. An empty line is [`Action::None`].
pub fn decode_action(line: &str) -> Result<Action, ProtocolError> {
    let line = strip_newline(line);
    let invalid = || ProtocolError::InvalidAction(line.to_string());
    match line {
        "" => Ok(Action::None),
        "P" => Ok(Action::Pass),
        "D" => Ok(Action::Draw),
        _ => {
            let (kind, rank) = line.split_at_checked(1).ok_or_else(invalid)?;
            let card = parse_card(rank).map_err(|_| invalid())?;
            match kind {
                "L" => Ok(Action::PutLeft(card)),
                "R" => Ok(Action::PutRight(card)),
                _ => Err(invalid()),
            }
        }
    }
}

/// Acknowledgements to `RESET` and `GAMESET` are a single blank line.
pub fn decode_ack(line: &str) -> Result<(), ProtocolError> {
    let line = strip_newline(line);
    if line.is_empty() {
        Ok(())
    } else {
        Err(ProtocolError::UnexpectedAck(line.to_string()))
    }
}

pub fn strip_newline(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn parse_card(token: &str) -> Result<Card, ProtocolError> {
    token
        .parse::<u8>()
        .ok()
        .filter(|_| token.bytes().all(|b| b.is_ascii_digit()))
        .and_then(Card::new)
        .ok_or_else(|| ProtocolError::InvalidCard(token.to_string()))
}

fn parse_number<T: std::str::FromStr>(line: &str) -> Result<T, ProtocolError> {
    line.trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidNumber(line.to_string()))
}

fn parse_pair(line: &str) -> Result<(i32, i32), ProtocolError> {
    let mut parts = line.split_ascii_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((parse_number(first)?, parse_number(second)?)),
        _ => Err(ProtocolError::InvalidNumber(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(rank: u8) -> Card {
        Card::new(rank).unwrap()
    }

    #[test]
    fn decodes_the_action_grammar() {
        assert_eq!(decode_action("P\n"), Ok(Action::Pass));
        assert_eq!(decode_action("D"), Ok(Action::Draw));
        assert_eq!(decode_action("L7"), Ok(Action::PutLeft(card(7))));
        assert_eq!(decode_action("R13\n"), Ok(Action::PutRight(card(13))));
        assert_eq!(decode_action(""), Ok(Action::None));
    }

    #[test]
    fn rejects_off_grammar_actions() {
        for line in ["X", "L", "L0", "L14", "R+3", "pass", "L 7", "Q5"] {
            assert!(
                matches!(decode_action(line), Err(ProtocolError::InvalidAction(_))),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn play_message_layout() {
        let view = TurnView {
            turn: 4,
            hand: vec![card(1), card(5)],
            opponent_hand: vec![],
            left: vec![card(13)],
            right: vec![card(2), card(3)],
            previous: Action::Draw,
            opponent_previous: Action::None,
        };
        assert_eq!(
            Message::Play(view).encode(),
            "PLAY\n4\n1 5\n\n13\n2 3\nD\n\n"
        );
    }

    #[test]
    fn gameset_pairs_are_self_first() {
        let message = Message::GameSet {
            points: (-8, 8),
            scores: (3, -3),
        };
        assert_eq!(message.encode(), "GAMESET\n-8 8\n3 -3\n");
        let encoded = message.encode();
        let mut lines = encoded.lines().map(|l| Ok::<_, io::Error>(l.to_string()));
        assert_eq!(Message::read(&mut lines).unwrap(), Some(message));
    }

    #[test]
    fn read_reports_truncation_and_unknown_tags() {
        let mut lines = vec![Ok(String::from("RESET"))].into_iter();
        assert!(matches!(
            Message::read(&mut lines),
            Err(PlayerError::Protocol(ProtocolError::Truncated))
        ));
        let mut lines = vec![Ok(String::from("HELLO"))].into_iter();
        assert!(matches!(
            Message::read(&mut lines),
            Err(PlayerError::Protocol(ProtocolError::UnexpectedMessage(_)))
        ));
        let mut lines = Vec::<io::Result<String>>::new().into_iter();
        assert!(Message::read(&mut lines).unwrap().is_none());
    }

    #[test]
    fn ack_must_be_blank() {
        assert!(decode_ack("\n").is_ok());
        assert!(decode_ack("ok").is_err());
    }
}
