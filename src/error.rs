use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Card;

/// Errors raised by [`Sequence`](crate::sequence::Sequence) mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("sequence is full (capacity {capacity})")]
    Full { capacity: usize },
    #[error("card {0} is not in the sequence")]
    Missing(Card),
}

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("game is already over")]
    GameOver,
    #[error("deck is empty")]
    EmptyDeck,
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// A line that does not fit the wire grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unrecognised action line {0:?}")]
    InvalidAction(String),
    #[error("unexpected message tag {0:?}")]
    UnexpectedMessage(String),
    #[error("expected a blank acknowledgement, got {0:?}")]
    UnexpectedAck(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    #[error("message ended early")]
    Truncated,
}

/// Failures of the byte channel to a player program.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to launch {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("channel closed by the player")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Fatal outcome of a match.
#[derive(Debug, Error)]
pub enum RefereeError {
    #[error("player {player}: {source}")]
    Transport {
        player: PlayerId,
        #[source]
        source: TransportError,
    },
    #[error("player {player}: {source}")]
    Protocol {
        player: PlayerId,
        #[source]
        source: ProtocolError,
    },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Errors ending a player-side protocol loop.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
