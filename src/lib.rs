//! Referee for "Slow", a two-player card game played between independent
//! player programs over a line-based stdin/stdout protocol.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod player;
pub mod protocol;
pub mod rules;
pub mod runner;
pub mod score;
pub mod sequence;
pub mod state;
pub mod transport;
pub mod visualize;

pub use crate::action::{Action, PLAYER_COUNT, PlayerId, Side};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{FirstBot, GreedyBot, RandomBot};
pub use crate::card::Card;
pub use crate::error::{
    GameError, PlayerError, ProtocolError, RefereeError, SequenceError, TransportError,
};
pub use crate::game::{Game, GameBuilder};
pub use crate::player::{PlayerContext, serve};
pub use crate::protocol::Message;
pub use crate::rules::{Resolution, candidates};
pub use crate::runner::{GameRecord, MatchConfig, MatchPhase, MatchReport, Referee};
pub use crate::score::{Scoreboard, settle};
pub use crate::sequence::Sequence;
pub use crate::state::{GameStatus, TurnView};
pub use crate::transport::{LocalPlayer, PlayerSession, Transport};
pub use crate::visualize::{describe_action, render_report, render_view};
