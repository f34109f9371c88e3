//! The referee: drives a match of several games between two transports.
//!
//! Each game moves through `AwaitingReset -> Playing -> Settling`; after the
//! last game both players are sent `QUIT`. Exchanges are strictly sequential:
//! one message out, one reply in, one player at a time.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::{PLAYER_COUNT, PlayerId, opponent};
use crate::error::RefereeError;
use crate::game::Game;
use crate::protocol::{self, Message};
use crate::score::Scoreboard;
use crate::transport::Transport;
use crate::visualize::{describe_action, render_view};

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Settings for one match. Built through [`MatchConfig::new`], which rejects
/// an empty match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MatchConfig {
    games: usize,
    /// Base seed for deck shuffles; drawn from entropy when absent.
    seed: Option<u64>,
}

impl MatchConfig {
    pub fn new(games: usize) -> Result<Self, RefereeError> {
        if games == 0 {
            return Err(RefereeError::Configuration(String::from(
                "a match needs at least one game",
            )));
        }
        Ok(Self { games, seed: None })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 1,
            seed: None,
        }
    }
}

/// Where the referee is in the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    AwaitingReset { game: usize },
    Playing { game: usize },
    Settling { game: usize },
    Complete,
}

/// Outcome of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub index: usize,
    pub first_player: PlayerId,
    pub turns: usize,
    pub winner: Option<PlayerId>,
    pub points: [i32; PLAYER_COUNT],
    /// Cumulative scores after this game.
    pub scores: [i32; PLAYER_COUNT],
    /// Illegal submissions replaced by a forced move.
    pub substitutions: [usize; PLAYER_COUNT],
}

/// Outcome of a whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub seed: u64,
    pub games: Vec<GameRecord>,
    pub scores: [i32; PLAYER_COUNT],
}

/// Runs a match between two players reachable through `T`.
pub struct Referee<T: Transport> {
    config: MatchConfig,
    seed: u64,
    players: [T; PLAYER_COUNT],
    scoreboard: Scoreboard,
    phase: MatchPhase,
}

impl<T: Transport> Referee<T> {
    pub fn new(config: MatchConfig, players: [T; PLAYER_COUNT]) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            seed,
            players,
            scoreboard: Scoreboard::default(),
            phase: MatchPhase::AwaitingReset { game: 0 },
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn players(&self) -> &[T; PLAYER_COUNT] {
        &self.players
    }

    /// Plays every configured game. On success both players are sent `QUIT`
    /// and closed; on failure the match stops at once and the transports are
    /// left to their own drop-time cleanup.
    pub fn run(&mut self) -> Result<MatchReport, RefereeError> {
        info!(games = self.config.games, seed = self.seed, "match started");
        let mut games = Vec::with_capacity(self.config.games);
        for index in 0..self.config.games {
            games.push(self.play_game(index)?);
        }
        self.phase = MatchPhase::Complete;
        for player in 0..PLAYER_COUNT {
            self.send(player, &Message::Quit)?;
        }
        self.close_players();
        let scores = self.scoreboard.scores();
        info!(?scores, "match complete");
        Ok(MatchReport {
            seed: self.seed,
            games,
            scores,
        })
    }

    fn play_game(&mut self, index: usize) -> Result<GameRecord, RefereeError> {
        self.phase = MatchPhase::AwaitingReset { game: index };
        let mut game = Game::builder(index)
            .with_seed(self.game_seed(index))
            .build()?;
        for player in 0..PLAYER_COUNT {
            self.exchange_ack(player, &Message::Reset { game: index })?;
        }

        self.phase = MatchPhase::Playing { game: index };
        let first_player = game.current_player();
        info!(game = index, first_player, "game started");
        let mut substitutions = [0usize; PLAYER_COUNT];
        while !game.is_finished() {
            let player = game.current_player();
            let view = game.turn_view(player)?;
            debug!(game = index, player, "\n{}", render_view(&view));
            self.send(player, &Message::Play(view))?;
            let line = self.recv(player)?;
            let submitted = protocol::decode_action(&line)
                .map_err(|source| RefereeError::Protocol { player, source })?;
            let resolution = game.apply_action(player, submitted)?;
            if resolution.substituted() {
                substitutions[player] += 1;
                warn!(
                    game = index,
                    player,
                    submitted = %describe_action(&resolution.submitted),
                    forced = %describe_action(&resolution.effective),
                    "illegal action replaced"
                );
            } else {
                debug!(
                    game = index,
                    player,
                    action = %describe_action(&resolution.effective),
                    "action applied"
                );
            }
        }

        self.phase = MatchPhase::Settling { game: index };
        let points = game.settlement();
        self.scoreboard.record(points);
        for player in 0..PLAYER_COUNT {
            let message = Message::GameSet {
                points: (points[player], points[opponent(player)]),
                scores: self.scoreboard.perspective(player),
            };
            self.exchange_ack(player, &message)?;
        }
        info!(
            game = index,
            turns = game.turn(),
            winner = ?game.winner(),
            ?points,
            "game settled"
        );

        Ok(GameRecord {
            index,
            first_player,
            turns: game.turn(),
            winner: game.winner(),
            points,
            scores: self.scoreboard.scores(),
            substitutions,
        })
    }

    fn game_seed(&self, index: usize) -> u64 {
        self.seed ^ (index as u64 + 1).wrapping_mul(SEED_STRIDE)
    }

    fn exchange_ack(&mut self, player: PlayerId, message: &Message) -> Result<(), RefereeError> {
        self.send(player, message)?;
        let line = self.recv(player)?;
        protocol::decode_ack(&line).map_err(|source| RefereeError::Protocol { player, source })
    }

    fn send(&mut self, player: PlayerId, message: &Message) -> Result<(), RefereeError> {
        debug!(player, tag = message.tag(), "send");
        self.players[player]
            .send_message(message)
            .map_err(|source| RefereeError::Transport { player, source })
    }

    fn recv(&mut self, player: PlayerId) -> Result<String, RefereeError> {
        let line = self.players[player]
            .recv_line()
            .map_err(|source| RefereeError::Transport { player, source })?;
        debug!(player, line = %line, "recv");
        Ok(line)
    }

    fn close_players(&mut self) {
        for (player, transport) in self.players.iter_mut().enumerate() {
            if let Err(err) = transport.close() {
                warn!(player, error = %err, "failed to close player channel");
            }
        }
    }
}
