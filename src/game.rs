use std::array::from_fn;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::action::{Action, PLAYER_COUNT, PlayerId, opponent};
use crate::card::{Card, DECK_SIZE, HAND_SIZE, PILE_CAPACITY, full_deck};
use crate::error::GameError;
use crate::rules::{self, Resolution, Table};
use crate::score;
use crate::sequence::Sequence;
use crate::state::{GameStatus, TurnView};

const DEFAULT_SEED: u64 = 0x510E_510E_510E_510E;

/// Builder that enables deterministic deck injection for testing.
pub struct GameBuilder {
    index: usize,
    seed: u64,
    decks: Option<[Vec<Card>; PLAYER_COUNT]>,
}

impl GameBuilder {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            seed: DEFAULT_SEED,
            decks: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use these decks instead of shuffling; the first element of each deck is drawn first.
    pub fn with_decks(mut self, decks: [Vec<Card>; PLAYER_COUNT]) -> Self {
        self.decks = Some(decks);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// One game between the two seats: decks, hands, the shared piles and the turn counter.
///
/// A fresh `Game` is created for every `RESET` and dropped after settlement.
pub struct Game {
    index: usize,
    turn: usize,
    status: GameStatus,
    players: [PlayerState; PLAYER_COUNT],
    left: Sequence,
    right: Sequence,
}

impl Game {
    pub fn builder(index: usize) -> GameBuilder {
        GameBuilder::new(index)
    }

    /// Zero-based index of this game within the match.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.status, GameStatus::Ongoing)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Seat to move: alternates every turn, and the opening seat alternates every game.
    pub fn current_player(&self) -> PlayerId {
        (self.turn + self.index) % PLAYER_COUNT
    }

    pub fn deck_count(&self, player: PlayerId) -> Result<usize, GameError> {
        Ok(self.player(player)?.deck.count())
    }

    pub fn hand(&self, player: PlayerId) -> Result<Vec<Card>, GameError> {
        Ok(self.player(player)?.hand.to_vec())
    }

    pub fn left(&self) -> Vec<Card> {
        self.left.to_vec()
    }

    pub fn right(&self) -> Vec<Card> {
        self.right.to_vec()
    }

    pub fn last_action(&self, player: PlayerId) -> Result<Action, GameError> {
        Ok(self.player(player)?.last_action)
    }

    /// Card total still held by `player` (deck plus hand).
    pub fn remaining(&self, player: PlayerId) -> Result<u32, GameError> {
        let state = self.player(player)?;
        Ok(state.deck.sum() + state.hand.sum())
    }

    pub fn turn_view(&self, perspective: PlayerId) -> Result<TurnView, GameError> {
        let own = self.player(perspective)?;
        let other = &self.players[opponent(perspective)];
        Ok(TurnView {
            turn: self.turn,
            hand: own.hand.to_vec(),
            opponent_hand: other.hand.to_vec(),
            left: self.left.to_vec(),
            right: self.right.to_vec(),
            previous: own.last_action,
            opponent_previous: other.last_action,
        })
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        let state = self.player(player)?;
        Ok(rules::candidates(
            &state.hand.to_vec(),
            state.last_action,
            self.left.top(),
            self.right.top(),
            !state.deck.is_empty(),
        ))
    }

    /// Resolves `action` for the seat to move and advances the turn.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<Resolution, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player >= PLAYER_COUNT {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player() {
            return Err(GameError::NotPlayersTurn);
        }

        let state = &mut self.players[player];
        let resolution = rules::resolve(
            action,
            state.last_action,
            Table {
                deck: &mut state.deck,
                hand: &mut state.hand,
                left: &mut self.left,
                right: &mut self.right,
            },
        )?;
        state.last_action = resolution.effective;
        self.turn += 1;
        self.refresh_status();
        Ok(resolution)
    }

    /// Point deltas for this game; all zero while it is still running.
    pub fn settlement(&self) -> [i32; PLAYER_COUNT] {
        if !self.is_finished() {
            return [0; PLAYER_COUNT];
        }
        score::settle(from_fn(|idx| {
            self.players[idx].deck.sum() + self.players[idx].hand.sum()
        }))
    }

    fn player(&self, player: PlayerId) -> Result<&PlayerState, GameError> {
        self.players
            .get(player)
            .ok_or(GameError::InvalidPlayer(player))
    }

    fn refresh_status(&mut self) {
        let exhausted: [bool; PLAYER_COUNT] = from_fn(|idx| self.players[idx].is_exhausted());
        self.status = match exhausted {
            [true, true] => GameStatus::Draw,
            [true, false] => GameStatus::Finished { winner: 0 },
            [false, true] => GameStatus::Finished { winner: 1 },
            [false, false] => GameStatus::Ongoing,
        };
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { index, seed, decks } = builder;
        let decks = match decks {
            Some(decks) => decks,
            None => {
                let mut rng = StdRng::seed_from_u64(seed);
                from_fn(|_| {
                    let mut deck = full_deck();
                    deck.shuffle(&mut rng);
                    deck
                })
            }
        };

        let [first, second] = decks;
        let players = [PlayerState::new(first)?, PlayerState::new(second)?];
        let mut game = Game {
            index,
            turn: 0,
            status: GameStatus::Ongoing,
            players,
            left: Sequence::with_capacity(PILE_CAPACITY),
            right: Sequence::with_capacity(PILE_CAPACITY),
        };
        game.refresh_status();
        Ok(game)
    }
}

#[derive(Clone)]
struct PlayerState {
    deck: Sequence,
    hand: Sequence,
    last_action: Action,
}

impl PlayerState {
    fn new(deck: Vec<Card>) -> Result<Self, GameError> {
        if deck.len() > DECK_SIZE {
            return Err(GameError::InvalidConfiguration(
                "deck holds more than 26 cards",
            ));
        }
        Ok(Self {
            deck: Sequence::from_cards(deck, DECK_SIZE)?,
            hand: Sequence::with_capacity(HAND_SIZE),
            last_action: Action::None,
        })
    }

    fn is_exhausted(&self) -> bool {
        rules::is_exhausted(&self.deck, &self.hand)
    }
}
