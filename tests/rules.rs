use slow_referee::action::Action;
use slow_referee::card::{self, Card, DECK_SIZE, HAND_SIZE};
use slow_referee::{GameBuilder, GameError, GameStatus, candidates};

fn card(rank: u8) -> Card {
    Card::new(rank).expect("valid rank")
}

#[test]
fn opening_hands_of_five_leave_only_puts_or_pass() -> Result<(), GameError> {
    let mut game = GameBuilder::new(0)
        .with_decks([card::full_deck(), card::full_deck()])
        .build()?;
    for _ in 0..(HAND_SIZE * 2) {
        let player = game.current_player();
        let resolution = game.apply_action(player, Action::Draw)?;
        assert!(!resolution.substituted());
    }
    for player in 0..2 {
        assert_eq!(game.deck_count(player)?, DECK_SIZE - HAND_SIZE);
        assert_eq!(game.hand(player)?.len(), HAND_SIZE);
    }
    assert!(game.left().is_empty());
    assert!(game.right().is_empty());

    let player = game.current_player();
    let hand = game.hand(player)?;
    let legal = game.legal_actions(player)?;
    assert!(!legal.contains(&Action::Draw));
    assert_eq!(legal.last(), Some(&Action::Pass));
    for held in &hand {
        assert!(legal.contains(&Action::PutLeft(*held)));
        assert!(legal.contains(&Action::PutRight(*held)));
    }
    assert_eq!(legal.len(), hand.len() * 2 + 1);
    Ok(())
}

#[test]
fn king_on_the_left_accepts_only_an_ace() {
    let legal = candidates(
        &[card(1), card(5)],
        Action::None,
        Some(card(13)),
        Some(card(9)),
        true,
    );
    let left: Vec<Action> = legal
        .iter()
        .copied()
        .filter(|action| matches!(action, Action::PutLeft(_)))
        .collect();
    assert_eq!(left, vec![Action::PutLeft(card(1))]);
}

#[test]
fn illegal_put_is_replaced_by_the_first_candidate() -> Result<(), GameError> {
    let mut game = GameBuilder::new(0).with_seed(7).build()?;
    let resolution = game.apply_action(0, Action::PutLeft(card(7)))?;
    assert!(resolution.substituted());
    assert_eq!(resolution.effective, Action::Draw);
    assert_eq!(game.last_action(0)?, Action::Draw);
    assert_eq!(game.hand(0)?.len(), 1);
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.current_player(), 1);
    Ok(())
}

#[test]
fn exhausted_player_collects_the_opponents_remainder() -> Result<(), GameError> {
    let mut game = GameBuilder::new(0)
        .with_decks([vec![card(3)], card::full_deck()])
        .build()?;
    game.apply_action(0, Action::Draw)?;
    game.apply_action(1, Action::Draw)?;
    game.apply_action(0, Action::PutLeft(card(3)))?;

    assert_eq!(game.status(), GameStatus::Finished { winner: 0 });
    assert_eq!(game.remaining(1)?, 182);
    assert_eq!(game.settlement(), [182, -182]);
    assert!(matches!(
        game.apply_action(1, Action::Pass),
        Err(GameError::GameOver)
    ));
    Ok(())
}

#[test]
fn pass_opens_both_piles_for_the_next_move() -> Result<(), GameError> {
    let mut game = GameBuilder::new(0)
        .with_decks([vec![card(9), card(6), card(1)], vec![card(2), card(4)]])
        .build()?;
    game.apply_action(0, Action::Draw)?; // 9
    game.apply_action(1, Action::Draw)?; // 2
    game.apply_action(0, Action::PutLeft(card(9)))?;
    game.apply_action(1, Action::PutRight(card(2)))?;
    game.apply_action(0, Action::Draw)?; // 6
    game.apply_action(1, Action::Draw)?; // 4
    // Player 0 holds 6: not adjacent to 9 or 2.
    assert_eq!(game.legal_actions(0)?, vec![Action::Draw, Action::Pass]);
    game.apply_action(0, Action::Pass)?;
    game.apply_action(1, Action::Pass)?;
    assert_eq!(
        game.legal_actions(0)?,
        vec![Action::PutLeft(card(6)), Action::PutRight(card(6)), Action::Draw]
    );
    Ok(())
}

#[test]
fn turn_order_alternates_and_the_opener_rotates_per_game() -> Result<(), GameError> {
    let mut first = GameBuilder::new(0).build()?;
    let second = GameBuilder::new(1).build()?;
    assert_eq!(first.current_player(), 0);
    assert_eq!(second.current_player(), 1);
    first.apply_action(0, Action::Draw)?;
    assert_eq!(first.current_player(), 1);
    assert!(matches!(
        first.apply_action(0, Action::Draw),
        Err(GameError::NotPlayersTurn)
    ));
    Ok(())
}

#[test]
fn oversized_decks_are_rejected() {
    let mut deck = card::full_deck();
    deck.push(card(1));
    let result = GameBuilder::new(0)
        .with_decks([deck, card::full_deck()])
        .build();
    assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
}
