use std::fmt::Write;

use crate::action::Action;
use crate::card::Card;
use crate::runner::MatchReport;
use crate::state::TurnView;

pub fn render_view(view: &TurnView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Turn {}", view.turn);
    let _ = writeln!(out, "Hand: {}", format_cards(&view.hand));
    let _ = writeln!(out, "Opponent hand: {}", format_cards(&view.opponent_hand));
    for (label, pile) in [("Left", &view.left), ("Right", &view.right)] {
        let shown = match pile.first() {
            Some(top) => format!("top {top} ({} card(s))", pile.len()),
            None => String::from("[-]"),
        };
        let _ = writeln!(out, "{label} pile: {shown}");
    }
    let _ = writeln!(
        out,
        "Last moves: you {} | opponent {}",
        describe_action(&view.previous),
        describe_action(&view.opponent_previous)
    );
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::None => String::from("none"),
        Action::Pass => String::from("pass"),
        Action::Draw => String::from("draw"),
        Action::PutLeft(card) => format!("put {card} on left"),
        Action::PutRight(card) => format!("put {card} on right"),
    }
}

/// Plain-text summary of a finished match, one line per game.
pub fn render_report(report: &MatchReport) -> String {
    let mut out = String::new();
    for game in &report.games {
        let outcome = match game.winner {
            Some(winner) => format!("player {} wins", winner + 1),
            None => String::from("draw"),
        };
        let _ = writeln!(
            out,
            "Game {}: {outcome} after {} turns, points {} / {}, forced moves {} / {}",
            game.index,
            game.turns,
            game.points[0],
            game.points[1],
            game.substitutions[0],
            game.substitutions[1],
        );
    }
    let _ = writeln!(
        out,
        "Final score: player 1 {} | player 2 {}",
        report.scores[0], report.scores[1]
    );
    out
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return String::from("[-]");
    }
    let seq = cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{seq}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_pile_tops_and_last_moves() {
        let card = |rank| Card::new(rank).unwrap();
        let view = TurnView {
            turn: 3,
            hand: vec![card(4)],
            left: vec![card(9), card(8)],
            previous: Action::Pass,
            ..TurnView::default()
        };
        let text = render_view(&view);
        assert!(text.contains("Hand: [4]"));
        assert!(text.contains("Opponent hand: [-]"));
        assert!(text.contains("Left pile: top 9 (2 card(s))"));
        assert!(text.contains("Right pile: [-]"));
        assert!(text.contains("you pass | opponent none"));
    }
}
