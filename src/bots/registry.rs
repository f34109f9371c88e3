use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{FirstBot, GreedyBot, RandomBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - first
/// - random[:seed]
/// - greedy
pub fn create_bot_from_spec(spec: &str, seed: u64) -> Result<Box<dyn Bot>, String> {
    match label_for_spec(spec).as_str() {
        "first" => Ok(Box::new(FirstBot)),
        "random" => {
            let custom_seed = spec
                .split_once(':')
                .and_then(|(_, value)| value.trim().parse::<u64>().ok())
                .unwrap_or(seed);
            Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
        }
        "greedy" => Ok(Box::new(GreedyBot::new())),
        _ => Err(format!("unrecognized bot spec: {spec}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_ignore_case_and_arguments() {
        assert_eq!(label_for_spec("Random:42"), "random");
        assert_eq!(label_for_spec("greedy"), "greedy");
    }

    #[test]
    fn unknown_specs_are_rejected() {
        assert!(create_bot_from_spec("first", 0).is_ok());
        assert!(create_bot_from_spec("random:7", 0).is_ok());
        assert!(create_bot_from_spec("oracle", 0).is_err());
    }
}
