pub mod first;
pub mod greedy;
pub mod random;
pub mod registry;

pub use first::FirstBot;
pub use greedy::GreedyBot;
pub use random::RandomBot;
