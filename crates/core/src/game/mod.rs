mod types;

pub use types::Game;
