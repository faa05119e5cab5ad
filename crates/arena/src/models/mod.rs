mod game;
mod tournament;

pub use game::{CreateGame, UpdateGame};
pub use tournament::{BonusQuote, CreateTournament, UpdateTournament};
