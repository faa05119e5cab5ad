use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use arena_core::tournament::{BonusStrategy, Tournament};

/// Request payload for creating a new tournament.
#[derive(Debug, Deserialize)]
pub struct CreateTournament {
    pub game_id: Uuid,
    pub name: String,
    pub starts_on: NaiveDate,
    #[serde(default)]
    pub prize_pool: i64,
}

impl CreateTournament {
    /// Converts the create request into a Tournament with a fresh ID.
    pub fn into_tournament(self) -> Tournament {
        Tournament::new(self.game_id, self.name, self.starts_on, self.prize_pool)
    }
}

/// Request payload for replacing a tournament.
#[derive(Debug, Deserialize)]
pub struct UpdateTournament {
    pub game_id: Uuid,
    pub name: String,
    pub starts_on: NaiveDate,
    #[serde(default)]
    pub prize_pool: i64,
}

impl UpdateTournament {
    /// Builds the replacement tournament for `id`.
    pub fn into_tournament(self, id: Uuid) -> Tournament {
        Tournament::new(self.game_id, self.name, self.starts_on, self.prize_pool).with_id(id)
    }
}

/// Response body of `GET /api/tournaments/{id}/bonus`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BonusQuote {
    pub tournament_id: Uuid,
    pub starts_on: NaiveDate,
    pub strategy: BonusStrategy,
    pub multiplier: f64,
    pub base_prize_pool: i64,
    pub bonus_prize_pool: i64,
}

impl From<&Tournament> for BonusQuote {
    fn from(tournament: &Tournament) -> Self {
        let strategy = tournament.bonus_strategy();
        Self {
            tournament_id: tournament.id,
            starts_on: tournament.starts_on,
            strategy,
            multiplier: strategy.multiplier(),
            base_prize_pool: tournament.prize_pool,
            bonus_prize_pool: strategy.apply(tournament.prize_pool),
        }
    }
}
