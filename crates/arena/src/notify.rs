//! Creation observers registered by the server.

use arena_core::tournament::{CreationObserver, Tournament};

/// Records every created tournament in the log, together with the bonus
/// its start date qualifies for.
pub struct LogObserver;

impl CreationObserver<Tournament> for LogObserver {
    fn on_created(&self, tournament: &Tournament) {
        let strategy = tournament.bonus_strategy();
        tracing::info!(
            tournament_id = %tournament.id,
            game_id = %tournament.game_id,
            name = %tournament.name,
            starts_on = %tournament.starts_on,
            bonus = ?strategy,
            "New tournament scheduled"
        );
    }
}
