#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

mod boxscore;
mod coach;
mod database;
mod error;
mod game;
pub mod id;
mod player;
mod statline;
mod stats;
mod team;
pub mod validate;

pub use crate::boxscore::{box_score, BoxScore, BoxScoreLine, TeamScore};
pub use crate::coach::{Coach, CoachDraft};
pub use crate::database::{Database, Repository};
pub use crate::error::{Error, Violation, Violations};
pub use crate::game::{AwayHome, Game, GameDraft};
pub use crate::player::{Player, PlayerDraft, Position, COUNTRY_CODES};
pub use crate::statline::{ShotLine, Statline, StatlineDraft};
pub use crate::stats::{player_averages, team_score, PlayerAverages, StatlineDerived};
pub use crate::team::{Team, TeamDraft};

use serde::{Deserialize, Serialize};

/// A whole league snapshot. Deserializing one runs the store consistency
/// check, so a `League` loaded from disk is structurally sound by
/// construction.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct League {
    #[serde(flatten, deserialize_with = "deserialize_database")]
    database: Database,
}

impl League {
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }
}

fn deserialize_database<'de, D>(deserializer: D) -> Result<Database, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let database = Database::deserialize(deserializer)?;
    database
        .check_consistency()
        .map_err(serde::de::Error::custom)?;
    Ok(database)
}

#[cfg(test)]
mod tests {
    use crate::database::fixtures::{butler_game_one, curry_game_one, seed};
    use crate::{League, Repository};

    #[test]
    fn snapshots_round_trip() {
        let mut seed = seed();
        seed.db.create_statline(butler_game_one(&seed)).unwrap();
        seed.db.create_statline(curry_game_one(&seed)).unwrap();
        let league = League { database: seed.db };

        let json = serde_json::to_string(&league).unwrap();
        let rebuilt: League = serde_json::from_str(&json).unwrap();
        assert_eq!(rebuilt.database().teams().count(), 3);
        assert_eq!(rebuilt.database().games().count(), 2);
        assert_eq!(
            rebuilt.database().statlines_for_game(seed.game).len(),
            2
        );
    }

    #[test]
    fn loading_rejects_inconsistent_snapshots() {
        let mut seed = seed();
        seed.db.create_statline(butler_game_one(&seed)).unwrap();
        // A statline whose game was deleted out from under it.
        seed.db.games.remove(&seed.game);
        let json = serde_json::to_string(&League { database: seed.db }).unwrap();

        let err = serde_json::from_str::<League>(&json).unwrap_err();
        assert!(err.to_string().contains("references missing game"), "{err}");
    }
}
