use crate::database::Repository;
use crate::error::{Error, Violations};
use crate::id::{GameId, TeamId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// No team plays two games whose tip-offs are this close, inclusive.
const SCHEDULE_WINDOW_HOURS: i64 = 2;

#[derive(Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Game {
    pub id: GameId,
    pub date: DateTime<Utc>,
    pub teams: AwayHome<TeamId>,
}

impl Game {
    /// The conventional header line, away side first: "GSW @ MIA - <tip-off>".
    pub fn summary(&self, repo: &impl Repository) -> String {
        let abbreviation = |id: TeamId| {
            repo.team(id)
                .map_or_else(|| id.to_string(), |team| team.abbreviation.clone())
        };
        format!(
            "{} @ {} - {}",
            abbreviation(self.teams.away),
            abbreviation(self.teams.home),
            self.date
        )
    }
}

/// A pair of per-side values, away and home.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AwayHome<T> {
    pub away: T,
    pub home: T,
}

impl<T> AwayHome<T> {
    pub fn map<U, F>(self, mut op: F) -> AwayHome<U>
    where
        F: FnMut(T) -> U,
    {
        AwayHome {
            away: op(self.away),
            home: op(self.home),
        }
    }
}

impl<T: PartialEq> AwayHome<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.away == *value || self.home == *value
    }

    /// Same two sides, in either orientation.
    pub fn same_pairing(&self, other: &AwayHome<T>) -> bool {
        (self.away == other.away && self.home == other.home)
            || (self.away == other.home && self.home == other.away)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct GameDraft {
    pub date: DateTime<Utc>,
    pub teams: AwayHome<TeamId>,
}

impl GameDraft {
    pub fn validate(&self, repo: &impl Repository, editing: Option<GameId>) -> Result<(), Error> {
        repo.require_team(self.teams.home)?;
        repo.require_team(self.teams.away)?;

        let mut errors = Violations::new();

        if self.teams.home == self.teams.away {
            errors.entity("Home team and Away team cannot be the same.");
            // The pairing and overlap rules are meaningless against itself.
            return errors.finish();
        }

        let competing = |game: &&Game| Some(game.id) != editing;

        if repo
            .games_between(&self.teams, self.date)
            .iter()
            .any(|game| competing(game))
        {
            errors.entity("Cannot have two games between the same teams at the same time.");
        }

        let window = Duration::hours(SCHEDULE_WINDOW_HOURS);
        for (team, message) in [
            (self.teams.home, "Home team has another game around the same time."),
            (self.teams.away, "Away team has another game around the same time."),
        ] {
            if repo
                .games_for_team_within(team, self.date, window)
                .iter()
                .any(|game| competing(game))
            {
                errors.entity(message);
            }
        }

        errors.finish()
    }

    pub(crate) fn into_game(self, id: GameId) -> Game {
        Game {
            id,
            date: self.date,
            teams: self.teams,
        }
    }
}
