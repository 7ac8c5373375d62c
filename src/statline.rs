use crate::database::Repository;
use crate::error::{Error, Violations};
use crate::id::{GameId, PlayerId, StatlineId};
use crate::stats::round2;
use serde::{Deserialize, Serialize};

/// A made/attempted pair for one shot category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShotLine {
    pub made: u32,
    pub attempted: u32,
}

impl ShotLine {
    /// Success rate in percent, two decimals. An empty category is 0.0
    /// rather than a division by zero.
    pub fn percentage(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            round2(100.0 * f64::from(self.made) / f64::from(self.attempted))
        }
    }
}

/// One player's counting statistics for one game.
#[derive(Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Statline {
    pub id: StatlineId,
    pub game: GameId,
    pub player: PlayerId,
    pub field_goals: ShotLine,
    pub three_pointers: ShotLine,
    pub free_throws: ShotLine,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
}

impl Statline {
    /// Field goals made already count the three pointers, so score the twos
    /// and threes separately.
    pub fn points(&self) -> u32 {
        let twos = self.field_goals.made - self.three_pointers.made;
        self.free_throws.made + 2 * twos + 3 * self.three_pointers.made
    }

    pub fn rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct StatlineDraft {
    pub game: GameId,
    pub player: PlayerId,
    pub field_goals_made: i32,
    pub field_goals_attempted: i32,
    pub three_pointers_made: i32,
    pub three_pointers_attempted: i32,
    pub free_throws_made: i32,
    pub free_throws_attempted: i32,
    pub offensive_rebounds: i32,
    pub defensive_rebounds: i32,
    pub assists: i32,
    pub steals: i32,
    pub blocks: i32,
    pub turnovers: i32,
}

impl StatlineDraft {
    pub fn validate(
        &self,
        repo: &impl Repository,
        editing: Option<StatlineId>,
    ) -> Result<(), Error> {
        let game = repo.require_game(self.game)?;
        let player = repo.require_player(self.player)?;

        let mut errors = Violations::new();

        for (field, value, message) in [
            (
                "field_goals_made",
                self.field_goals_made,
                "The number of field goals made has to be non-negative.",
            ),
            (
                "field_goals_attempted",
                self.field_goals_attempted,
                "The number of field goals attempted has to be non-negative.",
            ),
            (
                "three_pointers_made",
                self.three_pointers_made,
                "The number of three pointers made has to be non-negative.",
            ),
            (
                "three_pointers_attempted",
                self.three_pointers_attempted,
                "The number of three pointers attempted has to be non-negative.",
            ),
            (
                "free_throws_made",
                self.free_throws_made,
                "The number of free throws made has to be non-negative.",
            ),
            (
                "free_throws_attempted",
                self.free_throws_attempted,
                "The number of free throws attempted has to be non-negative.",
            ),
            (
                "offensive_rebounds",
                self.offensive_rebounds,
                "The number of offensive rebounds has to be non-negative.",
            ),
            (
                "defensive_rebounds",
                self.defensive_rebounds,
                "The number of defensive rebounds has to be non-negative.",
            ),
            ("assists", self.assists, "The number of assists has to be non-negative."),
            ("steals", self.steals, "The number of steals has to be non-negative."),
            ("blocks", self.blocks, "The number of blocks has to be non-negative."),
            (
                "turnovers",
                self.turnovers,
                "The number of turnovers has to be non-negative.",
            ),
        ] {
            if crate::validate::non_negative(i64::from(value), message).is_err() {
                errors.field(field, message);
            }
        }

        if let Some(existing) = repo.statline_for(game.id, player.id) {
            if editing != Some(existing.id) {
                errors.entity("Cannot have two instances of stats of the same player in one game.");
            }
        }

        match player.team {
            Some(team) if game.teams.contains(&team) => {}
            _ => errors.entity("This player is not in the team participating in the game."),
        }

        // Negative counts were already flagged above; comparing against them
        // would only fabricate a second violation.
        let consistent = |made: i32, attempted: i32| made < 0 || attempted < 0 || made <= attempted;

        for (made, attempted) in [
            (self.field_goals_made, self.field_goals_attempted),
            (self.three_pointers_made, self.three_pointers_attempted),
            (self.free_throws_made, self.free_throws_attempted),
        ] {
            if !consistent(made, attempted) {
                errors.entity(
                    "The number of shots made can't be greater than the number of shots attempted.",
                );
            }
        }
        if !consistent(self.three_pointers_attempted, self.field_goals_attempted) {
            errors.entity(
                "The number of three pointers attempted can't be greater than the number of field goals attempted.",
            );
        }
        if !consistent(self.three_pointers_made, self.field_goals_made) {
            errors.entity(
                "The number of three pointers made can't be greater than the number of field goals made.",
            );
        }

        errors.finish()
    }

    pub(crate) fn into_statline(self, id: StatlineId) -> Statline {
        let count = |value: i32| u32::try_from(value).unwrap_or_default();
        Statline {
            id,
            game: self.game,
            player: self.player,
            field_goals: ShotLine {
                made: count(self.field_goals_made),
                attempted: count(self.field_goals_attempted),
            },
            three_pointers: ShotLine {
                made: count(self.three_pointers_made),
                attempted: count(self.three_pointers_attempted),
            },
            free_throws: ShotLine {
                made: count(self.free_throws_made),
                attempted: count(self.free_throws_attempted),
            },
            offensive_rebounds: count(self.offensive_rebounds),
            defensive_rebounds: count(self.defensive_rebounds),
            assists: count(self.assists),
            steals: count(self.steals),
            blocks: count(self.blocks),
            turnovers: count(self.turnovers),
        }
    }
}
