use crate::database::Repository;
use crate::error::{Error, Violations};
use crate::id::{PlayerId, TeamId};
use crate::validate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Country names that are legitimately all-uppercase.
pub const COUNTRY_CODES: &[&str] = &["USA", "DRC", "UK", "UAE"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Position {
    #[default]
    PG,
    SG,
    SF,
    PF,
    C,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub position: Position,
    pub height: u32,
    pub weight: u32,
    pub jersey_number: u8,
    pub team: Option<TeamId>,
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - DOB: {}", self.name, self.date_of_birth)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PlayerDraft {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub country: String,
    pub position: Position,
    pub height: i32,
    pub weight: i32,
    pub jersey_number: i32,
    pub team: Option<TeamId>,
}

impl PlayerDraft {
    pub fn validate(
        &self,
        repo: &impl Repository,
        editing: Option<PlayerId>,
        today: NaiveDate,
    ) -> Result<(), Error> {
        let team = match self.team {
            Some(id) => Some(repo.require_team(id)?),
            None => None,
        };

        let mut errors = Violations::new();

        if let Err(message) = validate::alpha_and_title(
            &self.name,
            &[],
            "Name should only contain letters.",
            "Name should be capitalized.",
        ) {
            errors.field("name", message);
        }

        if let Err(message) = validate::not_future_date(
            self.date_of_birth,
            today,
            "Birth date cannot be in the future.",
        ) {
            errors.field("date_of_birth", message);
        }

        if let Err(message) = validate::alpha_and_title(
            &self.country,
            COUNTRY_CODES,
            "Country name should only contain letters.",
            "Country name should be capitalized.",
        ) {
            errors.field("country", message);
        }

        if let Err(message) =
            validate::positive(i64::from(self.height), "Height must be greater than 0.")
        {
            errors.field("height", message);
        }
        if let Err(message) =
            validate::positive(i64::from(self.weight), "Weight must be greater than 0.")
        {
            errors.field("weight", message);
        }

        if (0..=99).contains(&self.jersey_number) {
            let jersey_number = u8::try_from(self.jersey_number).unwrap_or_default();
            // The uniqueness rule only makes sense for a wearable number.
            if let Some(team) = team {
                if let Some(other) = repo.player_with_jersey(team.id, jersey_number) {
                    if editing != Some(other.id) {
                        errors.entity(
                            "This jersey number is already assigned to a player in this team.",
                        );
                    }
                }
            }
        } else {
            errors.field(
                "jersey_number",
                "Invalid jersey number. Only numbers 0-99 are allowed.",
            );
        }

        errors.finish()
    }

    pub(crate) fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth,
            country: self.country,
            position: self.position,
            height: u32::try_from(self.height).unwrap_or_default(),
            weight: u32::try_from(self.weight).unwrap_or_default(),
            jersey_number: u8::try_from(self.jersey_number).unwrap_or_default(),
            team: self.team,
        }
    }
}
