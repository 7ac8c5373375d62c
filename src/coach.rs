use crate::database::Repository;
use crate::error::{Error, Violations};
use crate::id::{CoachId, TeamId};
use crate::validate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Coach {
    pub id: CoachId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub team: Option<TeamId>,
}

impl Display for Coach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CoachDraft {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub team: Option<TeamId>,
}

impl CoachDraft {
    /// `today` is the date the age rule is evaluated against; the boundary
    /// layer passes the current date.
    pub fn validate(
        &self,
        repo: &impl Repository,
        editing: Option<CoachId>,
        today: NaiveDate,
    ) -> Result<(), Error> {
        // Dangling references are a caller problem, not a rule failure.
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

        if let Err(message) = validate::adult(
            self.date_of_birth,
            today,
            "Coach has to be at least 18 years old.",
        ) {
            errors.field("date_of_birth", message);
        }

        if let Some(team) = team {
            if let Some(current) = repo.coach_of(team.id) {
                if editing != Some(current.id) {
                    errors.entity("This team already has a coach.");
                }
            }
        }

        errors.finish()
    }

    pub(crate) fn into_coach(self, id: CoachId) -> Coach {
        Coach {
            id,
            name: self.name,
            date_of_birth: self.date_of_birth,
            team: self.team,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoachDraft;
    use crate::database::fixtures::{seed, today};
    use crate::error::Error;
    use crate::id::TeamId;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, date_of_birth: NaiveDate, team: Option<TeamId>) -> CoachDraft {
        CoachDraft {
            name: name.to_string(),
            date_of_birth,
            team,
        }
    }

    #[test]
    fn accepts_a_coach_with_and_without_a_team() {
        let seed = seed();
        let no_team = draft("Valid Coach", date(1980, 1, 1), None);
        assert_eq!(no_team.validate(&seed.db, None, today()), Ok(()));
        let with_team = draft("Valid Coach", date(1980, 1, 1), Some(seed.ind));
        assert_eq!(with_team.validate(&seed.db, None, today()), Ok(()));
    }

    #[test]
    fn unknown_team_is_a_reference_error() {
        let seed = seed();
        let stray = TeamId::new();
        let err = draft("Valid Coach", date(1980, 1, 1), Some(stray))
            .validate(&seed.db, None, today())
            .unwrap_err();
        assert_eq!(err, Error::NotFound { kind: "team", id: stray.0 });
    }

    #[test]
    fn one_coach_per_team() {
        let mut seed = seed();
        let spoelstra = seed
            .db
            .create_coach(draft("Erik Spoelstra", date(1970, 1, 1), Some(seed.mia)), today())
            .unwrap();

        let err = draft("Valid Coach", date(1980, 1, 1), Some(seed.mia))
            .validate(&seed.db, None, today())
            .unwrap_err();
        match &err {
            Error::Invalid(violations) => {
                assert!(violations.contains("This team already has a coach."));
            }
            Error::NotFound { .. } => panic!("unexpected {err}"),
        }

        // The sitting coach can be edited without colliding with themselves.
        let edit = draft("Erik Spoelstra", date(1970, 1, 1), Some(seed.mia));
        assert_eq!(edit.validate(&seed.db, Some(spoelstra), today()), Ok(()));
    }

    #[test]
    fn name_rules() {
        let seed = seed();
        for (name, message) in [
            ("Va3lid Coach", "Name should only contain letters."),
            ("valid Coach", "Name should be capitalized."),
            ("VALID COACH", "Name should be capitalized."),
        ] {
            let err = draft(name, date(1980, 1, 1), None)
                .validate(&seed.db, None, today())
                .unwrap_err();
            assert!(err.violations().iter().any(|v| v.message == message), "{name}");
        }
    }

    #[test]
    fn must_be_an_adult() {
        let seed = seed();
        let seventeen = date(2007, 6, 16);
        let err = draft("Valid Coach", seventeen, None)
            .validate(&seed.db, None, today())
            .unwrap_err();
        assert!(err
            .violations()
            .iter()
            .any(|v| v.message == "Coach has to be at least 18 years old."));

        let exactly_eighteen = date(2006, 6, 15);
        assert_eq!(
            draft("Valid Coach", exactly_eighteen, None).validate(&seed.db, None, today()),
            Ok(())
        );
    }
}
