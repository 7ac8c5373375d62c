use crate::database::Repository;
use crate::error::{Error, Violations};
use crate::id::TeamId;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Default, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Team {
    pub id: TeamId,
    pub abbreviation: String,
    pub full_name: String,
}

impl Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbreviation)
    }
}

/// Raw team fields as parsed by the boundary layer, not yet validated.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TeamDraft {
    pub abbreviation: String,
    pub full_name: String,
}

impl TeamDraft {
    /// Runs every team rule, collecting all violations. `editing` excludes
    /// the record being updated from the uniqueness queries.
    pub fn validate(&self, repo: &impl Repository, editing: Option<TeamId>) -> Result<(), Error> {
        let mut errors = Violations::new();

        let abbreviation = self.abbreviation.as_str();
        if abbreviation.chars().count() != 3 {
            errors.field(
                "abbreviation",
                "Team name abbreviation must contain 3 letters.",
            );
        }
        if !abbreviation.chars().all(char::is_alphabetic) {
            errors.field(
                "abbreviation",
                "Team name abbreviation can contain only letters.",
            );
        } else if abbreviation.chars().any(char::is_lowercase) {
            errors.field("abbreviation", "Team name abbreviation should be uppercase.");
        }

        if let Err(message) = validate::alphanumeric_and_title(
            &self.full_name,
            "Team name can contain only letters and numbers.",
            "Team name should be capitalized.",
        ) {
            errors.field("full_name", message);
        }

        if let Some(other) = repo.team_with_abbreviation(abbreviation) {
            if editing != Some(other.id) {
                errors.field(
                    "abbreviation",
                    "A team with this abbreviation already exists.",
                );
            }
        }
        if let Some(other) = repo.team_with_full_name(&self.full_name) {
            if editing != Some(other.id) {
                errors.field("full_name", "A team with this full name already exists.");
            }
        }

        errors.finish()
    }

    pub(crate) fn into_team(self, id: TeamId) -> Team {
        Team {
            id,
            abbreviation: self.abbreviation,
            full_name: self.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TeamDraft;
    use crate::database::{Database, Repository};
    use crate::error::Error;

    fn draft(abbreviation: &str, full_name: &str) -> TeamDraft {
        TeamDraft {
            abbreviation: abbreviation.to_string(),
            full_name: full_name.to_string(),
        }
    }

    fn messages(err: &Error) -> Vec<&'static str> {
        err.violations().iter().map(|v| v.message).collect()
    }

    #[test]
    fn accepts_plain_and_digit_led_names() {
        let db = Database::default();
        assert_eq!(draft("TES", "Test Team").validate(&db, None), Ok(()));
        assert_eq!(draft("TES", "Test T3am").validate(&db, None), Ok(()));
        assert_eq!(draft("PHI", "Philadelphia 76ers").validate(&db, None), Ok(()));
    }

    #[test]
    fn abbreviation_length() {
        let db = Database::default();
        let err = draft("TE", "Test Team").validate(&db, None).unwrap_err();
        assert!(messages(&err).contains(&"Team name abbreviation must contain 3 letters."));
        let err = draft("TEST", "Test Team").validate(&db, None).unwrap_err();
        assert!(messages(&err).contains(&"Team name abbreviation must contain 3 letters."));
    }

    #[test]
    fn abbreviation_content() {
        let db = Database::default();
        let err = draft("T35", "Test Team").validate(&db, None).unwrap_err();
        assert_eq!(
            messages(&err),
            ["Team name abbreviation can contain only letters."]
        );
        let err = draft("T/E", "Test Team").validate(&db, None).unwrap_err();
        assert!(messages(&err).contains(&"Team name abbreviation can contain only letters."));
        let err = draft("Tes", "Test Team").validate(&db, None).unwrap_err();
        assert_eq!(messages(&err), ["Team name abbreviation should be uppercase."]);
    }

    #[test]
    fn full_name_content() {
        let db = Database::default();
        let err = draft("TES", "Test Te@m").validate(&db, None).unwrap_err();
        assert_eq!(messages(&err), ["Team name can contain only letters and numbers."]);
        let err = draft("TES", "test Team").validate(&db, None).unwrap_err();
        assert_eq!(messages(&err), ["Team name should be capitalized."]);
        let err = draft("TES", "TEST TEAM").validate(&db, None).unwrap_err();
        assert_eq!(messages(&err), ["Team name should be capitalized."]);
    }

    #[test]
    fn all_field_errors_are_collected() {
        let db = Database::default();
        let err = draft("t3", "TEST TEAM").validate(&db, None).unwrap_err();
        assert_eq!(
            messages(&err),
            [
                "Team name abbreviation must contain 3 letters.",
                "Team name abbreviation can contain only letters.",
                "Team name should be capitalized.",
            ]
        );
    }

    #[test]
    fn names_are_unique() {
        let mut db = Database::default();
        db.create_team(draft("MIA", "Miami Heat")).unwrap();

        let err = draft("MIA", "Miami Hurricanes").validate(&db, None).unwrap_err();
        assert_eq!(messages(&err), ["A team with this abbreviation already exists."]);

        let err = draft("MIH", "Miami Heat").validate(&db, None).unwrap_err();
        assert_eq!(messages(&err), ["A team with this full name already exists."]);
    }

    #[test]
    fn editing_does_not_collide_with_itself() {
        let mut db = Database::default();
        let id = db.create_team(draft("MIA", "Miami Heat")).unwrap();
        assert_eq!(draft("MIA", "Miami Heat").validate(&db, Some(id)), Ok(()));
        db.update_team(id, draft("MIA", "Miami Floridians")).unwrap();
        assert_eq!(db.team(id).unwrap().full_name, "Miami Floridians");
    }
}
