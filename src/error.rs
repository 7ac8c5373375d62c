use serde::Serialize;
use std::fmt::{self, Display};
use thiserror::Error;
use uuid::Uuid;

/// One failed rule. `field` is `None` for cross-record rules that concern the
/// submission as a whole rather than a single scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: Option<&'static str>,
    pub message: &'static str,
}

/// Every violation found in one submission, in rule order. Rules push into
/// this instead of bailing on the first failure, so a caller sees the whole
/// picture at once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Violations {
        Violations::default()
    }

    pub fn field(&mut self, field: &'static str, message: &'static str) {
        self.0.push(Violation {
            field: Some(field),
            message,
        });
    }

    pub fn entity(&mut self, message: &'static str) {
        self.0.push(Violation {
            field: None,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|v| v.message == message)
    }

    /// Collapses the accumulator: no violations means the submission passed.
    pub fn finish(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(self))
        }
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match violation.field {
                Some(field) => write!(f, "{}: {}", field, violation.message)?,
                None => f.write_str(violation.message)?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A referenced record does not resolve in the store. Distinct from rule
    /// failures: it signals a caller input problem, not a business-rule one.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    /// One or more validation rules rejected the submission.
    #[error("{0}")]
    Invalid(Violations),
}

impl Error {
    /// The violation list of an `Invalid` error, empty for `NotFound`.
    /// Convenient in tests and boundary code that only cares about messages.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::Invalid(Violations(violations)) => violations,
            Error::NotFound { .. } => &[],
        }
    }
}
