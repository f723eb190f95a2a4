use std::fmt;

use serde::Serialize;

/// The viewer's role on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipClass {
    Author,
    Assignee,
    Reviewer,
}

impl RelationshipClass {
    pub fn label(self) -> &'static str {
        match self {
            RelationshipClass::Author => "author",
            RelationshipClass::Assignee => "assignee",
            RelationshipClass::Reviewer => "reviewer",
        }
    }
}

impl fmt::Display for RelationshipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
