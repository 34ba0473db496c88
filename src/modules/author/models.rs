use serde::{Deserialize, Serialize};
use time::Date;

use biblio_store::Record;

/// A catalog author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Storage-assigned id, immutable once created
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// ISO 8601 date, absent for living or undocumented authors
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

/// Author payload for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub date_of_death: Option<Date>,
}

impl Record for Author {
    type Draft = NewAuthor;

    fn assemble(id: i64, draft: NewAuthor) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            date_of_birth: draft.date_of_birth,
            date_of_death: draft.date_of_death,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
