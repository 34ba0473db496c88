use serde::{Deserialize, Serialize};

use biblio_store::Record;

/// A language books are written in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    pub name: String,
}

/// Language payload for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLanguage {
    pub name: String,
}

impl Record for Language {
    type Draft = NewLanguage;

    fn assemble(id: i64, draft: NewLanguage) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
