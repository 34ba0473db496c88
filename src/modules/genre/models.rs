use serde::{Deserialize, Serialize};

use biblio_store::Record;

/// A book genre (science fiction, french poetry, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Genre payload for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

impl Record for Genre {
    type Draft = NewGenre;

    fn assemble(id: i64, draft: NewGenre) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
