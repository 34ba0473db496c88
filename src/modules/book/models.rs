use serde::{Deserialize, Serialize};

use biblio_store::Record;

/// A catalog book (the work, not a physical copy).
///
/// References are bare ids into the author, genre and language tables; no
/// referential integrity is enforced across tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Storage-assigned id, immutable once created
    pub id: i64,
    pub title: String,
    /// Id of the authoring [`Author`](crate::modules::author::models::Author)
    pub author: i64,
    pub summary: String,
    pub isbn: String,
    /// Ids of the genres this book belongs to
    pub genre: Vec<i64>,
    /// Id of the [`Language`](crate::modules::language::models::Language)
    pub language: i64,
}

/// Book payload for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: i64,
    pub summary: String,
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<i64>,
    pub language: i64,
}

impl Record for Book {
    type Draft = NewBook;

    fn assemble(id: i64, draft: NewBook) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            summary: draft.summary,
            isbn: draft.isbn,
            genre: draft.genre,
            language: draft.language,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
