use serde::{Deserialize, Serialize};
use time::Date;

use biblio_store::Record;

/// Loan status of a physical copy, serialized as the catalog's
/// single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

/// A physical copy of a book that can be borrowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInstance {
    /// Storage-assigned id, immutable once created
    pub id: i64,
    /// Id of the [`Book`](crate::modules::book::models::Book) this copy belongs to
    pub book: i64,
    pub imprint: String,
    /// Date the copy is due back, absent when not on loan
    pub due_back: Option<Date>,
    pub status: LoanStatus,
}

/// Book instance payload for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookInstance {
    pub book: i64,
    pub imprint: String,
    #[serde(default)]
    pub due_back: Option<Date>,
    pub status: LoanStatus,
}

impl Record for BookInstance {
    type Draft = NewBookInstance;

    fn assemble(id: i64, draft: NewBookInstance) -> Self {
        Self {
            id,
            book: draft.book,
            imprint: draft.imprint,
            due_back: draft.due_back,
            status: draft.status,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_status_uses_single_letter_codes() {
        assert_eq!(
            serde_json::to_string(&LoanStatus::Available).unwrap(),
            r#""a""#
        );
        assert_eq!(
            serde_json::from_str::<LoanStatus>(r#""o""#).unwrap(),
            LoanStatus::OnLoan
        );
    }

    #[test]
    fn unknown_status_code_is_rejected() {
        assert!(serde_json::from_str::<LoanStatus>(r#""x""#).is_err());
    }
}
