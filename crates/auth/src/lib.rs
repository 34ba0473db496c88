//! Authentication collaborator for biblio.
//!
//! The HTTP layer hands over whatever session token a request carried and
//! receives a binary [`Verdict`] back. Credential mechanics stay inside
//! this crate; callers only branch on the verdict.

use std::collections::HashSet;

use async_trait::async_trait;

/// Outcome of checking a request's session credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Authenticated,
    Anonymous,
}

impl Verdict {
    pub fn is_authenticated(self) -> bool {
        matches!(self, Verdict::Authenticated)
    }
}

/// Validates the session credentials presented with a request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check the session token, if any, and return a verdict.
    async fn authenticate(&self, token: Option<&str>) -> Verdict;
}

/// Authenticator backed by the fixed set of session tokens from settings.
///
/// An empty token set rejects every write.
pub struct SessionAuthenticator {
    tokens: HashSet<String>,
}

impl SessionAuthenticator {
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, token: Option<&str>) -> Verdict {
        match token {
            Some(token) if self.tokens.contains(token) => Verdict::Authenticated,
            Some(_) => {
                tracing::debug!("rejected unknown session token");
                Verdict::Anonymous
            }
            None => Verdict::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> SessionAuthenticator {
        SessionAuthenticator::new(["letmein".to_string()])
    }

    #[tokio::test]
    async fn known_token_is_authenticated() {
        let verdict = authenticator().authenticate(Some("letmein")).await;
        assert_eq!(verdict, Verdict::Authenticated);
        assert!(verdict.is_authenticated());
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous() {
        let verdict = authenticator().authenticate(Some("guess")).await;
        assert_eq!(verdict, Verdict::Anonymous);
    }

    #[tokio::test]
    async fn missing_token_is_anonymous() {
        let verdict = authenticator().authenticate(None).await;
        assert_eq!(verdict, Verdict::Anonymous);
    }

    #[tokio::test]
    async fn empty_token_set_rejects_everything() {
        let authenticator = SessionAuthenticator::new(Vec::<String>::new());
        let verdict = authenticator.authenticate(Some("anything")).await;
        assert_eq!(verdict, Verdict::Anonymous);
    }
}
