//! Explicit per-caller session context.
//!
//! Submitter identity travels in a [`Session`] argument rather than in
//! ambient global state, so the registry stays testable without any
//! browser or wallet runtime behind it.

/// Per-caller context for registry operations.
///
/// Carries the optional submitter identity (typically a wallet address).
/// Lookups and verification work on any session; registration requires a
/// connected one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    submitter: Option<String>,
}

impl Session {
    /// A session with a connected submitter identity.
    pub fn connected(submitter: impl Into<String>) -> Self {
        Self {
            submitter: Some(submitter.into()),
        }
    }

    /// A session with no submitter identity.
    pub fn anonymous() -> Self {
        Self { submitter: None }
    }

    /// The submitter identity, if connected.
    pub fn submitter(&self) -> Option<&str> {
        self.submitter.as_deref()
    }

    /// Whether this session can submit registrations.
    pub fn is_connected(&self) -> bool {
        self.submitter.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_session() {
        let session = Session::connected("0xWallet");
        assert!(session.is_connected());
        assert_eq!(session.submitter(), Some("0xWallet"));
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_connected());
        assert_eq!(session.submitter(), None);
    }

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(Session::default(), Session::anonymous());
    }
}
