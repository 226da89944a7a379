use thiserror::Error;

/// Result of a cache lookup that may legitimately miss.
///
/// A miss means the metadata store has not been refreshed for the requested
/// key; it is recoverable by a refresh and is kept apart from store failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Missing(LookupMiss),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing(_))
    }
}

/// What was not found in the metadata store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupMiss {
    #[error("ledger {0} is not cached")]
    Ledger(i64),
    #[error("period \"{0}\" is not cached for this ledger")]
    Period(String),
}
