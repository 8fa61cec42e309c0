//! Explicit per-session state and the share token addressing it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{allocation::AllocationTable, ledger::Ledger};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Opaque token addressing a persisted ledger/allocation snapshot pair.
pub struct ShareId(String);

impl ShareId {
    /// Accepts any short alphanumeric token. The generator produces 8 hex
    /// characters; foreign ids from older links are tolerated.
    pub fn new(token: impl Into<String>) -> Result<Self, ShareIdError> {
        let token = token.into();
        if token.is_empty() || token.len() > 64 {
            return Err(ShareIdError::InvalidLength);
        }
        if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ShareIdError::InvalidCharacter);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShareId {
    type Err = ShareIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`ShareId`] values.
pub enum ShareIdError {
    InvalidLength,
    InvalidCharacter,
}

impl fmt::Display for ShareIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareIdError::InvalidLength => f.write_str("share id must be 1 to 64 characters"),
            ShareIdError::InvalidCharacter => {
                f.write_str("share id may only contain ascii letters and digits")
            }
        }
    }
}

impl std::error::Error for ShareIdError {}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// All mutable state owned by one dashboard session. Passed explicitly
/// into every operation; there are no process-wide globals.
pub struct SessionState {
    pub ledger: Ledger,
    pub allocations: AllocationTable,
    pub share_id: Option<ShareId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(ledger: Ledger, allocations: AllocationTable) -> Self {
        Self {
            ledger,
            allocations,
            share_id: None,
        }
    }
}
