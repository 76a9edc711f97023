// Copyright 2026 Oxide Computer Company

//! Revisions and storage modes.

use crate::{RepoPath, RevisionParseError};
use std::{fmt, str::FromStr};

/// The last revision that modified an asset.
///
/// This is an opaque short identifier as printed by `git log --format=%h`.
/// Parsing trims surrounding whitespace; the trimmed value is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// Returns the revision as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `revision:path` object spec understood by `git show` and
    /// `git cat-file`.
    pub fn blob_spec(&self, path: &RepoPath) -> String {
        format!("{}:{}", self.0, path)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Revision {
    type Err = RevisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RevisionParseError::Empty);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(RevisionParseError::InvalidCharacter(
                trimmed.to_owned(),
            ));
        }
        Ok(Revision(trimmed.to_owned()))
    }
}

/// Where the content of an asset is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageMode {
    /// Stored directly in ordinary Git history.
    Inline,
    /// Stored as a content-addressed Git LFS object, with only a pointer
    /// file in history.
    LargeFileStorage,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Inline => write!(f, "inline"),
            StorageMode::LargeFileStorage => write!(f, "lfs"),
        }
    }
}
