// Copyright 2026 Oxide Computer Company

//! Error types for asset value parsing.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that occurs while parsing an [`LfsOid`](crate::LfsOid).
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum LfsOidParseError {
    /// The object id has an invalid length.
    #[error("invalid length: expected 64 (SHA-256) hex characters, got {0}")]
    InvalidLength(usize),

    /// The object id is not valid hexadecimal.
    #[error("invalid hexadecimal")]
    InvalidHex(hex::FromHexError),
}

/// An error that occurs while parsing a [`Revision`](crate::Revision).
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum RevisionParseError {
    /// The input was empty or contained only whitespace.
    #[error("revision is empty")]
    Empty,

    /// The revision contains whitespace or a `:` after trimming, so it
    /// cannot be combined with a path as `revision:path`.
    #[error("revision {0:?} contains whitespace or ':'")]
    InvalidCharacter(String),
}

/// An error that occurs while constructing a [`RepoPath`](crate::RepoPath).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepoPathError {
    /// The path was empty.
    #[error("repository-relative path is empty")]
    Empty,

    /// The path contains a non-normal component (e.g., `..`, `.`, `/`, or a
    /// Windows prefix). Only plain file and directory names are allowed.
    #[error(
        "repository-relative path {path:?} contains non-normal component \
         {component:?} (only plain file/directory names are allowed)"
    )]
    InvalidPathComponent {
        /// The full path that failed validation.
        path: Utf8PathBuf,
        /// The non-normal component that was found (e.g., `..`, `.`, `/`).
        component: String,
    },

    /// The path has an empty segment: a repeated `/` or a trailing `/`.
    #[error("repository-relative path {path:?} contains an empty segment")]
    EmptyComponent {
        /// The full path that failed validation.
        path: Utf8PathBuf,
    },

    /// The path contains a newline character.
    #[error("repository-relative path contains a newline character")]
    NewlineInPath,
}
