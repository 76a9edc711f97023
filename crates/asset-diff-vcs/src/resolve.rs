// Copyright 2026 Oxide Computer Company

//! Resolving an asset's last revision and storage mode.

use crate::{ResolveError, VcsGateway};
use asset_diff::{RepoPath, Revision, RevisionParseError, StorageMode};
use std::collections::BTreeSet;
use tracing::debug;

/// Width of the prefix before the path on each `git lfs ls-files` line:
/// a 10-character short oid, a space, `*` or `-`, and a space.
const LFS_LS_FILES_PREFIX_LEN: usize = 13;

/// Returns the last revision that modified `path`.
///
/// Fails with [`ResolveError::NoHistory`] if the asset was never committed.
pub fn find_last_revision<G: VcsGateway>(
    vcs: &G,
    path: &RepoPath,
) -> Result<Revision, ResolveError> {
    let output = vcs.log_last_revision(path)?;
    let revision = output.parse::<Revision>().map_err(|error| match error {
        RevisionParseError::Empty => {
            ResolveError::NoHistory { path: path.clone() }
        }
        error => ResolveError::InvalidRevision { path: path.clone(), error },
    })?;
    debug!(%path, %revision, "last revision");
    Ok(revision)
}

/// Determines whether `path` is stored in Git LFS or inline.
pub fn classify_storage<G: VcsGateway>(
    vcs: &G,
    path: &RepoPath,
) -> Result<StorageMode, ResolveError> {
    let listing = vcs.list_lfs_files()?;
    let mode = storage_mode(&listing, path);
    debug!(%path, %mode, "storage mode");
    Ok(mode)
}

/// Classifies `path` against a `git lfs ls-files` listing.
///
/// Membership is exact string equality with a listed path; a listed path
/// that merely starts with or contains `path` does not count.
pub fn storage_mode(listing: &str, path: &RepoPath) -> StorageMode {
    if lfs_tracked_paths(listing).contains(path.as_str()) {
        StorageMode::LargeFileStorage
    } else {
        StorageMode::Inline
    }
}

/// Parses a `git lfs ls-files` listing into the set of tracked paths.
///
/// Lines too short to carry a path are ignored.
pub fn lfs_tracked_paths(listing: &str) -> BTreeSet<&str> {
    listing
        .lines()
        .filter_map(|line| line.get(LFS_LS_FILES_PREFIX_LEN..))
        .filter(|path| !path.is_empty())
        .collect()
}
