// Copyright 2026 Oxide Computer Company

//! Downward and upward directory searches.
//!
//! Both searches evaluate a predicate against the direct children of a
//! directory. Children are visited in file-name order, so "first match" is
//! the same on every platform regardless of how the filesystem enumerates
//! entries.

use crate::SearchError;
use camino::{Utf8DirEntry, Utf8Path, Utf8PathBuf};
use std::{collections::VecDeque, io};
use tracing::warn;

/// The name of the Git metadata directory.
///
/// Downward searches never enter it.
pub const VCS_DIR_NAME: &str = ".git";

/// Breadth-first search below `start` for an entry matching `predicate`.
///
/// Entries named [`VCS_DIR_NAME`] are skipped entirely. Every directory at
/// depth *d* is examined before any directory at depth *d + 1*, so the
/// shallowest match wins. Within one directory, the match with the smallest
/// file name wins.
///
/// Symlinked directories are not followed.
pub fn search_down<P>(
    start: &Utf8Path,
    predicate: P,
) -> Result<Option<Utf8PathBuf>, SearchError>
where
    P: Fn(&Utf8DirEntry) -> bool,
{
    let mut queue = VecDeque::from([start.to_owned()]);

    while let Some(dir) = queue.pop_front() {
        let entries = list_dir(&dir)?;
        let mut found = None;
        for entry in entries {
            if entry.file_name() == VCS_DIR_NAME {
                continue;
            }
            if found.is_none() && predicate(&entry) {
                found = Some(entry.path().to_owned());
            }
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                queue.push_back(entry.into_path());
            }
        }
        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(None)
}

/// Searches `start` and then each of its ancestors for a directory with a
/// direct child matching `predicate`.
///
/// Returns the first such directory, which is `start` itself if it
/// qualifies. Stops after the filesystem root.
pub fn search_up<P>(
    start: &Utf8Path,
    predicate: P,
) -> Result<Option<Utf8PathBuf>, SearchError>
where
    P: Fn(&Utf8DirEntry) -> bool,
{
    for dir in start.ancestors() {
        if first_match(dir, &predicate)?.is_some() {
            return Ok(Some(dir.to_owned()));
        }
    }
    Ok(None)
}

/// Returns the first direct child of `dir` matching `predicate`.
pub fn first_match<P>(
    dir: &Utf8Path,
    predicate: P,
) -> Result<Option<Utf8PathBuf>, SearchError>
where
    P: Fn(&Utf8DirEntry) -> bool,
{
    Ok(list_dir(dir)?
        .into_iter()
        .find(|entry| predicate(entry))
        .map(Utf8DirEntry::into_path))
}

/// Lists the direct children of `dir`, sorted by file name.
fn list_dir(dir: &Utf8Path) -> Result<Vec<Utf8DirEntry>, SearchError> {
    let read_dir = dir.read_dir_utf8().map_err(|source| SearchError::ReadDir {
        path: dir.to_owned(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => entries.push(entry),
            // camino reports non-UTF-8 names as InvalidData. Such entries
            // can never match a name-based predicate.
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                warn!(%dir, "skipping directory entry with non-UTF-8 name");
            }
            Err(source) => {
                return Err(SearchError::ReadDir {
                    path: dir.to_owned(),
                    source,
                });
            }
        }
    }
    entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));
    Ok(entries)
}
