// Copyright 2026 Oxide Computer Company

//! Repository-relative asset paths.

use crate::RepoPathError;
use camino::{Utf8Component, Utf8Path};
use std::{fmt, str::FromStr};

/// A path relative to the repository root, as passed to Git.
///
/// # Invariants
///
/// - The path is non-empty.
/// - The path uses forward slashes (backslashes are normalized on
///   construction), so the same value works on every platform.
/// - Every path component is a normal file or directory name (no `..`,
///   `.`, root `/`, or Windows prefixes).
///
/// Equality is exact string equality. `Content/Foo.uasset` and
/// `Content/Foo.uasset.bak` are unrelated paths.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoPath(String);

impl RepoPath {
    /// Creates a new `RepoPath`, normalizing backslashes to forward slashes.
    ///
    /// Returns an error if:
    /// - The path is empty.
    /// - The path contains a newline character.
    /// - The path is absolute, or has a `.` or `..` segment.
    /// - The path has an empty segment (`a//b`, or a trailing `/`).
    pub fn new(path: &str) -> Result<Self, RepoPathError> {
        let normalized = path.replace('\\', "/");
        if normalized.is_empty() {
            return Err(RepoPathError::Empty);
        }
        if normalized.contains('\n') {
            return Err(RepoPathError::NewlineInPath);
        }

        // Check segments on the string itself: `Utf8Path::components`
        // silently drops interior `.`, repeated and trailing separators.
        if normalized.starts_with('/') {
            return Err(RepoPathError::InvalidPathComponent {
                path: normalized.into(),
                component: "/".to_owned(),
            });
        }
        let bad_segment = normalized
            .split('/')
            .find(|segment| matches!(*segment, "" | "." | ".."))
            .map(str::to_owned);
        match bad_segment {
            Some(segment) if segment.is_empty() => {
                return Err(RepoPathError::EmptyComponent {
                    path: normalized.into(),
                });
            }
            Some(component) => {
                return Err(RepoPathError::InvalidPathComponent {
                    path: normalized.into(),
                    component,
                });
            }
            None => {}
        }
        // Windows prefixes (e.g. `C:`) are only visible to the host's
        // path parser.
        if let Some(component) =
            find_non_normal_component(Utf8Path::new(&normalized))
        {
            return Err(RepoPathError::InvalidPathComponent {
                path: normalized.into(),
                component,
            });
        }

        Ok(RepoPath(normalized))
    }

    /// Creates a `RepoPath` from a relative filesystem path, joining its
    /// components with `/` regardless of the host separator.
    pub fn from_relative(path: &Utf8Path) -> Result<Self, RepoPathError> {
        if let Some(component) = find_non_normal_component(path) {
            return Err(RepoPathError::InvalidPathComponent {
                path: path.to_owned(),
                component,
            });
        }
        let joined = path
            .components()
            .map(|component| component.as_str())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(&joined)
    }

    /// Returns the path as a string with forward slashes.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path as a [`Utf8Path`].
    pub fn as_path(&self) -> &Utf8Path {
        Utf8Path::new(&self.0)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RepoPath {
    type Err = RepoPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepoPath::new(s)
    }
}

/// Returns the first non-normal component in the path, if any.
fn find_non_normal_component(path: &Utf8Path) -> Option<String> {
    path.components().find_map(|component| match component {
        Utf8Component::Normal(_) => None,
        Utf8Component::Prefix(_)
        | Utf8Component::RootDir
        | Utf8Component::CurDir
        | Utf8Component::ParentDir => Some(component.as_str().to_owned()),
    })
}
