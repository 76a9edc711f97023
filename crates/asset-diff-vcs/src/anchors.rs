// Copyright 2026 Oxide Computer Company

//! Locating the repository root, the project descriptor and the asset.

use crate::{
    AnchorError, AssetPathError,
    search::{VCS_DIR_NAME, first_match, search_down, search_up},
};
use asset_diff::RepoPath;
use camino::{Utf8Component, Utf8DirEntry, Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::io;
use tracing::debug;

/// The file name suffix of an Unreal Engine project descriptor.
pub const PROJECT_SUFFIX: &str = ".uproject";

/// The fixed reference points of a diff run: the repository root and the
/// project descriptor passed to the diff tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchors {
    repo_root: Utf8PathBuf,
    project: Utf8PathBuf,
}

impl Anchors {
    /// Creates anchors from already-known paths.
    pub fn new(
        repo_root: impl Into<Utf8PathBuf>,
        project: impl Into<Utf8PathBuf>,
    ) -> Self {
        Anchors { repo_root: repo_root.into(), project: project.into() }
    }

    /// Locates both anchors starting from `cwd`, which must be absolute.
    ///
    /// The repository root is the nearest ancestor of `cwd` (or `cwd`
    /// itself) containing `.git`. The project descriptor is searched for
    /// below the repository root first, then above `cwd`.
    pub fn locate(cwd: &Utf8Path) -> Result<Self, AnchorError> {
        let repo_root = find_repository_root(cwd)?;
        let project = find_project_descriptor(&repo_root, cwd)?;
        Ok(Anchors { repo_root, project })
    }

    /// Returns the repository root.
    pub fn repo_root(&self) -> &Utf8Path {
        &self.repo_root
    }

    /// Returns the path to the project descriptor.
    pub fn project(&self) -> &Utf8Path {
        &self.project
    }
}

/// Finds the nearest directory at or above `cwd` that contains `.git`.
///
/// `.git` may be a directory or a file (as in worktrees and submodules).
pub fn find_repository_root(
    cwd: &Utf8Path,
) -> Result<Utf8PathBuf, AnchorError> {
    let repo_root = search_up(cwd, |entry| entry.file_name() == VCS_DIR_NAME)?
        .ok_or_else(|| AnchorError::RepositoryRootNotFound {
            start: cwd.to_owned(),
        })?;
    debug!(%repo_root, "found {VCS_DIR_NAME}");
    Ok(repo_root)
}

/// Finds the project descriptor: first breadth-first below `repo_root`,
/// then in `cwd` and its ancestors.
pub fn find_project_descriptor(
    repo_root: &Utf8Path,
    cwd: &Utf8Path,
) -> Result<Utf8PathBuf, AnchorError> {
    let mut project = search_down(repo_root, is_project_descriptor)?;
    if project.is_none() {
        debug!(%repo_root, "no {PROJECT_SUFFIX} below root, searching upward");
        if let Some(dir) = search_up(cwd, is_project_descriptor)? {
            project = first_match(&dir, is_project_descriptor)?;
        }
    }

    let project = project.ok_or_else(|| {
        AnchorError::ProjectDescriptorNotFound {
            suffix: PROJECT_SUFFIX,
            repo_root: repo_root.to_owned(),
            start: cwd.to_owned(),
        }
    })?;
    debug!(%project, "found {PROJECT_SUFFIX}");
    Ok(project)
}

fn is_project_descriptor(entry: &Utf8DirEntry) -> bool {
    entry.file_name().ends_with(PROJECT_SUFFIX)
        && entry.file_type().is_ok_and(|t| t.is_file())
}

/// An asset that exists in the working copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    path: Utf8PathBuf,
    repo_path: RepoPath,
}

impl Asset {
    /// Validates a user-supplied asset path.
    ///
    /// `user_path` is joined to `cwd` (unless already absolute) and `.` and
    /// `..` components are resolved lexically. The result must be a regular
    /// file inside `repo_root`.
    pub fn validate(
        cwd: &Utf8Path,
        repo_root: &Utf8Path,
        user_path: &Utf8Path,
    ) -> Result<Self, AssetPathError> {
        let path = normalize_lexically(&cwd.join(user_path));

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(AssetPathError::NotAFile { path }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(AssetPathError::NotFound { path });
            }
            Err(source) => return Err(AssetPathError::Io { path, source }),
        }

        let relative = match path.strip_prefix(repo_root) {
            Ok(relative) => relative,
            Err(_) => {
                return Err(AssetPathError::OutsideRepository {
                    path,
                    repo_root: repo_root.to_owned(),
                });
            }
        };
        let repo_path = match RepoPath::from_relative(relative) {
            Ok(repo_path) => repo_path,
            Err(error) => {
                return Err(AssetPathError::InvalidRepoPath { path, error });
            }
        };

        debug!(%path, %repo_path, "asset path");
        Ok(Asset { path, repo_path })
    }

    /// Returns the absolute path to the asset in the working copy.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the asset path relative to the repository root.
    pub fn repo_path(&self) -> &RepoPath {
        &self.repo_path
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_str()),
        }
    }
    out
}
