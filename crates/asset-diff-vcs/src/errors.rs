// Copyright 2026 Oxide Computer Company

//! Error types for asset resolution, materialization and diffing.

use asset_diff::{
    LfsOidParseError, RepoPath, RepoPathError, Revision, RevisionParseError,
};
use camino::Utf8PathBuf;
use std::{ffi::OsString, io};
use thiserror::Error;

// ---- Environment errors ----

/// An error from reading a required value from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvError {
    /// The environment variable is unset or blank.
    #[error("${var} environment variable is not set ({hint})")]
    Missing {
        /// The environment variable name.
        var: &'static str,
        /// What the variable should be set to.
        hint: &'static str,
    },

    /// The environment variable is set but is not valid UTF-8.
    #[error(
        "${var} environment variable is not valid \
         UTF-8: {value:?}"
    )]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },
}

// ---- Search and anchor errors ----

/// An error that occurs while listing a directory during a search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Reading the directory failed.
    #[error("failed to read directory {path}")]
    ReadDir {
        /// The directory being listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// An error that occurs while locating the repository root or the project
/// descriptor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnchorError {
    /// No ancestor of the start directory contains `.git`.
    #[error("unable to find .git starting from {start}")]
    RepositoryRootNotFound {
        /// The directory the upward search started from.
        start: Utf8PathBuf,
    },

    /// No project descriptor was found below the repository root or above
    /// the start directory.
    #[error(
        "unable to find a *{suffix} project file below {repo_root} \
         or above {start}"
    )]
    ProjectDescriptorNotFound {
        /// The file name suffix that was searched for.
        suffix: &'static str,
        /// The repository root searched downward.
        repo_root: Utf8PathBuf,
        /// The directory the upward fallback started from.
        start: Utf8PathBuf,
    },

    /// A directory could not be read during the search.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// An error that occurs while validating the asset path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetPathError {
    /// Nothing exists at the asset path.
    #[error("asset path {path} does not exist")]
    NotFound {
        /// The absolute asset path.
        path: Utf8PathBuf,
    },

    /// The asset path exists but is not a regular file.
    #[error("asset path {path} does not point to a regular file")]
    NotAFile {
        /// The absolute asset path.
        path: Utf8PathBuf,
    },

    /// The asset is not inside the repository.
    #[error("asset path {path} is not inside the repository at {repo_root}")]
    OutsideRepository {
        /// The absolute asset path.
        path: Utf8PathBuf,
        /// The repository root.
        repo_root: Utf8PathBuf,
    },

    /// The asset's path relative to the repository root is not usable.
    #[error("asset path {path} cannot be expressed relative to the repository")]
    InvalidRepoPath {
        /// The absolute asset path.
        path: Utf8PathBuf,
        /// Details about the validation error.
        #[source]
        error: RepoPathError,
    },

    /// An I/O error occurred while checking the asset path.
    #[error("I/O error while checking asset path {path}")]
    Io {
        /// The absolute asset path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

// ---- Tool errors ----

/// An error from running a version control command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    /// Failed to spawn the process.
    #[error("failed to run {binary_path:?} in {cwd}")]
    SpawnFailed {
        /// The path to the executable.
        binary_path: String,
        /// The working directory where the command was run.
        cwd: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The command exited unsuccessfully.
    #[error("`{command}` failed ({exit_status}): {stderr}")]
    Failed {
        /// The command line that was run, for display.
        command: String,
        /// A human-readable description of the exit status (e.g.,
        /// "exit status: 128" or "signal: 9").
        exit_status: String,
        /// The stderr output from the command.
        stderr: String,
    },
}

/// An error from running the external diff tool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiffToolError {
    /// Failed to spawn the diff tool.
    #[error("failed to run diff tool {tool} in {cwd}")]
    SpawnFailed {
        /// The path to the diff tool.
        tool: Utf8PathBuf,
        /// The working directory where the tool was run.
        cwd: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The diff tool exited unsuccessfully.
    #[error("diff tool {tool} failed ({exit_status})")]
    Failed {
        /// The path to the diff tool.
        tool: Utf8PathBuf,
        /// A human-readable description of the exit status.
        exit_status: String,
    },
}

// ---- Resolution errors ----

/// An error that occurs while resolving an asset's revision or storage mode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The asset has never been committed.
    #[error("could not find a previous revision for asset {path}")]
    NoHistory {
        /// The asset path relative to the repository root.
        path: RepoPath,
    },

    /// `git log` returned something that is not a single revision.
    #[error("unexpected revision output for asset {path}")]
    InvalidRevision {
        /// The asset path relative to the repository root.
        path: RepoPath,
        /// Details about the parsing error.
        #[source]
        error: RevisionParseError,
    },

    /// A version control command failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

// ---- Materialization errors ----

/// Errors that can occur while materializing the old revision of an asset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaterializeError {
    /// `git lfs env` did not report a local media directory.
    #[error("unable to find LocalMediaDir in `git lfs env` output:\n{output}")]
    LocalMediaDirMissing {
        /// The full `git lfs env` output.
        output: String,
    },

    /// The LFS pointer at the revision has no `oid sha256:` line.
    #[error(
        "unable to find an LFS oid for {path} at {revision} \
         in `git cat-file` output:\n{output}"
    )]
    ObjectIdMissing {
        /// The asset path relative to the repository root.
        path: RepoPath,
        /// The revision that was inspected.
        revision: Revision,
        /// The full `git cat-file` output.
        output: String,
    },

    /// The LFS pointer's oid is malformed.
    #[error("invalid LFS oid {oid:?} for {path} at {revision}")]
    InvalidObjectId {
        /// The asset path relative to the repository root.
        path: RepoPath,
        /// The revision that was inspected.
        revision: Revision,
        /// The oid text that failed to parse.
        oid: String,
        /// Details about the parsing error.
        #[source]
        error: LfsOidParseError,
    },

    /// The LFS object is not present in the local object store.
    #[error(
        "LFS object {path} is not a file \
         (run `git lfs fetch` to download it)"
    )]
    ObjectNotFound {
        /// The expected location of the object.
        path: Utf8PathBuf,
    },

    /// Failed to create the temporary directory.
    #[error("failed to create temporary directory")]
    CreateTempDir(#[source] io::Error),

    /// Failed to write the materialized file.
    #[error("failed to write old revision to {path}")]
    WriteOutput {
        /// The path where the write failed.
        path: Utf8PathBuf,
        /// The underlying write error.
        #[source]
        error: AtomicWriteError,
    },

    /// A version control command failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// An error that occurred during an atomic file write.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AtomicWriteError {
    /// Writing contents to the temporary file failed.
    #[error("writing file contents failed")]
    Write(#[source] io::Error),

    /// The atomic write infrastructure failed (e.g., creating the
    /// temporary file, or renaming it into place).
    #[error("atomic create or rename failed")]
    Rename(#[source] io::Error),
}

// ---- Pipeline errors ----

/// An error from any stage of an asset diff run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// A required environment value is missing or invalid.
    #[error("configuration error")]
    Env(#[from] EnvError),

    /// The repository root or project descriptor was not found.
    #[error("failed to locate repository anchors")]
    Anchor(#[from] AnchorError),

    /// The asset path is not a file inside the repository.
    #[error("invalid asset")]
    Asset(#[from] AssetPathError),

    /// The asset's revision or storage mode could not be resolved.
    #[error("failed to resolve asset revision")]
    Resolve(#[from] ResolveError),

    /// The old revision could not be materialized.
    #[error("failed to materialize old revision")]
    Materialize(#[from] MaterializeError),

    /// The diff tool failed.
    #[error("failed to run diff tool")]
    DiffTool(#[from] DiffToolError),
}
